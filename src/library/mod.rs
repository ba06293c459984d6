//! The lending registry, split across logical submodules.

mod catalog;
mod loans;
mod users;

use std::collections::HashMap;

use crate::models::{Book, User};

pub use catalog::DEFAULT_CATALOG;
pub use users::normalize_login;

/// Owns every `Book` and `User` for the lifetime of the process. Readers refer
/// to books through `BookId` handles, so all mutation goes through here.
#[derive(Debug)]
pub struct Library {
    books: Vec<Book>,
    users: HashMap<String, User>,
    required_degree: String,
}

impl Library {
    /// An empty desk gated on `required_degree`.
    pub fn new(required_degree: impl Into<String>) -> Self {
        Self {
            books: Vec::new(),
            users: HashMap::new(),
            required_degree: required_degree.into(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn required_degree(&self) -> &str {
        &self.required_degree
    }
}
