use tracing::{debug, info, warn};

use crate::error::LoginError;
use crate::models::User;

use super::Library;

/// Trim both login fields and check them against the desk's degree gate.
/// The comparison ignores case, so "bs ai" and "Bs Ai" pass a "BS AI" gate.
pub fn normalize_login<'a>(
    name: &'a str,
    degree: &'a str,
    required_degree: &str,
) -> Result<(&'a str, &'a str), LoginError> {
    let name = name.trim();
    let degree = degree.trim();
    if name.is_empty() || degree.is_empty() {
        return Err(LoginError::EmptyField);
    }
    if degree.to_uppercase() != required_degree.trim().to_uppercase() {
        return Err(LoginError::WrongDegree {
            required: required_degree.to_string(),
        });
    }
    Ok((name, degree))
}

impl Library {
    /// Run the login gate and return the (possibly new) reader.
    pub fn login(&mut self, name: &str, degree: &str) -> Result<&User, LoginError> {
        let (name, degree) = match normalize_login(name, degree, &self.required_degree) {
            Ok(fields) => fields,
            Err(err) => {
                warn!(name = name.trim(), %err, "Login rejected");
                return Err(err);
            }
        };
        let user = self.get_user(name, degree);
        info!(name = %user.name, loans = user.borrowed.len(), "Reader logged in");
        Ok(user)
    }

    /// Fetch the reader registered under `name`, registering them with
    /// `degree` first if this is their first visit. A later call with another
    /// degree keeps the one recorded at registration.
    pub fn get_user(&mut self, name: &str, degree: &str) -> &User {
        let user = self
            .users
            .entry(name.to_string())
            .or_insert_with(|| User::new(name, degree));
        if user.degree != degree {
            debug!(
                name,
                registered = %user.degree,
                supplied = degree,
                "Keeping registered degree on repeat login"
            );
        }
        user
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
