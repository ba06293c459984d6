//! Domain models for the lending desk. `Book` and `User` are plain data holders
//! with the two or three state transitions the catalog needs; the `Library`
//! registry owns every instance and hands out `BookId` handles instead of
//! references so a user's loans never outlive the catalog entry they point at.

use std::fmt;

/// Stable catalog key assigned when the seed list is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub u32);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalog title and how many copies are currently on the shelf.
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Copies available to borrow. Only `User::borrow_book` decrements it and
    /// only after `check_availability` succeeded, so it never underflows.
    pub quantity: u32,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    /// Whether at least one copy is on the shelf.
    pub fn check_availability(&self) -> bool {
        self.quantity > 0
    }

    /// Shift the shelf count by `delta`. Callers gate decrements on
    /// `check_availability`; the saturating add keeps the count at zero if
    /// that contract is ever broken.
    pub fn update_quantity(&mut self, delta: i32) {
        self.quantity = self.quantity.saturating_add_signed(delta);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered reader. The name is the registry key; the degree is whatever
/// was supplied on first login and is never overwritten afterwards.
pub struct User {
    pub name: String,
    pub degree: String,
    /// Loans in borrow order. Borrowing two copies of one title records the
    /// same id twice.
    pub borrowed: Vec<BookId>,
}

impl User {
    pub fn new(name: impl Into<String>, degree: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            degree: degree.into(),
            borrowed: Vec::new(),
        }
    }

    /// Take one copy of `book` if any is left. Returns `false` without
    /// touching either side when the shelf is empty.
    pub fn borrow_book(&mut self, book: &mut Book) -> bool {
        if !book.check_availability() {
            return false;
        }
        book.update_quantity(-1);
        self.borrowed.push(book.id);
        true
    }

    /// Hand back one copy of `book`. Only the first matching loan is
    /// removed, so a reader holding two copies keeps the other one.
    pub fn return_book(&mut self, book: &mut Book) -> bool {
        let Some(position) = self.borrowed.iter().position(|id| *id == book.id) else {
            return false;
        };
        self.borrowed.remove(position);
        book.update_quantity(1);
        true
    }

    pub fn has_borrowed(&self, id: BookId) -> bool {
        self.borrowed.contains(&id)
    }
}

/// Read-only row used to render the catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub quantity: u32,
}

impl From<&Book> for CatalogEntry {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            quantity: book.quantity,
        }
    }
}

/// One line of a reader's loan list, in borrow order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowedEntry {
    pub id: BookId,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(quantity: u32) -> Book {
        Book::new(BookId(1), "Deep Learning", "Ian Goodfellow", quantity)
    }

    #[test]
    fn availability_tracks_quantity() {
        assert!(sample_book(1).check_availability());
        assert!(!sample_book(0).check_availability());
    }

    #[test]
    fn update_quantity_applies_signed_delta() {
        let mut book = sample_book(5);
        book.update_quantity(-1);
        assert_eq!(book.quantity, 4);
        book.update_quantity(2);
        assert_eq!(book.quantity, 6);
    }

    #[test]
    fn update_quantity_does_not_wrap_below_zero() {
        let mut book = sample_book(0);
        book.update_quantity(-1);
        assert_eq!(book.quantity, 0);
    }

    #[test]
    fn borrow_fails_on_empty_shelf_without_mutation() {
        let mut user = User::new("Ali", "BS AI");
        let mut book = sample_book(0);

        assert!(!user.borrow_book(&mut book));
        assert_eq!(book.quantity, 0);
        assert!(user.borrowed.is_empty());
    }

    #[test]
    fn borrowing_twice_records_duplicate_loans() {
        let mut user = User::new("Ali", "BS AI");
        let mut book = sample_book(2);

        assert!(user.borrow_book(&mut book));
        assert!(user.borrow_book(&mut book));
        assert!(!user.borrow_book(&mut book));

        assert_eq!(book.quantity, 0);
        assert_eq!(user.borrowed, vec![BookId(1), BookId(1)]);
    }

    #[test]
    fn return_removes_a_single_occurrence() {
        let mut user = User::new("Ali", "BS AI");
        let mut book = sample_book(5);
        user.borrow_book(&mut book);
        user.borrow_book(&mut book);

        assert!(user.return_book(&mut book));
        assert_eq!(user.borrowed, vec![BookId(1)]);
        assert_eq!(book.quantity, 4);
    }

    #[test]
    fn return_of_unheld_book_is_rejected() {
        let mut user = User::new("Ali", "BS AI");
        let mut book = sample_book(5);

        assert!(!user.return_book(&mut book));
        assert_eq!(book.quantity, 5);
        assert!(!user.has_borrowed(book.id));
    }
}
