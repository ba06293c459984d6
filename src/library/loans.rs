use tracing::{info, warn};

use crate::error::{BorrowError, ReturnError};
use crate::models::{Book, BookId, BorrowedEntry};

use super::Library;

impl Library {
    /// Lend one copy of book `id` to the reader registered as `user_name`.
    pub fn borrow(&mut self, user_name: &str, id: BookId) -> Result<&Book, BorrowError> {
        let Some(user) = self.users.get_mut(user_name) else {
            warn!(user = user_name, %id, "Borrow by unregistered reader");
            return Err(BorrowError::UnknownUser(user_name.to_string()));
        };
        let Some(book) = self.books.iter_mut().find(|book| book.id == id) else {
            warn!(user = user_name, %id, "Borrow of unknown book");
            return Err(BorrowError::BookNotFound(id));
        };

        if !user.borrow_book(book) {
            warn!(user = user_name, %id, title = %book.title, "Borrow refused, no copies left");
            return Err(BorrowError::OutOfStock {
                id,
                title: book.title.clone(),
            });
        }

        info!(user = user_name, %id, title = %book.title, left = book.quantity, "Book borrowed");
        Ok(book)
    }

    /// Titles the reader currently holds, oldest loan first. Unregistered
    /// names hold nothing.
    pub fn list_borrowed(&self, user_name: &str) -> Vec<BorrowedEntry> {
        let Some(user) = self.users.get(user_name) else {
            return Vec::new();
        };
        user.borrowed
            .iter()
            .filter_map(|id| self.find_book(*id))
            .map(|book| BorrowedEntry {
                id: book.id,
                title: book.title.clone(),
            })
            .collect()
    }

    /// Take back one copy of book `id` from the reader.
    pub fn return_book(&mut self, user_name: &str, id: BookId) -> Result<&Book, ReturnError> {
        let Some(user) = self.users.get_mut(user_name) else {
            warn!(user = user_name, %id, "Return by unregistered reader");
            return Err(ReturnError::UnknownUser(user_name.to_string()));
        };
        if !user.has_borrowed(id) {
            let label = self
                .books
                .iter()
                .find(|book| book.id == id)
                .map_or_else(|| id.to_string(), |book| book.title.clone());
            warn!(user = user_name, %id, title = %label, "Return refused, not on loan");
            return Err(ReturnError::NotBorrowedByUser(label));
        }
        let Some(book) = self.books.iter_mut().find(|book| book.id == id) else {
            warn!(user = user_name, %id, "Loan points at a book missing from the catalog");
            return Err(ReturnError::NotBorrowedByUser(id.to_string()));
        };

        user.return_book(book);

        info!(user = user_name, %id, title = %book.title, left = book.quantity, "Book returned");
        Ok(book)
    }

    /// Return the reader's earliest loan whose title matches `title` exactly,
    /// which is how the return dialog identifies its selection.
    pub fn return_by_title(&mut self, user_name: &str, title: &str) -> Result<&Book, ReturnError> {
        let held = self
            .list_borrowed(user_name)
            .into_iter()
            .find(|entry| entry.title == title);

        match held {
            Some(entry) => self.return_book(user_name, entry.id),
            None if self.user(user_name).is_none() => {
                Err(ReturnError::UnknownUser(user_name.to_string()))
            }
            None => {
                warn!(user = user_name, title, "Return refused, title not on loan to reader");
                Err(ReturnError::NotBorrowedByUser(title.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Config;

    fn desk_with_reader() -> Library {
        let mut library = Library::seed(&Config::default());
        library.get_user("Ali", "BS AI");
        library
    }

    fn quantity(library: &Library, id: u32) -> u32 {
        library
            .find_book(BookId(id))
            .map(|book| book.quantity)
            .unwrap_or_default()
    }

    #[test]
    fn borrow_decrements_and_records_loan() {
        let mut library = desk_with_reader();
        let book = library.borrow("Ali", BookId(2)).unwrap();
        assert_eq!(book.title, "Deep Learning");
        assert_eq!(book.quantity, 4);

        assert_eq!(
            library.list_borrowed("Ali"),
            vec![BorrowedEntry {
                id: BookId(2),
                title: "Deep Learning".to_string(),
            }]
        );
    }

    #[test]
    fn borrow_reports_missing_book_and_reader() {
        let mut library = desk_with_reader();
        assert_eq!(
            library.borrow("Ali", BookId(21)).unwrap_err(),
            BorrowError::BookNotFound(BookId(21))
        );
        assert_eq!(
            library.borrow("Nobody", BookId(1)).unwrap_err(),
            BorrowError::UnknownUser("Nobody".to_string())
        );
    }

    #[test]
    fn borrow_stops_at_zero() {
        let mut library = desk_with_reader();
        for _ in 0..5 {
            library.borrow("Ali", BookId(1)).unwrap();
        }

        let err = library.borrow("Ali", BookId(1)).unwrap_err();
        assert!(matches!(err, BorrowError::OutOfStock { id: BookId(1), .. }));
        assert_eq!(quantity(&library, 1), 0);
        assert_eq!(library.list_borrowed("Ali").len(), 5);
    }

    #[test]
    fn return_by_title_removes_earliest_matching_loan() {
        let mut library = desk_with_reader();
        library.borrow("Ali", BookId(3)).unwrap();
        library.borrow("Ali", BookId(18)).unwrap();
        library.borrow("Ali", BookId(3)).unwrap();

        let returned = library.return_by_title("Ali", "AI Superpowers").unwrap();
        assert_eq!(returned.quantity, 5);

        let titles: Vec<String> = library
            .list_borrowed("Ali")
            .into_iter()
            .map(|entry| entry.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Hands-On Machine Learning with Scikit-Learn and TensorFlow".to_string(),
                "Hands-On Machine Learning with Scikit-Learn and TensorFlow".to_string(),
            ]
        );
        assert_eq!(quantity(&library, 3), 3);
    }

    #[test]
    fn return_of_unheld_title_is_reported() {
        let mut library = desk_with_reader();
        assert_eq!(
            library.return_by_title("Ali", "Deep Learning").unwrap_err(),
            ReturnError::NotBorrowedByUser("Deep Learning".to_string())
        );
        assert_eq!(
            library.return_book("Ali", BookId(2)).unwrap_err(),
            ReturnError::NotBorrowedByUser("Deep Learning".to_string())
        );
        assert_eq!(
            library.return_book("Ali", BookId(99)).unwrap_err(),
            ReturnError::NotBorrowedByUser("99".to_string())
        );
        assert_eq!(
            library.return_by_title("Nobody", "Deep Learning").unwrap_err(),
            ReturnError::UnknownUser("Nobody".to_string())
        );
        assert_eq!(quantity(&library, 2), 5);
    }

    #[test]
    fn loans_are_shared_catalog_state() {
        let mut library = desk_with_reader();
        library.get_user("Sara", "BS AI");
        library.borrow("Ali", BookId(5)).unwrap();
        library.borrow("Sara", BookId(5)).unwrap();

        assert_eq!(quantity(&library, 5), 3);
        assert!(library.return_book("Sara", BookId(5)).is_ok());
        assert!(library.return_book("Sara", BookId(5)).is_err());
        assert_eq!(quantity(&library, 5), 4);
        assert_eq!(library.list_borrowed("Ali").len(), 1);
    }
}
