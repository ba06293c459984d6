use tracing::debug;

use crate::config::{Config, SeedBook};
use crate::models::{Book, BookId, CatalogEntry};

use super::Library;

/// Titles shelved when no catalog is configured, in display order.
pub const DEFAULT_CATALOG: [(&str, &str); 20] = [
    (
        "Artificial Intelligence: A Modern Approach",
        "Stuart Russell & Peter Norvig",
    ),
    (
        "Deep Learning",
        "Ian Goodfellow, Yoshua Bengio, Aaron Courville",
    ),
    (
        "Hands-On Machine Learning with Scikit-Learn and TensorFlow",
        "Aurélien Géron",
    ),
    (
        "Pattern Recognition and Machine Learning",
        "Christopher Bishop",
    ),
    (
        "Reinforcement Learning: An Introduction",
        "Richard Sutton & Andrew Barto",
    ),
    ("Python Machine Learning", "Sebastian Raschka"),
    ("Grokking Artificial Intelligence Algorithms", "Rishal Hurbans"),
    ("Introduction to Artificial Intelligence", "Philip C. Jackson"),
    (
        "Speech and Language Processing",
        "Daniel Jurafsky & James H. Martin",
    ),
    (
        "Computer Vision: Algorithms and Applications",
        "Richard Szeliski",
    ),
    (
        "Probabilistic Graphical Models",
        "Daphne Koller & Nir Friedman",
    ),
    ("Neural Networks and Deep Learning", "Michael Nielsen"),
    ("Bayesian Reasoning and Machine Learning", "David Barber"),
    ("Artificial Intelligence for Humans", "Jeff Heaton"),
    (
        "Building Machine Learning Powered Applications",
        "Emmanuel Ameisen",
    ),
    ("Applied Artificial Intelligence", "Mariya Yao"),
    ("Data Science for Business", "Provost & Fawcett"),
    ("AI Superpowers", "Kai-Fu Lee"),
    ("The Hundred-Page Machine Learning Book", "Andriy Burkov"),
    ("Fundamentals of Deep Learning", "Nikhil Buduma"),
];

impl Library {
    /// Build the startup desk from `config`: the configured catalog when one
    /// is given, otherwise the built-in list. Ids run from 1 in list order.
    pub fn seed(config: &Config) -> Self {
        let mut library = Self::new(config.required_degree.clone());
        let seed: Vec<SeedBook> = match &config.catalog {
            Some(books) => books.clone(),
            None => DEFAULT_CATALOG
                .iter()
                .map(|(title, author)| SeedBook {
                    title: (*title).to_string(),
                    author: (*author).to_string(),
                })
                .collect(),
        };

        for (index, entry) in seed.into_iter().enumerate() {
            let id = BookId(index as u32 + 1);
            library.add_book(Book::new(id, entry.title, entry.author, config.initial_quantity));
        }
        library
    }

    /// Append a title to the end of the catalog.
    pub fn add_book(&mut self, book: Book) {
        debug!(id = %book.id, title = %book.title, quantity = book.quantity, "Shelved book");
        self.books.push(book);
    }

    /// Snapshot of the catalog for rendering, in catalog order.
    pub fn list_catalog(&self) -> Vec<CatalogEntry> {
        self.books.iter().map(CatalogEntry::from).collect()
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }
}
