//! Core library surface for the AI Library Manager TUI application.
//!
//! The domain (`models`, `library`) knows nothing about the terminal, so the
//! `bin` target and the integration tests drive the same lending rules.
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod models;
pub mod ui;

/// Startup settings and where they live on disk.
pub use config::{config_path, data_dir, Config};

/// Failures reported by the lending operations.
pub use error::{BorrowError, ConfigError, LoginError, ReturnError};

/// The registry that owns the catalog and readers.
pub use library::Library;

/// Domain types and the snapshots handed to renderers.
pub use models::{Book, BookId, BorrowedEntry, CatalogEntry, User};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
