//! Ratatui front-end for the lending desk: a login gate, the catalog table
//! with the reader's loans, and a return picker. Screens render snapshots
//! taken from `Library` and push every mutation back through it.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
