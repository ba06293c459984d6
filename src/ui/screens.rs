use crate::library::Library;
use crate::models::{BorrowedEntry, CatalogEntry};

/// Backing state for the main catalog view of the logged-in reader.
pub(crate) struct CatalogScreen {
    pub(crate) user_name: String,
    pub(crate) degree: String,
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) borrowed: Vec<BorrowedEntry>,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(library: &Library, user_name: &str) -> Self {
        let mut screen = Self {
            user_name: user_name.to_string(),
            degree: String::new(),
            entries: Vec::new(),
            borrowed: Vec::new(),
            selected: 0,
        };
        screen.refresh(library);
        screen
    }

    /// Re-read the catalog and the reader's loans after any mutation.
    pub(crate) fn refresh(&mut self, library: &Library) {
        self.entries = library.list_catalog();
        self.borrowed = library.list_borrowed(&self.user_name);
        self.degree = library
            .user(&self.user_name)
            .map(|user| user.degree.clone())
            .unwrap_or_default();
        self.ensure_in_bounds();
    }

    pub(crate) fn current_entry(&self) -> Option<&CatalogEntry> {
        self.entries.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub(crate) fn welcome_line(&self) -> String {
        format!("Welcome {} ({})!", self.user_name, self.degree)
    }

    /// Text for the borrowed-books panel above the table.
    pub(crate) fn borrowed_lines(&self) -> Vec<String> {
        if self.borrowed.is_empty() {
            return vec![format!("{} has not borrowed any books yet.", self.user_name)];
        }
        let mut lines = Vec::with_capacity(self.borrowed.len() + 1);
        lines.push(format!("{} already borrowed:", self.user_name));
        lines.extend(self.borrowed.iter().map(|entry| format!("- {}", entry.title)));
        lines
    }

    fn ensure_in_bounds(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }
    }
}

/// Picker listing the reader's loans so one can be handed back.
pub(crate) struct ReturnDialog {
    pub(crate) items: Vec<BorrowedEntry>,
    pub(crate) selected: usize,
}

impl ReturnDialog {
    /// `None` when there is nothing to return, so no dialog opens.
    pub(crate) fn open(borrowed: Vec<BorrowedEntry>) -> Option<Self> {
        if borrowed.is_empty() {
            return None;
        }
        Some(Self {
            items: borrowed,
            selected: 0,
        })
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = self.items.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, (len - 1).max(0));
        self.selected = new as usize;
    }

    pub(crate) fn current_title(&self) -> Option<&str> {
        self.items.get(self.selected).map(|entry| entry.title.as_str())
    }
}
