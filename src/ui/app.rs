use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;
use tracing::debug;

use crate::error::BorrowError;
use crate::library::Library;
use crate::models::BookId;

use super::forms::{LoginField, LoginForm};
use super::helpers::{centered_rect, cursor_column, key_hints, surface_error};
use super::screens::{CatalogScreen, ReturnDialog};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Upper bound for the borrowed-books panel so the table keeps most rows.
const BORROWED_PANEL_MAX: u16 = 8;

/// Top-level navigation: the login gate or the logged-in catalog.
enum Screen {
    Login(LoginForm),
    Catalog(CatalogScreen),
}

/// Overlays scoped to the catalog screen.
enum Mode {
    Normal,
    Returning(ReturnDialog),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The library is owned
/// here; screens only keep the reader's name and rendered snapshots.
pub struct App {
    library: Library,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            screen: Screen::Login(LoginForm::default()),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Process one key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Returning(dialog) => self.handle_return_dialog(code, dialog),
        };
        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let screen = mem::replace(&mut self.screen, Screen::Login(LoginForm::default()));
        let (screen, mode) = match screen {
            Screen::Login(form) => (self.handle_login_key(code, form, exit), Mode::Normal),
            Screen::Catalog(catalog) => self.handle_catalog_key(code, catalog, exit),
        };
        self.screen = screen;
        mode
    }

    fn handle_login_key(&mut self, code: KeyCode, mut form: LoginForm, exit: &mut bool) -> Screen {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.library.login(&form.name, &form.degree) {
                Ok(user) => {
                    let name = user.name.clone();
                    self.set_status(format!("Logged in as {name}."), StatusKind::Info);
                    return Screen::Catalog(CatalogScreen::new(&self.library, &name));
                }
                Err(err) => {
                    let message = form.reject(&err);
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Screen::Login(form)
    }

    fn handle_catalog_key(
        &mut self,
        code: KeyCode,
        mut catalog: CatalogScreen,
        exit: &mut bool,
    ) -> (Screen, Mode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => catalog.move_selection(-1),
            KeyCode::Down => catalog.move_selection(1),
            KeyCode::PageUp => catalog.move_selection(-10),
            KeyCode::PageDown => catalog.move_selection(10),
            KeyCode::Home => catalog.select_first(),
            KeyCode::End => catalog.select_last(),
            KeyCode::Char('b') | KeyCode::Enter => self.borrow_selected(&mut catalog),
            KeyCode::Char('r') => {
                let borrowed = self.library.list_borrowed(&catalog.user_name);
                match ReturnDialog::open(borrowed) {
                    Some(dialog) => {
                        self.clear_status();
                        return (Screen::Catalog(catalog), Mode::Returning(dialog));
                    }
                    None => self.set_status("You have no borrowed books", StatusKind::Warning),
                }
            }
            KeyCode::Char('l') => {
                debug!(user = %catalog.user_name, "Logged out");
                self.set_status(
                    format!("{} logged out.", catalog.user_name),
                    StatusKind::Info,
                );
                return (Screen::Login(LoginForm::default()), Mode::Normal);
            }
            _ => {}
        }
        (Screen::Catalog(catalog), Mode::Normal)
    }

    fn borrow_selected(&mut self, catalog: &mut CatalogScreen) {
        let Some(id) = catalog.current_entry().map(|entry| entry.id) else {
            self.set_status("Select a book first", StatusKind::Warning);
            return;
        };

        match self.perform_borrow(&catalog.user_name, id) {
            Ok(title) => self.set_status(format!("You borrowed '{title}'"), StatusKind::Info),
            Err(err) => {
                let message = match err.downcast_ref::<BorrowError>() {
                    Some(BorrowError::OutOfStock { .. } | BorrowError::BookNotFound(_)) => {
                        "Book not available".to_string()
                    }
                    _ => surface_error(&err),
                };
                self.set_status(message, StatusKind::Error);
            }
        }
        catalog.refresh(&self.library);
    }

    /// Lend book `id` to `user_name`, returning the borrowed title.
    fn perform_borrow(&mut self, user_name: &str, id: BookId) -> Result<String> {
        let book = self
            .library
            .borrow(user_name, id)
            .with_context(|| format!("failed to borrow book {id}"))?;
        Ok(book.title.clone())
    }

    /// Hand back the reader's earliest copy of `title`.
    fn perform_return(&mut self, user_name: &str, title: &str) -> Result<String> {
        let book = self
            .library
            .return_by_title(user_name, title)
            .with_context(|| format!("failed to return '{title}'"))?;
        Ok(book.title.clone())
    }

    fn handle_return_dialog(&mut self, code: KeyCode, mut dialog: ReturnDialog) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Return cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Up => dialog.move_selection(-1),
            KeyCode::Down => dialog.move_selection(1),
            KeyCode::Enter => {
                let Screen::Catalog(catalog) = &self.screen else {
                    return Mode::Normal;
                };
                let Some(title) = dialog.current_title() else {
                    return Mode::Normal;
                };
                let user_name = catalog.user_name.clone();
                let outcome = self.perform_return(&user_name, title);
                if let Screen::Catalog(catalog) = &mut self.screen {
                    catalog.refresh(&self.library);
                }
                match outcome {
                    Ok(title) => {
                        self.set_status(format!("You returned '{title}'"), StatusKind::Info);
                        return Mode::Normal;
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            _ => {}
        }
        Mode::Returning(dialog)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Catalog(catalog) => self.draw_catalog(frame, content_area, catalog),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Returning(dialog) = &self.mode {
            self.draw_return_dialog(frame, area, dialog);
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Login / Sign Up")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", LoginField::Name),
            form.build_line("Degree", LoginField::Degree),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to log in • Tab to switch • Esc to quit",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            LoginField::Name => ("Name: ", 0),
            LoginField::Degree => ("Degree: ", 1),
        };
        let cursor_x = cursor_column(inner, prefix.len() + form.value_len(form.active));
        frame.set_cursor_position((cursor_x, inner.y.saturating_add(row)));
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect, catalog: &CatalogScreen) {
        let borrowed_lines = catalog.borrowed_lines();
        let panel_height = (borrowed_lines.len() as u16).min(BORROWED_PANEL_MAX) + 1;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(panel_height),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(Span::styled(
            catalog.welcome_line(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let borrowed: Vec<Line> = borrowed_lines.into_iter().map(Line::from).collect();
        let panel = Paragraph::new(borrowed)
            .style(Style::default().fg(Color::Blue))
            .wrap(Wrap { trim: false });
        frame.render_widget(panel, chunks[1]);

        let header_row = Row::new(["ID", "Title", "Author", "Quantity"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = catalog.entries.iter().map(|entry| {
            let quantity_style = if entry.quantity == 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(entry.id.to_string()),
                Cell::from(entry.title.clone()),
                Cell::from(entry.author.clone()),
                Cell::from(entry.quantity.to_string()).style(quantity_style),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(50),
                Constraint::Percentage(38),
                Constraint::Length(8),
            ],
        )
        .header(header_row)
        .block(Block::default().title("Books").borders(Borders::ALL))
        .row_highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(Some(catalog.selected));
        frame.render_stateful_widget(table, chunks[2], &mut state);
    }

    fn draw_return_dialog(&self, frame: &mut Frame, area: Rect, dialog: &ReturnDialog) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Return Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(Paragraph::new("Select a book to return:"), chunks[0]);

        let items: Vec<ListItem> = dialog
            .items
            .iter()
            .map(|entry| ListItem::new(entry.title.clone()))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(dialog.selected));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::Returning(_)) => &[
                ("[↑↓]", "Navigate"),
                ("[Enter]", "Return"),
                ("[Esc]", "Cancel"),
            ],
            (Screen::Login(_), _) => &[
                ("[Tab]", "Switch Field"),
                ("[Enter]", "Login"),
                ("[Esc]", "Quit"),
            ],
            (Screen::Catalog(_), _) => &[
                ("[↑↓]", "Navigate"),
                ("[b]", "Borrow"),
                ("[r]", "Return"),
                ("[l]", "Logout"),
                ("[q]", "Quit"),
            ],
        };
        Line::from(key_hints(hints))
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::config::Config;

    fn new_app() -> App {
        App::new(Library::seed(&Config::default()))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn login(app: &mut App, name: &str, degree: &str) {
        type_text(app, name);
        press(app, KeyCode::Tab);
        type_text(app, degree);
        press(app, KeyCode::Enter);
    }

    fn status(app: &App) -> Option<(&str, StatusKind)> {
        app.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.kind))
    }

    fn quantity(app: &App, id: u32) -> u32 {
        app.library()
            .find_book(BookId(id))
            .map(|book| book.quantity)
            .unwrap_or_default()
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn login_with_wrong_degree_stays_on_form() {
        let mut app = new_app();
        login(&mut app, "Ali", "BS CS");

        assert!(matches!(app.screen, Screen::Login(_)));
        assert_eq!(
            status(&app),
            Some((
                "Access Denied: Only BS AI students are allowed!",
                StatusKind::Error
            ))
        );
        assert_eq!(app.library().user_count(), 0);
    }

    #[test]
    fn login_with_blank_field_asks_to_fill_all() {
        let mut app = new_app();
        login(&mut app, "Ali", "");
        assert_eq!(
            status(&app),
            Some(("Please fill all fields", StatusKind::Error))
        );
    }

    #[test]
    fn borrow_and_return_through_keys() {
        let mut app = new_app();
        login(&mut app, "Ali", "bs ai");
        assert!(matches!(app.screen, Screen::Catalog(_)));

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(
            status(&app),
            Some((
                "You borrowed 'Artificial Intelligence: A Modern Approach'",
                StatusKind::Info
            ))
        );
        assert_eq!(quantity(&app, 1), 4);

        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(app.mode, Mode::Returning(_)));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status(&app),
            Some((
                "You returned 'Artificial Intelligence: A Modern Approach'",
                StatusKind::Info
            ))
        );
        assert_eq!(quantity(&app, 1), 5);
    }

    #[test]
    fn return_without_loans_only_warns() {
        let mut app = new_app();
        login(&mut app, "Ali", "BS AI");
        press(&mut app, KeyCode::Char('r'));

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status(&app),
            Some(("You have no borrowed books", StatusKind::Warning))
        );
    }

    #[test]
    fn empty_shelf_reports_not_available() {
        let mut app = new_app();
        login(&mut app, "Ali", "BS AI");
        press(&mut app, KeyCode::Down);
        for _ in 0..5 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(quantity(&app, 2), 0);
        assert_eq!(status(&app), Some(("Book not available", StatusKind::Error)));
    }

    #[test]
    fn logout_and_back_in_resumes_loans() {
        let mut app = new_app();
        login(&mut app, "Ali", "BS AI");
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('l'));
        assert!(matches!(app.screen, Screen::Login(_)));

        login(&mut app, "Ali", "bs ai");
        let Screen::Catalog(catalog) = &app.screen else {
            panic!("expected catalog screen");
        };
        assert_eq!(catalog.borrowed.len(), 1);
        assert_eq!(catalog.degree, "BS AI");
        assert_eq!(app.library().user_count(), 1);
    }

    #[test]
    fn esc_quits_from_login_and_q_from_catalog() {
        let mut app = new_app();
        assert!(press(&mut app, KeyCode::Esc));

        let mut app = new_app();
        login(&mut app, "Ali", "BS AI");
        assert!(!press(&mut app, KeyCode::Char('b')));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn catalog_renders_welcome_and_table() {
        let mut app = new_app();
        login(&mut app, "Ali", "BS AI");
        press(&mut app, KeyCode::Char('b'));

        let screen = render(&app);
        assert!(screen.contains("Welcome Ali (BS AI)!"));
        assert!(screen.contains("Ali already borrowed:"));
        assert!(screen.contains("Quantity"));
        assert!(screen.contains("Deep Learning"));
    }

    #[test]
    fn login_renders_form() {
        let app = new_app();
        let screen = render(&app);
        assert!(screen.contains("Login / Sign Up"));
        assert!(screen.contains("Name: <required>"));
    }

    #[test]
    fn domain_errors_surface_their_root_message() {
        let mut app = new_app();
        let err = app.perform_borrow("Nobody", BookId(1)).unwrap_err();
        assert_eq!(surface_error(&err), "no reader named 'Nobody' is registered");

        login(&mut app, "Ali", "BS AI");
        let err = app.perform_return("Ali", "Deep Learning").unwrap_err();
        assert_eq!(err.to_string(), "failed to return 'Deep Learning'");
        assert_eq!(
            surface_error(&err),
            "'Deep Learning' is not among your borrowed books"
        );
    }

    #[test]
    fn long_name_keeps_cursor_inside_form() {
        let mut app = new_app();
        type_text(&mut app, &"x".repeat(400));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 100);
    }
}
