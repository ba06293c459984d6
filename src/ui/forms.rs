use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::LoginError;

/// Internal representation of the login form fields.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) name: String,
    pub(crate) degree: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

/// Fields available within the login form.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum LoginField {
    #[default]
    Name,
    Degree,
}

impl LoginForm {
    /// Swap focus between the name and degree fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Name => LoginField::Degree,
            LoginField::Degree => LoginField::Name,
        };
    }

    /// Append a character to the active field. Control characters are
    /// ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Name => self.name.push(ch),
            LoginField::Degree => self.degree.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Name => {
                self.name.pop();
            }
            LoginField::Degree => {
                self.degree.pop();
            }
        }
    }

    /// Record a rejected submission so the modal can show it under the fields.
    pub(crate) fn reject(&mut self, err: &LoginError) -> String {
        let message = match err {
            LoginError::EmptyField => err.to_string(),
            LoginError::WrongDegree { .. } => format!("Access Denied: {err}"),
        };
        self.error = Some(message.clone());
        message
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: LoginField) -> Line<'static> {
        let (value, is_active) = match field {
            LoginField::Name => (&self.name, self.active == LoginField::Name),
            LoginField::Degree => (&self.degree, self.active == LoginField::Degree),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Name => self.name.chars().count(),
            LoginField::Degree => self.degree.chars().count(),
        }
    }
}
