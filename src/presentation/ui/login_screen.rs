//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Validating,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFocus {
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    Quit,
}

/// Login screen UI.
pub struct LoginScreen {
    title: String,
    username: TextInput,
    password: TextInput,
    focus: LoginFocus,
    state: LoginState,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates new login screen.
    #[must_use]
    pub fn new(title: impl Into<String>, default_username: &str) -> Self {
        let mut username = TextInput::new(" Username ").placeholder("Enter your username");
        username.set_value(default_username);
        let password = TextInput::new(" Password ")
            .password()
            .placeholder("Enter your password");

        let mut screen = Self {
            title: title.into(),
            username,
            password,
            focus: LoginFocus::Username,
            state: LoginState::Input,
            error_message: None,
        };
        if default_username.is_empty() {
            screen.focus(LoginFocus::Username);
        } else {
            screen.focus(LoginFocus::Password);
        }
        screen
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Builds the request from what was typed.
    #[must_use]
    pub fn request(&self) -> LoginRequest {
        LoginRequest::new(self.username.value(), self.password.value())
    }

    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    /// Shows an error and clears the password field.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
        self.password.clear();
        self.focus(LoginFocus::Password);
    }

    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    fn focus(&mut self, focus: LoginFocus) {
        self.focus = focus;
        self.username.set_focused(focus == LoginFocus::Username);
        self.password.set_focused(focus == LoginFocus::Password);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginFocus::Username => &mut self.username,
            LoginFocus::Password => &mut self.password,
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::Enter => {
                if self.focus == LoginFocus::Username {
                    self.focus(LoginFocus::Password);
                } else {
                    return LoginAction::Submit;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                let next = match self.focus {
                    LoginFocus::Username => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Username,
                };
                self.focus(next);
            }
            _ => {
                if self.focused_input().handle_key(key) && self.state == LoginState::Error {
                    self.reset();
                }
            }
        }

        LoginAction::None
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(52),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center);

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [heading, _, user_area, pass_area, _, status_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("Sign in to manage the membership roster")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White))
            .render(heading, buf);

        (&self.username).render(user_area, buf);
        (&self.password).render(pass_area, buf);

        let status = match self.state {
            LoginState::Input => Line::default(),
            LoginState::Validating => Line::from(Span::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => Line::from(Span::styled(
                self.error_message.as_deref().unwrap_or("Sign-in failed"),
                Style::default().fg(Color::Red),
            )),
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(status_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Enter: Sign in", Style::default().fg(Color::DarkGray)),
            Span::raw(" | "),
            Span::styled("Tab: Next field", Style::default().fg(Color::DarkGray)),
            Span::raw(" | "),
            Span::styled("Esc: Quit", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center)
        .render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_prefilled_username_focuses_password() {
        let mut screen = LoginScreen::new("Hello Club", "admin");
        type_text(&mut screen, "pw");

        let request = screen.request();
        assert_eq!(request.credentials.username(), "admin");
        assert_eq!(request.credentials.password().expose(), "pw");
    }

    #[test]
    fn test_enter_moves_then_submits() {
        let mut screen = LoginScreen::new("Hello Club", "");
        type_text(&mut screen, "admin");

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        type_text(&mut screen, "secret");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_blank_submit_is_left_to_the_use_case() {
        let mut screen = LoginScreen::new("Hello Club", "admin");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
        assert!(screen.request().credentials.is_incomplete());
    }

    #[test]
    fn test_error_clears_on_typing() {
        let mut screen = LoginScreen::new("Hello Club", "admin");
        screen.set_error("Invalid username or password");
        assert_eq!(screen.state(), LoginState::Error);

        screen.handle_key(key(KeyCode::Char('x')));
        assert_eq!(screen.state(), LoginState::Input);
    }

    #[test]
    fn test_ignores_keys_while_validating() {
        let mut screen = LoginScreen::new("Hello Club", "admin");
        screen.set_validating();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::None);
    }
}
