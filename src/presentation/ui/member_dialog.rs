//! Add, edit, reactivate and view dialog for a single member.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::utils::centered_rect;
use crate::application::dto::MemberForm;
use crate::domain::entities::MemberField;
use crate::domain::errors::ValidationErrors;
use crate::domain::services::FormContext;
use crate::presentation::events::is_ctrl;
use crate::presentation::widgets::TextInput;

const LABEL_WIDTH: usize = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDialogAction {
    None,
    Submit,
    Close,
}

pub struct MemberDialog {
    form: MemberForm,
    focus: usize,
    amount: Option<TextInput>,
    saving: bool,
}

impl MemberDialog {
    #[must_use]
    pub fn new(form: MemberForm) -> Self {
        Self {
            form,
            focus: 0,
            amount: None,
            saving: false,
        }
    }

    #[must_use]
    pub const fn form(&self) -> &MemberForm {
        &self.form
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Shows rejected fields and moves focus to the first one.
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        if let Some(first) = errors.fields().next()
            && let Some(index) = MemberField::ALL.iter().position(|f| *f == first)
        {
            self.focus = index;
        }
        self.form.errors = errors;
        self.saving = false;
    }

    fn field(&self) -> MemberField {
        MemberField::ALL[self.focus]
    }

    fn move_focus(&mut self, forward: bool) {
        let len = MemberField::ALL.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MemberDialogAction {
        if self.saving {
            return MemberDialogAction::None;
        }
        if self.amount.is_some() {
            self.handle_amount_key(key);
            return MemberDialogAction::None;
        }

        let read_only = !self.form.is_editable();
        let last = self.focus + 1 == MemberField::ALL.len();

        match key.code {
            KeyCode::Esc => return MemberDialogAction::Close,
            _ if is_ctrl(&key, 's') => {
                return if read_only {
                    MemberDialogAction::Close
                } else {
                    MemberDialogAction::Submit
                };
            }
            KeyCode::Enter if read_only => return MemberDialogAction::Close,
            KeyCode::Enter if last => return MemberDialogAction::Submit,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ if read_only => {}
            KeyCode::Char('+') if self.field() == MemberField::BookValue => {
                self.amount = Some({
                    let mut input = TextInput::new(" Add amount ").placeholder("0.00");
                    input.set_focused(true);
                    input
                });
            }
            KeyCode::Char(' ') if self.field().is_flag() => {
                let field = self.field();
                self.form.draft.toggle(field);
            }
            _ => self.edit_text(key),
        }
        MemberDialogAction::None
    }

    fn edit_text(&mut self, key: KeyEvent) {
        let field = self.field();
        if !self.form.is_field_editable(field)
            || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }
        let Some(value) = self.form.draft.text_mut(field) else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        self.form.errors.remove(field);
    }

    fn handle_amount_key(&mut self, key: KeyEvent) {
        let Some(input) = self.amount.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.amount = None,
            KeyCode::Enter => {
                let typed = input.value().to_string();
                match self.form.add_to_book_value(&typed) {
                    Ok(_) => {
                        self.form.errors.remove(MemberField::BookValue);
                        self.amount = None;
                    }
                    Err(errors) => {
                        input.set_error(errors.get(MemberField::BookValue).map(str::to_string));
                    }
                }
            }
            _ => {
                input.handle_key(key);
            }
        }
    }

    fn field_line(&self, index: usize, field: MemberField) -> Line<'_> {
        let form = &self.form;
        let focused = index == self.focus;
        let required = form.context.required_fields().contains(&field);
        let editable = form.is_field_editable(field);

        let marker = if focused { "> " } else { "  " };
        let label = format!(
            "{:<width$}",
            format!("{}{}", field.label(), if required { " *" } else { "" }),
            width = LABEL_WIDTH
        );
        let value = match form.draft.flag(field) {
            Some(true) => "[x]".to_string(),
            Some(false) => "[ ]".to_string(),
            None => form.draft.text(field).unwrap_or_default().to_string(),
        };

        let mut value_style = if editable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if focused {
            value_style = value_style.add_modifier(Modifier::UNDERLINED);
        }
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(label, label_style),
            Span::styled(value, value_style),
        ];
        if focused && field == MemberField::BookValue && form.is_editable() {
            spans.push(Span::styled("  (+ to add)", Style::default().fg(Color::DarkGray)));
        }
        if let Some(error) = form.errors.get(field) {
            spans.push(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    }

    fn hint(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else if self.amount.is_some() {
            "Enter: Add | Esc: Cancel"
        } else if self.form.is_editable() {
            "Tab/S-Tab: Move | Space: Toggle | C-s: Save | Esc: Cancel"
        } else {
            "Tab/S-Tab: Move | Enter/Esc: Close"
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let area = centered_rect(70, 80, area);
        frame.render_widget(Clear, area);

        let border = match self.form.context {
            FormContext::Create => Color::Green,
            FormContext::Edit => Color::Cyan,
            FormContext::Reactivate => Color::Yellow,
            FormContext::View => Color::Gray,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.form.context.title()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let amount_height = if self.amount.is_some() { 3 } else { 0 };
        let [fields_area, amount_area, hint_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(amount_height),
            Constraint::Length(1),
        ])
        .areas(inner);

        let mut lines: Vec<Line> = MemberField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| self.field_line(i, *field))
            .collect();
        if !self.form.errors.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("{} field(s) need attention", self.form.errors.len()),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines), fields_area);

        if let Some(input) = &self.amount {
            frame.render_widget(input, amount_area);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(self.hint(), Style::default().fg(Color::DarkGray))),
            hint_area,
        );
    }
}
