//! Yes/no confirmation popup.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::utils::centered_fixed;
use crate::domain::entities::MemberId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Pending,
    Confirmed,
    Cancelled,
}

/// Asks before deleting a member.
pub struct ConfirmDialog {
    pub member_id: MemberId,
    pub member_name: String,
}

impl ConfirmDialog {
    #[must_use]
    pub fn delete_member(member_id: MemberId, member_name: impl Into<String>) -> Self {
        Self {
            member_id,
            member_name: member_name.into(),
        }
    }

    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> ConfirmChoice {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmChoice::Confirmed,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => ConfirmChoice::Cancelled,
            _ => ConfirmChoice::Pending,
        }
    }
}

impl Widget for &ConfirmDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered_fixed(50, 7, area);
        Clear.render(area, buf);

        let lines = vec![
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(
                    self.member_name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
            Line::from(Span::styled(
                "The deletion is recorded in the transaction log.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(" y ", Style::default().fg(Color::Black).bg(Color::Red)),
                Span::raw(" Delete   "),
                Span::styled(" n ", Style::default().fg(Color::Black).bg(Color::Gray)),
                Span::raw(" Cancel"),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Confirm "),
            )
            .render(area, buf);
    }
}
