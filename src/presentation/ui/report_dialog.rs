//! Transaction history dialog with filters and exports.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use super::utils::{action_color, centered_rect, transaction_status_color};
use crate::domain::entities::{Transaction, TransactionAction, TransactionStatus};
use crate::domain::serde_utils::parse_date;
use crate::domain::services::validation::INVALID_DATE;
use crate::domain::services::{ReportFilter, distinct_actions};
use crate::presentation::events::is_ctrl;
use crate::presentation::widgets::TextInput;

const STATUSES: [TransactionStatus; 3] = [
    TransactionStatus::Active,
    TransactionStatus::Expired,
    TransactionStatus::Deleted,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportAction {
    None,
    Close,
    ExportPdf(ReportFilter),
    ExportCsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFocus {
    Name,
    Status,
    Action,
    From,
    To,
    Table,
}

impl ReportFocus {
    const ORDER: [Self; 6] = [
        Self::Name,
        Self::Status,
        Self::Action,
        Self::From,
        Self::To,
        Self::Table,
    ];
}

/// Cycles `None -> first -> ... -> last -> None`.
fn cycle<T: Copy + PartialEq>(current: Option<T>, options: &[T], forward: bool) -> Option<T> {
    let len = options.len();
    if len == 0 {
        return None;
    }
    let position = current.and_then(|c| options.iter().position(|o| *o == c));
    let next = match (position, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(i), true) => (i + 1 < len).then_some(i + 1),
        (Some(i), false) => i.checked_sub(1),
    };
    next.map(|i| options[i])
}

pub struct ReportDialog {
    transactions: Vec<Transaction>,
    actions: Vec<TransactionAction>,
    name: TextInput,
    status: Option<TransactionStatus>,
    action: Option<TransactionAction>,
    date_from: TextInput,
    date_to: TextInput,
    focus: ReportFocus,
    table_state: TableState,
    busy: bool,
}

impl ReportDialog {
    /// Opens the dialog over the audit log, newest first.
    #[must_use]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let actions = distinct_actions(&transactions);
        let mut dialog = Self {
            transactions,
            actions,
            name: TextInput::new(" Name ").placeholder("Any"),
            status: None,
            action: None,
            date_from: TextInput::new(" From ").placeholder("YYYY-MM-DD"),
            date_to: TextInput::new(" To ").placeholder("YYYY-MM-DD"),
            focus: ReportFocus::Name,
            table_state: TableState::default(),
            busy: false,
        };
        dialog.apply_focus();
        dialog.reset_selection();
        dialog
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Filter described by the inputs. Dates that do not parse are ignored.
    #[must_use]
    pub fn filter(&self) -> ReportFilter {
        let name = self.name.value().trim();
        ReportFilter {
            name: (!name.is_empty()).then(|| name.to_string()),
            status: self.status,
            action: self.action,
            date_from: parse_date(self.date_from.value()),
            date_to: parse_date(self.date_to.value()),
        }
    }

    /// Transactions passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Transaction> {
        self.filter().apply(&self.transactions)
    }

    /// Summary line, e.g. `Showing 3 of 10 transactions`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} transactions",
            self.visible().len(),
            self.transactions.len()
        )
    }

    /// Resets every filter.
    pub fn clear_filters(&mut self) {
        self.name.clear();
        self.date_from.clear();
        self.date_to.clear();
        self.status = None;
        self.action = None;
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        let any = !self.visible().is_empty();
        self.table_state.select(any.then_some(0));
    }

    fn apply_focus(&mut self) {
        self.name.set_focused(self.focus == ReportFocus::Name);
        self.date_from.set_focused(self.focus == ReportFocus::From);
        self.date_to.set_focused(self.focus == ReportFocus::To);
    }

    fn move_focus(&mut self, forward: bool) {
        let order = ReportFocus::ORDER;
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        self.focus = order[if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        }];
        self.apply_focus();
    }

    fn check_date(input: &mut TextInput) {
        let value = input.value().trim();
        let invalid = !value.is_empty() && parse_date(value).is_none();
        input.set_error(invalid.then(|| INVALID_DATE.to_string()));
    }

    fn scroll(&mut self, down: bool) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ReportAction {
        if self.busy {
            return ReportAction::None;
        }
        if is_ctrl(&key, 'p') {
            return ReportAction::ExportPdf(self.filter());
        }
        if is_ctrl(&key, 'e') {
            return ReportAction::ExportCsv;
        }
        if is_ctrl(&key, 'r') {
            self.clear_filters();
            return ReportAction::None;
        }

        match key.code {
            KeyCode::Esc => return ReportAction::Close,
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            _ => self.edit_focused(key),
        }
        ReportAction::None
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        let forward = !matches!(key.code, KeyCode::Left | KeyCode::Up);
        let changed = match self.focus {
            ReportFocus::Table => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => self.scroll(true),
                    KeyCode::Up | KeyCode::Char('k') => self.scroll(false),
                    _ => {}
                }
                false
            }
            ReportFocus::Status | ReportFocus::Action => {
                if !matches!(
                    key.code,
                    KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right
                ) {
                    return;
                }
                if self.focus == ReportFocus::Status {
                    self.status = cycle(self.status, &STATUSES, forward);
                } else {
                    self.action = cycle(self.action, &self.actions, forward);
                }
                true
            }
            ReportFocus::Name => self.name.handle_key(key),
            ReportFocus::From => {
                let changed = self.date_from.handle_key(key);
                Self::check_date(&mut self.date_from);
                changed
            }
            ReportFocus::To => {
                let changed = self.date_to.handle_key(key);
                Self::check_date(&mut self.date_to);
                changed
            }
        };
        if changed {
            self.reset_selection();
        }
    }

    fn selector<'a>(
        &self,
        title: &'a str,
        value: Option<String>,
        focus: ReportFocus,
    ) -> Paragraph<'a> {
        let focused = self.focus == focus;
        let border = if focused { Color::Cyan } else { Color::Gray };
        let text = value.map_or_else(
            || Span::styled("All", Style::default().fg(Color::DarkGray)),
            |v| Span::styled(v, Style::default().fg(Color::White)),
        );
        let arrows = Span::styled("  ◂▸", Style::default().fg(Color::DarkGray));
        Paragraph::new(Line::from(vec![text, arrows]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = centered_rect(92, 90, area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Transaction History ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters, summary, table_area, hint] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let [name, status, action, from, to] = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Length(16),
        ])
        .areas(filters);
        frame.render_widget(&self.name, name);
        frame.render_widget(
            self.selector(" Status ", self.status.map(|s| s.to_string()), ReportFocus::Status),
            status,
        );
        frame.render_widget(
            self.selector(" Action ", self.action.map(|a| a.to_string()), ReportFocus::Action),
            action,
        );
        frame.render_widget(&self.date_from, from);
        frame.render_widget(&self.date_to, to);

        let filter = self.filter();
        let mut summary_lines = vec![Line::from(Span::styled(
            self.summary(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if filter.is_active() {
            summary_lines.push(Line::from(Span::styled(
                format!("Filtered by {}", filter.describe()),
                Style::default().fg(Color::Yellow),
            )));
        }
        frame.render_widget(Paragraph::new(summary_lines), summary);

        let rows: Vec<Row> = filter
            .apply(&self.transactions)
            .into_iter()
            .map(|tx| {
                Row::new(vec![
                    Cell::from(tx.name.clone()),
                    Cell::from(tx.display_start_date()),
                    Cell::from(tx.display_end_date()),
                    Cell::from(tx.display_book_value()),
                    Cell::from(Span::styled(
                        tx.display_status(),
                        Style::default().fg(transaction_status_color(tx.status)),
                    )),
                    Cell::from(Span::styled(
                        tx.action.as_str(),
                        Style::default().fg(action_color(tx.action)),
                    )),
                    Cell::from(tx.timestamp.clone()),
                    Cell::from(tx.changes.clone().unwrap_or_default()),
                ])
            })
            .collect();
        let empty = rows.is_empty();

        let table_block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(
            if self.focus == ReportFocus::Table {
                Color::Cyan
            } else {
                Color::Gray
            },
        ));
        if empty {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No transactions match the current filters",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(table_block),
                table_area,
            );
        } else {
            let table = Table::new(
                rows,
                [
                    Constraint::Fill(2),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Length(8),
                    Constraint::Length(11),
                    Constraint::Length(23),
                    Constraint::Fill(3),
                ],
            )
            .header(
                Row::new([
                    "Name",
                    "Start",
                    "End",
                    "Book Value",
                    "Status",
                    "Action",
                    "Timestamp",
                    "Changes",
                ])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .block(table_block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(table, table_area, &mut self.table_state);
        }

        let hint_text = if self.busy {
            "Exporting..."
        } else {
            "Tab: Next filter | Space: Cycle | C-p: Export PDF | C-e: Export CSV | C-r: Clear | Esc: Close"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint_text, Style::default().fg(Color::DarkGray))),
            hint,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use crossterm::event::KeyModifiers;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn tx(name: &str, action: TransactionAction, start: Option<NaiveDate>) -> Transaction {
        let mut tx = Transaction::deletion(name, now());
        tx.action = action;
        tx.start_date = start;
        tx.status = Some(TransactionStatus::Active);
        tx
    }

    fn dialog() -> ReportDialog {
        ReportDialog::new(vec![
            tx("Ana", TransactionAction::Added, NaiveDate::from_ymd_opt(2024, 1, 1)),
            tx("Ben", TransactionAction::Updated, NaiveDate::from_ymd_opt(2024, 6, 1)),
            tx("Ana", TransactionAction::Updated, NaiveDate::from_ymd_opt(2024, 9, 1)),
        ])
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_name_filter_updates_summary() {
        let mut dialog = dialog();
        assert_eq!(dialog.summary(), "Showing 3 of 3 transactions");

        dialog.handle_key(key(KeyCode::Char('a')));
        dialog.handle_key(key(KeyCode::Char('n')));

        assert_eq!(dialog.summary(), "Showing 2 of 3 transactions");
    }

    #[test]
    fn test_action_selector_cycles_present_actions() {
        let mut dialog = dialog();
        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Tab));

        dialog.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dialog.filter().action, Some(TransactionAction::Added));
        dialog.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dialog.filter().action, Some(TransactionAction::Updated));
        dialog.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dialog.filter().action, None);
    }

    #[test]
    fn test_invalid_date_is_flagged_and_ignored() {
        let mut dialog = dialog();
        for _ in 0..3 {
            dialog.handle_key(key(KeyCode::Tab));
        }
        for c in "2024-13".chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(dialog.date_from.error(), Some(INVALID_DATE));
        assert_eq!(dialog.filter().date_from, None);

        dialog.handle_key(key(KeyCode::Backspace));
        dialog.handle_key(key(KeyCode::Backspace));
        for c in "06-01".chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
        assert!(dialog.date_from.error().is_none());
        assert_eq!(dialog.summary(), "Showing 2 of 3 transactions");
    }

    #[test]
    fn test_export_and_clear_shortcuts() {
        let mut dialog = dialog();
        dialog.handle_key(key(KeyCode::Char('b')));

        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        match dialog.handle_key(ctrl('p')) {
            ReportAction::ExportPdf(filter) => assert_eq!(filter.name.as_deref(), Some("b")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(dialog.handle_key(ctrl('e')), ReportAction::ExportCsv);

        dialog.handle_key(ctrl('r'));
        assert!(!dialog.filter().is_active());
    }

    #[test]
    fn test_cycle_wraps_through_none() {
        let options = [1, 2];
        assert_eq!(cycle(None, &options, true), Some(1));
        assert_eq!(cycle(Some(2), &options, true), None);
        assert_eq!(cycle(None, &options, false), Some(2));
        assert_eq!(cycle(Some(1), &options, false), None);
        assert_eq!(cycle::<i32>(None, &[], true), None);
    }
}
