//! Dashboard: roster metrics, search and the member table.

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
};

use super::utils::{format_peso, member_status_color};
use crate::application::use_cases::RosterSnapshot;
use crate::domain::entities::{Member, format_optional_date};
use crate::domain::services::{RosterMetrics, search_members};
use crate::presentation::commands::{Command, CommandRegistry};
use crate::presentation::widgets::{StatCard, TextInput};

/// Dashboard state.
pub struct DashboardScreen {
    title: String,
    snapshot: RosterSnapshot,
    metrics: RosterMetrics,
    now: DateTime<Utc>,
    refreshed_at: Option<DateTime<Utc>>,
    search: TextInput,
    searching: bool,
    table_state: TableState,
    loading: bool,
    accent: Color,
}

impl DashboardScreen {
    #[must_use]
    pub fn new(title: impl Into<String>, accent: Color, now: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            snapshot: RosterSnapshot::default(),
            metrics: RosterMetrics::default(),
            now,
            refreshed_at: None,
            search: TextInput::new(" Search members ").placeholder("Press / to search by name"),
            searching: false,
            table_state: TableState::default(),
            loading: true,
            accent,
        }
    }

    /// Replaces the roster and recomputes every derived value at `now`.
    pub fn set_snapshot(&mut self, mut snapshot: RosterSnapshot, now: DateTime<Utc>) {
        let selected_id = self.selected_member().map(|m| m.id.clone());

        snapshot
            .members
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        self.metrics = RosterMetrics::compute(&snapshot.members, now);
        self.snapshot = snapshot;
        self.now = now;
        self.refreshed_at = Some(now);
        self.loading = false;

        let visible = self.visible_members();
        let index = selected_id
            .and_then(|id| visible.iter().position(|m| m.id == id))
            .or_else(|| (!visible.is_empty()).then_some(0));
        self.table_state.select(index);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    #[must_use]
    pub const fn snapshot(&self) -> &RosterSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn metrics(&self) -> &RosterMetrics {
        &self.metrics
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    /// Members matching the search, in table order.
    #[must_use]
    pub fn visible_members(&self) -> Vec<&Member> {
        search_members(&self.snapshot.members, self.search.value())
    }

    #[must_use]
    pub fn selected_member(&self) -> Option<&Member> {
        let index = self.table_state.selected()?;
        self.visible_members().get(index).copied()
    }

    fn select(&mut self, index: Option<usize>) {
        let len = self.visible_members().len();
        self.table_state
            .select(index.filter(|_| len > 0).map(|i| i.min(len - 1)));
    }

    /// Handles a key. Returns the command the app has to carry out, if any.
    pub fn handle_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> Option<Command> {
        if self.searching {
            match key.code {
                KeyCode::Esc => {
                    self.search.clear();
                    self.stop_search();
                }
                KeyCode::Enter | KeyCode::Down | KeyCode::Tab => self.stop_search(),
                _ => {
                    if self.search.handle_key(key) {
                        self.select(Some(0));
                    }
                }
            }
            return None;
        }

        let command = registry.find_command(key)?;
        let current = self.table_state.selected().unwrap_or(0);
        match command {
            Command::SelectNext => self.select(Some(current + 1)),
            Command::SelectPrevious => self.select(Some(current.saturating_sub(1))),
            Command::SelectFirst => self.select(Some(0)),
            Command::SelectLast => self.select(Some(usize::MAX)),
            Command::Search => {
                self.searching = true;
                self.search.set_focused(true);
            }
            other => return Some(other),
        }
        None
    }

    fn stop_search(&mut self) {
        self.searching = false;
        self.search.set_focused(false);
        self.select(Some(0));
    }

    /// Scrolls the selection by mouse wheel steps.
    pub fn scroll(&mut self, down: bool) {
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            current + 1
        } else {
            current.saturating_sub(1)
        };
        self.select(Some(next));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
        self.render_header(frame, header);

        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)]).areas(body);
        self.render_sidebar(frame, sidebar);

        let [cards, gauge, search, table] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(main);
        self.render_cards(frame, cards);
        self.render_gauge(frame, gauge);
        frame.render_widget(&self.search, search);
        self.render_table(frame, table);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let status = if self.loading {
            Span::styled("Loading roster...", Style::default().fg(Color::Yellow))
        } else {
            let refreshed = self.refreshed_at.map_or_else(String::new, |at| {
                at.with_timezone(&Local).format("%-I:%M:%S %p").to_string()
            });
            Span::styled(
                format!("Updated {refreshed}"),
                Style::default().fg(Color::DarkGray),
            )
        };

        let line = Line::from(vec![
            Span::styled(
                self.title.as_str(),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            status,
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.accent));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let m = &self.metrics;
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Members   ", label),
                Span::styled(m.total.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Active    ", label),
                Span::styled(m.active.to_string(), Style::default().fg(Color::Green)),
            ]),
            Line::from(vec![
                Span::styled("Expired   ", label),
                Span::styled(m.expired.to_string(), Style::default().fg(Color::Red)),
            ]),
            Line::from(vec![
                Span::styled("Average   ", label),
                Span::styled(format_peso(m.average_book_value), value),
            ]),
            Line::from(vec![
                Span::styled("Log size  ", label),
                Span::styled(self.snapshot.transactions.len().to_string(), value),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Top members",
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            )),
        ];

        if m.leaders.is_empty() {
            lines.push(Line::from(Span::styled("No members yet", label)));
        }
        for (rank, leader) in m.leaders.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", rank + 1), label),
                Span::raw(leader.name.as_str()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", format_peso(leader.book_value)),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let block = Block::default()
            .borders(Borders::RIGHT)
            .title(" Quick stats ")
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let m = &self.metrics;
        let areas = Layout::horizontal([Constraint::Fill(1); 4]).split(area);

        frame.render_widget(
            StatCard::new("Total Members", m.total.to_string()).color(Color::Cyan),
            areas[0],
        );
        frame.render_widget(
            StatCard::new("Active", m.active.to_string())
                .caption(format!("{:.1}%", m.active_rate()))
                .color(Color::Green),
            areas[1],
        );
        frame.render_widget(
            StatCard::new("Expired", m.expired.to_string())
                .caption(format!("{:.1}%", m.expired_rate()))
                .color(Color::Red),
            areas[2],
        );
        frame.render_widget(
            StatCard::new("Total Book Value", format_peso(m.total_book_value)).color(self.accent),
            areas[3],
        );
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let m = &self.metrics;
        let ratio = if m.total == 0 {
            0.0
        } else {
            m.active_rate() / 100.0
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Active vs expired "))
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!(
                "Active {:.1}% | Expired {:.1}%",
                m.active_rate(),
                m.expired_rate()
            ));
        frame.render_widget(gauge, area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["Name", "Status", "Start", "End", "Book Value", "Email", "Mobile"])
            .style(Style::default().fg(self.accent).add_modifier(Modifier::BOLD));

        let now = self.now;
        let members = self.visible_members();
        let count = members.len();
        let rows: Vec<Row> = members
            .into_iter()
            .map(|member| {
                let status = member.status_at(now);
                Row::new(vec![
                    Cell::from(member.name.clone()),
                    Cell::from(Span::styled(
                        format!(" {status} "),
                        Style::default().fg(Color::Black).bg(member_status_color(status)),
                    )),
                    Cell::from(format_optional_date(member.start_date)),
                    Cell::from(format_optional_date(member.end_date)),
                    Cell::from(format_peso(member.book_value)),
                    Cell::from(member.email.clone()),
                    Cell::from(member.mobile.clone()),
                ])
            })
            .collect();

        let title = if self.search.value().trim().is_empty() {
            format!(" Members ({count}) ")
        } else {
            format!(" Members ({count} of {}) ", self.snapshot.members.len())
        };

        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Fill(2),
                Constraint::Length(13),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        if count == 0 {
            let message = if self.loading {
                "Loading..."
            } else {
                "No members found"
            };
            let block = Block::default().borders(Borders::ALL).title(" Members (0) ");
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
                    .block(block),
                area,
            );
            return;
        }

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MemberId;
    use chrono::{NaiveDate, TimeZone};
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn member(id: &str, name: &str, end: Option<NaiveDate>) -> Member {
        Member {
            id: MemberId::new(id),
            name: name.to_string(),
            end_date: end,
            book_value: Decimal::from(100),
            ..Member::default()
        }
    }

    fn screen() -> DashboardScreen {
        let mut screen = DashboardScreen::new("Hello Club", Color::Yellow, now());
        screen.set_snapshot(
            RosterSnapshot {
                members: vec![
                    member("2", "Carla", NaiveDate::from_ymd_opt(2024, 1, 1)),
                    member("1", "ana", None),
                    member("3", "Ben", None),
                ],
                transactions: Vec::new(),
            },
            now(),
        );
        screen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_snapshot_sorted_and_metrics_computed() {
        let screen = screen();
        let names: Vec<_> = screen.visible_members().iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["ana", "Ben", "Carla"]);
        assert_eq!(screen.metrics().expired, 1);
        assert_eq!(screen.selected_member().map(|m| m.name.as_str()), Some("ana"));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let registry = CommandRegistry::new();
        let mut screen = screen();

        for _ in 0..5 {
            assert_eq!(screen.handle_key(key(KeyCode::Down), &registry), None);
        }
        assert_eq!(screen.selected_member().map(|m| m.name.as_str()), Some("Carla"));

        screen.handle_key(key(KeyCode::Home), &registry);
        assert_eq!(screen.selected_member().map(|m| m.name.as_str()), Some("ana"));
    }

    #[test]
    fn test_search_filters_table() {
        let registry = CommandRegistry::new();
        let mut screen = screen();

        screen.handle_key(key(KeyCode::Char('/')), &registry);
        assert!(screen.is_searching());
        screen.handle_key(key(KeyCode::Char('B')), &registry);
        screen.handle_key(key(KeyCode::Enter), &registry);

        let names: Vec<_> = screen.visible_members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ben"]);
        assert_eq!(screen.selected_member().map(|m| m.name.as_str()), Some("Ben"));
    }

    #[test]
    fn test_selection_survives_refresh() {
        let registry = CommandRegistry::new();
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Down), &registry);

        let snapshot = screen.snapshot().clone();
        screen.set_snapshot(snapshot, now());

        assert_eq!(screen.selected_member().map(|m| m.name.as_str()), Some("Ben"));
    }

    #[test]
    fn test_actions_pass_through() {
        let registry = CommandRegistry::new();
        let mut screen = screen();

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('a')), &registry),
            Some(Command::AddMember)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('d')), &registry),
            Some(Command::DeleteMember)
        );
    }
}
