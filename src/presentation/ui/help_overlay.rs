//! Key reference and about box.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::utils::centered_rect;
use crate::presentation::commands::{CommandRegistry, Menu};

const FORM_KEYS: [(&str, &str); 5] = [
    ("Tab / S-Tab", "Next / previous field"),
    ("Space", "Toggle checkbox"),
    ("+", "Add to book value"),
    ("C-s", "Save (Enter on the last field)"),
    ("Esc", "Cancel"),
];

pub struct HelpOverlay<'a> {
    registry: &'a CommandRegistry,
    program: &'a str,
    organization: &'a str,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(
        registry: &'a CommandRegistry,
        program: &'a str,
        organization: &'a str,
    ) -> Self {
        Self {
            registry,
            program,
            organization,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(Color::Cyan);

        let mut lines = vec![
            Line::from(Span::styled(self.program, heading)),
            Line::from(format!("{} v{}", self.organization, crate::VERSION)),
            Line::default(),
        ];

        for menu in Menu::ALL {
            lines.push(Line::from(Span::styled(menu.label(), heading)));
            let mut seen = Vec::new();
            for binding in self.registry.menu(menu) {
                if seen.contains(&binding.command) {
                    continue;
                }
                seen.push(binding.command);
                let keys: Vec<String> = self
                    .registry
                    .menu(menu)
                    .filter(|b| b.command == binding.command)
                    .map(|b| b.key_display())
                    .collect();
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<16}", keys.join(" / ")), key_style),
                    Span::raw(binding.label),
                ]));
            }
            if menu == Menu::Edit {
                lines.push(Line::from(Span::styled(
                    "  In the member form:",
                    Style::default().fg(Color::Gray),
                )));
                for (key, label) in FORM_KEYS {
                    lines.push(Line::from(vec![
                        Span::styled(format!("    {key:<14}"), key_style),
                        Span::raw(label),
                    ]));
                }
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered_rect(60, 90, area);
        Clear.render(area, buf);
        let lines = self.lines();
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Help / About "),
            )
            .render(area, buf);
    }
}
