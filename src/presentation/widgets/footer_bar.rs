use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::commands::{CommandRegistry, Menu};

/// Which part of the app has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    #[default]
    Login,
    Dashboard,
    Search,
    MemberForm,
    Report,
    Confirm,
    Help,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Dashboard => "ROSTER",
            Self::Search => "SEARCH",
            Self::MemberForm => "MEMBER",
            Self::Report => "REPORT",
            Self::Confirm => "CONFIRM",
            Self::Help => "HELP",
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub menu_style: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn with_accent(accent: Color) -> Self {
        Self {
            menu_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            focus_indicator: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            menu_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            info: Style::default().fg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// One group of the bar: an optional menu title and its key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterGroup {
    pub title: Option<&'static str>,
    pub hints: Vec<(String, &'static str)>,
}

impl FooterGroup {
    /// Groups the visible dashboard bindings under File, Edit, View and Help.
    #[must_use]
    pub fn menus(registry: &CommandRegistry) -> Vec<Self> {
        Menu::ALL
            .iter()
            .map(|menu| Self {
                title: Some(menu.label()),
                hints: registry
                    .menu(*menu)
                    .filter(|b| b.visible_in_bar)
                    .map(|b| (b.key_display(), b.label))
                    .collect(),
            })
            .collect()
    }

    /// Untitled group of key hints.
    #[must_use]
    pub fn hints(hints: &[(&str, &'static str)]) -> Vec<Self> {
        vec![Self {
            title: None,
            hints: hints.iter().map(|(k, l)| ((*k).to_string(), *l)).collect(),
        }]
    }
}

pub struct FooterBar<'a> {
    groups: &'a [FooterGroup],
    focus_context: Option<FocusContext>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(groups: &'a [FooterGroup]) -> Self {
        Self {
            groups,
            focus_context: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
        }

        for group in self.groups {
            spans.push(Span::raw(" "));
            if let Some(title) = group.title {
                spans.push(Span::styled(format!(" {title} "), self.style.menu_style));
            }
            for (key, label) in &group.hints {
                spans.push(Span::styled(format!(" {key} "), self.style.key_style));
                spans.push(Span::styled(format!(" {label}"), self.style.label_style));
            }
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.width()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width + 1);

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::from(Span::styled(info, self.style.info)))
                .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_groups() {
        let registry = CommandRegistry::new();
        let groups = FooterGroup::menus(&registry);

        let titles: Vec<_> = groups.iter().filter_map(|g| g.title).collect();
        assert_eq!(titles, vec!["File", "Edit", "View", "Help"]);
        assert!(groups[0].hints.contains(&("C-q".to_string(), "Quit")));
        assert!(!groups[2].hints.iter().any(|(k, _)| k == "Enter"));
    }

    #[test]
    fn test_render_shows_context_and_info() {
        let groups = FooterGroup::hints(&[("Esc", "Close")]);
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(&groups)
            .focus_context(FocusContext::Report)
            .right_info(Some("admin"))
            .render(area, &mut buf);

        let line: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("REPORT"));
        assert!(line.contains("Close"));
        assert!(line.trim_end().ends_with("admin"));
    }
}
