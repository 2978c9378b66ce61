//! Dashboard key bindings, grouped the way the menu bar shows them.

use std::fmt::{self, Write};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the operator can ask the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    SignOut,
    ToggleHelp,
    Refresh,
    AddMember,
    ViewMember,
    EditMember,
    DeleteMember,
    ReactivateMember,
    OpenReport,
    Search,
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
}

/// Menu a binding is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
    View,
    Help,
}

impl Menu {
    pub const ALL: [Self; 4] = [Self::File, Self::Edit, Self::View, Self::Help];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
            Self::View => "View",
            Self::Help => "Help",
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub command: Command,
    pub label: &'static str,
    pub menu: Menu,
    pub visible_in_bar: bool,
}

impl Keybind {
    #[must_use]
    pub const fn new(key: KeyEvent, command: Command, label: &'static str, menu: Menu) -> Self {
        Self {
            key,
            command,
            label,
            menu,
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Short key text, e.g. `C-q` or `F5`.
    #[must_use]
    pub fn key_display(&self) -> String {
        format_key(&self.key)
    }
}

/// Formats a key the way the footer shows it.
#[must_use]
pub fn format_key(key: &KeyEvent) -> String {
    let mut s = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("C-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        s.push_str("A-");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT)
        && !matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab)
    {
        s.push_str("S-");
    }

    match key.code {
        KeyCode::Char(' ') => s.push_str("Space"),
        KeyCode::Char(c) => s.push(c),
        KeyCode::Enter => s.push_str("Enter"),
        KeyCode::Esc => s.push_str("Esc"),
        KeyCode::Tab => s.push_str("Tab"),
        KeyCode::BackTab => s.push_str("S-Tab"),
        KeyCode::Up => s.push('↑'),
        KeyCode::Down => s.push('↓'),
        KeyCode::Home => s.push_str("Home"),
        KeyCode::End => s.push_str("End"),
        KeyCode::F(n) => {
            let _ = write!(s, "F{n}");
        }
        other => {
            let _ = write!(s, "{other:?}");
        }
    }
    s
}

/// Dashboard key map.
pub struct CommandRegistry {
    bindings: Vec<Keybind>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let key = KeyEvent::new;
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        let bindings = vec![
            Keybind::new(key(KeyCode::Char('q'), ctrl), Command::Quit, "Quit", Menu::File),
            Keybind::new(key(KeyCode::Char('l'), ctrl), Command::SignOut, "Sign out", Menu::File),
            Keybind::new(key(KeyCode::Char('a'), none), Command::AddMember, "Add", Menu::Edit),
            Keybind::new(key(KeyCode::Char('e'), none), Command::EditMember, "Edit", Menu::Edit),
            Keybind::new(
                key(KeyCode::Char('d'), none),
                Command::DeleteMember,
                "Delete",
                Menu::Edit,
            ),
            Keybind::new(
                key(KeyCode::Char('r'), none),
                Command::ReactivateMember,
                "Reactivate",
                Menu::Edit,
            ),
            Keybind::new(key(KeyCode::Char('v'), none), Command::ViewMember, "View", Menu::View),
            Keybind::new(
                key(KeyCode::Enter, none),
                Command::ViewMember,
                "View",
                Menu::View,
            )
            .hidden(),
            Keybind::new(key(KeyCode::Char('t'), none), Command::OpenReport, "Report", Menu::View),
            Keybind::new(key(KeyCode::Char('/'), none), Command::Search, "Search", Menu::View),
            Keybind::new(key(KeyCode::F(5), none), Command::Refresh, "Refresh", Menu::View),
            Keybind::new(
                key(KeyCode::Down, none),
                Command::SelectNext,
                "Next",
                Menu::View,
            )
            .hidden(),
            Keybind::new(key(KeyCode::Char('j'), none), Command::SelectNext, "Next", Menu::View)
                .hidden(),
            Keybind::new(key(KeyCode::Up, none), Command::SelectPrevious, "Previous", Menu::View)
                .hidden(),
            Keybind::new(
                key(KeyCode::Char('k'), none),
                Command::SelectPrevious,
                "Previous",
                Menu::View,
            )
            .hidden(),
            Keybind::new(
                key(KeyCode::Home, none),
                Command::SelectFirst,
                "First",
                Menu::View,
            )
            .hidden(),
            Keybind::new(key(KeyCode::End, none), Command::SelectLast, "Last", Menu::View).hidden(),
            Keybind::new(key(KeyCode::Char('?'), none), Command::ToggleHelp, "About", Menu::Help),
            Keybind::new(
                key(KeyCode::F(1), none),
                Command::ToggleHelp,
                "About",
                Menu::Help,
            )
            .hidden(),
        ];

        Self { bindings }
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every binding, in menu order.
    #[must_use]
    pub fn bindings(&self) -> &[Keybind] {
        &self.bindings
    }

    /// Bindings listed under a menu, hidden ones included.
    pub fn menu(&self, menu: Menu) -> impl Iterator<Item = &Keybind> {
        self.bindings.iter().filter(move |b| b.menu == menu)
    }

    /// Resolves a key press. Shift is ignored for characters, since
    /// terminals disagree on reporting it.
    #[must_use]
    pub fn find_command(&self, key: KeyEvent) -> Option<Command> {
        let normalize = |k: KeyEvent| match k.code {
            KeyCode::Char(_) => k.modifiers - KeyModifiers::SHIFT,
            _ => k.modifiers,
        };
        self.bindings
            .iter()
            .find(|b| b.key.code == key.code && normalize(b.key) == normalize(key))
            .map(|b| b.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command() {
        let registry = CommandRegistry::new();

        assert_eq!(
            registry.find_command(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(
            registry.find_command(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Command::ToggleHelp)
        );
        assert_eq!(
            registry.find_command(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Command::ViewMember)
        );
        assert_eq!(
            registry.find_command(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_every_menu_has_a_visible_entry() {
        let registry = CommandRegistry::new();
        for menu in Menu::ALL {
            assert!(registry.menu(menu).any(|b| b.visible_in_bar), "{menu}");
        }
    }

    #[test]
    fn test_format_key() {
        assert_eq!(
            format_key(&KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            "C-l"
        );
        assert_eq!(format_key(&KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE)), "F5");
        assert_eq!(format_key(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)), "S-Tab");
    }
}
