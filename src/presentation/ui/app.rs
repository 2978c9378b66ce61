//! Main application orchestrator.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, MouseEventKind};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Color;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::{LoginResponse, MemberForm};
use crate::application::services::ReportService;
use crate::application::use_cases::{LoginUseCase, RosterService, RosterSnapshot};
use crate::domain::entities::{Member, MemberId, MemberStatus, Operator};
use crate::domain::errors::{AuthError, ExportError, RosterError, StoreError};
use crate::domain::ports::ClockPort;
use crate::domain::services::{FormContext, ReportFilter};
use crate::infrastructure::AppConfig;
use crate::presentation::commands::{Command, CommandRegistry};
use crate::presentation::events::{is_press, is_quit_event};
use crate::presentation::ui::{
    ConfirmChoice, ConfirmDialog, DashboardScreen, HelpOverlay, LoginAction, LoginScreen,
    MemberDialog, MemberDialogAction, ReportAction, ReportDialog,
};
use crate::presentation::widgets::{
    FocusContext, FooterBar, FooterBarStyle, FooterGroup, StatusBar, StatusLevel, StatusMessage,
};

const STATUS_TICK: Duration = Duration::from_millis(500);

const LOGIN_HINTS: &[(&str, &str)] = &[
    ("Enter", "Sign in"),
    ("Tab", "Next field"),
    ("Esc", "Quit"),
];
const FORM_HINTS: &[(&str, &str)] = &[
    ("Tab", "Next"),
    ("Space", "Toggle"),
    ("+", "Add amount"),
    ("C-s", "Save"),
    ("Esc", "Cancel"),
];
const REPORT_HINTS: &[(&str, &str)] = &[
    ("Tab", "Next filter"),
    ("C-p", "Export PDF"),
    ("C-e", "Export CSV"),
    ("C-r", "Clear"),
    ("Esc", "Close"),
];
const CONFIRM_HINTS: &[(&str, &str)] = &[("y", "Delete"), ("n", "Cancel")];
const HELP_HINTS: &[(&str, &str)] = &[("any key", "Close")];
const SEARCH_HINTS: &[(&str, &str)] = &[("Enter", "Keep filter"), ("Esc", "Clear")];

/// Services the UI drives.
pub struct AppServices {
    pub login: LoginUseCase,
    pub roster: RosterService,
    pub reports: ReportService,
    pub clock: Arc<dyn ClockPort>,
}

#[derive(Debug)]
enum Action {
    LoggedIn(Result<LoginResponse, AuthError>),
    LoggedOut,
    RosterLoaded(Result<RosterSnapshot, StoreError>),
    MemberSaved {
        context: FormContext,
        result: Result<Option<Member>, RosterError>,
    },
    MemberDeleted {
        name: String,
        result: Result<(), RosterError>,
    },
    Exported {
        what: &'static str,
        result: Result<PathBuf, ExportError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Login,
    Dashboard,
    Exiting,
}

enum CurrentScreen {
    Login(LoginScreen),
    Dashboard(Box<DashboardScreen>),
}

enum Overlay {
    Member(MemberDialog),
    Report(Box<ReportDialog>),
    Confirm(ConfirmDialog),
    Help,
}

/// What the dashboard should do once an overlay has handled a key.
enum OverlayOutcome {
    Stay,
    Close,
    Submit(MemberForm),
    Delete(MemberId, String),
    ExportPdf(ReportFilter),
    ExportCsv,
}

/// Terminal application: the active screen, any open dialog, and the tasks they start.
pub struct App {
    state: AppState,
    screen: CurrentScreen,
    overlay: Option<Overlay>,
    login_use_case: LoginUseCase,
    roster: RosterService,
    reports: ReportService,
    clock: Arc<dyn ClockPort>,
    registry: CommandRegistry,
    operator: Option<Operator>,
    status: Option<StatusMessage>,
    status_ttl: Duration,
    program: String,
    organization: String,
    default_username: String,
    accent: Color,
    mouse: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(services: AppServices, config: &AppConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let accent = Color::from_str(&config.ui.accent_color).unwrap_or_else(|_| {
            warn!(color = %config.ui.accent_color, "Unknown accent color, using yellow");
            Color::Yellow
        });
        let program = config.branding.program.clone();

        Self {
            state: AppState::Login,
            screen: CurrentScreen::Login(LoginScreen::new(&program, &config.auth.username)),
            overlay: None,
            login_use_case: services.login,
            roster: services.roster,
            reports: services.reports,
            clock: services.clock,
            registry: CommandRegistry::new(),
            operator: None,
            status: None,
            status_ttl: Duration::from_secs(config.ui.status_duration),
            program,
            organization: config.branding.organization.clone(),
            default_username: config.auth.username.clone(),
            accent,
            mouse: config.ui.mouse,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if the terminal cannot be drawn or read.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        match self.login_use_case.restore_session().await {
            Ok(Some(operator)) => self.enter_dashboard(operator),
            Ok(None) => debug!("No remembered session"),
            Err(e) => warn!(error = %e, "Could not read session marker"),
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut status_interval = interval(STATUS_TICK);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                maybe_event = terminal_events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event),
                    Some(Err(e)) => {
                        error!(error = %e, "Terminal event stream failed");
                        return Err(e.into());
                    }
                    None => self.state = AppState::Exiting,
                },

                _ = status_interval.tick() => {
                    if !self.expire_status() {
                        continue;
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            Event::Mouse(mouse) if self.mouse && self.overlay.is_none() => {
                if let CurrentScreen::Dashboard(dashboard) = &mut self.screen {
                    match mouse.kind {
                        MouseEventKind::ScrollDown => dashboard.scroll(true),
                        MouseEventKind::ScrollUp => dashboard.scroll(false),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_event(&key) {
            self.state = AppState::Exiting;
            return;
        }

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        let command = match &mut self.screen {
            CurrentScreen::Login(login) => {
                match login.handle_key(key) {
                    LoginAction::Submit => self.submit_login(),
                    LoginAction::Quit => self.state = AppState::Exiting,
                    LoginAction::None => {}
                }
                return;
            }
            CurrentScreen::Dashboard(dashboard) => dashboard.handle_key(key, &self.registry),
        };

        if let Some(command) = command {
            self.execute(command);
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = &mut self.overlay else {
            return;
        };

        let outcome = match overlay {
            Overlay::Help => OverlayOutcome::Close,
            Overlay::Confirm(dialog) => match dialog.handle_key(key) {
                ConfirmChoice::Confirmed => {
                    OverlayOutcome::Delete(dialog.member_id.clone(), dialog.member_name.clone())
                }
                ConfirmChoice::Cancelled => OverlayOutcome::Close,
                ConfirmChoice::Pending => OverlayOutcome::Stay,
            },
            Overlay::Member(dialog) => match dialog.handle_key(key) {
                MemberDialogAction::Submit => {
                    dialog.set_saving(true);
                    OverlayOutcome::Submit(dialog.form().clone())
                }
                MemberDialogAction::Close => OverlayOutcome::Close,
                MemberDialogAction::None => OverlayOutcome::Stay,
            },
            Overlay::Report(dialog) => match dialog.handle_key(key) {
                ReportAction::ExportPdf(filter) => {
                    dialog.set_busy(true);
                    OverlayOutcome::ExportPdf(filter)
                }
                ReportAction::ExportCsv => {
                    dialog.set_busy(true);
                    OverlayOutcome::ExportCsv
                }
                ReportAction::Close => OverlayOutcome::Close,
                ReportAction::None => OverlayOutcome::Stay,
            },
        };

        match outcome {
            OverlayOutcome::Stay => {}
            OverlayOutcome::Close => self.overlay = None,
            OverlayOutcome::Submit(form) => self.submit_form(form),
            OverlayOutcome::Delete(id, name) => {
                self.overlay = None;
                self.delete_member(id, name);
            }
            OverlayOutcome::ExportPdf(filter) => self.export_pdf(filter),
            OverlayOutcome::ExportCsv => self.export_csv(),
        }
    }

    fn execute(&mut self, command: Command) {
        debug!(?command, "Executing command");
        match command {
            Command::Quit => self.state = AppState::Exiting,
            Command::SignOut => self.sign_out(),
            Command::ToggleHelp => self.overlay = Some(Overlay::Help),
            Command::Refresh => self.refresh_roster(),
            Command::AddMember => {
                self.overlay = Some(Overlay::Member(MemberDialog::new(MemberForm::create())));
            }
            Command::ViewMember => self.open_member_form(FormContext::View),
            Command::EditMember => self.open_member_form(FormContext::Edit),
            Command::ReactivateMember => self.open_member_form(FormContext::Reactivate),
            Command::DeleteMember => {
                if let Some(member) = self.selected_member() {
                    self.overlay = Some(Overlay::Confirm(ConfirmDialog::delete_member(
                        member.id.clone(),
                        member.name.clone(),
                    )));
                }
            }
            Command::OpenReport => {
                if let CurrentScreen::Dashboard(dashboard) = &self.screen {
                    let transactions = dashboard.snapshot().transactions.clone();
                    self.overlay = Some(Overlay::Report(Box::new(ReportDialog::new(transactions))));
                }
            }
            Command::Search
            | Command::SelectNext
            | Command::SelectPrevious
            | Command::SelectFirst
            | Command::SelectLast => {}
        }
    }

    fn selected_member(&mut self) -> Option<Member> {
        let member = match &self.screen {
            CurrentScreen::Dashboard(dashboard) => dashboard.selected_member().cloned(),
            CurrentScreen::Login(_) => None,
        };
        if member.is_none() {
            self.set_status("Select a member first", StatusLevel::Warning);
        }
        member
    }

    fn open_member_form(&mut self, context: FormContext) {
        let Some(member) = self.selected_member() else {
            return;
        };

        if context == FormContext::Reactivate
            && member.status_at(self.clock.now()) != MemberStatus::Expired
        {
            self.set_status(
                "Only expired members can be reactivated",
                StatusLevel::Warning,
            );
            return;
        }

        let form = MemberForm::for_member(&member, context);
        self.overlay = Some(Overlay::Member(MemberDialog::new(form)));
    }

    fn submit_login(&mut self) {
        let CurrentScreen::Login(login) = &mut self.screen else {
            return;
        };
        let request = login.request();
        login.set_validating();

        let use_case = self.login_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(request).await;
            let _ = tx.send(Action::LoggedIn(result));
        });
    }

    fn sign_out(&mut self) {
        let use_case = self.login_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = use_case.logout().await {
                error!(error = %e, "Failed to clear session marker");
            }
            let _ = tx.send(Action::LoggedOut);
        });
    }

    fn enter_dashboard(&mut self, operator: Operator) {
        info!(operator = %operator.username(), "Opening dashboard");
        self.state = AppState::Dashboard;
        self.screen = CurrentScreen::Dashboard(Box::new(DashboardScreen::new(
            &self.program,
            self.accent,
            self.clock.now(),
        )));
        self.operator = Some(operator);
        self.refresh_roster();
    }

    fn refresh_roster(&mut self) {
        if let CurrentScreen::Dashboard(dashboard) = &mut self.screen {
            dashboard.set_loading(true);
        }

        let roster = self.roster.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = roster.refresh().await;
            let _ = tx.send(Action::RosterLoaded(result));
        });
    }

    fn submit_form(&mut self, form: MemberForm) {
        let roster = self.roster.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = roster.submit(&form).await;
            let _ = tx.send(Action::MemberSaved {
                context: form.context,
                result,
            });
        });
    }

    fn delete_member(&mut self, id: MemberId, name: String) {
        let roster = self.roster.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = roster.delete(&id).await;
            let _ = tx.send(Action::MemberDeleted { name, result });
        });
    }

    fn export_pdf(&mut self, filter: ReportFilter) {
        let CurrentScreen::Dashboard(dashboard) = &self.screen else {
            return;
        };
        let snapshot = dashboard.snapshot().clone();

        let reports = self.reports.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = reports
                .export_transactions_pdf(&snapshot.members, &snapshot.transactions, &filter)
                .await;
            let _ = tx.send(Action::Exported {
                what: "Transaction report",
                result,
            });
        });
    }

    fn export_csv(&mut self) {
        let CurrentScreen::Dashboard(dashboard) = &self.screen else {
            return;
        };
        let members = dashboard.snapshot().members.clone();

        let reports = self.reports.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = reports.export_members_csv(&members).await;
            let _ = tx.send(Action::Exported {
                what: "Member list",
                result,
            });
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::LoggedIn(Ok(response)) => {
                if !response.session_recorded {
                    self.set_status(
                        "Signed in, but the session could not be remembered",
                        StatusLevel::Warning,
                    );
                }
                self.enter_dashboard(response.operator);
            }
            Action::LoggedIn(Err(e)) => {
                if !e.is_recoverable() {
                    error!(error = %e, "Sign-in is not possible with the current configuration");
                }
                if let CurrentScreen::Login(login) = &mut self.screen {
                    login.set_error(e.to_string());
                }
            }
            Action::LoggedOut => {
                self.state = AppState::Login;
                self.screen =
                    CurrentScreen::Login(LoginScreen::new(&self.program, &self.default_username));
                self.overlay = None;
                self.operator = None;
                self.set_status("Signed out", StatusLevel::Info);
            }
            Action::RosterLoaded(Ok(snapshot)) => {
                let now = self.clock.now();
                if let CurrentScreen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.set_snapshot(snapshot, now);
                }
            }
            Action::RosterLoaded(Err(e)) => {
                if let CurrentScreen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.set_loading(false);
                }
                self.set_status(format!("Failed to load members: {e}"), StatusLevel::Error);
            }
            Action::MemberSaved { context, result } => self.on_member_saved(context, result),
            Action::MemberDeleted { name, result } => match result {
                Ok(()) => {
                    self.set_status(format!("Deleted {name}"), StatusLevel::Success);
                    self.sync_from_cache();
                }
                Err(e) if e.record_saved() => {
                    self.set_status(e.to_string(), StatusLevel::Warning);
                    self.sync_from_cache();
                }
                Err(e) => {
                    self.set_status(format!("Failed to delete {name}: {e}"), StatusLevel::Error);
                }
            },
            Action::Exported { what, result } => {
                if let Some(Overlay::Report(dialog)) = &mut self.overlay {
                    dialog.set_busy(false);
                }
                match result {
                    Ok(path) => self.set_status(
                        format!("{what} saved to {}", path.display()),
                        StatusLevel::Success,
                    ),
                    Err(e) => {
                        self.set_status(format!("Export failed: {e}"), StatusLevel::Error);
                    }
                }
            }
        }
    }

    fn on_member_saved(
        &mut self,
        context: FormContext,
        result: Result<Option<Member>, RosterError>,
    ) {
        match result {
            Ok(Some(member)) => {
                self.overlay = None;
                let verb = match context {
                    FormContext::Create => "Added",
                    FormContext::Reactivate => "Reactivated",
                    FormContext::Edit | FormContext::View => "Updated",
                };
                self.set_status(format!("{verb} {}", member.name), StatusLevel::Success);
                self.sync_from_cache();
            }
            Ok(None) => self.overlay = None,
            Err(e) if e.record_saved() => {
                self.overlay = None;
                self.set_status(e.to_string(), StatusLevel::Warning);
                self.sync_from_cache();
            }
            Err(e) => {
                if let Some(Overlay::Member(dialog)) = &mut self.overlay {
                    dialog.set_saving(false);
                    if let Some(errors) = e.validation() {
                        dialog.set_errors(errors.clone());
                        return;
                    }
                }
                let message = match &e {
                    RosterError::NotExpired { .. } => {
                        "Only expired members can be reactivated".to_string()
                    }
                    _ => format!("Save failed: {e}"),
                };
                self.set_status(message, StatusLevel::Error);
            }
        }
    }

    /// Redraws the dashboard from the roster cache the service refreshed.
    fn sync_from_cache(&mut self) {
        let snapshot = self.roster.snapshot();
        let now = self.clock.now();
        if let CurrentScreen::Dashboard(dashboard) = &mut self.screen {
            dashboard.set_snapshot(snapshot, now);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage::new(text, level));
    }

    /// Returns whether a message was cleared.
    fn expire_status(&mut self) -> bool {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.is_expired(self.status_ttl))
        {
            self.status = None;
            return true;
        }
        false
    }

    fn focus_context(&self) -> FocusContext {
        match (&self.screen, &self.overlay) {
            (CurrentScreen::Login(_), _) => FocusContext::Login,
            (_, Some(Overlay::Member(_))) => FocusContext::MemberForm,
            (_, Some(Overlay::Report(_))) => FocusContext::Report,
            (_, Some(Overlay::Confirm(_))) => FocusContext::Confirm,
            (_, Some(Overlay::Help)) => FocusContext::Help,
            (CurrentScreen::Dashboard(d), None) if d.is_searching() => FocusContext::Search,
            (CurrentScreen::Dashboard(_), None) => FocusContext::Dashboard,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [main_area, status_area, footer_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        match &mut self.screen {
            CurrentScreen::Login(login) => frame.render_widget(&*login, main_area),
            CurrentScreen::Dashboard(dashboard) => dashboard.render(frame, main_area),
        }

        match &mut self.overlay {
            Some(Overlay::Member(dialog)) => dialog.render(frame, main_area),
            Some(Overlay::Report(dialog)) => dialog.render(frame, main_area),
            Some(Overlay::Confirm(dialog)) => frame.render_widget(&*dialog, main_area),
            Some(Overlay::Help) => frame.render_widget(
                HelpOverlay::new(&self.registry, &self.program, &self.organization),
                main_area,
            ),
            None => {}
        }

        let operator = self
            .operator
            .as_ref()
            .map(|op| format!("Signed in as {}", op.username()));
        let mut status_bar = StatusBar::from_message(self.status.as_ref());
        if let Some(label) = &operator {
            status_bar = status_bar.right(label);
        }
        frame.render_widget(&status_bar, status_area);

        let context = self.focus_context();
        let groups = match context {
            FocusContext::Login => FooterGroup::hints(LOGIN_HINTS),
            FocusContext::Dashboard => FooterGroup::menus(&self.registry),
            FocusContext::Search => FooterGroup::hints(SEARCH_HINTS),
            FocusContext::MemberForm => FooterGroup::hints(FORM_HINTS),
            FocusContext::Report => FooterGroup::hints(REPORT_HINTS),
            FocusContext::Confirm => FooterGroup::hints(CONFIRM_HINTS),
            FocusContext::Help => FooterGroup::hints(HELP_HINTS),
        };
        let version = format!("v{}", crate::VERSION);
        frame.render_widget(
            FooterBar::new(&groups)
                .focus_context(context)
                .right_info(Some(version.as_str()))
                .style(FooterBarStyle::with_accent(self.accent)),
            footer_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::application::services::ReportLayout;
    use crate::domain::ports::mocks::{
        FixedClock, MemorySink, MockCredentialVerifier, MockSessionStorage, PageCountRenderer,
    };
    use crate::infrastructure::MemoryStore;

    fn app() -> App {
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        let config = AppConfig::default();
        let services = AppServices {
            login: LoginUseCase::new(
                Arc::new(MockCredentialVerifier::new("admin", "secret")),
                Arc::new(MockSessionStorage::new()),
            ),
            roster: RosterService::new(Arc::new(MemoryStore::new()), clock.clone()),
            reports: ReportService::new(
                ReportLayout::new((&config.branding).into()),
                Arc::new(PageCountRenderer),
                Arc::new(MemorySink::new()),
                clock.clone(),
            ),
            clock,
        };
        App::new(services, &config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_starts_on_login() {
        let app = app();
        assert_eq!(app.state, AppState::Login);
        assert_eq!(app.focus_context(), FocusContext::Login);
    }

    #[tokio::test]
    async fn test_ctrl_q_exits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(app.state, AppState::Exiting);
    }

    #[tokio::test]
    async fn test_reactivate_requires_selection() {
        let mut app = app();
        app.enter_dashboard(Operator::new("admin"));
        app.execute(Command::ReactivateMember);

        assert!(app.overlay.is_none());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Warning);
    }

    #[tokio::test]
    async fn test_reactivate_rejects_active_member() {
        let mut app = app();
        app.enter_dashboard(Operator::new("admin"));
        let active = Member {
            id: MemberId::new("m1"),
            name: "Ana".to_string(),
            end_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1),
            ..Member::default()
        };
        app.handle_action(Action::RosterLoaded(Ok(RosterSnapshot {
            members: vec![active],
            transactions: Vec::new(),
        })));

        app.execute(Command::ReactivateMember);

        assert!(app.overlay.is_none());
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("Only expired members can be reactivated")
        );
    }

    #[tokio::test]
    async fn test_help_closes_on_any_key() {
        let mut app = app();
        app.enter_dashboard(Operator::new("admin"));
        app.execute(Command::ToggleHelp);
        assert_eq!(app.focus_context(), FocusContext::Help);

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn test_logged_out_returns_to_login() {
        let mut app = app();
        app.enter_dashboard(Operator::new("admin"));
        app.handle_action(Action::LoggedOut);

        assert_eq!(app.state, AppState::Login);
        assert!(app.operator.is_none());
    }
}
