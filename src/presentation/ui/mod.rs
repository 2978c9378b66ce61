//! UI screens and dialogs.

mod app;
mod confirm_dialog;
mod dashboard;
mod help_overlay;
mod login_screen;
mod member_dialog;
mod report_dialog;
pub mod utils;

pub use app::{App, AppServices};
pub use confirm_dialog::{ConfirmChoice, ConfirmDialog};
pub use dashboard::DashboardScreen;
pub use help_overlay::HelpOverlay;
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use member_dialog::{MemberDialog, MemberDialogAction};
pub use report_dialog::{ReportAction, ReportDialog};
