mod footer_bar;
mod input;
mod stat_card;
mod status_bar;

pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle, FooterGroup};
pub use input::TextInput;
pub use stat_card::StatCard;
pub use status_bar::{StatusBar, StatusLevel, StatusMessage};
