use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use rust_decimal::Decimal;

use crate::domain::entities::{MemberStatus, TransactionAction, TransactionStatus, format_amount};

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-size rect centered in `r`, clipped to it.
#[must_use]
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Peso amount with thousands separators, e.g. `₱12,345.50`.
#[must_use]
pub fn format_peso(amount: Decimal) -> String {
    let plain = format_amount(amount);
    let (sign, digits) = plain
        .strip_prefix('-')
        .map_or(("", plain.as_str()), |rest| ("-", rest));
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}₱{grouped}.{cents}")
}

#[must_use]
pub const fn member_status_color(status: MemberStatus) -> Color {
    match status {
        MemberStatus::Active => Color::Green,
        MemberStatus::Expired => Color::Red,
    }
}

#[must_use]
pub const fn transaction_status_color(status: Option<TransactionStatus>) -> Color {
    match status {
        Some(TransactionStatus::Active) => Color::Green,
        Some(TransactionStatus::Expired) => Color::Red,
        Some(TransactionStatus::Deleted) | None => Color::DarkGray,
    }
}

#[must_use]
pub const fn action_color(action: TransactionAction) -> Color {
    match action {
        TransactionAction::Added => Color::Green,
        TransactionAction::Updated => Color::Cyan,
        TransactionAction::Reactivated => Color::Yellow,
        TransactionAction::Deleted => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Decimal::ZERO, "₱0.00" ; "zero")]
    #[test_case(Decimal::new(150_5, 1), "₱150.50" ; "no grouping")]
    #[test_case(Decimal::new(1_234_567_89, 2), "₱1,234,567.89" ; "millions")]
    #[test_case(Decimal::new(-1000, 0), "-₱1,000.00" ; "negative")]
    fn test_format_peso(amount: Decimal, expected: &str) {
        assert_eq!(format_peso(amount), expected);
    }

    #[test]
    fn test_centered_fixed_clips() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_fixed(80, 40, area), area);
    }
}
