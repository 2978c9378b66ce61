//! Transaction history report layout.
//!
//! Produces an A4 portrait [`ReportDocument`]: brand header, summary,
//! leaderboard, filter banner, the paginated transaction table, statistics and
//! a signature footer on every page.

use chrono::{DateTime, Local, Utc};

use crate::domain::entities::{
    Member, TIMESTAMP_FORMAT, Transaction, TransactionStatus, format_amount, format_optional_date,
};
use crate::domain::report::{
    DrawOp, FontWeight, ReportDocument, ReportPage, Rgb, TextAlign, aligned_x, truncate_to_width,
    wrap_text,
};
use crate::domain::services::{ReportFilter, RosterMetrics};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN * 2.0;
/// Rows may not extend below this line.
pub const ROW_LIMIT: f32 = PAGE_HEIGHT - 45.0;
const FOOTER_TOP: f32 = PAGE_HEIGHT - 35.0;

const HEADER_HEIGHT: f32 = 10.0;
const ROW_HEIGHT: f32 = 9.0;
const CHANGES_LINE_HEIGHT: f32 = 3.0;
const CHANGES_SIZE: f32 = 7.0;

const GOLD: Rgb = Rgb::new(212, 175, 55);
const DARK_GOLD: Rgb = Rgb::new(184, 134, 11);
const CHARCOAL: Rgb = Rgb::new(44, 44, 44);
const GRAY: Rgb = Rgb::new(120, 120, 120);
const LIGHT_GRAY: Rgb = Rgb::new(248, 248, 248);
const CREAM: Rgb = Rgb::new(250, 248, 244);
const ROW_RULE: Rgb = Rgb::new(240, 230, 210);
const GREEN: Rgb = Rgb::new(46, 125, 50);

struct Column {
    title: &'static str,
    width: f32,
    align: TextAlign,
}

const COLUMNS: [Column; 8] = [
    Column { title: "#", width: 8.0, align: TextAlign::Center },
    Column { title: "Member Name", width: 34.0, align: TextAlign::Left },
    Column { title: "Start", width: 20.0, align: TextAlign::Center },
    Column { title: "End", width: 20.0, align: TextAlign::Center },
    Column { title: "Book Value", width: 24.0, align: TextAlign::Right },
    Column { title: "Status", width: 18.0, align: TextAlign::Center },
    Column { title: "Action", width: 20.0, align: TextAlign::Center },
    Column { title: "Changes", width: 36.0, align: TextAlign::Left },
];

/// Organisation details printed in the report header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBranding {
    pub organization: String,
    pub tagline: String,
    pub address: String,
    pub contact: String,
    /// Programme name, e.g. `Hello Club Membership`.
    pub program: String,
}

impl Default for ReportBranding {
    fn default() -> Self {
        Self {
            organization: "THE FIRST ISLATEL".to_string(),
            tagline: "Islatel Realty and Development Corporation".to_string(),
            address: "Lucap Highway, Alaminos City, Pangasinan".to_string(),
            contact: "www.islatel.ph  |  (+63) 968 851 5485".to_string(),
            program: "Hello Club Membership".to_string(),
        }
    }
}

/// Data the report is built from.
pub struct ReportInput<'a> {
    /// Full roster; drives the summary and statistics.
    pub members: &'a [Member],
    /// Transactions left after filtering, newest first.
    pub transactions: Vec<&'a Transaction>,
    pub filter: &'a ReportFilter,
    pub now: DateTime<Utc>,
}

/// Report number derived from the generation instant: `TH-` and the last
/// eight digits of the epoch milliseconds.
#[must_use]
pub fn report_number(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("TH-{tail}")
}

/// Height of a table row; rows grow with the wrapped change summary.
#[must_use]
pub fn row_height(transaction: &Transaction) -> f32 {
    let lines = changes_lines(transaction).len().max(1);
    #[allow(clippy::cast_precision_loss)]
    let extra = (lines - 1) as f32 * CHANGES_LINE_HEIGHT;
    ROW_HEIGHT + extra
}

fn changes_lines(transaction: &Transaction) -> Vec<String> {
    let text = transaction.changes.as_deref().unwrap_or("-");
    wrap_text(text, COLUMNS[7].width - 4.0, CHANGES_SIZE, FontWeight::Regular)
}

fn money(amount: rust_decimal::Decimal) -> String {
    format!("P{}", format_amount(amount))
}

fn or_hyphen(value: String) -> String {
    if value.is_empty() { "-".to_string() } else { value }
}

/// Lays out the transaction history report.
#[derive(Debug, Clone, Default)]
pub struct ReportLayout {
    branding: ReportBranding,
}

impl ReportLayout {
    /// Creates new layout with the given branding.
    #[must_use]
    pub const fn new(branding: ReportBranding) -> Self {
        Self { branding }
    }

    /// Builds every page of the report.
    #[must_use]
    pub fn build(&self, input: &ReportInput<'_>) -> ReportDocument {
        let metrics = RosterMetrics::compute(input.members, input.now);
        let local = input.now.with_timezone(&Local);
        let mut canvas = Canvas::new();

        self.draw_header(&mut canvas);
        canvas.y += 12.0;
        self.draw_title(&mut canvas);
        canvas.y += 20.0;
        canvas.fill(MARGIN, canvas.y, CONTENT_WIDTH, 10.0, CHARCOAL);
        let info_y = canvas.y + 6.5;
        canvas.text(
            MARGIN + 4.0,
            info_y,
            &format!("Report No: {}", report_number(input.now)),
            8.0,
            FontWeight::Bold,
            Rgb::WHITE,
            TextAlign::Left,
        );
        canvas.text(
            PAGE_WIDTH - MARGIN - 4.0,
            info_y,
            &format!("Generated: {}", local.format("%B %-d, %Y at %I:%M %p")),
            8.0,
            FontWeight::Bold,
            Rgb::WHITE,
            TextAlign::Right,
        );

        canvas.y += 18.0;
        draw_summary(&mut canvas, &metrics);
        canvas.y += 36.0;
        draw_leaderboard(&mut canvas, &metrics);

        if input.filter.is_active() {
            canvas.fill(MARGIN, canvas.y, CONTENT_WIDTH, 12.0, Rgb::new(255, 249, 196));
            canvas.stroke(MARGIN, canvas.y, CONTENT_WIDTH, 12.0, Rgb::new(255, 193, 7), 0.3);
            let banner = truncate_to_width(
                &format!("Filters Applied: {}", input.filter.describe()),
                CONTENT_WIDTH - 8.0,
                8.0,
                FontWeight::Regular,
            );
            canvas.text(
                MARGIN + 4.0,
                canvas.y + 7.5,
                &banner,
                8.0,
                FontWeight::Regular,
                Rgb::new(156, 121, 0),
                TextAlign::Left,
            );
            canvas.y += 16.0;
        }

        canvas.text(
            MARGIN,
            canvas.y,
            "TRANSACTION DETAILS",
            10.0,
            FontWeight::Bold,
            CHARCOAL,
            TextAlign::Left,
        );
        canvas.y += 5.0;
        draw_table_header(&mut canvas);

        if input.transactions.is_empty() {
            canvas.text(
                PAGE_WIDTH / 2.0,
                canvas.y + 6.0,
                "No transactions match the current filters",
                8.0,
                FontWeight::Regular,
                GRAY,
                TextAlign::Center,
            );
            canvas.y += ROW_HEIGHT;
        }
        for (index, transaction) in input.transactions.iter().enumerate() {
            let height = row_height(transaction);
            if canvas.y + height > ROW_LIMIT {
                self.continue_on_new_page(&mut canvas);
            }
            draw_row(&mut canvas, index, transaction, height);
        }
        canvas.line(MARGIN, canvas.y, PAGE_WIDTH - MARGIN, canvas.y, GOLD, 0.5);

        canvas.y += 8.0;
        if canvas.y < PAGE_HEIGHT - 60.0 {
            canvas.fill(MARGIN, canvas.y, CONTENT_WIDTH, 16.0, CREAM);
            canvas.text(
                MARGIN + 4.0,
                canvas.y + 6.0,
                "ADDITIONAL STATISTICS",
                8.0,
                FontWeight::Bold,
                CHARCOAL,
                TextAlign::Left,
            );
            let stats = format!(
                "Average Lifetime Book Value: {}   |   Active Rate: {:.1}%   |   Total Transactions: {}",
                money(metrics.average_book_value),
                metrics.active_rate(),
                input.transactions.len()
            );
            canvas.text(
                MARGIN + 4.0,
                canvas.y + 12.0,
                &stats,
                7.0,
                FontWeight::Regular,
                GRAY,
                TextAlign::Left,
            );
        }

        let mut pages = canvas.finish();
        let total = pages.len();
        let generated = local.format(TIMESTAMP_FORMAT).to_string();
        for (i, page) in pages.iter_mut().enumerate() {
            self.draw_footer(page, i + 1, total, &generated);
        }

        ReportDocument {
            title: format!("{} - Transaction History", self.branding.program),
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            pages,
        }
    }

    fn draw_header(&self, canvas: &mut Canvas) {
        canvas.fill(0.0, 0.0, PAGE_WIDTH, 12.0, GOLD);
        let center = PAGE_WIDTH / 2.0;
        canvas.y = 22.0;
        canvas.text(
            center,
            canvas.y,
            &self.branding.organization,
            22.0,
            FontWeight::Bold,
            CHARCOAL,
            TextAlign::Center,
        );
        canvas.y += 7.0;
        canvas.text(
            center,
            canvas.y,
            &self.branding.tagline,
            10.0,
            FontWeight::Regular,
            GRAY,
            TextAlign::Center,
        );
        canvas.y += 5.0;
        canvas.text(
            center,
            canvas.y,
            &self.branding.address,
            9.0,
            FontWeight::Regular,
            GRAY,
            TextAlign::Center,
        );
        canvas.y += 4.0;
        canvas.text(
            center,
            canvas.y,
            &self.branding.contact,
            9.0,
            FontWeight::Regular,
            GRAY,
            TextAlign::Center,
        );
    }

    fn draw_title(&self, canvas: &mut Canvas) {
        let top = canvas.y - 6.0;
        canvas.fill(MARGIN, top, CONTENT_WIDTH, 18.0, CREAM);
        canvas.stroke(MARGIN, top, CONTENT_WIDTH, 18.0, GOLD, 0.5);
        let center = PAGE_WIDTH / 2.0;
        canvas.text(
            center,
            canvas.y + 2.0,
            &self.branding.program.to_uppercase(),
            16.0,
            FontWeight::Bold,
            DARK_GOLD,
            TextAlign::Center,
        );
        canvas.text(
            center,
            canvas.y + 9.0,
            "Transaction History Report",
            11.0,
            FontWeight::Regular,
            CHARCOAL,
            TextAlign::Center,
        );
    }

    fn continue_on_new_page(&self, canvas: &mut Canvas) {
        canvas.new_page();
        canvas.fill(0.0, 0.0, PAGE_WIDTH, 8.0, GOLD);
        canvas.text(
            PAGE_WIDTH / 2.0,
            5.5,
            &format!("{} - Transaction History (Continued)", self.branding.program),
            8.0,
            FontWeight::Bold,
            Rgb::WHITE,
            TextAlign::Center,
        );
        canvas.y = MARGIN + 15.0;
        draw_table_header(canvas);
    }

    fn draw_footer(&self, page: &mut ReportPage, number: usize, total: usize, generated: &str) {
        let mut canvas = Canvas::on(std::mem::take(page));
        canvas.line(MARGIN, FOOTER_TOP, PAGE_WIDTH - MARGIN, FOOTER_TOP, GOLD, 0.5);

        let slots = [
            ("Prepared by:", MARGIN, MARGIN + 45.0),
            ("Verified by:", PAGE_WIDTH / 2.0 - 10.0, PAGE_WIDTH / 2.0 + 35.0),
            ("Approved by:", PAGE_WIDTH - MARGIN - 35.0, PAGE_WIDTH - MARGIN),
        ];
        for (label, start, end) in slots {
            canvas.text(
                start,
                FOOTER_TOP + 8.0,
                label,
                8.0,
                FontWeight::Bold,
                CHARCOAL,
                TextAlign::Left,
            );
            canvas.line(start, FOOTER_TOP + 18.0, end, FOOTER_TOP + 18.0, GRAY, 0.3);
            canvas.text(
                start,
                FOOTER_TOP + 22.0,
                "Name / Signature / Date",
                6.0,
                FontWeight::Regular,
                GRAY,
                TextAlign::Left,
            );
        }

        canvas.fill(0.0, PAGE_HEIGHT - 8.0, PAGE_WIDTH, 8.0, CHARCOAL);
        canvas.text(
            PAGE_WIDTH / 2.0,
            PAGE_HEIGHT - 3.0,
            &format!(
                "{} System  |  Page {number} of {total}  |  Generated: {generated}",
                self.branding.program
            ),
            7.0,
            FontWeight::Regular,
            Rgb::WHITE,
            TextAlign::Center,
        );
        *page = canvas.current;
    }
}

fn draw_summary(canvas: &mut Canvas, metrics: &RosterMetrics) {
    let top = canvas.y;
    canvas.fill(MARGIN, top, CONTENT_WIDTH, 28.0, LIGHT_GRAY);
    canvas.stroke(MARGIN, top, CONTENT_WIDTH, 28.0, GOLD, 0.5);
    canvas.text(
        MARGIN + 6.0,
        top + 7.0,
        "SUMMARY",
        10.0,
        FontWeight::Bold,
        DARK_GOLD,
        TextAlign::Left,
    );

    let items = [
        ("Total Members:", metrics.total.to_string()),
        ("Total Lifetime Book Value:", money(metrics.total_book_value)),
        ("Active:", metrics.active.to_string()),
        ("Expired:", metrics.expired.to_string()),
    ];
    let spacing = (CONTENT_WIDTH - 12.0) / 4.0;
    let mut x = MARGIN + 6.0;
    for (label, value) in items {
        canvas.text(x, top + 17.0, label, 8.0, FontWeight::Regular, GRAY, TextAlign::Left);
        canvas.text(x, top + 23.0, &value, 8.0, FontWeight::Bold, CHARCOAL, TextAlign::Left);
        x += spacing;
    }
}

fn draw_leaderboard(canvas: &mut Canvas, metrics: &RosterMetrics) {
    if metrics.leaders.is_empty() {
        return;
    }
    let top = canvas.y;
    #[allow(clippy::cast_precision_loss)]
    let height = 8.0 + 6.0 * metrics.leaders.len() as f32;
    canvas.fill(MARGIN, top, CONTENT_WIDTH, height, CREAM);
    canvas.text(
        MARGIN + 4.0,
        top + 6.0,
        "TOP MEMBERS BY LIFETIME BOOK VALUE",
        9.0,
        FontWeight::Bold,
        DARK_GOLD,
        TextAlign::Left,
    );

    let mut y = top + 12.0;
    for (rank, member) in metrics.leaders.iter().enumerate() {
        let label = truncate_to_width(
            &format!("{}. {}", rank + 1, member.name),
            CONTENT_WIDTH - 50.0,
            8.0,
            FontWeight::Regular,
        );
        canvas.text(MARGIN + 6.0, y, &label, 8.0, FontWeight::Regular, CHARCOAL, TextAlign::Left);
        canvas.text(
            PAGE_WIDTH - MARGIN - 4.0,
            y,
            &money(member.book_value),
            8.0,
            FontWeight::Bold,
            GREEN,
            TextAlign::Right,
        );
        y += 6.0;
    }
    canvas.y = top + height + 6.0;
}

fn draw_table_header(canvas: &mut Canvas) {
    canvas.fill(MARGIN, canvas.y, CONTENT_WIDTH, HEADER_HEIGHT, GOLD);
    let mut x = MARGIN;
    for column in &COLUMNS {
        canvas.text(
            x + column.width / 2.0,
            canvas.y + 6.5,
            column.title,
            7.0,
            FontWeight::Bold,
            Rgb::WHITE,
            TextAlign::Center,
        );
        x += column.width;
    }
    canvas.y += HEADER_HEIGHT + 1.0;
}

fn status_colors(status: Option<TransactionStatus>) -> (Rgb, Rgb) {
    match status {
        Some(TransactionStatus::Active) => (Rgb::new(232, 245, 233), GREEN),
        Some(TransactionStatus::Deleted) => (Rgb::new(250, 235, 235), Rgb::new(180, 40, 40)),
        _ => (Rgb::new(255, 235, 238), Rgb::new(198, 40, 40)),
    }
}

fn draw_row(canvas: &mut Canvas, index: usize, transaction: &Transaction, height: f32) {
    let top = canvas.y;
    if index % 2 == 0 {
        canvas.fill(MARGIN, top, CONTENT_WIDTH, height, CREAM);
    }
    canvas.line(MARGIN, top + height, PAGE_WIDTH - MARGIN, top + height, ROW_RULE, 0.1);

    let baseline = top + 6.0;
    let status_label = transaction.status.map_or("-", TransactionStatus::as_str);
    let name = truncate_to_width(
        &or_hyphen(transaction.name.clone()),
        COLUMNS[1].width - 4.0,
        8.0,
        FontWeight::Bold,
    );
    let cells: [(String, FontWeight, Rgb); 7] = [
        ((index + 1).to_string(), FontWeight::Regular, GRAY),
        (name, FontWeight::Bold, CHARCOAL),
        (or_hyphen(format_optional_date(transaction.start_date)), FontWeight::Regular, CHARCOAL),
        (or_hyphen(format_optional_date(transaction.end_date)), FontWeight::Regular, CHARCOAL),
        (money(transaction.book_value.unwrap_or_default()), FontWeight::Bold, GREEN),
        (status_label.to_string(), FontWeight::Bold, CHARCOAL),
        (transaction.action.to_string(), FontWeight::Regular, CHARCOAL),
    ];

    let mut x = MARGIN;
    for (column, (text, weight, color)) in COLUMNS.iter().zip(cells) {
        let anchor = match column.align {
            TextAlign::Left => x + 2.0,
            TextAlign::Center => x + column.width / 2.0,
            TextAlign::Right => x + column.width - 2.0,
        };
        if column.title == "Status" {
            let (fill, ink) = status_colors(transaction.status);
            canvas.fill(x + 2.0, top + 2.0, column.width - 4.0, 5.5, fill);
            canvas.text(anchor, baseline - 0.3, &text, 7.0, weight, ink, column.align);
        } else {
            canvas.text(anchor, baseline, &text, 8.0, weight, color, column.align);
        }
        x += column.width;
    }

    let mut line_y = baseline;
    for line in changes_lines(transaction) {
        canvas.text(
            x + 2.0,
            line_y,
            &line,
            CHANGES_SIZE,
            FontWeight::Regular,
            GRAY,
            TextAlign::Left,
        );
        line_y += CHANGES_LINE_HEIGHT;
    }

    canvas.y = top + height;
}

/// Page under construction plus the finished ones.
struct Canvas {
    done: Vec<ReportPage>,
    current: ReportPage,
    y: f32,
}

impl Canvas {
    fn new() -> Self {
        Self::on(ReportPage::new())
    }

    fn on(page: ReportPage) -> Self {
        Self {
            done: Vec::new(),
            current: page,
            y: MARGIN,
        }
    }

    fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.y = MARGIN;
    }

    fn finish(mut self) -> Vec<ReportPage> {
        self.done.push(self.current);
        self.done
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.current.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, thickness: f32) {
        self.current.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            thickness,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, thickness: f32) {
        self.current.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: TextAlign,
    ) {
        if text.is_empty() {
            return;
        }
        self.current.ops.push(DrawOp::Text {
            x: aligned_x(x, text, size, weight, align),
            y,
            text: text.to_string(),
            size,
            weight,
            color,
        });
    }
}
