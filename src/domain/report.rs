//! Page layout model for printable reports.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! positions are the left end of the baseline; alignment is resolved when the
//! layout is built so renderers only place what they are given.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

/// RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::new(255, 255, 255);
}

/// Font weight of the report typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        thickness: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        thickness: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
}

/// Drawing instructions of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub ops: Vec<DrawOp>,
}

impl ReportPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text runs on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Laid-out report ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<ReportPage>,
}

/// Approximate advance width of a Helvetica glyph, in 1/1000 em.
fn glyph_width(c: char, weight: FontWeight) -> u32 {
    let regular = match c {
        'i' | 'j' | 'l' => 222,
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | 'I' | '[' | ']' | '\\' | 'f' | 't' => 278,
        '|' | '\'' => 260,
        '(' | ')' | '-' | 'r' => 333,
        '"' => 355,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'F' | 'T' | 'Z' => 611,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' => 778,
        'm' | 'M' => 833,
        '%' => 889,
        'W' => 944,
        '@' => 1015,
        _ => 556,
    };
    match weight {
        FontWeight::Regular => regular,
        FontWeight::Bold => regular + regular / 12,
    }
}

/// Approximate width of a text run in millimetres.
#[must_use]
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, weight)).sum();
    #[allow(clippy::cast_precision_loss)]
    let em = units as f32 / 1000.0;
    em * size * PT_TO_MM
}

/// Left x for a run anchored at `x` with the given alignment.
#[must_use]
pub fn aligned_x(x: f32, text: &str, size: f32, weight: FontWeight, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - text_width(text, size, weight) / 2.0,
        TextAlign::Right => x - text_width(text, size, weight),
    }
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Words wider than a line are split by characters. Empty text yields one
/// empty line.
#[must_use]
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size, weight) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if text_width(&current, size, weight) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shortens text to fit `max_width`, ending it with `...` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: f32, size: f32, weight: FontWeight) -> String {
    if text_width(text, size, weight) <= max_width {
        return text.to_string();
    }
    let mut kept = String::new();
    for c in text.chars() {
        kept.push(c);
        if text_width(&format!("{kept}..."), size, weight) > max_width {
            kept.pop();
            break;
        }
    }
    format!("{}...", kept.trim_end())
}
