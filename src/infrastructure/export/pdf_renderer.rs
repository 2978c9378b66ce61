//! PDF rendering of laid-out reports with `printpdf`.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};
use tracing::debug;

use crate::domain::errors::ExportError;
use crate::domain::ports::ReportRendererPort;
use crate::domain::report::{DrawOp, FontWeight, ReportDocument, ReportPage, Rgb};

const LAYER_NAME: &str = "Layer 1";

/// Renders reports with the builtin Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    const fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
        None,
    ))
}

/// Builtin fonts only cover a Latin code page.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

fn draw_page(layer: &PdfLayerReference, page: &ReportPage, height: f32, fonts: &Fonts) {
    let flip = |y: f32| Mm(height - y);

    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height: h,
                color: c,
            } => {
                layer.set_fill_color(color(*c));
                layer.add_rect(
                    Rect::new(Mm(*x), flip(y + h), Mm(x + width), flip(*y))
                        .with_mode(PaintMode::Fill),
                );
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height: h,
                color: c,
                thickness,
            } => {
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(*thickness);
                layer.add_rect(
                    Rect::new(Mm(*x), flip(y + h), Mm(x + width), flip(*y))
                        .with_mode(PaintMode::Stroke),
                );
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color: c,
                thickness,
            } => {
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(*thickness);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y1)), false),
                        (Point::new(Mm(*x2), flip(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
            DrawOp::Text {
                x,
                y,
                text,
                size,
                weight,
                color: c,
            } => {
                layer.set_fill_color(color(*c));
                layer.use_text(printable(text), *size, Mm(*x), flip(*y), fonts.get(*weight));
            }
        }
    }
}

impl ReportRendererPort for PdfRenderer {
    fn render(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            &report.title,
            Mm(report.width),
            Mm(report.height),
            LAYER_NAME,
        );

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::pdf(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ExportError::pdf(e.to_string()))?,
        };

        for (index, page) in report.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(report.width), Mm(report.height), LAYER_NAME)
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, page, report.height, &fonts);
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ExportError::pdf(e.to_string()))?;
        debug!(pages = report.pages.len(), size = bytes.len(), "Rendered PDF report");
        Ok(bytes)
    }
}
