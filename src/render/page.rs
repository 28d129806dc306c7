use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::ops::Op;
use printpdf::xobject::XObjectTransform;
use printpdf::{BuiltinFont, Pt, Rgb, TextItem, TextMatrix, XObjectId};

// Letter page, points.
pub(super) const PAGE_WIDTH: f32 = 612.0;
pub(super) const PAGE_HEIGHT: f32 = 792.0;
pub(super) const MARGIN: f32 = 36.0;

/// Average glyph width as a fraction of the font size, good enough for
/// Helvetica at the sizes used here.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

pub(super) fn rgb(r: u8, g: u8, b: u8) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

pub(super) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_FACTOR
}

/// Greedy word wrap against the approximate glyph width. Words longer than
/// the column are hard-split so nothing overflows.
pub(super) fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let max_chars = ((max_width / (size * CHAR_WIDTH_FACTOR)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split: String = word.chars().take(max_chars).collect();
            word = &word[split.len()..];
            lines.push(split);
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Accumulates draw ops page by page. Coordinates are given from the top-left
/// corner; the y axis is flipped to PDF's bottom-left origin at op level.
pub(super) struct PageComposer {
    finished: Vec<Vec<Op>>,
    ops: Vec<Op>,
    /// Cursor distance from the top of the current page.
    pub y: f32,
}

impl PageComposer {
    pub fn new() -> Self {
        Self {
            finished: Vec::new(),
            ops: Vec::new(),
            y: MARGIN,
        }
    }

    pub fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.finished.push(ops);
        self.y = MARGIN;
    }

    /// Starts a new page when fewer than `needed` points remain above the
    /// bottom margin. Returns true when a break happened.
    pub fn ensure_room(&mut self, needed: f32) -> bool {
        if self.y + needed > PAGE_HEIGHT - MARGIN {
            self.break_page();
            true
        } else {
            false
        }
    }

    pub fn text(
        &mut self,
        x: f32,
        y_top: f32,
        size: f32,
        font: BuiltinFont,
        col: printpdf::color::Color,
        content: &str,
    ) {
        if content.is_empty() {
            return;
        }
        let baseline = y_top + size * 0.8;
        let pdf_y = PAGE_HEIGHT - baseline;
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor { col });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font,
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(pdf_y)),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(content.to_string())],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    pub fn filled_rect(
        &mut self,
        x: f32,
        y_top: f32,
        width: f32,
        height: f32,
        col: printpdf::color::Color,
    ) {
        let y = PAGE_HEIGHT - (y_top + height);
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner(x, y),
                    corner(x + width, y),
                    corner(x + width, y + height),
                    corner(x, y + height),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::SetFillColor { col });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    pub fn line(&mut self, x1: f32, y1_top: f32, x2: f32, y2_top: f32, width: f32) {
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner(x1, PAGE_HEIGHT - y1_top),
                    corner(x2, PAGE_HEIGHT - y2_top),
                ],
            }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::SetOutlineThickness { pt: Pt(width) });
        self.ops.push(Op::SetOutlineColor { col: rgb(0, 0, 0) });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    pub fn image(
        &mut self,
        id: XObjectId,
        x: f32,
        y_top: f32,
        width: f32,
        height: f32,
        source_dims: (u32, u32),
    ) {
        let y = PAGE_HEIGHT - (y_top + height);
        let transform = XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(y)),
            scale_x: Some(width / source_dims.0 as f32),
            scale_y: Some(height / source_dims.1 as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject { id, transform });
    }

    pub fn into_pages(mut self) -> Vec<Vec<Op>> {
        if !self.ops.is_empty() || self.finished.is_empty() {
            self.break_page();
        }
        self.finished
    }
}

fn corner(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}
