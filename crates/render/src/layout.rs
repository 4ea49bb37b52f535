//! Page geometry and the draw-operation model.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Top/bottom margin used by continuation pages and the overflow check.
pub const MARGIN_MM: f32 = 14.0;

const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BRAND_BLUE: Rgb = Rgb(41, 98, 255);
    pub const HEADER_GREY: Rgb = Rgb(240, 240, 240);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// A single line of text. `(x, y)` is the anchor on the baseline; how `x`
/// is interpreted depends on `align`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
    pub align: Align,
    pub weight: Weight,
    pub color: Rgb,
}

impl TextOp {
    /// Left edge of the rendered text.
    pub fn left_x(&self) -> f32 {
        let width = text_width_mm(&self.text, self.size);
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x - width / 2.0,
            Align::Right => self.x - width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    StrokeRect { x: f32, y: f32, w: f32, h: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Rgb },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn text(&mut self, x: f32, y: f32, size: f32, text: impl Into<String>) -> &mut TextOp {
        self.ops.push(DrawOp::Text(TextOp {
            x,
            y,
            size,
            text: text.into(),
            align: Align::Left,
            weight: Weight::Regular,
            color: Rgb::BLACK,
        }));
        match self.ops.last_mut() {
            Some(DrawOp::Text(op)) => op,
            _ => unreachable!("text op was just pushed"),
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(DrawOp::StrokeRect { x, y, w, h });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    /// First text op whose content starts with `prefix`.
    pub fn find_text(&self, prefix: &str) -> Option<&TextOp> {
        self.texts().find(|t| t.text.starts_with(prefix))
    }
}

impl TextOp {
    pub fn bold(&mut self) -> &mut Self {
        self.weight = Weight::Bold;
        self
    }

    pub fn color(&mut self, color: Rgb) -> &mut Self {
        self.color = color;
        self
    }

    pub fn align(&mut self, align: Align) -> &mut Self {
        self.align = align;
        self
    }
}

/// A paginated, printable document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: vec![Page::default()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a blank page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len() - 1
    }

    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        &mut self.pages[index]
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.pages.iter().flat_map(|p| p.texts())
    }
}

/// Approximate Helvetica advance width of `text` at `size` points, in mm.
///
/// Only used for alignment and clipping, so a coarse per-class table is
/// enough.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.278,
            'f' | 't' | 'r' | '(' | ')' | '-' | '/' => 0.333,
            'm' | 'M' | 'W' | 'w' => 0.833,
            c if c.is_ascii_digit() => 0.556,
            c if c.is_uppercase() => 0.667,
            _ => 0.5,
        })
        .sum();
    em * size * PT_TO_MM
}

/// Shorten `text` with a trailing ellipsis until it fits in `max_width_mm`.
pub fn clip_to_width(text: &str, size: f32, max_width_mm: f32) -> String {
    if text_width_mm(text, size) <= max_width_mm {
        return text.to_string();
    }
    let mut clipped: String = text.to_string();
    while !clipped.is_empty() {
        clipped.pop();
        let candidate = format!("{}...", clipped.trim_end());
        if text_width_mm(&candidate, size) <= max_width_mm {
            return candidate;
        }
    }
    String::new()
}
