//! Paints a laid-out [`Document`] into PDF bytes.

use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
};

use crate::error::RenderError;
use crate::layout::{DrawOp, Document, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Rgb, TextOp, Weight};

const LAYER_NAME: &str = "Layer 1";
const STROKE_WIDTH_PT: f32 = 0.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

pub fn to_pdf_bytes(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(&doc.title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);

    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Font(e.to_string()))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Font(e.to_string()))?,
    };

    for (idx, page) in doc.pages.iter().enumerate() {
        let layer = if idx == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            pdf.get_page(page_ref).get_layer(layer_ref)
        };
        layer.set_outline_thickness(STROKE_WIDTH_PT);
        layer.set_outline_color(color(Rgb::BLACK));

        for op in &page.ops {
            paint(&layer, &fonts, op);
        }
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    pdf.save(&mut writer)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

fn paint(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Text(text) => paint_text(layer, fonts, text),
        DrawOp::StrokeRect { x, y, w, h } => {
            layer.add_line(Line {
                points: rect_points(*x, *y, *w, *h),
                is_closed: true,
            });
        }
        DrawOp::FillRect { x, y, w, h, color: fill } => {
            layer.set_fill_color(color(*fill));
            layer.add_polygon(Polygon {
                rings: vec![rect_points(*x, *y, *w, *h)],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

fn paint_text(layer: &PdfLayerReference, fonts: &Fonts, text: &TextOp) {
    if text.text.is_empty() {
        return;
    }
    layer.set_fill_color(color(text.color));
    layer.use_text(
        text.text.clone(),
        text.size,
        Mm(text.left_x()),
        Mm(PAGE_HEIGHT_MM - text.y),
        fonts.pick(text.weight),
    );
}

/// Layout coordinates grow downwards; PDF user space grows upwards.
fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - y))
}

fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
    vec![
        (point(x, y), false),
        (point(x + w, y), false),
        (point(x + w, y + h), false),
        (point(x, y + h), false),
    ]
}

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(printpdf::Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}
