//! Renderer - Layered Plate Compositing
//!
//! Every plate character is drawn four times, back to front, each layer a
//! little smaller, closer to the pen position and darker, ending with the
//! group accent colour. The stack reads as an embossed bevel.

use image::{ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::io::Cursor;

use crate::convert::to_latin_text;
use crate::decoder::ParsedPlate;
use crate::error::RenderError;
use crate::layout::{layout, main_run, region_run, PlacedGlyph, MAIN_PROFILE, REGION_PROFILE};
use crate::tables::PlateTables;
use crate::templates::{CategoryGroup, Rgb, TemplateSet};

/// Drawing primitives the compositor needs. `y` is the text baseline.
pub trait Canvas {
    fn draw_text(&mut self, text: &str, font_size: f32, x: i32, y: i32, color: Rgb);
    fn encode_png(&self) -> Result<Vec<u8>, RenderError>;
}

/// One pass of the layered draw, relative to the front layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbossLayer {
    pub size_delta: i32,
    pub dx: i32,
    pub dy: i32,
    /// Percentage blended toward white.
    pub lighten: u32,
}

/// Back to front.
pub const EMBOSS_LAYERS: [EmbossLayer; 4] = [
    EmbossLayer { size_delta: 3, dx: -1, dy: 2, lighten: 85 },
    EmbossLayer { size_delta: 2, dx: -1, dy: 1, lighten: 55 },
    EmbossLayer { size_delta: 1, dx: -1, dy: 0, lighten: 30 },
    EmbossLayer { size_delta: 0, dx: 0, dy: 0, lighten: 0 },
];

pub const PERSIAN_DIGITS: [char; 10] = [
    '\u{6f0}', '\u{6f1}', '\u{6f2}', '\u{6f3}', '\u{6f4}',
    '\u{6f5}', '\u{6f6}', '\u{6f7}', '\u{6f8}', '\u{6f9}',
];

pub const AUX_FONT_SIZE: i32 = 12;
pub const LATIN_ORIGIN: (i32, i32) = (40, 82);
pub const DATE_ORIGIN: (i32, i32) = (281, 82);
pub const AUX_COLOR: Rgb = [90, 90, 90];

/// Font sizes are points at 96 dpi.
const POINTS_TO_PIXELS: f32 = 96.0 / 72.0;

pub fn persian_digit(ch: char) -> char {
    ch.to_digit(10).map_or(ch, |d| PERSIAN_DIGITS[d as usize])
}

pub fn lighten(color: Rgb, percent: u32) -> Rgb {
    color.map(|c| {
        let c = u32::from(c);
        (c + (255 - c) * percent.min(100) / 100) as u8
    })
}

/// Draw the decoded plate onto `canvas` using `accent` for the front layer.
pub fn compose<C: Canvas>(canvas: &mut C, plate: &ParsedPlate, tables: &PlateTables, accent: Rgb) {
    let placed = layout(&main_run(plate), &MAIN_PROFILE)
        .into_iter()
        .chain(layout(&region_run(plate), &REGION_PROFILE));

    for glyph in placed {
        draw_embossed(canvas, &glyph, accent);
    }

    let latin = to_latin_text(plate, tables, true);
    canvas.draw_text(
        &latin,
        AUX_FONT_SIZE as f32,
        LATIN_ORIGIN.0,
        LATIN_ORIGIN.1 + AUX_FONT_SIZE,
        AUX_COLOR,
    );

    if let Some(date) = plate.date_stamp() {
        canvas.draw_text(
            date,
            AUX_FONT_SIZE as f32,
            DATE_ORIGIN.0,
            DATE_ORIGIN.1 + AUX_FONT_SIZE,
            AUX_COLOR,
        );
    }
}

fn draw_embossed<C: Canvas>(canvas: &mut C, glyph: &PlacedGlyph, accent: Rgb) {
    let text = persian_digit(glyph.ch).to_string();
    let baseline = glyph.y + glyph.font_size;

    for layer in EMBOSS_LAYERS {
        canvas.draw_text(
            &text,
            (glyph.font_size + layer.size_delta) as f32,
            glyph.x + layer.dx,
            baseline + layer.dy,
            lighten(accent, layer.lighten),
        );
    }
}

/// Renders decoded plates onto their group template.
pub struct PlateRenderer {
    templates: TemplateSet,
    font: Font<'static>,
}

impl PlateRenderer {
    pub fn new(templates: TemplateSet) -> Result<Self, RenderError> {
        let font = Font::try_from_vec(templates.font().to_vec()).ok_or(RenderError::FontInvalid)?;
        Ok(Self { templates, font })
    }

    /// Composite `plate` and return PNG bytes. The bitmap lives only for
    /// the duration of this call.
    pub fn render(&self, plate: &ParsedPlate, tables: &PlateTables) -> Result<Vec<u8>, RenderError> {
        let group = CategoryGroup::from_category_name(plate.category_name());
        let mut canvas = RasterCanvas::new(decode_template(self.templates.get(group)?)?, self.font.clone());

        compose(&mut canvas, plate, tables, group.accent());
        let bytes = canvas.encode_png()?;

        tracing::debug!(?group, bytes = bytes.len(), "rendered plate");
        Ok(bytes)
    }
}

pub fn decode_template(png: &[u8]) -> Result<RgbaImage, RenderError> {
    Ok(image::load_from_memory_with_format(png, ImageFormat::Png)?.to_rgba8())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// In-memory bitmap with TrueType text drawing.
pub struct RasterCanvas {
    image: RgbaImage,
    font: Font<'static>,
}

impl RasterCanvas {
    pub fn new(image: RgbaImage, font: Font<'static>) -> Self {
        Self { image, font }
    }
}

impl Canvas for RasterCanvas {
    fn draw_text(&mut self, text: &str, font_size: f32, x: i32, y: i32, color: Rgb) {
        let scale = Scale::uniform(font_size * POINTS_TO_PIXELS);
        let mut caret = x as f32;
        let (width, height) = self.image.dimensions();

        for ch in text.chars() {
            let glyph = self.font.glyph(ch).scaled(scale).positioned(point(caret, y as f32));
            if let Some(bb) = glyph.pixel_bounding_box() {
                let image = &mut self.image;
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                        return;
                    }
                    if coverage <= 0.0 {
                        return;
                    }
                    let dst = image.get_pixel_mut(px as u32, py as u32);
                    blend(dst, color, coverage.min(1.0));
                });
            }
            caret += glyph.unpositioned().h_metrics().advance_width;
        }
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        encode_png(&self.image)
    }
}

fn blend(dst: &mut Rgba<u8>, color: Rgb, alpha: f32) {
    let inv = 1.0 - alpha;
    for (channel, &src) in dst.0.iter_mut().zip(color.iter()) {
        *channel = (src as f32 * alpha + *channel as f32 * inv) as u8;
    }
    dst.0[3] = 255;
}
