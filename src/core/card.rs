//! Membership card renderer.
//!
//! A card is the background template with the member's QR code drawn
//! above center and the member's name and department written underneath.
//! The output has the template's exact pixel size and is the same, byte
//! for byte, for the same member and the same template and fonts.

use crate::config::Config;
use crate::core::card_text::{MIN_FONT_PX, MeasureText, fit_font_size, wrap_text};
use crate::errors::{AppError, AppResult};
use crate::models::Member;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_text_mut;
use qrcode::{Color, QrCode};
use rusttype::{Font, Scale, point};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Quiet zone around the QR code, in modules.
const QR_MARGIN_MODULES: usize = 1;

/// Geometry of the card, as fractions of the template size unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// QR side relative to the smaller template dimension
    pub qr_ratio: f32,
    /// upward shift of the QR code relative to the template height
    pub qr_lift_ratio: f32,
    pub text_width_ratio: f32,
    pub text_height_ratio: f32,
    pub max_name_lines: usize,
    /// initial name size is `floor(height * ratio) - offset`
    pub name_font_ratio: f32,
    pub name_font_offset_px: u32,
    /// pixels between the bottom of the QR code and the first name baseline
    pub name_gap_px: f32,
    /// department size is the name size minus this
    pub department_delta_px: u32,
    /// gap above the department line, relative to the name size
    pub department_gap_factor: f32,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            qr_ratio: 0.5,
            qr_lift_ratio: 0.14,
            text_width_ratio: 0.8,
            text_height_ratio: 0.2,
            max_name_lines: 3,
            name_font_ratio: 0.05,
            name_font_offset_px: 2,
            name_gap_px: 450.0,
            department_delta_px: 40,
            department_gap_factor: 0.1,
        }
    }
}

/// Where the QR code lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrPlacement {
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

impl CardLayout {
    /// Centered horizontally; vertically centered, then lifted.
    pub fn qr_placement(&self, width: u32, height: u32) -> QrPlacement {
        let (w, h) = (width as f32, height as f32);
        let size = (w.min(h) * self.qr_ratio).floor();
        let x = (w - size) / 2.0;
        let y = (h - size) / 2.0 - h * self.qr_lift_ratio;
        QrPlacement {
            x: x.round() as i64,
            y: y.round() as i64,
            size: size as u32,
        }
    }

    pub fn initial_name_px(&self, height: u32) -> u32 {
        ((height as f32 * self.name_font_ratio).floor() as u32).saturating_sub(self.name_font_offset_px)
    }
}

/// A TrueType font usable both for measuring and for drawing.
pub struct CardFont {
    font: Font<'static>,
}

impl CardFont {
    pub fn from_bytes(bytes: Vec<u8>) -> AppResult<Self> {
        Font::try_from_vec(bytes)
            .map(|font| Self { font })
            .ok_or_else(|| AppError::Card("not a usable TrueType font".to_string()))
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let bytes = fs::read(path)
            .map_err(|e| AppError::Card(format!("cannot load font {}: {e}", path.display())))?;
        Self::from_bytes(bytes)
            .map_err(|e| AppError::Card(format!("{}: {e}", path.display())))
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font.v_metrics(Scale::uniform(px)).ascent
    }
}

impl MeasureText for CardFont {
    fn text_width(&self, text: &str, px: f32) -> f32 {
        self.font
            .layout(text, Scale::uniform(px), point(0.0, 0.0))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .fold(0.0, f32::max)
    }
}

/// QR code for `data` as a `size`×`size` black-on-white image with a
/// one-module quiet zone.
pub fn render_qr(data: &str, size: u32) -> AppResult<RgbaImage> {
    if size == 0 {
        return Err(AppError::Card("card template too small for a QR code".to_string()));
    }

    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::Card(format!("cannot encode QR code for '{data}': {e}")))?;
    let modules = code.width();
    let colors = code.to_colors();
    let total = modules + 2 * QR_MARGIN_MODULES;

    let img = RgbaImage::from_fn(size, size, |px, py| {
        let mx = px as usize * total / size as usize;
        let my = py as usize * total / size as usize;
        let inside = (QR_MARGIN_MODULES..QR_MARGIN_MODULES + modules).contains(&mx)
            && (QR_MARGIN_MODULES..QR_MARGIN_MODULES + modules).contains(&my);
        if !inside {
            return WHITE;
        }
        let idx = (my - QR_MARGIN_MODULES) * modules + (mx - QR_MARGIN_MODULES);
        match colors[idx] {
            Color::Dark => BLACK,
            Color::Light => WHITE,
        }
    });

    Ok(img)
}

pub fn encode_png(img: &RgbaImage) -> AppResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone()).write_to(&mut buf, ImageOutputFormat::Png)?;
    Ok(buf.into_inner())
}

pub struct CardRenderer {
    background: RgbaImage,
    bold: CardFont,
    regular: CardFont,
    layout: CardLayout,
}

impl CardRenderer {
    pub fn new(background: RgbaImage, bold: CardFont, regular: CardFont) -> AppResult<Self> {
        if background.width() == 0 || background.height() == 0 {
            return Err(AppError::Card("card template is empty".to_string()));
        }
        Ok(Self {
            background,
            bold,
            regular,
            layout: CardLayout::default(),
        })
    }

    /// Load every asset up front; nothing is rendered unless all of them
    /// loaded.
    pub fn load(template: &Path, bold: &Path, regular: &Path) -> AppResult<Self> {
        let background = image::open(template)
            .map_err(|e| {
                AppError::Card(format!("cannot load card template {}: {e}", template.display()))
            })?
            .to_rgba8();
        let bold = CardFont::load(bold)?;
        let regular = CardFont::load(regular)?;
        debug!(
            template = %template.display(),
            width = background.width(),
            height = background.height(),
            "card assets loaded"
        );
        Self::new(background, bold, regular)
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::load(
            Path::new(&cfg.card_template),
            Path::new(&cfg.card_font_bold),
            Path::new(&cfg.card_font_regular),
        )
    }

    pub fn with_layout(mut self, layout: CardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.background.dimensions()
    }

    /// Font size the member's name will be drawn at.
    pub fn name_font_px(&self, full_name: &str) -> u32 {
        let (w, h) = self.dimensions();
        fit_font_size(
            &self.bold,
            full_name,
            w as f32 * self.layout.text_width_ratio,
            h as f32 * self.layout.text_height_ratio,
            self.layout.max_name_lines,
            self.layout.initial_name_px(h),
        )
    }

    pub fn render(&self, member: &Member) -> AppResult<RgbaImage> {
        let (w, h) = self.dimensions();
        let layout = &self.layout;
        let mut canvas = self.background.clone();

        // QR code
        let qr = layout.qr_placement(w, h);
        let qr_img = render_qr(&member.member_id, qr.size)?;
        imageops::overlay(&mut canvas, &qr_img, qr.x, qr.y);

        // Name, wrapped and centered
        let name_px = self.name_font_px(&member.full_name);
        let max_text_width = w as f32 * layout.text_width_ratio;
        let wrapped = wrap_text(&self.bold, &member.full_name, name_px as f32, max_text_width);
        let text_start = (qr.y + qr.size as i64) as f32 + layout.name_gap_px;

        for (i, line) in wrapped.lines.iter().enumerate() {
            let baseline = text_start + i as f32 * wrapped.line_height;
            self.draw_centered(&mut canvas, &self.bold, line, name_px as f32, baseline);
        }

        // Department, smaller and directly below
        if !member.department.trim().is_empty() {
            let dept_px = name_px
                .saturating_sub(layout.department_delta_px)
                .max(MIN_FONT_PX);
            let baseline = text_start
                + wrapped.total_height()
                + name_px as f32 * layout.department_gap_factor;
            self.draw_centered(
                &mut canvas,
                &self.regular,
                member.department.trim(),
                dept_px as f32,
                baseline,
            );
        }

        debug!(member = %member.member_id, name_px, lines = wrapped.lines.len(), "card rendered");
        Ok(canvas)
    }

    pub fn render_png(&self, member: &Member) -> AppResult<Vec<u8>> {
        encode_png(&self.render(member)?)
    }

    fn draw_centered(&self, canvas: &mut RgbaImage, font: &CardFont, text: &str, px: f32, baseline: f32) {
        let width = font.text_width(text, px);
        let x = (canvas.width() as f32 - width) / 2.0;
        let top = baseline - font.ascent(px);
        draw_text_mut(
            canvas,
            WHITE,
            x.round() as i32,
            top.round() as i32,
            Scale::uniform(px),
            &font.font,
            text,
        );
    }
}
