use checkdesk::core::card::{CardLayout, CardRenderer, QrPlacement, render_qr};
use checkdesk::core::card_text::{MIN_FONT_PX, MeasureText, fit_font_size, wrap_text};
use checkdesk::errors::AppError;
use checkdesk::models::Member;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Every glyph is half as wide as the font size.
struct HalfEm;

impl MeasureText for HalfEm {
    fn text_width(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * 0.5
    }
}

#[test]
fn test_wrap_is_greedy() {
    let wrapped = wrap_text(&HalfEm, "aa bb cc", 10.0, 30.0);
    assert_eq!(wrapped.lines, vec!["aa bb", "cc"]);
    assert_eq!(wrapped.line_height, 12.0);
    assert_eq!(wrapped.total_height(), 24.0);
}

#[test]
fn test_wrap_counts_trailing_space() {
    // "aa bbb" is exactly 30px wide, "aa bbb " is not
    let wrapped = wrap_text(&HalfEm, "aa bbb", 10.0, 30.0);
    assert_eq!(wrapped.lines, vec!["aa", "bbb"]);
}

#[test]
fn test_wrap_never_splits_a_word() {
    let wrapped = wrap_text(&HalfEm, "Supercalifragilistic", 10.0, 50.0);
    assert_eq!(wrapped.lines, vec!["Supercalifragilistic"]);
}

#[test]
fn test_fit_keeps_initial_size_when_it_fits() {
    assert_eq!(fit_font_size(&HalfEm, "Jo", 800.0, 300.0, 3, 73), 73);
}

#[test]
fn test_fit_shrinks_by_two_until_height_fits() {
    // 1.2 * 84 > 100, 1.2 * 82 <= 100
    assert_eq!(fit_font_size(&HalfEm, "A", 1000.0, 100.0, 3, 100), 82);
}

#[test]
fn test_fit_respects_line_limit() {
    // "aa bb " must fit in 60px: above 20px every word needs its own line
    assert_eq!(fit_font_size(&HalfEm, "aa bb cc dd", 60.0, 1000.0, 2, 40), 20);
}

#[test]
fn test_fit_never_goes_below_floor() {
    let long = "word ".repeat(200);
    assert_eq!(fit_font_size(&HalfEm, &long, 50.0, 10.0, 3, 73), MIN_FONT_PX);
    assert_eq!(fit_font_size(&HalfEm, "A", 1000.0, 1000.0, 3, 4), MIN_FONT_PX);
}

#[test]
fn test_qr_placement_is_centered_and_lifted() {
    let layout = CardLayout::default();
    assert_eq!(
        layout.qr_placement(1000, 1500),
        QrPlacement {
            x: 250,
            y: 290,
            size: 500
        }
    );
    assert_eq!(layout.initial_name_px(1500), 73);
}

#[test]
fn test_qr_image_has_quiet_zone() {
    let qr = render_qr("M1", 210).unwrap();
    assert_eq!(qr.dimensions(), (210, 210));
    assert_eq!(*qr.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    // a finder pattern starts right after the one-module margin
    let dark = qr
        .pixels()
        .filter(|p| **p == Rgba([0, 0, 0, 255]))
        .count();
    assert!(dark > 0);
}

#[test]
fn test_qr_is_deterministic() {
    assert_eq!(render_qr("M42", 300).unwrap(), render_qr("M42", 300).unwrap());
    assert_ne!(render_qr("M42", 300).unwrap(), render_qr("M43", 300).unwrap());
}

#[test]
fn test_missing_template_is_an_error() {
    let err = CardRenderer::load(
        Path::new("/definitely/not/here.png"),
        Path::new("/nope-bold.ttf"),
        Path::new("/nope.ttf"),
    )
    .err()
    .expect("load must fail");

    assert!(matches!(err, AppError::Card(_)));
    assert!(err.to_string().contains("card template"));
}

#[test]
fn test_missing_font_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("bg.png");
    RgbaImage::from_pixel(40, 60, Rgba([10, 20, 30, 255]))
        .save(&template)
        .unwrap();

    let err = CardRenderer::load(&template, Path::new("/nope-bold.ttf"), Path::new("/nope.ttf"))
        .err()
        .expect("load must fail");
    assert!(err.to_string().contains("font"));
}

const FONT_CANDIDATES: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
];

fn system_font() -> Option<&'static Path> {
    FONT_CANDIDATES.iter().map(Path::new).find(|p| p.exists())
}

#[test]
fn test_render_keeps_template_size_and_is_deterministic() {
    let Some(font) = system_font() else {
        eprintln!("no TrueType font found, skipping");
        return;
    };

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("bg.png");
    RgbaImage::from_pixel(1000, 1500, Rgba([20, 40, 90, 255]))
        .save(&template)
        .unwrap();

    let renderer = CardRenderer::load(&template, font, font).unwrap();
    let member = Member {
        member_id: "M1".to_string(),
        full_name: "Jordan Smith".to_string(),
        department: "ERA Softwares".to_string(),
        ..Default::default()
    };

    let a = renderer.render(&member).unwrap();
    let b = renderer.render(&member).unwrap();
    assert_eq!(a.dimensions(), (1000, 1500));
    assert_eq!(a, b);
    assert_eq!(renderer.render_png(&member).unwrap(), renderer.render_png(&member).unwrap());

    // the QR area is no longer the plain background
    assert_ne!(*a.get_pixel(500, 540), Rgba([20, 40, 90, 255]));

    // the name sits on the baseline 450px below the QR code (y = 1240)
    let name_band = (1170..1245)
        .flat_map(|y| (0..1000).map(move |x| (x, y)))
        .filter(|&(x, y)| *a.get_pixel(x, y) != Rgba([20, 40, 90, 255]))
        .count();
    assert!(name_band > 0, "name not drawn near y=1240");

    // nothing between the QR code and the name
    assert!((800..1100).all(|y| *a.get_pixel(500, y) == Rgba([20, 40, 90, 255])));
}
