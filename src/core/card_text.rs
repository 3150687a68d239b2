//! Text layout for membership cards: greedy word wrap and font-size fitting.
//!
//! Layout only needs a width measurement, so it works against any
//! [`MeasureText`] implementation (a real font on the renderer side).

/// Smallest font size the name is ever rendered at.
pub const MIN_FONT_PX: u32 = 12;
/// Shrink step while fitting.
pub const FONT_STEP_PX: u32 = 2;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub trait MeasureText {
    /// Advance width of `text` rendered at `px` pixels.
    fn text_width(&self, text: &str, px: f32) -> f32;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub line_height: f32,
}

impl WrappedText {
    pub fn total_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// Greedily pack words into lines no wider than `max_width`. A single word
/// wider than the limit gets a line of its own rather than being split.
/// A candidate line is measured with one trailing space, so a line that
/// only fits without it moves its last word down.
pub fn wrap_text<M: MeasureText + ?Sized>(
    measure: &M,
    text: &str,
    px: f32,
    max_width: f32,
) -> WrappedText {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure.text_width(&format!("{candidate} "), px) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);

    WrappedText {
        lines,
        line_height: px * LINE_HEIGHT_FACTOR,
    }
}

/// Largest size, starting from `initial` and shrinking by
/// [`FONT_STEP_PX`], at which `text` wraps into at most `max_lines` lines
/// whose total height stays within `max_height`. Never returns less than
/// [`MIN_FONT_PX`]; when nothing fits the floor is used.
pub fn fit_font_size<M: MeasureText + ?Sized>(
    measure: &M,
    text: &str,
    max_width: f32,
    max_height: f32,
    max_lines: usize,
    initial: u32,
) -> u32 {
    let mut size = initial.max(MIN_FONT_PX);

    while size > MIN_FONT_PX {
        let wrapped = wrap_text(measure, text, size as f32, max_width);
        if wrapped.total_height() <= max_height && wrapped.lines.len() <= max_lines {
            break;
        }
        size = size.saturating_sub(FONT_STEP_PX).max(MIN_FONT_PX);
    }

    size
}
