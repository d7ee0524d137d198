use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::drag::Position;

pub const FONT_SIZE_MIN: u32 = 10;
pub const FONT_SIZE_MAX: u32 = 100;
pub const FONT_SIZE_DEFAULT: u32 = 24;
pub const POSITION_DEFAULT: Position = Position { x: 50.0, y: 50.0 };
pub const FONT_FAMILY: &str = "sans-serif";
/// Widest a line of overlay text may get, as a share of the preview width.
pub const TEXT_MAX_WIDTH_RATIO: f64 = 0.9;

/// Text drawn over the gradient preview.
///
/// Clearing the content hides the overlay but keeps every other field, so
/// typing again brings the text back where it was and how it looked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    content: String,
    font_size_px: u32,
    bold: bool,
    italic: bool,
    color: HexColor,
    position: Position,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            font_size_px: FONT_SIZE_DEFAULT,
            bold: false,
            italic: false,
            color: HexColor::WHITE,
            position: POSITION_DEFAULT,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size_px(&self) -> u32 {
        self.font_size_px
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_font_size_px(&mut self, size: u32) {
        self.font_size_px = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns false when there was nothing to remove.
    pub fn clear_content(&mut self) -> bool {
        if self.content.is_empty() {
            return false;
        }
        self.content.clear();
        true
    }

    pub fn font_weight_css(&self) -> &'static str {
        if self.bold {
            "bold"
        } else {
            "normal"
        }
    }

    pub fn font_style_css(&self) -> &'static str {
        if self.italic {
            "italic"
        } else {
            "normal"
        }
    }

    /// CSS `font` shorthand, e.g. `italic bold 24px sans-serif`.
    pub fn font_shorthand(&self) -> String {
        format!(
            "{} {} {}px {}",
            self.font_style_css(),
            self.font_weight_css(),
            self.font_size_px,
            FONT_FAMILY
        )
    }
}

/// Breaks `content` into lines no wider than `max_width` as reported by
/// `measure`, the way the preview lays the text out: embedded newlines
/// always break, lines wrap between words, and a word wider than a whole
/// line is split between characters.
pub fn wrap_lines<F, E>(content: &str, max_width: f64, mut measure: F) -> Result<Vec<String>, E>
where
    F: FnMut(&str) -> Result<f64, E>,
{
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if measure(&candidate)? <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for ch in word.chars() {
                let mut next = line.clone();
                next.push(ch);
                // a line always keeps at least one character
                if !line.is_empty() && measure(&next)? > max_width {
                    lines.push(std::mem::replace(&mut line, ch.to_string()));
                } else {
                    line = next;
                }
            }
        }
        lines.push(line);
    }
    Ok(lines)
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}
