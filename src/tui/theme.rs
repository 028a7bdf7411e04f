use ratatui::style::Color;

use crate::model::ColorTag;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    /// Text drawn on top of a slot background
    pub cell_text: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1D, 0x24),
            text: Color::Rgb(0xD8, 0xDC, 0xE4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7A, 0x80, 0x8C),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cell_text: Color::Rgb(0x1A, 0x1D, 0x24),
            selection_bg: Color::Rgb(0xFB, 0x41, 0x96),
        }
    }
}

impl Theme {
    /// Background for a slot of the given color, matching the printed sheet
    pub fn slot_bg(&self, color: ColorTag) -> Color {
        match color {
            ColorTag::Pink => Color::Rgb(0xFC, 0xE7, 0xF3),
            ColorTag::Blue => Color::Rgb(0xDB, 0xEA, 0xFE),
            ColorTag::Yellow => Color::Rgb(0xFE, 0xF9, 0xC3),
            ColorTag::White => Color::Rgb(0xFF, 0xFF, 0xFF),
            ColorTag::Gray => Color::Rgb(0xE5, 0xE7, 0xEB),
        }
    }

    /// Short swatch label for a color in hints and titles
    pub fn color_label(color: ColorTag) -> &'static str {
        match color {
            ColorTag::Pink => "PNK",
            ColorTag::Blue => "BLU",
            ColorTag::Yellow => "YEL",
            ColorTag::White => "WHT",
            ColorTag::Gray => "GRY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_color_is_distinct() {
        let theme = Theme::default();
        let mut seen = Vec::new();
        for color in ColorTag::ALL {
            let bg = theme.slot_bg(color);
            assert!(!seen.contains(&bg), "duplicate background for {color}");
            seen.push(bg);
        }
    }

    #[test]
    fn labels_are_three_cells() {
        for color in ColorTag::ALL {
            assert_eq!(Theme::color_label(color).len(), 3);
        }
    }
}
