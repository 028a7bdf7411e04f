use std::fmt;

use serde::{Deserialize, Serialize};

/// Background color of a schedule cell. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Pink,
    Blue,
    Yellow,
    #[default]
    White,
    Gray,
}

impl ColorTag {
    /// All colors in palette order
    pub const ALL: [ColorTag; 5] = [
        ColorTag::Pink,
        ColorTag::Blue,
        ColorTag::Yellow,
        ColorTag::White,
        ColorTag::Gray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTag::Pink => "pink",
            ColorTag::Blue => "blue",
            ColorTag::Yellow => "yellow",
            ColorTag::White => "white",
            ColorTag::Gray => "gray",
        }
    }

    pub fn parse_color(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pink" => Some(ColorTag::Pink),
            "blue" => Some(ColorTag::Blue),
            "yellow" => Some(ColorTag::Yellow),
            "white" => Some(ColorTag::White),
            "gray" | "grey" => Some(ColorTag::Gray),
            _ => None,
        }
    }

    /// The next color in palette order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three fixed time-of-day rows of a day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Slot1,
    Slot2,
    Slot3,
}

impl SlotId {
    pub const ALL: [SlotId; 3] = [SlotId::Slot1, SlotId::Slot2, SlotId::Slot3];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::Slot1 => "slot1",
            SlotId::Slot2 => "slot2",
            SlotId::Slot3 => "slot3",
        }
    }

    /// Human label for the row position
    pub fn label(self) -> &'static str {
        match self {
            SlotId::Slot1 => "upper",
            SlotId::Slot2 => "middle",
            SlotId::Slot3 => "lower",
        }
    }

    /// Zero-based row position
    pub fn index(self) -> usize {
        match self {
            SlotId::Slot1 => 0,
            SlotId::Slot2 => 1,
            SlotId::Slot3 => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Accepts `slot1`, `1`, or the row label (`upper`, `middle`, `lower`)
    pub fn parse_slot(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slot1" | "1" | "upper" => Some(SlotId::Slot1),
            "slot2" | "2" | "middle" => Some(SlotId::Slot2),
            "slot3" | "3" | "lower" => Some(SlotId::Slot3),
            _ => None,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The atomic renderable unit: rich-text markup plus a background color.
///
/// Replaced wholesale on edit, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub text: String,
    pub color: ColorTag,
}

impl ScheduleSlot {
    pub fn new(text: impl Into<String>, color: ColorTag) -> Self {
        ScheduleSlot {
            text: text.into(),
            color,
        }
    }

    /// An empty placeholder cell with the given color
    pub fn blank(color: ColorTag) -> Self {
        ScheduleSlot {
            text: String::new(),
            color,
        }
    }
}
