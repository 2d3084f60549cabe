use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// An RGB color, kept renderer-agnostic so the core stays free of UI types
pub type Rgb = (u8, u8, u8);

const GREEN: Rgb = (0, 255, 0);
const BLUE: Rgb = (0, 0, 255);
const GOLD: Rgb = (255, 215, 0);

const RAINBOW: [Rgb; 7] = [
    (255, 0, 0),
    (255, 165, 0),
    (255, 255, 0),
    (0, 255, 0),
    (0, 0, 255),
    (75, 0, 130),
    (238, 130, 238),
];

/// Cosmetic snake variant. Has no effect on gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Skin {
    Classic,
    Rainbow,
    Blue,
    Gold,
}

/// How a skin colors the body segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinPalette {
    /// Every segment the same color
    Solid(Rgb),
    /// Colors cycle along the body, head first
    Cyclic(&'static [Rgb]),
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Classic, Skin::Rainbow, Skin::Blue, Skin::Gold];

    pub fn name(&self) -> &'static str {
        match self {
            Skin::Classic => "Classic",
            Skin::Rainbow => "Rainbow",
            Skin::Blue => "Blue",
            Skin::Gold => "Gold",
        }
    }

    pub fn palette(&self) -> SkinPalette {
        match self {
            Skin::Classic => SkinPalette::Solid(GREEN),
            Skin::Rainbow => SkinPalette::Cyclic(&RAINBOW),
            Skin::Blue => SkinPalette::Solid(BLUE),
            Skin::Gold => SkinPalette::Solid(GOLD),
        }
    }

    /// Color for the i-th body segment, counted from the head
    pub fn color_for_segment(&self, index: usize) -> Rgb {
        match self.palette() {
            SkinPalette::Solid(color) => color,
            SkinPalette::Cyclic(colors) => colors[index % colors.len()],
        }
    }
}
