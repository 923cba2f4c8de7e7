//! Colours and per-mode line styles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TransitMode;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const RED: Color = Color::hex(0xFF0000);
    pub const GREEN: Color = Color::hex(0x008000);
    pub const BLUE: Color = Color::hex(0x0000FF);
    pub const YELLOW: Color = Color::hex(0xFFFF00);
    pub const LIGHT_BLUE: Color = Color::hex(0xADD8E6);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }
}

/// CSS-style `#rrggbb`, which is what 2D canvas APIs accept.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How connections of one mode are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeStyle {
    pub color: Color,
    /// Stroke width in world units.
    pub width: f64,
    /// Draw order. Lower indices are drawn first and end up underneath.
    pub index: u8,
}

/// Style table covering every [`TransitMode`].
///
/// One field per mode, so a lookup can never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeStyles {
    pub taxi: ModeStyle,
    pub bus: ModeStyle,
    pub underground: ModeStyle,
    pub water: ModeStyle,
}

impl Default for ModeStyles {
    /// Underground at the bottom, then bus, taxi, and water on top.
    fn default() -> Self {
        Self {
            taxi: ModeStyle {
                color: Color::YELLOW,
                width: 2.0,
                index: 2,
            },
            bus: ModeStyle {
                color: Color::GREEN,
                width: 6.0,
                index: 1,
            },
            underground: ModeStyle {
                color: Color::RED,
                width: 12.0,
                index: 0,
            },
            water: ModeStyle {
                color: Color::BLUE,
                width: 4.0,
                index: 3,
            },
        }
    }
}

impl ModeStyles {
    pub fn get(&self, mode: TransitMode) -> &ModeStyle {
        match mode {
            TransitMode::Taxi => &self.taxi,
            TransitMode::Bus => &self.bus,
            TransitMode::Underground => &self.underground,
            TransitMode::Water => &self.water,
        }
    }

    pub fn get_mut(&mut self, mode: TransitMode) -> &mut ModeStyle {
        match mode {
            TransitMode::Taxi => &mut self.taxi,
            TransitMode::Bus => &mut self.bus,
            TransitMode::Underground => &mut self.underground,
            TransitMode::Water => &mut self.water,
        }
    }

    /// Reassigns draw indices so `order[0]` is drawn first (bottom) and
    /// `order[3]` last (top). Colours and widths are kept.
    ///
    /// Modes missing from `order` (if it repeats one) keep their old
    /// index; sorting stays stable either way.
    pub fn with_priority(mut self, order: [TransitMode; 4]) -> Self {
        for (i, mode) in order.into_iter().enumerate() {
            self.get_mut(mode).index = i as u8;
        }
        self
    }
}
