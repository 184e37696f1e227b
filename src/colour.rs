//! RGBA palette
//!
//! Each balloon layer and tower kind has a fixed identity colour. The host
//! renderer reads them; the simulation itself never does.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// An opaque-by-default RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const ORANGE: Colour = Colour::rgb(255, 165, 0);
    pub const YELLOW: Colour = Colour::rgb(255, 255, 0);
    pub const GREEN: Colour = Colour::rgb(0, 255, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const CYAN: Colour = Colour::rgb(0, 255, 255);
    pub const PURPLE: Colour = Colour::rgb(255, 0, 255);
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const GRAY: Colour = Colour::rgb(128, 128, 128);
    pub const BROWN: Colour = Colour::rgb(165, 42, 42);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from `[r, g, b]` or `[r, g, b, a]`; any other length is rejected
    pub fn from_components(components: &[u8]) -> Result<Self, SimError> {
        match *components {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
            _ => Err(SimError::InvalidColour {
                components: components.len(),
            }),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
