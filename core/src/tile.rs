use core::fmt;

use serde::{Deserialize, Serialize};

/// Value printed on a tile. What a value means (plain number, wild card, sum
/// operand) is decided by the active [`GameMode`](crate::GameMode).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(u8);

impl Tile {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Tile {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
