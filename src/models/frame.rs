use std::fmt;

use thiserror::Error;

pub const BAR_COUNT: usize = 5;
pub const MAX_LEVEL: u8 = 9;

/// Per-bucket price averages, index 0 is the earliest window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketSet(pub [f64; BAR_COUNT]);

impl BucketSet {
    pub fn values(&self) -> &[f64; BAR_COUNT] {
        &self.0
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("bar level {level} at index {index} exceeds {max}", max = MAX_LEVEL)]
pub struct InvalidLevel {
    pub index: usize,
    pub level: u8,
}

/// LED bar heights, one per bucket. Levels never exceed [`MAX_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFrame([u8; BAR_COUNT]);

impl DisplayFrame {
    pub fn new(levels: [u8; BAR_COUNT]) -> Result<Self, InvalidLevel> {
        match levels.iter().position(|&level| level > MAX_LEVEL) {
            Some(index) => Err(InvalidLevel {
                index,
                level: levels[index],
            }),
            None => Ok(Self(levels)),
        }
    }

    pub fn levels(&self) -> &[u8; BAR_COUNT] {
        &self.0
    }

    /// Wire form for the display: one ASCII digit per bar and a trailing newline.
    pub fn encode(&self) -> [u8; BAR_COUNT + 1] {
        let mut bytes = [b'\n'; BAR_COUNT + 1];
        for (byte, level) in bytes.iter_mut().zip(self.0) {
            *byte = b'0' + level;
        }
        bytes
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.0 {
            write!(f, "{level}")?;
        }
        Ok(())
    }
}
