//! Two-digit score and high score display
//!
//! Each group shows a units glyph and a tens glyph; the tens glyph is hidden
//! below 10. Values above 99 show as 99.

use serde::{Deserialize, Serialize};

/// Highest value two digits can show
pub const MAX_DISPLAY_SCORE: u32 = 99;

/// One digit image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitGlyph {
    pub digit: u8,
    pub visible: bool,
}

/// Tens and units glyphs of one number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitPair {
    pub tens: DigitGlyph,
    pub units: DigitGlyph,
}

impl DigitPair {
    fn set(&mut self, value: u32) {
        let value = value.min(MAX_DISPLAY_SCORE);
        let tens = (value / 10) as u8;
        let units = (value % 10) as u8;

        self.units = DigitGlyph {
            digit: units,
            visible: true,
        };
        self.tens = if tens > 0 {
            DigitGlyph {
                digit: tens,
                visible: true,
            }
        } else {
            DigitGlyph {
                digit: self.tens.digit,
                visible: false,
            }
        };
    }

    fn hide(&mut self) {
        self.tens.visible = false;
        self.units.visible = false;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreDisplay {
    pub current: DigitPair,
    pub high: DigitPair,
    /// The whole high score panel
    pub high_visible: bool,
    saturated: bool,
}

impl ScoreDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_score(&mut self, score: u32) {
        if score > MAX_DISPLAY_SCORE {
            if !self.saturated {
                log::warn!("Score {} exceeds display, showing {}", score, MAX_DISPLAY_SCORE);
                self.saturated = true;
            }
        } else {
            self.saturated = false;
        }
        self.current.set(score);
    }

    pub fn hide_current_score(&mut self) {
        self.current.hide();
    }

    pub fn show_high_score(&mut self, score: u32) {
        self.high_visible = true;
        self.high.set(score);
    }

    pub fn hide_high_score(&mut self) {
        self.high_visible = false;
    }
}
