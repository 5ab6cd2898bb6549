//! Player sprite frame cycling

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteAnimator {
    frame_count: usize,
    index: usize,
}

impl SpriteAnimator {
    /// `frame_count` is clamped to at least one frame
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count: frame_count.max(1),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Advance one frame, wrapping to the first
    pub fn next_frame(&mut self) -> usize {
        self.index = (self.index + 1) % self.frame_count;
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_after_last_frame() {
        let mut sprite = SpriteAnimator::new(3);
        assert_eq!(sprite.next_frame(), 1);
        assert_eq!(sprite.next_frame(), 2);
        assert_eq!(sprite.next_frame(), 0);
    }

    #[test]
    fn test_reset() {
        let mut sprite = SpriteAnimator::new(4);
        sprite.next_frame();
        sprite.next_frame();
        sprite.reset();
        assert_eq!(sprite.index(), 0);
    }

    #[test]
    fn test_single_frame() {
        let mut sprite = SpriteAnimator::new(0);
        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.next_frame(), 0);
    }
}
