//! Frame cycling for sprite animations.
//!
//! One authoritative clock: the world tick advances every animation cursor.
//! Entities never own timers, so a removed entity cannot leak a scheduled
//! callback and frame progression is deterministic under replay.

use serde::{Deserialize, Serialize};

/// A frame cursor over a sprite strip
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Animation {
    frame_count: u8,
    /// Ticks each frame is held for
    period_ticks: u8,
    ticks: u32,
    /// Play once and clamp on the last frame (death animations)
    once: bool,
}

impl Animation {
    pub fn looping(frame_count: u8, period_ticks: u8) -> Self {
        Self {
            frame_count: frame_count.max(1),
            period_ticks: period_ticks.max(1),
            ticks: 0,
            once: false,
        }
    }

    pub fn once(frame_count: u8, period_ticks: u8) -> Self {
        Self {
            once: true,
            ..Self::looping(frame_count, period_ticks)
        }
    }

    /// Advance by one world tick
    pub fn advance(&mut self) {
        let total = self.frame_count as u32 * self.period_ticks as u32;
        if self.once && self.ticks >= total - 1 {
            return;
        }
        self.ticks = if self.once {
            self.ticks + 1
        } else {
            (self.ticks + 1) % total
        };
    }

    /// Current frame index in `[0, frame_count)`
    #[inline]
    pub fn frame(&self) -> u8 {
        (self.ticks / self.period_ticks as u32) as u8
    }

    pub fn restart(&mut self) {
        self.ticks = 0;
    }

    /// A one-shot animation that has reached its last frame
    pub fn finished(&self) -> bool {
        self.once && self.frame() == self.frame_count - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looping_wraps() {
        let mut a = Animation::looping(3, 2);
        let mut seen = Vec::new();
        for _ in 0..12 {
            seen.push(a.frame());
            a.advance();
        }
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_once_clamps_on_last_frame() {
        let mut a = Animation::once(3, 2);
        for _ in 0..50 {
            a.advance();
        }
        assert_eq!(a.frame(), 2);
        assert!(a.finished());
    }

    #[test]
    fn test_restart() {
        let mut a = Animation::looping(4, 1);
        a.advance();
        a.advance();
        assert_eq!(a.frame(), 2);
        a.restart();
        assert_eq!(a.frame(), 0);
    }
}
