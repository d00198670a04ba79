//! Collision primitives: axis-aligned boxes, sprite-padding insets, and the
//! stomp predicate.
//!
//! Everything gameplay-collidable is an axis-aligned rectangle. Fairness
//! hinges on two refinements: sprite frames carry transparent padding, so
//! hitboxes are *inset* from the drawn rectangle; and a downward hit on an
//! enemy's head is a stomp, not mutual damage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STOMP_TOLERANCE;

/// Axis-aligned rectangle, top-left anchored. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// AABB overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shrink the rectangle by per-edge insets (sprite padding)
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect {
            pos: Vec2::new(self.pos.x + insets.left, self.pos.y + insets.top),
            size: Vec2::new(
                (self.size.x - insets.left - insets.right).max(0.0),
                (self.size.y - insets.top - insets.bottom).max(0.0),
            ),
        }
    }
}

/// Per-edge hitbox insets
///
/// Different entity pairs use different insets on purpose: the padding baked
/// into each sprite sheet differs, so the offsets are tuned per pair rather
/// than unified.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Player hitbox insets against enemies (large top inset: hat and hair)
pub const PLAYER_HITBOX: Insets = Insets::new(60.0, 60.0, 130.0, 10.0);
/// Bottle pickup insets; bottles sit partly buried in sand
pub const BOTTLE_PICKUP_HITBOX: Insets = Insets::new(15.0, 15.0, 20.0, 10.0);

/// Stomp predicate, evaluated only once an AABB overlap is already true.
///
/// `vel_y` is the player's vertical speed with up positive; falling means
/// `vel_y < 0`. The bottom-vs-top comparison carries a symmetric tolerance so
/// grazing the enemy's head still counts.
#[inline]
pub fn is_stomp(player_bottom: f32, player_vel_y: f32, enemy_top: f32) -> bool {
    player_vel_y < 0.0 && player_bottom - STOMP_TOLERANCE < enemy_top + STOMP_TOLERANCE
}
