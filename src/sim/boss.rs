//! The end-of-level boss and its behavior state machine.
//!
//! Phases advance monotonically: `Idle -> Alert -> Attack`, never backward.
//! The boss ignores gravity; its only vertical motion is a scripted
//! sine-curve jump that returns exactly to the baseline. Rendering priority
//! is dead > hurt > phase animation, so a hurt flash overrides everything
//! except the death frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::body::Body;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Scripted strut, no movement, no damage capability
    Idle,
    /// Saw the player; holds the alert animation until `until`
    Alert { until: u64 },
    /// Chasing the player
    Attack,
}

/// Animation state derived from phase + vitals, strict priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossAnim {
    Dead,
    Hurt,
    Attack,
    Alert,
    Idle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub body: Body,
    /// Boss health pool, separate from the regular 100-point vitals
    pub energy: u32,
    pub phase: BossPhase,
    pub last_hit_tick: Option<u64>,
    /// Tick the active scripted jump started, if any
    jump_started_at: Option<u64>,
    /// Tick the last jump finished, for the cooldown
    last_jump_end: u64,
    /// Arena anchor; the boss spawns here and never retreats past it
    pub anchor_x: f32,
    /// Corpse removal deadline; the win check polls for removal
    pub remove_at: Option<u64>,
    /// Strip the frame cursor currently indexes
    anim_kind: BossAnim,
    pub anim: Animation,
}

impl Boss {
    pub fn new(id: u32, anchor_x: f32) -> Self {
        let ground_y = GROUND_Y - BOSS_SIZE.y;
        let mut body = Body::new(Vec2::new(anchor_x, ground_y), BOSS_SIZE, ground_y);
        body.facing_left = true; // player approaches from the left
        Self {
            id,
            body,
            energy: 100,
            phase: BossPhase::Idle,
            last_hit_tick: None,
            jump_started_at: None,
            last_jump_end: 0,
            anchor_x,
            remove_at: None,
            anim_kind: BossAnim::Idle,
            anim: anim_for(BossAnim::Idle),
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    pub fn is_hurt(&self, now: u64) -> bool {
        !self.is_dead()
            && self
                .last_hit_tick
                .is_some_and(|t| now.saturating_sub(t) < HURT_WINDOW_TICKS)
    }

    pub fn due_for_removal(&self, now: u64) -> bool {
        self.remove_at.is_some_and(|t| now >= t)
    }

    /// One-time `Idle -> Alert` latch; returns true when it fires so the
    /// world can one-shot the alert sound
    pub fn activate(&mut self, now: u64) -> bool {
        if self.is_dead() || self.phase != BossPhase::Idle {
            return false;
        }
        self.phase = BossPhase::Alert {
            until: now + BOSS_ALERT_TICKS,
        };
        true
    }

    /// Take one bottle hit; at zero energy the corpse removal is scheduled
    /// and phase transitions halt for good
    pub fn hit(&mut self, now: u64) {
        if self.is_dead() {
            return;
        }
        self.energy = self.energy.saturating_sub(BOSS_HIT_DAMAGE);
        self.last_hit_tick = Some(now);
        if self.energy == 0 {
            self.remove_at = Some(now + BOSS_REMOVE_DELAY_TICKS);
        }
        // Swap to the hurt/death strip immediately, not on the next step
        self.set_anim(self.anim_state(now));
    }

    /// Advance the state machine by one tick
    pub fn step(&mut self, player_center_x: f32, now: u64, dt: f32) {
        // Alert holds for a fixed duration, then auto-advances
        if !self.is_dead()
            && let BossPhase::Alert { until } = self.phase
            && now >= until
        {
            self.phase = BossPhase::Attack;
        }

        // Keep the frame cursor on the strip the render state selects
        self.set_anim(self.anim_state(now));
        self.anim.advance();
        if self.is_dead() || self.phase != BossPhase::Attack {
            return;
        }

        let center_x = self.body.pos.x + self.body.size.x / 2.0;
        let gap = (center_x - player_center_x).abs();
        self.body.facing_left = player_center_x < center_x;

        // Close in, but never stack on top of the player
        if gap > BOSS_STOP_DISTANCE {
            let dir = if self.body.facing_left { -1.0 } else { 1.0 };
            self.body.pos.x += dir * BOSS_WALK_SPEED * dt;
        }

        self.step_jump(gap, now);
    }

    /// Scripted jump: eligible only off-jump, off-cooldown and with the
    /// player in the mid-range band. Plays a sine arc over a fixed duration
    /// and lands back exactly on the baseline.
    fn step_jump(&mut self, gap: f32, now: u64) {
        match self.jump_started_at {
            None => {
                let cooled = now.saturating_sub(self.last_jump_end) >= BOSS_JUMP_COOLDOWN_TICKS;
                let in_band = gap > BOSS_JUMP_BAND_NEAR && gap < BOSS_JUMP_BAND_FAR;
                if cooled && in_band {
                    self.jump_started_at = Some(now);
                }
            }
            Some(start) => {
                let elapsed = now - start;
                if elapsed >= BOSS_JUMP_DURATION_TICKS {
                    self.body.pos.y = self.body.ground_y;
                    self.jump_started_at = None;
                    self.last_jump_end = now;
                } else {
                    let t = elapsed as f32 / BOSS_JUMP_DURATION_TICKS as f32;
                    let offset = (t * std::f32::consts::PI).sin() * BOSS_JUMP_HEIGHT;
                    self.body.pos.y = self.body.ground_y - offset;
                }
            }
        }
    }

    #[inline]
    pub fn jumping(&self) -> bool {
        self.jump_started_at.is_some()
    }

    pub fn anim_state(&self, now: u64) -> BossAnim {
        if self.is_dead() {
            BossAnim::Dead
        } else if self.is_hurt(now) {
            BossAnim::Hurt
        } else {
            match self.phase {
                BossPhase::Attack => BossAnim::Attack,
                BossPhase::Alert { .. } => BossAnim::Alert,
                BossPhase::Idle => BossAnim::Idle,
            }
        }
    }

    fn set_anim(&mut self, kind: BossAnim) {
        if kind != self.anim_kind {
            self.anim_kind = kind;
            self.anim = anim_for(kind);
        }
    }
}

fn anim_for(kind: BossAnim) -> Animation {
    match kind {
        BossAnim::Dead => Animation::once(3, 10),
        BossAnim::Hurt => Animation::looping(3, 6),
        BossAnim::Attack => Animation::looping(8, 6),
        BossAnim::Alert => Animation::looping(8, 8),
        BossAnim::Idle => Animation::looping(4, 8),
    }
}
