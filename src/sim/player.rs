//! The player character: movement, jumping, hurt bookkeeping and the
//! animation priority ladder (dead > hurt > airborne > walking > idle, with
//! idle decaying into sleep after a few seconds of inactivity).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::body::{Body, Vitals};
use super::collision::{PLAYER_HITBOX, Rect};
use super::tick::TickInput;
use crate::consts::*;

/// Animation state, strict priority order (first match wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Dead,
    Hurt,
    Jumping,
    Walking,
    Sleeping,
    Idle,
}

/// What a control step did, for the world to turn into events
#[derive(Debug, Default, Clone, Copy)]
pub struct StepOutcome {
    pub jumped: bool,
    pub started_walking: bool,
    pub stopped_walking: bool,
    pub fell_asleep: bool,
    pub woke_up: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub vitals: Vitals,
    pub coins: u32,
    /// Ticks spent idle; past the threshold the character sleeps
    pub standing_ticks: u64,
    pub sleeping: bool,
    /// Net horizontal movement this tick
    pub moving: bool,
    /// Walking-loop sound currently playing on the host
    walking_loop_on: bool,
    /// Jump key state last tick; jumping is rising-edge only
    prev_jump_held: bool,
    anim_state: PlayerAnim,
    pub anim: Animation,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(
                Vec2::new(80.0, PLAYER_GROUND_Y),
                PLAYER_SIZE,
                PLAYER_GROUND_Y,
            ),
            vitals: Vitals::full(),
            coins: 0,
            standing_ticks: 0,
            sleeping: false,
            moving: false,
            walking_loop_on: false,
            prev_jump_held: false,
            anim_state: PlayerAnim::Idle,
            anim: anim_for(PlayerAnim::Idle),
        }
    }

    /// Inset hitbox used against enemies and bottle pickups
    #[inline]
    pub fn hitbox(&self) -> Rect {
        self.body.rect().inset(PLAYER_HITBOX)
    }

    /// Apply intent flags, gravity and the idle/sleep timers for one tick.
    /// Horizontal position is clamped to `[0, end_x]`.
    pub fn step(&mut self, input: &TickInput, dt: f32, end_x: f32, now: u64) -> StepOutcome {
        let mut out = StepOutcome::default();
        let jump_edge = input.jump && !self.prev_jump_held;
        self.prev_jump_held = input.jump;
        if self.vitals.is_dead() {
            // Death silences both sound loops
            if self.end_sleep() {
                out.woke_up = true;
            }
            if self.end_walking_loop() {
                out.stopped_walking = true;
            }
            self.set_anim(PlayerAnim::Dead);
            self.anim.advance();
            return out;
        }

        let mut dx = 0.0;
        if input.right {
            dx += RUN_SPEED * dt;
        }
        if input.left {
            dx -= RUN_SPEED * dt;
        }
        if dx > 0.0 {
            self.body.facing_left = false;
        } else if dx < 0.0 {
            self.body.facing_left = true;
        }
        self.body.pos.x = (self.body.pos.x + dx).clamp(0.0, end_x);
        self.moving = dx != 0.0;

        if jump_edge && !self.body.airborne() {
            self.body.jump(JUMP_SPEED);
            out.jumped = true;
        }
        self.body.apply_gravity(dt, false);

        // Walking loop runs only while moving on the ground
        let walking_now = self.moving && !self.body.airborne();
        if walking_now && !self.walking_loop_on {
            out.started_walking = true;
        } else if !walking_now && self.walking_loop_on {
            out.stopped_walking = true;
        }
        self.walking_loop_on = walking_now;

        // Idle/sleep timer: any activity resets it and ends the snore loop
        let active = self.moving
            || self.body.airborne()
            || out.jumped
            || self.vitals.is_hurt(now);
        if active {
            self.standing_ticks = 0;
            if self.sleeping {
                self.sleeping = false;
                out.woke_up = true;
            }
        } else {
            self.standing_ticks += 1;
            if !self.sleeping && self.standing_ticks >= SLEEP_THRESHOLD_TICKS {
                self.sleeping = true;
                out.fell_asleep = true;
            }
        }

        self.set_anim(self.select_anim(now));
        self.anim.advance();
        out
    }

    /// Strict-priority animation selection
    fn select_anim(&self, now: u64) -> PlayerAnim {
        if self.vitals.is_dead() {
            PlayerAnim::Dead
        } else if self.vitals.is_hurt(now) {
            PlayerAnim::Hurt
        } else if self.body.airborne() {
            PlayerAnim::Jumping
        } else if self.moving {
            PlayerAnim::Walking
        } else if self.sleeping {
            PlayerAnim::Sleeping
        } else {
            PlayerAnim::Idle
        }
    }

    fn set_anim(&mut self, state: PlayerAnim) {
        if state != self.anim_state {
            self.anim_state = state;
            self.anim = anim_for(state);
        }
    }

    #[inline]
    pub fn anim_state(&self) -> PlayerAnim {
        self.anim_state
    }

    /// End the sleep state; true when the snore loop was running so the
    /// caller can emit the stop event exactly once
    pub fn end_sleep(&mut self) -> bool {
        self.standing_ticks = 0;
        std::mem::take(&mut self.sleeping)
    }

    /// End the walking-sound loop; true when it was running
    pub fn end_walking_loop(&mut self) -> bool {
        std::mem::take(&mut self.walking_loop_on)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

fn anim_for(state: PlayerAnim) -> Animation {
    match state {
        PlayerAnim::Dead => Animation::once(7, 6),
        PlayerAnim::Hurt => Animation::looping(3, 6),
        PlayerAnim::Jumping => Animation::once(9, 5),
        PlayerAnim::Walking => Animation::looping(6, 5),
        PlayerAnim::Sleeping => Animation::looping(10, 10),
        PlayerAnim::Idle => Animation::looping(10, 9),
    }
}
