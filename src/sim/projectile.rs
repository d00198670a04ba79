//! Thrown bottles.
//!
//! A projectile is always treated as airborne: it never snaps to the ground
//! line, so the arc carries it past level geometry until it hits the boss or
//! falls well below the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::body::Body;
use super::player::Player;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// Constant forward speed, signed (px/s)
    pub vel_x: f32,
    pub anim: Animation,
}

impl Projectile {
    /// Spawn at the thrower's hand, flying the way they face
    pub fn thrown_by(id: u32, player: &Player) -> Self {
        let hand = if player.body.facing_left {
            Vec2::new(player.body.pos.x - 10.0, player.body.pos.y + 130.0)
        } else {
            Vec2::new(
                player.body.pos.x + player.body.size.x - 40.0,
                player.body.pos.y + 130.0,
            )
        };
        let mut body = Body::new(hand, Vec2::new(40.0, 50.0), GROUND_Y);
        body.vel_y = THROW_SPEED_Y;
        Self {
            id,
            body,
            vel_x: if player.body.facing_left {
                -THROW_SPEED_X
            } else {
                THROW_SPEED_X
            },
            anim: Animation::looping(4, 3),
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.body.pos.x += self.vel_x * dt;
        self.body.apply_gravity(dt, true);
        self.anim.advance();
    }

    /// Fell far enough below the canvas to be discarded
    pub fn lost(&self) -> bool {
        self.body.pos.y > CANVAS_HEIGHT + 200.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_parabolic_arc_passes_ground_line() {
        let player = Player::new();
        let mut p = Projectile::thrown_by(0, &player);
        let x0 = p.body.pos.x;
        let y0 = p.body.pos.y;
        let mut apex = y0;
        let mut steps = 0;
        while !p.lost() && steps < 10_000 {
            p.step(SIM_DT);
            apex = apex.min(p.body.pos.y);
            steps += 1;
        }
        assert!(apex < y0, "bottle never rose");
        assert!(p.lost(), "bottle never fell past the canvas");
        assert!(p.body.pos.x > x0, "default facing throws rightward");
    }

    #[test]
    fn test_throw_direction_follows_facing() {
        let mut player = Player::new();
        player.body.facing_left = true;
        let p = Projectile::thrown_by(0, &player);
        assert!(p.vel_x < 0.0);
    }
}
