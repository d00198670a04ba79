//! Level construction: static recipes instantiated against the session RNG.
//!
//! A level is immutable-after-construction apart from the collection
//! mutations the world tick performs (kills, pickups, removals). Switching
//! levels builds a brand-new `Level`; nothing is pooled or reused.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::boss::Boss;
use super::collision::Rect;
use super::enemies::{Walker, WalkerKind};
use crate::consts::*;

/// Spinning coin pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub anim: Animation,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            anim: Animation::looping(2, 12),
        }
    }

    /// Plain AABB, no inset
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, COIN_SIZE)
    }
}

/// Bottle lying on the ground, throwable once picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BottlePickup {
    pub id: u32,
    pub pos: Vec2,
}

impl BottlePickup {
    pub fn new(id: u32, x: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, GROUND_Y - BOTTLE_SIZE.y + 10.0),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, BOTTLE_SIZE)
    }
}

/// Decorative cloud; drifts left and wraps around the level extent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
}

impl Cloud {
    pub fn step(&mut self, dt: f32, end_x: f32) {
        self.pos.x -= self.speed * dt;
        if self.pos.x < -CLOUD_SIZE.x {
            self.pos.x = end_x + CANVAS_WIDTH;
        }
    }
}

/// One parallax background tile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackgroundTile {
    /// 0 = sky (farthest), 3 = foreground
    pub layer: u8,
    /// Alternating art variant along the run
    pub variant: u8,
    pub x: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub walkers: Vec<Walker>,
    pub bosses: Vec<Boss>,
    pub clouds: Vec<Cloud>,
    pub background: Vec<BackgroundTile>,
    pub bottles: Vec<BottlePickup>,
    pub coins: Vec<Coin>,
    /// Rightmost x the player can reach
    pub end_x: f32,
    /// Construction-time totals, denominators for the HUD percentages
    pub coin_total: u32,
    pub bottle_total: u32,
}

/// Per-level construction recipe
struct Recipe {
    tiles: u32,
    chickens: u32,
    small_chickens: u32,
    coins: u32,
    bottles: u32,
    bosses: u32,
}

impl Level {
    /// Build the numbered level (1-based) from the session RNG
    pub fn build(index: u32, rng: &mut Pcg32) -> Self {
        let recipe = match index {
            1 => Recipe {
                tiles: 5,
                chickens: 6,
                small_chickens: 4,
                coins: 5,
                bottles: 8,
                bosses: 1,
            },
            _ => Recipe {
                tiles: 6,
                chickens: 8,
                small_chickens: 6,
                coins: 7,
                bottles: 10,
                bosses: 2,
            },
        };
        Self::from_recipe(index, &recipe, rng)
    }

    fn from_recipe(index: u32, recipe: &Recipe, rng: &mut Pcg32) -> Self {
        let end_x = recipe.tiles as f32 * BACKGROUND_TILE_WIDTH;
        let mut next_id = 0u32;
        let mut id = || {
            next_id += 1;
            next_id
        };

        let mut walkers = Vec::new();
        for _ in 0..recipe.chickens {
            let x = rng.random_range(600.0..end_x - 700.0);
            walkers.push(Walker::spawn(id(), WalkerKind::Chicken, x, rng));
        }
        for _ in 0..recipe.small_chickens {
            let x = rng.random_range(600.0..end_x - 700.0);
            walkers.push(Walker::spawn(id(), WalkerKind::SmallChicken, x, rng));
        }

        let bosses = (0..recipe.bosses)
            .map(|i| Boss::new(id(), end_x - 300.0 - i as f32 * 400.0))
            .collect();

        let coins = (0..recipe.coins)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(400.0..end_x - 800.0),
                    rng.random_range(120.0..260.0),
                );
                Coin::new(id(), pos)
            })
            .collect();

        let bottles = (0..recipe.bottles)
            .map(|_| BottlePickup::new(id(), rng.random_range(300.0..end_x - 800.0)))
            .collect();

        let clouds = (0..recipe.tiles)
            .map(|_| Cloud {
                pos: Vec2::new(rng.random_range(0.0..end_x), rng.random_range(0.0..60.0)),
                speed: rng.random_range(12.0..25.0),
            })
            .collect();

        // Tile every parallax layer across [-1 tile, end_x + 1 tile],
        // alternating the two art variants
        let mut background = Vec::new();
        let mut tile_x = -BACKGROUND_TILE_WIDTH;
        let mut variant = 0u8;
        while tile_x <= end_x + BACKGROUND_TILE_WIDTH {
            for layer in 0..4u8 {
                background.push(BackgroundTile {
                    layer,
                    variant,
                    x: tile_x,
                });
            }
            variant ^= 1;
            tile_x += BACKGROUND_TILE_WIDTH;
        }

        Self {
            index,
            walkers,
            bosses,
            clouds,
            background,
            bottles,
            coins,
            end_x,
            coin_total: recipe.coins,
            bottle_total: recipe.bottles,
        }
    }
}
