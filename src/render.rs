//! Draw-list composition.
//!
//! The core never draws; it flattens the current [`GameState`] into an
//! ordered list of [`DrawCommand`]s for the host's render surface. Order in
//! the list is paint order, back to front:
//!
//! background tiles, clouds, coins, bottle pickups, walkers, bosses,
//! player, projectiles, HUD.
//!
//! World entities are translated by the camera; HUD commands are emitted in
//! screen space. Anything fully outside the viewport is culled.

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameState;
use crate::sim::boss::BossAnim;
use crate::sim::collision::Rect;
use crate::sim::enemies::WalkerKind;
use crate::sim::player::PlayerAnim;

/// Which sprite sheet (or HUD element) a command selects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Background { layer: u8, variant: u8 },
    Cloud,
    Coin,
    Bottle,
    /// Thrown bottle, spinning
    BottleSpin,
    Walker { kind: WalkerKind, dead: bool },
    Boss(BossAnim),
    Player(PlayerAnim),
    Bar { kind: BarKind, pct: f32 },
}

/// The four HUD status bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Health,
    Coins,
    Bottles,
    BossEnergy,
}

/// One sprite blit for the host. `dst` is in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub visual: Visual,
    /// Frame index within the selected animation strip
    pub frame: u8,
    pub dst: Rect,
    pub flip_x: bool,
}

/// Horizontal slack so sprites sliding off-screen are not popped early
const CULL_MARGIN: f32 = 600.0;

/// Flatten the state into the back-to-front draw list for this frame
pub fn compose(state: &GameState) -> Vec<DrawCommand> {
    let cam = state.camera_x;
    let visible = |left: f32, width: f32| {
        left + width > cam - CULL_MARGIN && left < cam + CANVAS_WIDTH + CULL_MARGIN
    };
    let mut out = Vec::with_capacity(64);

    // Parallax background, far layers first. Layers scroll at a fraction of
    // the camera speed, so the culling window uses the scrolled position.
    for layer in 0..4u8 {
        let factor = parallax_factor(layer);
        for tile in state.level.background.iter().filter(|t| t.layer == layer) {
            let x = tile.x - cam * factor;
            if x + BACKGROUND_TILE_WIDTH > -CULL_MARGIN && x < CANVAS_WIDTH + CULL_MARGIN {
                out.push(DrawCommand {
                    visual: Visual::Background {
                        layer: tile.layer,
                        variant: tile.variant,
                    },
                    frame: 0,
                    dst: Rect::new(Vec2::new(x, 0.0), Vec2::new(BACKGROUND_TILE_WIDTH, CANVAS_HEIGHT)),
                    flip_x: false,
                });
            }
        }
    }

    for cloud in &state.level.clouds {
        if visible(cloud.pos.x, CLOUD_SIZE.x) {
            out.push(DrawCommand {
                visual: Visual::Cloud,
                frame: 0,
                dst: Rect::new(cloud.pos - Vec2::new(cam, 0.0), CLOUD_SIZE),
                flip_x: false,
            });
        }
    }

    for coin in &state.level.coins {
        if visible(coin.pos.x, COIN_SIZE.x) {
            out.push(DrawCommand {
                visual: Visual::Coin,
                frame: coin.anim.frame(),
                dst: Rect::new(coin.pos - Vec2::new(cam, 0.0), COIN_SIZE),
                flip_x: false,
            });
        }
    }

    for bottle in &state.level.bottles {
        if visible(bottle.pos.x, BOTTLE_SIZE.x) {
            out.push(DrawCommand {
                visual: Visual::Bottle,
                frame: 0,
                dst: Rect::new(bottle.pos - Vec2::new(cam, 0.0), BOTTLE_SIZE),
                flip_x: false,
            });
        }
    }

    for w in &state.level.walkers {
        if visible(w.body.pos.x, w.body.size.x) {
            out.push(DrawCommand {
                visual: Visual::Walker {
                    kind: w.kind,
                    dead: w.dead,
                },
                frame: w.anim.frame(),
                dst: Rect::new(w.body.pos - Vec2::new(cam, 0.0), w.body.size),
                flip_x: w.body.facing_left,
            });
        }
    }

    for b in &state.level.bosses {
        if visible(b.body.pos.x, b.body.size.x) {
            out.push(DrawCommand {
                visual: Visual::Boss(b.anim_state(state.tick)),
                frame: b.anim.frame(),
                dst: Rect::new(b.body.pos - Vec2::new(cam, 0.0), b.body.size),
                // Sheet faces left; mirror when the boss looks right
                flip_x: !b.body.facing_left,
            });
        }
    }

    out.push(DrawCommand {
        visual: Visual::Player(state.player.anim_state()),
        frame: state.player.anim.frame(),
        dst: Rect::new(state.player.body.pos - Vec2::new(cam, 0.0), PLAYER_SIZE),
        flip_x: state.player.body.facing_left,
    });

    // Projectiles paint over everything in the world, they are midair
    for p in &state.projectiles {
        if visible(p.body.pos.x, p.body.size.x) {
            out.push(DrawCommand {
                visual: Visual::BottleSpin,
                frame: p.anim.frame(),
                dst: Rect::new(p.body.pos - Vec2::new(cam, 0.0), p.body.size),
                flip_x: p.vel_x < 0.0,
            });
        }
    }

    // HUD, screen space, always on top
    let bars = [
        (BarKind::Health, state.hud.health_pct, 0.0),
        (BarKind::Coins, state.hud.coin_pct, 40.0),
        (BarKind::Bottles, state.hud.bottle_pct, 80.0),
    ];
    for (kind, pct, y) in bars {
        out.push(bar(kind, pct, Vec2::new(20.0, y)));
    }
    // Boss bar appears only while a boss is in the level
    if !state.level.bosses.is_empty() {
        out.push(bar(
            BarKind::BossEnergy,
            state.hud.boss_pct,
            Vec2::new(CANVAS_WIDTH - 220.0, 0.0),
        ));
    }
    out
}

fn bar(kind: BarKind, pct: f32, pos: Vec2) -> DrawCommand {
    DrawCommand {
        visual: Visual::Bar { kind, pct },
        frame: 0,
        dst: Rect::new(pos, Vec2::new(200.0, 50.0)),
        flip_x: false,
    }
}

/// Scroll factor per background layer, 0 = farthest
fn parallax_factor(layer: u8) -> f32 {
    match layer {
        0 => 0.0,
        1 => 0.25,
        2 => 0.5,
        _ => 1.0,
    }
}
