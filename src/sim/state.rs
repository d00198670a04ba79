//! Root game state and the events the core emits toward its adapters.
//!
//! `GameState` owns every child entity lifetime: one player, one current
//! level, the active projectiles. Hosts drain `events` once per frame and
//! route them to the audio sink / HUD overlay; the core never calls out.

use serde::{Deserialize, Serialize};

use super::enemies::WalkerKind;
use super::level::Level;
use super::player::Player;
use super::projectile::Projectile;
use crate::percentage;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Terminal phases halt both the logic tick and the host render loop; the
/// two loops share this one stop signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Won,
    Lost,
}

/// The four HUD bar percentages, each in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hud {
    pub health_pct: f32,
    pub boss_pct: f32,
    pub bottle_pct: f32,
    pub coin_pct: f32,
}

/// Results carried by the terminal event, for the host's overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub coins: u32,
    pub coin_total: u32,
    pub bottles: u32,
    pub bottle_total: u32,
}

/// Fire-and-forget notifications for the host adapters (audio, HUD, screens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerJumped,
    PlayerHurt { health: u32 },
    WalkingStarted,
    WalkingStopped,
    FellAsleep,
    WokeUp,
    CoinCollected { have: u32, total: u32 },
    BottleCollected { ammo: u32, max: u32 },
    BottleThrown { ammo: u32 },
    WalkerStomped { kind: WalkerKind },
    BossAlerted,
    BossAttackStarted,
    BossHit { energy: u32 },
    BossDefeated,
    /// `next_level` offers the level-advance transition when one exists
    Won {
        summary: LevelSummary,
        next_level: Option<u32>,
    },
    Lost { summary: LevelSummary },
}

/// Number of built-in level recipes
pub const LEVEL_COUNT: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; a seed reproduces every level layout exactly
    pub seed: u64,
    /// Logic tick counter, the clock every timestamp compares against
    pub tick: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub level: Level,
    /// Throwable bottles in the inventory, clamped to the level total
    pub ammo: u32,
    /// Lifetime pickups this level, for the results summary
    pub bottles_collected: u32,
    pub projectiles: Vec<Projectile>,
    /// World-x of the left screen edge
    pub camera_x: f32,
    pub hud: Hud,
    /// Drained by the host each frame
    pub events: Vec<GameEvent>,
    /// Bosses constructed with the level; the win check needs the count
    /// because victory requires them all *removed*, not just at zero energy
    pub boss_total: u32,
    pub(crate) prev_throw_held: bool,
    pub(crate) last_throw_tick: Option<u64>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, 1)
    }

    /// Start the numbered level against a fresh character
    pub fn with_level(seed: u64, level_index: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ u64::from(level_index));
        let level = Level::build(level_index, &mut rng);
        let boss_total = level.bosses.len() as u32;
        let mut state = Self {
            seed,
            tick: 0,
            phase: GamePhase::Playing,
            player: Player::new(),
            level,
            ammo: 0,
            bottles_collected: 0,
            projectiles: Vec::new(),
            camera_x: 0.0,
            hud: Hud::default(),
            events: Vec::new(),
            boss_total,
            prev_throw_held: false,
            last_throw_tick: None,
            next_id: 1_000_000, // projectile ids, disjoint from level entity ids
        };
        state.refresh_hud();
        log::info!(
            "level {} ready: {} walkers, {} bosses, {} coins, {} bottles",
            level_index,
            state.level.walkers.len(),
            boss_total,
            state.level.coin_total,
            state.level.bottle_total,
        );
        state
    }

    /// Discard the finished level and rebuild the world against the next one
    pub fn advance_level(&mut self) {
        let next = self.level.index + 1;
        *self = Self::with_level(self.seed, next);
    }

    /// The level after this one, if a recipe exists
    pub fn next_level(&self) -> Option<u32> {
        (self.level.index < LEVEL_COUNT).then_some(self.level.index + 1)
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Recompute all four HUD bars from current counts
    pub fn refresh_hud(&mut self) {
        self.hud.health_pct = self.player.vitals.health as f32;
        // Boss bar tracks the healthiest live boss; empty once all are gone
        self.hud.boss_pct = self
            .level
            .bosses
            .iter()
            .map(|b| b.energy)
            .max()
            .unwrap_or(0) as f32;
        self.hud.bottle_pct = percentage(self.ammo, self.level.bottle_total);
        self.hud.coin_pct = percentage(self.player.coins, self.level.coin_total);
    }

    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            coins: self.player.coins,
            coin_total: self.level.coin_total,
            bottles: self.bottles_collected,
            bottle_total: self.level.bottle_total,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_hud() {
        let s = GameState::new(42);
        assert_eq!(s.hud.health_pct, 100.0);
        assert_eq!(s.hud.boss_pct, 100.0);
        assert_eq!(s.hud.bottle_pct, 0.0);
        assert_eq!(s.hud.coin_pct, 0.0);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_advance_level_is_a_fresh_world() {
        let mut s = GameState::new(42);
        s.player.coins = 3;
        s.player.vitals.hit(40, 10);
        s.ammo = 2;
        s.advance_level();
        assert_eq!(s.level.index, 2);
        assert_eq!(s.player.coins, 0);
        assert_eq!(s.player.vitals.health, 100);
        assert_eq!(s.ammo, 0);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.boss_total, s.level.bosses.len() as u32);
    }

    #[test]
    fn test_next_level_offer() {
        let s = GameState::new(42);
        assert_eq!(s.next_level(), Some(2));
        let s = GameState::with_level(42, LEVEL_COUNT);
        assert_eq!(s.next_level(), None);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut s = GameState::new(42);
        s.push_event(GameEvent::PlayerJumped);
        let drained = s.drain_events();
        assert_eq!(drained, vec![GameEvent::PlayerJumped]);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_state() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        assert_eq!(a.level.walkers.len(), b.level.walkers.len());
        assert_eq!(
            a.level.walkers[0].body.pos,
            b.level.walkers[0].body.pos
        );
    }
}
