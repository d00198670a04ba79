//! Deterministic game simulation.
//!
//! Everything in here is host-independent: no clocks, no canvas, no audio.
//! The host calls [`tick::tick`] at a fixed rate with intent flags and reads
//! the results back out of [`state::GameState`].

pub mod animation;
pub mod body;
pub mod boss;
pub mod collision;
pub mod enemies;
pub mod level;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState, Hud, LevelSummary};
pub use tick::{TickInput, tick};
