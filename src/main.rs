//! Headless demo run.
//!
//! Drives the simulation with a scripted pilot at the fixed timestep and
//! narrates the run through the audio router and the log. Useful for
//! eyeballing game feel numbers and for profiling the tick without a host.

use cluck_rush::audio::{AudioRouter, AudioSink, LoopSound, SoundEffect};
use cluck_rush::consts::{MAX_SUBSTEPS, SIM_DT, TICK_HZ};
use cluck_rush::render;
use cluck_rush::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use cluck_rush::Settings;

/// Sink that narrates instead of playing
struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx {effect:?}");
    }
    fn start_loop(&mut self, sound: LoopSound) {
        log::debug!("loop start {sound:?}");
    }
    fn stop_loop(&mut self, sound: LoopSound) {
        log::debug!("loop stop {sound:?}");
    }
}

/// Scripted inputs: run right, hop over anything close, lob bottles at the
/// boss once it has noticed us
fn pilot(state: &GameState) -> TickInput {
    let player_x = state.player.body.pos.x;
    let ahead = |x: f32| x > player_x && x < player_x + 260.0;
    let jump = state
        .level
        .walkers
        .iter()
        .any(|w| !w.dead && ahead(w.body.pos.x));
    let boss_near = state
        .level
        .bosses
        .iter()
        .any(|b| !b.is_dead() && (b.body.rect().center_x() - player_x).abs() < 700.0);
    TickInput {
        left: false,
        right: true,
        jump,
        // Pulse the key so each press is a fresh rising edge
        throw: boss_near && state.tick % 40 == 0,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::default();
    let seed = 0xC1_0C4;
    let mut state = GameState::new(seed);
    let mut router = AudioRouter::new(settings.muted);
    let mut sink = LogSink;

    log::info!("demo run, seed {seed:#x}");
    // Model the host frame loop: frames arrive slower than the sim rate, so
    // each one drains the accumulator with a bounded number of substeps
    let frame_dt = 1.0 / 30.0;
    let mut accumulator = 0.0f32;
    let max_ticks = 5 * 60 * TICK_HZ;
    while state.phase == GamePhase::Playing && state.tick < max_ticks {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = pilot(&state);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        let events = state.drain_events();
        router.route(&events, &mut sink);
        for event in &events {
            match event {
                GameEvent::Won { summary, next_level } => {
                    println!(
                        "won after {:.1}s: {}/{} coins, {}/{} bottles",
                        state.tick as f32 / TICK_HZ as f32,
                        summary.coins,
                        summary.coin_total,
                        summary.bottles,
                        summary.bottle_total,
                    );
                    if let Some(next) = next_level {
                        println!("next: level {next}");
                    }
                }
                GameEvent::Lost { summary } => {
                    println!(
                        "lost after {:.1}s with {}/{} coins",
                        state.tick as f32 / TICK_HZ as f32,
                        summary.coins,
                        summary.coin_total,
                    );
                }
                _ => log::debug!("{event:?}"),
            }
        }
    }

    if state.phase == GamePhase::Playing {
        println!("demo timed out at tick {}", state.tick);
    }
    let draw_list = render::compose(&state);
    log::info!(
        "final frame: {} draw commands, camera at {:.0}",
        draw_list.len(),
        state.camera_x,
    );
}
