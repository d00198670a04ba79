//! The world tick: one fixed-timestep advance of the whole simulation.
//!
//! A tick runs in two halves. First every entity steps its own motion and
//! animation; then the interaction rules run in a fixed order, because later
//! rules must see the outcome of earlier ones (a stomped walker must not
//! deal contact damage on the same tick):
//!
//! 1. stomp kills
//! 2. contact damage
//! 3. throw intent
//! 4. coin pickup
//! 5. bottle pickup
//! 6. boss activation
//! 7. projectile hits on bosses
//! 8. corpse removal and the win check
//! 9. the lose check
//!
//! Terminal phases freeze the world: once `Won` or `Lost`, `tick` is a no-op.

use serde::{Deserialize, Serialize};

use super::boss::BossPhase;
use super::collision::{BOTTLE_PICKUP_HITBOX, is_stomp};
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Intent flags sampled from the host's input device once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub throw: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.tick += 1;
    let now = state.tick;

    step_entities(state, input, dt, now);

    rule_stomp_kills(state, now);
    rule_contact_damage(state, now);
    rule_throw(state, input, now);
    rule_coin_pickup(state);
    rule_bottle_pickup(state);
    rule_boss_activation(state, now);
    rule_projectile_hits(state, now);
    rule_removal_and_win(state, now);
    rule_lose(state);

    state.camera_x = (state.player.body.pos.x - CAMERA_OFFSET_X)
        .clamp(0.0, (state.level.end_x - CANVAS_WIDTH).max(0.0));
    state.refresh_hud();
}

/// Motion and animation for every entity, no interactions yet
fn step_entities(state: &mut GameState, input: &TickInput, dt: f32, now: u64) {
    let outcome = state.player.step(input, dt, state.level.end_x, now);
    if outcome.jumped {
        state.push_event(GameEvent::PlayerJumped);
    }
    if outcome.started_walking {
        state.push_event(GameEvent::WalkingStarted);
    }
    if outcome.stopped_walking {
        state.push_event(GameEvent::WalkingStopped);
    }
    if outcome.fell_asleep {
        state.push_event(GameEvent::FellAsleep);
    }
    if outcome.woke_up {
        state.push_event(GameEvent::WokeUp);
    }

    for w in &mut state.level.walkers {
        w.step(dt);
    }
    let player_cx = state.player.body.rect().center_x();
    let mut attacks_started = 0u32;
    for b in &mut state.level.bosses {
        let was_attacking = b.phase == BossPhase::Attack;
        b.step(player_cx, now, dt);
        if !was_attacking && b.phase == BossPhase::Attack {
            attacks_started += 1;
        }
    }
    for _ in 0..attacks_started {
        state.push_event(GameEvent::BossAttackStarted);
    }
    for p in &mut state.projectiles {
        p.step(dt);
    }
    let end_x = state.level.end_x;
    for c in &mut state.level.clouds {
        c.step(dt, end_x);
    }
    for c in &mut state.level.coins {
        c.anim.advance();
    }
}

/// Rule 1: a falling player landing on a walker's top edge kills it and
/// bounces the player. Runs before contact damage so the kill shields the
/// player from the same walker this tick.
fn rule_stomp_kills(state: &mut GameState, now: u64) {
    let hitbox = state.player.hitbox();
    let vel_y = state.player.body.vel_y;
    let mut stomped = Vec::new();
    for w in state.level.walkers.iter_mut().filter(|w| !w.dead) {
        let rect = w.body.rect();
        if hitbox.overlaps(&rect) && is_stomp(hitbox.bottom(), vel_y, rect.top()) {
            w.kill(now);
            stomped.push(w.kind);
        }
    }
    if !stomped.is_empty() {
        state.player.body.vel_y = STOMP_BOUNCE_SPEED;
    }
    for kind in stomped {
        state.push_event(GameEvent::WalkerStomped { kind });
    }
}

/// Rule 2: overlapping a live enemy damages the player, at most once per
/// hurt window. Walkers take precedence over the boss when both overlap.
fn rule_contact_damage(state: &mut GameState, now: u64) {
    if state.player.vitals.is_dead() || state.player.vitals.is_hurt(now) {
        return;
    }
    let hitbox = state.player.hitbox();
    let walker_contact = state
        .level
        .walkers
        .iter()
        .any(|w| !w.dead && hitbox.overlaps(&w.body.rect()));
    let boss_contact = state
        .level
        .bosses
        .iter()
        .any(|b| !b.is_dead() && hitbox.overlaps(&b.body.rect()));
    let damage = if walker_contact {
        WALKER_CONTACT_DAMAGE
    } else if boss_contact {
        BOSS_CONTACT_DAMAGE
    } else {
        return;
    };
    state.player.vitals.hit(damage, now);
    let health = state.player.vitals.health;
    log::debug!("player hurt, health {health}");
    state.push_event(GameEvent::PlayerHurt { health });
}

/// Rule 3: throw on the key's rising edge only, gated by ammo and a
/// cooldown. Holding the key never auto-fires.
fn rule_throw(state: &mut GameState, input: &TickInput, now: u64) {
    let edge = input.throw && !state.prev_throw_held;
    state.prev_throw_held = input.throw;
    if !edge || state.ammo == 0 || state.player.vitals.is_dead() {
        return;
    }
    let cooled = state
        .last_throw_tick
        .is_none_or(|t| now.saturating_sub(t) >= THROW_COOLDOWN_TICKS);
    if !cooled {
        return;
    }
    let id = state.next_entity_id();
    let bottle = Projectile::thrown_by(id, &state.player);
    state.projectiles.push(bottle);
    state.ammo -= 1;
    state.last_throw_tick = Some(now);
    let ammo = state.ammo;
    state.push_event(GameEvent::BottleThrown { ammo });
}

/// Rule 4: coins collide against the inset player hitbox and their full
/// drawn rect, one event per coin so rapid pickups each get a sound
fn rule_coin_pickup(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    let mut picked = 0u32;
    state.level.coins.retain(|c| {
        let hit = hitbox.overlaps(&c.rect());
        picked += u32::from(hit);
        !hit
    });
    let total = state.level.coin_total;
    for _ in 0..picked {
        state.player.coins += 1;
        let have = state.player.coins;
        state.push_event(GameEvent::CoinCollected { have, total });
    }
}

/// Rule 5: bottles use a tighter inset on the pickup itself so the player
/// has to visually touch the bottle, and ammo never exceeds the level total
fn rule_bottle_pickup(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    let mut picked = 0u32;
    state.level.bottles.retain(|b| {
        let hit = hitbox.overlaps(&b.rect().inset(BOTTLE_PICKUP_HITBOX));
        picked += u32::from(hit);
        !hit
    });
    let max = state.level.bottle_total;
    for _ in 0..picked {
        state.ammo = (state.ammo + 1).min(max);
        state.bottles_collected += 1;
        let ammo = state.ammo;
        state.push_event(GameEvent::BottleCollected { ammo, max });
    }
}

/// Rule 6: an idle boss latches into its alert phase the first time the
/// player closes within the activation distance
fn rule_boss_activation(state: &mut GameState, now: u64) {
    let player_cx = state.player.body.rect().center_x();
    let mut alerts = 0u32;
    for b in &mut state.level.bosses {
        let cx = b.body.rect().center_x();
        if (cx - player_cx).abs() < BOSS_ACTIVATION_DISTANCE && b.activate(now) {
            alerts += 1;
        }
    }
    for _ in 0..alerts {
        state.push_event(GameEvent::BossAlerted);
    }
}

/// Rule 7: a bottle connecting with a live boss is consumed and chips the
/// boss energy; lost bottles (fell below the canvas) are dropped here too
fn rule_projectile_hits(state: &mut GameState, now: u64) {
    let bosses = &mut state.level.bosses;
    let mut hits = Vec::new();
    state.projectiles.retain(|p| {
        let rect = p.body.rect();
        for b in bosses.iter_mut() {
            if !b.is_dead() && rect.overlaps(&b.body.rect()) {
                b.hit(now);
                hits.push((b.energy, b.is_dead()));
                return false;
            }
        }
        !p.lost()
    });
    for (energy, defeated) in hits {
        state.push_event(GameEvent::BossHit { energy });
        if defeated {
            log::info!("boss defeated at tick {now}");
            state.push_event(GameEvent::BossDefeated);
        }
    }
}

/// Rule 8: prune corpses past their deadlines; the level is won only once
/// every boss has actually been removed, not merely dropped to zero energy
fn rule_removal_and_win(state: &mut GameState, now: u64) {
    state.level.walkers.retain(|w| !w.due_for_removal(now));
    state.level.bosses.retain(|b| !b.due_for_removal(now));
    if state.boss_total > 0 && state.level.bosses.is_empty() {
        state.phase = GamePhase::Won;
        let summary = state.summary();
        let next_level = state.next_level();
        log::info!("level {} won: {summary:?}", state.level.index);
        state.push_event(GameEvent::Won {
            summary,
            next_level,
        });
    }
}

/// Rule 9: the run ends the moment health reaches zero
fn rule_lose(state: &mut GameState) {
    if state.phase == GamePhase::Playing && state.player.vitals.is_dead() {
        state.phase = GamePhase::Lost;
        // The game-over screen must not inherit a running snore or step loop
        if state.player.end_sleep() {
            state.push_event(GameEvent::WokeUp);
        }
        if state.player.end_walking_loop() {
            state.push_event(GameEvent::WalkingStopped);
        }
        let summary = state.summary();
        log::info!("level {} lost: {summary:?}", state.level.index);
        state.push_event(GameEvent::Lost { summary });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::enemies::WalkerKind;
    use glam::Vec2;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn world() -> GameState {
        let mut s = GameState::new(1);
        // Clear the generated population so tests place entities directly
        s.level.walkers.clear();
        s.level.bosses.clear();
        s.level.coins.clear();
        s.level.bottles.clear();
        s.boss_total = 0;
        s
    }

    fn walker_under_player(s: &mut GameState) {
        use crate::sim::enemies::Walker;
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
        let hb = s.player.hitbox();
        let mut w = Walker::spawn(1, WalkerKind::Chicken, hb.left(), &mut rng);
        w.speed = 0.0;
        s.level.walkers.push(w);
    }

    #[test]
    fn test_falling_player_stomps_walker() {
        let mut s = world();
        walker_under_player(&mut s);
        // Drop the player so its feet meet the walker's top while falling
        let top = s.level.walkers[0].body.rect().top();
        s.player.body.pos.y = top - (PLAYER_SIZE.y - 10.0) + 5.0;
        s.player.body.vel_y = -100.0;
        tick(&mut s, &idle(), SIM_DT);
        assert!(s.level.walkers[0].dead);
        assert!(s.player.body.vel_y > 0.0, "stomp bounces the player");
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::WalkerStomped { .. }))
        );
        assert_eq!(s.player.vitals.health, 100, "stomp shields this tick");
    }

    #[test]
    fn test_side_contact_damages_once_per_window() {
        let mut s = world();
        walker_under_player(&mut s);
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.player.vitals.health, 100 - WALKER_CONTACT_DAMAGE);
        // Still overlapping, but the hurt window blocks a second hit
        for _ in 0..10 {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert_eq!(s.player.vitals.health, 100 - WALKER_CONTACT_DAMAGE);
        // Past the window the next hit lands
        for _ in 0..HURT_WINDOW_TICKS {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert_eq!(s.player.vitals.health, 100 - 2 * WALKER_CONTACT_DAMAGE);
    }

    #[test]
    fn test_throw_fires_on_edge_only() {
        let mut s = world();
        s.ammo = 3;
        let held = TickInput {
            throw: true,
            ..TickInput::default()
        };
        for _ in 0..20 {
            tick(&mut s, &held, SIM_DT);
        }
        assert_eq!(s.projectiles.len(), 1, "held key fires once");
        assert_eq!(s.ammo, 2);
    }

    #[test]
    fn test_throw_cooldown_gates_rapid_taps() {
        let mut s = world();
        s.ammo = 5;
        let held = TickInput {
            throw: true,
            ..TickInput::default()
        };
        // Tap every other tick, faster than the cooldown allows
        for i in 0..(THROW_COOLDOWN_TICKS + 10) {
            let input = if i % 2 == 0 { held } else { idle() };
            tick(&mut s, &input, SIM_DT);
        }
        assert_eq!(s.projectiles.len(), 2);
    }

    #[test]
    fn test_throw_needs_ammo() {
        let mut s = world();
        assert_eq!(s.ammo, 0);
        let held = TickInput {
            throw: true,
            ..TickInput::default()
        };
        tick(&mut s, &held, SIM_DT);
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_coin_pickup_updates_count_and_hud() {
        use crate::sim::level::Coin;
        let mut s = world();
        s.level.coin_total = 5;
        let hb = s.player.hitbox();
        s.level
            .coins
            .push(Coin::new(1, Vec2::new(hb.left(), hb.top())));
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.player.coins, 1);
        assert!(s.level.coins.is_empty());
        assert_eq!(s.hud.coin_pct, 20.0);
        assert!(
            s.drain_events()
                .contains(&GameEvent::CoinCollected { have: 1, total: 5 })
        );
    }

    #[test]
    fn test_bottle_ammo_clamps_to_level_total() {
        use crate::sim::level::BottlePickup;
        let mut s = world();
        s.level.bottle_total = 1;
        s.ammo = 1;
        let hb = s.player.hitbox();
        let mut b = BottlePickup::new(1, hb.left());
        b.pos.y = hb.top();
        s.level.bottles.push(b);
        tick(&mut s, &idle(), SIM_DT);
        assert!(s.level.bottles.is_empty());
        assert_eq!(s.ammo, 1, "ammo never exceeds the level total");
        assert_eq!(s.bottles_collected, 1);
    }

    #[test]
    fn test_boss_activates_inside_distance_only() {
        use crate::sim::boss::{Boss, BossPhase};
        let mut s = world();
        s.level.bosses.push(Boss::new(1, 2000.0));
        s.boss_total = 1;
        s.player.body.pos.x = 500.0;
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.level.bosses[0].phase, BossPhase::Idle);
        s.player.body.pos.x = 1600.0;
        tick(&mut s, &idle(), SIM_DT);
        assert!(matches!(s.level.bosses[0].phase, BossPhase::Alert { .. }));
        assert!(s.drain_events().contains(&GameEvent::BossAlerted));
    }

    #[test]
    fn test_bottle_defeats_boss_then_win_after_removal() {
        use crate::sim::boss::Boss;
        let mut s = world();
        let mut boss = Boss::new(1, 400.0);
        boss.energy = BOSS_HIT_DAMAGE;
        s.level.bosses.push(boss);
        s.boss_total = 1;
        // Park the player far left so contact damage never interferes
        s.player.body.pos.x = 0.0;
        // Drop a projectile straight into the boss
        let mut p = Projectile::thrown_by(99, &s.player);
        p.body.pos = s.level.bosses[0].body.pos + Vec2::new(10.0, 10.0);
        p.vel_x = 0.0;
        p.body.vel_y = 0.0;
        s.projectiles.push(p);
        tick(&mut s, &idle(), SIM_DT);
        assert!(s.projectiles.is_empty(), "bottle consumed on impact");
        assert!(s.level.bosses[0].is_dead());
        assert_eq!(s.phase, GamePhase::Playing, "win waits for removal");
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::BossHit { energy: 0 }));
        assert!(events.contains(&GameEvent::BossDefeated));
        for _ in 0..=BOSS_REMOVE_DELAY_TICKS {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert!(s.level.bosses.is_empty());
        assert_eq!(s.phase, GamePhase::Won);
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Won { .. }))
        );
    }

    #[test]
    fn test_player_death_loses_immediately() {
        let mut s = world();
        s.player.vitals.health = WALKER_CONTACT_DAMAGE;
        walker_under_player(&mut s);
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.phase, GamePhase::Lost);
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Lost { .. }))
        );
    }

    #[test]
    fn test_sleeping_player_killed_stops_snore_loop() {
        let mut s = world();
        s.player.sleeping = true;
        s.player.vitals.health = WALKER_CONTACT_DAMAGE;
        walker_under_player(&mut s);
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.phase, GamePhase::Lost);
        assert!(!s.player.sleeping);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::WokeUp));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Lost { .. }))
        );
    }

    #[test]
    fn test_terminal_phase_freezes_world() {
        let mut s = world();
        s.phase = GamePhase::Won;
        let tick_before = s.tick;
        let x_before = s.player.body.pos.x;
        tick(
            &mut s,
            &TickInput {
                right: true,
                ..TickInput::default()
            },
            SIM_DT,
        );
        assert_eq!(s.tick, tick_before);
        assert_eq!(s.player.body.pos.x, x_before);
    }

    #[test]
    fn test_stomped_corpse_pruned_after_delay() {
        let mut s = world();
        walker_under_player(&mut s);
        let top = s.level.walkers[0].body.rect().top();
        s.player.body.pos.y = top - (PLAYER_SIZE.y - 10.0) + 5.0;
        s.player.body.vel_y = -100.0;
        tick(&mut s, &idle(), SIM_DT);
        assert!(s.level.walkers[0].dead);
        for _ in 0..=WALKER_REMOVE_DELAY_TICKS {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert!(s.level.walkers.is_empty());
    }

    #[test]
    fn test_camera_follows_player_with_offset() {
        let mut s = world();
        s.player.body.pos.x = 1000.0;
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.camera_x, 1000.0 - CAMERA_OFFSET_X);
        s.player.body.pos.x = 0.0;
        tick(&mut s, &idle(), SIM_DT);
        assert_eq!(s.camera_x, 0.0, "camera clamps at the level start");
    }
}
