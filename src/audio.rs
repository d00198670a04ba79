//! Game-event to sound-effect routing.
//!
//! The core decides *which* sounds play; the host decides *how*. A host
//! implements [`AudioSink`] (fire-and-forget one-shots plus start/stop
//! loops) and feeds the drained event queue through an [`AudioRouter`] each
//! frame. The router owns the mute flag and remembers which loops are
//! running so muting mid-loop silences them and unmuting resumes them.

use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    Hurt,
    Throw,
    CoinPickup,
    BottlePickup,
    Stomp,
    BossAlert,
    BossAttack,
    BossHit,
    Win,
    Lose,
}

/// Looping sounds with explicit start/stop edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSound {
    Walking,
    Snoring,
}

/// Host-side audio output. Calls are fire-and-forget; the core never waits
/// on playback.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    fn start_loop(&mut self, sound: LoopSound);
    fn stop_loop(&mut self, sound: LoopSound);
}

#[derive(Debug, Default)]
pub struct AudioRouter {
    muted: bool,
    walking: bool,
    snoring: bool,
}

impl AudioRouter {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    #[inline]
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag. Running loops are cut on mute and resumed on
    /// unmute; the loop *state* keeps tracking events either way.
    pub fn set_muted(&mut self, muted: bool, sink: &mut dyn AudioSink) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        if muted {
            if self.walking {
                sink.stop_loop(LoopSound::Walking);
            }
            if self.snoring {
                sink.stop_loop(LoopSound::Snoring);
            }
        } else {
            if self.walking {
                sink.start_loop(LoopSound::Walking);
            }
            if self.snoring {
                sink.start_loop(LoopSound::Snoring);
            }
        }
    }

    /// Route one frame's worth of drained events into the sink
    pub fn route(&mut self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        for event in events {
            self.route_one(event, sink);
        }
    }

    fn route_one(&mut self, event: &GameEvent, sink: &mut dyn AudioSink) {
        // Loop bookkeeping happens even while muted
        match event {
            GameEvent::WalkingStarted => self.walking = true,
            GameEvent::WalkingStopped => self.walking = false,
            GameEvent::FellAsleep => self.snoring = true,
            GameEvent::WokeUp => self.snoring = false,
            _ => {}
        }
        if self.muted {
            return;
        }
        match event {
            GameEvent::PlayerJumped => sink.play(SoundEffect::Jump),
            GameEvent::PlayerHurt { .. } => sink.play(SoundEffect::Hurt),
            GameEvent::BottleThrown { .. } => sink.play(SoundEffect::Throw),
            GameEvent::CoinCollected { .. } => sink.play(SoundEffect::CoinPickup),
            GameEvent::BottleCollected { .. } => sink.play(SoundEffect::BottlePickup),
            GameEvent::WalkerStomped { .. } => sink.play(SoundEffect::Stomp),
            GameEvent::BossAlerted => sink.play(SoundEffect::BossAlert),
            GameEvent::BossAttackStarted => sink.play(SoundEffect::BossAttack),
            GameEvent::BossHit { .. } => sink.play(SoundEffect::BossHit),
            GameEvent::Won { .. } => sink.play(SoundEffect::Win),
            GameEvent::Lost { .. } => sink.play(SoundEffect::Lose),
            GameEvent::WalkingStarted => sink.start_loop(LoopSound::Walking),
            GameEvent::WalkingStopped => sink.stop_loop(LoopSound::Walking),
            GameEvent::FellAsleep => sink.start_loop(LoopSound::Snoring),
            GameEvent::WokeUp => sink.stop_loop(LoopSound::Snoring),
            GameEvent::BossDefeated => {}
        }
    }
}
