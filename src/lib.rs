//! Cluck Rush - a 2D side-scrolling action game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, entity state machines)
//! - `render`: Draw-list composition for a host render surface
//! - `audio`: Game-event to sound-effect routing for a host audio sink
//! - `settings`: Player preferences (mute flag is the only persisted bit)
//!
//! The simulation runs on a fixed timestep and is pure with respect to the
//! host: input comes in as boolean intent flags, output leaves as a drained
//! event queue, a HUD snapshot and a draw list. The host owns the real loop,
//! the canvas and the speakers.

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// The tuned gameplay numbers (stomp tolerance, hitbox insets, boss timings)
/// are empirical; they are kept as named, independently adjustable constants
/// rather than derived from one another.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Logic ticks per second, for converting tuned durations
    pub const TICK_HZ: u64 = 60;

    /// Visible canvas extent
    pub const CANVAS_WIDTH: f32 = 720.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;
    /// Y of the ground surface; entity bottoms rest on this line
    pub const GROUND_Y: f32 = 470.0;

    /// Downward acceleration applied to airborne bodies (px/s²)
    pub const GRAVITY: f32 = 1562.5;
    /// Initial upward speed of a player jump (px/s)
    pub const JUMP_SPEED: f32 = 625.0;
    /// Horizontal run speed of the player (px/s)
    pub const RUN_SPEED: f32 = 360.0;
    /// Upward bounce applied after a successful stomp (px/s)
    pub const STOMP_BOUNCE_SPEED: f32 = 320.0;

    /// Player sprite extent and resting top-edge position
    pub const PLAYER_SIZE: Vec2 = Vec2::new(160.0, 290.0);
    pub const PLAYER_GROUND_Y: f32 = GROUND_Y - PLAYER_SIZE.y;
    /// Screen-space x the camera keeps the player at
    pub const CAMERA_OFFSET_X: f32 = 120.0;

    /// Stomp-vs-side-hit tolerance on the bottom/top edge comparison (px)
    pub const STOMP_TOLERANCE: f32 = 20.0;
    /// Hurt cooldown: damage is not re-applied within this window
    pub const HURT_WINDOW_TICKS: u64 = TICK_HZ; // 1 s

    /// Contact damage values
    pub const WALKER_CONTACT_DAMAGE: u32 = 5;
    pub const BOSS_CONTACT_DAMAGE: u32 = 20;
    /// Boss energy lost per bottle hit
    pub const BOSS_HIT_DAMAGE: u32 = 10;

    /// Enemy sprite extents
    pub const CHICKEN_SIZE: Vec2 = Vec2::new(70.0, 80.0);
    pub const SMALL_CHICKEN_SIZE: Vec2 = Vec2::new(50.0, 55.0);
    pub const BOSS_SIZE: Vec2 = Vec2::new(250.0, 400.0);

    /// Walker corpses linger this long before removal (death animation)
    pub const WALKER_REMOVE_DELAY_TICKS: u64 = 24; // ~0.4 s
    /// Boss corpses linger longer; the win check polls for removal
    pub const BOSS_REMOVE_DELAY_TICKS: u64 = 72; // 1.2 s

    /// Boss behavior tuning
    pub const BOSS_ACTIVATION_DISTANCE: f32 = 600.0;
    pub const BOSS_ALERT_TICKS: u64 = 72; // 1.2 s
    pub const BOSS_WALK_SPEED: f32 = 130.0;
    pub const BOSS_STOP_DISTANCE: f32 = 140.0;
    pub const BOSS_JUMP_COOLDOWN_TICKS: u64 = 120; // 2 s
    pub const BOSS_JUMP_DURATION_TICKS: u64 = 36; // 0.6 s
    pub const BOSS_JUMP_HEIGHT: f32 = 120.0;
    /// Scripted jumps fire only in this horizontal distance band
    pub const BOSS_JUMP_BAND_NEAR: f32 = 200.0;
    pub const BOSS_JUMP_BAND_FAR: f32 = 450.0;

    /// Collectible sprite extents
    pub const BOTTLE_SIZE: Vec2 = Vec2::new(50.0, 80.0);
    pub const COIN_SIZE: Vec2 = Vec2::new(100.0, 100.0);
    pub const CLOUD_SIZE: Vec2 = Vec2::new(500.0, 250.0);

    /// Projectile launch velocities (px/s)
    pub const THROW_SPEED_X: f32 = 380.0;
    pub const THROW_SPEED_Y: f32 = 550.0;
    /// Minimum ticks between throws (held key never auto-fires)
    pub const THROW_COOLDOWN_TICKS: u64 = 30; // 0.5 s

    /// Idle time before the player falls asleep
    pub const SLEEP_THRESHOLD_TICKS: u64 = 5 * TICK_HZ;

    /// Width of one background tile; levels are a run of these
    pub const BACKGROUND_TILE_WIDTH: f32 = 719.0;
}

/// HUD percentage for a counter: `clamp(count, 0, max) / max * 100`
#[inline]
pub fn percentage(count: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    count.min(max) as f32 / max as f32 * 100.0
}
