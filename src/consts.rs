//! Gameplay tuning constants
//!
//! World units are pixels of a 900x700 playfield; time is seconds unless the
//! name ends in `_MS`.

/// World dimensions
pub const WORLD_WIDTH: f32 = 900.0;
pub const WORLD_HEIGHT: f32 = 700.0;

/// Physics
pub const GRAVITY: f32 = 900.0; // px/s²
pub const PLAYER_RUN_SPEED: f32 = 260.0;
pub const PLAYER_JUMP_VELOCITY: f32 = -560.0; // negative = up
pub const BULLET_SPEED: f32 = 680.0;
/// Slack allowed between the previous bottom edge and a platform top when landing
pub const LANDING_TOLERANCE: f32 = 4.0;

/// Player
pub const PLAYER_WIDTH: i32 = 55;
pub const PLAYER_HEIGHT: i32 = 72;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_START_X: f32 = 60.0;
pub const PLAYER_START_Y: f32 = 560.0;
pub const GUN_COOLDOWN_MS: u64 = 250;
pub const DAMAGE_INVINCIBILITY_MS: u64 = 800;
pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
/// Vertical gap between the two bullets of a double shot
pub const DOUBLE_SHOT_SPREAD: f32 = 8.0;

/// Power-up durations
pub const DOUBLE_SHOT_DURATION_MS: u64 = 10_000;
pub const SHIELD_DURATION_MS: u64 = 5_000;
pub const SPEED_BOOST_DURATION_MS: u64 = 8_000;
pub const POWER_UP_SIZE: i32 = 34;
pub const POWER_UP_DROP_SPEED: f32 = 70.0;

/// Bullets
pub const BULLET_WIDTH: i32 = 14;
pub const BULLET_HEIGHT: i32 = 5;
pub const FRIENDLY_BULLET_DAMAGE: i32 = 25;
pub const HOSTILE_BULLET_DAMAGE: i32 = 10;
/// Bullets die once this far outside the visible world
pub const BULLET_BOUNDS_MARGIN: f32 = 30.0;

/// Enemy fire
pub const ENEMY_AIM_RANGE: f32 = 580.0;
pub const ENEMY_BULLET_SPEED_X: f32 = 380.0;
pub const ENEMY_BULLET_SPEED_Y: f32 = 80.0;

/// Explosions
pub const EXPLOSION_PARTICLES: usize = 18;
pub const EXPLOSION_FRAMES: u32 = 25;
pub const EXPLOSION_SIZE: i32 = 100;
pub const PARTICLE_GRAVITY: f32 = 300.0;
pub const PARTICLE_FRICTION: f32 = 0.97;

/// Level score thresholds
pub const LEVEL_2_SCORE: u32 = 500;
pub const LEVEL_3_SCORE: u32 = 1500;
pub const MAX_LEVEL: u8 = 3;

/// Spawning
pub const WAVE_INTERVAL: f32 = 6.0;
pub const SPAWN_LANES: [f32; 5] = [60.0, 200.0, 400.0, 600.0, 800.0];
pub const SPAWN_JITTER: i32 = 20;
pub const ENEMY_SPAWN_Y: f32 = -80.0;
pub const BOSS_SPAWN_X: f32 = 400.0;
pub const BOSS_SPAWN_Y: f32 = -140.0;
pub const POWER_UP_SPAWN_Y: f32 = -50.0;
pub const POWER_UP_SPAWN_MIN_X: i32 = 100;
pub const POWER_UP_SPAWN_MAX_X: i32 = 800;
pub const POWER_UP_WAVE_PERIOD: u32 = 3;

/// Frame pacing
pub const TARGET_FPS: u32 = 60;
/// Largest integration step handed to the simulation
pub const MAX_FRAME_DT: f32 = 0.05;

/// Terminals without release events only resend presses through auto-repeat;
/// a movement or fire key counts as released once it goes quiet this long
pub const HELD_KEY_TIMEOUT_MS: u64 = 400;
