use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{
    BOSS_SPAWN_X, BOSS_SPAWN_Y, ENEMY_SPAWN_Y, MAX_LEVEL, POWER_UP_SPAWN_MAX_X,
    POWER_UP_SPAWN_MIN_X, POWER_UP_SPAWN_Y, POWER_UP_WAVE_PERIOD, SPAWN_JITTER, SPAWN_LANES,
    WAVE_INTERVAL,
};
use crate::entities::{Enemy, EnemyKind, Entity, PowerUp, PowerUpKind};

/// Decides when waves arrive and what they contain
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    rng: StdRng,
    wave_timer: f32,
    wave_count: u32,
}

impl SpawnDirector {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            wave_timer: 0.0,
            wave_count: 0,
        }
    }

    pub fn wave_count(&self) -> u32 {
        self.wave_count
    }

    pub fn wave_timer(&self) -> f32 {
        self.wave_timer
    }

    /// Shared with other per-frame randomness (explosions) so a seed pins a whole run
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn reset(&mut self) {
        self.wave_timer = 0.0;
        self.wave_count = 0;
    }

    /// Advances the wave timer. Returns the entities to add this frame, if any.
    pub fn update(&mut self, dt: f32, level: u8) -> Vec<Entity> {
        self.wave_timer += dt;
        if self.wave_timer < WAVE_INTERVAL {
            return Vec::new();
        }

        self.wave_timer = 0.0;
        self.wave_count += 1;

        let mut spawned = self.spawn_wave(level);
        if self.wave_count % POWER_UP_WAVE_PERIOD == 0 {
            spawned.push(Entity::PowerUp(self.spawn_power_up()));
        }
        log::info!(
            "wave {} at level {}: {} spawned",
            self.wave_count,
            level,
            spawned.len()
        );
        spawned
    }

    fn spawn_wave(&mut self, level: u8) -> Vec<Entity> {
        if level == MAX_LEVEL && self.wave_count == 1 {
            return vec![Entity::Enemy(Enemy::new(
                BOSS_SPAWN_X,
                BOSS_SPAWN_Y,
                EnemyKind::Boss,
            ))];
        }

        let count = 2 + level as usize;
        (0..count)
            .map(|_| {
                let lane = SPAWN_LANES[self.rng.random_range(0..SPAWN_LANES.len())];
                let jitter = self.rng.random_range(-SPAWN_JITTER..SPAWN_JITTER);
                let x = lane + jitter as f32;
                let kind = if level <= 1 || self.rng.random_bool(0.5) {
                    EnemyKind::Basic
                } else {
                    EnemyKind::Fast
                };
                Entity::Enemy(Enemy::new(x, ENEMY_SPAWN_Y, kind))
            })
            .collect()
    }

    fn spawn_power_up(&mut self) -> PowerUp {
        let x = self
            .rng
            .random_range(POWER_UP_SPAWN_MIN_X..POWER_UP_SPAWN_MAX_X) as f32;
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        PowerUp::new(x, POWER_UP_SPAWN_Y, kind)
    }
}
