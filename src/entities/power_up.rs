use super::body::Body;
use super::physics;
use super::platform::Platform;
use super::player::Player;
use crate::consts::{
    DOUBLE_SHOT_DURATION_MS, POWER_UP_DROP_SPEED, POWER_UP_SIZE, SHIELD_DURATION_MS,
    SPEED_BOOST_DURATION_MS,
};

/// Something that changes the player when collected
pub trait Effectful {
    fn apply(&self, player: &mut Player);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    DoubleShot,
    Shield,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::DoubleShot,
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
    ];

    pub fn duration_ms(&self) -> u64 {
        match self {
            PowerUpKind::DoubleShot => DOUBLE_SHOT_DURATION_MS,
            PowerUpKind::Shield => SHIELD_DURATION_MS,
            PowerUpKind::SpeedBoost => SPEED_BOOST_DURATION_MS,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "Double Shot",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::SpeedBoost => "Speed Boost",
        }
    }

    /// Short badge shown on the pickup and in the HUD
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "2x",
            PowerUpKind::Shield => "SH",
            PowerUpKind::SpeedBoost => ">>",
        }
    }
}

impl Effectful for PowerUpKind {
    fn apply(&self, player: &mut Player) {
        let duration = self.duration_ms();
        match self {
            PowerUpKind::DoubleShot => player.activate_double_shot(duration),
            PowerUpKind::Shield => player.activate_shield(duration),
            PowerUpKind::SpeedBoost => player.activate_speed_boost(duration),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            body: Body::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE)
                .with_velocity(0.0, POWER_UP_DROP_SPEED),
            kind,
        }
    }

    /// Falls until it rests on a platform or the floor
    pub fn update(&mut self, dt: f32, platforms: &[Platform], world_height: f32) {
        physics::apply_gravity(&mut self.body, dt);
        self.body.y += self.body.vel_y * dt;
        physics::land_on_platforms(&mut self.body, dt, platforms);
        physics::clamp_vertical(&mut self.body, world_height, false);
    }

    /// Applies the effect and removes the pickup from play
    pub fn collect(&mut self, player: &mut Player) {
        if !self.body.active {
            return;
        }
        self.kind.apply(player);
        self.body.active = false;
        log::info!("collected {}", self.kind.get_name());
    }
}
