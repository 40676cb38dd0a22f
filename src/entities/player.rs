use super::body::Body;
use super::bullet::{Bullet, BulletOwner};
use super::physics;
use super::platform::Platform;
use crate::consts::{
    BULLET_SPEED, BULLET_WIDTH, DAMAGE_INVINCIBILITY_MS, DOUBLE_SHOT_SPREAD, GUN_COOLDOWN_MS,
    PLAYER_HEIGHT, PLAYER_JUMP_VELOCITY, PLAYER_MAX_HEALTH, PLAYER_RUN_SPEED, PLAYER_START_X,
    PLAYER_START_Y, PLAYER_WIDTH, SPEED_BOOST_MULTIPLIER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// What the player asked for this frame, already resolved from the input snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered: only true on the frame the jump key went down
    pub jump: bool,
    pub fire: bool,
}

/// Countdown timers in wall-clock milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityTimers {
    pub double_shot: u64,
    pub shield: u64,
    pub speed_boost: u64,
    pub invincibility: u64,
}

impl AbilityTimers {
    fn tick(&mut self, elapsed_ms: u64) {
        self.double_shot = self.double_shot.saturating_sub(elapsed_ms);
        self.shield = self.shield.saturating_sub(elapsed_ms);
        self.speed_boost = self.speed_boost.saturating_sub(elapsed_ms);
        self.invincibility = self.invincibility.saturating_sub(elapsed_ms);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub facing: Facing,
    pub on_ground: bool,
    pub timers: AbilityTimers,
    /// Milliseconds until the gun may fire again
    pub gun_cooldown: u64,
    pending_bullets: Vec<Bullet>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_MAX_HEALTH,
            facing: Facing::Right,
            on_ground: false,
            timers: AbilityTimers::default(),
            gun_cooldown: 0,
            pending_bullets: Vec::new(),
        }
    }

    /// Advance one frame.
    ///
    /// `dt` is the (clamped) simulation step and drives movement; `elapsed_ms`
    /// is measured wall time and drives every countdown timer.
    pub fn update(
        &mut self,
        dt: f32,
        elapsed_ms: u64,
        intent: PlayerIntent,
        platforms: &[Platform],
        world_width: f32,
        world_height: f32,
    ) {
        self.timers.tick(elapsed_ms);
        self.gun_cooldown = self.gun_cooldown.saturating_sub(elapsed_ms);

        let speed = self.run_speed();
        if intent.left {
            self.body.vel_x = -speed;
            self.facing = Facing::Left;
        } else if intent.right {
            self.body.vel_x = speed;
            self.facing = Facing::Right;
        } else {
            self.body.vel_x = 0.0;
        }

        if intent.jump && self.on_ground {
            self.body.vel_y = PLAYER_JUMP_VELOCITY;
            self.on_ground = false;
        }

        if intent.fire && self.can_fire() {
            self.fire();
            self.gun_cooldown = GUN_COOLDOWN_MS;
        }

        physics::apply_gravity(&mut self.body, dt);
        physics::integrate(&mut self.body, dt);
        physics::clamp_horizontal(&mut self.body, world_width);
        let on_platform = physics::land_on_platforms(&mut self.body, dt, platforms);
        let on_floor = physics::clamp_vertical(&mut self.body, world_height, true);
        self.on_ground = on_platform || on_floor;
    }

    pub fn run_speed(&self) -> f32 {
        if self.is_speed_boost_active() {
            PLAYER_RUN_SPEED * SPEED_BOOST_MULTIPLIER
        } else {
            PLAYER_RUN_SPEED
        }
    }

    pub fn can_fire(&self) -> bool {
        self.gun_cooldown == 0
    }

    fn fire(&mut self) {
        let (x, vel_x) = match self.facing {
            Facing::Right => (self.body.x + self.body.width as f32, BULLET_SPEED),
            Facing::Left => (self.body.x - BULLET_WIDTH as f32, -BULLET_SPEED),
        };
        let y = self.body.center_y() - 3.0;

        self.pending_bullets
            .push(Bullet::new(x, y, vel_x, 0.0, BulletOwner::Player));
        if self.is_double_shot_active() {
            self.pending_bullets.push(Bullet::new(
                x,
                y + DOUBLE_SHOT_SPREAD,
                vel_x,
                0.0,
                BulletOwner::Player,
            ));
        }
    }

    /// Drains the bullets fired since the last call
    pub fn take_pending_bullets(&mut self) -> Vec<Bullet> {
        std::mem::take(&mut self.pending_bullets)
    }

    /// Applies damage unless a shield or post-hit invincibility is running.
    /// Returns false when the hit was suppressed.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.is_invincible() || self.is_shield_active() {
            return false;
        }
        self.health = (self.health - damage.max(0)).clamp(0, PLAYER_MAX_HEALTH);
        self.timers.invincibility = DAMAGE_INVINCIBILITY_MS;
        true
    }

    pub fn activate_double_shot(&mut self, duration_ms: u64) {
        self.timers.double_shot = duration_ms;
    }

    pub fn activate_shield(&mut self, duration_ms: u64) {
        self.timers.shield = duration_ms;
    }

    pub fn activate_speed_boost(&mut self, duration_ms: u64) {
        self.timers.speed_boost = duration_ms;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.timers.invincibility > 0
    }

    pub fn is_shield_active(&self) -> bool {
        self.timers.shield > 0
    }

    pub fn is_double_shot_active(&self) -> bool {
        self.timers.double_shot > 0
    }

    pub fn is_speed_boost_active(&self) -> bool {
        self.timers.speed_boost > 0
    }

    pub fn max_health(&self) -> i32 {
        PLAYER_MAX_HEALTH
    }

    /// Back to the spawn point with full health and no timers
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
