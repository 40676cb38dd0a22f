mod body;
mod bullet;
mod enemy;
mod explosion;
pub mod physics;
mod platform;
mod player;
mod power_up;

// Re-export all public types
pub use body::{Body, Rect};
pub use bullet::{Bullet, BulletOwner};
pub use enemy::{Brain, Enemy, EnemyKind, EnemyStats, Movable, Patroller, Walker, Zigzagger};
pub use explosion::{ExplosionEffect, Particle};
pub use platform::{Platform, default_layout};
pub use player::{AbilityTimers, Facing, Player, PlayerIntent};
pub use power_up::{Effectful, PowerUp, PowerUpKind};

/// Every dynamic member of the world besides the player
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Enemy(Enemy),
    Bullet(Bullet),
    PowerUp(PowerUp),
    Explosion(ExplosionEffect),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Enemy(enemy) => &enemy.body,
            Entity::Bullet(bullet) => &bullet.body,
            Entity::PowerUp(power_up) => &power_up.body,
            Entity::Explosion(explosion) => &explosion.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Enemy(enemy) => &mut enemy.body,
            Entity::Bullet(bullet) => &mut bullet.body,
            Entity::PowerUp(power_up) => &mut power_up.body,
            Entity::Explosion(explosion) => &mut explosion.body,
        }
    }

    pub fn is_active(&self) -> bool {
        self.body().active
    }

    pub fn deactivate(&mut self) {
        self.body_mut().active = false;
    }
}

impl From<Enemy> for Entity {
    fn from(enemy: Enemy) -> Self {
        Entity::Enemy(enemy)
    }
}

impl From<Bullet> for Entity {
    fn from(bullet: Bullet) -> Self {
        Entity::Bullet(bullet)
    }
}

impl From<PowerUp> for Entity {
    fn from(power_up: PowerUp) -> Self {
        Entity::PowerUp(power_up)
    }
}

impl From<ExplosionEffect> for Entity {
    fn from(explosion: ExplosionEffect) -> Self {
        Entity::Explosion(explosion)
    }
}
