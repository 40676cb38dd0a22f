use super::body::Body;
use crate::consts::{
    BULLET_BOUNDS_MARGIN, BULLET_HEIGHT, BULLET_WIDTH, FRIENDLY_BULLET_DAMAGE,
    HOSTILE_BULLET_DAMAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    pub damage: i32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, vel_x: f32, vel_y: f32, owner: BulletOwner) -> Self {
        let damage = match owner {
            BulletOwner::Player => FRIENDLY_BULLET_DAMAGE,
            BulletOwner::Enemy => HOSTILE_BULLET_DAMAGE,
        };

        Self {
            body: Body::new(x, y, BULLET_WIDTH, BULLET_HEIGHT).with_velocity(vel_x, vel_y),
            owner,
            damage,
        }
    }

    pub fn is_friendly(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Bullets fly straight and ignore platforms
    pub fn update(&mut self, dt: f32, world_width: f32, world_height: f32) {
        self.body.x += self.body.vel_x * dt;
        self.body.y += self.body.vel_y * dt;

        if self.is_out_of_bounds(world_width, world_height) {
            self.body.active = false;
        }
    }

    pub fn is_out_of_bounds(&self, world_width: f32, world_height: f32) -> bool {
        let margin = BULLET_BOUNDS_MARGIN;
        self.body.x < -margin
            || self.body.x > world_width + margin
            || self.body.y < -margin
            || self.body.y > world_height + margin
    }

    /// Any hit consumes the bullet
    pub fn on_hit(&mut self) {
        self.body.active = false;
    }
}
