use rand::Rng;
use std::f32::consts::TAU;

use super::body::Body;
use crate::consts::{
    EXPLOSION_FRAMES, EXPLOSION_PARTICLES, EXPLOSION_SIZE, PARTICLE_FRICTION, PARTICLE_GRAVITY,
};

const MIN_PARTICLE_SPEED: f32 = 60.0;
const MAX_PARTICLE_SPEED: f32 = 240.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vel_x: f32, vel_y: f32) -> Self {
        Self { x, y, vel_x, vel_y }
    }

    pub fn update(&mut self, dt: f32) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += PARTICLE_GRAVITY * dt;
        self.vel_x *= PARTICLE_FRICTION;
    }
}

/// Purely visual burst left behind by a destroyed enemy
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionEffect {
    pub body: Body,
    pub particles: Vec<Particle>,
    pub frame: u32,
}

impl ExplosionEffect {
    pub fn new<R: Rng>(center_x: f32, center_y: f32, rng: &mut R) -> Self {
        let half = EXPLOSION_SIZE as f32 / 2.0;
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| {
                let heading = rng.random_range(0.0..TAU);
                let speed = rng.random_range(MIN_PARTICLE_SPEED..MAX_PARTICLE_SPEED);
                Particle::new(
                    center_x,
                    center_y,
                    heading.cos() * speed,
                    heading.sin() * speed,
                )
            })
            .collect();

        Self {
            body: Body::new(center_x - half, center_y - half, EXPLOSION_SIZE, EXPLOSION_SIZE),
            particles,
            frame: 0,
        }
    }

    /// Advances one animation frame regardless of `dt`
    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }
        self.frame += 1;
        for particle in &mut self.particles {
            particle.update(dt);
        }
        if self.frame >= EXPLOSION_FRAMES {
            self.body.active = false;
        }
    }

    /// Fraction of the lifetime already spent, from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        (self.frame as f32 / EXPLOSION_FRAMES as f32).min(1.0)
    }
}
