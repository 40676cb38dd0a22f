use std::sync::Arc;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{Entity, Platform, Player, default_layout};
use crate::scene::Scene;

/// Static level geometry, built once and shared read-only
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub platforms: Vec<Platform>,
    pub width: f32,
    pub height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(default_layout(), WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl Geometry {
    pub fn new(platforms: Vec<Platform>, width: f32, height: f32) -> Self {
        Self {
            platforms,
            width,
            height,
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Owned store of every dynamic entity.
///
/// Anything created while a pass is iterating goes through [`World::queue`]
/// and only becomes visible after [`World::merge_pending`].
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
    pending: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self, entity: impl Into<Entity>) {
        self.pending.push(entity.into());
    }

    pub fn queue_all<I>(&mut self, entities: I)
    where
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        self.pending.extend(entities.into_iter().map(Into::into));
    }

    /// Appends queued entities in the order they were queued
    pub fn merge_pending(&mut self) {
        self.entities.append(&mut self.pending);
    }

    pub fn prune_inactive(&mut self) {
        self.entities.retain(Entity::is_active);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn enemy_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Enemy(_)))
            .count()
    }

    pub fn bullet_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Bullet(_)))
            .count()
    }

    pub fn power_up_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::PowerUp(_)))
            .count()
    }

    pub fn explosion_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Explosion(_)))
            .count()
    }

    /// True while an active boss is on the field
    pub fn has_boss(&self) -> bool {
        self.entities.iter().any(|e| match e {
            Entity::Enemy(enemy) => enemy.is_boss() && enemy.body.active,
            _ => false,
        })
    }
}

/// Immutable view of one finished frame, handed to the renderer
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub scene: Scene,
    pub level: u8,
    pub wave: u32,
    pub score: u32,
    pub high_score: u32,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub boss_level: bool,
    pub boss_active: bool,
    pub frame: u64,
    pub geometry: Arc<Geometry>,
}
