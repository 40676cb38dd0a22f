//! The single per-frame entry point of the simulation.
//!
//! [`Game`] owns every piece of mutable state. The frame driver feeds it key
//! transitions and a [`FrameTime`], calls [`Game::tick`] once per cycle and
//! publishes [`Game::snapshot`] afterwards.

use std::sync::Arc;

use crate::collision;
use crate::config::GameConfig;
use crate::driver::FrameTime;
use crate::entities::{Bullet, Entity, Player, PlayerIntent};
use crate::input::{InputSnapshot, InputState, Key};
use crate::level::LevelTracker;
use crate::scene::{Scene, SceneEvent, SceneMachine, Transition};
use crate::score::{HighScoreStore, ScoreKeeper, load_high_score, persist_high_score};
use crate::spawn::SpawnDirector;
use crate::world::{FrameSnapshot, Geometry, World};

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

pub struct Game {
    geometry: Arc<Geometry>,
    scenes: SceneMachine,
    levels: LevelTracker,
    spawns: SpawnDirector,
    scores: ScoreKeeper,
    store: Box<dyn HighScoreStore + Send>,
    player: Player,
    world: World,
    input: InputState,
    frame: u64,
}

impl Game {
    pub fn new(config: &GameConfig, store: Box<dyn HighScoreStore + Send>) -> Self {
        Self::with_geometry(config, Geometry::default().shared(), store)
    }

    pub fn with_geometry(
        config: &GameConfig,
        geometry: Arc<Geometry>,
        store: Box<dyn HighScoreStore + Send>,
    ) -> Self {
        let high_score = load_high_score(store.as_ref());
        log::info!("loaded high score {high_score}");

        Self {
            geometry,
            scenes: SceneMachine::new(),
            levels: LevelTracker::new(),
            spawns: SpawnDirector::new(config.seed),
            scores: ScoreKeeper::new(high_score),
            store,
            player: Player::default(),
            world: World::new(),
            input: InputState::new(),
            frame: 0,
        }
    }

    /// Advances the simulation by one frame
    pub fn tick(&mut self, time: FrameTime) -> TickOutcome {
        let outcome = self.handle_global_input();

        if outcome == TickOutcome::Continue && self.scenes.is_playing() {
            self.advance(time);
        }

        self.input.end_frame();
        self.frame += 1;
        outcome
    }

    /// Start, quit, pause and restart, checked in that order
    fn handle_global_input(&mut self) -> TickOutcome {
        let requests = [
            (Key::Confirm, SceneEvent::Confirm),
            (Key::Quit, SceneEvent::Quit),
            (Key::Pause, SceneEvent::Pause),
            (Key::Restart, SceneEvent::Restart),
        ];

        for (key, event) in requests {
            if !self.input.just_pressed(key) {
                continue;
            }
            match self.scenes.handle(event) {
                Some(Transition::NewRun) => self.reset_run(),
                Some(Transition::Quit) => {
                    self.save_high_score();
                    log::info!("quit requested");
                    return TickOutcome::Quit;
                }
                _ => {}
            }
        }
        TickOutcome::Continue
    }

    fn advance(&mut self, time: FrameTime) {
        let dt = time.dt;
        let geometry = Arc::clone(&self.geometry);
        let (width, height) = (geometry.width, geometry.height);

        let intent = self.player_intent();
        self.player
            .update(dt, time.wall_ms, intent, &geometry.platforms, width, height);

        let target = self.player.body.clone();
        for entity in self.world.iter_mut() {
            if !entity.is_active() {
                continue;
            }
            match entity {
                Entity::Enemy(enemy) => {
                    enemy.update(dt, &target, &geometry.platforms, width, height)
                }
                Entity::Bullet(bullet) => bullet.update(dt, width, height),
                Entity::PowerUp(power_up) => power_up.update(dt, &geometry.platforms, height),
                Entity::Explosion(explosion) => explosion.update(dt),
            }
        }

        // New bullets join the world before collisions so they can hit this frame
        self.world.queue_all(self.player.take_pending_bullets());
        let enemy_bullets: Vec<Bullet> = self
            .world
            .iter_mut()
            .filter_map(|entity| match entity {
                Entity::Enemy(enemy) if enemy.body.active => Some(enemy.take_pending_bullets()),
                _ => None,
            })
            .flatten()
            .collect();
        self.world.queue_all(enemy_bullets);
        self.world.merge_pending();

        let report = collision::resolve(
            self.world.entities_mut(),
            &mut self.player,
            self.spawns.rng_mut(),
        );
        self.scores.add(report.score);
        self.world.queue_all(report.explosions);

        let spawned = self.spawns.update(dt, self.levels.level());
        self.world.queue_all(spawned);

        self.levels.check(self.scores.score());

        self.world.merge_pending();
        self.world.prune_inactive();

        if !self.player.is_alive()
            && self.scenes.handle(SceneEvent::PlayerDied) == Some(Transition::Ended)
        {
            log::info!("game over with score {}", self.scores.score());
            self.save_high_score();
        }
    }

    fn player_intent(&mut self) -> PlayerIntent {
        PlayerIntent {
            left: self.input.is_held(Key::Left),
            right: self.input.is_held(Key::Right),
            jump: self.input.just_pressed(Key::Jump),
            fire: self.input.is_held(Key::Fire),
        }
    }

    fn reset_run(&mut self) {
        self.scores.reset();
        self.levels.reset();
        self.spawns.reset();
        self.player.reset();
        self.world.clear();
        log::info!("new run started");
    }

    pub fn save_high_score(&self) {
        persist_high_score(self.store.as_ref(), self.scores.high_score());
    }

    /// Copies the finished frame for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            scene: self.scenes.current(),
            level: self.levels.level(),
            wave: self.spawns.wave_count(),
            score: self.scores.score(),
            high_score: self.scores.high_score(),
            player: self.player.clone(),
            entities: self
                .world
                .iter()
                .filter(|entity| entity.is_active())
                .cloned()
                .collect(),
            boss_level: self.levels.is_boss_level(),
            boss_active: self.world.has_boss(),
            frame: self.frame,
            geometry: Arc::clone(&self.geometry),
        }
    }

    pub fn scene(&self) -> Scene {
        self.scenes.current()
    }

    pub fn level(&self) -> u8 {
        self.levels.level()
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn wave(&self) -> u32 {
        self.spawns.wave_count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }
}
