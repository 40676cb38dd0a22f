use color_eyre::{Result, eyre::eyre};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Stdout;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::driver::{DriverHandle, FrameDriver};
use crate::game::Game;
use crate::input::{InputManager, KeyTransition};
use crate::renderer::{GameRenderer, RenderView};
use crate::score::FileHighScoreStore;
use crate::world::FrameSnapshot;

type Backend = CrosstermBackend<Stdout>;

/// Terminal host: forwards keys to the simulation thread and draws what it publishes
pub struct App {
    config: GameConfig,
    input_manager: InputManager,
    renderer: GameRenderer,
    latest: Option<Arc<FrameSnapshot>>,
    /// Frames counted since `fps_window_start`
    frames_seen: u32,
    fps_window_start: Instant,
    fps: u32,
}

impl App {
    /// `reports_key_release` is false on terminals without keyboard enhancement
    pub fn new(config: GameConfig, reports_key_release: bool) -> Self {
        Self {
            config,
            input_manager: InputManager::new(reports_key_release),
            renderer: GameRenderer::new(),
            latest: None,
            frames_seen: 0,
            fps_window_start: Instant::now(),
            fps: 0,
        }
    }

    /// Run until the simulation stops, then tear it down
    pub fn run(mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let store = FileHighScoreStore::new(&self.config.highscore_path);
        let game = Game::new(&self.config, Box::new(store));

        let (input_tx, input_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let driver = FrameDriver::spawn(game, &self.config, input_rx, snapshot_tx)?;

        let result = self.pump(terminal, &driver, &input_tx, &snapshot_rx);

        driver.stop();
        let game = driver
            .join()
            .map_err(|_| eyre!("simulation thread panicked"))?;
        if self.input_manager.interrupted() {
            game.save_high_score();
        }
        log::info!(
            "exiting with score {} (best {})",
            game.score(),
            game.high_score()
        );
        result
    }

    fn pump(
        &mut self,
        terminal: &mut Terminal<Backend>,
        driver: &DriverHandle,
        input_tx: &Sender<KeyTransition>,
        snapshot_rx: &Receiver<Arc<FrameSnapshot>>,
    ) -> Result<()> {
        while driver.is_running() {
            // Only the newest frame is worth drawing
            for snapshot in snapshot_rx.try_iter() {
                self.latest = Some(snapshot);
                self.frames_seen += 1;
            }
            self.update_fps();

            if let Some(snapshot) = &self.latest {
                terminal.draw(|frame| {
                    let view = RenderView {
                        snapshot,
                        area: frame.area(),
                        fps: self.fps,
                    };
                    self.renderer.render(frame, &view);
                })?;
            }

            for transition in self.input_manager.poll_events()? {
                if input_tx.send(transition).is_err() {
                    return Ok(());
                }
            }
            if self.input_manager.interrupted() {
                return Ok(());
            }

            // Small sleep to prevent CPU spinning; the simulation keeps its own pace
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    fn update_fps(&mut self) {
        let elapsed = self.fps_window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.fps = (self.frames_seen as f32 / elapsed.as_secs_f32()).round() as u32;
            self.frames_seen = 0;
            self.fps_window_start = Instant::now();
        }
    }
}
