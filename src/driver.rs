//! Runs [`Game`] on its own thread at a fixed cadence.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::game::{Game, TickOutcome};
use crate::input::KeyTransition;
use crate::world::FrameSnapshot;

/// Time budget handed to one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Integration step in seconds, never above the configured maximum
    pub dt: f32,
    /// Unclamped wall time since the previous frame, for countdown timers
    pub wall_ms: u64,
}

impl FrameTime {
    pub fn from_elapsed(elapsed: Duration, max_dt: f32) -> Self {
        Self {
            dt: elapsed.as_secs_f32().min(max_dt),
            wall_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Measures the time between consecutive cycles
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
    /// Sub-millisecond remainder carried into the next frame
    carry_us: u128,
}

impl FrameClock {
    pub fn new(start: Instant, max_dt: f32) -> Self {
        Self {
            last: start,
            max_dt,
            carry_us: 0,
        }
    }

    pub fn advance(&mut self, now: Instant) -> FrameTime {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        let total_us = elapsed.as_micros() + self.carry_us;
        self.carry_us = total_us % 1000;
        FrameTime {
            dt: elapsed.as_secs_f32().min(self.max_dt),
            wall_ms: (total_us / 1000) as u64,
        }
    }
}

pub struct FrameDriver;

impl FrameDriver {
    /// Moves `game` onto a new simulation thread and starts ticking it.
    ///
    /// Key transitions arriving on `input_rx` are applied before each tick;
    /// a snapshot is sent on `snapshot_tx` after each tick.
    pub fn spawn(
        mut game: Game,
        config: &GameConfig,
        input_rx: Receiver<KeyTransition>,
        snapshot_tx: Sender<Arc<FrameSnapshot>>,
    ) -> io::Result<DriverHandle> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let period = config.frame_period();
        let max_dt = config.max_frame_dt;

        let thread = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || {
                let mut clock = FrameClock::new(Instant::now(), max_dt);
                log::info!("simulation started, {:?} per frame", period);

                while flag.load(Ordering::Acquire) {
                    let started = Instant::now();
                    game.input_mut().apply_all(input_rx.try_iter());

                    let time = clock.advance(started);
                    let outcome = game.tick(time);

                    if snapshot_tx.send(Arc::new(game.snapshot())).is_err() {
                        log::info!("snapshot receiver dropped, stopping");
                        break;
                    }
                    if outcome == TickOutcome::Quit {
                        break;
                    }

                    if let Some(rest) = period.checked_sub(started.elapsed()) {
                        thread::sleep(rest);
                    }
                }

                flag.store(false, Ordering::Release);
                log::info!("simulation stopped after {} frames", game.frame());
                game
            })?;

        Ok(DriverHandle {
            running,
            thread,
        })
    }
}

pub struct DriverHandle {
    running: Arc<AtomicBool>,
    thread: JoinHandle<Game>,
}

impl DriverHandle {
    /// Asks the loop to stop after the current cycle; never blocks
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.thread.is_finished()
    }

    /// Waits for the loop to finish and hands back the game
    pub fn join(self) -> thread::Result<Game> {
        self.thread.join()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::scene::Scene;
    use crate::score::MemoryHighScoreStore;
    use std::sync::mpsc;

    #[test]
    fn test_frame_time_clamps_step_not_wall_time() {
        let time = FrameTime::from_elapsed(Duration::from_millis(200), 0.05);
        assert_eq!(time.dt, 0.05);
        assert_eq!(time.wall_ms, 200);

        let time = FrameTime::from_elapsed(Duration::from_millis(10), 0.05);
        assert_eq!(time.dt, 0.01);
    }

    #[test]
    fn test_clock_carries_sub_millisecond_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start, 0.05);
        let step = Duration::from_micros(16_667);
        let total: u64 = (1..=3)
            .map(|i| clock.advance(start + step * i).wall_ms)
            .sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_driver_runs_until_quit() {
        let config = GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        };
        let store = MemoryHighScoreStore::new(77);
        let game = Game::new(&config, Box::new(store.clone()));
        let (input_tx, input_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();

        let handle = FrameDriver::spawn(game, &config, input_rx, snapshot_tx).unwrap();
        let first = snapshot_rx.recv().unwrap();
        assert_eq!(first.scene, Scene::Start);

        input_tx.send(KeyTransition::press(Key::Quit)).unwrap();
        let game = handle.join().unwrap();
        assert_eq!(game.scene(), Scene::Start);
        assert_eq!(store.get(), 77);
    }

    #[test]
    fn test_stop_from_outside() {
        let config = GameConfig::default();
        let game = Game::new(&config, Box::new(MemoryHighScoreStore::default()));
        let (_input_tx, input_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();

        let handle = FrameDriver::spawn(game, &config, input_rx, snapshot_tx).unwrap();
        snapshot_rx.recv().unwrap();
        handle.stop();
        assert!(!handle.is_running());
        let game = handle.join().unwrap();
        assert!(game.frame() >= 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_step_never_exceeds_max(ms in 0u64..5_000) {
                let time = FrameTime::from_elapsed(Duration::from_millis(ms), 0.05);
                prop_assert!(time.dt <= 0.05);
                prop_assert_eq!(time.wall_ms, ms);
                if ms > 50 {
                    prop_assert_eq!(time.dt, 0.05);
                }
            }
        }
    }
}
