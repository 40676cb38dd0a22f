use std::{env, path::PathBuf, time::Duration};

use crate::consts::{MAX_FRAME_DT, TARGET_FPS};

// Runtime settings (not gameplay tuning, see `consts` for that).

pub const FPS_ENV_VAR: &str = "GALACTIC_DEFENDER_FPS";
pub const MAX_DT_ENV_VAR: &str = "GALACTIC_DEFENDER_MAX_DT";
pub const HIGHSCORE_ENV_VAR: &str = "GALACTIC_DEFENDER_HIGHSCORE";
pub const SEED_ENV_VAR: &str = "GALACTIC_DEFENDER_SEED";

pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Simulation cycles per second
    pub target_fps: u32,
    /// Upper bound on the integration step, in seconds
    pub max_frame_dt: f32,
    pub highscore_path: PathBuf,
    /// Fixed RNG seed for spawns and effects; random when `None`
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            max_frame_dt: MAX_FRAME_DT,
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by any recognised environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_fps: env::var(FPS_ENV_VAR)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|fps: &u32| *fps > 0)
                .unwrap_or(defaults.target_fps),
            max_frame_dt: env::var(MAX_DT_ENV_VAR)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|dt: &f32| *dt > 0.0)
                .unwrap_or(defaults.max_frame_dt),
            highscore_path: env::var(HIGHSCORE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.highscore_path),
            seed: env::var(SEED_ENV_VAR).ok().and_then(|v| v.parse().ok()),
        }
    }

    /// Wall time budget of one simulation cycle.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.max_frame_dt, 0.05);
        assert_eq!(config.highscore_path, PathBuf::from("highscore.txt"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_frame_period_matches_fps() {
        let config = GameConfig {
            target_fps: 50,
            ..GameConfig::default()
        };
        assert_eq!(config.frame_period(), Duration::from_millis(20));
    }
}
