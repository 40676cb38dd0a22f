// Library exports for the binary and the integration tests
pub use app::App;
pub use config::GameConfig;
pub use driver::{DriverHandle, FrameClock, FrameDriver, FrameTime};
pub use error::{ScoreError, ScoreResult};
pub use game::{Game, TickOutcome};
pub use scene::Scene;
pub use world::{FrameSnapshot, Geometry, World};

pub mod app;
pub mod collision;
pub mod config;
pub mod consts;
pub mod driver;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod renderer;
pub mod scene;
pub mod score;
pub mod spawn;
pub mod world;
