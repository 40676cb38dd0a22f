/// Coarse game mode; exactly one is current at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Edge-triggered requests that can move the scene machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Confirm,
    Quit,
    Pause,
    Restart,
    PlayerDied,
}

/// Side effects the caller must carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A fresh run begins: score, level, spawns, player and world are reset
    NewRun,
    Paused,
    Resumed,
    /// The run ended; the high score should be saved
    Ended,
    /// Save the high score and stop the loop
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneMachine {
    current: Scene,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.current == Scene::Playing
    }

    /// Applies `event` and reports the transition it caused, if any
    pub fn handle(&mut self, event: SceneEvent) -> Option<Transition> {
        let (next, transition) = match (self.current, event) {
            (Scene::Start, SceneEvent::Confirm) => (Scene::Playing, Transition::NewRun),
            (Scene::GameOver, SceneEvent::Restart) => (Scene::Playing, Transition::NewRun),
            (Scene::Playing, SceneEvent::Pause) => (Scene::Paused, Transition::Paused),
            (Scene::Paused, SceneEvent::Pause) => (Scene::Playing, Transition::Resumed),
            (Scene::Playing, SceneEvent::PlayerDied) => (Scene::GameOver, Transition::Ended),
            (Scene::Start | Scene::GameOver | Scene::Paused, SceneEvent::Quit) => {
                (self.current, Transition::Quit)
            }
            _ => return None,
        };

        if next != self.current {
            log::info!("scene {:?} -> {:?}", self.current, next);
        }
        self.current = next;
        Some(transition)
    }
}
