use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::consts::HELD_KEY_TIMEOUT_MS;

/// Logical keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Fire,
    Confirm,
    Pause,
    Restart,
    Quit,
}

impl Key {
    pub const COUNT: usize = 8;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Left,
        Key::Right,
        Key::Jump,
        Key::Fire,
        Key::Confirm,
        Key::Pause,
        Key::Restart,
        Key::Quit,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A logical key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: Key,
    pub pressed: bool,
}

impl KeyTransition {
    pub fn press(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Read side of the keyboard as the simulation sees it
pub trait InputSnapshot {
    fn is_held(&self, key: Key) -> bool;

    /// True once per press; reading it clears the flag
    fn just_pressed(&mut self, key: Key) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Key::COUNT],
    just_pressed: [bool; Key::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, transition: KeyTransition) {
        let idx = transition.key.index();
        if transition.pressed {
            // Auto-repeat must not register as a fresh press
            if !self.held[idx] {
                self.just_pressed[idx] = true;
            }
            self.held[idx] = true;
        } else {
            self.held[idx] = false;
        }
    }

    pub fn apply_all(&mut self, transitions: impl IntoIterator<Item = KeyTransition>) {
        for transition in transitions {
            self.apply(transition);
        }
    }

    /// Drops presses nobody consumed this tick
    pub fn end_frame(&mut self) {
        self.just_pressed = [false; Key::COUNT];
    }
}

impl InputSnapshot for InputState {
    fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    fn just_pressed(&mut self, key: Key) -> bool {
        std::mem::take(&mut self.just_pressed[key.index()])
    }
}

/// Polls the terminal and translates raw key events into logical transitions
#[derive(Debug)]
pub struct InputManager {
    transitions: Vec<KeyTransition>,
    interrupted: bool,
    /// Whether the terminal reports key releases (keyboard enhancement)
    reports_release: bool,
    /// Without release reports: when each held key counts as let go
    held_until: [Option<Instant>; Key::COUNT],
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            transitions: Vec::new(),
            interrupted: false,
            reports_release,
            held_until: [None; Key::COUNT],
        }
    }

    /// Set once Ctrl-C was seen; the host should shut down whatever the scene
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Drains every pending terminal event without blocking
    pub fn poll_events(&mut self) -> color_eyre::Result<Vec<KeyTransition>> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, Instant::now());
            }
        }
        self.expire_held(Instant::now());
        Ok(std::mem::take(&mut self.transitions))
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.interrupted = true;
        }

        let Some(key) = map_key(key_event.code, key_event.modifiers) else {
            return;
        };
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat if self.reports_release => {
                self.transitions.push(KeyTransition::press(key))
            }
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_unreleased_press(key, now),
            KeyEventKind::Release => {
                self.held_until[key.index()] = None;
                self.transitions.push(KeyTransition::release(key));
            }
        }
    }

    /// Presses from a terminal that never reports the matching release
    fn handle_unreleased_press(&mut self, key: Key, now: Instant) {
        let opposite = match key {
            Key::Left => Some(Key::Right),
            Key::Right => Some(Key::Left),
            Key::Fire => None,
            // One-shot keys go straight back up so the next tap registers
            _ => {
                self.transitions.push(KeyTransition::press(key));
                self.transitions.push(KeyTransition::release(key));
                return;
            }
        };

        // A new direction replaces the old one
        if let Some(opposite) = opposite {
            if self.held_until[opposite.index()].take().is_some() {
                self.transitions.push(KeyTransition::release(opposite));
            }
        }

        let deadline = now + Duration::from_millis(HELD_KEY_TIMEOUT_MS);
        if self.held_until[key.index()].replace(deadline).is_none() {
            self.transitions.push(KeyTransition::press(key));
        }
    }

    /// Releases held keys whose auto-repeat stopped arriving
    fn expire_held(&mut self, now: Instant) {
        for key in Key::ALL {
            let slot = &mut self.held_until[key.index()];
            if slot.is_some_and(|deadline| deadline <= now) {
                *slot = None;
                self.transitions.push(KeyTransition::release(key));
            }
        }
    }
}

/// Arrows or WASD move, up/W jumps, space fires
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c') | KeyCode::Char('C')).then_some(Key::Quit);
    }

    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Jump),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_just_pressed_once() {
        let mut input = InputState::new();
        input.apply(KeyTransition::press(Key::Jump));
        assert!(input.is_held(Key::Jump));
        assert!(input.just_pressed(Key::Jump));
        assert!(!input.just_pressed(Key::Jump));
        assert!(input.is_held(Key::Jump));
    }

    #[test]
    fn test_repeat_while_held_is_not_a_press() {
        let mut input = InputState::new();
        input.apply(KeyTransition::press(Key::Pause));
        input.end_frame();
        input.apply(KeyTransition::press(Key::Pause));
        assert!(!input.just_pressed(Key::Pause));

        input.apply(KeyTransition::release(Key::Pause));
        input.apply(KeyTransition::press(Key::Pause));
        assert!(input.just_pressed(Key::Pause));
    }

    #[test]
    fn test_end_frame_drops_unconsumed_presses() {
        let mut input = InputState::new();
        input.apply_all([
            KeyTransition::press(Key::Restart),
            KeyTransition::press(Key::Fire),
        ]);
        input.end_frame();
        assert!(!input.just_pressed(Key::Restart));
        assert!(input.is_held(Key::Fire));
    }

    #[test]
    fn test_key_mapping() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(KeyCode::Left, none), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Char('d'), none), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Up, none), Some(Key::Jump));
        assert_eq!(map_key(KeyCode::Char(' '), none), Some(Key::Fire));
        assert_eq!(map_key(KeyCode::Enter, none), Some(Key::Confirm));
        assert_eq!(map_key(KeyCode::Char('P'), none), Some(Key::Pause));
        assert_eq!(map_key(KeyCode::Esc, none), Some(Key::Quit));
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Key::Quit));
        assert_eq!(map_key(KeyCode::Char('a'), KeyModifiers::CONTROL), None);
        assert_eq!(map_key(KeyCode::Char('x'), none), None);
    }

    fn press_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drain(manager: &mut InputManager) -> Vec<KeyTransition> {
        std::mem::take(&mut manager.transitions)
    }

    #[test]
    fn test_manager_emits_transitions() {
        let now = Instant::now();
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press_event(KeyCode::Char(' ')), now);
        manager.handle_key_event(
            KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release),
            now,
        );
        assert_eq!(
            drain(&mut manager),
            vec![
                KeyTransition::press(Key::Fire),
                KeyTransition::release(Key::Fire)
            ]
        );
        assert!(!manager.interrupted());

        manager.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
        assert!(manager.interrupted());
    }

    #[test]
    fn test_one_shot_keys_come_back_up_without_release_events() {
        let now = Instant::now();
        let mut manager = InputManager::new(false);
        manager.handle_key_event(press_event(KeyCode::Char('p')), now);
        manager.handle_key_event(press_event(KeyCode::Up), now);
        assert_eq!(
            drain(&mut manager),
            vec![
                KeyTransition::press(Key::Pause),
                KeyTransition::release(Key::Pause),
                KeyTransition::press(Key::Jump),
                KeyTransition::release(Key::Jump),
            ]
        );

        let mut input = InputState::new();
        manager.handle_key_event(press_event(KeyCode::Char('p')), now);
        input.apply_all(drain(&mut manager));
        assert!(input.just_pressed(Key::Pause));
        input.end_frame();
        manager.handle_key_event(press_event(KeyCode::Char('p')), now);
        input.apply_all(drain(&mut manager));
        assert!(input.just_pressed(Key::Pause));
    }

    #[test]
    fn test_unreleased_direction_replaces_opposite() {
        let now = Instant::now();
        let mut manager = InputManager::new(false);
        manager.handle_key_event(press_event(KeyCode::Left), now);
        // Auto-repeat while held is not a second press
        manager.handle_key_event(press_event(KeyCode::Left), now + Duration::from_millis(30));
        assert_eq!(drain(&mut manager), vec![KeyTransition::press(Key::Left)]);

        manager.handle_key_event(press_event(KeyCode::Right), now + Duration::from_millis(60));
        assert_eq!(
            drain(&mut manager),
            vec![
                KeyTransition::release(Key::Left),
                KeyTransition::press(Key::Right)
            ]
        );
    }

    #[test]
    fn test_unreleased_hold_expires_when_repeat_stops() {
        let now = Instant::now();
        let mut manager = InputManager::new(false);
        manager.handle_key_event(press_event(KeyCode::Char(' ')), now);
        drain(&mut manager);

        let timeout = Duration::from_millis(HELD_KEY_TIMEOUT_MS);
        manager.handle_key_event(press_event(KeyCode::Char(' ')), now + timeout / 2);
        manager.expire_held(now + timeout);
        assert!(drain(&mut manager).is_empty());

        manager.expire_held(now + timeout / 2 + timeout);
        assert_eq!(drain(&mut manager), vec![KeyTransition::release(Key::Fire)]);
        manager.expire_held(now + timeout * 4);
        assert!(drain(&mut manager).is_empty());
    }

    #[test]
    fn test_press_only_terminal_drives_game() {
        use crate::config::GameConfig;
        use crate::driver::FrameTime;
        use crate::entities::Facing;
        use crate::game::Game;
        use crate::scene::Scene;
        use crate::score::MemoryHighScoreStore;

        const FRAME: FrameTime = FrameTime { dt: 1.0 / 60.0, wall_ms: 16 };

        let config = GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        };
        let mut game = Game::new(&config, Box::new(MemoryHighScoreStore::default()));
        let mut manager = InputManager::new(false);
        let start = Instant::now();
        let mut tap = |game: &mut Game, code: KeyCode, at_ms: u64| {
            let now = start + Duration::from_millis(at_ms);
            manager.handle_key_event(press_event(code), now);
            manager.expire_held(now);
            game.input_mut().apply_all(drain(&mut manager));
            game.tick(FRAME);
        };

        tap(&mut game, KeyCode::Enter, 0);
        assert_eq!(game.scene(), Scene::Playing);
        tap(&mut game, KeyCode::Char('p'), 100);
        assert_eq!(game.scene(), Scene::Paused);
        for _ in 0..5 {
            game.tick(FRAME);
        }
        tap(&mut game, KeyCode::Char('p'), 200);
        assert_eq!(game.scene(), Scene::Playing);

        tap(&mut game, KeyCode::Left, 300);
        assert_eq!(game.player().facing, Facing::Left);
        tap(&mut game, KeyCode::Right, 350);
        assert_eq!(game.player().facing, Facing::Right);
        assert!(game.input_mut().is_held(Key::Right));
        assert!(!game.input_mut().is_held(Key::Left));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn key() -> impl Strategy<Value = Key> {
            prop::sample::select(vec![
                Key::Left,
                Key::Right,
                Key::Jump,
                Key::Fire,
                Key::Confirm,
                Key::Pause,
                Key::Restart,
                Key::Quit,
            ])
        }

        proptest! {
            #[test]
            fn test_held_matches_last_transition(
                events in prop::collection::vec((key(), any::<bool>()), 0..64)
            ) {
                let mut input = InputState::new();
                for &(key, pressed) in &events {
                    input.apply(KeyTransition { key, pressed });
                }
                for (key, _) in &events {
                    let last = events.iter().rev().find(|(k, _)| k == key).map(|(_, p)| *p);
                    prop_assert_eq!(Some(input.is_held(*key)), last);
                }
            }
        }
    }
}
