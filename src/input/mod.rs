use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

use crate::entity::Steer;

/// A physical input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
}

/// Raw keyboard state. Edge sets hold what changed since the last update tick.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    /// Forget pressed/released edges. Held keys stay held.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    fn any_source(&self, action: A, test: impl Fn(KeyCode) -> bool) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => test(*k),
            })
        })
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.any_source(action, |k| input.is_key_held(k))
    }

    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.any_source(action, |k| input.is_key_released(k))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game bindings ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    TurnLeft,
    TurnRight,
    Pause,
}

impl ActionMap<GameAction> {
    /// Left/right arrows (and A/D) steer, Escape pauses.
    pub fn game_defaults() -> Self {
        let mut map = Self::new();
        map.bind(GameAction::TurnLeft, InputSource::Key(KeyCode::ArrowLeft));
        map.bind(GameAction::TurnLeft, InputSource::Key(KeyCode::KeyA));
        map.bind(GameAction::TurnRight, InputSource::Key(KeyCode::ArrowRight));
        map.bind(GameAction::TurnRight, InputSource::Key(KeyCode::KeyD));
        map.bind(GameAction::Pause, InputSource::Key(KeyCode::Escape));
        map
    }

    /// Turn direction for this tick. Left wins when both are held.
    pub fn steer(&self, input: &InputState) -> Steer {
        match (self.is_held(GameAction::TurnLeft, input), self.is_held(GameAction::TurnRight, input)) {
            (true, _) => Steer::Left,
            (false, true) => Steer::Right,
            (false, false) => Steer::Straight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_edge_once_while_held() {
        let mut input = InputState::new();
        input.press(KeyCode::Escape);
        input.clear_frame_state();
        // Key repeat while still held is not a new press.
        input.press(KeyCode::Escape);
        assert!(input.is_key_held(KeyCode::Escape));
        assert!(!input.is_key_pressed(KeyCode::Escape));
    }

    #[test]
    fn release_is_visible_until_cleared() {
        let map = ActionMap::game_defaults();
        let mut input = InputState::new();
        input.press(KeyCode::Escape);
        input.release(KeyCode::Escape);
        assert!(map.is_released(GameAction::Pause, &input));
        input.clear_frame_state();
        assert!(!map.is_released(GameAction::Pause, &input));
    }

    #[test]
    fn steer_from_held_keys() {
        let map = ActionMap::game_defaults();
        let mut input = InputState::new();
        assert_eq!(map.steer(&input), Steer::Straight);
        input.press(KeyCode::KeyA);
        assert_eq!(map.steer(&input), Steer::Left);
        input.release(KeyCode::KeyA);
        input.press(KeyCode::ArrowRight);
        assert_eq!(map.steer(&input), Steer::Right);
    }

    #[test]
    fn left_wins_when_both_turn_keys_are_held() {
        let map = ActionMap::game_defaults();
        let mut input = InputState::new();
        input.press(KeyCode::ArrowRight);
        input.press(KeyCode::ArrowLeft);
        assert_eq!(map.steer(&input), Steer::Left);
        input.release(KeyCode::ArrowLeft);
        assert_eq!(map.steer(&input), Steer::Right);
    }
}
