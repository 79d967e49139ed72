// Keyboard debounce and hold-to-repeat handling
//
// Terminals differ in whether they deliver key release events and how
// they auto-repeat held keys. This tracker normalizes both: action keys
// fire once per physical press, navigation keys fire immediately and
// then repeat at a fixed rate while held.
//
// Chat typing does not go through this tracker - the event loop feeds
// printable characters straight into the input box.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Re-trigger window for terminals that never send Release events
const PRESS_DEBOUNCE: Duration = Duration::from_millis(150);
/// Hold time before a navigation key starts repeating
const REPEAT_DELAY: Duration = Duration::from_millis(500);
/// Repeat rate once a navigation key is held
const REPEAT_RATE: Duration = Duration::from_millis(50);

/// How a key reacts to being held down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    /// Fires once per physical press (Enter, Tab, F-keys, letters, digits)
    Single,
    /// Fires on press, then repeats while held (page flipping)
    Repeating,
}

fn behavior_for(key: KeyCode) -> Behavior {
    match key {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => Behavior::Repeating,
        _ => Behavior::Single,
    }
}

/// Per-key hold tracking
#[derive(Debug, Default)]
struct Held {
    since: Option<Instant>,
    last_fire: Option<Instant>,
}

/// Tracks pressed keys and decides when a press event becomes an action
#[derive(Debug, Default)]
pub struct InputHandler {
    held: HashMap<KeyCode, Held>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press event. Returns true when the action should fire.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        let state = self.held.entry(key).or_default();

        let Some(since) = state.since else {
            // Fresh press always fires
            state.since = Some(now);
            state.last_fire = Some(now);
            return true;
        };

        let last = state.last_fire.unwrap_or(since);
        let fire = match behavior_for(key) {
            // Terminals without release events keep re-sending Press;
            // a long-enough gap counts as a new physical press
            Behavior::Single => now.duration_since(last) >= PRESS_DEBOUNCE,
            Behavior::Repeating => {
                now.duration_since(since) >= REPEAT_DELAY
                    && now.duration_since(last) >= REPEAT_RATE
            }
        };
        if fire {
            state.last_fire = Some(now);
        }
        fire
    }

    /// Record a release event, re-arming the key
    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn action_key_fires_once_per_press() {
        let mut handler = InputHandler::new();

        assert!(handler.handle_key_press(KeyCode::Enter));
        // Held: repeated press events are swallowed
        assert!(!handler.handle_key_press(KeyCode::Enter));
        assert!(!handler.handle_key_press(KeyCode::Enter));

        handler.handle_key_release(KeyCode::Enter);
        assert!(handler.handle_key_press(KeyCode::Enter));
    }

    #[test]
    fn action_key_refires_after_debounce_without_release() {
        let mut handler = InputHandler::new();

        assert!(handler.handle_key_press(KeyCode::Tab));
        assert!(!handler.handle_key_press(KeyCode::Tab));

        thread::sleep(PRESS_DEBOUNCE + Duration::from_millis(10));
        assert!(handler.handle_key_press(KeyCode::Tab));
    }

    #[test]
    fn navigation_key_repeats_after_delay() {
        let mut handler = InputHandler::new();

        // Fires immediately, then waits out the hold delay
        assert!(handler.handle_key_press(KeyCode::Right));
        assert!(!handler.handle_key_press(KeyCode::Right));

        thread::sleep(REPEAT_DELAY + Duration::from_millis(20));
        assert!(handler.handle_key_press(KeyCode::Right));

        // Within the repeat rate window: nothing
        assert!(!handler.handle_key_press(KeyCode::Right));
        thread::sleep(REPEAT_RATE + Duration::from_millis(20));
        assert!(handler.handle_key_press(KeyCode::Right));
    }
}
