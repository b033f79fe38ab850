//! Held-key tracking and event translation for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEventKind};
use log::trace;

use crate::map::{is_quit_request, map_button, map_key, PointerTracker};
use crate::types::{HeldKeys, HostCommand, InputEvent, Key};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state. Terminal auto-repeat refreshes it.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Continuous key state for the driving keys.
#[derive(Debug, Clone)]
pub struct KeyState {
    /// Milliseconds since each key was last seen pressed; `None` when up.
    since_press_ms: [Option<u32>; 4],
    key_release_timeout_ms: u32,
    /// Set once the terminal proves it reports releases; disables the timeout.
    release_events: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            since_press_ms: [None; 4],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    fn slot(key: Key) -> Option<usize> {
        match key {
            Key::Advance | Key::Retreat | Key::RotateLeft | Key::RotateRight => Some(key.index()),
            Key::Start | Key::Quit => None,
        }
    }

    pub fn press(&mut self, key: Key) {
        if let Some(i) = Self::slot(key) {
            self.since_press_ms[i] = Some(0);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.release_events = true;
        if let Some(i) = Self::slot(key) {
            self.since_press_ms[i] = None;
        }
    }

    /// Age held keys; auto-release stale ones when releases are never reported.
    pub fn update(&mut self, elapsed_ms: u32) {
        let timeout = self.key_release_timeout_ms;
        let auto_release = !self.release_events;
        for slot in self.since_press_ms.iter_mut() {
            *slot = slot
                .map(|age| age.saturating_add(elapsed_ms))
                .filter(|&age| !auto_release || age <= timeout);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        Self::slot(key).is_some_and(|i| self.since_press_ms[i].is_some())
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            advance: self.is_held(Key::Advance),
            retreat: self.is_held(Key::Retreat),
            rotate_left: self.is_held(Key::RotateLeft),
            rotate_right: self.is_held(Key::RotateRight),
        }
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates crossterm events into [`InputEvent`]s and tracks held keys.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: KeyState,
    pointer: PointerTracker,
}

impl InputHandler {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            keys: KeyState::new(),
            pointer: PointerTracker::new(cols, rows),
        }
    }

    pub fn held(&self) -> HeldKeys {
        self.keys.held()
    }

    pub fn update(&mut self, elapsed_ms: u32) {
        self.keys.update(elapsed_ms);
    }

    /// Observe host commands as they are applied. A capture change forgets
    /// the last pointer position, so the next motion yields no delta.
    ///
    /// Returns whether the pointer was reset.
    pub fn observe_commands(&mut self, commands: &[HostCommand]) -> bool {
        let capture_changed = commands
            .iter()
            .any(|c| matches!(c, HostCommand::CapturePointer | HostCommand::ReleasePointer));
        if capture_changed {
            self.pointer.reset();
        }
        capture_changed
    }

    /// Translate one terminal event. Resizes return `None`; the caller
    /// handles them for rendering.
    pub fn handle_event(&mut self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    let (dx, dy) = self.pointer.motion(mouse.column, mouse.row)?;
                    if dx == 0.0 && dy == 0.0 {
                        return None;
                    }
                    Some(InputEvent::PointerMotion { dx, dy })
                }
                MouseEventKind::Down(button) => {
                    self.pointer.place(mouse.column, mouse.row);
                    Some(InputEvent::PointerDown {
                        button: map_button(button),
                        pos: self.pointer.to_logical(mouse.column, mouse.row),
                    })
                }
                _ => None,
            },
            Event::Resize(cols, rows) => {
                self.pointer.resize(*cols, *rows);
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if is_quit_request(key) {
            return Some(InputEvent::QuitRequest);
        }
        let mapped = map_key(key.code)?;
        match key.kind {
            KeyEventKind::Press => {
                self.keys.press(mapped);
                trace!("key down: {:?}", mapped);
                Some(InputEvent::KeyDown(mapped))
            }
            KeyEventKind::Repeat => {
                // Keeps the key held; not a new discrete press.
                self.keys.press(mapped);
                None
            }
            KeyEventKind::Release => {
                self.keys.release(mapped);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    };

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_press_holds_until_timeout() {
        let mut ks = KeyState::new().with_key_release_timeout_ms(50);
        ks.press(Key::Advance);
        ks.update(50);
        assert!(ks.held().advance);
        ks.update(1);
        assert!(!ks.held().advance);
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut ks = KeyState::new().with_key_release_timeout_ms(50);
        ks.press(Key::RotateLeft);
        ks.update(40);
        ks.press(Key::RotateLeft);
        ks.update(40);
        assert!(ks.held().rotate_left);
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let mut ks = KeyState::new().with_key_release_timeout_ms(50);
        ks.press(Key::Retreat);
        ks.release(Key::Retreat);
        assert!(!ks.held().retreat);

        ks.press(Key::Advance);
        ks.update(10_000);
        assert!(ks.held().advance);
        ks.release(Key::Advance);
        assert!(!ks.held().any());
    }

    #[test]
    fn test_mode_keys_are_never_held() {
        let mut ks = KeyState::new();
        ks.press(Key::Start);
        ks.press(Key::Quit);
        assert!(!ks.is_held(Key::Start));
        assert_eq!(ks.held(), HeldKeys::NONE);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        assert!(KeyState::new().key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_press_emits_key_down_and_holds() {
        let mut ih = InputHandler::new(80, 24);
        let ev = ih.handle_event(&key(KeyCode::Char('w'), KeyEventKind::Press));
        assert_eq!(ev, Some(InputEvent::KeyDown(Key::Advance)));
        assert!(ih.held().advance);

        assert_eq!(
            ih.handle_event(&key(KeyCode::Char('w'), KeyEventKind::Repeat)),
            None
        );
        assert_eq!(
            ih.handle_event(&key(KeyCode::Char('w'), KeyEventKind::Release)),
            None
        );
        assert!(!ih.held().advance);
    }

    #[test]
    fn test_ctrl_c_is_quit_request() {
        let mut ih = InputHandler::new(80, 24);
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(ih.handle_event(&ev), Some(InputEvent::QuitRequest));
    }

    #[test]
    fn test_mouse_motion_and_click() {
        let mut ih = InputHandler::new(80, 24);
        assert_eq!(ih.handle_event(&mouse(MouseEventKind::Moved, 40, 12)), None);
        assert_eq!(
            ih.handle_event(&mouse(MouseEventKind::Moved, 41, 12)),
            Some(InputEvent::PointerMotion { dx: 10.0, dy: 0.0 })
        );
        let click = ih.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
        assert!(matches!(
            click,
            Some(InputEvent::PointerDown {
                button: crate::types::MouseButton::Primary,
                ..
            })
        ));
        // Click moved the reference point back to column 40.
        assert_eq!(
            ih.handle_event(&mouse(MouseEventKind::Moved, 42, 12)),
            Some(InputEvent::PointerMotion { dx: 20.0, dy: 0.0 })
        );
    }

    #[test]
    fn test_capture_change_resets_pointer() {
        let mut ih = InputHandler::new(80, 24);
        ih.handle_event(&mouse(MouseEventKind::Moved, 10, 10));

        assert!(!ih.observe_commands(&[HostCommand::HidePointer]));
        assert_eq!(
            ih.handle_event(&mouse(MouseEventKind::Moved, 11, 10)),
            Some(InputEvent::PointerMotion { dx: 10.0, dy: 0.0 })
        );

        assert!(ih.observe_commands(&[HostCommand::HidePointer, HostCommand::CapturePointer]));
        // First motion after the capture change has nothing to diff against.
        assert_eq!(ih.handle_event(&mouse(MouseEventKind::Moved, 50, 20)), None);
        assert_eq!(
            ih.handle_event(&mouse(MouseEventKind::Moved, 51, 20)),
            Some(InputEvent::PointerMotion { dx: 10.0, dy: 0.0 })
        );

        assert!(ih.observe_commands(&[HostCommand::ReleasePointer]));
        assert_eq!(ih.handle_event(&mouse(MouseEventKind::Moved, 52, 20)), None);
    }

    #[test]
    fn test_resize_is_not_an_input_event() {
        let mut ih = InputHandler::new(80, 24);
        assert_eq!(ih.handle_event(&Event::Resize(100, 40)), None);
    }
}
