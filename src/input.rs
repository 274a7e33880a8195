//! Input source: raw terminal key events in, one `InputFrame` per tick out.
//!
//! Input model: instead of acting on each key event individually, the
//! tracker records the frame of the last press/repeat event for every key.
//! A key counts as held while that frame is within `hold_window` frames of
//! the current one, or until its release event on terminals that report
//! releases (kitty keyboard protocol).  Classic terminals only send repeated
//! `Press` events while a key is down; the window is shorter than the OS
//! repeat interval, so the key stays live while it keeps repeating.
//!
//! Shoot and quit are edge-triggered: every press event counts once.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys are held for ≈133 ms after their last press/repeat event.
const HOLD_WINDOW_MS: u64 = 133;

/// What the simulation sees of the player's input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Shoot triggers received since the previous tick.
    pub shoot: u32,
    pub quit: bool,
}

pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    hold_window: u64,
    pending_shots: u32,
    quit: bool,
}

impl KeyTracker {
    pub fn new(tick_rate: u32) -> Self {
        let hold_window = (u64::from(tick_rate) * HOLD_WINDOW_MS / 1000).max(1);
        Self {
            key_frame: HashMap::new(),
            frame: 0,
            hold_window,
            pending_shots: 0,
            quit: false,
        }
    }

    pub fn hold_window(&self) -> u64 {
        self.hold_window
    }

    /// Feed one raw event.  Anything that is not a key event is ignored.
    pub fn handle(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            log::trace!("ignoring non-key event {event:?}");
            return;
        };
        let code = normalise(*code);

        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('f') => self.pending_shots += 1,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Snapshot the input for the current tick, consume the one-shot
    /// triggers, and move on to the next frame.
    pub fn next_frame(&mut self) -> InputFrame {
        let input = InputFrame {
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            jump: self.is_held(KeyCode::Char(' ')),
            shoot: std::mem::take(&mut self.pending_shots),
            quit: std::mem::take(&mut self.quit),
        };
        self.frame += 1;
        input
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }
}

/// Letter keys are tracked case-insensitively.
fn normalise(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn hold_window_scales_with_tick_rate() {
        assert_eq!(KeyTracker::new(60).hold_window(), 7);
        assert_eq!(KeyTracker::new(30).hold_window(), 3);
        assert_eq!(KeyTracker::new(1).hold_window(), 1);
    }

    #[test]
    fn pressed_key_is_held_until_window_expires() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&press(KeyCode::Left));
        for _ in 0..=keys.hold_window() {
            assert!(keys.next_frame().left);
        }
        assert!(!keys.next_frame().left);
    }

    #[test]
    fn release_drops_key_immediately() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&press(KeyCode::Right));
        assert!(keys.next_frame().right);
        keys.handle(&key(KeyCode::Right, KeyEventKind::Release));
        assert!(!keys.next_frame().right);
    }

    #[test]
    fn repeat_refreshes_hold() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&press(KeyCode::Char(' ')));
        for _ in 0..20 {
            keys.handle(&key(KeyCode::Char(' '), KeyEventKind::Repeat));
            assert!(keys.next_frame().jump);
        }
    }

    #[test]
    fn letter_keys_are_case_insensitive() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&press(KeyCode::Char('A')));
        keys.handle(&press(KeyCode::Char('d')));
        let input = keys.next_frame();
        assert!(input.left);
        assert!(input.right);
    }

    #[test]
    fn each_shoot_press_counts_once() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&press(KeyCode::Char('f')));
        keys.handle(&press(KeyCode::Char('F')));
        assert_eq!(keys.next_frame().shoot, 2);
        assert_eq!(keys.next_frame().shoot, 0);
    }

    #[test]
    fn quit_keys_raise_quit() {
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let mut keys = KeyTracker::new(60);
            keys.handle(&event);
            assert!(keys.next_frame().quit);
        }
    }

    #[test]
    fn unrelated_events_change_nothing() {
        let mut keys = KeyTracker::new(60);
        keys.handle(&Event::FocusGained);
        keys.handle(&Event::Resize(80, 24));
        keys.handle(&press(KeyCode::Char('z')));
        assert_eq!(keys.next_frame(), InputFrame::default());
    }
}
