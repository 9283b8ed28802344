//! Pointer input
//!
//! Each control channel holds at most one active point. A press drives both
//! channels so the shield follows the same finger as the ship; a release
//! clears them explicitly.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Steers the ship and triggers fire
    Primary,
    /// Steers the shield
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Vec2),
    Moved(Vec2),
    Released,
}

/// Latest active point per channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub primary: Option<Vec2>,
    pub secondary: Option<Vec2>,
    /// Set once the ship is destroyed; all pointer input is ignored afterwards
    inert: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: PointerEvent) {
        if self.inert {
            return;
        }
        match event {
            PointerEvent::Pressed(p) => {
                self.primary = Some(p);
                self.secondary = Some(p);
            }
            // Moves only update channels that are tracking a pointer
            PointerEvent::Moved(p) => {
                if self.primary.is_some() {
                    self.primary = Some(p);
                }
                if self.secondary.is_some() {
                    self.secondary = Some(p);
                }
            }
            PointerEvent::Released => self.release_all(),
        }
    }

    /// Drive one channel directly
    pub fn set(&mut self, channel: Channel, point: Option<Vec2>) {
        if self.inert {
            return;
        }
        match channel {
            Channel::Primary => self.primary = point,
            Channel::Secondary => self.secondary = point,
        }
    }

    pub fn point(&self, channel: Channel) -> Option<Vec2> {
        match channel {
            Channel::Primary => self.primary,
            Channel::Secondary => self.secondary,
        }
    }

    pub fn release_all(&mut self) {
        self.primary = None;
        self.secondary = None;
    }

    /// Drop all points and ignore future events
    pub fn disconnect(&mut self) {
        self.release_all();
        self.inert = true;
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_drives_both_channels() {
        let mut input = InputState::new();
        input.apply(PointerEvent::Pressed(Vec2::new(1.0, 2.0)));
        assert_eq!(input.point(Channel::Primary), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(input.point(Channel::Secondary), Some(Vec2::new(1.0, 2.0)));

        input.apply(PointerEvent::Moved(Vec2::new(3.0, 4.0)));
        assert_eq!(input.primary, Some(Vec2::new(3.0, 4.0)));

        input.apply(PointerEvent::Released);
        assert_eq!(input.primary, None);
        assert_eq!(input.secondary, None);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut input = InputState::new();
        input.apply(PointerEvent::Moved(Vec2::new(3.0, 4.0)));
        assert_eq!(input.primary, None);
    }

    #[test]
    fn test_disconnected_input_is_inert() {
        let mut input = InputState::new();
        input.apply(PointerEvent::Pressed(Vec2::ONE));
        input.disconnect();
        assert_eq!(input.primary, None);
        input.apply(PointerEvent::Pressed(Vec2::ONE));
        input.set(Channel::Primary, Some(Vec2::ONE));
        assert_eq!(input.primary, None);
        assert!(input.is_inert());
    }
}
