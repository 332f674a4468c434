//! Turns winit window events into camera updates.
//!
//! Events arrive between frames; `InputState` buffers them until the next redraw drains a
//! `FrameInput`, so movement is applied once per frame with that frame's delta time.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

use crate::camera::Movement;

/// Pixel scroll deltas (touchpads) are converted to wheel lines at this rate.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Move(Movement),
    ToggleProjection,
    Quit,
}

pub fn action_for(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::KeyW => KeyAction::Move(Movement::Forward),
        KeyCode::KeyS => KeyAction::Move(Movement::Backward),
        KeyCode::KeyA => KeyAction::Move(Movement::Left),
        KeyCode::KeyD => KeyAction::Move(Movement::Right),
        KeyCode::KeyQ => KeyAction::Move(Movement::Up),
        KeyCode::KeyE => KeyAction::Move(Movement::Down),
        KeyCode::KeyP => KeyAction::ToggleProjection,
        KeyCode::Escape => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Converts absolute cursor positions into per-sample offsets.
///
/// The first sample after construction or `reset` only records the position, so entering the
/// window never produces a jump.
#[derive(Debug, Default)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    /// Returns `(x_offset, y_offset)` with y reversed, since screen y grows downward.
    pub fn sample(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let offset = self
            .last
            .map(|(last_x, last_y)| ((x - last_x) as f32, (last_y - y) as f32));
        self.last = Some((x, y));
        offset
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Seconds elapsed between consecutive frames.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// The first tick reports zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        elapsed.as_secs_f32()
    }
}

/// Everything that happened since the previous frame.
#[derive(Debug, Default, PartialEq)]
pub struct FrameInput {
    pub movements: Vec<Movement>,
    /// One entry per cursor sample, in arrival order; pitch is clamped after each.
    pub mouse_offsets: Vec<(f32, f32)>,
    pub scroll: f32,
    pub toggle_projection: bool,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Movement>,
    mouse: MouseTracker,
    mouse_offsets: Vec<(f32, f32)>,
    scroll: f32,
    toggle_projection: bool,
    quit: bool,
}

impl InputState {
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        let Some(action) = action_for(code) else {
            return;
        };
        let pressed = state == ElementState::Pressed;
        match action {
            KeyAction::Move(movement) if pressed => {
                self.held.insert(movement);
            }
            KeyAction::Move(movement) => {
                self.held.remove(&movement);
            }
            // key repeat must not retrigger the toggle
            KeyAction::ToggleProjection if pressed && !repeat => {
                self.toggle_projection = !self.toggle_projection;
            }
            KeyAction::Quit if pressed => self.quit = true,
            _ => (),
        }
    }

    pub fn handle_cursor(&mut self, x: f64, y: f64) {
        if let Some(offset) = self.mouse.sample(x, y) {
            self.mouse_offsets.push(offset);
        }
    }

    pub fn handle_cursor_left(&mut self) {
        self.mouse.reset();
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Focus loss means key releases may never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse.reset();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Held keys stay held; offsets, scroll and the toggle are consumed.
    pub fn drain(&mut self) -> FrameInput {
        let mut movements: Vec<Movement> = self.held.iter().copied().collect();
        movements.sort_by_key(|m| Movement::ALL.iter().position(|a| a == m));
        FrameInput {
            movements,
            mouse_offsets: std::mem::take(&mut self.mouse_offsets),
            scroll: std::mem::take(&mut self.scroll),
            toggle_projection: std::mem::take(&mut self.toggle_projection),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn bindings_cover_every_direction() {
        let bound: HashSet<Movement> = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyQ,
            KeyCode::KeyE,
        ]
        .into_iter()
        .filter_map(|code| match action_for(code) {
            Some(KeyAction::Move(m)) => Some(m),
            _ => None,
        })
        .collect();
        assert_eq!(bound, Movement::ALL.into_iter().collect());
        assert_eq!(action_for(KeyCode::KeyP), Some(KeyAction::ToggleProjection));
        assert_eq!(action_for(KeyCode::Escape), Some(KeyAction::Quit));
        assert_eq!(action_for(KeyCode::KeyZ), None);
    }

    #[test]
    fn first_mouse_sample_is_suppressed() {
        let mut tracker = MouseTracker::default();
        assert_eq!(tracker.sample(400.0, 300.0), None);
        assert_eq!(tracker.sample(410.0, 290.0), Some((10.0, 10.0)));
        tracker.reset();
        assert_eq!(tracker.sample(0.0, 0.0), None);
        assert_eq!(tracker.sample(-5.0, 5.0), Some((-5.0, -5.0)));
    }

    #[test]
    fn held_keys_persist_across_frames() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        input.handle_key(KeyCode::KeyQ, ElementState::Pressed, false);
        assert_eq!(input.drain().movements, vec![Movement::Forward, Movement::Up]);
        assert_eq!(input.drain().movements, vec![Movement::Forward, Movement::Up]);
        input.handle_key(KeyCode::KeyW, ElementState::Released, false);
        assert_eq!(input.drain().movements, vec![Movement::Up]);
        input.release_all();
        assert!(input.drain().movements.is_empty());
    }

    #[test]
    fn toggle_fires_once_per_press() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyP, ElementState::Pressed, false);
        input.handle_key(KeyCode::KeyP, ElementState::Pressed, true);
        input.handle_key(KeyCode::KeyP, ElementState::Pressed, true);
        assert!(input.drain().toggle_projection);
        assert!(!input.drain().toggle_projection);
        input.handle_key(KeyCode::KeyP, ElementState::Released, false);
        assert!(!input.drain().toggle_projection);
    }

    #[test]
    fn two_presses_in_one_frame_cancel() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyP, ElementState::Pressed, false);
        input.handle_key(KeyCode::KeyP, ElementState::Released, false);
        input.handle_key(KeyCode::KeyP, ElementState::Pressed, false);
        input.handle_key(KeyCode::KeyP, ElementState::Released, false);
        assert!(!input.drain().toggle_projection);
    }

    #[test]
    fn offsets_queue_per_sample_then_drain() {
        let mut input = InputState::default();
        input.handle_cursor(100.0, 100.0);
        input.handle_cursor(103.0, 98.0);
        input.handle_cursor(104.0, 90.0);
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)));
        let frame = input.drain();
        assert_eq!(frame.mouse_offsets, vec![(3.0, 2.0), (1.0, 8.0)]);
        assert_eq!(frame.scroll, 3.0);
        assert_eq!(input.drain(), FrameInput::default());
    }

    #[test]
    fn leaving_the_window_avoids_a_jump() {
        let mut input = InputState::default();
        input.handle_cursor(10.0, 10.0);
        input.handle_cursor_left();
        input.handle_cursor(700.0, 500.0);
        assert!(input.drain().mouse_offsets.is_empty());
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputState::default();
        assert!(!input.quit_requested());
        input.handle_key(KeyCode::Escape, ElementState::Pressed, false);
        assert!(input.quit_requested());
    }

    #[test]
    fn clock_starts_at_zero() {
        let mut clock = FrameClock::default();
        let start = Instant::now();
        assert_eq!(clock.tick_at(start), 0.0);
        let dt = clock.tick_at(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
        // a clock that appears to run backwards never yields negative time
        assert_eq!(clock.tick_at(start), 0.0);
    }
}
