#![forbid(unsafe_code)]

//! Pointer gesture scripts and deterministic gesture storms.
//!
//! A [`GestureScript`] is a builder over a virtual clock: each call appends
//! events and advances time, so scripts read like the gesture they describe.
//!
//! ```
//! use anchorsheet_harness::gesture::GestureScript;
//!
//! let events = GestureScript::at(200.0, 950.0)
//!     .drag_to(700.0, 10, 160)
//!     .up()
//!     .build();
//! assert_eq!(events.len(), 12);
//! ```

use anchorsheet_core::event::{PointerEvent, PointerId, PointerKind};

/// Default spacing between generated move events.
pub const FRAME_MS: u64 = 16;

/// Builder for one pointer sequence.
#[derive(Debug, Clone)]
pub struct GestureScript {
    pointer: PointerId,
    x: f32,
    y: f32,
    time_ms: u64,
    events: Vec<PointerEvent>,
}

impl GestureScript {
    /// Start with a pointer-down at `(x, y)`, time 0.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self::at_time(x, y, 0)
    }

    /// Start with a pointer-down at `(x, y)` at `time_ms`.
    #[must_use]
    pub fn at_time(x: f32, y: f32, time_ms: u64) -> Self {
        let mut script = Self {
            pointer: PointerId(0),
            x,
            y,
            time_ms,
            events: Vec::new(),
        };
        script.push(PointerKind::Down);
        script
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        for event in &mut self.events {
            event.pointer_id = pointer;
        }
        self
    }

    /// Move to `y` in `steps` evenly spaced events over `duration_ms`.
    #[must_use]
    pub fn drag_to(mut self, y: f32, steps: u32, duration_ms: u64) -> Self {
        let steps = steps.max(1);
        let from = self.y;
        let start = self.time_ms;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.y = from + (y - from) * t;
            self.time_ms = start + duration_ms * u64::from(i) / u64::from(steps);
            self.push(PointerKind::Move);
        }
        self
    }

    /// Move by `dy` in one event, one frame later.
    #[must_use]
    pub fn move_by(mut self, dy: f32) -> Self {
        self.y += dy;
        self.time_ms += FRAME_MS;
        self.push(PointerKind::Move);
        self
    }

    /// Hold still.
    #[must_use]
    pub fn wait(mut self, ms: u64) -> Self {
        self.time_ms += ms;
        self
    }

    #[must_use]
    pub fn up(mut self) -> Self {
        self.push(PointerKind::Up);
        self
    }

    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.push(PointerKind::Cancel);
        self
    }

    /// Clock value after the last event.
    #[must_use]
    pub fn end_time(&self) -> u64 {
        self.time_ms
    }

    #[must_use]
    pub fn build(self) -> Vec<PointerEvent> {
        self.events
    }

    fn push(&mut self, kind: PointerKind) {
        self.events.push(PointerEvent::new(
            self.pointer,
            kind,
            self.x,
            self.y,
            self.time_ms,
        ));
    }
}

/// A quick press and release at one point.
#[must_use]
pub fn tap(x: f32, y: f32, time_ms: u64) -> Vec<PointerEvent> {
    GestureScript::at_time(x, y, time_ms).wait(60).up().build()
}

// ---------------------------------------------------------------------------
// Storms
// ---------------------------------------------------------------------------

/// xorshift64, enough for reproducible gesture noise.
#[derive(Debug, Clone)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        if max == 0 { 0 } else { self.next() % max }
    }
}

/// `count` complete pointer sequences with random start points, directions,
/// speeds, and endings (up or cancel), back to back on one clock.
#[must_use]
pub fn gesture_storm(seed: u64, count: usize, width: i32, height: i32) -> Vec<PointerEvent> {
    let mut rng = Rng::new(seed);
    let mut events = Vec::new();
    let mut clock = 0u64;
    let width = width.max(1) as u64;
    let height = height.max(1) as u64;

    for _ in 0..count {
        let x = rng.below(width) as f32;
        let y = rng.below(height) as f32;
        let target = rng.below(height) as f32;
        let steps = 1 + rng.below(12) as u32;
        let duration = 20 + rng.below(400);
        let script = GestureScript::at_time(x, y, clock).drag_to(target, steps, duration);
        let script = if rng.below(8) == 0 {
            script.cancel()
        } else {
            script.up()
        };
        clock = script.end_time() + 50 + rng.below(200);
        events.extend(script.build());
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_is_evenly_spaced() {
        let events = GestureScript::at(0.0, 900.0).drag_to(800.0, 4, 64).build();
        let ys: Vec<f32> = events.iter().map(|e| e.y).collect();
        assert_eq!(ys, [900.0, 875.0, 850.0, 825.0, 800.0]);
        let ts: Vec<u64> = events.iter().map(|e| e.time_ms).collect();
        assert_eq!(ts, [0, 16, 32, 48, 64]);
        assert_eq!(events[0].kind, PointerKind::Down);
    }

    #[test]
    fn tap_is_down_then_up() {
        let events = tap(10.0, 20.0, 100);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, PointerKind::Up);
        assert_eq!(events[1].time_ms, 160);
    }

    #[test]
    fn storm_is_deterministic_and_well_formed() {
        let a = gesture_storm(7, 20, 400, 1000);
        let b = gesture_storm(7, 20, 400, 1000);
        assert_eq!(a, b);
        let downs = a.iter().filter(|e| e.kind == PointerKind::Down).count();
        let ends = a.iter().filter(|e| e.ends_sequence()).count();
        assert_eq!(downs, 20);
        assert_eq!(ends, 20);
        assert!(a.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
    }
}
