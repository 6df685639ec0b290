#![forbid(unsafe_code)]

//! Touch routing and frame driving for a [`SheetBehavior`] over a
//! [`ScriptedHost`].
//!
//! [`TouchDispatcher`] routes a pointer stream the way a container view
//! does: the sheet sees every event in its intercept hook until it claims the
//! stream, after which events go straight to its touch handler. When the list
//! owns the stream, the dispatcher plays the list's part in nested scrolling:
//! it starts a nested scroll once the pointer passes the slop, offers every
//! delta to the sheet before scrolling the content with what is left, and
//! stops the nested scroll when the pointer lifts.

use std::time::Duration;

use tracing::trace;

use anchorsheet_behavior::{SheetBehavior, SheetHost};
use anchorsheet_core::event::{PointerEvent, PointerKind, ScrollAxes};

use crate::host::{LIST_VIEW, SHEET_VIEW, ScriptedHost};

/// One animation frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// Frame budget for [`drive_to_rest`] before giving up.
pub const MAX_FRAMES: usize = 600;

/// Who currently owns the pointer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// No sequence in progress, or nobody wanted it.
    #[default]
    Idle,
    /// The list owns the stream; the sheet still intercepts.
    List,
    /// The sheet claimed the stream.
    Sheet,
}

/// Routes pointer events between the sheet and its list.
#[derive(Debug, Clone, Default)]
pub struct TouchDispatcher {
    route: Route,
    start_y: f32,
    last_y: f32,
    nested: bool,
}

impl TouchDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Whether the list has a nested scroll running.
    #[must_use]
    pub fn nested_scroll_active(&self) -> bool {
        self.nested
    }

    /// Dispatch a whole script.
    pub fn run(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, events: &[PointerEvent]) {
        for event in events {
            self.dispatch(sheet, host, event);
        }
    }

    /// Dispatch one event.
    pub fn dispatch(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, event: &PointerEvent) {
        match event.kind {
            PointerKind::Down => self.down(sheet, host, event),
            PointerKind::Move => self.moved(sheet, host, event),
            PointerKind::Up | PointerKind::Cancel => self.end(sheet, host, event),
        }
        trace!(kind = ?event.kind, y = event.y, route = ?self.route, "dispatched");
    }

    fn down(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, event: &PointerEvent) {
        self.route = Route::Idle;
        self.nested = false;
        self.start_y = event.y;
        self.last_y = event.y;

        if sheet.on_intercept_touch(host, event) {
            sheet.on_touch(host, event);
            self.route = Route::Sheet;
            return;
        }
        let on_list = host
            .scroll_child()
            .is_some_and(|list| list.bounds.contains(event.x, event.y));
        if on_list {
            self.route = Route::List;
        } else if sheet.on_touch(host, event) {
            self.route = Route::Sheet;
        }
    }

    fn moved(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, event: &PointerEvent) {
        match self.route {
            Route::Idle => {}
            Route::Sheet => {
                sheet.on_touch(host, event);
            }
            Route::List => {
                if sheet.on_intercept_touch(host, event) {
                    // The list loses the stream mid-gesture.
                    self.stop_nested(sheet, host);
                    self.route = Route::Sheet;
                    return;
                }
                self.scroll_list(sheet, host, event.y);
            }
        }
    }

    fn end(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, event: &PointerEvent) {
        match self.route {
            Route::Idle => {}
            Route::Sheet => {
                sheet.on_touch(host, event);
            }
            Route::List => {
                sheet.on_intercept_touch(host, event);
                if self.nested && event.kind == PointerKind::Up {
                    let claimed = sheet.on_nested_pre_fling(host, LIST_VIEW);
                    trace!(claimed, "nested pre-fling");
                }
                self.stop_nested(sheet, host);
            }
        }
        self.route = Route::Idle;
    }

    fn scroll_list(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost, y: f32) {
        if !self.nested {
            let slop = sheet.config().gesture.touch_slop;
            if (self.start_y - y).abs() <= slop {
                return;
            }
            self.nested =
                sheet.on_start_nested_scroll(host, LIST_VIEW, SHEET_VIEW, ScrollAxes::VERTICAL);
        }

        let dy = (self.last_y - y).round() as i32;
        if dy == 0 {
            return;
        }
        self.last_y -= dy as f32;
        let consumed = if self.nested {
            sheet.on_nested_pre_scroll(host, LIST_VIEW, dy)
        } else {
            0
        };
        host.scroll_content(dy - consumed);
    }

    fn stop_nested(&mut self, sheet: &mut SheetBehavior, host: &mut ScriptedHost) {
        if self.nested {
            sheet.on_stop_nested_scroll(host, LIST_VIEW);
            self.nested = false;
        }
    }
}

/// Outcome of [`drive_to_rest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRun {
    pub frames: usize,
    pub settled: bool,
}

/// Tick frames until the settle finishes or `max_frames` pass.
pub fn drive_to_rest<H: SheetHost>(
    sheet: &mut SheetBehavior,
    host: &mut H,
    frame: Duration,
    max_frames: usize,
) -> FrameRun {
    let mut frames = 0;
    while frames < max_frames {
        let moving = sheet.tick(host, frame);
        frames += 1;
        if !moving {
            return FrameRun {
                frames,
                settled: true,
            };
        }
    }
    FrameRun {
        frames,
        settled: !sheet.is_settling(),
    }
}

/// [`drive_to_rest`] at 60 Hz with the default frame budget.
pub fn settle<H: SheetHost>(sheet: &mut SheetBehavior, host: &mut H) -> FrameRun {
    drive_to_rest(sheet, host, FRAME, MAX_FRAMES)
}
