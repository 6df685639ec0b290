#![forbid(unsafe_code)]

//! The sheet drag/settle state machine.
//!
//! [`SheetBehavior`] owns the current state, the last stable state, the
//! resolved offsets and the sheet top. Every input (pointer event, nested
//! scroll callback, programmatic request, animation frame) is handled
//! synchronously against a [`SheetHost`] borrowed for that call.
//!
//! ```text
//!              pointer capture / nested scroll
//!   stable ───────────────────────────────────────▶ Dragging
//!     ▲  ▲                                             │
//!     │  │ start == target       release / scroll stop │
//!     │  └───────────────────────────────┐             ▼
//!     │                                  └──────── resolve target
//!     │            settle finished                     │
//!     └──────────────────────────────── Settling ◀─────┘
//! ```
//!
//! # Input channels
//!
//! - **Direct drag**: `on_intercept_touch` decides whether the sheet takes a
//!   pointer stream away from its children; `on_touch` moves the sheet while
//!   it follows a pointer and resolves the release.
//! - **Nested scroll**: the scrolling child offers each delta through
//!   `on_nested_pre_scroll` before scrolling itself, and the sheet consumes
//!   what it needs. `on_stop_nested_scroll` resolves the target.
//!
//! Only one channel drives the sheet per gesture: a nested scroll in progress
//! blocks pointer capture, and a pointer capture makes nested deltas no-ops.
//!
//! # Invariants
//!
//! 1. State listeners only ever hear stable states, once per change.
//! 2. `last_stable_state()` is always a stable state, and every stable state
//!    the machine commits becomes the last stable state.
//! 3. At most one settle is in flight. A new request, a pointer capture, or a
//!    nested scroll that moves the sheet replaces it.
//! 4. Activation listeners hear only changes of the activation flag.
//!
//! # Failure Modes
//!
//! - Invalid configuration fails at construction ([`SheetError::Config`]).
//! - Invalid geometry fails at layout ([`SheetError::Geometry`]).
//! - A transient state passed to `set_state` is [`SheetError::InvalidState`].
//! - Missing views (detached sheet or scroll child) make the affected input a
//!   no-op.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use anchorsheet_core::SheetError;
use anchorsheet_core::animation::SettleDriver;
use anchorsheet_core::config::SheetConfig;
use anchorsheet_core::event::{PointerEvent, PointerKind, ScrollAxes, ViewId};
use anchorsheet_core::geometry::{LayoutInput, SheetOffsets};
use anchorsheet_core::listener::{
    ActivationListener, ListenerRegistry, SlideListener, StateListener, Subscription,
};
use anchorsheet_core::state::{SheetState, StableState};

use crate::activation::ActivationTracker;
use crate::host::SheetHost;
use crate::release::{self, ScrollStop};
use crate::saved_state::SavedState;
use crate::session::{DragCapture, GestureSession, TapCandidate};

/// Drag/settle coordinator for one sheet.
#[derive(Debug)]
pub struct SheetBehavior {
    config: SheetConfig,
    state: SheetState,
    last_stable: StableState,
    offsets: Option<SheetOffsets>,
    top: i32,
    session: GestureSession,
    settle: Option<SettleDriver>,
    pending: Option<StableState>,
    activation: ActivationTracker,
    nested_accept: FxHashMap<(ViewId, ViewId), bool>,
    state_listeners: ListenerRegistry<StateListener>,
    slide_listeners: ListenerRegistry<SlideListener>,
    activation_listeners: ListenerRegistry<ActivationListener>,
}

impl SheetBehavior {
    /// Create a hidden sheet. The configuration is validated first.
    pub fn new(config: SheetConfig) -> Result<Self, SheetError> {
        let config = config.validated()?;
        Ok(Self {
            activation: ActivationTracker::new(config.activation),
            config,
            state: SheetState::Hidden,
            last_stable: StableState::Hidden,
            offsets: None,
            top: 0,
            session: GestureSession::default(),
            settle: None,
            pending: None,
            nested_accept: FxHashMap::default(),
            state_listeners: ListenerRegistry::new(),
            slide_listeners: ListenerRegistry::new(),
            activation_listeners: ListenerRegistry::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SheetState {
        self.state
    }

    #[must_use]
    pub fn last_stable_state(&self) -> StableState {
        self.last_stable
    }

    /// Current sheet top, or `None` before the first layout.
    #[must_use]
    pub fn top(&self) -> Option<i32> {
        self.offsets.map(|_| self.top)
    }

    /// Offsets from the last layout.
    #[must_use]
    pub fn offsets(&self) -> Option<&SheetOffsets> {
        self.offsets.as_ref()
    }

    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activation.is_activated()
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// A `set_state` waiting for the pending layout pass.
    #[must_use]
    pub fn pending_state(&self) -> Option<StableState> {
        self.pending
    }

    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Hear every stable state the sheet comes to rest in.
    pub fn subscribe_state(&self, listener: impl Fn(StableState) + 'static) -> Subscription {
        self.state_listeners.subscribe_fn(listener)
    }

    /// Hear slide progress whenever the sheet moves.
    pub fn subscribe_slide(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        self.slide_listeners.subscribe_fn(listener)
    }

    /// Hear activation flag changes.
    pub fn subscribe_activation(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        self.activation_listeners.subscribe_fn(listener)
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Resolve offsets for a layout pass and position the sheet.
    ///
    /// Stable states snap to their rest offset. While dragging or settling
    /// the sheet keeps its top (clamped to the new range) and an in-flight
    /// settle is retargeted. A `set_state` deferred for this layout starts
    /// afterwards.
    pub fn on_layout<H: SheetHost>(
        &mut self,
        host: &mut H,
        layout: LayoutInput,
    ) -> Result<(), SheetError> {
        let offsets = SheetOffsets::resolve(&self.config.geometry, &layout)?;
        self.offsets = Some(offsets);

        let top = match self.state.as_stable() {
            Some(stable) => offsets.top_for(stable),
            None => offsets.clamp_drag(self.top, self.config.flags.hideable),
        };
        debug!(
            state = %self.state,
            top,
            min = offsets.min_offset(),
            anchor = offsets.anchor_offset(),
            max = offsets.max_offset(),
            hidden = offsets.hidden_offset(),
            "layout resolved"
        );
        self.top = top;
        host.move_sheet_to(top);
        self.refresh_activation();

        if let Some(driver) = &self.settle {
            let target = driver.target();
            let target_top = offsets.top_for(target);
            if target_top != driver.target_top() {
                debug!(target = %target, target_top, "settle retargeted");
                self.settle = Some(SettleDriver::new(top, target, target_top, &self.config.settle));
            }
        }

        if let Some(target) = self.pending.take() {
            self.start_settle(target);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Programmatic transitions
    // -----------------------------------------------------------------------

    /// Request a stable state.
    ///
    /// Requests for the current state (or the current settle target) are
    /// no-ops. Before the first layout the state is simply recorded; while a
    /// layout is pending the request waits for it, and a later request
    /// replaces the waiting one. Otherwise the sheet settles to the target,
    /// replacing any settle in flight.
    pub fn set_state<H: SheetHost>(
        &mut self,
        host: &mut H,
        target: SheetState,
    ) -> Result<(), SheetError> {
        let Some(requested) = target.as_stable() else {
            warn!(target = %target, "set_state rejected: transient state");
            return Err(SheetError::InvalidState(target));
        };
        if requested == StableState::Hidden && !self.config.flags.hideable {
            warn!("set_state rejected: sheet is not hideable");
            return Err(SheetError::NotHideable);
        }
        let stable = self.config.order.normalize(requested);

        // Where the sheet ends up without this request, ignoring `pending`.
        let destination = match &self.settle {
            Some(driver) => Some(driver.target()),
            None => self.state.as_stable(),
        };
        match self.pending {
            Some(waiting) if waiting == stable => {
                trace!(target = %stable, "set_state no-op");
                return Ok(());
            }
            Some(waiting) if destination == Some(stable) => {
                debug!(dropped = %waiting, target = %stable, "deferred set_state replaced");
                self.pending = None;
                self.last_stable = stable;
                return Ok(());
            }
            Some(_) => {}
            None if destination == Some(stable) => {
                trace!(target = %stable, "set_state no-op");
                return Ok(());
            }
            None => {}
        }

        if self.session.drag.take().is_some() {
            // The rest of this pointer stream no longer moves the sheet.
            self.session.ignore_events = true;
            debug!("drag dropped for set_state");
        }

        if self.offsets.is_none() {
            debug!(target = %stable, "set_state before first layout");
            self.state = stable.into();
            self.last_stable = stable;
            return Ok(());
        }
        if host.is_layout_pending() {
            debug!(target = %stable, "set_state deferred until layout");
            self.pending = Some(stable);
            self.last_stable = stable;
            return Ok(());
        }

        self.pending = None;
        self.start_settle(stable);
        Ok(())
    }

    /// Advance an in-flight settle by one frame.
    ///
    /// Returns `true` while the sheet is still moving.
    pub fn tick<H: SheetHost>(&mut self, host: &mut H, dt: Duration) -> bool {
        let Some(driver) = self.settle.as_mut() else {
            return false;
        };
        let step = driver.advance(dt);
        let target = driver.target();

        if step.top != self.top {
            self.move_to(host, step.top);
        }
        if step.finished {
            self.settle = None;
            debug!(target = %target, top = step.top, "settle finished");
            self.set_state_internal(target.into());
            return false;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Decide whether the sheet takes the pointer stream from its children.
    ///
    /// Returns `true` when subsequent events of this sequence should go to
    /// [`on_touch`](Self::on_touch).
    pub fn on_intercept_touch<H: SheetHost>(&mut self, host: &mut H, event: &PointerEvent) -> bool {
        if self.config.flags.disable_dragging && self.point_in_sheet(host, event) {
            return true;
        }
        self.track_tap(host, event);

        if !host.sheet_shown() {
            self.session.ignore_events = true;
            return false;
        }
        if event.kind == PointerKind::Down {
            self.session.begin_pointer(event);
        }
        self.session.velocity.add(event.time_ms, event.y);

        match event.kind {
            PointerKind::Up | PointerKind::Cancel => {
                self.session.end_pointer();
                if self.session.ignore_events {
                    self.session.ignore_events = false;
                    return false;
                }
            }
            PointerKind::Down => {
                let on_scroll_child = host
                    .scroll_child()
                    .is_some_and(|child| child.bounds.contains(event.x, event.y));
                if on_scroll_child {
                    self.session.active_pointer = Some(event.pointer_id);
                    self.session.touching_scroll_child = true;
                }
                self.session.ignore_events =
                    self.session.active_pointer.is_none() && !self.point_in_sheet(host, event);
            }
            PointerKind::Move => {}
        }

        if !self.session.ignore_events && self.try_begin_drag(host, event) {
            return true;
        }

        // The sheet may sit under another view; take over moves that pass
        // the slop outside the scrolling content.
        event.kind == PointerKind::Move
            && !self.session.ignore_events
            && self.state != SheetState::Dragging
            && host
                .scroll_child()
                .is_some_and(|child| !child.bounds.contains(event.x, event.y))
            && self.beyond_slop(event)
    }

    /// Handle a pointer event routed to the sheet.
    ///
    /// Returns `true` if the sheet consumed the event.
    pub fn on_touch<H: SheetHost>(&mut self, host: &mut H, event: &PointerEvent) -> bool {
        if self.config.flags.disable_dragging {
            return self.point_in_sheet(host, event);
        }
        if !host.sheet_shown() {
            return false;
        }
        if self.state == SheetState::Dragging && event.kind == PointerKind::Down {
            return true;
        }
        self.track_tap(host, event);

        if event.kind == PointerKind::Down {
            self.session.begin_pointer(event);
            self.session.ignore_events = !self.point_in_sheet(host, event);
        }
        self.session.velocity.add(event.time_ms, event.y);

        match event.kind {
            PointerKind::Move => {
                if let Some(drag) = self.session.drag {
                    if drag.pointer == event.pointer_id {
                        self.drag_to(host, drag, event.y);
                    }
                } else if !self.session.ignore_events
                    && !self.session.nested_scroll_in_progress
                    && self.beyond_slop(event)
                    && self.offsets.is_some()
                    && host.sheet_bounds().is_some()
                {
                    self.capture(event);
                }
            }
            PointerKind::Up | PointerKind::Cancel => {
                if self.session.drag.is_some() {
                    let yvel = if event.kind == PointerKind::Cancel {
                        0.0
                    } else {
                        let gesture = &self.config.gesture;
                        self.session
                            .velocity
                            .fling_velocity(gesture.min_fling_velocity, gesture.max_fling_velocity)
                    };
                    self.release(yvel);
                }
                self.session.end_pointer();
                return !std::mem::take(&mut self.session.ignore_events);
            }
            PointerKind::Down => {}
        }
        !self.session.ignore_events
    }

    // -----------------------------------------------------------------------
    // Nested scroll
    // -----------------------------------------------------------------------

    /// A scrolling descendant is starting a nested scroll.
    ///
    /// Accepts purely vertical scrolls whose direct child belongs to the
    /// sheet. Membership answers are cached per `(target, direct_child)`.
    pub fn on_start_nested_scroll<H: SheetHost>(
        &mut self,
        host: &mut H,
        target: ViewId,
        direct_child: ViewId,
        axes: ScrollAxes,
    ) -> bool {
        let belongs = *self
            .nested_accept
            .entry((target, direct_child))
            .or_insert_with(|| host.view_belongs_to_sheet(direct_child));
        let accept = belongs && axes.is_vertical_only();
        if accept {
            self.session.begin_nested();
        }
        trace!(target = target.0, direct_child = direct_child.0, accept, "nested scroll start");
        accept
    }

    /// Forget cached nested-scroll acceptance decisions.
    pub fn clear_nested_scroll_cache(&mut self) {
        self.nested_accept.clear();
    }

    /// Offer a nested-scroll delta (positive = content scrolling up, sheet
    /// rising). Returns how much of `dy` the sheet consumed.
    pub fn on_nested_pre_scroll<H: SheetHost>(&mut self, host: &mut H, target: ViewId, dy: i32) -> i32 {
        let Some(offsets) = self.offsets else {
            return 0;
        };
        let Some(child) = host.scroll_child() else {
            trace!("nested pre-scroll ignored: no scroll child");
            return 0;
        };
        if child.id != target || dy == 0 || self.session.drag.is_some() {
            return 0;
        }

        let flags = self.config.flags;
        let order = &self.config.order;
        let current = self.top;
        let new_top = current.saturating_sub(dy);
        let anchor = offsets.anchor_offset();

        // One gesture may not carry the sheet across the anchor point.
        let crosses_anchor = (self.last_stable == StableState::Collapsed && new_top < anchor)
            || (self.last_stable == StableState::Expanded && new_top > anchor);
        if crosses_anchor {
            trace!(dy, top = current, anchor, "anchor gate holds the sheet");
            self.session.record_nested(dy);
            return dy;
        }

        // Without a collapsed state the anchor is the floor for scrolling.
        if !order.contains(StableState::Collapsed)
            && self.last_stable == StableState::AnchorPoint
            && new_top > anchor
        {
            self.supersede_settle();
            if current != anchor {
                self.move_to(host, anchor);
            }
            self.session.nested_scrolled = true;
            return dy;
        }

        let consumed = if dy > 0 {
            if new_top < offsets.min_offset() {
                let consumed = current - offsets.min_offset();
                self.supersede_settle();
                if consumed != 0 {
                    self.move_to(host, offsets.min_offset());
                }
                self.commit_or_drag(StableState::Expanded);
                consumed
            } else if flags.locked_to_collapsed && new_top < offsets.max_offset() {
                0
            } else {
                self.supersede_settle();
                self.move_to(host, new_top);
                self.set_state_internal(SheetState::Dragging);
                dy
            }
        } else if host.content_can_scroll_up(child.id) {
            0
        } else if new_top <= offsets.max_offset() || flags.hideable {
            let landed = new_top.min(offsets.hidden_offset());
            self.supersede_settle();
            self.move_to(host, landed);
            self.set_state_internal(SheetState::Dragging);
            current - landed
        } else {
            let consumed = current - offsets.max_offset();
            self.supersede_settle();
            if consumed != 0 {
                self.move_to(host, offsets.max_offset());
            }
            self.commit_or_drag(StableState::Collapsed);
            consumed
        };

        trace!(dy, consumed, top = self.top, "nested pre-scroll");
        if consumed != 0 {
            self.session.record_nested(dy);
        }
        consumed
    }

    /// The nested scroll ended; settle to the resolved target.
    pub fn on_stop_nested_scroll<H: SheetHost>(&mut self, host: &mut H, target: ViewId) {
        let Some(offsets) = self.offsets else {
            self.session.end_nested();
            return;
        };
        if self.settle.is_some() {
            self.session.end_nested();
            return;
        }

        let at_rest_offset = self
            .state
            .as_stable()
            .is_some_and(|s| offsets.top_for(s) == self.top);
        let order = &self.config.order;
        if self.top == offsets.min_offset() && order.contains(StableState::Expanded) {
            if !at_rest_offset {
                self.set_state_internal(SheetState::Expanded);
            }
            self.session.end_nested();
            return;
        }
        if self.top == offsets.max_offset() && order.contains(StableState::Collapsed) {
            if !at_rest_offset {
                self.set_state_internal(SheetState::Collapsed);
            }
            self.session.end_nested();
            return;
        }

        let is_scroll_child = host.scroll_child().is_some_and(|c| c.id == target);
        let moved = self.session.nested_scrolled || !self.state.is_stable();
        if !is_scroll_child || !moved || self.session.drag.is_some() {
            self.session.end_nested();
            return;
        }

        let stop = ScrollStop {
            last_stable: self.last_stable,
            last_dy: self.session.last_nested_dy,
            velocity: self
                .session
                .velocity
                .velocity_capped(self.config.gesture.max_fling_velocity),
            top: self.top,
        };
        let decision = release::resolve_scroll_stop(&self.config, &offsets, &stop);
        debug!(
            top = stop.top,
            last_dy = stop.last_dy,
            velocity = stop.velocity,
            target = %decision.target,
            reason = ?decision.reason,
            "nested scroll stopped"
        );
        self.session.end_nested();
        self.start_settle(decision.target);
    }

    /// A fling is about to start in a nested scroll. Returns `true` to claim
    /// it, which the sheet does unless it is fully expanded.
    pub fn on_nested_pre_fling<H: SheetHost>(&mut self, host: &mut H, target: ViewId) -> bool {
        host.scroll_child().is_some_and(|c| c.id == target) && self.state != SheetState::Expanded
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn save_state(&self) -> SavedState {
        SavedState::new(self.state)
    }

    /// Restore a saved state without animation or notification. The next
    /// layout positions the sheet.
    pub fn restore_state(&mut self, saved: SavedState) {
        let restored = saved.restored(&self.config.order);
        debug!(tag = saved.state, restored = %restored, "state restored");
        self.settle = None;
        self.pending = None;
        self.session = GestureSession::default();
        self.state = restored.into();
        self.last_stable = restored;
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn set_state_internal(&mut self, next: SheetState) {
        if self.state == next {
            return;
        }
        let from = self.state;
        self.state = next;
        debug!(from = %from, to = %next, "state transition");
        if let Some(stable) = next.as_stable() {
            self.last_stable = stable;
            self.state_listeners.notify(stable);
        }
        self.refresh_activation();
    }

    /// Commit `state` if reachable, else keep dragging.
    fn commit_or_drag(&mut self, state: StableState) {
        if self.config.order.contains(state) {
            self.set_state_internal(state.into());
        } else {
            self.set_state_internal(SheetState::Dragging);
        }
    }

    fn start_settle(&mut self, target: StableState) {
        let Some(offsets) = self.offsets else {
            return;
        };
        self.last_stable = target;
        let target_top = offsets.top_for(target);
        if self.top == target_top {
            self.settle = None;
            self.set_state_internal(target.into());
            return;
        }
        debug!(from_top = self.top, to_top = target_top, target = %target, "settle started");
        self.settle = Some(SettleDriver::new(self.top, target, target_top, &self.config.settle));
        self.set_state_internal(SheetState::Settling);
    }

    fn supersede_settle(&mut self) {
        if self.settle.take().is_some() {
            debug!(top = self.top, "settle superseded");
            self.set_state_internal(SheetState::Dragging);
        }
    }

    fn move_to<H: SheetHost>(&mut self, host: &mut H, top: i32) {
        self.top = top;
        host.move_sheet_to(top);
        if let Some(offsets) = self.offsets {
            let progress = offsets.slide_progress(top);
            trace!(top, progress, "sheet moved");
            self.slide_listeners.notify(progress);
        }
        self.refresh_activation();
    }

    fn refresh_activation(&mut self) {
        let Some(offsets) = self.offsets else {
            return;
        };
        if let Some(activated) = self.activation.update(&offsets, self.top, self.state) {
            debug!(activated, top = self.top, "activation changed");
            self.activation_listeners.notify(activated);
        }
    }

    fn point_in_sheet<H: SheetHost>(&self, host: &H, event: &PointerEvent) -> bool {
        host.sheet_bounds()
            .is_some_and(|b| b.contains(event.x, event.y))
    }

    fn beyond_slop(&self, event: &PointerEvent) -> bool {
        (self.session.initial_y - event.y).abs() > self.config.gesture.touch_slop
    }

    fn try_begin_drag<H: SheetHost>(&mut self, host: &mut H, event: &PointerEvent) -> bool {
        if event.kind != PointerKind::Move
            || self.session.drag.is_some()
            || self.session.nested_scroll_in_progress
            || !self.beyond_slop(event)
            || !self.can_capture(host, event)
        {
            return false;
        }
        self.capture(event);
        true
    }

    fn can_capture<H: SheetHost>(&self, host: &H, event: &PointerEvent) -> bool {
        if self.state == SheetState::Dragging
            || self.session.touching_scroll_child
            || self.offsets.is_none()
        {
            return false;
        }
        if self.state == SheetState::Expanded
            && self.session.active_pointer == Some(event.pointer_id)
            && host
                .scroll_child()
                .is_some_and(|c| host.content_can_scroll_up(c.id))
        {
            return false;
        }
        host.sheet_bounds().is_some()
    }

    fn capture(&mut self, event: &PointerEvent) {
        if self.settle.take().is_some() {
            debug!(top = self.top, "settle superseded by drag");
        }
        self.session.tap = None;
        self.session.drag = Some(DragCapture {
            pointer: event.pointer_id,
            grab_y: event.y,
            grab_top: self.top,
        });
        debug!(top = self.top, pointer = event.pointer_id.0, "drag captured");
        self.set_state_internal(SheetState::Dragging);
    }

    fn drag_to<H: SheetHost>(&mut self, host: &mut H, drag: DragCapture, y: f32) {
        let Some(offsets) = self.offsets else {
            return;
        };
        let raw = drag.grab_top.saturating_add((y - drag.grab_y).round() as i32);
        let top = offsets.clamp_drag(raw, self.config.flags.hideable);
        if top != self.top {
            self.move_to(host, top);
        }
    }

    fn release(&mut self, yvel: f32) {
        let Some(offsets) = self.offsets else {
            return;
        };
        self.session.drag = None;
        let decision = release::resolve_release(&self.config, &offsets, self.top, yvel);
        debug!(
            top = self.top,
            velocity = yvel,
            target = %decision.target,
            reason = ?decision.reason,
            "drag released"
        );
        self.start_settle(decision.target);
    }

    /// Tap on the peek strip of a collapsed sheet raises it to the anchor.
    fn track_tap<H: SheetHost>(&mut self, host: &mut H, event: &PointerEvent) {
        let Some(offsets) = self.offsets else {
            return;
        };
        let slop = self.config.gesture.touch_slop;
        match event.kind {
            PointerKind::Down => {
                let in_peek = self.state == SheetState::Collapsed
                    && event.y > offsets.activation_line() as f32;
                self.session.tap = in_peek.then_some(TapCandidate {
                    pointer: event.pointer_id,
                    x: event.x,
                    y: event.y,
                    time_ms: event.time_ms,
                });
            }
            PointerKind::Move => {
                if let Some(tap) = self.session.tap {
                    if (tap.x - event.x).abs() > slop || (tap.y - event.y).abs() > slop {
                        self.session.tap = None;
                    }
                }
            }
            PointerKind::Cancel => self.session.tap = None,
            PointerKind::Up => {
                let Some(tap) = self.session.tap.take() else {
                    return;
                };
                let flags = self.config.flags;
                let is_tap = tap.pointer == event.pointer_id
                    && event.time_ms.saturating_sub(tap.time_ms) <= self.config.gesture.tap_timeout_ms
                    && (tap.x - event.x).abs() <= slop
                    && (tap.y - event.y).abs() <= slop;
                if is_tap
                    && self.state == SheetState::Collapsed
                    && flags.expand_on_tap
                    && !flags.locked_to_collapsed
                {
                    debug!(y = event.y, "tap on peek strip");
                    if let Err(err) = self.set_state(host, SheetState::AnchorPoint) {
                        warn!(%err, "tap expand rejected");
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
