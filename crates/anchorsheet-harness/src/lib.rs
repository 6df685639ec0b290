#![forbid(unsafe_code)]

//! Test harness for anchorsheet.
//!
//! - [`host::ScriptedHost`]: in-memory sheet with a header strip and a list.
//! - [`driver::TouchDispatcher`]: container-style touch routing, including the
//!   list's side of nested scrolling.
//! - [`gesture`]: pointer scripts on a virtual clock and seeded gesture storms.
//! - [`recorder::SheetRecorder`]: listener log with JSONL export.

pub mod driver;
pub mod gesture;
pub mod host;
pub mod recorder;

pub use driver::{FrameRun, Route, TouchDispatcher, drive_to_rest, settle};
pub use gesture::{GestureScript, gesture_storm, tap};
pub use host::ScriptedHost;
pub use recorder::{SheetRecord, SheetRecorder};
