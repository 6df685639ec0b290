#![forbid(unsafe_code)]

//! Records everything a sheet reports to its listeners.
//!
//! # JSONL Schema
//!
//! ```json
//! {"seq":0,"event":"slide","progress":0.05}
//! {"seq":1,"event":"activation","activated":true}
//! {"seq":2,"event":"state","state":"anchor_point"}
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use anchorsheet_behavior::SheetBehavior;
use anchorsheet_core::listener::Subscription;
use anchorsheet_core::state::StableState;

/// One listener notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SheetRecord {
    State { state: StableState },
    Slide { progress: f32 },
    Activation { activated: bool },
}

#[derive(Serialize)]
struct Line<'a> {
    seq: usize,
    #[serde(flatten)]
    record: &'a SheetRecord,
}

/// Subscribes to all three listener kinds and keeps an ordered log.
#[derive(Debug)]
pub struct SheetRecorder {
    records: Rc<RefCell<Vec<SheetRecord>>>,
    subscriptions: Vec<Subscription>,
}

impl SheetRecorder {
    /// Start recording `sheet`.
    #[must_use]
    pub fn attach(sheet: &SheetBehavior) -> Self {
        let records = Rc::new(RefCell::new(Vec::new()));
        let state_log = Rc::clone(&records);
        let slide_log = Rc::clone(&records);
        let activation_log = Rc::clone(&records);
        let subscriptions = vec![
            sheet.subscribe_state(move |state| {
                state_log.borrow_mut().push(SheetRecord::State { state });
            }),
            sheet.subscribe_slide(move |progress| {
                slide_log.borrow_mut().push(SheetRecord::Slide { progress });
            }),
            sheet.subscribe_activation(move |activated| {
                activation_log
                    .borrow_mut()
                    .push(SheetRecord::Activation { activated });
            }),
        ];
        Self {
            records,
            subscriptions,
        }
    }

    /// Stop recording. Already captured records stay.
    pub fn detach(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }

    #[must_use]
    pub fn records(&self) -> Vec<SheetRecord> {
        self.records.borrow().clone()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    #[must_use]
    pub fn states(&self) -> Vec<StableState> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| match r {
                SheetRecord::State { state } => Some(*state),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn slides(&self) -> Vec<f32> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| match r {
                SheetRecord::Slide { progress } => Some(*progress),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn activations(&self) -> Vec<bool> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| match r {
                SheetRecord::Activation { activated } => Some(*activated),
                _ => None,
            })
            .collect()
    }

    /// The log as JSON lines, one record per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let records = self.records.borrow();
        let mut out = String::new();
        for (seq, record) in records.iter().enumerate() {
            out.push_str(&serde_json::to_string(&Line { seq, record })?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Drop for SheetRecorder {
    fn drop(&mut self) {
        self.detach();
    }
}
