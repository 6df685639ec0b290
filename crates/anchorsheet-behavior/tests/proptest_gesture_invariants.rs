#![forbid(unsafe_code)]

//! Property tests: random gesture storms never break the state machine.
//!
//! Run:
//!   cargo test -p anchorsheet-behavior --test proptest_gesture_invariants

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use anchorsheet_behavior::{SavedState, SheetBehavior};
use anchorsheet_core::config::{SheetConfig, SheetFlags};
use anchorsheet_core::event::PointerKind;
use anchorsheet_core::geometry::GeometryConfig;
use anchorsheet_core::state::{SheetState, StableState, StateOrder};
use anchorsheet_harness::{ScriptedHost, TouchDispatcher, gesture_storm, settle};

fn config_strategy() -> impl Strategy<Value = SheetConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(StateOrder::standard()),
            Just(StateOrder::tablet()),
            Just(StateOrder::custom(vec![StableState::Collapsed, StableState::Expanded]).unwrap()),
        ],
        40..=300i32,
    )
        .prop_map(|(hideable, locked, order, peek)| {
            let locked = locked && order.contains(StableState::Collapsed);
            SheetConfig::default()
                .with_order(order)
                .with_geometry(GeometryConfig::default().with_peek_height(peek))
                .with_flags(SheetFlags {
                    hideable,
                    locked_to_collapsed: locked,
                    ..SheetFlags::default()
                })
        })
}

fn laid_out(config: SheetConfig, host: &mut ScriptedHost) -> SheetBehavior {
    let mut sheet = SheetBehavior::new(config).expect("valid config");
    sheet.restore_state(SavedState::new(SheetState::Collapsed));
    let layout = host.layout();
    sheet.on_layout(host, layout).expect("valid layout");
    sheet
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn storms_keep_sheet_in_bounds_and_reachable(
        config in config_strategy(),
        seed in any::<u64>(),
        frames_between in 0usize..30,
    ) {
        let mut host = ScriptedHost::phone().with_header_height(60);
        let mut sheet = laid_out(config.clone(), &mut host);
        let offsets = *sheet.offsets().unwrap();
        let order = config.order.clone();

        let heard = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&heard);
        sheet.subscribe_state(move |s| log.borrow_mut().push(s));
        let progress = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&progress);
        sheet.subscribe_slide(move |p| log.borrow_mut().push(p));

        let lowest = if config.flags.hideable {
            offsets.hidden_offset()
        } else {
            offsets.max_offset()
        };

        let mut dispatcher = TouchDispatcher::new();
        for event in gesture_storm(seed, 12, 400, 1000) {
            dispatcher.dispatch(&mut sheet, &mut host, &event);
            let top = host.top();
            prop_assert!(top >= offsets.min_offset() && top <= lowest,
                "top {} outside [{}, {}]", top, offsets.min_offset(), lowest);
            if event.kind == PointerKind::Up || event.kind == PointerKind::Cancel {
                for _ in 0..frames_between {
                    sheet.tick(&mut host, anchorsheet_harness::driver::FRAME);
                }
            }
        }

        let run = settle(&mut sheet, &mut host);
        prop_assert!(run.settled);
        let state = sheet.state();
        let stable = state.as_stable();
        prop_assert!(stable.is_some(), "not at rest: {}", state);
        let stable = stable.unwrap();
        prop_assert!(order.contains(stable), "{} unreachable", stable);
        prop_assert_eq!(host.top(), offsets.top_for(stable));
        prop_assert!(order.contains(sheet.last_stable_state()));

        for s in heard.borrow().iter() {
            prop_assert!(order.contains(*s), "listener heard unreachable {}", s);
        }
        for p in progress.borrow().iter() {
            prop_assert!((-1.0..=1.0).contains(p), "progress {}", p);
        }
    }

    #[test]
    fn set_state_to_current_is_silent(
        config in config_strategy(),
        target in prop_oneof![
            Just(SheetState::Collapsed),
            Just(SheetState::AnchorPoint),
            Just(SheetState::Expanded),
        ],
    ) {
        let mut host = ScriptedHost::phone();
        let mut sheet = laid_out(config, &mut host);
        sheet.set_state(&mut host, target).unwrap();
        settle(&mut sheet, &mut host);

        let heard = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&heard);
        sheet.subscribe_state(move |s| log.borrow_mut().push(s));
        host.clear_moves();

        sheet.set_state(&mut host, target).unwrap();
        prop_assert!(!sheet.is_settling());
        settle(&mut sheet, &mut host);
        prop_assert!(heard.borrow().is_empty());
        prop_assert!(host.moves().is_empty());
    }
}
