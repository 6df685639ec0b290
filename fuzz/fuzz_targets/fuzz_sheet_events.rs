#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use anchorsheet_behavior::{SavedState, SheetBehavior};
use anchorsheet_core::config::{SheetConfig, SheetFlags};
use anchorsheet_core::event::PointerEvent;
use anchorsheet_core::geometry::{GeometryConfig, LayoutInput};
use anchorsheet_core::state::SheetState;
use anchorsheet_harness::driver::FRAME;
use anchorsheet_harness::{ScriptedHost, TouchDispatcher, settle};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { x: u16, y: u16 },
    Move { x: u16, y: u16 },
    Up { x: u16, y: u16 },
    Cancel,
    Wait { ms: u8 },
    Tick { frames: u8 },
    SetState { state: u8 },
    Relayout { height: u16, child: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    hideable: bool,
    skip_collapsed: bool,
    peek: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = SheetConfig::default()
        .with_geometry(GeometryConfig::default().with_peek_height(i32::from(input.peek) + 40))
        .with_flags(SheetFlags {
            hideable: input.hideable,
            skip_collapsed: input.skip_collapsed,
            ..SheetFlags::default()
        });
    let Ok(mut sheet) = SheetBehavior::new(config) else {
        return;
    };
    let mut host = ScriptedHost::phone();
    sheet.restore_state(SavedState::new(SheetState::Collapsed));
    let layout = host.layout();
    if sheet.on_layout(&mut host, layout).is_err() {
        return;
    }

    let mut dispatcher = TouchDispatcher::new();
    let mut now = 0u64;
    let mut last = (200.0f32, 900.0f32);
    for op in input.ops.iter().take(256) {
        now += 8;
        match *op {
            Op::Down { x, y } => {
                last = (f32::from(x % 400), f32::from(y % 1000));
                dispatcher.dispatch(&mut sheet, &mut host, &PointerEvent::down(last.0, last.1, now));
            }
            Op::Move { x, y } => {
                last = (f32::from(x % 400), f32::from(y % 1000));
                dispatcher.dispatch(&mut sheet, &mut host, &PointerEvent::moved(last.0, last.1, now));
            }
            Op::Up { x, y } => {
                last = (f32::from(x % 400), f32::from(y % 1000));
                dispatcher.dispatch(&mut sheet, &mut host, &PointerEvent::up(last.0, last.1, now));
            }
            Op::Cancel => {
                dispatcher.dispatch(&mut sheet, &mut host, &PointerEvent::cancel(last.0, last.1, now));
            }
            Op::Wait { ms } => now += u64::from(ms),
            Op::Tick { frames } => {
                for _ in 0..frames % 32 {
                    sheet.tick(&mut host, FRAME);
                }
            }
            Op::SetState { state } => {
                let target = match state % 6 {
                    0 => SheetState::Hidden,
                    1 => SheetState::Collapsed,
                    2 => SheetState::AnchorPoint,
                    3 => SheetState::Expanded,
                    4 => SheetState::Dragging,
                    _ => SheetState::Settling,
                };
                let _ = sheet.set_state(&mut host, target);
            }
            Op::Relayout { height, child } => {
                let layout = LayoutInput::new(400, i32::from(height % 2000) + 200, i32::from(child % 2200));
                host.set_layout(layout);
                let _ = sheet.on_layout(&mut host, layout);
            }
        }

        if let Some(offsets) = sheet.offsets() {
            let top = host.top();
            assert!(top >= offsets.min_offset(), "top {top} above min");
            assert!(top <= offsets.hidden_offset(), "top {top} below hidden");
            if !input.hideable {
                assert!(top <= offsets.max_offset(), "top {top} below max");
            }
        }
    }

    // Finish any gesture still open, then everything must come to rest.
    dispatcher.dispatch(&mut sheet, &mut host, &PointerEvent::cancel(last.0, last.1, now + 8));
    let run = settle(&mut sheet, &mut host);
    assert!(run.settled, "settle never finished");
    let Some(stable) = sheet.state().as_stable() else {
        panic!("not at rest: {}", sheet.state());
    };
    assert!(sheet.config().order.contains(stable));
    if let Some(offsets) = sheet.offsets() {
        assert_eq!(host.top(), offsets.top_for(stable));
    }
});
