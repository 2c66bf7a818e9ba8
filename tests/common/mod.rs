//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use highlight_mode::commands::Cmd;
use highlight_mode::controller::HighlightController;
use highlight_mode::messages::{Msg, TimerToken};
use highlight_mode::surface::BufferSurface;

/// Controller with highlight mode already toggled on.
pub fn enabled_controller() -> HighlightController {
    let mut controller = HighlightController::new();
    controller.update(None, Msg::ToggleMode);
    controller
}

/// Run one full selection gesture: press, select `needle`, release.
pub fn drag_select(
    controller: &mut HighlightController,
    surface: &mut BufferSurface,
    needle: &str,
) -> Option<Cmd> {
    controller.update(Some(surface), Msg::PointerDown);
    assert!(
        surface.select_first(needle),
        "expected {:?} in the buffer",
        needle
    );
    controller.update(Some(surface), Msg::SelectionEnd)
}

/// Pull the schedule token out of a command (direct or at the end of a
/// batch).
pub fn scheduled_token(cmd: &Cmd) -> TimerToken {
    match cmd {
        Cmd::Schedule { token, .. } => *token,
        Cmd::Batch(cmds) => match cmds.last() {
            Some(Cmd::Schedule { token, .. }) => *token,
            other => panic!("batch does not end in a schedule: {:?}", other),
        },
        other => panic!("expected a schedule, got: {:?}", other),
    }
}
