//! End-to-end highlight flow: gesture in, wrapped markers out.

mod common;

use std::sync::mpsc;

use common::{drag_select, enabled_controller, scheduled_token};
use highlight_mode::commands::{command_by_name, Cmd};
use highlight_mode::controller::{HighlightController, HIGHLIGHT_DEBOUNCE_MS};
use highlight_mode::editor::{EditableSurface, Position};
use highlight_mode::messages::Msg;
use highlight_mode::surface::BufferSurface;
use highlight_mode::workspace::{observe_selections, EditableSurfaceProvider, SubscriptionId};

// ============================================================================
// Full gesture-to-markers scenarios
// ============================================================================

#[test]
fn test_select_word_and_let_timer_land() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");

    let cmd = drag_select(&mut controller, &mut surface, "world").expect("schedules");
    assert_eq!(
        cmd,
        Cmd::Schedule {
            token: scheduled_token(&cmd),
            delay_ms: HIGHLIGHT_DEBOUNCE_MS
        }
    );
    assert_eq!(surface.text(), "hello world", "nothing written before fire");

    let token = scheduled_token(&cmd);
    controller.update(Some(&mut surface), Msg::ApplyReady { token });

    assert_eq!(surface.text(), "hello ==world==%% %%");
    assert_eq!(surface.cursor(), Position::new(0, 17));
}

#[test]
fn test_second_highlight_in_same_document() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("alpha beta");

    let cmd = drag_select(&mut controller, &mut surface, "alpha").expect("schedules");
    let token = scheduled_token(&cmd);
    controller.update(Some(&mut surface), Msg::ApplyReady { token });
    assert_eq!(surface.text(), "==alpha==%% %% beta");

    // "beta" sits after the placeholder, so the scan allows it.
    let cmd = drag_select(&mut controller, &mut surface, "beta").expect("schedules");
    let token = scheduled_token(&cmd);
    controller.update(Some(&mut surface), Msg::ApplyReady { token });
    assert_eq!(surface.text(), "==alpha==%% %% ==beta==%% %%");
}

#[test]
fn test_reselecting_highlighted_word_is_blocked() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");

    let cmd = drag_select(&mut controller, &mut surface, "world").expect("schedules");
    let token = scheduled_token(&cmd);
    controller.update(Some(&mut surface), Msg::ApplyReady { token });
    assert_eq!(surface.text(), "hello ==world==%% %%");

    // Selecting the now-wrapped word again must not schedule.
    let cmd = drag_select(&mut controller, &mut surface, "world");
    assert_eq!(cmd, None);
    assert_eq!(surface.text(), "hello ==world==%% %%");
}

// ============================================================================
// Mode and gesture gating
// ============================================================================

#[test]
fn test_toggle_notices_match_mode_state() {
    let mut controller = HighlightController::new();

    let on = controller.update(None, Msg::ToggleMode);
    assert_eq!(on, Some(Cmd::Notify("Highlight Mode: ON".to_string())));

    let off = controller.update(None, Msg::ToggleMode);
    assert_eq!(off, Some(Cmd::Notify("Highlight Mode: OFF".to_string())));
}

#[test]
fn test_gesture_does_nothing_while_disabled() {
    let mut controller = HighlightController::new();
    let mut surface = BufferSurface::from_text("hello world");

    assert_eq!(drag_select(&mut controller, &mut surface, "world"), None);
    assert_eq!(controller.pending_apply(), None);
}

#[test]
fn test_keyboard_selection_never_schedules() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");

    // Selection moved without any pointer press (keyboard shift-select).
    surface.select_first("world");
    let cmd = controller.update(Some(&mut surface), Msg::SelectionEnd);
    assert_eq!(cmd, None);
}

#[test]
fn test_pane_switch_invalidates_press() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");
    surface.select_first("world");

    controller.update(Some(&mut surface), Msg::PointerDown);
    controller.update(None, Msg::SurfaceChanged);
    assert_eq!(
        controller.update(Some(&mut surface), Msg::SelectionEnd),
        None
    );
}

// ============================================================================
// Debounce discipline
// ============================================================================

#[test]
fn test_adjusted_selection_coalesces_to_last() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("one two three");

    let first = drag_select(&mut controller, &mut surface, "one").expect("schedules");
    let first_token = scheduled_token(&first);

    let second = drag_select(&mut controller, &mut surface, "two").expect("schedules");
    let second_token = scheduled_token(&second);
    assert_eq!(
        second,
        Cmd::Batch(vec![
            Cmd::Cancel(first_token),
            Cmd::Schedule {
                token: second_token,
                delay_ms: HIGHLIGHT_DEBOUNCE_MS
            }
        ])
    );

    controller.update(Some(&mut surface), Msg::ApplyReady { token: first_token });
    assert_eq!(surface.text(), "one two three", "superseded token ignored");

    controller.update(
        Some(&mut surface),
        Msg::ApplyReady {
            token: second_token,
        },
    );
    assert_eq!(surface.text(), "one ==two==%% %% three");
}

#[test]
fn test_pending_apply_outlives_mode_toggle() {
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");

    let cmd = drag_select(&mut controller, &mut surface, "world").expect("schedules");
    let token = scheduled_token(&cmd);

    controller.update(None, Msg::ToggleMode);
    assert!(!controller.is_enabled());

    controller.update(Some(&mut surface), Msg::ApplyReady { token });
    assert_eq!(
        surface.text(),
        "hello ==world==%% %%",
        "armed timer lands even after the mode was switched off"
    );
}

// ============================================================================
// Host wiring: provider, sink, command registry
// ============================================================================

struct RecordingProvider {
    sinks: Vec<(SubscriptionId, highlight_mode::workspace::GestureSink)>,
    next_id: u64,
}

impl RecordingProvider {
    fn new() -> Self {
        Self {
            sinks: Vec::new(),
            next_id: 0,
        }
    }

    fn emit(&self, msg: Msg) {
        for (_, sink) in &self.sinks {
            let _ = sink.send(msg.clone());
        }
    }
}

impl EditableSurfaceProvider for RecordingProvider {
    fn register(&mut self, sink: highlight_mode::workspace::GestureSink) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.sinks.push((id, sink));
        id
    }

    fn release(&mut self, id: SubscriptionId) {
        self.sinks.retain(|(sink_id, _)| *sink_id != id);
    }
}

#[test]
fn test_provider_events_drive_controller_end_to_end() {
    let mut provider = RecordingProvider::new();
    let mut controller = enabled_controller();
    let mut surface = BufferSurface::from_text("hello world");
    let (tx, rx) = mpsc::channel();

    let subscription = observe_selections(&mut provider, tx);

    provider.emit(Msg::PointerDown);
    surface.select_first("world");
    provider.emit(Msg::SelectionEnd);

    let mut scheduled = None;
    while let Ok(msg) = rx.try_recv() {
        if let Some(cmd) = controller.update(Some(&mut surface), msg) {
            scheduled = Some(cmd);
        }
    }
    let token = scheduled_token(&scheduled.expect("gesture produced a schedule"));

    controller.update(Some(&mut surface), Msg::ApplyReady { token });
    assert_eq!(surface.text(), "hello ==world==%% %%");

    // After release the provider stops delivering.
    subscription.release(&mut provider);
    provider.emit(Msg::PointerDown);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_palette_command_toggles_mode() {
    let mut controller = HighlightController::new();

    let def = command_by_name("toggle-highlight-mode").expect("command registered");
    let cmd = controller.update(None, def.id.to_msg());

    assert!(controller.is_enabled());
    assert_eq!(cmd, Some(Cmd::Notify("Highlight Mode: ON".to_string())));
}
