//! Host-facing signals consumed by the highlight controller.

/// Identifies one scheduled highlight apply.
///
/// Tokens are allocated monotonically by the controller; the host echoes the
/// token back in [`Msg::ApplyReady`], which is how a superseded schedule is
/// told apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Signals the host feeds into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Flip highlight mode on or off (the palette command).
    ToggleMode,
    /// A pointer or touch press began on the active editable surface.
    PointerDown,
    /// A pointer or touch release completed a selection gesture.
    SelectionEnd,
    /// The debounce delay for a scheduled apply elapsed.
    ApplyReady { token: TimerToken },
    /// The host switched which pane/surface is active.
    SurfaceChanged,
}
