//! Highlight mode controller: gesture gating, debounce discipline, and the
//! apply step.
//!
//! The controller is pure decision logic. Hosts feed it [`Msg`] values and
//! execute whatever [`Cmd`] comes back; all state lives in one
//! [`HighlightController`] instance, so independent controllers never
//! interfere.

use crate::allowance::is_highlight_allowed;
use crate::commands::Cmd;
use crate::config::HighlightConfig;
use crate::editor::EditableSurface;
use crate::markers::{wrap_selection, CURSOR_BACKSTEP};
use crate::messages::{Msg, TimerToken};

/// Delay between a selection release and the highlight apply.
///
/// Selections are frequently adjusted by dragging before the user settles;
/// waiting out a quiet period avoids wrapping intermediate selection states.
pub const HIGHLIGHT_DEBOUNCE_MS: u64 = 1000;

/// One scheduled apply: the timer token plus the selection text frozen at
/// release time. The text is applied as-is when the timer fires, even if the
/// document moved on in between.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingApply {
    token: TimerToken,
    text: String,
}

/// State for one highlight-mode instance.
#[derive(Debug)]
pub struct HighlightController {
    /// Whether highlight mode is on. Off by default; never persisted.
    enabled: bool,
    /// One-shot flag set on pointer press and consumed on the next release.
    pointer_down_seen: bool,
    /// The single outstanding schedule, if any (cancel-and-replace).
    pending: Option<PendingApply>,
    /// Last allocated timer token.
    last_token: u64,
    /// Debounce delay handed to the host with every schedule.
    delay_ms: u64,
}

impl Default for HighlightController {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightController {
    pub fn new() -> Self {
        Self::with_delay_ms(HIGHLIGHT_DEBOUNCE_MS)
    }

    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            enabled: false,
            pointer_down_seen: false,
            pending: None,
            last_token: 0,
            delay_ms,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_delay_ms(config.delay_ms)
    }

    /// Whether highlight mode is currently on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Token of the outstanding schedule, if any.
    pub fn pending_apply(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|pending| pending.token)
    }

    /// Consume one host signal, returning the effect the host must perform.
    ///
    /// `surface` is the active editable surface; hosts pass `None` when no
    /// compatible surface has focus, and gesture signals degrade to no-ops.
    pub fn update(&mut self, surface: Option<&mut dyn EditableSurface>, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::ToggleMode => self.toggle_mode(),
            Msg::PointerDown => {
                self.pointer_down_seen = true;
                None
            }
            Msg::SelectionEnd => self.selection_end(surface),
            Msg::ApplyReady { token } => self.apply_ready(surface, token),
            Msg::SurfaceChanged => {
                // A press on the previous surface must not validate a
                // release on the new one.
                self.pointer_down_seen = false;
                None
            }
        }
    }

    /// Flip the mode flag and notify the user.
    ///
    /// Turning the mode off leaves any pending schedule armed, and the apply
    /// step does not re-check the flag at fire time; a highlight scheduled
    /// just before the toggle still lands.
    fn toggle_mode(&mut self) -> Option<Cmd> {
        self.enabled = !self.enabled;
        let state = if self.enabled { "ON" } else { "OFF" };
        tracing::info!("highlight mode {}", state);
        Some(Cmd::Notify(format!("Highlight Mode: {}", state)))
    }

    /// Handle a pointer/touch release: gate, read the selection, check
    /// allowance, then cancel-and-replace the debounce schedule.
    fn selection_end(&mut self, surface: Option<&mut dyn EditableSurface>) -> Option<Cmd> {
        // Gate: only a genuine press-then-release while the mode is on
        // qualifies. The release consumes the flag either way.
        let armed = self.pointer_down_seen;
        self.pointer_down_seen = false;
        if !self.enabled || !armed {
            tracing::trace!(
                "selection end gated (enabled={}, armed={})",
                self.enabled,
                armed
            );
            return None;
        }

        let surface = surface?;
        let raw = surface.selection();
        let selection = raw.trim();
        if selection.is_empty() {
            return None;
        }

        if !is_highlight_allowed(&surface.text(), selection) {
            tracing::debug!("selection {:?} already highlighted, skipping", selection);
            return None;
        }

        let token = self.next_token();
        let superseded = self.pending.replace(PendingApply {
            token,
            text: selection.to_string(),
        });
        tracing::debug!(
            "scheduled highlight apply for {:?} (token={}, delay={}ms)",
            selection,
            token.0,
            self.delay_ms
        );

        let schedule = Cmd::Schedule {
            token,
            delay_ms: self.delay_ms,
        };
        Some(match superseded {
            Some(old) => Cmd::Batch(vec![Cmd::Cancel(old.token), schedule]),
            None => schedule,
        })
    }

    /// Handle the debounce timer firing.
    ///
    /// A token that no longer matches the pending entry belongs to a
    /// superseded schedule and is discarded. The live token applies the
    /// frozen selection text with no re-validation against the current
    /// document, and no mode re-check.
    fn apply_ready(
        &mut self,
        surface: Option<&mut dyn EditableSurface>,
        token: TimerToken,
    ) -> Option<Cmd> {
        match self.pending.take() {
            Some(pending) if pending.token == token => {
                let Some(surface) = surface else {
                    tracing::debug!("apply fired with no active surface (token={})", token.0);
                    return None;
                };
                apply_highlight(surface, &pending.text);
                None
            }
            other => {
                self.pending = other;
                tracing::debug!("stale apply token {} ignored", token.0);
                None
            }
        }
    }

    fn next_token(&mut self) -> TimerToken {
        self.last_token += 1;
        TimerToken(self.last_token)
    }
}

/// Replace the selection with its wrapped form and step the cursor back
/// inside the placeholder.
///
/// Only the column moves. The inserted text never breaks a line within its
/// final characters, so no row adjustment is needed for the supported
/// single-line case.
fn apply_highlight(surface: &mut dyn EditableSurface, text: &str) {
    surface.replace_selection(&wrap_selection(text));

    let mut cursor = surface.cursor();
    cursor.column = cursor.column.saturating_sub(CURSOR_BACKSTEP);
    surface.set_cursor(cursor);

    tracing::debug!("applied highlight for {:?}", text);
}
