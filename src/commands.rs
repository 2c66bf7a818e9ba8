//! Palette command definitions and the effects the controller hands back to
//! the host for execution.

use crate::messages::{Msg, TimerToken};

// ============================================================================
// Command registry
// ============================================================================

/// Commands this extension contributes to the host palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    ToggleHighlightMode,
}

impl CommandId {
    /// Message the controller handles when the command is invoked.
    pub fn to_msg(self) -> Msg {
        match self {
            CommandId::ToggleHighlightMode => Msg::ToggleMode,
        }
    }
}

/// A palette command definition.
#[derive(Debug, Clone, Copy)]
pub struct CommandDef {
    pub id: CommandId,
    /// Stable identifier the host registers the command under.
    pub command: &'static str,
    /// Human-readable palette label.
    pub label: &'static str,
}

/// All commands, in palette display order.
pub static COMMANDS: &[CommandDef] = &[CommandDef {
    id: CommandId::ToggleHighlightMode,
    command: "toggle-highlight-mode",
    label: "Toggle Highlight Mode",
}];

/// Look up a command by its stable identifier.
pub fn command_by_name(command: &str) -> Option<&'static CommandDef> {
    COMMANDS.iter().find(|def| def.command == command)
}

// ============================================================================
// Effects
// ============================================================================

/// Side effects the host performs on the controller's behalf.
///
/// The controller never touches the host's timer or notification surface
/// directly; it describes what should happen and the host loop executes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Show a transient user-visible notice.
    Notify(String),
    /// Arm the debounce timer: deliver [`Msg::ApplyReady`] carrying the same
    /// token once `delay_ms` milliseconds elapse.
    Schedule { token: TimerToken, delay_ms: u64 },
    /// Disarm an earlier schedule if it has not fired yet. Best effort: the
    /// controller also discards mismatched tokens at fire time, so a host
    /// that cannot cancel still coalesces correctly.
    Cancel(TimerToken),
    /// Execute several effects in order.
    Batch(Vec<Cmd>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_toggle() {
        let def = command_by_name("toggle-highlight-mode").expect("toggle command registered");
        assert_eq!(def.id, CommandId::ToggleHighlightMode);
        assert_eq!(def.label, "Toggle Highlight Mode");
    }

    #[test]
    fn test_unknown_command_not_found() {
        assert!(command_by_name("does-not-exist").is_none());
    }

    #[test]
    fn test_toggle_maps_to_toggle_msg() {
        assert_eq!(CommandId::ToggleHighlightMode.to_msg(), Msg::ToggleMode);
    }
}
