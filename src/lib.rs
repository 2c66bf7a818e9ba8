//! Highlight Mode - debounced selection-to-highlight engine
//!
//! This crate provides the core types and logic for an editor highlight
//! mode: a toggleable state in which a pointer-selection gesture wraps the
//! selected text in `==...==%% %%` markers after a quiet period, implementing
//! the Elm Architecture pattern (messages in, commands out).

pub mod allowance;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod controller;
pub mod editor;
pub mod markers;
pub mod messages;
pub mod surface;
pub mod tracing;
pub mod workspace;

// Re-export commonly used types
pub use allowance::is_highlight_allowed;
pub use commands::{command_by_name, Cmd, CommandDef, CommandId, COMMANDS};
pub use config::HighlightConfig;
pub use controller::{HighlightController, HIGHLIGHT_DEBOUNCE_MS};
pub use editor::{EditableSurface, Position};
pub use markers::wrap_selection;
pub use messages::{Msg, TimerToken};
pub use surface::BufferSurface;
pub use workspace::{
    observe_selections, EditableSurfaceProvider, GestureSink, Subscription, SubscriptionId,
};
