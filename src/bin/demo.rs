//! Interactive driver for highlight mode
//!
//! Simulates a host editor on stdin: type gesture commands against an
//! in-memory buffer and watch the debounced highlight land.
//!
//! Usage:
//!   cargo run --bin highlight-demo
//!   cargo run --bin highlight-demo -- notes.md --enabled
//!   cargo run --bin highlight-demo -- --delay-ms 300

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use highlight_mode::commands::{command_by_name, Cmd};
use highlight_mode::config::HighlightConfig;
use highlight_mode::controller::HighlightController;
use highlight_mode::editor::EditableSurface;
use highlight_mode::messages::{Msg, TimerToken};
use highlight_mode::surface::BufferSurface;
use highlight_mode::workspace::{
    observe_selections, EditableSurfaceProvider, GestureSink, SubscriptionId,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "highlight-demo",
    about = "Interactive stdin driver for highlight mode"
)]
struct Args {
    /// File to load into the demo buffer (defaults to a sample sentence)
    path: Option<PathBuf>,

    /// Override the configured debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Start with highlight mode already enabled
    #[arg(long)]
    enabled: bool,
}

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

// ---------------------------------------------------------------------------
// Workspace stub
// ---------------------------------------------------------------------------

/// Minimal selection-event source: fans gesture messages out to every
/// registered sink, the way a host editor's workspace would.
struct DemoWorkspace {
    sinks: Vec<(SubscriptionId, GestureSink)>,
    next_id: u64,
}

impl DemoWorkspace {
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

impl EditableSurfaceProvider for DemoWorkspace {
    fn register(&mut self, sink: GestureSink) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.sinks.push((id, sink));
        id
    }

    fn release(&mut self, id: SubscriptionId) {
        self.sinks.retain(|(sink_id, _)| *sink_id != id);
    }
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

/// One armed debounce timer: fire instant plus the token to deliver.
type Deadline = Option<(Instant, TimerToken)>;

fn exec_cmd(cmd: Cmd, deadline: &mut Deadline) {
    match cmd {
        Cmd::Notify(text) => println!("[notice] {}", text),
        Cmd::Schedule { token, delay_ms } => {
            *deadline = Some((Instant::now() + Duration::from_millis(delay_ms), token));
        }
        Cmd::Cancel(token) => {
            if let Some((_, armed)) = *deadline {
                if armed == token {
                    *deadline = None;
                }
            }
        }
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                exec_cmd(cmd, deadline);
            }
        }
    }
}

/// Deliver due timers and drain the message channel through the controller.
fn pump(
    controller: &mut HighlightController,
    surface: &mut BufferSurface,
    msg_tx: &Sender<Msg>,
    msg_rx: &Receiver<Msg>,
    deadline: &mut Deadline,
) {
    if let Some((due, token)) = *deadline {
        if Instant::now() >= due {
            *deadline = None;
            let _ = msg_tx.send(Msg::ApplyReady { token });
        }
    }

    while let Ok(msg) = msg_rx.try_recv() {
        if let Some(cmd) = controller.update(Some(surface), msg) {
            exec_cmd(cmd, deadline);
        }
    }
}

fn show(surface: &BufferSurface) {
    let cursor = surface.cursor();
    println!("buffer:  {:?}", surface.text());
    println!("cursor:  line {}, column {}", cursor.line, cursor.column);
    let selection = surface.selection();
    if selection.is_empty() {
        println!("selection: (none)");
    } else {
        println!("selection: {:?}", selection);
    }
}

fn print_help() {
    println!("commands:");
    println!("  toggle           flip highlight mode (command palette action)");
    println!("  press            pointer down on the buffer");
    println!("  select <text>    set the selection to the first match");
    println!("  release          pointer up (ends the selection gesture)");
    println!("  drag <text>      press + select + release in one step");
    println!("  pane             switch panes (active surface changes)");
    println!("  show             print buffer, cursor and selection");
    println!("  help             this list");
    println!("  quit             exit");
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    highlight_mode::tracing::init();
    let args = Args::parse();

    let text = match &args.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => SAMPLE_TEXT.to_string(),
    };

    let mut config = HighlightConfig::load();
    if let Some(delay_ms) = args.delay_ms {
        config.delay_ms = delay_ms;
    }

    let mut surface = BufferSurface::from_text(&text);
    let mut controller = HighlightController::from_config(&config);
    let mut workspace = DemoWorkspace::new();
    let mut deadline: Deadline = None;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let subscription = observe_selections(&mut workspace, msg_tx.clone());
    tracing::info!("highlight mode plugin loaded");

    if args.enabled {
        let _ = msg_tx.send(Msg::ToggleMode);
    }

    // Stdin reader thread; the main loop stays free to fire timers.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let mut input = String::new();
        while std::io::stdin().read_line(&mut input).is_ok() {
            if input.is_empty() {
                break;
            }
            if line_tx.send(input.trim_end().to_string()).is_err() {
                break;
            }
            input.clear();
        }
    });

    println!("highlight-mode demo (delay {}ms); type `help` for commands", config.delay_ms);
    show(&surface);

    loop {
        pump(&mut controller, &mut surface, &msg_tx, &msg_rx, &mut deadline);

        // Sleep until the next timer or the next input line, whichever is
        // sooner.
        let wait = match deadline {
            Some((due, _)) => due
                .saturating_duration_since(Instant::now())
                .min(Duration::from_millis(200)),
            None => Duration::from_millis(200),
        };
        let line = match line_rx.recv_timeout(wait) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let mut parts = line.splitn(2, ' ');
        let verb = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();
        match verb {
            "" => {}
            "toggle" => {
                // Route through the registry, as a command palette would.
                match command_by_name("toggle-highlight-mode") {
                    Some(def) => {
                        let _ = msg_tx.send(def.id.to_msg());
                    }
                    None => println!("command not registered"),
                }
            }
            "press" => workspace.emit(Msg::PointerDown),
            "release" => workspace.emit(Msg::SelectionEnd),
            "select" => {
                if !surface.select_first(rest) {
                    println!("no match for {:?}", rest);
                }
            }
            "drag" => {
                workspace.emit(Msg::PointerDown);
                if surface.select_first(rest) {
                    workspace.emit(Msg::SelectionEnd);
                } else {
                    println!("no match for {:?}", rest);
                }
            }
            "pane" => workspace.emit(Msg::SurfaceChanged),
            "show" => show(&surface),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command {:?}; type `help`", other),
        }
    }

    // Let an armed timer land before shutting down.
    if let Some((due, _)) = deadline {
        let remaining = due.saturating_duration_since(Instant::now());
        thread::sleep(remaining);
        pump(&mut controller, &mut surface, &msg_tx, &msg_rx, &mut deadline);
    }

    subscription.release(&mut workspace);
    tracing::info!("highlight mode plugin unloaded");
    show(&surface);

    Ok(())
}
