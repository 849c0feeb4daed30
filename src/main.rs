use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use serde_json::json;

use compogen::events::UiEvent;
use compogen::message::{Message, Part, Role, ToolInvocationState};
use compogen::state::AppState;
use compogen::{render, terminal, update};

/// Tick cadence while the spinner is animating.
const FRAME_DURATION: Duration = Duration::from_millis(100);
/// Tick cadence when nothing is animating.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Chat front-end for an AI component generator.
#[derive(Debug, Parser)]
#[command(name = "compogen", version, about)]
struct Cli {
    /// Transcript JSON file (an array of messages) to display instead of
    /// the built-in demo thread.
    transcript: Option<PathBuf>,

    /// Start with a generation in flight (animates the indicator).
    #[arg(long)]
    loading: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let messages = match &cli.transcript {
        Some(path) => load_transcript(path)?,
        None => demo_thread(),
    };
    let mut app = AppState::new(messages, cli.loading);

    terminal::install_panic_hook();
    let mut term = terminal::setup_terminal()?;
    terminal::enable_mouse_capture()?;

    let result = event_loop(&mut term, &mut app);

    terminal::restore_terminal()?;
    result
}

fn load_transcript(path: &PathBuf) -> Result<Vec<Message>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse transcript JSON in {}", path.display()))
}

fn event_loop(
    term: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            term.draw(|frame| render(app, frame))
                .context("Failed to draw frame")?;
            dirty = false;
        }

        let tick_rate = if app.transcript.is_loading {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("Failed to poll terminal events")? {
            let terminal_event = event::read().context("Failed to read terminal event")?;
            update(app, &UiEvent::Terminal(terminal_event));
            dirty = true;
        }

        if last_tick.elapsed() >= tick_rate {
            update(app, &UiEvent::Tick);
            last_tick = Instant::now();
            // Ticks only repaint when something animates.
            if app.transcript.is_loading {
                dirty = true;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// A small built-in thread exercising every part variant.
fn demo_thread() -> Vec<Message> {
    vec![
        Message::with_parts(
            "u1",
            Role::User,
            vec![Part::text(
                "Create a modern product card with image, title, description, and button",
            )],
        ),
        Message::with_parts(
            "a1",
            Role::Assistant,
            vec![
                Part::reasoning(
                    "A product card needs an image area, a heading, short copy, and a call to action.",
                ),
                Part::StepStart,
                Part::text(
                    "Here's a **product card** component. It uses a `flex` column layout:\n\n\
                     - Image with rounded corners\n\
                     - Title and description\n\
                     - A primary action button",
                ),
                Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({
                        "language": "jsx",
                        "preview": "A product card: photo on top, bold title, two lines of description, and a blue \"Add to cart\" button.",
                        "code": "export function ProductCard({ product }) {\n  return (\n    <div className=\"card\">\n      <img src={product.image} alt={product.title} />\n      <h3>{product.title}</h3>\n      <p>{product.description}</p>\n      <button>Add to cart</button>\n    </div>\n  );\n}",
                    })),
                ),
                Part::Source {
                    source: json!({"url": "https://react.dev/learn/your-first-component"}),
                },
            ],
        ),
        Message::with_parts(
            "u2",
            Role::User,
            vec![Part::text("Make the button larger")],
        ),
        Message::pending("a2", Role::Assistant),
    ]
}
