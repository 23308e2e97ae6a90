//! Terminal portfolio viewer built on the folio-scroll coordinator.
//!
//! Run the binary to browse the built-in sample page, or pass `--page` with
//! a JSON page document.  `--print-config` prints the effective settings.

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing_subscriber::EnvFilter;

use folio_scroll::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use folio_scroll::config::{AppConfig, BallModel};
use folio_scroll::core::page::PageDocument;
use folio_scroll::ui::{
    bars::{SkillsBar, StatusBar},
    navbar::{Navbar, LINKS},
    page_widget::PageWidget,
    timeline::TimelineWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-synchronised portfolio viewer")]
struct Cli {
    /// Page document (JSON).  Defaults to the built-in sample.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/folio-scroll/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use exponential smoothing instead of the spring for the timeline ball.
    #[arg(long)]
    lerp: bool,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        // Never pollute stdout.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();
    let snapshot = &state.snapshot;
    let host = state.host();

    // Navbar highlights the part of the page under the focus line.
    let focus_row = host.row() + usize::from(host.viewport_rows()) / 3;
    let current = host.layout().line_at(focus_row).and_then(|(block, _)| {
        LINKS.iter().map(|&(_, anchor)| anchor).find(|&anchor| {
            block.id == anchor || block.anchor.as_deref() == Some(anchor) || (block.tracked && anchor == "experience")
        })
    });
    frame.render_widget(
        Navbar {
            scrolled: snapshot.is_scrolled,
            current,
        },
        layout.navbar_area,
    );

    let entries = state.tracked_sections();
    frame.render_widget(
        TimelineWidget {
            entries: &entries,
            active: state.tracked.iter().position(|id| snapshot.is_active(id)),
            ball: state.ball.position(),
            offset: state.sidebar.offset(),
            hidden: state.hidden_counts(),
        },
        layout.sidebar_area,
    );

    frame.render_widget(
        PageWidget {
            layout: host.layout(),
            scroll: host.row(),
            active: snapshot.active_section_id.as_deref(),
        },
        layout.page_area,
    );

    if snapshot.show_skills_bar {
        if let Some(section) = state.active_section() {
            frame.render_widget(
                SkillsBar {
                    title: &section.title,
                    skills: &section.skills,
                },
                layout.skills_bar_area,
            );
        }
    }

    let hint = state.config.status_bar_hint();
    frame.render_widget(
        StatusBar {
            snapshot,
            hint: &hint,
            message: state.status_message.as_deref(),
        },
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if cli.lerp {
        config.ball_model = BallModel::Lerp;
    }
    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    let doc = match &cli.page {
        Some(path) => PageDocument::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PageDocument::sample(),
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, doc, config).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn dispatch(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.resize(w, h),
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    doc: PageDocument,
    config: AppConfig,
) -> Result<()> {
    let size = terminal.size()?;
    let frame_interval = config.frame_interval();
    let mut state = AppState::new(doc, config, ratatui::layout::Rect::new(0, 0, size.width, size.height));

    let mut events = spawn_event_reader(frame_interval);
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::debug!(sections = state.tracked.len(), "starting frame loop");
    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                dispatch(&mut state, event);
                // Drain whatever else is queued before the next frame.
                while let Ok(event) = events.try_recv() {
                    dispatch(&mut state, event);
                }
            }

            _ = frames.tick() => state.frame(Instant::now()),
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
