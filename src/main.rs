mod audio;
mod config;
mod controller;
mod error;
mod library;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use audio::{SimulatedOutput, SourceChecker};
use config::Config;
use controller::{PlaybackController, PlaybackRequests};
use library::Library;
use model::UiState;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== tuneline starting ===");

    let library = match &config.library {
        Some(path) => Library::load(path)
            .with_context(|| format!("Failed to load library from {}", path.display()))?,
        None => Library::builtin(),
    };
    tracing::info!(tracks = library.len(), "Library ready");

    let (output, output_events) = SimulatedOutput::new(library.durations(), config.tick());
    let probe = SourceChecker::new().context("Failed to build source checker")?;
    let controller = PlaybackController::new(
        output,
        Arc::new(probe),
        library.tracks(),
        config.player_settings(),
    );

    let (requests, request_rx) = PlaybackRequests::channel();
    let listener = controller.spawn_listener(output_events, request_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui_state = UiState::new(library.tracks());
    let res = run_app(&mut terminal, controller.clone(), ui_state, requests).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Application error");
    }

    controller.pause().await;
    controller.settle().await;
    listener.abort();

    tracing::info!("tuneline shutting down");
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: PlaybackController,
    mut ui_state: UiState,
    requests: PlaybackRequests,
) -> Result<()> {
    loop {
        controller.expire_notification().await;
        let playback = controller.snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key, &mut ui_state, &requests).await {
                    tracing::error!(error = %e, "Key handling failed");
                }
            }
        }

        if ui_state.should_quit {
            break;
        }
    }

    Ok(())
}
