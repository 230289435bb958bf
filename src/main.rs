//! Cinescope - movie discovery in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinescope
//!
//! # CLI mode (for automation)
//! cinescope popular --pages 2
//! cinescope search "blade runner"
//! cinescope info 438631 --json
//! ```

use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use cinescope::app::{App, AppEvent, Effect};
use cinescope::cli::{Cli, Command, ExitCode, Output};
use cinescope::commands;
use cinescope::config::Config;
use cinescope::debounce::Debouncer;
use cinescope::logging::{self, LogTarget};
use cinescope::{ui, TmdbClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init(LogTarget::Stderr, cli.quiet);
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        logging::init(LogTarget::File, cli.quiet);
        run_tui(cli.config.as_deref()).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Popular(cmd)) => commands::popular_cmd(cmd, config, &output).await,

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, config, &output).await,

        Some(Command::Image(cmd)) => commands::image_cmd(cmd, config, &output),

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(settings_path: Option<&Path>) -> Result<()> {
    // Fail before touching the terminal so the message stays readable
    let config = Config::from_env(settings_path).context("Cannot start without API credentials")?;
    info!(api_url = %config.api_url, "starting TUI");

    let catalog = Arc::new(TmdbClient::new(&config));
    let mut app = App::new(catalog)
        .with_min_query_len(config.settings.min_query_len)
        .with_image_base(config.settings.image_base_url.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let mut effects = EffectRunner {
        debouncer: Debouncer::new(config.debounce_window(), tx.clone()),
        tx,
    };

    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut effects, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Starts the work an [`Effect`] asks for; completions come back as
/// [`AppEvent`]s on the channel
struct EffectRunner {
    tx: UnboundedSender<AppEvent>,
    debouncer: Debouncer<AppEvent>,
}

impl EffectRunner {
    fn run(&mut self, app: &mut App<TmdbClient>, effect: Effect) {
        match effect {
            Effect::FetchFeed(request) => {
                let fetch = app.feed.fetch(request);
                self.spawn(async move { AppEvent::Feed(fetch.await) });
            }
            Effect::Search(request) => {
                let fetch = app.search.fetch(request);
                self.spawn(async move { AppEvent::Search(fetch.await) });
            }
            Effect::ScheduleDebounce(ticket) => {
                self.debouncer.schedule(AppEvent::DebounceElapsed(ticket));
            }
            Effect::CancelDebounce => self.debouncer.cancel(),
            Effect::LoadDetail => {
                let Some(loader) = app.detail.as_mut() else {
                    return;
                };
                let title_id = loader.title_id();
                if let Some(fetch) = loader.begin() {
                    self.spawn(async move {
                        AppEvent::Detail {
                            title_id,
                            result: fetch.await,
                        }
                    });
                }
            }
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Receiver gone means the UI already exited
            let _ = tx.send(task.await);
        });
    }
}

/// Main event loop - handles input, applies completions, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App<TmdbClient>,
    effects: &mut EffectRunner,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let start = app.start();
    effects.run(app, start);

    while app.running {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so completions are picked up
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = app.handle_key(key) {
                        effects.run(app, effect);
                    }
                }
            }
        }

        while let Ok(event) = rx.try_recv() {
            if let Some(effect) = app.handle_event(event) {
                effects.run(app, effect);
            }
        }
    }

    Ok(())
}
