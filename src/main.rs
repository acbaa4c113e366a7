//! MealScout - a terminal client for a recipe product recommendation
//! service.

use std::io;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use mealscout::api::RecommenderClient;
use mealscout::app::App;
use mealscout::config::Config;
use mealscout::events::EventHandler;
use mealscout::logging;
use mealscout::tasks::{create_task_channel, ApiMessage, TaskSpawner};

#[derive(Parser, Debug)]
#[command(name = "mealscout", version, about, long_about = None)]
struct Args {
    /// Recommendation server URL, overrides the config file.
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init().context("failed to initialize logging")?;

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(server) = args.server {
        config.server_url = server;
    }
    config.validate().context("invalid configuration")?;
    info!(server = %config.server_url, "Starting mealscout");

    let client = RecommenderClient::new(&config.server_url).context("invalid server URL")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run(&mut terminal, &client, &config).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    logging::shutdown();
    result
}

/// The main event loop.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &RecommenderClient,
    config: &Config,
) -> anyhow::Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let events = EventHandler::new();
    let mut app = App::with_settings(
        std::time::Duration::from_millis(config.debounce_ms),
        config.suggestion_limit as usize,
    );

    spawner.spawn_health_check(client);
    spawner.spawn_fetch_dietary_options(client);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let event = events.next()?;
        let now = Instant::now();
        app.update(event, now);

        drain_api_messages(&mut rx, &mut app);
        dispatch_fetches(&mut app, &spawner, client, config, now);

        if app.should_quit() {
            info!("Shutting down");
            return Ok(());
        }
    }
}

/// Apply every background-task result that has arrived since last cycle.
fn drain_api_messages(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ApiMessage>, app: &mut App) {
    while let Ok(message) = rx.try_recv() {
        app.handle_api_message(message);
    }
}

/// Start fetches the app decided on this cycle.
fn dispatch_fetches(
    app: &mut App,
    spawner: &TaskSpawner,
    client: &RecommenderClient,
    config: &Config,
    now: Instant,
) {
    if let Some(query) = app.poll_suggestion_query(now) {
        spawner.spawn_fetch_suggestions(client, query.seq, query.text, config.suggestion_limit);
    }
    if let Some(request) = app.take_pending_submit() {
        spawner.spawn_recommend(client, request);
    }
}
