mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use model::{AppModel, CatalogClient, View};
use view::AppView;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Spotify-Shell Starting ===");

    let config = AppConfig::load()?;
    tracing::info!(
        configured = config.supabase_url.is_some() && config.supabase_anon_key.is_some(),
        cache_dir = %config.cache_dir.display(),
        "Configuration loaded"
    );

    let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let catalog = CatalogClient::new(
        http,
        config.supabase_url.as_deref(),
        config.supabase_anon_key.as_deref(),
    );

    let model = Arc::new(AppModel::new(config, catalog));
    let controller = AppController::new(model.clone());

    if !model.catalog.is_configured() {
        model
            .set_error("Catalog not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.".to_string())
            .await;
    }

    // Initial data: sidebar playlists and the home feeds, in the background
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.load_user_playlists(false).await;
    });
    controller.spawn_load_view(View::Home, false);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Spotify-Shell shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: AppController,
) -> Result<()> {
    let model = controller.model.clone();
    let refresh_interval = model.config.refresh_interval();
    let mut last_refresh = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // Periodically re-poll the home feeds
        if last_refresh.elapsed() >= refresh_interval {
            last_refresh = Instant::now();
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.refresh_home().await;
            });
        }

        // Drive the progress clock
        let elapsed = last_tick.elapsed();
        last_tick = Instant::now();
        controller.tick(elapsed).await;

        // Auto-clear old errors (after 5 seconds)
        model.auto_clear_old_errors().await;

        let (shell, ui_state, content_state, should_quit) = (
            model.get_shell_state().await,
            model.get_ui_state().await,
            model.get_content_state().await,
            model.should_quit().await,
        );

        terminal.draw(|f| {
            AppView::render(f, &shell, &ui_state, &content_state);
        })?;

        if should_quit {
            break;
        }

        // Short poll time for smooth progress updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
