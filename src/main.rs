// Main entry point
use cinesearch::application::browse::{browse_list, movie_details};
use cinesearch::application::search::SearchSession;
use cinesearch::domain::model::{ListKind, SearchSnapshot};
use cinesearch::infrastructure::config::{self, load_config, Config};
use cinesearch::interfaces::cli::Cli;
use cinesearch::presentation::render::{format_details, format_movies, format_snapshot};
use cinesearch::presentation::theme::Theme;
use cinesearch::state::AppState;
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let mut config = load_config()?;
    if let Some(ms) = cli.debounce_ms {
        config.search.debounce_ms = ms;
    }

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor).arg(&config_path).status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }
    if cli.status {
        print_status(&config);
        return Ok(());
    }

    let state = AppState::new(config)?;
    let theme_name = cli
        .theme
        .clone()
        .unwrap_or_else(|| state.config.theme.clone());
    let theme = Theme::from_name(&theme_name);

    tokio::select! {
        result = run(&cli, &state, &theme) => result?,
        _ = shutdown_rx => {
            eprintln!("\nInterrupted");
        }
    }

    Ok(())
}

async fn run(cli: &Cli, state: &AppState, theme: &Theme) -> anyhow::Result<()> {
    let emoji = state.config.enable_emoji;

    if let Some(id) = cli.details {
        let movie = movie_details(state, id).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&movie)?);
        } else {
            print!("{}", format_details(&movie, theme, emoji));
        }
        return Ok(());
    }

    if let Some(list) = cli.list {
        let kind = ListKind::from(list);
        let movies = browse_list(state, kind, cli.page).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&movies)?);
        } else {
            let heading = format!("{} (page {})", kind.path().replace('_', " "), cli.page);
            print!("{}", format_movies(&heading, &movies, theme, emoji));
        }
        return Ok(());
    }

    let session = state.search_session();
    if cli.interactive {
        return run_interactive(&session, &state.config, theme, cli.json).await;
    }

    if cli.query.is_empty() {
        eprintln!("{}", "Please provide a query".red());
        std::process::exit(1);
    }

    let snapshot = session.resolve_now(&cli.query.join(" ")).await;
    let code = snapshot.exit_code();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if let Some(error) = &snapshot.error {
        eprintln!("{}", (theme.error)(&format!("✘ {}", error)));
    } else {
        print!(
            "{}",
            format_movies(&snapshot.query, &snapshot.results, theme, emoji)
        );
    }
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Feed stdin lines into the session as successive query changes and print
/// every state transition.
async fn run_interactive(
    session: &SearchSession,
    config: &Config,
    theme: &Theme,
    json: bool,
) -> anyhow::Result<()> {
    let mut rx = session.subscribe();
    let emoji = config.enable_emoji;

    let printer = async {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            print_snapshot(&snapshot, theme, emoji, json);
        }
    };

    let reader = async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                ":clear" => session.clear_search(),
                _ => session.set_query(&line),
            }
        }

        // Let the last query run to completion before exiting
        let mut done = session.subscribe();
        tokio::time::sleep(config.search.settle_wait()).await;
        while done.borrow_and_update().searching_service.is_some() {
            if done.changed().await.is_err() {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        result = reader => result,
        _ = printer => Ok(()),
    }
}

fn print_snapshot(snapshot: &SearchSnapshot, theme: &Theme, emoji: bool, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(snapshot) {
            println!("{}", line);
        }
        return;
    }
    print!("{}", format_snapshot(snapshot, theme, emoji));
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(config: &Config) {
    println!("{}", "cinesearch Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found (using defaults)".to_string())
    );
    println!("Catalog: {}", config.catalog.base_url);

    if config.catalog.token.is_some() {
        println!("Catalog token: Configured");
    } else {
        println!("Catalog token: Not configured (set {})", config::TMDB_TOKEN_ENV);
    }

    if config.generative_key().is_some() {
        println!("Generative fallback: Enabled");
    } else {
        println!(
            "Generative fallback: Disabled (set {})",
            config::GEMINI_API_KEY_ENV
        );
    }

    println!("Debounce: {} ms", config.search.debounce_ms);
}
