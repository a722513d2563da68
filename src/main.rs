use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use sheet_pulse::config::AppConfig;
use sheet_pulse::core::Session;
use sheet_pulse_types::{ChartKind, DisplayConfig, DisplayModeOverride};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// sheet-pulse - Live charts and text clouds from a polled response sheet
#[derive(Parser, Debug, Clone)]
#[command(name = "sheet-pulse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sheet endpoint URL (overrides the saved one)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Poll a local JSON document instead of an HTTP endpoint
    #[arg(long = "file", value_name = "PATH", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Initial chart kind (bar, barHorizontal, pie)
    #[arg(short = 'c', long = "chart", value_name = "KIND")]
    chart: Option<ChartKind>,

    /// Refresh interval in seconds (1-60)
    #[arg(short = 'i', long = "interval", value_name = "SECS")]
    interval: Option<u64>,

    /// Start with auto-refresh disabled
    #[arg(long = "no-auto-refresh")]
    no_auto_refresh: bool,

    /// Column to show once data arrives (header index, 1 = first question)
    #[arg(long = "column", value_name = "INDEX")]
    column: Option<usize>,

    /// Display mode (auto, chart, text)
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    mode: Option<DisplayModeOverride>,

    /// Save the resulting display setup as the new default
    #[arg(long = "save")]
    save: bool,

    /// Config file to use instead of the platform default
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// A line typed on stdin while a session runs
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Refresh,
    ToggleAutoRefresh,
    Column(usize),
    Mode(DisplayModeOverride),
    Chart(ChartKind),
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Help);
    };
    let arg = parts.next();

    match (word, arg) {
        ("r" | "refresh", None) => Ok(Command::Refresh),
        ("a" | "auto", None) => Ok(Command::ToggleAutoRefresh),
        ("q" | "quit", None) => Ok(Command::Quit),
        ("?" | "h" | "help", None) => Ok(Command::Help),
        ("c" | "column", Some(n)) => n
            .parse()
            .map(Command::Column)
            .map_err(|_| format!("Invalid column index: {}", n)),
        ("m" | "mode", Some(mode)) => mode.parse().map(Command::Mode),
        ("k" | "kind", Some(kind)) => kind.parse().map(Command::Chart),
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}

const HELP: &str = "commands: r (refresh), a (toggle auto-refresh), c N (column), \
m auto|chart|text, k bar|barHorizontal|pie, q (quit)";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting sheet-pulse v{}", env!("CARGO_PKG_VERSION"));

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }),
    };
    apply_overrides(&mut app_config.display, &cli);

    if cli.save {
        match &cli.config {
            Some(path) => app_config.save_to_path(path)?,
            None => app_config.save()?,
        }
        info!("Saved display setup");
    }

    let display = app_config.display.clone();
    let source = sheet_pulse_sources::source_for(&display.endpoint_url)?;
    let mut session = Session::start(display, source)
        .await
        .context("Cannot start session")?;
    info!("Session {} running", session.id());
    if let Some(mode) = cli.mode {
        session.set_display_mode(mode).await;
    }

    let result = run_session(&mut session, cli.column).await;
    session.end();
    result
}

fn apply_overrides(display: &mut DisplayConfig, cli: &Cli) {
    if let Some(url) = &cli.url {
        display.endpoint_url = url.clone();
    }
    if let Some(path) = &cli.file {
        display.endpoint_url = path.display().to_string();
    }
    if let Some(kind) = cli.chart {
        display.chart_kind_default = kind;
    }
    if let Some(secs) = cli.interval {
        display.refresh_interval_secs = secs;
    }
    if cli.no_auto_refresh {
        display.auto_refresh_enabled = false;
    }
}

/// Print a frame per state change and apply stdin commands until quit
async fn run_session(session: &mut Session, initial_column: Option<usize>) -> Result<()> {
    let mut revisions = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut pending_column = initial_column;

    print_frame(session).await?;

    loop {
        tokio::select! {
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(index) = pending_column {
                    if session.state().await.latest_snapshot.is_some() {
                        pending_column = None;
                        if let Err(e) = session.select_column(index).await {
                            warn!("Ignoring --column: {}", e);
                        }
                    }
                }
                print_frame(session).await?;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => eprintln!("{}", HELP),
                    Ok(command) => apply_command(session, command).await,
                    Err(msg) => eprintln!("{}\n{}", msg, HELP),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("stdin closed: {}", e);
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

async fn apply_command(session: &mut Session, command: Command) {
    match command {
        Command::Refresh => {
            if !session.refresh().await {
                info!("Refresh skipped, a fetch is already in flight");
            }
        }
        Command::ToggleAutoRefresh => {
            let enabled = !session.is_auto_refresh();
            session.set_auto_refresh(enabled).await;
        }
        Command::Column(index) => {
            if let Err(e) = session.select_column(index).await {
                eprintln!("{}", e);
            }
        }
        Command::Mode(mode) => session.set_display_mode(mode).await,
        Command::Chart(kind) => session.set_chart_kind(kind).await,
        Command::Quit | Command::Help => {}
    }
}

async fn print_frame(session: &Session) -> Result<()> {
    let frame = session.frame().await;
    println!("{}", serde_json::to_string(&frame)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("r"), Ok(Command::Refresh));
        assert_eq!(parse_command(" a "), Ok(Command::ToggleAutoRefresh));
        assert_eq!(parse_command("c 2"), Ok(Command::Column(2)));
        assert_eq!(parse_command("m text"), Ok(Command::Mode(DisplayModeOverride::Text)));
        assert_eq!(parse_command("k pie"), Ok(Command::Chart(ChartKind::Pie)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Help));
        assert!(parse_command("c two").is_err());
        assert!(parse_command("c").is_err());
        assert!(parse_command("launch").is_err());
    }

    #[test]
    fn test_cli_overrides_saved_setup() {
        let cli = Cli::parse_from([
            "sheet-pulse",
            "https://script.example.com/exec",
            "-c",
            "pie",
            "-i",
            "15",
            "--no-auto-refresh",
        ]);
        let mut display = DisplayConfig::new("https://old.example.com/exec");
        apply_overrides(&mut display, &cli);

        assert_eq!(display.endpoint_url, "https://script.example.com/exec");
        assert_eq!(display.chart_kind_default, ChartKind::Pie);
        assert_eq!(display.refresh_interval_secs, 15);
        assert!(!display.auto_refresh_enabled);
    }
}
