use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use beszel_glance::data::duration::parse_duration;
use beszel_glance::logging::{self, LogTarget};
use beszel_glance::{
    events, prepare_snapshot, ui, App, BeszelClient, ConfigOverrides, RenderSnapshot, View,
    WidgetConfig, DEFAULT_RENDER_DELAY,
};

#[derive(Parser, Debug)]
#[command(name = "beszel-glance")]
#[command(version, about = "Terminal glance dashboard for a single Beszel-monitored server")]
struct Args {
    /// Widget parameter as JSON: {"beszelURL": …, "apiToken": …, "serverName": …}
    #[arg(short, long, env = "BESZEL_GLANCE_PARAM", hide_env_values = true)]
    param: Option<String>,

    /// Config file with beszelURL, apiToken and serverName (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Beszel hub base URL (overrides the config file)
    #[arg(long)]
    url: Option<String>,

    /// API bearer token (overrides the config file)
    #[arg(long)]
    token: Option<String>,

    /// Exact name of the server to show (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Dashboard layout
    #[arg(long, value_enum, default_value_t = View::Gauge)]
    view: View,

    /// Time to wait before rendering (e.g., "2s", "500ms")
    #[arg(long, default_value = "2s")]
    delay: String,

    /// Optional HTTP request timeout (e.g., "10s"); none by default
    #[arg(long)]
    timeout: Option<String>,

    /// Write the render snapshot as JSON to this path ("-" for stdout) and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_target = match (&args.log_file, &args.export) {
        (Some(path), _) => LogTarget::File(path),
        (None, Some(_)) => LogTarget::Stderr,
        (None, None) => LogTarget::Off,
    };
    logging::init(log_target)?;

    let delay = parse_duration(&args.delay).unwrap_or_else(|e| {
        warn!(error = %e, "invalid --delay, using default");
        DEFAULT_RENDER_DELAY
    });
    let timeout = args.timeout.as_deref().map(parse_duration).transpose()?;

    let overrides = ConfigOverrides {
        base_url: args.url.clone(),
        api_token: args.token.clone(),
        server_name: args.server.clone(),
    };
    let config = match WidgetConfig::resolve(
        args.param.as_deref(),
        args.config.as_deref(),
        &overrides,
    ) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "widget not configured");
            None
        }
    };

    let snapshot = load_snapshot(config.as_ref(), delay, timeout)?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_snapshot(&snapshot, &export_path);
    }

    run_tui(App::new(snapshot, args.view))
}

/// Run the fetch on a tokio runtime and capture the snapshot after `delay`.
fn load_snapshot(
    config: Option<&WidgetConfig>,
    delay: Duration,
    timeout: Option<Duration>,
) -> Result<RenderSnapshot> {
    let mut builder = BeszelClient::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = Arc::new(builder.build()?);

    let rt = tokio::runtime::Runtime::new()?;
    let snapshot = rt.block_on(prepare_snapshot(config, client, delay));

    // Don't wait on a fetch that outlived the render delay
    rt.shutdown_background();

    Ok(snapshot)
}

/// Run the TUI until the user quits. The snapshot is never refreshed.
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(250))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Write the render snapshot as JSON.
fn export_snapshot(snapshot: &RenderSnapshot, export_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;

    if export_path == Path::new("-") {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    let mut file = std::fs::File::create(export_path)
        .with_context(|| format!("creating {}", export_path.display()))?;
    file.write_all(json.as_bytes())?;

    info!(path = %export_path.display(), "exported snapshot");
    println!("Exported snapshot to: {}", export_path.display());
    Ok(())
}
