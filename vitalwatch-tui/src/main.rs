use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing_subscriber::EnvFilter;
use vitalwatch_sim::{Output, Simulator};
use vitalwatch_tui::{
    data::export, events, ui, App, ChannelSource, ChildConfig, DataSource, FileSource, Settings,
    StreamSource, Thresholds, View, VitalsData,
};

/// Poll interval for push-based sources.
const STREAM_REFRESH: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "vitalwatch", version)]
#[command(about = "Terminal dashboard for monitoring child vital signs")]
struct Args {
    /// Follow a snapshot JSON file written by a simulator
    #[arg(short, long, conflicts_with = "connect")]
    file: Option<PathBuf>,

    /// Connect to a TCP endpoint for newline-delimited snapshots (host:port)
    #[arg(short, long)]
    connect: Option<String>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval (e.g., "1s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Emission interval of the built-in simulator (e.g., "2s")
    #[arg(short, long)]
    interval: Option<String>,

    /// Heart-rate tolerance in bpm before a reading turns critical
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Simulated child as NAME=MONTHS (repeatable, replaces the configured roster)
    #[arg(long = "child", value_name = "NAME=MONTHS", value_parser = parse_child)]
    children: Vec<ChildConfig>,

    /// Export current state to JSON file and exit
    #[arg(short, long, conflicts_with = "connect")]
    export: Option<PathBuf>,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_child(s: &str) -> Result<ChildConfig, String> {
    let (name, months) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=MONTHS, got '{}'", s))?;
    let age_months: f64 = months
        .trim()
        .parse()
        .map_err(|_| format!("invalid age '{}'", months))?;
    Ok(ChildConfig::new(name.trim(), age_months))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let settings = apply_args(Settings::load(args.config.as_deref())?, &args);
    let thresholds = settings.thresholds()?;
    let refresh = settings.refresh_interval()?;

    // Non-interactive export
    if let Some(ref export_path) = args.export {
        return export_to_file(args.file.as_deref(), export_path, &settings, &thresholds);
    }

    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, &settings, thresholds);
    }

    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path));
        return run_tui(source, &settings, thresholds, refresh);
    }

    run_with_simulator(&settings, thresholds)
}

/// Command-line flags take precedence over the settings file and environment.
fn apply_args(mut settings: Settings, args: &Args) -> Settings {
    if let Some(tolerance) = args.tolerance {
        settings.tolerance = tolerance;
    }
    if let Some(ref refresh) = args.refresh {
        settings.refresh = refresh.clone();
    }
    if let Some(ref interval) = args.interval {
        settings.interval = interval.clone();
    }
    if !args.children.is_empty() {
        settings.children = args.children.clone();
    }
    settings
}

/// Send logs to a file; the terminal belongs to the TUI.
fn init_logging(path: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

fn build_simulator(settings: &Settings, output: Option<Output>) -> Result<Simulator> {
    let mut builder = Simulator::builder().interval(settings.emit_interval()?);
    if let Some(output) = output {
        builder = builder.output(output);
    }
    let simulator = builder.build();

    for child in &settings.children {
        simulator
            .register(&child.name, child.age_months)
            .with_context(|| format!("cannot register child '{}'", child.name))?;
    }
    Ok(simulator)
}

/// Run against an in-process simulator feeding a watch channel.
fn run_with_simulator(settings: &Settings, thresholds: Thresholds) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let (output, rx) = Output::watch();
    let simulator = build_simulator(settings, Some(output))?;

    let emission = {
        let _guard = rt.enter();
        simulator.start()
    };

    let source = Box::new(ChannelSource::new(rx, "simulator"));
    let result = run_tui(source, settings, thresholds, STREAM_REFRESH);

    emission.stop();
    result
}

/// Run with a TCP stream data source.
fn run_with_tcp(addr: &str, settings: &Settings, thresholds: Thresholds) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to {}", addr))?;
        tracing::info!(%addr, "connected");
        Ok::<_, anyhow::Error>(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
    })?;

    // Snapshots are pushed, so poll often
    run_tui(source, settings, thresholds, STREAM_REFRESH)
}

/// Run the TUI with the given data source.
fn run_tui(
    source: Box<dyn DataSource>,
    settings: &Settings,
    thresholds: Thresholds,
    refresh_interval: Duration,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before printing a panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app =
        App::new(source, thresholds).with_export_path(settings.export_path.clone());
    tracing::info!(source = app.source_description(), "dashboard started");
    if let Err(e) = app.reload_data() {
        tracing::warn!(error = %e, "initial load failed");
    }

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Summary => ui::summary::render(frame, app, chunks[2]),
                View::Alerts => ui::alerts::render(frame, app, chunks[2]),
                View::Nutrition => ui::nutrition::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                // Content starts after header (1) + tabs (1) + table border (1)
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 3),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            if let Err(e) = app.reload_data() {
                tracing::warn!(error = %e, "reload failed");
            }
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export a snapshot file, or one simulated round of the roster, and exit.
fn export_to_file(
    snapshot_path: Option<&Path>,
    export_path: &Path,
    settings: &Settings,
    thresholds: &Thresholds,
) -> Result<()> {
    let data = match snapshot_path {
        Some(path) => VitalsData::load(path, thresholds)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let simulator = build_simulator(settings, None)?;
            for child in &settings.children {
                simulator.register(&child.name, child.age_months)?.sample()?;
            }
            VitalsData::from_snapshot(simulator.collect(), thresholds)
        }
    };

    export::write(&data, export_path)?;
    println!("Exported vitals to: {}", export_path.display());
    Ok(())
}
