mod config;
mod fireworks;
mod greeting;
mod render;
mod scene;
mod scheduler;

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor, execute, terminal,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
};
use log::info;

use fireworks::spawner::DEFAULT_SPAWN_INTERVAL;
use greeting::Greeting;
use render::{Canvas, ColorMode, RenderMode, Surface};
use scene::Scene;

const DEFAULT_FPS: u32 = 60;
const DEFAULT_ZOOM: f64 = 4.0;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
/// Smallest terminal the display draws into.
const MIN_COLS: u16 = 10;
const MIN_ROWS: u16 = 5;

#[derive(Parser)]
#[command(name = "diwali-sky", about = "Festival greeting card with a firework display")]
struct Cli {
    /// Show the greeting as sent by NAME
    #[arg(long, value_name = "NAME", conflicts_with = "link")]
    from: Option<String>,

    /// Open a shared greeting link (reads its `from` parameter)
    #[arg(long, value_name = "URL")]
    link: Option<String>,

    /// Print a shareable link greeting from NAME, then exit
    #[arg(long, value_name = "NAME")]
    share: Option<String>,

    /// Page address used by --share
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Render mode
    #[arg(short, long, value_enum)]
    render: Option<RenderMode>,

    /// Color mode
    #[arg(short, long, value_enum)]
    color: Option<ColorMode>,

    /// Target FPS (1-120)
    #[arg(short, long)]
    fps: Option<u32>,

    /// Surface pixels per canvas dot
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Milliseconds between rocket launches
    #[arg(short, long, value_name = "MS")]
    interval: Option<u64>,

    /// Hide the status bar for pure animation mode
    #[arg(long)]
    clean: bool,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,

    /// Print the config file path and exit
    #[arg(long)]
    show_config: bool,

    /// Print a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

/// Settings after merging CLI over config over defaults.
struct Settings {
    greeting: Greeting,
    render: RenderMode,
    color: ColorMode,
    fps: u32,
    zoom: f64,
    spawn_interval: Duration,
    clean: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        match config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No config directory on this platform"),
        }
        return Ok(());
    }
    if cli.init_config {
        print!("{}", config::default_config_string());
        return Ok(());
    }

    let cfg = config::load_config();
    init_logging(cli.log_file.as_deref().or(cfg.log_file.as_deref()))?;

    if let Some(ref name) = cli.share {
        let base = cli
            .base_url
            .as_deref()
            .or(cfg.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        let link = greeting::share_link(base, name);
        println!("{}", link);
        println!("{}", greeting::whatsapp_link(&greeting::share_message(name, &link)));
        return Ok(());
    }

    let greeting = match (&cli.from, &cli.link) {
        (Some(name), _) => Greeting::new(Some(name.clone())),
        (None, Some(url)) => Greeting::from_url(url),
        (None, None) => Greeting::default(),
    };
    let settings = Settings {
        greeting,
        render: cli.render.or(cfg.render.map(Into::into)).unwrap_or(RenderMode::Braille),
        color: cli.color.or(cfg.color.map(Into::into)).unwrap_or(ColorMode::TrueColor),
        fps: cli.fps.or(cfg.fps).unwrap_or(DEFAULT_FPS).clamp(1, 120),
        zoom: cli.zoom.or(cfg.zoom).unwrap_or(DEFAULT_ZOOM).clamp(0.25, 16.0),
        spawn_interval: cli
            .interval
            .or(cfg.spawn_interval_ms)
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(DEFAULT_SPAWN_INTERVAL),
        clean: cli.clean || cfg.clean.unwrap_or(false),
    };

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut writer = BufWriter::with_capacity(256 * 1024, stdout);
    let result = run_loop(&mut writer, &settings);

    // Cleanup
    execute!(writer, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

/// Logs go to `log_file` when given; otherwise stderr, silent unless RUST_LOG is set.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

const RENDER_MODES: [RenderMode; 3] = [RenderMode::Braille, RenderMode::HalfBlock, RenderMode::Ascii];
const COLOR_MODES: [ColorMode; 4] = [ColorMode::TrueColor, ColorMode::Ansi256, ColorMode::Ansi16, ColorMode::Mono];

/// Canvas for the current terminal, or `None` while it is too small to draw.
fn build_canvas(cols: u16, rows: u16, hide_status: bool, render: RenderMode, color: ColorMode, zoom: f64) -> Option<Canvas> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return None;
    }
    let display_rows = if hide_status { rows as usize } else { rows as usize - 1 };
    Some(Canvas::new(cols as usize, display_rows, render, color, zoom))
}

fn run_loop(stdout: &mut BufWriter<io::Stdout>, settings: &Settings) -> anyhow::Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut render_mode = settings.render;
    let mut color_mode = settings.color;
    let mut hide_status = settings.clean;
    let mut canvas = build_canvas(cols, rows, hide_status, render_mode, color_mode, settings.zoom);

    let mut scene = Scene::start(
        settings.fps,
        settings.spawn_interval,
        Box::new(rand::rng()),
        Instant::now(),
    );
    let banner = settings.greeting.banner();
    info!("greeting from {:?}", settings.greeting.sender());

    let mut frame_count: u64 = 0;
    let mut actual_fps: f64 = 0.0;
    let mut fps_update = Instant::now();
    let mut rebuild_canvas = false;

    while scene.is_running() {
        // Sleep in the input poll until the next trigger is due
        let wait = scene
            .next_wake()
            .map(|t| t.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::from_millis(100));
        let mut ready = event::poll(wait)?;
        while ready {
            match event::read()? {
                Event::Resize(w, h) => {
                    cols = w;
                    rows = h;
                    rebuild_canvas = true;
                }
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => scene.stop(),
                    // Cycle render mode
                    KeyCode::Char('r') => {
                        let idx = RENDER_MODES.iter().position(|&m| m == render_mode).unwrap_or(0);
                        render_mode = RENDER_MODES[(idx + 1) % RENDER_MODES.len()];
                        rebuild_canvas = true;
                    }
                    // Cycle color mode
                    KeyCode::Char('c') => {
                        let idx = COLOR_MODES.iter().position(|&m| m == color_mode).unwrap_or(0);
                        color_mode = COLOR_MODES[(idx + 1) % COLOR_MODES.len()];
                        rebuild_canvas = true;
                    }
                    // Toggle status bar
                    KeyCode::Char('h') => {
                        hide_status = !hide_status;
                        rebuild_canvas = true;
                    }
                    _ => {}
                },
                _ => {}
            }
            ready = event::poll(Duration::ZERO)?;
        }

        // Only the canvas is rebuilt; rockets keep their absolute positions
        if rebuild_canvas {
            canvas = build_canvas(cols, rows, hide_status, render_mode, color_mode, settings.zoom);
            write!(stdout, "\x1b[2J\x1b[H")?;
            stdout.flush()?;
            rebuild_canvas = false;
        }

        let now = Instant::now();
        let drew = scene.pump(now, canvas.as_mut().map(|c| c as &mut dyn Surface));
        let Some(canvas) = canvas.as_ref().filter(|_| drew) else {
            continue;
        };

        stdout.write_all(b"\x1b[H")?;
        stdout.write_all(canvas.render().as_bytes())?;

        frame_count += 1;
        if fps_update.elapsed() >= Duration::from_secs(1) {
            actual_fps = frame_count as f64 / fps_update.elapsed().as_secs_f64();
            frame_count = 0;
            fps_update = Instant::now();
        }
        if !hide_status {
            let status = format!(
                " {} | {} live | {:?} | {:?} | {:.0} fps | [r] render  [c] color  [h] hide  [q] quit ",
                banner,
                scene.field().len(),
                render_mode,
                color_mode,
                actual_fps,
            );
            let w = cols as usize;
            let truncated: String = status.chars().take(w).collect();
            let padded = format!("{:<width$}", truncated, width = w);
            write!(stdout, "\x1b[{};1H\x1b[7m{}\x1b[0m", rows, padded)?;
        }

        // Single flush per frame
        stdout.flush()?;
    }
    Ok(())
}
