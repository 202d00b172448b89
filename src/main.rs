mod app;
mod canvas;
mod config;
mod error;
mod input;
mod palette;
mod renderer;
mod sampler;
mod session;
mod types;
mod ui;

use app::App;
use chrono::NaiveTime;
use clap::Parser;
use config::Config;
use crossterm::event::{Event, EventStream};
use sampler::TimeSource;
use session::{TerminalSession, Trigger, Triggers, Tui};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::FmtSubscriber;
use types::ViewportSize;

/// Animated day/night sky with a clock
#[derive(Parser, Debug)]
#[command(name = "skyclock", version)]
#[command(about = "Animated day/night sky with a clock, right in your terminal", long_about = None)]
struct Args {
    /// Pin the local time (HH:MM) instead of following the system clock
    #[arg(long, value_parser = sampler::parse_clock_time)]
    at: Option<NaiveTime>,

    /// Reference zone as minutes east of UTC (Lima is -300)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Text shown in the top-left corner
    #[arg(long)]
    title: Option<String>,

    /// Hide the title and clock overlay
    #[arg(long)]
    no_clock: bool,

    /// Frames painted per second
    #[arg(long)]
    fps: Option<u32>,

    /// Supersampling factor per logical pixel (1-4)
    #[arg(long)]
    pixel_ratio: Option<u32>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Args {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(offset) = self.utc_offset {
            config.utc_offset_minutes = offset;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if self.no_clock {
            config.show_clock = false;
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio = ratio;
        }
    }
}

/// Logs go to a file; the terminal belongs to the sky.
fn init_tracing(level: Level) -> Option<WorkerGuard> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("skyclock");
    std::fs::create_dir_all(&dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&dir, "skyclock.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_level);

    let path = args.config.clone().unwrap_or_else(config::config_path);
    let mut cfg = config::load_config_or_default(&path);
    args.apply(&mut cfg);
    cfg.validate()?;

    if args.write_config {
        config::save_config(&path, &cfg)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let source = args.at.map(TimeSource::Fixed).unwrap_or(TimeSource::System);
    let mut app = App::new(cfg, source)?;
    info!(
        title = %app.config.title,
        zone = %app.config.zone_label,
        offset_minutes = app.config.utc_offset_minutes,
        fps = app.config.frame_rate,
        ?source,
        "starting skyclock"
    );

    // Terminal setup; the session restores it on drop, error or not.
    let mut session = TerminalSession::enter()?;
    let result = run_app(session.terminal(), &mut app).await;
    if let Err(e) = session.restore() {
        tracing::error!("failed to restore terminal: {}", e);
    }

    info!(frames = app.frames, "skyclock stopped");
    result
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> anyhow::Result<()> {
    let size = terminal.size()?;
    app.resize(ViewportSize::from_cells(size.width, size.height));

    let mut triggers = Triggers::acquire(
        app.config.frame_rate,
        Duration::from_secs(app.config.resample_interval_secs),
        EventStream::new(),
    );

    loop {
        match triggers.next().await? {
            Trigger::Frame => {
                terminal.draw(|f| ui::draw(f, app))?;
                app.frames = app.frames.wrapping_add(1);
            }
            Trigger::Resample => app.resample(),
            Trigger::Event(Event::Resize(width, height)) => {
                // Surface first, then the redraw that reads it.
                app.resize(ViewportSize::from_cells(width, height));
                terminal.draw(|f| ui::draw(f, app))?;
            }
            Trigger::Event(Event::Key(key)) => input::handle_key(app, key),
            Trigger::Event(_) => {}
            Trigger::Closed => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "skyclock",
            "--utc-offset",
            "-180",
            "--title",
            "Lima",
            "--no-clock",
            "--fps",
            "15",
            "--pixel-ratio",
            "3",
        ]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.utc_offset_minutes, -180);
        assert_eq!(config.title, "Lima");
        assert!(!config.show_clock);
        assert_eq!(config.frame_rate, 15);
        assert_eq!(config.pixel_ratio, 3);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["skyclock"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
        assert_eq!(args.log_level, Level::INFO);
        assert!(args.at.is_none());
    }

    #[test]
    fn at_flag_parses_clock_time() {
        let args = Args::parse_from(["skyclock", "--at", "06:30"]);
        assert_eq!(args.at, NaiveTime::from_hms_opt(6, 30, 0));
        assert!(Args::try_parse_from(["skyclock", "--at", "6pm"]).is_err());
    }
}
