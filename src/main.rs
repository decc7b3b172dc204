use clap::Parser;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use log::{error, info, warn};
use minimal_timer::audio::AlertSound;
use minimal_timer::config::AppConfig;
use minimal_timer::ui::{ClockView, GlibScheduler};
use minimal_timer_core::{TimerEngine, TimerEvent};
use minimal_timer_types::{AlertSoundConfig, Time};
use std::path::PathBuf;
use std::rc::Rc;

const APP_ID: &str = "org.minimal_timer.MinimalTimer";

/// minimal-timer - drag the clock face to set a countdown
#[derive(Parser, Debug, Clone)]
#[command(name = "minimal-timer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Initial countdown as SS, MM:SS or H:MM:SS
    #[arg(short = 't', long = "time", value_name = "DURATION")]
    time: Option<Time>,

    /// Configuration file to use instead of the default one
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not play a sound when the countdown runs out
    #[arg(long = "mute")]
    mute: bool,

    /// Write the effective configuration and exit
    #[arg(long = "save-config")]
    save_config: bool,
}

fn main() {
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

    info!("Starting minimal-timer v{}", env!("CARGO_PKG_VERSION"));

    let config = effective_config(&cli);

    if cli.save_config {
        let result = match cli.config {
            Some(ref path) => config.save_to_path(path),
            None => config.save(),
        };
        if let Err(e) = result {
            error!("Failed to save configuration: {:#}", e);
            std::process::exit(1);
        }
        info!("Configuration saved");
        return;
    }

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| build_ui(app, &config));

    // Arguments were already parsed by clap
    app.run_with_args(&["minimal-timer"]);
}

/// Config file merged with the command line overrides
fn effective_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::load_or_default(cli.config.as_deref());

    if let Some(time) = cli.time {
        if time.is_negative() {
            warn!("Ignoring negative --time {}", time);
        } else {
            config.timer.initial_time = time;
        }
    }
    if cli.mute {
        config.sound = AlertSoundConfig::muted();
    }

    config
}

fn build_ui(app: &Application, config: &AppConfig) {
    info!("Building UI");

    let window = ApplicationWindow::builder()
        .application(app)
        .title(config.window.title.as_str())
        .default_width(config.window.width)
        .default_height(config.window.height)
        .build();

    let engine = TimerEngine::with_scheduler(config.timer.initial_time, &GlibScheduler);
    if config.timer.start_paused {
        engine.pause();
    }

    // Remaining time in the title bar
    let title = config.window.title.clone();
    let window_weak = window.downgrade();
    engine.on_event(move |event| {
        if let (TimerEvent::TimeChanged(time), Some(window)) = (event, window_weak.upgrade()) {
            window.set_title(Some(&format!("{} - {}", time, title)));
        }
    });

    let sound = Rc::new(AlertSound::spawn());
    let clock_view = ClockView::new(
        engine.clone(),
        config.face.clone(),
        sound,
        config.sound.clone(),
    );

    window.set_child(Some(clock_view.widget()));
    window.present();

    info!(
        "Countdown ready at {}{}",
        engine.time(),
        if engine.is_paused() { " (paused)" } else { "" }
    );
}
