//! dialdeck daemon - drives the six-dial display over a serial link.

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

use dialdeck::clock::{Clock, SystemClock};
use dialdeck::config::{self, Config};
use dialdeck::error::GaugeError;
use dialdeck::sampler::Sampler;
use dialdeck::sources::{OpenMeteoSource, OrsRouteSource, RouteSource};
use dialdeck::transport::{self, ConsoleLink, DeviceLink, SerialLink};

/// Drive a six-dial pressure display from live weather, commute, and desk signals
#[derive(Parser)]
#[command(name = "dialdeck", version)]
struct Cli {
    /// Serial device path (overrides SERIAL_PORT)
    #[arg(long)]
    port: Option<String>,

    /// Load a specific .env file instead of the default lookup
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log frames instead of opening a serial device
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    config::load_dotenv(cli.env_file.as_deref());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GaugeError> {
    let mut config = Config::from_env()?;
    if cli.port.is_some() {
        config.serial_port = cli.port;
    }

    let clock = SystemClock;
    let now = clock.now();
    let event_target = config::event_target_time(config.event_target.as_deref(), now)?;
    info!("event target: {}", event_target.format("%Y-%m-%d %H:%M"));

    let weather_source = OpenMeteoSource::new(config.home.0, config.home.1)?;
    let route_source = match &config.ors_api_key {
        Some(key) => Some(OrsRouteSource::new(
            key.clone(),
            config.home,
            config.destination,
        )?),
        None => {
            warn!("ORS_API_KEY missing; commute dial will hold its neutral value");
            None
        }
    };

    // The link lives in this scope, so the port is released however the
    // loop ends.
    let mut link: Box<dyn DeviceLink> = if cli.dry_run {
        info!("dry run: frames go to the log, no serial device");
        Box::new(ConsoleLink)
    } else {
        let port = config.serial_port.as_deref().ok_or_else(|| {
            GaugeError::Config(
                "SERIAL_PORT is not set (example: /dev/cu.usbmodemXXXX)".to_string(),
            )
        })?;
        info!("opening {port} at {} baud", transport::BAUD_RATE);
        Box::new(SerialLink::open(port)?)
    };

    let mut sampler = Sampler::new(now, event_target, config.event_anchor_10h);
    sampler.run(
        &clock,
        link.as_mut(),
        &weather_source,
        route_source.as_ref().map(|s| s as &dyn RouteSource),
    )
}
