use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialkit::{Gauge, GaugeCommand, GaugeConfig, GaugeSettings, GaugeType};
use log::info;
use rand::Rng;

#[derive(Parser)]
#[command(name = "dialkit", version, about = "Render and drive SVG instrument gauges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the SVG document for one value.
    Render {
        /// TOML settings file; overrides the preset.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Preset::Speed)]
        preset: Preset,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        value: f64,
        /// Writes to stdout when absent.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Feed simulated vehicle data into a gauge and print one JSON patch per update.
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Preset::Speed)]
        preset: Preset,
        #[arg(long, default_value_t = 50)]
        steps: usize,
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Circular 0..100 speedometer.
    Speed,
    /// Semicircular 0..360 compass.
    Heading,
}

impl Preset {
    fn config(self) -> GaugeConfig {
        match self {
            Preset::Speed => GaugeConfig::builder()
                .id("speed")
                .label("EGO Speed")
                .gauge_type(GaugeType::Circular)
                .max_value(100.0)
                .tick_count(12)
                .build(),
            Preset::Heading => GaugeConfig::builder()
                .id("heading")
                .label("EGO Heading")
                .gauge_type(GaugeType::Semicircular)
                .max_value(360.0)
                .build(),
        }
    }

    /// Simulated signal at `t` seconds after start.
    fn sample(self, t: f64) -> f64 {
        match self {
            Preset::Speed => 50.0 + 40.0 * (t * 0.3).sin(),
            Preset::Heading => (t * 30.0) % 360.0,
        }
    }
}

fn load_gauge(config: Option<PathBuf>, preset: Preset) -> anyhow::Result<Gauge> {
    let (config, initial) = match config {
        Some(path) => {
            let settings = GaugeSettings::load(&path)
                .with_context(|| format!("loading settings from {}", path.display()))?;
            (settings.to_config(), settings.initial_value)
        }
        None => (preset.config(), 0.0),
    };
    Ok(Gauge::new(config, initial)?)
}

fn render(
    config: Option<PathBuf>,
    preset: Preset,
    value: f64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut gauge = load_gauge(config, preset)?;
    gauge.set_value(value);
    let svg = gauge.render();
    match output {
        Some(path) => {
            fs_err::write(&path, svg)?;
            info!("Wrote {} ({})", path.display(), gauge.id());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn simulate(
    config: Option<PathBuf>,
    preset: Preset,
    steps: usize,
    interval_ms: u64,
) -> anyhow::Result<()> {
    let mut gauge = load_gauge(config, preset)?;
    let interval = Duration::from_millis(interval_ms);

    let (sender, receiver) = mpsc::channel();
    let producer = thread::spawn(move || {
        let mut rng = rand::rng();
        let start = Instant::now();
        for _ in 0..steps {
            let t = start.elapsed().as_secs_f64();
            let jitter = rng.random_range(-0.5..0.5);
            // Out-of-range samples are clamped by the gauge.
            let value = preset.sample(t) + jitter;
            if sender.send(GaugeCommand::SetValue(value)).is_err() {
                break;
            }
            thread::sleep(interval);
        }
        let _ = sender.send(GaugeCommand::Reset);
    });

    println!("{}", serde_json::to_string(&gauge.patch())?);
    loop {
        thread::sleep(interval);
        if let Some(patch) = gauge.drain_commands(&receiver) {
            println!("{}", serde_json::to_string(&patch)?);
        }
        if producer.is_finished() {
            break;
        }
    }
    if let Some(patch) = gauge.drain_commands(&receiver) {
        println!("{}", serde_json::to_string(&patch)?);
    }
    info!("Simulation of {} finished at {}", gauge.id(), gauge.value());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            config,
            preset,
            value,
            output,
        } => render(config, preset, value, output),
        Commands::Simulate {
            config,
            preset,
            steps,
            interval_ms,
        } => simulate(config, preset, steps, interval_ms),
    }
}
