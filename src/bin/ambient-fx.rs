use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use ambient_fx::{Clock, Engine, EngineConfig, ManualClock, Millis, Population, SystemClock};
use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ambient-fx", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate on a virtual clock and emit one JSON frame per line.
    Simulate(SimulateArgs),
    /// Run in real time and log the live population.
    Run(RunArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Engine configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated time to run, in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    until_ms: u64,

    /// Time between emitted frames, in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path for frames (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Skip frame output, only log the summary.
    #[arg(long, default_value_t = false)]
    no_frames: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock seconds to run before tearing down.
    #[arg(long, default_value_t = 10)]
    seconds: u64,

    /// Host frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Run(args) => cmd_run(args),
        Command::Config => cmd_config(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Running min/max/mean of the live population.
#[derive(Debug, Default)]
struct PopulationStats {
    samples: u64,
    particle_sum: u64,
    particle_min: Option<usize>,
    particle_max: usize,
    spark_max: usize,
}

impl PopulationStats {
    fn record(&mut self, p: Population) {
        self.samples += 1;
        self.particle_sum += p.particles as u64;
        self.particle_min = Some(self.particle_min.map_or(p.particles, |m| m.min(p.particles)));
        self.particle_max = self.particle_max.max(p.particles);
        self.spark_max = self.spark_max.max(p.sparks);
    }

    fn particle_mean(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.particle_sum as f64 / self.samples as f64
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if args.step_ms == 0 {
        anyhow::bail!("--step-ms must be > 0");
    }
    let cfg = load_config(args.config.as_deref())?;
    let (min_life, _) = cfg.particles.lifetime_bounds();
    let clock = ManualClock::new();
    let mut engine = Engine::seeded(cfg, clock.clone(), args.seed)?;

    let mut sink: Option<Box<dyn Write>> = match (&args.out, args.no_frames) {
        (_, true) => None,
        (Some(path), false) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create frames file '{}'", path.display()))?;
            Some(Box::new(BufWriter::new(f)))
        }
        (None, false) => Some(Box::new(BufWriter::new(std::io::stdout().lock()))),
    };

    let mut stats = PopulationStats::default();
    let mut frames = 0u64;
    let mut retired = 0usize;
    {
        let mut mounted = engine.mount();
        while clock.now() < Millis(args.until_ms) {
            clock.advance(args.step_ms);
            let report = mounted.tick()?;
            retired += report.retired.len();

            if clock.now().0 >= min_life {
                stats.record(mounted.population());
            }
            if let Some(w) = sink.as_mut() {
                serde_json::to_writer(&mut *w, &mounted.frame()).context("write frame")?;
                w.write_all(b"\n").context("write frame")?;
                frames += 1;
            }
        }
    }
    if let Some(mut w) = sink {
        w.flush().context("flush frames")?;
    }

    if engine.pending_timers() != 0 || !engine.registry().is_empty() {
        anyhow::bail!(
            "teardown left {} timers and {} entities behind",
            engine.pending_timers(),
            engine.registry().len()
        );
    }

    let particles_mean = format!("{:.1}", stats.particle_mean());
    tracing::info!(
        frames,
        retired,
        particles_min = stats.particle_min.unwrap_or(0),
        particles_max = stats.particle_max,
        %particles_mean,
        sparks_max = stats.spark_max,
        "simulation finished"
    );
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let cfg = load_config(args.config.as_deref())?;
    let clock = SystemClock::new();
    let mut engine = Engine::seeded(cfg, clock, args.seed)?;
    let frame_time = Duration::from_secs(1) / args.fps;
    let until = Millis(args.seconds.saturating_mul(1_000));

    {
        let mut mounted = engine.mount();
        let mut next_report = Millis(1_000);
        loop {
            let now = mounted.clock().now();
            if now >= until {
                break;
            }
            mounted.tick()?;
            let sprites = mounted.snapshot();
            if now >= next_report {
                let pop = mounted.population();
                tracing::info!(
                    %now,
                    particles = pop.particles,
                    sparks = pop.sparks,
                    drawn = sprites.len(),
                    "population"
                );
                next_report = next_report.after(1_000);
            }
            std::thread::sleep(frame_time);
        }
    }

    tracing::info!(
        pending_timers = engine.pending_timers(),
        live = engine.registry().len(),
        "torn down"
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EngineConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
