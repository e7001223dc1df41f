// src/main.rs
use std::ops::ControlFlow;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rppg_sentinel::drivers::{LineSource, SampleSource, SyntheticPulseSource};
use rppg_sentinel::{
    run_session, spawn_capture, EngineConfig, EngineOutput, FixedDelayTicker, ImmediateTicker,
    SampleSlot, SessionSummary, SourceFeed, ThreatScoreEngine, TickFeed, Ticker,
};
/// Score a brightness trace for pulse plausibility, one tick per sample.
#[derive(Parser, Debug)]
#[command(name = "rppg-sentinel", version)]
struct Args {
    /// Engine configuration (JSON). Missing keys use defaults.
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,
    /// Recorded trace, one sample per line (`-` or `none` = no face).
    #[arg(short, long, conflicts_with = "synthetic_hz")]
    input: Option<PathBuf>,
    /// Pulse frequency of the built-in synthetic trace.
    #[arg(long, default_value_t = 0.78)]
    synthetic_hz: f64,
    /// Peak amplitude of uniform noise added to the synthetic trace.
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
    /// Peak brightness swing of the synthetic pulse.
    #[arg(long, default_value_t = 2.0)]
    amplitude: f64,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Stop after this many samples.
    #[arg(short = 'n', long, default_value_t = 450)]
    ticks: u64,
    /// Pace ticks at the configured interval with a separate capture thread.
    #[arg(long)]
    realtime: bool,
    #[arg(short, long)]
    debug: bool,
}
fn main() -> Result<()> {
    let args = Args::parse();
    // 日志：默认 info，--debug 时 debug，RUST_LOG 仍可覆盖
    let level = if args.debug { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(level));
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let source: Box<dyn SampleSource + Send> = match &args.input {
        Some(path) => {
            info!("replaying {}", path.display());
            Box::new(
                LineSource::from_path(path)
                    .with_context(|| format!("reading trace {}", path.display()))?,
            )
        }
        None => {
            info!(
                "synthetic pulse at {} Hz, amplitude {}, noise ±{}",
                args.synthetic_hz, args.amplitude, args.noise
            );
            Box::new(
                SyntheticPulseSource::new(config.sample_rate_hz, args.synthetic_hz, args.seed)
                    .with_amplitude(args.amplitude)
                    .with_noise(args.noise),
            )
        }
    };
    let source = Limited {
        inner: source,
        left: args.ticks,
    };
    let mut engine = ThreatScoreEngine::new(config.clone()).context("building engine")?;
    let summary = if args.realtime {
        let slot = SampleSlot::new();
        let capture = spawn_capture(source, slot.clone(), config.tick_interval());
        let mut ticker = FixedDelayTicker::new(config.tick_interval());
        let summary = drive(&mut engine, &mut slot.clone(), &mut ticker);
        capture.stop();
        summary
    } else {
        drive(&mut engine, &mut SourceFeed(source), &mut ImmediateTicker)
    };
    println!(
        "\n{} ticks: {} calibrating, {} scored, {} obscured, {} faults; final score {:.1}",
        summary.ticks,
        summary.calibrating,
        summary.scored,
        summary.obscured,
        summary.faults,
        summary.final_score
    );
    Ok(())
}
fn drive<F: TickFeed, T: Ticker>(
    engine: &mut ThreatScoreEngine,
    feed: &mut F,
    ticker: &mut T,
) -> SessionSummary {
    run_session(engine, feed, ticker, |output| {
        let band = match output {
            EngineOutput::Scored { probability, .. } => output
                .band()
                .map(|b| format!("{} raw {probability}%", b.hex_color()))
                .unwrap_or_default(),
            _ => String::new(),
        };
        println!("{output}  {band}");
        ControlFlow::Continue(())
    })
}
/// Caps an otherwise endless source.
struct Limited {
    inner: Box<dyn SampleSource + Send>,
    left: u64,
}
impl SampleSource for Limited {
    fn next_reading(&mut self) -> Option<rppg_sentinel::Reading> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        self.inner.next_reading()
    }
}
