use activity_indicators::{
    config::{DemoConfig, IndicatorConfig, MAX_SCALE},
    render::{Stage, TerminalPresenter},
    runtime::{IndicatorView, RunLoop},
    Color, IndicatorKind, Palette,
};
use clap::Parser;
use std::{
    io::{self, Write},
    time::Duration,
};

/// Print frames of an indicator to stdout without taking over the terminal.
#[derive(Parser)]
#[command(about)]
struct Args {
    /// The indicator to render.
    kind: IndicatorKind,

    /// How many frames to print.
    #[arg(short, long, default_value_t = 6)]
    frames: u32,

    /// Frames per second of simulated time.
    #[arg(long, default_value_t = 4)]
    fps: u32,

    /// The foreground color, as a name or #rrggbb.
    #[arg(short, long)]
    color: Option<Color>,

    /// Render the indicator stopped.
    #[arg(long)]
    paused: bool,

    /// Let the indicator fill its slot.
    #[arg(long)]
    resizable: bool,

    /// Terminal pixels per point.
    #[arg(long, default_value_t = 0.5)]
    scale: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0, "fps must be greater than zero");

    let defaults = DemoConfig::default();
    let scale = args.scale;
    anyhow::ensure!(scale > 0.0 && scale <= MAX_SCALE, "scale must be in (0, {MAX_SCALE}]");

    let indicator = IndicatorConfig {
        kind: args.kind,
        color: args.color,
        animating: !args.paused,
        resizable: args.resizable,
    };
    let slot = args.kind.default_size().scaled(1.5);
    let stage = Stage { slot, scale, gap: 0, background: defaults.background };

    let run_loop = RunLoop::new();
    let view = IndicatorView::mount_owned(indicator.build(&Palette::detected()), &run_loop)?;
    let mut presenter = TerminalPresenter::new(io::stdout());
    for frame in 0..args.frames {
        let now = Duration::from_secs_f64(frame as f64 / args.fps as f64);
        let ticks = run_loop.advance_to(now);
        let canvas = stage.compose(&[view.draw(slot, now)]);
        writeln!(presenter.writer(), "{} at {now:?} ({ticks} ticks)", args.kind)?;
        presenter.write_lines(&canvas)?;
    }
    Ok(())
}
