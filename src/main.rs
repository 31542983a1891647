use activity_indicators::{
    config::{DemoConfig, IndicatorConfig},
    render::{Stage, TerminalPresenter},
    runtime::{IndicatorView, RunLoop},
    ActivityIndicator, Color, IndicatorKind, Palette,
};
use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::{
    io::{self, Stdout, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Preview animated activity indicators in the terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The indicators to show: ball-string, continuous, default, pulse or radar.
    #[arg(short, long = "kind", value_name = "KIND")]
    kinds: Vec<IndicatorKind>,

    /// The foreground color, as a name or #rrggbb.
    #[arg(short, long)]
    color: Option<Color>,

    /// Start with every indicator stopped.
    #[arg(long)]
    paused: bool,

    /// Let indicators fill their slot instead of using their default size.
    #[arg(long)]
    resizable: bool,

    /// A YAML configuration file.
    #[arg(long, env = "ACTIVITY_INDICATORS_CONFIG")]
    config: Option<PathBuf>,

    /// Exit after this many seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    duration: Option<Duration>,
}

fn parse_seconds(value: &str) -> anyhow::Result<Duration> {
    let seconds: f64 = value.trim().parse().with_context(|| format!("not a number: {value}"))?;
    Duration::try_from_secs_f64(seconds).with_context(|| format!("invalid duration: {seconds}"))
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => DemoConfig::default(),
        };
        if !self.kinds.is_empty() {
            config.indicators = self.kinds.iter().copied().map(IndicatorConfig::new).collect();
        }
        let mut indicators = config.resolved_indicators();
        for indicator in &mut indicators {
            if let Some(color) = self.color {
                indicator.color = Some(color);
            }
            indicator.animating &= !self.paused;
            indicator.resizable |= self.resizable;
        }
        config.indicators = indicators;
        Ok(config)
    }
}

enum Flow {
    Continue,
    Quit,
}

struct Demo {
    run_loop: RunLoop,
    views: Vec<IndicatorView<Box<dyn ActivityIndicator>>>,
    stage: Stage,
    columns: usize,
    frame_interval: Duration,
    presenter: TerminalPresenter<Stdout>,
}

impl Demo {
    fn new(config: &DemoConfig, palette: &Palette) -> anyhow::Result<Self> {
        let run_loop = RunLoop::new();
        let views = config
            .resolved_indicators()
            .iter()
            .map(|indicator| IndicatorView::mount_owned(indicator.build(palette), &run_loop))
            .collect::<Result<Vec<_>, _>>()?;
        let frame_interval = Duration::from_secs(1) / config.frame_rate;
        Ok(Self {
            run_loop,
            views,
            stage: config.stage(),
            columns: usize::MAX,
            frame_interval,
            presenter: TerminalPresenter::new(io::stdout()),
        })
    }

    fn resize(&mut self, columns: u16) -> io::Result<()> {
        self.columns = usize::from(columns).max(1);
        execute!(self.presenter.writer(), Clear(ClearType::All))
    }

    fn run(&mut self, limit: Option<Duration>) -> anyhow::Result<()> {
        let (columns, _) = terminal::size()?;
        self.resize(columns)?;
        let start = Instant::now();
        loop {
            let now = start.elapsed();
            if limit.is_some_and(|limit| now >= limit) {
                return Ok(());
            }
            self.run_loop.advance_to(now);

            let frames: Vec<_> = self.views.iter().map(|view| view.draw(self.stage.slot, now)).collect();
            let canvas = self.stage.compose_within(&frames, self.columns);
            self.presenter.present(&canvas, 0, 0)?;
            let status_row = u16::try_from(canvas.height().div_ceil(2) + 1).unwrap_or(u16::MAX);
            self.draw_status(status_row)?;

            if event::poll(self.frame_interval)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Flow::Quit = self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(columns, _) => self.resize(columns)?,
                    _ => {}
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
            KeyCode::Char(' ') => {
                for view in &self.views {
                    view.animating().update(|animating| !animating);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn draw_status(&mut self, row: u16) -> io::Result<()> {
        let animating = self.views.iter().filter(|view| view.animating().get()).count();
        let status = format!("{animating}/{} animating    space: start/stop    q: quit", self.views.len());
        let writer = self.presenter.writer();
        queue!(writer, MoveTo(0, row), Clear(ClearType::CurrentLine), Print(status))?;
        writer.flush()
    }
}

/// Puts the terminal in raw mode on the alternate screen until dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.load_config()?;
    let palette = Palette::detected();
    let mut demo = Demo::new(&config, &palette)?;

    let _terminal = TerminalGuard::enter().context("setting up terminal")?;
    demo.run(cli.duration)
}
