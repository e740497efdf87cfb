use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, BufWriter, Write};
use std::time::{Duration, Instant};

use skyburst::terminal::{parse_hex_color, Rgb8, TerminalRenderer};
use skyburst::{FireworksEngine, Result, TailStyle};

const FIXED_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "skyburst", version, about = "Endless fireworks volleys in your terminal")]
#[command(after_help = "Press 'q', ESC, or Ctrl+C to exit")]
struct Cli {
    /// Background color as hex (e.g. 1a1b26)
    #[arg(long, value_parser = parse_hex_color, default_value = "000000")]
    bg_color: Rgb8,

    /// Tail geometry drawn behind rockets and sparks
    #[arg(long, value_enum, default_value_t = Tails::Ribbon)]
    tails: Tails,

    /// Brightness cap applied to every color, 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    brightness: f32,

    /// Seed the random generator for a repeatable show
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tails {
    Ribbon,
    Line,
    None,
}

impl From<Tails> for TailStyle {
    fn from(tails: Tails) -> Self {
        match tails {
            Tails::Ribbon => TailStyle::Ribbon,
            Tails::Line => TailStyle::Line,
            Tails::None => TailStyle::None,
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut engine = FireworksEngine::with_rng(rng, cli.tails.into());

    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(cols as usize, rows as usize, cli.bg_color, cli.brightness);
    log::info!("rendering to {cols}x{rows} cells");

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key)
                    if key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL)) =>
                {
                    break;
                }
                Event::Resize(cols, rows) => {
                    log::debug!("resized to {cols}x{rows}");
                    renderer = TerminalRenderer::new(cols as usize, rows as usize, cli.bg_color, cli.brightness);
                    execute!(out, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            engine.tick();
            accumulator -= FIXED_DT;
        }

        renderer.draw(engine.frame(), out)?;
    }

    log::info!("stopping after {} ticks", engine.ticks());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }
    logger.init();

    let mut out = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = run(&cli, &mut out);

    // Restore the terminal even if the show failed
    execute!(out, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}
