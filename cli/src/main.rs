use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::GameConfig;

use command::{Command, HELP};
use session::{Flow, Session};

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 30)]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = 16)]
    height: usize,

    /// Number of mines
    #[arg(short, long, default_value_t = 99)]
    mines: usize,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn random_seed() -> u64 {
    use web_time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::new(args.width, args.height, args.mines)
        .context("Invalid board options")?;
    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(config, seed);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render::banner(session.board()))?;
    writeln!(stdout, "{HELP}\n")?;
    writeln!(stdout, "{}", session.render())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}, type h for help")?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        }

        if command == Command::Help {
            writeln!(stdout, "{HELP}\n")?;
        }
        writeln!(stdout, "{}", session.render())?;
        if let Some(status) = render::status_line(session.board()) {
            writeln!(stdout, "{status}")?;
        }
    }

    log::debug!("bye");
    Ok(())
}
