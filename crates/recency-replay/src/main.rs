//! recency-replay - drive a recency cache from a command script

mod replay;
mod script;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::replay::Replayer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Script file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print final statistics as JSON
    #[arg(long)]
    json: bool,

    /// Suppress per-command replies
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Cache capacity: {}", args.capacity);

    let mut replayer = Replayer::new(args.capacity)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let executed = match &args.input {
        Some(path) => {
            info!("Replaying {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            replay_into(&mut replayer, BufReader::new(file), &mut out, args.quiet)?
        }
        None => replay_into(&mut replayer, io::stdin().lock(), &mut out, args.quiet)?,
    };
    info!("Executed {} commands", executed);

    if args.json {
        serde_json::to_writer_pretty(&mut out, &replayer.report())?;
        writeln!(out)?;
    }

    Ok(())
}

fn replay_into<R, W>(replayer: &mut Replayer, input: R, out: &mut W, quiet: bool) -> Result<usize>
where
    R: io::BufRead,
    W: Write,
{
    replayer.run(input, |reply| {
        if !quiet {
            writeln!(out, "{}", reply)?;
        }
        Ok(())
    })
}
