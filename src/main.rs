use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use tracing::info;

use aoc_eval::OrbitOptions;

/// Runs one part of a puzzle against `day{DAY}.in`, or `day{DAY}test{TEST}.in` when a test
/// number precedes the part.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    day: u8,

    /// The part to run (1 or 2), or the test input number when a part follows
    #[arg(value_name = "[TEST] PART")]
    first: u8,

    #[arg(hide = true)]
    second: Option<u8>,

    /// Directory holding the puzzle inputs
    #[arg(long, env = "AOC_INPUTS", default_value = "inputs")]
    inputs: PathBuf,

    /// Object every other object orbits, directly or not
    #[arg(long, default_value = "COM")]
    root: String,

    /// Transfer start: the object orbiting this one moves
    #[arg(long, default_value = "YOU")]
    from: String,

    /// Transfer goal: the object this one orbits
    #[arg(long, default_value = "SAN")]
    to: String,
}

fn main() -> anyhow::Result<()> {
    aoc_eval::logging::init();
    let args = Args::parse();

    let (test, part) = match args.second {
        Some(part) => (Some(args.first), part),
        None => (None, args.first),
    };
    ensure!(part == 1 || part == 2, "part must be 1 or 2, got {part}");
    let fname = match test {
        Some(test) => format!("day{}test{}.in", args.day, test),
        None => format!("day{}.in", args.day),
    };
    let path = args.inputs.join(fname);
    info!(path = %path.display(), "reading input");
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let options = OrbitOptions { root: args.root, from: args.from, to: args.to };
    let time = std::time::Instant::now();
    println!("{}", aoc_eval::solve(args.day, part, &input, &options)?);
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}
