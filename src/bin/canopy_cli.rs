//! Command-line front end: read a profile file, run canopy clustering,
//! optionally filter, and write the result back out.
//!
//! Usage:
//!   canopy-cli <profile-file> [options]
//!
//! Options:
//!   --r-canopy <f>        membership radius (default 0.1)
//!   --r-close <f>         close-set radius (default 0.4)
//!   --r-merge <f>         merge radius (default 0.03)
//!   --r-step <f>          walk-stable threshold (default 0.1)
//!   --workers <n>         discovery worker count (default: available parallelism)
//!   --shuffle-seed <n>    seed an optional pre-discovery shuffle
//!   --max-share <f>       drop canopies whose center's max share exceeds this
//!   --sparsity <n>        drop canopies whose center has fewer than n non-zero components
//!   --top3-share <f>      drop canopies whose center's top-3 share exceeds this
//!   --output <path>       write result here (default: stdout)
//!   -v                    verbose (debug-level) logging to stderr
//!   -q                    quiet: only warnings and errors

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process::ExitCode;

use canopy_clustering::{
    filter_by_max_share, filter_by_sparsity, filter_by_top3_share, read_profiles,
    write_canopies, CanopyClusteringBuilder, Level, Logger, StderrLogger,
};

struct Args {
    profile_path: String,
    r_canopy: f64,
    r_close: f64,
    r_merge: f64,
    r_step: f64,
    workers: usize,
    shuffle_seed: Option<u64>,
    max_share: Option<f64>,
    sparsity: Option<usize>,
    top3_share: Option<f64>,
    output: Option<String>,
    level: Level,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
        raw.next(); // program name

        let mut profile_path = None;
        let mut r_canopy = 0.1;
        let mut r_close = 0.4;
        let mut r_merge = 0.03;
        let mut r_step = 0.1;
        let mut workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let mut shuffle_seed = None;
        let mut max_share = None;
        let mut sparsity = None;
        let mut top3_share = None;
        let mut output = None;
        let mut level = Level::Info;

        let mut rest: Vec<String> = raw.collect();
        let mut i = 0;
        while i < rest.len() {
            let arg = rest[i].clone();
            macro_rules! value {
                () => {{
                    i += 1;
                    rest.get(i).ok_or_else(|| format!("{} requires a value", arg))?
                }};
            }
            match arg.as_str() {
                "-v" => level = Level::Debug,
                "-q" => level = Level::Warn,
                "--r-canopy" => r_canopy = parse_f64(value!(), &arg)?,
                "--r-close" => r_close = parse_f64(value!(), &arg)?,
                "--r-merge" => r_merge = parse_f64(value!(), &arg)?,
                "--r-step" => r_step = parse_f64(value!(), &arg)?,
                "--workers" => workers = parse_usize(value!(), &arg)?,
                "--shuffle-seed" => shuffle_seed = Some(parse_u64(value!(), &arg)?),
                "--max-share" => max_share = Some(parse_f64(value!(), &arg)?),
                "--sparsity" => sparsity = Some(parse_usize(value!(), &arg)?),
                "--top3-share" => top3_share = Some(parse_f64(value!(), &arg)?),
                "--output" => output = Some(value!().clone()),
                other if profile_path.is_none() => profile_path = Some(other.to_string()),
                other => return Err(format!("unrecognized argument: {}", other)),
            }
            i += 1;
        }

        let profile_path = profile_path.ok_or("missing required <profile-file> argument")?;
        if r_close <= r_canopy {
            return Err("--r-close must exceed --r-canopy".to_string());
        }

        Ok(Args {
            profile_path,
            r_canopy,
            r_close,
            r_merge,
            r_step,
            workers,
            shuffle_seed,
            max_share,
            sparsity,
            top3_share,
            output,
            level,
        })
    }
}

fn parse_f64(s: &str, flag: &str) -> Result<f64, String> {
    s.parse().map_err(|_| format!("{} expects a number, got {:?}", flag, s))
}

fn parse_usize(s: &str, flag: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("{} expects a non-negative integer, got {:?}", flag, s))
}

fn parse_u64(s: &str, flag: &str) -> Result<u64, String> {
    s.parse().map_err(|_| format!("{} expects a non-negative integer, got {:?}", flag, s))
}

fn run() -> Result<(), String> {
    let args = Args::parse(std::env::args())?;
    let logger: Box<dyn Logger> = Box::new(StderrLogger::new(args.level));

    let file = File::open(&args.profile_path)
        .map_err(|e| format!("could not open {}: {}", args.profile_path, e))?;
    let points = read_profiles(BufReader::new(file)).map_err(|e| e.to_string())?;

    let mut builder = CanopyClusteringBuilder::new()
        .r_canopy(args.r_canopy)
        .r_close(args.r_close)
        .r_merge(args.r_merge)
        .r_step(args.r_step)
        .workers(args.workers)
        .logger(logger);
    if let Some(seed) = args.shuffle_seed {
        builder = builder.shuffle_seed(seed);
    }

    let mut canopies = builder.build(&points).map_err(|e| e.to_string())?;

    if let Some(x) = args.max_share {
        canopies = filter_by_max_share(canopies, x, &points, &canopy_clustering::NullLogger);
    }
    if let Some(n) = args.sparsity {
        canopies = filter_by_sparsity(canopies, n, &points, &canopy_clustering::NullLogger);
    }
    if let Some(x) = args.top3_share {
        canopies = filter_by_top3_share(canopies, x, &points, &canopy_clustering::NullLogger);
    }

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| format!("could not create {}: {}", path, e))?;
            let mut writer = BufWriter::new(file);
            write_canopies(&mut writer, &canopies, &points).map_err(|e| e.to_string())?;
        }
        None => {
            let mut stdout = std::io::stdout();
            write_canopies(&mut stdout, &canopies, &points).map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(msg) = run() {
        let _ = writeln!(std::io::stderr(), "canopy-cli: {}", msg);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
