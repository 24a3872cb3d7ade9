use anyhow::{anyhow, Context, Result};
use clap::{arg, Arg, ArgMatches, Command};
use serde_json::{Map, Value};
use std::{fs, path::PathBuf, time::Instant};
use top_algorithms::{Params, RunResult, Solver};
use top_challenges::Dataset;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USIZE_PARAMS: [(&str, &str); 3] = [
    ("pop_size", "pop-size"),
    ("tour_tries_max", "tour-tries-max"),
    ("max_generations", "max-generations"),
];
const F64_PARAMS: [(&str, &str); 3] = [
    ("p_crossover", "p-crossover"),
    ("p_mutate", "p-mutate"),
    ("tpg_percent", "tpg-percent"),
];

fn param_args() -> Vec<Arg> {
    let mut args = vec![
        arg!(--params [PARAMS] "Hyperparameters json string or path to json file")
            .value_parser(clap::value_parser!(String)),
        arg!(--seed [SEED] "Seed for the random number generator")
            .value_parser(clap::value_parser!(u64)),
    ];
    for (name, long) in USIZE_PARAMS {
        args.push(
            Arg::new(name)
                .long(long)
                .help("Overrides the hyperparameter of the same name")
                .value_parser(clap::value_parser!(usize)),
        );
    }
    for (name, long) in F64_PARAMS {
        args.push(
            Arg::new(name)
                .long(long)
                .help("Overrides the hyperparameter of the same name")
                .value_parser(clap::value_parser!(f64)),
        );
    }
    args
}

fn cli() -> Command {
    Command::new("top-worker")
        .about("Solves Team Orienteering Problem instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solves one dataset and verifies the result")
                .arg(
                    arg!(<DATASET> "Path to a TOP dataset file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .args(param_args())
                .arg(arg!(--json "Print the full result as json")),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Solves a dataset, or every dataset in a folder, several times")
                .arg(
                    arg!(<PATH> "TOP dataset file or folder of dataset files")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--runs [RUNS] "Runs per dataset; run i uses seed + i")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                )
                .args(param_args()),
        )
        .subcommand(Command::new("params").about("Describes the solver hyperparameters"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => load_params(sub_m).and_then(|params| {
            solve(
                sub_m.get_one::<PathBuf>("DATASET").unwrap().clone(),
                params,
                sub_m.get_one::<u64>("seed").copied(),
                sub_m.get_flag("json"),
            )
        }),
        Some(("benchmark", sub_m)) => load_params(sub_m).and_then(|params| {
            benchmark(
                sub_m.get_one::<PathBuf>("PATH").unwrap().clone(),
                *sub_m.get_one::<usize>("runs").unwrap(),
                params,
                sub_m.get_one::<u64>("seed").copied(),
            )
        }),
        Some(("params", _)) => {
            top_algorithms::help();
            Ok(())
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve(dataset: PathBuf, params: Params, seed: Option<u64>, json: bool) -> Result<()> {
    let dataset = Dataset::from_top_file(&dataset)?;
    let seed = seed.unwrap_or_else(clock_seed);
    info!(seed, file_name = dataset.file_name(), "solving");

    let result = run_once(&dataset, params, seed)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        for line in result.summary_lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Prints `name, best score, average score, average seconds, best routes` per dataset, where
/// the best routes read `<ids> | <score>, ` for each route of the best run.
fn benchmark(path: PathBuf, runs: usize, params: Params, seed: Option<u64>) -> Result<()> {
    if runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }
    let base_seed = seed.unwrap_or_else(clock_seed);
    info!(seed = base_seed, runs, path = %path.display(), "benchmarking");

    let mut files: Vec<PathBuf> = if path.is_dir() {
        fs::read_dir(&path)
            .with_context(|| format!("Failed to read folder: {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && !p
                        .file_name()
                        .map_or(true, |n| n.to_string_lossy().starts_with('.'))
            })
            .collect()
    } else {
        vec![path.clone()]
    };
    files.sort();

    for file in files {
        let dataset = Dataset::from_top_file(&file)?;
        let mut best: Option<RunResult> = None;
        let mut total_score = 0.0;
        let mut total_secs = 0.0;
        for run in 0..runs {
            let start = Instant::now();
            let result = run_once(&dataset, params, base_seed.wrapping_add(run as u64))?;
            total_secs += start.elapsed().as_secs_f64();
            total_score += result.combined_score();
            if best
                .as_ref()
                .map_or(true, |b| result.combined_score() > b.combined_score())
            {
                best = Some(result);
            }
        }
        let Some(best) = best else {
            continue;
        };
        let listing: String = best
            .routes()
            .iter()
            .map(|r| {
                let ids: Vec<String> = r.points().iter().map(|p| p.id().to_string()).collect();
                format!("{} | {}, ", ids.join(" "), r.total_score())
            })
            .collect();
        println!(
            "{}, {}, {}, {}, {}",
            dataset.file_name().replace(".txt", ""),
            best.combined_score(),
            total_score / runs as f64,
            total_secs / runs as f64,
            listing
        );
    }
    Ok(())
}

fn run_once(dataset: &Dataset, params: Params, seed: u64) -> Result<RunResult> {
    let result = Solver::solve_with_seed(dataset, params, seed_bytes(seed))
        .map_err(|e| anyhow!("Solver failed on {}: {}", dataset.file_name(), e))?;
    dataset
        .verify_solution(&result.solution)
        .map_err(|e| anyhow!("Invalid solution for {}: {}", dataset.file_name(), e))?;
    Ok(result)
}

/// `--params` first, then individual flags on top.
fn load_params(sub_m: &ArgMatches) -> Result<Params> {
    let mut hyperparameters = match sub_m.get_one::<String>("params") {
        None => Map::new(),
        Some(params) => {
            let text = if params.ends_with(".json") {
                fs::read_to_string(params)
                    .with_context(|| format!("Failed to read params file: {}", params))?
            } else {
                params.clone()
            };
            serde_json::from_str::<Map<String, Value>>(&text).context("Failed to parse params")?
        }
    };
    for (name, _) in USIZE_PARAMS {
        if let Some(v) = sub_m.get_one::<usize>(name) {
            hyperparameters.insert(name.to_string(), Value::from(*v));
        }
    }
    for (name, _) in F64_PARAMS {
        if let Some(v) = sub_m.get_one::<f64>(name) {
            hyperparameters.insert(name.to_string(), Value::from(*v));
        }
    }
    Params::initialize(&Some(hyperparameters)).map_err(|e| anyhow!("{}", e))
}

fn seed_bytes(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
