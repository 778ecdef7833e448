//! tagtale CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use tagtale_engine::{SimulationConfig, WriterSink};
use tagtale_foundation::Error;
use tagtale_language::pretty::pretty_print_all;
use tagtale_runtime::{Session, dump_world};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    rules: Option<PathBuf>,
    world: Option<PathBuf>,
    ticks: Option<u64>,
    seed: Option<u64>,
    show_help: bool,
    show_version: bool,
    dump_rules: bool,
    dump_world: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn parse_number(flag: &str, value: Option<&String>) -> Result<u64, Box<dyn std::error::Error>> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid {flag} value: {value}").into())
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--dump-rules" => config.dump_rules = true,
            "--dump-world" => config.dump_world = true,
            "--ticks" => {
                i += 1;
                config.ticks = Some(parse_number("--ticks", args.get(i))?);
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number("--seed", args.get(i))?);
            }
            "--world" => {
                i += 1;
                let path = args.get(i).ok_or("--world requires a value")?;
                config.world = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.rules.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.rules = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("tagtale {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let rules = config.rules.ok_or("no rules file given (try --help)")?;
    let mut session = Session::load(&rules, config.world.as_deref()).map_err(located)?;

    if config.dump_rules {
        print!("{}", pretty_print_all(session.rules()));
        return Ok(());
    }

    let mut sim = SimulationConfig::new().with_seed(config.seed);
    if let Some(ticks) = config.ticks {
        sim = sim.with_ticks(ticks);
    }

    let mut sink = WriterSink::new(io::stdout().lock());
    session.run(sim, &mut sink)?;

    if config.dump_world {
        println!();
        print!("{}", dump_world(session.world()));
    }

    Ok(())
}

/// Appends the file and line to the message, when known.
fn located(err: Error) -> Box<dyn std::error::Error> {
    let location = err
        .context
        .as_ref()
        .filter(|context| context.source.is_some())
        .map(ToString::to_string);
    match location {
        Some(location) => format!("{err} ({location})").into(),
        None => err.into(),
    }
}

fn print_help() {
    println!(
        "\x1b[1mtagtale\x1b[0m - Tag-based production rule story generator

\x1b[1mUSAGE:\x1b[0m
    tagtale [OPTIONS] RULES

\x1b[1mARGUMENTS:\x1b[0m
    RULES          Rule file to load

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    --ticks N          Number of ticks to run (default 20)
    --seed N           Seed the random source for a reproducible story
    --world FILE       Load the seed world from FILE instead of the demo tavern

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --dump-rules       Print the loaded rules in normalized form and exit
    --dump-world       Print the world after the run

\x1b[1mLOGGING:\x1b[0m
    Set RUST_LOG (e.g. RUST_LOG=tagtale_engine=debug) for diagnostics on stderr.

\x1b[1mEXAMPLES:\x1b[0m
    tagtale demos/tavern.rules
    tagtale --seed 7 --ticks 5 demos/tavern.rules
    tagtale --world demos/tavern.world --dump-world demos/tavern.rules"
    );
}
