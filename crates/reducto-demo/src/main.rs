use anyhow::{Context, Result};
use clap::Parser;
use reducto::{compose, create_store, State, Store};
use reducto_config::StoreConfig;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

mod actions;
mod enhancers;
mod logger;
mod reducer;
mod reducers;
mod script;
mod state;

use enhancers::{logging_enhancer, timing_enhancer};
use script::Line;

/// Reducer runs slower than this are reported
const SLOW_REDUCER: Duration = Duration::from_millis(10);

/// Feed JSON actions into a store holding a counter and a todo list
#[derive(Debug, Parser, PartialEq)]
#[command(name = "reducto-demo")]
#[command(version)]
struct Args {
    /// Config file to use instead of .reducto.toml lookup
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File with one JSON action or directive per line (stdin if omitted)
    input: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Summary {
    dispatched: usize,
    failed: usize,
}

fn main() -> Result<()> {
    // .env may carry RUST_LOG or REDUCTO_DIAGNOSTICS
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StoreConfig::load_from(path)?,
        None => StoreConfig::load(),
    };
    logger::init(&config.log_level);
    log::info!("Starting reducto-demo ({:?} diagnostics)", config.diagnostics);

    let enhancer = compose(vec![logging_enhancer(), timing_enhancer(SLOW_REDUCER)]);
    let store = create_store(
        reducer::root_reducer(config.diagnostics()),
        (),
        Some(enhancer),
    )?;

    let _echo = if config.echo_state {
        Some(store.observable().subscribe(|state: &State| print_state(state))?)
    } else {
        None
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let summary = run(&store, &config, input)?;
    println!(
        "{} action(s) dispatched, {} failed",
        summary.dispatched, summary.failed
    );
    log::info!("Exiting reducto-demo");
    Ok(())
}

/// Feed every line of `input` to the store. Errors of single lines are
/// reported and counted, only I/O errors abort the run.
fn run(store: &Store, config: &StoreConfig, input: impl BufRead) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let number = index + 1;

        let outcome = match script::parse_line(&line) {
            Ok(Line::Skip) => continue,
            Ok(Line::PrintState) => {
                print_state(&store.get_state()?);
                continue;
            }
            Ok(Line::Replace) => store
                .replace_reducer(reducer::root_reducer_with_stats(config.diagnostics()))
                .map_err(anyhow::Error::from),
            Ok(Line::Action(value)) => store.dispatch(value).map(|_| ()).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => summary.dispatched += 1,
            Err(e) => {
                summary.failed += 1;
                log::error!("Line {}: {:#}", number, e);
                eprintln!("line {}: {:#}", number, e);
            }
        }
    }

    Ok(summary)
}

fn print_state(state: &State) {
    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to render state: {}", e),
    }
}
