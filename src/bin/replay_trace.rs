//! Replay a saved search trace and check the run is reproduced exactly
//!
//! Reads .json files written by the visualizer (T key) or `headless --trace`.

use astar_viz::{logging, Config, SearchTrace};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <search_trace.json>", args[0]);
        eprintln!("Re-runs the recorded search and compares the event sequences");
        process::exit(1);
    }

    logging::init(&Config::default().logging);

    let filename = &args[1];
    let recorded = match SearchTrace::load_from_file(filename) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Failed to load {}: {}", filename, e);
            process::exit(1);
        }
    };

    println!("=== Search Trace: {} ===", filename);
    println!("{}\n", recorded.summary());

    let replayed = match recorded.replay() {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Replay failed: {}", e);
            process::exit(1);
        }
    };

    match recorded.first_divergence(&replayed) {
        None => println!("Replay identical: {} events", replayed.events.len()),
        Some(i) => {
            println!("Replay DIVERGES at event {}", i);
            println!("  recorded: {:?}", recorded.events.get(i));
            println!("  replayed: {:?}", replayed.events.get(i));
            process::exit(2);
        }
    }
}
