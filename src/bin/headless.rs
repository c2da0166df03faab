//! Run the configured search to completion without a window
//!
//! Prints the layout with the path overlaid and a short summary.
//! Usage: headless [--config <config.toml>] [--trace <out.json>]

use astar_viz::path::format_path;
use astar_viz::{logging, Config, Result, SearchEngine, SearchTrace};
use std::env;

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let (config, source) = match flag_value(&args, "--config") {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    logging::init(&config.logging);
    source.log();

    let layout = config.build_layout()?;
    let mut engine = SearchEngine::new(config.search_config()?);
    engine.start(layout.grid.clone(), layout.start, layout.goal)?;
    engine.run_to_completion()?;

    match engine.path() {
        Some(path) => {
            println!("{}", layout.render_with_path(path));
            println!("Path: {}", format_path(path));
            println!("Length: {} steps, cost {}", path.steps(), path.total_cost);
        }
        None => {
            println!("{}", layout.to_text());
            println!("No path from {} to {}", layout.start, layout.goal);
        }
    }
    println!(
        "Steps: {}, visited: {}, frontier left: {}",
        engine.steps_taken(),
        engine.visited_count(),
        engine.frontier_len()
    );

    if let Some(path) = flag_value(&args, "--trace") {
        SearchTrace::record(&engine).save_to_file(path)?;
    }

    Ok(())
}
