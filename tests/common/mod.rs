#![allow(dead_code)]

use astar_viz::{
    Cell, Connectivity, Cost, GridLayout, ObstacleGenerator, SearchConfig, SearchEngine,
    SearchEvent,
};
use std::collections::VecDeque;

/// Parse a 4-connected layout from text
pub fn layout(text: &str) -> GridLayout {
    GridLayout::parse(text, Connectivity::FourWay).expect("test layout should parse")
}

/// Start a search on `layout` with its default heuristic
pub fn start_engine(layout: &GridLayout) -> SearchEngine {
    let mut engine = SearchEngine::new(SearchConfig::new(layout.grid.connectivity()));
    engine
        .start(layout.grid.clone(), layout.start, layout.goal)
        .expect("layout endpoints are valid");
    engine
}

/// Run to the end and return the engine plus its full event trace
pub fn run(layout: &GridLayout) -> (SearchEngine, Vec<SearchEvent>) {
    let mut engine = start_engine(layout);
    engine.run_to_completion().expect("search runs");
    let events = engine.trace().to_vec();
    (engine, events)
}

/// Path and cost from the terminal event, if the search succeeded
pub fn outcome(events: &[SearchEvent]) -> Option<(Vec<Cell>, Cost)> {
    events.iter().rev().find_map(|e| match e {
        SearchEvent::SearchSucceeded { path, total_cost } => Some((path.clone(), *total_cost)),
        _ => None,
    })
}

/// Random 4-connected layout from a seed, corners as endpoints
pub fn random_layout(rows: i32, cols: i32, density: f64, seed: u64) -> GridLayout {
    ObstacleGenerator::new(density, Some(seed))
        .expect("density in range")
        .layout(
            rows,
            cols,
            Connectivity::FourWay,
            Cell::new(0, 0),
            Cell::new(rows - 1, cols - 1),
        )
        .expect("endpoints stay free")
}

/// Reference shortest distance by breadth-first search (unit step cost)
pub fn bfs_distance(layout: &GridLayout) -> Option<Cost> {
    let grid = &layout.grid;
    let mut dist: Vec<Option<Cost>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();

    dist[grid.index(layout.start)?] = Some(0);
    queue.push_back(layout.start);

    while let Some(cell) = queue.pop_front() {
        let d = dist[grid.index(cell)?]?;
        if cell == layout.goal {
            return Some(d);
        }
        for n in grid.neighbors(cell) {
            let id = grid.index(n)?;
            if dist[id].is_none() {
                dist[id] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

/// Visualize a search result on the layout
pub fn visualize(layout: &GridLayout, events: &[SearchEvent]) -> String {
    match outcome(events) {
        Some((cells, total_cost)) => {
            let path = astar_viz::Path { cells, total_cost };
            format!(
                "\nPath: {}\nCost: {}\n\n{}",
                astar_viz::path::format_path(&path),
                total_cost,
                layout.render_with_path(&path)
            )
        }
        None => format!("\nNo path\n\n{}", layout.to_text()),
    }
}
