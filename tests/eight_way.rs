mod common;

use astar_viz::{
    Cell, Connectivity, Grid, GridLayout, Heuristic, SearchConfig, SearchEngine, SearchStatus,
};

fn eight_way_engine() -> SearchEngine {
    SearchEngine::new(SearchConfig::new(Connectivity::EightWay))
}

#[test]
fn test_open_grid_cost_is_octile_distance() {
    let cases = [
        (Cell::new(0, 0), Cell::new(4, 4)),
        (Cell::new(0, 0), Cell::new(2, 7)),
        (Cell::new(5, 1), Cell::new(0, 3)),
    ];

    for (start, goal) in cases {
        let grid = Grid::new(8, 8).with_connectivity(Connectivity::EightWay);
        let mut engine = eight_way_engine();
        engine.start(grid, start, goal).unwrap();
        engine.run_to_completion().unwrap();

        let path = engine.reconstruct_path().unwrap();
        assert_eq!(
            path.total_cost,
            Heuristic::Octile.estimate(start, goal),
            "{} -> {}",
            start,
            goal
        );
    }
}

#[test]
fn test_pure_diagonal_uses_diagonal_steps() {
    let grid = Grid::new(5, 5).with_connectivity(Connectivity::EightWay);
    let mut engine = eight_way_engine();
    engine.start(grid, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
    engine.run_to_completion().unwrap();

    let path = engine.reconstruct_path().unwrap();
    assert_eq!(path.total_cost, 56);
    assert_eq!(path.len(), 5);
}

#[test]
fn test_no_corner_cutting() {
    // The only diagonal from S to G squeezes between two walls
    let layout = GridLayout::parse(
        "\
S#
#G
",
        Connectivity::EightWay,
    )
    .unwrap();
    let mut engine = eight_way_engine();
    engine
        .start(layout.grid.clone(), layout.start, layout.goal)
        .unwrap();
    engine.run_to_completion().unwrap();
    assert_eq!(engine.status(), SearchStatus::Failed);
}

#[test]
fn test_dijkstra_agrees_with_octile() {
    for seed in 0..15 {
        let layout = astar_viz::ObstacleGenerator::new(0.3, Some(seed))
            .unwrap()
            .layout(
                10,
                12,
                Connectivity::EightWay,
                Cell::new(0, 0),
                Cell::new(9, 11),
            )
            .unwrap();

        let mut astar = eight_way_engine();
        astar
            .start(layout.grid.clone(), layout.start, layout.goal)
            .unwrap();
        astar.run_to_completion().unwrap();

        let config = SearchConfig::new(Connectivity::EightWay)
            .with_heuristic(Heuristic::Zero)
            .unwrap();
        let mut dijkstra = SearchEngine::new(config);
        dijkstra
            .start(layout.grid.clone(), layout.start, layout.goal)
            .unwrap();
        dijkstra.run_to_completion().unwrap();

        assert_eq!(astar.status(), dijkstra.status(), "seed {}", seed);
        assert_eq!(
            astar.path().map(|p| p.total_cost),
            dijkstra.path().map(|p| p.total_cost),
            "seed {}",
            seed
        );
    }
}

#[test]
fn test_diagonal_shortcut_beats_four_way() {
    let text = "\
S...
....
....
...G
";
    let four = common::layout(text);
    let (_, events) = common::run(&four);
    let (_, four_cost) = common::outcome(&events).unwrap();
    assert_eq!(four_cost, 6);

    let eight = GridLayout::parse(text, Connectivity::EightWay).unwrap();
    let mut engine = eight_way_engine();
    engine
        .start(eight.grid.clone(), eight.start, eight.goal)
        .unwrap();
    engine.run_to_completion().unwrap();
    let path = engine.reconstruct_path().unwrap();
    // Three diagonal moves instead of six straight ones
    assert_eq!(path.steps(), 3);
    assert_eq!(path.total_cost, 42);
}
