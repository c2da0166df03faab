//! A* search as a step-driven state machine.
//!
//! The engine performs one frontier expansion per [`SearchEngine::step`] call
//! and reports what changed as [`SearchEvent`]s, so a render loop can animate
//! the search one frame at a time.

use crate::error::{Endpoint, SearchError};
use crate::frontier::PriorityFrontier;
use crate::grid::{Cell, Connectivity, Cost, Grid};
use crate::heuristic::Heuristic;
use crate::path::{self, Path};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Per-cell search bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchNode {
    /// Best known cost from start. `None` means unreached.
    pub g_score: Option<Cost>,
    /// `g_score` plus the heuristic estimate to the goal
    pub f_score: Option<Cost>,
    pub parent: Option<Cell>,
    /// Set once the cell leaves the frontier
    pub visited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchStatus::Succeeded | SearchStatus::Failed)
    }
}

/// Everything a renderer needs to follow the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEvent {
    Visited { cell: Cell },
    FrontierUpdated { cell: Cell, priority: Cost },
    SearchSucceeded { path: Vec<Cell>, total_cost: Cost },
    SearchFailed,
}

/// Movement policy and heuristic for one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub connectivity: Connectivity,
    pub heuristic: Heuristic,
}

impl SearchConfig {
    /// Policy with its default heuristic
    pub fn new(connectivity: Connectivity) -> Self {
        SearchConfig {
            connectivity,
            heuristic: Heuristic::for_connectivity(connectivity),
        }
    }

    /// Swap the heuristic, refusing pairings that would break optimality
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Result<Self, SearchError> {
        if !heuristic.is_admissible_for(self.connectivity) {
            return Err(SearchError::InadmissibleHeuristic {
                heuristic,
                connectivity: self.connectivity,
            });
        }
        self.heuristic = heuristic;
        Ok(self)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Connectivity::default())
    }
}

pub struct SearchEngine {
    config: SearchConfig,
    status: SearchStatus,
    grid: Grid,
    start: Cell,
    goal: Cell,
    /// Indexed by `Grid::index`
    nodes: Vec<SearchNode>,
    frontier: PriorityFrontier<usize>,
    trace: Vec<SearchEvent>,
    steps: usize,
    path: Option<Path>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine {
            config,
            status: SearchStatus::Idle,
            grid: Grid::new(0, 0),
            start: Cell::new(0, 0),
            goal: Cell::new(0, 0),
            nodes: Vec::new(),
            frontier: PriorityFrontier::new(),
            trace: Vec::new(),
            steps: 0,
            path: None,
        }
    }

    /// Begin a new search. Any previous run state is discarded first.
    pub fn start(&mut self, grid: Grid, start: Cell, goal: Cell) -> Result<(), SearchError> {
        self.reset();

        if grid.connectivity() != self.config.connectivity {
            return Err(SearchError::ConnectivityMismatch {
                grid: grid.connectivity(),
                search: self.config.connectivity,
            });
        }
        // Public fields and deserialized traces skip `with_heuristic`
        if !self.config.heuristic.is_admissible_for(self.config.connectivity) {
            return Err(SearchError::InadmissibleHeuristic {
                heuristic: self.config.heuristic,
                connectivity: self.config.connectivity,
            });
        }
        let start_id = check_endpoint(&grid, start, Endpoint::Start)?;
        check_endpoint(&grid, goal, Endpoint::Goal)?;

        let h = self.config.heuristic.estimate(start, goal);
        self.nodes = vec![SearchNode::default(); grid.len()];
        self.nodes[start_id].g_score = Some(0);
        self.nodes[start_id].f_score = Some(h);
        self.frontier.insert_or_decrease(start_id, h);
        self.trace.push(SearchEvent::FrontierUpdated {
            cell: start,
            priority: h,
        });

        debug!(
            "[SearchEngine] start {} -> {} on {}x{} grid, {} blocked, {:?}",
            start,
            goal,
            grid.rows,
            grid.cols,
            grid.blocked_cells().len(),
            self.config
        );

        self.grid = grid;
        self.start = start;
        self.goal = goal;
        self.status = SearchStatus::Running;
        Ok(())
    }

    /// Advance the search by one expansion.
    ///
    /// Terminal states are sticky: stepping a finished search returns no events
    /// and changes nothing.
    pub fn step(&mut self) -> Result<Vec<SearchEvent>, SearchError> {
        match self.status {
            SearchStatus::Idle => Err(SearchError::NotStarted),
            SearchStatus::Succeeded | SearchStatus::Failed => Ok(Vec::new()),
            SearchStatus::Running => {
                let events = self.expand()?;
                self.trace.extend(events.iter().cloned());
                Ok(events)
            }
        }
    }

    fn expand(&mut self) -> Result<Vec<SearchEvent>, SearchError> {
        self.steps += 1;

        if self.frontier.is_empty() {
            self.status = SearchStatus::Failed;
            debug!(
                "[SearchEngine] frontier exhausted after {} steps, no path",
                self.steps
            );
            return Ok(vec![SearchEvent::SearchFailed]);
        }

        let (current_id, priority) = self.frontier.extract_min()?;
        let current = self.grid.cell_at(current_id);

        if self.nodes[current_id].visited {
            trace!("[SearchEngine] skip stale {}", current);
            return Ok(Vec::new());
        }
        self.nodes[current_id].visited = true;
        trace!(
            "[SearchEngine] step {}: expand {} f={}",
            self.steps,
            current,
            priority
        );

        let mut events = vec![SearchEvent::Visited { cell: current }];

        if current == self.goal {
            let path = path::reconstruct(&self.grid, &self.nodes, self.start, self.goal)?;
            debug!(
                "[SearchEngine] reached goal after {} steps, cost {}, {} cells",
                self.steps,
                path.total_cost,
                path.len()
            );
            events.push(SearchEvent::SearchSucceeded {
                path: path.cells.clone(),
                total_cost: path.total_cost,
            });
            self.path = Some(path);
            self.status = SearchStatus::Succeeded;
            return Ok(events);
        }

        // Every cell that entered the frontier has a g score
        let g_current = self.nodes[current_id].g_score.unwrap_or(Cost::MAX);
        let connectivity = self.grid.connectivity();

        for neighbor in self.grid.neighbors(current) {
            let Some(nid) = self.grid.index(neighbor) else {
                continue;
            };
            if self.nodes[nid].visited {
                continue;
            }

            let tentative = g_current.saturating_add(connectivity.step_cost(current, neighbor));
            let improves = self.nodes[nid].g_score.map_or(true, |g| tentative < g);
            if !improves {
                continue;
            }

            let f = tentative.saturating_add(self.config.heuristic.estimate(neighbor, self.goal));
            let node = &mut self.nodes[nid];
            node.g_score = Some(tentative);
            node.f_score = Some(f);
            node.parent = Some(current);
            self.frontier.insert_or_decrease(nid, f);
            events.push(SearchEvent::FrontierUpdated {
                cell: neighbor,
                priority: f,
            });
        }

        Ok(events)
    }

    /// Step until the search terminates, returning every event emitted on the way.
    ///
    /// Each productive step finalizes one cell, so the loop is bounded by the
    /// cell count plus the failing step.
    pub fn run_to_completion(&mut self) -> Result<Vec<SearchEvent>, SearchError> {
        if self.status == SearchStatus::Idle {
            return Err(SearchError::NotStarted);
        }

        let limit = self.grid.len() + 1;
        let mut events = Vec::new();
        while self.status == SearchStatus::Running && self.steps <= limit {
            events.extend(self.step()?);
        }
        Ok(events)
    }

    /// The start-to-goal path. Only available once the search has succeeded.
    pub fn reconstruct_path(&self) -> Result<Path, SearchError> {
        if self.status != SearchStatus::Succeeded {
            return Err(SearchError::NoPath);
        }
        path::reconstruct(&self.grid, &self.nodes, self.start, self.goal)
    }

    /// Path found by the last successful step, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Drop all run state and return to Idle
    pub fn reset(&mut self) {
        self.status = SearchStatus::Idle;
        self.grid = Grid::new(0, 0);
        self.nodes.clear();
        self.frontier.clear();
        self.trace.clear();
        self.steps = 0;
        self.path = None;
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start_cell(&self) -> Cell {
        self.start
    }

    pub fn goal_cell(&self) -> Cell {
        self.goal
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn node(&self, cell: Cell) -> Option<&SearchNode> {
        self.grid.index(cell).and_then(|id| self.nodes.get(id))
    }

    pub fn is_in_frontier(&self, cell: Cell) -> bool {
        self.grid
            .index(cell)
            .is_some_and(|id| self.frontier.contains(&id))
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visited).count()
    }

    /// Every event since `start`, beginning with the seed frontier entry
    pub fn trace(&self) -> &[SearchEvent] {
        &self.trace
    }
}

fn check_endpoint(grid: &Grid, cell: Cell, role: Endpoint) -> Result<usize, SearchError> {
    let Some(id) = grid.index(cell) else {
        return Err(SearchError::InvalidEndpoint {
            role,
            cell,
            reason: "out of bounds",
        });
    };
    if grid.is_blocked(cell) {
        return Err(SearchError::InvalidEndpoint {
            role,
            cell,
            reason: "blocked",
        });
    }
    Ok(id)
}
