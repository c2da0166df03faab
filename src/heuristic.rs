use crate::grid::{Cell, Connectivity, Cost, EIGHT_WAY_DIAGONAL, EIGHT_WAY_STRAIGHT};
use serde::{Deserialize, Serialize};

/// Distance estimate used to order the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// |drow| + |dcol|, exact on an open 4-connected grid
    Manhattan,
    /// Diagonal moves first, then straight, in 10/14 units
    Octile,
    /// Always zero: the search degenerates into Dijkstra
    Zero,
}

impl Heuristic {
    /// Default estimate matching a movement policy
    pub fn for_connectivity(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::FourWay => Heuristic::Manhattan,
            Connectivity::EightWay => Heuristic::Octile,
        }
    }

    pub fn estimate(&self, a: Cell, b: Cell) -> Cost {
        let dr = a.row.abs_diff(b.row);
        let dc = a.col.abs_diff(b.col);
        match self {
            Heuristic::Manhattan => dr + dc,
            Heuristic::Octile => {
                let (lo, hi) = if dr <= dc { (dr, dc) } else { (dc, dr) };
                EIGHT_WAY_DIAGONAL * lo + EIGHT_WAY_STRAIGHT * (hi - lo)
            }
            Heuristic::Zero => 0,
        }
    }

    /// Whether this estimate never overestimates under the given policy.
    ///
    /// Manhattan over-counts diagonal moves. Octile is scaled for 10/14 step
    /// costs and over-counts unit steps.
    pub fn is_admissible_for(&self, connectivity: Connectivity) -> bool {
        match (self, connectivity) {
            (Heuristic::Zero, _) => true,
            (Heuristic::Manhattan, Connectivity::FourWay) => true,
            (Heuristic::Manhattan, Connectivity::EightWay) => false,
            (Heuristic::Octile, Connectivity::EightWay) => true,
            (Heuristic::Octile, Connectivity::FourWay) => false,
        }
    }
}
