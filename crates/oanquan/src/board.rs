//! The ring of twelve cells.

use crate::config::RulesConfig;
use crate::types::{Cell, CellIndex, CellKind, RING_SIZE, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Circular board: `[QA, A1..A5, QB, B1..B5]`.
///
/// Boards are replaced wholesale by the resolver; outside the crate they
/// are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; RING_SIZE],
}

impl Board {
    /// Creates the opening layout for `rules`.
    #[instrument(skip(rules))]
    pub fn new(rules: &RulesConfig) -> Self {
        let cells = std::array::from_fn(|i| {
            let index = CellIndex::wrapping(i);
            match index.kind() {
                CellKind::Mandarin => Cell::mandarin(index.side(), *rules.mandarin_value()),
                CellKind::Folk => Cell::folk(index.side(), *rules.folk_stones()),
            }
        });
        Self { cells }
    }

    /// Builds an arbitrary position.
    pub fn from_cells(cells: [Cell; RING_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a position from ordinary stone counts, with both mandarins in place.
    ///
    /// Counts at the mandarin indices are ordinary stones resting in those cells.
    pub fn from_counts(counts: [u32; RING_SIZE], mandarin_value: u32) -> Self {
        let cells = std::array::from_fn(|i| {
            let index = CellIndex::wrapping(i);
            match index.kind() {
                CellKind::Mandarin => {
                    Cell::mandarin(index.side(), mandarin_value).with_stones(counts[i])
                }
                CellKind::Folk => Cell::folk(index.side(), counts[i]),
            }
        });
        Self { cells }
    }

    /// Cell at `index`, taken modulo the ring size.
    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index % RING_SIZE]
    }

    /// All cells in ring order.
    pub fn cells(&self) -> &[Cell; RING_SIZE] {
        &self.cells
    }

    /// True iff the cell holds nothing (holes included).
    pub fn is_empty(&self, index: usize) -> bool {
        self.cell_at(index).is_empty()
    }

    /// Owned folk cells of `side` that hold stones, ascending.
    #[instrument(skip(self))]
    pub fn legal_start_cells(&self, side: Side) -> Vec<CellIndex> {
        side.folk_cells()
            .into_iter()
            .filter(|cell| self.cell_at(cell.get()).stones() > 0)
            .collect()
    }

    /// Ordinary stones resting on `side`'s folk cells.
    pub fn side_stones(&self, side: Side) -> u32 {
        side.folk_cells()
            .iter()
            .map(|cell| self.cell_at(cell.get()).stones())
            .sum()
    }

    /// True when all of `side`'s folk cells are empty.
    pub fn side_is_empty(&self, side: Side) -> bool {
        self.side_stones(side) == 0
    }

    /// True when every folk cell on the board is empty.
    pub fn folk_swept(&self) -> bool {
        self.side_is_empty(Side::A) && self.side_is_empty(Side::B)
    }

    /// Total value held on the board.
    pub fn total_value(&self) -> u32 {
        self.cells.iter().map(Cell::value).sum()
    }

    /// True once both mandarin cells have been captured.
    pub fn both_mandarins_captured(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| cell.kind() == CellKind::Mandarin)
            .all(Cell::is_hole)
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index % RING_SIZE]
    }

    /// Formats the board as a human-readable string.
    ///
    /// B's row is printed right to left above A's row so the ring reads
    /// continuously: `QA` on the left, `QB` on the right.
    pub fn display(&self) -> String {
        let row = |side: Side, reversed: bool| {
            let mut cells: Vec<CellIndex> = side.folk_cells().to_vec();
            if reversed {
                cells.reverse();
            }
            let labels = cells
                .iter()
                .map(|c| format!("{:>4}", c.label()))
                .collect::<String>();
            let stones = cells
                .iter()
                .map(|c| format!("{:>4}", self.cell_at(c.get()).short()))
                .collect::<String>();
            (labels, stones)
        };

        let (b_labels, b_stones) = row(Side::B, true);
        let (a_labels, a_stones) = row(Side::A, false);
        let qa = self.cell_at(Side::A.mandarin_cell().get()).short();
        let qb = self.cell_at(Side::B.mandarin_cell().get()).short();

        let mut result = String::new();
        result.push_str(&format!("{:>6}{}\n", "", b_labels));
        result.push_str(&format!("{:>6}{}\n", "", b_stones));
        result.push_str(&format!("QA {:>5}{:>20}{:>6} QB\n", qa, "", qb));
        result.push_str(&format!("{:>6}{}\n", "", a_stones));
        result.push_str(&format!("{:>6}{}", "", a_labels));
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
