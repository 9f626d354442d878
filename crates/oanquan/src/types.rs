//! Core domain types for Ô Ăn Quan.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the ring.
pub const RING_SIZE: usize = 12;

/// Ring index of side A's mandarin cell.
pub const MANDARIN_A: usize = 0;

/// Ring index of side B's mandarin cell.
pub const MANDARIN_B: usize = 6;

/// Player side. A always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Side {
    /// First player, owns cells A1..A5.
    A,
    /// Second player, owns cells B1..B5.
    B,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Ring index of the mandarin cell on this side's end.
    pub fn mandarin_cell(self) -> CellIndex {
        match self {
            Side::A => CellIndex(MANDARIN_A),
            Side::B => CellIndex(MANDARIN_B),
        }
    }

    /// The five folk cells owned by this side, in ring order.
    pub fn folk_cells(self) -> [CellIndex; 5] {
        let base = self.mandarin_cell().0 + 1;
        [
            CellIndex(base),
            CellIndex(base + 1),
            CellIndex(base + 2),
            CellIndex(base + 3),
            CellIndex(base + 4),
        ]
    }
}

/// Kind of cell on the ring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum CellKind {
    /// Small cell holding ordinary stones.
    Folk,
    /// End post holding the mandarin stone.
    Mandarin,
}

/// A validated ring index (0..12).
///
/// Layout: `[QA, A1..A5, QB, B1..B5]`. Displays as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(usize);

impl CellIndex {
    /// All ring indices in ring order.
    pub const ALL: [CellIndex; RING_SIZE] = [
        CellIndex(0),
        CellIndex(1),
        CellIndex(2),
        CellIndex(3),
        CellIndex(4),
        CellIndex(5),
        CellIndex(6),
        CellIndex(7),
        CellIndex(8),
        CellIndex(9),
        CellIndex(10),
        CellIndex(11),
    ];

    /// Creates an index, or `None` when out of range.
    pub fn new(index: usize) -> Option<Self> {
        (index < RING_SIZE).then_some(Self(index))
    }

    /// Creates an index, reducing modulo the ring size.
    pub fn wrapping(index: usize) -> Self {
        Self(index % RING_SIZE)
    }

    /// Raw ring index.
    pub fn get(self) -> usize {
        self.0
    }

    /// Kind of cell at this index.
    pub fn kind(self) -> CellKind {
        if self.0 == MANDARIN_A || self.0 == MANDARIN_B {
            CellKind::Mandarin
        } else {
            CellKind::Folk
        }
    }

    /// Side whose end or territory this index lies on.
    pub fn side(self) -> Side {
        if self.0 < MANDARIN_B {
            Side::A
        } else {
            Side::B
        }
    }

    /// Board label (`QA`, `A1`..`A5`, `QB`, `B1`..`B5`).
    pub fn label(self) -> String {
        match self.kind() {
            CellKind::Mandarin => format!("Q{}", self.side()),
            CellKind::Folk => {
                let offset = self.0 - self.side().mandarin_cell().0;
                format!("{}{}", self.side(), offset)
            }
        }
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        CellIndex::new(value).ok_or_else(|| format!("cell index {} out of range", value))
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CellIndex {
    type Err = String;

    /// Parses a label (`A3`, `qb`) or a raw index (`0`..`11`).
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return CellIndex::new(num).ok_or_else(|| format!("cell index {} out of range", num));
        }

        let upper = s.to_ascii_uppercase();
        CellIndex::ALL
            .iter()
            .copied()
            .find(|cell| cell.label() == upper)
            .ok_or_else(|| format!("unknown cell label: {}", s))
    }
}

/// One position on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    owner: Side,
    stones: u32,
    mandarin: u32,
    captured: bool,
}

impl Cell {
    /// A folk cell holding `stones` ordinary stones.
    pub fn folk(owner: Side, stones: u32) -> Self {
        Self {
            kind: CellKind::Folk,
            owner,
            stones,
            mandarin: 0,
            captured: false,
        }
    }

    /// An uncaptured mandarin cell whose mandarin stone is worth `value`.
    pub fn mandarin(owner: Side, value: u32) -> Self {
        Self {
            kind: CellKind::Mandarin,
            owner,
            stones: 0,
            mandarin: value,
            captured: false,
        }
    }

    /// Returns this cell with `stones` ordinary stones.
    pub fn with_stones(mut self, stones: u32) -> Self {
        self.stones = stones;
        self
    }

    /// A captured mandarin cell.
    pub fn hole(owner: Side) -> Self {
        Self {
            kind: CellKind::Mandarin,
            owner,
            stones: 0,
            mandarin: 0,
            captured: true,
        }
    }

    /// Kind of the cell.
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Side owning the cell.
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Ordinary stones in the cell.
    pub fn stones(&self) -> u32 {
        self.stones
    }

    /// Value of the mandarin stone still in the cell (0 for folk cells and holes).
    pub fn mandarin_value(&self) -> u32 {
        self.mandarin
    }

    /// Whether the mandarin stone is still in place.
    pub fn has_mandarin(&self) -> bool {
        self.mandarin > 0
    }

    /// Whether this is a captured mandarin cell.
    pub fn is_hole(&self) -> bool {
        self.captured
    }

    /// Total point value held by the cell.
    pub fn value(&self) -> u32 {
        self.stones + self.mandarin
    }

    /// True when the cell holds nothing. Holes are always empty.
    pub fn is_empty(&self) -> bool {
        self.value() == 0
    }

    /// Short rendering used by board displays.
    pub fn short(&self) -> String {
        match self.kind {
            CellKind::Folk => self.stones.to_string(),
            CellKind::Mandarin if self.captured => "--".to_string(),
            CellKind::Mandarin => format!("{}+{}", self.stones, self.mandarin),
        }
    }

    pub(crate) fn take_stones(&mut self) -> u32 {
        std::mem::take(&mut self.stones)
    }

    pub(crate) fn drop_stone(&mut self) {
        self.stones += 1;
    }

    pub(crate) fn add_stones(&mut self, stones: u32) {
        self.stones += stones;
    }

    /// Empties the cell, returning its value. Mandarin cells become holes.
    pub(crate) fn capture(&mut self) -> u32 {
        let value = self.value();
        self.stones = 0;
        if self.kind == CellKind::Mandarin {
            self.mandarin = 0;
            self.captured = true;
        }
        value
    }
}

/// Banked score per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    /// Side A's bank.
    pub a: u32,
    /// Side B's bank.
    pub b: u32,
}

impl Scores {
    /// Creates a score pair.
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Bank of `side`.
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Sum of both banks.
    pub fn total(&self) -> u32 {
        self.a + self.b
    }

    /// Side with the strictly higher bank, if any.
    pub fn leader(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub(crate) fn bank(&mut self, side: Side, value: u32) {
        match side {
            Side::A => self.a += value,
            Side::B => self.b += value,
        }
    }

    /// Spends `value` from `side`'s bank if it can be covered.
    pub(crate) fn spend(&mut self, side: Side, value: u32) -> bool {
        let bank = match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        };
        if *bank < value {
            return false;
        }
        *bank -= value;
        true
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A {} - {} B", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_ring_layout() {
        let labels: Vec<String> = CellIndex::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["QA", "A1", "A2", "A3", "A4", "A5", "QB", "B1", "B2", "B3", "B4", "B5"]
        );
    }

    #[test]
    fn test_parse_label_and_number() {
        assert_eq!("a3".parse::<CellIndex>(), Ok(CellIndex(3)));
        assert_eq!(" B5 ".parse::<CellIndex>(), Ok(CellIndex(11)));
        assert_eq!("QB".parse::<CellIndex>(), Ok(CellIndex(6)));
        assert_eq!("7".parse::<CellIndex>(), Ok(CellIndex(7)));
        assert!("12".parse::<CellIndex>().is_err());
        assert!("C1".parse::<CellIndex>().is_err());
    }

    #[test]
    fn test_folk_cells_per_side() {
        let a: Vec<usize> = Side::A.folk_cells().iter().map(|c| c.get()).collect();
        let b: Vec<usize> = Side::B.folk_cells().iter().map(|c| c.get()).collect();
        assert_eq!(a, vec![1, 2, 3, 4, 5]);
        assert_eq!(b, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_capture_turns_mandarin_into_hole() {
        let mut cell = Cell::mandarin(Side::B, 10).with_stones(3);
        assert_eq!(cell.capture(), 13);
        assert!(cell.is_hole());
        assert!(cell.is_empty());
    }

    #[test]
    fn test_spend_refuses_overdraft() {
        let mut scores = Scores::new(3, 12);
        assert!(!scores.spend(Side::A, 5));
        assert!(scores.spend(Side::B, 5));
        assert_eq!(scores, Scores::new(3, 7));
    }
}
