//! Hex board geometry on a square grid with rhombic adjacency
//!
//! Cells are addressed by `(row, col)` or by linear index `row * size + col`.
//! Player One connects the top row to the bottom row, Player Two connects
//! the left column to the right column.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};

/// Default board size (edge length)
pub const DEFAULT_SIZE: usize = 4;

/// Neighbour offsets (drow, dcol)
/// Index: 0=up, 1=down, 2=left, 3=right, 4=up-right, 5=down-left
pub const DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, -1),
];

// ============================================================================
// PLAYER
// ============================================================================

/// Player colour, carrying the conventional +1 / -1 sign
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// +1, connects top to bottom
    One = 1,
    /// -1, connects left to right
    Two = -1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn sign(self) -> i8 {
        self as i8
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }

    /// Slot in per-player tables (One = 0, Two = 1)
    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::One => 'O',
            Player::Two => 'X',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square Hex board. Clone to snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
}

/// Unchecked serialized form, validated into a `Board`
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = HexError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        if raw.size == 0 {
            return Err(HexError::InvalidSize(0));
        }
        let expected = raw.size.checked_mul(raw.size).ok_or(HexError::InvalidSize(raw.size))?;
        if raw.cells.len() != expected {
            return Err(HexError::Parse(format!(
                "board of size {} has {} cells, expected {}",
                raw.size,
                raw.cells.len(),
                expected
            )));
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Create an empty `size` x `size` board
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HexError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// Occupant of a cell (`None` for empty or out-of-range cells)
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn get_rc(&self, row: usize, col: usize) -> Option<Player> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.get(self.index(row, col))
    }

    /// In-bounds neighbours of a cell, in `DIRECTIONS` order
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let (row, col) = self.coords(cell);
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.size && c < self.size).then(|| self.index(r, c))
        })
    }

    /// True iff the cell exists and is empty
    pub fn is_legal(&self, cell: usize) -> bool {
        matches!(self.cells.get(cell), Some(None))
    }

    /// Empty cells in ascending index order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cells.len()).filter(|&c| self.cells[c].is_none()).collect()
    }

    /// Write a stone into an empty cell
    pub fn apply(&mut self, cell: usize, player: Player) -> Result<()> {
        match self.cells.get_mut(cell) {
            None => Err(HexError::OutOfBounds {
                cell,
                cells: self.size * self.size,
            }),
            Some(Some(_)) => Err(HexError::IllegalMove { cell }),
            Some(slot) => {
                *slot = Some(player);
                Ok(())
            }
        }
    }

    /// Remove a stone (search backtracking only; the game never removes stones)
    pub fn undo(&mut self, cell: usize) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = None;
        }
    }

    /// Place a stone that is removed again when the returned guard drops
    pub fn place(&mut self, cell: usize, player: Player) -> Result<Placement<'_>> {
        self.apply(cell, player)?;
        Ok(Placement { board: self, cell })
    }

    pub fn is_start_edge(&self, cell: usize, player: Player) -> bool {
        let (row, col) = self.coords(cell);
        match player {
            Player::One => row == 0,
            Player::Two => col == 0,
        }
    }

    pub fn is_goal_edge(&self, cell: usize, player: Player) -> bool {
        let (row, col) = self.coords(cell);
        match player {
            Player::One => row == self.size - 1,
            Player::Two => col == self.size - 1,
        }
    }

    /// Cells on the player's start edge that the player owns
    pub fn owned_start_cells(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        (0..self.size)
            .map(move |i| match player {
                Player::One => self.index(0, i),
                Player::Two => self.index(i, 0),
            })
            .filter(move |&cell| self.get(cell) == Some(player))
    }

    /// Does `player` have a chain from their start edge to their goal edge?
    pub fn check_winner(&self, player: Player) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut stack: Vec<usize> = self.owned_start_cells(player).collect();

        while let Some(current) = stack.pop() {
            if self.is_goal_edge(current, player) {
                return true;
            }
            if visited[current] {
                continue;
            }
            visited[current] = true;
            stack.extend(
                self.neighbors(current)
                    .filter(|&n| !visited[n] && self.get(n) == Some(player)),
            );
        }

        false
    }
}

// ============================================================================
// SCOPED PLACEMENT
// ============================================================================

/// A stone placed for the lifetime of this guard
///
/// Dereferences to the board so searches can recurse through it; the cell is
/// emptied again on drop, on every exit path.
pub struct Placement<'a> {
    board: &'a mut Board,
    cell: usize,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.undo(self.cell);
    }
}

// ============================================================================
// TEXT FORMAT
// ============================================================================

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('.', Player::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HexError;

    /// Parse rows of `.`, `O` and `X`; whitespace inside a row is ignored
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<Option<Player>>> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(r, line)| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '.' => Ok(None),
                        'O' | 'o' => Ok(Some(Player::One)),
                        'X' | 'x' => Ok(Some(Player::Two)),
                        other => Err(HexError::Parse(format!(
                            "unexpected symbol '{}' in row {}",
                            other, r
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;

        let size = rows.len();
        if size == 0 {
            return Err(HexError::InvalidSize(0));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(HexError::Parse(format!(
                "row {} has {} cells, expected {}",
                r,
                row.len(),
                size
            )));
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, stones: &[(usize, Player)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(cell, player) in stones {
            board.apply(cell, player).unwrap();
        }
        board
    }

    #[test]
    fn test_neighbors() {
        let board = Board::new(4).unwrap();
        // Corner (0,0): down, right
        let corner: Vec<usize> = board.neighbors(0).collect();
        assert_eq!(corner, vec![4, 1]);
        // Corner (0,3): down, left, down-left
        let obtuse: Vec<usize> = board.neighbors(3).collect();
        assert_eq!(obtuse, vec![7, 2, 6]);
        // Interior (1,1) has all six
        let inner: Vec<usize> = board.neighbors(5).collect();
        assert_eq!(inner, vec![1, 9, 4, 6, 2, 8]);
    }

    #[test]
    fn test_addressing_agrees() {
        let board = Board::new(5).unwrap();
        for cell in 0..board.num_cells() {
            let (r, c) = board.coords(cell);
            assert_eq!(board.index(r, c), cell);
        }
    }

    #[test]
    fn test_apply_illegal() {
        let mut board = Board::new(4).unwrap();
        board.apply(5, Player::One).unwrap();
        assert!(!board.is_legal(5));
        assert!(matches!(
            board.apply(5, Player::Two),
            Err(HexError::IllegalMove { cell: 5 })
        ));
        assert!(matches!(
            board.apply(16, Player::Two),
            Err(HexError::OutOfBounds { cell: 16, cells: 16 })
        ));
        assert_eq!(board.get(5), Some(Player::One));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Board::new(0), Err(HexError::InvalidSize(0))));
    }

    #[test]
    fn test_placement_restores() {
        let mut board = board_with(4, &[(0, Player::One)]);
        let before = board.clone();
        {
            let mut placed = board.place(5, Player::Two).unwrap();
            assert_eq!(placed.get(5), Some(Player::Two));
            let nested = placed.place(6, Player::One).unwrap();
            assert_eq!(nested.get(6), Some(Player::One));
        }
        assert_eq!(board, before);
        assert!(board.place(0, Player::Two).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_winner_left_right() {
        let full = board_with(
            4,
            &[(0, Player::Two), (1, Player::Two), (2, Player::Two), (3, Player::Two)],
        );
        assert!(full.check_winner(Player::Two));
        assert!(!full.check_winner(Player::One));

        let short = board_with(4, &[(0, Player::Two), (1, Player::Two), (2, Player::Two)]);
        assert!(!short.check_winner(Player::Two));
    }

    #[test]
    fn test_winner_diagonal_chain() {
        // Top-right to bottom-left runs along the (1,-1) adjacency
        let board = board_with(
            4,
            &[(3, Player::One), (6, Player::One), (9, Player::One), (12, Player::One)],
        );
        assert!(board.check_winner(Player::One));

        // The other diagonal is not connected
        let broken = board_with(
            4,
            &[(0, Player::One), (5, Player::One), (10, Player::One), (15, Player::One)],
        );
        assert!(!broken.check_winner(Player::One));
    }

    #[test]
    fn test_text_round_trip() {
        let text = "O . X .\n. O . .\nX . . .\n. . . O\n";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.get_rc(0, 0), Some(Player::One));
        assert_eq!(board.get_rc(2, 0), Some(Player::Two));
        assert_eq!(board.to_string(), text);

        let compact: Board = "O.X.\n.O..\nX...\n...O".parse().unwrap();
        assert_eq!(compact, board);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("O . .\n. .".parse::<Board>(), Err(HexError::Parse(_))));
        assert!(matches!(". Z\n. .".parse::<Board>(), Err(HexError::Parse(_))));
        assert!(matches!("".parse::<Board>(), Err(HexError::InvalidSize(0))));
    }

    #[test]
    fn test_json_round_trip() {
        let board = board_with(3, &[(0, Player::One), (4, Player::Two)]);
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_json_rejects_malformed_boards() {
        let short = serde_json::from_str::<Board>(r#"{"size":3,"cells":["One"]}"#);
        assert!(short.unwrap_err().to_string().contains("expected 9"));

        let empty = serde_json::from_str::<Board>(r#"{"size":0,"cells":[]}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn test_player_sign() {
        assert_eq!(Player::One.sign(), 1);
        assert_eq!(Player::Two.sign(), -1);
        assert_eq!(Player::from_sign(-1), Some(Player::Two));
        assert_eq!(Player::from_sign(0), None);
        assert_eq!(Player::One.opponent(), Player::Two);
    }
}
