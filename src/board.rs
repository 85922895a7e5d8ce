use std::fmt;

/// Board dimension used by the interactive shells. The win-line generation
/// below works for any square board; the numpad input scheme assumes 3.
pub const DIMENSION: usize = 3;

/// Every winning line on an n×n board: each row, each column, and the two
/// diagonals. For n = 3 this reproduces the classic table of 8 triples.
pub fn win_lines(dimension: usize) -> Vec<Vec<usize>> {
    let n = dimension;
    if n == 0 {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(2 * n + 2);
    // Horizontal
    for row in 0..n {
        lines.push((0..n).map(|col| row * n + col).collect());
    }
    // Vertical
    for col in 0..n {
        lines.push((0..n).map(|row| row * n + col).collect());
    }
    // Diagonal
    lines.push((0..n).map(|i| i * (n + 1)).collect());
    lines.push((1..=n).map(|i| i * (n - 1)).collect());
    lines
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimension: usize,
    squares: Vec<Option<Mark>>,
}

impl Board {
    pub fn new() -> Self {
        Self::with_dimension(DIMENSION)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        let squares = vec![None; dimension * dimension];
        Self { dimension, squares }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of squares, dimension².
    pub fn size(&self) -> usize {
        self.squares.len()
    }

    pub fn square(&self, index: usize) -> Option<Mark> {
        self.squares[index]
    }

    pub fn squares(&self) -> &[Option<Mark>] {
        &self.squares
    }

    /// Returns a new board with `index` marked; the original is untouched.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = self.clone();
        new_board.squares[index] = Some(mark);
        new_board
    }

    fn display_squares(&self) -> Vec<&'static str> {
        self.squares
            .iter()
            .map(|square| match square {
                Some(Mark::X) => "X",
                Some(Mark::O) => "O",
                None => " ",
            })
            .collect()
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        index < self.squares.len() && self.squares[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| square.is_some())
    }

    /// The mark holding a complete line, if any. Lines are checked in a fixed
    /// order, so boards with several complete lines resolve deterministically.
    pub fn get_winner(&self) -> Option<Mark> {
        for seq in win_lines(self.dimension) {
            let first = self.squares[seq[0]];
            if first.is_some() && seq.iter().map(|i| self.squares[*i]).all(|x| x == first) {
                return first;
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension;
        let ds = self.display_squares();
        let rule = vec!["---"; n].join("+");
        // Highest row on top, numpad style: square 1 is bottom-left.
        for row in (0..n).rev() {
            let cells: Vec<&str> = (0..n).map(|col| ds[row * n + col]).collect();
            writeln!(f, " {}", cells.join(" | "))?;
            if row > 0 {
                writeln!(f, "{}", rule)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_generates_the_classic_lines() {
        let lines = win_lines(3);
        assert_eq!(lines.len(), 8);
        for expected in [
            vec![0, 1, 2],
            vec![3, 4, 5],
            vec![6, 7, 8],
            vec![0, 3, 6],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![0, 4, 8],
            vec![2, 4, 6],
        ] {
            assert!(lines.contains(&expected), "missing line {:?}", expected);
        }
    }

    #[test]
    fn four_by_four_generates_ten_lines() {
        let lines = win_lines(4);
        assert_eq!(lines.len(), 10);
        assert!(lines.contains(&vec![0, 5, 10, 15]));
        assert!(lines.contains(&vec![3, 6, 9, 12]));
    }

    #[test]
    fn empty_board_has_no_winner() {
        assert_eq!(Board::new().get_winner(), None);
    }

    #[test]
    fn a_complete_row_wins() {
        let board = Board::new()
            .mark(3, Mark::X)
            .mark(4, Mark::X)
            .mark(5, Mark::X);
        assert_eq!(board.get_winner(), Some(Mark::X));
    }

    #[test]
    fn a_complete_column_wins_on_a_larger_board() {
        let board = Board::with_dimension(4)
            .mark(1, Mark::O)
            .mark(5, Mark::O)
            .mark(9, Mark::O)
            .mark(13, Mark::O);
        assert_eq!(board.get_winner(), Some(Mark::O));
    }

    #[test]
    fn an_incomplete_line_does_not_win() {
        let board = Board::new().mark(0, Mark::O).mark(4, Mark::O);
        assert_eq!(board.get_winner(), None);
    }

    #[test]
    fn a_full_board_without_a_line_has_no_winner() {
        let board = [
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (3, Mark::X),
            (4, Mark::O),
            (5, Mark::O),
            (6, Mark::O),
            (7, Mark::X),
            (8, Mark::X),
        ]
        .iter()
        .fold(Board::new(), |board, &(index, mark)| board.mark(index, mark));
        assert!(board.is_full());
        assert_eq!(board.get_winner(), None);
    }

    #[test]
    fn marking_leaves_the_original_board_untouched() {
        let board = Board::new();
        let marked = board.mark(4, Mark::X);
        assert!(board.is_valid_move(4));
        assert!(!marked.is_valid_move(4));
        assert_eq!(marked.square(4), Some(Mark::X));
    }

    #[test]
    fn out_of_range_indices_are_not_valid_moves() {
        assert!(!Board::new().is_valid_move(9));
    }

    #[test]
    fn display_draws_the_grid() {
        let board = Board::new().mark(6, Mark::X).mark(2, Mark::O);
        let rendered = board.to_string();
        assert_eq!(
            rendered,
            " X |   |  \n---+---+---\n   |   |  \n---+---+---\n   |   | O\n"
        );
    }
}
