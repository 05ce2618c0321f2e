use crate::pairwise::Op;

/// DP state a cell score ends with.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum State {
    /// Match or mismatch
    M,
    /// Gap in the reference (insertion)
    X,
    /// Gap in the read (deletion)
    Y,
}

// Bit layout of a traceback cell:
// * bits 0-1: predecessor of the M state in the diagonal cell;
// * bit 2: the X state extends the X state of the cell above (otherwise opened from M);
// * bit 3: the Y state extends the Y state of the cell to the left (otherwise opened from M).
const M_FROM_X: u8 = 0b0001;
const M_FROM_Y: u8 = 0b0010;
const M_MASK: u8 = 0b0011;
pub(super) const X_EXTEND: u8 = 0b0100;
pub(super) const Y_EXTEND: u8 = 0b1000;

impl State {
    #[inline(always)]
    pub(super) fn m_flag(self) -> u8 {
        match self {
            State::M => 0,
            State::X => M_FROM_X,
            State::Y => M_FROM_Y,
        }
    }
}

/// Flat (rows + 1) x (cols + 1) matrix of predecessor flags. Rows are read positions, columns are reference positions.
#[derive(Default)]
pub(super) struct TraceMatrix {
    cols: usize,
    cells: Vec<u8>,
}

impl TraceMatrix {
    /// Resize the matrix, reusing the allocated memory where possible.
    pub(super) fn reset(&mut self, rows: usize, cols: usize) {
        self.cols = cols + 1;
        self.cells.clear();
        self.cells.resize((rows + 1) * self.cols, 0);
    }

    #[inline(always)]
    pub(super) fn set(&mut self, row: usize, col: usize, flags: u8) {
        self.cells[row * self.cols + col] = flags;
    }

    #[inline(always)]
    fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    /// Walk back from the given cell and state, writing per-column operations to `ops` in left-to-right order.
    /// The walk stops at the first row when `stop_at_first_row` is set, otherwise at the origin.
    /// Returns the reference column the path starts at.
    pub(super) fn trace(
        &self,
        mut row: usize,
        mut col: usize,
        mut state: State,
        stop_at_first_row: bool,
        is_match: impl Fn(usize, usize) -> bool,
        ops: &mut Vec<Op>,
    ) -> usize {
        ops.clear();
        loop {
            if row == 0 && (col == 0 || stop_at_first_row) {
                break;
            }

            let flags = self.get(row, col);
            match state {
                State::M => {
                    debug_assert!(row > 0 && col > 0);
                    ops.push(if is_match(row - 1, col - 1) {
                        Op::Match
                    } else {
                        Op::Mismatch
                    });
                    state = match flags & M_MASK {
                        M_FROM_X => State::X,
                        M_FROM_Y => State::Y,
                        _ => State::M,
                    };
                    row -= 1;
                    col -= 1;
                }
                State::X => {
                    debug_assert!(row > 0);
                    ops.push(Op::Insertion);
                    if flags & X_EXTEND == 0 {
                        state = State::M;
                    }
                    row -= 1;
                }
                State::Y => {
                    debug_assert!(col > 0);
                    ops.push(Op::Deletion);
                    if flags & Y_EXTEND == 0 {
                        state = State::M;
                    }
                    col -= 1;
                }
            }
        }
        ops.reverse();
        col
    }
}
