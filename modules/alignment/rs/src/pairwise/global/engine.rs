use editscope_core_rs::num::PrimSInt;

use super::traceback::{State, TraceMatrix, X_EXTEND, Y_EXTEND};
use crate::alignable::Alignable;
use crate::alphabet::Nucleotide;
use crate::error::{Error, Result};
use crate::pairwise::alignment::StepLen;
use crate::pairwise::scoring::Scheme;
use crate::pairwise::{Alignment, Op, Step};

/// Which ends of the reference may stay unaligned.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Mode {
    /// Both sequences are aligned end-to-end.
    #[default]
    Global,
    /// The read is aligned end-to-end, leading and trailing reference bases are skipped for free.
    SemiGlobal,
}

/// One row of the three DP states.
#[derive(Default)]
struct Row<S> {
    m: Vec<S>,
    x: Vec<S>,
    y: Vec<S>,
}

impl<S: PrimSInt> Row<S> {
    fn reset(&mut self, cols: usize, value: S) {
        for buffer in [&mut self.m, &mut self.x, &mut self.y] {
            buffer.clear();
            buffer.resize(cols + 1, value);
        }
    }

    #[inline(always)]
    fn unreachable(&mut self, col: usize, neg: S) {
        self.m[col] = neg;
        self.x[col] = neg;
        self.y[col] = neg;
    }

    /// Best state of the cell with M > X > Y priority on ties.
    #[inline(always)]
    fn best(&self, col: usize) -> (S, State) {
        let (m, x, y) = (self.m[col], self.x[col], self.y[col]);
        if m >= x && m >= y {
            (m, State::M)
        } else if x >= y {
            (x, State::X)
        } else {
            (y, State::Y)
        }
    }
}

/// Affine-gap (Gotoh) aligner of reads against references.
///
/// Scores are kept in three rolling rows (match/mismatch, gap in the reference, gap in the read),
/// predecessors in a flat byte matrix. All buffers are owned by the aligner and reused between calls,
/// so a single aligner per thread is enough to process any number of reads.
#[derive(Default)]
pub struct Aligner<S: PrimSInt> {
    mode: Mode,
    band: Option<usize>,
    prev: Row<S>,
    cur: Row<S>,
    tracemat: TraceMatrix,
    ops: Vec<Op>,
}

impl<S: PrimSInt> Aligner<S> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            band: None,
            prev: Row::default(),
            cur: Row::default(),
            tracemat: TraceMatrix::default(),
            ops: Vec::new(),
        }
    }

    /// Restrict the computation to diagonals within `width` of the corridor spanned by the length difference.
    /// Only supported for the global mode.
    pub fn with_band(mut self, width: usize) -> Result<Self> {
        if self.mode != Mode::Global {
            return Err(Error::invalid_input(
                "Banded alignment is only supported in the global mode",
            ));
        }
        self.band = Some(width);
        Ok(self)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn band(&self) -> Option<usize> {
        self.band
    }

    /// Sentinel for unreachable cells. Leaves enough headroom to subtract penalties without overflow.
    #[inline(always)]
    fn neg() -> S {
        S::min_value() >> 2
    }

    /// Inclusive range of reference columns computed for the given read row.
    #[inline(always)]
    fn columns(&self, row: usize, rows: usize, cols: usize) -> (usize, usize) {
        match self.band {
            None => (0, cols),
            Some(width) => {
                let (row, rows, cols, width) =
                    (row as isize, rows as isize, cols as isize, width as isize);
                let lo = (cols - rows).min(0) - width;
                let hi = (cols - rows).max(0) + width;
                ((row + lo).max(0) as usize, (row + hi).clamp(0, cols) as usize)
            }
        }
    }

    /// Compute the optimal alignment of the `read` against the `reference`.
    ///
    /// Ties are resolved deterministically: M > X > Y for the final cell and the diagonal predecessor,
    /// gap opening over gap extension. An empty read yields an all-deletion alignment in the global mode.
    pub fn align<R, F, Sch>(&mut self, read: &R, reference: &F, scheme: &Sch) -> Result<Alignment<S>>
    where
        R: Alignable<Symbol = Nucleotide> + ?Sized,
        F: Alignable<Symbol = Nucleotide> + ?Sized,
        Sch: Scheme<S> + ?Sized,
    {
        let (rows, cols) = (read.len(), reference.len());
        if cols == 0 {
            return Err(Error::invalid_input(
                "Alignment against an empty reference is undefined",
            ));
        }

        let neg = Self::neg();
        self.tracemat.reset(rows, cols);
        self.prev.reset(cols, neg);
        self.cur.reset(cols, neg);

        // First row: the empty read prefix
        let (_, last) = self.columns(0, rows, cols);
        match self.mode {
            Mode::Global => {
                self.cur.m[0] = S::zero();
                for col in 1..=last {
                    let open = self.cur.m[col - 1].saturating_sub(scheme.deletion_open(col - 1));
                    let extend = self.cur.y[col - 1].saturating_sub(scheme.deletion_extend(col - 1));
                    if extend > open {
                        self.cur.y[col] = extend;
                        self.tracemat.set(0, col, Y_EXTEND);
                    } else {
                        self.cur.y[col] = open;
                    }
                }
            }
            Mode::SemiGlobal => {
                for col in 0..=cols {
                    self.cur.m[col] = S::zero();
                }
            }
        }

        for row in 1..=rows {
            std::mem::swap(&mut self.prev, &mut self.cur);
            let (first, last) = self.columns(row, rows, cols);
            let symbol = *read.at(row - 1);

            // Cells right outside of the band must not leak stale values into this or the next row
            if first > 0 {
                self.cur.unreachable(first - 1, neg);
            }
            if last < cols {
                self.cur.unreachable(last + 1, neg);
            }

            for col in first..=last {
                let mut flags = 0;

                // Gap in the reference: consume the read symbol, stay at the same boundary
                let open = self.prev.m[col].saturating_sub(scheme.insertion_open(col));
                let extend = self.prev.x[col].saturating_sub(scheme.insertion_extend(col));
                self.cur.x[col] = if extend > open {
                    flags |= X_EXTEND;
                    extend
                } else {
                    open
                };

                if col == 0 {
                    self.cur.m[col] = neg;
                    self.cur.y[col] = neg;
                } else {
                    // Match or mismatch
                    let (diagonal, state) = self.prev.best(col - 1);
                    flags |= state.m_flag();
                    self.cur.m[col] =
                        diagonal.saturating_add(scheme.score(symbol, *reference.at(col - 1)));

                    // Gap in the read: consume the reference symbol
                    let open = self.cur.m[col - 1].saturating_sub(scheme.deletion_open(col - 1));
                    let extend =
                        self.cur.y[col - 1].saturating_sub(scheme.deletion_extend(col - 1));
                    self.cur.y[col] = if extend > open {
                        flags |= Y_EXTEND;
                        extend
                    } else {
                        open
                    };
                }
                self.tracemat.set(row, col, flags);
            }
        }

        // Select the final cell
        let (end, (score, state)) = match self.mode {
            Mode::Global => (cols, self.cur.best(cols)),
            Mode::SemiGlobal => {
                let mut best = (0, self.cur.best(0));
                for col in 1..=cols {
                    let candidate = self.cur.best(col);
                    if candidate.0 > best.1 .0 {
                        best = (col, candidate);
                    }
                }
                best
            }
        };

        let start = self.tracemat.trace(
            rows,
            end,
            state,
            self.mode == Mode::SemiGlobal,
            |r, f| read.at(r).matches(*reference.at(f)),
            &mut self.ops,
        );

        let mut steps: Vec<Step<StepLen>> = self.ops.iter().map(|op| Step::single(*op)).collect();
        Step::collapse(&mut steps);

        Ok(Alignment::new(score, steps, 0..rows, start..end))
    }
}

/// Align a read against a reference with a temporary global aligner.
pub fn align<S, R, F, Sch>(read: &R, reference: &F, scheme: &Sch) -> Result<Alignment<S>>
where
    S: PrimSInt,
    R: Alignable<Symbol = Nucleotide> + ?Sized,
    F: Alignable<Symbol = Nucleotide> + ?Sized,
    Sch: Scheme<S> + ?Sized,
{
    Aligner::new(Mode::Global).align(read, reference, scheme)
}
