use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use editscope_core_rs::num::PrimSInt;

use super::step::{Step, StepWithOffset, StepsWithOffsetsIterator};
use super::{Op, Trace};
use crate::alignable::Alignable;
use crate::alphabet::Nucleotide;

/// Length type of alignment steps. Longer runs are split into several steps.
pub type StepLen = u16;

/// An alignment of a read against a reference.
/// `read` and `reference` are the aligned ranges in the respective sequence coordinates.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Constructor, Dissolve)]
pub struct Alignment<S: PrimSInt> {
    score: S,
    steps: Vec<Step<StepLen>>,
    read: Range<usize>,
    reference: Range<usize>,
}

impl<S: PrimSInt> Alignment<S> {
    /// Checks if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        // Note: length of each step is guaranteed to be non-zero.
        self.steps.is_empty()
    }

    /// Number of alignment columns, i.e. the sum of all step lengths.
    pub fn len(&self) -> usize {
        self.steps.iter().map(|x| *x.len() as usize).sum()
    }

    /// Returns the RLE representation of the alignment.
    pub fn rle(&self) -> String {
        Step::rle_string(self.steps.iter())
    }

    /// Returns alignment steps with tracked read and reference coordinates.
    pub fn tracked_steps(&self) -> impl Iterator<Item = StepWithOffset<StepLen>> + '_ {
        StepsWithOffsetsIterator::new(
            self.steps.iter().cloned(),
            (self.read.start, self.reference.start).into(),
        )
    }

    /// Per-column operations, left to right.
    pub fn columns(&self) -> impl Iterator<Item = Op> + '_ {
        self.steps
            .iter()
            .flat_map(|x| std::iter::repeat_n(*x.op(), *x.len() as usize))
    }

    /// Number of columns with the given operation.
    pub fn count(&self, op: Op) -> usize {
        self.steps
            .iter()
            .filter(|x| *x.op() == op)
            .map(|x| *x.len() as usize)
            .sum()
    }

    /// Percentage of matched columns among all alignment columns. Zero for an empty alignment.
    pub fn homology(&self) -> f64 {
        let total = self.len();
        if total == 0 {
            return 0.0;
        }
        100.0 * self.count(Op::Match) as f64 / total as f64
    }

    /// Render the alignment as a pair of gapped strings with per-column operations.
    /// `read` and `reference` must be the sequences this alignment was computed for.
    pub fn trace<R, F>(&self, read: &R, reference: &F) -> Trace
    where
        R: Alignable<Symbol = Nucleotide> + ?Sized,
        F: Alignable<Symbol = Nucleotide> + ?Sized,
    {
        let columns = self.len();
        let mut aligned_read = String::with_capacity(columns);
        let mut aligned_reference = String::with_capacity(columns);
        let mut ops = Vec::with_capacity(columns);

        for tracked in self.tracked_steps() {
            let (step, start) = (tracked.step, tracked.start);
            for offset in 0..*step.len() as usize {
                let op = *step.op();
                let (r, f) = match op {
                    Op::Match | Op::Mismatch => (
                        read.at(start.read + offset).symbol(),
                        reference.at(start.reference + offset).symbol(),
                    ),
                    Op::Insertion => (read.at(start.read + offset).symbol(), Trace::GAP),
                    Op::Deletion => (Trace::GAP, reference.at(start.reference + offset).symbol()),
                };
                aligned_read.push(r);
                aligned_reference.push(f);
                ops.push(op);
            }
        }
        Trace::new(aligned_read, aligned_reference, ops)
    }
}
