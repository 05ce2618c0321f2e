use std::borrow::Borrow;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};
use eyre::Result;

use editscope_core_rs::num::PrimUInt;

use super::offset::Offset;
use super::op::Op;

/// A run of identical alignment operations
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Step<Len: PrimUInt> {
    /// The length of the operation, e.g. the number of consequent matches or gaps.
    /// Guaranteed to be greater than zero.
    len: Len,
    /// The alignment operation
    op: Op,
}

impl<Len: PrimUInt> Step<Len> {
    pub fn new(op: Op, len: Len) -> Result<Self> {
        if len.is_zero() {
            return Err(eyre::eyre!("Step length must be greater than zero"));
        }
        Ok(Self { len, op })
    }

    /// A single column step.
    pub(crate) fn single(op: Op) -> Self {
        Self {
            len: Len::one(),
            op,
        }
    }

    /// Optimize the sequence of steps by collapsing identical operations to minimize the memory usage.
    /// If the sum of the lengths exceeds the maximum value of the step size, the step is divided accordingly.
    pub fn collapse(steps: &mut Vec<Step<Len>>) {
        if steps.len() <= 1 {
            return;
        }

        let (mut writep, mut readp) = (0, 1);
        while readp < steps.len() {
            if steps[writep].op == steps[readp].op {
                match steps[writep].len.checked_add(&steps[readp].len) {
                    Some(x) => steps[writep].len = x,
                    None => {
                        steps[readp].len =
                            steps[readp].len - (Len::max_value() - steps[writep].len);
                        debug_assert!(steps[readp].len > Len::zero());
                        steps[writep].len = Len::max_value();

                        writep += 1;
                        steps[writep] = steps[readp];
                    }
                }
            } else {
                writep += 1;
                steps[writep] = steps[readp];
            }
            readp += 1;
        }
        steps.truncate(writep + 1);
    }

    /// Run-length encoded representation of the steps, e.g. "4=2D2=".
    pub fn rle_string(steps: impl Iterator<Item: Borrow<Step<Len>>>) -> String
    where
        Len: Display,
    {
        let hint = match steps.size_hint() {
            (_, Some(upper)) => upper * 3,
            (lower, _) => lower * 3,
        };

        let mut result = String::with_capacity(hint);
        for step in steps {
            let step = step.borrow();
            result.push_str(&step.len().to_string());
            result.push(step.op().symbol());
        }
        result
    }
}

/// A tracked alignment step with known start position (offset) in read and reference coordinates
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve, Constructor, From, Into)]
pub struct StepWithOffset<Len: PrimUInt + Into<usize>> {
    pub step: Step<Len>,
    pub start: Offset,
}

impl<Len: PrimUInt + Into<usize>> StepWithOffset<Len> {
    /// Get the end position of the step, e.g. the alignment position after applying the step
    pub fn end(&self) -> Offset {
        self.start.apply(&self.step)
    }
}

/// An iterator that keeps track of the current offset in the alignment
pub struct StepsWithOffsetsIterator<T, Len>
where
    T: Iterator<Item = Step<Len>>,
    Len: PrimUInt + Into<usize>,
{
    iter: T,
    offset: Offset,
}

impl<T, Len> StepsWithOffsetsIterator<T, Len>
where
    T: Iterator<Item = Step<Len>>,
    Len: PrimUInt + Into<usize>,
{
    pub fn new(iter: T, offset: Offset) -> Self {
        Self { iter, offset }
    }
}

impl<T, Len> Iterator for StepsWithOffsetsIterator<T, Len>
where
    T: Iterator<Item = Step<Len>>,
    Len: PrimUInt + Into<usize>,
{
    type Item = StepWithOffset<Len>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.iter.next()?;
        let tracked = StepWithOffset {
            step,
            start: self.offset,
        };
        self.offset = tracked.end();
        Some(tracked)
    }
}
