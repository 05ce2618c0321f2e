use derive_getters::Dissolve;
use derive_more::{Constructor, From, Into};

use editscope_core_rs::num::PrimUInt;

use super::Step;

/// Offset of an alignment column in read and reference coordinates
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Hash,
    Default,
    Constructor,
    Dissolve,
    From,
    Into,
)]
pub struct Offset {
    pub read: usize,
    pub reference: usize,
}

impl Offset {
    pub fn apply<Len: PrimUInt + Into<usize>>(mut self, step: &Step<Len>) -> Self {
        step.op()
            .apply(&mut self.read, &mut self.reference, (*step.len()).into());
        self
    }
}
