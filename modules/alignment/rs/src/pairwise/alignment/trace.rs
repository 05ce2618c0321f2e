use std::fmt::{Display, Formatter};

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use super::Op;

/// Explicit form of an alignment: two gapped strings of equal length and the operation of each column.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Constructor, Dissolve)]
pub struct Trace {
    read: String,
    reference: String,
    ops: Vec<Op>,
}

impl Trace {
    pub const GAP: char = '-';

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn tags(&self) -> String {
        self.ops.iter().map(|x| x.symbol()).collect()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.read)?;
        writeln!(f, "{}", self.tags())?;
        write!(f, "{}", self.reference)
    }
}
