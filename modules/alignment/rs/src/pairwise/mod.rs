pub use alignment::{Alignment, Offset, Op, Step, Trace};

pub mod alignment;
pub mod global;
pub mod scoring;
