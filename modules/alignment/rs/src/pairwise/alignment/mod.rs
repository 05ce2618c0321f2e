pub use alignment::{Alignment, StepLen};
pub use offset::Offset;
pub use op::Op;
pub use step::{Step, StepWithOffset, StepsWithOffsetsIterator};
pub use trace::Trace;

#[allow(clippy::module_inception)]
mod alignment;
mod offset;
mod op;
mod step;
mod trace;
