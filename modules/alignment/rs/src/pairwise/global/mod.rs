pub use engine::{align, Aligner, Mode};

mod engine;
mod traceback;
