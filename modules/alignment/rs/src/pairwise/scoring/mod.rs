pub use delegate::Delegate;
pub use model::Model;

use editscope_core_rs::num::PrimSInt;

mod delegate;
pub mod gaps;
mod model;
pub mod symbols;

/// Everything the aligner needs to score a path: symbol pairs and gaps in a common score type.
pub trait Scheme<S: PrimSInt>: symbols::Scorer<Score = S> + gaps::Scorer<Score = S> {}

impl<S, T> Scheme<S> for T
where
    S: PrimSInt,
    T: symbols::Scorer<Score = S> + gaps::Scorer<Score = S>,
{
}

pub fn compose<ScoreType, S, G>(symbols: S, gaps: G) -> Delegate<ScoreType, S, G>
where
    ScoreType: PrimSInt,
    S: symbols::Scorer<Score = ScoreType>,
    G: gaps::Scorer<Score = ScoreType>,
{
    Delegate::new(symbols, gaps)
}
