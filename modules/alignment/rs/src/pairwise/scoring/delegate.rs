use std::marker::PhantomData;

use editscope_core_rs::num::PrimSInt;

use super::{gaps, symbols};
use crate::alphabet::Nucleotide;

/// Scoring scheme composed from independent symbol and gap scorers.
pub struct Delegate<ScoreType, S, G>
where
    ScoreType: PrimSInt,
    S: symbols::Scorer<Score = ScoreType>,
    G: gaps::Scorer<Score = ScoreType>,
{
    pub symbols: S,
    pub gaps: G,
    score: PhantomData<ScoreType>,
}

impl<ScoreType, S, G> Delegate<ScoreType, S, G>
where
    ScoreType: PrimSInt,
    S: symbols::Scorer<Score = ScoreType>,
    G: gaps::Scorer<Score = ScoreType>,
{
    pub fn new(symbols: S, gaps: G) -> Self {
        Delegate {
            symbols,
            gaps,
            score: Default::default(),
        }
    }
}

impl<ScoreType, S, G> gaps::Scorer for Delegate<ScoreType, S, G>
where
    ScoreType: PrimSInt,
    S: symbols::Scorer<Score = ScoreType>,
    G: gaps::Scorer<Score = ScoreType>,
{
    type Score = ScoreType;

    #[inline(always)]
    fn insertion_open(&self, boundary: usize) -> Self::Score {
        self.gaps.insertion_open(boundary)
    }

    #[inline(always)]
    fn insertion_extend(&self, boundary: usize) -> Self::Score {
        self.gaps.insertion_extend(boundary)
    }

    #[inline(always)]
    fn deletion_open(&self, pos: usize) -> Self::Score {
        self.gaps.deletion_open(pos)
    }

    #[inline(always)]
    fn deletion_extend(&self, pos: usize) -> Self::Score {
        self.gaps.deletion_extend(pos)
    }
}

impl<ScoreType, S, G> symbols::Scorer for Delegate<ScoreType, S, G>
where
    ScoreType: PrimSInt,
    S: symbols::Scorer<Score = ScoreType>,
    G: gaps::Scorer<Score = ScoreType>,
{
    type Score = ScoreType;

    #[inline(always)]
    fn score(&self, a: Nucleotide, b: Nucleotide) -> Self::Score {
        self.symbols.score(a, b)
    }
}
