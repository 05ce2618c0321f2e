use impl_tools::autoimpl;

use editscope_core_rs::num::PrimSInt;

use crate::alphabet::Nucleotide;
use crate::error::Result;

#[autoimpl(for <T: trait + ?Sized> &T, Box<T>)]
pub trait Scorer {
    type Score: PrimSInt;

    fn score(&self, a: Nucleotide, b: Nucleotide) -> Self::Score;
}

/// Scoring policy for pairs involving the ambiguity symbol `N`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Ambiguity<S: PrimSInt> {
    /// `N` paired with a concrete base scores `with_base`, `N` paired with `N` scores `with_ambiguous`.
    Neutral { with_base: S, with_ambiguous: S },
    /// `N` scores as the best concrete pairing available for the other symbol.
    BestOf,
}

/// Symmetric substitution matrix over the nucleotide alphabet.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Matrix<S: PrimSInt> {
    scores: [S; Nucleotide::SIZE * Nucleotide::SIZE],
    ambiguity: Ambiguity<S>,
}

impl<S: PrimSInt> Matrix<S> {
    pub fn new(matched: S, mismatched: S, ambiguity: Ambiguity<S>) -> Self {
        let mut matrix = Self {
            scores: [S::zero(); Nucleotide::SIZE * Nucleotide::SIZE],
            ambiguity,
        };
        for a in Nucleotide::CONCRETE {
            for b in Nucleotide::CONCRETE {
                let score = if a == b { matched } else { mismatched };
                matrix.scores[Self::index(a, b)] = score;
            }
        }
        matrix.resolve_ambiguity();
        matrix
    }

    #[inline(always)]
    fn index(a: Nucleotide, b: Nucleotide) -> usize {
        a.index() * Nucleotide::SIZE + b.index()
    }

    fn put(&mut self, a: Nucleotide, b: Nucleotide, score: S) {
        self.scores[Self::index(a, b)] = score;
        self.scores[Self::index(b, a)] = score;
    }

    fn resolve_ambiguity(&mut self) {
        match self.ambiguity {
            Ambiguity::Neutral {
                with_base,
                with_ambiguous,
            } => {
                for x in Nucleotide::CONCRETE {
                    self.put(Nucleotide::N, x, with_base);
                }
                self.put(Nucleotide::N, Nucleotide::N, with_ambiguous);
            }
            Ambiguity::BestOf => {
                let mut overall = S::min_value();
                for x in Nucleotide::CONCRETE {
                    let best = Nucleotide::CONCRETE
                        .iter()
                        .map(|y| self.scores[Self::index(*y, x)])
                        .fold(S::min_value(), |acc, s| acc.max(s));
                    self.put(Nucleotide::N, x, best);
                    overall = overall.max(best);
                }
                self.put(Nucleotide::N, Nucleotide::N, overall);
            }
        }
    }

    /// Override the score of a symbol pair (and its mirror).
    /// Under the best-of policy, scores of the ambiguity symbol are recomputed after each concrete override.
    pub fn set(&mut self, a: Nucleotide, b: Nucleotide, score: S) -> &mut Self {
        self.put(a, b, score);
        if !a.is_ambiguous() && !b.is_ambiguous() {
            self.resolve_ambiguity();
        }
        self
    }

    pub fn ambiguity(&self) -> &Ambiguity<S> {
        &self.ambiguity
    }

    /// Score raw symbols. Unrecognized symbols are reported with their position in the pair (0 or 1).
    pub fn score_bytes(&self, a: u8, b: u8) -> Result<S> {
        let a = Nucleotide::parse(a, 0)?;
        let b = Nucleotide::parse(b, 1)?;
        Ok(self.score(a, b))
    }

    /// Smallest score between identical concrete bases.
    pub fn min_match(&self) -> S {
        Nucleotide::CONCRETE
            .iter()
            .map(|x| self.scores[Self::index(*x, *x)])
            .fold(S::max_value(), |acc, s| acc.min(s))
    }

    /// Largest score between identical concrete bases.
    pub fn max_match(&self) -> S {
        Nucleotide::CONCRETE
            .iter()
            .map(|x| self.scores[Self::index(*x, *x)])
            .fold(S::min_value(), |acc, s| acc.max(s))
    }

    /// Smallest and largest scores of pairs involving the ambiguity symbol.
    pub fn ambiguous_bounds(&self) -> (S, S) {
        Nucleotide::ALL
            .iter()
            .map(|x| self.scores[Self::index(Nucleotide::N, *x)])
            .fold((S::max_value(), S::min_value()), |(lo, hi), s| {
                (lo.min(s), hi.max(s))
            })
    }

    /// Largest score between different concrete bases.
    pub fn max_mismatch(&self) -> S {
        let mut result = S::min_value();
        for a in Nucleotide::CONCRETE {
            for b in Nucleotide::CONCRETE {
                if a != b {
                    result = result.max(self.scores[Self::index(a, b)]);
                }
            }
        }
        result
    }
}

impl<S: PrimSInt> Scorer for Matrix<S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, a: Nucleotide, b: Nucleotide) -> Self::Score {
        self.scores[Self::index(a, b)]
    }
}
