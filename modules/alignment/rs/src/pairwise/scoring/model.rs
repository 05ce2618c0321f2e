use derive_getters::{Dissolve, Getters};

use editscope_core_rs::num::PrimSInt;

use super::gaps::{self, Affine};
use super::symbols::{self, Ambiguity, Matrix};
use crate::alphabet::Nucleotide;
use crate::error::{Error, Result};

/// Validated substitution matrix and affine gap penalties.
///
/// Invariants:
/// * any match between identical concrete bases scores above any mismatch;
/// * any mismatch scores above opening a gap (`-open`);
/// * pairs with `N` score within (`-open`, best match];
/// * `open >= extend >= 0`.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve)]
pub struct Model<S: PrimSInt> {
    symbols: Matrix<S>,
    gaps: Affine<S>,
}

impl<S: PrimSInt> Model<S> {
    pub fn new(symbols: Matrix<S>, gaps: Affine<S>) -> Result<Self> {
        if gaps.extend < S::zero() || gaps.open < gaps.extend {
            return Err(Error::invalid_input(format!(
                "Gap penalties must satisfy open >= extend >= 0, got open={:?}, extend={:?}",
                gaps.open, gaps.extend
            )));
        }

        let (matched, mismatched) = (symbols.min_match(), symbols.max_mismatch());
        if matched <= mismatched {
            return Err(Error::invalid_input(format!(
                "Match score ({matched:?}) must exceed any mismatch score ({mismatched:?})"
            )));
        }
        if mismatched <= -gaps.open {
            return Err(Error::invalid_input(format!(
                "Mismatch score ({mismatched:?}) must exceed the gap opening cost (-{:?})",
                gaps.open
            )));
        }

        let (lowest, highest) = symbols.ambiguous_bounds();
        if highest > symbols.max_match() {
            return Err(Error::invalid_input(format!(
                "Scores of the ambiguity symbol ({highest:?}) must not exceed the match score ({:?})",
                symbols.max_match()
            )));
        }
        if lowest <= -gaps.open {
            return Err(Error::invalid_input(format!(
                "Scores of the ambiguity symbol ({lowest:?}) must exceed the gap opening cost (-{:?})",
                gaps.open
            )));
        }
        Ok(Self { symbols, gaps })
    }
}

impl<S: PrimSInt> symbols::Scorer for Model<S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, a: Nucleotide, b: Nucleotide) -> Self::Score {
        self.symbols.score(a, b)
    }
}

impl<S: PrimSInt> gaps::PosInvariantScorer for Model<S> {
    type GapScore = S;

    #[inline(always)]
    fn gap_open(&self) -> Self::GapScore {
        self.gaps.open
    }

    #[inline(always)]
    fn gap_extend(&self) -> Self::GapScore {
        self.gaps.extend
    }
}

impl Default for Model<i32> {
    /// Match 5, mismatch -4, `N` against a base -2, `N` against `N` -1, gap open 20, gap extend 2.
    fn default() -> Self {
        Self {
            symbols: Matrix::new(
                5,
                -4,
                Ambiguity::Neutral {
                    with_base: -2,
                    with_ambiguous: -1,
                },
            ),
            gaps: Affine::new(20, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::scoring::gaps::Scorer as _;
    use crate::pairwise::scoring::symbols::Scorer as _;

    #[test]
    fn test_default_is_valid() -> Result<()> {
        let model = Model::<i32>::default();
        let (symbols, gaps) = model.clone().dissolve();
        assert_eq!(Model::new(symbols, gaps)?, model);
        assert_eq!(model.score(Nucleotide::A, Nucleotide::A), 5);
        assert_eq!(model.deletion_open(3), 20);
        assert_eq!(model.insertion_extend(3), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_models() {
        let neutral = Ambiguity::Neutral {
            with_base: -2,
            with_ambiguous: -1,
        };
        // Match does not exceed mismatch
        assert!(Model::new(Matrix::new(1, 1, neutral), Affine::new(10, 1)).is_err());
        // Mismatch is as costly as a gap
        assert!(Model::new(Matrix::new(5, -10, neutral), Affine::new(10, 1)).is_err());
        // Extension is costlier than opening
        assert!(Model::new(Matrix::new(5, -4, neutral), Affine::new(1, 2)).is_err());
        // Negative extension
        assert!(Model::new(Matrix::new(5, -4, neutral), Affine::new(10, -1)).is_err());
        // Valid
        assert!(Model::new(Matrix::new(5, -4, neutral), Affine::new(10, 1)).is_ok());
    }

    #[test]
    fn test_ambiguity_bounds() {
        let gaps = Affine::new(10, 1);
        let neutral = |with_base, with_ambiguous| Ambiguity::Neutral {
            with_base,
            with_ambiguous,
        };

        // N scores above a match
        assert!(Model::new(Matrix::new(5, -4, neutral(6, -1)), gaps).is_err());
        assert!(Model::new(Matrix::new(5, -4, neutral(-2, 6)), gaps).is_err());
        // N scores as badly as opening a gap
        assert!(Model::new(Matrix::new(5, -4, neutral(-10, -1)), gaps).is_err());
        assert!(Model::new(Matrix::new(5, -4, neutral(-2, -11)), gaps).is_err());
        // Boundaries are inclusive for the match and exclusive for the gap
        assert!(Model::new(Matrix::new(5, -4, neutral(5, -9)), gaps).is_ok());
        // Best-of scores never exceed the best match
        let mut symbols = Matrix::new(5, -4, Ambiguity::BestOf);
        symbols.set(Nucleotide::C, Nucleotide::C, 7);
        assert!(Model::new(symbols, gaps).is_ok());
    }
}
