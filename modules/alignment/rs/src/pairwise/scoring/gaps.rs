use editscope_core_rs::num::{saturating_cast, PrimSInt};

// Gap penalties are non-negative costs that are subtracted from the alignment score.
// Positions are reference coordinates:
// * insertions are placed at boundaries 0..=len, where boundary `k` lies between reference bases k-1 and k;
// * deletions are placed at the deleted reference base.
pub trait Scorer {
    type Score: PrimSInt;

    fn insertion_open(&self, boundary: usize) -> Self::Score;
    fn insertion_extend(&self, boundary: usize) -> Self::Score;

    fn deletion_open(&self, pos: usize) -> Self::Score;
    fn deletion_extend(&self, pos: usize) -> Self::Score;
}

pub trait PosInvariantScorer {
    type GapScore: PrimSInt;

    fn gap_open(&self) -> Self::GapScore;
    fn gap_extend(&self) -> Self::GapScore;
}

impl<T: PosInvariantScorer> Scorer for T {
    type Score = <Self as PosInvariantScorer>::GapScore;

    #[inline(always)]
    fn insertion_open(&self, _: usize) -> Self::Score {
        self.gap_open()
    }

    #[inline(always)]
    fn insertion_extend(&self, _: usize) -> Self::Score {
        self.gap_extend()
    }

    #[inline(always)]
    fn deletion_open(&self, _: usize) -> Self::Score {
        self.gap_open()
    }

    #[inline(always)]
    fn deletion_extend(&self, _: usize) -> Self::Score {
        self.gap_extend()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Affine<S: PrimSInt> {
    pub open: S,
    pub extend: S,
}

impl<S: PrimSInt> Affine<S> {
    pub fn new(open: S, extend: S) -> Self {
        Self { open, extend }
    }

    /// Cumulative penalty of a gap with `len` columns: open + (len - 1) * extend, or zero for an empty gap.
    pub fn penalty(&self, len: usize) -> S {
        if len == 0 {
            return S::zero();
        }
        saturating_cast::<S>(len - 1)
            .checked_mul(&self.extend)
            .and_then(|x| x.checked_add(&self.open))
            .unwrap_or_else(S::max_value)
    }
}

impl<S: PrimSInt> PosInvariantScorer for Affine<S> {
    type GapScore = S;

    #[inline(always)]
    fn gap_open(&self) -> Self::GapScore {
        self.open
    }

    #[inline(always)]
    fn gap_extend(&self) -> Self::GapScore {
        self.extend
    }
}

/// Gap scorer with a per-reference-position discount on the gap opening.
/// `bonus[k]` is subtracted from the opening of an insertion at boundary `k` and of a deletion starting at base `k`.
/// Positions outside of the `bonus` slice receive no discount.
pub struct Incentive<'a, G: Scorer> {
    base: &'a G,
    bonus: &'a [G::Score],
}

impl<'a, G: Scorer> Incentive<'a, G> {
    pub fn new(base: &'a G, bonus: &'a [G::Score]) -> Self {
        Self { base, bonus }
    }

    #[inline(always)]
    fn bonus(&self, pos: usize) -> G::Score {
        self.bonus.get(pos).copied().unwrap_or_default()
    }
}

impl<G: Scorer> Scorer for Incentive<'_, G> {
    type Score = G::Score;

    #[inline(always)]
    fn insertion_open(&self, boundary: usize) -> Self::Score {
        self.base.insertion_open(boundary) - self.bonus(boundary)
    }

    #[inline(always)]
    fn insertion_extend(&self, boundary: usize) -> Self::Score {
        self.base.insertion_extend(boundary)
    }

    #[inline(always)]
    fn deletion_open(&self, pos: usize) -> Self::Score {
        self.base.deletion_open(pos) - self.bonus(pos)
    }

    #[inline(always)]
    fn deletion_extend(&self, pos: usize) -> Self::Score {
        self.base.deletion_extend(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_penalty() {
        let gaps = Affine::new(10, 1);
        assert_eq!(gaps.penalty(0), 0);
        assert_eq!(gaps.penalty(1), 10);
        assert_eq!(gaps.penalty(2), 11);
        assert_eq!(gaps.penalty(5), 14);

        let gaps = Affine::<i8>::new(100, 10);
        assert_eq!(gaps.penalty(1000), i8::MAX);
    }

    #[test]
    fn test_incentive() {
        let gaps = Affine::new(20, 2);
        let bonus = [0, 0, 1, 0];
        let incentive = Incentive::new(&gaps, &bonus);

        assert_eq!(incentive.insertion_open(1), 20);
        assert_eq!(incentive.insertion_open(2), 19);
        assert_eq!(incentive.deletion_open(2), 19);
        assert_eq!(incentive.deletion_extend(2), 2);
        assert_eq!(incentive.insertion_open(10), 20);
    }
}
