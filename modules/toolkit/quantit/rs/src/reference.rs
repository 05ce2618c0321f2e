use std::ops::Range;

use ahash::AHashMap;
use derive_getters::{Dissolve, Getters};

use editscope_alignment_rs::pairwise::scoring::Model;
use editscope_alignment_rs::Sequence;
use editscope_core_rs::loc::{Interval, IntervalOp};

use crate::error::{Error, Result};
use crate::Score;

/// A reference amplicon with its quantification window.
///
/// The window is a half-open interval of reference positions where edits count towards the "modified" outcome.
/// The cut site, if any, is a boundary index in 0..=len: the cut happens between bases `cut_site - 1` and `cut_site`.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Reference {
    name: String,
    sequence: Sequence,
    window: Interval<usize>,
    cut_site: Option<usize>,
}

impl Reference {
    pub fn new(name: impl Into<String>, sequence: Sequence, window: Range<usize>) -> Result<Self> {
        let name = name.into();
        Self::ensure_not_empty(&name, &sequence)?;
        if window.start >= window.end || window.end > sequence.len() {
            return Err(Error::invalid_input(format!(
                "Quantification window {window:?} of the reference {name} must be a non-empty interval inside [0, {})",
                sequence.len()
            )));
        }

        let window = Interval::new(window.start, window.end)
            .map_err(|err| Error::invalid_input(err.to_string()))?;
        Ok(Self {
            name,
            sequence,
            window,
            cut_site: None,
        })
    }

    /// Reference quantified over its entire length.
    pub fn whole(name: impl Into<String>, sequence: Sequence) -> Result<Self> {
        let len = sequence.len();
        Self::new(name, sequence, 0..len)
    }

    /// Reference with the window of `size` bases on each side of the cut site, clamped to the sequence.
    pub fn around_cut_site(
        name: impl Into<String>,
        sequence: Sequence,
        cut_site: usize,
        size: usize,
    ) -> Result<Self> {
        let name = name.into();
        Self::ensure_not_empty(&name, &sequence)?;
        Self::ensure_cut_site(&name, &sequence, cut_site)?;
        if size == 0 {
            return Err(Error::invalid_input(format!(
                "Quantification window size for the reference {name} must be positive"
            )));
        }

        let bounds = Interval::new(0, sequence.len()).map_err(|err| Error::invalid_input(err.to_string()))?;
        let window = Interval::around(cut_site, size, &bounds).ok_or_else(|| {
            Error::invalid_input(format!(
                "Quantification window around {cut_site} is empty for the reference {name}"
            ))
        })?;
        if window.len() < size.saturating_mul(2) {
            log::warn!(
                "Quantification window of the reference {} was clamped to the sequence: {}",
                name,
                window
            );
        }

        Ok(Self {
            name,
            sequence,
            window,
            cut_site: Some(cut_site),
        })
    }

    /// Attach a cut site to the reference without changing its window.
    pub fn with_cut_site(mut self, cut_site: usize) -> Result<Self> {
        Self::ensure_cut_site(&self.name, &self.sequence, cut_site)?;
        self.cut_site = Some(cut_site);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    fn ensure_not_empty(name: &str, sequence: &Sequence) -> Result<()> {
        if sequence.is_empty() {
            return Err(Error::invalid_input(format!(
                "Reference {name} has an empty sequence"
            )));
        }
        Ok(())
    }

    fn ensure_cut_site(name: &str, sequence: &Sequence, cut_site: usize) -> Result<()> {
        if cut_site > sequence.len() {
            return Err(Error::invalid_input(format!(
                "Cut site {cut_site} is outside of the reference {name} (length {})",
                sequence.len()
            )));
        }
        Ok(())
    }
}

/// Candidate references for a read set, together with per-reference gap incentives.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ReferenceSet {
    references: Vec<Reference>,
    incentives: Vec<Vec<Score>>,
    index: AHashMap<String, usize>,
}

impl ReferenceSet {
    /// Build the set. `gap_incentive` is the gap opening discount applied at each reference's cut site,
    /// it must lie in `0..=open` of the scoring `model`.
    pub fn new(references: Vec<Reference>, gap_incentive: Score, model: &Model<Score>) -> Result<Self> {
        let open = model.gaps().open;
        if gap_incentive < 0 || gap_incentive > open {
            return Err(Error::invalid_input(format!(
                "Gap incentive must lie in [0, {open}], got {gap_incentive}"
            )));
        }

        let mut index = AHashMap::with_capacity(references.len());
        let mut incentives = Vec::with_capacity(references.len());
        for (ind, reference) in references.iter().enumerate() {
            if index.insert(reference.name.clone(), ind).is_some() {
                return Err(Error::invalid_input(format!(
                    "Duplicate reference name: {}",
                    reference.name
                )));
            }

            let mut incentive = vec![0; reference.len() + 1];
            if let Some(cut_site) = reference.cut_site {
                incentive[cut_site] = gap_incentive;
            }
            incentives.push(incentive);
        }

        Ok(Self {
            references,
            incentives,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn get(&self, ind: usize) -> Option<&Reference> {
        self.references.get(ind)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Per-boundary gap opening discounts of the reference, see [`editscope_alignment_rs::pairwise::scoring::gaps::Incentive`].
    pub fn incentive(&self, ind: usize) -> &[Score] {
        &self.incentives[ind]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Reference> {
        self.references.iter()
    }
}
