use derive_getters::Getters;

use editscope_alignment_rs::pairwise::global::Aligner;
use editscope_alignment_rs::Sequence;

use crate::classify::{Classifier, ReadOutcome};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::reference::{Reference, ReferenceSet};
use crate::select::Selector;
use crate::Score;

/// Read-only per-read processing: reference selection, homology filter, and classification.
/// Shared between all workers of an engine.
#[derive(Clone, Debug, Getters)]
pub struct Pipeline {
    config: Config,
    references: ReferenceSet,
    selector: Selector,
}

impl Pipeline {
    pub fn new(config: Config, references: Vec<Reference>) -> Result<Self> {
        if references.is_empty() {
            return Err(Error::NoReferences);
        }
        let references = ReferenceSet::new(references, *config.gap_incentive(), config.model())?;
        let selector = config.selector()?;
        Ok(Self {
            config,
            references,
            selector,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        self.config.classifier()
    }

    /// Aligner matching the configured mode and band.
    pub fn aligner(&self) -> Result<Aligner<Score>> {
        self.config.aligner()
    }

    pub fn process(&self, aligner: &mut Aligner<Score>, read: &Sequence) -> Result<ReadOutcome> {
        let selection =
            self.selector
                .select_best(aligner, read, &self.references, self.config.model())?;
        let (index, alignment, ambiguous, _) = selection.dissolve();

        let homology = alignment.homology();
        if homology < *self.config.min_homology() {
            return Ok(ReadOutcome::unaligned(index, homology));
        }

        let reference = self.references.get(index).ok_or_else(|| {
            Error::invalid_input(format!("Selected reference {index} is missing"))
        })?;
        let outcome = self
            .classifier()
            .classify(index, &alignment, read, reference);
        Ok(if ambiguous {
            outcome.into_ambiguous()
        } else {
            outcome
        })
    }
}
