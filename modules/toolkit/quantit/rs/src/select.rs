use derive_getters::{Dissolve, Getters};

use editscope_alignment_rs::pairwise::global::Aligner;
use editscope_alignment_rs::pairwise::scoring::{compose, gaps::Incentive, Model};
use editscope_alignment_rs::pairwise::Alignment;
use editscope_alignment_rs::Sequence;

use crate::error::{Error, Result};
use crate::reference::ReferenceSet;
use crate::Score;

/// Best alignment of a read across all candidate references
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Selection {
    reference: usize,
    alignment: Alignment<Score>,
    ambiguous: bool,
    /// Best score among the other references
    runner_up: Option<Score>,
}

/// Picks the best-scoring reference for each read.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Selector {
    margin: Score,
}

impl Selector {
    /// A read is ambiguous when the two best scores differ by no more than `margin`.
    /// The zero margin flags exact ties only.
    pub fn new(margin: Score) -> Result<Self> {
        if margin < 0 {
            return Err(Error::invalid_input(format!(
                "Ambiguity margin must be non-negative, got {margin}"
            )));
        }
        Ok(Self { margin })
    }

    pub fn margin(&self) -> Score {
        self.margin
    }

    /// Align the read against every reference and keep the highest score. Ties go to the lowest reference index.
    pub fn select_best(
        &self,
        aligner: &mut Aligner<Score>,
        read: &Sequence,
        references: &ReferenceSet,
        model: &Model<Score>,
    ) -> Result<Selection> {
        let mut best: Option<(usize, Alignment<Score>)> = None;
        let mut runner_up: Option<Score> = None;

        for (ind, reference) in references.iter().enumerate() {
            let scheme = compose(
                model.symbols(),
                Incentive::new(model.gaps(), references.incentive(ind)),
            );
            let alignment = aligner.align(read, reference.sequence(), &scheme)?;

            let score = *alignment.score();
            let improves = match &best {
                Some((_, current)) => score > *current.score(),
                None => true,
            };
            if improves {
                if let Some((_, previous)) = best.replace((ind, alignment)) {
                    runner_up = runner_up.max(Some(*previous.score()));
                }
            } else {
                runner_up = runner_up.max(Some(score));
            }
        }

        let (reference, alignment) = best.ok_or(Error::NoReferences)?;
        let ambiguous = runner_up.is_some_and(|x| *alignment.score() - x <= self.margin);
        if ambiguous {
            log::trace!(
                "Ambiguous reference assignment: best score {}, runner-up {:?}",
                alignment.score(),
                runner_up
            );
        }

        Ok(Selection {
            reference,
            alignment,
            ambiguous,
            runner_up,
        })
    }
}
