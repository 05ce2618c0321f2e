use std::ops::Range;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use editscope_alignment_rs::pairwise::{Alignment, Op};
use editscope_alignment_rs::{Nucleotide, Sequence};
use editscope_core_rs::loc::{Interval, IntervalOp};

use crate::reference::Reference;
use crate::Score;

#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum EditKind {
    Insertion,
    Deletion,
    Substitution,
}

/// A contiguous run of same-type edits in reference coordinates [start, end).
///
/// Deletions and substitutions span the reference bases they affect. Insertions have no reference extent and are
/// anchored at the base right before the inserted run, i.e. span [k - 1, k) for an insertion between bases k - 1
/// and k. An insertion in front of the first reference base is anchored at the first base.
/// The payload holds deleted reference bases or inserted/substituted read bases.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Eq, PartialEq, Hash, Debug, Getters, Constructor, Dissolve)]
pub struct EditEvent {
    kind: EditKind,
    start: usize,
    end: usize,
    payload: Vec<Nucleotide>,
}

impl EditEvent {
    /// Number of inserted, deleted, or substituted bases.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Any overlap with the window counts.
    pub fn in_window(&self, window: &Interval<usize>) -> bool {
        window.overlaps(self.start, self.end)
    }
}

#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Label {
    Unmodified,
    ModifiedInWindow,
    ModifiedOutsideWindow,
    Ambiguous,
    Unaligned,
}

impl Label {
    pub fn is_modified(&self) -> bool {
        matches!(self, Label::ModifiedInWindow | Label::ModifiedOutsideWindow)
    }
}

/// Classification of a single read against its selected reference
#[derive(Clone, PartialEq, Debug, Getters, Constructor, Dissolve)]
pub struct ReadOutcome {
    reference: usize,
    label: Label,
    events: Vec<EditEvent>,
    homology: f64,
}

impl ReadOutcome {
    /// Reference selection was ambiguous: the label is overridden, events are kept for inspection.
    pub fn into_ambiguous(mut self) -> Self {
        self.label = Label::Ambiguous;
        self
    }

    pub fn unaligned(reference: usize, homology: f64) -> Self {
        Self {
            reference,
            label: Label::Unaligned,
            events: Vec::new(),
            homology,
        }
    }
}

/// Turns alignments into edit events and outcome labels.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Classifier {
    pub ignore_substitutions: bool,
    pub ignore_insertions: bool,
    pub ignore_deletions: bool,
    /// Drop substitutions where either base is `N`
    pub ignore_ambiguous_substitutions: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            ignore_substitutions: false,
            ignore_insertions: false,
            ignore_deletions: false,
            ignore_ambiguous_substitutions: true,
        }
    }
}

// Accumulates edit columns into runs of the same kind
#[derive(Default)]
struct Runs {
    events: Vec<EditEvent>,
    open: Option<EditEvent>,
}

impl Runs {
    fn push(&mut self, kind: EditKind, start: usize, end: usize, payload: &[Nucleotide]) {
        if let Some(event) = &mut self.open {
            let continues = match kind {
                EditKind::Insertion => event.kind == kind && event.start == start,
                EditKind::Deletion | EditKind::Substitution => {
                    event.kind == kind && event.end == start
                }
            };
            if continues {
                event.end = event.end.max(end);
                event.payload.extend_from_slice(payload);
                return;
            }
        }
        self.close();
        self.open = Some(EditEvent::new(kind, start, end, payload.to_vec()));
    }

    fn close(&mut self) {
        if let Some(event) = self.open.take() {
            self.events.push(event);
        }
    }

    fn finish(mut self) -> Vec<EditEvent> {
        self.close();
        self.events
    }
}

impl Classifier {
    /// Extract edit events from the alignment of `read` against `reference`, left to right.
    pub fn events(
        &self,
        alignment: &Alignment<Score>,
        read: &Sequence,
        reference: &Sequence,
    ) -> Vec<EditEvent> {
        let (read, reference) = (read.as_slice(), reference.as_slice());
        let mut runs = Runs::default();

        for tracked in alignment.tracked_steps() {
            let (step, start) = (tracked.step, tracked.start);
            let len = *step.len() as usize;
            match step.op() {
                Op::Match => runs.close(),
                Op::Deletion => {
                    if self.ignore_deletions {
                        runs.close();
                        continue;
                    }
                    let span = start.reference..start.reference + len;
                    runs.push(EditKind::Deletion, span.start, span.end, &reference[span]);
                }
                Op::Insertion => {
                    if self.ignore_insertions {
                        runs.close();
                        continue;
                    }
                    let anchor = start.reference.saturating_sub(1);
                    let inserted = &read[start.read..start.read + len];
                    runs.push(EditKind::Insertion, anchor, anchor + 1, inserted);
                }
                Op::Mismatch => {
                    if self.ignore_substitutions {
                        runs.close();
                        continue;
                    }
                    for offset in 0..len {
                        let (r, f) = (start.read + offset, start.reference + offset);
                        if self.ignore_ambiguous_substitutions
                            && (read[r].is_ambiguous() || reference[f].is_ambiguous())
                        {
                            runs.close();
                            continue;
                        }
                        runs.push(EditKind::Substitution, f, f + 1, &read[r..r + 1]);
                    }
                }
            }
        }
        runs.finish()
    }

    /// Label the events relative to the window: no events means unmodified.
    pub fn label(events: &[EditEvent], window: &Interval<usize>) -> Label {
        if events.is_empty() {
            Label::Unmodified
        } else if events.iter().any(|x| x.in_window(window)) {
            Label::ModifiedInWindow
        } else {
            Label::ModifiedOutsideWindow
        }
    }

    /// Classify the read aligned against the reference with the given index.
    pub fn classify(
        &self,
        index: usize,
        alignment: &Alignment<Score>,
        read: &Sequence,
        reference: &Reference,
    ) -> ReadOutcome {
        let events = self.events(alignment, read, reference.sequence());
        let label = Self::label(&events, reference.window());
        ReadOutcome::new(index, label, events, alignment.homology())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editscope_alignment_rs::pairwise::global;
    use editscope_alignment_rs::pairwise::scoring::Model;

    fn seq(raw: &str) -> Sequence {
        Sequence::new(raw).unwrap()
    }

    fn nucleotides(raw: &str) -> Vec<Nucleotide> {
        seq(raw).as_slice().to_vec()
    }

    fn classify(classifier: &Classifier, read: &str, reference: &Reference) -> ReadOutcome {
        let read = seq(read);
        let alignment = global::align(&read, reference.sequence(), &Model::default()).unwrap();
        classifier.classify(0, &alignment, &read, reference)
    }

    #[test]
    fn test_substitution_in_window() {
        let reference = Reference::new("ref", seq("ACGTACGT"), 2..6).unwrap();
        let outcome = classify(&Classifier::default(), "ACTTACGT", &reference);
        assert_eq!(*outcome.label(), Label::ModifiedInWindow);
        assert_eq!(
            outcome.events(),
            &vec![EditEvent::new(EditKind::Substitution, 2, 3, nucleotides("T"))]
        );
    }

    #[test]
    fn test_substitution_outside_window() {
        let reference = Reference::new("ref", seq("ACGTACGT"), 2..6).unwrap();
        let outcome = classify(&Classifier::default(), "ACGTACGA", &reference);
        assert_eq!(*outcome.label(), Label::ModifiedOutsideWindow);
        assert_eq!(outcome.events().len(), 1);
        assert_eq!(*outcome.events()[0].start(), 7);
    }

    #[test]
    fn test_unmodified() {
        let reference = Reference::new("ref", seq("ACGTACGT"), 2..6).unwrap();
        let outcome = classify(&Classifier::default(), "ACGTACGT", &reference);
        assert_eq!(*outcome.label(), Label::Unmodified);
        assert!(outcome.events().is_empty());
        assert_eq!(*outcome.homology(), 100.0);
    }

    #[test]
    fn test_deletion_run() {
        let reference = Reference::new("ref", seq("AACCGGTT"), 0..2).unwrap();
        let read = seq("AACCTT");
        let model = Model::new(
            editscope_alignment_rs::pairwise::scoring::symbols::Matrix::new(
                5,
                -4,
                editscope_alignment_rs::pairwise::scoring::symbols::Ambiguity::BestOf,
            ),
            editscope_alignment_rs::pairwise::scoring::gaps::Affine::new(10, 1),
        )
        .unwrap();
        let alignment = global::align(&read, reference.sequence(), &model).unwrap();
        let outcome = Classifier::default().classify(0, &alignment, &read, &reference);

        assert_eq!(
            outcome.events(),
            &vec![EditEvent::new(EditKind::Deletion, 4, 6, nucleotides("GG"))]
        );
        assert_eq!(*outcome.label(), Label::ModifiedOutsideWindow);
    }

    #[test]
    fn test_insertion_anchor() {
        // Insertion of "TTT" between reference bases 11 and 12
        let reference = seq("ACGTACGTACGTACGTACGT");
        let read = seq("ACGTACGTACGTTTTACGTACGT");
        let alignment = global::align(&read, &reference, &Model::default()).unwrap();

        let events = Classifier::default().events(&alignment, &read, &reference);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(*event.kind(), EditKind::Insertion);
        assert_eq!(event.size(), 3);

        // The anchor is the base right before the inserted run
        let anchor = *event.start();
        assert_eq!(event.span(), anchor..anchor + 1);

        let inside = Interval::new(anchor, anchor + 5).unwrap();
        let right_after = Interval::new(anchor + 1, anchor + 5).unwrap();
        let ends_at = Interval::new(anchor - 3, anchor + 1).unwrap();
        assert!(event.in_window(&inside));
        assert!(!event.in_window(&right_after));
        assert!(event.in_window(&ends_at));
    }

    #[test]
    fn test_leading_insertion_anchor() {
        let events = vec![EditEvent::new(EditKind::Insertion, 0, 1, nucleotides("G"))];
        let window = Interval::new(0, 2).unwrap();
        assert_eq!(Classifier::label(&events, &window), Label::ModifiedInWindow);

        // Insertion before the first reference base is anchored at [0, 1)
        let read = "GGGACGTACGTACGTACGTACGT";
        let expected = vec![EditEvent::new(EditKind::Insertion, 0, 1, nucleotides("GGG"))];

        let reference = Reference::new("ref", seq("ACGTACGTACGTACGTACGT"), 0..4).unwrap();
        let outcome = classify(&Classifier::default(), read, &reference);
        assert_eq!(outcome.events(), &expected);
        assert_eq!(*outcome.label(), Label::ModifiedInWindow);

        let reference = Reference::new("ref", seq("ACGTACGTACGTACGTACGT"), 1..4).unwrap();
        let outcome = classify(&Classifier::default(), read, &reference);
        assert_eq!(outcome.events(), &expected);
        assert_eq!(*outcome.label(), Label::ModifiedOutsideWindow);
    }

    #[test]
    fn test_window_boundaries() {
        let window = Interval::new(2, 6).unwrap();
        let deletion = |start, end| EditEvent::new(EditKind::Deletion, start, end, vec![]);

        assert!(deletion(2, 6).in_window(&window));
        assert!(deletion(0, 3).in_window(&window));
        assert!(deletion(5, 8).in_window(&window));
        assert!(!deletion(0, 2).in_window(&window));
        assert!(!deletion(6, 8).in_window(&window));
    }

    #[test]
    fn test_substitution_runs_are_coalesced() {
        let reference = Reference::whole("ref", seq("AAAAAAAAAAAACCCAAAAAAAAAAAA")).unwrap();
        let outcome = classify(&Classifier::default(), "AAAAAAAAAAAAGGGAAAAAAAAAAAA", &reference);
        assert_eq!(
            outcome.events(),
            &vec![EditEvent::new(EditKind::Substitution, 12, 15, nucleotides("GGG"))]
        );
    }

    #[test]
    fn test_ambiguous_bases() {
        let reference = Reference::whole("ref", seq("ACGTACGTAC")).unwrap();

        let outcome = classify(&Classifier::default(), "ACGTNCGTAC", &reference);
        assert_eq!(*outcome.label(), Label::Unmodified);

        let strict = Classifier {
            ignore_ambiguous_substitutions: false,
            ..Default::default()
        };
        let outcome = classify(&strict, "ACGTNCGTAC", &reference);
        assert_eq!(*outcome.label(), Label::ModifiedInWindow);
        assert_eq!(*outcome.events()[0].kind(), EditKind::Substitution);
    }

    #[test]
    fn test_ignored_kinds() {
        let reference = Reference::whole("ref", seq("ACGTACGTAC")).unwrap();
        let classifier = Classifier {
            ignore_substitutions: true,
            ..Default::default()
        };
        let outcome = classify(&classifier, "ACGTTCGTAC", &reference);
        assert_eq!(*outcome.label(), Label::Unmodified);
        assert!(outcome.events().is_empty());
    }

    #[test]
    fn test_ambiguous_override() {
        let reference = Reference::new("ref", seq("ACGTACGT"), 2..6).unwrap();
        let outcome = classify(&Classifier::default(), "ACTTACGT", &reference).into_ambiguous();
        assert_eq!(*outcome.label(), Label::Ambiguous);
        assert_eq!(outcome.events().len(), 1);
    }
}
