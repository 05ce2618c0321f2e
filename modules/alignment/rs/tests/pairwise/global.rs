use editscope_alignment_rs::pairwise::global::{Aligner, Mode};
use editscope_alignment_rs::pairwise::scoring::{compose, gaps, symbols, Model};
use editscope_alignment_rs::{Nucleotide, Reversed, Sequence};
use proptest::prelude::*;

pub type Score = i32;

struct Workload<'a> {
    read: &'a str,
    reference: &'a str,
    score: Score,
    rle: &'a str,
}

fn scheme(open: Score, extend: Score) -> Model<Score> {
    let matrix = symbols::Matrix::new(
        5,
        -4,
        symbols::Ambiguity::Neutral {
            with_base: -2,
            with_ambiguous: -1,
        },
    );
    Model::new(matrix, gaps::Affine::new(open, extend)).unwrap()
}

fn ensure(aligner: &mut Aligner<Score>, scheme: &Model<Score>, w: Workload<'_>) {
    let read = Sequence::new(w.read).unwrap();
    let reference = Sequence::new(w.reference).unwrap();
    let result = aligner.align(&read, &reference, scheme).unwrap();

    assert_eq!(*result.score(), w.score, "{} vs {}", w.read, w.reference);
    assert_eq!(result.rle(), w.rle, "{} vs {}", w.read, w.reference);

    let trace = result.trace(&read, &reference);
    assert_eq!(trace.read().len(), trace.reference().len());
    assert_eq!(trace.read().replace('-', ""), w.read);
    assert_eq!(trace.reference().replace('-', ""), w.reference);
}

#[test]
fn test_no_gaps() {
    let mut aligner = Aligner::new(Mode::Global);
    let scheme = scheme(10, 1);
    for w in [
        Workload {
            read: "ACGTACGT",
            reference: "ACGTACGT",
            score: 40,
            rle: "8=",
        },
        Workload {
            read: "ACTTACGT",
            reference: "ACGTACGT",
            score: 31,
            rle: "2=1X5=",
        },
        Workload {
            read: "ACGTACGA",
            reference: "ACGTACGT",
            score: 31,
            rle: "7=1X",
        },
        Workload {
            read: "NNNN",
            reference: "ACGT",
            score: -8,
            rle: "4X",
        },
    ] {
        ensure(&mut aligner, &scheme, w);
    }
}

#[test]
fn test_gaps() {
    let mut aligner = Aligner::new(Mode::Global);
    let scheme = scheme(10, 1);
    for w in [
        Workload {
            read: "AACCTT",
            reference: "AACCGGTT",
            score: 19,
            rle: "4=2D2=",
        },
        Workload {
            read: "AACCGGGGTT",
            reference: "AACCGGTT",
            score: 29,
            rle: "4=2I4=",
        },
        Workload {
            read: "TTTTAAAACCCCGGGG",
            reference: "TTTTCCCCGGGG",
            score: 60 - 13,
            rle: "4=4I8=",
        },
        Workload {
            read: "",
            reference: "ACG",
            score: -12,
            rle: "3D",
        },
        Workload {
            read: "ACG",
            reference: "A",
            score: 5 - 11,
            rle: "1=2I",
        },
    ] {
        ensure(&mut aligner, &scheme, w);
    }
}

#[test]
fn test_affine_prefers_single_gap() {
    // Two separate single-base deletions cost more than one two-base run
    let mut aligner = Aligner::new(Mode::Global);
    let scheme = scheme(10, 1);
    let read = Sequence::new("GATTACAGATTACA").unwrap();
    let reference = Sequence::new("GATTACATTGATTACA").unwrap();
    let result = aligner.align(&read, &reference, &scheme).unwrap();
    assert_eq!(*result.score(), 14 * 5 - 11);
    assert_eq!(result.count(editscope_alignment_rs::pairwise::Op::Deletion), 2);
    assert_eq!(
        result
            .tracked_steps()
            .filter(|x| !x.step.op().is_diagonal())
            .count(),
        1
    );
}

#[test]
fn test_ambiguity_policies() {
    let read = Sequence::new("ACNTACGT").unwrap();
    let reference = Sequence::new("ACGTACGT").unwrap();
    let mut aligner = Aligner::new(Mode::Global);

    let neutral = Model::<Score>::default();
    let result = aligner.align(&read, &reference, &neutral).unwrap();
    assert_eq!(*result.score(), 35 - 2);

    let best_of = Model::new(
        symbols::Matrix::new(5, -4, symbols::Ambiguity::BestOf),
        gaps::Affine::new(20, 2),
    )
    .unwrap();
    let result = aligner.align(&read, &reference, &best_of).unwrap();
    assert_eq!(*result.score(), 40);
    // N never counts as a match
    assert_eq!(result.rle(), "2=1X5=");
}

#[test]
fn test_composed_scheme_matches_model() {
    let model = scheme(12, 3);
    let composed = compose(model.symbols(), *model.gaps());
    let read = Sequence::new("ACGGGTACCATG").unwrap();
    let reference = Sequence::new("ACGTACCTTATG").unwrap();

    let mut aligner = Aligner::new(Mode::Global);
    let expected = aligner.align(&read, &reference, &model).unwrap();
    let actual = aligner.align(&read, &reference, &composed).unwrap();
    assert_eq!(expected, actual);
}

fn nucleotides(max: usize) -> impl Strategy<Value = Vec<Nucleotide>> {
    prop::collection::vec(
        prop::sample::select(Nucleotide::ALL.to_vec()),
        0..max,
    )
}

proptest! {
    #[test]
    fn alignment_is_deterministic(read in nucleotides(40), reference in nucleotides(40)) {
        prop_assume!(!reference.is_empty());
        let (read, reference) = (Sequence::from(read), Sequence::from(reference));
        let scheme = Model::<Score>::default();

        let first = Aligner::new(Mode::Global).align(&read, &reference, &scheme).unwrap();
        let mut reused = Aligner::new(Mode::Global);
        reused.align(&reference, &reference, &scheme).unwrap();
        let second = reused.align(&read, &reference, &scheme).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.trace(&read, &reference), second.trace(&read, &reference));
    }

    #[test]
    fn score_is_reversal_symmetric(read in nucleotides(40), reference in nucleotides(40)) {
        prop_assume!(!reference.is_empty());
        let scheme = scheme(10, 1);
        let mut aligner = Aligner::new(Mode::Global);

        let forward = aligner.align(read.as_slice(), reference.as_slice(), &scheme).unwrap();
        let backward = aligner
            .align(&Reversed::new(read.as_slice()), &Reversed::new(reference.as_slice()), &scheme)
            .unwrap();
        prop_assert_eq!(forward.score(), backward.score());
    }

    #[test]
    fn alignment_consumes_both_sequences(read in nucleotides(30), reference in nucleotides(30)) {
        prop_assume!(!reference.is_empty());
        let (read, reference) = (Sequence::from(read), Sequence::from(reference));
        let scheme = Model::<Score>::default();
        let result = Aligner::new(Mode::Global).align(&read, &reference, &scheme).unwrap();

        let end = result.tracked_steps().last().map(|x| x.end());
        match end {
            Some(end) => {
                prop_assert_eq!(end.read, read.len());
                prop_assert_eq!(end.reference, reference.len());
            }
            None => prop_assert!(read.is_empty()),
        }

        let trace = result.trace(&read, &reference);
        for (op, (r, f)) in trace.ops().iter().zip(trace.read().chars().zip(trace.reference().chars())) {
            // Gap columns never carry gaps on both sides
            prop_assert!(!(r == '-' && f == '-'));
            prop_assert_eq!(r == '-', *op == editscope_alignment_rs::pairwise::Op::Deletion);
            prop_assert_eq!(f == '-', *op == editscope_alignment_rs::pairwise::Op::Insertion);
        }
    }
}
