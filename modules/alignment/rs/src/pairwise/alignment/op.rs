/// `Op` represents a single column of a read-to-reference alignment.
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Op {
    /// Identical concrete bases in the read and the reference (=)
    Match,
    /// Different bases, or any base paired with the ambiguity symbol (X)
    Mismatch,
    /// A read base aligned to a gap in the reference (I)
    Insertion,
    /// A reference base aligned to a gap in the read (D)
    Deletion,
}

impl Op {
    /// Returns `true` if the operation is represented by a diagonal movement in the alignment matrix.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Op::Match | Op::Mismatch)
    }

    /// Returns `true` for every operation except the match.
    pub fn is_edit(&self) -> bool {
        !matches!(self, Op::Match)
    }

    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::Match => '=',
            Op::Mismatch => 'X',
            Op::Insertion => 'I',
            Op::Deletion => 'D',
        }
    }

    /// Advances read and reference coordinates by `len` columns of this operation.
    pub fn apply(&self, read: &mut usize, reference: &mut usize, len: usize) {
        match self {
            Op::Insertion => *read += len,
            Op::Deletion => *reference += len,
            Op::Match | Op::Mismatch => {
                *read += len;
                *reference += len;
            }
        };
    }
}

impl TryFrom<char> for Op {
    type Error = ();

    /// Tries to convert a character into an `Op`.
    /// Returns an error if the character does not represent a valid operation.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '=' => Ok(Op::Match),
            'X' => Ok(Op::Mismatch),
            'I' => Ok(Op::Insertion),
            'D' => Ok(Op::Deletion),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_roundtrip() {
        for op in [Op::Match, Op::Mismatch, Op::Insertion, Op::Deletion] {
            assert_eq!(Op::try_from(op.symbol()), Ok(op));
        }
        assert_eq!(Op::try_from('v'), Err(()));
    }

    #[test]
    fn test_apply() {
        let (mut read, mut reference) = (0, 0);

        Op::Insertion.apply(&mut read, &mut reference, 2);
        assert_eq!((read, reference), (2, 0));

        Op::Deletion.apply(&mut read, &mut reference, 3);
        assert_eq!((read, reference), (2, 3));

        Op::Match.apply(&mut read, &mut reference, 1);
        assert_eq!((read, reference), (3, 4));

        Op::Mismatch.apply(&mut read, &mut reference, 1);
        assert_eq!((read, reference), (4, 5));
    }

    #[test]
    fn test_edit_and_diagonal() {
        assert!(!Op::Match.is_edit());
        assert!(Op::Mismatch.is_edit() && Op::Mismatch.is_diagonal());
        assert!(Op::Insertion.is_edit() && !Op::Insertion.is_diagonal());
        assert!(Op::Deletion.is_edit() && !Op::Deletion.is_diagonal());
    }
}
