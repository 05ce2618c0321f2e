use impl_tools::autoimpl;

use crate::alphabet::{Nucleotide, Sequence};

/// Random access to the symbols of an aligned sequence.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>)]
#[allow(clippy::len_without_is_empty)]
pub trait Alignable {
    type Symbol;

    fn len(&self) -> usize;
    fn at(&self, pos: usize) -> &Self::Symbol;
}

impl<T> Alignable for [T] {
    type Symbol = T;

    #[inline(always)]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        &self[pos]
    }
}

impl Alignable for Sequence {
    type Symbol = Nucleotide;

    #[inline(always)]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        &self.as_slice()[pos]
    }
}

/// A view of the sequence read from the end to the start.
pub struct Reversed<T: Alignable> {
    base: T,
}

impl<T: Alignable> Reversed<T> {
    pub fn new(alignable: T) -> Self {
        Self { base: alignable }
    }
}

impl<T: Alignable> Alignable for Reversed<T> {
    type Symbol = T::Symbol;

    #[inline(always)]
    fn len(&self) -> usize {
        self.base.len()
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        self.base.at(self.base.len() - pos - 1)
    }
}
