use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

use crate::error::{Error, Result};

/// Nucleotide alphabet recognized by the aligner: four concrete bases and `N`, the ambiguity/unknown symbol.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
    N = 4,
}

impl Nucleotide {
    /// Total number of symbols in the alphabet
    pub const SIZE: usize = 5;

    pub const ALL: [Nucleotide; Self::SIZE] = [
        Nucleotide::A,
        Nucleotide::C,
        Nucleotide::G,
        Nucleotide::T,
        Nucleotide::N,
    ];

    pub const CONCRETE: [Nucleotide; 4] =
        [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
            Nucleotide::N => 'N',
        }
    }

    #[inline(always)]
    pub const fn is_ambiguous(self) -> bool {
        matches!(self, Nucleotide::N)
    }

    /// Identical concrete bases. `N` never matches anything, including another `N`.
    #[inline(always)]
    pub fn matches(self, other: Nucleotide) -> bool {
        self == other && !self.is_ambiguous()
    }

    /// Case-insensitive conversion from a raw byte.
    #[inline(always)]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Nucleotide::A),
            b'C' | b'c' => Some(Nucleotide::C),
            b'G' | b'g' => Some(Nucleotide::G),
            b'T' | b't' => Some(Nucleotide::T),
            b'N' | b'n' => Some(Nucleotide::N),
            _ => None,
        }
    }

    /// Same as [`Nucleotide::from_byte`], but reports the offending symbol at the given position.
    pub fn parse(byte: u8, position: usize) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::InvalidSymbol {
            symbol: byte as char,
            position,
        })
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = Error;

    fn try_from(value: char) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Nucleotide::from_byte)
            .ok_or(Error::InvalidSymbol {
                symbol: value,
                position: 0,
            })
    }
}

impl Display for Nucleotide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An immutable nucleotide sequence. Both reads and references are sequences.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Sequence {
    symbols: Vec<Nucleotide>,
}

impl Sequence {
    pub fn new(raw: &str) -> Result<Self> {
        Self::from_bytes(raw.as_bytes())
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let symbols = raw
            .iter()
            .enumerate()
            .map(|(position, byte)| Nucleotide::parse(*byte, position))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.symbols
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Nucleotide> + '_ {
        self.symbols.iter().copied()
    }

    /// Reversed copy of the sequence (not complemented).
    pub fn reversed(&self) -> Self {
        Self {
            symbols: self.symbols.iter().rev().copied().collect(),
        }
    }
}

impl From<Vec<Nucleotide>> for Sequence {
    fn from(symbols: Vec<Nucleotide>) -> Self {
        Self { symbols }
    }
}

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol.symbol())?;
        }
        Ok(())
    }
}
