pub use alignable::{Alignable, Reversed};
pub use alphabet::{Nucleotide, Sequence};
pub use error::{Error, Result};

mod alignable;
pub mod alphabet;
mod error;
pub mod pairwise;
