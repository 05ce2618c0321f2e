use std::fmt::Debug;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// T values are non-negative primitive integers
pub trait PrimUInt: PrimInt + ::num::Unsigned {}
impl<T: PrimInt + ::num::Unsigned> PrimUInt for T {}

/// T values are signed primitive integers that can be shared between threads.
/// Alignment scores are expressed in terms of this trait.
pub trait PrimSInt: PrimInt + ::num::Signed + Send + Sync {}
impl<T: PrimInt + ::num::Signed + Send + Sync> PrimSInt for T {}

/// Converts a count into the target integer type, saturating at its maximum value.
pub fn saturating_cast<T: PrimInt>(value: usize) -> T {
    ::num::cast(value).unwrap_or_else(T::max_value)
}
