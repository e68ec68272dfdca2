use std::fmt::Debug;

/// T values are non-negative primitive integers that can hold the length of a run.
///
/// Every unsigned primitive qualifies. Narrow types (`u8`, `u16`) are useful to keep encodings
/// compact, at the cost of a `CountOverflow` error on runs that exceed `T::max_value()`.
pub trait RunLength: ::num::PrimInt + ::num::Unsigned + Debug + Default + Send + Sync {}

impl<T: ::num::PrimInt + ::num::Unsigned + Debug + Default + Send + Sync> RunLength for T {}

/// Sum of run lengths as `usize`, or `None` if any length or the total doesn't fit.
pub fn total<L: RunLength>(lengths: &[L]) -> Option<usize> {
    lengths
        .iter()
        .try_fold(0usize, |acc, length| acc.checked_add(length.to_usize()?))
}
