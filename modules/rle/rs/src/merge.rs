use rlekit_core_rs::num::RunLength;

use super::encoding::Encoding;
use super::error::{Error, Result};
use super::identical::{Equal, Identical};

/// Fuses neighbouring runs that share a value, e.g. runs split apart by chunk boundaries.
///
/// Input is the concatenation of per-chunk encodings in chunk order. Any number of consecutive
/// identical runs collapse into one, so the result is canonical whenever the counts are positive.
/// Merging an already canonical encoding returns it unchanged.
pub fn merge<V: PartialEq, L: RunLength>(values: Vec<V>, counts: Vec<L>) -> Result<Encoding<V, L>> {
    merge_with(values, counts, Equal)
}

/// Same as [`merge`] with a custom rule for identical values. The first value of every fused group
/// is the one kept.
pub fn merge_with<V, L, I>(values: Vec<V>, counts: Vec<L>, identical: I) -> Result<Encoding<V, L>>
where
    L: RunLength,
    I: Identical<V>,
{
    if values.len() != counts.len() {
        return Err(Error::LengthMismatch {
            values: values.len(),
            counts: counts.len(),
        });
    }

    let mut runs = values.into_iter().zip(counts);
    let (mut current, mut length) = runs.next().ok_or(Error::EmptyInput)?;

    let mut merged = Encoding::with_capacity(runs.len() + 1);
    for (value, count) in runs {
        if identical.identical(&current, &value) {
            length = length
                .checked_add(&count)
                .ok_or_else(Error::overflow::<L>)?;
        } else {
            merged.push(current, length);

            current = value;
            length = count;
        }
    }
    merged.push(current, length);

    Ok(merged)
}
