use std::fmt::Debug;

use rlekit_core_rs::num::RunLength;

use super::encoding::Encoding;
use super::error::{Error, Result};
use super::identical::{Equal, Identical};

/// Run-length encodes a non-empty sequence using `PartialEq` to delimit runs.
pub fn encode<V: PartialEq + Clone>(seq: &[V]) -> Result<Encoding<V>> {
    encode_with(seq, Equal)
}

/// Run-length encodes a non-empty sequence, delimiting runs with a custom rule and storing run
/// lengths as `L`.
pub fn encode_with<V, L, I>(seq: &[V], identical: I) -> Result<Encoding<V, L>>
where
    V: Clone,
    L: RunLength,
    I: Identical<V>,
{
    let (first, rest) = seq.split_first().ok_or(Error::EmptyInput)?;

    let mut encoding = Encoding::with_capacity(1);
    let mut current = first;
    let mut count = L::one();

    for value in rest {
        if identical.identical(current, value) {
            count = count.checked_add(&L::one()).ok_or_else(Error::overflow::<L>)?;
        } else {
            encoding.push(current.clone(), count);

            current = value;
            count = L::one();
        }
    }
    encoding.push(current.clone(), count);

    Ok(encoding)
}

/// Interpretation of a run count as a non-negative integer.
pub trait Count: Debug {
    fn to_count(&self) -> Option<usize>;
}

macro_rules! impl_integer_count {
    ($($t:ty),*) => {
        $(
            impl Count for $t {
                #[inline]
                fn to_count(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_integer_count!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_float_count {
    ($($t:ty),*) => {
        $(
            impl Count for $t {
                fn to_count(&self) -> Option<usize> {
                    let integral = self.is_finite() && self.fract() == 0.0;
                    if integral && *self >= 0.0 && *self <= usize::MAX as $t {
                        Some(*self as usize)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

impl_float_count!(f32, f64);

impl Count for str {
    fn to_count(&self) -> Option<usize> {
        self.trim().parse().ok()
    }
}

impl Count for String {
    fn to_count(&self) -> Option<usize> {
        self.as_str().to_count()
    }
}

impl<T: Count + ?Sized> Count for &T {
    #[inline]
    fn to_count(&self) -> Option<usize> {
        (**self).to_count()
    }
}

/// Expands parallel `values` and `counts` back into the sequence they encode.
///
/// All counts are validated before anything is allocated. Zero counts are accepted and produce
/// nothing, so the output is not required to be canonical.
pub fn decode<V: Clone, C: Count>(values: &[V], counts: &[C]) -> Result<Vec<V>> {
    if values.len() != counts.len() {
        return Err(Error::LengthMismatch {
            values: values.len(),
            counts: counts.len(),
        });
    }

    let counts = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            count.to_count().ok_or_else(|| Error::NonIntegerCount {
                index,
                count: format!("{:?}", count),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total = counts
        .iter()
        .try_fold(0usize, |acc, count| acc.checked_add(*count))
        .ok_or_else(Error::overflow::<usize>)?;

    let mut seq = Vec::with_capacity(total);
    for (value, count) in values.iter().zip(counts) {
        seq.resize(seq.len() + count, value.clone());
    }
    Ok(seq)
}
