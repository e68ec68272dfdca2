use std::iter::Zip;
use std::vec::IntoIter;

use derive_getters::Dissolve;

use rlekit_core_rs::num::{self, RunLength};

use super::error::{Error, Result};
use super::identical::{Equal, Identical};

/// Run-length encoding of a sequence: one value and one count per run, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Dissolve)]
pub struct Encoding<V, L: RunLength = usize> {
    values: Vec<V>,
    counts: Vec<L>,
}

impl<V, L: RunLength> Encoding<V, L> {
    /// Wraps existing values and counts. Only the lengths are checked, see [`Self::is_canonical`].
    pub fn new(values: Vec<V>, counts: Vec<L>) -> Result<Self> {
        if values.len() != counts.len() {
            return Err(Error::LengthMismatch {
                values: values.len(),
                counts: counts.len(),
            });
        }
        Ok(Self { values, counts })
    }

    pub fn with_capacity(runs: usize) -> Self {
        Self {
            values: Vec::with_capacity(runs),
            counts: Vec::with_capacity(runs),
        }
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn counts(&self) -> &[L] {
        &self.counts
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn push(&mut self, value: V, count: L) {
        self.values.push(value);
        self.counts.push(count);
    }

    pub fn runs(&self) -> impl Iterator<Item = (&V, &L)> {
        self.values.iter().zip(self.counts.iter())
    }

    /// Length of the decoded sequence.
    pub fn total(&self) -> Result<usize> {
        num::total(&self.counts).ok_or_else(Error::overflow::<usize>)
    }

    /// Index of the first element of every run in the decoded sequence.
    pub fn starts(&self) -> Result<Vec<usize>> {
        let mut starts = Vec::with_capacity(self.counts.len());
        let mut cursor = 0usize;
        for count in &self.counts {
            starts.push(cursor);
            cursor = count
                .to_usize()
                .and_then(|count| cursor.checked_add(count))
                .ok_or_else(Error::overflow::<usize>)?;
        }
        Ok(starts)
    }

    /// Whether every count is positive and no two neighbouring values are identical.
    pub fn is_canonical_by(&self, identical: impl Identical<V>) -> bool {
        self.counts.iter().all(|count| *count > L::zero())
            && self
                .values
                .windows(2)
                .all(|pair| !identical.identical(&pair[0], &pair[1]))
    }

    pub fn is_canonical(&self) -> bool
    where
        V: PartialEq,
    {
        self.is_canonical_by(Equal)
    }

    /// Expands the runs back into the original sequence.
    pub fn decode(&self) -> Result<Vec<V>>
    where
        V: Clone,
    {
        let mut decoded = Vec::with_capacity(self.total()?);
        for (value, count) in self.runs() {
            // Fits: the total above is representable
            let count = count.to_usize().unwrap_or_default();
            decoded.resize(decoded.len() + count, value.clone());
        }
        Ok(decoded)
    }
}

impl<V, L: RunLength> IntoIterator for Encoding<V, L> {
    type Item = (V, L);
    type IntoIter = Zip<IntoIter<V>, IntoIter<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter().zip(self.counts)
    }
}

impl<V, L: RunLength> From<Encoding<V, L>> for (Vec<V>, Vec<L>) {
    fn from(encoding: Encoding<V, L>) -> Self {
        (encoding.values, encoding.counts)
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;

    use super::*;

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = Encoding::<u8, u8>::new(vec![1, 2], vec![1]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                values: 2,
                counts: 1
            }
        ));
    }

    #[test]
    fn test_total_and_starts() -> Result<()> {
        for (counts, total, starts) in [
            (vec![], 0, vec![]),
            (vec![1], 1, vec![0]),
            (vec![1, 2, 3, 1, 1], 8, vec![0, 1, 3, 6, 7]),
            (vec![255, 255], 510, vec![0, 255]),
        ] {
            let values = vec!['x'; counts.len()];
            let encoding = Encoding::<char, u8>::new(values, counts)?;
            assert_eq!(encoding.total()?, total);
            assert_eq!(encoding.starts()?, starts);
        }
        Ok(())
    }

    #[test]
    fn test_total_overflow() -> Result<()> {
        let encoding = Encoding::<u8, usize>::new(vec![1, 2], vec![usize::MAX, 1])?;
        assert!(matches!(
            encoding.total(),
            Err(Error::CountOverflow { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_is_canonical() -> Result<()> {
        for (values, counts, expected) in [
            (vec![], vec![], true),
            (vec![1], vec![3], true),
            (vec![1, 2, 1], vec![1, 1, 1], true),
            (vec![1, 1], vec![1, 1], false),
            (vec![1, 2], vec![1, 0], false),
        ] {
            let encoding = Encoding::<u8, u32>::new(values, counts)?;
            assert_eq!(encoding.is_canonical(), expected);
        }

        let encoding = Encoding::<char, usize>::new(vec!['a', 'A'], vec![1, 1])?;
        assert!(encoding.is_canonical());
        assert!(!encoding.is_canonical_by(|a: &char, b: &char| a.eq_ignore_ascii_case(b)));
        Ok(())
    }

    #[test]
    fn test_decode_and_dissolve() -> Result<()> {
        let encoding = Encoding::<&str, u16>::new(vec!["a", "b"], vec![2, 3])?;
        assert_eq!(encoding.decode()?, vec!["a", "a", "b", "b", "b"]);
        assert_eq!(
            encoding.clone().into_iter().collect::<Vec<_>>(),
            vec![("a", 2), ("b", 3)]
        );
        assert_eq!(encoding.dissolve(), (vec!["a", "b"], vec![2, 3]));
        Ok(())
    }
}
