use std::ops::Range;

use super::error::{Error, Result};

/// Half-open index range of a sequence processed as one unit of parallel work.
pub type Chunk = Range<usize>;

/// Splits `[0, length)` into contiguous, ordered, non-empty chunks whose sizes differ by at most 1.
///
/// The first `length % n` chunks receive one extra element. Requesting more chunks than there are
/// elements yields exactly `length` single-element chunks.
pub fn partition(length: usize, chunks: usize) -> Result<Vec<Chunk>> {
    if chunks == 0 {
        return Err(Error::InvalidChunkCount);
    }

    let chunks = chunks.min(length);
    if chunks == 0 {
        return Ok(Vec::new());
    }

    let base = length / chunks;
    let overflow = length % chunks;

    let mut result = Vec::with_capacity(chunks);
    let mut start = 0;
    for ind in 0..chunks {
        let end = start + base + usize::from(ind < overflow);
        result.push(start..end);
        start = end;
    }
    debug_assert_eq!(start, length);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use eyre::Result;

    use super::*;

    #[test]
    fn test_partition() -> Result<()> {
        for (length, chunks, expected) in [
            (1, 1, vec![0..1]),
            (10, 1, vec![0..10]),
            (10, 2, vec![0..5, 5..10]),
            (10, 3, vec![0..4, 4..7, 7..10]),
            (10, 4, vec![0..3, 3..6, 6..8, 8..10]),
            (50, 4, vec![0..13, 13..26, 26..38, 38..50]),
            (3, 5, vec![0..1, 1..2, 2..3]),
            (0, 3, vec![]),
        ] {
            assert_eq!(partition(length, chunks)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_partition_covers_sequence() -> Result<()> {
        for length in 0..40 {
            for chunks in 1..45 {
                let ranges = partition(length, chunks)?;
                assert_eq!(ranges.len(), chunks.min(length));

                let mut cursor = 0;
                for range in &ranges {
                    assert_eq!(range.start, cursor);
                    assert!(!range.is_empty());
                    cursor = range.end;
                }
                assert_eq!(cursor, length);

                let sizes = ranges.iter().map(|x| x.len());
                if let (Some(min), Some(max)) = (sizes.clone().min(), sizes.max()) {
                    assert!(max - min <= 1);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_partition_zero_chunks() {
        assert!(matches!(partition(10, 0), Err(Error::InvalidChunkCount)));
    }
}
