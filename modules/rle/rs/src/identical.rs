/// Decides whether two neighbouring values belong to the same run.
///
/// [`Equal`] is the default everywhere. A closure lets callers treat distinct values as one run,
/// e.g. case-insensitive characters or floats within a tolerance. The first value of a run is the
/// one kept in the encoding.
///
/// Parallel encoding matches sequential encoding only if the rule is an equivalence relation.
pub trait Identical<T> {
    fn identical(&self, head: &T, next: &T) -> bool;
}

/// Plain `PartialEq` equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equal;

impl<T: PartialEq> Identical<T> for Equal {
    #[inline]
    fn identical(&self, head: &T, next: &T) -> bool {
        head == next
    }
}

impl<T, F: Fn(&T, &T) -> bool> Identical<T> for F {
    #[inline]
    fn identical(&self, head: &T, next: &T) -> bool {
        self(head, next)
    }
}
