//! Uniform size and allocation queries.

/// Size and allocation figures shared by every floatkit container.
///
/// For vectors, `size` is the logical length and `alloc` the capacity in
/// elements. For dictionaries, `size` is the entry count and `alloc` the
/// number of allocated buckets.
pub trait Measure {
    /// Number of live elements or entries.
    fn size(&self) -> usize;

    /// Number of allocated element slots or buckets.
    fn alloc(&self) -> usize;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn alloc(&self) -> usize {
        (**self).alloc()
    }
}
