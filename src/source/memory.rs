//! In-memory data source
//!
//! Serves pages as borrowed sub-slices of a sequence, so fetching never
//! copies records.

use super::DataSource;
use crate::error::Result;
use crate::types::Window;
use std::borrow::Cow;

/// Data source over an in-memory sequence
///
/// The sequence is either owned (`MemorySource::new`) or borrowed from the
/// caller (`MemorySource::borrowed`). Its order is the paging order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<'a, T: Clone> {
    items: Cow<'a, [T]>,
}

impl<T: Clone> MemorySource<'static, T> {
    /// Create a source that owns its records
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Cow::Owned(items),
        }
    }
}

impl<'a, T: Clone> MemorySource<'a, T> {
    /// Create a source over records owned by the caller
    pub fn borrowed(items: &'a [T]) -> Self {
        Self {
            items: Cow::Borrowed(items),
        }
    }

    /// All records, in paging order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the source holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the source, returning the records
    pub fn into_inner(self) -> Vec<T> {
        self.items.into_owned()
    }
}

impl<T: Clone> From<Vec<T>> for MemorySource<'static, T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T: Clone> From<&'a [T]> for MemorySource<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::borrowed(items)
    }
}

impl<T: Clone> DataSource for MemorySource<'_, T> {
    type Record = T;
    type Predicate<'p> = dyn Fn(&T) -> bool + 'p;

    fn count(&self) -> Result<u64> {
        Ok(self.items.len() as u64)
    }

    fn fetch_window(&self, window: Window) -> Result<Cow<'_, [T]>> {
        let range = window.clamp_to(self.items.len());

        // A window spanning the whole sequence is an identity fetch
        if range.start == 0 && range.end == self.items.len() {
            return Ok(Cow::Borrowed(self.items()));
        }

        Ok(Cow::Borrowed(self.items.get(range).unwrap_or_default()))
    }

    fn fetch_all(&self) -> Result<Cow<'_, [T]>> {
        Ok(Cow::Borrowed(self.items()))
    }

    fn locate_rank(&self, predicate: &Self::Predicate<'_>) -> Result<Option<u64>> {
        Ok(self
            .items
            .iter()
            .position(predicate)
            .map(|index| index as u64 + 1))
    }
}
