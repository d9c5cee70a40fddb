//! Pagination engine
//!
//! Lazy, memoized page arithmetic over any [`DataSource`].

use super::types::PageInfo;
use crate::config::PaginatorConfig;
use crate::error::Result;
use crate::source::{DataSource, MemorySource};
use crate::types::Window;
use once_cell::unsync::OnceCell;
use std::borrow::Cow;

/// Memoized count metadata
///
/// The page count is derived from the count, so it is only ever filled after
/// the count; resetting the count resets both.
#[derive(Debug, Default)]
struct Totals {
    count: OnceCell<u64>,
    page_count: OnceCell<u64>,
}

impl Totals {
    /// Drop both caches
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop the page count only
    fn reset_page_count(&mut self) {
        self.page_count.take();
    }
}

/// Number of pages needed for `count` records
pub fn page_count_for(count: u64, page_size: u64) -> u64 {
    if page_size > 0 {
        count.div_ceil(page_size)
    } else {
        u64::from(count > 0)
    }
}

/// Clamp a requested page into `[1, page_count]`, or 0 when there are no pages
pub fn clamp_page(requested: i64, page_count: u64) -> u64 {
    if page_count == 0 {
        return 0;
    }
    u64::try_from(requested).unwrap_or(0).clamp(1, page_count)
}

/// Paginator over a data source
///
/// Holds the page size, the requested page and the memoized totals. Every
/// derived value is computed on demand. The count is fetched from the source
/// at most once until [`Paginator::invalidate`] is called; the page count is
/// recomputed after [`Paginator::set_page_size`].
///
/// A paginator is not `Sync`: use one per request.
#[derive(Debug)]
pub struct Paginator<S> {
    /// Backend
    source: S,
    /// Records per page, 0 = unpaginated
    page_size: u64,
    /// Page as requested by the caller, not clamped
    requested_page: i64,
    /// Memoized count and page count
    totals: Totals,
}

impl<S: DataSource> Paginator<S> {
    /// Create a paginator over `source`
    pub fn new(source: S, page_size: u64, page: i64) -> Self {
        Self {
            source,
            page_size,
            requested_page: page,
            totals: Totals::default(),
        }
    }

    /// Create a paginator from validated configuration
    pub fn from_config(source: S, config: &PaginatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(source, config.page_size()?, config.page))
    }

    /// Get the data source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the paginator, returning the data source
    pub fn into_source(self) -> S {
        self.source
    }

    /// Records per page (0 = unpaginated)
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Page as last requested, before clamping
    pub fn requested_page(&self) -> i64 {
        self.requested_page
    }

    /// Whether the count is currently memoized
    pub fn is_counted(&self) -> bool {
        self.totals.count.get().is_some()
    }

    // ========================================================================
    // Count & page count
    // ========================================================================

    /// Total number of records
    ///
    /// Queries the source on first use, then answers from cache. Backend
    /// failures are returned as-is and nothing is cached.
    pub fn count(&self) -> Result<u64> {
        let mut counted = false;
        let count = *self.totals.count.get_or_try_init(|| {
            counted = true;
            self.source.count()
        })?;

        if counted {
            tracing::debug!(count, "Counted records");
        } else {
            tracing::trace!(count, "Count cache hit");
        }
        Ok(count)
    }

    /// Total number of pages
    pub fn page_count(&self) -> Result<u64> {
        if let Some(&page_count) = self.totals.page_count.get() {
            return Ok(page_count);
        }

        let count = self.count()?;
        Ok(*self
            .totals
            .page_count
            .get_or_init(|| page_count_for(count, self.page_size)))
    }

    /// Forget the memoized count (and with it the page count)
    ///
    /// Call after the underlying records have changed.
    pub fn invalidate(&mut self) {
        self.totals.reset();
    }

    // ========================================================================
    // Page selection
    // ========================================================================

    /// Effective page: the requested page clamped to `[1, page_count]`,
    /// or 0 when there are no pages
    pub fn page(&self) -> Result<u64> {
        let page_count = self.page_count()?;
        Ok(clamp_page(self.requested_page, page_count))
    }

    /// Request a page, returning the effective page it clamps to
    pub fn set_page(&mut self, page: i64) -> Result<u64> {
        self.requested_page = page;
        let effective = self.page()?;
        tracing::trace!(requested = page, effective, "Page selected");
        Ok(effective)
    }

    /// Change the page size
    ///
    /// The count stays cached; only the page count is recomputed.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size;
        self.totals.reset_page_count();
    }

    // ========================================================================
    // Record numbers
    // ========================================================================

    /// 1-based number of the first record on the current page, 0 if none
    pub fn first_number(&self) -> Result<u64> {
        let page = self.page()?;
        if page == 0 {
            return Ok(0);
        }
        Ok((page - 1) * self.page_size + 1)
    }

    /// 1-based number of the last record on the current page, 0 if none
    pub fn last_number(&self) -> Result<u64> {
        let page = self.page()?;
        if page == 0 {
            return Ok(0);
        }
        let count = self.count()?;
        if self.page_size == 0 {
            return Ok(count);
        }
        Ok(count.min(page * self.page_size))
    }

    /// Snapshot of the derived state
    pub fn info(&self) -> Result<PageInfo> {
        let page = self.page()?;
        let page_count = self.page_count()?;
        Ok(PageInfo {
            page,
            page_count,
            page_size: self.page_size,
            count: self.count()?,
            first: self.first_number()?,
            last: self.last_number()?,
            has_previous: page > 1,
            has_next: page < page_count,
        })
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Window of the current page, `None` meaning "fetch everything"
    pub fn window(&self) -> Result<Option<Window>> {
        let page = self.page()?;
        Ok(Window::for_page(page, self.page_size))
    }

    /// Fetch the records of the current page
    pub fn fetch_current(&self) -> Result<Cow<'_, [S::Record]>> {
        match self.window()? {
            Some(window) => {
                tracing::debug!(%window, "Fetching page");
                self.source.fetch_window(window)
            }
            None => {
                tracing::debug!("Fetching unbounded result");
                self.source.fetch_all()
            }
        }
    }

    /// Optionally select `page`, then fetch the records of the current page
    pub fn fetch_page(&mut self, page: Option<i64>) -> Result<Cow<'_, [S::Record]>> {
        if let Some(page) = page {
            self.set_page(page)?;
        }
        self.fetch_current()
    }

    // ========================================================================
    // Locate & seek
    // ========================================================================

    /// 1-based position of the first record matching `predicate`
    pub fn locate_position(&self, predicate: &S::Predicate<'_>) -> Result<Option<u64>> {
        let position = self.source.locate_rank(predicate)?.filter(|&rank| rank > 0);
        tracing::debug!(?position, "Located record");
        Ok(position)
    }

    /// Page holding the first record matching `predicate`
    pub fn locate_page(&self, predicate: &S::Predicate<'_>) -> Result<Option<u64>> {
        Ok(self
            .locate_position(predicate)?
            .map(|position| page_of(position, self.page_size)))
    }

    /// Move to the page holding the first record matching `predicate`
    ///
    /// Returns the new effective page, or `None` (leaving the current page
    /// untouched) when nothing matches.
    pub fn seek_to(&mut self, predicate: &S::Predicate<'_>) -> Result<Option<u64>> {
        let Some(page) = self.locate_page(predicate)? else {
            return Ok(None);
        };
        let page = i64::try_from(page).unwrap_or(i64::MAX);
        self.set_page(page).map(Some)
    }
}

/// Page number holding the record at 1-based `position`
fn page_of(position: u64, page_size: u64) -> u64 {
    if page_size > 0 {
        position.div_ceil(page_size)
    } else {
        1
    }
}

impl<T: Clone> Paginator<MemorySource<'static, T>> {
    /// Paginate an owned in-memory sequence
    pub fn from_vec(items: Vec<T>, page_size: u64, page: i64) -> Self {
        Self::new(MemorySource::new(items), page_size, page)
    }
}

impl<'a, T: Clone> Paginator<MemorySource<'a, T>> {
    /// Paginate a borrowed in-memory sequence
    pub fn from_slice(items: &'a [T], page_size: u64, page: i64) -> Self {
        Self::new(MemorySource::borrowed(items), page_size, page)
    }
}
