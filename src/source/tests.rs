//! Tests for source module

use super::*;
use std::borrow::Cow;

/// Source that can count and fetch but not rank
struct CountingOnly {
    rows: Vec<u32>,
}

impl DataSource for CountingOnly {
    type Record = u32;
    type Predicate<'p> = u32;

    fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }

    fn fetch_window(&self, window: Window) -> Result<Cow<'_, [u32]>> {
        let range = window.clamp_to(self.rows.len());
        Ok(Cow::Owned(self.rows[range].to_vec()))
    }

    fn fetch_all(&self) -> Result<Cow<'_, [u32]>> {
        Ok(Cow::Borrowed(&self.rows))
    }
}

fn letters() -> MemorySource<'static, char> {
    MemorySource::new(('a'..='j').collect())
}

// ============================================================================
// MemorySource Tests
// ============================================================================

#[test]
fn test_memory_source_count() {
    assert_eq!(letters().count().unwrap(), 10);
    assert_eq!(MemorySource::<char>::new(vec![]).count().unwrap(), 0);
}

#[test]
fn test_memory_source_fetch_window_middle() {
    let source = letters();
    let page = source.fetch_window(Window::new(3, 3)).unwrap();
    assert_eq!(&page[..], &['d', 'e', 'f']);
    assert!(matches!(page, Cow::Borrowed(_)));
}

#[test]
fn test_memory_source_fetch_window_tail_is_short() {
    let source = letters();
    let page = source.fetch_window(Window::new(9, 3)).unwrap();
    assert_eq!(&page[..], &['j']);
}

#[test]
fn test_memory_source_fetch_window_past_end_is_empty() {
    let source = letters();
    let page = source.fetch_window(Window::new(30, 3)).unwrap();
    assert!(page.is_empty());
}

#[test]
fn test_memory_source_identity_fetch() {
    let source = letters();
    let page = source.fetch_window(Window::new(0, 25)).unwrap();
    assert_eq!(page.len(), 10);
    assert!(std::ptr::eq(&page[..], source.items()));
}

#[test]
fn test_memory_source_fetch_all() {
    let source = letters();
    let all = source.fetch_all().unwrap();
    assert_eq!(all.len(), 10);
    assert!(std::ptr::eq(&all[..], source.items()));
}

#[test]
fn test_memory_source_borrowed() {
    let data = vec![1, 2, 3, 4];
    let source = MemorySource::borrowed(&data);
    assert_eq!(source.len(), 4);
    assert!(!source.is_empty());
    assert!(std::ptr::eq(source.items(), data.as_slice()));
    assert_eq!(source.into_inner(), data);
}

#[test]
fn test_memory_source_locate_rank() {
    let source = letters();
    assert_eq!(source.locate_rank(&|c: &char| *c == 'a').unwrap(), Some(1));
    assert_eq!(source.locate_rank(&|c: &char| *c >= 'g').unwrap(), Some(7));
    assert_eq!(source.locate_rank(&|c: &char| *c == 'z').unwrap(), None);
}

#[test]
fn test_memory_source_locate_rank_stops_at_first_match() {
    let source = MemorySource::new((1..=1000).collect::<Vec<u32>>());
    let visited = std::cell::Cell::new(0);
    let rank = source
        .locate_rank(&|n: &u32| {
            visited.set(visited.get() + 1);
            *n == 4
        })
        .unwrap();
    assert_eq!(rank, Some(4));
    assert_eq!(visited.get(), 4);
}

#[test]
fn test_memory_source_locate_rank_with_captured_value() {
    let source = letters();
    let target = 'e';
    assert_eq!(source.locate_rank(&|c: &char| *c == target).unwrap(), Some(5));
}

// ============================================================================
// Default Capability Tests
// ============================================================================

#[test]
fn test_locate_rank_unsupported_by_default() {
    let source = CountingOnly {
        rows: vec![10, 20, 30],
    };
    let err = source.locate_rank(&20).unwrap_err();
    assert!(matches!(err, Error::Unsupported { ref operation } if operation == "locate_rank"));
    assert!(!err.is_backend());
}
