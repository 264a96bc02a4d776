//! Note ordering, neighbor links and list pagination.
//!
//! Notes are sorted reverse-chronologically (stable, so equal dates keep
//! their walk order) and bucketed into fixed-size list pages. The first
//! page is the unnumbered list root; further pages live under `page-2`,
//! `page-3`, … Per-note previous/next links are computed once, against
//! the global unfiltered order — tag-filtered views reuse them rather
//! than recomputing adjacency per tag.

use crate::page::PageRecord;
use std::cmp::Reverse;

/// Fixed list page size.
pub const NOTES_PER_PAGE: usize = 20;

/// Sort notes descending by creation date (stable).
pub fn sorted_notes(notes: &[PageRecord]) -> Vec<&PageRecord> {
    let mut sorted: Vec<&PageRecord> = notes.iter().collect();
    sorted.sort_by_key(|note| Reverse(note.created));
    sorted
}

/// Keep only notes carrying the tag; `None` keeps everything.
pub fn notes_by_tag<'a>(sorted: &[&'a PageRecord], tag: Option<&str>) -> Vec<&'a PageRecord> {
    sorted
        .iter()
        .copied()
        .filter(|note| tag.is_none_or(|tag| note.tags.iter().any(|t| t == tag)))
        .collect()
}

/// One list page plus its pagination position.
#[derive(Debug)]
pub struct ListPage<'a> {
    /// 1-based position; page 1 is the unnumbered list root
    pub index: usize,
    /// Total number of pages in this listing
    pub page_count: usize,
    /// The notes slice shown on this page
    pub notes: Vec<&'a PageRecord>,
}

impl ListPage<'_> {
    /// Output sub-folder for this page; `None` for the list root.
    pub fn folder_name(&self) -> Option<String> {
        (self.index >= 2).then(|| format!("page-{}", self.index))
    }

    /// Index of the adjacent more-recent page, if any.
    pub fn later_index(&self) -> Option<usize> {
        (self.index > 1).then(|| self.index - 1)
    }

    /// Index of the adjacent older page, if any.
    pub fn earlier_index(&self) -> Option<usize> {
        (self.index < self.page_count).then(|| self.index + 1)
    }
}

/// Bucket sorted notes into list pages.
///
/// Zero notes still yield a single empty page, so the list-index route
/// always exists.
pub fn paginate<'a>(notes: &[&'a PageRecord]) -> Vec<ListPage<'a>> {
    if notes.is_empty() {
        return vec![ListPage {
            index: 1,
            page_count: 1,
            notes: Vec::new(),
        }];
    }

    let page_count = notes.len().div_ceil(NOTES_PER_PAGE);

    notes
        .chunks(NOTES_PER_PAGE)
        .enumerate()
        .map(|(chunk_index, chunk)| ListPage {
            index: chunk_index + 1,
            page_count,
            notes: chunk.to_vec(),
        })
        .collect()
}

/// The chronological neighbors of one note in the sorted order.
#[derive(Debug, Default)]
pub struct Neighbors<'a> {
    /// Immediately more recent note
    pub later: Option<&'a PageRecord>,
    /// Immediately older note
    pub earlier: Option<&'a PageRecord>,
}

/// Neighbors of `sorted[index]` by linear adjacency.
pub fn neighbors<'a>(sorted: &[&'a PageRecord], index: usize) -> Neighbors<'a> {
    Neighbors {
        later: index.checked_sub(1).and_then(|i| sorted.get(i).copied()),
        earlier: sorted.get(index + 1).copied(),
    }
}
