//! Cursor-paginated envelopes for read-only collections.
//!
//! Cursors are opaque to callers: a URL-safe base64 encoding of the offset of
//! the first item of the next page.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

const CURSOR_PREFIX: &str = "o:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Invalid cursor")]
    InvalidCursor,
    #[error("Invalid limit: {0}")]
    InvalidLimit(u64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub cursor: Option<String>,
    pub limit: Option<u64>,
}

impl PageRequest {
    pub fn first(limit: Option<u64>) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    pub fn after(cursor: impl Into<String>, limit: Option<u64>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            limit,
        }
    }

    /// Effective limit: the requested one (must be non-zero), or `default`,
    /// capped at `max`. Never below 1, so cursors always advance.
    pub fn effective_limit(&self, default: u64, max: u64) -> Result<u64, PageError> {
        match self.limit {
            Some(0) => Err(PageError::InvalidLimit(0)),
            Some(n) => Ok(n.min(max).max(1)),
            None => Ok(default.min(max).max(1)),
        }
    }

    pub fn offset(&self) -> Result<usize, PageError> {
        match &self.cursor {
            None => Ok(0),
            Some(c) => decode_cursor(c),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    pub fn has_next(&self) -> bool {
        self.page_info.next_cursor.is_some()
    }
}

impl<T: Clone> Page<T> {
    /// Slice one page out of an in-memory collection.
    pub fn from_slice(
        all: &[T],
        request: &PageRequest,
        default_limit: u64,
        max_limit: u64,
    ) -> Result<Self, PageError> {
        let limit = request.effective_limit(default_limit, max_limit)?;
        let offset = request.offset()?;
        if offset > all.len() {
            return Err(PageError::InvalidCursor);
        }

        let end = offset.saturating_add(limit as usize).min(all.len());
        let next_cursor = (end < all.len()).then(|| encode_cursor(end));
        let prev_cursor =
            (offset > 0).then(|| encode_cursor(offset.saturating_sub(limit as usize)));

        Ok(Self::new(
            all[offset..end].to_vec(),
            PageInfo {
                next_cursor,
                prev_cursor,
                limit,
            },
        ))
    }
}

pub fn encode_cursor(offset: usize) -> String {
    URL_SAFE_NO_PAD.encode(format!("{CURSOR_PREFIX}{offset}"))
}

pub fn decode_cursor(cursor: &str) -> Result<usize, PageError> {
    let raw = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| PageError::InvalidCursor)?;
    let text = String::from_utf8(raw).map_err(|_| PageError::InvalidCursor)?;
    text.strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or(PageError::InvalidCursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> Vec<u32> {
        (1..=7).collect()
    }

    #[test]
    fn first_page_has_next_cursor_only() {
        let page = Page::from_slice(&numbers(), &PageRequest::first(Some(3)), 20, 100).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.page_info.prev_cursor.is_none());
        assert!(page.has_next());
    }

    #[test]
    fn walking_cursors_visits_every_item_once() {
        let all = numbers();
        let mut seen = Vec::new();
        let mut request = PageRequest::first(Some(3));
        loop {
            let page = Page::from_slice(&all, &request, 20, 100).unwrap();
            seen.extend(page.items.iter().copied());
            match page.page_info.next_cursor {
                Some(c) => request = PageRequest::after(c, Some(3)),
                None => break,
            }
        }
        assert_eq!(seen, all);
    }

    #[test]
    fn default_and_max_limits_apply() {
        let req = PageRequest::first(None);
        assert_eq!(req.effective_limit(20, 100).unwrap(), 20);
        assert_eq!(req.effective_limit(500, 100).unwrap(), 100);
        assert_eq!(PageRequest::first(Some(1000)).effective_limit(20, 100).unwrap(), 100);
        assert_eq!(
            PageRequest::first(Some(0)).effective_limit(20, 100),
            Err(PageError::InvalidLimit(0))
        );
    }

    #[test]
    fn zero_max_still_advances() {
        assert_eq!(PageRequest::first(Some(5)).effective_limit(20, 0).unwrap(), 1);
        assert_eq!(PageRequest::first(None).effective_limit(20, 0).unwrap(), 1);

        let page = Page::from_slice(&numbers(), &PageRequest::first(Some(5)), 20, 0).unwrap();
        assert_eq!(page.items, vec![1]);
        let next = page.page_info.next_cursor.unwrap();
        assert_eq!(decode_cursor(&next).unwrap(), 1);
    }

    #[test]
    fn garbage_cursor_is_rejected() {
        let req = PageRequest::after("not-a-cursor!", None);
        assert_eq!(
            Page::from_slice(&numbers(), &req, 20, 100),
            Err(PageError::InvalidCursor)
        );
    }

    #[test]
    fn cursor_past_the_end_is_rejected() {
        let req = PageRequest::after(encode_cursor(99), None);
        assert_eq!(
            Page::from_slice(&numbers(), &req, 20, 100),
            Err(PageError::InvalidCursor)
        );
    }
}
