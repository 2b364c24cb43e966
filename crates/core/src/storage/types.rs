use serde::{Deserialize, Serialize};

/// One page of search results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub list: Vec<T>,
    pub total: u64,
}

impl<T> SearchResult<T> {
    pub fn new(list: Vec<T>, total: u64) -> Self {
        Self { list, total }
    }

    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
