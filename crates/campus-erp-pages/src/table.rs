//! The generic table shell.
//!
//! Every management screen lists records through the same shape: columns,
//! one page of rows, pagination, and a loading flag. The shell holds no
//! cross-page cache; each interaction produces a [`ListQuery`] and the
//! response replaces the current page wholesale.

use serde_json::json;

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Header text.
    pub title: String,
    /// Record key the cell reads.
    pub data_index: String,
    /// Stable column key.
    pub key: String,
}

impl ColumnDef {
    /// Creates a column whose key equals its data index.
    pub fn new(title: impl Into<String>, data_index: impl Into<String>) -> Self {
        let data_index = data_index.into();
        Self {
            title: title.into(),
            key: data_index.clone(),
            data_index,
        }
    }
}

/// Pagination state, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number.
    pub current: u64,
    /// Rows per page.
    pub page_size: usize,
    /// Total matching records, re-synced after every fetch.
    pub total: u64,
}

impl Pagination {
    /// Creates pagination at page 1 with no known total.
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
            total: 0,
        }
    }

    /// Number of pages for the current total.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}

/// The visible state of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// The current page of records.
    pub rows: Vec<serde_json::Value>,
    /// Pagination, total included.
    pub pagination: Pagination,
    /// `true` while a fetch is in flight.
    pub loading: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TableState {
    /// Creates an empty table with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            pagination: Pagination::new(page_size),
            loading: false,
        }
    }
}

/// The query one list fetch sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u64,
    /// Rows per page.
    pub page_size: usize,
    /// Free-text search, omitted from the body when empty.
    pub search_text: Option<String>,
    /// Entity-specific filters merged into the body.
    pub filters: serde_json::Map<String, serde_json::Value>,
}

impl ListQuery {
    /// Creates a query for page 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            search_text: None,
            filters: serde_json::Map::new(),
        }
    }

    /// Renders the request body the backend expects.
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = self.filters.clone();
        body.insert("page".into(), json!(self.page));
        body.insert("pageSize".into(), json!(self.page_size));
        if let Some(text) = &self.search_text {
            if !text.is_empty() {
                body.insert("search_text".into(), json!(text));
            }
        }
        serde_json::Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_key_defaults_to_data_index() {
        let col = ColumnDef::new("Class Name", "name");
        assert_eq!(col.key, "name");
        assert_eq!(col.data_index, "name");
    }

    #[test]
    fn test_page_count() {
        let mut p = Pagination::new(10);
        p.total = 31;
        assert_eq!(p.page_count(), 4);
        p.total = 30;
        assert_eq!(p.page_count(), 3);
        p.total = 0;
        assert_eq!(p.page_count(), 0);
    }

    #[test]
    fn test_query_body_includes_paging_and_search() {
        let mut query = ListQuery::new(10);
        query.page = 3;
        query.search_text = Some("5A".into());
        query
            .filters
            .insert("class_id".into(), json!(7));

        let body = query.to_body();
        assert_eq!(body["page"], json!(3));
        assert_eq!(body["pageSize"], json!(10));
        assert_eq!(body["search_text"], json!("5A"));
        assert_eq!(body["class_id"], json!(7));
    }

    #[test]
    fn test_query_body_omits_empty_search() {
        let mut query = ListQuery::new(10);
        query.search_text = Some(String::new());
        let body = query.to_body();
        assert!(body.get("search_text").is_none());
    }
}
