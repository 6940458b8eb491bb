//! List query parameters for the back-office list endpoints.
//!
//! Every list endpoint accepts the same family of parameters:
//! `page`, `page_size`, `search`, `ordering`, categorical filters, and a
//! creation-date window. Only non-default values are emitted, so a fresh
//! query serializes to nothing but `page_size`.

use chrono::{Days, NaiveDate};

/// Sort direction, serialized as the DRF `ordering` prefix
/// (descending fields carry a leading `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Query parameters for a single list request.
#[derive(Debug, Clone)]
pub struct ListParams {
    page: u32,
    page_size: u32,
    search: Option<String>,
    ordering: Option<(String, SortDirection)>,
    filters: Vec<(String, String)>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl ListParams {
    /// A first-page query with the given page size and no filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: None,
            ordering: None,
            filters: Vec::new(),
            date_from: None,
            date_to: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    pub fn ordering(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.ordering = Some((field.into(), direction));
        self
    }

    /// Add a categorical filter such as `status=pending` or `is_active=true`.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Restrict to records created inside the inclusive `[from, to]` window.
    ///
    /// The server-side upper bound is exclusive, so `to` is emitted as
    /// `created_at__lt = to + 1 day` — the whole end day is included.
    pub fn created_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Serialize to query pairs, emitting only non-default values.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if self.page > 1 {
            pairs.push(("page".into(), self.page.to_string()));
        }
        pairs.push(("page_size".into(), self.page_size.to_string()));

        if let Some(ref term) = self.search {
            pairs.push(("search".into(), term.clone()));
        }

        if let Some((ref field, direction)) = self.ordering {
            let value = match direction {
                SortDirection::Ascending => field.clone(),
                SortDirection::Descending => format!("-{field}"),
            };
            pairs.push(("ordering".into(), value));
        }

        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }

        if let Some(from) = self.date_from {
            pairs.push(("created_at__gte".into(), from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            // Exclusive upper bound: the day after `to`.
            let upper = to.checked_add_days(Days::new(1)).unwrap_or(to);
            pairs.push(("created_at__lt".into(), upper.format("%Y-%m-%d").to_string()));
        }

        pairs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fresh_query_emits_only_page_size() {
        let pairs = ListParams::new(20).to_pairs();
        assert_eq!(pairs, vec![("page_size".to_owned(), "20".to_owned())]);
    }

    #[test]
    fn page_one_is_omitted() {
        let pairs = ListParams::new(20).page(1).to_pairs();
        assert!(!pairs.iter().any(|(k, _)| k == "page"));

        let pairs = ListParams::new(20).page(3).to_pairs();
        assert!(pairs.contains(&("page".to_owned(), "3".to_owned())));
    }

    #[test]
    fn blank_search_is_omitted() {
        let pairs = ListParams::new(20).search("   ").to_pairs();
        assert!(!pairs.iter().any(|(k, _)| k == "search"));
    }

    #[test]
    fn descending_ordering_gets_minus_prefix() {
        let pairs = ListParams::new(20)
            .ordering("created_at", SortDirection::Descending)
            .to_pairs();
        assert!(pairs.contains(&("ordering".to_owned(), "-created_at".to_owned())));

        let pairs = ListParams::new(20)
            .ordering("amount", SortDirection::Ascending)
            .to_pairs();
        assert!(pairs.contains(&("ordering".to_owned(), "amount".to_owned())));
    }

    #[test]
    fn end_date_upper_bound_is_exclusive_next_day() {
        let pairs = ListParams::new(20)
            .created_between(Some(date(2026, 3, 1)), Some(date(2026, 3, 31)))
            .to_pairs();
        assert!(pairs.contains(&("created_at__gte".to_owned(), "2026-03-01".to_owned())));
        assert!(pairs.contains(&("created_at__lt".to_owned(), "2026-04-01".to_owned())));
    }

    #[test]
    fn end_date_rolls_over_year_boundary() {
        let pairs = ListParams::new(20)
            .created_between(None, Some(date(2025, 12, 31)))
            .to_pairs();
        assert!(pairs.contains(&("created_at__lt".to_owned(), "2026-01-01".to_owned())));
    }

    #[test]
    fn categorical_filters_pass_through() {
        let pairs = ListParams::new(100)
            .filter("status", "pending")
            .filter("is_active", "true")
            .to_pairs();
        assert!(pairs.contains(&("status".to_owned(), "pending".to_owned())));
        assert!(pairs.contains(&("is_active".to_owned(), "true".to_owned())));
    }
}
