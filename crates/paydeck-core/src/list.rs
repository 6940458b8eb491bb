// ── Generic remote-list view-model ──
//
// One parametrized controller for every paginated admin list: owns the
// search term, categorical filters, sort, date window, and page state;
// builds the server query; and commits responses guarded by a monotonic
// sequence so a slow early response can never overwrite a later one.

use chrono::NaiveDate;

use paydeck_api::{ListParams, Page, SortDirection};

use crate::error::CoreError;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Why the last fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// 401-shaped: route to the session-expired surface.
    AuthExpired,
    /// Everything else: generic error panel with manual retry.
    Other,
}

/// Load phase of the list. Re-enters `Loading` on every input change;
/// there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed { kind: FailureKind, message: String },
}

/// Opaque handle tying an in-flight request to the query state that
/// issued it. A response only commits if its ticket is still the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

/// Outcome of [`RemoteList::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response committed.
    Committed,
    /// The response committed, but the current page now lies past the end
    /// (e.g. the last record of the last page was mutated away). The
    /// caller should clamp to the last page and refetch once.
    CommittedPastEnd,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Generic view-model for a paginated, filterable, sortable remote list.
///
/// Every admin screen instantiates this with its row type; the screens
/// own no fetch/paginate logic of their own.
#[derive(Debug)]
pub struct RemoteList<T> {
    search: String,
    filters: Vec<(&'static str, String)>,
    sort: Option<Sort>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    page: u32,
    page_size: u32,
    rows: Vec<T>,
    count: u64,
    phase: LoadPhase,
    /// Sequence of the most recently issued request.
    issued: u64,
}

impl<T> RemoteList<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: None,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: page_size.max(1),
            rows: Vec::new(),
            count: 0,
            phase: LoadPhase::Idle,
            issued: 0,
        }
    }

    // ── Query mutation (all reset to page 1) ─────────────────────────

    /// Set the free-text search term. Resets to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Set or clear a categorical filter (`status`, `is_active`, …).
    /// Resets to page 1.
    pub fn set_filter(&mut self, key: &'static str, value: Option<String>) {
        self.filters.retain(|(k, _)| *k != key);
        if let Some(value) = value {
            self.filters.push((key, value));
        }
        self.page = 1;
    }

    /// Set the inclusive creation-date window. Resets to page 1.
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from = from;
        self.date_to = to;
        self.page = 1;
    }

    /// Sort by `field`: clicking the active field toggles direction,
    /// a new field starts descending. Resets to page 1.
    pub fn toggle_sort(&mut self, field: &'static str) {
        self.sort = Some(match self.sort {
            Some(sort) if sort.field == field => Sort {
                field,
                direction: sort.direction.flipped(),
            },
            _ => Sort {
                field,
                direction: SortDirection::Descending,
            },
        });
        self.page = 1;
    }

    // ── Pagination (keeps the chosen page) ───────────────────────────

    pub fn set_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    /// Arm a fetch: bumps the sequence, enters `Loading`, and returns the
    /// ticket plus the server query for the current state.
    ///
    /// Rows stay visible while the reload is in flight so the table does
    /// not blank on every keystroke.
    pub fn begin_fetch(&mut self) -> (Ticket, ListParams) {
        self.issued += 1;
        self.phase = LoadPhase::Loading;
        (Ticket { seq: self.issued }, self.params())
    }

    /// Commit a response for `ticket`, unless a newer request was issued
    /// in the meantime (the stale response is dropped whole).
    pub fn apply(&mut self, ticket: Ticket, result: Result<Page<T>, CoreError>) -> Applied {
        if ticket.seq != self.issued {
            return Applied::Stale;
        }

        match result {
            Ok(page) => {
                self.rows = page.results;
                self.count = page.count;
                self.phase = LoadPhase::Loaded;
                if self.page > self.total_pages() {
                    Applied::CommittedPastEnd
                } else {
                    Applied::Committed
                }
            }
            Err(err) => {
                let kind = if err.is_auth_expired() {
                    FailureKind::AuthExpired
                } else {
                    FailureKind::Other
                };
                self.rows.clear();
                self.count = 0;
                self.phase = LoadPhase::Failed {
                    kind,
                    message: err.to_string(),
                };
                Applied::Committed
            }
        }
    }

    /// Clamp to the last page after a `CommittedPastEnd`; the caller then
    /// refetches.
    pub fn clamp_to_last_page(&mut self) {
        self.page = self.total_pages();
    }

    /// Build the server query for the current state.
    pub fn params(&self) -> ListParams {
        let mut params = ListParams::new(self.page_size)
            .page(self.page)
            .search(self.search.clone())
            .created_between(self.date_from, self.date_to);
        if let Some(sort) = self.sort {
            params = params.ordering(sort.field, sort.direction);
        }
        for (key, value) in &self.filters {
            params = params.filter(*key, value.clone());
        }
        params
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn filter_value(&self, key: &'static str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    /// The stored failure message, if the last fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Total pages for the last committed count; never less than 1.
    pub fn total_pages(&self) -> u32 {
        let pages = self.count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    /// `(first, last)` 1-based indices of the rows shown on this page,
    /// or `None` when the list is empty.
    pub fn display_range(&self) -> Option<(u64, u64)> {
        if self.count == 0 {
            return None;
        }
        let first = u64::from(self.page - 1) * u64::from(self.page_size) + 1;
        let last = (u64::from(self.page) * u64::from(self.page_size)).min(self.count);
        Some((first, last))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_of(count: u64, rows: Vec<&'static str>) -> Page<&'static str> {
        Page {
            count,
            next: None,
            previous: None,
            results: rows,
        }
    }

    fn loaded_list(page_size: u32, count: u64, rows: Vec<&'static str>) -> RemoteList<&'static str> {
        let mut list = RemoteList::new(page_size);
        let (ticket, _) = list.begin_fetch();
        list.apply(ticket, Ok(page_of(count, rows)));
        list
    }

    #[test]
    fn search_change_resets_page_to_one() {
        let mut list = loaded_list(20, 100, vec!["a"]);
        list.set_page(3);
        assert_eq!(list.page(), 3);

        list.set_search("acme");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn filter_and_date_changes_reset_page() {
        let mut list = loaded_list(20, 100, vec!["a"]);
        list.set_page(4);
        list.set_filter("status", Some("pending".into()));
        assert_eq!(list.page(), 1);

        list.set_page(4);
        list.set_date_range(NaiveDate::from_ymd_opt(2026, 7, 1), None);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn pagination_keeps_the_chosen_page() {
        let mut list = loaded_list(20, 100, vec!["a"]);
        list.set_page(2);
        list.next_page();
        assert_eq!(list.page(), 3);
        list.prev_page();
        assert_eq!(list.page(), 2);
    }

    #[test]
    fn set_page_clamps_to_valid_range() {
        let mut list = loaded_list(20, 45, vec!["a"]);
        list.set_page(99);
        assert_eq!(list.page(), 3); // ceil(45/20)
        list.set_page(0);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn sort_toggles_on_same_field_and_defaults_descending_on_new_field() {
        let mut list: RemoteList<&str> = RemoteList::new(20);

        list.toggle_sort("created_at");
        assert_eq!(
            list.sort(),
            Some(Sort {
                field: "created_at",
                direction: SortDirection::Descending
            })
        );

        list.toggle_sort("created_at");
        assert_eq!(
            list.sort().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );

        // A different field starts descending again.
        list.toggle_sort("amount");
        assert_eq!(
            list.sort(),
            Some(Sort {
                field: "amount",
                direction: SortDirection::Descending
            })
        );
    }

    #[test]
    fn success_derives_total_pages_and_display_range() {
        let mut list = loaded_list(20, 45, vec!["a"; 20]);
        assert_eq!(list.total_pages(), 3);
        assert_eq!(list.display_range(), Some((1, 20)));

        list.set_page(3);
        let (ticket, _) = list.begin_fetch();
        list.apply(ticket, Ok(page_of(45, vec!["a"; 5])));
        assert_eq!(list.display_range(), Some((41, 45)));
    }

    #[test]
    fn empty_list_has_one_page_and_no_range() {
        let list = loaded_list(20, 0, vec![]);
        assert_eq!(list.total_pages(), 1);
        assert_eq!(list.display_range(), None);
    }

    #[test]
    fn failure_clears_rows_and_stores_message() {
        let mut list = loaded_list(20, 45, vec!["a"; 20]);

        let (ticket, _) = list.begin_fetch();
        list.apply(
            ticket,
            Err(CoreError::ConnectionFailed {
                reason: "request timed out".into(),
            }),
        );

        assert!(list.rows().is_empty());
        assert_eq!(list.count(), 0);
        assert_eq!(list.total_pages(), 1);
        assert!(list.error_message().unwrap().contains("timed out"));
        assert!(matches!(
            list.phase(),
            LoadPhase::Failed {
                kind: FailureKind::Other,
                ..
            }
        ));
    }

    #[test]
    fn auth_expired_failure_routes_to_its_own_kind() {
        let mut list: RemoteList<&str> = RemoteList::new(20);
        let (ticket, _) = list.begin_fetch();
        list.apply(ticket, Err(CoreError::AuthExpired));

        assert!(matches!(
            list.phase(),
            LoadPhase::Failed {
                kind: FailureKind::AuthExpired,
                ..
            }
        ));
    }

    #[test]
    fn clearing_search_on_page_three_issues_page_one_query_without_search() {
        let mut list = loaded_list(20, 100, vec!["a"; 20]);
        list.set_search("acme");
        list.set_page(3);

        list.set_search("");
        let (_, params) = list.begin_fetch();
        let pairs = params.to_pairs();
        assert!(!pairs.iter().any(|(k, _)| k == "search"));
        assert!(!pairs.iter().any(|(k, _)| k == "page"));
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn stale_response_never_overwrites_a_newer_one() {
        let mut list: RemoteList<&str> = RemoteList::new(20);

        let (old_ticket, _) = list.begin_fetch();
        let (new_ticket, _) = list.begin_fetch();

        // Newer request resolves first.
        assert_eq!(
            list.apply(new_ticket, Ok(page_of(1, vec!["fresh"]))),
            Applied::Committed
        );
        // The earlier request resolves late and must be dropped.
        assert_eq!(
            list.apply(old_ticket, Ok(page_of(1, vec!["stale"]))),
            Applied::Stale
        );
        assert_eq!(list.rows(), &["fresh"]);
    }

    #[test]
    fn stale_error_is_also_dropped() {
        let mut list: RemoteList<&str> = RemoteList::new(20);

        let (old_ticket, _) = list.begin_fetch();
        let (new_ticket, _) = list.begin_fetch();

        list.apply(new_ticket, Ok(page_of(1, vec!["fresh"])));
        let applied = list.apply(
            old_ticket,
            Err(CoreError::ConnectionFailed {
                reason: "slow path".into(),
            }),
        );

        assert_eq!(applied, Applied::Stale);
        assert!(matches!(list.phase(), LoadPhase::Loaded));
        assert_eq!(list.rows(), &["fresh"]);
    }

    #[test]
    fn committing_past_the_end_signals_page_clamp() {
        let mut list = loaded_list(20, 100, vec!["a"; 20]);
        list.set_page(5);

        // A mutation removed enough records that page 5 no longer exists.
        let (ticket, _) = list.begin_fetch();
        let applied = list.apply(ticket, Ok(page_of(42, vec![])));
        assert_eq!(applied, Applied::CommittedPastEnd);

        list.clamp_to_last_page();
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn rows_stay_visible_while_reloading() {
        let mut list = loaded_list(20, 2, vec!["a", "b"]);
        let (_ticket, _) = list.begin_fetch();
        assert!(list.is_loading());
        assert_eq!(list.rows(), &["a", "b"]);
    }

    #[test]
    fn params_carry_sort_and_filters() {
        let mut list: RemoteList<&str> = RemoteList::new(50);
        list.set_filter("is_active", Some("true".into()));
        list.toggle_sort("amount");

        let pairs = list.params().to_pairs();
        assert!(pairs.contains(&("ordering".to_owned(), "-amount".to_owned())));
        assert!(pairs.contains(&("is_active".to_owned(), "true".to_owned())));
        assert!(pairs.contains(&("page_size".to_owned(), "50".to_owned())));
    }
}
