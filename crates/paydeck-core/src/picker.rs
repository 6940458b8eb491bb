// ── Selection picker ──
//
// Mini view-model behind the record-picker dialogs (aggregator, partner).
// The candidate set is bounded (one capped request, no server paging);
// filtering happens client-side across each item's display fields.

/// Items a picker can filter and display.
pub trait PickerItem {
    /// The display fields the filter matches against.
    fn haystacks(&self) -> Vec<String>;
}

/// Client-side filtered selection over a bounded candidate set.
#[derive(Debug)]
pub struct Picker<T> {
    items: Vec<T>,
    filter: String,
    selected: usize,
}

impl<T: PickerItem> Picker<T> {
    /// The server-side cap applied when fetching candidates.
    pub const CANDIDATE_LIMIT: u32 = 100;

    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            filter: String::new(),
            selected: 0,
        }
    }

    /// Replace the filter text. Selection snaps back to the first match.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.selected = 0;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Candidates matching the filter, case-insensitively, across every
    /// display field.
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.filter.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item
                        .haystacks()
                        .iter()
                        .any(|h| h.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = isize::try_from(self.selected).unwrap_or(isize::MAX);
        let max = isize::try_from(len - 1).unwrap_or(isize::MAX);
        self.selected = usize::try_from((current + delta).clamp(0, max)).unwrap_or(0);
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The currently highlighted candidate, if any match the filter.
    pub fn selected(&self) -> Option<&T> {
        self.filtered().into_iter().nth(self.selected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Candidate {
        name: &'static str,
        code: &'static str,
    }

    impl PickerItem for Candidate {
        fn haystacks(&self) -> Vec<String> {
            vec![self.name.to_owned(), self.code.to_owned()]
        }
    }

    fn picker() -> Picker<Candidate> {
        Picker::new(vec![
            Candidate { name: "NordPay", code: "NP" },
            Candidate { name: "Settle One", code: "S1" },
            Candidate { name: "Meridian Clearing", code: "MC" },
        ])
    }

    #[test]
    fn empty_filter_shows_everything() {
        assert_eq!(picker().filtered().len(), 3);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut p = picker();
        p.set_filter("MERID");
        let matches = p.filtered();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Meridian Clearing");
    }

    #[test]
    fn filter_matches_any_display_field() {
        let mut p = picker();
        p.set_filter("s1");
        assert_eq!(p.filtered()[0].name, "Settle One");
    }

    #[test]
    fn changing_the_filter_resets_selection() {
        let mut p = picker();
        p.move_selection(2);
        assert_eq!(p.selected_index(), 2);

        p.set_filter("pay");
        assert_eq!(p.selected_index(), 0);
        assert_eq!(p.selected().unwrap().name, "NordPay");
    }

    #[test]
    fn selection_clamps_to_the_filtered_set() {
        let mut p = picker();
        p.move_selection(10);
        assert_eq!(p.selected_index(), 2);
        p.move_selection(-10);
        assert_eq!(p.selected_index(), 0);
    }

    #[test]
    fn no_match_yields_no_selection() {
        let mut p = picker();
        p.set_filter("zzz");
        assert!(p.filtered().is_empty());
        assert!(p.selected().is_none());
    }
}
