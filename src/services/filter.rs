//! Title search over link records.
//!
//! Matching is a case-insensitive substring test against the title only.
//! The result is the filtered view: the subsequence that every position-based
//! action (edit row N, delete row N) is resolved against.

use crate::models::LinkRecord;

/// A normalized search term.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Creates a query from raw user input.
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    /// Returns `true` if the query matches everything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns `true` if `record`'s title contains the term, ignoring case.
    #[must_use]
    pub fn matches(&self, record: &LinkRecord) -> bool {
        self.is_empty() || record.title.to_lowercase().contains(&self.needle)
    }
}

/// Returns the records whose title contains `term`, in their existing order.
///
/// An empty term returns every record.
pub fn filter<'a, I>(records: I, term: &str) -> Vec<&'a LinkRecord>
where
    I: IntoIterator<Item = &'a LinkRecord>,
{
    let query = SearchQuery::new(term);
    records.into_iter().filter(|r| query.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkId, LinkInput};
    use test_case::test_case;

    fn records() -> Vec<LinkRecord> {
        vec![
            LinkRecord::from_input(LinkId::new("1"), LinkInput::new("Graphs", "http://g")),
            LinkRecord::from_input(
                LinkId::new("2"),
                LinkInput::new("DP", "http://graph-dp").with_starred(true),
            ),
            LinkRecord::from_input(LinkId::new("3"), LinkInput::new("Graph Theory", "http://t")),
        ]
    }

    fn titles(view: &[&LinkRecord]) -> Vec<String> {
        view.iter().map(|r| r.title.clone()).collect()
    }

    #[test_case("gr", &["Graphs", "Graph Theory"] ; "prefix")]
    #[test_case("GRAPH", &["Graphs", "Graph Theory"] ; "upper case term")]
    #[test_case("theory", &["Graph Theory"] ; "inner word")]
    #[test_case("dp", &["DP"] ; "short title")]
    #[test_case("zzz", &[] ; "no match")]
    fn test_filter(term: &str, expected: &[&str]) {
        let all = records();
        assert_eq!(titles(&filter(&all, term)), expected);
    }

    #[test]
    fn test_url_is_not_searched() {
        let all = records();
        let view = filter(&all, "graph-dp");
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_term_returns_all_in_order() {
        let all = records();
        let view = filter(&all, "");
        assert_eq!(view.len(), 3);
        assert!(view.iter().zip(&all).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = records();
        let once = filter(&all, "gr");
        let twice = filter(once.iter().copied(), "gr");
        assert_eq!(once, twice);
    }
}
