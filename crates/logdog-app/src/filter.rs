//! Filter/View predicate - decides which entries are visible
//!
//! Filter text is a comma-separated list of case-insensitive regular
//! expressions. `\,` is a literal comma and a `tag:` prefix matches against
//! the tag instead of the message. Tag filters are OR-ed; message filters
//! are AND-ed.

use logdog_core::{EntryId, LogEntry, Severity};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::EntryStore;

const TAG_PREFIX: &str = "tag:";

/// Persisted form of one filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub is_tag: bool,
    pub pattern: String,
}

/// A compiled filter
#[derive(Debug, Clone)]
pub struct Filter {
    pub is_tag: bool,
    pub pattern: String,
    regex: Regex,
}

impl Filter {
    pub fn new(is_tag: bool, pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self {
            is_tag,
            pattern,
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn spec(&self) -> FilterSpec {
        FilterSpec {
            is_tag: self.is_tag,
            pattern: self.pattern.clone(),
        }
    }
}

/// An ordered set of compiled filters
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Parse filter text. Invalid patterns are skipped and returned.
    pub fn parse(text: &str) -> (Self, Vec<String>) {
        let mut filters = Vec::new();
        let mut rejected = Vec::new();

        for part in split_unescaped_commas(text) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (is_tag, pattern) = match part.strip_prefix(TAG_PREFIX) {
                Some(rest) => (true, rest),
                None => (false, part),
            };
            let pattern = pattern.replace("\\,", ",");
            if pattern.is_empty() {
                continue;
            }
            match Filter::new(is_tag, pattern.as_str()) {
                Ok(filter) => filters.push(filter),
                Err(e) => {
                    warn!("Skipping invalid filter '{}': {}", part, e);
                    rejected.push(part.to_string());
                }
            }
        }

        (Self { filters }, rejected)
    }

    /// Rebuild from persisted specs, skipping any that no longer compile
    pub fn from_specs(specs: &[FilterSpec]) -> Self {
        let filters = specs
            .iter()
            .filter_map(|spec| match Filter::new(spec.is_tag, spec.pattern.as_str()) {
                Ok(filter) => Some(filter),
                Err(e) => {
                    warn!("Dropping saved filter '{}': {}", spec.pattern, e);
                    None
                }
            })
            .collect();
        Self { filters }
    }

    pub fn specs(&self) -> Vec<FilterSpec> {
        self.filters.iter().map(Filter::spec).collect()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Editable text form; parses back to the same set
    pub fn to_text(&self) -> String {
        self.filters
            .iter()
            .map(|f| {
                let pattern = f.pattern.replace(',', "\\,");
                if f.is_tag {
                    format!("{TAG_PREFIX}{pattern}")
                } else {
                    pattern
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        let mut tag_filters = self.filters.iter().filter(|f| f.is_tag).peekable();
        if tag_filters.peek().is_some() && !tag_filters.any(|f| f.is_match(&entry.tag)) {
            return false;
        }
        self.filters
            .iter()
            .filter(|f| !f.is_tag)
            .all(|f| f.is_match(&entry.message))
    }
}

/// Split on commas not preceded by a backslash. The backslash is kept.
fn split_unescaped_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == ',' {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Severity floor plus filters. Every change bumps the revision, which the
/// render cache uses to detect that a rebuild is needed.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    min_severity: Severity,
    filters: FilterSet,
    revision: u64,
}

impl ViewFilter {
    pub fn new(min_severity: Severity, filters: FilterSet) -> Self {
        Self {
            min_severity,
            filters,
            revision: 0,
        }
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_min_severity(&mut self, severity: Severity) {
        if self.min_severity != severity {
            self.min_severity = severity;
            self.revision += 1;
        }
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.revision += 1;
    }

    pub fn is_visible(&self, entry: &LogEntry) -> bool {
        entry.severity >= self.min_severity && self.filters.matches(entry)
    }
}

/// Ids of the visible entries, in store order
pub fn visible_ids(store: &EntryStore, view: &ViewFilter) -> Vec<EntryId> {
    store
        .iter()
        .filter(|(_, entry)| view.is_visible(entry))
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(severity: Severity, tag: &str, message: &str) -> LogEntry {
        LogEntry {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_filter_text() {
        let (set, rejected) = FilterSet::parse("tag:Activity, error , ,tag:net");
        assert!(rejected.is_empty());
        let specs = set.specs();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0], FilterSpec { is_tag: true, pattern: "Activity".into() });
        assert_eq!(specs[1], FilterSpec { is_tag: false, pattern: "error".into() });
        assert_eq!(specs[2], FilterSpec { is_tag: true, pattern: "net".into() });
    }

    #[test]
    fn test_escaped_comma() {
        let (set, _) = FilterSet::parse(r"a\,b, c");
        let specs = set.specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].pattern, "a,b");
        assert!(set.filters()[0].is_match("xa,by"));
        assert_eq!(set.to_text(), r"a\,b, c");
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let (set, rejected) = FilterSet::parse("ok, (unclosed");
        assert_eq!(set.filters().len(), 1);
        assert_eq!(rejected, vec!["(unclosed"]);
    }

    #[test]
    fn test_case_insensitive() {
        let (set, _) = FilterSet::parse("timeout");
        assert!(set.matches(&entry(Severity::Info, "T", "Connection TIMEOUT")));
    }

    #[test]
    fn test_tag_filters_or_message_filters_and() {
        let (set, _) = FilterSet::parse("tag:^Net$, tag:^Http$, fail, retry");

        assert!(set.matches(&entry(Severity::Info, "Net", "fail then retry")));
        assert!(set.matches(&entry(Severity::Info, "Http", "retry after fail")));
        assert!(!set.matches(&entry(Severity::Info, "Net", "fail")));
        assert!(!set.matches(&entry(Severity::Info, "Db", "fail then retry")));
    }

    #[test]
    fn test_empty_set_matches_everything() {
        let set = FilterSet::default();
        assert!(set.matches(&entry(Severity::Verbose, "", "")));
        assert_eq!(set.to_text(), "");
    }

    #[test]
    fn test_text_round_trip() {
        let (set, _) = FilterSet::parse("tag:foo, bar");
        let (again, _) = FilterSet::parse(&set.to_text());
        assert_eq!(set.specs(), again.specs());
    }

    #[test]
    fn test_from_specs_skips_invalid() {
        let specs = vec![
            FilterSpec { is_tag: false, pattern: "[".into() },
            FilterSpec { is_tag: true, pattern: "ok".into() },
        ];
        let set = FilterSet::from_specs(&specs);
        assert_eq!(set.specs(), vec![specs[1].clone()]);
    }

    #[test]
    fn test_severity_floor_hides_without_discarding() {
        let mut store = EntryStore::new(0);
        for severity in [Severity::Verbose, Severity::Debug, Severity::Info, Severity::Warn, Severity::Error] {
            store.push(entry(severity, "T", "m"));
        }
        store.push(LogEntry::unparsed("garbage"));

        let mut view = ViewFilter::default();
        view.set_min_severity(Severity::Warn);
        let ids = visible_ids(&store, &view);
        assert_eq!(ids, vec![EntryId(3), EntryId(4), EntryId(5)]);
        assert_eq!(store.len(), 6);

        view.set_min_severity(Severity::Verbose);
        assert_eq!(visible_ids(&store, &view).len(), 6);
    }

    #[test]
    fn test_visible_ids_idempotent() {
        let mut store = EntryStore::new(0);
        for i in 0..20 {
            store.push(entry(Severity::Info, if i % 2 == 0 { "A" } else { "B" }, "m"));
        }
        let (filters, _) = FilterSet::parse("tag:A");
        let view = ViewFilter::new(Severity::Verbose, filters);
        assert_eq!(visible_ids(&store, &view), visible_ids(&store, &view));
        assert_eq!(visible_ids(&store, &view).len(), 10);
    }

    #[test]
    fn test_revision_bumps_on_change() {
        let mut view = ViewFilter::default();
        let r0 = view.revision();
        view.set_min_severity(Severity::Verbose);
        assert_eq!(view.revision(), r0);
        view.set_min_severity(Severity::Error);
        assert!(view.revision() > r0);
        let r1 = view.revision();
        view.set_filters(FilterSet::default());
        assert!(view.revision() > r1);
    }
}
