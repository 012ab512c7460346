//! Insertion-ordered, key-deduplicated link collection.

use std::collections::HashMap;

use crate::link::ExtractedLink;
use crate::settings::DuplicatePolicy;

/// What happened when a link was offered to a [`LinkSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// First link for its key.
    Inserted,
    /// Overwrote an earlier link with the same key (position kept).
    Replaced,
    /// Dropped because an earlier link with the same key was kept.
    Skipped,
}

/// Links keyed by dedup key, ordered by first insertion of each key.
#[derive(Debug, Clone)]
pub struct LinkSet {
    policy: DuplicatePolicy,
    links: Vec<ExtractedLink>,
    positions: HashMap<String, usize>,
}

impl LinkSet {
    /// Creates an empty set using `policy` for duplicate keys.
    #[must_use]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            links: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Offers `link` under `key`.
    pub fn insert(&mut self, key: String, link: ExtractedLink) -> InsertOutcome {
        match self.positions.get(&key) {
            None => {
                self.positions.insert(key, self.links.len());
                self.links.push(link);
                InsertOutcome::Inserted
            }
            Some(&position) => match self.policy {
                DuplicatePolicy::LastWins => {
                    self.links[position] = link;
                    InsertOutcome::Replaced
                }
                DuplicatePolicy::FirstWins => InsertOutcome::Skipped,
            },
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Consumes the set, returning links in first-insertion order.
    #[must_use]
    pub fn into_links(self) -> Vec<ExtractedLink> {
        self.links
    }
}

/// Strips query and fragment from a URL for use as a dedup key.
#[must_use]
pub fn normalize_url(url: &str) -> &str {
    url.split(['#', '?']).next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FilenameVariants, LinkMetadata};

    fn link(url: &str, title: &str) -> ExtractedLink {
        let metadata = LinkMetadata {
            names: FilenameVariants {
                with_ext: "a.pdf".into(),
                without_ext: "a".into(),
                extension: "pdf".into(),
            },
            estimated_size: None,
            size_source: None,
        };
        ExtractedLink::new(url.into(), title.into(), metadata, "https://example.com/")
    }

    #[test]
    fn test_normalize_url_strips_query_and_fragment() {
        assert_eq!(normalize_url("https://e.com/a.pdf?x=1#p"), "https://e.com/a.pdf");
        assert_eq!(normalize_url("https://e.com/a.pdf#p?x"), "https://e.com/a.pdf");
        assert_eq!(normalize_url("/a.pdf"), "/a.pdf");
    }

    #[test]
    fn test_last_wins_overwrites_in_place() {
        let mut set = LinkSet::new(DuplicatePolicy::LastWins);
        assert_eq!(set.insert("a".into(), link("/a.pdf", "first")), InsertOutcome::Inserted);
        assert_eq!(set.insert("b".into(), link("/b.pdf", "b")), InsertOutcome::Inserted);
        assert_eq!(set.insert("a".into(), link("/a.pdf", "second")), InsertOutcome::Replaced);

        let links = set.into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "second");
        assert_eq!(links[1].title, "b");
    }

    #[test]
    fn test_first_wins_keeps_original() {
        let mut set = LinkSet::new(DuplicatePolicy::FirstWins);
        set.insert("a".into(), link("/a.pdf", "first"));
        assert_eq!(set.insert("a".into(), link("/a.pdf", "second")), InsertOutcome::Skipped);

        let links = set.into_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "first");
    }
}
