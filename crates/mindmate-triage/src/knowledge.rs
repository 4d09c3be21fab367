//! Knowledge store and two-tier retrieval.
//!
//! Tier 1 (exact): entries whose question or answer contains the whole
//! lower-cased query. Store order, no cap.
//! Tier 2 (fuzzy): only when Tier 1 is empty. The query is split on
//! non-word characters, tokens of length <= 2 are dropped, and entries whose
//! question+answer contains any remaining token are returned, first 5 in
//! store order.

use mindmate_common::KnowledgeEntry;
use tracing::debug;

/// Maximum number of fuzzy-tier results.
pub const FUZZY_LIMIT: usize = 5;
/// Shortest token considered by the fuzzy tier.
pub const MIN_TOKEN_LEN: usize = 3;

/// Which tier produced a retrieval result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalTier {
    Exact,
    Fuzzy,
    None,
}

struct IndexedEntry {
    entry: KnowledgeEntry,
    question: String,
    answer: String,
    blob: String,
}

/// Immutable question/answer collection. Built once at startup and shared.
pub struct KnowledgeStore {
    entries: Vec<IndexedEntry>,
}

impl KnowledgeStore {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let question = entry.question.to_lowercase();
                let answer = entry.answer.to_lowercase();
                let blob = format!("{question} {answer}");
                IndexedEntry { entry, question, answer, blob }
            })
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    pub fn search(&self, query: &str) -> Vec<KnowledgeEntry> {
        self.search_with_tier(query).1
    }

    pub fn search_with_tier(&self, query: &str) -> (RetrievalTier, Vec<KnowledgeEntry>) {
        if query.is_empty() {
            return (RetrievalTier::None, Vec::new());
        }
        let text = query.to_lowercase();

        let exact: Vec<KnowledgeEntry> = self
            .entries
            .iter()
            .filter(|e| e.question.contains(&text) || e.answer.contains(&text))
            .map(|e| e.entry.clone())
            .collect();
        if !exact.is_empty() {
            debug!(count = exact.len(), "Knowledge exact tier hit");
            return (RetrievalTier::Exact, exact);
        }

        let tokens = tokenize(&text);
        if tokens.is_empty() {
            return (RetrievalTier::None, Vec::new());
        }
        let fuzzy: Vec<KnowledgeEntry> = self
            .entries
            .iter()
            .filter(|e| tokens.iter().any(|t| e.blob.contains(t)))
            .take(FUZZY_LIMIT)
            .map(|e| e.entry.clone())
            .collect();

        if fuzzy.is_empty() {
            (RetrievalTier::None, fuzzy)
        } else {
            debug!(count = fuzzy.len(), tokens = tokens.len(), "Knowledge fuzzy tier hit");
            (RetrievalTier::Fuzzy, fuzzy)
        }
    }
}

/// Split on anything that is not an ASCII word character and drop short tokens.
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmate_common::RecordId;

    fn store() -> KnowledgeStore {
        KnowledgeStore::new(vec![
            KnowledgeEntry::new(1, "What is a panic attack?", "A sudden surge of intense fear."),
            KnowledgeEntry::new(2, "How do I calm down?", "Slow breathing helps during panic."),
            KnowledgeEntry::new(3, "Why can't I focus?", "Poor rest affects concentration."),
        ])
    }

    fn ids(entries: &[KnowledgeEntry]) -> Vec<RecordId> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(store().search("").is_empty());
    }

    #[test]
    fn test_exact_tier_keeps_store_order() {
        let (tier, hits) = store().search_with_tier("PANIC");
        assert_eq!(tier, RetrievalTier::Exact);
        assert_eq!(ids(&hits), vec![RecordId::from(1), RecordId::from(2)]);
    }

    #[test]
    fn test_exact_tier_has_no_cap() {
        let entries = (0..12)
            .map(|i| KnowledgeEntry::new(i, format!("sleep question {i}"), "rest"))
            .collect();
        let store = KnowledgeStore::new(entries);
        assert_eq!(store.search("sleep").len(), 12);
    }

    #[test]
    fn test_fuzzy_tier_when_no_exact_match() {
        let (tier, hits) = store().search_with_tier("focus on breathing please");
        assert_eq!(tier, RetrievalTier::Fuzzy);
        assert_eq!(ids(&hits), vec![RecordId::from(2), RecordId::from(3)]);
    }

    #[test]
    fn test_fuzzy_tier_capped_at_five() {
        let entries = (0..9)
            .map(|i| KnowledgeEntry::new(i, format!("topic {i}"), "grounding exercise"))
            .collect();
        let store = KnowledgeStore::new(entries);
        let (tier, hits) = store.search_with_tier("a grounding idea?");
        assert_eq!(tier, RetrievalTier::Fuzzy);
        assert_eq!(hits.len(), FUZZY_LIMIT);
        assert_eq!(hits[0].id, RecordId::from(0));
    }

    #[test]
    fn test_short_tokens_are_ignored() {
        let (tier, hits) = store().search_with_tier("is it ok");
        assert_eq!(tier, RetrievalTier::None);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_non_word() {
        assert_eq!(tokenize("can't-sleep, at all!"), vec!["can", "sleep", "all"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let s = store();
        assert_eq!(s.search("calm breathing"), s.search("calm breathing"));
    }
}
