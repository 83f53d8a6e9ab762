//! Topic taxonomy: canonical support-topic identifiers with display labels
//! and categories.
//!
//! The canonical catalogue is a versioned data table embedded at build time;
//! legacy identifiers map many-to-one onto canonical ids through the alias
//! table. Unknown identifiers canonicalize to `None` and are dropped
//! silently by callers, never surfaced as errors.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

/// Embedded taxonomy table. Validated by the unit tests below.
const EMBEDDED_TAXONOMY: &str = include_str!("../data/topics.json");

static GLOBAL: OnceLock<Taxonomy> = OnceLock::new();

/// Canonical identifier for a support topic.
///
/// Values are only minted by [`Taxonomy::canonicalize`], so holding a
/// `TopicId` implies membership in the canonical catalogue.
///
/// # Examples
/// ```
/// use peermatch_core::Taxonomy;
///
/// let taxonomy = Taxonomy::global();
/// let topic = taxonomy.canonicalize("Academic Pressure").expect("known alias");
/// assert_eq!(topic.as_str(), "academic_problems");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicId(String);

impl TopicId {
    /// Return the canonical id as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TopicEntry {
    id: String,
    label: String,
    category: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyTable {
    version: u32,
    topics: Vec<TopicEntry>,
}

/// Fixed, versioned catalogue of canonical support topics.
///
/// # Examples
/// ```
/// use peermatch_core::Taxonomy;
///
/// let taxonomy = Taxonomy::global();
/// let anxiety = taxonomy.canonicalize("anxiety").expect("canonical id");
/// assert_eq!(taxonomy.label(&anxiety), "Anxiety");
/// assert!(taxonomy.canonicalize("definitely_not_a_topic").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Taxonomy {
    version: u32,
    entries: Vec<TopicEntry>,
    by_id: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl Taxonomy {
    /// Access the process-wide taxonomy loaded from the embedded table.
    ///
    /// A malformed embedded table degrades to an empty taxonomy (logged);
    /// every lookup then canonicalizes to `None`, which downstream scoring
    /// treats as "no topics" rather than an error.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| match Self::from_json(EMBEDDED_TAXONOMY) {
            Ok(taxonomy) => taxonomy,
            Err(err) => {
                log::error!("embedded topic taxonomy failed to parse: {err}");
                Self::default()
            }
        })
    }

    /// Parse a taxonomy from its JSON table representation.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error when the table is
    /// malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: TaxonomyTable = serde_json::from_str(json)?;
        let mut by_id = HashMap::new();
        let mut by_alias = HashMap::new();
        for (index, entry) in table.topics.iter().enumerate() {
            by_id.insert(entry.id.clone(), index);
            for alias in &entry.aliases {
                by_alias.insert(alias.clone(), index);
            }
        }
        Ok(Self {
            version: table.version,
            entries: table.topics,
            by_id,
            by_alias,
        })
    }

    /// Version number of the loaded table.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Number of canonical topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a raw or legacy identifier to its canonical [`TopicId`].
    ///
    /// Input is trimmed, lowercased, and space-normalised before lookup so
    /// that legacy display strings ("Academic Pressure") resolve alongside
    /// snake_case ids.
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> Option<TopicId> {
        let key = normalise(raw);
        let index = self
            .by_id
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .copied()?;
        self.entries.get(index).map(|entry| TopicId(entry.id.clone()))
    }

    /// Canonicalize an ordered sequence of raw identifiers, dropping
    /// unknowns and duplicates while preserving first-seen order.
    pub fn canonicalize_all<'a, I>(&self, raw: I) -> Vec<TopicId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = Vec::new();
        for item in raw {
            if let Some(topic) = self.canonicalize(item) {
                if !seen.contains(&topic) {
                    seen.push(topic);
                }
            }
        }
        seen
    }

    /// Display label for a canonical topic.
    ///
    /// Falls back to the raw id for topics minted against another table
    /// instance; every id in this table has exactly one label.
    #[must_use]
    pub fn label<'a>(&'a self, topic: &'a TopicId) -> &'a str {
        self.by_id
            .get(topic.as_str())
            .and_then(|&index| self.entries.get(index))
            .map_or(topic.as_str(), |entry| entry.label.as_str())
    }

    /// Category for a canonical topic, with the same fallback as
    /// [`Taxonomy::label`].
    #[must_use]
    pub fn category<'a>(&'a self, topic: &'a TopicId) -> &'a str {
        self.by_id
            .get(topic.as_str())
            .and_then(|&index| self.entries.get(index))
            .map_or(topic.as_str(), |entry| entry.category.as_str())
    }

    /// Iterate over all canonical topic ids in table order.
    pub fn canonical_ids(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.entries.iter().map(|entry| TopicId(entry.id.clone()))
    }
}

fn normalise(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['&', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn embedded_table_parses() {
        let taxonomy = Taxonomy::global();
        assert!(!taxonomy.is_empty());
        assert!(taxonomy.version() >= 1);
    }

    #[test]
    fn every_canonical_id_has_one_label_and_category() {
        let taxonomy = Taxonomy::global();
        let mut ids = HashSet::new();
        for topic in taxonomy.canonical_ids() {
            assert!(ids.insert(topic.clone()), "duplicate id {topic}");
            assert!(!taxonomy.label(&topic).is_empty());
            assert!(!taxonomy.category(&topic).is_empty());
        }
    }

    #[rstest]
    #[case("anxiety", "anxiety")]
    #[case("stress", "anxiety")]
    #[case("Academic Pressure", "academic_problems")]
    #[case("Homesickness and Family", "homesickness")]
    #[case("  Making Friends  ", "loneliness_isolation")]
    #[case("Health & Wellness", "health_wellness")]
    fn aliases_resolve_to_canonical_ids(#[case] raw: &str, #[case] expected: &str) {
        let topic = Taxonomy::global().canonicalize(raw).expect("known id");
        assert_eq!(topic.as_str(), expected);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        assert!(Taxonomy::global().canonicalize("underwater_basket_weaving").is_none());
    }

    #[test]
    fn canonicalize_all_dedupes_preserving_order() {
        let topics = Taxonomy::global().canonicalize_all([
            "test_anxiety",
            "nonsense",
            "academic_problems",
            "exam_stress",
        ]);
        let ids: Vec<_> = topics.iter().map(TopicId::as_str).collect();
        assert_eq!(ids, vec!["test_anxiety", "academic_problems"]);
    }

    #[test]
    fn malformed_table_is_an_error() {
        assert!(Taxonomy::from_json("not json").is_err());
    }
}
