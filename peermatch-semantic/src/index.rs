//! The concurrent embedding index and its recommendation queries.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use peermatch_core::{EmbeddingProvider, GroupMeta, ProfileView};

use crate::record::EmbeddingRecord;
use crate::similarity::{cosine_similarity, keyword_matches, top_matches};

/// Similarity cut-offs for each recommendation query.
///
/// Vector and keyword scores live on different scales, so each query
/// carries a pair. Defaults are the tuned production values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Minimum cosine similarity for group recommendations.
    pub group_vector: f32,
    /// Minimum keyword similarity for group recommendations.
    pub group_keyword: f32,
    /// Minimum cosine similarity for similar-user matches.
    pub user_vector: f32,
    /// Minimum keyword similarity for similar-user matches.
    pub user_keyword: f32,
    /// Minimum cosine similarity for group-audience matches.
    pub audience_vector: f32,
    /// Minimum keyword similarity for group-audience matches.
    pub audience_keyword: f32,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            group_vector: 0.2,
            group_keyword: 0.05,
            user_vector: 0.4,
            user_keyword: 0.1,
            audience_vector: 0.3,
            audience_keyword: 0.05,
        }
    }
}

/// In-memory embedding index over users and groups.
///
/// Users are keyed by id and groups by name; each entry is a whole
/// [`EmbeddingRecord`] replaced atomically on write. Every query follows
/// the same degradation chain: cosine over vector records, then keyword
/// overlap over fallback-text records, then a fixed default. Provider
/// failures are logged and folded into the fallback, never propagated.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use peermatch_core::ProfileView;
/// use peermatch_core::test_support::UnavailableEmbeddingProvider;
/// use peermatch_semantic::SemanticIndex;
///
/// let index = SemanticIndex::new(Arc::new(UnavailableEmbeddingProvider));
/// let profile = ProfileView::new("Maya").with_topic_ids(["anxiety"]);
/// // Provider is down, so the index keeps the rendered text instead.
/// assert!(!index.store_user_embedding(1, &profile));
/// ```
pub struct SemanticIndex {
    provider: Arc<dyn EmbeddingProvider>,
    users: RwLock<HashMap<u64, EmbeddingRecord>>,
    groups: RwLock<HashMap<String, EmbeddingRecord>>,
    catalogue: RwLock<Vec<String>>,
    thresholds: MatchThresholds,
}

impl SemanticIndex {
    /// Build an empty index around an embedding provider.
    #[must_use]
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            users: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            catalogue: RwLock::new(Vec::new()),
            thresholds: MatchThresholds::default(),
        }
    }

    /// Replace the similarity thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The active similarity thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Embed `profile` and store the record for `user_id`, overwriting any
    /// previous record. Returns whether a vector was obtained; on provider
    /// failure the rendered profile text is kept for keyword matching.
    pub fn store_user_embedding(&self, user_id: u64, profile: &ProfileView) -> bool {
        let text = profile.to_embedding_text();
        let record = self.embed_or_fallback(&text);
        let obtained_vector = record.is_vector();
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, record);
        obtained_vector
    }

    /// Ensure a record exists for the group `name`, embedding the name
    /// itself when the group is new. Idempotent: an existing record is
    /// never replaced. Returns whether the stored record is a vector.
    pub fn store_group_embedding(&self, name: &str) -> bool {
        {
            let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = groups.get(name) {
                return existing.is_vector();
            }
        }
        // Racing creators may both call the provider; the map converges on
        // whichever record lands first.
        let record = self.embed_or_fallback(name);
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        groups
            .entry(name.to_owned())
            .or_insert(record)
            .is_vector()
    }

    /// Seed records for a catalogue of groups, typically the preset
    /// catalogue at startup. Each group goes through
    /// [`SemanticIndex::store_group_embedding`], so the provider input is
    /// the group name and existing records are kept; catalogue order is
    /// remembered for the default-listing fallback. Provider failures are
    /// non-fatal.
    pub fn init_group_embeddings(&self, groups: &[GroupMeta]) {
        for group in groups {
            if !self.store_group_embedding(&group.name) {
                log::warn!(
                    "group '{}' seeded with fallback text; embedding provider unavailable",
                    group.name
                );
            }
            let mut catalogue = self
                .catalogue
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if !catalogue.contains(&group.name) {
                catalogue.push(group.name.clone());
            }
        }
    }

    /// Recommend up to `top_n` groups for `user_id`, best first.
    ///
    /// Vector queries rank vector group records by cosine similarity;
    /// fallback-text queries rank fallback-text records by keyword
    /// similarity. A missing record or an empty result degrades to the
    /// first `top_n` catalogue groups in seeded order, scored `0.0`.
    #[must_use]
    pub fn recommend_groups(&self, user_id: u64, top_n: usize) -> Vec<(String, f32)> {
        let Some(record) = self.user_record(user_id) else {
            return self.default_listing(top_n);
        };
        let matches = match record {
            EmbeddingRecord::Vector(query) => self.vector_group_matches(&query, top_n),
            EmbeddingRecord::FallbackText(query) => self.keyword_group_matches(&query, top_n),
        };
        if matches.is_empty() {
            return self.default_listing(top_n);
        }
        matches
    }

    /// Find up to `top_n` users similar to `user_id`, best first, never
    /// including `user_id` itself. A missing record or an empty result
    /// yields an empty list; there is no default peer.
    #[must_use]
    pub fn similar_users(&self, user_id: u64, top_n: usize) -> Vec<(u64, f32)> {
        let Some(record) = self.user_record(user_id) else {
            return Vec::new();
        };
        match record {
            EmbeddingRecord::Vector(query) => self.vector_user_matches(
                &query,
                Some(user_id),
                top_n,
                self.thresholds.user_vector,
            ),
            EmbeddingRecord::FallbackText(query) => self.keyword_user_matches(
                &query,
                Some(user_id),
                top_n,
                self.thresholds.user_keyword,
            ),
        }
    }

    /// Find up to `top_n` users whose profiles fit the group `name`,
    /// creating the group's record on first use.
    ///
    /// A vector group record is ranked against vector user records; when
    /// no user holds a vector at all, the group name is keyword-matched
    /// against the fallback texts instead.
    #[must_use]
    pub fn users_for_group(&self, name: &str, top_n: usize) -> Vec<(u64, f32)> {
        self.store_group_embedding(name);
        let record = {
            let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
            groups.get(name).cloned()
        };
        match record {
            Some(EmbeddingRecord::Vector(query)) => {
                let matches =
                    self.vector_user_matches(&query, None, top_n, self.thresholds.audience_vector);
                if matches.is_empty() && !self.holds_vector_users() {
                    // Group record stored while the provider was up,
                    // profiles stored while it was down.
                    return self.keyword_user_matches(
                        name,
                        None,
                        top_n,
                        self.thresholds.audience_keyword,
                    );
                }
                matches
            }
            Some(EmbeddingRecord::FallbackText(query)) => {
                self.keyword_user_matches(&query, None, top_n, self.thresholds.audience_keyword)
            }
            None => Vec::new(),
        }
    }

    fn embed_or_fallback(&self, text: &str) -> EmbeddingRecord {
        match self.provider.embed(text) {
            Ok(vector) if !vector.is_empty() => EmbeddingRecord::Vector(vector),
            Ok(_) => {
                log::warn!("embedding provider returned an empty vector; keeping text");
                EmbeddingRecord::FallbackText(text.to_owned())
            }
            Err(err) => {
                log::debug!("embedding provider unavailable ({err}); keeping text");
                EmbeddingRecord::FallbackText(text.to_owned())
            }
        }
    }

    fn holds_vector_users(&self) -> bool {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.values().any(EmbeddingRecord::is_vector)
    }

    fn user_record(&self, user_id: u64) -> Option<EmbeddingRecord> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(&user_id).cloned()
    }

    fn vector_group_matches(&self, query: &[f32], top_n: usize) -> Vec<(String, f32)> {
        let scored: Vec<(String, f32)> = {
            let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
            groups
                .iter()
                .filter_map(|(name, record)| {
                    record
                        .as_vector()
                        .map(|vector| (name.clone(), cosine_similarity(query, vector)))
                })
                .collect()
        };
        top_matches(scored, top_n, self.thresholds.group_vector)
    }

    fn keyword_group_matches(&self, query: &str, top_n: usize) -> Vec<(String, f32)> {
        let candidates: Vec<(String, String)> = {
            let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
            groups
                .iter()
                .filter_map(|(name, record)| {
                    record.as_text().map(|text| (name.clone(), text.to_owned()))
                })
                .collect()
        };
        keyword_matches(query, candidates, top_n, self.thresholds.group_keyword)
    }

    fn vector_user_matches(
        &self,
        query: &[f32],
        exclude: Option<u64>,
        top_n: usize,
        threshold: f32,
    ) -> Vec<(u64, f32)> {
        let scored: Vec<(u64, f32)> = {
            let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
            users
                .iter()
                .filter(|(id, _)| Some(**id) != exclude)
                .filter_map(|(id, record)| {
                    record
                        .as_vector()
                        .map(|vector| (*id, cosine_similarity(query, vector)))
                })
                .collect()
        };
        top_matches(scored, top_n, threshold)
    }

    fn keyword_user_matches(
        &self,
        query: &str,
        exclude: Option<u64>,
        top_n: usize,
        threshold: f32,
    ) -> Vec<(u64, f32)> {
        let candidates: Vec<(u64, String)> = {
            let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
            users
                .iter()
                .filter(|(id, _)| Some(**id) != exclude)
                .filter_map(|(id, record)| record.as_text().map(|text| (*id, text.to_owned())))
                .collect()
        };
        keyword_matches(query, candidates, top_n, threshold)
    }

    fn default_listing(&self, top_n: usize) -> Vec<(String, f32)> {
        let seeded: Vec<String> = {
            let catalogue = self.catalogue.read().unwrap_or_else(PoisonError::into_inner);
            catalogue.iter().take(top_n).cloned().collect()
        };
        let names = if seeded.is_empty() {
            GroupMeta::preset_catalogue()
                .iter()
                .take(top_n)
                .map(|group| group.name.clone())
                .collect()
        } else {
            seeded
        };
        names.into_iter().map(|name| (name, 0.0)).collect()
    }
}

impl std::fmt::Debug for SemanticIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticIndex")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_core::test_support::{
        FixedEmbeddingProvider, KeyedEmbeddingProvider, UnavailableEmbeddingProvider,
        sample_profile,
    };
    use rstest::rstest;

    fn index_with(provider: impl EmbeddingProvider + 'static) -> SemanticIndex {
        SemanticIndex::new(Arc::new(provider))
    }

    #[rstest]
    fn store_user_embedding_overwrites_previous_record() {
        let index = index_with(FixedEmbeddingProvider::new(vec![1.0, 0.0]));
        assert!(index.store_user_embedding(1, &sample_profile()));
        assert!(index.store_user_embedding(1, &sample_profile()));
        assert_eq!(index.similar_users(1, 5), Vec::new());
    }

    #[rstest]
    fn store_user_embedding_keeps_text_when_provider_is_down() {
        let index = index_with(UnavailableEmbeddingProvider);
        assert!(!index.store_user_embedding(1, &sample_profile()));
    }

    #[rstest]
    fn store_group_embedding_is_idempotent() {
        let provider = KeyedEmbeddingProvider::default()
            .with_vector("Night Owls", vec![1.0, 0.0]);
        let index = index_with(provider);
        assert!(index.store_group_embedding("Night Owls"));
        assert!(index.store_group_embedding("Night Owls"));
    }

    #[rstest]
    fn similar_users_excludes_self() {
        let index = index_with(FixedEmbeddingProvider::new(vec![1.0, 0.0]));
        index.store_user_embedding(1, &sample_profile());
        index.store_user_embedding(2, &sample_profile());
        let matches = index.similar_users(1, 10);
        assert!(matches.iter().all(|(id, _)| *id != 1));
        assert_eq!(matches.len(), 1);
    }

    #[rstest]
    fn unknown_user_gets_default_group_listing() {
        let index = index_with(UnavailableEmbeddingProvider);
        let listing = index.recommend_groups(404, 3);
        assert!(!listing.is_empty());
        assert!(listing.len() <= 3);
        assert!(listing.iter().all(|(_, score)| *score == 0.0));
    }

    #[rstest]
    fn unknown_user_gets_no_similar_users() {
        let index = index_with(UnavailableEmbeddingProvider);
        assert!(index.similar_users(404, 5).is_empty());
    }

    #[rstest]
    fn init_group_embeddings_records_catalogue_order() {
        let index = index_with(UnavailableEmbeddingProvider);
        let groups = GroupMeta::preset_catalogue();
        index.init_group_embeddings(groups);
        let listing = index.recommend_groups(404, 2);
        let names: Vec<_> = listing.iter().map(|(name, _)| name.as_str()).collect();
        let expected: Vec<_> = groups.iter().take(2).map(|g| g.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    fn init_group_embeddings_sends_only_the_group_name() {
        let provider = Arc::new(
            KeyedEmbeddingProvider::default().with_vector("Anxiety Circle", vec![1.0, 0.0]),
        );
        let index = SemanticIndex::new(Arc::clone(&provider) as Arc<dyn EmbeddingProvider>);
        let group = GroupMeta::new("Anxiety Circle")
            .expect("non-empty name")
            .with_description("Peer listening circle for anxiety challenges");
        index.init_group_embeddings(&[group]);
        assert_eq!(provider.calls(), vec!["Anxiety Circle".to_owned()]);
    }

    #[rstest]
    fn users_for_group_keyword_matches_when_no_user_vectors_exist() {
        let provider =
            KeyedEmbeddingProvider::default().with_vector("Quiet Corner", vec![1.0, 0.0]);
        let index = index_with(provider);
        let sam = ProfileView::new("Sam").with_interests(["quiet corner chats"]);
        index.store_user_embedding(7, &sam);
        let audience = index.users_for_group("Quiet Corner", 5);
        assert_eq!(audience.first().map(|(id, _)| *id), Some(7));
    }

    #[rstest]
    fn users_for_group_does_not_fall_through_past_vector_users() {
        let provider = KeyedEmbeddingProvider::default()
            .with_vector("Quiet Corner", vec![1.0, 0.0])
            .with_vector(sample_profile().to_embedding_text(), vec![0.0, 1.0]);
        let index = index_with(provider);
        index.store_user_embedding(7, &sample_profile());
        assert!(index.users_for_group("Quiet Corner", 5).is_empty());
    }

    #[rstest]
    fn users_for_group_lazily_creates_the_group_record() {
        let provider = KeyedEmbeddingProvider::default()
            .with_vector("Quiet Corner", vec![1.0, 0.0])
            .with_vector(sample_profile().to_embedding_text(), vec![1.0, 0.1]);
        let index = index_with(provider);
        index.store_user_embedding(7, &sample_profile());
        let audience = index.users_for_group("Quiet Corner", 5);
        assert_eq!(audience.first().map(|(id, _)| *id), Some(7));
    }
}
