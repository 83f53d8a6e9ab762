//! Profile persistence behind a trait seam.
//!
//! Matching and scoring only ever see [`ProfileView`] projections; where
//! those projections come from is an implementation detail behind
//! [`ProfileStore`]. An optional SQLite-backed store (feature
//! `store-sqlite`) persists profiles in a single `profiles` table with
//! comma-joined list columns.

use crate::profile::ProfileView;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteProfileStore, SqliteProfileStoreError};

/// Error raised by a profile store backend.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    /// The backend failed to read or write a profile.
    #[error("profile store backend failed: {message}")]
    Backend {
        /// Human-readable backend failure.
        message: String,
    },
}

impl ProfileStoreError {
    /// Wrap a backend failure message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Keyed access to persisted profile projections.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use std::sync::Mutex;
/// use peermatch_core::{ProfileStore, ProfileStoreError, ProfileView};
///
/// #[derive(Default)]
/// struct MemoryStore {
///     profiles: Mutex<HashMap<u64, ProfileView>>,
/// }
///
/// impl ProfileStore for MemoryStore {
///     fn get(&self, user_id: u64) -> Result<Option<ProfileView>, ProfileStoreError> {
///         let profiles = self
///             .profiles
///             .lock()
///             .map_err(|_| ProfileStoreError::backend("poisoned lock"))?;
///         Ok(profiles.get(&user_id).cloned())
///     }
///
///     fn put(&self, user_id: u64, profile: &ProfileView) -> Result<(), ProfileStoreError> {
///         let mut profiles = self
///             .profiles
///             .lock()
///             .map_err(|_| ProfileStoreError::backend("poisoned lock"))?;
///         profiles.insert(user_id, profile.clone());
///         Ok(())
///     }
/// }
///
/// let store = MemoryStore::default();
/// store.put(1, &ProfileView::new("Maya")).expect("store profile");
/// assert!(store.get(1).expect("fetch profile").is_some());
/// ```
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `user_id`, or `None` when absent.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError`] when the backend fails.
    fn get(&self, user_id: u64) -> Result<Option<ProfileView>, ProfileStoreError>;

    /// Persist the profile for `user_id`, replacing any existing row.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError`] when the backend fails.
    fn put(&self, user_id: u64, profile: &ProfileView) -> Result<(), ProfileStoreError>;
}

#[cfg(feature = "store-sqlite")]
mod sqlite {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use rusqlite::{Connection, OptionalExtension, params};

    use super::{ProfileStore, ProfileStoreError};
    use crate::profile::{ProfileView, SupportStyle};

    /// Error raised when opening the SQLite profile store.
    #[derive(Debug, thiserror::Error)]
    pub enum SqliteProfileStoreError {
        /// Opening the SQLite database failed.
        #[error("failed to open SQLite database at {path}: {source}")]
        OpenDatabase {
            /// Location of the SQLite database on disk.
            path: PathBuf,
            /// Source error returned by `rusqlite`.
            #[source]
            source: rusqlite::Error,
        },
        /// Creating the `profiles` table failed.
        #[error("failed to initialise the profiles schema: {source}")]
        Schema {
            /// Source error returned by `rusqlite`.
            #[source]
            source: rusqlite::Error,
        },
    }

    /// Profile store backed by a single SQLite `profiles` table.
    ///
    /// List-valued fields (topics, languages, cultural background,
    /// interests) are stored as comma-joined text columns.
    #[derive(Debug, Clone)]
    pub struct SqliteProfileStore {
        connection: Arc<Mutex<Connection>>,
    }

    impl SqliteProfileStore {
        /// Open (and initialise, when new) a store at `path`.
        ///
        /// # Errors
        /// Returns [`SqliteProfileStoreError`] when the database cannot be
        /// opened or the schema cannot be created.
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteProfileStoreError> {
            let path = path.as_ref().to_path_buf();
            let connection = Connection::open(&path).map_err(|source| {
                SqliteProfileStoreError::OpenDatabase {
                    path: path.clone(),
                    source,
                }
            })?;
            connection
                .execute(
                    "CREATE TABLE IF NOT EXISTS profiles (
                        user_id INTEGER PRIMARY KEY,
                        display_name TEXT NOT NULL,
                        is_international_freshman INTEGER NOT NULL,
                        preferred_language TEXT NOT NULL,
                        topics TEXT NOT NULL,
                        languages TEXT NOT NULL,
                        cultural_background TEXT NOT NULL,
                        support_style TEXT NOT NULL,
                        graduation_year INTEGER,
                        degree_program TEXT,
                        interests TEXT NOT NULL
                    )",
                    [],
                )
                .map_err(|source| SqliteProfileStoreError::Schema { source })?;
            Ok(Self {
                connection: Arc::new(Mutex::new(connection)),
            })
        }

        fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ProfileStoreError> {
            self.connection
                .lock()
                .map_err(|_| ProfileStoreError::backend("profile store mutex poisoned"))
        }
    }

    impl ProfileStore for SqliteProfileStore {
        fn get(&self, user_id: u64) -> Result<Option<ProfileView>, ProfileStoreError> {
            let connection = self.lock()?;
            let row = connection
                .query_row(
                    "SELECT display_name, is_international_freshman, preferred_language,
                            topics, languages, cultural_background, support_style,
                            graduation_year, degree_program, interests
                     FROM profiles WHERE user_id = ?1",
                    params![user_id],
                    |row| {
                        Ok(StoredProfile {
                            display_name: row.get(0)?,
                            is_international_freshman: row.get(1)?,
                            preferred_language: row.get(2)?,
                            topics: row.get(3)?,
                            languages: row.get(4)?,
                            cultural_background: row.get(5)?,
                            support_style: row.get(6)?,
                            graduation_year: row.get(7)?,
                            degree_program: row.get(8)?,
                            interests: row.get(9)?,
                        })
                    },
                )
                .optional()
                .map_err(|source| ProfileStoreError::backend(source.to_string()))?;
            Ok(row.map(StoredProfile::into_view))
        }

        fn put(&self, user_id: u64, profile: &ProfileView) -> Result<(), ProfileStoreError> {
            let connection = self.lock()?;
            connection
                .execute(
                    "INSERT OR REPLACE INTO profiles (
                        user_id, display_name, is_international_freshman,
                        preferred_language, topics, languages, cultural_background,
                        support_style, graduation_year, degree_program, interests
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        user_id,
                        profile.display_name,
                        profile.is_international_freshman,
                        profile.preferred_language,
                        join_list(profile.topics.iter().map(|t| t.as_str())),
                        join_list(profile.languages.iter().map(String::as_str)),
                        join_list(profile.cultural_background.iter().map(String::as_str)),
                        profile.support_style.as_str(),
                        profile.graduation_year,
                        profile.degree_program,
                        join_list(profile.interests.iter().map(String::as_str)),
                    ],
                )
                .map_err(|source| ProfileStoreError::backend(source.to_string()))?;
            Ok(())
        }
    }

    struct StoredProfile {
        display_name: String,
        is_international_freshman: bool,
        preferred_language: String,
        topics: String,
        languages: String,
        cultural_background: String,
        support_style: String,
        graduation_year: Option<u16>,
        degree_program: Option<String>,
        interests: String,
    }

    impl StoredProfile {
        fn into_view(self) -> ProfileView {
            let style: SupportStyle = self.support_style.parse().unwrap_or_default();
            let mut view = ProfileView::new(self.display_name)
                .with_preferred_language(self.preferred_language)
                .with_topic_ids(split_list(&self.topics))
                .with_languages(split_list(&self.languages))
                .with_cultural_background(split_list(&self.cultural_background))
                .with_support_style(style)
                .with_interests(split_list(&self.interests));
            view.is_international_freshman = self.is_international_freshman;
            view.graduation_year = self.graduation_year;
            view.degree_program = self.degree_program.filter(|p| !p.is_empty());
            view
        }
    }

    fn join_list<'a, I: Iterator<Item = &'a str>>(items: I) -> String {
        items.collect::<Vec<_>>().join(",")
    }

    fn split_list(column: &str) -> Vec<&str> {
        column
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }
}
