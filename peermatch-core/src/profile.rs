//! Read-only profile projections and their embedding-text rendering.
//!
//! A [`ProfileView`] is built fresh per request from the persisted profile
//! collaborator and never mutated in place; any update produces a new
//! projection. [`ProfileView::to_embedding_text`] is the deterministic
//! "profile text builder": identical input always renders identical output,
//! which keeps embeddings and keyword fallbacks reproducible.

use std::collections::BTreeSet;

use crate::topic::{Taxonomy, TopicId};

/// Sentence rendered when a profile carries no optional fields at all.
const DEFAULT_PROFILE_SENTENCE: &str = "International student looking for peer support.";

/// How a member prefers to participate in peer support.
///
/// # Examples
/// ```
/// use peermatch_core::SupportStyle;
///
/// assert_eq!(SupportStyle::Listening.as_str(), "listening");
/// assert_eq!("sharing".parse::<SupportStyle>(), Ok(SupportStyle::Sharing));
/// // Unknown values fall back to the mixed wording.
/// assert_eq!("advice".parse::<SupportStyle>().unwrap_or_default(), SupportStyle::Mixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SupportStyle {
    /// Prefers to listen and receive support.
    Listening,
    /// Prefers to share experiences with others.
    Sharing,
    /// Open to both listening and sharing.
    #[default]
    Mixed,
}

impl SupportStyle {
    /// Return the style as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Sharing => "sharing",
            Self::Mixed => "mixed",
        }
    }

    /// Fixed sentence used by the profile text builder.
    const fn sentence(self) -> &'static str {
        match self {
            Self::Listening => "I prefer to listen and receive support.",
            Self::Sharing => "I prefer to share my experiences with others.",
            Self::Mixed => "I am open to both listening and sharing.",
        }
    }
}

impl std::fmt::Display for SupportStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SupportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listening" => Ok(Self::Listening),
            "sharing" => Ok(Self::Sharing),
            "mixed" => Ok(Self::Mixed),
            _ => Err(format!("unknown support style '{s}'")),
        }
    }
}

/// Ephemeral, read-only projection of a member's profile.
///
/// `topics` is the ordered, de-duplicated union of the persisted challenge,
/// support, and private topic lists; unknown and legacy identifiers are
/// canonicalized through the [`Taxonomy`] or dropped silently.
///
/// # Examples
/// ```
/// use peermatch_core::ProfileView;
///
/// let profile = ProfileView::new("Maya")
///     .with_topic_ids(["anxiety", "academic_problems"])
///     .with_languages(["English", "Hindi"])
///     .with_graduation_year(2027);
/// assert_eq!(profile.topics.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileView {
    /// Public display name; may be empty for anonymous members.
    pub display_name: String,
    /// Whether the member identifies as an international freshman.
    pub is_international_freshman: bool,
    /// Preferred conversation language; empty when unset.
    pub preferred_language: String,
    /// Canonical support topics, insertion order preserved.
    pub topics: Vec<TopicId>,
    /// Languages the member speaks.
    pub languages: BTreeSet<String>,
    /// Cultural or regional backgrounds the member identifies with.
    pub cultural_background: BTreeSet<String>,
    /// Preferred participation style.
    pub support_style: SupportStyle,
    /// Expected four-digit graduation year, when shared.
    pub graduation_year: Option<u16>,
    /// Degree programme identifier (snake_case), when shared.
    pub degree_program: Option<String>,
    /// Free-form interests, insertion order preserved.
    pub interests: Vec<String>,
}

impl ProfileView {
    /// Construct a projection with only a display name set.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Mark the member as an international freshman.
    #[must_use]
    pub const fn international_freshman(mut self) -> Self {
        self.is_international_freshman = true;
        self
    }

    /// Set the preferred language.
    #[must_use]
    pub fn with_preferred_language(mut self, language: impl Into<String>) -> Self {
        self.preferred_language = language.into();
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

    /// Build the topic union from the three persisted topic lists
    /// (challenge, support, private), deduplicated in first-seen order.
    #[must_use]
    pub fn with_topic_lists<'a, A, B, C>(self, challenge: A, support: B, private: C) -> Self
    where
        A: IntoIterator<Item = &'a str>,
        B: IntoIterator<Item = &'a str>,
        C: IntoIterator<Item = &'a str>,
    {
        self.with_topic_ids(
            challenge
                .into_iter()
                .chain(support)
                .chain(private)
                .collect::<Vec<_>>(),
        )
    }

    /// Set the spoken languages.
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the cultural backgrounds.
    #[must_use]
    pub fn with_cultural_background<I, S>(mut self, backgrounds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cultural_background = backgrounds.into_iter().map(Into::into).collect();
        self
    }

    /// Set the support style.
    #[must_use]
    pub const fn with_support_style(mut self, style: SupportStyle) -> Self {
        self.support_style = style;
        self
    }

    /// Set the graduation year.
    #[must_use]
    pub const fn with_graduation_year(mut self, year: u16) -> Self {
        self.graduation_year = Some(year);
        self
    }

    /// Set the degree programme.
    #[must_use]
    pub fn with_degree_program(mut self, program: impl Into<String>) -> Self {
        self.degree_program = Some(program.into());
        self
    }

    /// Set the free-form interests.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// All languages the member can converse in, preferred language
    /// included.
    #[must_use]
    pub fn all_languages(&self) -> BTreeSet<String> {
        let mut languages = self.languages.clone();
        if !self.preferred_language.is_empty() {
            languages.insert(self.preferred_language.clone());
        }
        languages
    }

    /// Render the profile as a natural-language paragraph for embedding or
    /// keyword matching.
    ///
    /// Present, non-empty fields are concatenated in a fixed order: name,
    /// freshman status, topics (taxonomy labels), preferred language,
    /// support style, interests, graduation year, degree programme. A
    /// profile with no optional fields renders a fixed default sentence.
    /// Pure: identical input always produces identical output.
    #[must_use]
    pub fn to_embedding_text(&self) -> String {
        let taxonomy = Taxonomy::global();
        let mut parts: Vec<String> = Vec::new();

        if !self.display_name.is_empty() {
            parts.push(format!("My name is {}.", self.display_name));
        }
        if self.is_international_freshman {
            parts.push("I am an international freshman student.".to_owned());
        }
        if !self.topics.is_empty() {
            let labels: Vec<&str> = self.topics.iter().map(|t| taxonomy.label(t)).collect();
            parts.push(format!("My main challenges are: {}.", labels.join(", ")));
        }
        if !self.preferred_language.is_empty() {
            parts.push(format!(
                "My preferred language is {}.",
                self.preferred_language
            ));
        }
        parts.push(self.support_style.sentence().to_owned());
        if !self.interests.is_empty() {
            parts.push(format!(
                "My interests include: {}.",
                self.interests.join(", ")
            ));
        }
        if let Some(year) = self.graduation_year {
            parts.push(format!("I plan to graduate in {year}."));
        }
        if let Some(program) = self
            .degree_program
            .as_deref()
            .filter(|program| !program.is_empty())
        {
            parts.push(format!(
                "I am pursuing a {} degree.",
                title_case(program)
            ));
        }

        // The support-style sentence is always present; a projection that
        // carries nothing else renders the default sentence instead.
        if parts.len() == 1 && self == &Self::default() {
            return DEFAULT_PROFILE_SENTENCE.to_owned();
        }
        parts.join(" ")
    }
}

/// Render a snake_case identifier in title case ("computer_science" →
/// "Computer Science").
fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn maya() -> ProfileView {
        ProfileView::new("Maya")
            .international_freshman()
            .with_topic_ids(["anxiety", "academic_problems", "anxiety"])
            .with_preferred_language("English")
            .with_support_style(SupportStyle::Mixed)
            .with_interests(["hiking", "cooking"])
            .with_graduation_year(2027)
            .with_degree_program("computer_science")
    }

    #[rstest]
    fn topics_deduplicate_preserving_order(maya: ProfileView) {
        let ids: Vec<_> = maya.topics.iter().map(TopicId::as_str).collect();
        assert_eq!(ids, vec!["anxiety", "academic_problems"]);
    }

    #[rstest]
    fn topic_union_spans_all_three_lists() {
        let profile = ProfileView::new("Wei").with_topic_lists(
            ["academic_problems"],
            ["culture_shock", "academic_problems"],
            ["loneliness_isolation"],
        );
        let ids: Vec<_> = profile.topics.iter().map(TopicId::as_str).collect();
        assert_eq!(
            ids,
            vec!["academic_problems", "culture_shock", "loneliness_isolation"]
        );
    }

    #[rstest]
    fn embedding_text_is_pure(maya: ProfileView) {
        assert_eq!(maya.to_embedding_text(), maya.to_embedding_text());
    }

    #[rstest]
    fn embedding_text_renders_clauses_in_fixed_order(maya: ProfileView) {
        let text = maya.to_embedding_text();
        let name = text.find("My name is Maya").expect("name clause");
        let freshman = text.find("international freshman").expect("status clause");
        let topics = text.find("My main challenges are: Anxiety, Academic Problems")
            .expect("topics clause");
        let language = text.find("My preferred language is English").expect("language clause");
        let year = text.find("I plan to graduate in 2027").expect("year clause");
        let degree = text.find("pursuing a Computer Science degree").expect("degree clause");
        assert!(name < freshman && freshman < topics && topics < language);
        assert!(language < year && year < degree);
    }

    #[rstest]
    fn empty_profile_renders_default_sentence() {
        assert_eq!(
            ProfileView::default().to_embedding_text(),
            DEFAULT_PROFILE_SENTENCE
        );
    }

    #[rstest]
    #[case(SupportStyle::Listening, "I prefer to listen")]
    #[case(SupportStyle::Sharing, "share my experiences")]
    #[case(SupportStyle::Mixed, "both listening and sharing")]
    fn support_style_selects_fixed_sentence(#[case] style: SupportStyle, #[case] fragment: &str) {
        let text = ProfileView::new("A").with_support_style(style).to_embedding_text();
        assert!(text.contains(fragment), "missing '{fragment}' in '{text}'");
    }

    #[rstest]
    fn unknown_support_style_defaults_to_mixed() {
        let style: SupportStyle = "advice".parse().unwrap_or_default();
        assert_eq!(style, SupportStyle::Mixed);
    }

    #[rstest]
    fn all_languages_includes_preferred() {
        let profile = ProfileView::new("Ahmed")
            .with_preferred_language("Arabic")
            .with_languages(["English"]);
        assert!(profile.all_languages().contains("Arabic"));
        assert!(profile.all_languages().contains("English"));
    }

    #[rstest]
    #[case("computer_science", "Computer Science")]
    #[case("bachelors", "Bachelors")]
    #[case("", "")]
    fn title_case_renders_underscores(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }
}
