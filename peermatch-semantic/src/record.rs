//! Stored embedding records.

/// What the index holds for one user or group.
///
/// A `Vector` is stored when the embedding provider succeeded; otherwise
/// the rendered profile or group text is kept as `FallbackText` so keyword
/// matching can stand in. The two variants are never compared against each
/// other.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingRecord {
    /// Dense embedding returned by the provider.
    Vector(Vec<f32>),
    /// Rendered source text kept for keyword matching.
    FallbackText(String),
}

impl EmbeddingRecord {
    /// Whether this record carries a vector.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// The vector, when present.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[f32]> {
        match self {
            Self::Vector(vector) => Some(vector),
            Self::FallbackText(_) => None,
        }
    }

    /// The fallback text, when present.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Vector(_) => None,
            Self::FallbackText(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_accessors_are_exclusive() {
        let vector = EmbeddingRecord::Vector(vec![1.0, 0.0]);
        assert!(vector.is_vector());
        assert!(vector.as_vector().is_some());
        assert!(vector.as_text().is_none());

        let text = EmbeddingRecord::FallbackText("anxious about exams".into());
        assert!(!text.is_vector());
        assert!(text.as_vector().is_none());
        assert_eq!(text.as_text(), Some("anxious about exams"));
    }
}
