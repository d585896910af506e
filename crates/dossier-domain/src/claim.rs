//! Claims - atomic factual statements scored against evidence

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum number of claims extracted per draft answer.
pub const MAX_CLAIMS: usize = 6;

/// Maximum number of evidence citations attached to a claim.
pub const MAX_CITATIONS: usize = 3;

/// Unique identifier for a claim, based on UUIDv7.
///
/// UUIDv7 provides chronological sortability and coordination-free
/// generation, which is all the pipeline needs from an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a ClaimId from its string form.
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("invalid claim id: {}", e))
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for ClaimId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClaimId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClaimId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Verdict on how well the evidence supports a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLabel {
    /// Strong lexical support in at least one source.
    Supported,
    /// Partial support; flag rather than assert.
    Weak,
    /// No meaningful support found.
    Unsupported,
}

impl SupportLabel {
    /// Map a score in `[0, 1]` to a label.
    ///
    /// Lower bounds are inclusive: `0.75` is supported and `0.45` is weak.
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::SupportLabel;
    ///
    /// assert_eq!(SupportLabel::from_score(0.75), SupportLabel::Supported);
    /// assert_eq!(SupportLabel::from_score(0.45), SupportLabel::Weak);
    /// assert_eq!(SupportLabel::from_score(0.449), SupportLabel::Unsupported);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            SupportLabel::Supported
        } else if score >= 0.45 {
            SupportLabel::Weak
        } else {
            SupportLabel::Unsupported
        }
    }

    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLabel::Supported => "supported",
            SupportLabel::Weak => "weak",
            SupportLabel::Unsupported => "unsupported",
        }
    }
}

/// A piece of evidence cited in support of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// URL of the contributing source.
    pub source_url: String,
    /// Best-matching snippet from that source.
    pub snippet: String,
}

/// An extracted claim together with its verification verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedClaim {
    /// Unique identifier.
    pub id: ClaimId,
    /// The claim text as extracted from the draft answer.
    pub text: String,
    /// Support verdict derived from `score`.
    pub label: SupportLabel,
    /// Best overlap score across all sources, in `[0, 1]`.
    pub score: f64,
    /// Up to [`MAX_CITATIONS`] supporting citations, best first.
    pub evidence: Vec<Citation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SupportLabel::from_score(1.0), SupportLabel::Supported);
        assert_eq!(SupportLabel::from_score(0.75), SupportLabel::Supported);
        assert_eq!(SupportLabel::from_score(0.7499), SupportLabel::Weak);
        assert_eq!(SupportLabel::from_score(0.45), SupportLabel::Weak);
        assert_eq!(SupportLabel::from_score(0.449), SupportLabel::Unsupported);
        assert_eq!(SupportLabel::from_score(0.0), SupportLabel::Unsupported);
    }

    #[test]
    fn test_claim_id_round_trip() {
        let id = ClaimId::new();
        let parsed = ClaimId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_claim_id_serde_as_string() {
        let id = ClaimId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_verified_claim_serde() {
        let claim = VerifiedClaim {
            id: ClaimId::new(),
            text: "Chlorophyll absorbs light".to_string(),
            label: SupportLabel::Weak,
            score: 0.5,
            evidence: vec![Citation {
                source_url: "https://example.com".to_string(),
                snippet: "chlorophyll absorbs light energy".to_string(),
            }],
        };
        let json = serde_json::to_string(&claim).unwrap();
        let back: VerifiedClaim = serde_json::from_str(&json).unwrap();
        assert_eq!(claim, back);
    }
}
