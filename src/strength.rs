//! Password strength result types.

use serde::{Deserialize, Serialize};

/// Feedback shown when the password is on the common-password blocklist.
pub const BLOCKED_FEEDBACK: &str = "This is a commonly used password. Choose something unique.";

/// Feedback shown when the breach lookup reported the password.
pub const BREACHED_FEEDBACK: &str =
    "This password has appeared in a data breach. Choose a different one.";

/// Score ceiling applied to blocked or breached passwords.
pub const OVERRIDE_SCORE_CAP: u8 = 15;

/// Categorical strength level derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    /// Maps a score to its level.
    ///
    /// `< 30` weak, `[30, 55)` fair, `[55, 80)` good, `>= 80` strong.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..30 => Self::Weak,
            30..55 => Self::Fair,
            55..80 => Self::Good,
            _ => Self::Strong,
        }
    }

    /// Feedback string for this level when no override applies.
    pub fn feedback(self) -> &'static str {
        match self {
            Self::Weak => "Too weak — try making it longer and more varied.",
            Self::Fair => "Getting there — add more length or character variety.",
            Self::Good => "Good password strength.",
            Self::Strong => "Excellent password strength!",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single strength evaluation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrengthResult {
    /// 0-100 normalized score
    pub score: u8,
    pub level: StrengthLevel,
    pub feedback: String,
    /// Whether the password is on the common-password blocklist
    pub is_blocked: bool,
    /// Whether a breach was reported for it (supplied by the host)
    pub is_breached: bool,
}

impl PasswordStrengthResult {
    /// Result for the empty password: nothing to score, nothing to say.
    pub fn empty() -> Self {
        Self {
            score: 0,
            level: StrengthLevel::Weak,
            feedback: String::new(),
            is_blocked: false,
            is_breached: false,
        }
    }

    /// Builds a result, applying the blocklist/breach override.
    pub(crate) fn from_parts(score: u8, is_blocked: bool, is_breached: bool) -> Self {
        let score = if is_blocked || is_breached {
            score.min(OVERRIDE_SCORE_CAP)
        } else {
            score
        };
        let level = StrengthLevel::from_score(score);
        let feedback = if is_blocked {
            BLOCKED_FEEDBACK
        } else if is_breached {
            BREACHED_FEEDBACK
        } else {
            level.feedback()
        };

        Self {
            score,
            level,
            feedback: feedback.to_string(),
            is_blocked,
            is_breached,
        }
    }
}
