use std::fmt;

use serde::{Deserialize, Serialize};

/// What the border office does with a traveller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    /// Hold the traveller for medical screening.
    Quarantine,
    /// Refuse entry.
    Reject,
    /// Send to secondary inspection.
    Secondary,
    /// Admit.
    Accept,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quarantine => "Quarantine",
            Self::Reject => "Reject",
            Self::Secondary => "Secondary",
            Self::Accept => "Accept",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of screening one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDecision {
    pub disposition: Disposition,
    /// Name of the rule that matched, if any.
    pub matched_rule: Option<String>,
    /// Human-readable reason explaining the decision.
    pub reason: String,
}

impl EntryDecision {
    /// Convenience constructor for the fall-through accept decision.
    pub fn accept_default(reason: impl Into<String>) -> Self {
        Self {
            disposition: Disposition::Accept,
            matched_rule: None,
            reason: reason.into(),
        }
    }

    /// Decision produced by a named rule.
    pub fn from_rule(
        disposition: Disposition,
        rule: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            disposition,
            matched_rule: Some(rule.into()),
            reason: reason.into(),
        }
    }
}
