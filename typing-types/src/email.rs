use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Verdict produced by the admin email classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EmailClass {
    Employee,
    Company,
    Personal,
    Typo,
    Suspicious,
    Fake,
}

impl EmailClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailClass::Employee => "employee",
            EmailClass::Company => "company",
            EmailClass::Personal => "personal",
            EmailClass::Typo => "typo",
            EmailClass::Suspicious => "suspicious",
            EmailClass::Fake => "fake",
        }
    }

    /// Parses a stored label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "employee" => Some(EmailClass::Employee),
            "company" => Some(EmailClass::Company),
            "personal" => Some(EmailClass::Personal),
            "typo" => Some(EmailClass::Typo),
            "suspicious" => Some(EmailClass::Suspicious),
            "fake" => Some(EmailClass::Fake),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmailClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
