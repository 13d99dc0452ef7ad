use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of classifying one email address.
///
/// The wire strings are the ones existing clients already understand, so they
/// are fixed independently of the variant names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Flagged,
    Active,
    CaptchaBlocked,
    Unknown,
}

impl StatusLabel {
    pub const ALL: [StatusLabel; 4] = [
        StatusLabel::Flagged,
        StatusLabel::Active,
        StatusLabel::CaptchaBlocked,
        StatusLabel::Unknown,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            StatusLabel::Flagged => "yes",
            StatusLabel::Active => "no",
            StatusLabel::CaptchaBlocked => "captcha",
            StatusLabel::Unknown => "error",
        }
    }

    /// Unrecognised strings decode as `Unknown`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "yes" => StatusLabel::Flagged,
            "no" => StatusLabel::Active,
            "captcha" => StatusLabel::CaptchaBlocked,
            _ => StatusLabel::Unknown,
        }
    }

    /// Icon plus human label, as shown to the user.
    pub fn display(self) -> &'static str {
        match self {
            StatusLabel::Flagged => "⚠️ Flagged",
            StatusLabel::Active => "✅ Active",
            StatusLabel::CaptchaBlocked => "🛡 CAPTCHA blocked",
            StatusLabel::Unknown => "❓ Unknown or Error",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for StatusLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(StatusLabel::from_wire(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for label in StatusLabel::ALL {
            assert_eq!(StatusLabel::from_wire(label.as_wire()), label);
        }
    }

    #[test]
    fn unrecognised_wire_strings_are_unknown() {
        assert_eq!(StatusLabel::from_wire("maybe"), StatusLabel::Unknown);
        assert_eq!(StatusLabel::from_wire("YES"), StatusLabel::Unknown);
        assert_eq!(StatusLabel::from_wire(""), StatusLabel::Unknown);

        let label: StatusLabel = serde_json::from_str("\"flagged\"").unwrap();
        assert_eq!(label, StatusLabel::Unknown);
    }

    #[test]
    fn non_string_labels_fail_to_decode() {
        assert!(serde_json::from_str::<StatusLabel>("42").is_err());
        assert!(serde_json::from_str::<StatusLabel>("null").is_err());
    }

    #[test]
    fn rendering_is_fixed() {
        assert_eq!(StatusLabel::Flagged.to_string(), "⚠️ Flagged");
        assert_eq!(StatusLabel::Active.to_string(), "✅ Active");
        assert_eq!(StatusLabel::CaptchaBlocked.to_string(), "🛡 CAPTCHA blocked");
        assert_eq!(StatusLabel::Unknown.to_string(), "❓ Unknown or Error");
    }
}
