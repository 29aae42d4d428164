//! Per-user application profile.
//!
//! Distinct from identity data: the profile holds the app's own
//! preferences and lives in the `user_profiles` table, keyed by the
//! provider's user id.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Personality classification before the user has taken the assessment.
pub const DEFAULT_PERSONALITY_TYPE: &str = "NONE";

/// Advisor assigned to every new profile.
pub const DEFAULT_ADVISOR: &str = "Assistant";

/// Custom-advisor setting before the user configures one.
pub const DEFAULT_CUSTOM_ADVISORS: &str = "Not Set";

/// Row of the `user_profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub personality_type: String,
    pub advisor: String,
    pub custom_advisors: String,
}

impl UserProfile {
    /// Profile a freshly signed-up or first-seen user starts with.
    pub fn with_defaults(id: UserId) -> Self {
        Self {
            id,
            personality_type: DEFAULT_PERSONALITY_TYPE.to_string(),
            advisor: DEFAULT_ADVISOR.to_string(),
            custom_advisors: DEFAULT_CUSTOM_ADVISORS.to_string(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_fresh_profile_values() {
        let profile = UserProfile::with_defaults(UserId::new("user-1").unwrap());

        assert_eq!(profile.id().as_str(), "user-1");
        assert_eq!(profile.personality_type, "NONE");
        assert_eq!(profile.advisor, "Assistant");
        assert_eq!(profile.custom_advisors, "Not Set");
    }

    #[test]
    fn serializes_with_table_column_names() {
        let profile = UserProfile::with_defaults(UserId::new("user-1").unwrap());

        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "id": "user-1",
                "personality_type": "NONE",
                "advisor": "Assistant",
                "custom_advisors": "Not Set",
            })
        );
    }
}
