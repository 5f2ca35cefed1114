//! User profile model for storage and API.

use crate::models::PreferredWeekdays;
use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Credentials live with the identity provider; this record only carries
/// what plan generation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Athlete ID (also used as document ID)
    pub athlete_id: u64,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Days the athlete is willing to train (0 = Monday)
    #[serde(default)]
    pub preferred_weekdays: PreferredWeekdays,
    /// When the profile was created (ISO 8601)
    pub created_at: String,
    /// Last profile update (ISO 8601)
    pub updated_at: String,
}

impl User {
    /// New profile with only the preferred weekdays set.
    pub fn new(athlete_id: u64, preferred_weekdays: PreferredWeekdays, now: &str) -> Self {
        Self {
            athlete_id,
            email: None,
            first_name: None,
            last_name: None,
            preferred_weekdays,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}
