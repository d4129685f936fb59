//! Fixture document
//!
//! The document is an application settings file carrying three arrays:
//! `defaultAccounts`, `defaultProfiles` and `defaultReviews`. Other top-level
//! keys are ignored. No shape validation happens beyond what deserialization
//! enforces.

use crate::contract::{Experience, SeedError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Everything the loader seeds in one run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSet {
    #[serde(default)]
    pub default_accounts: Vec<AccountSeed>,
    #[serde(default)]
    pub default_profiles: Vec<ProfileSeed>,
    #[serde(default)]
    pub default_reviews: Vec<ReviewGroup>,
}

/// Account fixture, keyed by email
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountSeed {
    pub email: String,
    /// Free-form role; see [`crate::contract::Role::from_seed`]
    #[serde(default)]
    pub role: Option<String>,
}

/// Profile fixture, owned by the account with `user_email`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSeed {
    pub username: String,
    pub user_email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub musical_goals: Vec<String>,
    #[serde(default)]
    pub musical_tastes: Vec<String>,
    #[serde(default)]
    pub instruments: Vec<String>,
    pub experience: Experience,
    #[serde(default)]
    pub description: Option<String>,
}

/// Reviews targeting one profile
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewGroup {
    /// Generated id of the reviewed profile
    pub profile_id: i32,
    #[serde(default)]
    pub reviews: Vec<ReviewSeed>,
}

/// A single review fixture
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSeed {
    /// Generated id of the reviewing user
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ReviewSeed {
    /// Parsed `createdAt`, or `None` to leave it to the datastore default.
    pub fn created_at(&self) -> Result<Option<DateTime<Utc>>, SeedError> {
        self.created_at.as_deref().map(parse_timestamp).transpose()
    }
}

impl FixtureSet {
    /// Read and parse a fixture document from disk.
    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::FixtureRead {
                path: path.to_path_buf(),
                source,
            })?;

        let fixtures: Self =
            serde_json::from_str(&raw).map_err(|source| SeedError::FixtureParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            accounts = fixtures.default_accounts.len(),
            profiles = fixtures.default_profiles.len(),
            review_groups = fixtures.default_reviews.len(),
            "Loaded fixtures"
        );
        Ok(fixtures)
    }
}

/// Zone-less ISO date-time forms, read as UTC
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO 8601 `createdAt`.
///
/// Accepts RFC 3339, date-times with or without seconds and zone, and a bare
/// `YYYY-MM-DD`. A missing zone means UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SeedError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Ok(ts.with_timezone(&Utc));
    }

    let zoneless = value.strip_suffix('Z').unwrap_or(value);
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(zoneless, format).ok())
    {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| SeedError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
        .and_then(|date| {
            date.and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc())
                .ok_or_else(|| SeedError::InvalidTimestamp {
                    value: value.to_string(),
                    reason: "date has no midnight".to_string(),
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_settings_document_and_ignores_other_sections() {
        let doc = json!({
            "publicSiteName": "Jam Session",
            "defaultAccounts": [
                { "email": "admin@foo.com", "role": "ADMIN" },
                { "email": "john@foo.com" }
            ],
            "defaultProfiles": [{
                "username": "johnny",
                "userEmail": "john@foo.com",
                "firstName": "John",
                "lastName": "Foo",
                "image": "/images/john.png",
                "rating": 4.5,
                "musicalGoals": ["Join a band"],
                "musicalTastes": ["Jazz", "Funk"],
                "instruments": ["Bass"],
                "experience": "INTERMEDIATE",
                "description": "Weekend bassist"
            }],
            "defaultReviews": [{
                "profileId": 1,
                "reviews": [
                    { "userId": 1, "rating": 5, "comment": "Solid groove", "createdAt": "2024-03-01" }
                ]
            }]
        });

        let fixtures: FixtureSet = serde_json::from_value(doc).unwrap();

        assert_eq!(fixtures.default_accounts.len(), 2);
        assert_eq!(fixtures.default_accounts[1].role, None);
        assert_eq!(fixtures.default_profiles[0].experience, Experience::Intermediate);
        assert_eq!(fixtures.default_profiles[0].musical_tastes, vec!["Jazz", "Funk"]);
        assert_eq!(fixtures.default_reviews[0].reviews[0].user_id, 1);
    }

    #[test]
    fn shipped_development_fixtures_parse() {
        let raw = include_str!("../../../config/settings.development.json");
        let fixtures: FixtureSet = serde_json::from_str(raw).unwrap();

        assert_eq!(fixtures.default_accounts.len(), 3);
        assert_eq!(fixtures.default_profiles.len(), 2);
        for group in &fixtures.default_reviews {
            for review in &group.reviews {
                review.created_at().unwrap();
            }
        }
    }

    #[test]
    fn missing_arrays_are_empty() {
        let fixtures: FixtureSet = serde_json::from_value(json!({})).unwrap();
        assert!(fixtures.default_accounts.is_empty());
        assert!(fixtures.default_profiles.is_empty());
        assert!(fixtures.default_reviews.is_empty());
    }

    #[test]
    fn unknown_experience_is_rejected() {
        let doc = json!({
            "defaultProfiles": [{
                "username": "x",
                "userEmail": "x@foo.com",
                "firstName": "X",
                "lastName": "Y",
                "experience": "GURU"
            }]
        });
        assert!(serde_json::from_value::<FixtureSet>(doc).is_err());
    }

    #[test]
    fn timestamps_accept_iso_date_times_and_plain_dates() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-01-15T12:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-01-15").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-02T21:00:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-02T21:00:00.250").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap() + chrono::Duration::milliseconds(250)
        );
        assert_eq!(
            parse_timestamp("2024-03-02T21:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-02T21:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-02T23:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-02T21:00:00.000Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 21, 0, 0).unwrap()
        );
        assert!(parse_timestamp("2024-03-02T21").is_err());
        assert!(parse_timestamp("2024-03-02T21:00:00ZZ").is_err());
        assert!(matches!(
            parse_timestamp("last tuesday"),
            Err(SeedError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn review_without_created_at_defers_to_datastore() {
        let review = ReviewSeed {
            user_id: 1,
            rating: 3,
            comment: "ok".to_string(),
            created_at: None,
        };
        assert_eq!(review.created_at().unwrap(), None);
    }

    #[tokio::test]
    async fn load_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = FixtureSet::load(&path).await.unwrap_err();
        assert!(matches!(err, SeedError::FixtureParse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureSet::load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::FixtureRead { .. }));
    }
}
