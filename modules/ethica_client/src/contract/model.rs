use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Profile record as served by `/user/getUserProfile`.
///
/// Missing or `null` text fields read as empty strings; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    /// Inline `data:` URL, or none.
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about_me: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub education_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

impl Profile {
    /// Two-letter avatar fallback from the full name; `U` when the name is blank.
    pub fn initials(&self) -> String {
        let mut parts = self.full_name.split_whitespace();
        let Some(first) = parts.next() else {
            return "U".to_string();
        };
        first
            .chars()
            .take(1)
            .chain(parts.next().into_iter().flat_map(|s| s.chars().take(1)))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Birth date for display, e.g. `March 4, 1990`.
    pub fn birth_date_label(&self) -> String {
        if self.date_of_birth.is_empty() {
            return "Not specified".to_string();
        }
        match parse_calendar_date(&self.date_of_birth) {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => "Invalid date".to_string(),
        }
    }

    /// Rewrite `date_of_birth` as `YYYY-MM-DD`. Unparseable values are kept as-is.
    pub fn normalize_birth_date(&mut self) {
        if let Some(date) = parse_calendar_date(&self.date_of_birth) {
            self.date_of_birth = date.format("%Y-%m-%d").to_string();
        }
    }
}

/// Calendar day of a date or timestamp string; timestamps with an offset are
/// taken in UTC.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Full editable field set sent to `/user/updateUserProfile/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub profile_image: Option<String>,
    pub post: String,
    pub location: String,
    pub website_url: String,
    pub about_me: String,
    pub date_of_birth: String,
    pub university: String,
    pub degree: String,
    pub education_year: Option<i32>,
    pub company: String,
    pub position: String,
    pub email: String,
    pub skills: Vec<String>,
}

impl From<&Profile> for ProfileUpdate {
    fn from(p: &Profile) -> Self {
        Self {
            full_name: p.full_name.clone(),
            profile_image: p.profile_image.clone(),
            post: p.post.clone(),
            location: p.location.clone(),
            website_url: p.website_url.clone(),
            about_me: p.about_me.clone(),
            date_of_birth: p.date_of_birth.clone(),
            university: p.university.clone(),
            degree: p.degree.clone(),
            education_year: p.education_year,
            company: p.company.clone(),
            position: p.position.clone(),
            email: p.email.clone(),
            skills: p.skills.clone(),
        }
    }
}

/// `getUserProfile` answers with either one record or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfilePayload {
    // Tried first: a struct would also accept a sequence.
    Many(Vec<Profile>),
    One(Profile),
}

impl ProfilePayload {
    /// The record to display: the single one, or the first of the list.
    pub fn into_first(self) -> Option<Profile> {
        match self {
            Self::One(p) => Some(p),
            Self::Many(list) => list.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User object returned by login, kept exactly as the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSnapshot(serde_json::Value);

impl UserSnapshot {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    /// `_id` wins over `id`; numeric ids are rendered as text.
    pub fn id(&self) -> Option<String> {
        ["_id", "id"].into_iter().find_map(|key| match self.0.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(serde_json::Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Successful login body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub user: UserSnapshot,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Form inputs may deliver the year as a string.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid educationYear: {n}"))),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid educationYear: {s}"))),
        Some(other) => Err(D::Error::custom(format!("invalid educationYear: {other}"))),
    }
}
