//! Login data received from the login widget
use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::canonical::LoginField;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LoginDataError {
    #[error("invalid JSON object")]
    InvalidJson,

    #[error("invalid query string")]
    InvalidQuery,

    #[error("'{0}' is missing")]
    MissingField(&'static str),

    #[error("'{0}' is not valid")]
    InvalidField(&'static str),
}

/// Signed user identity
#[derive(Clone, Debug, PartialEq)]
pub struct IdentityPayload {
    pub auth_date: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub username: Option<String>,
    pub telegram_id: i64,
    // hex-encoded HMAC-SHA256 code
    pub hash: String,
}

// Only canonical decimal representation is accepted,
// otherwise the value would be rendered differently from what was signed
fn parse_integer(value: &str) -> Option<i64> {
    let integer: i64 = value.parse().ok()?;
    if integer.to_string() != value {
        return None;
    };
    Some(integer)
}

fn get_required(
    fields: &HashMap<String, String>,
    field: LoginField,
) -> Result<String, LoginDataError> {
    fields.get(field.key())
        .cloned()
        .ok_or(LoginDataError::MissingField(field.key()))
}

fn get_integer(
    fields: &HashMap<String, String>,
    field: LoginField,
) -> Result<i64, LoginDataError> {
    let value = get_required(fields, field)?;
    parse_integer(&value).ok_or(LoginDataError::InvalidField(field.key()))
}

/// Collects login widget fields from JSON object.
/// Null values are treated as absent.
pub fn parse_json_fields(
    value: &str,
) -> Result<HashMap<String, String>, LoginDataError> {
    let object: JsonMap<String, JsonValue> = serde_json::from_str(value)
        .map_err(|_| LoginDataError::InvalidJson)?;
    let mut fields = HashMap::new();
    for field in LoginField::ALL {
        let field_value = match object.get(field.key()) {
            None | Some(JsonValue::Null) => continue,
            Some(JsonValue::String(text)) => text.clone(),
            Some(JsonValue::Number(number)) => number.to_string(),
            Some(_) => return Err(LoginDataError::InvalidField(field.key())),
        };
        fields.insert(field.key().to_string(), field_value);
    };
    Ok(fields)
}

/// Collects login widget fields from redirect query string.
/// Parameters that are not login widget fields are skipped.
pub fn parse_query_fields(
    query: &str,
) -> Result<HashMap<String, String>, LoginDataError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut fields = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let Some(field) = LoginField::ALL.iter()
            .find(|field| field.key() == key)
        else {
            continue;
        };
        // Repeated field makes the signed value ambiguous
        if fields.insert(field.key().to_string(), value.into_owned()).is_some() {
            return Err(LoginDataError::InvalidQuery);
        };
    };
    Ok(fields)
}

impl IdentityPayload {
    /// Validates login data. Unknown keys are ignored.
    pub fn from_fields(
        fields: &HashMap<String, String>,
    ) -> Result<Self, LoginDataError> {
        for field in LoginField::ALL {
            if !field.is_optional() && !fields.contains_key(field.key()) {
                return Err(LoginDataError::MissingField(field.key()));
            };
        };
        let get_text = |field: LoginField| fields.get(field.key()).cloned();
        let payload = Self {
            auth_date: get_integer(fields, LoginField::AuthDate)?,
            first_name: get_text(LoginField::FirstName),
            last_name: get_text(LoginField::LastName),
            photo_url: get_text(LoginField::PhotoUrl),
            username: get_text(LoginField::Username),
            telegram_id: get_integer(fields, LoginField::TelegramId)?,
            hash: get_required(fields, LoginField::Hash)?,
        };
        Ok(payload)
    }

    pub fn from_json(value: &str) -> Result<Self, LoginDataError> {
        let fields = parse_json_fields(value)?;
        Self::from_fields(&fields)
    }

    pub fn from_query(query: &str) -> Result<Self, LoginDataError> {
        let fields = parse_query_fields(query)?;
        Self::from_fields(&fields)
    }

    /// Returns textual representation of a field,
    /// or `None` if the field is absent
    pub fn field_value(&self, field: LoginField) -> Option<String> {
        match field {
            LoginField::AuthDate => Some(self.auth_date.to_string()),
            LoginField::FirstName => self.first_name.clone(),
            LoginField::LastName => self.last_name.clone(),
            LoginField::PhotoUrl => self.photo_url.clone(),
            LoginField::Username => self.username.clone(),
            LoginField::TelegramId => Some(self.telegram_id.to_string()),
            LoginField::Hash => Some(self.hash.clone()),
        }
    }

    /// Authentication time. Freshness is not checked here.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.auth_date, 0).single()
    }
}
