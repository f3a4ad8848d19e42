//! Request payloads accepted by the service.

use serde::{de, Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Values accepted for [`CountRequest::state`].
pub const STATES: [u8; 2] = [0, 1];

/// Body of `POST /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CountRequest {
    #[serde(default, deserialize_with = "empty_if_null")]
    #[validate(length(max = 100))]
    pub name: String,

    #[serde(default = "default_state", deserialize_with = "lenient_state")]
    #[validate(custom(function = "validate_state"))]
    pub state: u8,
}

fn default_state() -> u8 {
    1
}

/// `null` reads as an empty name.
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StateValue {
    Number(u8),
    Text(String),
}

/// Accept a JSON number or a form string; a present but empty value is zero.
fn lenient_state<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match StateValue::deserialize(deserializer)? {
        StateValue::Number(state) => Ok(state),
        StateValue::Text(text) if text.trim().is_empty() => Ok(0),
        StateValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid state '{}'", text))),
    }
}

fn validate_state(state: u8) -> Result<(), ValidationError> {
    if STATES.contains(&state) {
        return Ok(());
    }

    let values = STATES
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut error = ValidationError::new("one_of");
    error.add_param(Cow::from("values"), &values);
    error.add_param(Cow::from("value"), &state);
    Err(error)
}
