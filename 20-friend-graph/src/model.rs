//! Records stored by the service and the JSON payloads exchanged over HTTP.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a user. Ids handed out by the store start at 1.
pub type UserId = u64;

/// A user and the ids of the users it lists as friends.
///
/// Friendship is directional: `friends` holds outgoing edges only, may repeat
/// an id, and keeps the order the client supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub friends: Vec<UserId>,
}

impl User {
    pub fn new(user_id: UserId, friends: Vec<UserId>) -> Self {
        Self { user_id, friends }
    }
}

/// Body of `POST /user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub friends: Option<Vec<UserId>>,
}

/// Body of `PUT /user`.
///
/// `user_id` is coerced leniently; a missing or unusable value becomes 0,
/// which never names a stored user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "lenient_user_id")]
    pub user_id: UserId,
    #[serde(default)]
    pub friends: Option<Vec<UserId>>,
}

/// Response of `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Response of `DELETE /user/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub result: bool,
}

/// Response of `GET /distance/{a}/{b}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separation {
    pub user_one: UserId,
    pub user_two: UserId,
    pub degrees_separated: u32,
}

fn lenient_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, coerce_user_id))
}

/// Best-effort integer conversion: integers pass through, non-negative floats
/// are truncated, numeric strings are parsed. Everything else maps to 0.
pub fn coerce_user_id(value: &Value) -> UserId {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| f.trunc() as UserId)
        }),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
