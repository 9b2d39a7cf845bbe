//! Users, audit log entries and their identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ustr::Ustr;
use uuid::Uuid;

use crate::Error;

/// Seeds carry ids either as strings or as bare numbers.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random (UUID v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        text_or_number(deserializer).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        text_or_number(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub blocked: bool,
    /// Per-account password-length limit.
    #[serde(default)]
    pub enable_limit: bool,
    #[serde(default)]
    pub password: String,
}

impl User {
    /// A freshly created account: unblocked, role `user`, no password.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::User,
            blocked: false,
            enable_limit: false,
            password: String::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Recorded action of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogAction {
    Login,
    Logout,
    ChangePassword,
    PasswordLimit,
    DeleteAccount,
    BlockAccount,
    LimitAccount,
    CreateAccount,
}

impl LogAction {
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Logout,
        Self::ChangePassword,
        Self::PasswordLimit,
        Self::DeleteAccount,
        Self::BlockAccount,
        Self::LimitAccount,
        Self::CreateAccount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ChangePassword => "change_password",
            Self::PasswordLimit => "password_limit",
            Self::DeleteAccount => "delete_account",
            Self::BlockAccount => "block_account",
            Self::LimitAccount => "limit_account",
            Self::CreateAccount => "create_account",
        }
    }
}

impl FromStr for LogAction {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == tag)
            .ok_or_else(|| Error::UnknownAction(tag.to_owned()))
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit log entry.
///
/// `user` and `reference` are snapshots taken when the event was recorded;
/// later changes to the account do not show up here. The action tag is kept
/// verbatim so an unrecognised tag only fails when the entry is formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: LogId,
    pub user: User,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<User>,
    pub action: Ustr,
    pub timestamp: i64,
}

impl Log {
    pub fn new(id: LogId, user: User, action: LogAction, timestamp: i64) -> Self {
        Self {
            id,
            user,
            reference: None,
            action: Ustr::from(action.as_str()),
            timestamp,
        }
    }

    pub fn with_reference(mut self, reference: User) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn action(&self) -> Result<LogAction, Error> {
        self.action.as_str().parse()
    }

    /// The account shown in the "who" column: the subject (`ref`) when
    /// present, otherwise the recorded user.
    pub fn who(&self) -> &str {
        self.reference
            .as_ref()
            .map_or(self.user.username.as_str(), |reference| {
                reference.username.as_str()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_numbers_and_strings() {
        let ids: Vec<UserId> = serde_json::from_str(r#"[1, "abc"]"#).expect("ids should parse");
        assert_eq!(ids, vec![UserId::new("1"), UserId::new("abc")]);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_user_defaults_when_fields_missing() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "username": "eve"}"#).expect("user should parse");

        assert_eq!(user.role, Role::User);
        assert!(!user.blocked);
        assert!(!user.enable_limit);
        assert_eq!(user.password, "");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new(UserId::new("1"), "alice");
        let json = serde_json::to_value(&user).expect("user should serialize");

        assert_eq!(json["enableLimit"], serde_json::json!(false));
        assert_eq!(json["role"], serde_json::json!("user"));
    }

    #[test]
    fn test_log_action_parses_every_known_tag() {
        for action in LogAction::ALL {
            assert_eq!(action.as_str().parse::<LogAction>().ok(), Some(action));
        }
    }

    #[test]
    fn test_log_action_rejects_unknown_tag() {
        let err = "rename_account".parse::<LogAction>().unwrap_err();
        assert!(matches!(err, Error::UnknownAction(ref tag) if tag == "rename_account"));
    }

    #[test]
    fn test_who_prefers_reference() {
        let actor = User::new(UserId::new("1"), "A");
        let subject = User::new(UserId::new("2"), "B");

        let log = Log::new(LogId::new("1"), actor.clone(), LogAction::BlockAccount, 0);
        assert_eq!(log.who(), "A");

        let log = log.with_reference(subject);
        assert_eq!(log.who(), "B");
    }

    #[test]
    fn test_log_reads_ref_field() {
        let log: Log = serde_json::from_str(
            r#"{
                "id": 1,
                "user": {"id": 1, "username": "A"},
                "ref": {"id": 2, "username": "B"},
                "action": "block_account",
                "timestamp": 10
            }"#,
        )
        .expect("log should parse");

        assert_eq!(log.who(), "B");
        assert_eq!(log.action().ok(), Some(LogAction::BlockAccount));
    }
}
