use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_agent::AgentId;
use crate::shared::commission::CommissionSplit;
use crate::shared::money::Paise;

/// Unique user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// How the user joined the platform. Decides which split template
/// applies and whether an agent share is allowed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Independent,
    AgentRecruited,
}

impl UserKind {
    /// Upstream exports are inconsistent about this field (bare flags,
    /// 0/1 numbers, several spellings); accept the forms seen in
    /// practice and normalize.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "independent" | "0" | "false" | "no" => Ok(UserKind::Independent),
            "agent" | "agent-recruited" | "agent_recruited" | "recruited" | "1" | "true"
            | "yes" => Ok(UserKind::AgentRecruited),
            other => Err(format!("Unknown user kind: {}", other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserKind::Independent => "independent",
            UserKind::AgentRecruited => "agent",
        }
    }

    pub fn has_agent(&self) -> bool {
        matches!(self, UserKind::AgentRecruited)
    }
}

impl Serialize for UserKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(UserKind::AgentRecruited),
            Raw::Flag(false) => Ok(UserKind::Independent),
            Raw::Number(0) => Ok(UserKind::Independent),
            Raw::Number(_) => Ok(UserKind::AgentRecruited),
            Raw::Text(s) => UserKind::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// User account status. New signups sit in `Pending` until their audio
/// intro passes review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Pending,
    Rejected,
    Inactive,
}

impl UserStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "active" => Ok(UserStatus::Active),
            "pending" => Ok(UserStatus::Pending),
            "rejected" => Ok(UserStatus::Rejected),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Pending => "pending",
            UserStatus::Rejected => "rejected",
            UserStatus::Inactive => "inactive",
        }
    }
}

/// Verdict on a pending user's audio intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// Status the reviewed user ends up in.
    pub fn resulting_status(self) -> UserStatus {
        match self {
            ReviewDecision::Approve => UserStatus::Active,
            ReviewDecision::Reject => UserStatus::Rejected,
        }
    }
}

/// Body of `POST /api/users/:id/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecisionDto {
    pub decision: ReviewDecision,
}

/// Avatar initials shown in place of a profile photo: first letter of
/// the first two words of the name.
pub fn avatar_initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Performing user (chat/call host).
///
/// `total_minutes` and `total_earned` are settled facts bumped at
/// session settlement; they never decrease and are never recomputed
/// from the live commission split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    pub agent_id: Option<AgentId>,
    pub total_minutes: i64,
    pub total_earned: Paise,
    pub rating: f32,
    pub status: UserStatus,
    /// Voice sample independents submit for review.
    pub audio_intro_url: Option<String>,
    pub joined_at: NaiveDate,
}

impl User {
    /// Create a new user for insertion into the database.
    pub fn new_for_insert(
        name: String,
        phone: String,
        kind: UserKind,
        agent_id: Option<AgentId>,
        audio_intro_url: Option<String>,
    ) -> Self {
        let avatar = avatar_initials(&name);
        Self {
            id: UserId::new_v4(),
            name,
            avatar,
            phone,
            kind,
            agent_id,
            total_minutes: 0,
            total_earned: Paise::ZERO,
            rating: 0.0,
            status: UserStatus::Pending,
            audio_intro_url,
            joined_at: Utc::now().date_naive(),
        }
    }

    /// Whether the user has a recruiting agent. Drives both the split
    /// template and the agent-share validation rule.
    pub fn has_agent(&self) -> bool {
        self.agent_id.is_some()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("User name cannot be empty".into());
        }
        if self.kind.has_agent() && self.agent_id.is_none() {
            return Err("Agent-recruited user must reference an agent".into());
        }
        if !self.kind.has_agent() && self.agent_id.is_some() {
            return Err("Independent user cannot reference an agent".into());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!("User rating must be between 0 and 5: {}", self.rating));
        }
        if self.total_minutes < 0 {
            return Err(format!(
                "User total minutes cannot be negative: {}",
                self.total_minutes
            ));
        }
        if self.total_earned.is_negative() {
            return Err(format!(
                "User total earned cannot be negative: {}",
                self.total_earned
            ));
        }
        Ok(())
    }
}

/// User row for list views, decorated with the agent's name and the
/// effective commission split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
    pub total_minutes: i64,
    pub total_earned: Paise,
    pub rating: f32,
    pub status: UserStatus,
    pub audio_intro_url: Option<String>,
    pub joined_at: NaiveDate,
    pub commission: CommissionSplit,
    /// True while the split is the kind template rather than an
    /// explicitly stored record.
    pub is_default_commission: bool,
}

impl UserListItem {
    pub fn new(
        user: User,
        agent_name: Option<String>,
        commission: CommissionSplit,
        is_default_commission: bool,
    ) -> Self {
        Self {
            id: user.id.as_string(),
            name: user.name,
            avatar: user.avatar,
            phone: user.phone,
            kind: user.kind,
            agent_id: user.agent_id.map(|id| id.as_string()),
            agent_name,
            total_minutes: user.total_minutes,
            total_earned: user.total_earned,
            rating: user.rating,
            status: user.status,
            audio_intro_url: user.audio_intro_url,
            joined_at: user.joined_at,
            commission,
            is_default_commission,
        }
    }
}

/// Effective split for one user, as returned by
/// `GET /api/users/:id/commission`. `is_default` is true while no
/// explicit split has been stored and a kind template is in force.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCommissionResponse {
    pub user_id: String,
    pub has_agent: bool,
    pub is_default: bool,
    #[serde(flatten)]
    pub split: CommissionSplit,
}

/// One archived split. Every successful replacement supersedes the
/// previous record; nothing is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionHistoryEntry {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub split: CommissionSplit,
    pub set_by: String,
    pub set_at: DateTime<Utc>,
    pub superseded_at: Option<DateTime<Utc>>,
}

/// Card figures for the users page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: i64,
    pub total_minutes: i64,
    pub average_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_the_spellings_seen_in_exports() {
        assert_eq!(UserKind::parse("agent"), Ok(UserKind::AgentRecruited));
        assert_eq!(
            UserKind::parse("Agent-Recruited"),
            Ok(UserKind::AgentRecruited)
        );
        assert_eq!(UserKind::parse("independent"), Ok(UserKind::Independent));
        assert_eq!(UserKind::parse(" 1 "), Ok(UserKind::AgentRecruited));
        assert_eq!(UserKind::parse("0"), Ok(UserKind::Independent));
        assert!(UserKind::parse("royalty").is_err());
    }

    #[test]
    fn kind_deserializes_from_flags_numbers_and_strings() {
        for raw in ["\"agent\"", "true", "1"] {
            let kind: UserKind = serde_json::from_str(raw).unwrap();
            assert_eq!(kind, UserKind::AgentRecruited, "raw input {raw}");
        }
        for raw in ["\"independent\"", "false", "0"] {
            let kind: UserKind = serde_json::from_str(raw).unwrap();
            assert_eq!(kind, UserKind::Independent, "raw input {raw}");
        }
    }

    #[test]
    fn kind_always_serializes_as_canonical_string() {
        assert_eq!(
            serde_json::to_string(&UserKind::AgentRecruited).unwrap(),
            "\"agent\""
        );
        assert_eq!(
            serde_json::to_string(&UserKind::Independent).unwrap(),
            "\"independent\""
        );
    }

    #[test]
    fn user_kind_and_agent_link_must_agree() {
        let mut user = User::new_for_insert(
            "Priya Verma".into(),
            "+91 98000 00001".into(),
            UserKind::AgentRecruited,
            Some(AgentId::new_v4()),
            None,
        );
        assert!(user.validate().is_ok());

        user.agent_id = None;
        assert!(user.validate().is_err());

        user.kind = UserKind::Independent;
        assert!(user.validate().is_ok());
    }

    #[test]
    fn avatar_takes_the_first_two_initials() {
        assert_eq!(avatar_initials("Ananya Singh"), "AS");
        assert_eq!(avatar_initials("Meera"), "M");
        assert_eq!(avatar_initials("kavya rani reddy"), "KR");
        assert_eq!(avatar_initials(""), "");
    }

    #[test]
    fn review_decisions_map_to_statuses() {
        assert_eq!(ReviewDecision::Approve.resulting_status(), UserStatus::Active);
        assert_eq!(ReviewDecision::Reject.resulting_status(), UserStatus::Rejected);
        let dto: ReviewDecisionDto = serde_json::from_str(r#"{"decision":"approve"}"#).unwrap();
        assert_eq!(dto.decision, ReviewDecision::Approve);
    }
}
