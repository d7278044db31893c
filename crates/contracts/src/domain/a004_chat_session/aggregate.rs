use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_agent::AgentId;
use crate::domain::a002_user::UserId;
use crate::domain::a003_client::ClientId;
use crate::shared::commission::{CommissionError, CommissionSplit};
use crate::shared::money::Paise;

/// Unique session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
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

/// Text chat or voice call. Only chats carry a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Chat,
    Call,
}

impl SessionKind {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "chat" => Ok(SessionKind::Chat),
            "call" => Ok(SessionKind::Call),
            _ => Err(format!("Unknown session kind: {}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionKind::Chat => "chat",
            SessionKind::Call => "call",
        }
    }
}

/// One transcript line. The sender is the display name the app showed
/// and the time is the clock string it rendered; both stay as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub time: String,
}

/// Settled chat/call session.
///
/// The four amounts are what was credited when the session settled
/// under the split then in force. Later split edits do not touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: SessionId,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub user_id: UserId,
    pub client_id: ClientId,
    pub agent_id: Option<AgentId>,
    #[serde(rename = "timestamp")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub minutes: i64,
    pub client_spent: Paise,
    pub admin_earned: Paise,
    pub agent_earned: Paise,
    pub user_earned: Paise,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Settle a session of `minutes` minutes under `split`, capturing
    /// the projected amounts as the recorded ones.
    pub fn settle(
        kind: SessionKind,
        user_id: UserId,
        client_id: ClientId,
        agent_id: Option<AgentId>,
        started_at: DateTime<Utc>,
        minutes: i64,
        split: &CommissionSplit,
    ) -> Result<Self, CommissionError> {
        let projected = split.project(minutes)?;
        Ok(Self {
            id: SessionId::new_v4(),
            kind,
            user_id,
            client_id,
            agent_id,
            started_at,
            minutes,
            client_spent: projected.client_amount,
            admin_earned: projected.admin_amount,
            agent_earned: projected.agent_amount,
            user_earned: projected.user_amount,
            messages: Vec::new(),
        })
    }

    /// Attach the chat transcript. Calls have none.
    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.minutes < 0 {
            return Err(format!(
                "Session duration cannot be negative: {}",
                self.minutes
            ));
        }
        for (field, amount) in [
            ("clientSpent", self.client_spent),
            ("adminEarned", self.admin_earned),
            ("agentEarned", self.agent_earned),
            ("userEarned", self.user_earned),
        ] {
            if amount.is_negative() {
                return Err(format!("{} cannot be negative: {}", field, amount));
            }
        }
        if self.kind == SessionKind::Call && !self.messages.is_empty() {
            return Err("A call cannot carry a chat transcript".into());
        }
        Ok(())
    }
}

/// Session row for list views; the transcript itself is only shipped by
/// the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub user_id: String,
    pub user_name: String,
    pub client_id: String,
    pub client_name: String,
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
    #[serde(rename = "timestamp")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub minutes: i64,
    pub client_spent: Paise,
    pub admin_earned: Paise,
    pub agent_earned: Paise,
    pub user_earned: Paise,
    pub has_transcript: bool,
}

/// Response of `GET /api/sessions/:id`: the list row plus the
/// transcript (empty for calls).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionListItem,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::commission::DEFAULT_AGENT_SPLIT;

    #[test]
    fn settle_captures_projected_amounts() {
        let session = ChatSession::settle(
            SessionKind::Chat,
            UserId::new_v4(),
            ClientId::new_v4(),
            Some(AgentId::new_v4()),
            Utc::now(),
            30,
            &DEFAULT_AGENT_SPLIT,
        )
        .unwrap();
        assert_eq!(session.client_spent, Paise::from_rupees(1500));
        assert_eq!(session.admin_earned, Paise::from_rupees(300));
        assert_eq!(session.agent_earned, Paise::from_rupees(150));
        assert_eq!(session.user_earned, Paise::from_rupees(1050));
        assert!(session.validate().is_ok());
    }

    #[test]
    fn settle_rejects_negative_duration() {
        let result = ChatSession::settle(
            SessionKind::Call,
            UserId::new_v4(),
            ClientId::new_v4(),
            None,
            Utc::now(),
            -5,
            &DEFAULT_AGENT_SPLIT,
        );
        assert!(matches!(
            result,
            Err(CommissionError::InvalidDuration { minutes: -5 })
        ));
    }

    #[test]
    fn calls_cannot_carry_transcripts() {
        let call = ChatSession::settle(
            SessionKind::Call,
            UserId::new_v4(),
            ClientId::new_v4(),
            None,
            Utc::now(),
            10,
            &DEFAULT_AGENT_SPLIT,
        )
        .unwrap()
        .with_messages(vec![ChatMessage {
            sender: "Vikram".into(),
            text: "Hey!".into(),
            time: "14:30".into(),
        }]);
        assert!(call.validate().is_err());
    }

    #[test]
    fn wire_names_follow_the_admin_app() {
        let session = ChatSession::settle(
            SessionKind::Chat,
            UserId::new_v4(),
            ClientId::new_v4(),
            None,
            Utc::now(),
            45,
            &DEFAULT_AGENT_SPLIT,
        )
        .unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["duration"], 45);
        assert_eq!(json["clientSpent"], 225_000);
        assert!(json["timestamp"].is_string());
    }
}
