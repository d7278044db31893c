use std::collections::HashMap;

use contracts::domain::a002_user::{
    CommissionHistoryEntry, ReviewDecision, User, UserCommissionResponse, UserListItem, UserStats,
};
use contracts::shared::commission::{self, CommissionError, CommissionSplit};
use thiserror::Error;
use uuid::Uuid;

use super::{repository, split_repository};
use crate::domain::a001_agent::repository as agent_repository;

/// Why a split write was refused. `Invalid` carries the engine's
/// diagnostic; `Db` is transport trouble.
#[derive(Debug, Error)]
pub enum SetSplitError {
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Invalid(#[from] CommissionError),
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

pub async fn list_items() -> anyhow::Result<Vec<UserListItem>> {
    let users = repository::list_all().await?;
    let agent_names: HashMap<String, String> = agent_repository::list_all()
        .await?
        .into_iter()
        .map(|agent| (agent.id.as_string(), agent.name))
        .collect();
    let splits: HashMap<String, CommissionSplit> = split_repository::current_splits()
        .await?
        .into_iter()
        .map(|entry| (entry.user_id.clone(), entry.split))
        .collect();

    Ok(users
        .into_iter()
        .map(|user| {
            let agent_name = user
                .agent_id
                .and_then(|id| agent_names.get(&id.as_string()).cloned());
            let (commission, is_default) = match splits.get(&user.id.as_string()) {
                Some(split) => (*split, false),
                None => (commission::default_template(user.has_agent()), true),
            };
            UserListItem::new(user, agent_name, commission, is_default)
        })
        .collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<User>> {
    repository::get_by_id(id).await
}

/// The split in force for one user: the stored record, or the kind
/// template while none has been set. `None` for an unknown user.
pub async fn get_split(user_id: Uuid) -> anyhow::Result<Option<UserCommissionResponse>> {
    let user = match repository::get_by_id(user_id).await? {
        Some(user) => user,
        None => return Ok(None),
    };
    let (split, is_default) = match split_repository::current_for_user(user_id).await? {
        Some(entry) => (entry.split, false),
        None => (commission::default_template(user.has_agent()), true),
    };
    Ok(Some(UserCommissionResponse {
        user_id: user.id.as_string(),
        has_agent: user.has_agent(),
        is_default,
        split,
    }))
}

/// Replace the user's split. The candidate is validated against the
/// user's agent relationship before anything is written; a rejected
/// candidate leaves the store untouched. Concurrent writers race
/// last-write-wins, and every superseded record stays in the history.
pub async fn set_split(
    user_id: Uuid,
    split: CommissionSplit,
    set_by: &str,
) -> Result<CommissionHistoryEntry, SetSplitError> {
    let user = repository::get_by_id(user_id)
        .await?
        .ok_or(SetSplitError::UserNotFound)?;
    split.validate(user.has_agent())?;

    let entry = split_repository::replace_current(user_id, &split, set_by).await?;
    tracing::info!(
        "Commission split for user {} replaced by {}: {} = {} + {} + {}",
        entry.user_id,
        set_by,
        split.client_rate_per_minute,
        split.admin_share,
        split.agent_share,
        split.user_share
    );
    Ok(entry)
}

/// Write history for one user, newest first. `None` for an unknown
/// user; a known user with only the template in force gets an empty
/// list.
pub async fn split_history(user_id: Uuid) -> anyhow::Result<Option<Vec<CommissionHistoryEntry>>> {
    if repository::get_by_id(user_id).await?.is_none() {
        return Ok(None);
    }
    Ok(Some(split_repository::history_for_user(user_id).await?))
}

/// Independent users whose audio intro still awaits a verdict.
pub async fn audio_review_queue() -> anyhow::Result<Vec<User>> {
    repository::list_pending_independent().await
}

/// Settle an audio review. Approval activates the user, rejection
/// parks the account; either way the verdict is recorded on the spot.
pub async fn review(user_id: Uuid, decision: ReviewDecision) -> anyhow::Result<Option<User>> {
    let status = decision.resulting_status();
    if !repository::update_status(user_id, status).await? {
        return Ok(None);
    }
    tracing::info!("User {} reviewed: {}", user_id, status.as_str());
    repository::get_by_id(user_id).await
}

pub async fn stats() -> anyhow::Result<UserStats> {
    repository::stats().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_agent::Agent;
    use contracts::domain::a002_user::{UserKind, UserStatus};
    use contracts::shared::commission::DEFAULT_AGENT_SPLIT;
    use contracts::shared::money::Paise;

    use crate::shared::data::db;

    fn rupee_split(rate: i64, admin: i64, agent: i64, user: i64) -> CommissionSplit {
        CommissionSplit {
            client_rate_per_minute: Paise::from_rupees(rate),
            admin_share: Paise::from_rupees(admin),
            agent_share: Paise::from_rupees(agent),
            user_share: Paise::from_rupees(user),
        }
    }

    #[tokio::test]
    async fn split_store_set_get_history_and_review() -> anyhow::Result<()> {
        db::ensure_test_database().await?;

        let agent = Agent::new_for_insert("Rahul Sharma".into(), "+91 98765 43210".into(), 10);
        agent_repository::insert(&agent).await?;
        let user = User::new_for_insert(
            "Ananya Singh".into(),
            "+91 99887 76655".into(),
            UserKind::AgentRecruited,
            Some(agent.id),
            None,
        );
        repository::insert(&user).await?;
        let user_id = user.id.value();

        // Unknown user: the store has nothing to say
        assert!(get_split(Uuid::new_v4()).await?.is_none());

        // Nothing stored yet, so the agent template is in force
        let effective = get_split(user_id).await?.expect("user exists");
        assert!(effective.is_default);
        assert_eq!(effective.split, DEFAULT_AGENT_SPLIT);

        // A sum mismatch is refused and stores nothing
        let err = set_split(user_id, rupee_split(50, 10, 5, 30), "admin")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SetSplitError::Invalid(CommissionError::SumMismatch { .. })
        ));
        assert!(get_split(user_id).await?.expect("user exists").is_default);

        // A valid split becomes the stored record
        let custom = rupee_split(60, 12, 8, 40);
        set_split(user_id, custom, "admin").await.expect("valid split");
        let effective = get_split(user_id).await?.expect("user exists");
        assert!(!effective.is_default);
        assert_eq!(effective.split, custom);

        // Replacing it archives the old record instead of deleting it
        let replacement = rupee_split(60, 10, 10, 40);
        set_split(user_id, replacement, "admin").await.expect("valid split");
        let history = split_history(user_id).await?.expect("user exists");
        assert_eq!(history.len(), 2);
        assert_eq!(
            history
                .iter()
                .filter(|entry| entry.superseded_at.is_none())
                .count(),
            1
        );
        let archived = history
            .iter()
            .find(|entry| entry.superseded_at.is_some())
            .expect("one archived row");
        assert_eq!(archived.split, custom);
        assert_eq!(archived.set_by, "admin");

        // Review flow: approval moves the pending user into the roster
        let reviewed = review(user_id, ReviewDecision::Approve)
            .await?
            .expect("user exists");
        assert_eq!(reviewed.status, UserStatus::Active);
        assert!(review(Uuid::new_v4(), ReviewDecision::Reject).await?.is_none());

        Ok(())
    }
}
