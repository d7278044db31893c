use std::collections::HashMap;

use contracts::domain::a005_recharge::{Recharge, RechargeListItem, RechargeStats};

use super::repository;
use crate::domain::a003_client::repository as client_repository;

async fn client_names() -> anyhow::Result<HashMap<String, String>> {
    Ok(client_repository::list_all()
        .await?
        .into_iter()
        .map(|client| (client.id.as_string(), client.name))
        .collect())
}

fn decorate(recharge: Recharge, names: &HashMap<String, String>) -> RechargeListItem {
    let client_id = recharge.client_id.as_string();
    RechargeListItem {
        id: recharge.id.as_string(),
        client_name: names.get(&client_id).cloned().unwrap_or_default(),
        client_id,
        amount: recharge.amount,
        method: recharge.method,
        status: recharge.status,
        recharged_at: recharge.recharged_at,
    }
}

/// Recharge log, newest first, with client names attached.
pub async fn list(limit: Option<u64>) -> anyhow::Result<Vec<RechargeListItem>> {
    let recharges = repository::list_desc(limit).await?;
    let names = client_names().await?;
    Ok(recharges
        .into_iter()
        .map(|recharge| decorate(recharge, &names))
        .collect())
}

/// The `n` most recent recharges, for the dashboard.
pub async fn recent(n: u64) -> anyhow::Result<Vec<RechargeListItem>> {
    let recharges = repository::recent(n).await?;
    let names = client_names().await?;
    Ok(recharges
        .into_iter()
        .map(|recharge| decorate(recharge, &names))
        .collect())
}

pub async fn stats() -> anyhow::Result<RechargeStats> {
    repository::stats().await
}
