use contracts::domain::a003_client::{ClientListItem, ClientStats};

use super::repository;

/// Clients ranked by lifetime spend, biggest first. The sort is stable,
/// so equal spenders keep their register order.
pub async fn list_items() -> anyhow::Result<Vec<ClientListItem>> {
    let mut clients = repository::list_all().await?;
    clients.sort_by_key(|client| std::cmp::Reverse(client.total_spent));
    Ok(clients.into_iter().map(Into::into).collect())
}

pub async fn stats() -> anyhow::Result<ClientStats> {
    repository::stats().await
}
