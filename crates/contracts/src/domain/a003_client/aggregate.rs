use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::money::Paise;

/// Unique client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
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

/// Paying client. Coins are the prepaid on-platform currency; money in
/// paise enters through recharges and leaves through sessions.
/// `total_spent` and `recharge_count` are running totals maintained by
/// the write side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    pub coin_balance: i64,
    pub total_spent: Paise,
    pub recharge_count: i64,
    pub last_active: NaiveDate,
    pub joined_at: NaiveDate,
}

impl Client {
    /// Create a new client for insertion into the database.
    pub fn new_for_insert(name: String, phone: String) -> Self {
        let today = Utc::now().date_naive();
        Self {
            id: ClientId::new_v4(),
            name,
            phone,
            coin_balance: 0,
            total_spent: Paise::ZERO,
            recharge_count: 0,
            last_active: today,
            joined_at: today,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Client name cannot be empty".into());
        }
        if self.phone.trim().is_empty() {
            return Err("Client phone cannot be empty".into());
        }
        if self.coin_balance < 0 {
            return Err(format!(
                "Coin balance cannot be negative: {}",
                self.coin_balance
            ));
        }
        if self.recharge_count < 0 {
            return Err(format!(
                "Recharge count cannot be negative: {}",
                self.recharge_count
            ));
        }
        Ok(())
    }
}

/// Client row for list views. The list endpoint returns these ranked by
/// `total_spent` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListItem {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub coin_balance: i64,
    pub total_spent: Paise,
    pub recharge_count: i64,
    pub last_active: NaiveDate,
    pub joined_at: NaiveDate,
}

impl From<Client> for ClientListItem {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.as_string(),
            name: client.name,
            phone: client.phone,
            coin_balance: client.coin_balance,
            total_spent: client.total_spent,
            recharge_count: client.recharge_count,
            last_active: client.last_active,
            joined_at: client.joined_at,
        }
    }
}

/// Card figures for the clients page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total_clients: i64,
    pub total_spent: Paise,
    pub total_coin_balance: i64,
}
