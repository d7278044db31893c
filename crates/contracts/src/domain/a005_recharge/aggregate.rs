use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a003_client::ClientId;
use crate::shared::money::Paise;

/// Unique recharge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RechargeId(pub Uuid);

impl RechargeId {
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

/// Payment rail the client paid through. Wire spellings follow the
/// gateway's, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMethod {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "UPI" => Ok(PaymentMethod::Upi),
            "Card" => Ok(PaymentMethod::Card),
            "Net Banking" | "NetBanking" => Ok(PaymentMethod::NetBanking),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "Net Banking",
        }
    }
}

/// Gateway outcome for a recharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RechargeStatus {
    Success,
    Pending,
    Failed,
}

impl RechargeStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "success" => Ok(RechargeStatus::Success),
            "pending" => Ok(RechargeStatus::Pending),
            "failed" => Ok(RechargeStatus::Failed),
            _ => Err(format!("Unknown recharge status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RechargeStatus::Success => "success",
            RechargeStatus::Pending => "pending",
            RechargeStatus::Failed => "failed",
        }
    }
}

/// One coin top-up attempt. Only successful recharges move money.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recharge {
    pub id: RechargeId,
    pub client_id: ClientId,
    pub amount: Paise,
    pub method: PaymentMethod,
    pub status: RechargeStatus,
    #[serde(rename = "timestamp")]
    pub recharged_at: DateTime<Utc>,
}

impl Recharge {
    /// Create a new recharge for insertion into the database.
    pub fn new_for_insert(
        client_id: ClientId,
        amount: Paise,
        method: PaymentMethod,
        status: RechargeStatus,
    ) -> Self {
        Self {
            id: RechargeId::new_v4(),
            client_id,
            amount,
            method,
            status,
            recharged_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.amount.is_negative() {
            return Err(format!(
                "Recharge amount cannot be negative: {}",
                self.amount
            ));
        }
        Ok(())
    }
}

/// Recharge row for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeListItem {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub amount: Paise,
    pub method: PaymentMethod,
    pub status: RechargeStatus,
    #[serde(rename = "timestamp")]
    pub recharged_at: DateTime<Utc>,
}

/// Card figures for the recharges page. `total_collected` counts
/// successful recharges only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeStats {
    pub total_recharges: i64,
    pub total_collected: Paise,
    pub failed_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_methods_keep_gateway_spellings() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::NetBanking).unwrap(),
            "\"Net Banking\""
        );
        assert_eq!(PaymentMethod::from_str("Net Banking"), Ok(PaymentMethod::NetBanking));
        assert_eq!(PaymentMethod::from_str("UPI"), Ok(PaymentMethod::Upi));
        assert!(PaymentMethod::from_str("upi").is_err());
    }
}
