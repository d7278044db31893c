//! Commission split engine.
//!
//! A split describes how one minute of a paid session is divided between
//! the platform (admin), the recruiting agent and the performing user.
//! Everything here is pure data arithmetic on integer paise: no store
//! lookups, no I/O. The record store in the backend validates through
//! this module before persisting anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Paise;

/// Template applied to agent-recruited users until an admin sets an
/// explicit split: client pays ₹50/min = ₹10 admin + ₹5 agent + ₹35 user.
pub const DEFAULT_AGENT_SPLIT: CommissionSplit = CommissionSplit {
    client_rate_per_minute: Paise::from_rupees(50),
    admin_share: Paise::from_rupees(10),
    agent_share: Paise::from_rupees(5),
    user_share: Paise::from_rupees(35),
};

/// Template for independent users: the agent share folds into the admin
/// share (₹50 = ₹15 admin + ₹0 agent + ₹35 user).
pub const DEFAULT_INDEPENDENT_SPLIT: CommissionSplit = CommissionSplit {
    client_rate_per_minute: Paise::from_rupees(50),
    admin_share: Paise::from_rupees(15),
    agent_share: Paise::ZERO,
    user_share: Paise::from_rupees(35),
};

/// The template for a user with or without an agent relationship.
pub fn default_template(has_agent: bool) -> CommissionSplit {
    if has_agent {
        DEFAULT_AGENT_SPLIT
    } else {
        DEFAULT_INDEPENDENT_SPLIT
    }
}

/// Per-minute division of a client's payment.
///
/// Valid only when the three shares sum to the client rate exactly; see
/// [`CommissionSplit::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSplit {
    pub client_rate_per_minute: Paise,
    pub admin_share: Paise,
    pub agent_share: Paise,
    pub user_share: Paise,
}

impl CommissionSplit {
    /// Sum of the three shares, compared against the client rate.
    pub fn share_sum(&self) -> Paise {
        self.admin_share + self.agent_share + self.user_share
    }

    /// Checks a candidate split. `has_agent` is whether the owning user
    /// has a recruiting agent; independent users must carry a zero agent
    /// share. Check order: field signs, rate, agent relationship, then
    /// the sum.
    pub fn validate(&self, has_agent: bool) -> Result<(), CommissionError> {
        for (field, amount) in [
            ("adminShare", self.admin_share),
            ("agentShare", self.agent_share),
            ("userShare", self.user_share),
        ] {
            if amount.is_negative() {
                return Err(CommissionError::NegativeShare { field, amount });
            }
        }
        if self.client_rate_per_minute <= Paise::ZERO {
            return Err(CommissionError::NonPositiveRate {
                rate: self.client_rate_per_minute,
            });
        }
        if !has_agent && self.agent_share != Paise::ZERO {
            return Err(CommissionError::AgentShareNotAllowed {
                agent_share: self.agent_share,
            });
        }
        let sum = self.share_sum();
        if sum != self.client_rate_per_minute {
            return Err(CommissionError::SumMismatch {
                sum,
                expected: self.client_rate_per_minute,
            });
        }
        Ok(())
    }

    /// Projects absolute amounts for a hypothetical session of `minutes`
    /// minutes. Pure: previews a split without consulting any store.
    pub fn project(&self, minutes: i64) -> Result<SplitProjection, CommissionError> {
        if minutes < 0 {
            return Err(CommissionError::InvalidDuration { minutes });
        }
        Ok(SplitProjection {
            admin_amount: self.admin_share * minutes,
            agent_amount: self.agent_share * minutes,
            user_amount: self.user_share * minutes,
            client_amount: self.client_rate_per_minute * minutes,
        })
    }

    /// Whole-percent breakdown of each share against the client rate,
    /// rounded half up. Display data for the preview panel, not money.
    pub fn percentages(&self) -> SplitPercentages {
        let rate = self.client_rate_per_minute.value();
        let pct = |share: Paise| -> u32 {
            if rate <= 0 {
                return 0;
            }
            (((share.value() * 100) + rate / 2) / rate).max(0) as u32
        };
        SplitPercentages {
            admin: pct(self.admin_share),
            agent: pct(self.agent_share),
            user: pct(self.user_share),
        }
    }
}

/// Absolute amounts for a projected session duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitProjection {
    pub admin_amount: Paise,
    pub agent_amount: Paise,
    pub user_amount: Paise,
    pub client_amount: Paise,
}

/// Whole-percent share breakdown (`10 + 5 + 35` of ₹50 → `20/10/70`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPercentages {
    pub admin: u32,
    pub agent: u32,
    pub user: u32,
}

/// Why a split or a projection request was rejected. All variants are
/// recoverable by the caller; handlers render them inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommissionError {
    #[error("split total {sum} must equal client rate {expected} (sum={sum}, expected={expected})")]
    SumMismatch { sum: Paise, expected: Paise },

    #[error("{field} cannot be negative (got {amount})")]
    NegativeShare { field: &'static str, amount: Paise },

    #[error("client rate must be positive (got {rate})")]
    NonPositiveRate { rate: Paise },

    #[error("agent share must be zero for an independent user (got {agent_share})")]
    AgentShareNotAllowed { agent_share: Paise },

    #[error("session duration must be a non-negative whole number of minutes (got {minutes})")]
    InvalidDuration { minutes: i64 },
}

/// Body of `POST /api/commission/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSplitRequest {
    #[serde(flatten)]
    pub split: CommissionSplit,
    /// Candidate is for a user with no recruiting agent.
    #[serde(default)]
    pub independent: bool,
}

/// Body of `POST /api/commission/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSplitRequest {
    #[serde(flatten)]
    pub split: CommissionSplit,
    pub minutes: i64,
}

/// Preview panel payload: per-minute shares, percentage breakdown and the
/// projected totals for the requested duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreview {
    pub per_minute: CommissionSplit,
    pub percentages: SplitPercentages,
    pub minutes: i64,
    pub projection: SplitProjection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(rate: i64, admin: i64, agent: i64, user: i64) -> CommissionSplit {
        CommissionSplit {
            client_rate_per_minute: Paise::from_rupees(rate),
            admin_share: Paise::from_rupees(admin),
            agent_share: Paise::from_rupees(agent),
            user_share: Paise::from_rupees(user),
        }
    }

    #[test]
    fn agent_split_10_5_35_of_50_is_valid() {
        let s = split(50, 10, 5, 35);
        assert!(s.validate(true).is_ok());
    }

    #[test]
    fn projection_over_thirty_minutes() {
        let s = split(50, 10, 5, 35);
        let p = s.project(30).unwrap();
        assert_eq!(p.admin_amount, Paise::from_rupees(300));
        assert_eq!(p.agent_amount, Paise::from_rupees(150));
        assert_eq!(p.user_amount, Paise::from_rupees(1050));
        assert_eq!(p.client_amount, Paise::from_rupees(1500));
    }

    #[test]
    fn projection_of_zero_minutes_is_all_zero() {
        let p = split(50, 10, 5, 35).project(0).unwrap();
        assert_eq!(p.admin_amount, Paise::ZERO);
        assert_eq!(p.agent_amount, Paise::ZERO);
        assert_eq!(p.user_amount, Paise::ZERO);
        assert_eq!(p.client_amount, Paise::ZERO);
    }

    #[test]
    fn projection_is_linear_in_minutes() {
        let s = split(60, 12, 8, 40);
        let once = s.project(7).unwrap();
        let twice = s.project(14).unwrap();
        assert_eq!(twice.admin_amount, once.admin_amount * 2);
        assert_eq!(twice.agent_amount, once.agent_amount * 2);
        assert_eq!(twice.user_amount, once.user_amount * 2);
        assert_eq!(twice.client_amount, once.client_amount * 2);
    }

    #[test]
    fn negative_minutes_are_rejected() {
        let err = split(50, 10, 5, 35).project(-1).unwrap_err();
        assert_eq!(err, CommissionError::InvalidDuration { minutes: -1 });
    }

    #[test]
    fn independent_default_template_is_valid() {
        assert!(DEFAULT_INDEPENDENT_SPLIT.validate(false).is_ok());
        assert!(DEFAULT_AGENT_SPLIT.validate(true).is_ok());
    }

    #[test]
    fn agent_share_on_independent_user_is_rejected() {
        // ₹15 admin + ₹5 agent + ₹30 user sums to the rate, but the user
        // has no agent to pay.
        let s = split(50, 15, 5, 30);
        let err = s.validate(false).unwrap_err();
        assert_eq!(
            err,
            CommissionError::AgentShareNotAllowed {
                agent_share: Paise::from_rupees(5)
            }
        );
    }

    #[test]
    fn sum_mismatch_reports_sum_and_expected() {
        let s = split(50, 10, 5, 30);
        let err = s.validate(true).unwrap_err();
        assert_eq!(
            err,
            CommissionError::SumMismatch {
                sum: Paise::from_rupees(45),
                expected: Paise::from_rupees(50),
            }
        );
        let message = err.to_string();
        assert!(message.contains("sum=₹45"), "diagnostic was: {message}");
        assert!(message.contains("expected=₹50"), "diagnostic was: {message}");
    }

    #[test]
    fn fractional_rupee_shares_stay_exact() {
        // ₹0.50 + ₹0.25 + ₹0.25 == ₹1.00 holds exactly in paise where a
        // float representation would drift.
        let s = CommissionSplit {
            client_rate_per_minute: Paise(100),
            admin_share: Paise(50),
            agent_share: Paise(25),
            user_share: Paise(25),
        };
        assert!(s.validate(true).is_ok());
    }

    #[test]
    fn negative_share_is_rejected() {
        let s = CommissionSplit {
            client_rate_per_minute: Paise::from_rupees(50),
            admin_share: Paise::from_rupees(-10),
            agent_share: Paise::from_rupees(25),
            user_share: Paise::from_rupees(35),
        };
        let err = s.validate(true).unwrap_err();
        assert!(matches!(
            err,
            CommissionError::NegativeShare {
                field: "adminShare",
                ..
            }
        ));
    }

    #[test]
    fn zero_rate_is_rejected() {
        let s = split(0, 0, 0, 0);
        assert!(matches!(
            s.validate(true).unwrap_err(),
            CommissionError::NonPositiveRate { .. }
        ));
    }

    #[test]
    fn percentages_round_to_whole_points() {
        let s = split(50, 10, 5, 35);
        let pct = s.percentages();
        assert_eq!(pct.admin, 20);
        assert_eq!(pct.agent, 10);
        assert_eq!(pct.user, 70);
    }

    #[test]
    fn templates_match_user_kind() {
        assert_eq!(default_template(true), DEFAULT_AGENT_SPLIT);
        assert_eq!(default_template(false), DEFAULT_INDEPENDENT_SPLIT);
        assert_eq!(DEFAULT_INDEPENDENT_SPLIT.agent_share, Paise::ZERO);
    }

    #[test]
    fn split_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(split(50, 10, 5, 35)).unwrap();
        assert_eq!(json["clientRatePerMinute"], 5000);
        assert_eq!(json["adminShare"], 1000);
        assert_eq!(json["agentShare"], 500);
        assert_eq!(json["userShare"], 3500);
    }
}
