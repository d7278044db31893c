//! Coin recharges (client top-ups).

pub mod aggregate;

pub use aggregate::{
    PaymentMethod, Recharge, RechargeId, RechargeListItem, RechargeStats, RechargeStatus,
};
