//! Read-side projections over the domain registers.

pub mod p900_earnings_register;
