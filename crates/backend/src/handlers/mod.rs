pub mod a001_agent;
pub mod a002_user;
pub mod a003_client;
pub mod a004_chat_session;
pub mod a005_recharge;
pub mod commission;
pub mod d400_overview;
pub mod p900_earnings_register;
