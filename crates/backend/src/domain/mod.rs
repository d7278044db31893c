pub mod a001_agent;
pub mod a002_user;
pub mod a003_client;
pub mod a004_chat_session;
pub mod a005_recharge;
