pub mod dto;

pub use dto::OverviewResponse;
