pub mod commission;
pub mod money;

pub use commission::{CommissionError, CommissionSplit, SplitProjection};
pub use money::Paise;
