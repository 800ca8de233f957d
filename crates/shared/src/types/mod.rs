//! Common types used across the application.

pub mod id;
pub mod limit;
pub mod money;

pub use id::*;
pub use limit::ListLimit;
pub use money::{MAX_AMOUNT, format_eur_de, has_cent_precision, within_amount_limit};
