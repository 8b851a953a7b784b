//! Client-side intake flow: the three-step wizard state machine, the
//! holdings editor behind step two, and the static option catalogs.

pub mod controller;
pub mod holdings;
pub mod options;

pub use controller::{FormFlow, FormStep, SubmitBlocked};
pub use holdings::{format_usd, HoldingField, HoldingsEditor};
pub use options::{ANALYSIS_FEE_USDT, COIN_OPTIONS, PAYMENT_WALLET_ADDRESS};
