pub mod amount;
pub mod config;
pub mod constants;
pub mod contributions; // participant ledger
pub mod fees;
pub mod graduation;
pub mod metrics;
pub mod trades;        // price series from bonding-curve trades
pub mod utils;
pub mod vesting;
