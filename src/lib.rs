#![doc(test(attr(deny(warnings))))]

//! Payday Core is a pay-cycle budgeting engine: cycle boundaries from a payday,
//! daily or weekly allowances, an expense ledger with recurring spends, traffic-light
//! status, and overspend redistribution across the rest of the cycle.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod notify;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Payday Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
