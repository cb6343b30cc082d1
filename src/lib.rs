#![doc(test(attr(deny(warnings))))]

//! chartbook keeps a hierarchical chart of accounts, assembles balance sheets
//! and income statements from entered line items, and exports them as PDF
//! reports. The terminal front end lives in [`cli`]; everything else is usable
//! without it.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod reports;
pub mod services;
pub mod statements;
pub mod storage;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing at the default level and emits a startup log.
pub fn init() {
    init_with_level(utils::DEFAULT_LOG_LEVEL);
}

/// Initializes global tracing with `level` as the default crate filter.
pub fn init_with_level(level: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(level);
        tracing::debug!("chartbook tracing initialized");
    });
}
