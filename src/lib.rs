#![doc(test(attr(deny(warnings))))]

//! Ledger Core turns stored ledger entries and their recurrence rules into dated
//! occurrence streams, then filters, groups, and sums them for list, calendar,
//! and dashboard views.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod views;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
