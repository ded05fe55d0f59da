//! Tests for the Mixplan tracing setup.

use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::prelude::*;

use mixplan_core::tracing::setup::DEFAULT_DIRECTIVES;
use mixplan_core::tracing::{env_filter, init_tracing};

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_mixplan_log_debug() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MIXPLAN_LOG", "debug");
    init_tracing();
    std::env::remove_var("MIXPLAN_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_mixplan_log_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MIXPLAN_LOG", "this_is_garbage=not_a_level");
    init_tracing();
    std::env::remove_var("MIXPLAN_LOG");
}

/// Run `check` under a subscriber filtered by `directives` (or the fallback).
fn enabled_under(directives: Option<&str>, check: impl FnOnce() -> bool) -> bool {
    match directives {
        Some(d) => std::env::set_var("MIXPLAN_LOG", d),
        None => std::env::remove_var("MIXPLAN_LOG"),
    }
    let subscriber = tracing_subscriber::registry().with(env_filter());
    std::env::remove_var("MIXPLAN_LOG");
    tracing::subscriber::with_default(subscriber, check)
}

#[test]
fn test_mixplan_log_directives_are_applied() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MIXPLAN_LOG", "mixplan_engine=debug,mixplan_core=warn");
    let filter = env_filter();
    std::env::remove_var("MIXPLAN_LOG");
    let rendered = filter.to_string();
    assert!(rendered.contains("mixplan_engine=debug"), "got {rendered}");
    assert!(rendered.contains("mixplan_core=warn"), "got {rendered}");

    let engine_debug = enabled_under(Some("mixplan_engine=debug"), || {
        tracing::enabled!(target: "mixplan_engine::allocator", Level::DEBUG)
    });
    assert!(engine_debug);
}

#[test]
fn test_fallback_filter_is_info() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MIXPLAN_LOG", "this_is_garbage=not_a_level");
    let filter = env_filter();
    std::env::remove_var("MIXPLAN_LOG");
    assert_eq!(filter.to_string(), DEFAULT_DIRECTIVES);

    let (debug, info) = (
        enabled_under(None, || {
            tracing::enabled!(target: "mixplan_engine::allocator", Level::DEBUG)
        }),
        enabled_under(None, || {
            tracing::enabled!(target: "mixplan_engine::allocator", Level::INFO)
        }),
    );
    assert!(!debug);
    assert!(info);
}
