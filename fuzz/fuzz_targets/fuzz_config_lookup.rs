//! Fuzz target: environment resolution with arbitrary values.
//!
//! Whatever the operator puts in `PORT`, `HOST` or `UPSTREAM_TIMEOUT_MS`,
//! resolution returns a value or an error, never a panic.

#![no_main]

use edge_core::EdgeConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data).into_owned();
    let _ = EdgeConfig::from_lookup(|key| match key {
        "PORT" | "HOST" | "UPSTREAM_TIMEOUT_MS" | "API_BASE" => Some(raw.clone()),
        _ => None,
    });
});
