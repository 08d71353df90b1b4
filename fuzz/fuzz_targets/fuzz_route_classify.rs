//! Fuzz target: allow-list classification of request targets.
//!
//! Arbitrary request targets must never panic the classifier, and a
//! target is only ever proxied when its path sits under an allow-listed
//! prefix.

#![no_main]

use edge_core::ProxyRoute;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(target) = std::str::from_utf8(data) else {
        return;
    };
    if ProxyRoute::classify_target(target).is_some() {
        let path = target.split_once('?').map_or(target, |(p, _)| p).to_ascii_lowercase();
        assert!(path.starts_with("/reclamos") || path.starts_with("/catalogos/"));
    }
});
