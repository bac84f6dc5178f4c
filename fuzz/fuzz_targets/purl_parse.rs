#![no_main]

//! Fuzz target for package URL parsing.
//!
//! Any accepted input must normalize to a fixed point.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    let Ok(descriptor) = attrkit_purl::parse(s) else { return };
    let canonical = attrkit_purl::generate(&descriptor);
    let again = attrkit_purl::normalize(&canonical).expect("canonical form must parse");
    assert_eq!(canonical, again);
});
