#![no_main]

//! Fuzz target for package URL generation from arbitrary components.

use attrkit_purl::PackageDescriptor;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    package_type: String,
    namespace: Option<String>,
    name: Option<String>,
    version: Option<String>,
    qualifiers: Vec<(String, String)>,
    subpath: Option<String>,
}

fuzz_target!(|input: FuzzInput| {
    let descriptor = PackageDescriptor {
        package_type: input.package_type,
        namespace: input.namespace,
        name: input.name,
        version: input.version,
        qualifiers: input.qualifiers.into_iter().collect(),
        subpath: input.subpath,
    };

    // Generation never panics; parsing its output may still reject e.g. an invalid type.
    let purl = attrkit_purl::generate(&descriptor);
    let _ = attrkit_purl::parse(&purl);
});
