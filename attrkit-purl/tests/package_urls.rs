use attrkit_purl::{PackageDescriptor, ParseError, apply_purl_edit, generate, normalize, parse};
use attrkit_types::PackageInfo;
use pretty_assertions::assert_eq;

#[test]
fn npm_package_with_version() {
    let d = parse("pkg:npm/react@16.5.0").unwrap();
    assert_eq!(d.package_type, "npm");
    assert_eq!(d.namespace, None);
    assert_eq!(d.name.as_deref(), Some("react"));
    assert_eq!(d.version.as_deref(), Some("16.5.0"));
    assert!(d.qualifiers.is_empty());
    assert_eq!(generate(&d), "pkg:npm/react@16.5.0");
}

#[test]
fn scoped_npm_namespace_is_percent_decoded() {
    let d = parse("pkg:npm/%40scope/pkg@1.0.0").unwrap();
    assert_eq!(d.namespace.as_deref(), Some("@scope"));
    assert_eq!(d.name.as_deref(), Some("pkg"));
    assert_eq!(generate(&d), "pkg:npm/%40scope/pkg@1.0.0");
}

#[test]
fn maven_with_qualifiers_and_subpath() {
    let s = "pkg:maven/org.apache.commons/io@1.3.4?type=jar&classifier=sources#src/main";
    let d = parse(s).unwrap();
    assert_eq!(d.namespace.as_deref(), Some("org.apache.commons"));
    assert_eq!(d.subpath.as_deref(), Some("src/main"));
    assert_eq!(
        normalize(s).unwrap(),
        "pkg:maven/org.apache.commons/io@1.3.4?classifier=sources&type=jar#src/main"
    );
}

#[test]
fn multi_segment_namespace() {
    let d = parse("pkg:golang/github.com/gorilla/context@234fd47e").unwrap();
    assert_eq!(d.namespace.as_deref(), Some("github.com/gorilla"));
    assert_eq!(d.name.as_deref(), Some("context"));
}

#[test]
fn missing_name_is_incomplete_not_an_error() {
    let d = parse("pkg:npm/").unwrap();
    assert!(!d.is_complete());
    assert_eq!(generate(&d), "pkg:npm");
}

#[test]
fn malformed_escape_is_a_parse_error() {
    let err = parse("pkg:pypi/dj%G0ngo").unwrap_err();
    assert!(matches!(err, ParseError::InvalidPercentEncoding { .. }));
}

#[test]
fn descriptor_serializes_type_field() {
    let d = PackageDescriptor::new("cargo").with_name("serde").with_version("1.0.0");
    let value = serde_json::to_value(&d).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "type": "cargo", "name": "serde", "version": "1.0.0" })
    );
}

#[test]
fn editing_then_displaying_reproduces_canonical_text() {
    let edit = apply_purl_edit(
        &PackageInfo::default(),
        "pkg:npm/%40angular/core@15.0.0?vcs_url=git%2Bhttps%3A%2F%2Fgithub.com",
    );
    let info = edit.package_info.unwrap();
    assert_eq!(
        attrkit_purl::purl_for_package_info(&info),
        "pkg:npm/%40angular/core@15.0.0?vcs_url=git%2Bhttps%3A%2F%2Fgithub.com"
    );
}

#[test]
fn descriptor_without_type_deserializes_as_generic() {
    let d: PackageDescriptor = serde_json::from_value(serde_json::json!({ "name": "x" })).unwrap();
    assert_eq!(d.package_type, "generic");
    assert_eq!(generate(&d), "pkg:generic/x");
}

#[test]
fn generated_namespace_is_canonical() {
    let d = PackageDescriptor::new("npm").with_namespace("a/./b").with_name("x");
    let s = generate(&d);
    assert_eq!(s, "pkg:npm/a/b/x");
    assert_eq!(normalize(&s).unwrap(), s);
}

#[test]
fn valid_descriptors_generate_parseable_strings() {
    let d = PackageDescriptor::new("NPM")
        .with_namespace("@scope")
        .with_name("x")
        .with_qualifier("Arch", "x86");
    assert_eq!(d.validate(), Ok(()));
    let s = generate(&d);
    assert_eq!(s, "pkg:npm/%40scope/x?arch=x86");
    assert_eq!(normalize(&s).unwrap(), s);
}

#[test]
fn invalid_descriptors_fail_validation_and_parsing_alike() {
    let cases = [
        PackageDescriptor::new("n pm").with_name("x"),
        PackageDescriptor::new("npm").with_name("x").with_qualifier("1x", "y"),
        PackageDescriptor::new("npm")
            .with_name("x")
            .with_qualifier("K", "1")
            .with_qualifier("k", "2"),
    ];
    for d in cases {
        assert!(d.validate().is_err(), "{d:?} should be rejected");
    }

    // Colliding keys still generate; the key sorting last keeps its value.
    let colliding = PackageDescriptor::new("npm")
        .with_name("x")
        .with_qualifier("K", "1")
        .with_qualifier("k", "2");
    assert_eq!(generate(&colliding), "pkg:npm/x?k=2");
    assert!(parse(&generate(&PackageDescriptor::new("n pm").with_name("x"))).is_err());
}
