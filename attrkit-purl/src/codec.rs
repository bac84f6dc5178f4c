use crate::encoding::{decode, encode};
use crate::error::ParseError;
use attrkit_types::DEFAULT_PACKAGE_TYPE;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Structured form of a package URL.
///
/// `package_type` is always set. Empty optional strings are treated like `None` when generating,
/// and qualifiers with empty values are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub qualifiers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

fn default_package_type() -> String {
    DEFAULT_PACKAGE_TYPE.to_string()
}

impl Default for PackageDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_TYPE)
    }
}

impl PackageDescriptor {
    pub fn new(package_type: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            namespace: None,
            name: None,
            version: None,
            qualifiers: BTreeMap::new(),
            subpath: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers.insert(key.into(), value.into());
        self
    }

    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = Some(subpath.into());
        self
    }

    /// Checks that [`generate`] emits a string that parses back: a well-formed type (a blank one
    /// falls back to `generic`) and qualifier keys that stay distinct once lowercased.
    pub fn validate(&self) -> Result<(), ParseError> {
        let package_type = self.package_type.trim();
        if !package_type.is_empty() {
            parse_type(package_type)?;
        }

        let mut seen = BTreeSet::new();
        for (key, value) in self.qualifiers.iter().filter(|(_, v)| !v.is_empty()) {
            let lowered = key.to_ascii_lowercase();
            if !is_valid_qualifier_key(&lowered) {
                return Err(ParseError::InvalidQualifier {
                    pair: format!("{}={}", key, value),
                });
            }
            if !seen.insert(lowered.clone()) {
                return Err(ParseError::DuplicateQualifier { key: lowered });
            }
        }
        Ok(())
    }

    /// A descriptor without a name parses fine but cannot identify a package.
    pub fn is_complete(&self) -> bool {
        present(self.name.as_deref()).is_some()
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate(self))
    }
}

impl FromStr for PackageDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses `pkg:type/namespace/name@version?qualifiers#subpath`.
///
/// Only the type is mandatory. The `@version` separator is looked up in the last path segment,
/// so an unencoded `@` in a namespace (`pkg:npm/@scope/pkg`) still parses. A trailing `/`
/// leaves the name empty, which parses as an incomplete descriptor.
pub fn parse(input: &str) -> Result<PackageDescriptor, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (rest, raw_subpath) = match trimmed.rsplit_once('#') {
        Some((rest, subpath)) => (rest, Some(subpath)),
        None => (trimmed, None),
    };
    let (rest, raw_qualifiers) = match rest.rsplit_once('?') {
        Some((rest, qualifiers)) => (rest, Some(qualifiers)),
        None => (rest, None),
    };

    let (scheme, rest) = rest
        .split_once(':')
        .ok_or_else(|| ParseError::MissingScheme {
            input: trimmed.to_string(),
        })?;
    if !scheme.eq_ignore_ascii_case(crate::SCHEME) {
        return Err(ParseError::InvalidScheme {
            scheme: scheme.to_string(),
        });
    }

    let rest = rest.trim_start_matches('/');
    let (raw_type, path) = match rest.split_once('/') {
        Some((t, path)) => (t, path),
        None => (rest, ""),
    };

    let mut descriptor = PackageDescriptor::new(parse_type(raw_type)?);

    let (raw_namespace, last_segment) = match path.rsplit_once('/') {
        Some((namespace, last)) => (namespace, last),
        None => ("", path),
    };
    let (raw_name, raw_version) = match last_segment.rsplit_once('@') {
        Some((name, version)) => (name, Some(version)),
        None => (last_segment, None),
    };

    descriptor.namespace = parse_segments(raw_namespace)?;
    descriptor.name = non_empty(decode(raw_name)?);
    descriptor.version = match raw_version {
        Some(v) => non_empty(decode(v)?),
        None => None,
    };
    if let Some(q) = raw_qualifiers {
        descriptor.qualifiers = parse_qualifiers(q)?;
    }
    if let Some(s) = raw_subpath {
        descriptor.subpath = parse_segments(s)?;
    }

    Ok(descriptor)
}

/// Canonical string form. Never fails.
///
/// The output is only guaranteed to parse for descriptors that pass
/// [`PackageDescriptor::validate`]. Qualifier keys that collide once lowercased keep the value of
/// the key that sorts last.
///
/// Qualifier keys are lowercased and emitted in ascending order. When a namespace or version is
/// present without a name, the name slot is kept empty (`pkg:npm/ns/`) so the string parses back
/// to the same descriptor.
pub fn generate(descriptor: &PackageDescriptor) -> String {
    let package_type = match descriptor.package_type.trim() {
        "" => DEFAULT_PACKAGE_TYPE.to_string(),
        t => t.to_ascii_lowercase(),
    };

    let mut out = format!("{}:{}", crate::SCHEME, package_type);

    let namespace: Vec<String> = present(descriptor.namespace.as_deref())
        .map(|ns| {
            ns.split('/')
                .filter(|segment| keep_segment(segment))
                .map(encode)
                .collect()
        })
        .unwrap_or_default();
    let name = present(descriptor.name.as_deref());
    let version = present(descriptor.version.as_deref());

    if !namespace.is_empty() || name.is_some() || version.is_some() {
        out.push('/');
        for segment in &namespace {
            out.push_str(segment);
            out.push('/');
        }
        if let Some(name) = name {
            out.push_str(&encode(name));
        }
        if let Some(version) = version {
            out.push('@');
            out.push_str(&encode(version));
        }
    }

    out.push_str(&appendix(descriptor));
    out
}

/// `generate(parse(input))`.
pub fn normalize(input: &str) -> Result<String, ParseError> {
    parse(input).map(|descriptor| generate(&descriptor))
}

/// `?qualifiers#subpath` part of the canonical form; empty when neither is present.
pub(crate) fn appendix(descriptor: &PackageDescriptor) -> String {
    let mut out = String::new();

    let qualifiers: BTreeMap<String, &str> = descriptor
        .qualifiers
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_ascii_lowercase(), value.as_str()))
        .collect();
    if !qualifiers.is_empty() {
        let pairs: Vec<String> = qualifiers
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect();
        out.push('?');
        out.push_str(&pairs.join("&"));
    }

    if let Some(subpath) = present(descriptor.subpath.as_deref()) {
        let segments: Vec<String> = subpath
            .split('/')
            .filter(|segment| keep_segment(segment))
            .map(encode)
            .collect();
        if !segments.is_empty() {
            out.push('#');
            out.push_str(&segments.join("/"));
        }
    }

    out
}

fn parse_type(raw: &str) -> Result<String, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MissingType);
    }
    let mut chars = raw.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'));
    if !valid {
        return Err(ParseError::InvalidType {
            value: raw.to_string(),
        });
    }
    Ok(raw.to_ascii_lowercase())
}

/// Decodes `/`-separated segments, dropping empty, `.` and `..` ones.
fn parse_segments(raw: &str) -> Result<Option<String>, ParseError> {
    let mut segments = Vec::new();
    for raw_segment in raw.split('/') {
        let segment = decode(raw_segment)?;
        if segment.contains('/') {
            return Err(ParseError::InvalidSegment {
                segment: raw_segment.to_string(),
            });
        }
        if keep_segment(&segment) {
            segments.push(segment);
        }
    }
    Ok(non_empty(segments.join("/")))
}

fn keep_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

fn parse_qualifiers(raw: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let mut qualifiers = BTreeMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ParseError::InvalidQualifier {
                pair: pair.to_string(),
            })?;
        let key = key.to_ascii_lowercase();
        if !is_valid_qualifier_key(&key) {
            return Err(ParseError::InvalidQualifier {
                pair: pair.to_string(),
            });
        }
        let value = decode(value)?;
        if value.is_empty() {
            continue;
        }
        if qualifiers.insert(key.clone(), value).is_some() {
            return Err(ParseError::DuplicateQualifier { key });
        }
    }
    Ok(qualifiers)
}

fn is_valid_qualifier_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_name_and_version() {
        let d = parse("pkg:npm/react@16.5.0").unwrap();
        assert_eq!(d, PackageDescriptor::new("npm").with_name("react").with_version("16.5.0"));
        assert_eq!(generate(&d), "pkg:npm/react@16.5.0");
    }

    #[test]
    fn decodes_scoped_namespace() {
        let d = parse("pkg:npm/%40scope/pkg@1.0.0").unwrap();
        assert_eq!(d.namespace.as_deref(), Some("@scope"));
        assert_eq!(d.name.as_deref(), Some("pkg"));
        assert_eq!(d.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn accepts_unencoded_at_in_namespace() {
        let d = parse("pkg:npm/@scope/pkg").unwrap();
        assert_eq!(d.namespace.as_deref(), Some("@scope"));
        assert_eq!(d.name.as_deref(), Some("pkg"));
        assert!(d.version.is_none());
        assert_eq!(generate(&d), "pkg:npm/%40scope/pkg");
    }

    #[test]
    fn type_only_is_minimal() {
        let d = PackageDescriptor::new("maven");
        assert_eq!(generate(&d), "pkg:maven");
        assert_eq!(parse("pkg:maven").unwrap(), d);
    }

    #[test]
    fn default_descriptor_is_generic() {
        assert_eq!(generate(&PackageDescriptor::default()), "pkg:generic");
    }

    #[test]
    fn blank_type_falls_back_to_generic() {
        let d = PackageDescriptor::new("  ").with_name("x");
        assert_eq!(generate(&d), "pkg:generic/x");
    }

    #[test]
    fn qualifiers_are_sorted_and_lowercased() {
        let d = parse("pkg:deb/debian/curl@7.50?Distro=jessie&arch=i386").unwrap();
        assert_eq!(d.qualifiers.get("distro").map(String::as_str), Some("jessie"));
        assert_eq!(generate(&d), "pkg:deb/debian/curl@7.50?arch=i386&distro=jessie");
    }

    #[test]
    fn empty_qualifier_values_are_dropped() {
        assert_eq!(normalize("pkg:npm/a?x=&y=1").unwrap(), "pkg:npm/a?y=1");
    }

    #[test]
    fn subpath_drops_dot_segments() {
        let d =
            parse("pkg:golang/google.golang.org/genproto#/googleapis/./api/../annotations/")
                .unwrap();
        assert_eq!(d.subpath.as_deref(), Some("googleapis/api/annotations"));
        assert_eq!(d.namespace.as_deref(), Some("google.golang.org"));
    }

    #[test]
    fn namespace_without_name_keeps_trailing_slash() {
        let d = parse("pkg:npm/ns/").unwrap();
        assert_eq!(d.namespace.as_deref(), Some("ns"));
        assert!(d.name.is_none());
        assert!(!d.is_complete());
        assert_eq!(generate(&d), "pkg:npm/ns/");
    }

    #[test]
    fn version_without_name_round_trips() {
        let d = PackageDescriptor::new("npm").with_version("1.0");
        let s = generate(&d);
        assert_eq!(s, "pkg:npm/@1.0");
        assert_eq!(parse(&s).unwrap(), d);
    }

    #[test]
    fn scheme_is_case_insensitive_and_slashes_are_skipped() {
        assert_eq!(normalize("PKG://NPM/react").unwrap(), "pkg:npm/react");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            parse("npm/react"),
            Err(ParseError::MissingScheme { .. })
        ));
    }

    #[test]
    fn rejects_other_scheme() {
        assert!(matches!(
            parse("http://example.com"),
            Err(ParseError::InvalidScheme { .. })
        ));
    }

    #[test]
    fn rejects_missing_and_invalid_type() {
        assert_eq!(parse("pkg:"), Err(ParseError::MissingType));
        assert!(matches!(parse("pkg:1npm/x"), Err(ParseError::InvalidType { .. })));
        assert!(matches!(parse("pkg:np m/x"), Err(ParseError::InvalidType { .. })));
    }

    #[test]
    fn rejects_malformed_percent_encoding() {
        assert!(matches!(
            parse("pkg:npm/re%zzact"),
            Err(ParseError::InvalidPercentEncoding { .. })
        ));
        assert!(parse("pkg:npm/react@1.0%").is_err());
    }

    #[test]
    fn rejects_encoded_slash_in_namespace() {
        assert!(matches!(
            parse("pkg:npm/a%2Fb/c"),
            Err(ParseError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn encoded_slash_in_name_survives() {
        assert_eq!(parse("pkg:npm/a%2Fb").unwrap().name.as_deref(), Some("a/b"));
        assert_eq!(normalize("pkg:npm/a%2Fb").unwrap(), "pkg:npm/a%2Fb");
    }

    #[test]
    fn rejects_bad_qualifiers() {
        assert!(matches!(
            parse("pkg:npm/a?novalue"),
            Err(ParseError::InvalidQualifier { .. })
        ));
        assert!(matches!(
            parse("pkg:npm/a?1x=y"),
            Err(ParseError::InvalidQualifier { .. })
        ));
        assert_eq!(
            parse("pkg:npm/a?k=1&K=2"),
            Err(ParseError::DuplicateQualifier {
                key: "k".to_string()
            })
        );
    }

    #[test]
    fn dot_segments_are_dropped_from_generated_namespace() {
        let d = PackageDescriptor::new("npm")
            .with_namespace("a/./b/../c")
            .with_name("x");
        assert_eq!(generate(&d), "pkg:npm/a/b/c/x");
        assert_eq!(normalize(&generate(&d)).unwrap(), generate(&d));
    }

    #[test]
    fn validate_rejects_what_parse_would_reject() {
        let bad_type = PackageDescriptor::new("n pm").with_name("x");
        assert!(matches!(bad_type.validate(), Err(ParseError::InvalidType { .. })));

        let bad_key = PackageDescriptor::new("npm").with_name("x").with_qualifier("1x", "y");
        assert_eq!(
            bad_key.validate(),
            Err(ParseError::InvalidQualifier {
                pair: "1x=y".to_string()
            })
        );

        let colliding = PackageDescriptor::new("npm")
            .with_name("x")
            .with_qualifier("K", "1")
            .with_qualifier("k", "2");
        assert_eq!(
            colliding.validate(),
            Err(ParseError::DuplicateQualifier {
                key: "k".to_string()
            })
        );
    }

    #[test]
    fn validate_accepts_blank_type_and_empty_qualifier_values() {
        let d = PackageDescriptor::new(" ")
            .with_name("x")
            .with_qualifier("1x", "");
        assert_eq!(d.validate(), Ok(()));
        assert_eq!(generate(&d), "pkg:generic/x");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn display_and_from_str_agree_with_codec() {
        let d: PackageDescriptor = "pkg:cargo/serde@1.0.228".parse().unwrap();
        assert_eq!(d.to_string(), "pkg:cargo/serde@1.0.228");
    }
}
