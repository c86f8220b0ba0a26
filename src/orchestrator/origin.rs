//! Origin map
//!
//! Maps a requested `/<app>/<stream>` location to the upstream URLs a
//! provider should pull from. Rules are matched first-match by byte prefix
//! in configuration order, and the part of the location that extends past
//! the matched prefix is spliced onto every upstream URL.

use crate::config::Origins;
use crate::error::{Error, Result};

/// One configured origin rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRule {
    location: String,
    scheme: String,
    url_templates: Vec<String>,
}

impl OriginRule {
    /// The location prefix this rule matches
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The scheme prepended to every resolved URL
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Upstream URL templates, without scheme prefix
    pub fn url_templates(&self) -> &[String] {
        &self.url_templates
    }
}

/// Result of resolving a location against the origin map
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    rule: OriginRule,
    urls: Vec<String>,
}

impl ResolvedLocation {
    /// The rule that matched
    pub fn rule(&self) -> &OriginRule {
        &self.rule
    }

    /// The scheme of the matched rule
    pub fn scheme(&self) -> &str {
        self.rule.scheme()
    }

    /// Concrete upstream URLs, in template order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// Ordered origin rules for the current configuration epoch
///
/// Immutable once built. Reconfiguration builds a fresh map and swaps it in
/// whole, so a concurrent reader sees either the old epoch or the new one,
/// never a mix.
#[derive(Debug, Default)]
pub(crate) struct OriginMap {
    rules: Vec<OriginRule>,
}

impl OriginMap {
    /// Build a map from configured origins, preserving configuration order
    ///
    /// Fails on the first invalid entry without producing a partial map.
    pub(crate) fn from_config(origins: &Origins) -> Result<Self> {
        let origin_list = origins.origin_list();
        let mut rules = Vec::with_capacity(origin_list.len());

        tracing::debug!(origins = origin_list.len(), "Building origin map");

        for origin in origin_list {
            if !origin.location().starts_with('/') {
                return Err(Error::invalid_origin_location(origin.location()));
            }
            if origin.pass().scheme().is_empty() {
                return Err(Error::empty_origin_scheme(origin.location()));
            }

            tracing::debug!(
                location = %origin.location(),
                scheme = %origin.pass().scheme(),
                urls = origin.pass().urls().len(),
                "Origin rule"
            );

            rules.push(OriginRule {
                location: origin.location().to_string(),
                scheme: origin.pass().scheme().to_string(),
                url_templates: origin.pass().urls().to_vec(),
            });
        }

        Ok(Self { rules })
    }

    /// Resolve an `(app, stream)` pair to its upstream URLs
    ///
    /// Prefix matching is byte-exact, not path-component aware: the rule
    /// `/app/stream` matches the location `/app/stream_o` and the suffix
    /// `_o` is appended to every URL. Downstream systems rely on this
    /// splice, so a match on `/app/stream` with templates
    /// `["origin:9000/other/and"]` and scheme `ovt` resolves
    /// `("app", "stream_o")` to `["ovt://origin:9000/other/and_o"]`.
    pub(crate) fn resolve(&self, app_name: &str, stream_name: &str) -> Option<ResolvedLocation> {
        let location = format!("/{app_name}/{stream_name}");

        for rule in &self.rules {
            let Some(suffix) = location.strip_prefix(rule.location.as_str()) else {
                continue;
            };

            tracing::debug!(
                location = %location,
                rule = %rule.location,
                suffix = %suffix,
                "Origin rule matched"
            );

            // A rule with no templates resolves to nothing. The search does
            // not continue past the first prefix match.
            if rule.url_templates.is_empty() {
                return None;
            }

            let urls = rule
                .url_templates
                .iter()
                .map(|template| format!("{}://{}{}", rule.scheme, template, suffix))
                .collect();

            return Some(ResolvedLocation {
                rule: rule.clone(),
                urls,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Origin, OriginPass};

    use super::*;

    fn single_rule_map() -> OriginMap {
        let origins = Origins::new().origin(Origin::new(
            "/app/stream",
            OriginPass::new("ovt").url("origin.example:9000/another/and"),
        ));
        OriginMap::from_config(&origins).unwrap()
    }

    #[test]
    fn test_suffix_splice() {
        let map = single_rule_map();

        let resolved = map.resolve("app", "stream_o").unwrap();
        assert_eq!(resolved.scheme(), "ovt");
        assert_eq!(
            resolved.urls(),
            ["ovt://origin.example:9000/another/and_o"]
        );
    }

    #[test]
    fn test_exact_match_has_empty_suffix() {
        let map = single_rule_map();

        let resolved = map.resolve("app", "stream").unwrap();
        assert_eq!(resolved.urls(), ["ovt://origin.example:9000/another/and"]);
    }

    #[test]
    fn test_prefix_match_is_byte_exact() {
        let map = single_rule_map();

        // Not path-component aware: any byte suffix after the prefix rides
        // along.
        assert!(map.resolve("app", "stream_o").is_some());
        assert!(map.resolve("app", "str").is_none());
        assert!(map.resolve("other", "stream").is_none());
    }

    #[test]
    fn test_first_match_wins_in_configuration_order() {
        let origins = Origins::new()
            .origin(Origin::new(
                "/app",
                OriginPass::new("rtsp").url("first:554/app"),
            ))
            .origin(Origin::new(
                "/app/stream",
                OriginPass::new("ovt").url("second:9000/app/stream"),
            ));
        let map = OriginMap::from_config(&origins).unwrap();

        // The broader rule is listed first, so it wins even though the
        // second rule matches more of the location.
        let resolved = map.resolve("app", "stream").unwrap();
        assert_eq!(resolved.scheme(), "rtsp");
        assert_eq!(resolved.urls(), ["rtsp://first:554/app/stream"]);
    }

    #[test]
    fn test_multiple_templates_resolve_in_order() {
        let origins = Origins::new().origin(Origin::new(
            "/app/stream",
            OriginPass::new("ovt")
                .url("primary:9000/app/stream")
                .url("backup:9000/app/stream"),
        ));
        let map = OriginMap::from_config(&origins).unwrap();

        let resolved = map.resolve("app", "stream_key").unwrap();
        assert_eq!(
            resolved.urls(),
            [
                "ovt://primary:9000/app/stream_key",
                "ovt://backup:9000/app/stream_key"
            ]
        );
    }

    #[test]
    fn test_empty_map_resolves_nothing() {
        let map = OriginMap::default();
        assert!(map.resolve("app", "stream").is_none());
    }

    #[test]
    fn test_rule_without_templates_never_matches() {
        let origins = Origins::new().origin(Origin::new("/app", OriginPass::new("ovt")));
        let map = OriginMap::from_config(&origins).unwrap();

        assert!(map.resolve("app", "stream").is_none());
    }

    #[test]
    fn test_invalid_location_is_rejected() {
        let origins = Origins::new().origin(Origin::new(
            "app/stream",
            OriginPass::new("ovt").url("origin:9000/app"),
        ));

        assert!(matches!(
            OriginMap::from_config(&origins),
            Err(Error::InvalidOriginLocation { .. })
        ));
    }

    #[test]
    fn test_empty_scheme_is_rejected() {
        let origins = Origins::new().origin(Origin::new(
            "/app/stream",
            OriginPass::new("").url("origin:9000/app"),
        ));

        assert!(matches!(
            OriginMap::from_config(&origins),
            Err(Error::EmptyOriginScheme { .. })
        ));
    }

    #[test]
    fn test_resolution_is_pure() {
        let map = single_rule_map();

        let first = map.resolve("app", "stream_o").unwrap();
        let second = map.resolve("app", "stream_o").unwrap();
        assert_eq!(first.urls(), second.urls());
        assert_eq!(first.rule(), second.rule());
    }
}
