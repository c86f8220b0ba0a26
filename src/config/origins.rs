//! Origin configuration
//!
//! An origin maps a virtual location prefix (`/<app>/<stream-prefix>`) to a
//! list of upstream URL templates reachable under a single scheme. The order
//! of origins is semantic: resolution is first-match by prefix, so the
//! configuration order is preserved everywhere.

/// Ordered collection of configured origins
#[derive(Debug, Clone, Default)]
pub struct Origins {
    origins: Vec<Origin>,
}

impl Origins {
    /// Create an empty origin list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an origin, preserving configuration order
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origins.push(origin);
        self
    }

    /// The configured origins, in configuration order
    pub fn origin_list(&self) -> &[Origin] {
        &self.origins
    }
}

/// A single origin entry
#[derive(Debug, Clone)]
pub struct Origin {
    location: String,
    pass: OriginPass,
}

impl Origin {
    /// Create an origin for a location prefix
    ///
    /// The location must begin with `/` and has the shape
    /// `/<app>/<stream-prefix>`.
    pub fn new(location: impl Into<String>, pass: OriginPass) -> Self {
        Self {
            location: location.into(),
            pass,
        }
    }

    /// The location prefix
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The pass section (scheme and upstream URLs)
    pub fn pass(&self) -> &OriginPass {
        &self.pass
    }
}

/// The pass section of an origin: a scheme and the upstream URL templates
///
/// URL templates are stored without a scheme prefix. The scheme is prepended
/// at resolution time.
#[derive(Debug, Clone)]
pub struct OriginPass {
    scheme: String,
    urls: Vec<String>,
}

impl OriginPass {
    /// Create a pass section for a scheme
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            urls: Vec::new(),
        }
    }

    /// Append an upstream URL template (host, port and path, no scheme)
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// The scheme shared by all URLs of this pass
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The upstream URL templates, in configuration order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let origins = Origins::new()
            .origin(Origin::new(
                "/app/stream",
                OriginPass::new("ovt").url("origin-1:9000/app/stream"),
            ))
            .origin(Origin::new(
                "/app",
                OriginPass::new("rtsp")
                    .url("origin-2:554/app")
                    .url("origin-3:554/app"),
            ));

        let list = origins.origin_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].location(), "/app/stream");
        assert_eq!(list[0].pass().scheme(), "ovt");
        assert_eq!(list[1].pass().urls().len(), 2);
        assert_eq!(list[1].pass().urls()[1], "origin-3:554/app");
    }

    #[test]
    fn test_empty_origins() {
        let origins = Origins::new();
        assert!(origins.origin_list().is_empty());
    }
}
