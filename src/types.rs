use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default collector base URL. `collect` and `batch` are resolved against it.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/";

/// Content type sent with every payload unless overridden.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A single analytics hit.
///
/// Every field is optional at the type level; blank and absent are treated
/// the same way. Required fields (`version`, `tracking_id`, `client_id`,
/// `hit_type`) are checked when the hit is encoded, not when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hit {
    /// Protocol version (`v`). Default: `"1"`.
    pub version: Option<String>,
    /// Property the hit is recorded against (`tid`).
    pub tracking_id: Option<String>,
    /// Anonymous visitor/session identifier (`cid`).
    pub client_id: Option<String>,
    /// Hit type (`t`). Default: `"pageview"`.
    pub hit_type: Option<String>,
    /// Document path (`dp`).
    pub page: Option<String>,
    /// IP address override (`uip`).
    pub user_ip: Option<String>,
    /// User agent override (`ua`).
    pub user_agent: Option<String>,
    /// Extra parameters, emitted verbatim after the standard ones in this order.
    /// Keys are not checked against the reserved parameter names.
    pub custom_values: Vec<(String, String)>,
}

impl Default for Hit {
    fn default() -> Self {
        Self {
            version: Some("1".to_string()),
            tracking_id: None,
            client_id: None,
            hit_type: Some("pageview".to_string()),
            page: None,
            user_ip: None,
            user_agent: None,
            custom_values: Vec::new(),
        }
    }
}

impl Hit {
    /// Create a pageview hit with the two required fields that have no default.
    pub fn new(tracking_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            tracking_id: Some(tracking_id.into()),
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    pub fn hit_type(mut self, hit_type: impl Into<String>) -> Self {
        self.hit_type = Some(hit_type.into());
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn user_ip(mut self, ip: impl Into<String>) -> Self {
        self.user_ip = Some(ip.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Append a custom parameter.
    pub fn custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_values.push((key.into(), value.into()));
        self
    }
}

/// Present and non-blank after trimming.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Configuration for [`MeasurementClient`](crate::MeasurementClient).
#[derive(Debug, Clone)]
pub struct Options {
    /// Collector base URL. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
    /// Timeout applied by the default transport. Default: 5s.
    pub timeout: Duration,
    /// `Content-Type` header for payloads. `None` leaves it to the transport.
    /// Default: [`FORM_CONTENT_TYPE`].
    pub content_type: Option<String>,
    /// Log every encoded payload at debug level.
    pub debug: bool,
}

impl Options {
    /// Options pointing at the default collector.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Options pointing at a custom collector; all others use defaults.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(5),
            content_type: Some(FORM_CONTENT_TYPE.to_string()),
            debug: false,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hit_has_version_and_pageview() {
        let hit = Hit::default();
        assert_eq!(hit.version.as_deref(), Some("1"));
        assert_eq!(hit.hit_type.as_deref(), Some("pageview"));
        assert!(hit.tracking_id.is_none());
        assert!(hit.custom_values.is_empty());
    }

    #[test]
    fn builder_sets_fields_in_order() {
        let hit = Hit::new("UA-1", "42")
            .hit_type("event")
            .page("/home")
            .custom("ec", "video")
            .custom("ea", "play");
        assert_eq!(hit.tracking_id.as_deref(), Some("UA-1"));
        assert_eq!(hit.client_id.as_deref(), Some("42"));
        assert_eq!(hit.hit_type.as_deref(), Some("event"));
        assert_eq!(hit.page.as_deref(), Some("/home"));
        assert_eq!(
            hit.custom_values,
            vec![
                ("ec".to_string(), "video".to_string()),
                ("ea".to_string(), "play".to_string())
            ]
        );
    }

    #[test]
    fn non_blank_treats_whitespace_as_absent() {
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some(String::new())), None);
        assert_eq!(non_blank(&Some("  \t".to_string())), None);
        assert_eq!(non_blank(&Some(" x ".to_string())), Some(" x "));
    }

    #[test]
    fn options_default_to_form_content_type() {
        let opts = Options::default();
        assert_eq!(opts.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(opts.content_type.as_deref(), Some(FORM_CONTENT_TYPE));
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert!(!opts.debug);
    }
}
