use crate::types::{non_blank, Hit};

use rand::Rng;

/// What a hit can learn from an inbound HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub path: String,
    pub remote_addr: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build a context from a path, peer address and header-getter closure.
    ///
    /// The getter receives lowercase header names.
    pub fn from_headers<F>(path: impl Into<String>, remote_addr: Option<String>, get_header: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            path: path.into(),
            remote_addr,
            user_agent: get_header("user-agent").filter(|ua| !ua.is_empty()),
        }
    }
}

/// Source of client identifiers for hits derived from a request.
pub trait ClientIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random integer in `[1, i32::MAX]`, rendered as decimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomClientId;

impl ClientIdGenerator for RandomClientId {
    fn generate(&self) -> String {
        rand::thread_rng().gen_range(1..=i32::MAX).to_string()
    }
}

impl<F> ClientIdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Derive a hit from a request, then apply every non-blank field of
/// `overrides` on top.
///
/// Derived defaults: a generated client ID, the request path as `page`, the
/// peer address as `user_ip` and the `User-Agent` header as `user_agent`.
/// Custom values are copied from `overrides` as a whole. Nothing is
/// validated here.
pub fn build_from_request(
    ctx: &RequestContext,
    overrides: &Hit,
    ids: &dyn ClientIdGenerator,
) -> Hit {
    let mut hit = Hit {
        client_id: Some(ids.generate()),
        page: Some(ctx.path.clone()),
        user_ip: ctx.remote_addr.clone(),
        user_agent: ctx.user_agent.clone(),
        ..Hit::default()
    };

    merge(&mut hit.version, &overrides.version);
    merge(&mut hit.tracking_id, &overrides.tracking_id);
    merge(&mut hit.client_id, &overrides.client_id);
    merge(&mut hit.hit_type, &overrides.hit_type);
    merge(&mut hit.page, &overrides.page);
    merge(&mut hit.user_ip, &overrides.user_ip);
    merge(&mut hit.user_agent, &overrides.user_agent);

    if !overrides.custom_values.is_empty() {
        hit.custom_values = overrides.custom_values.clone();
    }
    hit
}

fn merge(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = non_blank(value) {
        *target = Some(v.to_string());
    }
}
