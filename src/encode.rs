//! Hit serialization.
//!
//! A hit becomes one `key=value&key=value` line. Standard parameters come
//! first in the fixed order of [`PARAMS`], followed by custom values in the
//! order the caller supplied them. Values are form-urlencoded (space becomes
//! `+`); keys are written as-is.

use crate::error::{Error, RequiredField, Result};
use crate::types::{non_blank, Hit};

use url::form_urlencoded::byte_serialize;

struct Param {
    key: &'static str,
    /// `Some` when the parameter must be present.
    required: Option<RequiredField>,
    value: fn(&Hit) -> Option<&str>,
}

const PARAMS: [Param; 7] = [
    Param {
        key: "v",
        required: Some(RequiredField::Version),
        value: |h| non_blank(&h.version),
    },
    Param {
        key: "tid",
        required: Some(RequiredField::TrackingId),
        value: |h| non_blank(&h.tracking_id),
    },
    Param {
        key: "cid",
        required: Some(RequiredField::ClientId),
        value: |h| non_blank(&h.client_id),
    },
    Param {
        key: "t",
        required: Some(RequiredField::HitType),
        value: |h| non_blank(&h.hit_type),
    },
    Param {
        key: "dp",
        required: None,
        value: |h| non_blank(&h.page),
    },
    Param {
        key: "uip",
        required: None,
        value: |h| non_blank(&h.user_ip),
    },
    Param {
        key: "ua",
        required: None,
        value: |h| non_blank(&h.user_agent),
    },
];

/// Check the required fields of a hit, stopping at the first missing one.
pub fn validate(hit: &Hit) -> Result<()> {
    hit_params(hit).map(|_| ())
}

/// Encode a hit into its ordered parameter list.
fn hit_params(hit: &Hit) -> Result<Vec<(&str, &str)>> {
    let mut params = Vec::with_capacity(PARAMS.len() + hit.custom_values.len());
    for param in &PARAMS {
        match ((param.value)(hit), param.required) {
            (Some(value), _) => params.push((param.key, value)),
            (None, Some(field)) => return Err(Error::MissingRequiredField { field }),
            (None, None) => {}
        }
    }
    for (key, value) in &hit.custom_values {
        params.push((key.as_str(), value.as_str()));
    }
    Ok(params)
}

/// Encode a hit into one query-string line.
pub fn encode_hit(hit: &Hit) -> Result<String> {
    let params = hit_params(hit)?;
    let mut line = String::new();
    for (i, (key, value)) in params.into_iter().enumerate() {
        if i > 0 {
            line.push('&');
        }
        line.push_str(key);
        line.push('=');
        line.extend(byte_serialize(value.as_bytes()));
    }
    Ok(line)
}

/// Encode hits into a newline-joined payload, in input order.
///
/// The first invalid hit aborts the whole batch.
pub fn encode_batch(hits: &[Hit]) -> Result<String> {
    if hits.is_empty() {
        return Err(Error::EmptyBatch);
    }
    let lines = hits.iter().map(encode_hit).collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}
