//! Response classification

use super::records::extract_path;
use super::types::Classification;
use crate::config::ThrottleConfig;
use crate::http::RawResponse;
use serde_json::Value;
use std::time::Duration;

const EXCERPT_LEN: usize = 200;

/// Classifies raw responses according to the throttle policy
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    throttle: ThrottleConfig,
}

impl ResponseValidator {
    /// Create a validator for the given throttle policy
    pub fn new(throttle: ThrottleConfig) -> Self {
        Self { throttle }
    }

    /// Classify a response
    pub fn classify(&self, raw: &RawResponse) -> Classification {
        let status = raw.status;

        if self.throttle.statuses.contains(&status) {
            return Classification::RateLimited {
                retry_after: self.retry_after(raw),
            };
        }

        match status {
            401 | 403 => Classification::AuthFailed { status },
            404 => Classification::NotFound,
            400..=499 => Classification::InvalidRequest {
                status,
                message: raw.body_excerpt(EXCERPT_LEN),
            },
            500..=599 => Classification::ServerError { status },
            200..=299 => self.classify_body(raw),
            _ => Classification::Malformed {
                message: format!("unexpected HTTP status {status}"),
            },
        }
    }

    /// Remaining quota reported by a response, from the header or the quota field
    pub fn remaining_quota(&self, raw: &RawResponse, body: Option<&Value>) -> Option<u64> {
        let from_header = raw
            .header(&self.throttle.remaining_header)
            .and_then(|v| v.trim().parse::<u64>().ok());

        from_header.or_else(|| {
            let body = body?;
            let field = self.throttle.quota_field.as_deref()?;
            quota_value(body, field).and_then(|q| u64::try_from(q).ok())
        })
    }

    fn classify_body(&self, raw: &RawResponse) -> Classification {
        if raw.body.iter().all(u8::is_ascii_whitespace) {
            return Classification::Malformed {
                message: "empty response body".to_string(),
            };
        }

        let body: Value = match serde_json::from_slice(&raw.body) {
            Ok(body) => body,
            Err(e) => {
                return Classification::Malformed {
                    message: format!("body is not valid JSON: {e}"),
                }
            }
        };

        if let Some(field) = self.throttle.quota_field.as_deref() {
            if quota_value(&body, field).is_some_and(|q| q <= 0) {
                return Classification::RateLimited {
                    retry_after: self.retry_after(raw),
                };
            }
        }

        Classification::Success(body)
    }

    fn retry_after(&self, raw: &RawResponse) -> Option<Duration> {
        raw.header(&self.throttle.retry_after_header)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// Quota counters may arrive as numbers or numeric strings
fn quota_value(body: &Value, path: &str) -> Option<i64> {
    match extract_path(body, path)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
