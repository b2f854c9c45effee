use axum::http::HeaderMap;

use backend_domain::{RuntimeConfig, UserRef};

/// Bearer-token gate. No configured token means the instance is open
/// (local/dev deployments).
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// The identity provider's opaque user reference, forwarded by the client
/// in `X-User-Ref`. This service never authenticates; it only attaches the
/// reference to lost reports for lookups.
pub fn extract_user_ref(headers: &HeaderMap) -> Option<UserRef> {
    let value = headers.get("X-User-Ref")?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(UserRef(value.to_string()))
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
