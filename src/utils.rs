use base64::{Engine, engine::general_purpose::STANDARD};

/// Upper bound for upstream bodies carried inside errors.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Value for an HTTP Basic `Authorization` header.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Cuts `body` down to at most `max_chars` characters, marking the cut.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Percent-encodes every reserved character, `/` and `:` included.
pub fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
