//! PNG data URIs.

use base64::{Engine, engine::general_purpose::STANDARD};

const PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes in a `data:image/png;base64,...` URI.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!("{}{}", PREFIX, STANDARD.encode(bytes))
}

/// Recover the bytes of a URI produced by [`encode_data_uri`].
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(PREFIX)?;
    STANDARD.decode(payload).ok()
}
