/// Opaque identifier generation
///
/// Identifiers look like `p_Xy3-k_9Q`: a short entity prefix, an underscore
/// and eight characters drawn from `[A-Za-z0-9_-]` using the OS CSPRNG.
/// They appear directly in URL path segments.
use rand::{rngs::OsRng, Rng};

/// Prefix for post identifiers
pub const POST_ID_PREFIX: &str = "p";

/// Prefix for comment identifiers
pub const COMMENT_ID_PREFIX: &str = "c";

/// Length of the random part of an identifier
pub const TOKEN_LENGTH: usize = 8;

/// Insert attempts before an identifier collision is reported as a server error
pub const MAX_ID_ATTEMPTS: usize = 3;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a fresh identifier of the form `{prefix}_{token}`.
pub fn generate_id(prefix: &str) -> String {
    let mut rng = OsRng;
    let mut id = String::with_capacity(prefix.len() + 1 + TOKEN_LENGTH);
    id.push_str(prefix);
    id.push('_');
    for _ in 0..TOKEN_LENGTH {
        let idx = rng.gen_range(0..ALPHABET.len());
        id.push(ALPHABET[idx] as char);
    }
    id
}

/// Check that a value only uses path-safe identifier characters.
pub fn is_valid_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
