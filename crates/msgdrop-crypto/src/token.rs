use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Random bytes per token. 18 bytes encode to exactly 24 URL-safe characters.
pub const TOKEN_BYTES: usize = 18;

/// Longest token worth hashing. Issued tokens are 24 characters; anything
/// past this bound cannot match and is refused before the slow hash runs.
pub const MAX_TOKEN_LEN: usize = 64;

/// Generate a fresh bearer token from the thread-local CSPRNG.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
