use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use super::domain::AccessToken;

const TOKEN_BYTES: usize = 32;

/// Mint an unguessable URL-safe bearer token.
///
/// 32 bytes from the OS entropy source, encoded without padding so the token
/// can sit directly in a path segment. Tokens are never rotated; uniqueness
/// is enforced at the repository on insert.
pub fn mint_access_token() -> AccessToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    AccessToken(URL_SAFE_NO_PAD.encode(bytes))
}
