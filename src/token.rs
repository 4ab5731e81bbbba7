use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use password_hash::rand_core::{OsRng, RngCore};

/// Length of a generated confirm key: 32 random bytes, base64url, no
/// padding. Fits the 64-char column with room to spare.
pub const CONFIRM_KEY_LEN: usize = 43;

/// Generate an opaque single-use key for email confirmation / credential
/// reset tokens.
pub fn new_confirm_key() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

#[cfg(test)]
mod tests {
    use super::{CONFIRM_KEY_LEN, new_confirm_key};

    #[test]
    fn keys_have_expected_length() {
        assert_eq!(new_confirm_key().len(), CONFIRM_KEY_LEN);
    }

    #[test]
    fn keys_are_url_safe() {
        let key = new_confirm_key();
        assert!(
            key.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn consecutive_keys_differ() {
        // 256 bits of entropy; a collision here means the generator is broken.
        let a = new_confirm_key();
        let b = new_confirm_key();
        assert_ne!(a, b);
    }
}
