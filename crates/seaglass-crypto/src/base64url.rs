use base64ct::{Base64UrlUnpadded, Encoding};

/// Base64url encode bytes without padding.
pub fn base64url_encode(data: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(data)
}

/// Base64url decode a string to bytes.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64UrlUnpadded::decode_vec(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_round_trips() {
        // A persisted attempt seed: 32 bytes encode to 43 chars and back
        let seed = [0xa7u8; 32];
        let encoded = base64url_encode(&seed);
        assert_eq!(encoded.len(), 43);
        assert_eq!(base64url_decode(&encoded).unwrap(), seed);
    }

    #[test]
    fn nonce_sized_digest_has_no_padding() {
        // 32-byte digests are what compute_nonce encodes; never padded
        let encoded = base64url_encode(&[0u8; 32]);
        assert!(!encoded.contains('='));
        assert_eq!(encoded.len(), 43);
    }

    #[test]
    fn output_survives_a_url_fragment() {
        // Nonces travel inside OAuth URLs: no +, /, or = may appear
        let encoded = base64url_encode(&[0xfb, 0xff, 0xfe, 0x3e, 0x3f]);
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn rejects_standard_alphabet() {
        assert!(base64url_decode("a+b/").is_err());
    }

    #[test]
    fn rejects_padded_input() {
        assert!(base64url_decode("YWI=").is_err());
    }

    #[test]
    fn known_vector() {
        assert_eq!(base64url_encode(b"seaglass"), "c2VhZ2xhc3M");
        assert_eq!(base64url_decode("c2VhZ2xhc3M").unwrap(), b"seaglass");
    }
}
