//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `API-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// Sign a request for Kraken's private API.
///
/// # Arguments
///
/// * `secret` - The decoded API secret
/// * `url_path` - The API endpoint path (e.g., "/0/private/Balance")
/// * `nonce` - The nonce value carried in the body
/// * `post_data` - The exact URL-encoded POST body sent on the wire
///
/// # Example
///
/// ```rust
/// use kraken_rest_client::auth::sign_request;
///
/// let signature = sign_request(b"api_secret", "/0/private/Balance", 1234567890, b"nonce=1234567890");
/// assert_eq!(signature.len(), 88);
/// ```
pub fn sign_request(secret: &[u8], url_path: &str, nonce: u64, post_data: &[u8]) -> String {
    let mut sha256 = Sha256::new();
    sha256.update(nonce.to_string().as_bytes());
    sha256.update(post_data);
    let digest = sha256.finalize();

    let mut mac = <HmacSha512 as Mac>::new_from_slice(secret)
        .expect("HMAC-SHA512 accepts keys of any length");
    mac.update(url_path.as_bytes());
    mac.update(&digest);

    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(secret: &str) -> Vec<u8> {
        BASE64.decode(secret).unwrap()
    }

    #[test]
    fn test_documented_vector() {
        // Published example from Kraken's REST authentication guide.
        let secret = decode(
            "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==",
        );
        let signature = sign_request(
            &secret,
            "/0/private/AddOrder",
            1616492376594,
            b"nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25",
        );
        assert_eq!(
            signature,
            "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ=="
        );
    }

    #[test]
    fn test_balance_vector() {
        let secret = decode("dGVzdHNlY3JldA==");
        let signature = sign_request(
            &secret,
            "/0/private/Balance",
            1700000000000,
            b"nonce=1700000000000",
        );
        assert_eq!(
            signature,
            "DLZh84JEMeXY62GpdT6j9VYjz5XDOT62sOmrY+eaQyLFEASBYZn34rkT6RHb7mwdvVFDxZgCL2qMDaSsPxTfVg=="
        );
    }

    #[test]
    fn test_signature_consistency() {
        let secret = b"my_secret";
        let sig1 = sign_request(secret, "/0/private/TradeBalance", 12345, b"nonce=12345&asset=ZUSD");
        let sig2 = sign_request(secret, "/0/private/TradeBalance", 12345, b"nonce=12345&asset=ZUSD");
        assert_eq!(sig1, sig2);
        assert_eq!(BASE64.decode(&sig1).unwrap().len(), 64);
    }

    #[test]
    fn test_signature_covers_every_input() {
        let secret = b"my_secret";
        let base = sign_request(secret, "/0/private/Balance", 12345, b"nonce=12345");

        assert_ne!(base, sign_request(secret, "/0/private/Balance", 12346, b"nonce=12345"));
        assert_ne!(base, sign_request(secret, "/0/private/Ledgers", 12345, b"nonce=12345"));
        assert_ne!(base, sign_request(secret, "/0/private/Balance", 12345, b"nonce=12345&otp=1"));
        assert_ne!(base, sign_request(b"other", "/0/private/Balance", 12345, b"nonce=12345"));
    }
}
