//! Symmetric cipher for handshake payloads.
//!
//! AES-256-CBC with PKCS#7 padding. Every encryption draws a fresh random
//! 16-byte IV and prepends it to the ciphertext; the at-rest/in-transit
//! encoding is hexadecimal. Key material is normalized to exactly 32 bytes
//! (truncated if longer, zero-padded if shorter).

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};

use crate::error::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size; also the IV length prepended to every ciphertext.
pub const IV_LEN: usize = 16;

/// Cipher key length after normalization.
const KEY_LEN: usize = 32;

fn normalize_key(secret: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let take = secret.len().min(KEY_LEN);
    key[..take].copy_from_slice(&secret[..take]);
    key
}

/// Encrypt a byte payload. Output layout: `IV || ciphertext`.
pub fn encrypt(plaintext: &[u8], secret: &[u8]) -> Vec<u8> {
    let key = normalize_key(secret);
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    out
}

/// Decrypt `IV || ciphertext` produced by [`encrypt`].
///
/// Inputs shorter than one IV are rejected with an explicit format error;
/// bad padding or a truncated block surfaces as `DecryptionFailed`.
pub fn decrypt(data: &[u8], secret: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < IV_LEN {
        return Err(CryptoError::CiphertextTooShort {
            len: data.len(),
            min: IV_LEN,
        });
    }
    let key = normalize_key(secret);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&data[..IV_LEN]);

    Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&data[IV_LEN..])
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// Encrypt and hex-encode (the wire encoding).
pub fn encrypt_to_hex(plaintext: &[u8], secret: &[u8]) -> String {
    hex::encode(encrypt(plaintext, secret))
}

/// Hex-decode and decrypt.
pub fn decrypt_from_hex(encoded: &str, secret: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let data = hex::decode(encoded.trim()).map_err(|_| CryptoError::InvalidHex(encoded.into()))?;
    decrypt(&data, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [0x5A; 32];

    #[test]
    fn roundtrip() {
        let msg = b"authorize wallet session";
        let ct = encrypt(msg, &SECRET);
        assert_eq!(decrypt(&ct, &SECRET).unwrap(), msg);
    }

    #[test]
    fn roundtrip_empty_payload() {
        let ct = encrypt(b"", &SECRET);
        assert_eq!(decrypt(&ct, &SECRET).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn ciphertexts_differ_across_calls() {
        let msg = b"same plaintext";
        let c1 = encrypt(msg, &SECRET);
        let c2 = encrypt(msg, &SECRET);
        assert_ne!(c1, c2, "fresh IV per call");
        assert_eq!(decrypt(&c1, &SECRET).unwrap(), msg);
        assert_eq!(decrypt(&c2, &SECRET).unwrap(), msg);
    }

    #[test]
    fn short_secret_is_zero_padded() {
        let msg = b"short key";
        let ct = encrypt(msg, b"abc");
        let mut padded = [0u8; 32];
        padded[..3].copy_from_slice(b"abc");
        assert_eq!(decrypt(&ct, &padded).unwrap(), msg);
    }

    #[test]
    fn long_secret_is_truncated() {
        let long = [0x11u8; 48];
        let msg = b"long key";
        let ct = encrypt(msg, &long);
        assert_eq!(decrypt(&ct, &long[..32]).unwrap(), msg);
    }

    #[test]
    fn wrong_key_fails() {
        let ct = encrypt(b"secret message", &SECRET);
        let result = decrypt(&ct, &[0x00; 32]);
        // CBC has no authentication: a wrong key yields either a padding
        // error or garbage that is not the original plaintext.
        match result {
            Err(CryptoError::DecryptionFailed) => {}
            Ok(garbage) => assert_ne!(garbage, b"secret message"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn too_short_input_rejected() {
        assert!(matches!(
            decrypt(&[0u8; 15], &SECRET),
            Err(CryptoError::CiphertextTooShort { len: 15, min: 16 })
        ));
    }

    #[test]
    fn hex_roundtrip() {
        let msg = b"hex wire format";
        let encoded = encrypt_to_hex(msg, &SECRET);
        assert!(encoded.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(decrypt_from_hex(&encoded, &SECRET).unwrap(), msg);
    }

    #[test]
    fn hex_rejects_non_hex() {
        assert!(matches!(
            decrypt_from_hex("not hex!", &SECRET),
            Err(CryptoError::InvalidHex(_))
        ));
    }
}
