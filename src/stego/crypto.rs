// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Password envelope for payload encryption.
//!
//! The envelope is self-describing text, embedded in place of the message:
//!
//! ```text
//! base64( salt[16] || iv[16] || AES-256-CBC-PKCS7(plaintext) )
//! ```
//!
//! The AES key is PBKDF2-HMAC-SHA256(password, salt) with 100,000 rounds.
//! Salt and IV are drawn fresh from the thread-local CSPRNG for every
//! envelope. Round count, hash, salt and IV sizes are part of the wire format
//! and must not change.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;
/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;
/// PBKDF2-HMAC-SHA256 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Derive the AES-256 key from password + salt.
///
/// Deterministic given its inputs, so any implementation using the same
/// parameters recovers the same key.
pub fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    derive_key_rounds(password, salt, KDF_ITERATIONS)
}

fn derive_key_rounds(password: &str, salt: &[u8], rounds: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut *key);
    key
}

/// Encrypt `plaintext` under `password` into a base64 envelope.
///
/// Each call draws a new random salt and IV, so sealing the same plaintext
/// twice yields different envelopes.
pub fn seal(plaintext: &[u8], password: &str) -> Vec<u8> {
    use rand::RngCore;
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);

    seal_with(plaintext, password, &salt, &iv)
}

/// Encrypt with caller-provided salt and IV.
///
/// Only for reproducible vectors. Reusing a salt/IV pair for the same
/// password leaks plaintext equality.
pub fn seal_with(
    plaintext: &[u8],
    password: &str,
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
) -> Vec<u8> {
    let key = derive_key(password, salt);
    let cipher = Aes256CbcEnc::new_from_slices(&*key, iv).expect("valid key and IV length");
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut raw = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
    raw.extend_from_slice(salt);
    raw.extend_from_slice(iv);
    raw.extend_from_slice(&ciphertext);

    STANDARD.encode(raw).into_bytes()
}

/// Decrypt a base64 envelope produced by [`seal`].
///
/// # Errors
/// [`StegoError::DecryptionFailed`] for invalid base64, a truncated
/// envelope, a ciphertext that is not whole blocks, or bad padding. A wrong
/// password shows up as bad padding; the caller cannot tell which case
/// occurred.
pub fn open(envelope: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    let raw = STANDARD.decode(envelope).map_err(|_| StegoError::DecryptionFailed)?;
    if raw.len() < SALT_LEN + IV_LEN {
        return Err(StegoError::DecryptionFailed);
    }

    let (salt, rest) = raw.split_at(SALT_LEN);
    let (iv, ciphertext) = rest.split_at(IV_LEN);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(StegoError::DecryptionFailed);
    }

    let key = derive_key(password, salt);
    let cipher = Aes256CbcDec::new_from_slices(&*key, iv).map_err(|_| StegoError::DecryptionFailed)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}
