//! Key generation, key decoding and address derivation.
//!
//! # Security
//! - Private keys are never logged or included in `Debug` output
//! - Exported key strings are zeroized on drop
//! - Scratch buffers holding raw key bytes are zeroized on drop

use std::fmt;

use alloy::hex;
use alloy::primitives::Address;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::wallet::types::{WalletError, WalletResult};

/// A secp256k1 key pair and its Ethereum address.
#[derive(Clone)]
pub struct KeyMaterial {
    secret: SecretKey,
    public: PublicKey,
    address: Address,
}

impl KeyMaterial {
    /// Generate a fresh key pair from the OS random number generator.
    pub fn generate() -> WalletResult<Self> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        loop {
            OsRng
                .try_fill_bytes(&mut bytes[..])
                .map_err(|e| WalletError::Entropy(e.to_string()))?;

            // Zero and values at or above the curve order are rejected; draw again.
            if let Ok(secret) = SecretKey::from_slice(&bytes[..]) {
                let key = Self::from_secret(secret);
                tracing::debug!(address = %key.address, "Generated key pair");
                return Ok(key);
            }
        }
    }

    /// Decode a hex private key (with or without `0x`).
    pub fn from_private_key_hex(private_key_hex: &str) -> WalletResult<Self> {
        parse_private_key(private_key_hex).map(Self::from_secret)
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        let address = address_of(&public);
        Self {
            secret,
            public,
            address,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed address.
    pub fn checksum_address(&self) -> String {
        self.address.to_checksum(None)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Uncompressed public key without the `04` prefix, as lowercase hex.
    pub fn public_key_hex(&self) -> String {
        let point = self.public.to_encoded_point(false);
        hex::encode(&point.as_bytes()[1..])
    }

    /// SEC1 compressed public key (33 bytes) as lowercase hex.
    pub fn compressed_public_key_hex(&self) -> String {
        hex::encode(self.public.to_encoded_point(true).as_bytes())
    }

    /// Raw private key as 64 lowercase hex characters, no prefix.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret.to_bytes()))
    }

    /// Serializable record of all three values, for callers that persist keys.
    pub fn export(&self) -> ExportedKey {
        ExportedKey {
            private_key: self.private_key_hex().to_string(),
            public_key: self.public_key_hex(),
            address: self.checksum_address(),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Exported key triple. The caller owns its storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ExportedKey {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

impl fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedKey")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

/// Decode a 32-byte hex private key into a curve scalar.
pub fn parse_private_key(private_key_hex: &str) -> WalletResult<SecretKey> {
    let trimmed = private_key_hex.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytes = Zeroizing::new(
        hex::decode(stripped).map_err(|e| WalletError::InvalidKeyFormat(e.to_string()))?,
    );

    // k256 accepts short slices and left-pads them; require the full width.
    if bytes.len() != 32 {
        return Err(WalletError::InvalidKeyFormat(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    SecretKey::from_slice(&bytes).map_err(|_| {
        WalletError::InvalidKeyFormat("scalar is zero or not below the curve order".into())
    })
}

/// Derive the address of a raw public key.
///
/// Accepts SEC1 compressed (33 bytes) or uncompressed (65 bytes) encodings,
/// and 64-byte uncompressed keys without the `04` prefix.
pub fn address_from_public_key(public_key: &[u8]) -> WalletResult<Address> {
    let decoded = match public_key.len() {
        64 => {
            let mut prefixed = [0u8; 65];
            prefixed[0] = 0x04;
            prefixed[1..].copy_from_slice(public_key);
            PublicKey::from_sec1_bytes(&prefixed)
        }
        33 | 65 => PublicKey::from_sec1_bytes(public_key),
        len => return Err(WalletError::InvalidPublicKeyLength(len)),
    };

    let public = decoded.map_err(|_| {
        WalletError::InvalidPublicKeyEncoding("not a valid secp256k1 point".into())
    })?;
    Ok(address_of(&public))
}

/// Hex variant of [`address_from_public_key`], returning the EIP-55 string.
pub fn address_from_public_key_hex(public_key_hex: &str) -> WalletResult<String> {
    let trimmed = public_key_hex.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes =
        hex::decode(stripped).map_err(|e| WalletError::InvalidPublicKeyEncoding(e.to_string()))?;

    address_from_public_key(&bytes).map(|address| address.to_checksum(None))
}

fn address_of(public: &PublicKey) -> Address {
    let point = public.to_encoded_point(false);
    Address::from_raw_public_key(&point.as_bytes()[1..])
}
