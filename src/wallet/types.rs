//! Wallet-side types and error definitions.

use thiserror::Error;

/// Errors from key handling, address derivation and offline signing.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Private key is not 32 bytes of hex or not a valid secp256k1 scalar.
    #[error("Invalid private key format: {0}")]
    InvalidKeyFormat(String),

    /// Public key byte length is not 33, 64 or 65.
    #[error("Invalid public key length: {0} bytes")]
    InvalidPublicKeyLength(usize),

    /// Public key bytes are not hex or do not decode to a curve point.
    #[error("Invalid public key encoding: {0}")]
    InvalidPublicKeyEncoding(String),

    /// The signature step rejected the transaction.
    #[error("Signing failed: {0}")]
    SigningFailure(String),

    /// The OS random number generator failed.
    #[error("Entropy source failure: {0}")]
    Entropy(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::InvalidPublicKeyLength(31);
        assert_eq!(err.to_string(), "Invalid public key length: 31 bytes");

        let err = WalletError::SigningFailure("chain id mismatch".into());
        assert!(err.to_string().contains("chain id mismatch"));
    }
}
