//! Offline transaction signing.
//!
//! # Responsibilities
//! - Describe an unsigned transaction independent of wire format
//! - Sign it for one chain with a hex private key
//! - Produce the EIP-2718 encoded bytes ready for `eth_sendRawTransaction`
//!
//! No network access happens here. Signing uses RFC 6979 nonces, so the same
//! inputs always produce the same bytes.

use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::hex;
use alloy::primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signer, SignerSync};

use crate::wallet::keys::parse_private_key;
use crate::wallet::types::{WalletError, WalletResult};

/// Gas pricing for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeParams {
    /// Pre-London single gas price, signed with EIP-155 replay protection.
    Legacy { gas_price: u128 },
    /// EIP-1559 fee cap and priority fee (tip cap).
    Eip1559 {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
}

impl FeeParams {
    /// Fee-market params with the cap set to `base_fee + tip`.
    pub fn eip1559_from_base(base_fee: u128, tip: u128) -> Self {
        FeeParams::Eip1559 {
            max_fee_per_gas: base_fee.saturating_add(tip),
            max_priority_fee_per_gas: tip,
        }
    }
}

/// A transaction waiting to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    pub fees: FeeParams,
    /// Recipient; `None` deploys a contract.
    pub to: Option<Address>,
    /// Value in wei.
    pub value: U256,
    pub data: Bytes,
}

impl UnsignedTransaction {
    /// Plain native-currency transfer.
    pub fn transfer(chain_id: u64, nonce: u64, to: Address, value: U256, fees: FeeParams) -> Self {
        Self {
            chain_id,
            nonce,
            gas_limit: 21_000,
            fees,
            to: Some(to),
            value,
            data: Bytes::new(),
        }
    }

    fn kind(&self) -> TxKind {
        match self.to {
            Some(to) => TxKind::Call(to),
            None => TxKind::Create,
        }
    }
}

/// A signed, encoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// EIP-2718 encoding (type byte + RLP for typed transactions, plain RLP for legacy).
    pub raw: Bytes,
    /// Keccak-256 of `raw`.
    pub hash: B256,
}

impl SignedTransaction {
    /// 0x-prefixed hex of the raw bytes.
    pub fn raw_hex(&self) -> String {
        hex::encode_prefixed(&self.raw)
    }
}

/// Sign `tx` for `chain_id` with a hex private key.
///
/// The signer is bound to `chain_id`; a transaction carrying a different
/// chain id is rejected rather than re-targeted.
pub fn sign_offline(
    tx: &UnsignedTransaction,
    private_key_hex: &str,
    chain_id: u64,
) -> WalletResult<SignedTransaction> {
    let secret = parse_private_key(private_key_hex)?;
    let signer = PrivateKeySigner::from_slice(secret.to_bytes().as_slice())
        .map_err(|e| WalletError::InvalidKeyFormat(e.to_string()))?;

    if tx.chain_id != chain_id {
        return Err(WalletError::SigningFailure(format!(
            "transaction chain id {} does not match signer chain id {}",
            tx.chain_id, chain_id
        )));
    }

    let envelope = match tx.fees {
        FeeParams::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        } => {
            if max_priority_fee_per_gas > max_fee_per_gas {
                return Err(WalletError::SigningFailure(format!(
                    "max priority fee {max_priority_fee_per_gas} exceeds max fee {max_fee_per_gas}"
                )));
            }
            let typed = TxEip1559 {
                chain_id,
                nonce: tx.nonce,
                gas_limit: tx.gas_limit,
                max_fee_per_gas,
                max_priority_fee_per_gas,
                to: tx.kind(),
                value: tx.value,
                input: tx.data.clone(),
                ..Default::default()
            };
            let signature = signer
                .sign_hash_sync(&typed.signature_hash())
                .map_err(|e| WalletError::SigningFailure(e.to_string()))?;
            TxEnvelope::from(typed.into_signed(signature))
        }
        FeeParams::Legacy { gas_price } => {
            let legacy = TxLegacy {
                chain_id: Some(chain_id),
                nonce: tx.nonce,
                gas_price,
                gas_limit: tx.gas_limit,
                to: tx.kind(),
                value: tx.value,
                input: tx.data.clone(),
            };
            let signature = signer
                .sign_hash_sync(&legacy.signature_hash())
                .map_err(|e| WalletError::SigningFailure(e.to_string()))?;
            TxEnvelope::from(legacy.into_signed(signature))
        }
    };

    let raw = Bytes::from(envelope.encoded_2718());
    let hash = keccak256(&raw);

    tracing::debug!(
        from = %signer.address(),
        chain_id,
        nonce = tx.nonce,
        tx_hash = %hash,
        "Signed transaction offline"
    );

    Ok(SignedTransaction { raw, hash })
}

/// [`sign_offline`] returning the 0x-prefixed hex directly.
pub fn sign_offline_hex(
    tx: &UnsignedTransaction,
    private_key_hex: &str,
    chain_id: u64,
) -> WalletResult<String> {
    sign_offline(tx, private_key_hex, chain_id).map(|signed| signed.raw_hex())
}
