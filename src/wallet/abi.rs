//! ERC-20 and ERC-721 call data.
//!
//! Encoding is delegated to `alloy`'s `sol!` bindings. Amounts and token ids
//! are `U256`, so the static layout is fixed: a 4-byte selector followed by
//! one 32-byte word per argument. No validation is done on the values; zero
//! amounts and zero token ids are encoded as given.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::wallet::transaction::{FeeParams, UnsignedTransaction};

sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }

    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }
}

/// Length of `transfer(address,uint256)` call data.
pub const ERC20_TRANSFER_LEN: usize = 4 + 32 + 32;

/// Length of `safeTransferFrom(address,address,uint256)` call data.
pub const ERC721_SAFE_TRANSFER_LEN: usize = 4 + 32 + 32 + 32;

/// Call data for ERC-20 `transfer(to, amount)`.
pub fn erc20_transfer_data(to: Address, amount: U256) -> Bytes {
    IERC20::transferCall { to, amount }.abi_encode().into()
}

/// Call data for ERC-721 `safeTransferFrom(from, to, tokenId)`.
pub fn erc721_safe_transfer_data(from: Address, to: Address, token_id: U256) -> Bytes {
    IERC721::safeTransferFromCall {
        from,
        to,
        tokenId: token_id,
    }
    .abi_encode()
    .into()
}

/// Unsigned token transfer: zero value, addressed to the token contract.
pub fn erc20_transfer_tx(
    chain_id: u64,
    nonce: u64,
    token: Address,
    to: Address,
    amount: U256,
    gas_limit: u64,
    fees: FeeParams,
) -> UnsignedTransaction {
    UnsignedTransaction {
        chain_id,
        nonce,
        gas_limit,
        fees,
        to: Some(token),
        value: U256::ZERO,
        data: erc20_transfer_data(to, amount),
    }
}

/// Unsigned NFT transfer: zero value, addressed to the collection contract.
#[allow(clippy::too_many_arguments)]
pub fn erc721_transfer_tx(
    chain_id: u64,
    nonce: u64,
    collection: Address,
    from: Address,
    to: Address,
    token_id: U256,
    gas_limit: u64,
    fees: FeeParams,
) -> UnsignedTransaction {
    UnsignedTransaction {
        chain_id,
        nonce,
        gas_limit,
        fees,
        to: Some(collection),
        value: U256::ZERO,
        data: erc721_safe_transfer_data(from, to, token_id),
    }
}
