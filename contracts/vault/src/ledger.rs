//! Per-asset balance ledger and the transfer executor.
//!
//! The ledger is the vault's own accounting: only deposits credit it, and
//! every release debits it before any tokens leave the contract.

use common::{ttl, Asset};
use soroban_sdk::{symbol_short, token::TokenClient, Address, Env, Symbol};

use crate::storage::VaultConfig;
use crate::VaultError;

const BALANCE: Symbol = symbol_short!("BAL");

fn key(asset: &Asset) -> (Symbol, Asset) {
    (BALANCE, asset.clone())
}

pub fn balance_of(env: &Env, asset: &Asset) -> i128 {
    env.storage().persistent().get(&key(asset)).unwrap_or(0)
}

pub fn credit(env: &Env, asset: &Asset, amount: i128) -> Result<(), VaultError> {
    let next = balance_of(env, asset)
        .checked_add(amount)
        .ok_or(VaultError::InvalidAmount)?;
    let k = key(asset);
    env.storage().persistent().set(&k, &next);
    ttl::extend_persistent(env, &k);
    Ok(())
}

/// Fails with `InsufficientBalance` and leaves the ledger untouched when the
/// balance does not cover `amount`.
pub fn debit(env: &Env, asset: &Asset, amount: i128) -> Result<(), VaultError> {
    let current = balance_of(env, asset);
    if current < amount {
        return Err(VaultError::InsufficientBalance);
    }
    let k = key(asset);
    env.storage().persistent().set(&k, &(current - amount));
    ttl::extend_persistent(env, &k);
    Ok(())
}

/// Token contract that moves `asset`.
pub fn token_for(config: &VaultConfig, asset: &Asset) -> Address {
    match asset {
        Asset::Native => config.native_token.clone(),
        Asset::Token(token) => token.clone(),
    }
}

/// Pull `amount` of `asset` from `from` into the vault.
pub fn pull(
    env: &Env,
    config: &VaultConfig,
    asset: &Asset,
    from: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    let client = TokenClient::new(env, &token_for(config, asset));
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::TransferFailed),
    }
}

/// Send `amount` of `asset` from the vault to `recipient`.
pub fn push(
    env: &Env,
    config: &VaultConfig,
    asset: &Asset,
    recipient: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    let client = TokenClient::new(env, &token_for(config, asset));
    match client.try_transfer(&env.current_contract_address(), recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::TransferFailed),
    }
}
