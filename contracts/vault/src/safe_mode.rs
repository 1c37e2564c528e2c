//! Safe mode: the owner swaps the guardian quorum path for an owner-only
//! withdrawal path, with no delay. Every toggle is appended to an
//! append-only history, and enabling twice (or disabling twice) is refused.

use common::{ttl, Asset};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::VaultError;

const STATE: Symbol = symbol_short!("SM_STATE");
const HISTORY: Symbol = symbol_short!("SM_HIST");

/// Upper bound on entries returned by one history page.
pub const MAX_HISTORY_PAGE: u32 = 50;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafeModeState {
    pub enabled: bool,
    pub last_enabled_at: Option<u64>,
    pub last_disabled_at: Option<u64>,
    pub last_reason: Option<String>,
    /// Number of toggles so far; also the history length.
    pub toggle_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafeModeToggle {
    pub enabled: bool,
    pub timestamp: u64,
    pub reason: String,
    pub actor: Address,
}

pub fn state(env: &Env) -> SafeModeState {
    env.storage()
        .instance()
        .get(&STATE)
        .unwrap_or(SafeModeState {
            enabled: false,
            last_enabled_at: None,
            last_disabled_at: None,
            last_reason: None,
            toggle_count: 0,
        })
}

pub fn is_enabled(env: &Env) -> bool {
    state(env).enabled
}

/// Flip safe mode to `enabled`. Returns the new toggle count.
pub fn toggle(env: &Env, enabled: bool, actor: &Address, reason: &String) -> Result<u32, VaultError> {
    let mut current = state(env);
    if current.enabled == enabled {
        return Err(if enabled {
            VaultError::SafeModeAlreadyEnabled
        } else {
            VaultError::SafeModeAlreadyDisabled
        });
    }

    let now = env.ledger().timestamp();
    let entry_key = (HISTORY, current.toggle_count);
    env.storage().persistent().set(
        &entry_key,
        &SafeModeToggle {
            enabled,
            timestamp: now,
            reason: reason.clone(),
            actor: actor.clone(),
        },
    );
    ttl::extend_persistent(env, &entry_key);

    current.enabled = enabled;
    if enabled {
        current.last_enabled_at = Some(now);
    } else {
        current.last_disabled_at = Some(now);
    }
    current.last_reason = Some(reason.clone());
    current.toggle_count += 1;
    env.storage().instance().set(&STATE, &current);
    Ok(current.toggle_count)
}

pub fn history(env: &Env, start: u32, limit: u32) -> Vec<SafeModeToggle> {
    let total = state(env).toggle_count;
    let end = start.saturating_add(limit.min(MAX_HISTORY_PAGE)).min(total);
    let mut out = Vec::new(env);
    for i in start..end {
        if let Some(entry) = env.storage().persistent().get(&(HISTORY, i)) {
            out.push_back(entry);
        }
    }
    out
}

/// Owner-only release checks. Safe mode must be on.
pub fn check_owner_withdrawal(env: &Env, asset: &Asset, amount: i128) -> Result<(), VaultError> {
    if !is_enabled(env) {
        return Err(VaultError::SafeModeInactive);
    }
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if let Asset::Token(token) = asset {
        if *token == env.current_contract_address() {
            return Err(VaultError::UnsupportedAsset);
        }
    }
    Ok(())
}
