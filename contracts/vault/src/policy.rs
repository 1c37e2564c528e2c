//! Per-asset spending limits and the effective quorum.
//!
//! A withdrawal needs the standard quorum unless enhanced approval applies,
//! in which case it needs `max(quorum, ceil(active × enhanced_bps / 10 000))`
//! distinct active signatures. Enhanced approval applies when the request
//! would push the asset's spend in the current window past its configured
//! limit, or when the external risk-policy contract flags it.

use common::{ttl, Asset, RiskPolicyClient, WithdrawalRequest};
use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::storage::{VaultConfig, BPS};

const LIMIT: Symbol = symbol_short!("LIMIT");
const SPENT: Symbol = symbol_short!("SPENT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpendingLimit {
    /// Most that may leave under the standard quorum within one window.
    pub max_amount: i128,
    /// Window length in seconds.
    pub window: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpendWindow {
    pub started_at: u64,
    pub spent: i128,
}

pub fn get_limit(env: &Env, asset: &Asset) -> Option<SpendingLimit> {
    env.storage().persistent().get(&(LIMIT, asset.clone()))
}

pub fn set_limit(env: &Env, asset: &Asset, limit: &SpendingLimit) {
    let key = (LIMIT, asset.clone());
    env.storage().persistent().set(&key, limit);
    ttl::extend_persistent(env, &key);
}

pub fn clear_limit(env: &Env, asset: &Asset) {
    env.storage().persistent().remove(&(LIMIT, asset.clone()));
    env.storage().persistent().remove(&(SPENT, asset.clone()));
}

pub fn get_window(env: &Env, asset: &Asset) -> Option<SpendWindow> {
    env.storage().persistent().get(&(SPENT, asset.clone()))
}

/// The window as it stands at `now`, restarted if the stored one has lapsed.
fn current_window(env: &Env, asset: &Asset, limit: &SpendingLimit, now: u64) -> SpendWindow {
    match get_window(env, asset) {
        Some(w) if now < w.started_at.saturating_add(limit.window) => w,
        _ => SpendWindow {
            started_at: now,
            spent: 0,
        },
    }
}

/// `true` when `amount` would take the window past the limit.
pub fn exceeds_limit(env: &Env, asset: &Asset, amount: i128) -> bool {
    let Some(limit) = get_limit(env, asset) else {
        return false;
    };
    let window = current_window(env, asset, &limit, env.ledger().timestamp());
    match window.spent.checked_add(amount) {
        Some(total) => total > limit.max_amount,
        None => true,
    }
}

/// Add an executed withdrawal to the asset's window. No-op without a limit.
pub fn record_spend(env: &Env, asset: &Asset, amount: i128) {
    let Some(limit) = get_limit(env, asset) else {
        return;
    };
    let mut window = current_window(env, asset, &limit, env.ledger().timestamp());
    window.spent = window.spent.saturating_add(amount);
    let key = (SPENT, asset.clone());
    env.storage().persistent().set(&key, &window);
    ttl::extend_persistent(env, &key);
}

/// `max(quorum, ceil(active × bps / 10 000))`.
pub fn enhanced_quorum(quorum: u32, active: u32, bps: u32) -> u32 {
    let scaled = (active as u64) * (bps as u64);
    let required = scaled.div_ceil(BPS as u64) as u32;
    quorum.max(required)
}

pub fn requires_enhanced_approval(env: &Env, config: &VaultConfig, request: &WithdrawalRequest) -> bool {
    if exceeds_limit(env, &request.asset, request.amount) {
        return true;
    }
    match &config.risk_policy {
        Some(policy) => RiskPolicyClient::new(env, policy).requires_enhanced_approval(
            &env.current_contract_address(),
            &request.asset,
            &request.amount,
            &request.recipient,
        ),
        None => false,
    }
}

/// Signatures needed for `request` given `active` guardians. The second
/// value says whether enhanced approval applied.
pub fn effective_quorum(
    env: &Env,
    config: &VaultConfig,
    request: &WithdrawalRequest,
    active: u32,
) -> (u32, bool) {
    if requires_enhanced_approval(env, config, request) {
        (enhanced_quorum(config.quorum, active, config.enhanced_bps), true)
    } else {
        (config.quorum, false)
    }
}
