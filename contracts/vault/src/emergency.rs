//! Emergency override.
//!
//! The owner requests an unlock of a fixed asset, amount and recipient. That
//! opens an approval round among the emergency guardians (a set disjoint
//! from ordinary guardians, with its own quorum) and starts a long fallback
//! timelock. Execution is allowed immediately once the round reaches
//! quorum, or without approval after the timelock. Only one unlock is open
//! at a time; execution or cancellation clears it.

use common::{ttl, Asset, IndexedSet};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::VaultError;

const UNLOCK: Symbol = symbol_short!("EM_UNLK");
const UNLOCK_CTR: Symbol = symbol_short!("EM_CTR");
const VOTE: Symbol = symbol_short!("EM_VOTE");

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EmergencyPath {
    ViaApproval = 0,
    ViaTimelock = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyUnlock {
    pub id: u64,
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    pub requested_at: u64,
    /// Earliest execution time without approval.
    pub timelock_ends: u64,
    pub approvals: u32,
    pub approved: bool,
}

pub(crate) fn guardians() -> IndexedSet {
    IndexedSet::new(
        symbol_short!("E_SLOT"),
        symbol_short!("E_IDX"),
        symbol_short!("E_CNT"),
    )
}

pub fn is_emergency_guardian(env: &Env, who: &Address) -> bool {
    guardians().contains(env, &env.current_contract_address(), who)
}

pub fn guardian_count(env: &Env) -> u32 {
    guardians().len(env, &env.current_contract_address())
}

pub fn current(env: &Env) -> Option<EmergencyUnlock> {
    env.storage().instance().get(&UNLOCK)
}

fn store(env: &Env, unlock: &EmergencyUnlock) {
    env.storage().instance().set(&UNLOCK, unlock);
}

/// Drop the open unlock, if any. Returns its id.
pub fn clear(env: &Env) -> Option<u64> {
    let open = current(env)?;
    env.storage().instance().remove(&UNLOCK);
    Some(open.id)
}

/// The open unlock with id `unlock_id`.
pub fn load(env: &Env, unlock_id: u64) -> Result<EmergencyUnlock, VaultError> {
    match current(env) {
        Some(unlock) if unlock.id == unlock_id => Ok(unlock),
        _ => Err(VaultError::UnlockNotFound),
    }
}

pub fn open(
    env: &Env,
    asset: Asset,
    amount: i128,
    recipient: Address,
    timelock: u64,
) -> Result<EmergencyUnlock, VaultError> {
    if current(env).is_some() {
        return Err(VaultError::UnlockPending);
    }
    let id: u64 = env
        .storage()
        .instance()
        .get(&UNLOCK_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&UNLOCK_CTR, &id);

    let now = env.ledger().timestamp();
    let unlock = EmergencyUnlock {
        id,
        asset,
        amount,
        recipient,
        requested_at: now,
        timelock_ends: now.saturating_add(timelock),
        approvals: 0,
        approved: false,
    };
    store(env, &unlock);
    Ok(unlock)
}

pub fn has_approved(env: &Env, unlock_id: u64, guardian: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&(VOTE, unlock_id, guardian.clone()))
}

/// Count `guardian`'s approval. Returns the updated unlock and whether this
/// vote is the one that reached quorum.
pub fn approve(
    env: &Env,
    unlock_id: u64,
    guardian: &Address,
    quorum: u32,
) -> Result<(EmergencyUnlock, bool), VaultError> {
    if !is_emergency_guardian(env, guardian) {
        return Err(VaultError::NotEmergencyGuardian);
    }
    let mut unlock = load(env, unlock_id)?;
    if has_approved(env, unlock_id, guardian) {
        return Err(VaultError::AlreadyApproved);
    }

    let key = (VOTE, unlock_id, guardian.clone());
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    unlock.approvals += 1;
    let reached = !unlock.approved && unlock.approvals >= quorum;
    if reached {
        unlock.approved = true;
    }
    store(env, &unlock);
    Ok((unlock, reached))
}

/// Votes on `unlock_id` from guardians still in the emergency set. Votes
/// cast by since-removed members no longer count.
pub fn live_approvals(env: &Env, unlock_id: u64) -> u32 {
    guardians()
        .members(env, &env.current_contract_address())
        .iter()
        .filter(|member| has_approved(env, unlock_id, member))
        .count() as u32
}

/// Which path allows `unlock` to execute now. Approval is re-counted against
/// the current emergency set.
pub fn execution_path(
    env: &Env,
    unlock: &EmergencyUnlock,
    quorum: u32,
) -> Result<EmergencyPath, VaultError> {
    if unlock.approved && live_approvals(env, unlock.id) >= quorum {
        Ok(EmergencyPath::ViaApproval)
    } else if env.ledger().timestamp() >= unlock.timelock_ends {
        Ok(EmergencyPath::ViaTimelock)
    } else {
        Err(VaultError::TimelockActive)
    }
}
