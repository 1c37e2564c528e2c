//! Guardian records, pending additions and their storage.

use common::{ttl, GuardianRecord, GuardianStatus, IndexedSet, PendingGuardian};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const DELAY: Symbol = symbol_short!("DELAY");
pub(crate) const PENDING_CTR: Symbol = symbol_short!("PEND_CTR");
pub(crate) const PENDING: Symbol = symbol_short!("PEND");
pub(crate) const PENDING_OF: Symbol = symbol_short!("PEND_OF");
pub(crate) const RECORD: Symbol = symbol_short!("GREC");

pub(crate) fn active_set() -> IndexedSet {
    IndexedSet::new(
        symbol_short!("A_SLOT"),
        symbol_short!("A_IDX"),
        symbol_short!("A_CNT"),
    )
}

pub(crate) fn pending_set() -> IndexedSet {
    IndexedSet::new(
        symbol_short!("P_SLOT"),
        symbol_short!("P_IDX"),
        symbol_short!("P_CNT"),
    )
}

// ── Vault registration ───────────────────────────────────────────────────────

pub(crate) fn get_delay(env: &Env, vault: &Address) -> Option<u64> {
    env.storage().persistent().get(&(DELAY, vault.clone()))
}

pub(crate) fn set_delay(env: &Env, vault: &Address, delay: u64) {
    let key = (DELAY, vault.clone());
    env.storage().persistent().set(&key, &delay);
    ttl::extend_persistent(env, &key);
}

// ── Pending additions ────────────────────────────────────────────────────────

pub(crate) fn next_pending_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&PENDING_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&PENDING_CTR, &next);
    next
}

pub(crate) fn load_pending(env: &Env, id: u64) -> Option<PendingGuardian> {
    env.storage().persistent().get(&(PENDING, id))
}

pub(crate) fn save_pending(env: &Env, pending: &PendingGuardian) {
    let key = (PENDING, pending.id);
    env.storage().persistent().set(&key, pending);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn set_pending_of(env: &Env, vault: &Address, guardian: &Address, id: u64) {
    let key = (PENDING_OF, vault.clone(), guardian.clone());
    env.storage().persistent().set(&key, &id);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn pending_id_of(env: &Env, vault: &Address, guardian: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&(PENDING_OF, vault.clone(), guardian.clone()))
}

pub(crate) fn clear_pending_of(env: &Env, vault: &Address, guardian: &Address) {
    env.storage()
        .persistent()
        .remove(&(PENDING_OF, vault.clone(), guardian.clone()));
}

// ── Guardian records ─────────────────────────────────────────────────────────

pub(crate) fn load_record(env: &Env, vault: &Address, guardian: &Address) -> Option<GuardianRecord> {
    env.storage()
        .persistent()
        .get(&(RECORD, vault.clone(), guardian.clone()))
}

pub(crate) fn save_record(env: &Env, record: &GuardianRecord) {
    let key = (RECORD, record.vault.clone(), record.guardian.clone());
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

/// Active and not past its expiry at `now`.
pub(crate) fn is_live(record: &GuardianRecord, now: u64) -> bool {
    record.status == GuardianStatus::Active
        && match record.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
}
