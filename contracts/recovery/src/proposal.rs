//! Recovery proposal types and storage.

use common::{ttl, RecoveryConfig};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const CONFIG: Symbol = symbol_short!("R_CFG");
pub(crate) const OPEN: Symbol = symbol_short!("R_OPEN");
pub(crate) const PROPOSAL_CTR: Symbol = symbol_short!("PROP_CTR");
pub(crate) const PROPOSAL: Symbol = symbol_short!("PROP");
pub(crate) const VOTED: Symbol = symbol_short!("VOTED");

/// Phase of a recovery proposal.
///
/// ```text
/// Pending ──► Approved ──► Executed
///    │
///    ├──► Cancelled  (initiator or vault, while pending)
///    └──► Expired    (voting deadline passed without quorum; computed)
/// ```
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RecoveryStatus {
    Pending = 0,
    Approved = 1,
    Executed = 2,
    Cancelled = 3,
    Expired = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryProposal {
    pub id: u64,
    pub vault: Address,
    pub new_owner: Address,
    pub initiator: Address,
    pub justification: String,
    pub created_at: u64,
    /// Last timestamp at which votes are accepted.
    pub voting_deadline: u64,
    /// Set when quorum is reached.
    pub timelock_ends: Option<u64>,
    /// Approvals required, fixed at initiation.
    pub quorum: u32,
    pub approvals: Vec<Address>,
    /// Stored phase. [`effective_status`] folds in expiry.
    pub status: RecoveryStatus,
}

/// Stored status with lapse applied at `now`.
pub fn effective_status(proposal: &RecoveryProposal, now: u64) -> RecoveryStatus {
    if proposal.status == RecoveryStatus::Pending && now > proposal.voting_deadline {
        RecoveryStatus::Expired
    } else {
        proposal.status
    }
}

/// Pending or approved proposals block a new one for the same vault.
pub fn is_open(proposal: &RecoveryProposal, now: u64) -> bool {
    matches!(
        effective_status(proposal, now),
        RecoveryStatus::Pending | RecoveryStatus::Approved
    )
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn load_config(env: &Env, vault: &Address) -> Option<RecoveryConfig> {
    env.storage().persistent().get(&(CONFIG, vault.clone()))
}

pub(crate) fn store_config(env: &Env, vault: &Address, config: &RecoveryConfig) {
    let key = (CONFIG, vault.clone());
    env.storage().persistent().set(&key, config);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn next_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&PROPOSAL_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&PROPOSAL_CTR, &id);
    id
}

pub(crate) fn store(env: &Env, proposal: &RecoveryProposal) {
    let key = (PROPOSAL, proposal.id);
    env.storage().persistent().set(&key, proposal);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<RecoveryProposal> {
    env.storage().persistent().get(&(PROPOSAL, id))
}

pub(crate) fn open_id(env: &Env, vault: &Address) -> Option<u64> {
    env.storage().persistent().get(&(OPEN, vault.clone()))
}

pub(crate) fn set_open_id(env: &Env, vault: &Address, id: u64) {
    let key = (OPEN, vault.clone());
    env.storage().persistent().set(&key, &id);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn clear_open_id(env: &Env, vault: &Address) {
    env.storage().persistent().remove(&(OPEN, vault.clone()));
}

pub(crate) fn has_voted(env: &Env, id: u64, guardian: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&(VOTED, id, guardian.clone()))
}

pub(crate) fn mark_voted(env: &Env, id: u64, guardian: &Address) {
    let key = (VOTED, id, guardian.clone());
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
}
