#![allow(deprecated)] // events().publish migration tracked separately

//! Audit events published by the vault. Every payload carries the ledger
//! timestamp at which it was emitted.

use common::Asset;
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol};

use crate::emergency::EmergencyPath;
use crate::withdrawal::RejectReason;

fn topic(name: Symbol) -> (Symbol, Symbol) {
    (symbol_short!("STREAM"), name)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub from: Address,
    pub asset: Asset,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalExecutedEvent {
    pub nonce: u64,
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    pub signers: u32,
    pub quorum: u32,
    pub enhanced: bool,
    pub reason_hash: Option<BytesN<32>>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRejectedEvent {
    pub nonce: u64,
    pub reason: RejectReason,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipEvent {
    pub previous: Address,
    pub owner: Address,
    /// Recovery proposal that moved ownership, if any.
    pub proposal_id: Option<u64>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigChangedEvent {
    pub field: Symbol,
    pub value: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockRequestedEvent {
    pub unlock_id: u64,
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    pub timelock_ends: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockVoteEvent {
    pub unlock_id: u64,
    pub guardian: Address,
    pub approvals: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockEvent {
    pub unlock_id: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawalEvent {
    pub unlock_id: u64,
    pub path: EmergencyPath,
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafeModeEvent {
    pub enabled: bool,
    pub actor: Address,
    pub reason: String,
    pub toggle_count: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerWithdrawalEvent {
    pub asset: Asset,
    pub amount: i128,
    pub owner: Address,
    pub timestamp: u64,
}

pub fn emit_deposit(env: &Env, from: Address, asset: Asset, amount: i128) {
    env.events().publish(
        topic(symbol_short!("DEPOSIT")),
        DepositEvent {
            from,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_withdrawal_executed(env: &Env, event: WithdrawalExecutedEvent) {
    env.events().publish(topic(symbol_short!("WD_EXEC")), event);
}

pub fn emit_withdrawal_rejected(env: &Env, nonce: u64, reason: RejectReason) {
    env.events().publish(
        topic(symbol_short!("WD_REJ")),
        WithdrawalRejectedEvent {
            nonce,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_ownership_transferred(
    env: &Env,
    previous: Address,
    owner: Address,
    proposal_id: Option<u64>,
) {
    let name = if proposal_id.is_some() {
        symbol_short!("OWN_REC")
    } else {
        symbol_short!("OWN_XFER")
    };
    env.events().publish(
        topic(name),
        OwnershipEvent {
            previous,
            owner,
            proposal_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_config_changed(env: &Env, field: Symbol, value: u64) {
    env.events().publish(
        topic(symbol_short!("CFG")),
        ConfigChangedEvent {
            field,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_unlock_requested(
    env: &Env,
    unlock_id: u64,
    asset: Asset,
    amount: i128,
    recipient: Address,
    timelock_ends: u64,
) {
    env.events().publish(
        topic(symbol_short!("EM_REQ")),
        UnlockRequestedEvent {
            unlock_id,
            asset,
            amount,
            recipient,
            timelock_ends,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_unlock_vote(env: &Env, unlock_id: u64, guardian: Address, approvals: u32) {
    env.events().publish(
        topic(symbol_short!("EM_VOTE")),
        UnlockVoteEvent {
            unlock_id,
            guardian,
            approvals,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_unlock_approved(env: &Env, unlock_id: u64) {
    env.events().publish(
        topic(symbol_short!("EM_APPR")),
        UnlockEvent {
            unlock_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_unlock_cancelled(env: &Env, unlock_id: u64) {
    env.events().publish(
        topic(symbol_short!("EM_CNCL")),
        UnlockEvent {
            unlock_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_emergency_withdrawal(
    env: &Env,
    unlock_id: u64,
    path: EmergencyPath,
    asset: Asset,
    amount: i128,
    recipient: Address,
) {
    let name = match path {
        EmergencyPath::ViaApproval => symbol_short!("EM_EXA"),
        EmergencyPath::ViaTimelock => symbol_short!("EM_EXT"),
    };
    env.events().publish(
        topic(name),
        EmergencyWithdrawalEvent {
            unlock_id,
            path,
            asset,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_safe_mode(env: &Env, enabled: bool, actor: Address, reason: String, toggle_count: u32) {
    let name = if enabled {
        symbol_short!("SM_ON")
    } else {
        symbol_short!("SM_OFF")
    };
    env.events().publish(
        topic(name),
        SafeModeEvent {
            enabled,
            actor,
            reason,
            toggle_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_owner_withdrawal(env: &Env, asset: Asset, amount: i128, owner: Address) {
    env.events().publish(
        topic(symbol_short!("SM_WD")),
        OwnerWithdrawalEvent {
            asset,
            amount,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
