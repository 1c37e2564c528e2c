#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryInitiatedEvent {
    pub proposal_id: u64,
    pub vault: Address,
    pub initiator: Address,
    pub new_owner: Address,
    pub justification: String,
    pub voting_deadline: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryVoteEvent {
    pub proposal_id: u64,
    pub guardian: Address,
    pub approvals: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryApprovedEvent {
    pub proposal_id: u64,
    pub vault: Address,
    pub timelock_ends: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryExecutedEvent {
    pub proposal_id: u64,
    pub vault: Address,
    pub new_owner: Address,
    pub executor: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryCancelledEvent {
    pub proposal_id: u64,
    pub vault: Address,
    pub cancelled_by: Address,
    pub timestamp: u64,
}

pub fn emit_recovery_initiated(
    env: &Env,
    proposal_id: u64,
    vault: Address,
    initiator: Address,
    new_owner: Address,
    justification: String,
    voting_deadline: u64,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("R_INIT")),
        RecoveryInitiatedEvent {
            proposal_id,
            vault,
            initiator,
            new_owner,
            justification,
            voting_deadline,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_recovery_vote(env: &Env, proposal_id: u64, guardian: Address, approvals: u32) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("R_VOTE")),
        RecoveryVoteEvent {
            proposal_id,
            guardian,
            approvals,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_recovery_approved(env: &Env, proposal_id: u64, vault: Address, timelock_ends: u64) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("R_APPR")),
        RecoveryApprovedEvent {
            proposal_id,
            vault,
            timelock_ends,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_recovery_executed(
    env: &Env,
    proposal_id: u64,
    vault: Address,
    new_owner: Address,
    executor: Address,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("R_EXEC")),
        RecoveryExecutedEvent {
            proposal_id,
            vault,
            new_owner,
            executor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_recovery_cancelled(env: &Env, proposal_id: u64, vault: Address, cancelled_by: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("R_CNCL")),
        RecoveryCancelledEvent {
            proposal_id,
            vault,
            cancelled_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}
