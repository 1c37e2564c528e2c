#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianAddedEvent {
    pub pending_id: u64,
    pub vault: Address,
    pub guardian: Address,
    pub activation_time: u64,
    pub reason: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianActivatedEvent {
    pub pending_id: u64,
    pub vault: Address,
    pub guardian: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianCancelledEvent {
    pub pending_id: u64,
    pub vault: Address,
    pub guardian: Address,
    pub reason: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianRemovedEvent {
    pub vault: Address,
    pub guardian: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianExpiryEvent {
    pub vault: Address,
    pub guardian: Address,
    pub expires_at: Option<u64>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerRotatedEvent {
    pub vault: Address,
    pub guardian: Address,
    pub previous: BytesN<20>,
    pub signer: BytesN<20>,
    pub timestamp: u64,
}

pub fn emit_guardian_added(
    env: &Env,
    pending_id: u64,
    vault: Address,
    guardian: Address,
    activation_time: u64,
    reason: String,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_ADD")),
        GuardianAddedEvent {
            pending_id,
            vault,
            guardian,
            activation_time,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_activated(env: &Env, pending_id: u64, vault: Address, guardian: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_ACT")),
        GuardianActivatedEvent {
            pending_id,
            vault,
            guardian,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_cancelled(
    env: &Env,
    pending_id: u64,
    vault: Address,
    guardian: Address,
    reason: String,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_CNCL")),
        GuardianCancelledEvent {
            pending_id,
            vault,
            guardian,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_removed(env: &Env, vault: Address, guardian: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_REM")),
        GuardianRemovedEvent {
            vault,
            guardian,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_expiry(env: &Env, vault: Address, guardian: Address, expires_at: Option<u64>) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_EXP")),
        GuardianExpiryEvent {
            vault,
            guardian,
            expires_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_signer_rotated(
    env: &Env,
    vault: Address,
    guardian: Address,
    previous: BytesN<20>,
    signer: BytesN<20>,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("G_ROT")),
        SignerRotatedEvent {
            vault,
            guardian,
            previous,
            signer,
            timestamp: env.ledger().timestamp(),
        },
    );
}
