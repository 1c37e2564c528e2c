#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedEvent {
    /// Vault address, or the controller's own address for a network pause.
    pub scope: Address,
    pub actor: Address,
    pub reason: Option<String>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpausedEvent {
    pub scope: Address,
    pub actor: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReasonUpdatedEvent {
    pub vault: Address,
    pub actor: Address,
    pub reason: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauserChangedEvent {
    pub pauser: Address,
    pub granted: bool,
    pub timestamp: u64,
}

pub fn emit_paused(env: &Env, scope: Address, actor: Address, reason: Option<String>) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("P_ON")),
        PausedEvent {
            scope,
            actor,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_unpaused(env: &Env, scope: Address, actor: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("P_OFF")),
        UnpausedEvent {
            scope,
            actor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_reason_updated(env: &Env, vault: Address, actor: Address, reason: String) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("P_RSN")),
        ReasonUpdatedEvent {
            vault,
            actor,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_pauser_changed(env: &Env, pauser: Address, granted: bool) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("PAUSER")),
        PauserChangedEvent {
            pauser,
            granted,
            timestamp: env.ledger().timestamp(),
        },
    );
}
