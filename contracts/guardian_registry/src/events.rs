#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialIssuedEvent {
    pub vault: Address,
    pub guardian: Address,
    pub signer: BytesN<20>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialRevokedEvent {
    pub vault: Address,
    pub guardian: Address,
    pub timestamp: u64,
}

pub fn emit_credential_issued(env: &Env, vault: Address, guardian: Address, signer: BytesN<20>) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("CRED_ISS")),
        CredentialIssuedEvent {
            vault,
            guardian,
            signer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_credential_revoked(env: &Env, vault: Address, guardian: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("CRED_REV")),
        CredentialRevokedEvent {
            vault,
            guardian,
            timestamp: env.ledger().timestamp(),
        },
    );
}
