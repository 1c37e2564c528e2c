//! Guardian-signed withdrawals.
//!
//! ```text
//! submitted ──► verified ──► authorized ──► executed
//!     │             │             │
//!     └─────────────┴─────────────┴──► rejected
//! ```
//!
//! Gate failures (paused, safe mode, malformed request) return an error.
//! Authorization, temporal and balance failures return
//! [`WithdrawalOutcome::Rejected`] with a reason and leave no trace in
//! storage beyond the `WD_REJ` audit event. Checks run cheapest first.

use common::{
    check_unique, pausable, recover_signers, set_len, ttl, withdrawal_digest, Asset, DedupMode,
    SignatureError, SignatureSet, WithdrawalRequest,
};
use soroban_sdk::{contracttype, log, symbol_short, Address, BytesN, Env, Symbol};

use crate::events::{self, WithdrawalExecutedEvent};
use crate::storage::VaultConfig;
use crate::{guardians, ledger, policy, safe_mode, VaultError};

const NONCE: Symbol = symbol_short!("NONCE");
const NONCES_CONSUMED: Symbol = symbol_short!("NONCE_CNT");
const REASON: Symbol = symbol_short!("REASON");

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RejectReason {
    Expired = 1,
    NonceUsed = 2,
    InsufficientBalance = 3,
    DuplicateSigner = 4,
    UnorderedSigners = 5,
    InactiveSigner = 6,
    QuorumUnreachable = 7,
    InsufficientSignatures = 8,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalReceipt {
    pub nonce: u64,
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    /// Distinct active guardians that signed.
    pub signers: u32,
    /// Signatures that were required.
    pub quorum: u32,
    pub enhanced: bool,
    pub executed_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WithdrawalOutcome {
    Executed(WithdrawalReceipt),
    Rejected(RejectReason),
}

pub fn is_nonce_used(env: &Env, nonce: u64) -> bool {
    env.storage().persistent().has(&(NONCE, nonce))
}

pub fn nonces_consumed(env: &Env) -> u64 {
    env.storage().instance().get(&NONCES_CONSUMED).unwrap_or(0)
}

fn consume_nonce(env: &Env, nonce: u64) {
    let key = (NONCE, nonce);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    let count = nonces_consumed(env).saturating_add(1);
    env.storage().instance().set(&NONCES_CONSUMED, &count);
}

pub fn reason_first_seen(env: &Env, reason_hash: &BytesN<32>) -> Option<u64> {
    env.storage().persistent().get(&(REASON, reason_hash.clone()))
}

fn record_reason(env: &Env, reason_hash: &Option<BytesN<32>>) {
    let Some(hash) = reason_hash else { return };
    let key = (REASON, hash.clone());
    if !env.storage().persistent().has(&key) {
        env.storage().persistent().set(&key, &env.ledger().timestamp());
    }
    ttl::extend_persistent(env, &key);
}

fn reject(env: &Env, request: &WithdrawalRequest, reason: RejectReason) -> WithdrawalOutcome {
    log!(env, "withdrawal rejected: nonce {}, reason {}", request.nonce, reason as u32);
    events::emit_withdrawal_rejected(env, request.nonce, reason);
    WithdrawalOutcome::Rejected(reason)
}

/// Conditions that fail the call outright rather than rejecting it.
fn check_gates(
    env: &Env,
    config: &VaultConfig,
    request: &WithdrawalRequest,
    signatures: &SignatureSet,
) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    pausable::require_not_paused(env, &config.pausing, &vault).map_err(|_| VaultError::Paused)?;
    if safe_mode::is_enabled(env) {
        return Err(VaultError::SafeModeActive);
    }
    if request.amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if request.recipient == vault {
        return Err(VaultError::InvalidRecipient);
    }
    if let Asset::Token(token) = &request.asset {
        if *token == vault {
            return Err(VaultError::UnsupportedAsset);
        }
    }
    if set_len(signatures) == 0 {
        return Err(VaultError::EmptySignatureSet);
    }
    Ok(())
}

/// Decide and, if authorized, execute `request`.
pub fn submit(
    env: &Env,
    config: &VaultConfig,
    request: &WithdrawalRequest,
    signatures: &SignatureSet,
    mode: DedupMode,
) -> Result<WithdrawalOutcome, VaultError> {
    check_gates(env, config, request, signatures)?;

    // Temporal and replay checks.
    let now = env.ledger().timestamp();
    if now > request.expiration {
        return Ok(reject(env, request, RejectReason::Expired));
    }
    if is_nonce_used(env, request.nonce) {
        return Ok(reject(env, request, RejectReason::NonceUsed));
    }
    if ledger::balance_of(env, &request.asset) < request.amount {
        return Ok(reject(env, request, RejectReason::InsufficientBalance));
    }

    // Signatures.
    let vault = env.current_contract_address();
    let digest = withdrawal_digest(env, &vault, request);
    let signers = recover_signers(env, &digest, signatures);
    match check_unique(&signers, mode) {
        Ok(()) => {}
        Err(SignatureError::UnorderedSigners) => {
            return Ok(reject(env, request, RejectReason::UnorderedSigners))
        }
        Err(_) => return Ok(reject(env, request, RejectReason::DuplicateSigner)),
    }
    for signer in signers.iter() {
        let active = signer
            .as_ref()
            .and_then(|key| guardians::active_guardian_for(env, config, key));
        if active.is_none() {
            return Ok(reject(env, request, RejectReason::InactiveSigner));
        }
    }

    // Quorum.
    let active = guardians::active_count(env, config);
    if config.quorum > active {
        return Ok(reject(env, request, RejectReason::QuorumUnreachable));
    }
    let (required, enhanced) = policy::effective_quorum(env, config, request, active);
    let signed = signers.len();
    if signed < required {
        log!(env, "withdrawal needs {} signatures, got {}", required, signed);
        return Ok(reject(env, request, RejectReason::InsufficientSignatures));
    }

    // Effects.
    consume_nonce(env, request.nonce);
    ledger::debit(env, &request.asset, request.amount)?;
    policy::record_spend(env, &request.asset, request.amount);
    record_reason(env, &request.reason_hash);
    events::emit_withdrawal_executed(
        env,
        WithdrawalExecutedEvent {
            nonce: request.nonce,
            asset: request.asset.clone(),
            amount: request.amount,
            recipient: request.recipient.clone(),
            signers: signed,
            quorum: required,
            enhanced,
            reason_hash: request.reason_hash.clone(),
            timestamp: now,
        },
    );

    // Interaction.
    ledger::push(env, config, &request.asset, &request.recipient, request.amount)?;

    Ok(WithdrawalOutcome::Executed(WithdrawalReceipt {
        nonce: request.nonce,
        asset: request.asset.clone(),
        amount: request.amount,
        recipient: request.recipient.clone(),
        signers: signed,
        quorum: required,
        enhanced,
        executed_at: now,
    }))
}
