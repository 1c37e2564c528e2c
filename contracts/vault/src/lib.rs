#![no_std]
#![allow(clippy::too_many_arguments)]

//! # Guardian Vault
//!
//! Holds native and token balances and releases them only under
//! multi-party authorization:
//!
//! - **Quorum withdrawals**: off-chain signatures from distinct active
//!   guardians over a domain-scoped digest of the request
//!   ([`withdrawal`]).
//! - **Social recovery**: ownership moves when the recovery controller
//!   calls [`VaultContract::complete_recovery`].
//! - **Emergency override**: owner request plus emergency-guardian quorum,
//!   or a long fallback timelock ([`emergency`]).
//! - **Safe mode**: owner-only immediate withdrawals ([`safe_mode`]).
//! - **Pausing**: a shared controller halts every release path; deposits
//!   are never paused.
//!
//! Guardian credentials live in the registry; delayed activation, expiry and
//! rotation live in the optional lifecycle controller. The vault queries both
//! at decision time.

pub mod emergency;
pub mod events;
pub mod guardians;
pub mod ledger;
pub mod policy;
pub mod safe_mode;
pub mod storage;
pub mod withdrawal;


use common::{
    pausable, ttl, Asset, DedupMode, GuardianLifecycleClient, GuardianRegistryClient,
    GuardianStatus, PendingState, RecoveryConfig, ReentrancyGuard, SignatureSet,
    SocialRecoveryClient, WithdrawalRequest,
};
use emergency::{EmergencyPath, EmergencyUnlock};
use policy::{SpendWindow, SpendingLimit};
use safe_mode::{SafeModeState, SafeModeToggle};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, symbol_short, Address, BytesN, Env,
    String, Vec,
};
use storage::VaultConfig;
use withdrawal::WithdrawalOutcome;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 500,
    NotInitialized = 501,
    InvalidConfig = 502,
    InvalidAmount = 503,
    InvalidRecipient = 504,
    UnsupportedAsset = 505,
    EmptySignatureSet = 506,
    Paused = 507,
    SafeModeActive = 508,
    Reentrant = 509,
    CapabilityDisabled = 510,
    QuorumExceedsGuardians = 511,
    InsufficientBalance = 512,
    TransferFailed = 513,
    GuardianNotFound = 514,
    SignerInUse = 515,
    GuardianConflict = 516,
    PendingNotFound = 517,
    NotEmergencyGuardian = 518,
    EmergencyGuardianExists = 519,
    UnlockPending = 520,
    UnlockNotFound = 521,
    AlreadyApproved = 522,
    TimelockActive = 523,
    SafeModeAlreadyEnabled = 524,
    SafeModeAlreadyDisabled = 525,
    SafeModeInactive = 526,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultStatus {
    Active = 0,
    Paused = 1,
    /// Safe mode is on; only the owner path releases funds.
    Frozen = 2,
}

fn enter(env: &Env) -> Result<ReentrancyGuard<'_>, VaultError> {
    ReentrancyGuard::acquire(env).map_err(|_| VaultError::Reentrant)
}

fn require_not_paused(env: &Env, config: &VaultConfig) -> Result<(), VaultError> {
    pausable::require_not_paused(env, &config.pausing, &env.current_contract_address())
        .map_err(|_| VaultError::Paused)
}

fn require_lifecycle(config: &VaultConfig) -> Result<Address, VaultError> {
    config.lifecycle.clone().ok_or(VaultError::CapabilityDisabled)
}

fn require_recovery(config: &VaultConfig) -> Result<Address, VaultError> {
    config.recovery.clone().ok_or(VaultError::CapabilityDisabled)
}

fn require_emergency(config: &VaultConfig) -> Result<(), VaultError> {
    if !config.emergency_enabled {
        return Err(VaultError::CapabilityDisabled);
    }
    Ok(())
}

fn require_safe_mode(config: &VaultConfig) -> Result<(), VaultError> {
    if !config.safe_mode_enabled {
        return Err(VaultError::CapabilityDisabled);
    }
    Ok(())
}

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    // ── Setup ────────────────────────────────────────────────────────────────

    /// Store the configuration and register with the configured lifecycle
    /// and recovery controllers.
    pub fn initialize(env: Env, owner: Address, config: VaultConfig) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();
        config.validate()?;

        storage::store_owner(&env, &owner);
        storage::store_config(&env, &config);
        ttl::extend_instance(&env);

        let vault = env.current_contract_address();
        if let Some(lifecycle) = &config.lifecycle {
            GuardianLifecycleClient::new(&env, lifecycle)
                .register_vault(&vault, &config.guardian_delay);
        }
        if let (Some(recovery), Some(recovery_config)) = (&config.recovery, &config.recovery_config) {
            SocialRecoveryClient::new(&env, recovery).register_vault(&vault, recovery_config);
        }
        Ok(())
    }

    // ── Owner configuration ──────────────────────────────────────────────────

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), VaultError> {
        let owner = storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        storage::store_owner(&env, &new_owner);
        events::emit_ownership_transferred(&env, owner, new_owner, None);
        Ok(())
    }

    /// Set the standard quorum. It may not exceed the active guardian count.
    pub fn set_quorum(env: Env, quorum: u32) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let mut config = storage::load_config(&env)?;
        if quorum == 0 {
            return Err(VaultError::InvalidConfig);
        }
        if quorum > guardians::active_count(&env, &config) {
            return Err(VaultError::QuorumExceedsGuardians);
        }
        config.quorum = quorum;
        storage::store_config(&env, &config);
        events::emit_config_changed(&env, symbol_short!("quorum"), quorum as u64);
        Ok(())
    }

    pub fn set_guardian_delay(env: Env, delay: u64) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let mut config = storage::load_config(&env)?;
        let lifecycle = require_lifecycle(&config)?;
        GuardianLifecycleClient::new(&env, &lifecycle)
            .update_delay(&env.current_contract_address(), &delay);
        config.guardian_delay = delay;
        storage::store_config(&env, &config);
        events::emit_config_changed(&env, symbol_short!("delay"), delay);
        Ok(())
    }

    pub fn set_enhanced_bps(env: Env, bps: u32) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let mut config = storage::load_config(&env)?;
        if bps == 0 || bps > storage::BPS {
            return Err(VaultError::InvalidConfig);
        }
        config.enhanced_bps = bps;
        storage::store_config(&env, &config);
        events::emit_config_changed(&env, symbol_short!("enh_bps"), bps as u64);
        Ok(())
    }

    /// Withdrawals of `asset` beyond `max_amount` per `window` seconds need
    /// enhanced approval.
    pub fn set_spending_limit(
        env: Env,
        asset: Asset,
        max_amount: i128,
        window: u64,
    ) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        storage::load_config(&env)?;
        if max_amount <= 0 || window == 0 {
            return Err(VaultError::InvalidConfig);
        }
        policy::set_limit(&env, &asset, &SpendingLimit { max_amount, window });
        events::emit_config_changed(&env, symbol_short!("limit"), window);
        Ok(())
    }

    pub fn clear_spending_limit(env: Env, asset: Asset) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        storage::load_config(&env)?;
        policy::clear_limit(&env, &asset);
        events::emit_config_changed(&env, symbol_short!("limit"), 0);
        Ok(())
    }

    pub fn set_recovery_config(env: Env, recovery_config: RecoveryConfig) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let mut config = storage::load_config(&env)?;
        let recovery = require_recovery(&config)?;
        SocialRecoveryClient::new(&env, &recovery)
            .update_config(&env.current_contract_address(), &recovery_config);
        config.recovery_config = Some(recovery_config);
        storage::store_config(&env, &config);
        Ok(())
    }

    // ── Guardians ────────────────────────────────────────────────────────────

    /// Add a guardian bound to `signer`. With a lifecycle controller this
    /// starts the activation delay and returns the pending id; without one
    /// the credential is issued immediately.
    pub fn add_guardian(
        env: Env,
        guardian: Address,
        signer: BytesN<20>,
        reason: String,
    ) -> Result<Option<u64>, VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        let vault = env.current_contract_address();

        if emergency::is_emergency_guardian(&env, &guardian) {
            return Err(VaultError::GuardianConflict);
        }
        if guardians::signer_holder(&env, &config, &signer).is_some() {
            return Err(VaultError::SignerInUse);
        }

        let registry = GuardianRegistryClient::new(&env, &config.registry);
        match &config.lifecycle {
            Some(lifecycle) => {
                let id = GuardianLifecycleClient::new(&env, lifecycle)
                    .initiate_addition(&vault, &guardian, &signer, &reason);
                Ok(Some(id))
            }
            None => {
                registry.issue(&vault, &guardian, &signer);
                Ok(None)
            }
        }
    }

    /// Activate a pending guardian whose delay has passed and issue its
    /// credential. Anyone may call.
    pub fn activate_guardian(env: Env, pending_id: u64) -> Result<(), VaultError> {
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        let lifecycle = GuardianLifecycleClient::new(&env, &require_lifecycle(&config)?);
        let vault = env.current_contract_address();

        let pending = lifecycle
            .get_pending(&pending_id)
            .filter(|p| p.vault == vault && p.state != PendingState::Cancelled)
            .ok_or(VaultError::PendingNotFound)?;
        if emergency::is_emergency_guardian(&env, &pending.guardian) {
            return Err(VaultError::GuardianConflict);
        }
        if pending.state == PendingState::Open {
            lifecycle.activate(&pending_id, &vault);
        }

        // Issue against the current record so a signer rotated after a direct
        // activation is honoured.
        let record = lifecycle
            .get_guardian(&vault, &pending.guardian)
            .filter(|r| r.status == GuardianStatus::Active)
            .ok_or(VaultError::PendingNotFound)?;
        let registry = GuardianRegistryClient::new(&env, &config.registry);
        if !registry.is_guardian(&vault, &record.guardian) {
            registry.issue(&vault, &record.guardian, &record.signer);
        }
        Ok(())
    }

    pub fn cancel_guardian_addition(
        env: Env,
        pending_id: u64,
        reason: String,
    ) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        GuardianLifecycleClient::new(&env, &require_lifecycle(&config)?).cancel(
            &pending_id,
            &env.current_contract_address(),
            &reason,
        );
        Ok(())
    }

    /// Remove a guardian immediately. Refused when the remaining active
    /// guardians could no longer meet the quorum. A guardian activated on the
    /// lifecycle controller but never credentialed is removed there alone.
    pub fn remove_guardian(env: Env, guardian: Address) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        let vault = env.current_contract_address();
        let registry = GuardianRegistryClient::new(&env, &config.registry);

        let credentialed = registry.is_guardian(&vault, &guardian);
        let lifecycle_active = guardians::is_lifecycle_active(&env, &config, &guardian);
        if !credentialed && !lifecycle_active {
            return Err(VaultError::GuardianNotFound);
        }
        if guardians::is_active(&env, &config, &guardian) {
            let remaining = guardians::active_count(&env, &config).saturating_sub(1);
            if remaining < config.quorum {
                return Err(VaultError::QuorumExceedsGuardians);
            }
        }

        if let (Some(lifecycle), true) = (&config.lifecycle, lifecycle_active) {
            GuardianLifecycleClient::new(&env, lifecycle).remove(&vault, &guardian);
        }
        if credentialed {
            registry.revoke(&vault, &guardian);
        }
        Ok(())
    }

    pub fn set_guardian_expiry(
        env: Env,
        guardian: Address,
        expires_at: Option<u64>,
    ) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        GuardianLifecycleClient::new(&env, &require_lifecycle(&config)?).set_expiry(
            &env.current_contract_address(),
            &guardian,
            &expires_at,
        );
        Ok(())
    }

    /// Rebind an active guardian to a new signing key.
    pub fn rotate_guardian_signer(
        env: Env,
        guardian: Address,
        signer: BytesN<20>,
    ) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        let vault = env.current_contract_address();
        let registry = GuardianRegistryClient::new(&env, &config.registry);

        if !registry.is_guardian(&vault, &guardian) {
            return Err(VaultError::GuardianNotFound);
        }
        if guardians::signer_holder(&env, &config, &signer).is_some() {
            return Err(VaultError::SignerInUse);
        }

        if let Some(lifecycle) = &config.lifecycle {
            GuardianLifecycleClient::new(&env, lifecycle).rotate_signer(&vault, &guardian, &signer);
        }
        registry.revoke(&vault, &guardian);
        registry.issue(&vault, &guardian, &signer);
        Ok(())
    }

    // ── Recovery hooks ───────────────────────────────────────────────────────

    /// Cancel a pending recovery proposal against this vault.
    pub fn cancel_recovery(env: Env, proposal_id: u64) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        SocialRecoveryClient::new(&env, &require_recovery(&config)?)
            .cancel_recovery(&proposal_id, &env.current_contract_address());
        Ok(())
    }

    /// Hand ownership to `new_owner`. Only the configured recovery controller
    /// may call this; any open emergency unlock is discarded.
    pub fn complete_recovery(env: Env, proposal_id: u64, new_owner: Address) -> Result<(), VaultError> {
        let config = storage::load_config(&env)?;
        require_recovery(&config)?.require_auth();
        let _guard = enter(&env)?;

        let previous = storage::load_owner(&env)?;
        storage::store_owner(&env, &new_owner);
        if let Some(unlock_id) = emergency::clear(&env) {
            events::emit_unlock_cancelled(&env, unlock_id);
        }
        log!(&env, "ownership recovered via proposal {}", proposal_id);
        events::emit_ownership_transferred(&env, previous, new_owner, Some(proposal_id));
        Ok(())
    }

    // ── Funds ────────────────────────────────────────────────────────────────

    /// Credit `amount` of `asset` from `from`. Never paused.
    pub fn deposit(env: Env, from: Address, asset: Asset, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if let Asset::Token(token) = &asset {
            if *token == env.current_contract_address() {
                return Err(VaultError::UnsupportedAsset);
            }
        }

        ledger::pull(&env, &config, &asset, &from, amount)?;
        ledger::credit(&env, &asset, amount)?;
        ttl::extend_instance(&env);
        events::emit_deposit(&env, from, asset, amount);
        Ok(())
    }

    /// Release funds on the strength of guardian signatures over
    /// [`Self::withdrawal_digest`]. Anyone may submit.
    pub fn submit_withdrawal(
        env: Env,
        request: WithdrawalRequest,
        signatures: SignatureSet,
        mode: DedupMode,
    ) -> Result<WithdrawalOutcome, VaultError> {
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        let outcome = withdrawal::submit(&env, &config, &request, &signatures, mode)?;
        ttl::extend_instance(&env);
        Ok(outcome)
    }

    // ── Emergency override ───────────────────────────────────────────────────

    pub fn add_emergency_guardian(env: Env, guardian: Address) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;
        if guardians::is_known(&env, &config, &guardian) {
            return Err(VaultError::GuardianConflict);
        }
        if !emergency::guardians().insert(&env, &env.current_contract_address(), &guardian) {
            return Err(VaultError::EmergencyGuardianExists);
        }
        Ok(())
    }

    /// Refused when the remaining emergency guardians could no longer meet
    /// the emergency quorum.
    pub fn remove_emergency_guardian(env: Env, guardian: Address) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;
        if !emergency::is_emergency_guardian(&env, &guardian) {
            return Err(VaultError::NotEmergencyGuardian);
        }
        if emergency::guardian_count(&env).saturating_sub(1) < config.emergency_quorum {
            return Err(VaultError::QuorumExceedsGuardians);
        }
        emergency::guardians().remove(&env, &env.current_contract_address(), &guardian);
        Ok(())
    }

    pub fn set_emergency_quorum(env: Env, quorum: u32) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let mut config = storage::load_config(&env)?;
        require_emergency(&config)?;
        if quorum == 0 {
            return Err(VaultError::InvalidConfig);
        }
        if quorum > emergency::guardian_count(&env) {
            return Err(VaultError::QuorumExceedsGuardians);
        }
        config.emergency_quorum = quorum;
        storage::store_config(&env, &config);
        events::emit_config_changed(&env, symbol_short!("em_quorum"), quorum as u64);
        Ok(())
    }

    /// Open an emergency unlock. Returns its id.
    pub fn request_emergency_unlock(
        env: Env,
        asset: Asset,
        amount: i128,
        recipient: Address,
    ) -> Result<u64, VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if recipient == env.current_contract_address() {
            return Err(VaultError::InvalidRecipient);
        }

        let unlock = emergency::open(&env, asset, amount, recipient, config.emergency_timelock)?;
        events::emit_unlock_requested(
            &env,
            unlock.id,
            unlock.asset,
            unlock.amount,
            unlock.recipient,
            unlock.timelock_ends,
        );
        Ok(unlock.id)
    }

    pub fn approve_emergency_unlock(
        env: Env,
        guardian: Address,
        unlock_id: u64,
    ) -> Result<(), VaultError> {
        guardian.require_auth();
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;

        let (unlock, reached) =
            emergency::approve(&env, unlock_id, &guardian, config.emergency_quorum)?;
        events::emit_unlock_vote(&env, unlock_id, guardian, unlock.approvals);
        if reached {
            events::emit_unlock_approved(&env, unlock_id);
        }
        Ok(())
    }

    /// Release the unlocked funds, through approval or after the fallback
    /// timelock.
    pub fn execute_emergency_withdrawal(env: Env, unlock_id: u64) -> Result<EmergencyPath, VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;
        require_not_paused(&env, &config)?;

        let unlock: EmergencyUnlock = emergency::load(&env, unlock_id)?;
        let path = emergency::execution_path(&env, &unlock, config.emergency_quorum)?;
        log!(&env, "emergency withdrawal {} via path {}", unlock_id, path as u32);

        emergency::clear(&env);
        ledger::debit(&env, &unlock.asset, unlock.amount)?;
        events::emit_emergency_withdrawal(
            &env,
            unlock_id,
            path,
            unlock.asset.clone(),
            unlock.amount,
            unlock.recipient.clone(),
        );
        ledger::push(&env, &config, &unlock.asset, &unlock.recipient, unlock.amount)?;
        Ok(path)
    }

    pub fn cancel_emergency_unlock(env: Env, unlock_id: u64) -> Result<(), VaultError> {
        storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_emergency(&config)?;
        emergency::load(&env, unlock_id)?;
        emergency::clear(&env);
        events::emit_unlock_cancelled(&env, unlock_id);
        Ok(())
    }

    // ── Safe mode ────────────────────────────────────────────────────────────

    pub fn enable_safe_mode(env: Env, reason: String) -> Result<(), VaultError> {
        let owner = storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        require_safe_mode(&storage::load_config(&env)?)?;
        let count = safe_mode::toggle(&env, true, &owner, &reason)?;
        events::emit_safe_mode(&env, true, owner, reason, count);
        Ok(())
    }

    pub fn disable_safe_mode(env: Env, reason: String) -> Result<(), VaultError> {
        let owner = storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        require_safe_mode(&storage::load_config(&env)?)?;
        let count = safe_mode::toggle(&env, false, &owner, &reason)?;
        events::emit_safe_mode(&env, false, owner, reason, count);
        Ok(())
    }

    /// Owner-only withdrawal while safe mode is on. Funds go to the owner.
    pub fn owner_withdraw(env: Env, asset: Asset, amount: i128) -> Result<(), VaultError> {
        let owner = storage::require_owner(&env)?;
        let _guard = enter(&env)?;
        let config = storage::load_config(&env)?;
        require_safe_mode(&config)?;
        require_not_paused(&env, &config)?;
        safe_mode::check_owner_withdrawal(&env, &asset, amount)?;

        ledger::debit(&env, &asset, amount)?;
        events::emit_owner_withdrawal(&env, asset.clone(), amount, owner.clone());
        ledger::push(&env, &config, &asset, &owner, amount)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        storage::load_config(&env)
    }

    pub fn owner(env: Env) -> Result<Address, VaultError> {
        storage::load_owner(&env)
    }

    pub fn status(env: Env) -> Result<VaultStatus, VaultError> {
        let config = storage::load_config(&env)?;
        if pausable::is_paused(&env, &config.pausing, &env.current_contract_address()) {
            Ok(VaultStatus::Paused)
        } else if safe_mode::is_enabled(&env) {
            Ok(VaultStatus::Frozen)
        } else {
            Ok(VaultStatus::Active)
        }
    }

    pub fn balance(env: Env, asset: Asset) -> i128 {
        ledger::balance_of(&env, &asset)
    }

    pub fn is_active_guardian(env: Env, guardian: Address) -> Result<bool, VaultError> {
        let config = storage::load_config(&env)?;
        Ok(guardians::is_active(&env, &config, &guardian))
    }

    pub fn active_guardian_count(env: Env) -> Result<u32, VaultError> {
        let config = storage::load_config(&env)?;
        Ok(guardians::active_count(&env, &config))
    }

    pub fn is_nonce_used(env: Env, nonce: u64) -> bool {
        withdrawal::is_nonce_used(&env, nonce)
    }

    pub fn nonces_consumed(env: Env) -> u64 {
        withdrawal::nonces_consumed(&env)
    }

    /// The digest guardians sign for `request`.
    pub fn withdrawal_digest(env: Env, request: WithdrawalRequest) -> BytesN<32> {
        common::withdrawal_digest(&env, &env.current_contract_address(), &request).to_bytes()
    }

    /// Signatures `request` would need right now.
    pub fn effective_quorum(env: Env, request: WithdrawalRequest) -> Result<u32, VaultError> {
        let config = storage::load_config(&env)?;
        let active = guardians::active_count(&env, &config);
        Ok(policy::effective_quorum(&env, &config, &request, active).0)
    }

    pub fn reason_first_seen(env: Env, reason_hash: BytesN<32>) -> Option<u64> {
        withdrawal::reason_first_seen(&env, &reason_hash)
    }

    pub fn get_spending_limit(env: Env, asset: Asset) -> Option<SpendingLimit> {
        policy::get_limit(&env, &asset)
    }

    pub fn get_spend_window(env: Env, asset: Asset) -> Option<SpendWindow> {
        policy::get_window(&env, &asset)
    }

    pub fn get_emergency_unlock(env: Env) -> Option<EmergencyUnlock> {
        emergency::current(&env)
    }

    pub fn has_approved_unlock(env: Env, unlock_id: u64, guardian: Address) -> bool {
        emergency::has_approved(&env, unlock_id, &guardian)
    }

    pub fn is_emergency_guardian(env: Env, guardian: Address) -> bool {
        emergency::is_emergency_guardian(&env, &guardian)
    }

    pub fn emergency_guardians(env: Env) -> Vec<Address> {
        emergency::guardians().members(&env, &env.current_contract_address())
    }

    pub fn get_safe_mode(env: Env) -> SafeModeState {
        safe_mode::state(&env)
    }

    pub fn safe_mode_history(env: Env, start: u32, limit: u32) -> Vec<SafeModeToggle> {
        safe_mode::history(&env, start, limit)
    }
}
