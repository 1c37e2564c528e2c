#![no_std]

//! # Guardian Lifecycle Controller
//!
//! Tracks the state of every guardian of every registered vault:
//!
//! ```text
//! None ──► Pending ──► Active ──► Removed
//!             │                      ▲
//!             └──────────────────────┘  (cancel before activation_time)
//! ```
//!
//! An addition only becomes active once `activation_time = added_at + delay`
//! has passed and someone calls [`GuardianLifecycleContract::activate`].
//! Active guardians may carry an expiry after which they no longer count,
//! and may rotate their signing key. Removal is immediate; re-adding a
//! removed guardian restarts the delay.

pub mod events;
pub mod lifecycle;


use common::{ttl, GuardianRecord, GuardianStatus, PendingGuardian, PendingState};
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, BytesN, Env, String, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LifecycleError {
    VaultNotRegistered = 200,
    VaultAlreadyRegistered = 201,
    InvalidDelay = 202,
    AlreadyActive = 203,
    AlreadyPending = 204,
    PendingNotFound = 205,
    WrongVault = 206,
    ActivationNotReached = 207,
    ActivationTimeReached = 208,
    PendingClosed = 209,
    NotActive = 210,
    InvalidExpiry = 211,
}

fn require_registered(env: &Env, vault: &Address) -> Result<u64, LifecycleError> {
    lifecycle::get_delay(env, vault).ok_or(LifecycleError::VaultNotRegistered)
}

fn load_open_pending(
    env: &Env,
    pending_id: u64,
    vault: &Address,
) -> Result<PendingGuardian, LifecycleError> {
    let pending = lifecycle::load_pending(env, pending_id).ok_or(LifecycleError::PendingNotFound)?;
    if pending.vault != *vault {
        return Err(LifecycleError::WrongVault);
    }
    if pending.state != PendingState::Open {
        return Err(LifecycleError::PendingClosed);
    }
    Ok(pending)
}

fn load_active(
    env: &Env,
    vault: &Address,
    guardian: &Address,
) -> Result<GuardianRecord, LifecycleError> {
    match lifecycle::load_record(env, vault, guardian) {
        Some(record) if record.status == GuardianStatus::Active => Ok(record),
        _ => Err(LifecycleError::NotActive),
    }
}

#[contract]
pub struct GuardianLifecycleContract;

#[contractimpl]
impl GuardianLifecycleContract {
    /// Register `vault` with a non-zero activation delay in seconds.
    pub fn register_vault(env: Env, vault: Address, delay: u64) -> Result<(), LifecycleError> {
        vault.require_auth();
        if lifecycle::get_delay(&env, &vault).is_some() {
            return Err(LifecycleError::VaultAlreadyRegistered);
        }
        if delay == 0 {
            return Err(LifecycleError::InvalidDelay);
        }
        lifecycle::set_delay(&env, &vault, delay);
        ttl::extend_instance(&env);
        Ok(())
    }

    /// Change the delay applied to future additions. Pending entries keep the
    /// activation time they were created with.
    pub fn update_delay(env: Env, vault: Address, delay: u64) -> Result<(), LifecycleError> {
        vault.require_auth();
        require_registered(&env, &vault)?;
        if delay == 0 {
            return Err(LifecycleError::InvalidDelay);
        }
        lifecycle::set_delay(&env, &vault, delay);
        Ok(())
    }

    /// Start the activation delay for `guardian`. Returns the pending id.
    pub fn initiate_addition(
        env: Env,
        vault: Address,
        guardian: Address,
        signer: BytesN<20>,
        reason: String,
    ) -> Result<u64, LifecycleError> {
        vault.require_auth();
        let delay = require_registered(&env, &vault)?;

        if lifecycle::active_set().contains(&env, &vault, &guardian) {
            return Err(LifecycleError::AlreadyActive);
        }
        if lifecycle::pending_set().contains(&env, &vault, &guardian) {
            return Err(LifecycleError::AlreadyPending);
        }

        let now = env.ledger().timestamp();
        let activation_time = now.saturating_add(delay);
        let id = lifecycle::next_pending_id(&env);

        lifecycle::save_pending(
            &env,
            &PendingGuardian {
                id,
                vault: vault.clone(),
                guardian: guardian.clone(),
                signer: signer.clone(),
                reason: reason.clone(),
                added_at: now,
                activation_time,
                state: PendingState::Open,
            },
        );
        lifecycle::set_pending_of(&env, &vault, &guardian, id);
        lifecycle::pending_set().insert(&env, &vault, &guardian);
        lifecycle::save_record(
            &env,
            &GuardianRecord {
                vault: vault.clone(),
                guardian: guardian.clone(),
                signer,
                status: GuardianStatus::Pending,
                added_at: now,
                activation_time,
                activated_at: None,
                expires_at: None,
                removed_at: None,
            },
        );
        ttl::extend_instance(&env);

        events::emit_guardian_added(&env, id, vault, guardian, activation_time, reason);
        Ok(id)
    }

    /// Promote a pending guardian once its activation time has been reached.
    /// Anyone may call this; the delay is the protection.
    pub fn activate(
        env: Env,
        pending_id: u64,
        vault: Address,
    ) -> Result<GuardianRecord, LifecycleError> {
        let mut pending = load_open_pending(&env, pending_id, &vault)?;
        let now = env.ledger().timestamp();
        if now < pending.activation_time {
            log!(
                &env,
                "activation early: id {}, {}s remaining",
                pending_id,
                pending.activation_time - now
            );
            return Err(LifecycleError::ActivationNotReached);
        }

        pending.state = PendingState::Activated;
        lifecycle::save_pending(&env, &pending);
        lifecycle::clear_pending_of(&env, &vault, &pending.guardian);
        lifecycle::pending_set().remove(&env, &vault, &pending.guardian);
        lifecycle::active_set().insert(&env, &vault, &pending.guardian);

        let record = GuardianRecord {
            vault: vault.clone(),
            guardian: pending.guardian.clone(),
            signer: pending.signer.clone(),
            status: GuardianStatus::Active,
            added_at: pending.added_at,
            activation_time: pending.activation_time,
            activated_at: Some(now),
            expires_at: None,
            removed_at: None,
        };
        lifecycle::save_record(&env, &record);

        events::emit_guardian_activated(&env, pending_id, vault, pending.guardian);
        Ok(record)
    }

    /// Withdraw a pending addition before its activation time.
    pub fn cancel(
        env: Env,
        pending_id: u64,
        vault: Address,
        reason: String,
    ) -> Result<(), LifecycleError> {
        vault.require_auth();
        let mut pending = load_open_pending(&env, pending_id, &vault)?;
        let now = env.ledger().timestamp();
        if now >= pending.activation_time {
            return Err(LifecycleError::ActivationTimeReached);
        }

        pending.state = PendingState::Cancelled;
        lifecycle::save_pending(&env, &pending);
        lifecycle::clear_pending_of(&env, &vault, &pending.guardian);
        lifecycle::pending_set().remove(&env, &vault, &pending.guardian);

        if let Some(mut record) = lifecycle::load_record(&env, &vault, &pending.guardian) {
            record.status = GuardianStatus::Removed;
            record.removed_at = Some(now);
            lifecycle::save_record(&env, &record);
        }

        events::emit_guardian_cancelled(&env, pending_id, vault, pending.guardian, reason);
        Ok(())
    }

    /// Remove an active guardian immediately.
    pub fn remove(env: Env, vault: Address, guardian: Address) -> Result<(), LifecycleError> {
        vault.require_auth();
        let mut record = load_active(&env, &vault, &guardian)?;

        record.status = GuardianStatus::Removed;
        record.removed_at = Some(env.ledger().timestamp());
        lifecycle::save_record(&env, &record);
        lifecycle::active_set().remove(&env, &vault, &guardian);

        events::emit_guardian_removed(&env, vault, guardian);
        Ok(())
    }

    /// Set or clear the expiry of an active guardian.
    pub fn set_expiry(
        env: Env,
        vault: Address,
        guardian: Address,
        expires_at: Option<u64>,
    ) -> Result<(), LifecycleError> {
        vault.require_auth();
        let mut record = load_active(&env, &vault, &guardian)?;
        if let Some(at) = expires_at {
            if at <= env.ledger().timestamp() {
                return Err(LifecycleError::InvalidExpiry);
            }
        }

        record.expires_at = expires_at;
        lifecycle::save_record(&env, &record);

        events::emit_guardian_expiry(&env, vault, guardian, expires_at);
        Ok(())
    }

    /// Replace the signing key of an active guardian.
    pub fn rotate_signer(
        env: Env,
        vault: Address,
        guardian: Address,
        signer: BytesN<20>,
    ) -> Result<(), LifecycleError> {
        vault.require_auth();
        let mut record = load_active(&env, &vault, &guardian)?;

        let previous = record.signer.clone();
        record.signer = signer.clone();
        lifecycle::save_record(&env, &record);

        events::emit_signer_rotated(&env, vault, guardian, previous, signer);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Active and not expired.
    pub fn is_active(env: Env, vault: Address, guardian: Address) -> bool {
        lifecycle::load_record(&env, &vault, &guardian)
            .map(|record| lifecycle::is_live(&record, env.ledger().timestamp()))
            .unwrap_or(false)
    }

    pub fn is_pending(env: Env, vault: Address, guardian: Address) -> bool {
        lifecycle::pending_set().contains(&env, &vault, &guardian)
    }

    pub fn get_guardian(env: Env, vault: Address, guardian: Address) -> Option<GuardianRecord> {
        lifecycle::load_record(&env, &vault, &guardian)
    }

    pub fn get_pending(env: Env, pending_id: u64) -> Option<PendingGuardian> {
        lifecycle::load_pending(&env, pending_id)
    }

    /// Id of the open addition for `guardian`, if any.
    pub fn pending_id_of(env: Env, vault: Address, guardian: Address) -> Option<u64> {
        lifecycle::pending_id_of(&env, &vault, &guardian)
    }

    /// Active, unexpired guardians in slot order.
    pub fn active_guardians(env: Env, vault: Address) -> Vec<Address> {
        let now = env.ledger().timestamp();
        let mut out = Vec::new(&env);
        for guardian in lifecycle::active_set().members(&env, &vault).iter() {
            if let Some(record) = lifecycle::load_record(&env, &vault, &guardian) {
                if lifecycle::is_live(&record, now) {
                    out.push_back(guardian);
                }
            }
        }
        out
    }

    pub fn pending_guardians(env: Env, vault: Address) -> Vec<Address> {
        lifecycle::pending_set().members(&env, &vault)
    }

    /// Number of active guardians, excluding expired ones.
    pub fn active_count(env: Env, vault: Address) -> u32 {
        Self::active_guardians(env, vault).len()
    }

    pub fn pending_count(env: Env, vault: Address) -> u32 {
        lifecycle::pending_set().len(&env, &vault)
    }

    /// Seconds until `pending_id` may be activated; `Some(0)` once it can be.
    /// `None` when the entry does not exist or is no longer open.
    pub fn seconds_until_active(env: Env, pending_id: u64) -> Option<u64> {
        let pending = lifecycle::load_pending(&env, pending_id)?;
        if pending.state != PendingState::Open {
            return None;
        }
        Some(
            pending
                .activation_time
                .saturating_sub(env.ledger().timestamp()),
        )
    }

    pub fn get_delay(env: Env, vault: Address) -> Option<u64> {
        lifecycle::get_delay(&env, &vault)
    }
}
