//! Client traits for calls between the vault and its controllers.
//!
//! Controllers take the vault address explicitly and authorise mutations with
//! `vault.require_auth()`, which the host satisfies when the vault contract is
//! the direct invoker. Errors raised by a callee propagate unchanged to the
//! top-level caller.

use soroban_sdk::{contractclient, Address, BytesN, Env, String, Vec};

use crate::vault_types::{Asset, GuardianRecord, PendingGuardian, RecoveryConfig};

#[contractclient(name = "GuardianRegistryClient")]
pub trait GuardianRegistryInterface {
    fn issue(env: Env, vault: Address, guardian: Address, signer: BytesN<20>);
    fn revoke(env: Env, vault: Address, guardian: Address);
    fn is_guardian(env: Env, vault: Address, guardian: Address) -> bool;
    fn guardian_of(env: Env, vault: Address, signer: BytesN<20>) -> Option<Address>;
    fn guardian_count(env: Env, vault: Address) -> u32;
}

#[contractclient(name = "GuardianLifecycleClient")]
pub trait GuardianLifecycleInterface {
    fn register_vault(env: Env, vault: Address, delay: u64);
    fn update_delay(env: Env, vault: Address, delay: u64);
    fn initiate_addition(
        env: Env,
        vault: Address,
        guardian: Address,
        signer: BytesN<20>,
        reason: String,
    ) -> u64;
    fn activate(env: Env, pending_id: u64, vault: Address) -> GuardianRecord;
    fn cancel(env: Env, pending_id: u64, vault: Address, reason: String);
    fn remove(env: Env, vault: Address, guardian: Address);
    fn set_expiry(env: Env, vault: Address, guardian: Address, expires_at: Option<u64>);
    fn rotate_signer(env: Env, vault: Address, guardian: Address, signer: BytesN<20>);
    fn is_active(env: Env, vault: Address, guardian: Address) -> bool;
    fn get_guardian(env: Env, vault: Address, guardian: Address) -> Option<GuardianRecord>;
    fn get_pending(env: Env, pending_id: u64) -> Option<PendingGuardian>;
    fn is_pending(env: Env, vault: Address, guardian: Address) -> bool;
    fn active_count(env: Env, vault: Address) -> u32;
    fn active_guardians(env: Env, vault: Address) -> Vec<Address>;
    fn pending_guardians(env: Env, vault: Address) -> Vec<Address>;
}

#[contractclient(name = "SocialRecoveryClient")]
pub trait SocialRecoveryInterface {
    fn register_vault(env: Env, vault: Address, config: RecoveryConfig);
    fn update_config(env: Env, vault: Address, config: RecoveryConfig);
    fn cancel_recovery(env: Env, proposal_id: u64, caller: Address);
}

#[contractclient(name = "PausingClient")]
pub trait PausingInterface {
    fn is_paused(env: Env, vault: Address) -> bool;
}

/// Vault surface used by the recovery controller.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn owner(env: Env) -> Address;
    fn is_active_guardian(env: Env, guardian: Address) -> bool;
    fn complete_recovery(env: Env, proposal_id: u64, new_owner: Address);
}

/// External risk-policy layer consulted before each guardian withdrawal.
#[contractclient(name = "RiskPolicyClient")]
pub trait RiskPolicyInterface {
    fn requires_enhanced_approval(
        env: Env,
        vault: Address,
        asset: Asset,
        amount: i128,
        recipient: Address,
    ) -> bool;
}
