//! Guardian membership as seen by the vault.
//!
//! A guardian is active when the registry holds its credential and, if a
//! lifecycle controller is configured, the controller reports it active
//! (activated and not expired).

use common::{GuardianLifecycleClient, GuardianRegistryClient, GuardianStatus, SignerKey};
use soroban_sdk::{Address, Env};

use crate::storage::VaultConfig;

pub fn is_active(env: &Env, config: &VaultConfig, guardian: &Address) -> bool {
    let vault = env.current_contract_address();
    if !GuardianRegistryClient::new(env, &config.registry).is_guardian(&vault, guardian) {
        return false;
    }
    match &config.lifecycle {
        Some(lifecycle) => GuardianLifecycleClient::new(env, lifecycle).is_active(&vault, guardian),
        None => true,
    }
}

pub fn active_count(env: &Env, config: &VaultConfig) -> u32 {
    let vault = env.current_contract_address();
    let registry = GuardianRegistryClient::new(env, &config.registry);
    match &config.lifecycle {
        Some(lifecycle) => {
            let mut count = 0u32;
            for guardian in GuardianLifecycleClient::new(env, lifecycle)
                .active_guardians(&vault)
                .iter()
            {
                if registry.is_guardian(&vault, &guardian) {
                    count += 1;
                }
            }
            count
        }
        None => registry.guardian_count(&vault),
    }
}

/// Active guardian bound to `signer`, if any.
pub fn active_guardian_for(env: &Env, config: &VaultConfig, signer: &SignerKey) -> Option<Address> {
    let vault = env.current_contract_address();
    let guardian = GuardianRegistryClient::new(env, &config.registry).guardian_of(&vault, signer)?;
    match &config.lifecycle {
        Some(lifecycle) => GuardianLifecycleClient::new(env, lifecycle)
            .is_active(&vault, &guardian)
            .then_some(guardian),
        None => Some(guardian),
    }
}

/// Credentialed in the registry, or pending or active in the lifecycle
/// controller (a guardian activated directly on the controller holds no
/// credential until the vault issues it).
pub fn is_known(env: &Env, config: &VaultConfig, who: &Address) -> bool {
    let vault = env.current_contract_address();
    if GuardianRegistryClient::new(env, &config.registry).is_guardian(&vault, who) {
        return true;
    }
    match &config.lifecycle {
        Some(lifecycle) => {
            let client = GuardianLifecycleClient::new(env, lifecycle);
            client.is_pending(&vault, who) || lifecycle_active(env, &client, who)
        }
        None => false,
    }
}

fn lifecycle_active(env: &Env, client: &GuardianLifecycleClient, who: &Address) -> bool {
    client
        .get_guardian(&env.current_contract_address(), who)
        .is_some_and(|record| record.status == GuardianStatus::Active)
}

/// Whether the lifecycle controller holds `who` as an active guardian.
pub fn is_lifecycle_active(env: &Env, config: &VaultConfig, who: &Address) -> bool {
    match &config.lifecycle {
        Some(lifecycle) => lifecycle_active(env, &GuardianLifecycleClient::new(env, lifecycle), who),
        None => false,
    }
}

/// Guardian already bound to `signer`: the registry's holder, or a guardian
/// pending or active in the lifecycle controller under that key.
pub fn signer_holder(env: &Env, config: &VaultConfig, signer: &SignerKey) -> Option<Address> {
    let vault = env.current_contract_address();
    if let Some(holder) = GuardianRegistryClient::new(env, &config.registry).guardian_of(&vault, signer) {
        return Some(holder);
    }
    let client = GuardianLifecycleClient::new(env, config.lifecycle.as_ref()?);
    let mut candidates = client.pending_guardians(&vault);
    candidates.append(&client.active_guardians(&vault));
    candidates.iter().find(|guardian| {
        client
            .get_guardian(&vault, guardian)
            .is_some_and(|record| record.signer == *signer)
    })
}
