//! Vault configuration and storage keys.

use common::RecoveryConfig;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::VaultError;

// ── Storage keys ─────────────────────────────────────────────────────────────

pub(crate) const CONFIG: Symbol = symbol_short!("CONFIG");
pub(crate) const OWNER: Symbol = symbol_short!("OWNER");

/// Basis-point denominator.
pub const BPS: u32 = 10_000;
/// Enhanced approval ratio applied when none is configured (75 %).
pub const DEFAULT_ENHANCED_BPS: u32 = 7_500;
/// Fallback delay on an emergency unlock (30 days).
pub const DEFAULT_EMERGENCY_TIMELOCK: u64 = 30 * 24 * 60 * 60;

/// Everything a vault is wired to, and the parameters it enforces.
///
/// Absent controllers switch their capability off:
/// no `lifecycle` means guardians are credentialed immediately, no
/// `recovery` means ownership only changes through the owner, no `pausing`
/// means the vault is never paused, and no `risk_policy` means enhanced
/// approval is triggered by spending limits alone.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub registry: Address,
    /// Stellar Asset Contract used for [`common::Asset::Native`].
    pub native_token: Address,
    pub lifecycle: Option<Address>,
    /// Activation delay registered with the lifecycle controller.
    pub guardian_delay: u64,
    pub recovery: Option<Address>,
    pub recovery_config: Option<RecoveryConfig>,
    pub pausing: Option<Address>,
    pub risk_policy: Option<Address>,
    pub emergency_enabled: bool,
    pub safe_mode_enabled: bool,
    /// Distinct active guardian signatures needed for a withdrawal.
    pub quorum: u32,
    /// Share of active guardians (bps) needed when enhanced approval applies.
    pub enhanced_bps: u32,
    pub emergency_quorum: u32,
    pub emergency_timelock: u64,
}

impl VaultConfig {
    /// Registry and native token only; every optional capability off.
    pub fn with_defaults(registry: Address, native_token: Address) -> Self {
        VaultConfig {
            registry,
            native_token,
            lifecycle: None,
            guardian_delay: 0,
            recovery: None,
            recovery_config: None,
            pausing: None,
            risk_policy: None,
            emergency_enabled: false,
            safe_mode_enabled: false,
            quorum: 1,
            enhanced_bps: DEFAULT_ENHANCED_BPS,
            emergency_quorum: 1,
            emergency_timelock: DEFAULT_EMERGENCY_TIMELOCK,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), VaultError> {
        if self.quorum == 0 || self.enhanced_bps == 0 || self.enhanced_bps > BPS {
            return Err(VaultError::InvalidConfig);
        }
        if self.lifecycle.is_some() && self.guardian_delay == 0 {
            return Err(VaultError::InvalidConfig);
        }
        if self.recovery.is_some() != self.recovery_config.is_some() {
            return Err(VaultError::InvalidConfig);
        }
        if self.emergency_enabled && (self.emergency_quorum == 0 || self.emergency_timelock == 0) {
            return Err(VaultError::InvalidConfig);
        }
        Ok(())
    }
}

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub(crate) fn load_config(env: &Env) -> Result<VaultConfig, VaultError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(VaultError::NotInitialized)
}

pub(crate) fn store_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub(crate) fn load_owner(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(VaultError::NotInitialized)
}

pub(crate) fn store_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Load the owner and require its authorisation.
pub(crate) fn require_owner(env: &Env) -> Result<Address, VaultError> {
    let owner = load_owner(env)?;
    owner.require_auth();
    Ok(owner)
}
