//! # Guardian Vault Testing Framework
//!
//! Reusable harness for the vault contract suite, supporting property-based
//! testing, invariant checking, state exploration and a declarative scenario
//! DSL.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             Core TestEnv, VaultHarness, guardian keys
//! ├── generators.rs      Property-based test value generators
//! ├── invariants.rs      Vault invariants over snapshots
//! ├── state_explorer.rs  Action-sequence exploration with a withdrawal oracle
//! └── scenario_dsl.rs    Given-When-Then scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{HarnessOptions, TestEnv, VaultHarness};
//!
//! let env = TestEnv::new();
//! let harness = VaultHarness::new(&env, HarnessOptions::new(3, 2));
//! let req = harness.request(1_000, 1);
//! let outcome = harness.submit(&req, &harness.sign(&req, &[0, 1]));
//! ```

extern crate std;

pub mod generators;
pub mod invariants;
pub mod scenario_dsl;

use common::{signer_key_from_public_key, Asset, DedupMode, RecoveryConfig, SignatureSet, WithdrawalRequest};
use guardian_lifecycle::{GuardianLifecycleContract, GuardianLifecycleContractClient};
use guardian_registry::{GuardianRegistryContract, GuardianRegistryContractClient};
use pausing_controller::{PausingContract, PausingContractClient};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use social_recovery::{SocialRecoveryContract, SocialRecoveryContractClient};
use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, BytesN, Env, String, Vec,
};
use vault::storage::VaultConfig;
use vault::withdrawal::WithdrawalOutcome;
use vault::{VaultContract, VaultContractClient, VaultStatus};

pub const DAY: u64 = 24 * 60 * 60;

/// Ledger time at which every harness starts.
pub const GENESIS: u64 = 1_000;

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with time control and address helpers.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(GENESIS);
        Self { env }
    }

    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn generate_addresses(&self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a Stellar Asset Contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }

    pub fn string(&self, text: &str) -> String {
        String::from_str(&self.env, text)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Guardian Keys ────────────────────────────────────────────────────────────

/// A guardian identity plus the secp256k1 key it signs withdrawals with.
#[derive(Clone)]
pub struct GuardianKey {
    pub address: Address,
    pub secret: SecretKey,
    pub signer: BytesN<20>,
}

impl GuardianKey {
    /// Deterministic key from `seed`. Seeds must be non-zero.
    pub fn new(env: &Env, seed: u8) -> Self {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[seed; 32]).expect("seed yields a valid key");
        let public = PublicKey::from_secret_key(&secp, &secret).serialize_uncompressed();
        Self {
            address: Address::generate(env),
            secret,
            signer: signer_key_from_public_key(env, &BytesN::from_array(env, &public)),
        }
    }

    /// Recoverable signature over `digest` as `r ‖ s ‖ v` with `v` in {27, 28}.
    pub fn sign(&self, env: &Env, digest: &BytesN<32>) -> BytesN<65> {
        let secp = Secp256k1::new();
        let msg = Message::from_slice(&digest.to_array()).expect("32-byte digest");
        let (recid, compact) = secp
            .sign_ecdsa_recoverable(&msg, &self.secret)
            .serialize_compact();
        let mut raw = [0u8; 65];
        raw[..64].copy_from_slice(&compact);
        raw[64] = 27 + recid.to_i32() as u8;
        BytesN::from_array(env, &raw)
    }
}

/// Standard signature set from `keys`, sorted by signer key.
pub fn sign_sorted(env: &Env, digest: &BytesN<32>, keys: &[&GuardianKey]) -> SignatureSet {
    let mut keys = keys.to_vec();
    keys.sort_by_key(|k| k.signer.to_array());
    let mut sigs = Vec::new(env);
    for key in keys {
        sigs.push_back(key.sign(env, digest));
    }
    SignatureSet::Standard(sigs)
}

// ── Risk Policy Stub ─────────────────────────────────────────────────────────

/// Risk policy that flags every request for enhanced approval.
#[contract]
pub struct FlagAllPolicy;

#[contractimpl]
impl FlagAllPolicy {
    pub fn requires_enhanced_approval(
        _env: Env,
        _vault: Address,
        _asset: Asset,
        _amount: i128,
        _recipient: Address,
    ) -> bool {
        true
    }
}

// ── Vault Harness ────────────────────────────────────────────────────────────

/// Which capabilities a harness wires in, and how it is seeded.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub guardians: u8,
    pub quorum: u32,
    /// Activation delay; `None` deploys no lifecycle controller.
    pub lifecycle_delay: Option<u64>,
    pub recovery: Option<RecoveryConfig>,
    pub pausing: bool,
    pub emergency_guardians: u32,
    pub emergency_quorum: u32,
    pub safe_mode: bool,
    pub flag_all: bool,
    /// Native balance deposited after setup.
    pub funded: i128,
}

impl HarnessOptions {
    pub fn new(guardians: u8, quorum: u32) -> Self {
        Self {
            guardians,
            quorum,
            lifecycle_delay: None,
            recovery: None,
            pausing: false,
            emergency_guardians: 0,
            emergency_quorum: 1,
            safe_mode: false,
            flag_all: false,
            funded: 100_000,
        }
    }

    pub fn with_lifecycle(mut self, delay: u64) -> Self {
        self.lifecycle_delay = Some(delay);
        self
    }

    pub fn with_recovery(mut self, config: RecoveryConfig) -> Self {
        self.recovery = Some(config);
        self
    }

    pub fn with_pausing(mut self) -> Self {
        self.pausing = true;
        self
    }

    pub fn with_emergency(mut self, guardians: u32, quorum: u32) -> Self {
        self.emergency_guardians = guardians;
        self.emergency_quorum = quorum;
        self
    }

    pub fn with_safe_mode(mut self) -> Self {
        self.safe_mode = true;
        self
    }

    pub fn with_flag_all(mut self) -> Self {
        self.flag_all = true;
        self
    }

    pub fn funded(mut self, amount: i128) -> Self {
        self.funded = amount;
        self
    }
}

/// Registry, optional controllers, a native SAC and an initialized vault with
/// its founding guardians active.
pub struct VaultHarness<'a> {
    pub env: &'a TestEnv,
    pub vault: VaultContractClient<'static>,
    pub registry: GuardianRegistryContractClient<'static>,
    pub lifecycle: Option<GuardianLifecycleContractClient<'static>>,
    pub recovery: Option<SocialRecoveryContractClient<'static>>,
    pub pausing: Option<PausingContractClient<'static>>,
    pub native: Address,
    pub owner: Address,
    pub pause_admin: Address,
    pub guardians: std::vec::Vec<GuardianKey>,
    pub emergency: std::vec::Vec<Address>,
}

impl<'a> VaultHarness<'a> {
    pub fn new(env: &'a TestEnv, options: HarnessOptions) -> Self {
        let e = &env.env;
        let registry_id = e.register(GuardianRegistryContract, ());
        let native = env.deploy_token();
        let owner = env.generate_address();
        let pause_admin = env.generate_address();

        let mut config = VaultConfig::with_defaults(registry_id.clone(), native.clone());
        let lifecycle = options.lifecycle_delay.map(|delay| {
            let id = e.register(GuardianLifecycleContract, ());
            config.lifecycle = Some(id.clone());
            config.guardian_delay = delay;
            GuardianLifecycleContractClient::new(e, &id)
        });
        let recovery = options.recovery.clone().map(|recovery_config| {
            let id = e.register(SocialRecoveryContract, ());
            config.recovery = Some(id.clone());
            config.recovery_config = Some(recovery_config);
            SocialRecoveryContractClient::new(e, &id)
        });
        let pausing = options.pausing.then(|| {
            let id = e.register(PausingContract, ());
            config.pausing = Some(id.clone());
            let client = PausingContractClient::new(e, &id);
            client.initialize(&pause_admin);
            client
        });
        if options.flag_all {
            config.risk_policy = Some(e.register(FlagAllPolicy, ()));
        }
        config.emergency_enabled = options.emergency_guardians > 0;
        config.safe_mode_enabled = options.safe_mode;

        let vault = VaultContractClient::new(e, &e.register(VaultContract, ()));
        vault.initialize(&owner, &config);

        let harness = Self {
            env,
            vault,
            registry: GuardianRegistryContractClient::new(e, &registry_id),
            lifecycle,
            recovery,
            pausing,
            native,
            owner,
            pause_admin,
            guardians: std::vec::Vec::new(),
            emergency: std::vec::Vec::new(),
        };
        harness.seed(options)
    }

    fn seed(mut self, options: HarnessOptions) -> Self {
        let mut pending = std::vec::Vec::new();
        for seed in 1..=options.guardians {
            let (key, id) = self.add_guardian(seed);
            pending.extend(id);
            self.guardians.push(key);
        }
        if let Some(delay) = options.lifecycle_delay {
            if !pending.is_empty() {
                self.env.advance_time(delay);
                for id in pending {
                    self.vault.activate_guardian(&id);
                }
            }
        }
        if options.guardians > 0 {
            self.vault.set_quorum(&options.quorum);
        }

        for _ in 0..options.emergency_guardians {
            let member = self.env.generate_address();
            self.vault.add_emergency_guardian(&member);
            self.emergency.push(member);
        }
        if options.emergency_guardians > 0 {
            self.vault.set_emergency_quorum(&options.emergency_quorum);
        }

        if options.funded > 0 {
            self.deposit(options.funded);
        }
        self
    }

    /// Propose a guardian with key `seed`. Returns the key and, under a
    /// lifecycle controller, the pending id.
    pub fn add_guardian(&self, seed: u8) -> (GuardianKey, Option<u64>) {
        let key = GuardianKey::new(&self.env.env, seed);
        let id = self
            .vault
            .add_guardian(&key.address, &key.signer, &self.env.string("guardian"));
        (key, id)
    }

    pub fn guardian(&self, i: usize) -> &GuardianKey {
        &self.guardians[i]
    }

    /// Deposit `amount` native units from a freshly minted account.
    pub fn deposit(&self, amount: i128) {
        let from = self.env.generate_address();
        self.env.mint_tokens(&self.native, &from, amount);
        self.vault.deposit(&from, &Asset::Native, &amount);
    }

    /// Native withdrawal to a fresh recipient, valid for one day.
    pub fn request(&self, amount: i128, nonce: u64) -> WithdrawalRequest {
        WithdrawalRequest {
            asset: Asset::Native,
            amount,
            recipient: self.env.generate_address(),
            nonce,
            expiration: self.env.timestamp() + DAY,
            reason_hash: None,
        }
    }

    pub fn digest(&self, request: &WithdrawalRequest) -> BytesN<32> {
        self.vault.withdrawal_digest(request)
    }

    /// Signatures from the founding guardians at `indices`.
    pub fn sign(&self, request: &WithdrawalRequest, indices: &[usize]) -> SignatureSet {
        let keys: std::vec::Vec<&GuardianKey> = indices.iter().map(|i| &self.guardians[*i]).collect();
        sign_sorted(&self.env.env, &self.digest(request), &keys)
    }

    pub fn submit(&self, request: &WithdrawalRequest, signatures: &SignatureSet) -> WithdrawalOutcome {
        self.vault
            .submit_withdrawal(request, signatures, &DedupMode::StrictlyIncreasing)
    }

    pub fn pause(&self) {
        if let Some(pausing) = &self.pausing {
            pausing.pause(&self.pause_admin, &self.vault.address, &self.env.string("drill"));
        }
    }

    pub fn unpause(&self) {
        if let Some(pausing) = &self.pausing {
            pausing.unpause(&self.pause_admin, &self.vault.address);
        }
    }

    pub fn token_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env.env, &self.native).balance(who)
    }

    /// Everything invariants look at.
    pub fn snapshot(&self) -> VaultSnapshot {
        let config = self.vault.get_config();
        VaultSnapshot {
            timestamp: self.env.timestamp(),
            ledger_balance: self.vault.balance(&Asset::Native),
            custody_balance: self.token_balance(&self.vault.address),
            nonces_consumed: self.vault.nonces_consumed(),
            active_guardians: self.vault.active_guardian_count(),
            quorum: config.quorum,
            status: self.vault.status(),
            safe_mode: self.vault.get_safe_mode().enabled,
            open_unlock: self.vault.get_emergency_unlock().is_some(),
        }
    }
}

/// Observable vault state at one point in time.
#[derive(Debug, Clone)]
pub struct VaultSnapshot {
    pub timestamp: u64,
    /// Native balance in the vault's own ledger.
    pub ledger_balance: i128,
    /// Native tokens actually held by the vault contract.
    pub custody_balance: i128,
    pub nonces_consumed: u64,
    pub active_guardians: u32,
    pub quorum: u32,
    pub status: VaultStatus,
    pub safe_mode: bool,
    pub open_unlock: bool,
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Ok,
    /// The withdrawal was decided and rejected with this reason code.
    Rejected(u32),
    /// The call failed with a contract error code.
    ExpectedError(u32),
    UnexpectedError(std::string::String),
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub transitions_observed: usize,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            transitions_observed: 0,
        }
    }

    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
