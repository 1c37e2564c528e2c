use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

/// Signing-key identity of a guardian: the last 20 bytes of the Keccak-256
/// digest of its uncompressed secp256k1 public key.
pub type SignerKey = BytesN<20>;

/// Asset held by a vault. The native asset has no contract id of its own in
/// the data model; the vault maps it to its configured native token contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    Native,
    Token(Address),
}

/// A guardian-signed withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub asset: Asset,
    pub amount: i128,
    pub recipient: Address,
    pub nonce: u64,
    /// Last ledger timestamp at which the request may execute.
    pub expiration: u64,
    /// Digest of an off-chain reason string.
    pub reason_hash: Option<BytesN<32>>,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GuardianStatus {
    None = 0,
    Pending = 1,
    Active = 2,
    Removed = 3,
}

/// Lifecycle record of one guardian of one vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianRecord {
    pub vault: Address,
    pub guardian: Address,
    pub signer: BytesN<20>,
    pub status: GuardianStatus,
    pub added_at: u64,
    pub activation_time: u64,
    pub activated_at: Option<u64>,
    pub expires_at: Option<u64>,
    pub removed_at: Option<u64>,
}

/// Where a pending addition stands.
///
/// ```text
/// Open ──► Activated   (activate, once activation_time is reached)
///   │
///   └────► Cancelled   (cancel, before activation_time)
/// ```
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PendingState {
    Open = 0,
    Activated = 1,
    Cancelled = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingGuardian {
    pub id: u64,
    pub vault: Address,
    pub guardian: Address,
    pub signer: BytesN<20>,
    pub reason: String,
    pub added_at: u64,
    pub activation_time: u64,
    pub state: PendingState,
}

/// Non-transferable guardian credential held in the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credential {
    pub vault: Address,
    pub guardian: Address,
    pub signer: BytesN<20>,
    pub issued_at: u64,
}

/// Guardian signatures attached to a withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignatureSet {
    /// `r ‖ s ‖ v`, 65 bytes each.
    Standard(Vec<BytesN<65>>),
    /// `r ‖ (s | v << 255)`, 64 bytes each.
    Packed(Vec<BytesN<64>>),
}

/// How duplicate signers are ruled out.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DedupMode {
    /// Signers must appear in strictly increasing key order.
    StrictlyIncreasing = 0,
    /// Any order; duplicates are found by a pairwise scan.
    Scan = 1,
}

/// Recovery parameters registered by a vault with the recovery controller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryConfig {
    /// Distinct guardian approvals needed.
    pub quorum: u32,
    /// Seconds after initiation during which votes are accepted.
    pub voting_window: u64,
    /// Seconds between approval and earliest execution.
    pub timelock: u64,
}
