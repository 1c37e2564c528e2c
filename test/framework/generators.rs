//! # Property-Based Test Generators
//!
//! `proptest` strategies for vault inputs: amounts, durations, signer
//! subsets and action sequences.
//!
//! Generators produce semantic values rather than raw bytes so tests reach
//! the decision logic instead of failing at decoding. Roughly a fifth of
//! values are boundary cases.

extern crate std;

use proptest::prelude::*;
use std::vec::Vec;

use super::DAY;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Largest amount the generators produce (10^15 stroops).
pub const MAX_AMOUNT: i128 = 1_000_000_000_000_000;

/// Strictly positive amounts, biased toward the edges.
pub fn positive_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        1 => Just(MAX_AMOUNT),
        8 => (1i128..=MAX_AMOUNT),
    ]
}

/// Amounts the vault must refuse outright.
pub fn invalid_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        5 => Just(0i128),
        3 => (-1_000_000i128..=-1i128),
        2 => Just(i128::MIN),
    ]
}

/// Withdrawal amounts around a vault balance of `balance`.
pub fn withdrawal_amount_strategy(balance: i128) -> impl Strategy<Value = i128> {
    prop_oneof![
        2 => Just(balance),
        1 => Just(balance + 1),
        7 => (1i128..=balance.saturating_mul(2).max(1)),
    ]
}

/// Time deltas in seconds.
pub fn duration_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(1u64),
        2 => (1u64..=3_600u64),
        3 => (1u64..=DAY),
        2 => (1u64..=7 * DAY),
        1 => Just(30 * DAY),
    ]
}

/// Ratios for enhanced approval, in basis points.
pub fn bps_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(1u32),
        1 => Just(10_000u32),
        1 => Just(7_500u32),
        5 => (1u32..=10_000u32),
    ]
}

/// A subset of `n` guardians as a bitmask.
pub fn signer_mask_strategy(n: usize) -> impl Strategy<Value = u32> {
    0u32..(1u32 << n)
}

/// Guardian indices selected by `mask`.
pub fn mask_to_indices(mask: u32, n: usize) -> Vec<usize> {
    (0..n).filter(|i| mask & (1 << i) != 0).collect()
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Vault actions for state exploration. Guardian indices are taken modulo the
/// harness's guardian count.
#[derive(Debug, Clone)]
pub enum VaultAction {
    Deposit { amount: i128 },
    /// Fresh nonce, signed by the guardians in `signer_mask`.
    Withdraw { amount: i128, signer_mask: u32 },
    /// Resubmit the most recent withdrawal unchanged.
    Replay,
    AdvanceTime { delta: u64 },
    Pause,
    Unpause,
    EnableSafeMode,
    DisableSafeMode,
    OwnerWithdraw { amount: i128 },
}

/// Weighted toward deposits and withdrawals; administrative toggles are rare.
pub fn vault_action_strategy(num_guardians: usize) -> impl Strategy<Value = VaultAction> {
    prop_oneof![
        20 => (1i128..=50_000i128).prop_map(|amount| VaultAction::Deposit { amount }),
        35 => ((1i128..=80_000i128), signer_mask_strategy(num_guardians))
            .prop_map(|(amount, signer_mask)| VaultAction::Withdraw { amount, signer_mask }),
        8 => Just(VaultAction::Replay),
        15 => duration_strategy().prop_map(|delta| VaultAction::AdvanceTime { delta }),
        4 => Just(VaultAction::Pause),
        4 => Just(VaultAction::Unpause),
        4 => Just(VaultAction::EnableSafeMode),
        4 => Just(VaultAction::DisableSafeMode),
        6 => (1i128..=30_000i128).prop_map(|amount| VaultAction::OwnerWithdraw { amount }),
    ]
}

/// 1 to `max_len` actions.
pub fn vault_action_sequence(
    num_guardians: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<VaultAction>> {
    prop::collection::vec(vault_action_strategy(num_guardians), 1..=max_len)
}

// ── Historical Pattern Generators ────────────────────────────────────────────

/// Common operational sequences.
#[derive(Debug, Clone)]
pub enum TransactionPattern {
    /// Fund, then pay out under quorum.
    RoutinePayout,
    /// The same signed request submitted twice.
    ReplayAttempt,
    /// Incident: pause, attempted withdrawal, unpause, retry.
    IncidentResponse,
    /// Keys compromised: safe mode on, owner drains, safe mode off.
    KeyCompromise,
    /// Under-signed withdrawal followed by a properly signed one.
    QuorumTopUp,
}

pub fn pattern_to_actions(pattern: &TransactionPattern, num_guardians: usize) -> Vec<VaultAction> {
    let all = (1u32 << num_guardians) - 1;
    match pattern {
        TransactionPattern::RoutinePayout => std::vec![
            VaultAction::Deposit { amount: 10_000 },
            VaultAction::Withdraw { amount: 2_500, signer_mask: all },
            VaultAction::AdvanceTime { delta: 600 },
            VaultAction::Withdraw { amount: 2_500, signer_mask: all },
        ],
        TransactionPattern::ReplayAttempt => std::vec![
            VaultAction::Withdraw { amount: 1_000, signer_mask: all },
            VaultAction::Replay,
            VaultAction::AdvanceTime { delta: 60 },
            VaultAction::Replay,
        ],
        TransactionPattern::IncidentResponse => std::vec![
            VaultAction::Pause,
            VaultAction::Withdraw { amount: 1_000, signer_mask: all },
            VaultAction::Deposit { amount: 500 },
            VaultAction::Unpause,
            VaultAction::Replay,
        ],
        TransactionPattern::KeyCompromise => std::vec![
            VaultAction::EnableSafeMode,
            VaultAction::Withdraw { amount: 1_000, signer_mask: all },
            VaultAction::OwnerWithdraw { amount: 5_000 },
            VaultAction::DisableSafeMode,
            VaultAction::Withdraw { amount: 1_000, signer_mask: all },
        ],
        TransactionPattern::QuorumTopUp => std::vec![
            VaultAction::Withdraw { amount: 3_000, signer_mask: 1 },
            VaultAction::Withdraw { amount: 3_000, signer_mask: all },
        ],
    }
}

pub fn transaction_pattern_strategy() -> impl Strategy<Value = TransactionPattern> {
    prop_oneof![
        Just(TransactionPattern::RoutinePayout),
        Just(TransactionPattern::ReplayAttempt),
        Just(TransactionPattern::IncidentResponse),
        Just(TransactionPattern::KeyCompromise),
        Just(TransactionPattern::QuorumTopUp),
    ]
}
