//! # Vault Invariants
//!
//! Properties that must hold for every reachable vault state. State checks
//! look at one [`VaultSnapshot`]; transition checks compare the snapshots on
//! either side of a single action together with the [`Flow`] that action
//! caused.

extern crate std;

use std::boxed::Box;
use std::string::{String, ToString};
use std::vec::Vec;

use vault::VaultStatus;

use super::VaultSnapshot;

/// Native units that entered or left the vault during one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flow {
    pub deposited: i128,
    pub released: i128,
}

pub type Violation = (String, String);

pub trait Invariant {
    fn name(&self) -> &str;
    fn check(&self, snapshot: &VaultSnapshot) -> Result<(), String>;
}

pub trait TransitionInvariant {
    fn name(&self) -> &str;
    fn check(&self, before: &VaultSnapshot, after: &VaultSnapshot, flow: &Flow) -> Result<(), String>;
}

// ── State Invariants ─────────────────────────────────────────────────────────

/// The ledger never promises more than the vault holds.
pub struct LedgerBackedByCustody;

impl Invariant for LedgerBackedByCustody {
    fn name(&self) -> &str {
        "ledger_balance <= custody_balance"
    }

    fn check(&self, s: &VaultSnapshot) -> Result<(), String> {
        (s.ledger_balance <= s.custody_balance)
            .then_some(())
            .ok_or_else(|| {
                std::format!(
                    "ledger balance ({}) exceeds tokens held ({})",
                    s.ledger_balance,
                    s.custody_balance
                )
            })
    }
}

pub struct NonNegativeBalance;

impl Invariant for NonNegativeBalance {
    fn name(&self) -> &str {
        "ledger_balance >= 0"
    }

    fn check(&self, s: &VaultSnapshot) -> Result<(), String> {
        if s.ledger_balance < 0 {
            return Err(std::format!("negative balance: {}", s.ledger_balance));
        }
        Ok(())
    }
}

/// `Frozen` is reported exactly when safe mode is on and no pause applies.
pub struct StatusReflectsSafeMode;

impl Invariant for StatusReflectsSafeMode {
    fn name(&self) -> &str {
        "status == Frozen iff safe mode (unless paused)"
    }

    fn check(&self, s: &VaultSnapshot) -> Result<(), String> {
        match (s.status, s.safe_mode) {
            (VaultStatus::Paused, _) | (VaultStatus::Frozen, true) | (VaultStatus::Active, false) => Ok(()),
            (status, safe_mode) => Err(std::format!("status {:?} with safe_mode = {}", status, safe_mode)),
        }
    }
}

pub struct QuorumPositive;

impl Invariant for QuorumPositive {
    fn name(&self) -> &str {
        "quorum >= 1"
    }

    fn check(&self, s: &VaultSnapshot) -> Result<(), String> {
        if s.quorum == 0 {
            return Err(String::from("quorum is zero"));
        }
        Ok(())
    }
}

// ── Transition Invariants ────────────────────────────────────────────────────

/// Consumed nonces are never forgotten and at most one is burned per action.
pub struct NonceAccounting;

impl TransitionInvariant for NonceAccounting {
    fn name(&self) -> &str {
        "nonces_consumed grows by 0 or 1"
    }

    fn check(&self, before: &VaultSnapshot, after: &VaultSnapshot, flow: &Flow) -> Result<(), String> {
        let grew = after.nonces_consumed.checked_sub(before.nonces_consumed);
        match grew {
            Some(0) | Some(1) => Ok(()),
            _ => Err(std::format!(
                "nonces_consumed {} -> {} (released {})",
                before.nonces_consumed,
                after.nonces_consumed,
                flow.released
            )),
        }
    }
}

/// `after = before + deposited - released`.
pub struct BalanceConservation;

impl TransitionInvariant for BalanceConservation {
    fn name(&self) -> &str {
        "balance conservation"
    }

    fn check(&self, before: &VaultSnapshot, after: &VaultSnapshot, flow: &Flow) -> Result<(), String> {
        let expected = before.ledger_balance + flow.deposited - flow.released;
        if after.ledger_balance != expected {
            return Err(std::format!(
                "expected balance {}, got {} ({:?})",
                expected,
                after.ledger_balance,
                flow
            ));
        }
        Ok(())
    }
}

pub struct MonotonicTime;

impl TransitionInvariant for MonotonicTime {
    fn name(&self) -> &str {
        "time never goes backwards"
    }

    fn check(&self, before: &VaultSnapshot, after: &VaultSnapshot, _: &Flow) -> Result<(), String> {
        if after.timestamp < before.timestamp {
            return Err(std::format!("time went backwards: {} -> {}", before.timestamp, after.timestamp));
        }
        Ok(())
    }
}

// ── Invariant Set ────────────────────────────────────────────────────────────

/// State and transition invariants checked together.
#[derive(Default)]
pub struct InvariantSet {
    state: Vec<Box<dyn Invariant>>,
    transitions: Vec<Box<dyn TransitionInvariant>>,
}

impl InvariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in vault invariant.
    pub fn vault_defaults() -> Self {
        Self::new()
            .with(LedgerBackedByCustody)
            .with(NonNegativeBalance)
            .with(StatusReflectsSafeMode)
            .with(QuorumPositive)
            .with_transition(NonceAccounting)
            .with_transition(BalanceConservation)
            .with_transition(MonotonicTime)
    }

    pub fn with(mut self, invariant: impl Invariant + 'static) -> Self {
        self.state.push(Box::new(invariant));
        self
    }

    pub fn with_transition(mut self, invariant: impl TransitionInvariant + 'static) -> Self {
        self.transitions.push(Box::new(invariant));
        self
    }

    pub fn check_all(&self, snapshot: &VaultSnapshot) -> Vec<Violation> {
        self.state
            .iter()
            .filter_map(|inv| inv.check(snapshot).err().map(|msg| (inv.name().to_string(), msg)))
            .collect()
    }

    pub fn check_transition(&self, before: &VaultSnapshot, after: &VaultSnapshot, flow: &Flow) -> Vec<Violation> {
        self.transitions
            .iter()
            .filter_map(|inv| {
                inv.check(before, after, flow)
                    .err()
                    .map(|msg| (inv.name().to_string(), msg))
            })
            .collect()
    }

    pub fn assert_all(&self, snapshot: &VaultSnapshot) {
        assert_clean("Invariant violations detected", &self.check_all(snapshot));
    }

    pub fn assert_transition(&self, before: &VaultSnapshot, after: &VaultSnapshot, flow: &Flow) {
        assert_clean("Transition invariant violations", &self.check_transition(before, after, flow));
    }

    pub fn len(&self) -> usize {
        self.state.len() + self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Panic with one line per violation.
pub fn assert_clean(header: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    let mut report = std::format!("{}:\n", header);
    for (name, msg) in violations {
        report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
    }
    panic!("{}", report);
}
