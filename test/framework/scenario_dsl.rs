//! # Scenario DSL
//!
//! Given-When-Then builder for readable vault scenarios. Invariants, when
//! attached, are checked after every `when` step so a violation names the
//! step that caused it.
//!
//! ```rust,ignore
//! Scenario::new("Quorum payout")
//!     .when("two guardians sign", |ctx| {
//!         ctx.withdraw(1_000, &[0, 1]);
//!     })
//!     .then("the balance drops", |ctx| {
//!         assert_eq!(ctx.balance(), 99_000);
//!     })
//!     .run();
//! ```

extern crate std;

use common::{Asset, SignatureSet, WithdrawalRequest};
use std::boxed::Box;
use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;
use vault::withdrawal::WithdrawalOutcome;

use super::invariants::{assert_clean, Flow, InvariantSet};
use super::{HarnessOptions, TestEnv, VaultHarness};

// ── Scenario Context ─────────────────────────────────────────────────────────

/// State shared by the steps of one scenario.
pub struct ScenarioContext<'h, 'a> {
    pub harness: &'h VaultHarness<'a>,
    values: HashMap<String, i128>,
    next_nonce: u64,
    last: Option<(WithdrawalRequest, SignatureSet)>,
}

impl<'h, 'a> ScenarioContext<'h, 'a> {
    pub fn store(&mut self, key: &str, value: i128) {
        self.values.insert(key.into(), value);
    }

    pub fn load(&self, key: &str) -> i128 {
        match self.values.get(key) {
            Some(v) => *v,
            None => panic!("scenario value '{}' was never stored", key),
        }
    }

    /// Native ledger balance of the vault.
    pub fn balance(&self) -> i128 {
        self.harness.vault.balance(&Asset::Native)
    }

    /// Submit a fresh-nonce withdrawal signed by the founding guardians at
    /// `signers`.
    pub fn withdraw(&mut self, amount: i128, signers: &[usize]) -> WithdrawalOutcome {
        let request = self.harness.request(amount, self.next_nonce);
        self.next_nonce += 1;
        let signatures = self.harness.sign(&request, signers);
        let outcome = self.harness.submit(&request, &signatures);
        self.last = Some((request, signatures));
        outcome
    }

    /// Resubmit the previous withdrawal unchanged.
    pub fn replay(&mut self) -> WithdrawalOutcome {
        let Some((request, signatures)) = self.last.clone() else {
            panic!("replay before any withdrawal");
        };
        self.harness.submit(&request, &signatures)
    }
}

// ── Steps ────────────────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Given,
    When,
    Then,
}

struct Step {
    phase: Phase,
    label: String,
    body: StepFn,
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

pub struct Scenario {
    name: String,
    options: HarnessOptions,
    steps: Vec<Step>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    /// Defaults to three guardians with a quorum of two.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            options: HarnessOptions::new(3, 2),
            steps: Vec::new(),
            invariants: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_options(mut self, options: HarnessOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    fn step<F>(mut self, phase: Phase, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.steps.push(Step {
            phase,
            label: label.into(),
            body: Box::new(body),
        });
        self
    }

    pub fn given<F>(self, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Given, "given", body)
    }

    pub fn when<F>(self, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::When, label, body)
    }

    pub fn then<F>(self, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Then, label, body)
    }

    /// Deploy a fresh harness and run every step, phase by phase. Returns the
    /// number of steps run.
    pub fn run(mut self) -> usize {
        let env = TestEnv::new();
        let harness = VaultHarness::new(&env, self.options.clone());
        let mut ctx = ScenarioContext {
            harness: &harness,
            values: HashMap::new(),
            next_nonce: 1,
            last: None,
        };

        self.steps.sort_by_key(|s| s.phase);
        let total = self.steps.len();
        for step in self.steps {
            let before = harness.snapshot();
            (step.body)(&mut ctx);

            if step.phase != Phase::When {
                continue;
            }
            if let Some(invariants) = &self.invariants {
                let after = harness.snapshot();
                let mut violations = invariants.check_all(&after);
                // Steps move funds freely, so balance flow is not tracked here.
                violations.extend(
                    invariants
                        .check_transition(&before, &after, &Flow::default())
                        .into_iter()
                        .filter(|(name, _)| name != "balance conservation"),
                );
                let header = std::format!("Scenario '{}', step '{}'", self.name, step.label);
                assert_clean(&header, &violations);
            }
        }
        total
    }
}

// ── Assertion Helpers ────────────────────────────────────────────────────────

/// Assert that a `try_*` call fails with the expected contract error.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(e, $expected, "Expected error {:?}, got {:?}", $expected, e),
            Err(Err(e)) => panic!("Unexpected SDK error: {:?}", e),
            Ok(_) => panic!("Expected error {:?}, but operation succeeded", $expected),
        }
    };
}

/// Assert that a withdrawal was decided and rejected for `$reason`.
#[macro_export]
macro_rules! assert_rejected {
    ($outcome:expr, $reason:expr) => {
        match $outcome {
            vault::withdrawal::WithdrawalOutcome::Rejected(r) => {
                assert_eq!(r, $reason, "Expected rejection {:?}, got {:?}", $reason, r)
            }
            vault::withdrawal::WithdrawalOutcome::Executed(receipt) => {
                panic!("Expected rejection {:?}, but executed {:?}", $reason, receipt)
            }
        }
    };
}

// ── Batch Runner ─────────────────────────────────────────────────────────────

/// Outcome of [`run_scenarios`].
#[derive(Debug, Default)]
pub struct ScenarioTally {
    pub passed: usize,
    pub failed: Vec<String>,
}

/// Run every scenario, catching panics so one failure does not hide the rest.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> ScenarioTally {
    let mut tally = ScenarioTally::default();
    for scenario in scenarios {
        let name = String::from(scenario.name());
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scenario.run())) {
            Ok(_) => {
                std::eprintln!("  ✓ {}", name);
                tally.passed += 1;
            }
            Err(_) => {
                std::eprintln!("  ✗ {}", name);
                tally.failed.push(name);
            }
        }
    }
    tally
}
