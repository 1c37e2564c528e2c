#![no_main]

use arbitrary::Arbitrary;
use common::{Asset, DedupMode, SignatureSet};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{BytesN, Vec};
use test_framework::invariants::InvariantSet;
use test_framework::{HarnessOptions, TestEnv, VaultHarness};
use vault::withdrawal::WithdrawalOutcome;
use vault::VaultStatus;

/// Actions covering the vault's release paths and their controls.
///
/// Amounts are bounded so most actions reach the decision logic rather than
/// failing on balance.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32 },
    Withdraw { amount: u32, signer_mask: u8, nonce: u8, scan: bool },
    /// Signature bytes straight from the fuzzer.
    Garbage { amount: u32, nonce: u8, sig: [u8; 65] },
    AdvanceTime { delta: u16 },
    Pause,
    Unpause,
    ToggleSafeMode { on: bool },
    OwnerWithdraw { amount: u32 },
    RequestUnlock { amount: u32 },
    ApproveUnlock { member: u8 },
    ExecuteUnlock,
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = TestEnv::new();
    let h = VaultHarness::new(
        &env,
        HarnessOptions::new(3, 2)
            .with_pausing()
            .with_safe_mode()
            .with_emergency(2, 2),
    );
    let invariants = InvariantSet::vault_defaults();
    let mut unlock_id = None;

    for action in actions.into_iter().take(64) {
        let before = h.snapshot();
        match action {
            FuzzAction::Deposit { amount } => h.deposit((amount as i128).max(1)),
            FuzzAction::Withdraw { amount, signer_mask, nonce, scan } => {
                let req = h.request(amount as i128, nonce as u64);
                let indices: std::vec::Vec<usize> =
                    (0..3).filter(|i| signer_mask & (1 << i) != 0).collect();
                let mode = if scan { DedupMode::Scan } else { DedupMode::StrictlyIncreasing };
                let _ = h.vault.try_submit_withdrawal(&req, &h.sign(&req, &indices), &mode);
            }
            FuzzAction::Garbage { amount, nonce, sig } => {
                let req = h.request(amount as i128, nonce as u64);
                let mut sigs = Vec::new(&env.env);
                sigs.push_back(BytesN::from_array(&env.env, &sig));
                let outcome = h.vault.try_submit_withdrawal(
                    &req,
                    &SignatureSet::Standard(sigs),
                    &DedupMode::StrictlyIncreasing,
                );
                // A live vault must decide the request; gates may refuse it
                // with a contract error, but the host must never trap.
                let gated = before.status != VaultStatus::Active || amount == 0;
                match outcome {
                    Ok(Ok(WithdrawalOutcome::Rejected(_))) => {}
                    Err(Ok(_)) if gated => {}
                    other => panic!("INVARIANT VIOLATION: forged signature gave {:?}", other),
                }
            }
            FuzzAction::AdvanceTime { delta } => env.advance_time(delta as u64),
            FuzzAction::Pause => {
                let _ = h.pausing.as_ref().map(|p| {
                    p.try_pause(&h.pause_admin, &h.vault.address, &env.string("fuzz"))
                });
            }
            FuzzAction::Unpause => {
                let _ = h.pausing.as_ref().map(|p| p.try_unpause(&h.pause_admin, &h.vault.address));
            }
            FuzzAction::ToggleSafeMode { on } => {
                let _ = if on {
                    h.vault.try_enable_safe_mode(&env.string("fuzz"))
                } else {
                    h.vault.try_disable_safe_mode(&env.string("fuzz"))
                };
            }
            FuzzAction::OwnerWithdraw { amount } => {
                let _ = h.vault.try_owner_withdraw(&Asset::Native, &(amount as i128));
            }
            FuzzAction::RequestUnlock { amount } => {
                if let Ok(Ok(id)) = h.vault.try_request_emergency_unlock(
                    &Asset::Native,
                    &(amount as i128),
                    &env.generate_address(),
                ) {
                    unlock_id = Some(id);
                }
            }
            FuzzAction::ApproveUnlock { member } => {
                if let Some(id) = unlock_id {
                    let guardian = &h.emergency[member as usize % h.emergency.len()];
                    let _ = h.vault.try_approve_emergency_unlock(guardian, &id);
                }
            }
            FuzzAction::ExecuteUnlock => {
                if let Some(id) = unlock_id {
                    let _ = h.vault.try_execute_emergency_withdrawal(&id);
                }
            }
        }

        let after = h.snapshot();
        invariants.assert_all(&after);
        assert!(
            after.nonces_consumed >= before.nonces_consumed,
            "INVARIANT VIOLATION: consumed nonce forgotten"
        );
    }
});
