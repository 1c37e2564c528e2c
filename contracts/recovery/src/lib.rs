#![no_std]

//! # Social Recovery Controller
//!
//! Lets a vault's active guardians hand ownership to a new address when the
//! owner has lost access. A guardian opens a proposal with a justification
//! (their own vote counts as the first approval); once distinct guardian
//! approvals reach the vault's recovery quorum inside the voting window a
//! timelock starts, after which anyone may execute. Execution calls back into
//! the vault, which accepts ownership changes only from this controller.
//!
//! One deployment serves many vaults; each vault registers its
//! [`RecoveryConfig`] once and may have at most one open proposal.

pub mod events;
pub mod proposal;


use common::{ttl, RecoveryConfig, VaultClient};
use proposal::{RecoveryProposal, RecoveryStatus};
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, String, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RecoveryError {
    VaultNotRegistered = 300,
    VaultAlreadyRegistered = 301,
    InvalidConfig = 302,
    NotGuardian = 303,
    EmptyJustification = 304,
    ProposalOpen = 305,
    SameOwner = 306,
    ProposalNotFound = 307,
    AlreadyVoted = 308,
    VotingClosed = 309,
    NotPending = 310,
    NotApproved = 311,
    TimelockActive = 312,
    NotAuthorized = 313,
}

fn validate(config: &RecoveryConfig) -> Result<(), RecoveryError> {
    if config.quorum == 0 || config.voting_window == 0 {
        return Err(RecoveryError::InvalidConfig);
    }
    Ok(())
}

fn require_active_guardian(env: &Env, vault: &Address, guardian: &Address) -> Result<(), RecoveryError> {
    if !VaultClient::new(env, vault).is_active_guardian(guardian) {
        return Err(RecoveryError::NotGuardian);
    }
    Ok(())
}

/// Record the approval and start the timelock if quorum is now met.
fn record_approval(
    env: &Env,
    config: &RecoveryConfig,
    proposal: &mut RecoveryProposal,
    guardian: &Address,
) {
    proposal.approvals.push_back(guardian.clone());
    proposal::mark_voted(env, proposal.id, guardian);
    events::emit_recovery_vote(env, proposal.id, guardian.clone(), proposal.approvals.len());

    if proposal.approvals.len() >= proposal.quorum {
        let timelock_ends = env.ledger().timestamp().saturating_add(config.timelock);
        proposal.timelock_ends = Some(timelock_ends);
        proposal.status = RecoveryStatus::Approved;
        events::emit_recovery_approved(env, proposal.id, proposal.vault.clone(), timelock_ends);
    }
}

#[contract]
pub struct SocialRecoveryContract;

#[contractimpl]
impl SocialRecoveryContract {
    pub fn register_vault(
        env: Env,
        vault: Address,
        config: RecoveryConfig,
    ) -> Result<(), RecoveryError> {
        vault.require_auth();
        if proposal::load_config(&env, &vault).is_some() {
            return Err(RecoveryError::VaultAlreadyRegistered);
        }
        validate(&config)?;
        proposal::store_config(&env, &vault, &config);
        ttl::extend_instance(&env);
        Ok(())
    }

    /// Replace the recovery parameters. Open proposals keep the quorum they
    /// were created with.
    pub fn update_config(
        env: Env,
        vault: Address,
        config: RecoveryConfig,
    ) -> Result<(), RecoveryError> {
        vault.require_auth();
        proposal::load_config(&env, &vault).ok_or(RecoveryError::VaultNotRegistered)?;
        validate(&config)?;
        proposal::store_config(&env, &vault, &config);
        Ok(())
    }

    /// Open a recovery proposal for `vault`. Returns the proposal id.
    pub fn initiate_recovery(
        env: Env,
        vault: Address,
        guardian: Address,
        new_owner: Address,
        justification: String,
    ) -> Result<u64, RecoveryError> {
        guardian.require_auth();
        let config = proposal::load_config(&env, &vault).ok_or(RecoveryError::VaultNotRegistered)?;
        if justification.len() == 0 {
            return Err(RecoveryError::EmptyJustification);
        }
        require_active_guardian(&env, &vault, &guardian)?;

        let now = env.ledger().timestamp();
        if let Some(open) = proposal::open_id(&env, &vault).and_then(|id| proposal::load(&env, id)) {
            if proposal::is_open(&open, now) {
                return Err(RecoveryError::ProposalOpen);
            }
        }
        if VaultClient::new(&env, &vault).owner() == new_owner {
            return Err(RecoveryError::SameOwner);
        }

        let id = proposal::next_id(&env);
        let voting_deadline = now.saturating_add(config.voting_window);
        let mut proposal = RecoveryProposal {
            id,
            vault: vault.clone(),
            new_owner: new_owner.clone(),
            initiator: guardian.clone(),
            justification: justification.clone(),
            created_at: now,
            voting_deadline,
            timelock_ends: None,
            quorum: config.quorum,
            approvals: Vec::new(&env),
            status: RecoveryStatus::Pending,
        };
        events::emit_recovery_initiated(
            &env,
            id,
            vault.clone(),
            guardian.clone(),
            new_owner,
            justification,
            voting_deadline,
        );
        record_approval(&env, &config, &mut proposal, &guardian);

        proposal::store(&env, &proposal);
        proposal::set_open_id(&env, &vault, id);
        ttl::extend_instance(&env);
        Ok(id)
    }

    /// Add `guardian`'s approval to a pending proposal.
    pub fn approve_recovery(
        env: Env,
        proposal_id: u64,
        guardian: Address,
    ) -> Result<RecoveryStatus, RecoveryError> {
        guardian.require_auth();
        let mut proposal = proposal::load(&env, proposal_id).ok_or(RecoveryError::ProposalNotFound)?;
        let now = env.ledger().timestamp();

        match proposal::effective_status(&proposal, now) {
            RecoveryStatus::Pending => {}
            RecoveryStatus::Expired => {
                log!(&env, "late recovery vote: proposal {}", proposal_id);
                return Err(RecoveryError::VotingClosed);
            }
            _ => return Err(RecoveryError::NotPending),
        }
        if proposal::has_voted(&env, proposal_id, &guardian) {
            return Err(RecoveryError::AlreadyVoted);
        }
        require_active_guardian(&env, &proposal.vault, &guardian)?;

        let config = proposal::load_config(&env, &proposal.vault)
            .ok_or(RecoveryError::VaultNotRegistered)?;
        record_approval(&env, &config, &mut proposal, &guardian);
        proposal::store(&env, &proposal);
        Ok(proposal.status)
    }

    /// Hand the vault to the proposed owner. Anyone may call once the
    /// timelock has elapsed.
    pub fn execute_recovery(
        env: Env,
        proposal_id: u64,
        caller: Address,
    ) -> Result<(), RecoveryError> {
        caller.require_auth();
        let mut proposal = proposal::load(&env, proposal_id).ok_or(RecoveryError::ProposalNotFound)?;
        if proposal.status != RecoveryStatus::Approved {
            return Err(RecoveryError::NotApproved);
        }
        let timelock_ends = proposal.timelock_ends.ok_or(RecoveryError::NotApproved)?;
        if env.ledger().timestamp() < timelock_ends {
            return Err(RecoveryError::TimelockActive);
        }

        proposal.status = RecoveryStatus::Executed;
        proposal::store(&env, &proposal);
        proposal::clear_open_id(&env, &proposal.vault);

        VaultClient::new(&env, &proposal.vault).complete_recovery(&proposal_id, &proposal.new_owner);

        events::emit_recovery_executed(
            &env,
            proposal_id,
            proposal.vault,
            proposal.new_owner,
            caller,
        );
        Ok(())
    }

    /// Cancel a pending proposal. Only the initiator or the vault itself may
    /// cancel, and never once quorum has been reached.
    pub fn cancel_recovery(
        env: Env,
        proposal_id: u64,
        caller: Address,
    ) -> Result<(), RecoveryError> {
        caller.require_auth();
        let mut proposal = proposal::load(&env, proposal_id).ok_or(RecoveryError::ProposalNotFound)?;
        if caller != proposal.initiator && caller != proposal.vault {
            return Err(RecoveryError::NotAuthorized);
        }
        if proposal.status != RecoveryStatus::Pending {
            return Err(RecoveryError::NotPending);
        }

        proposal.status = RecoveryStatus::Cancelled;
        proposal::store(&env, &proposal);
        proposal::clear_open_id(&env, &proposal.vault);

        events::emit_recovery_cancelled(&env, proposal_id, proposal.vault, caller);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn get_config(env: Env, vault: Address) -> Option<RecoveryConfig> {
        proposal::load_config(&env, &vault)
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Option<RecoveryProposal> {
        proposal::load(&env, proposal_id)
    }

    /// Status with lapse applied at the current ledger time.
    pub fn get_status(env: Env, proposal_id: u64) -> Option<RecoveryStatus> {
        proposal::load(&env, proposal_id)
            .map(|p| proposal::effective_status(&p, env.ledger().timestamp()))
    }

    /// Id of the vault's pending or approved proposal, if any.
    pub fn open_proposal(env: Env, vault: Address) -> Option<u64> {
        let now = env.ledger().timestamp();
        proposal::open_id(&env, &vault).filter(|id| {
            proposal::load(&env, *id)
                .map(|p| proposal::is_open(&p, now))
                .unwrap_or(false)
        })
    }

    pub fn has_voted(env: Env, proposal_id: u64, guardian: Address) -> bool {
        proposal::has_voted(&env, proposal_id, &guardian)
    }
}
