//! Shared building blocks for the guardian vault contract suite.
//!
//! This crate provides:
//! - [`CommonError`] and [`SignatureError`]: error codes shared by every contract.
//! - [`vault_types`]: the data model exchanged between the vault and its
//!   controllers (assets, withdrawal requests, guardian records, credentials).
//! - [`hashing`]: domain-scoped structured hashing of withdrawal requests.
//! - [`signature`]: secp256k1 signer recovery, the packed signature codec and
//!   duplicate detection.
//! - [`interfaces`]: client traits for cross-contract calls.
//! - [`indexed_set`], [`reentrancy_guard`], [`pausable`] and [`ttl`]: storage
//!   and execution helpers.
//!
//! Contract-specific errors use their own code range (see [`CommonError`]) so
//! an error propagated through a cross-contract call is never ambiguous.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod hashing;
pub mod indexed_set;
pub mod interfaces;
pub mod pausable;
pub mod reentrancy_guard;
pub mod signature;
pub mod ttl;
pub mod vault_types;

pub use hashing::*;
pub use indexed_set::IndexedSet;
pub use interfaces::*;
pub use reentrancy_guard::ReentrancyGuard;
pub use signature::*;
pub use vault_types::*;

// ── Shared error enums ───────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range     | Purpose                         |
/// |-----------|---------------------------------|
/// | 1 – 9     | Lifecycle / initialisation      |
/// | 10 – 19   | Authentication & authorisation  |
/// | 20 – 29   | Resource not found              |
/// | 30 – 39   | Validation / input              |
/// | 40 – 49   | Contract state                  |
/// | 60 – 69   | Signatures ([`SignatureError`]) |
/// | 100 – 199 | Guardian credential registry    |
/// | 200 – 299 | Guardian lifecycle controller   |
/// | 300 – 399 | Social recovery                 |
/// | 400 – 499 | Pausing controller              |
/// | 500 – 599 | Vault                           |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    RecordNotFound = 21,
    InvalidInput = 30,
    // ── Contract state (40–49) ───────────────────────────────
    /// The vault is paused by its pausing controller.
    Paused = 40,
    /// A guarded entry point was entered while already executing.
    Reentrant = 41,
}

/// Errors raised while decoding or checking guardian signatures.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum SignatureError {
    /// `v` is not one of 0, 1, 27, 28.
    InvalidRecoveryId = 60,
    /// `s` is zero or lies in the upper half of the curve order.
    MalleableSignature = 61,
    /// The same signer appears more than once.
    DuplicateSigner = 62,
    /// Signers are not in strictly increasing order.
    UnorderedSigners = 63,
    /// No signatures were supplied.
    EmptySignatureSet = 64,
}
