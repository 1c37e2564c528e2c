//! Guardian signature recovery, the packed codec and duplicate detection.
//!
//! Standard signatures are `r ‖ s ‖ v` (65 bytes). The packed form folds the
//! recovery bit into the top bit of `s`, which is always clear for a low-`s`
//! signature, giving `r ‖ vs` (64 bytes).
//!
//! Nothing here touches storage.

use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, FieldBytes};
use soroban_sdk::{crypto::Hash, Bytes, BytesN, Env, Vec};

use crate::vault_types::{DedupMode, SignatureSet, SignerKey};
use crate::SignatureError;

/// `n / 2` for the secp256k1 group order `n`.
const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// The secp256k1 group order `n`.
const ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Decoded signature components, `v` normalised to 0 or 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Components {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
}

fn normalize_v(v: u8) -> Option<u8> {
    match v {
        0 | 1 => Some(v),
        27 | 28 => Some(v - 27),
        _ => None,
    }
}

fn is_zero(bytes: &[u8; 32]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

/// `0 < s <= n/2` and `r != 0`.
pub fn is_canonical(r: &[u8; 32], s: &[u8; 32]) -> bool {
    !is_zero(r) && !is_zero(s) && *s <= HALF_ORDER
}

pub fn decode_standard(sig: &BytesN<65>) -> Result<Components, SignatureError> {
    let raw = sig.to_array();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..64]);
    let v = normalize_v(raw[64]).ok_or(SignatureError::InvalidRecoveryId)?;
    Ok(Components { r, s, v })
}

pub fn decode_packed(sig: &BytesN<64>) -> Components {
    let raw = sig.to_array();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..]);
    let v = s[0] >> 7;
    s[0] &= 0x7f;
    Components { r, s, v }
}

/// Compress a standard signature. Only low-`s` signatures have a free bit.
pub fn pack(env: &Env, sig: &BytesN<65>) -> Result<BytesN<64>, SignatureError> {
    let c = decode_standard(sig)?;
    if !is_canonical(&c.r, &c.s) {
        return Err(SignatureError::MalleableSignature);
    }
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&c.r);
    out[32..].copy_from_slice(&c.s);
    out[32] |= c.v << 7;
    Ok(BytesN::from_array(env, &out))
}

/// Expand a packed signature; `v` comes out in the 27/28 convention.
pub fn unpack(env: &Env, sig: &BytesN<64>) -> BytesN<65> {
    let c = decode_packed(sig);
    let mut out = [0u8; 65];
    out[..32].copy_from_slice(&c.r);
    out[32..64].copy_from_slice(&c.s);
    out[64] = 27 + c.v;
    BytesN::from_array(env, &out)
}

pub fn pack_set(env: &Env, set: &SignatureSet) -> Result<SignatureSet, SignatureError> {
    match set {
        SignatureSet::Packed(_) => Ok(set.clone()),
        SignatureSet::Standard(sigs) => {
            let mut packed = Vec::new(env);
            for sig in sigs.iter() {
                packed.push_back(pack(env, &sig)?);
            }
            Ok(SignatureSet::Packed(packed))
        }
    }
}

pub fn unpack_set(env: &Env, set: &SignatureSet) -> SignatureSet {
    match set {
        SignatureSet::Standard(_) => set.clone(),
        SignatureSet::Packed(sigs) => {
            let mut standard = Vec::new(env);
            for sig in sigs.iter() {
                standard.push_back(unpack(env, &sig));
            }
            SignatureSet::Standard(standard)
        }
    }
}

pub fn set_len(set: &SignatureSet) -> u32 {
    match set {
        SignatureSet::Standard(sigs) => sigs.len(),
        SignatureSet::Packed(sigs) => sigs.len(),
    }
}

/// Derive the signer key from an uncompressed SEC1 public key (`0x04 ‖ X ‖ Y`).
pub fn signer_key_from_public_key(env: &Env, public_key: &BytesN<65>) -> SignerKey {
    let raw = public_key.to_array();
    let digest = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &raw[1..]))
        .to_array();
    let mut key = [0u8; 20];
    key.copy_from_slice(&digest[12..]);
    BytesN::from_array(env, &key)
}

/// `r < n` and `r` is the x-coordinate of a curve point. The host aborts the
/// whole invocation on a recovery it cannot perform, so this must hold before
/// `secp256k1_recover` is called.
pub fn is_curve_x(r: &[u8; 32], v: u8) -> bool {
    if *r >= ORDER {
        return false;
    }
    AffinePoint::decompress(FieldBytes::from_slice(r), Choice::from(v & 1))
        .is_some()
        .into()
}

/// Recover the signer of `digest`. Returns `None` for a signature that is
/// not well formed; callers treat that as an unknown identity.
pub fn recover_signer(env: &Env, digest: &Hash<32>, c: &Components) -> Option<SignerKey> {
    if c.v > 1 || !is_canonical(&c.r, &c.s) || !is_curve_x(&c.r, c.v) {
        return None;
    }
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&c.r);
    rs[32..].copy_from_slice(&c.s);
    let public_key =
        env.crypto()
            .secp256k1_recover(digest, &BytesN::from_array(env, &rs), c.v as u32);
    Some(signer_key_from_public_key(env, &public_key))
}

/// Recover every signer in submission order.
pub fn recover_signers(env: &Env, digest: &Hash<32>, set: &SignatureSet) -> Vec<Option<SignerKey>> {
    let mut out = Vec::new(env);
    match set {
        SignatureSet::Standard(sigs) => {
            for sig in sigs.iter() {
                let signer = decode_standard(&sig)
                    .ok()
                    .and_then(|c| recover_signer(env, digest, &c));
                out.push_back(signer);
            }
        }
        SignatureSet::Packed(sigs) => {
            for sig in sigs.iter() {
                out.push_back(recover_signer(env, digest, &decode_packed(&sig)));
            }
        }
    }
    out
}

/// Reject repeated signers. Unrecoverable entries are skipped here; the
/// active-guardian check rejects them.
pub fn check_unique(signers: &Vec<Option<SignerKey>>, mode: DedupMode) -> Result<(), SignatureError> {
    match mode {
        DedupMode::StrictlyIncreasing => {
            let mut previous: Option<[u8; 20]> = None;
            for signer in signers.iter().flatten() {
                let current = signer.to_array();
                if let Some(prev) = previous {
                    if current == prev {
                        return Err(SignatureError::DuplicateSigner);
                    }
                    if current < prev {
                        return Err(SignatureError::UnorderedSigners);
                    }
                }
                previous = Some(current);
            }
            Ok(())
        }
        DedupMode::Scan => {
            let len = signers.len();
            for i in 0..len {
                let Some(Some(a)) = signers.get(i) else { continue };
                for j in (i + 1)..len {
                    if let Some(Some(b)) = signers.get(j) {
                        if a == b {
                            return Err(SignatureError::DuplicateSigner);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}
