//! # zknote-primitives — Shared Curve and Hashing Primitives
//!
//! Building blocks shared by the note engine, the trusted-setup providers and
//! the verifier calling-convention codec:
//!
//! - BN254 (alt_bn128) curve constants: the standard generator `g` and the
//!   hash-derived second generator `h` used by note commitments.
//! - 32-byte point compression: the x-coordinate packed into the low 255 bits
//!   (big-endian) with the y-parity in bit 255.
//! - [`RollingHash`], the chained keccak256 accumulator behind Fiat–Shamir
//!   challenges and the paired-note linkage multipliers.
//! - Fixed-width word conversions for the 32-byte big-endian calling
//!   convention (field elements, addresses, signed public values).
//!
//! ## Compressed Point Layout
//!
//! ```text
//! bit 255           : y parity (set when y is odd)
//! bits 0..254 (BE)  : x-coordinate, canonical (< field modulus)
//! ```
//!
//! ## Security Notes
//!
//! - Blinding scalars are sampled from 64 bytes of rng output and reduced
//!   modulo the group order, eliminating sampling bias.
//! - `h` is derived by try-and-increment hashing of a fixed domain tag; no
//!   party knows a discrete-log relation between `g` and `h`.


use std::sync::LazyLock;

use ark_ec::AffineRepr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use rand::{CryptoRng, RngCore};
use sha3::{Digest, Keccak256};
use thiserror::Error;

pub use ark_bn254::{Fq, Fr, G1Affine, G1Projective};

/// 32-byte big-endian word, the unit of the verifier calling convention.
pub type Word = [u8; 32];

/// 20-byte account address.
pub type Address = [u8; 20];

/// Default ceiling on confidential note values; setup providers may carry a
/// lower one for their network.
pub const K_MAX: u64 = 1 << 24;

/// Byte width of a [`Word`].
pub const WORD_BYTES: usize = 32;

/// Domain tag hashed to derive the second commitment generator.
const H_GENERATOR_TAG: &[u8] = b"zknote.generator.h.v1";

#[derive(Debug, Error)]
pub enum PointError {
    /// The compressed x-coordinate has no matching y on the curve.
    #[error("x^3 + 3 not a square, malformed input")]
    MalformedPoint,
    /// Raw (x, y) words do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,
    /// A 32-byte word is not a canonical field element.
    #[error("field element exceeds the modulus")]
    NonCanonicalField,
}

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address must be 20 bytes")]
    Length,
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

// ========================= Generators =========================

static H_GENERATOR: LazyLock<G1Affine> = LazyLock::new(|| hash_to_point(H_GENERATOR_TAG));

/// The standard BN254 G1 generator.
pub fn generator() -> G1Affine {
    G1Affine::generator()
}

/// The second commitment generator `h`, derived once from a fixed domain tag.
///
/// The tag is part of the protocol; changing it invalidates every commitment
/// ever produced.
pub fn h_generator() -> G1Affine {
    *H_GENERATOR
}

/// Try-and-increment hash-to-curve: keccak the tag with a counter until the
/// digest is the x-coordinate of a curve point, then take the even root.
fn hash_to_point(tag: &[u8]) -> G1Affine {
    let mut counter = 0u32;
    loop {
        let mut hasher = Keccak256::new();
        hasher.update(tag);
        hasher.update(counter.to_be_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let x = Fq::from_be_bytes_mod_order(&digest);
        let rhs = x.square() * x + Fq::from(3u64);
        if let Some(y) = rhs.sqrt() {
            let y = if y.into_bigint().is_odd() { -y } else { y };
            return G1Affine::new_unchecked(x, y);
        }
        counter += 1;
    }
}

// ========================= Point Compression =========================

/// Compress an affine point into 32 bytes: big-endian x with the y-parity in
/// the top bit. The input must not be the point at infinity.
pub fn compress(point: &G1Affine) -> Word {
    let mut word = fq_to_word(&point.x);
    if point.y.into_bigint().is_odd() {
        word[0] |= 0x80;
    }
    word
}

/// Recover an affine point from its 32-byte compressed form.
///
/// # Errors
/// * [`PointError::NonCanonicalField`] - x is not below the field modulus
/// * [`PointError::MalformedPoint`] - `x^3 + 3` has no square root
pub fn decompress(compressed: &Word) -> Result<G1Affine, PointError> {
    let odd = compressed[0] & 0x80 != 0;
    let mut x_word = *compressed;
    x_word[0] &= 0x7f;
    let x = word_to_fq(&x_word)?;
    let rhs = x.square() * x + Fq::from(3u64);
    let y = rhs.sqrt().ok_or(PointError::MalformedPoint)?;
    let y = if y.into_bigint().is_odd() == odd { y } else { -y };
    Ok(G1Affine::new_unchecked(x, y))
}

/// Build an affine point from raw coordinate words, validating the curve
/// equation. Used when reading points out of verifier-produced blobs.
pub fn affine_from_words(x: &Word, y: &Word) -> Result<G1Affine, PointError> {
    let x = word_to_fq(x)?;
    let y = word_to_fq(y)?;
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(PointError::NotOnCurve);
    }
    Ok(point)
}

// ========================= Hashing =========================

/// keccak256 of a byte slice.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Deterministic note commitment hash: keccak256 over the four coordinate
/// words of gamma and sigma.
pub fn note_commitment_hash(gamma: &G1Affine, sigma: &G1Affine) -> Word {
    let mut bytes = Vec::with_capacity(4 * WORD_BYTES);
    bytes.extend_from_slice(&fq_to_word(&gamma.x));
    bytes.extend_from_slice(&fq_to_word(&gamma.y));
    bytes.extend_from_slice(&fq_to_word(&sigma.x));
    bytes.extend_from_slice(&fq_to_word(&sigma.y));
    keccak256(&bytes)
}

/// Chained keccak256 accumulator.
///
/// Words are appended to an internal buffer; [`RollingHash::squeeze`] hashes
/// the buffer, replaces it with the digest and returns the digest reduced
/// modulo the group order. Repeated squeezes therefore form a hash chain,
/// which is what the paired-note linkage multipliers rely on.
#[derive(Clone, Debug, Default)]
pub struct RollingHash {
    data: Vec<u8>,
}

impl RollingHash {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn append_word(&mut self, word: &Word) {
        self.data.extend_from_slice(word);
    }

    /// Append a point as two coordinate words, x first.
    pub fn append_point(&mut self, point: &G1Affine) {
        self.append_word(&fq_to_word(&point.x));
        self.append_word(&fq_to_word(&point.y));
    }

    /// Append an address left-padded to a full word.
    pub fn append_address(&mut self, address: &Address) {
        self.append_word(&address_word(address));
    }

    /// Hash the accumulated buffer, replace it with the digest and return the
    /// digest as a group scalar.
    pub fn squeeze(&mut self) -> Fr {
        let digest = keccak256(&self.data);
        self.data = digest.to_vec();
        Fr::from_be_bytes_mod_order(&digest)
    }
}

// ========================= Scalar Sampling =========================

/// Sample a nonzero group scalar with full-width entropy: 64 rng bytes
/// reduced modulo the group order.
///
/// Zero is rejected because a zero blinding scalar voids the hiding property
/// of the commitment it blinds.
pub fn random_group_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Fr {
    loop {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        let scalar = Fr::from_be_bytes_mod_order(&bytes);
        if !scalar.is_zero() {
            return scalar;
        }
    }
}

// ========================= Word Conversions =========================

fn is_canonical<F: PrimeField>(word: &Word) -> bool {
    let modulus = F::MODULUS.to_bytes_be();
    word.as_slice() < modulus.as_slice()
}

pub fn fq_to_word(element: &Fq) -> Word {
    let mut word = [0u8; 32];
    word.copy_from_slice(&element.into_bigint().to_bytes_be());
    word
}

pub fn word_to_fq(word: &Word) -> Result<Fq, PointError> {
    if !is_canonical::<Fq>(word) {
        return Err(PointError::NonCanonicalField);
    }
    Ok(Fq::from_be_bytes_mod_order(word))
}

pub fn fr_to_word(element: &Fr) -> Word {
    let mut word = [0u8; 32];
    word.copy_from_slice(&element.into_bigint().to_bytes_be());
    word
}

pub fn word_to_fr(word: &Word) -> Result<Fr, PointError> {
    if !is_canonical::<Fr>(word) {
        return Err(PointError::NonCanonicalField);
    }
    Ok(Fr::from_be_bytes_mod_order(word))
}

/// Map a signed public value into the group: negative values become
/// `n - |v|`, matching how the external verifier folds them into challenges.
pub fn signed_to_fr(value: i64) -> Fr {
    if value >= 0 {
        Fr::from(value as u64)
    } else {
        -Fr::from(value.unsigned_abs())
    }
}

pub fn word_from_u64(value: u64) -> Word {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Read a u64 out of a word; `None` when the high 24 bytes are nonzero.
pub fn word_to_u64(word: &Word) -> Option<u64> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(low))
}

/// Two's-complement sign-extended encoding of a signed public value.
pub fn signed_word(value: i64) -> Word {
    let mut word = if value < 0 { [0xffu8; 32] } else { [0u8; 32] };
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Read a signed public value; `None` unless the high 24 bytes are exactly
/// the sign extension of the low 8.
pub fn word_to_signed(word: &Word) -> Option<i64> {
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    let value = i64::from_be_bytes(low);
    let fill = if value < 0 { 0xff } else { 0x00 };
    if word[..24].iter().all(|b| *b == fill) {
        Some(value)
    } else {
        None
    }
}

pub fn address_word(address: &Address) -> Word {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Read an address out of a left-padded word; `None` when the padding bytes
/// are nonzero.
pub fn word_to_address(word: &Word) -> Option<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[12..]);
    Some(address)
}

// ========================= Addresses =========================

/// Parse a hex address into its canonical 20-byte form. Accepts an optional
/// `0x` prefix and either letter case.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(stripped)?;
    if bytes.len() != 20 {
        return Err(AddressError::Length);
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes);
    Ok(address)
}

/// Lowercase `0x`-prefixed rendering of an address.
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}
