//! # zknote-abi — Verifier Calling-Convention Codec
//!
//! Byte-exact encoding between the proof engine and the external verifier.
//! Everything is 32-byte words, big-endian, with byte offsets relative to the
//! start of the enclosing blob.
//!
//! ## Submission Blob (engine -> verifier)
//!
//! ```text
//! 0x000  challenge
//! 0x020  public value (two's complement, sign-extended)
//! 0x040  public owner (address, left-padded)
//! 0x060  auxiliary public scalar A (input-note count | za | comparison bound)
//! 0x080  auxiliary public scalar B (zb, otherwise zero)
//! 0x0a0  byte offset of the proof-data section
//! 0x0c0  byte offset of the input-signatures section
//! 0x0e0  byte offset of the output-owners section
//! 0x100  byte offset of the metadata section
//! 0x120  sections, in exactly that order
//! ```
//!
//! Sections are length-prefixed; a section with no entries still emits its
//! zero count word:
//!
//! ```text
//! proof data       : [count] [per note: kBar, aBar, gamma.x, gamma.y, sigma.x, sigma.y]
//! input signatures : [count] [per signature: v word, r, s]
//! output owners    : [count] [per owner: address word]
//! metadata         : [count] [per entry: offset word, relative to the section
//!                    start] [per entry: byte length word, payload zero-padded
//!                    to a word boundary]
//! ```
//!
//! ## Output Blob (verifier -> engine)
//!
//! ```text
//! word 0 : byte length of everything after word 0
//! word 1 : record count
//! record : [body byte length] [body]
//! body   : [input-note count] [input notes] [output-note count] [output notes]
//!          [public owner] [public value] [challenge]
//! note   : [status] [owner] [gamma.x] [gamma.y] [sigma.x] [sigma.y]
//! ```
//!
//! Decoding is strict: every length prefix must match the bytes it governs,
//! trailing bytes are rejected, note coordinates must be canonical field
//! elements on the curve, and status words outside the known set fail. The
//! round trip `decode(encode(x)) == x` holds for every well-formed record
//! list.

mod inputs;
mod outputs;
#[cfg(test)]
mod tests;

use thiserror::Error;
use zknote_primitives::{
    note_commitment_hash, word_from_u64, word_to_u64, Address, G1Affine, PointError, Word,
    WORD_BYTES,
};

pub use inputs::{decode_metadata, encode_metadata, encode_submission, SubmissionInputs};
pub use outputs::{decode_proof_outputs, encode_proof_outputs, outputs_hash, proof_output_hash};

/// Fixed-position header words at the front of a submission blob.
pub const HEADER_BYTES: usize = 9 * WORD_BYTES;

/// Words per note entry, in both directions of the convention.
pub const NOTE_WORDS: usize = 6;

#[derive(Debug, Error)]
pub enum AbiError {
    /// A length prefix or offset disagrees with the bytes it governs.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(&'static str),
    /// Bytes remain after the encoding's declared end.
    #[error("unexpected trailing bytes: {0}")]
    TrailingBytes(usize),
    /// Note status word outside the known set.
    #[error("unknown note status: {0}")]
    BadStatus(u64),
    #[error(transparent)]
    Point(#[from] PointError),
}

/// Registry status of a note inside a decoded proof output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteStatus {
    Unspent = 1,
    Spent = 2,
}

impl NoteStatus {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(NoteStatus::Unspent),
            2 => Some(NoteStatus::Spent),
            _ => None,
        }
    }

    pub fn word(self) -> Word {
        word_from_u64(self as u64)
    }
}

/// A note as it appears in a proof output: registry status, owner and the
/// commitment points. The hash is derived from the points at construction so
/// it can never disagree with them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteImage {
    pub status: NoteStatus,
    pub owner: Address,
    pub gamma: G1Affine,
    pub sigma: G1Affine,
    note_hash: Word,
}

impl NoteImage {
    pub fn new(status: NoteStatus, owner: Address, gamma: G1Affine, sigma: G1Affine) -> Self {
        let note_hash = note_commitment_hash(&gamma, &sigma);
        Self {
            status,
            owner,
            gamma,
            sigma,
            note_hash,
        }
    }

    /// Correlates a decoded note back to a note held by the wallet.
    pub fn note_hash(&self) -> Word {
        self.note_hash
    }
}

/// Six response words for one note of the proof-data section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofDataEntry {
    pub k_bar: Word,
    pub a_bar: Word,
    pub gamma_x: Word,
    pub gamma_y: Word,
    pub sigma_x: Word,
    pub sigma_y: Word,
}

impl ProofDataEntry {
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.k_bar);
        out.extend_from_slice(&self.a_bar);
        out.extend_from_slice(&self.gamma_x);
        out.extend_from_slice(&self.gamma_y);
        out.extend_from_slice(&self.sigma_x);
        out.extend_from_slice(&self.sigma_y);
    }
}

/// ECDSA spend authorization over an input note, already split into the
/// convention's v/r/s form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSignature {
    pub v: u8,
    pub r: Word,
    pub s: Word,
}

/// One verified statement group decoded from (or encoded into) an output
/// blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofOutput {
    pub input_notes: Vec<NoteImage>,
    pub output_notes: Vec<NoteImage>,
    pub public_owner: Address,
    pub public_value: i64,
    pub challenge: Word,
}

// ========================= Strict Word Reader =========================

/// Cursor over a blob that fails loudly instead of slicing out of bounds.
pub(crate) struct WordReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> WordReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub(crate) fn ensure(&self, needed: usize) -> Result<(), AbiError> {
        if self.remaining() < needed {
            return Err(AbiError::MalformedEncoding("unexpected end of buffer"));
        }
        Ok(())
    }

    /// Bounds-check `count` upcoming elements of `width` bytes each before
    /// anything is allocated for them.
    pub(crate) fn ensure_counted(&self, count: usize, width: usize) -> Result<(), AbiError> {
        let needed = count
            .checked_mul(width)
            .ok_or(AbiError::MalformedEncoding("length word overflows"))?;
        self.ensure(needed)
    }

    pub(crate) fn word(&mut self) -> Result<Word, AbiError> {
        self.ensure(WORD_BYTES)?;
        let mut word = [0u8; 32];
        word.copy_from_slice(&self.bytes[self.position..self.position + WORD_BYTES]);
        self.position += WORD_BYTES;
        Ok(word)
    }

    /// Read a word holding a count or byte length.
    pub(crate) fn count(&mut self) -> Result<usize, AbiError> {
        let word = self.word()?;
        let value =
            word_to_u64(&word).ok_or(AbiError::MalformedEncoding("length word exceeds 64 bits"))?;
        usize::try_from(value)
            .map_err(|_| AbiError::MalformedEncoding("length word exceeds the address space"))
    }

    pub(crate) fn bytes(&mut self, len: usize) -> Result<&'a [u8], AbiError> {
        self.ensure(len)?;
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), AbiError> {
        self.ensure(len)?;
        self.position += len;
        Ok(())
    }
}
