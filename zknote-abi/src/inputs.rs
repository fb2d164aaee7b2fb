use zknote_primitives::{address_word, signed_word, word_from_u64, Address, Word, WORD_BYTES};

use crate::{AbiError, InputSignature, ProofDataEntry, WordReader, HEADER_BYTES, NOTE_WORDS};

/// Everything the submission encoder needs, borrowed from the proof.
pub struct SubmissionInputs<'a> {
    pub challenge: Word,
    pub public_value: i64,
    pub public_owner: Address,
    /// Kind-specific public scalar: input-note count, za, or a comparison
    /// bound. Zero when the kind has none.
    pub aux_a: Word,
    /// Second kind-specific public scalar (zb). Zero otherwise.
    pub aux_b: Word,
    pub entries: &'a [ProofDataEntry],
    pub signatures: &'a [InputSignature],
    pub output_owners: &'a [Address],
    /// Per-output-note metadata payloads (viewing key plus any app bytes).
    pub metadata: &'a [Vec<u8>],
}

/// Encode a submission blob: nine fixed header words, then the four dynamic
/// sections with offsets computed by accumulating section lengths.
pub fn encode_submission(inputs: &SubmissionInputs<'_>) -> Vec<u8> {
    let proof_data_len = WORD_BYTES * (1 + NOTE_WORDS * inputs.entries.len());
    let signatures_len = WORD_BYTES * (1 + 3 * inputs.signatures.len());
    let owners_len = WORD_BYTES * (1 + inputs.output_owners.len());
    let metadata_bytes = encode_metadata(inputs.metadata);

    let proof_data_offset = HEADER_BYTES;
    let signatures_offset = proof_data_offset + proof_data_len;
    let owners_offset = signatures_offset + signatures_len;
    let metadata_offset = owners_offset + owners_len;

    let mut blob = Vec::with_capacity(metadata_offset + metadata_bytes.len());
    blob.extend_from_slice(&inputs.challenge);
    blob.extend_from_slice(&signed_word(inputs.public_value));
    blob.extend_from_slice(&address_word(&inputs.public_owner));
    blob.extend_from_slice(&inputs.aux_a);
    blob.extend_from_slice(&inputs.aux_b);
    for offset in [
        proof_data_offset,
        signatures_offset,
        owners_offset,
        metadata_offset,
    ] {
        blob.extend_from_slice(&word_from_u64(offset as u64));
    }

    blob.extend_from_slice(&word_from_u64(inputs.entries.len() as u64));
    for entry in inputs.entries {
        entry.write(&mut blob);
    }

    blob.extend_from_slice(&word_from_u64(inputs.signatures.len() as u64));
    for signature in inputs.signatures {
        blob.extend_from_slice(&word_from_u64(signature.v as u64));
        blob.extend_from_slice(&signature.r);
        blob.extend_from_slice(&signature.s);
    }

    blob.extend_from_slice(&word_from_u64(inputs.output_owners.len() as u64));
    for owner in inputs.output_owners {
        blob.extend_from_slice(&address_word(owner));
    }

    blob.extend_from_slice(&metadata_bytes);
    blob
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_BYTES) * WORD_BYTES
}

/// Encode the metadata section: a count, an offset table, then one
/// length-prefixed payload per note, zero-padded to the word boundary.
/// Offsets are relative to the section's count word.
pub fn encode_metadata(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(entries.len());
    let mut position = WORD_BYTES * (1 + entries.len());
    for entry in entries {
        offsets.push(position);
        position += WORD_BYTES + padded_len(entry.len());
    }

    let mut out = Vec::with_capacity(position);
    out.extend_from_slice(&word_from_u64(entries.len() as u64));
    for offset in offsets {
        out.extend_from_slice(&word_from_u64(offset as u64));
    }
    for entry in entries {
        out.extend_from_slice(&word_from_u64(entry.len() as u64));
        out.extend_from_slice(entry);
        out.resize(out.len() + padded_len(entry.len()) - entry.len(), 0);
    }
    out
}

/// Decode a metadata section, enforcing that every offset lands exactly on
/// its entry's length word and that every payload is skipped by exactly its
/// recorded length.
pub fn decode_metadata(bytes: &[u8]) -> Result<Vec<Vec<u8>>, AbiError> {
    let mut reader = WordReader::new(bytes);
    let count = reader.count()?;
    reader.ensure_counted(count, WORD_BYTES)?;

    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(reader.count()?);
    }

    let mut entries = Vec::with_capacity(count);
    for offset in offsets {
        if reader.position() != offset {
            return Err(AbiError::MalformedEncoding(
                "metadata offset does not land on its entry",
            ));
        }
        let len = reader.count()?;
        let payload = reader.bytes(len)?;
        entries.push(payload.to_vec());
        reader.skip(padded_len(len) - len)?;
    }

    if reader.remaining() != 0 {
        return Err(AbiError::TrailingBytes(reader.remaining()));
    }
    Ok(entries)
}
