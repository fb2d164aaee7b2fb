use zknote_primitives::{
    address_word, affine_from_words, fq_to_word, keccak256, signed_word, word_from_u64,
    word_to_address, word_to_signed, word_to_u64, WORD_BYTES,
};

use crate::{AbiError, NoteImage, NoteStatus, ProofOutput, WordReader, NOTE_WORDS};

fn write_note(out: &mut Vec<u8>, note: &NoteImage) {
    out.extend_from_slice(&note.status.word());
    out.extend_from_slice(&address_word(&note.owner));
    out.extend_from_slice(&fq_to_word(&note.gamma.x));
    out.extend_from_slice(&fq_to_word(&note.gamma.y));
    out.extend_from_slice(&fq_to_word(&note.sigma.x));
    out.extend_from_slice(&fq_to_word(&note.sigma.y));
}

fn encode_output_body(record: &ProofOutput) -> Vec<u8> {
    let note_bytes = NOTE_WORDS * WORD_BYTES;
    let mut body = Vec::with_capacity(
        WORD_BYTES * 5 + note_bytes * (record.input_notes.len() + record.output_notes.len()),
    );
    body.extend_from_slice(&word_from_u64(record.input_notes.len() as u64));
    for note in &record.input_notes {
        write_note(&mut body, note);
    }
    body.extend_from_slice(&word_from_u64(record.output_notes.len() as u64));
    for note in &record.output_notes {
        write_note(&mut body, note);
    }
    body.extend_from_slice(&address_word(&record.public_owner));
    body.extend_from_slice(&signed_word(record.public_value));
    body.extend_from_slice(&record.challenge);
    body
}

/// Encode proof-output records into the verifier's return blob.
///
/// Word 0 carries the byte length of everything that follows it, word 1 the
/// record count, and each record is its body prefixed by a body-length word.
pub fn encode_proof_outputs(records: &[ProofOutput]) -> Vec<u8> {
    let bodies: Vec<Vec<u8>> = records.iter().map(encode_output_body).collect();
    let section: usize = bodies.iter().map(|body| WORD_BYTES + body.len()).sum();

    let mut blob = Vec::with_capacity(2 * WORD_BYTES + section);
    blob.extend_from_slice(&word_from_u64((WORD_BYTES + section) as u64));
    blob.extend_from_slice(&word_from_u64(records.len() as u64));
    for body in &bodies {
        blob.extend_from_slice(&word_from_u64(body.len() as u64));
        blob.extend_from_slice(body);
    }
    blob
}

/// Hash of a single record's body, excluding its length word. This is the
/// per-record identifier the verifier hands to downstream validators.
pub fn proof_output_hash(record: &ProofOutput) -> [u8; 32] {
    keccak256(&encode_output_body(record))
}

/// Hash of the full output blob, length words included.
pub fn outputs_hash(blob: &[u8]) -> [u8; 32] {
    keccak256(blob)
}

fn read_note(reader: &mut WordReader<'_>) -> Result<NoteImage, AbiError> {
    let raw_status = word_to_u64(&reader.word()?)
        .ok_or(AbiError::MalformedEncoding("status word exceeds 64 bits"))?;
    let status = NoteStatus::from_u64(raw_status).ok_or(AbiError::BadStatus(raw_status))?;
    let owner = word_to_address(&reader.word()?).ok_or(AbiError::MalformedEncoding(
        "owner word carries non-address bytes",
    ))?;
    let gamma_x = reader.word()?;
    let gamma_y = reader.word()?;
    let sigma_x = reader.word()?;
    let sigma_y = reader.word()?;
    let gamma = affine_from_words(&gamma_x, &gamma_y)?;
    let sigma = affine_from_words(&sigma_x, &sigma_y)?;
    Ok(NoteImage::new(status, owner, gamma, sigma))
}

fn decode_output_body(body: &[u8]) -> Result<ProofOutput, AbiError> {
    let mut reader = WordReader::new(body);

    let input_count = reader.count()?;
    reader.ensure_counted(input_count, NOTE_WORDS * WORD_BYTES)?;
    let mut input_notes = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        input_notes.push(read_note(&mut reader)?);
    }

    let output_count = reader.count()?;
    reader.ensure_counted(output_count, NOTE_WORDS * WORD_BYTES)?;
    let mut output_notes = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        output_notes.push(read_note(&mut reader)?);
    }

    let public_owner = word_to_address(&reader.word()?).ok_or(AbiError::MalformedEncoding(
        "owner word carries non-address bytes",
    ))?;
    let public_value = word_to_signed(&reader.word()?).ok_or(AbiError::MalformedEncoding(
        "public value word is not a sign-extended 64-bit value",
    ))?;
    let challenge = reader.word()?;

    if reader.remaining() != 0 {
        return Err(AbiError::MalformedEncoding(
            "record length word does not match its body",
        ));
    }
    Ok(ProofOutput {
        input_notes,
        output_notes,
        public_owner,
        public_value,
        challenge,
    })
}

/// Decode a verifier output blob back into its records.
///
/// # Errors
///
/// Rejects blobs whose leading length word disagrees with the actual byte
/// count, whose record bodies run short or long, or whose note fields fail
/// validation (unknown status, non-address owner words, off-curve points).
pub fn decode_proof_outputs(bytes: &[u8]) -> Result<Vec<ProofOutput>, AbiError> {
    let mut reader = WordReader::new(bytes);
    let declared = reader.count()?;
    if declared != reader.remaining() {
        return Err(AbiError::MalformedEncoding(
            "blob length word does not match the remaining bytes",
        ));
    }

    let record_count = reader.count()?;
    reader.ensure_counted(record_count, WORD_BYTES)?;
    let mut records = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        let body_len = reader.count()?;
        let body = reader.bytes(body_len)?;
        records.push(decode_output_body(body)?);
    }

    if reader.remaining() != 0 {
        return Err(AbiError::TrailingBytes(reader.remaining()));
    }
    Ok(records)
}
