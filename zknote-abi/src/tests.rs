use crate::*;
use ark_ec::CurveGroup;
use ark_ff::UniformRand;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zknote_primitives::{
    generator, keccak256, note_commitment_hash, signed_word, word_from_u64, word_to_u64, Fr,
    PointError, Word, WORD_BYTES,
};

fn seeded_rng(tag: u8) -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    ChaCha20Rng::from_seed(seed)
}

fn random_note(rng: &mut ChaCha20Rng, status: NoteStatus) -> NoteImage {
    let gamma = (generator() * Fr::rand(rng)).into_affine();
    let sigma = (generator() * Fr::rand(rng)).into_affine();
    let mut owner = [0u8; 20];
    rng.fill_bytes(&mut owner);
    NoteImage::new(status, owner, gamma, sigma)
}

fn sample_record(tag: u8) -> ProofOutput {
    let mut rng = seeded_rng(tag);
    ProofOutput {
        input_notes: vec![random_note(&mut rng, NoteStatus::Spent)],
        output_notes: vec![
            random_note(&mut rng, NoteStatus::Unspent),
            random_note(&mut rng, NoteStatus::Unspent),
        ],
        public_owner: [0x11; 20],
        public_value: -40,
        challenge: word_from_u64(7),
    }
}

fn word_at(blob: &[u8], offset: usize) -> Word {
    let mut word = [0u8; 32];
    word.copy_from_slice(&blob[offset..offset + WORD_BYTES]);
    word
}

fn bump_word(blob: &mut [u8], offset: usize, delta: u64) {
    let value = word_to_u64(&word_at(blob, offset)).expect("small count word");
    blob[offset..offset + WORD_BYTES].copy_from_slice(&word_from_u64(value + delta));
}

// ===== Output blobs =====

#[test]
fn output_blob_round_trips() {
    let record = sample_record(1);
    let blob = encode_proof_outputs(std::slice::from_ref(&record));
    let decoded = decode_proof_outputs(&blob).expect("decode");
    assert_eq!(decoded, vec![record]);
}

#[test]
fn output_blob_round_trips_multiple_records_and_empty_sides() {
    let mut rng = seeded_rng(2);
    let residual_only = ProofOutput {
        input_notes: Vec::new(),
        output_notes: vec![random_note(&mut rng, NoteStatus::Unspent)],
        public_owner: [0u8; 20],
        public_value: 0,
        challenge: word_from_u64(9),
    };
    let records = vec![sample_record(3), residual_only];
    let blob = encode_proof_outputs(&records);
    let decoded = decode_proof_outputs(&blob).expect("decode");
    assert_eq!(decoded, records);
    assert!(decoded[1].input_notes.is_empty());
}

#[test]
fn decoded_note_hash_matches_its_points() {
    let record = sample_record(4);
    let blob = encode_proof_outputs(std::slice::from_ref(&record));
    let decoded = decode_proof_outputs(&blob).expect("decode");
    let note = &decoded[0].input_notes[0];
    assert_eq!(note.note_hash(), note_commitment_hash(&note.gamma, &note.sigma));
}

#[test]
fn output_blob_length_word_must_match() {
    let mut blob = encode_proof_outputs(&[sample_record(5)]);
    bump_word(&mut blob, 0, 1);
    let err = decode_proof_outputs(&blob).expect_err("bad length word");
    assert_eq!(
        err.to_string(),
        "malformed encoding: blob length word does not match the remaining bytes"
    );

    let mut truncated = encode_proof_outputs(&[sample_record(5)]);
    truncated.truncate(truncated.len() - 1);
    let err = decode_proof_outputs(&truncated).expect_err("truncated blob");
    assert!(matches!(err, AbiError::MalformedEncoding(_)));
}

#[test]
fn output_blob_rejects_trailing_bytes() {
    let mut blob = encode_proof_outputs(&[sample_record(6)]);
    blob.extend_from_slice(&[0u8; 32]);
    bump_word(&mut blob, 0, 32);
    let err = decode_proof_outputs(&blob).expect_err("trailing bytes");
    assert!(matches!(err, AbiError::TrailingBytes(32)));
    assert_eq!(err.to_string(), "unexpected trailing bytes: 32");
}

#[test]
fn record_length_word_must_match_its_body() {
    let mut blob = encode_proof_outputs(&[sample_record(7)]);
    // Stretch the record's declared body by one word and pad the blob to
    // keep the outer length word honest.
    bump_word(&mut blob, 2 * WORD_BYTES, 32);
    blob.extend_from_slice(&[0u8; 32]);
    bump_word(&mut blob, 0, 32);
    let err = decode_proof_outputs(&blob).expect_err("stretched record");
    assert_eq!(
        err.to_string(),
        "malformed encoding: record length word does not match its body"
    );
}

#[test]
fn unknown_note_status_is_rejected() {
    let mut blob = encode_proof_outputs(&[sample_record(8)]);
    // Body starts after the blob length, record count and body length words;
    // its first note's status sits one word further in.
    let status_offset = 4 * WORD_BYTES;
    blob[status_offset..status_offset + WORD_BYTES].copy_from_slice(&word_from_u64(3));
    let err = decode_proof_outputs(&blob).expect_err("status 3");
    assert!(matches!(err, AbiError::BadStatus(3)));
    assert_eq!(err.to_string(), "unknown note status: 3");
}

#[test]
fn off_curve_note_coordinates_are_rejected() {
    let mut blob = encode_proof_outputs(&[sample_record(9)]);
    // (1, 3) misses the curve: 3^2 != 1^3 + 3.
    let gamma_x_offset = 6 * WORD_BYTES;
    blob[gamma_x_offset..gamma_x_offset + WORD_BYTES].copy_from_slice(&word_from_u64(1));
    blob[gamma_x_offset + WORD_BYTES..gamma_x_offset + 2 * WORD_BYTES]
        .copy_from_slice(&word_from_u64(3));
    let err = decode_proof_outputs(&blob).expect_err("off-curve point");
    assert!(matches!(err, AbiError::Point(PointError::NotOnCurve)));
}

#[test]
fn record_hash_covers_the_body_without_its_length_word() {
    let record = sample_record(10);
    let blob = encode_proof_outputs(std::slice::from_ref(&record));
    let body_start = 3 * WORD_BYTES;
    assert_eq!(proof_output_hash(&record), keccak256(&blob[body_start..]));
    assert_eq!(outputs_hash(&blob), keccak256(&blob));
    assert_ne!(proof_output_hash(&record), proof_output_hash(&sample_record(11)));
}

// ===== Metadata =====

#[test]
fn metadata_round_trips_varying_lengths() {
    let entries: Vec<Vec<u8>> = [33usize, 40, 65, 133]
        .iter()
        .map(|len| (0..*len).map(|i| i as u8).collect())
        .collect();
    let encoded = encode_metadata(&entries);
    // Count word, four offset words, then four length-prefixed payloads
    // padded to 64, 64, 96 and 160 bytes.
    assert_eq!(encoded.len(), WORD_BYTES * (1 + 4 + 4) + 64 + 64 + 96 + 160);
    let decoded = decode_metadata(&encoded).expect("decode");
    assert_eq!(decoded, entries);
}

#[test]
fn metadata_round_trips_empty_section() {
    let encoded = encode_metadata(&[]);
    assert_eq!(encoded.len(), WORD_BYTES);
    assert_eq!(decode_metadata(&encoded).expect("decode"), Vec::<Vec<u8>>::new());
}

#[test]
fn metadata_offsets_must_land_on_entries() {
    let entries = vec![vec![0xaa; 33], vec![0xbb; 65]];
    let mut encoded = encode_metadata(&entries);
    bump_word(&mut encoded, WORD_BYTES, 32);
    let err = decode_metadata(&encoded).expect_err("shifted offset");
    assert_eq!(
        err.to_string(),
        "malformed encoding: metadata offset does not land on its entry"
    );
}

#[test]
fn metadata_rejects_trailing_bytes() {
    let mut encoded = encode_metadata(&[vec![0xcc; 40]]);
    encoded.extend_from_slice(&[0u8; 32]);
    let err = decode_metadata(&encoded).expect_err("trailing bytes");
    assert!(matches!(err, AbiError::TrailingBytes(32)));
}

// ===== Submissions =====

fn sample_entry(tag: u64) -> ProofDataEntry {
    ProofDataEntry {
        k_bar: word_from_u64(tag),
        a_bar: word_from_u64(tag + 1),
        gamma_x: word_from_u64(tag + 2),
        gamma_y: word_from_u64(tag + 3),
        sigma_x: word_from_u64(tag + 4),
        sigma_y: word_from_u64(tag + 5),
    }
}

#[test]
fn submission_places_every_section_at_its_offset_word() {
    let entries = [sample_entry(100), sample_entry(200)];
    let signatures = [InputSignature {
        v: 27,
        r: word_from_u64(41),
        s: word_from_u64(42),
    }];
    let owners = [[0x22u8; 20], [0x33u8; 20]];
    let metadata = vec![vec![0xab; 33], vec![0xcd; 65]];
    let inputs = SubmissionInputs {
        challenge: word_from_u64(77),
        public_value: -5,
        public_owner: [0x44; 20],
        aux_a: word_from_u64(1),
        aux_b: word_from_u64(0),
        entries: &entries,
        signatures: &signatures,
        output_owners: &owners,
        metadata: &metadata,
    };
    let blob = encode_submission(&inputs);

    assert_eq!(word_at(&blob, 0), word_from_u64(77));
    assert_eq!(word_at(&blob, WORD_BYTES), signed_word(-5));
    assert_eq!(word_at(&blob, 2 * WORD_BYTES)[12..], [0x44; 20]);
    assert_eq!(word_at(&blob, 3 * WORD_BYTES), word_from_u64(1));
    assert_eq!(word_at(&blob, 4 * WORD_BYTES), word_from_u64(0));

    let read_offset = |slot: usize| {
        word_to_u64(&word_at(&blob, (5 + slot) * WORD_BYTES)).expect("offset word") as usize
    };
    let proof_data_offset = read_offset(0);
    let signatures_offset = read_offset(1);
    let owners_offset = read_offset(2);
    let metadata_offset = read_offset(3);

    assert_eq!(proof_data_offset, HEADER_BYTES);
    assert_eq!(
        signatures_offset,
        proof_data_offset + WORD_BYTES * (1 + NOTE_WORDS * 2)
    );
    assert_eq!(owners_offset, signatures_offset + WORD_BYTES * (1 + 3));
    assert_eq!(metadata_offset, owners_offset + WORD_BYTES * (1 + 2));

    assert_eq!(word_at(&blob, proof_data_offset), word_from_u64(2));
    assert_eq!(word_at(&blob, proof_data_offset + WORD_BYTES), word_from_u64(100));
    assert_eq!(word_at(&blob, signatures_offset), word_from_u64(1));
    assert_eq!(word_at(&blob, signatures_offset + WORD_BYTES), word_from_u64(27));
    assert_eq!(word_at(&blob, owners_offset), word_from_u64(2));
    assert_eq!(word_at(&blob, owners_offset + WORD_BYTES)[12..], [0x22; 20]);

    let decoded = decode_metadata(&blob[metadata_offset..]).expect("metadata section");
    assert_eq!(decoded, metadata);
}

#[test]
fn submission_encodes_empty_sections_as_zero_counts() {
    let inputs = SubmissionInputs {
        challenge: word_from_u64(1),
        public_value: 0,
        public_owner: [0u8; 20],
        aux_a: word_from_u64(0),
        aux_b: word_from_u64(0),
        entries: &[],
        signatures: &[],
        output_owners: &[],
        metadata: &[],
    };
    let blob = encode_submission(&inputs);
    assert_eq!(blob.len(), HEADER_BYTES + 4 * WORD_BYTES);
    assert_eq!(word_at(&blob, HEADER_BYTES), word_from_u64(0));
    assert_eq!(word_at(&blob, HEADER_BYTES + WORD_BYTES), word_from_u64(0));
    assert_eq!(word_at(&blob, HEADER_BYTES + 2 * WORD_BYTES), word_from_u64(0));
    assert_eq!(word_at(&blob, HEADER_BYTES + 3 * WORD_BYTES), word_from_u64(0));
}
