//! Sigma-protocol proof construction over note sets.
//!
//! One generalized commit/challenge/response pipeline serves every proof
//! kind; the kinds differ in how blinding scalars are tied together, which
//! public scalars enter the challenge and how verified notes are grouped
//! into proof outputs.

use ark_ec::CurveGroup;
use ark_ff::Zero;
use rand::{CryptoRng, RngCore};

use zknote_abi::{
    encode_proof_outputs, encode_submission, outputs_hash, proof_output_hash, InputSignature,
    NoteImage, NoteStatus, ProofDataEntry, ProofOutput, SubmissionInputs,
};
use zknote_primitives::{
    fq_to_word, fr_to_word, h_generator, random_group_scalar, signed_to_fr, word_from_u64,
    Address, Fr, G1Affine, G1Projective, RollingHash, Word, K_MAX,
};

use crate::{Note, ProverError};

const ZERO_ADDRESS: Address = [0u8; 20];

/// Statement families the construction engine can prove.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProofKind {
    /// Join-split transfer balancing confidential notes against a signed
    /// public value.
    Transfer,
    /// Bilateral swap of four notes across two value-equal legs.
    Swap,
    /// Ratio statement `za * source = zb * target + residual`.
    Dividend,
    /// Proof that a note value meets a public lower bound.
    PublicRange,
    /// Supply increase against a mint counter note.
    Mint,
    /// Supply decrease against a burn counter note.
    Burn,
}

impl ProofKind {
    /// 24-bit proof identifier submitted alongside the blob: epoch, category
    /// and index octets.
    pub fn id(self) -> u32 {
        match self {
            ProofKind::Transfer => 0x01_01_01,
            ProofKind::Swap => 0x01_01_02,
            ProofKind::Mint => 0x01_02_01,
            ProofKind::Burn => 0x01_03_01,
            ProofKind::Dividend => 0x01_04_01,
            ProofKind::PublicRange => 0x01_04_02,
        }
    }
}

/// A proof statement together with the notes witnessing it.
///
/// Swap and public-range notes are positional, matching the order the
/// external convention fixes for them; the other kinds name their roles.
#[derive(Clone, Debug)]
pub enum ProofRequest {
    Transfer {
        input_notes: Vec<Note>,
        output_notes: Vec<Note>,
        sender: Address,
        /// Value entering (positive) or leaving (negative) the public ledger.
        public_value: i64,
        public_owner: Address,
    },
    Swap {
        /// `[maker bid, taker bid, maker ask, taker ask]`; bid and ask values
        /// must match pairwise across the legs.
        notes: Vec<Note>,
        sender: Address,
    },
    Dividend {
        source: Note,
        target: Note,
        /// Note absorbing `za * source - zb * target`.
        residual: Note,
        za: u64,
        zb: u64,
        sender: Address,
    },
    PublicRange {
        /// `[original, utility]` with `original = public_comparison + utility`.
        notes: Vec<Note>,
        public_comparison: u64,
        sender: Address,
    },
    Mint {
        current_total: Note,
        new_total: Note,
        minted: Vec<Note>,
        sender: Address,
    },
    Burn {
        current_total: Note,
        new_total: Note,
        burned: Vec<Note>,
        sender: Address,
    },
}

/// A fully constructed proof.
///
/// Immutable once built; consumed exactly once by [`Proof::into_submission`].
#[derive(Clone, Debug)]
pub struct Proof {
    kind: ProofKind,
    input_notes: Vec<Note>,
    output_notes: Vec<Note>,
    sender: Address,
    public_value: i64,
    public_owner: Address,
    challenge: Word,
    entries: Vec<ProofDataEntry>,
    outputs: Vec<ProofOutput>,
    output_blob: Vec<u8>,
    output_hashes: Vec<Word>,
    outputs_hash: Word,
    aux_a: Word,
    aux_b: Word,
}

impl Proof {
    #[allow(clippy::too_many_arguments)]
    fn assemble(
        kind: ProofKind,
        input_notes: Vec<Note>,
        output_notes: Vec<Note>,
        sender: Address,
        public_value: i64,
        public_owner: Address,
        challenge: Word,
        entries: Vec<ProofDataEntry>,
        outputs: Vec<ProofOutput>,
        aux_a: Word,
        aux_b: Word,
    ) -> Self {
        let output_blob = encode_proof_outputs(&outputs);
        let output_hashes = outputs.iter().map(proof_output_hash).collect();
        let blob_hash = outputs_hash(&output_blob);
        Self {
            kind,
            input_notes,
            output_notes,
            sender,
            public_value,
            public_owner,
            challenge,
            entries,
            outputs,
            output_blob,
            output_hashes,
            outputs_hash: blob_hash,
            aux_a,
            aux_b,
        }
    }

    pub fn kind(&self) -> ProofKind {
        self.kind
    }

    /// Notes the proof spends, in registry order.
    pub fn input_notes(&self) -> &[Note] {
        &self.input_notes
    }

    /// Notes the proof creates, in registry order.
    pub fn output_notes(&self) -> &[Note] {
        &self.output_notes
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn public_value(&self) -> i64 {
        self.public_value
    }

    pub fn public_owner(&self) -> Address {
        self.public_owner
    }

    /// The Fiat-Shamir challenge word.
    pub fn challenge(&self) -> Word {
        self.challenge
    }

    /// Per-note response entries in sigma order.
    pub fn entries(&self) -> &[ProofDataEntry] {
        &self.entries
    }

    /// Verified-statement groups in the form the verifier returns them.
    pub fn outputs(&self) -> &[ProofOutput] {
        &self.outputs
    }

    /// The encoded form of [`Proof::outputs`].
    pub fn output_blob(&self) -> &[u8] {
        &self.output_blob
    }

    /// One hash per output group.
    pub fn output_hashes(&self) -> &[Word] {
        &self.output_hashes
    }

    /// Hash of the whole output blob.
    pub fn outputs_hash(&self) -> Word {
        self.outputs_hash
    }

    /// Serialize the proof into a submission blob, attaching `signatures`
    /// over the spent input notes.
    pub fn into_submission(self, signatures: &[InputSignature]) -> Vec<u8> {
        let output_owners: Vec<Address> =
            self.output_notes.iter().map(|note| note.owner()).collect();
        let metadata: Vec<Vec<u8>> =
            self.output_notes.iter().map(|note| note.metadata()).collect();
        encode_submission(&SubmissionInputs {
            challenge: self.challenge,
            public_value: self.public_value,
            public_owner: self.public_owner,
            aux_a: self.aux_a,
            aux_b: self.aux_b,
            entries: &self.entries,
            signatures,
            output_owners: &output_owners,
            metadata: &metadata,
        })
    }
}

// ========================= Shared Machinery =========================

/// Per-note ephemeral blinding pair and its commitment `B`.
struct BlindingFactor {
    bk: Fr,
    ba: Fr,
    commitment: G1Projective,
}

/// Draw one `(bk, ba)` pair per note, in note order, before any linkage
/// overrides. Keeping the draw order independent of the kind makes
/// construction reproducible under a seeded source.
fn draw_scalars<R: RngCore + CryptoRng>(count: usize, rng: &mut R) -> Vec<(Fr, Fr)> {
    (0..count)
        .map(|_| (random_group_scalar(rng), random_group_scalar(rng)))
        .collect()
}

fn fold_notes(hash: &mut RollingHash, notes: &[&Note]) {
    for note in notes {
        hash.append_point(note.gamma());
        hash.append_point(note.sigma());
    }
}

fn fold_points(hash: &mut RollingHash, points: &[G1Affine]) {
    for point in points {
        hash.append_point(point);
    }
}

/// Hash chain seeded with every note's commitment points; each squeeze
/// yields the next linkage multiplier.
fn linkage_hash(notes: &[&Note]) -> RollingHash {
    let mut hash = RollingHash::new();
    fold_notes(&mut hash, notes);
    hash
}

fn normalized_commitments(factors: &[BlindingFactor]) -> Vec<G1Affine> {
    let projective: Vec<G1Projective> = factors.iter().map(|f| f.commitment).collect();
    G1Projective::normalize_batch(&projective)
}

/// Join-split linkage: input `bk`s accumulate, non-final output `bk`s
/// subtract, and the final note's `bk` closes the sum so that the response
/// words balance against the public value.
fn running_sum_factors(notes: &[&Note], m: usize, scalars: &[(Fr, Fr)]) -> Vec<BlindingFactor> {
    let h = h_generator();
    let last = notes.len() - 1;
    let mut running_bk = Fr::zero();
    notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let (mut bk, ba) = scalars[i];
            if i == last {
                bk = if m == notes.len() {
                    -running_bk
                } else {
                    running_bk
                };
            } else if i < m {
                running_bk += bk;
            } else {
                running_bk -= bk;
            }
            let commitment = *note.gamma() * bk + h * ba;
            BlindingFactor { bk, ba, commitment }
        })
        .collect()
}

fn response_entries(
    notes: &[&Note],
    factors: &[BlindingFactor],
    challenge: Fr,
) -> Vec<ProofDataEntry> {
    notes
        .iter()
        .zip(factors)
        .map(|(note, factor)| {
            let k_bar = Fr::from(note.value()) * challenge + factor.bk;
            let a_bar = note.blinding() * challenge + factor.ba;
            ProofDataEntry {
                k_bar: fr_to_word(&k_bar),
                a_bar: fr_to_word(&a_bar),
                gamma_x: fq_to_word(&note.gamma().x),
                gamma_y: fq_to_word(&note.gamma().y),
                sigma_x: fq_to_word(&note.sigma().x),
                sigma_y: fq_to_word(&note.sigma().y),
            }
        })
        .collect()
}

fn images(notes: &[Note], status: NoteStatus) -> Vec<NoteImage> {
    notes
        .iter()
        .map(|note| NoteImage::new(status, note.owner(), *note.gamma(), *note.sigma()))
        .collect()
}

/// Challenge of a proof's second output group: the first challenge rehashed,
/// binding the legs of a paired statement to one transcript.
fn second_challenge(first: &Word) -> Word {
    let mut hash = RollingHash::new();
    hash.append_word(first);
    fr_to_word(&hash.squeeze())
}

fn value_sum(notes: &[Note]) -> u128 {
    notes.iter().map(|note| u128::from(note.value())).sum()
}

// ========================= Construction =========================

/// Build a proof for `request`.
///
/// The randomness source supplies every blinding scalar. It must be
/// cryptographically secure and must not be shared across proofs; blinding
/// reuse breaks soundness and can leak note values. Given the same request
/// and randomness stream the construction is fully deterministic.
///
/// # Arguments
/// * `request` - The statement and its witness notes
/// * `rng` - Cryptographically secure randomness for the blinding phase
///
/// # Returns
/// * A [`Proof`] carrying the challenge, response entries and output groups
///
/// # Errors
/// * `ProverError::InvalidProofShape` - If note arity, a value relation or a
///   required field does not fit the requested kind
pub fn construct_proof<R: RngCore + CryptoRng>(
    request: &ProofRequest,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    match request {
        ProofRequest::Transfer {
            input_notes,
            output_notes,
            sender,
            public_value,
            public_owner,
        } => construct_transfer(
            input_notes,
            output_notes,
            *sender,
            *public_value,
            *public_owner,
            rng,
        ),
        ProofRequest::Swap { notes, sender } => construct_swap(notes, *sender, rng),
        ProofRequest::Dividend {
            source,
            target,
            residual,
            za,
            zb,
            sender,
        } => construct_dividend(source, target, residual, *za, *zb, *sender, rng),
        ProofRequest::PublicRange {
            notes,
            public_comparison,
            sender,
        } => construct_public_range(notes, *public_comparison, *sender, rng),
        ProofRequest::Mint {
            current_total,
            new_total,
            minted,
            sender,
        } => construct_adjustment(ProofKind::Mint, current_total, new_total, minted, *sender, rng),
        ProofRequest::Burn {
            current_total,
            new_total,
            burned,
            sender,
        } => construct_adjustment(ProofKind::Burn, current_total, new_total, burned, *sender, rng),
    }
}

// ========================= Transfer =========================

fn construct_transfer<R: RngCore + CryptoRng>(
    input_notes: &[Note],
    output_notes: &[Note],
    sender: Address,
    public_value: i64,
    public_owner: Address,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    if input_notes.is_empty() && output_notes.is_empty() {
        return Err(ProverError::InvalidProofShape(
            "Transfer proofs require at least one note",
        ));
    }
    let balance = value_sum(input_notes) as i128 - value_sum(output_notes) as i128;
    if balance != i128::from(public_value) {
        return Err(ProverError::InvalidProofShape(
            "public value does not balance the note values",
        ));
    }

    let m = input_notes.len();
    let notes: Vec<&Note> = input_notes.iter().chain(output_notes).collect();
    let scalars = draw_scalars(notes.len(), rng);
    let factors = running_sum_factors(&notes, m, &scalars);
    let commitments = normalized_commitments(&factors);

    let mut hash = RollingHash::new();
    hash.append_address(&sender);
    hash.append_word(&fr_to_word(&signed_to_fr(public_value)));
    hash.append_word(&word_from_u64(m as u64));
    hash.append_address(&public_owner);
    fold_notes(&mut hash, &notes);
    fold_points(&mut hash, &commitments);
    let challenge = hash.squeeze();

    let entries = response_entries(&notes, &factors, challenge);
    let challenge_word = fr_to_word(&challenge);
    let outputs = vec![ProofOutput {
        input_notes: images(input_notes, NoteStatus::Spent),
        output_notes: images(output_notes, NoteStatus::Unspent),
        public_owner,
        public_value,
        challenge: challenge_word,
    }];

    Ok(Proof::assemble(
        ProofKind::Transfer,
        input_notes.to_vec(),
        output_notes.to_vec(),
        sender,
        public_value,
        public_owner,
        challenge_word,
        entries,
        outputs,
        word_from_u64(m as u64),
        word_from_u64(0),
    ))
}

// ========================= Swap =========================

fn construct_swap<R: RngCore + CryptoRng>(
    notes: &[Note],
    sender: Address,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    if notes.len() != 4 {
        return Err(ProverError::InvalidProofShape(
            "Swap proofs must contain 4 notes",
        ));
    }
    if notes[0].value() != notes[2].value() || notes[1].value() != notes[3].value() {
        return Err(ProverError::InvalidProofShape(
            "swap legs do not balance",
        ));
    }

    let refs: Vec<&Note> = notes.iter().collect();
    let scalars = draw_scalars(4, rng);
    let mut linkage = linkage_hash(&refs);
    let h = h_generator();

    // Ask notes reuse their bid counterpart's bk, scaled under a fresh
    // linkage multiplier per note; responses carry the raw scalars.
    let mut factors: Vec<BlindingFactor> = Vec::with_capacity(4);
    for (i, note) in refs.iter().enumerate() {
        let (mut bk, ba) = scalars[i];
        let commitment = if i < 2 {
            *note.gamma() * bk + h * ba
        } else {
            bk = factors[i - 2].bk;
            let x = linkage.squeeze();
            *note.gamma() * (x * bk) + h * (x * ba)
        };
        factors.push(BlindingFactor { bk, ba, commitment });
    }
    let commitments = normalized_commitments(&factors);

    let mut hash = RollingHash::new();
    hash.append_address(&sender);
    fold_notes(&mut hash, &refs);
    fold_points(&mut hash, &commitments);
    let challenge = hash.squeeze();

    let entries = response_entries(&refs, &factors, challenge);
    let challenge_word = fr_to_word(&challenge);
    let outputs = vec![
        ProofOutput {
            input_notes: images(&notes[0..1], NoteStatus::Spent),
            output_notes: images(&notes[2..3], NoteStatus::Unspent),
            public_owner: ZERO_ADDRESS,
            public_value: 0,
            challenge: challenge_word,
        },
        ProofOutput {
            input_notes: images(&notes[1..2], NoteStatus::Spent),
            output_notes: images(&notes[3..4], NoteStatus::Unspent),
            public_owner: ZERO_ADDRESS,
            public_value: 0,
            challenge: second_challenge(&challenge_word),
        },
    ];

    Ok(Proof::assemble(
        ProofKind::Swap,
        notes[0..2].to_vec(),
        notes[2..4].to_vec(),
        sender,
        0,
        ZERO_ADDRESS,
        challenge_word,
        entries,
        outputs,
        word_from_u64(0),
        word_from_u64(0),
    ))
}

// ========================= Dividend =========================

fn construct_dividend<R: RngCore + CryptoRng>(
    source: &Note,
    target: &Note,
    residual: &Note,
    za: u64,
    zb: u64,
    sender: Address,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    if za == 0 || zb == 0 {
        return Err(ProverError::InvalidProofShape(
            "dividend ratios must be nonzero",
        ));
    }
    // Ratios share the note-value bound; the convention has no wider slot.
    if za >= K_MAX || zb >= K_MAX {
        return Err(ProverError::InvalidProofShape(
            "dividend ratios must stay below the value ceiling",
        ));
    }
    let scaled_source = u128::from(za) * u128::from(source.value());
    let scaled_target = u128::from(zb) * u128::from(target.value());
    if scaled_source != scaled_target + u128::from(residual.value()) {
        return Err(ProverError::InvalidProofShape(
            "dividend values do not satisfy the ratio",
        ));
    }

    let refs = [source, target, residual];
    let scalars = draw_scalars(3, rng);
    let mut linkage = linkage_hash(&refs);
    let h = h_generator();

    let (bk0, ba0) = scalars[0];
    let (bk1, ba1) = scalars[1];
    let (_, ba2) = scalars[2];
    let x1 = linkage.squeeze();
    let x2 = linkage.squeeze();
    // The residual bk is the ratio combination of the other two, so the
    // response words inherit the public relation.
    let bk2 = Fr::from(za) * bk0 - Fr::from(zb) * bk1;
    let factors = vec![
        BlindingFactor {
            bk: bk0,
            ba: ba0,
            commitment: *source.gamma() * bk0 + h * ba0,
        },
        BlindingFactor {
            bk: bk1,
            ba: ba1,
            commitment: *target.gamma() * (x1 * bk1) + h * (x1 * ba1),
        },
        BlindingFactor {
            bk: bk2,
            ba: ba2,
            commitment: *residual.gamma() * (x2 * bk2) + h * (x2 * ba2),
        },
    ];
    let commitments = normalized_commitments(&factors);

    let mut hash = RollingHash::new();
    hash.append_address(&sender);
    hash.append_word(&word_from_u64(za));
    hash.append_word(&word_from_u64(zb));
    fold_notes(&mut hash, &refs);
    fold_points(&mut hash, &commitments);
    let challenge = hash.squeeze();

    let entries = response_entries(&refs, &factors, challenge);
    let challenge_word = fr_to_word(&challenge);
    let outputs = vec![
        ProofOutput {
            input_notes: images(std::slice::from_ref(source), NoteStatus::Spent),
            output_notes: images(std::slice::from_ref(target), NoteStatus::Unspent),
            public_owner: ZERO_ADDRESS,
            public_value: 0,
            challenge: challenge_word,
        },
        ProofOutput {
            input_notes: Vec::new(),
            output_notes: images(std::slice::from_ref(residual), NoteStatus::Unspent),
            public_owner: ZERO_ADDRESS,
            public_value: 0,
            challenge: second_challenge(&challenge_word),
        },
    ];

    Ok(Proof::assemble(
        ProofKind::Dividend,
        vec![source.clone()],
        vec![target.clone(), residual.clone()],
        sender,
        0,
        ZERO_ADDRESS,
        challenge_word,
        entries,
        outputs,
        word_from_u64(za),
        word_from_u64(zb),
    ))
}

// ========================= Public Range =========================

fn construct_public_range<R: RngCore + CryptoRng>(
    notes: &[Note],
    public_comparison: u64,
    sender: Address,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    if notes.len() != 2 {
        return Err(ProverError::InvalidProofShape(
            "Public range proofs must contain 2 notes",
        ));
    }
    let original = &notes[0];
    let utility = &notes[1];
    if u128::from(original.value()) != u128::from(public_comparison) + u128::from(utility.value())
    {
        return Err(ProverError::InvalidProofShape(
            "note values do not satisfy the comparison",
        ));
    }

    let refs = [original, utility];
    let scalars = draw_scalars(2, rng);
    let h = h_generator();

    // The utility note shares the original's bk, tying the hidden values to
    // the public bound without a linkage multiplier.
    let (bk0, ba0) = scalars[0];
    let (_, ba1) = scalars[1];
    let factors = vec![
        BlindingFactor {
            bk: bk0,
            ba: ba0,
            commitment: *original.gamma() * bk0 + h * ba0,
        },
        BlindingFactor {
            bk: bk0,
            ba: ba1,
            commitment: *utility.gamma() * bk0 + h * ba1,
        },
    ];
    let commitments = normalized_commitments(&factors);

    let mut hash = RollingHash::new();
    hash.append_address(&sender);
    hash.append_word(&word_from_u64(public_comparison));
    fold_notes(&mut hash, &refs);
    fold_points(&mut hash, &commitments);
    let challenge = hash.squeeze();

    let entries = response_entries(&refs, &factors, challenge);
    let challenge_word = fr_to_word(&challenge);
    let outputs = vec![ProofOutput {
        input_notes: images(std::slice::from_ref(original), NoteStatus::Spent),
        output_notes: images(std::slice::from_ref(utility), NoteStatus::Unspent),
        public_owner: ZERO_ADDRESS,
        public_value: 0,
        challenge: challenge_word,
    }];

    Ok(Proof::assemble(
        ProofKind::PublicRange,
        vec![original.clone()],
        vec![utility.clone()],
        sender,
        0,
        ZERO_ADDRESS,
        challenge_word,
        entries,
        outputs,
        word_from_u64(public_comparison),
        word_from_u64(0),
    ))
}

// ========================= Supply Adjustment =========================

/// Mint and burn share one shape: a join-split over
/// `[new_total, current_total, adjusted...]` with the first note as the
/// sigma input, zero public value and zero public owner. They differ only
/// in how the verified notes are grouped.
fn construct_adjustment<R: RngCore + CryptoRng>(
    kind: ProofKind,
    current_total: &Note,
    new_total: &Note,
    adjusted: &[Note],
    sender: Address,
    rng: &mut R,
) -> Result<Proof, ProverError> {
    if adjusted.is_empty() {
        return Err(ProverError::InvalidProofShape(
            "Supply adjustments require at least one adjusted note",
        ));
    }
    if u128::from(new_total.value()) != u128::from(current_total.value()) + value_sum(adjusted) {
        return Err(ProverError::InvalidProofShape(
            "adjusted totals do not balance",
        ));
    }

    let mut refs: Vec<&Note> = Vec::with_capacity(2 + adjusted.len());
    refs.push(new_total);
    refs.push(current_total);
    refs.extend(adjusted.iter());
    let m = 1;

    let scalars = draw_scalars(refs.len(), rng);
    let factors = running_sum_factors(&refs, m, &scalars);
    let commitments = normalized_commitments(&factors);

    let mut hash = RollingHash::new();
    hash.append_address(&sender);
    hash.append_word(&fr_to_word(&signed_to_fr(0)));
    hash.append_word(&word_from_u64(m as u64));
    hash.append_address(&ZERO_ADDRESS);
    fold_notes(&mut hash, &refs);
    fold_points(&mut hash, &commitments);
    let challenge = hash.squeeze();

    let entries = response_entries(&refs, &factors, challenge);
    let challenge_word = fr_to_word(&challenge);

    // Registry effect: the counter note is replaced either way; minted notes
    // enter the registry, burned notes leave it.
    let (registry_inputs, registry_outputs) = match kind {
        ProofKind::Mint => {
            let mut created = vec![new_total.clone()];
            created.extend_from_slice(adjusted);
            (vec![current_total.clone()], created)
        }
        _ => {
            let mut destroyed = vec![current_total.clone()];
            destroyed.extend_from_slice(adjusted);
            (destroyed, vec![new_total.clone()])
        }
    };
    let outputs = vec![ProofOutput {
        input_notes: images(&registry_inputs, NoteStatus::Spent),
        output_notes: images(&registry_outputs, NoteStatus::Unspent),
        public_owner: ZERO_ADDRESS,
        public_value: 0,
        challenge: challenge_word,
    }];

    Ok(Proof::assemble(
        kind,
        registry_inputs,
        registry_outputs,
        sender,
        0,
        ZERO_ADDRESS,
        challenge_word,
        entries,
        outputs,
        word_from_u64(m as u64),
        word_from_u64(0),
    ))
}
