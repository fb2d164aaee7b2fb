//! Note construction against the trusted setup.

use ark_ec::CurveGroup;
use ark_ff::One;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use rand::{CryptoRng, RngCore};

use zknote_primitives::{
    h_generator, keccak256, note_commitment_hash, random_group_scalar, Address, Fr, G1Affine,
    Word,
};
use zknote_setup::PointSource;

use crate::ProverError;

/// Compressed SEC1 public key length, the wire form of a viewing key.
pub const VIEWING_KEY_BYTES: usize = 33;

/// The spending identity a note is locked to.
///
/// Wallet-held notes carry the full secp256k1 public key so viewing keys can
/// be exchanged with counterparties; notes addressed to third parties only
/// need the 20-byte address form.
#[derive(Clone, Debug)]
pub struct NoteOwner {
    address: Address,
    public_key: Option<PublicKey>,
}

impl NoteOwner {
    /// Owner derived from a secp256k1 public key. The address is the low 20
    /// bytes of keccak256 over the uncompressed encoding, prefix byte
    /// stripped.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let encoded = public_key.to_encoded_point(false);
        let digest = keccak256(&encoded.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        Self {
            address,
            public_key: Some(*public_key),
        }
    }

    /// Owner known only by address.
    pub fn from_address(address: Address) -> Self {
        Self {
            address,
            public_key: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }
}

/// An immutable commitment to a confidential value.
///
/// `gamma = mu_k * a` and `sigma = gamma * k + h * a`, where `mu_k` is the
/// setup point for the committed value `k`, `a` the blinding scalar and `h`
/// the second generator. The note hash is derived from the two points and
/// correlates the note with decoded proof outputs.
#[derive(Clone, Debug)]
pub struct Note {
    value: u64,
    blinding: Fr,
    owner: Address,
    viewing_key: [u8; VIEWING_KEY_BYTES],
    extra_metadata: Vec<u8>,
    gamma: G1Affine,
    sigma: G1Affine,
    hash: Word,
}

impl Note {
    fn build(
        value: u64,
        blinding: Fr,
        owner: Address,
        viewing_key: [u8; VIEWING_KEY_BYTES],
        extra_metadata: Vec<u8>,
        mu: &G1Affine,
    ) -> Self {
        let gamma = (*mu * blinding).into_affine();
        let sigma = (gamma * Fr::from(value) + h_generator() * blinding).into_affine();
        let hash = note_commitment_hash(&gamma, &sigma);
        Self {
            value,
            blinding,
            owner,
            viewing_key,
            extra_metadata,
            gamma,
            sigma,
            hash,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub(crate) fn blinding(&self) -> Fr {
        self.blinding
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn viewing_key(&self) -> &[u8; VIEWING_KEY_BYTES] {
        &self.viewing_key
    }

    pub fn gamma(&self) -> &G1Affine {
        &self.gamma
    }

    pub fn sigma(&self) -> &G1Affine {
        &self.sigma
    }

    pub fn hash(&self) -> Word {
        self.hash
    }

    /// The metadata payload submitted alongside the note: the viewing key
    /// followed by any application bytes.
    pub fn metadata(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(VIEWING_KEY_BYTES + self.extra_metadata.len());
        bytes.extend_from_slice(&self.viewing_key);
        bytes.extend_from_slice(&self.extra_metadata);
        bytes
    }
}

fn compress_public(key: &PublicKey) -> [u8; VIEWING_KEY_BYTES] {
    let encoded = key.to_encoded_point(true);
    let mut out = [0u8; VIEWING_KEY_BYTES];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Viewing key of the fixed zero-value note, derived by hashing a tag until
/// the digest is a valid secp256k1 secret.
fn zero_note_viewing_key() -> [u8; VIEWING_KEY_BYTES] {
    let mut digest = keccak256(b"zknote.zero.note.viewing.key.v1");
    loop {
        if let Ok(secret) = SecretKey::from_slice(&digest) {
            return compress_public(&secret.public_key());
        }
        digest = keccak256(&digest);
    }
}

/// Builds notes from a trusted-setup point source.
pub struct NoteFactory<'a, P> {
    source: &'a P,
}

impl<'a, P: PointSource> NoteFactory<'a, P> {
    pub fn new(source: &'a P) -> Self {
        Self { source }
    }

    /// Create a note committing to `value` for `owner`.
    ///
    /// # Errors
    /// * `ProverError::NoteValueTooBig` - If `value` is at or beyond the setup ceiling
    /// * `ProverError::Setup` - If the setup point cannot be retrieved
    pub async fn create<R: RngCore + CryptoRng>(
        &self,
        owner: &NoteOwner,
        value: u64,
        rng: &mut R,
    ) -> Result<Note, ProverError> {
        self.create_with_metadata(owner, value, Vec::new(), rng).await
    }

    /// Create a note carrying application metadata after its viewing key.
    pub async fn create_with_metadata<R: RngCore + CryptoRng>(
        &self,
        owner: &NoteOwner,
        value: u64,
        extra_metadata: Vec<u8>,
        rng: &mut R,
    ) -> Result<Note, ProverError> {
        if value >= self.source.k_max() {
            return Err(ProverError::NoteValueTooBig(value, self.source.k_max()));
        }
        let mu = self.source.fetch_point(value).await?.to_affine();
        let blinding = random_group_scalar(rng);
        let viewing_secret = SecretKey::random(rng);
        Ok(Note::build(
            value,
            blinding,
            owner.address(),
            compress_public(&viewing_secret.public_key()),
            extra_metadata,
            &mu,
        ))
    }

    /// The fixed zero-value note supply adjustments use when a registry has
    /// no counter note yet.
    ///
    /// Fully deterministic: unit blinding, zero owner, tag-derived viewing
    /// key. Its sigma collapses to the `h` generator.
    pub async fn zero_value_note(&self) -> Result<Note, ProverError> {
        let mu = self.source.fetch_point(0).await?.to_affine();
        Ok(Note::build(
            0,
            Fr::one(),
            [0u8; 20],
            zero_note_viewing_key(),
            Vec::new(),
            &mu,
        ))
    }
}
