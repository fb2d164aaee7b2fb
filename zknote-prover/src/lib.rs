//! # zknote-prover — Confidential Note Proof Construction
//!
//! Client-side construction of sigma-protocol proofs over confidential
//! notes. Notes commit to integer values through trusted-setup points; a
//! proof convinces the external verifier of a value statement over a set of
//! notes without revealing the values.
//!
//! ## Proof Kinds
//!
//! - [`ProofRequest::Transfer`] - join-split balancing notes against a
//!   signed public value
//! - [`ProofRequest::Swap`] - bilateral swap across two value-equal legs
//! - [`ProofRequest::Dividend`] - ratio statement between three notes
//! - [`ProofRequest::PublicRange`] - public lower bound on a note value
//! - [`ProofRequest::Mint`] / [`ProofRequest::Burn`] - supply adjustments
//!   against a counter note
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rand::rngs::OsRng;
//! use zknote_prover::{construct_proof, NoteFactory, NoteOwner, ProofRequest};
//! use zknote_setup::FileSetup;
//!
//! let setup = FileSetup::new("./setup-db");
//! let factory = NoteFactory::new(&setup);
//! let owner = NoteOwner::from_address([0x11; 20]);
//!
//! let input = factory.create(&owner, 100, &mut OsRng).await?;
//! let change = factory.create(&owner, 60, &mut OsRng).await?;
//!
//! // 40 units leave the confidential pool.
//! let request = ProofRequest::Transfer {
//!     input_notes: vec![input],
//!     output_notes: vec![change],
//!     sender: owner.address(),
//!     public_value: 40,
//!     public_owner: owner.address(),
//! };
//! let proof = construct_proof(&request, &mut OsRng)?;
//! let blob = proof.into_submission(&[]);
//! ```
//!
//! ## Submission Byte Layout
//!
//! ```text
//! 0x000  challenge
//! 0x020  public value (sign-extended)
//! 0x040  public owner (left-padded address)
//! 0x060  aux scalar A (m / za / comparison bound, else zero)
//! 0x080  aux scalar B (zb, else zero)
//! 0x0a0  proof data offset      ┐
//! 0x0c0  signatures offset      │ byte offsets from the blob start
//! 0x0e0  output owners offset   │
//! 0x100  metadata offset        ┘
//! 0x120  sections, in exactly that order
//! ```
//!
//! Each proof-data entry is six words: `k̄ || ā || γ.x || γ.y || σ.x || σ.y`.
//!
//! ## Security Notes
//!
//! - Blinding scalars are drawn fresh per proof from a caller-supplied
//!   CSPRNG; reuse across proofs can leak note values
//! - The challenge binds the sender address, so a submission replayed by
//!   another account fails verification
//! - Viewing keys are ephemeral secp256k1 keys; the engine never handles
//!   spending keys

pub mod note;
pub mod proof;

use thiserror::Error;
use zknote_setup::SetupError;

pub use note::{Note, NoteFactory, NoteOwner, VIEWING_KEY_BYTES};
pub use proof::{construct_proof, Proof, ProofKind, ProofRequest};

#[derive(Debug, Error)]
pub enum ProverError {
    /// The committed value has no setup point.
    #[error("note value {0} exceeds the setup ceiling {1}")]
    NoteValueTooBig(u64, u64),
    /// Note arity, a value relation or a required field does not fit the
    /// requested proof kind.
    #[error("{0}")]
    InvalidProofShape(&'static str),
    /// Trusted-setup retrieval failed.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// Raised by verifier-side tooling when a response fails its challenge
    /// identity; construction never produces it locally.
    #[error("challenge response failed")]
    ChallengeResponseFailure,
}
