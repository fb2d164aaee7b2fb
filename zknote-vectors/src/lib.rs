//! # zknote-vectors — Deterministic Trusted-Setup Fixtures
//!
//! A toy structured reference string for tests and benches: `mu_i` is
//! `(y - i)^-1 * h` for a fixed, publicly known `y`. Real deployments use the
//! output of a multi-party ceremony in which nobody knows `y`; these fixtures
//! exist so the engine and the providers can be exercised without the real
//! database. Never ship them.
//!
//! [`write_setup_database`] lays the points out exactly as the file provider
//! reads them, so the two sides cross-check each other in tests.

use std::path::Path;

use ark_ec::CurveGroup;
use ark_ff::{batch_inversion, PrimeField};
use zknote_primitives::{compress, h_generator, keccak256, Fr, G1Projective};
use zknote_setup::{shard_file_name, PointSource, SetupError, SetupPoint, RECORD_BYTES};

/// The toy setup secret. Publicly known by design, and far above any valid
/// point index, so `y - i` never vanishes.
pub fn test_setup_secret() -> Fr {
    Fr::from_be_bytes_mod_order(&keccak256(b"zknote.test.setup.secret"))
}

/// First `count` points of the toy reference string, in index order.
pub fn test_setup_points(count: u64) -> Vec<SetupPoint> {
    let y = test_setup_secret();
    let mut denominators: Vec<Fr> = (0..count).map(|i| y - Fr::from(i)).collect();
    batch_inversion(&mut denominators);

    let h = h_generator();
    let projective: Vec<G1Projective> = denominators.iter().map(|inv| h * inv).collect();
    G1Projective::normalize_batch(&projective)
        .into_iter()
        .enumerate()
        .map(|(index, mu)| SetupPoint::from_affine(index as u64, mu))
        .collect()
}

/// Write points as shard files in the layout the file provider expects.
///
/// `points` must be contiguous from index 0.
pub fn write_setup_database(
    dir: &Path,
    points: &[SetupPoint],
    records_per_shard: u64,
) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for chunk in points.chunks(records_per_shard as usize) {
        let Some(first) = chunk.first() else { continue };
        let mut shard = Vec::with_capacity(chunk.len() * RECORD_BYTES);
        for point in chunk {
            shard.extend_from_slice(&compress(&point.to_affine()));
        }
        std::fs::write(
            dir.join(shard_file_name(first.index, records_per_shard)),
            &shard,
        )?;
    }
    Ok(())
}

/// In-memory point source backed by the toy reference string.
#[derive(Clone, Debug)]
pub struct TestSetup {
    points: Vec<SetupPoint>,
}

impl TestSetup {
    pub fn new(k_max: u64) -> Self {
        Self {
            points: test_setup_points(k_max),
        }
    }

    pub fn points(&self) -> &[SetupPoint] {
        &self.points
    }
}

impl PointSource for TestSetup {
    async fn fetch_point(&self, index: u64) -> Result<SetupPoint, SetupError> {
        self.points
            .get(index as usize)
            .copied()
            .ok_or(SetupError::PointNotFound)
    }

    fn k_max(&self) -> u64 {
        self.points.len() as u64
    }
}
