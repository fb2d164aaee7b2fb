//! # zknote-setup — Trusted-Setup Point Retrieval
//!
//! The proof engine commits to a note value `k` through the k-th point of a
//! structured reference string produced by a one-off trusted-setup ceremony.
//! This crate retrieves those points by index from either of two backings,
//! selected through [`SetupConfig`]:
//!
//! - [`FileSetup`]: a local directory of shard files (development/test).
//! - [`RemoteSetup`]: an HTTP endpoint serving the same shard layout
//!   (production), with bounded retries and per-shard memoization.
//!
//! ## Shard Layout
//!
//! Shards hold a contiguous run of 32-byte compressed points, one record per
//! index, and are named after the index of their last record:
//!
//! ```text
//! shard of index i  : data{(i/S + 1)*S - 1}.dat     (S = records per shard)
//! record offset     : (i % S) * 32 bytes
//! ```
//!
//! Every record is validated by decompression on read; an index at or beyond
//! the provider's ceiling, or a missing shard, fails [`SetupError::PointNotFound`].

mod file;
mod remote;
#[cfg(test)]
mod tests;

use std::future::Future;

use thiserror::Error;
use zknote_primitives::{decompress, Fq, G1Affine, PointError};

pub use file::FileSetup;
pub use remote::RemoteSetup;

/// Byte width of one compressed point record.
pub const RECORD_BYTES: usize = 32;

/// Default number of records per shard file.
pub const RECORDS_PER_SHARD: u64 = 1024;

#[derive(Debug, Error)]
pub enum SetupError {
    /// Index at or beyond the ceiling, or the backing shard is missing.
    #[error("point not found")]
    PointNotFound,
    /// The shard exists but does not cover the requested record.
    #[error("setup shard {name} is truncated: {len} bytes, record at offset {offset}")]
    ShardTruncated {
        name: String,
        len: usize,
        offset: usize,
    },
    #[error(transparent)]
    Point(#[from] PointError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// One structured-reference-string point, fetched on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupPoint {
    pub index: u64,
    pub x: Fq,
    pub y: Fq,
}

impl SetupPoint {
    pub fn from_affine(index: u64, point: G1Affine) -> Self {
        Self {
            index,
            x: point.x,
            y: point.y,
        }
    }

    /// Coordinates always originate from decompression or curve arithmetic,
    /// so no on-curve check is repeated here.
    pub fn to_affine(&self) -> G1Affine {
        G1Affine::new_unchecked(self.x, self.y)
    }
}

/// Source of trusted-setup points.
///
/// Fetches are idempotent and safe to issue concurrently for the same index;
/// implementations may memoize but correctness never depends on it.
pub trait PointSource {
    fn fetch_point(
        &self,
        index: u64,
    ) -> impl Future<Output = Result<SetupPoint, SetupError>> + Send;

    /// The network's note-value ceiling; indices at or beyond it do not exist.
    fn k_max(&self) -> u64;
}

// ========================= Shard Addressing =========================

/// Index of the last record in the shard holding `index`.
pub fn shard_last_index(index: u64, records_per_shard: u64) -> u64 {
    (index / records_per_shard + 1) * records_per_shard - 1
}

/// File name of the shard holding `index`.
pub fn shard_file_name(index: u64, records_per_shard: u64) -> String {
    format!("data{}.dat", shard_last_index(index, records_per_shard))
}

/// Byte offset of `index`'s record within its shard.
pub fn record_offset(index: u64, records_per_shard: u64) -> usize {
    ((index % records_per_shard) as usize) * RECORD_BYTES
}

/// Slice one record out of a shard and decompress it.
pub fn point_from_shard(
    shard: &[u8],
    index: u64,
    records_per_shard: u64,
    name: &str,
) -> Result<SetupPoint, SetupError> {
    let offset = record_offset(index, records_per_shard);
    let end = offset + RECORD_BYTES;
    if shard.len() < end {
        return Err(SetupError::ShardTruncated {
            name: name.to_owned(),
            len: shard.len(),
            offset,
        });
    }
    let mut compressed = [0u8; 32];
    compressed.copy_from_slice(&shard[offset..end]);
    let point = decompress(&compressed)?;
    Ok(SetupPoint::from_affine(index, point))
}

// ========================= Configuration =========================

/// Which backing strategy to use and its sizing.
#[derive(Clone, Debug)]
pub enum SetupConfig {
    File {
        dir: std::path::PathBuf,
        k_max: u64,
        records_per_shard: u64,
    },
    Remote {
        base_url: String,
        k_max: u64,
        records_per_shard: u64,
    },
}

impl SetupConfig {
    pub fn file(dir: impl Into<std::path::PathBuf>) -> Self {
        SetupConfig::File {
            dir: dir.into(),
            k_max: zknote_primitives::K_MAX,
            records_per_shard: RECORDS_PER_SHARD,
        }
    }

    pub fn remote(base_url: impl Into<String>) -> Self {
        SetupConfig::Remote {
            base_url: base_url.into(),
            k_max: zknote_primitives::K_MAX,
            records_per_shard: RECORDS_PER_SHARD,
        }
    }
}

/// A [`PointSource`] chosen at runtime from a [`SetupConfig`].
#[derive(Debug)]
pub enum SetupProvider {
    File(FileSetup),
    Remote(RemoteSetup),
}

impl SetupProvider {
    pub fn from_config(config: SetupConfig) -> Result<Self, SetupError> {
        match config {
            SetupConfig::File {
                dir,
                k_max,
                records_per_shard,
            } => Ok(SetupProvider::File(FileSetup::with_limits(
                dir,
                k_max,
                records_per_shard,
            ))),
            SetupConfig::Remote {
                base_url,
                k_max,
                records_per_shard,
            } => Ok(SetupProvider::Remote(RemoteSetup::with_limits(
                base_url,
                k_max,
                records_per_shard,
            )?)),
        }
    }
}

impl PointSource for SetupProvider {
    async fn fetch_point(&self, index: u64) -> Result<SetupPoint, SetupError> {
        match self {
            SetupProvider::File(source) => source.fetch_point(index).await,
            SetupProvider::Remote(source) => source.fetch_point(index).await,
        }
    }

    fn k_max(&self) -> u64 {
        match self {
            SetupProvider::File(source) => source.k_max(),
            SetupProvider::Remote(source) => source.k_max(),
        }
    }
}
