use std::io::ErrorKind;
use std::path::PathBuf;

use zknote_primitives::K_MAX;

use crate::{
    point_from_shard, shard_file_name, PointSource, SetupError, SetupPoint, RECORDS_PER_SHARD,
};

/// Sharded-file point source rooted at a local directory.
#[derive(Clone, Debug)]
pub struct FileSetup {
    dir: PathBuf,
    k_max: u64,
    records_per_shard: u64,
}

impl FileSetup {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_limits(dir, K_MAX, RECORDS_PER_SHARD)
    }

    pub fn with_limits(dir: impl Into<PathBuf>, k_max: u64, records_per_shard: u64) -> Self {
        Self {
            dir: dir.into(),
            k_max,
            records_per_shard,
        }
    }
}

impl PointSource for FileSetup {
    async fn fetch_point(&self, index: u64) -> Result<SetupPoint, SetupError> {
        if index >= self.k_max {
            return Err(SetupError::PointNotFound);
        }
        let name = shard_file_name(index, self.records_per_shard);
        let path = self.dir.join(&name);
        log::debug!("reading setup point {index} from {}", path.display());
        let shard = tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SetupError::PointNotFound
            } else {
                SetupError::Io(err)
            }
        })?;
        point_from_shard(&shard, index, self.records_per_shard, &name)
    }

    fn k_max(&self) -> u64 {
        self.k_max
    }
}
