use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use zknote_primitives::K_MAX;

use crate::{
    point_from_shard, shard_file_name, shard_last_index, PointSource, SetupError, SetupPoint,
    RECORDS_PER_SHARD,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// HTTP point source fetching whole shards and memoizing them by shard.
///
/// Transport failures and 5xx responses are retried up to [`MAX_ATTEMPTS`]
/// with a fixed delay; a 404 means the shard does not exist and maps straight
/// to [`SetupError::PointNotFound`].
#[derive(Debug)]
pub struct RemoteSetup {
    client: reqwest::Client,
    base_url: String,
    k_max: u64,
    records_per_shard: u64,
    shards: Mutex<HashMap<u64, Arc<Vec<u8>>>>,
}

impl RemoteSetup {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SetupError> {
        Self::with_limits(base_url, K_MAX, RECORDS_PER_SHARD)
    }

    pub fn with_limits(
        base_url: impl Into<String>,
        k_max: u64,
        records_per_shard: u64,
    ) -> Result<Self, SetupError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            k_max,
            records_per_shard,
            shards: Mutex::new(HashMap::new()),
        })
    }

    pub fn shard_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }

    fn cached_shard(&self, last_index: u64) -> Option<Arc<Vec<u8>>> {
        let cache = match self.shards.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.get(&last_index).cloned()
    }

    fn store_shard(&self, last_index: u64, shard: Arc<Vec<u8>>) {
        let mut cache = match self.shards.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.insert(last_index, shard);
    }

    /// Fetch one shard, going to the network only on a cache miss.
    ///
    /// The cache lock is never held across an await; concurrent misses on the
    /// same shard fetch it independently and the last write wins.
    async fn shard_bytes(&self, last_index: u64, name: &str) -> Result<Arc<Vec<u8>>, SetupError> {
        if let Some(shard) = self.cached_shard(last_index) {
            return Ok(shard);
        }

        let url = self.shard_url(name);
        let mut attempt = 1u32;
        let bytes = loop {
            log::debug!("fetching setup shard {url}, attempt {attempt}");
            match self.client.get(&url).send().await {
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(SetupError::PointNotFound);
                }
                Ok(response) if response.status().is_server_error() && attempt < MAX_ATTEMPTS => {
                    log::warn!(
                        "setup endpoint returned {} for {url}, retrying",
                        response.status()
                    );
                }
                Ok(response) => {
                    let response = response.error_for_status()?;
                    break response.bytes().await?.to_vec();
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    log::warn!("setup endpoint request for {url} failed: {err}, retrying");
                }
                Err(err) => return Err(SetupError::Http(err)),
            }
            attempt += 1;
            tokio::time::sleep(RETRY_DELAY).await;
        };

        let shard = Arc::new(bytes);
        self.store_shard(last_index, shard.clone());
        Ok(shard)
    }
}

impl PointSource for RemoteSetup {
    async fn fetch_point(&self, index: u64) -> Result<SetupPoint, SetupError> {
        if index >= self.k_max {
            return Err(SetupError::PointNotFound);
        }
        let last_index = shard_last_index(index, self.records_per_shard);
        let name = shard_file_name(index, self.records_per_shard);
        let shard = self.shard_bytes(last_index, &name).await?;
        point_from_shard(&shard, index, self.records_per_shard, &name)
    }

    fn k_max(&self) -> u64 {
        self.k_max
    }
}
