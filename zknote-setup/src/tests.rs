use zknote_setup::*;
use std::path::{Path, PathBuf};
use zknote_vectors::{test_setup_points, write_setup_database};

/// Per-test scratch directory, removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("zknote-setup-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn write_db(dir: &Path, count: u64, records_per_shard: u64) -> Vec<SetupPoint> {
    let points = test_setup_points(count);
    write_setup_database(dir, &points, records_per_shard).expect("write setup database");
    points
}

#[test]
fn shard_addressing_math() {
    assert_eq!(shard_last_index(0, 1024), 1023);
    assert_eq!(shard_last_index(1023, 1024), 1023);
    assert_eq!(shard_last_index(1024, 1024), 2047);
    assert_eq!(shard_file_name(0, 1024), "data1023.dat");
    assert_eq!(shard_file_name(1500, 1024), "data2047.dat");
    assert_eq!(record_offset(0, 1024), 0);
    assert_eq!(record_offset(1500, 1024), (1500 - 1024) * 32);
    assert_eq!(record_offset(1024, 1024), 0);
}

#[tokio::test]
async fn file_setup_fetches_written_points() {
    let dir = TempDir::new("fetch");
    let points = write_db(dir.path(), 64, 16);
    let setup = FileSetup::with_limits(dir.path(), 64, 16);

    for index in [0u64, 1, 15, 16, 40, 63] {
        let fetched = setup.fetch_point(index).await.expect("fetch point");
        assert_eq!(fetched, points[index as usize]);
        assert!(fetched.to_affine().is_on_curve());
    }
    assert_eq!(setup.k_max(), 64);
}

#[tokio::test]
async fn file_setup_rejects_out_of_range_index() {
    let dir = TempDir::new("range");
    write_db(dir.path(), 64, 16);
    let setup = FileSetup::with_limits(dir.path(), 64, 16);

    let err = setup.fetch_point(64 * 2).await.expect_err("beyond ceiling");
    assert!(matches!(err, SetupError::PointNotFound));
    assert_eq!(err.to_string(), "point not found");
}

#[tokio::test]
async fn file_setup_maps_missing_shard_to_point_not_found() {
    let dir = TempDir::new("missing");
    write_db(dir.path(), 64, 16);
    std::fs::remove_file(dir.path().join("data31.dat")).expect("remove shard");
    let setup = FileSetup::with_limits(dir.path(), 64, 16);

    let err = setup.fetch_point(20).await.expect_err("missing shard");
    assert!(matches!(err, SetupError::PointNotFound));
}

#[tokio::test]
async fn file_setup_reports_truncated_shard() {
    let dir = TempDir::new("truncated");
    write_db(dir.path(), 64, 16);
    let shard_path = dir.path().join("data15.dat");
    let full = std::fs::read(&shard_path).expect("read shard");
    std::fs::write(&shard_path, &full[..100]).expect("truncate shard");
    let setup = FileSetup::with_limits(dir.path(), 64, 16);

    // Record 0 still fits in the first 100 bytes, record 3 does not.
    setup.fetch_point(0).await.expect("intact record");
    let err = setup.fetch_point(3).await.expect_err("truncated record");
    assert!(matches!(err, SetupError::ShardTruncated { .. }));
}

#[tokio::test]
async fn provider_config_selects_file_strategy() {
    let dir = TempDir::new("config");
    let points = write_db(dir.path(), 32, 16);
    let provider = SetupProvider::from_config(SetupConfig::File {
        dir: dir.path().to_path_buf(),
        k_max: 32,
        records_per_shard: 16,
    })
    .expect("build provider");

    let fetched = provider.fetch_point(17).await.expect("fetch point");
    assert_eq!(fetched, points[17]);
    assert_eq!(provider.k_max(), 32);
}

/// Answer one HTTP request on `listener` with a fixed status and body.
async fn serve_once(listener: tokio::net::TcpListener, status: &'static str, body: Vec<u8>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let (mut stream, _) = listener.accept().await.expect("accept connection");
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).await.expect("read request");
        request.extend_from_slice(&buf[..n]);
        if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let header = format!(
        "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    );
    stream
        .write_all(header.as_bytes())
        .await
        .expect("write header");
    stream.write_all(&body).await.expect("write body");
}

async fn local_listener() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    (listener, base_url)
}

#[tokio::test]
async fn remote_setup_maps_missing_shard_to_point_not_found() {
    let (listener, base_url) = local_listener().await;
    let server = tokio::spawn(serve_once(listener, "404 Not Found", Vec::new()));
    let remote = RemoteSetup::with_limits(base_url, 64, 16).expect("build remote source");

    let err = remote.fetch_point(20).await.expect_err("missing shard");
    assert!(matches!(err, SetupError::PointNotFound));
    assert_eq!(err.to_string(), "point not found");
    server.await.expect("server task");
}

#[tokio::test]
async fn remote_setup_fetches_and_memoizes_shards() {
    let points = test_setup_points(32);
    let shard: Vec<u8> = points[16..32]
        .iter()
        .flat_map(|point| zknote_primitives::compress(&point.to_affine()))
        .collect();

    let (listener, base_url) = local_listener().await;
    let server = tokio::spawn(serve_once(listener, "200 OK", shard));
    let remote = RemoteSetup::with_limits(base_url, 32, 16).expect("build remote source");

    let fetched = remote.fetch_point(20).await.expect("fetch point");
    assert_eq!(fetched, points[20]);
    server.await.expect("server task");

    // The listener is gone; this index resolves from the memoized shard.
    let cached = remote.fetch_point(17).await.expect("cached shard");
    assert_eq!(cached, points[17]);
}

#[test]
fn remote_setup_builds_shard_urls() {
    let remote = RemoteSetup::with_limits("https://setup.example.com/points/", 2048, 1024)
        .expect("build remote source");
    assert_eq!(
        remote.shard_url(&shard_file_name(1500, 1024)),
        "https://setup.example.com/points/data2047.dat"
    );
    assert_eq!(remote.k_max(), 2048);
}

#[test]
fn default_configs_carry_network_ceiling() {
    match SetupConfig::file("/tmp/does-not-matter") {
        SetupConfig::File {
            k_max,
            records_per_shard,
            ..
        } => {
            assert_eq!(k_max, zknote_primitives::K_MAX);
            assert_eq!(records_per_shard, RECORDS_PER_SHARD);
        }
        SetupConfig::Remote { .. } => unreachable!(),
    }
}
