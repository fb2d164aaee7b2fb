use std::{env, path::Path};

use zknote_setup::RECORDS_PER_SHARD;
use zknote_vectors::{test_setup_points, write_setup_database};

/// Usage: gen_setup_db [dir] [count]
fn main() {
    let mut args = env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "setup-db".to_string());
    let count: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(16384);

    let points = test_setup_points(count);
    write_setup_database(Path::new(&dir), &points, RECORDS_PER_SHARD)
        .expect("write setup database");
    eprintln!("Wrote {} setup points to {dir}", points.len());
}
