//! `lsif checksum`: one-pass upload digests.

use std::fs::File;
use std::io::BufReader;

use lsif_checksum::{checksum_reader, ComplianceMode};

use crate::{ChecksumArgs, GlobalArgs};

/// Runs the `lsif checksum` command.
///
/// FIPS mode is selected by `--fips` or by `checksum.fips` in the
/// configuration. Prints one `name  digest` line per algorithm.
pub fn run(args: &ChecksumArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mode = ComplianceMode::from_fips_flag(args.fips || global.config.checksum.fips);
    let file = File::open(&args.file)
        .map_err(|e| format!("failed to open '{}': {e}", args.file.display()))?;

    let (sums, bytes) = checksum_reader(mode, BufReader::new(file))?;
    for (name, digest) in &sums {
        println!("{name}  {digest}");
    }
    if !global.quiet {
        eprintln!("     Hashed {bytes} bytes of {}", args.file.display());
    }
    Ok(0)
}
