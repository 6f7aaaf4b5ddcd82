//! The multi-digest write sink.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::algorithm::{Algorithm, ComplianceMode};

/// Digests keyed by lowercase algorithm name, as lowercase hex.
pub type Checksums = BTreeMap<String, String>;

#[derive(Clone)]
enum Accumulator {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Accumulator {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Accumulator::Md5(Md5::new()),
            Algorithm::Sha1 => Accumulator::Sha1(Sha1::new()),
            Algorithm::Sha256 => Accumulator::Sha256(Sha256::new()),
            Algorithm::Sha512 => Accumulator::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Accumulator::Md5(h) => h.update(data),
            Accumulator::Sha1(h) => h.update(data),
            Accumulator::Sha256(h) => h.update(data),
            Accumulator::Sha512(h) => h.update(data),
        }
    }

    /// Finalizes a copy, leaving `self` able to accept more input.
    fn hex_digest(&self) -> String {
        match self.clone() {
            Accumulator::Md5(h) => hex::encode(h.finalize()),
            Accumulator::Sha1(h) => hex::encode(h.finalize()),
            Accumulator::Sha256(h) => hex::encode(h.finalize()),
            Accumulator::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// A write sink that feeds every byte to each selected digest.
///
/// The algorithm set is fixed at construction by the [`ComplianceMode`].
/// Digests are updated synchronously inside `write`, so no buffering takes
/// place and [`finish`](Self::finish) always reflects exactly the bytes
/// written so far.
pub struct ChecksumFanout {
    mode: ComplianceMode,
    accumulators: Vec<(Algorithm, Accumulator)>,
    written: u64,
}

impl ChecksumFanout {
    /// Creates a fanout computing every algorithm allowed under `mode`.
    pub fn new(mode: ComplianceMode) -> Self {
        let accumulators = mode
            .algorithms()
            .into_iter()
            .map(|algorithm| (algorithm, Accumulator::new(algorithm)))
            .collect();
        Self {
            mode,
            accumulators,
            written: 0,
        }
    }

    /// The compliance mode chosen at construction.
    pub fn mode(&self) -> ComplianceMode {
        self.mode
    }

    /// The algorithms this fanout computes.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.accumulators.iter().map(|(algorithm, _)| *algorithm).collect()
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Returns the digest of the bytes written so far for every algorithm.
    ///
    /// Writing may continue afterwards; a later call covers the additional
    /// bytes too.
    pub fn finish(&self) -> Checksums {
        self.accumulators
            .iter()
            .map(|(algorithm, acc)| (algorithm.name().to_string(), acc.hex_digest()))
            .collect()
    }
}

impl Write for ChecksumFanout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (_, acc) in &mut self.accumulators {
            acc.update(buf);
        }
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Copies `reader` through a fresh fanout and returns the digests together
/// with the number of bytes read.
pub fn checksum_reader<R: Read>(mode: ComplianceMode, mut reader: R) -> io::Result<(Checksums, u64)> {
    let mut fanout = ChecksumFanout::new(mode);
    let copied = io::copy(&mut reader, &mut fanout)?;
    tracing::debug!(?mode, bytes = copied, "computed checksums");
    Ok((fanout.finish(), copied))
}
