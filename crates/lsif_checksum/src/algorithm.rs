//! Digest algorithms and the compliance mode that selects among them.

use std::fmt;

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// MD5. Not available in FIPS mode.
    Md5,
    /// SHA-1.
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl Algorithm {
    /// Every algorithm, in name order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
    ];

    /// The lowercase name used as the key in checksum results.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Returns `true` if the algorithm may be used under `mode`.
    pub fn allowed_in(self, mode: ComplianceMode) -> bool {
        match mode {
            ComplianceMode::Standard => true,
            ComplianceMode::Fips => self != Algorithm::Md5,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which set of algorithms a fanout computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComplianceMode {
    /// Every supported algorithm.
    #[default]
    Standard,
    /// Only FIPS-approved algorithms.
    Fips,
}

impl ComplianceMode {
    /// Selects `Fips` when `fips` is set.
    pub fn from_fips_flag(fips: bool) -> Self {
        if fips {
            ComplianceMode::Fips
        } else {
            ComplianceMode::Standard
        }
    }

    /// The algorithms selected by this mode, in name order.
    pub fn algorithms(self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|algorithm| algorithm.allowed_in(self))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercase() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name(), algorithm.name().to_lowercase());
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
    }

    #[test]
    fn standard_selects_everything() {
        assert_eq!(ComplianceMode::Standard.algorithms(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn fips_excludes_md5() {
        let algorithms = ComplianceMode::Fips.algorithms();
        assert!(!algorithms.contains(&Algorithm::Md5));
        assert_eq!(algorithms.len(), 3);
    }

    #[test]
    fn from_fips_flag() {
        assert_eq!(ComplianceMode::from_fips_flag(true), ComplianceMode::Fips);
        assert_eq!(ComplianceMode::from_fips_flag(false), ComplianceMode::Standard);
        assert_eq!(ComplianceMode::default(), ComplianceMode::Standard);
    }
}
