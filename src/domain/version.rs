use crate::error::{Result, SemtagError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn strict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"))
}

/// Whether `candidate` is exactly `major.minor.patch` with decimal digits only.
///
/// No `v` prefix, pre-release or build metadata is accepted.
pub fn is_strict_semver(candidate: &str) -> bool {
    strict_pattern().is_match(candidate)
}

/// Semantic version triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `major.minor.patch` string (e.g. "1.2.3")
    pub fn parse(version: &str) -> Result<Self> {
        if !is_strict_semver(version) {
            return Err(SemtagError::validation(format!(
                "Invalid version format: '{}' - expected n.n.n",
                version
            )));
        }

        let mut parts = version.split('.').map(|part| {
            part.parse::<u64>().map_err(|_| {
                SemtagError::validation(format!("Version component out of range: {}", part))
            })
        });

        // The pattern guarantees exactly three components
        match (parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), Some(patch)) => Ok(Version::new(major?, minor?, patch?)),
            _ => Err(SemtagError::validation(format!(
                "Invalid version format: '{}'",
                version
            ))),
        }
    }

    /// Bump version according to granularity, resetting less significant parts
    ///
    /// # Errors
    /// `Validation` when the incremented component does not fit in `u64`.
    pub fn bump(&self, granularity: BumpGranularity) -> Result<Self> {
        let increment = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                SemtagError::validation(format!(
                    "cannot bump {} component of {}: out of range",
                    granularity, self
                ))
            })
        };

        Ok(match granularity {
            BumpGranularity::Major => Version::new(increment(self.major)?, 0, 0),
            BumpGranularity::Minor => Version::new(self.major, increment(self.minor)?, 0),
            BumpGranularity::Patch => Version::new(self.major, self.minor, increment(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of the version to increment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BumpGranularity {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpGranularity {
    /// Pick the granularity named among free-form arguments.
    ///
    /// The most significant token present wins; anything else means patch.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        [
            BumpGranularity::Major,
            BumpGranularity::Minor,
            BumpGranularity::Patch,
        ]
        .into_iter()
        .find(|granularity| args.iter().any(|arg| arg.as_ref() == granularity.as_str()))
        .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpGranularity::Major => "major",
            BumpGranularity::Minor => "minor",
            BumpGranularity::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_rejects_prefix_and_metadata() {
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.3-beta.1").is_err());
        assert!(Version::parse("1.2.3+build").is_err());
        assert!(Version::parse("3.0 Gold").is_err());
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_version_parse_leading_zeros() {
        assert_eq!(Version::parse("01.002.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_overflow_is_error() {
        assert!(is_strict_semver("99999999999999999999999.0.0"));
        assert!(Version::parse("99999999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_version_bump_major() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(BumpGranularity::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(BumpGranularity::Minor).unwrap(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(BumpGranularity::Patch).unwrap(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_bump_properties_hold_for_a_spread_of_triples() {
        for (a, b, c) in [(0, 0, 0), (0, 9, 9), (7, 0, 12), (10, 20, 30)] {
            let v = Version::new(a, b, c);
            assert_eq!(v.bump(BumpGranularity::Patch).unwrap(), Version::new(a, b, c + 1));
            assert_eq!(v.bump(BumpGranularity::Minor).unwrap(), Version::new(a, b + 1, 0));
            assert_eq!(v.bump(BumpGranularity::Major).unwrap(), Version::new(a + 1, 0, 0));
        }
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_granularity_from_args() {
        assert_eq!(
            BumpGranularity::from_args::<&str>(&[]),
            BumpGranularity::Patch
        );
        assert_eq!(
            BumpGranularity::from_args(&["minor"]),
            BumpGranularity::Minor
        );
        assert_eq!(
            BumpGranularity::from_args(&["whatever"]),
            BumpGranularity::Patch
        );
        // most significant wins regardless of position
        assert_eq!(
            BumpGranularity::from_args(&["patch", "major", "minor"]),
            BumpGranularity::Major
        );
    }

    #[test]
    fn test_bump_at_component_limit_is_error() {
        let max = u64::MAX;
        assert!(Version::new(max, 0, 0).bump(BumpGranularity::Major).is_err());
        assert!(Version::new(1, max, 0).bump(BumpGranularity::Minor).is_err());
        assert!(Version::new(1, 2, max).bump(BumpGranularity::Patch).is_err());

        // only the incremented component matters
        assert_eq!(
            Version::new(1, max, max).bump(BumpGranularity::Major).unwrap(),
            Version::new(2, 0, 0)
        );
    }

    #[test]
    fn test_granularity_display() {
        assert_eq!(BumpGranularity::Minor.to_string(), "minor");
    }
}
