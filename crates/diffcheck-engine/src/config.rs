use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::normalize::DEFAULT_STRIP;

/// Line matching strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Recursive longest-matching-block extraction.
    #[default]
    Greedy,
    /// Myers' O(ND) shortest edit script.
    Myers,
    /// Patience diff over unique lines.
    Patience,
}

impl Algorithm {
    /// The `similar` algorithm backing this strategy, if any.
    pub(crate) const fn to_similar(self) -> Option<similar::Algorithm> {
        match self {
            Self::Greedy => None,
            Self::Myers => Some(similar::Algorithm::Myers),
            Self::Patience => Some(similar::Algorithm::Patience),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Greedy => "greedy",
            Self::Myers => "myers",
            Self::Patience => "patience",
        })
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            other => Err(format!(
                "unknown algorithm '{other}' (expected greedy, myers or patience)"
            )),
        }
    }
}

/// Matching deadline applied unless configured otherwise.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Options and guards for a single comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters removed from the start of each comparison key.
    pub strip_leading: Option<Vec<char>>,
    /// Line matching strategy.
    pub algorithm: Algorithm,
    /// Maximum combined size of both inputs, in bytes.
    pub max_input_bytes: usize,
    /// Matching deadline in milliseconds. `None` or `0` means unbounded.
    pub timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strip_leading: None,
            algorithm: Algorithm::default(),
            max_input_bytes: 4 * 1024 * 1024, // 4 MiB
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Configuration that ignores leading spaces and tabs.
    pub fn ignoring_leading_whitespace() -> Self {
        Self {
            strip_leading: Some(DEFAULT_STRIP.to_vec()),
            ..Default::default()
        }
    }

    /// Toggle the default leading-whitespace strip set.
    pub fn with_ignore_leading_whitespace(mut self, ignore: bool) -> Self {
        self.strip_leading = ignore.then(|| DEFAULT_STRIP.to_vec());
        self
    }

    /// The strip set as a slice, if any.
    pub fn strip_set(&self) -> Option<&[char]> {
        self.strip_leading.as_deref()
    }

    /// Returns `true` if comparison keys are stripped.
    pub fn strips_leading(&self) -> bool {
        self.strip_leading.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// The deadline for a request starting now.
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout().map(|t| Instant::now() + t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = EngineConfig::default();
        assert_eq!(c.algorithm, Algorithm::Greedy);
        assert_eq!(c.max_input_bytes, 4 * 1024 * 1024);
        assert!(c.strip_leading.is_none());
        assert_eq!(c.timeout(), Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)));
        assert!(!c.strips_leading());
    }

    #[test]
    fn ignoring_whitespace_uses_default_set() {
        let c = EngineConfig::ignoring_leading_whitespace();
        assert_eq!(c.strip_set(), Some(&[' ', '\t'][..]));
        assert!(c.strips_leading());
        assert!(!c.with_ignore_leading_whitespace(false).strips_leading());
    }

    #[test]
    fn zero_timeout_is_unbounded() {
        let c = EngineConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(c.deadline().is_none());
        let c = EngineConfig {
            timeout_ms: None,
            ..Default::default()
        };
        assert!(c.timeout().is_none());
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!("Myers".parse::<Algorithm>(), Ok(Algorithm::Myers));
        assert_eq!("patience".parse::<Algorithm>(), Ok(Algorithm::Patience));
        assert!("lcs".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Greedy.to_string(), "greedy");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: EngineConfig = toml::from_str("algorithm = \"myers\"\ntimeout_ms = 250\n").unwrap();
        assert_eq!(c.algorithm, Algorithm::Myers);
        assert_eq!(c.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(c.max_input_bytes, EngineConfig::default().max_input_bytes);
    }

    #[test]
    fn strip_set_from_toml() {
        let c: EngineConfig = toml::from_str("strip_leading = [\" \", \"\\t\", \">\"]\n").unwrap();
        assert_eq!(c.strip_set(), Some(&[' ', '\t', '>'][..]));
    }
}
