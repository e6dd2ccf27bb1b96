use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

/// Configuration for the bounds of a game tree enumeration.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Limits {
    /// Unlimited enumeration.
    #[default]
    None,

    /// The maximum number of nodes to expand.
    Nodes(u64),

    /// The maximum amount of time to spend enumerating.
    #[serde(with = "humantime_serde")]
    Time(
        #[cfg_attr(
            test,
            strategy(proptest::strategy::Strategy::prop_map(0u64..86_400_000, Duration::from_millis))
        )]
        Duration,
    ),
}

impl Limits {
    /// Node budget or [`u64::MAX`].
    pub fn nodes(&self) -> u64 {
        match self {
            Limits::Nodes(n) => *n,
            _ => u64::MAX,
        }
    }

    /// Time or [`Duration::MAX`].
    pub fn time(&self) -> Duration {
        match self {
            Limits::Time(t) => *t,
            _ => Duration::MAX,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Limits`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse limits")]
pub struct ParseLimitsError(ron::de::SpannedError);

impl FromStr for Limits {
    type Err = ParseLimitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
