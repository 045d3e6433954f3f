//! Published metric identifiers and the cache key scheme.
//!
//! Every run publishes four series, each under a fresh timestamped key plus
//! a stable `latest` pointer so readers can find the newest run without
//! knowing its timestamp.
//!
//! # Key Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | `{token}:timeline:{epoch}` | Concrete series for one run |
//! | `{token}:timeline:{epoch}:seed:{seed}` | Concrete series, seeded run |
//! | `{token}:timeline:latest` | Pointer to the newest concrete key |
//!
//! Tokens are exact and case-sensitive: `population`, `hiv:infections`,
//! `hiv:prevalence`, `hiv:incidence`.

use std::fmt;
use std::str::FromStr;

/// One of the four published timeline metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Population size over simulation time.
    Population,
    /// Cumulative HIV transmissions over simulation time.
    Infections,
    /// HIV prevalence percent over simulation time.
    Prevalence,
    /// HIV incidence percent per calendar year.
    Incidence,
}

impl Metric {
    /// All metrics, in publish order.
    pub const ALL: [Self; 4] = [
        Self::Population,
        Self::Infections,
        Self::Prevalence,
        Self::Incidence,
    ];

    /// The metric's cache key token (exact, case-sensitive).
    pub const fn token(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::Infections => "hiv:infections",
            Self::Prevalence => "hiv:prevalence",
            Self::Incidence => "hiv:incidence",
        }
    }

    /// Concrete key for one run, namespaced by publish timestamp and,
    /// when the run was seeded, by the seed.
    pub fn timeline_key(self, epoch_seconds: i64, seed: Option<i64>) -> String {
        let token = self.token();
        seed.map_or_else(
            || format!("{token}:timeline:{epoch_seconds}"),
            |seed| format!("{token}:timeline:{epoch_seconds}:seed:{seed}"),
        )
    }

    /// Pointer key holding the name of the newest concrete key.
    pub fn latest_key(self) -> String {
        format!("{}:timeline:latest", self.token())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A metric token that matched none of the published metrics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric token: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    /// Accepts the exact key token, or its bare suffix for the `hiv:`
    /// metrics (`infections`, `prevalence`, `incidence`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "population" => Ok(Self::Population),
            "hiv:infections" | "infections" => Ok(Self::Infections),
            "hiv:prevalence" | "prevalence" => Ok(Self::Prevalence),
            "hiv:incidence" | "incidence" => Ok(Self::Incidence),
            other => Err(UnknownMetric(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_exact() {
        assert_eq!(Metric::Population.token(), "population");
        assert_eq!(Metric::Infections.token(), "hiv:infections");
        assert_eq!(Metric::Prevalence.token(), "hiv:prevalence");
        assert_eq!(Metric::Incidence.token(), "hiv:incidence");
    }

    #[test]
    fn timeline_key_without_seed() {
        assert_eq!(
            Metric::Population.timeline_key(1_718_000_000, None),
            "population:timeline:1718000000"
        );
    }

    #[test]
    fn timeline_key_with_seed() {
        assert_eq!(
            Metric::Prevalence.timeline_key(1_718_000_000, Some(42)),
            "hiv:prevalence:timeline:1718000000:seed:42"
        );
    }

    #[test]
    fn timeline_key_with_negative_seed() {
        assert_eq!(
            Metric::Incidence.timeline_key(7, Some(-3)),
            "hiv:incidence:timeline:7:seed:-3"
        );
    }

    #[test]
    fn latest_key_per_metric() {
        assert_eq!(Metric::Population.latest_key(), "population:timeline:latest");
        assert_eq!(Metric::Infections.latest_key(), "hiv:infections:timeline:latest");
    }

    #[test]
    fn parses_tokens_and_bare_suffixes() {
        assert_eq!("population".parse::<Metric>().unwrap(), Metric::Population);
        assert_eq!("hiv:infections".parse::<Metric>().unwrap(), Metric::Infections);
        assert_eq!("prevalence".parse::<Metric>().unwrap(), Metric::Prevalence);
        assert_eq!("incidence".parse::<Metric>().unwrap(), Metric::Incidence);
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = "hiv:mortality".parse::<Metric>().unwrap_err();
        assert_eq!(err, UnknownMetric("hiv:mortality".to_owned()));
    }

    #[test]
    fn all_covers_every_metric_once() {
        assert_eq!(Metric::ALL.len(), 4);
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(
                Metric::ALL.iter().position(|m| m == metric),
                Some(i),
                "duplicate metric in ALL"
            );
        }
    }
}
