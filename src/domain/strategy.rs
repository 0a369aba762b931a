//! Pricing postures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How aggressively to price a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Undercut the market to sell quickly.
    #[default]
    #[serde(alias = "fast_flip", alias = "fast-flip")]
    FastFlip,
    /// Target the middle or upper market while staying visible.
    #[serde(alias = "max_profit", alias = "max-profit")]
    MaxProfit,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::FastFlip, Self::MaxProfit];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FastFlip => "FAST_FLIP",
            Self::MaxProfit => "MAX_PROFIT",
        }
    }

    /// Short operator-facing description.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::FastFlip => "undercut the cheapest competitor and the sold p20",
            Self::MaxProfit => "median sold (p75 when hot), capped at the 3rd-cheapest competitor",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected fast_flip or max_profit)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fast_flip" => Ok(Self::FastFlip),
            "max_profit" => Ok(Self::MaxProfit),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_and_separator_variants() {
        for name in ["fast_flip", "FAST_FLIP", "fast-flip", " Fast-Flip "] {
            assert_eq!(name.parse::<Strategy>(), Ok(Strategy::FastFlip));
        }
        assert_eq!("max-profit".parse::<Strategy>(), Ok(Strategy::MaxProfit));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("cheap".parse::<Strategy>().is_err());
    }

    #[test]
    fn displays_screaming_case() {
        assert_eq!(Strategy::MaxProfit.to_string(), "MAX_PROFIT");
    }

    #[test]
    fn deserializes_config_spellings() {
        let s: Strategy = serde_json::from_str("\"max_profit\"").unwrap();
        assert_eq!(s, Strategy::MaxProfit);
        let s: Strategy = serde_json::from_str("\"FAST_FLIP\"").unwrap();
        assert_eq!(s, Strategy::FastFlip);
    }
}
