use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Result of a single baccarat round, carried as a one-letter code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "P")]
    Player,
    #[serde(rename = "B")]
    Banker,
    #[serde(rename = "T")]
    Tie,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Player, Outcome::Banker, Outcome::Tie];

    pub fn code(self) -> &'static str {
        match self {
            Outcome::Player => "P",
            Outcome::Banker => "B",
            Outcome::Tie => "T",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "P" | "p" => Some(Outcome::Player),
            "B" | "b" => Some(Outcome::Banker),
            "T" | "t" => Some(Outcome::Tie),
            _ => None,
        }
    }

    /// Background class shared by bars and history markers.
    pub fn bg_class(self) -> &'static str {
        match self {
            Outcome::Player => "player-bg",
            Outcome::Banker => "banker-bg",
            Outcome::Tie => "tie-bg",
        }
    }

    pub fn from_bg_class(class: &str) -> Option<Self> {
        Outcome::ALL.into_iter().find(|o| o.bg_class() == class)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Player => "PLAYER",
            Outcome::Banker => "BANKER",
            Outcome::Tie => "TIE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown outcome code {0:?} (expected P, B or T)")]
pub struct UnknownOutcome(pub String);

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::from_code(s).ok_or_else(|| UnknownOutcome(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_serde() {
        let raw = serde_json::to_string(&Outcome::ALL).unwrap();
        assert_eq!(raw, r#"["P","B","T"]"#);
        let back: Vec<Outcome> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, Outcome::ALL.to_vec());
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(serde_json::from_str::<Outcome>(r#""X""#).is_err());
        let err = "X".parse::<Outcome>().unwrap_err();
        assert_eq!(err, UnknownOutcome("X".to_string()));
    }

    #[test]
    fn parse_accepts_lowercase_and_whitespace() {
        assert_eq!(" b ".parse::<Outcome>().unwrap(), Outcome::Banker);
        assert_eq!("t".parse::<Outcome>().unwrap(), Outcome::Tie);
    }

    #[test]
    fn bg_class_lookup_is_exact() {
        for outcome in Outcome::ALL {
            assert_eq!(Outcome::from_bg_class(outcome.bg_class()), Some(outcome));
        }
        assert_eq!(Outcome::from_bg_class("prediction-bar"), None);
    }
}
