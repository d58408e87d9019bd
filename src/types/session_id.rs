//! Session identifiers (season, round, session kind)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of session within a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Practice1,
    Practice2,
    Practice3,
    SprintQualifying,
    Sprint,
    Qualifying,
    Race,
}

impl SessionKind {
    /// Short identifier ("FP1", "Q", "R", ...).
    pub fn code(self) -> &'static str {
        match self {
            SessionKind::Practice1 => "FP1",
            SessionKind::Practice2 => "FP2",
            SessionKind::Practice3 => "FP3",
            SessionKind::SprintQualifying => "SQ",
            SessionKind::Sprint => "S",
            SessionKind::Qualifying => "Q",
            SessionKind::Race => "R",
        }
    }

    /// Session names OpenF1 uses for this kind.
    ///
    /// Sprint qualifying was called "Sprint Shootout" in 2023.
    pub fn openf1_names(self) -> &'static [&'static str] {
        match self {
            SessionKind::Practice1 => &["Practice 1"],
            SessionKind::Practice2 => &["Practice 2"],
            SessionKind::Practice3 => &["Practice 3"],
            SessionKind::SprintQualifying => &["Sprint Qualifying", "Sprint Shootout"],
            SessionKind::Sprint => &["Sprint"],
            SessionKind::Qualifying => &["Qualifying"],
            SessionKind::Race => &["Race"],
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fp1" | "practice 1" => Ok(SessionKind::Practice1),
            "fp2" | "practice 2" => Ok(SessionKind::Practice2),
            "fp3" | "practice 3" => Ok(SessionKind::Practice3),
            "sq" | "sprint qualifying" | "sprint shootout" => Ok(SessionKind::SprintQualifying),
            "s" | "sprint" => Ok(SessionKind::Sprint),
            "q" | "qualifying" => Ok(SessionKind::Qualifying),
            "r" | "race" => Ok(SessionKind::Race),
            other => Err(format!("unknown session kind '{other}'")),
        }
    }
}

/// A single session: season, round within that season, and session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId {
    pub season: u16,
    /// 1-based round number, pre-season testing excluded
    pub round: u8,
    pub kind: SessionKind,
}

impl SessionId {
    /// 2024 Bahrain Grand Prix, race.
    pub const BAHRAIN_2024: SessionId =
        SessionId { season: 2024, round: 1, kind: SessionKind::Race };

    pub const fn new(season: u16, round: u8, kind: SessionKind) -> Self {
        Self { season, round, kind }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} round {} {}", self.season, self.round, self.kind)
    }
}
