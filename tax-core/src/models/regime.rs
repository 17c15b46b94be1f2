use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two alternative rule sets a taxpayer may elect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Regime",
            Self::New => "New Regime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deduction categories the calculators know about.
///
/// Declaration order is the order deductions are applied and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionSection {
    #[serde(rename = "standard_deduction")]
    Standard,
    #[serde(rename = "80C")]
    Section80C,
    #[serde(rename = "80D")]
    Section80D,
    #[serde(rename = "24B")]
    Section24B,
    #[serde(rename = "HRA")]
    Hra,
}

impl DeductionSection {
    pub const ALL: [DeductionSection; 5] = [
        Self::Standard,
        Self::Section80C,
        Self::Section80D,
        Self::Section24B,
        Self::Hra,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard => "standard_deduction",
            Self::Section80C => "80C",
            Self::Section80D => "80D",
            Self::Section24B => "24B",
            Self::Hra => "HRA",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD_DEDUCTION" | "STANDARD" => Some(Self::Standard),
            "80C" => Some(Self::Section80C),
            "80D" => Some(Self::Section80D),
            "24B" => Some(Self::Section24B),
            "HRA" => Some(Self::Hra),
            _ => None,
        }
    }
}

impl fmt::Display for DeductionSection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn regime_parse_is_case_insensitive() {
        assert_eq!(Regime::parse("OLD"), Some(Regime::Old));
        assert_eq!(Regime::parse(" new "), Some(Regime::New));
        assert_eq!(Regime::parse("middle"), None);
    }

    #[test]
    fn regime_serializes_lowercase() {
        let json = serde_json::to_string(&Regime::Old).unwrap();

        assert_eq!(json, "\"old\"");
    }

    #[test]
    fn section_codes_round_trip_through_parse() {
        for section in DeductionSection::ALL {
            assert_eq!(DeductionSection::parse(section.code()), Some(section));
        }
    }

    #[test]
    fn section_serializes_as_code() {
        let json = serde_json::to_string(&DeductionSection::Section80C).unwrap();

        assert_eq!(json, "\"80C\"");
    }
}
