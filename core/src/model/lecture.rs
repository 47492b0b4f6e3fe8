use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::LectureIdError;

/// One scheduled lecture slot on a given date: the `ordinal`-th lecture of `subject`.
/// Rendered as `"<subject>#<ordinal>"`; the ordinal is 1-based and only stable within
/// one date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LectureId {
    pub subject: String,
    pub ordinal: u32,
}

impl LectureId {
    pub fn new(subject: impl Into<String>, ordinal: u32) -> Self {
        Self {
            subject: subject.into(),
            ordinal,
        }
    }
}

impl fmt::Display for LectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.subject, self.ordinal)
    }
}

impl FromStr for LectureId {
    type Err = LectureIdError;

    // Subjects may contain '#', the ordinal never does. The ordinal is written
    // in canonical form only, so parsing and display agree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (subject, ordinal) = s
            .rsplit_once('#')
            .ok_or_else(|| LectureIdError(s.to_string()))?;
        if ordinal.starts_with('0') || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LectureIdError(s.to_string()));
        }
        let ordinal: u32 = ordinal.parse().map_err(|_| LectureIdError(s.to_string()))?;
        if subject.trim().is_empty() || ordinal == 0 {
            return Err(LectureIdError(s.to_string()));
        }
        Ok(LectureId::new(subject, ordinal))
    }
}

impl Serialize for LectureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LectureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LectureStatus {
    Present,
    Absent,
}

impl LectureStatus {
    pub fn toggled(self) -> Self {
        match self {
            LectureStatus::Present => LectureStatus::Absent,
            LectureStatus::Absent => LectureStatus::Present,
        }
    }
}

impl fmt::Display for LectureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LectureStatus::Present => write!(f, "present"),
            LectureStatus::Absent => write!(f, "absent"),
        }
    }
}

impl FromStr for LectureStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p" | "present" => Ok(LectureStatus::Present),
            "a" | "absent" => Ok(LectureStatus::Absent),
            _ => Err(anyhow::anyhow!("Unknown status: '{}' (use present or absent)", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lecture_id_display_and_parse() {
        let id = LectureId::new("Math", 2);
        assert_eq!(id.to_string(), "Math#2");
        assert_eq!("Math#2".parse::<LectureId>().unwrap(), id);
    }

    #[test]
    fn test_lecture_id_subject_with_hash() {
        let id: LectureId = "C#-Lab#1".parse().unwrap();
        assert_eq!(id.subject, "C#-Lab");
        assert_eq!(id.ordinal, 1);
    }

    #[test]
    fn test_lecture_id_rejects_malformed() {
        assert!("Math".parse::<LectureId>().is_err());
        assert!("Math#".parse::<LectureId>().is_err());
        assert!("Math#0".parse::<LectureId>().is_err());
        assert!("#1".parse::<LectureId>().is_err());
        assert!("Math#x".parse::<LectureId>().is_err());
    }

    #[test]
    fn test_lecture_id_rejects_non_canonical_ordinal() {
        assert!("Math#01".parse::<LectureId>().is_err());
        assert!("Math#+1".parse::<LectureId>().is_err());
        assert!("Math#00".parse::<LectureId>().is_err());
        assert!(serde_json::from_str::<LectureId>("\"Math#01\"").is_err());
        assert_eq!("Math#10".parse::<LectureId>().unwrap(), LectureId::new("Math", 10));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LectureStatus::Present).unwrap();
        assert_eq!(json, "\"present\"");
        assert_eq!("a".parse::<LectureStatus>().unwrap(), LectureStatus::Absent);
    }
}
