use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Sex / Pclass – the two categorical filter dimensions
// ---------------------------------------------------------------------------

/// Passenger sex as recorded in the `Sex` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(RecordError::UnknownSex(s.to_string())),
        }
    }
}

/// Ticket class, 1 (upper) to 3 (lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pclass {
    First = 1,
    Second = 2,
    Third = 3,
}

impl Pclass {
    pub const ALL: [Pclass; 3] = [Pclass::First, Pclass::Second, Pclass::Third];

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Pclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<i64> for Pclass {
    type Error = RecordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Pclass::First),
            2 => Ok(Pclass::Second),
            3 => Ok(Pclass::Third),
            other => Err(RecordError::ClassOutOfRange(other.to_string())),
        }
    }
}

impl FromStr for Pclass {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| RecordError::ClassOutOfRange(s.to_string()))?;
        Pclass::try_from(n)
    }
}

// ---------------------------------------------------------------------------
// Record validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("unknown sex '{0}' (expected 'male' or 'female')")]
    UnknownSex(String),
    #[error("passenger class '{0}' is not one of 1, 2, 3")]
    ClassOutOfRange(String),
    #[error("survival flag {0} is not 0 or 1")]
    InvalidSurvived(i64),
    #[error("age {0} is not a non-negative number")]
    InvalidAge(f64),
}

// ---------------------------------------------------------------------------
// Passenger – one row of the dataset
// ---------------------------------------------------------------------------

/// A single passenger record.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub sex: Sex,
    pub pclass: Pclass,
    pub survived: bool,
    /// `None` when the age is unknown.
    pub age: Option<f64>,
    pub passenger_id: Option<i64>,
    pub name: Option<String>,
}

/// A row as it appears in the source table, before validation.
///
/// Column names follow the dataset header; any other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPassenger {
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Pclass")]
    pub pclass: i64,
    #[serde(rename = "Survived")]
    pub survived: i64,
    #[serde(rename = "Age", default)]
    pub age: Option<f64>,
    #[serde(rename = "PassengerId", default)]
    pub passenger_id: Option<i64>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

impl TryFrom<RawPassenger> for Passenger {
    type Error = RecordError;

    fn try_from(raw: RawPassenger) -> Result<Self, Self::Error> {
        let sex = raw.sex.parse()?;
        let pclass = Pclass::try_from(raw.pclass)?;
        let survived = match raw.survived {
            0 => false,
            1 => true,
            other => return Err(RecordError::InvalidSurvived(other)),
        };
        let age = match raw.age {
            Some(a) if !a.is_finite() || a < 0.0 => return Err(RecordError::InvalidAge(a)),
            other => other,
        };
        Ok(Passenger {
            sex,
            pclass,
            survived,
            age,
            passenger_id: raw.passenger_id,
            name: raw.name.filter(|n| !n.is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full passenger table. Built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub passengers: Vec<Passenger>,
    /// File the rows were read from, if any.
    pub source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(passengers: Vec<Passenger>) -> Self {
        Dataset {
            passengers,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn passenger(sex: Sex, pclass: Pclass, survived: bool, age: Option<f64>) -> Passenger {
        Passenger {
            sex,
            pclass,
            survived,
            age,
            passenger_id: None,
            name: None,
        }
    }

    /// The four-passenger table used throughout the pipeline tests.
    pub(crate) fn four_passengers() -> Dataset {
        Dataset::new(vec![
            passenger(Sex::Male, Pclass::First, true, Some(22.0)),
            passenger(Sex::Male, Pclass::Third, false, None),
            passenger(Sex::Female, Pclass::First, true, Some(38.0)),
            passenger(Sex::Female, Pclass::Third, false, Some(26.0)),
        ])
    }

    fn raw(sex: &str, pclass: i64, survived: i64, age: Option<f64>) -> RawPassenger {
        RawPassenger {
            sex: sex.to_string(),
            pclass,
            survived,
            age,
            passenger_id: Some(7),
            name: Some(String::new()),
        }
    }

    #[test]
    fn parses_categoricals_from_text() {
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("3".parse::<Pclass>(), Ok(Pclass::Third));
        assert!("4".parse::<Pclass>().is_err());
        assert!("first".parse::<Pclass>().is_err());
        assert!("unknown".parse::<Sex>().is_err());
        assert_eq!(Pclass::Second.to_string(), "2");
        assert_eq!(Sex::Male.to_string(), "male");
    }

    #[test]
    fn validates_raw_rows() {
        let p = Passenger::try_from(raw("male", 2, 1, None)).unwrap();
        assert_eq!(p.pclass, Pclass::Second);
        assert!(p.survived);
        assert_eq!(p.age, None);
        assert_eq!(p.passenger_id, Some(7));
        assert_eq!(p.name, None, "empty names are dropped");

        assert_eq!(
            Passenger::try_from(raw("male", 1, 2, None)),
            Err(RecordError::InvalidSurvived(2))
        );
        assert_eq!(
            Passenger::try_from(raw("male", 0, 1, None)),
            Err(RecordError::ClassOutOfRange("0".to_string()))
        );
        assert_eq!(
            Passenger::try_from(raw("male", 1, 1, Some(-1.0))),
            Err(RecordError::InvalidAge(-1.0))
        );
        assert!(matches!(
            Passenger::try_from(raw("robot", 1, 1, None)),
            Err(RecordError::UnknownSex(_))
        ));
    }
}
