//! Résumé section categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Semantic section of a résumé.
///
/// Ordering follows declaration order and is what output maps iterate by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Work history, internships, missions.
    Experience,
    /// Degrees, diplomas, certifications.
    Education,
    /// Technical and soft skills.
    Skills,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experience" => Ok(Self::Experience),
            "education" => Ok(Self::Education),
            "skills" => Ok(Self::Skills),
            other => Err(Error::Config(format!("unknown category: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("Experience".parse::<Category>().unwrap(), Category::Experience);
        assert_eq!(" skills ".parse::<Category>().unwrap(), Category::Skills);
        assert!("hobbies".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Education).unwrap();
        assert_eq!(json, "\"education\"");
        let back: Category = serde_json::from_str("\"experience\"").unwrap();
        assert_eq!(back, Category::Experience);
    }
}
