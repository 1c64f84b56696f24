//! Directory of candidates and engineers available to a session.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Candidate, Engineer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub engineers: Vec<Engineer>,
}

impl Roster {
    pub fn new(candidates: Vec<Candidate>, engineers: Vec<Engineer>) -> Self {
        Roster {
            candidates,
            engineers,
        }
    }

    /// Parse a roster from JSON and check that every range has `start < end`.
    pub fn from_json(json: &str) -> Result<Self> {
        let roster: Roster = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<()> {
        for candidate in &self.candidates {
            candidate.availability.validate()?;
        }
        for engineer in &self.engineers {
            engineer.availability.validate()?;
        }
        Ok(())
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn engineer(&self, id: &str) -> Option<&Engineer> {
        self.engineers.iter().find(|e| e.id == id)
    }
}
