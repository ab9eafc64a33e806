//! Onboarding answer aggregate
//!
//! Everything the wizard collects lives in [`OnboardingAnswers`], owned by the
//! sequencer for the lifetime of one wizard session.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Placeholder chip meaning "no selection".
pub const NONE_SENTINEL: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    StayFit,
}

impl Goal {
    /// Goals that ask for a target body weight.
    pub fn needs_target_weight(self) -> bool {
        matches!(self, Self::WeightLoss | Self::WeightGain)
    }

    /// Goals that ask for target muscle groups.
    pub fn needs_muscle_groups(self) -> bool {
        matches!(self, Self::MuscleGain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingLocation {
    Home,
    Gym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Core,
}

/// Ordered chip list where "None" excludes every other entry.
///
/// Choosing "None" clears the list down to the sentinel; adding any real
/// entry drops the sentinel. A list built from raw strings that mixes both
/// keeps only the real entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ChipSelection {
    entries: Vec<String>,
}

impl ChipSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding only the sentinel.
    pub fn none() -> Self {
        Self {
            entries: vec![NONE_SENTINEL.to_string()],
        }
    }

    /// Toggles a chip on or off.
    pub fn toggle(&mut self, chip: &str) {
        if chip == NONE_SENTINEL {
            self.select_none();
            return;
        }
        self.drop_sentinel();
        if let Some(pos) = self.entries.iter().position(|e| e == chip) {
            self.entries.remove(pos);
        } else {
            self.entries.push(chip.to_string());
        }
    }

    pub fn select_none(&mut self) {
        self.entries = vec![NONE_SENTINEL.to_string()];
    }

    /// Adds a free-text entry. Blank and duplicate tags are ignored.
    pub fn add_custom(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        if tag == NONE_SENTINEL {
            self.select_none();
            return;
        }
        self.drop_sentinel();
        if !self.entries.iter().any(|e| e == tag) {
            self.entries.push(tag.to_string());
        }
    }

    pub fn remove(&mut self, tag: &str) {
        self.entries.retain(|e| e != tag);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_none(&self) -> bool {
        self.entries.len() == 1 && self.entries[0] == NONE_SENTINEL
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, chip: &str) -> bool {
        self.entries.iter().any(|e| e == chip)
    }

    /// All entries, sentinel included.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries other than the sentinel, in selection order.
    pub fn real_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|e| *e != NONE_SENTINEL)
    }

    fn drop_sentinel(&mut self) {
        self.entries.retain(|e| e != NONE_SENTINEL);
    }
}

impl From<Vec<String>> for ChipSelection {
    fn from(raw: Vec<String>) -> Self {
        let mut selection = Self::new();
        let has_real = raw.iter().any(|e| !e.trim().is_empty() && e.trim() != NONE_SENTINEL);
        for entry in &raw {
            if has_real && entry.trim() == NONE_SENTINEL {
                continue;
            }
            selection.add_custom(entry);
        }
        selection
    }
}

impl From<ChipSelection> for Vec<String> {
    fn from(selection: ChipSelection) -> Self {
        selection.entries
    }
}

impl<const N: usize> From<[&str; N]> for ChipSelection {
    fn from(raw: [&str; N]) -> Self {
        raw.iter().map(|s| s.to_string()).collect::<Vec<_>>().into()
    }
}

/// Answers accumulated across the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAnswers {
    // basics
    pub name: String,
    pub gender: Option<Gender>,

    // stats
    pub age: Option<u32>,
    pub height_cm: f64,
    pub weight_kg: f64,

    // goal and its sub-step
    pub goal: Option<Goal>,
    pub target_weight_kg: Option<f64>,
    pub target_muscle_groups: BTreeSet<MuscleGroup>,

    pub experience_level: Option<ExperienceLevel>,
    pub injuries: ChipSelection,
    pub allergies: ChipSelection,

    // availability
    pub training_days_per_week: Option<u32>,
    pub training_location: Option<TrainingLocation>,
    pub equipment: ChipSelection,
}

impl Default for OnboardingAnswers {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: None,
            age: None,
            height_cm: 170.0,
            weight_kg: 70.0,
            goal: None,
            target_weight_kg: None,
            target_muscle_groups: BTreeSet::new(),
            experience_level: None,
            injuries: ChipSelection::new(),
            allergies: ChipSelection::new(),
            training_days_per_week: None,
            training_location: None,
            equipment: ChipSelection::new(),
        }
    }
}
