use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete risk category derived from a total score.
///
/// `rank` is the position in the owning scale, `0` being the best grade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating {
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rank: u8,
}

impl Rating {
    pub fn new(grade: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
            description: None,
            rank: 0,
        }
    }

    pub fn described(grade: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
            description: Some(description.into()),
            rank: 0,
        }
    }

    pub fn is_better_than(&self, other: &Rating) -> bool {
        self.rank < other.rank
    }

    /// True for the bare grade (`"BB"`) or the full label (`"BB (Speculative)"`).
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.grade == label || self.to_string() == label
    }

    /// Ordering where `Less` means a better grade.
    pub fn compare_quality(&self, other: &Rating) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({})", self.grade, description),
            None => f.write_str(&self.grade),
        }
    }
}

/// Inclusive lower bound for a rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingTier {
    pub min_score: i32,
    pub rating: Rating,
}

impl RatingTier {
    pub fn new(min_score: i32, rating: Rating) -> Self {
        Self { min_score, rating }
    }
}

/// Threshold table mapping scores onto ratings, best grade first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingScale {
    tiers: Vec<RatingTier>,
    floor: Rating,
}

impl RatingScale {
    /// Builds a scale from bounded tiers plus the unbounded lowest rating.
    ///
    /// Tiers are checked highest threshold first regardless of the order given;
    /// ranks are reassigned from that order.
    pub fn new(mut tiers: Vec<RatingTier>, floor: Rating) -> Self {
        tiers.sort_by(|left, right| right.min_score.cmp(&left.min_score));
        for (rank, tier) in tiers.iter_mut().enumerate() {
            tier.rating.rank = rank_from(rank);
        }

        let mut floor = floor;
        floor.rank = rank_from(tiers.len());

        Self { tiers, floor }
    }

    /// Every score maps to exactly one rating; ties resolve to the better grade.
    pub fn map(&self, score: i32) -> Rating {
        self.tiers
            .iter()
            .find(|tier| score >= tier.min_score)
            .map(|tier| tier.rating.clone())
            .unwrap_or_else(|| self.floor.clone())
    }

    pub fn tiers(&self) -> &[RatingTier] {
        &self.tiers
    }

    /// All ratings from best to worst.
    pub fn ratings(&self) -> impl Iterator<Item = &Rating> {
        self.tiers
            .iter()
            .map(|tier| &tier.rating)
            .chain(std::iter::once(&self.floor))
    }

    /// Looks a rating up by grade (`"BB"`) or full label (`"BB (Speculative)"`).
    pub fn find_grade(&self, grade: &str) -> Option<&Rating> {
        self.ratings().find(|rating| rating.matches_label(grade))
    }

    pub fn contains_grade(&self, grade: &str) -> bool {
        self.find_grade(grade).is_some()
    }
}

fn rank_from(position: usize) -> u8 {
    u8::try_from(position).unwrap_or(u8::MAX)
}
