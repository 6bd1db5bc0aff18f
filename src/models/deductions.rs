//! Meal deduction counters.
//!
//! Counters are plain values owned by the caller. Adjustments return a new
//! value rather than mutating shared state.

use serde::{Deserialize, Serialize};

/// The meal tier a deduction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// A provided lunch, deducted at the lunch-only rate.
    Lunch,
    /// A provided dinner, deducted at the dinner-only rate.
    Dinner,
    /// A fully covered day, deducted at the full rate.
    Full,
}

/// Direction of a counter adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Add one.
    Increment,
    /// Remove one, never going below zero.
    Decrement,
}

/// A single counter adjustment requested by the form layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionAdjustment {
    /// Which counter to adjust.
    pub kind: DeductionKind,
    /// Whether to add or remove one.
    pub direction: AdjustmentDirection,
}

/// The number of meal deductions declared for a trip leg.
///
/// # Example
///
/// ```
/// use dsa_engine::models::{DeductionCounts, DeductionKind};
///
/// let counts = DeductionCounts::default()
///     .incremented(DeductionKind::Lunch)
///     .incremented(DeductionKind::Lunch)
///     .decremented(DeductionKind::Dinner);
///
/// assert_eq!(counts.lunch, 2);
/// assert_eq!(counts.dinner, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionCounts {
    /// Provided lunches.
    #[serde(default)]
    pub lunch: u32,
    /// Provided dinners.
    #[serde(default)]
    pub dinner: u32,
    /// Fully covered days.
    #[serde(default)]
    pub full: u32,
}

impl DeductionCounts {
    /// Creates counters with explicit values.
    pub fn new(lunch: u32, dinner: u32, full: u32) -> Self {
        Self {
            lunch,
            dinner,
            full,
        }
    }

    /// Returns the current value of one counter.
    pub fn get(&self, kind: DeductionKind) -> u32 {
        match kind {
            DeductionKind::Lunch => self.lunch,
            DeductionKind::Dinner => self.dinner,
            DeductionKind::Full => self.full,
        }
    }

    /// Returns a copy with one counter increased by one.
    pub fn incremented(self, kind: DeductionKind) -> Self {
        self.with(kind, self.get(kind).saturating_add(1))
    }

    /// Returns a copy with one counter decreased by one.
    ///
    /// Decrementing a counter already at zero leaves it at zero.
    pub fn decremented(self, kind: DeductionKind) -> Self {
        self.with(kind, self.get(kind).saturating_sub(1))
    }

    /// Applies an adjustment and returns the new counters.
    pub fn apply(self, adjustment: DeductionAdjustment) -> Self {
        match adjustment.direction {
            AdjustmentDirection::Increment => self.incremented(adjustment.kind),
            AdjustmentDirection::Decrement => self.decremented(adjustment.kind),
        }
    }

    /// Returns true if no deductions are declared.
    pub fn is_empty(&self) -> bool {
        self.lunch == 0 && self.dinner == 0 && self.full == 0
    }

    fn with(mut self, kind: DeductionKind, value: u32) -> Self {
        match kind {
            DeductionKind::Lunch => self.lunch = value,
            DeductionKind::Dinner => self.dinner = value,
            DeductionKind::Full => self.full = value,
        }
        self
    }
}
