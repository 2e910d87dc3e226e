use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A budget in whole rupees.
pub type Amount = u64;

pub const DEFAULT_MIN_BUDGET: Amount = 10_000;
pub const DEFAULT_MAX_BUDGET: Amount = 200_000;
pub const DEFAULT_BUDGET_STEP: Amount = 1_000;
pub const DEFAULT_INITIAL_BUDGET: Amount = 50_000;

const DEFAULT_RECOMMENDED_STEPS: [Amount; 7] =
    [10_000, 25_000, 50_000, 75_000, 100_000, 150_000, 200_000];

/// Errors raised when a budget control is configured inconsistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvertedBounds { min: Amount, max: Amount },

    #[error("budget step must be greater than zero")]
    ZeroStep,

    #[error("at least one recommended budget step is required")]
    NoRecommendedSteps,

    #[error("recommended budget steps must be strictly ascending")]
    UnsortedRecommendedSteps,

    #[error("recommended budget step {step} lies outside {min}..={max}")]
    RecommendedStepOutOfRange { step: Amount, min: Amount, max: Amount },
}

/// Inclusive range and slider granularity of the budget control.
///
/// Only built through [`BudgetBounds::new`], so `min <= max` and `step > 0`
/// always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetBounds {
    min: Amount,
    max: Amount,
    step: Amount,
}

impl BudgetBounds {
    pub fn new(
        min: Amount,
        max: Amount,
        step: Amount,
    ) -> Result<Self, BudgetError> {
        if min > max {
            return Err(BudgetError::InvertedBounds { min, max });
        }
        if step == 0 {
            return Err(BudgetError::ZeroStep);
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> Amount {
        self.min
    }

    pub fn max(&self) -> Amount {
        self.max
    }

    pub fn step(&self) -> Amount {
        self.step
    }

    /// Width of the range, `max - min`.
    pub fn span(&self) -> Amount {
        self.max - self.min
    }

    pub fn clamp(
        &self,
        value: Amount,
    ) -> Amount {
        value.clamp(self.min, self.max)
    }

    /// Rounds a raw slider position to the nearest multiple of `step`
    /// (half rounds up), then clamps it into range.
    pub fn quantize(
        &self,
        raw: Amount,
    ) -> Amount {
        let lower = raw / self.step * self.step;
        let rounded = if raw - lower >= self.step.div_ceil(2) {
            lower.saturating_add(self.step)
        } else {
            lower
        };
        self.clamp(rounded)
    }
}

impl Default for BudgetBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_BUDGET,
            max: DEFAULT_MAX_BUDGET,
            step: DEFAULT_BUDGET_STEP,
        }
    }
}

/// Canonical budget values the slider is pulled towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Amount>", into = "Vec<Amount>")]
pub struct RecommendedSteps(Vec<Amount>);

impl RecommendedSteps {
    pub fn new(steps: Vec<Amount>) -> Result<Self, BudgetError> {
        if steps.is_empty() {
            return Err(BudgetError::NoRecommendedSteps);
        }
        if steps.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(BudgetError::UnsortedRecommendedSteps);
        }
        Ok(Self(steps))
    }

    pub fn as_slice(&self) -> &[Amount] {
        &self.0
    }

    /// Fails on the first step that `bounds` cannot hold.
    pub fn ensure_within(
        &self,
        bounds: &BudgetBounds,
    ) -> Result<(), BudgetError> {
        match self.0.iter().find(|step| bounds.clamp(**step) != **step) {
            Some(&step) => Err(BudgetError::RecommendedStepOutOfRange {
                step,
                min: bounds.min(),
                max: bounds.max(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for RecommendedSteps {
    fn default() -> Self {
        Self(DEFAULT_RECOMMENDED_STEPS.to_vec())
    }
}

impl TryFrom<Vec<Amount>> for RecommendedSteps {
    type Error = BudgetError;

    fn try_from(steps: Vec<Amount>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<RecommendedSteps> for Vec<Amount> {
    fn from(steps: RecommendedSteps) -> Self {
        steps.0
    }
}
