//! Timed flash sequences.
//!
//! A [`FlashSequence`] is a fixed list of (color, duration) steps evaluated
//! against elapsed time. Nothing sleeps: the caller asks which color is due
//! now and how long that color still holds, then comes back after that delay.

use crate::color::Color;
use crate::time::TimeDuration;
use heapless::Vec;

/// One step of a flash sequence: hold `color` for `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashStep<D: TimeDuration> {
    pub color: Color,
    pub duration: D,
}

/// Flash sequence validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// No steps provided.
    EmptySequence,

    /// A step has zero duration.
    ZeroDuration,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for FlashError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FlashError::EmptySequence => {
                write!(f, "flash sequence must have at least one step")
            }
            FlashError::ZeroDuration => {
                write!(f, "flash steps must have a non-zero duration")
            }
            FlashError::CapacityExceeded => {
                write!(f, "flash sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlashError {}

/// A finite sequence of held colors.
///
/// # Type Parameters
/// * `D` - The duration type
/// * `N` - Maximum number of steps this sequence can hold
#[derive(Debug, Clone)]
pub struct FlashSequence<D: TimeDuration, const N: usize> {
    steps: Vec<FlashStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> FlashSequence<D, N> {
    /// Creates a new sequence builder.
    pub fn builder() -> FlashSequenceBuilder<D, N> {
        FlashSequenceBuilder::new()
    }

    /// Builds the mode acknowledgement: `count` times off for `period`, then
    /// `color` for `period`.
    pub fn acknowledge(color: Color, count: u8, period: D) -> Result<Self, FlashError> {
        let mut builder = Self::builder();
        for _ in 0..count {
            builder = builder
                .step(Color::BLACK, period)?
                .step(color, period)?;
        }
        builder.build()
    }

    /// Evaluates the sequence at `elapsed` time since it started.
    ///
    /// # Returns
    /// * `Some((color, remaining))` - The color due now and how long it still holds
    /// * `None` - The sequence has finished
    pub fn evaluate(&self, elapsed: D) -> Option<(Color, D)> {
        let elapsed_millis = elapsed.as_millis();

        let mut step_end = 0u64;
        for step in &self.steps {
            step_end += step.duration.as_millis();
            if elapsed_millis < step_end {
                return Some((step.color, D::from_millis(step_end - elapsed_millis)));
            }
        }

        None
    }

    /// Total duration of the sequence.
    pub fn total_duration(&self) -> D {
        let total_millis: u64 = self.steps.iter().map(|s| s.duration.as_millis()).sum();
        D::from_millis(total_millis)
    }

    /// Returns the number of steps in this sequence.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns a reference to the step at the given index.
    pub fn get_step(&self, index: usize) -> Option<&FlashStep<D>> {
        self.steps.get(index)
    }
}

/// Builder for constructing validated flash sequences.
#[derive(Debug)]
pub struct FlashSequenceBuilder<D: TimeDuration, const N: usize> {
    steps: Vec<FlashStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> FlashSequenceBuilder<D, N> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Adds a step.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` steps
    pub fn step(mut self, color: Color, duration: D) -> Result<Self, FlashError> {
        self.steps
            .push(FlashStep { color, duration })
            .map_err(|_| FlashError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the sequence.
    ///
    /// # Errors
    /// * `EmptySequence` - No steps were added
    /// * `ZeroDuration` - A step has zero duration
    pub fn build(self) -> Result<FlashSequence<D, N>, FlashError> {
        if self.steps.is_empty() {
            return Err(FlashError::EmptySequence);
        }

        if self.steps.iter().any(|step| step.duration.is_zero()) {
            return Err(FlashError::ZeroDuration);
        }

        Ok(FlashSequence { steps: self.steps })
    }
}

impl<D: TimeDuration, const N: usize> Default for FlashSequenceBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
