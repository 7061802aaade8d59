//! Bounded spacing parameters.

use routerjig_core::{ParameterError, ParameterResult};

/// An integer parameter limited to `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntParam {
    name: &'static str,
    value: i32,
    min: i32,
    max: i32,
}

impl IntParam {
    /// Create a parameter; `value` is clamped into range and an inverted
    /// range collapses to `min`.
    pub fn new(name: &'static str, value: i32, min: i32, max: i32) -> Self {
        let max = max.max(min);
        Self {
            name,
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Set the value, rejecting anything outside the bounds.
    pub fn set(&mut self, value: i32) -> ParameterResult<()> {
        if value < self.min || value > self.max {
            return Err(ParameterError::out_of_range(
                self.name, value, self.min, self.max,
            ));
        }
        self.value = value;
        Ok(())
    }
}

/// A boolean parameter that may be locked to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagParam {
    name: &'static str,
    value: bool,
    locked: bool,
}

impl FlagParam {
    pub fn new(name: &'static str, value: bool) -> Self {
        Self {
            name,
            value,
            locked: false,
        }
    }

    /// Force the value and refuse later changes.
    pub fn lock(&mut self, value: bool) {
        self.value = value;
        self.locked = true;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set(&mut self, value: bool) -> ParameterResult<()> {
        if self.locked && value != self.value {
            return Err(ParameterError::Incompatible(format!(
                "{} cannot be changed for a dovetail bit",
                self.name
            )));
        }
        self.value = value;
        Ok(())
    }
}
