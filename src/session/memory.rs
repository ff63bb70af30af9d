use crate::lang::error::{CalcError, CalcResult};

/// The single accumulator register (M+, M-, MC, MR).
///
/// The value is always finite; an update that would overflow is refused.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Memory {
    value: f64,
}

impl Memory {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn add(&mut self, value: f64) -> CalcResult<()> {
        self.update(self.value + value)
    }

    pub fn subtract(&mut self, value: f64) -> CalcResult<()> {
        self.update(self.value - value)
    }

    fn update(&mut self, value: f64) -> CalcResult<()> {
        if !value.is_finite() {
            return Err(CalcError::overflow("memory value is too large to represent"));
        }
        self.value = value;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    pub fn recall(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }
}
