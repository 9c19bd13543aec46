//! Parameter values for a selected field.

use rand::Rng;

use crate::error::ConfigurationError;
use crate::field::{ParamSpec, VectorField};

/// Current coefficient values of one field, index-aligned with its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    field: VectorField,
    values: Vec<f64>,
}

impl ParameterSet {
    /// The field's declared default ("pretty") values.
    pub fn defaults(field: VectorField) -> Self {
        Self {
            field,
            values: field.schema().params.iter().map(|p| p.default).collect(),
        }
    }

    /// Raw values in schema order, taken as-is.
    ///
    /// Missing trailing values fall back to their defaults; extra values are
    /// dropped. No clamping is applied.
    pub fn from_values(field: VectorField, values: &[f64]) -> Self {
        let mut set = Self::defaults(field);
        for (slot, value) in set.values.iter_mut().zip(values) {
            *slot = *value;
        }
        set
    }

    /// Field these values belong to.
    pub fn field(&self) -> VectorField {
        self.field
    }

    /// Schema entries, in the same order as [`values`](Self::values).
    pub fn specs(&self) -> &'static [ParamSpec] {
        self.field.schema().params
    }

    /// Values in schema order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.specs().iter().zip(&self.values).map(|(spec, v)| (spec.name, *v))
    }

    /// Value of the named parameter.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.field
            .schema()
            .param(name)
            .map(|(index, _)| self.values[index])
    }

    /// Set the named parameter, clamped to its range. Returns the stored value.
    pub fn set(&mut self, name: &str, value: f64) -> Result<f64, ConfigurationError> {
        let (index, spec) = self.lookup(name)?;
        let clamped = spec.clamp(value);
        self.values[index] = clamped;
        Ok(clamped)
    }

    /// Add `delta` to the named parameter, clamped to its range.
    pub fn nudge(&mut self, name: &str, delta: f64) -> Result<f64, ConfigurationError> {
        let (index, spec) = self.lookup(name)?;
        let clamped = spec.clamp(self.values[index] + delta);
        self.values[index] = clamped;
        Ok(clamped)
    }

    /// Restore every parameter to its default.
    pub fn reset(&mut self) {
        *self = Self::defaults(self.field);
    }

    /// Draw every parameter uniformly from its range, snapped to its step.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (slot, spec) in self.values.iter_mut().zip(self.field.schema().params) {
            let raw = spec.min + rng.gen::<f64>() * (spec.max - spec.min);
            *slot = spec.snap(raw);
        }
    }

    /// The first `N` values as an array, zero-filled if the set is shorter.
    pub fn coefficients<const N: usize>(&self) -> [f64; N] {
        let mut out = [0.0; N];
        for (slot, value) in out.iter_mut().zip(&self.values) {
            *slot = *value;
        }
        out
    }

    fn lookup(&self, name: &str) -> Result<(usize, &'static ParamSpec), ConfigurationError> {
        self.field
            .schema()
            .param(name)
            .ok_or_else(|| ConfigurationError::UnknownParameter {
                field: self.field.id().to_string(),
                name: name.to_string(),
            })
    }
}
