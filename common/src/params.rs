//! Bounded, steppable numeric inputs that drive a simulation
//!
//! Every simulation declares a static template of [`ParameterSpec`]s. When
//! the simulation is selected the template is cloned into a live
//! [`ParameterSet`]; edits are clamped into range and never persisted.

use crate::config::Locale;

/// Static description of one simulation input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub label_uz: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
    pub unit: &'static str,
}

impl ParameterSpec {
    /// `min ≤ default ≤ max` and a positive step
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
            && self.step > 0.0
            && (self.min..=self.max).contains(&self.default)
    }
}

/// Result of committing free-form text to a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Parsed and inside the range
    Accepted(f32),
    /// Parsed but outside the range; the value shown is corrected
    Clamped(f32),
    /// Not a number; the last valid value is kept
    Reverted(f32),
}

impl InputOutcome {
    pub fn value(self) -> f32 {
        match self {
            InputOutcome::Accepted(v) | InputOutcome::Clamped(v) | InputOutcome::Reverted(v) => v,
        }
    }
}

/// A live parameter bound to its template
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    spec: ParameterSpec,
    value: f32,
}

impl Parameter {
    pub fn from_spec(spec: ParameterSpec) -> Self {
        Self {
            value: spec.default.clamp(spec.min, spec.max),
            spec,
        }
    }

    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.spec.label,
            Locale::Uz => self.spec.label_uz,
        }
    }

    /// Clamp into `[min, max]` and store. `NaN` leaves the value unchanged.
    pub fn set(&mut self, value: f32) -> f32 {
        if !value.is_nan() {
            self.value = value.clamp(self.spec.min, self.spec.max);
        }
        self.value
    }

    pub fn commit_text(&mut self, text: &str) -> InputOutcome {
        match text.trim().replace(',', ".").parse::<f32>() {
            Ok(parsed) if !parsed.is_nan() => {
                let stored = self.set(parsed);
                if stored == parsed {
                    InputOutcome::Accepted(stored)
                } else {
                    InputOutcome::Clamped(stored)
                }
            }
            _ => InputOutcome::Reverted(self.value),
        }
    }

    /// Move by whole steps
    pub fn nudge(&mut self, steps: i32) -> f32 {
        self.set(self.value + steps as f32 * self.spec.step)
    }

    pub fn reset(&mut self) {
        self.value = self.spec.default.clamp(self.spec.min, self.spec.max);
    }
}

/// The live inputs of one mounted simulation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn from_template(template: &[ParameterSpec]) -> Self {
        debug_assert!(template.iter().all(ParameterSpec::is_valid));
        Self {
            params: template.iter().copied().map(Parameter::from_spec).collect(),
        }
    }

    /// Current value, or `0.0` when the id is not part of this set
    pub fn value(&self, id: &str) -> f32 {
        self.get(id).map_or(0.0, Parameter::value)
    }

    pub fn get(&self, id: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.id() == id)
    }

    /// Clamped write; `None` when the id is unknown
    pub fn set_value(&mut self, id: &str, value: f32) -> Option<f32> {
        self.get_mut(id).map(|p| p.set(value))
    }

    pub fn commit_text(&mut self, id: &str, text: &str) -> Option<InputOutcome> {
        self.get_mut(id).map(|p| p.commit_text(text))
    }

    pub fn nudge(&mut self, id: &str, steps: i32) -> Option<f32> {
        self.get_mut(id).map(|p| p.nudge(steps))
    }

    pub fn reset_to_defaults(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
