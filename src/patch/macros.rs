#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::Modulatable;

/// One parameter driven by a macro, mapped onto `low..=high`.
///
/// `low > high` is allowed and inverts the mapping.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroBinding<P> {
    pub target: P,
    pub low: f32,
    pub high: f32,
}

impl<P> MacroBinding<P> {
    /// Map a 0..=127 control value (clamped) linearly onto `low..=high`.
    pub fn map(&self, value: f32) -> f32 {
        let value = value.clamp(0.0, 127.0);
        self.low + (self.high - self.low) * value / 127.0
    }
}

/// A single control fanned out to several parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MacroControl<P> {
    bindings: Vec<MacroBinding<P>>,
}

impl<P: Copy> MacroControl<P> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Vec::with_capacity(capacity),
        }
    }

    pub fn add_control(&mut self, target: P, low: f32, high: f32) {
        self.bindings.push(MacroBinding { target, low, high });
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn bindings(&self) -> &[MacroBinding<P>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Push `value` through every binding, in the order they were added.
    pub fn apply<T>(&self, value: f32, target: &mut T)
    where
        T: Modulatable<Param = P> + ?Sized,
    {
        for binding in &self.bindings {
            target.set_param(binding.target, binding.map(value));
        }
    }
}

impl<P: Copy> Default for MacroControl<P> {
    fn default() -> Self {
        Self::new()
    }
}
