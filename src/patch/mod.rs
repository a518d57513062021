//! Parameter registry, macro controls and random patch generation.
//!
//! The engine is generic over the parameter identifier so it can drive any
//! [`Modulatable`] target; the synth plugs in its own parameter enum.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::graph::node::Modulatable;

pub mod macros;
pub mod random;

pub use macros::{MacroBinding, MacroControl};
pub use random::{weighted_control, weighted_random};

/// Number of macro controls per engine.
pub const MACRO_COUNT: usize = 2;
/// Parameters bound to each macro by random reassignment.
pub const DEFAULT_MACRO_PARAMETERS: usize = 2;

/// One registered, randomizable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<P> {
    pub name: &'static str,
    pub target: P,
    /// Value (0..=127) the random generator leans towards.
    pub preferred: f32,
    /// 0.0 = uniform, 1.0 = always `preferred`.
    pub weighting: f32,
    /// Eligible for random macro assignment.
    pub modulatable: bool,
    /// Last value set through the registry.
    pub current: f32,
}

impl<P> Parameter<P> {
    pub fn new(
        name: &'static str,
        target: P,
        preferred: f32,
        weighting: f32,
        modulatable: bool,
    ) -> Self {
        Self {
            name,
            target,
            preferred,
            weighting,
            modulatable,
            current: preferred,
        }
    }
}

pub struct PatchEngine<P> {
    parameters: Vec<Parameter<P>>,
    macros: [MacroControl<P>; MACRO_COUNT],
    macro_parameters: usize,
    candidates: Vec<usize>,
    rng: StdRng,
}

impl<P: Copy + PartialEq> PatchEngine<P> {
    /// `seed` makes patch generation reproducible; `None` seeds from the OS.
    pub fn new(parameters: Vec<Parameter<P>>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let capacity = parameters.len();

        Self {
            parameters,
            macros: std::array::from_fn(|_| MacroControl::with_capacity(capacity)),
            macro_parameters: DEFAULT_MACRO_PARAMETERS,
            candidates: Vec::with_capacity(capacity),
            rng,
        }
    }

    /// Replace the macro bindings, e.g. with the instrument's defaults.
    pub fn with_macros(mut self, macros: [MacroControl<P>; MACRO_COUNT]) -> Self {
        self.macros = macros;
        self
    }

    /// How many parameters random reassignment binds to each macro.
    pub fn with_macro_parameters(mut self, count: usize) -> Self {
        self.macro_parameters = count;
        self
    }

    pub fn parameters(&self) -> &[Parameter<P>] {
        &self.parameters
    }

    pub fn parameter(&self, index: usize) -> Option<&Parameter<P>> {
        self.parameters.get(index)
    }

    pub fn index_of(&self, target: P) -> Option<usize> {
        self.parameters.iter().position(|p| p.target == target)
    }

    pub fn macro_control(&self, index: usize) -> Option<&MacroControl<P>> {
        self.macros.get(index)
    }

    /// Set one registered parameter and remember the value.
    pub fn set_parameter<T>(&mut self, index: usize, value: f32, target: &mut T)
    where
        T: Modulatable<Param = P> + ?Sized,
    {
        let Some(parameter) = self.parameters.get_mut(index) else {
            tracing::debug!(index, "no such parameter");
            return;
        };
        let value = value.clamp(0.0, 127.0);
        parameter.current = value;
        target.set_param(parameter.target, value);
    }

    /// Push every parameter's preferred value to `target`.
    pub fn apply_preferred<T>(&mut self, target: &mut T)
    where
        T: Modulatable<Param = P> + ?Sized,
    {
        for parameter in self.parameters.iter_mut() {
            parameter.current = parameter.preferred;
            target.set_param(parameter.target, parameter.preferred);
        }
    }

    /// Drive macro `index` with a 0..=127 value. Unknown macros are ignored.
    pub fn apply_macro<T>(&self, index: usize, value: f32, target: &mut T)
    where
        T: Modulatable<Param = P> + ?Sized,
    {
        match self.macros.get(index) {
            Some(control) => control.apply(value, target),
            None => tracing::debug!(index, "no such macro"),
        }
    }

    /// Draw a fresh value for every parameter, then rebind the macros.
    pub fn randomize<T>(&mut self, target: &mut T)
    where
        T: Modulatable<Param = P> + ?Sized,
    {
        for parameter in self.parameters.iter_mut() {
            let value = weighted_control(&mut self.rng, parameter.preferred, parameter.weighting);
            parameter.current = value;
            target.set_param(parameter.target, value);
        }
        self.assign_random_macros();
        tracing::info!(parameters = self.parameters.len(), "generated random patch");
    }

    /// Rebind each macro to distinct random modulatable parameters.
    ///
    /// The first macro sweeps from each parameter's current value up to 127,
    /// the second across the full range. Existing bindings are discarded.
    pub fn assign_random_macros(&mut self) {
        self.candidates.clear();
        self.candidates.extend(
            self.parameters
                .iter()
                .enumerate()
                .filter(|(_, p)| p.modulatable)
                .map(|(i, _)| i),
        );

        for (slot, control) in self.macros.iter_mut().enumerate() {
            control.clear();
            let picks = self.macro_parameters.min(self.candidates.len());

            // Partial Fisher-Yates: the first `picks` entries become the draw.
            for i in 0..picks {
                let j = self.rng.gen_range(i..self.candidates.len());
                self.candidates.swap(i, j);

                let parameter = &self.parameters[self.candidates[i]];
                let low = if slot == 0 { parameter.current } else { 0.0 };
                control.add_control(parameter.target, low, 127.0);
            }
        }
    }
}
