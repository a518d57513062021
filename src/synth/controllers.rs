use crate::{io::midi::cc, synth::params::SynthParam};

/// Where a control change is routed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRoute {
    Parameter(SynthParam),
    Macro(usize),
    Volume,
    /// Generate a random patch when the value crosses into the upper half.
    RandomPatch,
}

/// Controller number → route, one entry per CC.
pub struct ControllerMap {
    routes: [Option<ControlRoute>; 128],
}

impl ControllerMap {
    pub fn empty() -> Self {
        Self {
            routes: [None; 128],
        }
    }

    pub fn bind(&mut self, controller: u8, route: ControlRoute) {
        if let Some(slot) = self.routes.get_mut(controller as usize) {
            *slot = Some(route);
        }
    }

    pub fn unbind(&mut self, controller: u8) {
        if let Some(slot) = self.routes.get_mut(controller as usize) {
            *slot = None;
        }
    }

    pub fn route(&self, controller: u8) -> Option<ControlRoute> {
        self.routes.get(controller as usize).copied().flatten()
    }
}

impl Default for ControllerMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(cc::MODULATION_WHEEL, ControlRoute::Macro(0));
        map.bind(cc::BREATH_CONTROLLER, ControlRoute::Macro(1));
        map.bind(cc::VOLUME, ControlRoute::Volume);
        map.bind(cc::SOUND_CONTROLLER_1, ControlRoute::Parameter(SynthParam::SourceBlend));
        map.bind(cc::SOUND_CONTROLLER_2, ControlRoute::Parameter(SynthParam::FilterResonance));
        map.bind(cc::SOUND_CONTROLLER_3, ControlRoute::Parameter(SynthParam::AmpRelease));
        map.bind(cc::SOUND_CONTROLLER_4, ControlRoute::Parameter(SynthParam::AmpAttack));
        map.bind(cc::SOUND_CONTROLLER_5, ControlRoute::Parameter(SynthParam::FilterFrequency));
        map.bind(cc::GENERAL_PURPOSE_1, ControlRoute::RandomPatch);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_routes_mod_wheel_to_first_macro() {
        let map = ControllerMap::default();
        assert_eq!(map.route(cc::MODULATION_WHEEL), Some(ControlRoute::Macro(0)));
        assert_eq!(map.route(cc::EXPRESSION), None);
    }

    #[test]
    fn bindings_can_be_replaced() {
        let mut map = ControllerMap::default();
        map.bind(cc::EXPRESSION, ControlRoute::Volume);
        map.unbind(cc::VOLUME);
        assert_eq!(map.route(cc::EXPRESSION), Some(ControlRoute::Volume));
        assert_eq!(map.route(cc::VOLUME), None);
        assert_eq!(map.route(200), None);
    }
}
