//! Validated simulation context shared by every builder.

use qm_alloy::{AlloyComposition, ConfigOverrides, KineticsModel, SimulationConfig};
use qm_kinetics::{Milestone, Phase, PhaseIntegralTable, TorrEvaluator};

use crate::ccr::{self, CriticalCoolingRates};
use crate::cct::{self, CctOptions};
use crate::cooling::{self, ConstantRate, CoolingOptions, CoolingResult};
use crate::curve::DiagramResult;
use crate::error::{SimulationError, SimulationResult};
use crate::scheduler::Scheduler;
use crate::ttt;

/// Composition, configuration and the kinetics derived from them.
///
/// Immutable once built; builders borrow it, so concurrent tasks share one
/// integral table.
#[derive(Debug, Clone)]
pub struct Simulation {
    composition: AlloyComposition,
    config: SimulationConfig,
    table: PhaseIntegralTable,
    torr: TorrEvaluator,
}

impl Simulation {
    /// Validate `config` and integrate the kinetics kernels once.
    pub fn new(composition: AlloyComposition, config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let table = PhaseIntegralTable::build(&composition, &config)?;
        let torr = TorrEvaluator::new(&composition, &config, &table);
        Ok(Self {
            composition,
            config,
            table,
            torr,
        })
    }

    /// Derive the configuration from the composition, then build.
    pub fn from_composition(
        composition: AlloyComposition,
        model: KineticsModel,
        overrides: &ConfigOverrides,
    ) -> SimulationResult<Self> {
        let config = SimulationConfig::from_composition(&composition, model, overrides)?;
        Self::new(composition, config)
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    pub fn composition(&self) -> &AlloyComposition {
        &self.composition
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn integral_table(&self) -> &PhaseIntegralTable {
        &self.table
    }

    pub fn torr_evaluator(&self) -> &TorrEvaluator {
        &self.torr
    }

    /// Isothermal time [s] to reach `milestone` of `phase` at `temp_c`.
    pub fn torr(&self, phase: Phase, milestone: Milestone, temp_c: f64) -> f64 {
        self.torr.torr(phase, milestone, temp_c)
    }

    /// `[lower, upper)` [degC] in which `phase` forms.
    pub fn window(&self, phase: Phase) -> Option<(f64, f64)> {
        self.torr.window(phase)
    }

    pub fn ttt<S: Scheduler>(&self, scheduler: &S) -> SimulationResult<DiagramResult> {
        ttt::build_ttt(self, scheduler)
    }

    pub fn critical_cooling_rates<S: Scheduler>(
        &self,
        scheduler: &S,
    ) -> SimulationResult<CriticalCoolingRates> {
        ccr::critical_cooling_rates(self, scheduler)
    }

    pub fn cct<S: Scheduler>(
        &self,
        scheduler: &S,
        options: &CctOptions,
    ) -> SimulationResult<DiagramResult> {
        cct::build_cct(self, scheduler, options)
    }

    /// Phase fractions along a constant-rate cooling from the peak temperature.
    pub fn cool(&self, options: &CoolingOptions) -> SimulationResult<CoolingResult> {
        let path = ConstantRate::new(self.config.peak_temperature, self.config.cooling_rate)?;
        let trace = cooling::integrate_phase_fractions(self, &path, options)?;
        Ok(CoolingResult::from_trace(&trace))
    }
}

/// Step-wise construction of a [`Simulation`].
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    composition: Option<AlloyComposition>,
    config: Option<SimulationConfig>,
}

impl SimulationBuilder {
    pub fn composition(mut self, composition: AlloyComposition) -> Self {
        self.composition = Some(composition);
        self
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> SimulationResult<Simulation> {
        let config = self.config.ok_or(SimulationError::MissingConfig)?;
        let composition = self.composition.ok_or(SimulationError::MissingComposition)?;
        Simulation::new(composition, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> AlloyComposition {
        AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)])
            .unwrap()
    }

    #[test]
    fn builder_requires_config() {
        let err = Simulation::builder()
            .composition(scenario())
            .build()
            .unwrap_err();
        assert_eq!(err, SimulationError::MissingConfig);
    }

    #[test]
    fn builder_requires_composition() {
        let config = SimulationConfig::from_composition(
            &scenario(),
            KineticsModel::Li98,
            &ConfigOverrides::default(),
        )
        .unwrap();
        let err = Simulation::builder().config(config).build().unwrap_err();
        assert_eq!(err, SimulationError::MissingComposition);
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let mut config = SimulationConfig::from_composition(
            &scenario(),
            KineticsModel::Li98,
            &ConfigOverrides::default(),
        )
        .unwrap();
        config.nucleation_finish_fraction = 0.001;
        let err = Simulation::new(scenario(), config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn torr_delegates() {
        let sim = Simulation::from_composition(
            scenario(),
            KineticsModel::Li98,
            &ConfigOverrides::default(),
        )
        .unwrap();
        let t = 650.0;
        assert_eq!(
            sim.torr(Phase::Ferrite, Milestone::Start, t),
            sim.torr_evaluator().torr(Phase::Ferrite, Milestone::Start, t)
        );
        assert_eq!(sim.integral_table().model(), KineticsModel::Li98);
    }
}
