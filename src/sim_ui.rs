//! Headless UI controller: one per player, bound to a spec's static config

use tracing::debug;

use crate::character::Paladin;
use crate::config::SimConfig;
use crate::encounter::EncounterConfig;
use crate::ep::{compute_stat_weights, EpMetric, StatWeights};
use crate::error::Result;
use crate::player::Player;
use crate::player_data::Spec;
use crate::simulation::run_and_aggregate;
use crate::spec_config::SpecConfig;
use crate::stats::AggregatedStats;
use crate::unit_stats::Stat;

/// Opaque handle of the container the UI renders into
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentHandle(pub String);

impl From<&str> for ParentHandle {
    fn from(id: &str) -> Self {
        ParentHandle(id.to_string())
    }
}

/// What every spec's UI controller offers
pub trait SimUi {
    fn spec(&self) -> Spec;
    fn player(&self) -> &Player;
    fn player_mut(&mut self) -> &mut Player;
    fn spec_config(&self) -> &'static SpecConfig;

    /// Non-empty warning texts for the current player state
    fn warnings(&mut self) -> Vec<String>;

    fn run_simulation(&self, iterations: usize, parallel: bool) -> Result<AggregatedStats>;

    fn compute_ep(&self, metric: EpMetric, iterations: usize) -> Result<StatWeights>;
}

#[derive(Debug)]
struct WarningCache {
    generation: u64,
    contents: Vec<String>,
}

/// Generic controller; spec UIs wrap it with their own config
#[derive(Debug)]
pub struct IndividualSimUi {
    parent: ParentHandle,
    spec: Spec,
    player: Player,
    config: &'static SpecConfig,
    encounter: EncounterConfig,
    seed: Option<u64>,
    warning_cache: Option<WarningCache>,
}

impl IndividualSimUi {
    pub fn new(parent: ParentHandle, spec: Spec, player: Player, config: &'static SpecConfig) -> Self {
        Self {
            parent,
            spec,
            player,
            config,
            encounter: EncounterConfig::default(),
            seed: None,
            warning_cache: None,
        }
    }

    pub fn parent(&self) -> &ParentHandle {
        &self.parent
    }

    pub fn encounter(&self) -> &EncounterConfig {
        &self.encounter
    }

    pub fn set_encounter(&mut self, encounter: EncounterConfig) {
        self.encounter = encounter;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Simulation input for the current player and encounter
    pub fn sim_config(&self, iterations: usize) -> SimConfig {
        let mut config = self.player.to_sim_config(self.encounter.clone());
        config.iterations = iterations.max(1);
        config.seed = self.seed;
        config
    }

    /// Values of the spec's display stats for the current build
    pub fn character_stats(&self) -> Result<Vec<(Stat, f64)>> {
        let paladin = Paladin::from_config(self.player.config())?;
        Ok(self.config.display_stats.iter().map(|&s| (s, paladin.stat(s))).collect())
    }
}

impl SimUi for IndividualSimUi {
    fn spec(&self) -> Spec {
        self.spec
    }

    fn player(&self) -> &Player {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    fn spec_config(&self) -> &'static SpecConfig {
        self.config
    }

    fn warnings(&mut self) -> Vec<String> {
        let generation = self.player.change_emitter().generation();
        if let Some(cache) = &self.warning_cache {
            if cache.generation == generation {
                return cache.contents.clone();
            }
        }
        let contents: Vec<String> = self
            .config
            .warnings
            .iter()
            .map(|w| (w.get_content)(&self.player))
            .filter(|c| !c.is_empty())
            .collect();
        debug!(generation, count = contents.len(), "warnings re-evaluated");
        self.warning_cache = Some(WarningCache { generation, contents: contents.clone() });
        contents
    }

    fn run_simulation(&self, iterations: usize, parallel: bool) -> Result<AggregatedStats> {
        let config = self.sim_config(iterations);
        config.validate()?;
        run_and_aggregate(&config, config.iterations, parallel)
    }

    fn compute_ep(&self, metric: EpMetric, iterations: usize) -> Result<StatWeights> {
        let config = self.sim_config(iterations);
        config.validate()?;
        compute_stat_weights(
            &config,
            &self.config.ep_stats,
            &self.config.ep_pseudo_stats,
            self.config.ep_reference_stat,
            metric,
            config.iterations,
        )
    }
}
