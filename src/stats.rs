//! Per-iteration results and their aggregation across trials

use serde::Serialize;
use std::collections::BTreeMap;

use crate::outcome::HitOutcome;
use crate::spells::Ability;

/// Damage and threat done by one ability in one iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AbilityStats {
    pub casts: u32,
    pub hits: u32,
    pub crits: u32,
    pub misses: u32,
    pub damage: f64,
    pub threat: f64,
}

/// How the target's swings against the paladin resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutcomeCounts {
    pub miss: u32,
    pub dodge: u32,
    pub parry: u32,
    pub block: u32,
    pub crit: u32,
    pub crush: u32,
    pub hit: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: HitOutcome) {
        match outcome {
            HitOutcome::Miss => self.miss += 1,
            HitOutcome::Dodge => self.dodge += 1,
            HitOutcome::Parry => self.parry += 1,
            HitOutcome::Block => self.block += 1,
            HitOutcome::Crit => self.crit += 1,
            HitOutcome::Crush => self.crush += 1,
            HitOutcome::Hit | HitOutcome::Glance => self.hit += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.miss + self.dodge + self.parry + self.block + self.crit + self.crush + self.hit
    }
}

/// Result of one simulated fight
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimResult {
    pub seed: u64,
    /// Rolled fight length
    pub duration: f64,
    /// Seconds actually simulated; shorter than `duration` on death
    pub elapsed: f64,
    pub damage_done: f64,
    pub threat: f64,
    pub damage_taken: f64,
    pub healing_received: f64,
    pub mana_spent: f64,
    pub abilities: [AbilityStats; Ability::COUNT],
    pub incoming: OutcomeCounts,
    /// Most damage taken inside any burst window
    pub max_burst_damage: f64,
    pub death_time: Option<f64>,
}

impl SimResult {
    fn per_second(&self, total: f64) -> f64 {
        if self.elapsed > 0.0 {
            total / self.elapsed
        } else {
            0.0
        }
    }

    pub fn dps(&self) -> f64 {
        self.per_second(self.damage_done)
    }

    pub fn tps(&self) -> f64 {
        self.per_second(self.threat)
    }

    pub fn dtps(&self) -> f64 {
        self.per_second(self.damage_taken)
    }

    pub fn hps(&self) -> f64 {
        self.per_second(self.healing_received)
    }

    pub fn survived(&self) -> bool {
        self.death_time.is_none()
    }

    pub fn ability(&self, ability: Ability) -> &AbilityStats {
        &self.abilities[ability as usize]
    }

    pub fn ability_mut(&mut self, ability: Ability) -> &mut AbilityStats {
        &mut self.abilities[ability as usize]
    }
}

/// Mean, standard deviation and range of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { mean, std: variance.sqrt(), min, max }
    }
}

/// Mean outcome counts per iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MeanOutcomes {
    pub miss: f64,
    pub dodge: f64,
    pub parry: f64,
    pub block: f64,
    pub crit: f64,
    pub crush: f64,
    pub hit: f64,
}

/// Statistics over many iterations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub iterations: usize,
    pub dps: Summary,
    pub tps: Summary,
    pub dtps: Summary,
    pub hps: Summary,
    /// Share of iterations the paladin survived, 0..=1
    pub survival_rate: f64,
    pub avg_duration: f64,
    pub avg_max_burst: f64,
    pub avg_mana_spent: f64,
    /// Mean damage per iteration keyed by ability name; abilities that never
    /// dealt damage are left out
    pub ability_damage: BTreeMap<String, f64>,
    pub ability_casts: BTreeMap<String, f64>,
    pub incoming: MeanOutcomes,
}

impl AggregatedStats {
    pub fn from_results(results: &[SimResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let mean = |f: &dyn Fn(&SimResult) -> f64| results.iter().map(f).sum::<f64>() / n;

        let mut ability_damage = BTreeMap::new();
        let mut ability_casts = BTreeMap::new();
        for ability in Ability::ALL {
            let damage = mean(&|r| r.ability(ability).damage);
            let casts = mean(&|r| r.ability(ability).casts as f64);
            if damage > 0.0 {
                ability_damage.insert(ability.name().to_string(), damage);
            }
            if casts > 0.0 {
                ability_casts.insert(ability.name().to_string(), casts);
            }
        }

        let incoming = MeanOutcomes {
            miss: mean(&|r| r.incoming.miss as f64),
            dodge: mean(&|r| r.incoming.dodge as f64),
            parry: mean(&|r| r.incoming.parry as f64),
            block: mean(&|r| r.incoming.block as f64),
            crit: mean(&|r| r.incoming.crit as f64),
            crush: mean(&|r| r.incoming.crush as f64),
            hit: mean(&|r| r.incoming.hit as f64),
        };

        Self {
            iterations: results.len(),
            dps: Summary::from_values(results.iter().map(SimResult::dps)),
            tps: Summary::from_values(results.iter().map(SimResult::tps)),
            dtps: Summary::from_values(results.iter().map(SimResult::dtps)),
            hps: Summary::from_values(results.iter().map(SimResult::hps)),
            survival_rate: results.iter().filter(|r| r.survived()).count() as f64 / n,
            avg_duration: mean(&|r| r.elapsed),
            avg_max_burst: mean(&|r| r.max_burst_damage),
            avg_mana_spent: mean(&|r| r.mana_spent),
            ability_damage,
            ability_casts,
            incoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(damage: f64, elapsed: f64, died: bool) -> SimResult {
        let mut r = SimResult { duration: 100.0, elapsed, damage_done: damage, ..Default::default() };
        r.ability_mut(Ability::MeleeSwing).damage = damage;
        r.ability_mut(Ability::MeleeSwing).casts = 10;
        if died {
            r.death_time = Some(elapsed);
        }
        r
    }

    #[test]
    fn summary_of_known_values() {
        let s = Summary::from_values([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std, 2.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn aggregates_rates_and_survival() {
        let results = vec![result(1000.0, 100.0, false), result(1500.0, 50.0, true)];
        let agg = AggregatedStats::from_results(&results);
        assert_eq!(agg.iterations, 2);
        assert_eq!(agg.dps.mean, 20.0);
        assert_eq!(agg.dps.min, 10.0);
        assert_eq!(agg.dps.max, 30.0);
        assert_eq!(agg.survival_rate, 0.5);
        assert_eq!(agg.ability_damage.get("Melee"), Some(&1250.0));
        assert!(!agg.ability_damage.contains_key("Exorcism"));
    }

    #[test]
    fn zero_elapsed_yields_zero_rates() {
        let r = SimResult::default();
        assert_eq!(r.dps(), 0.0);
        assert_eq!(r.dtps(), 0.0);
    }

    #[test]
    fn empty_input_is_default() {
        assert_eq!(AggregatedStats::from_results(&[]), AggregatedStats::default());
    }

    #[test]
    fn outcome_counts_fold_glances_into_hits() {
        let mut c = OutcomeCounts::default();
        c.record(HitOutcome::Glance);
        c.record(HitOutcome::Block);
        c.record(HitOutcome::Crush);
        assert_eq!(c.hit, 1);
        assert_eq!(c.block, 1);
        assert_eq!(c.total(), 3);
    }
}
