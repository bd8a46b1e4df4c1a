//! Equivalence points: stat weights for ranking gear
//!
//! Weights are only used to compare items. Combat never reads them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::character::Paladin;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::gear::Item;
use crate::simulation::{base_seed, PreparedSim};
use crate::stats::SimResult;
use crate::unit_stats::{PseudoStat, Stat, Stats};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatWeights {
    pub stats: BTreeMap<Stat, f64>,
    pub pseudo: BTreeMap<PseudoStat, f64>,
}

impl StatWeights {
    pub fn new(stats: &[(Stat, f64)], pseudo: &[(PseudoStat, f64)]) -> Self {
        Self {
            stats: stats.iter().copied().collect(),
            pseudo: pseudo.iter().copied().collect(),
        }
    }

    pub fn weight(&self, stat: Stat) -> f64 {
        self.stats.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn pseudo_weight(&self, stat: PseudoStat) -> f64 {
        self.pseudo.get(&stat).copied().unwrap_or(0.0)
    }

    /// Weighted sum of `stats`
    pub fn ep(&self, stats: &Stats) -> f64 {
        stats.iter_nonzero().map(|(s, v)| self.weight(s) * v).sum()
    }

    /// Weighted sum including pseudo stat values
    pub fn ep_with_pseudo(&self, stats: &Stats, pseudo: &[(PseudoStat, f64)]) -> f64 {
        self.ep(stats) + pseudo.iter().map(|(s, v)| self.pseudo_weight(*s) * v).sum::<f64>()
    }

    /// EP of an item; weapons also count their damage per second
    pub fn item_ep(&self, item: &Item) -> f64 {
        let pseudo: Vec<(PseudoStat, f64)> = item
            .weapon
            .map(|w| vec![(PseudoStat::MainHandDps, w.dps())])
            .unwrap_or_default();
        self.ep_with_pseudo(&item.stats, &pseudo)
    }
}

/// Items by descending EP
pub fn rank_items<'a>(items: &'a [Item], weights: &StatWeights) -> Vec<(&'a Item, f64)> {
    let mut ranked: Vec<(&Item, f64)> = items.iter().map(|i| (i, weights.item_ep(i))).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Metric a stat weight measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpMetric {
    Dps,
    Tps,
    Dtps,
}

impl EpMetric {
    /// Per-iteration value where larger is better
    fn score(self, r: &SimResult) -> f64 {
        match self {
            EpMetric::Dps => r.dps(),
            EpMetric::Tps => r.tps(),
            EpMetric::Dtps => -r.dtps(),
        }
    }
}

/// Stat or pseudo stat being perturbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Perturbation {
    Stat(Stat),
    Pseudo(PseudoStat),
}

/// Step added for each perturbed stat; large enough to rise above noise
pub fn stat_increment(stat: Stat) -> f64 {
    match stat {
        Stat::Strength | Stat::Agility | Stat::Stamina | Stat::Intellect | Stat::Spirit => 50.0,
        Stat::AttackPower | Stat::RangedAttackPower => 100.0,
        Stat::SpellPower | Stat::HolyPower | Stat::HealingPower | Stat::SpellDamage => 50.0,
        Stat::MeleeHit
        | Stat::SpellHit
        | Stat::MeleeCrit
        | Stat::SpellCrit
        | Stat::MeleeHaste
        | Stat::Block
        | Stat::Dodge
        | Stat::Parry => 2.0,
        Stat::Armor | Stat::BonusArmor => 500.0,
        Stat::Defense => 20.0,
        Stat::BlockValue => 50.0,
        Stat::Resilience => 10.0,
        Stat::Health | Stat::Mana => 500.0,
        Stat::Mp5 => 20.0,
        Stat::ArcaneResistance
        | Stat::FireResistance
        | Stat::FrostResistance
        | Stat::NatureResistance
        | Stat::ShadowResistance => 50.0,
    }
}

pub fn pseudo_increment(stat: PseudoStat) -> f64 {
    match stat {
        PseudoStat::MainHandDps => 5.0,
        PseudoStat::MeleeSpeedMultiplier => 0.05,
    }
}

fn increment(p: Perturbation) -> f64 {
    match p {
        Perturbation::Stat(s) => stat_increment(s),
        Perturbation::Pseudo(s) => pseudo_increment(s),
    }
}

fn mean_score(sim: &PreparedSim, seed: u64, iterations: usize, metric: EpMetric) -> f64 {
    let results = sim.run_sequential(seed, iterations);
    results.iter().map(|r| metric.score(r)).sum::<f64>() / iterations.max(1) as f64
}

fn perturbed(config: &SimConfig, p: Perturbation) -> Result<PreparedSim> {
    match p {
        Perturbation::Stat(stat) => {
            let mut config = config.clone();
            config.player.bonus_stats[stat] += stat_increment(stat);
            PreparedSim::new(&config)
        }
        Perturbation::Pseudo(stat) => {
            let mut paladin = Paladin::from_config(&config.player)?;
            let inc = pseudo_increment(stat);
            match stat {
                PseudoStat::MainHandDps => {
                    let extra = inc * paladin.weapon.speed;
                    paladin.weapon.min_damage += extra;
                    paladin.weapon.max_damage += extra;
                }
                PseudoStat::MeleeSpeedMultiplier => {
                    paladin.stats[Stat::MeleeHaste] += 100.0 * inc;
                }
            }
            let encounter = config.encounter.resolve(config.player.level)?;
            let apl = config.player.resolve_rotation()?;
            Ok(PreparedSim::from_parts(paladin, encounter, apl, &config.player.debuffs))
        }
    }
}

/// Simulate a baseline and one variant per stat with the same seeds, then
/// express each stat's gain per point relative to `reference`.
pub fn compute_stat_weights(
    config: &SimConfig,
    ep_stats: &[Stat],
    ep_pseudo_stats: &[PseudoStat],
    reference: Stat,
    metric: EpMetric,
    iterations: usize,
) -> Result<StatWeights> {
    let seed = base_seed(config);
    let iterations = iterations.max(1);
    info!(iterations, ?metric, ?reference, stats = ep_stats.len(), "computing stat weights");

    let baseline = mean_score(&PreparedSim::new(config)?, seed, iterations, metric);

    let mut perturbations: Vec<Perturbation> = ep_stats.iter().map(|s| Perturbation::Stat(*s)).collect();
    if !ep_stats.contains(&reference) {
        perturbations.push(Perturbation::Stat(reference));
    }
    perturbations.extend(ep_pseudo_stats.iter().map(|s| Perturbation::Pseudo(*s)));

    let gains: Vec<(Perturbation, f64)> = perturbations
        .par_iter()
        .map(|&p| -> Result<(Perturbation, f64)> {
            let sim = perturbed(config, p)?;
            let gain = (mean_score(&sim, seed, iterations, metric) - baseline) / increment(p);
            debug!(perturbation = ?p, gain, "stat gain");
            Ok((p, gain))
        })
        .collect::<Result<Vec<_>>>()?;

    let reference_gain = gains
        .iter()
        .find(|(p, _)| *p == Perturbation::Stat(reference))
        .map(|(_, g)| *g)
        .unwrap_or(0.0);
    if reference_gain.abs() < 1e-9 {
        return Err(SimError::DegenerateReferenceStat(reference));
    }

    let mut weights = StatWeights::default();
    for (p, gain) in gains {
        match p {
            Perturbation::Stat(s) if s == reference => {
                weights.stats.insert(s, 1.0);
            }
            Perturbation::Stat(s) if ep_stats.contains(&s) => {
                weights.stats.insert(s, gain / reference_gain);
            }
            Perturbation::Stat(_) => {}
            Perturbation::Pseudo(s) => {
                weights.pseudo.insert(s, gain / reference_gain);
            }
        }
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::{HandType, ItemSlot};

    fn weights() -> StatWeights {
        StatWeights::new(
            &[(Stat::Stamina, 2.0), (Stat::Defense, 1.5), (Stat::Strength, 0.5)],
            &[(PseudoStat::MainHandDps, 3.0)],
        )
    }

    #[test]
    fn ep_is_weighted_sum() {
        let s = Stats::from_pairs(&[(Stat::Stamina, 10.0), (Stat::Defense, 4.0), (Stat::Intellect, 100.0)]);
        assert_eq!(weights().ep(&s), 26.0);
    }

    #[test]
    fn weapon_dps_counts_toward_item_ep() {
        let sword = Item::new(1, "Sword", ItemSlot::MainHand, &[(Stat::Strength, 10.0)])
            .with_weapon(40.0, 60.0, 2.0, HandType::OneHand);
        assert_eq!(weights().item_ep(&sword), 5.0 + 3.0 * 25.0);
    }

    #[test]
    fn ranks_items_by_descending_ep() {
        let items = vec![
            Item::new(1, "Cloth", ItemSlot::Head, &[(Stat::Strength, 10.0)]),
            Item::new(2, "Plate", ItemSlot::Head, &[(Stat::Stamina, 10.0)]),
            Item::new(3, "Mail", ItemSlot::Head, &[(Stat::Defense, 10.0)]),
        ];
        let ranked: Vec<u32> = rank_items(&items, &weights()).iter().map(|(i, _)| i.id).collect();
        assert_eq!(ranked, vec![2, 3, 1]);
    }

    #[test]
    fn reference_stat_weighs_one() {
        let config = SimConfig { seed: Some(3), ..Default::default() };
        let w = compute_stat_weights(
            &config,
            &[Stat::Strength, Stat::AttackPower],
            &[],
            Stat::AttackPower,
            EpMetric::Dps,
            20,
        )
        .unwrap();
        assert_eq!(w.weight(Stat::AttackPower), 1.0);
        assert!(w.weight(Stat::Strength) > 0.0);
    }

    #[test]
    fn reference_without_effect_is_an_error() {
        let mut config = SimConfig { seed: Some(3), ..Default::default() };
        config.player.other.tank_assignment = 1;
        let err = compute_stat_weights(&config, &[], &[], Stat::Dodge, EpMetric::Dtps, 5).unwrap_err();
        assert!(matches!(err, SimError::DegenerateReferenceStat(Stat::Dodge)));
    }
}
