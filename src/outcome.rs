//! Outcome resolution: attack tables, spell rolls and armor mitigation
//!
//! All chances are in percent. Tables are single-roll: entries are laid out
//! in order and whatever pushes past 100% is truncated.

use crate::simulation::FastRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitOutcome {
    Miss,
    Dodge,
    Parry,
    Glance,
    Block,
    Crit,
    Crush,
    Hit,
}

impl HitOutcome {
    /// The attack connected (possibly partially)
    #[inline(always)]
    pub fn landed(self) -> bool {
        !matches!(self, HitOutcome::Miss | HitOutcome::Dodge | HitOutcome::Parry)
    }
}

/// Ordered single-roll table; unclaimed share is a normal hit
#[derive(Debug, Clone, PartialEq)]
pub struct AttackTable {
    entries: Vec<(HitOutcome, f64)>,
}

impl AttackTable {
    pub fn new(entries: Vec<(HitOutcome, f64)>) -> Self {
        let entries = entries.into_iter().map(|(o, c)| (o, c.max(0.0))).collect();
        Self { entries }
    }

    pub fn roll(&self, rng: &mut FastRng) -> HitOutcome {
        let r = rng.f64() * 100.0;
        let mut cumulative: f64 = 0.0;
        for &(outcome, chance) in &self.entries {
            cumulative += chance;
            if r < cumulative {
                return outcome;
            }
        }
        HitOutcome::Hit
    }

    /// Effective chance of an outcome after truncation at 100%
    pub fn chance(&self, outcome: HitOutcome) -> f64 {
        let mut cumulative: f64 = 0.0;
        let mut total = 0.0;
        for &(o, c) in &self.entries {
            let start = cumulative.min(100.0);
            cumulative += c;
            let end = cumulative.min(100.0);
            if o == outcome {
                total += end - start;
            }
        }
        if outcome == HitOutcome::Hit {
            total += (100.0 - cumulative).max(0.0);
        }
        total
    }
}

/// Inputs of the paladin's attacks against the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeAttacker {
    pub weapon_skill: f64,
    pub melee_hit: f64,
    pub melee_crit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeDefender {
    pub level: i32,
    pub can_dodge: bool,
    pub can_parry: bool,
}

/// Paladin melee against the target. `white` selects the auto attack table
/// which includes glancing blows.
pub fn player_melee_table(attacker: MeleeAttacker, defender: MeleeDefender, in_front: bool, white: bool) -> AttackTable {
    let diff = 5.0 * defender.level as f64 - attacker.weapon_skill;

    let (base_miss, hit) = if diff > 10.0 {
        (5.0 + diff * 0.2, (attacker.melee_hit - 1.0).max(0.0))
    } else {
        (5.0 + diff * 0.1, attacker.melee_hit)
    };
    let miss = (base_miss - hit).max(0.0);

    let dodge = if defender.can_dodge { 5.0 + diff * 0.1 } else { 0.0 };
    let parry = if in_front && defender.can_parry {
        if diff >= 15.0 {
            14.0
        } else {
            5.0 + diff * 0.1
        }
    } else {
        0.0
    };
    let glance = if white { 10.0 + diff.max(0.0) * 2.0 } else { 0.0 };
    let crit = attacker.melee_crit - diff.max(0.0) * 0.2;

    AttackTable::new(vec![
        (HitOutcome::Miss, miss),
        (HitOutcome::Dodge, dodge),
        (HitOutcome::Parry, parry),
        (HitOutcome::Glance, glance),
        (HitOutcome::Crit, crit),
    ])
}

/// Damage factor of a glancing blow for a given skill deficit
pub fn glancing_multiplier(skill_diff: f64) -> f64 {
    let low = (1.3 - 0.05 * skill_diff).clamp(0.01, 0.91);
    let high = (1.2 - 0.03 * skill_diff).clamp(0.2, 0.99);
    (low + high) / 2.0
}

/// Spell miss chance in percent, floored at 1%
pub fn spell_miss_chance(player_level: i32, target_level: i32, spell_hit: f64) -> f64 {
    let base = match target_level - player_level {
        i32::MIN..=0 => 4.0,
        1 => 5.0,
        2 => 6.0,
        _ => 17.0,
    };
    (base - spell_hit).max(1.0)
}

pub fn roll_spell(rng: &mut FastRng, miss: f64, crit: f64) -> HitOutcome {
    let r = rng.f64() * 100.0;
    if r < miss {
        return HitOutcome::Miss;
    }
    // Crit is rolled separately on landed spells
    if rng.f64() * 100.0 < crit {
        HitOutcome::Crit
    } else {
        HitOutcome::Hit
    }
}

/// Defensive stats of the paladin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defender {
    pub level: i32,
    pub defense: f64,
    pub dodge: f64,
    pub parry: f64,
    pub block: f64,
    pub resilience: f64,
    pub has_shield: bool,
}

/// Target melee against the paladin
pub fn incoming_melee_table(attacker_level: i32, defender: Defender) -> AttackTable {
    let attacker_skill = 5.0 * attacker_level as f64;
    let def_diff = defender.defense - attacker_skill;
    let adj = def_diff * 0.04;

    let miss = 5.0 + adj;
    let dodge = defender.dodge + adj;
    let parry = defender.parry + adj;
    let block = if defender.has_shield { defender.block + adj } else { 0.0 };
    let crit = (5.0 - adj).max(0.0) - defender.resilience;
    let crush = if attacker_level >= defender.level + 3 {
        let base_skill = 5.0 * defender.level as f64;
        ((attacker_skill - base_skill) * 2.0 - 15.0).max(0.0)
    } else {
        0.0
    };

    AttackTable::new(vec![
        (HitOutcome::Miss, miss),
        (HitOutcome::Dodge, dodge),
        (HitOutcome::Parry, parry),
        (HitOutcome::Block, block),
        (HitOutcome::Crit, crit),
        (HitOutcome::Crush, crush),
    ])
}

/// Share of physical damage removed by armor
pub fn armor_mitigation(armor: f64, attacker_level: i32) -> f64 {
    if armor <= 0.0 {
        return 0.0;
    }
    let l = attacker_level as f64;
    let effective_level = if attacker_level < 60 { l } else { l + 4.5 * (l - 59.0) };
    (armor / (armor + 400.0 + 85.0 * effective_level)).min(0.75)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boss() -> MeleeDefender {
        MeleeDefender { level: 63, can_dodge: true, can_parry: true }
    }

    #[test]
    fn boss_white_table_from_front() {
        let a = MeleeAttacker { weapon_skill: 300.0, melee_hit: 0.0, melee_crit: 10.0 };
        let t = player_melee_table(a, boss(), true, true);
        assert!((t.chance(HitOutcome::Miss) - 8.0).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Dodge) - 6.5).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Parry) - 14.0).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Glance) - 40.0).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Crit) - 7.0).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Hit) - 24.5).abs() < 1e-9);
    }

    #[test]
    fn behind_removes_parry_and_hit_has_one_point_suppressed() {
        let a = MeleeAttacker { weapon_skill: 300.0, melee_hit: 3.0, melee_crit: 5.0 };
        let t = player_melee_table(a, boss(), false, false);
        assert_eq!(t.chance(HitOutcome::Parry), 0.0);
        assert!((t.chance(HitOutcome::Miss) - 6.0).abs() < 1e-9);
        assert_eq!(t.chance(HitOutcome::Glance), 0.0);
    }

    #[test]
    fn table_truncates_at_hundred_percent() {
        let t = AttackTable::new(vec![(HitOutcome::Miss, 60.0), (HitOutcome::Dodge, 60.0), (HitOutcome::Crit, 10.0)]);
        assert!((t.chance(HitOutcome::Miss) - 60.0).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Dodge) - 40.0).abs() < 1e-9);
        assert_eq!(t.chance(HitOutcome::Crit), 0.0);
        assert_eq!(t.chance(HitOutcome::Hit), 0.0);

        let mut rng = FastRng::new(3);
        for _ in 0..500 {
            let o = t.roll(&mut rng);
            assert!(matches!(o, HitOutcome::Miss | HitOutcome::Dodge));
        }
    }

    #[test]
    fn incoming_table_against_level_60_tank() {
        let d = Defender {
            level: 60,
            defense: 300.0,
            dodge: 5.0,
            parry: 5.0,
            block: 5.0,
            resilience: 0.0,
            has_shield: true,
        };
        let t = incoming_melee_table(63, d);
        // defense 300 vs skill 315: -0.6% each
        assert!((t.chance(HitOutcome::Miss) - 4.4).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Block) - 4.4).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Crit) - 5.6).abs() < 1e-9);
        assert!((t.chance(HitOutcome::Crush) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn no_shield_no_block() {
        let d = Defender {
            level: 60,
            defense: 300.0,
            dodge: 5.0,
            parry: 5.0,
            block: 30.0,
            resilience: 0.0,
            has_shield: false,
        };
        assert_eq!(incoming_melee_table(60, d).chance(HitOutcome::Block), 0.0);
        assert_eq!(incoming_melee_table(60, d).chance(HitOutcome::Crush), 0.0);
    }

    #[test]
    fn armor_mitigation_formula_and_cap() {
        // 5500 = 400 + 85 * 60 for a level 59 attacker uses 400 + 85*59
        let m = armor_mitigation(5415.0, 59);
        assert!((m - 0.5).abs() < 1e-9);
        assert_eq!(armor_mitigation(1e9, 63), 0.75);
        assert_eq!(armor_mitigation(0.0, 63), 0.0);
        assert!(armor_mitigation(5000.0, 63) < armor_mitigation(5000.0, 60));
    }

    #[test]
    fn spell_miss_by_level_gap() {
        assert_eq!(spell_miss_chance(60, 60, 0.0), 4.0);
        assert_eq!(spell_miss_chance(60, 62, 0.0), 6.0);
        assert_eq!(spell_miss_chance(60, 63, 0.0), 17.0);
        assert_eq!(spell_miss_chance(60, 60, 10.0), 1.0);
    }

    #[test]
    fn glancing_penalty_grows_with_skill_gap() {
        assert!((glancing_multiplier(15.0) - 0.65).abs() < 1e-9);
        assert!(glancing_multiplier(0.0) > glancing_multiplier(10.0));
    }
}
