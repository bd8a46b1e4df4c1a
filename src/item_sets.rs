//! Item set bonuses
//!
//! Static bonuses are folded into character stats; proc-style bonuses become
//! flags on [`SetBonuses`] that the combat loop consults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::unit_stats::{Stat, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSet {
    ObsessedProphetsPlate,
    EmeraldEncrustedBattleplate,
    SoulforgeArmor,
    LawbringerRadiance,
    LawbringerWill,
    FreethinkersArmor,
    MercifulJudgement,
    WilfullJudgement,
    RadiantJudgement,
}

impl ItemSet {
    pub fn name(self) -> &'static str {
        match self {
            ItemSet::ObsessedProphetsPlate => "Obsessed Prophet's Plate",
            ItemSet::EmeraldEncrustedBattleplate => "Emerald Encrusted Battleplate",
            ItemSet::SoulforgeArmor => "Soulforge Armor",
            ItemSet::LawbringerRadiance => "Lawbringer Radiance",
            ItemSet::LawbringerWill => "Lawbringer Will",
            ItemSet::FreethinkersArmor => "Freethinker's Armor",
            ItemSet::MercifulJudgement => "Merciful Judgement",
            ItemSet::WilfullJudgement => "Wilfull Judgement",
            ItemSet::RadiantJudgement => "Radiant Judgement",
        }
    }
}

/// Active set bonuses for one character
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetBonuses {
    /// Flat stats from all active static bonuses
    pub stats: Stats,
    /// Bonus holy crit chance in percent
    pub holy_crit_bonus: f64,

    pub crusaders_wrath: bool,
    pub seal_linger: bool,
    pub bastion_of_light: bool,
    pub holy_shield_uncharged: bool,
    pub holy_shock_damage_mult: f64,
    pub holy_shock_crit_bonus: f64,
    pub exorcism_cooldown_reduction: f64,
    pub consecration_damage_mult: f64,
    pub holy_shield_enhanced: bool,
    pub holy_shield_damage_reduction: bool,
    pub reckoning_on_block: bool,
    pub judgement_damage_mult: f64,
    pub seals_not_consumed: bool,
    pub judgement_reset_on_new_seal: bool,
    pub swift_judgement: bool,
}

impl SetBonuses {
    pub fn from_counts(counts: &BTreeMap<ItemSet, i32>) -> Self {
        let mut b = SetBonuses {
            holy_shock_damage_mult: 1.0,
            consecration_damage_mult: 1.0,
            judgement_damage_mult: 1.0,
            ..Default::default()
        };
        let has = |set: ItemSet, pieces: i32| counts.get(&set).copied().unwrap_or(0) >= pieces;

        if has(ItemSet::ObsessedProphetsPlate, 2) {
            b.stats.add_stat(Stat::MeleeCrit, 1.0);
            b.stats.add_stat(Stat::SpellCrit, 1.0);
        }
        if has(ItemSet::ObsessedProphetsPlate, 3) {
            b.holy_crit_bonus += 3.0;
        }

        if has(ItemSet::EmeraldEncrustedBattleplate, 3) {
            b.stats.add_stat(Stat::Stamina, 10.0);
        }
        if has(ItemSet::EmeraldEncrustedBattleplate, 6) {
            b.stats.add_stat(Stat::HealingPower, 22.0);
        }

        if has(ItemSet::SoulforgeArmor, 2) {
            b.stats.add_stat(Stat::AttackPower, 40.0);
            b.stats.add_stat(Stat::RangedAttackPower, 40.0);
            b.stats.add_stat(Stat::HealingPower, 40.0);
        }
        b.crusaders_wrath = has(ItemSet::SoulforgeArmor, 4);
        if has(ItemSet::SoulforgeArmor, 6) {
            for r in Stat::resistances() {
                b.stats.add_stat(r, 8.0);
            }
        }
        if has(ItemSet::SoulforgeArmor, 8) {
            b.stats.add_stat(Stat::Armor, 200.0);
        }

        if has(ItemSet::LawbringerRadiance, 4) {
            b.stats.add_stat(Stat::MeleeCrit, 2.0);
            b.stats.add_stat(Stat::SpellCrit, 2.0);
        }
        b.seal_linger = has(ItemSet::LawbringerRadiance, 6);

        if has(ItemSet::LawbringerWill, 2) {
            b.stats.add_stat(Stat::BlockValue, 30.0);
        }
        b.bastion_of_light = has(ItemSet::LawbringerWill, 4);
        b.holy_shield_uncharged = has(ItemSet::LawbringerWill, 6);

        if has(ItemSet::FreethinkersArmor, 2) {
            b.stats.add_stat(Stat::HolyPower, 14.0);
        }
        if has(ItemSet::FreethinkersArmor, 3) {
            b.holy_shock_damage_mult *= 1.5;
        }
        if has(ItemSet::FreethinkersArmor, 5) {
            b.exorcism_cooldown_reduction += 3.0;
        }

        if has(ItemSet::MercifulJudgement, 2) {
            b.holy_shock_crit_bonus += 20.0;
        }
        if has(ItemSet::MercifulJudgement, 4) {
            b.consecration_damage_mult *= 1.5;
        }

        b.holy_shield_enhanced = has(ItemSet::WilfullJudgement, 2);
        b.holy_shield_damage_reduction = has(ItemSet::WilfullJudgement, 4);
        b.reckoning_on_block = has(ItemSet::WilfullJudgement, 6);

        if has(ItemSet::RadiantJudgement, 2) {
            b.judgement_damage_mult *= 1.2;
            b.seals_not_consumed = true;
        }
        b.judgement_reset_on_new_seal = has(ItemSet::RadiantJudgement, 4);
        b.swift_judgement = has(ItemSet::RadiantJudgement, 6);

        b
    }
}
