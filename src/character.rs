//! Paladin stat calculation: everything fixed for the length of a fight

use crate::config::{OtherOptions, PaladinOptions, PlayerConfig};
use crate::error::Result;
use crate::gear::{HandType, WeaponStats, FISTS};
use crate::item_sets::SetBonuses;
use crate::player_data::{PaladinAura, PaladinSeal, Race};
use crate::runes::Runes;
use crate::spells::{Ability, HitModel, Rank, School};
use crate::talents::Talents;
use crate::unit_stats::{Stat, Stats};

/// Primary attributes and base health/mana at level 1 and level 60
struct RaceBase {
    low: [f64; 7],
    high: [f64; 7],
}

// Strength, Agility, Stamina, Intellect, Spirit, base health, base mana
const HUMAN: RaceBase = RaceBase {
    low: [22.0, 20.0, 22.0, 20.0, 22.0, 28.0, 60.0],
    high: [105.0, 65.0, 100.0, 70.0, 74.0, 1381.0, 1512.0],
};

const DWARF: RaceBase = RaceBase {
    low: [24.0, 16.0, 25.0, 19.0, 20.0, 28.0, 60.0],
    high: [107.0, 61.0, 103.0, 69.0, 72.0, 1381.0, 1512.0],
};

const PRIMARY: [Stat; 5] = [Stat::Strength, Stat::Agility, Stat::Stamina, Stat::Intellect, Stat::Spirit];

/// Value of the highest entry whose level is at most `level`
fn by_level(table: &[(i32, f64)], level: i32) -> f64 {
    table.iter().rev().find(|(l, _)| *l <= level).map(|(_, v)| *v).unwrap_or(0.0)
}

const DEVOTION_AURA: &[(i32, f64)] = &[(1, 55.0), (10, 165.0), (20, 285.0), (30, 405.0), (40, 525.0), (50, 645.0), (60, 735.0)];
const RETRIBUTION_AURA: &[(i32, f64)] = &[(16, 5.0), (26, 7.0), (36, 10.0), (46, 14.0), (56, 20.0)];
const SANCTUARY: &[(i32, f64)] = &[(30, 10.0), (40, 14.0), (50, 19.0), (60, 24.0)];

/// Seals a paladin with these talents and runes can use, in id order
pub fn available_seals(level: i32, talents: &Talents, runes: &Runes) -> Vec<PaladinSeal> {
    let mut seals = Vec::with_capacity(3);
    if Ability::SealOfRighteousness.rank_for_level(level).is_some() {
        seals.push(PaladinSeal::Righteousness);
    }
    if talents.seal_of_command > 0 && Ability::SealOfCommand.rank_for_level(level).is_some() {
        seals.push(PaladinSeal::Command);
    }
    if runes.seal_of_martyrdom() {
        seals.push(PaladinSeal::Martyrdom);
    }
    seals
}

/// Computed paladin ready for combat simulation
#[derive(Debug, Clone)]
pub struct Paladin {
    pub name: String,
    pub level: i32,
    pub race: Race,

    /// Final unbuffed-by-procs stats. Armor includes bonus armor and auras.
    pub stats: Stats,
    pub base_mana: f64,
    pub weapon_skill: f64,
    pub weapon: WeaponStats,
    pub has_shield: bool,

    pub talents: Talents,
    pub runes: Runes,
    pub set_bonuses: SetBonuses,
    pub options: PaladinOptions,
    pub other: OtherOptions,

    pub physical_damage_multiplier: f64,
    pub holy_damage_multiplier: f64,
    /// Extra crit chance in percent for holy school abilities
    pub holy_crit_bonus: f64,
    /// Flat reduction of every melee hit taken
    pub sanctuary_reduction: f64,
    /// Holy damage dealt to the attacker on every melee hit taken
    pub retribution_aura_damage: f64,
}

impl Paladin {
    pub fn from_config(config: &PlayerConfig) -> Result<Self> {
        let gear = config.resolve_gear()?;
        let talents = config.resolve_talents()?;
        let runes = config.runes;
        let level = config.level;
        let set_bonuses = SetBonuses::from_counts(&gear.set_piece_counts());

        let base = match config.race {
            Race::Dwarf => DWARF,
            Race::Human | Race::Unknown => HUMAN,
        };
        let t = ((level - 1) as f64 / 59.0).clamp(0.0, 1.0);
        let lerp = |i: usize| base.low[i] + (base.high[i] - base.low[i]) * t;

        let mut s = Stats::new();
        for (i, stat) in PRIMARY.iter().enumerate() {
            s[*stat] = lerp(i).round();
        }
        let base_health = lerp(5).round();
        let base_mana = lerp(6).round();

        s[Stat::MeleeCrit] = 0.7;
        s[Stat::SpellCrit] = 3.3;
        s[Stat::Dodge] = 0.7;
        s[Stat::Parry] = 5.0;
        s[Stat::Block] = 5.0;
        s[Stat::Defense] = 5.0 * level as f64;
        if config.race == Race::Dwarf {
            s[Stat::FrostResistance] += 10.0;
        }

        s += gear.stats();
        s += config.consumes.stats();
        s += config.raid_buffs.stats();
        s += config.individual_buffs.stats();
        s += set_bonuses.stats;
        s += config.bonus_stats;

        // Attribute multipliers
        let kings = config.individual_buffs.attribute_multiplier();
        s.multiply_stat(Stat::Strength, 1.0 + 0.02 * talents.divine_strength as f64);
        s.multiply_stat(Stat::Intellect, 1.0 + 0.02 * talents.divine_intellect as f64);
        for stat in PRIMARY {
            s.multiply_stat(stat, kings);
        }
        if config.race == Race::Human {
            s.multiply_stat(Stat::Spirit, 1.05);
        }

        // Flat talents
        s[Stat::MeleeHit] += talents.precision as f64;
        s[Stat::MeleeCrit] += talents.conviction as f64;
        s[Stat::Defense] += 2.0 * talents.anticipation as f64;
        s[Stat::Parry] += talents.deflection as f64;
        s[Stat::Armor] += gear.equip_armor() * 0.02 * talents.toughness as f64;

        let has_shield = gear.has_shield();
        let mut bv_bonus = 0.1 * talents.shield_specialization as f64;
        if runes.aegis() {
            bv_bonus += 0.3;
        }
        if has_shield {
            s[Stat::BlockValue] += gear.equip_block_value() * bv_bonus;
        }

        // Derived stats
        let str_ = s[Stat::Strength];
        let agi = s[Stat::Agility];
        s[Stat::AttackPower] += 3.0 * level as f64 - 20.0 + 2.0 * str_;
        s[Stat::BlockValue] += str_ / 20.0;
        s[Stat::MeleeCrit] += agi / 20.0;
        s[Stat::Dodge] += agi / 20.0;
        s[Stat::SpellCrit] += s[Stat::Intellect] / 54.0;
        s[Stat::Health] += base_health + 10.0 * (s[Stat::Stamina] - 20.0) + 20.0;
        s[Stat::Mana] += base_mana + 15.0 * (s[Stat::Intellect] - 20.0) + 20.0;

        let mut armor = s[Stat::Armor] + 2.0 * agi + s[Stat::BonusArmor];
        if config.spec_options.aura == PaladinAura::DevotionAura {
            armor += by_level(DEVOTION_AURA, level) * talents.improved_devotion_aura();
        }
        armor *= 1.0 + 0.25 * config.other.inspiration_uptime;
        s[Stat::Armor] = armor;

        let weapon = gear.main_hand().unwrap_or(FISTS);
        let spec_points = match weapon.hand_type {
            HandType::OneHand => talents.one_handed_weapon_specialization,
            HandType::TwoHand => talents.two_handed_weapon_specialization,
        };
        let physical_damage_multiplier = 1.0 + 0.02 * spec_points as f64;

        let mut holy_damage_multiplier = 1.0;
        if config.spec_options.aura == PaladinAura::SanctityAura && talents.sanctity_aura > 0 {
            holy_damage_multiplier *= 1.1;
        }

        let mut holy_crit_bonus = talents.holy_power as f64 + set_bonuses.holy_crit_bonus;
        if runes.fanaticism() {
            holy_crit_bonus += 18.0;
        }

        let retribution_aura_damage = if config.spec_options.aura == PaladinAura::RetributionAura {
            by_level(RETRIBUTION_AURA, level)
        } else {
            0.0
        };
        let sanctuary_reduction = if config.individual_buffs.blessing_of_sanctuary {
            by_level(SANCTUARY, level)
        } else {
            0.0
        };

        Ok(Self {
            name: config.name.clone(),
            level,
            race: config.race,
            stats: s,
            base_mana,
            weapon_skill: 5.0 * level as f64,
            weapon,
            has_shield,
            talents,
            runes,
            set_bonuses,
            options: config.spec_options,
            other: config.other,
            physical_damage_multiplier,
            holy_damage_multiplier,
            holy_crit_bonus,
            sanctuary_reduction,
            retribution_aura_damage,
        })
    }

    #[inline(always)]
    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats[stat]
    }

    pub fn max_health(&self) -> f64 {
        self.stats[Stat::Health]
    }

    pub fn max_mana(&self) -> f64 {
        self.stats[Stat::Mana]
    }

    /// Spell power that applies to holy damage
    pub fn holy_spell_power(&self) -> f64 {
        self.stats[Stat::SpellPower] + self.stats[Stat::HolyPower] + self.stats[Stat::SpellDamage]
    }

    pub fn available_seals(&self) -> Vec<PaladinSeal> {
        available_seals(self.level, &self.talents, &self.runes)
    }

    pub fn rank(&self, ability: Ability) -> Option<Rank> {
        ability.rank_for_level(self.level)
    }

    /// Ability is trained and unlocked by talents or runes
    pub fn knows(&self, ability: Ability) -> bool {
        let ranked = self.rank(ability).is_some();
        match ability {
            Ability::SealOfCommand => ranked && self.talents.seal_of_command > 0,
            Ability::SealOfMartyrdom => self.runes.seal_of_martyrdom(),
            Ability::Judgement => self.level >= 4,
            Ability::HolyShield => ranked && self.talents.holy_shield > 0,
            Ability::Consecration => ranked && self.talents.consecration > 0,
            Ability::HolyShock => ranked && self.talents.holy_shock > 0,
            Ability::HammerOfTheRighteous => self.runes.hammer_of_the_righteous(),
            _ => ranked,
        }
    }

    /// Cooldown after talents, runes and set bonuses
    pub fn cooldown(&self, ability: Ability) -> f64 {
        let base = ability.base_cooldown();
        match ability {
            Ability::Judgement => base - self.talents.improved_judgement as f64,
            Ability::Exorcism => {
                let cd = if self.runes.purifying_power() { base / 2.0 } else { base };
                (cd - self.set_bonuses.exorcism_cooldown_reduction).max(0.0)
            }
            _ => base,
        }
    }

    pub fn mana_cost(&self, ability: Ability) -> f64 {
        let benediction = self.talents.benediction() as f64 / 100.0;
        match ability {
            Ability::Judgement => 0.06 * self.base_mana * benediction,
            Ability::SealOfRighteousness | Ability::SealOfCommand | Ability::SealOfMartyrdom => {
                self.rank(ability).map(|r| r.mana).unwrap_or(0.0) * benediction
            }
            _ => self.rank(ability).map(|r| r.mana).unwrap_or(0.0),
        }
    }

    /// Crit chance in percent before target level suppression
    pub fn crit_chance(&self, ability: Ability) -> f64 {
        let base = match ability.hit_model() {
            HitModel::MeleeWhite | HitModel::MeleeSpecial => self.stats[Stat::MeleeCrit],
            HitModel::Magic => self.stats[Stat::SpellCrit],
            HitModel::AlwaysHit => 0.0,
        };
        let mut crit = base;
        if ability.school() == School::Holy && ability.hit_model() != HitModel::AlwaysHit {
            crit += self.holy_crit_bonus;
        }
        if ability == Ability::HolyShock {
            crit += self.set_bonuses.holy_shock_crit_bonus;
        }
        crit
    }

    pub fn school_multiplier(&self, school: School) -> f64 {
        match school {
            School::Physical => self.physical_damage_multiplier,
            School::Holy => self.holy_damage_multiplier,
        }
    }

    /// Share of max health below which defensives fire, in percent
    pub fn defensive_threshold_percent(&self) -> f64 {
        self.other.hp_percent_for_defensives * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::{Consumes, IndividualBuffs, RaidBuffs};
    use crate::config::{GearSelection, TalentSelection};
    use crate::gear::{Item, ItemSlot};
    use crate::runes::ChestRune;

    fn naked(level: i32) -> PlayerConfig {
        PlayerConfig {
            level,
            gear: GearSelection::Items(vec![]),
            talents: TalentSelection::Points(Talents::default()),
            runes: Runes::default(),
            consumes: Consumes::default(),
            raid_buffs: RaidBuffs::default(),
            individual_buffs: IndividualBuffs::default(),
            spec_options: PaladinOptions { aura: PaladinAura::NoPaladinAura, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn naked_level_60_human_derivation() {
        let p = Paladin::from_config(&naked(60)).unwrap();
        assert_eq!(p.stat(Stat::Strength), 105.0);
        assert_eq!(p.stat(Stat::AttackPower), 3.0 * 60.0 - 20.0 + 210.0);
        assert!((p.stat(Stat::MeleeCrit) - (0.7 + 65.0 / 20.0)).abs() < 1e-9);
        assert_eq!(p.stat(Stat::Armor), 130.0);
        assert_eq!(p.stat(Stat::Health), 1381.0 + 800.0 + 20.0);
        assert_eq!(p.stat(Stat::Defense), 300.0);
        assert_eq!(p.weapon, FISTS);
        assert!(!p.has_shield);
    }

    #[test]
    fn kings_and_divine_strength_scale_strength() {
        let mut c = naked(60);
        c.individual_buffs.blessing_of_kings = true;
        c.talents = TalentSelection::Points(Talents { divine_strength: 5, ..Default::default() });
        let p = Paladin::from_config(&c).unwrap();
        assert!((p.stat(Stat::Strength) - 105.0 * 1.1 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn shield_specialization_and_aegis_scale_item_block_value() {
        let mut c = naked(60);
        c.gear = GearSelection::Items(vec![
            Item::new(1, "Shield", ItemSlot::OffHand, &[(Stat::BlockValue, 100.0)]).shield(),
        ]);
        c.talents = TalentSelection::Points(Talents { shield_specialization: 3, ..Default::default() });
        c.runes.chest = Some(ChestRune::Aegis);
        let p = Paladin::from_config(&c).unwrap();
        assert!((p.stat(Stat::BlockValue) - (100.0 * 1.6 + 105.0 / 20.0)).abs() < 1e-9);
    }

    #[test]
    fn seals_depend_on_talents_and_runes() {
        let mut c = naked(60);
        let p = Paladin::from_config(&c).unwrap();
        assert_eq!(p.available_seals(), vec![PaladinSeal::Righteousness]);

        c.talents = TalentSelection::Points(Talents { seal_of_command: 1, ..Default::default() });
        c.runes.chest = Some(ChestRune::SealOfMartyrdom);
        let p = Paladin::from_config(&c).unwrap();
        assert_eq!(
            p.available_seals(),
            vec![PaladinSeal::Righteousness, PaladinSeal::Command, PaladinSeal::Martyrdom]
        );
        assert!(p.knows(Ability::SealOfMartyrdom));
        assert!(!p.knows(Ability::HolyShield));
    }

    #[test]
    fn cooldowns_and_costs_follow_talents() {
        let mut c = naked(60);
        c.talents = TalentSelection::Points(Talents { improved_judgement: 2, benediction: 5, ..Default::default() });
        c.runes.wrist = Some(crate::runes::WristRune::PurifyingPower);
        let p = Paladin::from_config(&c).unwrap();
        assert_eq!(p.cooldown(Ability::Judgement), 8.0);
        assert_eq!(p.cooldown(Ability::Exorcism), 7.5);
        assert!((p.mana_cost(Ability::SealOfRighteousness) - 200.0 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn devotion_aura_adds_armor() {
        let mut c = naked(60);
        c.spec_options.aura = PaladinAura::DevotionAura;
        let p = Paladin::from_config(&c).unwrap();
        assert_eq!(p.stat(Stat::Armor), 130.0 + 735.0);
    }
}
