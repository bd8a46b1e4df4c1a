//! Stat identifiers and dense stat vectors

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Index, IndexMut, Sub};

/// A character or item stat.
///
/// Hit, crit, haste, block, dodge and parry are stored in percent. Defense
/// is stored in skill points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Agility,
    Stamina,
    Intellect,
    Spirit,
    AttackPower,
    RangedAttackPower,
    SpellPower,
    HolyPower,
    HealingPower,
    SpellDamage,
    MeleeHit,
    SpellHit,
    MeleeCrit,
    SpellCrit,
    MeleeHaste,
    Armor,
    BonusArmor,
    Defense,
    Block,
    BlockValue,
    Dodge,
    Parry,
    Resilience,
    Health,
    Mana,
    Mp5,
    ArcaneResistance,
    FireResistance,
    FrostResistance,
    NatureResistance,
    ShadowResistance,
}

impl Stat {
    pub const COUNT: usize = 32;

    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::Strength,
        Stat::Agility,
        Stat::Stamina,
        Stat::Intellect,
        Stat::Spirit,
        Stat::AttackPower,
        Stat::RangedAttackPower,
        Stat::SpellPower,
        Stat::HolyPower,
        Stat::HealingPower,
        Stat::SpellDamage,
        Stat::MeleeHit,
        Stat::SpellHit,
        Stat::MeleeCrit,
        Stat::SpellCrit,
        Stat::MeleeHaste,
        Stat::Armor,
        Stat::BonusArmor,
        Stat::Defense,
        Stat::Block,
        Stat::BlockValue,
        Stat::Dodge,
        Stat::Parry,
        Stat::Resilience,
        Stat::Health,
        Stat::Mana,
        Stat::Mp5,
        Stat::ArcaneResistance,
        Stat::FireResistance,
        Stat::FrostResistance,
        Stat::NatureResistance,
        Stat::ShadowResistance,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The five magic resistances
    pub fn resistances() -> [Stat; 5] {
        [
            Stat::ArcaneResistance,
            Stat::FireResistance,
            Stat::FrostResistance,
            Stat::NatureResistance,
            Stat::ShadowResistance,
        ]
    }

    /// Human readable label used by the text output
    pub fn label(self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Agility => "Agility",
            Stat::Stamina => "Stamina",
            Stat::Intellect => "Intellect",
            Stat::Spirit => "Spirit",
            Stat::AttackPower => "Attack Power",
            Stat::RangedAttackPower => "Ranged Attack Power",
            Stat::SpellPower => "Spell Power",
            Stat::HolyPower => "Holy Power",
            Stat::HealingPower => "Healing Power",
            Stat::SpellDamage => "Spell Damage",
            Stat::MeleeHit => "Melee Hit",
            Stat::SpellHit => "Spell Hit",
            Stat::MeleeCrit => "Melee Crit",
            Stat::SpellCrit => "Spell Crit",
            Stat::MeleeHaste => "Melee Haste",
            Stat::Armor => "Armor",
            Stat::BonusArmor => "Bonus Armor",
            Stat::Defense => "Defense",
            Stat::Block => "Block",
            Stat::BlockValue => "Block Value",
            Stat::Dodge => "Dodge",
            Stat::Parry => "Parry",
            Stat::Resilience => "Resilience",
            Stat::Health => "Health",
            Stat::Mana => "Mana",
            Stat::Mp5 => "MP5",
            Stat::ArcaneResistance => "Arcane Resistance",
            Stat::FireResistance => "Fire Resistance",
            Stat::FrostResistance => "Frost Resistance",
            Stat::NatureResistance => "Nature Resistance",
            Stat::ShadowResistance => "Shadow Resistance",
        }
    }
}

/// Stats that are not stored on the character sheet but still carry EP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoStat {
    MainHandDps,
    MeleeSpeedMultiplier,
}

impl PseudoStat {
    pub const ALL: [PseudoStat; 2] = [PseudoStat::MainHandDps, PseudoStat::MeleeSpeedMultiplier];
}

/// Dense stat vector indexed by [`Stat`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats([f64; Stat::COUNT]);

impl Default for Stats {
    fn default() -> Self {
        Self([0.0; Stat::COUNT])
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(Stat, f64)]) -> Self {
        let mut stats = Self::default();
        for &(stat, value) in pairs {
            stats[stat] += value;
        }
        stats
    }

    #[inline(always)]
    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat.index()]
    }

    #[inline(always)]
    pub fn set(&mut self, stat: Stat, value: f64) {
        self.0[stat.index()] = value;
    }

    #[inline(always)]
    pub fn add_stat(&mut self, stat: Stat, value: f64) {
        self.0[stat.index()] += value;
    }

    pub fn multiply_stat(&mut self, stat: Stat, mult: f64) {
        self.0[stat.index()] *= mult;
    }

    pub fn scaled(&self, mult: f64) -> Self {
        let mut out = *self;
        for v in out.0.iter_mut() {
            *v *= mult;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Non-zero entries in declaration order
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL
            .iter()
            .map(move |&s| (s, self.get(s)))
            .filter(|(_, v)| *v != 0.0)
    }
}

impl Index<Stat> for Stats {
    type Output = f64;

    fn index(&self, stat: Stat) -> &f64 {
        &self.0[stat.index()]
    }
}

impl IndexMut<Stat> for Stats {
    fn index_mut(&mut self, stat: Stat) -> &mut f64 {
        &mut self.0[stat.index()]
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += rhs;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

impl Sub for Stats {
    type Output = Stats;

    fn sub(mut self, rhs: Stats) -> Stats {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= *b;
        }
        self
    }
}

// Serialized as a sparse `stat_name: value` map so build files stay short
impl Serialize for Stats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map: BTreeMap<Stat, f64> = self.iter_nonzero().collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Stats {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<Stat, f64>::deserialize(deserializer)?;
        let mut stats = Stats::default();
        for (stat, value) in map {
            stats[stat] = value;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i, "{:?} out of order", stat);
        }
    }

    #[test]
    fn from_pairs_accumulates_duplicates() {
        let stats = Stats::from_pairs(&[(Stat::Stamina, 10.0), (Stat::Stamina, 5.0), (Stat::Armor, 100.0)]);
        assert_eq!(stats[Stat::Stamina], 15.0);
        assert_eq!(stats[Stat::Armor], 100.0);
        assert_eq!(stats[Stat::Strength], 0.0);
    }

    #[test]
    fn serde_uses_sparse_snake_case_map() {
        let stats = Stats::from_pairs(&[(Stat::BlockValue, 30.0)]);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"block_value":30.0}"#);

        let back: Stats = serde_yaml::from_str("stamina: 12\nmelee_hit: 2\n").unwrap();
        assert_eq!(back[Stat::Stamina], 12.0);
        assert_eq!(back[Stat::MeleeHit], 2.0);
    }

    #[test]
    fn arithmetic_is_elementwise() {
        let a = Stats::from_pairs(&[(Stat::Strength, 10.0)]);
        let b = Stats::from_pairs(&[(Stat::Strength, 4.0), (Stat::Agility, 3.0)]);
        let sum = a + b;
        assert_eq!(sum[Stat::Strength], 14.0);
        assert_eq!(sum[Stat::Agility], 3.0);
        let diff = sum - b;
        assert_eq!(diff, a);
        assert_eq!(a.scaled(2.0)[Stat::Strength], 20.0);
    }
}
