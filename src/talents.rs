//! Paladin talent points and their static effects

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Talent points by name. Missing fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Talents {
    // Holy
    pub divine_strength: i32,
    pub divine_intellect: i32,
    pub improved_seal_of_righteousness: i32,
    pub consecration: i32,
    pub holy_power: i32,
    pub holy_shock: i32,
    // Protection
    pub improved_devotion_aura: i32,
    pub redoubt: i32,
    pub precision: i32,
    pub toughness: i32,
    pub improved_righteous_fury: i32,
    pub shield_specialization: i32,
    pub anticipation: i32,
    pub reckoning: i32,
    pub one_handed_weapon_specialization: i32,
    pub holy_shield: i32,
    // Retribution
    pub benediction: i32,
    pub improved_judgement: i32,
    pub deflection: i32,
    pub vindication: i32,
    pub conviction: i32,
    pub seal_of_command: i32,
    pub two_handed_weapon_specialization: i32,
    pub sanctity_aura: i32,
    pub vengeance: i32,
}

impl Talents {
    /// (name, points, max points) for every talent
    fn entries(&self) -> [(&'static str, i32, i32); 25] {
        [
            ("divine_strength", self.divine_strength, 5),
            ("divine_intellect", self.divine_intellect, 5),
            ("improved_seal_of_righteousness", self.improved_seal_of_righteousness, 5),
            ("consecration", self.consecration, 1),
            ("holy_power", self.holy_power, 5),
            ("holy_shock", self.holy_shock, 1),
            ("improved_devotion_aura", self.improved_devotion_aura, 5),
            ("redoubt", self.redoubt, 5),
            ("precision", self.precision, 3),
            ("toughness", self.toughness, 5),
            ("improved_righteous_fury", self.improved_righteous_fury, 3),
            ("shield_specialization", self.shield_specialization, 3),
            ("anticipation", self.anticipation, 5),
            ("reckoning", self.reckoning, 5),
            ("one_handed_weapon_specialization", self.one_handed_weapon_specialization, 5),
            ("holy_shield", self.holy_shield, 1),
            ("benediction", self.benediction, 5),
            ("improved_judgement", self.improved_judgement, 2),
            ("deflection", self.deflection, 5),
            ("vindication", self.vindication, 3),
            ("conviction", self.conviction, 5),
            ("seal_of_command", self.seal_of_command, 1),
            ("two_handed_weapon_specialization", self.two_handed_weapon_specialization, 3),
            ("sanctity_aura", self.sanctity_aura, 1),
            ("vengeance", self.vengeance, 5),
        ]
    }

    pub fn total_points(&self) -> i32 {
        self.entries().iter().map(|(_, p, _)| *p).sum()
    }

    /// Reject negative or over-ranked talents and more points than the level allows
    pub fn validate(&self, level: i32) -> Result<()> {
        for (name, points, max) in self.entries() {
            if points < 0 || points > max {
                return Err(SimError::InvalidConfig(format!(
                    "talent {} has {} points (max {})",
                    name, points, max
                )));
            }
        }
        let available = (level - 9).max(0);
        let spent = self.total_points();
        if spent > available {
            return Err(SimError::InvalidConfig(format!(
                "{} talent points spent but level {} only grants {}",
                spent, level, available
            )));
        }
        Ok(())
    }

    /// Seal of Righteousness damage multiplier
    pub fn improved_sor(&self) -> f64 {
        [1.0, 1.03, 1.06, 1.09, 1.12, 1.15][self.improved_seal_of_righteousness.clamp(0, 5) as usize]
    }

    /// Mana cost percentage for seals and judgements
    pub fn benediction(&self) -> i32 {
        [100, 97, 94, 91, 88, 85][self.benediction.clamp(0, 5) as usize]
    }

    /// Vengeance damage multiplier while the proc is active
    pub fn vengeance_multiplier(&self) -> f64 {
        [1.0, 1.03, 1.06, 1.09, 1.12, 1.15][self.vengeance.clamp(0, 5) as usize]
    }

    /// Vindication attack power multiplier while the proc is active
    pub fn vindication_multiplier(&self) -> f64 {
        [1.0, 1.05, 1.10, 1.15][self.vindication.clamp(0, 3) as usize]
    }

    /// Holy threat multiplier granted by Righteous Fury
    pub fn righteous_fury_threat(&self) -> f64 {
        let bonus = [0.6, 0.696, 0.798, 0.9][self.improved_righteous_fury.clamp(0, 3) as usize];
        1.0 + bonus
    }

    /// Devotion Aura armor multiplier
    pub fn improved_devotion_aura(&self) -> f64 {
        1.0 + 0.05 * self.improved_devotion_aura as f64
    }

    /// Chance for Reckoning to grant an extra attack when crit
    pub fn reckoning_chance(&self) -> f64 {
        0.2 * self.reckoning as f64
    }

    /// Block chance per Redoubt charge
    pub fn redoubt_block_bonus(&self) -> f64 {
        6.0 * self.redoubt as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero() {
        let t = Talents::default();
        assert_eq!(t.total_points(), 0);
        assert_eq!(t.improved_sor(), 1.0);
        assert_eq!(t.benediction(), 100);
    }

    #[test]
    fn lookup_tables_follow_points() {
        let t = Talents {
            improved_seal_of_righteousness: 5,
            benediction: 5,
            vindication: 3,
            improved_righteous_fury: 3,
            ..Default::default()
        };
        assert!((t.improved_sor() - 1.15).abs() < 1e-9);
        assert_eq!(t.benediction(), 85);
        assert!((t.vindication_multiplier() - 1.15).abs() < 1e-9);
        assert!((t.righteous_fury_threat() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_overranked_and_overspent() {
        let t = Talents { holy_shield: 2, ..Default::default() };
        assert!(t.validate(60).is_err());

        let t = Talents { redoubt: 5, toughness: 5, anticipation: 5, ..Default::default() };
        assert!(t.validate(20).is_err());
        assert!(t.validate(60).is_ok());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let t: Talents = serde_yaml::from_str("holy_shield: 1\nredoubt: 5\n").unwrap();
        assert_eq!(t.holy_shield, 1);
        assert_eq!(t.redoubt, 5);
        assert_eq!(t.precision, 0);
    }
}
