//! Encounter targets - the mob the paladin tanks

use serde::{Deserialize, Serialize};

use crate::buffs::Debuffs;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobType {
    #[default]
    Unknown,
    Humanoid,
    Undead,
    Demon,
    Beast,
    Dragonkin,
    Elemental,
    Giant,
    Mechanical,
}

/// Static target definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub level: i32,
    pub armor: f64,
    #[serde(default)]
    pub mob_type: MobType,
    /// Seconds between swings
    pub swing_speed: f64,
    pub min_base_damage: f64,
    /// Top of the damage roll as a multiple of `min_base_damage`
    #[serde(default = "default_damage_spread")]
    pub damage_spread: f64,
    #[serde(default)]
    pub attack_power: f64,
    #[serde(default = "default_true")]
    pub can_parry: bool,
    #[serde(default = "default_true")]
    pub can_dodge: bool,
}

fn default_damage_spread() -> f64 {
    1.3
}

fn default_true() -> bool {
    true
}

impl Target {
    /// Generic elite three levels above the player
    pub fn training_dummy(player_level: i32) -> Self {
        let level = player_level + 3;
        let lvl = level as f64;
        Self {
            name: format!("Level {} Defense Dummy", level),
            level,
            armor: lvl * 75.0,
            mob_type: MobType::Mechanical,
            swing_speed: 2.0,
            min_base_damage: 0.67 * lvl * lvl,
            damage_spread: default_damage_spread(),
            attack_power: 0.0,
            can_parry: true,
            can_dodge: true,
        }
    }

    /// Level 63 raid boss
    pub fn raid_boss() -> Self {
        Self {
            name: "Raid Boss".to_string(),
            level: 63,
            armor: 4691.0,
            mob_type: MobType::Humanoid,
            swing_speed: 2.0,
            min_base_damage: 2600.0,
            damage_spread: default_damage_spread(),
            attack_power: 0.0,
            can_parry: true,
            can_dodge: true,
        }
    }

    /// Level 63 undead boss
    pub fn undead_boss() -> Self {
        Self {
            name: "Undead Boss".to_string(),
            mob_type: MobType::Undead,
            ..Self::raid_boss()
        }
    }

    pub fn from_preset(name: &str, player_level: i32) -> Result<Self> {
        match name.to_lowercase().replace([' ', '-'], "_").as_str() {
            "training_dummy" | "defense_dummy" => Ok(Self::training_dummy(player_level)),
            "raid_boss" => Ok(Self::raid_boss()),
            "undead_boss" => Ok(Self::undead_boss()),
            _ => Err(SimError::UnknownPreset { kind: "target", name: name.to_string() }),
        }
    }

    pub fn is_undead_or_demon(&self) -> bool {
        matches!(self.mob_type, MobType::Undead | MobType::Demon)
    }

    /// Target with debuffs applied
    pub fn debuffed(&self, debuffs: &Debuffs) -> Self {
        let mut t = self.clone();
        t.armor = (t.armor - debuffs.armor_reduction()).max(0.0);
        t.attack_power = (t.attack_power + debuffs.attack_power_change()).max(0.0);
        t.swing_speed *= debuffs.attack_speed_multiplier();
        t
    }

    /// Weapon damage range of one swing before mitigation
    pub fn damage_range(&self) -> (f64, f64) {
        let ap_bonus = self.attack_power / 14.0 * self.swing_speed;
        let min = self.min_base_damage + ap_bonus;
        let max = self.min_base_damage * self.damage_spread + ap_bonus;
        (min, max)
    }

    pub fn weapon_skill(&self) -> f64 {
        5.0 * self.level as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.level < 1 || self.level > 63 {
            return Err(SimError::InvalidConfig(format!("target level {} outside 1..=63", self.level)));
        }
        if self.swing_speed <= 0.0 {
            return Err(SimError::InvalidConfig("target swing speed must be positive".into()));
        }
        if self.min_base_damage < 0.0 || self.damage_spread < 1.0 {
            return Err(SimError::InvalidConfig("target damage range is invalid".into()));
        }
        Ok(())
    }
}
