//! Consumables, raid/party/individual buffs and target debuffs

use serde::{Deserialize, Serialize};

use crate::unit_stats::{Stat, Stats};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flask {
    #[default]
    None,
    FlaskOfTheTitans,
    FlaskOfDistilledWisdom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Food {
    #[default]
    None,
    HeartyStamina,
    DirgesKickinChimaerokChops,
    GrilledSquid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumes {
    pub flask: Flask,
    pub food: Food,
    pub elixir_of_the_mongoose: bool,
    pub elixir_of_superior_defense: bool,
    pub elixir_of_fortitude: bool,
    pub juju_power: bool,
    pub greater_arcane_elixir: bool,
}

impl Consumes {
    pub fn stats(&self) -> Stats {
        let mut s = Stats::default();
        match self.flask {
            Flask::None => {}
            Flask::FlaskOfTheTitans => s.add_stat(Stat::Health, 1200.0),
            Flask::FlaskOfDistilledWisdom => s.add_stat(Stat::Mana, 2000.0),
        }
        match self.food {
            Food::None => {}
            Food::HeartyStamina => s.add_stat(Stat::Stamina, 12.0),
            Food::DirgesKickinChimaerokChops => s.add_stat(Stat::Stamina, 25.0),
            Food::GrilledSquid => s.add_stat(Stat::Agility, 10.0),
        }
        if self.elixir_of_the_mongoose {
            s.add_stat(Stat::Agility, 25.0);
            s.add_stat(Stat::MeleeCrit, 2.0);
        }
        if self.elixir_of_superior_defense {
            s.add_stat(Stat::BonusArmor, 450.0);
        }
        if self.elixir_of_fortitude {
            s.add_stat(Stat::Health, 120.0);
        }
        if self.juju_power {
            s.add_stat(Stat::Strength, 30.0);
        }
        if self.greater_arcane_elixir {
            s.add_stat(Stat::SpellPower, 35.0);
        }
        s
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidBuffs {
    pub arcane_brilliance: bool,
    pub gift_of_the_wild: bool,
    pub power_word_fortitude: bool,
    pub battle_shout: bool,
    pub trueshot_aura: bool,
}

impl RaidBuffs {
    pub fn stats(&self) -> Stats {
        let mut s = Stats::default();
        if self.arcane_brilliance {
            s.add_stat(Stat::Intellect, 31.0);
        }
        if self.gift_of_the_wild {
            for stat in [Stat::Strength, Stat::Agility, Stat::Stamina, Stat::Intellect, Stat::Spirit] {
                s.add_stat(stat, 16.0);
            }
            s.add_stat(Stat::BonusArmor, 384.0);
            for r in Stat::resistances() {
                s.add_stat(r, 27.0);
            }
        }
        if self.power_word_fortitude {
            s.add_stat(Stat::Stamina, 54.0);
        }
        if self.battle_shout {
            s.add_stat(Stat::AttackPower, 232.0);
        }
        if self.trueshot_aura {
            s.add_stat(Stat::AttackPower, 100.0);
        }
        s
    }
}

/// Party buffs carry no data yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBuffs {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualBuffs {
    pub blessing_of_kings: bool,
    pub blessing_of_might: bool,
    pub blessing_of_sanctuary: bool,
    pub blessing_of_wisdom: bool,
}

impl IndividualBuffs {
    pub fn stats(&self) -> Stats {
        let mut s = Stats::default();
        if self.blessing_of_might {
            s.add_stat(Stat::AttackPower, 185.0);
        }
        if self.blessing_of_wisdom {
            s.add_stat(Stat::Mp5, 33.0);
        }
        s
    }

    /// Primary attribute multiplier from Blessing of Kings
    pub fn attribute_multiplier(&self) -> f64 {
        if self.blessing_of_kings {
            1.1
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Debuffs {
    pub sunder_armor: bool,
    pub faerie_fire: bool,
    pub curse_of_recklessness: bool,
    pub demoralizing_shout: bool,
    pub thunder_clap: bool,
    pub improved_scorch: bool,
}

impl Debuffs {
    /// Armor removed from the target
    pub fn armor_reduction(&self) -> f64 {
        let mut r = 0.0;
        if self.sunder_armor {
            r += 2250.0;
        }
        if self.faerie_fire {
            r += 505.0;
        }
        if self.curse_of_recklessness {
            r += 640.0;
        }
        r
    }

    /// Net change of the target's attack power
    pub fn attack_power_change(&self) -> f64 {
        let mut ap = 0.0;
        if self.curse_of_recklessness {
            ap += 90.0;
        }
        if self.demoralizing_shout {
            ap -= 146.0;
        }
        ap
    }

    /// Multiplier applied to the target's swing interval
    pub fn attack_speed_multiplier(&self) -> f64 {
        if self.thunder_clap {
            1.1
        } else {
            1.0
        }
    }
}
