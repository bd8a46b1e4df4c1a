//! Player-facing enumerations: race, faction, class, spec, phase, seal, aura

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Content phase. Presets are scoped by phase because the item pool and
/// level cap change over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Phase1,
    Phase2,
    Phase3,
    Phase4,
    Phase5,
}

impl Phase {
    pub const ALL: [Phase; 5] = [Phase::Phase1, Phase::Phase2, Phase::Phase3, Phase::Phase4, Phase::Phase5];

    /// Level cap of the phase
    pub fn level_cap(self) -> i32 {
        match self {
            Phase::Phase1 => 25,
            Phase::Phase2 => 40,
            Phase::Phase3 => 50,
            Phase::Phase4 | Phase::Phase5 => 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Unknown,
    Alliance,
    Horde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Paladin,
}

/// Player specialization; keys the spec registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spec {
    ProtectionPaladin,
    RetributionPaladin,
    HolyPaladin,
}

impl Spec {
    pub fn class(self) -> Class {
        Class::Paladin
    }

    /// Talent tree index used for icon lookup (holy, protection, retribution)
    pub fn tree_index(self) -> u8 {
        match self {
            Spec::HolyPaladin => 0,
            Spec::ProtectionPaladin => 1,
            Spec::RetributionPaladin => 2,
        }
    }
}

/// Icon path for a class/tree pair
pub fn get_spec_icon(class: Class, tree: u8) -> String {
    let class_name = match class {
        Class::Paladin => "paladin",
    };
    let tree_name = match tree {
        0 => "holy",
        1 => "protection",
        _ => "retribution",
    };
    format!("icons/{}_{}.jpg", class_name, tree_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Unknown,
    Human,
    Dwarf,
}

impl Race {
    pub fn faction(self) -> Faction {
        match self {
            Race::Unknown => Faction::Unknown,
            Race::Human | Race::Dwarf => Faction::Alliance,
        }
    }
}

/// Primary seal. `NoSeal` is the "unset" sentinel with discriminant 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaladinSeal {
    NoSeal = 0,
    Righteousness = 1,
    Command = 2,
    Martyrdom = 3,
}

impl PaladinSeal {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(PaladinSeal::NoSeal),
            1 => Some(PaladinSeal::Righteousness),
            2 => Some(PaladinSeal::Command),
            3 => Some(PaladinSeal::Martyrdom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaladinAura {
    NoPaladinAura,
    DevotionAura,
    RetributionAura,
    SanctityAura,
}

// Build files are hand written, so enum names are matched case-insensitively
// and separators are ignored ("Seal of Righteousness" == "righteousness").
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct LooseEnumVisitor<T: 'static> {
    expecting: &'static str,
    names: &'static [(&'static str, T)],
    by_id: fn(i64) -> Option<T>,
}

impl<'de, T: Copy + 'static> Visitor<'de> for LooseEnumVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        let key = normalize(v);
        self.names
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                let expected: Vec<&str> = self.names.iter().map(|(n, _)| *n).collect();
                E::custom(format!("unknown variant `{}`, expected one of {:?}", v, expected))
            })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        (self.by_id)(v).ok_or_else(|| E::custom(format!("unknown id {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        self.visit_i64(v as i64)
    }
}

impl<'de> Deserialize<'de> for Race {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseEnumVisitor {
            expecting: "a race name",
            names: &[("unknown", Race::Unknown), ("human", Race::Human), ("dwarf", Race::Dwarf)],
            by_id: |_| None,
        })
    }
}

impl<'de> Deserialize<'de> for PaladinSeal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseEnumVisitor {
            expecting: "a seal name or id",
            names: &[
                ("noseal", PaladinSeal::NoSeal),
                ("none", PaladinSeal::NoSeal),
                ("righteousness", PaladinSeal::Righteousness),
                ("sealofrighteousness", PaladinSeal::Righteousness),
                ("command", PaladinSeal::Command),
                ("sealofcommand", PaladinSeal::Command),
                ("martyrdom", PaladinSeal::Martyrdom),
                ("sealofmartyrdom", PaladinSeal::Martyrdom),
            ],
            by_id: |id| PaladinSeal::from_id(id as i32),
        })
    }
}

impl<'de> Deserialize<'de> for PaladinAura {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseEnumVisitor {
            expecting: "a paladin aura name",
            names: &[
                ("nopaladinaura", PaladinAura::NoPaladinAura),
                ("none", PaladinAura::NoPaladinAura),
                ("devotionaura", PaladinAura::DevotionAura),
                ("retributionaura", PaladinAura::RetributionAura),
                ("sanctityaura", PaladinAura::SanctityAura),
            ],
            by_id: |_| None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_sentinel_is_zero() {
        assert_eq!(PaladinSeal::NoSeal.id(), 0);
        assert_eq!(PaladinSeal::from_id(1), Some(PaladinSeal::Righteousness));
        assert_eq!(PaladinSeal::from_id(9), None);
    }

    #[test]
    fn seal_parses_names_and_ids() {
        let s: PaladinSeal = serde_yaml::from_str("Seal of Righteousness").unwrap();
        assert_eq!(s, PaladinSeal::Righteousness);
        let s: PaladinSeal = serde_json::from_str("2").unwrap();
        assert_eq!(s, PaladinSeal::Command);
        let s: PaladinSeal = serde_json::from_str("\"NO_SEAL\"").unwrap();
        assert_eq!(s, PaladinSeal::NoSeal);
        assert!(serde_json::from_str::<PaladinSeal>("\"light\"").is_err());
    }

    #[test]
    fn race_is_case_insensitive() {
        let r: Race = serde_yaml::from_str("HUMAN").unwrap();
        assert_eq!(r, Race::Human);
        assert_eq!(r.faction(), Faction::Alliance);
    }

    #[test]
    fn phase_caps() {
        assert_eq!(Phase::Phase1.level_cap(), 25);
        assert_eq!(Phase::Phase4.level_cap(), 60);
    }

    #[test]
    fn protection_icon() {
        assert_eq!(get_spec_icon(Class::Paladin, 1), "icons/paladin_protection.jpg");
    }
}
