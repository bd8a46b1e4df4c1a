//! Engraved runes, at most one per equipment slot

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadRune {
    Fanaticism,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestRune {
    Aegis,
    SealOfMartyrdom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaistRune {
    SheathOfLight,
    MalleableProtection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeetRune {
    TheArtOfWar,
    GuardedByTheLight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WristRune {
    HammerOfTheRighteous,
    PurifyingPower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloakRune {
    ShockAndAwe,
}

/// Engraved runes. Slot exclusivity is enforced by the shape of the struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runes {
    pub head: Option<HeadRune>,
    pub chest: Option<ChestRune>,
    pub waist: Option<WaistRune>,
    pub feet: Option<FeetRune>,
    pub wrist: Option<WristRune>,
    pub cloak: Option<CloakRune>,
}

impl Runes {
    pub fn fanaticism(&self) -> bool {
        self.head == Some(HeadRune::Fanaticism)
    }

    pub fn aegis(&self) -> bool {
        self.chest == Some(ChestRune::Aegis)
    }

    pub fn seal_of_martyrdom(&self) -> bool {
        self.chest == Some(ChestRune::SealOfMartyrdom)
    }

    pub fn sheath_of_light(&self) -> bool {
        self.waist == Some(WaistRune::SheathOfLight)
    }

    pub fn malleable_protection(&self) -> bool {
        self.waist == Some(WaistRune::MalleableProtection)
    }

    pub fn the_art_of_war(&self) -> bool {
        self.feet == Some(FeetRune::TheArtOfWar)
    }

    pub fn guarded_by_the_light(&self) -> bool {
        self.feet == Some(FeetRune::GuardedByTheLight)
    }

    pub fn hammer_of_the_righteous(&self) -> bool {
        self.wrist == Some(WristRune::HammerOfTheRighteous)
    }

    pub fn purifying_power(&self) -> bool {
        self.wrist == Some(WristRune::PurifyingPower)
    }

    pub fn shock_and_awe(&self) -> bool {
        self.cloak == Some(CloakRune::ShockAndAwe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_rune_set() {
        let r: Runes = serde_yaml::from_str("chest: aegis\nwrist: hammer_of_the_righteous\n").unwrap();
        assert!(r.aegis());
        assert!(!r.seal_of_martyrdom());
        assert!(r.hammer_of_the_righteous());
        assert!(!r.purifying_power());
        assert_eq!(r.head, None);
    }
}
