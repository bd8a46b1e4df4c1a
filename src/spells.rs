//! Paladin ability catalog: ranks, costs, cooldowns and hit models

use serde::{Deserialize, Serialize};

pub const GCD: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    MeleeSwing,
    SealOfRighteousness,
    SealOfCommand,
    SealOfMartyrdom,
    Judgement,
    HolyShield,
    Consecration,
    HammerOfTheRighteous,
    Exorcism,
    HolyShock,
    HammerOfWrath,
    LayOnHands,
    RighteousFury,
    // Procs, never chosen by a rotation
    SealOfRighteousnessProc,
    SealOfCommandProc,
    SealOfMartyrdomProc,
    HolyShieldProc,
    RetributionAura,
    BastionOfLight,
}

impl Ability {
    pub const COUNT: usize = 19;

    pub const ALL: [Ability; Ability::COUNT] = [
        Ability::MeleeSwing,
        Ability::SealOfRighteousness,
        Ability::SealOfCommand,
        Ability::SealOfMartyrdom,
        Ability::Judgement,
        Ability::HolyShield,
        Ability::Consecration,
        Ability::HammerOfTheRighteous,
        Ability::Exorcism,
        Ability::HolyShock,
        Ability::HammerOfWrath,
        Ability::LayOnHands,
        Ability::RighteousFury,
        Ability::SealOfRighteousnessProc,
        Ability::SealOfCommandProc,
        Ability::SealOfMartyrdomProc,
        Ability::HolyShieldProc,
        Ability::RetributionAura,
        Ability::BastionOfLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ability::MeleeSwing => "Melee",
            Ability::SealOfRighteousness => "Seal of Righteousness",
            Ability::SealOfCommand => "Seal of Command",
            Ability::SealOfMartyrdom => "Seal of Martyrdom",
            Ability::Judgement => "Judgement",
            Ability::HolyShield => "Holy Shield",
            Ability::Consecration => "Consecration",
            Ability::HammerOfTheRighteous => "Hammer of the Righteous",
            Ability::Exorcism => "Exorcism",
            Ability::HolyShock => "Holy Shock",
            Ability::HammerOfWrath => "Hammer of Wrath",
            Ability::LayOnHands => "Lay on Hands",
            Ability::RighteousFury => "Righteous Fury",
            Ability::SealOfRighteousnessProc => "Seal of Righteousness (proc)",
            Ability::SealOfCommandProc => "Seal of Command (proc)",
            Ability::SealOfMartyrdomProc => "Seal of Martyrdom (proc)",
            Ability::HolyShieldProc => "Holy Shield (proc)",
            Ability::RetributionAura => "Retribution Aura",
            Ability::BastionOfLight => "Bastion of Light",
        }
    }

    pub fn school(self) -> School {
        match self {
            Ability::MeleeSwing => School::Physical,
            _ => School::Holy,
        }
    }

    pub fn hit_model(self) -> HitModel {
        match self {
            Ability::MeleeSwing => HitModel::MeleeWhite,
            Ability::HammerOfTheRighteous | Ability::SealOfCommandProc | Ability::SealOfMartyrdomProc => {
                HitModel::MeleeSpecial
            }
            Ability::Judgement
            | Ability::Exorcism
            | Ability::HolyShock
            | Ability::HammerOfWrath
            | Ability::HolyShieldProc => HitModel::Magic,
            _ => HitModel::AlwaysHit,
        }
    }

    /// Cooldown in seconds before talents, runes and set bonuses
    pub fn base_cooldown(self) -> f64 {
        match self {
            Ability::Judgement => 10.0,
            Ability::HolyShield => 10.0,
            Ability::Consecration => 8.0,
            Ability::HammerOfTheRighteous => 6.0,
            Ability::Exorcism => 15.0,
            Ability::HolyShock => 30.0,
            Ability::HammerOfWrath => 6.0,
            Ability::LayOnHands => 3600.0,
            _ => 0.0,
        }
    }

    pub fn on_gcd(self) -> bool {
        !matches!(
            self,
            Ability::Judgement
                | Ability::MeleeSwing
                | Ability::SealOfRighteousnessProc
                | Ability::SealOfCommandProc
                | Ability::SealOfMartyrdomProc
                | Ability::HolyShieldProc
                | Ability::RetributionAura
                | Ability::BastionOfLight
        )
    }

    pub fn cast_time(self) -> f64 {
        match self {
            Ability::HammerOfWrath => 1.0,
            _ => 0.0,
        }
    }

    /// Abilities a rotation may request
    pub fn is_castable(self) -> bool {
        matches!(
            self,
            Ability::SealOfRighteousness
                | Ability::SealOfCommand
                | Ability::SealOfMartyrdom
                | Ability::Judgement
                | Ability::HolyShield
                | Ability::Consecration
                | Ability::HammerOfTheRighteous
                | Ability::Exorcism
                | Ability::HolyShock
                | Ability::HammerOfWrath
                | Ability::LayOnHands
                | Ability::RighteousFury
        )
    }

    /// Bonus threat multiplier on top of the damage dealt
    pub fn threat_multiplier(self) -> f64 {
        match self {
            Ability::HolyShieldProc => 1.2,
            Ability::HammerOfTheRighteous => 1.5,
            _ => 1.0,
        }
    }

    pub fn ranks(self) -> &'static [Rank] {
        match self {
            Ability::SealOfRighteousness => SEAL_OF_RIGHTEOUSNESS,
            Ability::SealOfCommand => SEAL_OF_COMMAND,
            Ability::SealOfMartyrdom => SEAL_OF_MARTYRDOM,
            Ability::HolyShield => HOLY_SHIELD,
            Ability::Consecration => CONSECRATION,
            Ability::HammerOfTheRighteous => HAMMER_OF_THE_RIGHTEOUS,
            Ability::Exorcism => EXORCISM,
            Ability::HolyShock => HOLY_SHOCK,
            Ability::HammerOfWrath => HAMMER_OF_WRATH,
            Ability::LayOnHands => LAY_ON_HANDS,
            Ability::RighteousFury => RIGHTEOUS_FURY,
            _ => &[],
        }
    }

    /// Highest rank usable at `level`. Abilities without a rank table are
    /// always available at rank 0.
    pub fn rank_for_level(self, level: i32) -> Option<Rank> {
        let ranks = self.ranks();
        if ranks.is_empty() {
            return Some(Rank::UNRANKED);
        }
        ranks.iter().rev().find(|r| r.level <= level).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum School {
    Physical,
    Holy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitModel {
    /// Auto attack table including glancing blows
    MeleeWhite,
    /// Yellow melee table: miss, dodge, parry, crit, hit
    MeleeSpecial,
    /// Spell table: miss, crit, hit
    Magic,
    AlwaysHit,
}

/// One rank of a ranked ability.
///
/// `min`/`max` hold base damage or healing; for seals they hold the values
/// of the proc or of the matching judgement as noted per table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank {
    pub level: i32,
    pub min: f64,
    pub max: f64,
    pub mana: f64,
    pub coefficient: f64,
}

impl Rank {
    pub const UNRANKED: Rank = Rank { level: 1, min: 0.0, max: 0.0, mana: 0.0, coefficient: 0.0 };

    const fn new(level: i32, min: f64, max: f64, mana: f64, coefficient: f64) -> Self {
        Self { level, min, max, mana, coefficient }
    }
}

// min = per-swing proc damage at 4.0 speed, max = judgement damage
static SEAL_OF_RIGHTEOUSNESS: &[Rank] = &[
    Rank::new(1, 9.0, 15.0, 20.0, 0.1),
    Rank::new(10, 15.0, 26.0, 40.0, 0.1),
    Rank::new(18, 25.0, 41.0, 60.0, 0.1),
    Rank::new(26, 39.0, 60.0, 90.0, 0.1),
    Rank::new(34, 57.0, 82.0, 120.0, 0.1),
    Rank::new(42, 78.0, 107.0, 140.0, 0.1),
    Rank::new(50, 102.0, 138.0, 170.0, 0.1),
    Rank::new(58, 121.0, 169.0, 200.0, 0.1),
];

// min = proc weapon damage fraction, max = judgement damage
static SEAL_OF_COMMAND: &[Rank] = &[
    Rank::new(20, 0.7, 48.0, 65.0, 0.2),
    Rank::new(30, 0.7, 76.0, 110.0, 0.2),
    Rank::new(40, 0.7, 107.0, 140.0, 0.2),
    Rank::new(50, 0.7, 137.0, 180.0, 0.2),
    Rank::new(60, 0.7, 177.0, 210.0, 0.2),
];

// min = proc weapon damage fraction, max = judgement weapon damage fraction
static SEAL_OF_MARTYRDOM: &[Rank] = &[Rank::new(1, 0.5, 0.7, 60.0, 0.0)];

static HOLY_SHIELD: &[Rank] = &[
    Rank::new(40, 59.0, 59.0, 135.0, 0.05),
    Rank::new(50, 86.0, 86.0, 175.0, 0.05),
    Rank::new(60, 117.0, 117.0, 210.0, 0.05),
];

// Total damage over the full duration
static CONSECRATION: &[Rank] = &[
    Rank::new(20, 64.0, 64.0, 135.0, 0.042),
    Rank::new(30, 120.0, 120.0, 235.0, 0.042),
    Rank::new(40, 192.0, 192.0, 320.0, 0.042),
    Rank::new(50, 280.0, 280.0, 435.0, 0.042),
    Rank::new(60, 384.0, 384.0, 565.0, 0.042),
];

// min = weapon dps multiplier
static HAMMER_OF_THE_RIGHTEOUS: &[Rank] = &[Rank::new(1, 3.0, 3.0, 90.0, 0.0)];

static EXORCISM: &[Rank] = &[
    Rank::new(20, 90.0, 102.0, 85.0, 0.429),
    Rank::new(28, 160.0, 180.0, 135.0, 0.429),
    Rank::new(36, 227.0, 255.0, 180.0, 0.429),
    Rank::new(44, 316.0, 354.0, 235.0, 0.429),
    Rank::new(52, 407.0, 453.0, 285.0, 0.429),
    Rank::new(60, 505.0, 563.0, 345.0, 0.429),
];

static HOLY_SHOCK: &[Rank] = &[
    Rank::new(40, 204.0, 220.0, 225.0, 0.429),
    Rank::new(48, 279.0, 301.0, 275.0, 0.429),
    Rank::new(56, 365.0, 395.0, 325.0, 0.429),
];

static HAMMER_OF_WRATH: &[Rank] = &[
    Rank::new(44, 316.0, 348.0, 295.0, 0.429),
    Rank::new(52, 412.0, 455.0, 360.0, 0.429),
    Rank::new(60, 504.0, 556.0, 425.0, 0.429),
];

static LAY_ON_HANDS: &[Rank] = &[Rank::new(10, 0.0, 0.0, 0.0, 0.0)];

static RIGHTEOUS_FURY: &[Rank] = &[Rank::new(16, 0.0, 0.0, 85.0, 0.0)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, a) in Ability::ALL.iter().enumerate() {
            assert_eq!(*a as usize, i);
        }
    }

    #[test]
    fn picks_highest_rank_for_level() {
        let r = Ability::Exorcism.rank_for_level(45).unwrap();
        assert_eq!(r.level, 44);
        assert_eq!(r.min, 316.0);

        let r = Ability::Exorcism.rank_for_level(60).unwrap();
        assert_eq!(r.level, 60);
    }

    #[test]
    fn no_rank_below_required_level() {
        assert!(Ability::HolyShield.rank_for_level(39).is_none());
        assert!(Ability::HolyShock.rank_for_level(25).is_none());
        assert!(Ability::Judgement.rank_for_level(1).is_some());
    }

    #[test]
    fn rank_tables_are_sorted_by_level() {
        for a in Ability::ALL {
            let ranks = a.ranks();
            assert!(ranks.windows(2).all(|w| w[0].level < w[1].level), "{:?}", a);
        }
    }

    #[test]
    fn judgement_is_off_gcd() {
        assert!(!Ability::Judgement.on_gcd());
        assert!(Ability::HolyShield.on_gcd());
        assert!(!Ability::HolyShieldProc.is_castable());
    }
}
