//! Built-in gear, talent and rotation presets for protection paladins

use crate::apl::{Apl, AplAction, AplActionKind, AplCondition, PrepullAction};
use crate::aura::AuraId;
use crate::buffs::{Consumes, Debuffs, Flask, Food, IndividualBuffs, RaidBuffs};
use crate::config::{OtherOptions, PaladinOptions};
use crate::error::{Result, SimError};
use crate::gear::{Gear, HandType, Item, ItemSlot};
use crate::item_sets::ItemSet;
use crate::player_data::{PaladinAura, PaladinSeal, Phase};
use crate::runes::{ChestRune, CloakRune, FeetRune, HeadRune, Runes, WaistRune, WristRune};
use crate::spells::Ability;
use crate::talents::Talents;
use crate::unit_stats::Stat;

pub const DEFAULT_GEAR: &str = "p4_protection";
pub const DEFAULT_TALENTS: &str = "p4_protection";

/// Phases with preset catalogs
pub const PRESET_PHASES: [Phase; 4] = [Phase::Phase1, Phase::Phase2, Phase::Phase3, Phase::Phase4];

#[derive(Debug, Clone, Copy)]
pub struct GearPreset {
    pub name: &'static str,
    pub phase: Phase,
    build: fn() -> Vec<Item>,
}

impl GearPreset {
    pub fn gear(&self) -> Result<Gear> {
        Gear::new((self.build)())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TalentPreset {
    pub name: &'static str,
    pub phase: Phase,
    build: fn() -> Talents,
}

impl TalentPreset {
    pub fn talents(&self) -> Talents {
        (self.build)()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RotationPreset {
    pub name: &'static str,
    pub phase: Phase,
    /// Level the rotation is tuned for
    pub level: i32,
    build: fn() -> Apl,
}

impl RotationPreset {
    pub fn apl(&self) -> Apl {
        (self.build)()
    }
}

pub static GEAR_PRESETS: &[GearPreset] = &[
    GearPreset { name: "p1_protection", phase: Phase::Phase1, build: p1_gear },
    GearPreset { name: "p2_protection", phase: Phase::Phase2, build: p2_gear },
    GearPreset { name: "p3_protection", phase: Phase::Phase3, build: p3_gear },
    GearPreset { name: "p4_protection", phase: Phase::Phase4, build: p4_gear },
];

pub static TALENT_PRESETS: &[TalentPreset] = &[
    TalentPreset { name: "p1_protection", phase: Phase::Phase1, build: p1_talents },
    TalentPreset { name: "p2_protection", phase: Phase::Phase2, build: p2_talents },
    TalentPreset { name: "p3_protection", phase: Phase::Phase3, build: p3_talents },
    TalentPreset { name: "p4_protection", phase: Phase::Phase4, build: p4_talents },
];

pub static ROTATION_PRESETS: &[RotationPreset] = &[
    RotationPreset { name: "p1_protection", phase: Phase::Phase1, level: 25, build: apl_25 },
    RotationPreset { name: "p2_protection", phase: Phase::Phase2, level: 40, build: apl_40 },
    RotationPreset { name: "p3_protection", phase: Phase::Phase3, level: 50, build: apl_50 },
    RotationPreset { name: "p4_protection", phase: Phase::Phase4, level: 60, build: apl_60 },
];

fn key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

pub fn gear_preset(name: &str) -> Result<Gear> {
    let k = key(name);
    GEAR_PRESETS
        .iter()
        .find(|p| p.name == k)
        .ok_or_else(|| SimError::UnknownPreset { kind: "gear", name: name.to_string() })?
        .gear()
}

pub fn talent_preset(name: &str) -> Result<Talents> {
    let k = key(name);
    TALENT_PRESETS
        .iter()
        .find(|p| p.name == k)
        .map(|p| p.talents())
        .ok_or_else(|| SimError::UnknownPreset { kind: "talents", name: name.to_string() })
}

pub fn rotation_preset(name: &str) -> Result<Apl> {
    let k = key(name);
    ROTATION_PRESETS
        .iter()
        .find(|p| p.name == k)
        .map(|p| p.apl())
        .ok_or_else(|| SimError::UnknownPreset { kind: "rotation", name: name.to_string() })
}

/// Talents of the latest phase whose level cap the player has reached.
/// Below the first cap no points are spent.
pub fn talents_for_level(level: i32) -> Talents {
    TALENT_PRESETS
        .iter()
        .rev()
        .find(|p| p.phase.level_cap() <= level)
        .map(|p| p.talents())
        .unwrap_or_default()
}

/// Default rotation for `level`: the preset tuned for the highest level not
/// above it.
pub fn default_apl(level: i32) -> Result<Apl> {
    ROTATION_PRESETS
        .iter()
        .rev()
        .find(|p| p.level <= level)
        .map(|p| p.apl())
        .ok_or(SimError::NoDefaultRotation(level))
}

/// Levels with a dedicated default rotation
pub fn default_apl_levels() -> impl Iterator<Item = i32> {
    ROTATION_PRESETS.iter().map(|p| p.level)
}

pub fn gear_presets_for(phase: Phase) -> impl Iterator<Item = &'static GearPreset> {
    GEAR_PRESETS.iter().filter(move |p| p.phase == phase)
}

pub fn talent_presets_for(phase: Phase) -> impl Iterator<Item = &'static TalentPreset> {
    TALENT_PRESETS.iter().filter(move |p| p.phase == phase)
}

pub fn rotation_presets_for(phase: Phase) -> impl Iterator<Item = &'static RotationPreset> {
    ROTATION_PRESETS.iter().filter(move |p| p.phase == phase)
}

pub fn default_runes() -> Runes {
    Runes {
        head: Some(HeadRune::Fanaticism),
        chest: Some(ChestRune::Aegis),
        waist: Some(WaistRune::SheathOfLight),
        feet: Some(FeetRune::TheArtOfWar),
        wrist: Some(WristRune::HammerOfTheRighteous),
        cloak: Some(CloakRune::ShockAndAwe),
    }
}

pub fn default_spec_options() -> PaladinOptions {
    PaladinOptions {
        primary_seal: PaladinSeal::Righteousness,
        aura: PaladinAura::DevotionAura,
        righteous_fury: true,
    }
}

pub fn default_consumes() -> Consumes {
    Consumes {
        flask: Flask::FlaskOfTheTitans,
        food: Food::DirgesKickinChimaerokChops,
        elixir_of_the_mongoose: true,
        elixir_of_superior_defense: true,
        elixir_of_fortitude: true,
        juju_power: true,
        greater_arcane_elixir: false,
    }
}

pub fn default_raid_buffs() -> RaidBuffs {
    RaidBuffs {
        arcane_brilliance: true,
        gift_of_the_wild: true,
        power_word_fortitude: true,
        battle_shout: true,
        trueshot_aura: false,
    }
}

pub fn default_individual_buffs() -> IndividualBuffs {
    IndividualBuffs {
        blessing_of_kings: true,
        blessing_of_might: false,
        blessing_of_sanctuary: true,
        blessing_of_wisdom: true,
    }
}

pub fn default_debuffs() -> Debuffs {
    Debuffs {
        sunder_armor: true,
        faerie_fire: true,
        curse_of_recklessness: false,
        demoralizing_shout: true,
        thunder_clap: true,
        improved_scorch: true,
    }
}

pub fn default_other_options() -> OtherOptions {
    OtherOptions::default()
}

// Gear

fn p1_gear() -> Vec<Item> {
    vec![
        Item::new(211502, "Lightforged Barbute", ItemSlot::Head, &[(Stat::Armor, 241.0), (Stat::Stamina, 7.0), (Stat::Strength, 5.0)]),
        Item::new(209422, "High Tide Choker", ItemSlot::Neck, &[(Stat::Stamina, 5.0), (Stat::Defense, 3.0)]),
        Item::new(211505, "Blackfathom Plate Chest", ItemSlot::Chest, &[(Stat::Armor, 310.0), (Stat::Stamina, 9.0), (Stat::Strength, 6.0)]),
        Item::new(209568, "Twilight Invoker's Bracers", ItemSlot::Wrist, &[(Stat::Armor, 120.0), (Stat::Stamina, 4.0)]),
        Item::new(211456, "Ghamoo-ra's Bind", ItemSlot::Waist, &[(Stat::Armor, 165.0), (Stat::Stamina, 5.0), (Stat::Defense, 2.0)]),
        Item::new(209672, "Deepwarden Greaves", ItemSlot::Legs, &[(Stat::Armor, 265.0), (Stat::Stamina, 8.0), (Stat::Agility, 4.0)]),
        Item::new(209423, "Flameseer Mantle", ItemSlot::Shoulder, &[(Stat::Armor, 210.0), (Stat::Stamina, 5.0)]),
        Item::new(211458, "Twilight Slayer's Band", ItemSlot::Finger1, &[(Stat::MeleeHit, 1.0), (Stat::Stamina, 3.0)]),
        Item::new(209562, "Deadly Strike of the Hydra", ItemSlot::MainHand, &[(Stat::Strength, 4.0), (Stat::Stamina, 3.0)])
            .with_weapon(22.0, 42.0, 2.6, HandType::OneHand),
        Item::new(209524, "Tidecaller's Shield", ItemSlot::OffHand, &[(Stat::Armor, 550.0), (Stat::BlockValue, 11.0), (Stat::Block, 1.0)])
            .shield(),
    ]
}

fn p2_gear() -> Vec<Item> {
    vec![
        Item::new(213314, "Irradiated Plate Helm", ItemSlot::Head, &[(Stat::Armor, 390.0), (Stat::Stamina, 13.0), (Stat::Strength, 9.0), (Stat::Defense, 4.0)]),
        Item::new(213344, "Gnomeregan Guardian Pendant", ItemSlot::Neck, &[(Stat::Stamina, 8.0), (Stat::Dodge, 1.0)]),
        Item::new(213312, "Irradiated Breastplate", ItemSlot::Chest, &[(Stat::Armor, 480.0), (Stat::Stamina, 16.0), (Stat::Strength, 10.0)]),
        Item::new(213315, "Irradiated Gauntlets", ItemSlot::Hands, &[(Stat::Armor, 300.0), (Stat::Stamina, 9.0), (Stat::Defense, 3.0)]),
        Item::new(213316, "Irradiated Plate Legguards", ItemSlot::Legs, &[(Stat::Armor, 420.0), (Stat::Stamina, 15.0), (Stat::Agility, 6.0)]),
        Item::new(213317, "Irradiated Sabatons", ItemSlot::Feet, &[(Stat::Armor, 330.0), (Stat::Stamina, 10.0)]),
        Item::new(213350, "Electromagnetic Hyperflux Reactivator", ItemSlot::Trinket1, &[(Stat::BonusArmor, 250.0)]),
        Item::new(213409, "Mekkatorque's Arcano-Shredder", ItemSlot::MainHand, &[(Stat::Strength, 7.0), (Stat::SpellPower, 10.0)])
            .with_weapon(38.0, 72.0, 2.5, HandType::OneHand),
        Item::new(213341, "Glowing Hyperconductive Scale Shield", ItemSlot::OffHand, &[(Stat::Armor, 1460.0), (Stat::BlockValue, 20.0), (Stat::Stamina, 7.0)])
            .shield(),
    ]
}

fn p3_gear() -> Vec<Item> {
    vec![
        Item::new(220533, "Fanatic Warplate Helm", ItemSlot::Head, &[(Stat::Armor, 520.0), (Stat::Stamina, 19.0), (Stat::Strength, 12.0), (Stat::Defense, 6.0)])
            .with_set(ItemSet::EmeraldEncrustedBattleplate),
        Item::new(220535, "Fanatic Warplate Chestguard", ItemSlot::Chest, &[(Stat::Armor, 640.0), (Stat::Stamina, 21.0), (Stat::Strength, 12.0)])
            .with_set(ItemSet::EmeraldEncrustedBattleplate),
        Item::new(220537, "Fanatic Warplate Legplates", ItemSlot::Legs, &[(Stat::Armor, 560.0), (Stat::Stamina, 18.0), (Stat::Parry, 1.0)])
            .with_set(ItemSet::EmeraldEncrustedBattleplate),
        Item::new(220591, "Hakkari Bloodwarder Girdle", ItemSlot::Waist, &[(Stat::Armor, 360.0), (Stat::Stamina, 12.0), (Stat::Defense, 5.0)]),
        Item::new(220620, "Tarnished Elven Ring", ItemSlot::Finger1, &[(Stat::Agility, 8.0), (Stat::Dodge, 1.0)]),
        Item::new(220612, "Drakeclaw Band", ItemSlot::Finger2, &[(Stat::Stamina, 10.0), (Stat::MeleeHit, 1.0)]),
        Item::new(220582, "Fist of Stone", ItemSlot::MainHand, &[(Stat::Stamina, 9.0), (Stat::Strength, 9.0)])
            .with_weapon(62.0, 116.0, 2.6, HandType::OneHand),
        Item::new(220599, "Drakestone of the Blood Prince", ItemSlot::OffHand, &[(Stat::Armor, 2150.0), (Stat::BlockValue, 32.0), (Stat::Stamina, 10.0), (Stat::Block, 2.0)])
            .shield(),
    ]
}

fn p4_gear() -> Vec<Item> {
    vec![
        Item::new(226431, "Lawbringer Helm", ItemSlot::Head, &[(Stat::Armor, 680.0), (Stat::Stamina, 24.0), (Stat::Strength, 14.0), (Stat::Defense, 8.0)])
            .with_set(ItemSet::LawbringerWill),
        Item::new(226433, "Lawbringer Spaulders", ItemSlot::Shoulder, &[(Stat::Armor, 610.0), (Stat::Stamina, 17.0), (Stat::Defense, 6.0)])
            .with_set(ItemSet::LawbringerWill),
        Item::new(226435, "Lawbringer Chestguard", ItemSlot::Chest, &[(Stat::Armor, 820.0), (Stat::Stamina, 26.0), (Stat::Strength, 16.0)])
            .with_set(ItemSet::LawbringerWill),
        Item::new(226437, "Lawbringer Legplates", ItemSlot::Legs, &[(Stat::Armor, 720.0), (Stat::Stamina, 22.0), (Stat::Block, 2.0)])
            .with_set(ItemSet::LawbringerWill),
        Item::new(227801, "Onslaught Girdle", ItemSlot::Waist, &[(Stat::Armor, 470.0), (Stat::Strength, 21.0), (Stat::MeleeHit, 1.0), (Stat::MeleeCrit, 1.0)]),
        Item::new(227830, "Sabatons of the Flamewalker", ItemSlot::Feet, &[(Stat::Armor, 560.0), (Stat::Stamina, 15.0), (Stat::Dodge, 1.0)]),
        Item::new(227990, "Heavy Dark Iron Ring", ItemSlot::Finger1, &[(Stat::Stamina, 20.0), (Stat::BonusArmor, 110.0), (Stat::Defense, 5.0)]),
        Item::new(228135, "Mark of Tyranny", ItemSlot::Trinket1, &[(Stat::BonusArmor, 180.0), (Stat::MeleeHit, 1.0)]),
        Item::new(227920, "Deathbringer", ItemSlot::MainHand, &[(Stat::Strength, 12.0), (Stat::Stamina, 10.0)])
            .with_weapon(114.0, 213.0, 2.9, HandType::OneHand),
        Item::new(228020, "Elementium Reinforced Bulwark", ItemSlot::OffHand, &[(Stat::Armor, 2950.0), (Stat::BlockValue, 48.0), (Stat::Stamina, 12.0), (Stat::Defense, 5.0)])
            .shield(),
    ]
}

// Talents

fn p1_talents() -> Talents {
    Talents {
        redoubt: 5,
        precision: 3,
        toughness: 5,
        improved_righteous_fury: 3,
        ..Default::default()
    }
}

fn p2_talents() -> Talents {
    Talents {
        divine_strength: 1,
        redoubt: 5,
        precision: 3,
        toughness: 5,
        improved_righteous_fury: 3,
        shield_specialization: 3,
        anticipation: 5,
        one_handed_weapon_specialization: 5,
        holy_shield: 1,
        ..Default::default()
    }
}

fn p3_talents() -> Talents {
    Talents {
        divine_strength: 5,
        deflection: 5,
        improved_judgement: 1,
        ..p2_talents()
    }
}

fn p4_talents() -> Talents {
    Talents {
        divine_strength: 5,
        consecration: 1,
        redoubt: 5,
        precision: 3,
        toughness: 5,
        improved_righteous_fury: 3,
        shield_specialization: 3,
        anticipation: 5,
        one_handed_weapon_specialization: 5,
        holy_shield: 1,
        benediction: 5,
        improved_judgement: 2,
        deflection: 5,
        conviction: 3,
        ..Default::default()
    }
}

// Rotations

fn righteous_fury_prepull() -> PrepullAction {
    PrepullAction { action: AplActionKind::Cast(Ability::RighteousFury), offset: -3.0 }
}

fn seal_prepull() -> PrepullAction {
    PrepullAction { action: AplActionKind::CastPrimarySeal, offset: -1.5 }
}

fn defensive() -> AplAction {
    AplAction::cast(Ability::LayOnHands).when(AplCondition::BelowDefensiveThreshold)
}

fn reseal() -> AplAction {
    AplAction::primary_seal().when(AplCondition::SealInactive)
}

fn apl_25() -> Apl {
    Apl {
        prepull: vec![righteous_fury_prepull(), seal_prepull()],
        priority_list: vec![
            defensive(),
            AplAction::cast(Ability::RighteousFury).when(AplCondition::AuraInactive(AuraId::RighteousFury)),
            reseal(),
            AplAction::cast(Ability::HammerOfTheRighteous),
            AplAction::cast(Ability::Judgement).when(AplCondition::ManaPercentAbove(20.0)),
            AplAction::cast(Ability::Exorcism).when(AplCondition::TargetUndeadOrDemon),
            AplAction::cast(Ability::Consecration).when(AplCondition::ManaPercentAbove(40.0)),
        ],
    }
}

fn apl_40() -> Apl {
    Apl {
        prepull: vec![righteous_fury_prepull(), seal_prepull()],
        priority_list: vec![
            defensive(),
            AplAction::cast(Ability::RighteousFury).when(AplCondition::AuraInactive(AuraId::RighteousFury)),
            AplAction::cast(Ability::HolyShield).when(AplCondition::AuraInactive(AuraId::HolyShield)),
            reseal(),
            AplAction::cast(Ability::HammerOfTheRighteous),
            AplAction::cast(Ability::Judgement).when(AplCondition::ManaPercentAbove(20.0)),
            AplAction::cast(Ability::Exorcism),
            AplAction::cast(Ability::Consecration).when(AplCondition::ManaPercentAbove(40.0)),
        ],
    }
}

fn apl_50() -> Apl {
    Apl {
        prepull: vec![righteous_fury_prepull(), seal_prepull()],
        priority_list: vec![
            defensive(),
            AplAction::cast(Ability::RighteousFury).when(AplCondition::AuraInactive(AuraId::RighteousFury)),
            AplAction::cast(Ability::HolyShield).when(AplCondition::AuraInactive(AuraId::HolyShield)),
            reseal(),
            AplAction::cast(Ability::HammerOfWrath).when(AplCondition::ExecutePhase),
            AplAction::cast(Ability::HammerOfTheRighteous),
            AplAction::cast(Ability::Judgement).when(AplCondition::ManaPercentAbove(20.0)),
            AplAction::cast(Ability::Exorcism),
            AplAction::cast(Ability::HolyShock).when(AplCondition::ManaPercentAbove(50.0)),
            AplAction::cast(Ability::Consecration).when(AplCondition::ManaPercentAbove(40.0)),
        ],
    }
}

fn apl_60() -> Apl {
    Apl {
        prepull: vec![righteous_fury_prepull(), seal_prepull()],
        priority_list: vec![
            defensive(),
            AplAction::cast(Ability::RighteousFury).when(AplCondition::AuraInactive(AuraId::RighteousFury)),
            AplAction::cast(Ability::HolyShield).when(AplCondition::Or(vec![
                AplCondition::AuraInactive(AuraId::HolyShield),
                AplCondition::AuraStacksBelow { aura: AuraId::HolyShield, stacks: 2 },
            ])),
            reseal(),
            AplAction::cast(Ability::HammerOfWrath).when(AplCondition::ExecutePhase),
            AplAction::cast(Ability::HammerOfTheRighteous),
            AplAction::cast(Ability::Exorcism).when(AplCondition::TargetUndeadOrDemon),
            AplAction::cast(Ability::Judgement).when(AplCondition::ManaPercentAbove(15.0)),
            AplAction::cast(Ability::Consecration).when(AplCondition::ManaPercentAbove(30.0)),
            AplAction::cast(Ability::Exorcism).when(AplCondition::ManaPercentAbove(50.0)),
            AplAction::cast(Ability::HolyShock).when(AplCondition::ManaPercentAbove(60.0)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_phase_has_presets() {
        for phase in PRESET_PHASES {
            assert!(gear_presets_for(phase).count() > 0, "{:?}", phase);
            assert!(talent_presets_for(phase).count() > 0, "{:?}", phase);
            assert!(rotation_presets_for(phase).count() > 0, "{:?}", phase);
        }
    }

    #[test]
    fn gear_presets_are_valid_and_carry_a_shield() {
        for p in GEAR_PRESETS {
            let gear = p.gear().unwrap();
            assert!(gear.has_shield(), "{}", p.name);
            assert!(gear.main_hand().is_some(), "{}", p.name);
        }
    }

    #[test]
    fn talent_presets_fit_their_phase_cap() {
        for p in TALENT_PRESETS {
            assert!(p.talents().validate(p.phase.level_cap()).is_ok(), "{}", p.name);
        }
    }

    #[test]
    fn default_apl_for_each_keyed_level() {
        for level in default_apl_levels() {
            assert!(!default_apl(level).unwrap().priority_list.is_empty());
        }
        assert_eq!(default_apl(55).unwrap(), apl_50());
        assert!(matches!(default_apl(10), Err(SimError::NoDefaultRotation(10))));
    }

    #[test]
    fn lookup_is_loose_and_reports_unknown() {
        assert!(gear_preset("P4 Protection").is_ok());
        assert!(talent_preset("p2-protection").is_ok());
        assert!(matches!(rotation_preset("dps"), Err(SimError::UnknownPreset { kind: "rotation", .. })));
    }

    #[test]
    fn talents_follow_level() {
        assert_eq!(talents_for_level(20), Talents::default());
        assert_eq!(talents_for_level(45), p2_talents());
        assert_eq!(talents_for_level(60), p4_talents());
    }
}
