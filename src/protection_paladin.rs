//! Protection paladin UI binding

use std::collections::{BTreeMap, HashMap};

use crate::apl::Apl;
use crate::buffs::PartyBuffs;
use crate::config::{GearSelection, TalentSelection};
use crate::ep::{EpMetric, StatWeights};
use crate::error::Result;
use crate::player::Player;
use crate::player_data::{get_spec_icon, Class, Faction, PaladinSeal, Phase, Race, Spec};
use crate::presets;
use crate::sim_ui::{IndividualSimUi, ParentHandle, SimUi};
use crate::spec_config::{
    spec_config, BuffDebuffInput, EncounterPicker, OtherInput, PlayerIconInput, RaidSimPreset, SpecConfig, SpecDefaults,
    SpecPresets, SpecRegistry, Warning, WarningTrigger,
};
use crate::stats::AggregatedStats;
use crate::unit_stats::{PseudoStat, Stat};

pub const SEAL_WARNING: &str = "Your previously selected seal is no longer available because of a talent or rune change. No seal will be cast with this configuration. Please select an available seal in the Settings>Player menu.";

pub const KNOWN_ISSUES: [&str; 2] = [
    "Judgement of the Crusader is currently not implemented; users can manually award themselves the relevant spellpower amount for a dps gain that will be slightly inflated given JotC does not benefit from source damage modifiers.",
    "Be aware that not all item and weapon enchants are currently implemented in the sim, which make some notable Retribution weapons like Pendulum of Doom and The Jackhammer undervalued.",
];

/// Phase whose presets the picker offers
const PRESET_PHASE: Phase = Phase::Phase4;

fn seal_warning(player: &Player) -> String {
    if player.get_spec_options().primary_seal == PaladinSeal::NoSeal {
        SEAL_WARNING.to_string()
    } else {
        String::new()
    }
}

fn auto_rotation(player: &Player) -> Result<Apl> {
    presets::default_apl(player.get_level())
}

fn default_ep_weights() -> StatWeights {
    StatWeights::new(
        &[
            (Stat::Armor, 0.07),
            (Stat::BonusArmor, 0.06),
            (Stat::Stamina, 1.14),
            (Stat::Strength, 1.0),
            (Stat::Agility, 0.62),
            (Stat::AttackPower, 0.26),
            (Stat::MeleeHit, 0.79),
            (Stat::MeleeCrit, 0.3),
            (Stat::SpellPower, 0.13),
            (Stat::Block, 0.52),
            (Stat::BlockValue, 0.28),
            (Stat::Dodge, 0.46),
            (Stat::Parry, 0.61),
            (Stat::Defense, 0.54),
            (Stat::FireResistance, 0.5),
        ],
        &[(PseudoStat::MainHandDps, 3.33), (PseudoStat::MeleeSpeedMultiplier, 3.33)],
    )
}

fn raid_sim_preset() -> RaidSimPreset {
    let default_faction_races = HashMap::from([
        (Faction::Unknown, Race::Unknown),
        (Faction::Alliance, Race::Human),
        (Faction::Horde, Race::Unknown),
    ]);
    let alliance_gear: BTreeMap<Phase, &'static str> = presets::gear_presets_for(PRESET_PHASE)
        .take(1)
        .map(|p| (Phase::Phase1, p.name))
        .collect();
    let default_gear = HashMap::from([
        (Faction::Unknown, BTreeMap::new()),
        (Faction::Alliance, alliance_gear),
        (Faction::Horde, BTreeMap::new()),
    ]);
    RaidSimPreset {
        spec: Spec::ProtectionPaladin,
        tooltip: "Protection Paladin",
        default_name: "Protection",
        icon_url: get_spec_icon(Class::Paladin, Spec::ProtectionPaladin.tree_index()),
        talents: TalentSelection::Preset(presets::DEFAULT_TALENTS.to_string()),
        spec_options: presets::default_spec_options(),
        consumes: presets::default_consumes(),
        default_faction_races,
        default_gear,
    }
}

pub fn build_spec_config() -> SpecConfig {
    SpecConfig {
        css_class: "protection-paladin-sim-ui",
        css_scheme: "paladin",
        known_issues: KNOWN_ISSUES.to_vec(),
        warnings: vec![Warning { update_on: WarningTrigger::PlayerChange, get_content: seal_warning }],
        ep_stats: vec![
            Stat::Stamina,
            Stat::Strength,
            Stat::Agility,
            Stat::AttackPower,
            Stat::MeleeHit,
            Stat::SpellHit,
            Stat::MeleeCrit,
            Stat::MeleeHaste,
            Stat::SpellPower,
            Stat::Armor,
            Stat::BonusArmor,
            Stat::Defense,
            Stat::Block,
            Stat::BlockValue,
            Stat::Dodge,
            Stat::Parry,
            Stat::Resilience,
            Stat::NatureResistance,
            Stat::ShadowResistance,
            Stat::FrostResistance,
        ],
        ep_pseudo_stats: vec![PseudoStat::MainHandDps, PseudoStat::MeleeSpeedMultiplier],
        ep_reference_stat: Stat::AttackPower,
        display_stats: vec![
            Stat::Health,
            Stat::Armor,
            Stat::BonusArmor,
            Stat::Stamina,
            Stat::Strength,
            Stat::Agility,
            Stat::AttackPower,
            Stat::MeleeHit,
            Stat::MeleeCrit,
            Stat::SpellPower,
            Stat::SpellHit,
            Stat::Defense,
            Stat::Block,
            Stat::BlockValue,
            Stat::Dodge,
            Stat::Parry,
            Stat::Resilience,
            Stat::NatureResistance,
            Stat::ShadowResistance,
            Stat::FrostResistance,
        ],
        defaults: SpecDefaults {
            gear: GearSelection::Preset(presets::DEFAULT_GEAR.to_string()),
            ep_weights: default_ep_weights(),
            consumes: presets::default_consumes(),
            talents: TalentSelection::Preset(presets::DEFAULT_TALENTS.to_string()),
            spec_options: presets::default_spec_options(),
            other: presets::default_other_options(),
            raid_buffs: presets::default_raid_buffs(),
            party_buffs: PartyBuffs::default(),
            individual_buffs: presets::default_individual_buffs(),
            debuffs: presets::default_debuffs(),
            race: Race::Human,
        },
        player_icon_inputs: vec![PlayerIconInput::PrimarySealSelection, PlayerIconInput::AuraSelection],
        include_buff_debuff_inputs: vec![BuffDebuffInput::SpellScorchDebuff],
        exclude_buff_debuff_inputs: vec![],
        other_inputs: vec![
            OtherInput::TankAssignment,
            OtherInput::IncomingHps,
            OtherInput::HealingCadence,
            OtherInput::HealingCadenceVariation,
            OtherInput::BurstWindow,
            OtherInput::HpPercentForDefensives,
            OtherInput::InspirationUptime,
            OtherInput::InFrontOfTarget,
        ],
        encounter_picker: EncounterPicker { show_execute_proportion: false },
        presets: SpecPresets {
            rotations: presets::rotation_presets_for(PRESET_PHASE).collect(),
            talents: presets::talent_presets_for(PRESET_PHASE).collect(),
            gear: presets::gear_presets_for(PRESET_PHASE).collect(),
        },
        auto_rotation,
        raid_sim_presets: vec![raid_sim_preset()],
    }
}

pub fn register(registry: &mut SpecRegistry) -> Result<()> {
    registry.register_spec_config(Spec::ProtectionPaladin, build_spec_config())?;
    Ok(())
}

/// Protection paladin controller
#[derive(Debug)]
pub struct ProtectionPaladinSimUi {
    base: IndividualSimUi,
}

impl ProtectionPaladinSimUi {
    pub fn new(parent: ParentHandle, player: Player) -> Result<Self> {
        let config = spec_config(Spec::ProtectionPaladin)?;
        Ok(Self { base: IndividualSimUi::new(parent, Spec::ProtectionPaladin, player, config) })
    }

    pub fn base(&self) -> &IndividualSimUi {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut IndividualSimUi {
        &mut self.base
    }
}

impl SimUi for ProtectionPaladinSimUi {
    fn spec(&self) -> Spec {
        self.base.spec()
    }

    fn player(&self) -> &Player {
        self.base.player()
    }

    fn player_mut(&mut self) -> &mut Player {
        self.base.player_mut()
    }

    fn spec_config(&self) -> &'static SpecConfig {
        self.base.spec_config()
    }

    fn warnings(&mut self) -> Vec<String> {
        self.base.warnings()
    }

    fn run_simulation(&self, iterations: usize, parallel: bool) -> Result<AggregatedStats> {
        self.base.run_simulation(iterations, parallel)
    }

    fn compute_ep(&self, metric: EpMetric, iterations: usize) -> Result<StatWeights> {
        self.base.compute_ep(metric, iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaladinOptions, PlayerConfig};
    use crate::runes::ChestRune;
    use crate::talents::Talents;
    use std::collections::HashSet;

    /// Player whose talents and runes grant every seal
    fn player_with_seal(seal: PaladinSeal) -> Player {
        let mut config = PlayerConfig {
            talents: TalentSelection::Points(Talents { seal_of_command: 1, ..Default::default() }),
            ..Default::default()
        };
        config.runes.chest = Some(ChestRune::SealOfMartyrdom);
        let mut player = Player::new(config);
        player.set_spec_options(PaladinOptions { primary_seal: seal, ..Default::default() }).unwrap();
        assert_eq!(player.get_spec_options().primary_seal, seal);
        player
    }

    #[test]
    fn seal_warning_only_for_unset_seal() {
        assert_eq!(seal_warning(&player_with_seal(PaladinSeal::NoSeal)), SEAL_WARNING);
        for seal in [PaladinSeal::Righteousness, PaladinSeal::Command, PaladinSeal::Martyrdom] {
            assert_eq!(seal_warning(&player_with_seal(seal)), "");
        }
    }

    #[test]
    fn warning_text_is_exact() {
        assert!(SEAL_WARNING.starts_with("Your previously selected seal is no longer available"));
        assert!(SEAL_WARNING.ends_with("in the Settings>Player menu."));
    }

    #[test]
    fn known_issues_name_the_missing_effects() {
        let config = build_spec_config();
        assert_eq!(config.known_issues, KNOWN_ISSUES.to_vec());
        assert!(config.known_issues[0].starts_with("Judgement of the Crusader is currently not implemented; users can manually award"));
        assert!(config.known_issues[1].contains("Pendulum of Doom and The Jackhammer undervalued."));
        assert!(config.known_issues.iter().all(|i| !i.contains('\n') && !i.contains("  ")));
    }

    #[test]
    fn stat_lists_have_no_duplicates() {
        let config = build_spec_config();
        let ep: HashSet<_> = config.ep_stats.iter().collect();
        let display: HashSet<_> = config.display_stats.iter().collect();
        assert_eq!(ep.len(), config.ep_stats.len());
        assert_eq!(display.len(), config.display_stats.len());
    }

    #[test]
    fn presets_come_from_the_latest_phase() {
        let config = build_spec_config();
        assert!(!config.presets.rotations.is_empty());
        assert!(config.presets.gear.iter().all(|g| g.phase == PRESET_PHASE));
    }

    #[test]
    fn default_weights_rank_preset_gear() {
        let config = build_spec_config();
        let gear = presets::gear_presets_for(PRESET_PHASE).next().unwrap().gear().unwrap();
        let items: Vec<_> = gear.items.clone();
        let ranked = crate::ep::rank_items(&items, &config.defaults.ep_weights);
        assert_eq!(ranked.len(), items.len());
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(ranked[0].1 > 0.0);
    }

    #[test]
    fn raid_sim_preset_equips_alliance_only() {
        let preset = raid_sim_preset();
        assert_eq!(preset.default_faction_races[&Faction::Alliance], Race::Human);
        assert_eq!(preset.default_gear[&Faction::Alliance].len(), 1);
        assert!(preset.default_gear[&Faction::Horde].is_empty());
    }

    #[test]
    fn controller_delegates_to_base() {
        let mut ui = ProtectionPaladinSimUi::new("root".into(), player_with_seal(PaladinSeal::NoSeal)).unwrap();
        assert_eq!(ui.spec(), Spec::ProtectionPaladin);
        assert_eq!(ui.warnings(), vec![SEAL_WARNING.to_string()]);
        assert_eq!(ui.base().parent(), &ParentHandle::from("root"));
    }
}
