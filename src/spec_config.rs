//! Per-spec presentation config and the process-wide spec registry

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use tracing::{error, info};

use crate::apl::Apl;
use crate::buffs::{Consumes, Debuffs, IndividualBuffs, PartyBuffs, RaidBuffs};
use crate::config::{GearSelection, OtherOptions, PaladinOptions, PlayerConfig, TalentSelection};
use crate::ep::StatWeights;
use crate::error::{Result, SimError};
use crate::player::Player;
use crate::player_data::{Faction, PaladinAura, PaladinSeal, Phase, Race, Spec};
use crate::presets::{GearPreset, RotationPreset, TalentPreset};
use crate::protection_paladin;
use crate::unit_stats::{PseudoStat, Stat};

/// Change stream that re-triggers a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningTrigger {
    PlayerChange,
}

/// User-facing warning derived from player state. An empty string means
/// nothing to show.
#[derive(Debug, Clone, Copy)]
pub struct Warning {
    pub update_on: WarningTrigger,
    pub get_content: fn(&Player) -> String,
}

/// Icon pickers in the player section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIconInput {
    PrimarySealSelection,
    AuraSelection,
}

impl PlayerIconInput {
    pub fn label(self) -> &'static str {
        match self {
            PlayerIconInput::PrimarySealSelection => "Primary Seal",
            PlayerIconInput::AuraSelection => "Aura",
        }
    }

    pub fn current_value(self, player: &Player) -> String {
        let options = player.get_spec_options();
        match self {
            PlayerIconInput::PrimarySealSelection => seal_name(options.primary_seal).to_string(),
            PlayerIconInput::AuraSelection => aura_name(options.aura).to_string(),
        }
    }
}

fn seal_name(seal: PaladinSeal) -> &'static str {
    match seal {
        PaladinSeal::NoSeal => "None",
        PaladinSeal::Righteousness => "Seal of Righteousness",
        PaladinSeal::Command => "Seal of Command",
        PaladinSeal::Martyrdom => "Seal of Martyrdom",
    }
}

fn aura_name(aura: PaladinAura) -> &'static str {
    match aura {
        PaladinAura::NoPaladinAura => "None",
        PaladinAura::DevotionAura => "Devotion Aura",
        PaladinAura::RetributionAura => "Retribution Aura",
        PaladinAura::SanctityAura => "Sanctity Aura",
    }
}

/// Buff or debuff toggles shown regardless of EP relevance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffDebuffInput {
    SpellScorchDebuff,
}

impl BuffDebuffInput {
    pub fn label(self) -> &'static str {
        match self {
            BuffDebuffInput::SpellScorchDebuff => "Improved Scorch",
        }
    }

    pub fn is_active(self, debuffs: &Debuffs) -> bool {
        match self {
            BuffDebuffInput::SpellScorchDebuff => debuffs.improved_scorch,
        }
    }
}

/// Fields of the "Other" settings section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherInput {
    TankAssignment,
    IncomingHps,
    HealingCadence,
    HealingCadenceVariation,
    BurstWindow,
    HpPercentForDefensives,
    InspirationUptime,
    InFrontOfTarget,
}

impl OtherInput {
    pub fn label(self) -> &'static str {
        match self {
            OtherInput::TankAssignment => "Tank Assignment",
            OtherInput::IncomingHps => "Incoming HPS",
            OtherInput::HealingCadence => "Healing Cadence",
            OtherInput::HealingCadenceVariation => "Cadence +/-",
            OtherInput::BurstWindow => "Burst Window",
            OtherInput::HpPercentForDefensives => "HP% for Defensives",
            OtherInput::InspirationUptime => "Inspiration Uptime",
            OtherInput::InFrontOfTarget => "In Front of Target",
        }
    }

    pub fn current_value(self, other: &OtherOptions) -> String {
        match self {
            OtherInput::TankAssignment if other.tank_assignment == 0 => "Main Tank".to_string(),
            OtherInput::TankAssignment => format!("Tank {}", other.tank_assignment + 1),
            OtherInput::IncomingHps if other.incoming_hps == 0.0 => "auto".to_string(),
            OtherInput::IncomingHps => format!("{:.0}", other.incoming_hps),
            OtherInput::HealingCadence => format!("{:.1}s", other.healing_cadence),
            OtherInput::HealingCadenceVariation => format!("{:.1}s", other.healing_cadence_variation),
            OtherInput::BurstWindow => format!("{:.0}s", other.burst_window),
            OtherInput::HpPercentForDefensives => format!("{:.0}%", other.hp_percent_for_defensives * 100.0),
            OtherInput::InspirationUptime => format!("{:.0}%", other.inspiration_uptime * 100.0),
            OtherInput::InFrontOfTarget => other.in_front_of_target.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncounterPicker {
    pub show_execute_proportion: bool,
}

/// Defaults applied to a fresh player of this spec
#[derive(Debug, Clone)]
pub struct SpecDefaults {
    pub gear: GearSelection,
    pub ep_weights: StatWeights,
    pub consumes: Consumes,
    pub talents: TalentSelection,
    pub spec_options: PaladinOptions,
    pub other: OtherOptions,
    pub raid_buffs: RaidBuffs,
    pub party_buffs: PartyBuffs,
    pub individual_buffs: IndividualBuffs,
    pub debuffs: Debuffs,
    pub race: Race,
}

impl SpecDefaults {
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            race: self.race,
            gear: self.gear.clone(),
            talents: self.talents.clone(),
            spec_options: self.spec_options,
            consumes: self.consumes.clone(),
            raid_buffs: self.raid_buffs.clone(),
            party_buffs: self.party_buffs.clone(),
            individual_buffs: self.individual_buffs.clone(),
            debuffs: self.debuffs.clone(),
            other: self.other,
            ..Default::default()
        }
    }
}

/// Quick-select catalogs
#[derive(Debug, Clone, Default)]
pub struct SpecPresets {
    pub rotations: Vec<&'static RotationPreset>,
    pub talents: Vec<&'static TalentPreset>,
    pub gear: Vec<&'static GearPreset>,
}

/// Spec entry for the raid simulator's player picker
#[derive(Debug, Clone)]
pub struct RaidSimPreset {
    pub spec: Spec,
    pub tooltip: &'static str,
    pub default_name: &'static str,
    pub icon_url: String,
    pub talents: TalentSelection,
    pub spec_options: PaladinOptions,
    pub consumes: Consumes,
    pub default_faction_races: HashMap<Faction, Race>,
    /// Gear preset name per faction, keyed by phase
    pub default_gear: HashMap<Faction, BTreeMap<Phase, &'static str>>,
}

/// Static description of one spec's simulator. Built once and never mutated.
#[derive(Debug, Clone)]
pub struct SpecConfig {
    pub css_class: &'static str,
    pub css_scheme: &'static str,
    pub known_issues: Vec<&'static str>,
    pub warnings: Vec<Warning>,
    pub ep_stats: Vec<Stat>,
    pub ep_pseudo_stats: Vec<PseudoStat>,
    pub ep_reference_stat: Stat,
    pub display_stats: Vec<Stat>,
    pub defaults: SpecDefaults,
    pub player_icon_inputs: Vec<PlayerIconInput>,
    pub include_buff_debuff_inputs: Vec<BuffDebuffInput>,
    pub exclude_buff_debuff_inputs: Vec<BuffDebuffInput>,
    pub other_inputs: Vec<OtherInput>,
    pub encounter_picker: EncounterPicker,
    pub presets: SpecPresets,
    pub auto_rotation: fn(&Player) -> Result<Apl>,
    pub raid_sim_presets: Vec<RaidSimPreset>,
}

impl SpecConfig {
    /// A player initialized from this spec's defaults
    pub fn default_player(&self) -> Player {
        Player::new(self.defaults.player_config())
    }
}

#[derive(Debug, Default)]
pub struct SpecRegistry {
    configs: HashMap<Spec, SpecConfig>,
}

impl SpecRegistry {
    /// Each spec registers once; a second registration fails
    pub fn register_spec_config(&mut self, spec: Spec, config: SpecConfig) -> Result<&SpecConfig> {
        if self.configs.contains_key(&spec) {
            return Err(SimError::DuplicateSpec(spec));
        }
        info!(?spec, css_class = config.css_class, "registered spec config");
        Ok(&*self.configs.entry(spec).or_insert(config))
    }

    pub fn get(&self, spec: Spec) -> Result<&SpecConfig> {
        self.configs.get(&spec).ok_or(SimError::SpecNotRegistered(spec))
    }

    pub fn specs(&self) -> impl Iterator<Item = Spec> + '_ {
        self.configs.keys().copied()
    }
}

fn build_registry() -> SpecRegistry {
    let mut registry = SpecRegistry::default();
    if let Err(e) = protection_paladin::register(&mut registry) {
        error!(%e, "failed to register protection paladin");
    }
    registry
}

/// Process-wide registry, populated on first access
pub fn spec_registry() -> &'static SpecRegistry {
    static REGISTRY: OnceLock<SpecRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

/// Registered config for `spec`
pub fn spec_config(spec: Spec) -> Result<&'static SpecConfig> {
    spec_registry().get(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = SpecRegistry::default();
        registry
            .register_spec_config(Spec::ProtectionPaladin, protection_paladin::build_spec_config())
            .unwrap();
        let err = registry
            .register_spec_config(Spec::ProtectionPaladin, protection_paladin::build_spec_config())
            .unwrap_err();
        assert!(matches!(err, SimError::DuplicateSpec(Spec::ProtectionPaladin)));
    }

    #[test]
    fn global_registry_has_protection_only() {
        assert!(spec_config(Spec::ProtectionPaladin).is_ok());
        assert!(matches!(
            spec_config(Spec::HolyPaladin),
            Err(SimError::SpecNotRegistered(Spec::HolyPaladin))
        ));
    }

    #[test]
    fn global_registry_is_a_single_instance() {
        assert!(std::ptr::eq(spec_registry(), spec_registry()));
    }

    #[test]
    fn other_input_values_render() {
        let other = OtherOptions::default();
        assert_eq!(OtherInput::TankAssignment.current_value(&other), "Main Tank");
        assert_eq!(OtherInput::IncomingHps.current_value(&other), "auto");
        assert_eq!(OtherInput::HpPercentForDefensives.current_value(&other), "30%");
    }

    #[test]
    fn seal_picker_shows_none_for_unset() {
        let mut player = Player::default();
        player.set_spec_options(PaladinOptions { primary_seal: PaladinSeal::NoSeal, ..Default::default() }).unwrap();
        assert_eq!(PlayerIconInput::PrimarySealSelection.current_value(&player), "None");
    }
}
