//! Configuration structures for loading build YAML/JSON files

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::apl::Apl;
use crate::buffs::{Consumes, Debuffs, IndividualBuffs, PartyBuffs, RaidBuffs};
use crate::encounter::EncounterConfig;
use crate::error::{Result, SimError};
use crate::gear::{Gear, Item};
use crate::player_data::{PaladinAura, PaladinSeal, Race};
use crate::presets;
use crate::runes::Runes;
use crate::talents::Talents;
use crate::unit_stats::Stats;

/// Protection paladin spec options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaladinOptions {
    pub primary_seal: PaladinSeal,
    pub aura: PaladinAura,
    /// Keep Righteous Fury up for the whole fight
    pub righteous_fury: bool,
}

impl Default for PaladinOptions {
    fn default() -> Self {
        Self {
            primary_seal: PaladinSeal::Righteousness,
            aura: PaladinAura::DevotionAura,
            righteous_fury: true,
        }
    }
}

/// Tank and healing model inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherOptions {
    /// 0 = main tank (the target attacks this player), >0 = off tank
    pub tank_assignment: i32,
    /// External healing per second; 0 derives it from the target's damage
    pub incoming_hps: f64,
    /// Seconds between heals
    pub healing_cadence: f64,
    /// Uniform jitter on the cadence, in seconds
    pub healing_cadence_variation: f64,
    /// Window for the worst-case damage spike, in seconds
    pub burst_window: f64,
    /// Defensive cooldowns fire below this share of max health (0..=1)
    pub hp_percent_for_defensives: f64,
    /// Share of the fight with Inspiration (+25% armor) up
    pub inspiration_uptime: f64,
    pub in_front_of_target: bool,
}

impl Default for OtherOptions {
    fn default() -> Self {
        Self {
            tank_assignment: 0,
            incoming_hps: 0.0,
            healing_cadence: 2.0,
            healing_cadence_variation: 0.5,
            burst_window: 6.0,
            hp_percent_for_defensives: 0.3,
            inspiration_uptime: 0.0,
            in_front_of_target: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GearSelection {
    Preset(String),
    Items(Vec<Item>),
}

impl Default for GearSelection {
    fn default() -> Self {
        GearSelection::Preset(presets::DEFAULT_GEAR.to_string())
    }
}

/// `"auto"` picks the talent preset matching the player's level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TalentSelection {
    Preset(String),
    Points(Talents),
}

impl Default for TalentSelection {
    fn default() -> Self {
        TalentSelection::Preset("auto".to_string())
    }
}

/// `"auto"` picks the default rotation for the player's level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotationSelection {
    Named(String),
    Custom(Apl),
}

impl Default for RotationSelection {
    fn default() -> Self {
        RotationSelection::Named("auto".to_string())
    }
}

/// Everything about the simulated paladin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub level: i32,
    pub race: Race,
    pub gear: GearSelection,
    pub talents: TalentSelection,
    pub runes: Runes,
    pub spec_options: PaladinOptions,
    pub consumes: Consumes,
    pub raid_buffs: RaidBuffs,
    pub party_buffs: PartyBuffs,
    pub individual_buffs: IndividualBuffs,
    pub debuffs: Debuffs,
    pub other: OtherOptions,
    pub rotation: RotationSelection,
    /// Flat stats added on top of everything else
    pub bonus_stats: Stats,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            level: 60,
            race: Race::Human,
            gear: GearSelection::default(),
            talents: TalentSelection::default(),
            runes: presets::default_runes(),
            spec_options: presets::default_spec_options(),
            consumes: presets::default_consumes(),
            raid_buffs: presets::default_raid_buffs(),
            party_buffs: PartyBuffs::default(),
            individual_buffs: presets::default_individual_buffs(),
            debuffs: presets::default_debuffs(),
            other: presets::default_other_options(),
            rotation: RotationSelection::default(),
            bonus_stats: Stats::default(),
        }
    }
}

impl PlayerConfig {
    pub fn resolve_gear(&self) -> Result<Gear> {
        match &self.gear {
            GearSelection::Preset(name) => presets::gear_preset(name),
            GearSelection::Items(items) => Gear::new(items.clone()),
        }
    }

    pub fn resolve_talents(&self) -> Result<Talents> {
        match &self.talents {
            TalentSelection::Preset(name) if name.eq_ignore_ascii_case("auto") => Ok(presets::talents_for_level(self.level)),
            TalentSelection::Preset(name) => presets::talent_preset(name),
            TalentSelection::Points(t) => Ok(t.clone()),
        }
    }

    pub fn resolve_rotation(&self) -> Result<Apl> {
        match &self.rotation {
            RotationSelection::Named(name) if name.eq_ignore_ascii_case("auto") => presets::default_apl(self.level),
            RotationSelection::Named(name) => presets::rotation_preset(name),
            RotationSelection::Custom(apl) => Ok(apl.clone()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=60).contains(&self.level) {
            return Err(SimError::InvalidConfig(format!("level {} outside 1..=60", self.level)));
        }
        let o = &self.other;
        if o.incoming_hps < 0.0 {
            return Err(SimError::InvalidConfig("incoming HPS must not be negative".into()));
        }
        if o.healing_cadence <= 0.0 {
            return Err(SimError::InvalidConfig("healing cadence must be positive".into()));
        }
        if o.healing_cadence_variation < 0.0 {
            return Err(SimError::InvalidConfig("healing cadence variation must not be negative".into()));
        }
        if o.burst_window <= 0.0 {
            return Err(SimError::InvalidConfig("burst window must be positive".into()));
        }
        if !(0.0..=1.0).contains(&o.inspiration_uptime) {
            return Err(SimError::InvalidConfig("inspiration uptime must be in 0..=1".into()));
        }
        if !(0.0..=1.0).contains(&o.hp_percent_for_defensives) {
            return Err(SimError::InvalidConfig("HP% for defensives must be in 0..=1".into()));
        }
        self.resolve_gear()?;
        self.resolve_talents()?.validate(self.level)?;
        self.resolve_rotation()?;
        Ok(())
    }
}

fn default_iterations() -> usize {
    1000
}

/// Full simulation input loaded from YAML/JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub encounter: EncounterConfig,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Base seed; iteration `i` uses `seed + i`. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            encounter: EncounterConfig::default(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load from a file, JSON when the extension says so, YAML otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SimError::InvalidConfig("iterations must be at least 1".into()));
        }
        self.encounter.validate()?;
        self.player.validate()
    }
}
