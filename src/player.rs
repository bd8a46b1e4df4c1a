//! Editable player build with change notifications
//!
//! Every setter bumps the emitter generation and calls the registered
//! listeners. Views that derive text from the player (warnings, stat
//! sheets) compare generations to know when to recompute.

use std::fmt;
use tracing::{debug, warn};

use crate::buffs::{Consumes, Debuffs, IndividualBuffs, PartyBuffs, RaidBuffs};
use crate::character::available_seals;
use crate::config::{GearSelection, OtherOptions, PaladinOptions, PlayerConfig, RotationSelection, SimConfig, TalentSelection};
use crate::encounter::EncounterConfig;
use crate::error::Result;
use crate::player_data::{PaladinSeal, Race};
use crate::runes::Runes;
use crate::unit_stats::Stats;

pub type ChangeListener = Box<dyn Fn(u64) + Send + Sync>;

/// Generation counter plus listeners called on each change
#[derive(Default)]
pub struct ChangeEmitter {
    generation: u64,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for ChangeEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChangeEmitter {
    /// Number of changes emitted so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn on<F>(&mut self, listener: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self) {
        self.generation += 1;
        for listener in &self.listeners {
            listener(self.generation);
        }
    }
}

#[derive(Debug, Default)]
pub struct Player {
    config: PlayerConfig,
    change_emitter: ChangeEmitter,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config, change_emitter: ChangeEmitter::default() }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn change_emitter(&self) -> &ChangeEmitter {
        &self.change_emitter
    }

    pub fn change_emitter_mut(&mut self) -> &mut ChangeEmitter {
        &mut self.change_emitter
    }

    fn changed(&mut self, what: &'static str) {
        self.change_emitter.emit();
        debug!(what, generation = self.change_emitter.generation(), "player changed");
    }

    /// Clear the primary seal when the current talents and runes no longer
    /// grant it.
    fn reconcile_seal(&mut self) -> Result<()> {
        let seal = self.config.spec_options.primary_seal;
        if seal == PaladinSeal::NoSeal {
            return Ok(());
        }
        let talents = self.config.resolve_talents()?;
        if !available_seals(self.config.level, &talents, &self.config.runes).contains(&seal) {
            warn!(?seal, "primary seal no longer available");
            self.config.spec_options.primary_seal = PaladinSeal::NoSeal;
        }
        Ok(())
    }

    pub fn get_level(&self) -> i32 {
        self.config.level
    }

    /// Level also drives "auto" talents, so the seal is reconciled too
    pub fn set_level(&mut self, level: i32) -> Result<()> {
        let previous = std::mem::replace(&mut self.config.level, level);
        if let Err(e) = self.reconcile_seal() {
            self.config.level = previous;
            return Err(e);
        }
        self.changed("level");
        Ok(())
    }

    pub fn get_race(&self) -> Race {
        self.config.race
    }

    pub fn set_race(&mut self, race: Race) {
        self.config.race = race;
        self.changed("race");
    }

    pub fn get_gear(&self) -> &GearSelection {
        &self.config.gear
    }

    pub fn set_gear(&mut self, gear: GearSelection) {
        self.config.gear = gear;
        self.changed("gear");
    }

    pub fn get_talents(&self) -> &TalentSelection {
        &self.config.talents
    }

    /// Fails without changing anything when the selection names an
    /// unknown preset.
    pub fn set_talents(&mut self, talents: TalentSelection) -> Result<()> {
        let previous = std::mem::replace(&mut self.config.talents, talents);
        if let Err(e) = self.reconcile_seal() {
            self.config.talents = previous;
            return Err(e);
        }
        self.changed("talents");
        Ok(())
    }

    pub fn get_runes(&self) -> Runes {
        self.config.runes
    }

    pub fn set_runes(&mut self, runes: Runes) -> Result<()> {
        let previous = std::mem::replace(&mut self.config.runes, runes);
        if let Err(e) = self.reconcile_seal() {
            self.config.runes = previous;
            return Err(e);
        }
        self.changed("runes");
        Ok(())
    }

    pub fn get_spec_options(&self) -> PaladinOptions {
        self.config.spec_options
    }

    /// A seal the current talents and runes do not grant is stored as
    /// NoSeal, which raises the seal warning.
    pub fn set_spec_options(&mut self, options: PaladinOptions) -> Result<()> {
        let previous = std::mem::replace(&mut self.config.spec_options, options);
        if let Err(e) = self.reconcile_seal() {
            self.config.spec_options = previous;
            return Err(e);
        }
        self.changed("spec_options");
        Ok(())
    }

    pub fn get_consumes(&self) -> &Consumes {
        &self.config.consumes
    }

    pub fn set_consumes(&mut self, consumes: Consumes) {
        self.config.consumes = consumes;
        self.changed("consumes");
    }

    pub fn get_raid_buffs(&self) -> &RaidBuffs {
        &self.config.raid_buffs
    }

    pub fn set_raid_buffs(&mut self, buffs: RaidBuffs) {
        self.config.raid_buffs = buffs;
        self.changed("raid_buffs");
    }

    pub fn get_party_buffs(&self) -> &PartyBuffs {
        &self.config.party_buffs
    }

    pub fn set_party_buffs(&mut self, buffs: PartyBuffs) {
        self.config.party_buffs = buffs;
        self.changed("party_buffs");
    }

    pub fn get_individual_buffs(&self) -> &IndividualBuffs {
        &self.config.individual_buffs
    }

    pub fn set_individual_buffs(&mut self, buffs: IndividualBuffs) {
        self.config.individual_buffs = buffs;
        self.changed("individual_buffs");
    }

    pub fn get_debuffs(&self) -> &Debuffs {
        &self.config.debuffs
    }

    pub fn set_debuffs(&mut self, debuffs: Debuffs) {
        self.config.debuffs = debuffs;
        self.changed("debuffs");
    }

    pub fn get_other(&self) -> OtherOptions {
        self.config.other
    }

    pub fn set_other(&mut self, other: OtherOptions) {
        self.config.other = other;
        self.changed("other");
    }

    pub fn get_rotation(&self) -> &RotationSelection {
        &self.config.rotation
    }

    pub fn set_rotation(&mut self, rotation: RotationSelection) {
        self.config.rotation = rotation;
        self.changed("rotation");
    }

    pub fn get_bonus_stats(&self) -> &Stats {
        &self.config.bonus_stats
    }

    pub fn set_bonus_stats(&mut self, stats: Stats) {
        self.config.bonus_stats = stats;
        self.changed("bonus_stats");
    }

    /// Simulation input for this player against `encounter`
    pub fn to_sim_config(&self, encounter: EncounterConfig) -> SimConfig {
        SimConfig { player: self.config.clone(), encounter, ..Default::default() }
    }
}

impl From<PlayerConfig> for Player {
    fn from(config: PlayerConfig) -> Self {
        Self::new(config)
    }
}
