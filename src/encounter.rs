//! Encounter model: duration, target and phase transitions

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::simulation::FastRng;
use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSelection {
    Preset(String),
    Custom(Target),
}

impl Default for TargetSelection {
    fn default() -> Self {
        TargetSelection::Preset("raid_boss".to_string())
    }
}

/// Encounter settings as written in build files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Nominal fight length in seconds
    pub duration: f64,
    /// Each iteration rolls uniformly within +/- this many seconds
    pub duration_variation: f64,
    /// Share of the fight spent below 20% target health
    pub execute_proportion: f64,
    pub target: TargetSelection,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            duration: 180.0,
            duration_variation: 5.0,
            execute_proportion: 0.2,
            target: TargetSelection::default(),
        }
    }
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.duration > 0.0) {
            return Err(SimError::InvalidConfig("encounter duration must be positive".into()));
        }
        if self.duration_variation < 0.0 || self.duration_variation >= self.duration {
            return Err(SimError::InvalidConfig("duration variation must be in 0..duration".into()));
        }
        if !(0.0..=1.0).contains(&self.execute_proportion) {
            return Err(SimError::InvalidConfig("execute proportion must be in 0..=1".into()));
        }
        if let TargetSelection::Custom(t) = &self.target {
            t.validate()?;
        }
        Ok(())
    }

    /// Resolve the target, scaling preset dummies to the player level
    pub fn resolve(&self, player_level: i32) -> Result<Encounter> {
        let target = match &self.target {
            TargetSelection::Preset(name) => Target::from_preset(name, player_level)?,
            TargetSelection::Custom(t) => t.clone(),
        };
        Ok(Encounter {
            duration: self.duration,
            duration_variation: self.duration_variation,
            execute_proportion: self.execute_proportion,
            target,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    Normal,
    /// Target below 20% health
    Execute,
}

/// Resolved encounter used by the combat loop
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub duration: f64,
    pub duration_variation: f64,
    pub execute_proportion: f64,
    pub target: Target,
}

impl Encounter {
    /// Fight length for one iteration
    pub fn roll_duration(&self, rng: &mut FastRng) -> f64 {
        if self.duration_variation <= 0.0 {
            return self.duration;
        }
        let offset = (rng.f64() * 2.0 - 1.0) * self.duration_variation;
        (self.duration + offset).max(1.0)
    }

    /// Time at which the execute phase begins for a rolled duration.
    /// Target health falls linearly, so this is a fixed share of the fight.
    pub fn execute_start(&self, rolled_duration: f64) -> f64 {
        rolled_duration * (1.0 - self.execute_proportion)
    }

    pub fn phase_at(&self, time: f64, rolled_duration: f64) -> EncounterPhase {
        if self.execute_proportion > 0.0 && time >= self.execute_start(rolled_duration) {
            EncounterPhase::Execute
        } else {
            EncounterPhase::Normal
        }
    }

    /// Target health percent at `time`
    pub fn target_health_percent(&self, time: f64, rolled_duration: f64) -> f64 {
        (100.0 * (1.0 - time / rolled_duration)).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter() -> Encounter {
        EncounterConfig::default().resolve(60).unwrap()
    }

    #[test]
    fn phase_transition_at_execute_share() {
        let e = encounter();
        assert_eq!(e.phase_at(0.0, 100.0), EncounterPhase::Normal);
        assert_eq!(e.phase_at(79.9, 100.0), EncounterPhase::Normal);
        assert_eq!(e.phase_at(80.0, 100.0), EncounterPhase::Execute);
        assert!((e.target_health_percent(80.0, 100.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn rolled_duration_stays_in_window() {
        let e = encounter();
        let mut rng = FastRng::new(7);
        for _ in 0..1000 {
            let d = e.roll_duration(&mut rng);
            assert!((175.0..=185.0).contains(&d));
        }
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut c = EncounterConfig::default();
        c.duration = 0.0;
        assert!(c.validate().is_err());

        let mut c = EncounterConfig::default();
        c.execute_proportion = 1.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn target_selection_accepts_name_or_struct() {
        let c: EncounterConfig = serde_yaml::from_str("target: training_dummy\n").unwrap();
        assert_eq!(c.resolve(25).unwrap().target.level, 28);

        let yaml = "target:\n  name: Ogre\n  level: 62\n  armor: 3000\n  swing_speed: 2.5\n  min_base_damage: 900\n";
        let c: EncounterConfig = serde_yaml::from_str(yaml).unwrap();
        let e = c.resolve(60).unwrap();
        assert_eq!(e.target.name, "Ogre");
        assert!(e.target.can_parry);
        assert_eq!(e.duration, 180.0);
    }
}
