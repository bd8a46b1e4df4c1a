//! Action priority lists
//!
//! A rotation is an ordered list of actions with conditions. At every
//! decision point the first action whose condition holds and whose ability
//! can be cast right now is chosen.

use serde::{Deserialize, Serialize};

use crate::aura::AuraId;
use crate::error::Result;
use crate::player_data::PaladinSeal;
use crate::spells::Ability;

/// What a list entry casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AplActionKind {
    Cast(Ability),
    /// Whatever seal the player picked in spec options
    CastPrimarySeal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AplCondition {
    #[default]
    Always,
    Not(Box<AplCondition>),
    And(Vec<AplCondition>),
    Or(Vec<AplCondition>),
    AuraActive(AuraId),
    AuraInactive(AuraId),
    AuraRemainingBelow { aura: AuraId, seconds: f64 },
    AuraStacksBelow { aura: AuraId, stacks: i32 },
    ManaPercentAbove(f64),
    HealthPercentBelow(f64),
    /// Health under the configured "HP% for defensives"
    BelowDefensiveThreshold,
    ExecutePhase,
    SealInactive,
    TargetUndeadOrDemon,
    ElapsedAbove(f64),
    RemainingBelow(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AplAction {
    pub action: AplActionKind,
    #[serde(default)]
    pub condition: AplCondition,
}

impl AplAction {
    pub fn cast(ability: Ability) -> Self {
        Self { action: AplActionKind::Cast(ability), condition: AplCondition::Always }
    }

    pub fn primary_seal() -> Self {
        Self { action: AplActionKind::CastPrimarySeal, condition: AplCondition::Always }
    }

    pub fn when(mut self, condition: AplCondition) -> Self {
        self.condition = condition;
        self
    }
}

/// Action taken before the pull. `offset` is seconds before combat (negative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepullAction {
    pub action: AplActionKind,
    #[serde(default)]
    pub offset: f64,
}

/// Enum-valued fields use the single-key map form (`{ cast: judgement }`)
/// in every format, whether the list is loaded on its own or inside a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Apl {
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub prepull: Vec<PrepullAction>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub priority_list: Vec<AplAction>,
}

/// Read-only view of combat state used by conditions
pub trait AplContext {
    fn aura_active(&self, aura: AuraId) -> bool;
    fn aura_remaining(&self, aura: AuraId) -> f64;
    fn aura_stacks(&self, aura: AuraId) -> i32;
    fn mana_percent(&self) -> f64;
    fn health_percent(&self) -> f64;
    fn defensive_threshold_percent(&self) -> f64;
    fn execute_phase(&self) -> bool;
    fn seal_active(&self) -> bool;
    fn target_undead_or_demon(&self) -> bool;
    fn elapsed(&self) -> f64;
    fn remaining(&self) -> f64;
    fn primary_seal(&self) -> PaladinSeal;
    /// Known, off cooldown, off GCD when needed and affordable
    fn can_cast(&self, ability: Ability) -> bool;
}

/// Ability that puts `seal` up; `None` for NoSeal
pub fn seal_ability(seal: PaladinSeal) -> Option<Ability> {
    match seal {
        PaladinSeal::NoSeal => None,
        PaladinSeal::Righteousness => Some(Ability::SealOfRighteousness),
        PaladinSeal::Command => Some(Ability::SealOfCommand),
        PaladinSeal::Martyrdom => Some(Ability::SealOfMartyrdom),
    }
}

impl AplCondition {
    pub fn holds<C: AplContext + ?Sized>(&self, ctx: &C) -> bool {
        match self {
            AplCondition::Always => true,
            AplCondition::Not(c) => !c.holds(ctx),
            AplCondition::And(cs) => cs.iter().all(|c| c.holds(ctx)),
            AplCondition::Or(cs) => cs.iter().any(|c| c.holds(ctx)),
            AplCondition::AuraActive(a) => ctx.aura_active(*a),
            AplCondition::AuraInactive(a) => !ctx.aura_active(*a),
            AplCondition::AuraRemainingBelow { aura, seconds } => ctx.aura_remaining(*aura) < *seconds,
            AplCondition::AuraStacksBelow { aura, stacks } => ctx.aura_stacks(*aura) < *stacks,
            AplCondition::ManaPercentAbove(p) => ctx.mana_percent() > *p,
            AplCondition::HealthPercentBelow(p) => ctx.health_percent() < *p,
            AplCondition::BelowDefensiveThreshold => ctx.health_percent() < ctx.defensive_threshold_percent(),
            AplCondition::ExecutePhase => ctx.execute_phase(),
            AplCondition::SealInactive => !ctx.seal_active(),
            AplCondition::TargetUndeadOrDemon => ctx.target_undead_or_demon(),
            AplCondition::ElapsedAbove(t) => ctx.elapsed() > *t,
            AplCondition::RemainingBelow(t) => ctx.remaining() < *t,
        }
    }
}

impl AplActionKind {
    /// Concrete ability for this action, `None` if it cannot resolve
    pub fn resolve<C: AplContext + ?Sized>(self, ctx: &C) -> Option<Ability> {
        match self {
            AplActionKind::Cast(a) => Some(a),
            AplActionKind::CastPrimarySeal => seal_ability(ctx.primary_seal()),
        }
    }
}

impl Apl {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// First castable action whose condition holds
    pub fn evaluate<C: AplContext + ?Sized>(&self, ctx: &C) -> Option<Ability> {
        self.priority_list.iter().find_map(|entry| {
            let ability = entry.action.resolve(ctx)?;
            if ability.is_castable() && entry.condition.holds(ctx) && ctx.can_cast(ability) {
                Some(ability)
            } else {
                None
            }
        })
    }

    /// Every ability named by the list, for validation and debugging
    pub fn abilities(&self) -> impl Iterator<Item = AplActionKind> + '_ {
        self.prepull
            .iter()
            .map(|p| p.action)
            .chain(self.priority_list.iter().map(|a| a.action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Ctx {
        active: HashSet<AuraId>,
        ready: HashSet<Ability>,
        seal: Option<PaladinSeal>,
        health: f64,
        execute: bool,
    }

    impl AplContext for Ctx {
        fn aura_active(&self, aura: AuraId) -> bool {
            self.active.contains(&aura)
        }
        fn aura_remaining(&self, aura: AuraId) -> f64 {
            if self.active.contains(&aura) {
                5.0
            } else {
                0.0
            }
        }
        fn aura_stacks(&self, _aura: AuraId) -> i32 {
            0
        }
        fn mana_percent(&self) -> f64 {
            50.0
        }
        fn health_percent(&self) -> f64 {
            self.health
        }
        fn defensive_threshold_percent(&self) -> f64 {
            30.0
        }
        fn execute_phase(&self) -> bool {
            self.execute
        }
        fn seal_active(&self) -> bool {
            self.active.iter().any(|a| a.is_seal())
        }
        fn target_undead_or_demon(&self) -> bool {
            false
        }
        fn elapsed(&self) -> f64 {
            10.0
        }
        fn remaining(&self) -> f64 {
            170.0
        }
        fn primary_seal(&self) -> PaladinSeal {
            self.seal.unwrap_or(PaladinSeal::Righteousness)
        }
        fn can_cast(&self, ability: Ability) -> bool {
            self.ready.contains(&ability)
        }
    }

    fn rotation() -> Apl {
        Apl {
            prepull: vec![],
            priority_list: vec![
                AplAction::cast(Ability::LayOnHands).when(AplCondition::BelowDefensiveThreshold),
                AplAction::primary_seal().when(AplCondition::SealInactive),
                AplAction::cast(Ability::HammerOfWrath).when(AplCondition::ExecutePhase),
                AplAction::cast(Ability::HolyShield),
                AplAction::cast(Ability::Consecration),
            ],
        }
    }

    #[test]
    fn picks_first_castable_matching_entry() {
        let mut ctx = Ctx { health: 100.0, ..Default::default() };
        ctx.ready.extend([Ability::SealOfRighteousness, Ability::HolyShield, Ability::Consecration, Ability::LayOnHands]);
        assert_eq!(rotation().evaluate(&ctx), Some(Ability::SealOfRighteousness));

        ctx.active.insert(AuraId::SealOfRighteousness);
        assert_eq!(rotation().evaluate(&ctx), Some(Ability::HolyShield));

        ctx.ready.remove(&Ability::HolyShield);
        assert_eq!(rotation().evaluate(&ctx), Some(Ability::Consecration));

        ctx.health = 20.0;
        assert_eq!(rotation().evaluate(&ctx), Some(Ability::LayOnHands));
    }

    #[test]
    fn no_seal_skips_primary_seal_entry() {
        let mut ctx = Ctx { health: 100.0, seal: Some(PaladinSeal::NoSeal), ..Default::default() };
        ctx.ready.extend([Ability::SealOfRighteousness, Ability::Consecration]);
        assert_eq!(rotation().evaluate(&ctx), Some(Ability::Consecration));
    }

    #[test]
    fn nothing_castable_yields_none() {
        let ctx = Ctx { health: 100.0, execute: true, ..Default::default() };
        assert_eq!(rotation().evaluate(&ctx), None);
    }

    const YAML: &str = r#"
prepull:
  - action: { cast: righteous_fury }
    offset: -5
priority_list:
  - action: cast_primary_seal
    condition: seal_inactive
  - action: { cast: holy_shield }
    condition:
      not: { aura_active: holy_shield }
  - action: { cast: exorcism }
    condition:
      or: [target_undead_or_demon, { mana_percent_above: 60 }]
  - action: { cast: judgement }
"#;

    #[test]
    fn parses_from_yaml() {
        let apl = Apl::from_yaml(YAML).unwrap();
        assert_eq!(apl.prepull.len(), 1);
        assert_eq!(apl.priority_list.len(), 4);
        assert_eq!(apl.priority_list[3].condition, AplCondition::Always);
        assert_eq!(apl.priority_list[0].action, AplActionKind::CastPrimarySeal);
    }

    #[test]
    fn same_map_form_loads_inside_a_build() {
        let indented: String = YAML.lines().map(|l| format!("    {}\n", l)).collect();
        let yaml = format!("player:\n  rotation:\n{}", indented);
        let config = crate::config::SimConfig::from_yaml(&yaml).unwrap();
        let crate::config::RotationSelection::Custom(apl) = config.player.rotation else {
            panic!("expected a custom rotation");
        };
        assert_eq!(apl, Apl::from_yaml(YAML).unwrap());
        assert_eq!(apl.prepull[0].action, AplActionKind::Cast(Ability::RighteousFury));
    }

    #[test]
    fn json_round_trips_through_the_map_form() {
        let apl = Apl::from_yaml(YAML).unwrap();
        let json = serde_json::to_string(&apl).unwrap();
        assert!(json.contains(r#"{"cast":"holy_shield"}"#));
        assert_eq!(serde_json::from_str::<Apl>(&json).unwrap(), apl);
    }
}
