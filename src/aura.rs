//! Buff and debuff timing
//!
//! Auras only track activity, stacks and expiry. Their stat effects are
//! applied by the combat loop when it observes gain and expiry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuraId {
    SealOfRighteousness,
    SealOfCommand,
    SealOfMartyrdom,
    RighteousFury,
    HolyShield,
    Consecration,
    Redoubt,
    Vengeance,
    Vindication,
    SheathOfLight,
    GuardedByTheLight,
    ShockAndAwe,
    CrusadersWrath,
    DefendersResolve,
    SwiftJudgement,
}

impl AuraId {
    pub const COUNT: usize = 15;

    pub const ALL: [AuraId; AuraId::COUNT] = [
        AuraId::SealOfRighteousness,
        AuraId::SealOfCommand,
        AuraId::SealOfMartyrdom,
        AuraId::RighteousFury,
        AuraId::HolyShield,
        AuraId::Consecration,
        AuraId::Redoubt,
        AuraId::Vengeance,
        AuraId::Vindication,
        AuraId::SheathOfLight,
        AuraId::GuardedByTheLight,
        AuraId::ShockAndAwe,
        AuraId::CrusadersWrath,
        AuraId::DefendersResolve,
        AuraId::SwiftJudgement,
    ];

    /// Duration in seconds; `None` never expires
    pub fn duration(self) -> Option<f64> {
        match self {
            AuraId::SealOfRighteousness | AuraId::SealOfCommand | AuraId::SealOfMartyrdom => Some(30.0),
            AuraId::RighteousFury => Some(1800.0),
            AuraId::HolyShield => Some(10.0),
            AuraId::Consecration => Some(8.0),
            AuraId::Redoubt => Some(10.0),
            AuraId::Vengeance => Some(8.0),
            AuraId::Vindication => Some(30.0),
            AuraId::SheathOfLight => Some(60.0),
            AuraId::GuardedByTheLight => Some(15.001),
            AuraId::ShockAndAwe => Some(60.0),
            AuraId::CrusadersWrath => Some(10.0),
            AuraId::DefendersResolve => Some(10.0),
            AuraId::SwiftJudgement => Some(8.0),
        }
    }

    pub fn max_stacks(self) -> i32 {
        match self {
            AuraId::HolyShield => 4,
            AuraId::Redoubt | AuraId::SwiftJudgement => 5,
            AuraId::DefendersResolve => 1000,
            _ => 0,
        }
    }

    pub fn is_seal(self) -> bool {
        matches!(self, AuraId::SealOfRighteousness | AuraId::SealOfCommand | AuraId::SealOfMartyrdom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AuraState {
    active: bool,
    stacks: i32,
    expires_at: f64,
    activated_at: f64,
    generation: u64,
    uptime: f64,
}

/// Active auras of one unit
#[derive(Debug, Clone, Default)]
pub struct AuraSet {
    states: [AuraState; AuraId::COUNT],
    next_generation: u64,
}

/// Outcome of (re)activating an aura
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    /// True when the aura was inactive before
    pub gained: bool,
    /// Tag the expiry event must carry to be honoured
    pub generation: u64,
    pub expires_at: Option<f64>,
}

impl AuraSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_active(&self, id: AuraId) -> bool {
        self.states[id as usize].active
    }

    pub fn stacks(&self, id: AuraId) -> i32 {
        let s = &self.states[id as usize];
        if s.active {
            s.stacks
        } else {
            0
        }
    }

    /// Seconds until expiry, 0 when inactive
    pub fn remaining(&self, id: AuraId, now: f64) -> f64 {
        let s = &self.states[id as usize];
        if !s.active {
            return 0.0;
        }
        match id.duration() {
            Some(_) => (s.expires_at - now).max(0.0),
            None => f64::INFINITY,
        }
    }

    /// Activate or refresh. Refreshing keeps stacks and resets the timer.
    pub fn activate(&mut self, id: AuraId, now: f64) -> Activation {
        self.next_generation += 1;
        let generation = self.next_generation;
        let expires_at = id.duration().map(|d| now + d);
        let s = &mut self.states[id as usize];
        let gained = !s.active;
        if gained {
            s.active = true;
            s.stacks = 0;
            s.activated_at = now;
        }
        s.generation = generation;
        s.expires_at = expires_at.unwrap_or(f64::INFINITY);
        Activation { gained, generation, expires_at }
    }

    /// Move the expiry earlier or later without changing stacks
    pub fn reschedule(&mut self, id: AuraId, expires_at: f64) -> Option<u64> {
        if !self.states[id as usize].active {
            return None;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        let s = &mut self.states[id as usize];
        s.generation = generation;
        s.expires_at = expires_at;
        Some(generation)
    }

    /// Set stacks, clamped to the aura's maximum. Returns (old, new).
    pub fn set_stacks(&mut self, id: AuraId, stacks: i32) -> (i32, i32) {
        let max = id.max_stacks();
        let s = &mut self.states[id as usize];
        let old = s.stacks;
        s.stacks = if max > 0 { stacks.clamp(0, max) } else { stacks.max(0) };
        (old, s.stacks)
    }

    pub fn add_stack(&mut self, id: AuraId) -> (i32, i32) {
        let current = self.states[id as usize].stacks;
        self.set_stacks(id, current + 1)
    }

    /// Remove one stack. Returns true when that was the last stack and the
    /// aura was deactivated.
    pub fn remove_stack(&mut self, id: AuraId, now: f64) -> bool {
        let s = &mut self.states[id as usize];
        if !s.active {
            return false;
        }
        s.stacks -= 1;
        if s.stacks <= 0 {
            self.deactivate(id, now);
            return true;
        }
        false
    }

    /// Deactivate immediately. Returns true if it was active.
    pub fn deactivate(&mut self, id: AuraId, now: f64) -> bool {
        let s = &mut self.states[id as usize];
        if !s.active {
            return false;
        }
        s.active = false;
        s.stacks = 0;
        s.uptime += (now.min(s.expires_at) - s.activated_at).max(0.0);
        true
    }

    /// Handle a scheduled expiry. Stale generations are ignored.
    pub fn expire(&mut self, id: AuraId, generation: u64, now: f64) -> bool {
        let s = &self.states[id as usize];
        if !s.active || s.generation != generation {
            return false;
        }
        self.deactivate(id, now)
    }

    /// Total active seconds up to `now`
    pub fn uptime(&self, id: AuraId, now: f64) -> f64 {
        let s = &self.states[id as usize];
        let open = if s.active { (now.min(s.expires_at) - s.activated_at).max(0.0) } else { 0.0 };
        s.uptime + open
    }

    /// The seal currently active, if any
    pub fn active_seal(&self) -> Option<AuraId> {
        [AuraId::SealOfRighteousness, AuraId::SealOfCommand, AuraId::SealOfMartyrdom]
            .into_iter()
            .find(|id| self.is_active(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, id) in AuraId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, i);
        }
    }

    #[test]
    fn stale_expiry_is_ignored_after_refresh() {
        let mut auras = AuraSet::new();
        let first = auras.activate(AuraId::Vengeance, 0.0);
        assert!(first.gained);
        let second = auras.activate(AuraId::Vengeance, 5.0);
        assert!(!second.gained);

        assert!(!auras.expire(AuraId::Vengeance, first.generation, 8.0));
        assert!(auras.is_active(AuraId::Vengeance));
        assert!((auras.remaining(AuraId::Vengeance, 8.0) - 5.0).abs() < 1e-9);

        assert!(auras.expire(AuraId::Vengeance, second.generation, 13.0));
        assert!(!auras.is_active(AuraId::Vengeance));
        assert!((auras.uptime(AuraId::Vengeance, 20.0) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn stacks_clamp_and_consume() {
        let mut auras = AuraSet::new();
        auras.activate(AuraId::Redoubt, 0.0);
        assert_eq!(auras.set_stacks(AuraId::Redoubt, 9), (0, 5));
        for _ in 0..4 {
            assert!(!auras.remove_stack(AuraId::Redoubt, 1.0));
        }
        assert!(auras.remove_stack(AuraId::Redoubt, 1.0));
        assert!(!auras.is_active(AuraId::Redoubt));
        assert_eq!(auras.stacks(AuraId::Redoubt), 0);
    }

    #[test]
    fn reschedule_shortens_seal() {
        let mut auras = AuraSet::new();
        let a = auras.activate(AuraId::SealOfRighteousness, 0.0);
        let g = auras.reschedule(AuraId::SealOfRighteousness, 6.0).unwrap();
        assert_ne!(a.generation, g);
        assert_eq!(auras.active_seal(), Some(AuraId::SealOfRighteousness));
        assert!(!auras.expire(AuraId::SealOfRighteousness, a.generation, 30.0));
        assert!(auras.expire(AuraId::SealOfRighteousness, g, 6.0));
        assert_eq!(auras.active_seal(), None);
    }
}
