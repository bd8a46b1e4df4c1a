//! Core simulation engine: one protection paladin tanking one target

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::VecDeque;
use tracing::{debug, info, trace, warn};

use crate::apl::{Apl, AplContext};
use crate::aura::{AuraId, AuraSet};
use crate::buffs::Debuffs;
use crate::character::Paladin;
use crate::config::SimConfig;
use crate::encounter::{Encounter, EncounterPhase};
use crate::error::Result;
use crate::outcome::{
    armor_mitigation, glancing_multiplier, incoming_melee_table, player_melee_table, roll_spell,
    spell_miss_chance, AttackTable, Defender, HitOutcome, MeleeAttacker, MeleeDefender,
};
use crate::scheduler::EventQueue;
use crate::spells::{Ability, HitModel, School, GCD};
use crate::stats::{AggregatedStats, SimResult};
use crate::target::Target;
use crate::unit_stats::Stat;

/// Fast RNG wrapper for better performance
#[derive(Clone)]
pub struct FastRng {
    inner: fastrand::Rng,
}

impl FastRng {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }

    #[inline(always)]
    pub fn f64(&mut self) -> f64 {
        self.inner.f64()
    }

    /// Uniform in `low..high`
    #[inline(always)]
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.inner.f64()
    }

    /// True with `chance` in 0..=1
    #[inline(always)]
    pub fn proc(&mut self, chance: f64) -> bool {
        chance > 0.0 && self.inner.f64() < chance
    }
}

/// What a queued event does when it fires
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    FightEnd,
    AuraExpire { aura: AuraId, generation: u64 },
    TargetSwing,
    PlayerSwing,
    CastComplete(Ability),
    ConsecrationTick,
    HealTick,
    ManaTick,
    GuardedTick { chain: u64 },
    Decision,
}

// Lower = handled first among events at the same time
const PRIO_END: i32 = 0;
const PRIO_AURA: i32 = 1;
const PRIO_TARGET: i32 = 2;
const PRIO_PLAYER: i32 = 3;
const PRIO_PERIODIC: i32 = 4;
const PRIO_DECISION: i32 = 5;

const MANA_TICK: f64 = 2.0;
const GUARDED_TICK: f64 = 3.0;
const CONSECRATION_TICKS: u32 = 8;
const IDLE_RECHECK: f64 = 0.5;
const SOC_PPM: f64 = 7.0;
const SEAL_LINGER: f64 = 6.0;
const BASTION_ICD: f64 = 3.5;
const DEFENDERS_RESOLVE_AP: f64 = 2.0;

/// Everything resolved once per run and shared by every iteration
#[derive(Debug, Clone)]
pub struct PreparedSim {
    pub paladin: Paladin,
    pub encounter: Encounter,
    pub apl: Apl,
    /// Target with debuffs applied
    target: Target,
    melee_tables: Vec<AttackTable>,
    spell_miss: f64,
    glance_multiplier: f64,
    /// Share of the paladin's physical damage left after target armor
    target_armor_factor: f64,
    /// Share of the target's damage left after the paladin's armor
    player_armor_factor: f64,
    incoming_hps: f64,
    swing_speed: f64,
}

impl PreparedSim {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let paladin = Paladin::from_config(&config.player)?;
        let encounter = config.encounter.resolve(config.player.level)?;
        let apl = config.player.resolve_rotation()?;
        Ok(Self::from_parts(paladin, encounter, apl, &config.player.debuffs))
    }

    /// Build from an already computed paladin, e.g. one with adjusted weapon stats
    pub fn from_parts(paladin: Paladin, encounter: Encounter, apl: Apl, debuffs: &Debuffs) -> Self {
        let target = encounter.target.debuffed(debuffs);
        let defender = MeleeDefender {
            level: target.level,
            can_dodge: target.can_dodge,
            can_parry: target.can_parry,
        };
        let in_front = paladin.other.in_front_of_target;
        let melee_tables = Ability::ALL
            .iter()
            .map(|&a| {
                let attacker = MeleeAttacker {
                    weapon_skill: paladin.weapon_skill,
                    melee_hit: paladin.stat(Stat::MeleeHit),
                    melee_crit: paladin.crit_chance(a),
                };
                player_melee_table(attacker, defender, in_front, a.hit_model() == HitModel::MeleeWhite)
            })
            .collect();

        let skill_diff = 5.0 * target.level as f64 - paladin.weapon_skill;
        let spell_miss = spell_miss_chance(paladin.level, target.level, paladin.stat(Stat::SpellHit));
        let target_armor_factor = 1.0 - armor_mitigation(target.armor, paladin.level);
        let player_armor_factor = 1.0 - armor_mitigation(paladin.stat(Stat::Armor), target.level);

        let incoming_hps = if paladin.other.incoming_hps > 0.0 {
            paladin.other.incoming_hps
        } else if paladin.other.tank_assignment == 0 {
            // Enough healing to offset an average unmitigated hit stream
            let (min, max) = target.damage_range();
            (min + max) / 2.0 / target.swing_speed * player_armor_factor
        } else {
            0.0
        };

        let haste = 1.0 + paladin.stat(Stat::MeleeHaste) / 100.0;
        let swing_speed = paladin.weapon.speed / haste;

        Self {
            glance_multiplier: glancing_multiplier(skill_diff),
            paladin,
            encounter,
            apl,
            target,
            melee_tables,
            spell_miss,
            target_armor_factor,
            player_armor_factor,
            incoming_hps,
            swing_speed,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn incoming_hps(&self) -> f64 {
        self.incoming_hps
    }

    /// Simulate one fight
    pub fn run(&self, seed: u64) -> SimResult {
        let result = Combat::new(self, seed).run();
        debug!(
            seed,
            dps = result.dps(),
            tps = result.tps(),
            dtps = result.dtps(),
            died = ?result.death_time,
            "iteration complete"
        );
        result
    }

    pub fn run_sequential(&self, base_seed: u64, count: usize) -> Vec<SimResult> {
        (0..count).map(|i| self.run(iteration_seed(base_seed, i))).collect()
    }

    pub fn run_parallel(&self, base_seed: u64, count: usize) -> Vec<SimResult> {
        let run = || -> Vec<SimResult> {
            (0..count)
                .into_par_iter()
                .map(|i| self.run(iteration_seed(base_seed, i)))
                .collect()
        };
        match ThreadPoolBuilder::new().num_threads(num_cpus::get().max(1)).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!(error = %e, "could not build thread pool, using the global one");
                run()
            }
        }
    }
}

/// Seed of iteration `i` of a run
#[inline(always)]
pub fn iteration_seed(base_seed: u64, i: usize) -> u64 {
    base_seed.wrapping_add(i as u64)
}

/// Configured base seed, or a fresh one
pub fn base_seed(config: &SimConfig) -> u64 {
    config.seed.unwrap_or_else(rand::random::<u64>)
}

/// Mutable state of one fight
struct Combat<'a> {
    sim: &'a PreparedSim,
    rng: FastRng,
    queue: EventQueue<Action>,
    auras: AuraSet,
    now: f64,
    duration: f64,
    health: f64,
    mana: f64,
    gcd_ready: f64,
    casting_until: f64,
    cooldowns: [f64; Ability::COUNT],
    /// Active seal has not been judged since it was put up
    fresh_seal: bool,
    bastion_ready: f64,
    guarded_chain: u64,
    last_heal: f64,
    burst: VecDeque<(f64, f64)>,
    burst_sum: f64,
    dead: bool,
    result: SimResult,
}

impl<'a> Combat<'a> {
    fn new(sim: &'a PreparedSim, seed: u64) -> Self {
        let mut rng = FastRng::new(seed);
        let duration = sim.encounter.roll_duration(&mut rng);
        Self {
            sim,
            rng,
            queue: EventQueue::new(),
            auras: AuraSet::new(),
            now: 0.0,
            duration,
            health: sim.paladin.max_health(),
            mana: sim.paladin.max_mana(),
            gcd_ready: 0.0,
            casting_until: 0.0,
            cooldowns: [0.0; Ability::COUNT],
            fresh_seal: false,
            bastion_ready: 0.0,
            guarded_chain: 0,
            last_heal: 0.0,
            burst: VecDeque::new(),
            burst_sum: 0.0,
            dead: false,
            result: SimResult { seed, duration, ..Default::default() },
        }
    }

    fn run(mut self) -> SimResult {
        self.prepull();
        self.now = 0.0;

        let sim = self.sim;
        if sim.paladin.options.righteous_fury
            && sim.paladin.knows(Ability::RighteousFury)
            && !self.auras.is_active(AuraId::RighteousFury)
        {
            self.activate(AuraId::RighteousFury);
        }
        let other = &sim.paladin.other;
        self.queue.push(self.duration, PRIO_END, Action::FightEnd);
        self.queue.push(0.0, PRIO_PLAYER, Action::PlayerSwing);
        if other.tank_assignment == 0 {
            self.queue.push(sim.target.swing_speed, PRIO_TARGET, Action::TargetSwing);
        }
        if sim.incoming_hps > 0.0 {
            let first = self.next_heal_delay();
            self.queue.push(first, PRIO_PERIODIC, Action::HealTick);
        }
        self.queue.push(MANA_TICK, PRIO_PERIODIC, Action::ManaTick);
        self.queue.push(0.0, PRIO_DECISION, Action::Decision);

        while let Some(event) = self.queue.pop() {
            self.now = event.time;
            trace!(time = event.time, action = ?event.action, "event");
            if event.action == Action::FightEnd {
                break;
            }
            self.handle(event.action);
            if self.dead {
                break;
            }
        }

        self.result.elapsed = self.result.death_time.unwrap_or(self.duration);
        self.result
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::FightEnd => {}
            Action::AuraExpire { aura, generation } => {
                self.auras.expire(aura, generation, self.now);
            }
            Action::TargetSwing => {
                self.target_swing();
                let next = self.now + self.sim.target.swing_speed;
                self.queue.push(next, PRIO_TARGET, Action::TargetSwing);
            }
            Action::PlayerSwing => {
                self.melee_swing();
                let next = self.now + self.sim.swing_speed;
                self.queue.push(next, PRIO_PLAYER, Action::PlayerSwing);
            }
            Action::CastComplete(ability) => {
                self.casting_until = self.now;
                self.apply(ability);
                let next = self.gcd_ready.max(self.now);
                self.queue.push(next, PRIO_DECISION, Action::Decision);
            }
            Action::ConsecrationTick => self.consecration_tick(),
            Action::HealTick => {
                let amount = self.sim.incoming_hps * (self.now - self.last_heal);
                self.last_heal = self.now;
                self.heal(amount);
                let next = self.now + self.next_heal_delay();
                self.queue.push(next, PRIO_PERIODIC, Action::HealTick);
            }
            Action::ManaTick => {
                let regen = self.sim.paladin.stat(Stat::Mp5) * MANA_TICK / 5.0;
                self.restore_mana(regen);
                self.queue.push(self.now + MANA_TICK, PRIO_PERIODIC, Action::ManaTick);
            }
            Action::GuardedTick { chain } => {
                if chain == self.guarded_chain && self.auras.is_active(AuraId::GuardedByTheLight) {
                    self.restore_mana(0.05 * self.sim.paladin.max_mana());
                    self.queue.push(self.now + GUARDED_TICK, PRIO_PERIODIC, Action::GuardedTick { chain });
                }
            }
            Action::Decision => self.decide(),
        }
    }

    fn next_heal_delay(&mut self) -> f64 {
        let other = &self.sim.paladin.other;
        let jitter = self.rng.range(-other.healing_cadence_variation, other.healing_cadence_variation);
        (other.healing_cadence + jitter).max(0.1)
    }

    #[inline(always)]
    fn paladin(&self) -> &'a Paladin {
        &self.sim.paladin
    }

    // ---- Dynamic stats ----

    fn attack_power(&self) -> f64 {
        let p = self.paladin();
        let mut ap = p.stat(Stat::AttackPower)
            + DEFENDERS_RESOLVE_AP * self.auras.stacks(AuraId::DefendersResolve) as f64;
        if self.auras.is_active(AuraId::Vindication) {
            ap *= p.talents.vindication_multiplier();
        }
        ap
    }

    fn spell_power(&self) -> f64 {
        let p = self.paladin();
        let mut sp = p.holy_spell_power();
        if self.auras.is_active(AuraId::SheathOfLight) {
            sp += 0.3 * self.attack_power();
        }
        if self.auras.is_active(AuraId::ShockAndAwe) {
            sp += p.stat(Stat::Intellect);
        }
        if self.auras.is_active(AuraId::CrusadersWrath) {
            sp += 95.0;
        }
        sp
    }

    fn block_chance(&self) -> f64 {
        let p = self.paladin();
        let mut block = p.stat(Stat::Block);
        if self.auras.is_active(AuraId::Redoubt) {
            block += p.talents.redoubt_block_bonus();
        }
        if self.auras.is_active(AuraId::HolyShield) {
            block += if p.set_bonuses.holy_shield_enhanced { 40.0 } else { 30.0 };
        }
        block
    }

    fn damage_multiplier(&self, school: School) -> f64 {
        let p = self.paladin();
        let mut m = p.school_multiplier(school);
        if self.auras.is_active(AuraId::Vengeance) {
            m *= p.talents.vengeance_multiplier();
        }
        if school == School::Holy {
            m *= 1.0 + 0.01 * self.auras.stacks(AuraId::SwiftJudgement) as f64;
        }
        m
    }

    fn threat_multiplier(&self, ability: Ability) -> f64 {
        let mut t = ability.threat_multiplier();
        if ability.school() == School::Holy && self.auras.is_active(AuraId::RighteousFury) {
            t *= self.sim.paladin.talents.righteous_fury_threat();
        }
        t
    }

    fn weapon_damage(&mut self) -> f64 {
        let w = self.sim.paladin.weapon;
        self.rng.range(w.min_damage, w.max_damage) + self.attack_power() / 14.0 * w.speed
    }

    // ---- Aura helpers ----

    /// Activate or refresh and queue the expiry. Returns true on gain.
    fn activate(&mut self, aura: AuraId) -> bool {
        let a = self.auras.activate(aura, self.now);
        if let Some(at) = a.expires_at {
            self.queue.push(at, PRIO_AURA, Action::AuraExpire { aura, generation: a.generation });
        }
        a.gained
    }

    fn activate_with_stacks(&mut self, aura: AuraId, stacks: i32) {
        self.activate(aura);
        self.auras.set_stacks(aura, stacks);
    }

    fn proc_redoubt(&mut self) {
        if self.sim.paladin.talents.redoubt > 0 {
            self.activate_with_stacks(AuraId::Redoubt, 5);
        }
    }

    // ---- Damage dealt ----

    /// Roll the outcome of one of the paladin's abilities
    fn roll(&mut self, ability: Ability) -> HitOutcome {
        match ability.hit_model() {
            HitModel::MeleeWhite | HitModel::MeleeSpecial => self.sim.melee_tables[ability as usize].roll(&mut self.rng),
            HitModel::Magic => {
                let crit = if ability == Ability::Exorcism && self.sim.target.is_undead_or_demon() {
                    100.0
                } else {
                    self.sim.paladin.crit_chance(ability)
                };
                roll_spell(&mut self.rng, self.sim.spell_miss, crit)
            }
            HitModel::AlwaysHit => HitOutcome::Hit,
        }
    }

    /// Resolve and record `base` damage of `ability`. Returns the outcome.
    fn strike(&mut self, ability: Ability, base: f64) -> HitOutcome {
        let outcome = self.roll(ability);
        let stats = self.result.ability_mut(ability);
        if !outcome.landed() {
            stats.misses += 1;
            return outcome;
        }
        stats.hits += 1;

        let mut damage = base * self.damage_multiplier(ability.school());
        if ability.school() == School::Physical {
            damage *= self.sim.target_armor_factor;
        }
        match outcome {
            HitOutcome::Glance => damage *= self.sim.glance_multiplier,
            HitOutcome::Crit => {
                damage *= match ability.hit_model() {
                    HitModel::Magic => 1.5,
                    _ => 2.0,
                };
            }
            _ => {}
        }
        self.record_damage(ability, damage, outcome == HitOutcome::Crit);
        outcome
    }

    fn record_damage(&mut self, ability: Ability, damage: f64, crit: bool) {
        let threat = damage * self.threat_multiplier(ability);
        let stats = self.result.ability_mut(ability);
        stats.damage += damage;
        stats.threat += threat;
        if crit {
            stats.crits += 1;
        }
        self.result.damage_done += damage;
        self.result.threat += threat;
        if crit && self.sim.paladin.talents.vengeance > 0 {
            self.activate(AuraId::Vengeance);
        }
    }

    fn melee_swing(&mut self) {
        let base = self.weapon_damage();
        let outcome = self.strike(Ability::MeleeSwing, base);
        self.result.ability_mut(Ability::MeleeSwing).casts += 1;
        if outcome.landed() {
            self.on_melee_landed(true, outcome);
            self.seal_proc();
        }
    }

    /// Rune, talent and set effects of a landed melee attack
    fn on_melee_landed(&mut self, white: bool, outcome: HitOutcome) {
        let p = self.paladin();
        if p.talents.vindication > 0 {
            self.activate(AuraId::Vindication);
        }
        if outcome == HitOutcome::Crit {
            if p.runes.aegis() {
                self.proc_redoubt();
            }
            if p.runes.the_art_of_war() {
                let cd = &mut self.cooldowns[Ability::Exorcism as usize];
                *cd = (*cd - 2.0).max(self.now.min(*cd));
            }
        }
        if white {
            if p.runes.sheath_of_light() {
                self.activate(AuraId::SheathOfLight);
            }
            if p.runes.guarded_by_the_light() && self.activate(AuraId::GuardedByTheLight) {
                self.guarded_chain += 1;
                let chain = self.guarded_chain;
                self.queue.push(self.now + GUARDED_TICK, PRIO_PERIODIC, Action::GuardedTick { chain });
            }
            if p.set_bonuses.crusaders_wrath && self.rng.proc(0.06) {
                self.activate(AuraId::CrusadersWrath);
            }
        }
    }

    fn seal_proc(&mut self) {
        let Some(seal) = self.auras.active_seal() else {
            return;
        };
        let p = self.paladin();
        let w = p.weapon;
        match seal {
            AuraId::SealOfRighteousness => {
                let Some(rank) = p.rank(Ability::SealOfRighteousness) else {
                    return;
                };
                let scale = w.speed / 4.0;
                let base = (rank.min * scale + rank.coefficient * self.spell_power() * scale) * p.talents.improved_sor();
                self.strike(Ability::SealOfRighteousnessProc, base);
            }
            AuraId::SealOfCommand => {
                let Some(rank) = p.rank(Ability::SealOfCommand) else {
                    return;
                };
                if self.rng.proc(SOC_PPM * w.speed / 60.0) {
                    let base = self.weapon_damage() * rank.min + rank.coefficient * self.spell_power();
                    let outcome = self.strike(Ability::SealOfCommandProc, base);
                    if outcome.landed() {
                        self.on_melee_landed(false, outcome);
                    }
                }
            }
            AuraId::SealOfMartyrdom => {
                let Some(rank) = p.rank(Ability::SealOfMartyrdom) else {
                    return;
                };
                let base = self.weapon_damage() * rank.min;
                let outcome = self.strike(Ability::SealOfMartyrdomProc, base);
                if outcome.landed() {
                    self.on_melee_landed(false, outcome);
                }
            }
            _ => {}
        }
    }

    // ---- Damage taken ----

    fn target_swing(&mut self) {
        let sim = self.sim;
        let p = &sim.paladin;
        let defender = Defender {
            level: p.level,
            defense: p.stat(Stat::Defense),
            dodge: p.stat(Stat::Dodge),
            parry: p.stat(Stat::Parry),
            block: self.block_chance(),
            resilience: p.stat(Stat::Resilience),
            has_shield: p.has_shield,
        };
        let outcome = incoming_melee_table(sim.target.level, defender).roll(&mut self.rng);
        self.result.incoming.record(outcome);
        if !outcome.landed() {
            return;
        }

        let (min, max) = sim.target.damage_range();
        let mut damage = self.rng.range(min, max) * sim.player_armor_factor;
        match outcome {
            HitOutcome::Crit => damage *= 2.0,
            HitOutcome::Crush => damage *= 1.5,
            HitOutcome::Block => damage -= p.stat(Stat::BlockValue),
            _ => {}
        }
        damage -= p.sanctuary_reduction;
        if p.set_bonuses.holy_shield_damage_reduction && self.auras.is_active(AuraId::HolyShield) {
            damage *= 0.9;
        }
        self.take_damage(damage.max(0.0));
        if self.dead {
            return;
        }

        if p.retribution_aura_damage > 0.0 {
            let base = p.retribution_aura_damage;
            self.strike(Ability::RetributionAura, base);
        }
        if p.runes.aegis() {
            if self.rng.proc(0.1) {
                self.proc_redoubt();
            }
            if self.rng.proc(0.02 * p.talents.reckoning as f64) {
                self.extra_attack();
            }
        }
        if outcome == HitOutcome::Crit {
            self.proc_redoubt();
            if self.rng.proc(p.talents.reckoning_chance()) {
                self.extra_attack();
            }
        }
        if outcome == HitOutcome::Block {
            self.on_block();
        }
    }

    fn on_block(&mut self) {
        let p = self.paladin();
        if self.auras.is_active(AuraId::Redoubt) {
            self.auras.remove_stack(AuraId::Redoubt, self.now);
        }
        if self.auras.is_active(AuraId::HolyShield) {
            if let Some(rank) = p.rank(Ability::HolyShield) {
                let mut base = rank.min + rank.coefficient * self.spell_power();
                if p.set_bonuses.holy_shield_uncharged {
                    base += p.stat(Stat::BlockValue);
                }
                self.strike(Ability::HolyShieldProc, base);
                if !p.set_bonuses.holy_shield_uncharged {
                    self.auras.remove_stack(AuraId::HolyShield, self.now);
                }
            }
        }
        if p.set_bonuses.bastion_of_light && self.now >= self.bastion_ready {
            self.bastion_ready = self.now + BASTION_ICD;
            let mut amount = self.rng.range(189.0, 211.0);
            let crit = self.rng.proc(p.stat(Stat::SpellCrit) / 100.0);
            if crit {
                amount *= 1.5;
            }
            let stats = self.result.ability_mut(Ability::BastionOfLight);
            stats.hits += 1;
            if crit {
                stats.crits += 1;
            }
            self.heal(amount);
        }
        if p.set_bonuses.reckoning_on_block && self.rng.proc(p.talents.reckoning_chance()) {
            self.extra_attack();
        }
    }

    fn extra_attack(&mut self) {
        trace!(time = self.now, "extra attack");
        self.melee_swing();
    }

    fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
        self.result.damage_taken += amount;

        let window = self.sim.paladin.other.burst_window;
        self.burst.push_back((self.now, amount));
        self.burst_sum += amount;
        while let Some(&(t, d)) = self.burst.front() {
            if t > self.now - window {
                break;
            }
            self.burst.pop_front();
            self.burst_sum -= d;
        }
        self.result.max_burst_damage = self.result.max_burst_damage.max(self.burst_sum);

        if self.health <= 0.0 {
            self.dead = true;
            self.result.death_time = Some(self.now);
            debug!(time = self.now, "paladin died");
        }
    }

    fn heal(&mut self, amount: f64) {
        let effective = amount.min(self.sim.paladin.max_health() - self.health).max(0.0);
        self.health += effective;
        self.result.healing_received += effective;
    }

    fn restore_mana(&mut self, amount: f64) {
        self.mana = (self.mana + amount).min(self.sim.paladin.max_mana());
    }

    // ---- Casting ----

    fn decide(&mut self) {
        if self.now < self.casting_until {
            return;
        }
        let sim = self.sim;
        match sim.apl.evaluate(&*self) {
            Some(ability) => {
                self.begin_cast(ability);
                if ability.cast_time() <= 0.0 {
                    let next = if ability.on_gcd() { self.gcd_ready } else { self.now };
                    self.queue.push(next, PRIO_DECISION, Action::Decision);
                }
            }
            None => {
                let next = self.next_ready_time().min(self.now + IDLE_RECHECK);
                self.queue.push(next, PRIO_DECISION, Action::Decision);
            }
        }
    }

    /// Earliest future moment a cooldown or the GCD comes off
    fn next_ready_time(&self) -> f64 {
        self.cooldowns
            .iter()
            .copied()
            .chain(std::iter::once(self.gcd_ready))
            .filter(|t| *t > self.now)
            .fold(f64::INFINITY, f64::min)
    }

    /// Pay costs and start cooldowns; instant abilities resolve immediately
    fn begin_cast(&mut self, ability: Ability) {
        let p = self.paladin();
        let cost = p.mana_cost(ability);
        self.mana -= cost;
        self.result.mana_spent += cost;
        self.result.ability_mut(ability).casts += 1;
        self.cooldowns[ability as usize] = self.now + p.cooldown(ability);
        if ability.on_gcd() {
            self.gcd_ready = self.now + GCD;
        }
        trace!(time = self.now, ability = ability.name(), mana = self.mana, "cast");

        if p.set_bonuses.crusaders_wrath && self.rng.proc(0.04) {
            self.activate(AuraId::CrusadersWrath);
        }

        let cast_time = ability.cast_time();
        if cast_time > 0.0 {
            self.casting_until = self.now + cast_time;
            self.queue.push(self.casting_until, PRIO_PLAYER, Action::CastComplete(ability));
        } else {
            self.apply(ability);
        }
    }

    fn apply(&mut self, ability: Ability) {
        let p = self.paladin();
        match ability {
            Ability::SealOfRighteousness => self.put_up_seal(AuraId::SealOfRighteousness),
            Ability::SealOfCommand => self.put_up_seal(AuraId::SealOfCommand),
            Ability::SealOfMartyrdom => self.put_up_seal(AuraId::SealOfMartyrdom),
            Ability::Judgement => self.judge(),
            Ability::RighteousFury => {
                self.activate(AuraId::RighteousFury);
            }
            Ability::HolyShield => {
                self.activate(AuraId::HolyShield);
                if !p.set_bonuses.holy_shield_uncharged {
                    self.auras.set_stacks(AuraId::HolyShield, 4);
                }
                if p.runes.malleable_protection() {
                    let bonus_defense = (p.stat(Stat::Defense) - 5.0 * p.level as f64).max(0.0);
                    self.activate_with_stacks(AuraId::DefendersResolve, bonus_defense as i32);
                }
            }
            Ability::Consecration => {
                self.activate(AuraId::Consecration);
                self.queue.cancel_where(|a| *a == Action::ConsecrationTick);
                for i in 1..=CONSECRATION_TICKS {
                    self.queue.push(self.now + i as f64, PRIO_PERIODIC, Action::ConsecrationTick);
                }
            }
            Ability::HammerOfTheRighteous => {
                let Some(rank) = p.rank(ability) else {
                    return;
                };
                let base = p.weapon.dps() * rank.min;
                let outcome = self.strike(ability, base);
                if outcome.landed() {
                    self.on_melee_landed(false, outcome);
                }
            }
            Ability::Exorcism | Ability::HammerOfWrath => {
                let Some(rank) = p.rank(ability) else {
                    return;
                };
                let base = self.rng.range(rank.min, rank.max) + rank.coefficient * self.spell_power();
                self.strike(ability, base);
            }
            Ability::HolyShock => {
                let Some(rank) = p.rank(ability) else {
                    return;
                };
                let base = (self.rng.range(rank.min, rank.max) + rank.coefficient * self.spell_power())
                    * p.set_bonuses.holy_shock_damage_mult;
                let outcome = self.strike(ability, base);
                if outcome.landed() && p.runes.shock_and_awe() {
                    self.activate(AuraId::ShockAndAwe);
                }
            }
            Ability::LayOnHands => {
                let missing = p.max_health() - self.health;
                self.heal(missing);
                self.mana = 0.0;
            }
            _ => {}
        }
    }

    fn put_up_seal(&mut self, seal: AuraId) {
        if let Some(current) = self.auras.active_seal() {
            if current != seal {
                self.auras.deactivate(current, self.now);
            }
        }
        if self.activate(seal) {
            self.fresh_seal = true;
        }
    }

    fn judge(&mut self) {
        let Some(seal) = self.auras.active_seal() else {
            return;
        };
        let p = self.paladin();
        let sp = self.spell_power();
        let base = match seal {
            AuraId::SealOfRighteousness => p
                .rank(Ability::SealOfRighteousness)
                .map(|r| (r.max + 0.5 * sp) * p.talents.improved_sor())
                .unwrap_or(0.0),
            AuraId::SealOfCommand => p.rank(Ability::SealOfCommand).map(|r| r.max + 0.43 * sp).unwrap_or(0.0),
            AuraId::SealOfMartyrdom => {
                let fraction = p.rank(Ability::SealOfMartyrdom).map(|r| r.max).unwrap_or(0.0);
                self.weapon_damage() * fraction
            }
            _ => 0.0,
        };
        self.strike(Ability::Judgement, base * p.set_bonuses.judgement_damage_mult);

        if p.set_bonuses.seals_not_consumed {
            // seal stays up
        } else if p.set_bonuses.seal_linger {
            let linger_until = self.now + SEAL_LINGER;
            if self.auras.remaining(seal, self.now) > SEAL_LINGER {
                if let Some(generation) = self.auras.reschedule(seal, linger_until) {
                    self.queue.push(linger_until, PRIO_AURA, Action::AuraExpire { aura: seal, generation });
                }
            }
        } else {
            self.auras.deactivate(seal, self.now);
        }

        if p.set_bonuses.judgement_reset_on_new_seal && self.fresh_seal {
            self.cooldowns[Ability::Judgement as usize] = self.now;
        }
        self.fresh_seal = false;

        if p.set_bonuses.swift_judgement {
            self.activate(AuraId::SwiftJudgement);
            self.auras.add_stack(AuraId::SwiftJudgement);
        }
    }

    fn consecration_tick(&mut self) {
        let p = self.paladin();
        let Some(rank) = p.rank(Ability::Consecration) else {
            return;
        };
        let base = (rank.min / CONSECRATION_TICKS as f64 + rank.coefficient * self.spell_power())
            * p.set_bonuses.consecration_damage_mult;
        self.strike(Ability::Consecration, base);
    }

    /// Righteous Fury is only cast when the spec option asks for it
    fn option_allows(&self, ability: Ability) -> bool {
        ability != Ability::RighteousFury || self.sim.paladin.options.righteous_fury
    }

    /// Abilities used before the pull run at negative time without events
    fn prepull(&mut self) {
        let sim = self.sim;
        let mut actions = sim.apl.prepull.clone();
        actions.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        for action in actions {
            self.now = action.offset.min(0.0);
            let Some(ability) = action.action.resolve(&*self) else {
                continue;
            };
            if ability.is_castable()
                && self.option_allows(ability)
                && sim.paladin.knows(ability)
                && self.mana >= sim.paladin.mana_cost(ability)
            {
                self.begin_cast(ability);
            }
        }
        self.casting_until = self.casting_until.min(0.0);
    }
}

impl AplContext for Combat<'_> {
    fn aura_active(&self, aura: AuraId) -> bool {
        self.auras.is_active(aura)
    }

    fn aura_remaining(&self, aura: AuraId) -> f64 {
        self.auras.remaining(aura, self.now)
    }

    fn aura_stacks(&self, aura: AuraId) -> i32 {
        self.auras.stacks(aura)
    }

    fn mana_percent(&self) -> f64 {
        let max = self.sim.paladin.max_mana();
        if max > 0.0 {
            100.0 * self.mana / max
        } else {
            0.0
        }
    }

    fn health_percent(&self) -> f64 {
        100.0 * self.health / self.sim.paladin.max_health()
    }

    fn defensive_threshold_percent(&self) -> f64 {
        self.sim.paladin.defensive_threshold_percent()
    }

    fn execute_phase(&self) -> bool {
        self.sim.encounter.phase_at(self.now, self.duration) == EncounterPhase::Execute
    }

    fn seal_active(&self) -> bool {
        self.auras.active_seal().is_some()
    }

    fn target_undead_or_demon(&self) -> bool {
        self.sim.target.is_undead_or_demon()
    }

    fn elapsed(&self) -> f64 {
        self.now
    }

    fn remaining(&self) -> f64 {
        (self.duration - self.now).max(0.0)
    }

    fn primary_seal(&self) -> crate::player_data::PaladinSeal {
        self.sim.paladin.options.primary_seal
    }

    fn can_cast(&self, ability: Ability) -> bool {
        let p = self.paladin();
        if !self.option_allows(ability) || !p.knows(ability) {
            return false;
        }
        if self.now < self.cooldowns[ability as usize] || self.now < self.casting_until {
            return false;
        }
        if ability.on_gcd() && self.now < self.gcd_ready {
            return false;
        }
        if self.mana < p.mana_cost(ability) {
            return false;
        }
        match ability {
            Ability::Judgement => self.seal_active(),
            Ability::HammerOfWrath => self.execute_phase(),
            _ => true,
        }
    }
}

/// Run one iteration with an explicit seed
pub fn run_simulation_with_seed(config: &SimConfig, seed: u64) -> Result<SimResult> {
    Ok(PreparedSim::new(config)?.run(seed))
}

/// Run multiple simulations in parallel
pub fn run_simulations_parallel(config: &SimConfig, count: usize) -> Result<Vec<SimResult>> {
    Ok(PreparedSim::new(config)?.run_parallel(base_seed(config), count))
}

/// Run multiple simulations sequentially; same seeds as the parallel runner
pub fn run_simulations_sequential(config: &SimConfig, count: usize) -> Result<Vec<SimResult>> {
    Ok(PreparedSim::new(config)?.run_sequential(base_seed(config), count))
}

/// Run simulations and return aggregated stats
pub fn run_and_aggregate(config: &SimConfig, count: usize, parallel: bool) -> Result<AggregatedStats> {
    let prepared = PreparedSim::new(config)?;
    let seed = base_seed(config);
    info!(iterations = count, parallel, seed, "starting simulation run");
    let results = if parallel {
        prepared.run_parallel(seed, count)
    } else {
        prepared.run_sequential(seed, count)
    };
    let stats = AggregatedStats::from_results(&results);
    info!(dps = stats.dps.mean, tps = stats.tps.mean, dtps = stats.dtps.mean, survival = stats.survival_rate, "run complete");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apl::{AplAction, AplCondition};
    use crate::config::{OtherOptions, PlayerConfig, RotationSelection};
    use crate::item_sets::{ItemSet, SetBonuses};
    use crate::runes::FeetRune;
    use std::collections::BTreeMap;

    fn config() -> SimConfig {
        SimConfig { seed: Some(42), iterations: 20, ..Default::default() }
    }

    fn prepared() -> PreparedSim {
        PreparedSim::new(&config()).unwrap()
    }

    /// Replace whatever the preset gear grants with exactly these sets
    fn with_sets(sim: &mut PreparedSim, sets: &[(ItemSet, i32)]) {
        sim.paladin.set_bonuses = SetBonuses::from_counts(&sets.iter().copied().collect::<BTreeMap<_, _>>());
    }

    /// Fire the aura expiries queued up to `until`, ignoring everything else
    fn expire_until(c: &mut Combat<'_>, until: f64) {
        while c.queue.peek_time().is_some_and(|t| t <= until) {
            let Some(event) = c.queue.pop() else {
                break;
            };
            c.now = event.time;
            if let Action::AuraExpire { .. } = event.action {
                c.handle(event.action);
            }
        }
        c.now = until;
    }

    #[test]
    fn same_seed_same_result() {
        let c = config();
        let a = run_simulation_with_seed(&c, 7).unwrap();
        let b = run_simulation_with_seed(&c, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.damage_done > 0.0);
    }

    #[test]
    fn different_seeds_differ() {
        let c = config();
        let a = run_simulation_with_seed(&c, 1).unwrap();
        let b = run_simulation_with_seed(&c, 2).unwrap();
        assert_ne!(a.damage_done, b.damage_done);
    }

    #[test]
    fn fight_lasts_rolled_duration_when_alive() {
        let mut c = config();
        c.player.other.incoming_hps = 100_000.0;
        let r = run_simulation_with_seed(&c, 3).unwrap();
        assert!(r.survived());
        assert_eq!(r.elapsed, r.duration);
        assert!((175.0..=185.0).contains(&r.duration));
    }

    #[test]
    fn no_healing_against_a_boss_is_fatal() {
        let mut c = config();
        c.player.other.incoming_hps = 0.0;
        c.player.other.healing_cadence = 1000.0;
        let mut p = PreparedSim::new(&c).unwrap();
        p.incoming_hps = 0.0;
        let r = p.run(5);
        assert!(!r.survived());
        assert!(r.elapsed < r.duration);
        assert!(r.max_burst_damage > 0.0);
    }

    #[test]
    fn off_tank_takes_no_damage() {
        let mut c = config();
        c.player.other = OtherOptions { tank_assignment: 1, ..Default::default() };
        let r = run_simulation_with_seed(&c, 9).unwrap();
        assert_eq!(r.damage_taken, 0.0);
        assert_eq!(r.incoming.total(), 0);
        assert!(r.threat > 0.0);
    }

    #[test]
    fn righteous_fury_boosts_holy_threat() {
        let r = run_simulation_with_seed(&config(), 11).unwrap();
        let holy = r.ability(Ability::Consecration);
        assert!(holy.damage > 0.0);
        assert!(holy.threat > holy.damage * 1.5);
        let melee = r.ability(Ability::MeleeSwing);
        assert!((melee.threat - melee.damage).abs() < 1e-6);
    }

    #[test]
    fn parallel_matches_sequential() {
        let c = config();
        let par = run_simulations_parallel(&c, 8).unwrap();
        let seq = run_simulations_sequential(&c, 8).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn no_seal_means_no_seal_damage() {
        let mut c = config();
        c.player.spec_options.primary_seal = crate::player_data::PaladinSeal::NoSeal;
        let r = run_simulation_with_seed(&c, 4).unwrap();
        assert_eq!(r.ability(Ability::SealOfRighteousnessProc).damage, 0.0);
        assert_eq!(r.ability(Ability::Judgement).casts, 0);
    }

    #[test]
    fn low_level_paladin_runs() {
        let c = SimConfig {
            player: PlayerConfig { level: 25, gear: crate::config::GearSelection::Preset("p1_protection".into()), ..Default::default() },
            seed: Some(1),
            ..Default::default()
        };
        let r = run_simulation_with_seed(&c, 1).unwrap();
        assert!(r.damage_done > 0.0);
        assert_eq!(r.ability(Ability::HolyShield).casts, 0);
    }

    fn consecration_only() -> RotationSelection {
        RotationSelection::Custom(Apl {
            prepull: vec![],
            priority_list: vec![
                AplAction::primary_seal().when(AplCondition::SealInactive),
                AplAction::cast(Ability::Consecration),
            ],
        })
    }

    #[test]
    fn righteous_fury_option_controls_holy_threat() {
        let mut c = config();
        c.player.rotation = consecration_only();
        let fury = c.player.resolve_talents().unwrap().righteous_fury_threat();

        let on = run_simulation_with_seed(&c, 11).unwrap();
        let cons = on.ability(Ability::Consecration);
        assert!(cons.damage > 0.0);
        assert!((cons.threat / cons.damage - fury).abs() < 1e-9);
        assert_eq!(on.ability(Ability::RighteousFury).casts, 0);

        c.player.spec_options.righteous_fury = false;
        let off = run_simulation_with_seed(&c, 11).unwrap();
        let cons = off.ability(Ability::Consecration);
        assert!(cons.damage > 0.0);
        assert!((cons.threat - cons.damage).abs() < 1e-6);
        assert!(off.threat < on.threat);
    }

    #[test]
    fn disabled_righteous_fury_is_never_cast() {
        let mut c = config();
        c.player.spec_options.righteous_fury = false;
        let r = run_simulation_with_seed(&c, 11).unwrap();
        assert_eq!(r.ability(Ability::RighteousFury).casts, 0);
        let melee = r.ability(Ability::MeleeSwing);
        assert!(melee.damage > 0.0);
    }

    #[test]
    fn redoubt_charges_are_spent_by_blocks() {
        let mut sim = prepared();
        with_sets(&mut sim, &[]);
        sim.paladin.talents.redoubt = 5;
        let mut c = Combat::new(&sim, 1);
        let base_block = c.block_chance();

        c.proc_redoubt();
        assert_eq!(c.auras.stacks(AuraId::Redoubt), 5);
        assert!((c.block_chance() - base_block - 30.0).abs() < 1e-9);
        for left in (1..5).rev() {
            c.on_block();
            assert_eq!(c.auras.stacks(AuraId::Redoubt), left);
        }
        c.on_block();
        assert!(!c.auras.is_active(AuraId::Redoubt));
        assert!((c.block_chance() - base_block).abs() < 1e-9);
    }

    #[test]
    fn redoubt_needs_the_talent() {
        let mut sim = prepared();
        sim.paladin.talents.redoubt = 0;
        let mut c = Combat::new(&sim, 1);
        c.proc_redoubt();
        assert!(!c.auras.is_active(AuraId::Redoubt));
    }

    #[test]
    fn vengeance_procs_on_crits_only() {
        let mut sim = prepared();
        sim.paladin.talents.vengeance = 5;
        let mut c = Combat::new(&sim, 1);
        let holy = c.damage_multiplier(School::Holy);
        let physical = c.damage_multiplier(School::Physical);

        c.record_damage(Ability::Exorcism, 100.0, false);
        assert!(!c.auras.is_active(AuraId::Vengeance));

        c.record_damage(Ability::Exorcism, 100.0, true);
        assert!(c.auras.is_active(AuraId::Vengeance));
        assert!((c.auras.remaining(AuraId::Vengeance, c.now) - 8.0).abs() < 1e-9);
        assert!((c.damage_multiplier(School::Holy) / holy - 1.15).abs() < 1e-9);
        assert!((c.damage_multiplier(School::Physical) / physical - 1.15).abs() < 1e-9);

        expire_until(&mut c, 8.0);
        assert!(!c.auras.is_active(AuraId::Vengeance));
    }

    #[test]
    fn vindication_raises_attack_power_on_landed_melee() {
        let mut sim = prepared();
        sim.paladin.talents.vindication = 3;
        let mut c = Combat::new(&sim, 1);
        let ap = c.attack_power();
        c.on_melee_landed(false, HitOutcome::Hit);
        assert!(c.auras.is_active(AuraId::Vindication));
        assert!((c.attack_power() / ap - 1.15).abs() < 1e-9);
    }

    #[test]
    fn lawbringer_radiance_lets_a_judged_seal_linger() {
        let mut sim = prepared();
        with_sets(&mut sim, &[(ItemSet::LawbringerRadiance, 6)]);
        let mut c = Combat::new(&sim, 1);
        c.put_up_seal(AuraId::SealOfRighteousness);
        c.judge();
        assert!(c.auras.is_active(AuraId::SealOfRighteousness));
        assert!((c.auras.remaining(AuraId::SealOfRighteousness, c.now) - SEAL_LINGER).abs() < 1e-9);

        expire_until(&mut c, SEAL_LINGER - 0.1);
        assert!(c.auras.is_active(AuraId::SealOfRighteousness));
        expire_until(&mut c, SEAL_LINGER);
        assert_eq!(c.auras.active_seal(), None);
    }

    #[test]
    fn judgement_consumes_the_seal_without_sets() {
        let mut sim = prepared();
        with_sets(&mut sim, &[]);
        let mut c = Combat::new(&sim, 1);
        c.put_up_seal(AuraId::SealOfRighteousness);
        c.judge();
        assert_eq!(c.auras.active_seal(), None);
    }

    #[test]
    fn radiant_judgement_keeps_seals_and_resets_on_a_fresh_one() {
        let mut sim = prepared();
        with_sets(&mut sim, &[(ItemSet::RadiantJudgement, 6)]);
        sim.paladin.talents.vengeance = 0;
        let judgement_cd = sim.paladin.cooldown(Ability::Judgement);
        let holy = sim.paladin.school_multiplier(School::Holy);
        let mut c = Combat::new(&sim, 1);

        c.put_up_seal(AuraId::SealOfRighteousness);
        c.begin_cast(Ability::Judgement);
        assert_eq!(c.auras.active_seal(), Some(AuraId::SealOfRighteousness));
        assert_eq!(c.cooldowns[Ability::Judgement as usize], c.now);
        assert_eq!(c.auras.stacks(AuraId::SwiftJudgement), 1);

        c.begin_cast(Ability::Judgement);
        assert_eq!(c.auras.active_seal(), Some(AuraId::SealOfRighteousness));
        assert_eq!(c.cooldowns[Ability::Judgement as usize], c.now + judgement_cd);
        assert_eq!(c.auras.stacks(AuraId::SwiftJudgement), 2);
        assert!((c.damage_multiplier(School::Holy) / holy - 1.02).abs() < 1e-9);
    }

    #[test]
    fn art_of_war_cuts_exorcism_cooldown_on_crit() {
        let mut sim = prepared();
        sim.paladin.runes.feet = Some(FeetRune::TheArtOfWar);
        let mut c = Combat::new(&sim, 1);
        let exorcism = Ability::Exorcism as usize;
        c.now = 1.0;

        c.cooldowns[exorcism] = 10.0;
        c.on_melee_landed(false, HitOutcome::Hit);
        assert_eq!(c.cooldowns[exorcism], 10.0);
        c.on_melee_landed(false, HitOutcome::Crit);
        assert_eq!(c.cooldowns[exorcism], 8.0);

        // never pushed into the past
        c.cooldowns[exorcism] = 2.0;
        c.on_melee_landed(false, HitOutcome::Crit);
        assert_eq!(c.cooldowns[exorcism], 1.0);
    }

    #[test]
    fn guarded_by_the_light_ticks_mana_on_one_chain() {
        let mut sim = prepared();
        with_sets(&mut sim, &[]);
        sim.paladin.runes.feet = Some(FeetRune::GuardedByTheLight);
        let tick = 0.05 * sim.paladin.max_mana();
        let mut c = Combat::new(&sim, 1);
        c.mana = 0.0;

        c.on_melee_landed(true, HitOutcome::Hit);
        assert!(c.auras.is_active(AuraId::GuardedByTheLight));
        assert_eq!(c.guarded_chain, 1);
        c.now = GUARDED_TICK;
        c.handle(Action::GuardedTick { chain: 1 });
        assert!((c.mana - tick).abs() < 1e-9);

        // a refresh keeps the running chain
        c.on_melee_landed(true, HitOutcome::Hit);
        assert_eq!(c.guarded_chain, 1);

        c.auras.deactivate(AuraId::GuardedByTheLight, c.now);
        c.on_melee_landed(true, HitOutcome::Hit);
        assert_eq!(c.guarded_chain, 2);
        c.handle(Action::GuardedTick { chain: 1 });
        assert!((c.mana - tick).abs() < 1e-9);
        c.handle(Action::GuardedTick { chain: 2 });
        assert!((c.mana - 2.0 * tick).abs() < 1e-9);
    }

    #[test]
    fn bastion_of_light_heals_on_block_with_cooldown() {
        let mut sim = prepared();
        with_sets(&mut sim, &[(ItemSet::LawbringerWill, 4)]);
        let mut c = Combat::new(&sim, 1);
        c.health = 100.0;

        c.on_block();
        let healed = c.health - 100.0;
        assert!((189.0..=211.0 * 1.5).contains(&healed));
        assert_eq!(c.result.ability(Ability::BastionOfLight).hits, 1);

        c.now = BASTION_ICD - 0.1;
        c.on_block();
        assert_eq!(c.result.ability(Ability::BastionOfLight).hits, 1);

        c.now = BASTION_ICD;
        c.on_block();
        assert_eq!(c.result.ability(Ability::BastionOfLight).hits, 2);
    }

    fn swings_after_block(reckoning: i32) -> u32 {
        let mut sim = prepared();
        with_sets(&mut sim, &[(ItemSet::WilfullJudgement, 6)]);
        sim.paladin.talents.reckoning = reckoning;
        let mut c = Combat::new(&sim, 1);
        c.on_block();
        c.result.ability(Ability::MeleeSwing).casts
    }

    #[test]
    fn reckoning_on_block_grants_an_extra_swing() {
        assert_eq!(swings_after_block(5), 1);
        assert_eq!(swings_after_block(0), 0);
    }

    #[test]
    fn hammer_of_wrath_only_in_execute() {
        let sim = prepared();
        let mut c = Combat::new(&sim, 1);
        assert!(!c.can_cast(Ability::HammerOfWrath));
        c.now = sim.encounter.execute_start(c.duration);
        assert!(c.can_cast(Ability::HammerOfWrath));

        let mut no_execute = config();
        no_execute.encounter.execute_proportion = 0.0;
        let r = run_simulation_with_seed(&no_execute, 3).unwrap();
        assert_eq!(r.ability(Ability::HammerOfWrath).casts, 0);
    }
}
