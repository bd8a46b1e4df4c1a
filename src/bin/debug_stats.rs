//! Debug script to print paladin and target stats for a build

use paladin_sim::character::Paladin;
use paladin_sim::config::SimConfig;
use paladin_sim::simulation::PreparedSim;
use paladin_sim::unit_stats::Stat;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => match SimConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let paladin = match Paladin::from_config(&config.player) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error building paladin: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== PALADIN (level {}, {:?}) ===", paladin.level, paladin.race);
    for stat in Stat::ALL {
        let v = paladin.stat(stat);
        if v != 0.0 {
            println!("  {:<22} {:>10.2}", stat.label(), v);
        }
    }
    println!("  weapon:      {:.0}-{:.0} @ {:.2}", paladin.weapon.min_damage, paladin.weapon.max_damage, paladin.weapon.speed);
    println!("  skill:       {:.0}", paladin.weapon_skill);
    println!("  shield:      {}", paladin.has_shield);
    println!("  seals:       {:?}", paladin.available_seals());
    println!("  phys mult:   {:.4}", paladin.physical_damage_multiplier);
    println!("  holy mult:   {:.4}", paladin.holy_damage_multiplier);
    println!("  sanctuary:   {:.0}", paladin.sanctuary_reduction);

    let sim = match PreparedSim::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error preparing simulation: {}", e);
            std::process::exit(1);
        }
    };
    let target = sim.target();
    println!("\n=== TARGET {} (level {}) ===", target.name, target.level);
    println!("  armor:       {:.0}", target.armor);
    println!("  swing:       {:.2}s", target.swing_speed);
    let (lo, hi) = target.damage_range();
    println!("  damage:      {:.0}-{:.0}", lo, hi);
    println!("  AP:          {:.0}", target.attack_power);
    println!("  mob type:    {:?}", target.mob_type);
    println!("  incoming HPS:{:.1}", sim.incoming_hps());
}
