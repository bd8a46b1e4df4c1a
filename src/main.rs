//! CLI entry point for the protection paladin simulator

use clap::{Parser, ValueEnum};
use paladin_sim::{
    config::SimConfig,
    encounter::EncounterConfig,
    ep::{EpMetric, StatWeights},
    logging::init_tracing,
    player::Player,
    player_data::Spec,
    presets,
    protection_paladin::ProtectionPaladinSimUi,
    sim_ui::SimUi,
    spec_config::spec_config,
    stats::AggregatedStats,
    Result,
};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Metric {
    Dps,
    Tps,
    Dtps,
}

impl From<Metric> for EpMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Dps => EpMetric::Dps,
            Metric::Tps => EpMetric::Tps,
            Metric::Dtps => EpMetric::Dtps,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "paladin-sim")]
#[command(version = "0.1")]
#[command(about = "Protection paladin combat simulator", long_about = None)]
struct Args {
    /// Path to the build configuration file (YAML or JSON); spec defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of iterations; overrides the config file
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Base seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use parallel processing
    #[arg(short, long, default_value = "false")]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Compute stat weights instead of a plain run
    #[arg(long, default_value = "false")]
    stat_weights: bool,

    /// Metric the stat weights measure
    #[arg(long, value_enum, default_value = "tps")]
    metric: Metric,

    /// Print the computed character sheet and exit
    #[arg(long, default_value = "false")]
    debug_stats: bool,

    /// Print warnings, known issues and settings, then exit
    #[arg(long, default_value = "false")]
    warnings: bool,

    /// List built-in presets and exit
    #[arg(long, default_value = "false")]
    list_presets: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => spec_config(Spec::ProtectionPaladin)?
            .default_player()
            .to_sim_config(EncounterConfig::default()),
    };
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn list_presets() {
    for phase in presets::PRESET_PHASES {
        println!("{:?} (level {}):", phase, phase.level_cap());
        for p in presets::gear_presets_for(phase) {
            println!("  gear:     {}", p.name);
        }
        for p in presets::talent_presets_for(phase) {
            println!("  talents:  {}", p.name);
        }
        for p in presets::rotation_presets_for(phase) {
            println!("  rotation: {} (level {})", p.name, p.level);
        }
    }
    let levels: Vec<String> = presets::default_apl_levels().map(|l| l.to_string()).collect();
    println!("Default rotations for levels: {}", levels.join(", "));
}

fn print_settings(ui: &mut ProtectionPaladinSimUi) {
    let config = ui.spec_config();
    let warnings = ui.warnings();
    if warnings.is_empty() {
        println!("No warnings.");
    }
    for w in &warnings {
        println!("WARNING: {}", w);
    }
    println!();
    println!("Known issues:");
    for issue in &config.known_issues {
        println!("  - {}", issue);
    }
    println!();
    println!("Player:");
    for input in &config.player_icon_inputs {
        println!("  {:<20} {}", input.label(), input.current_value(ui.player()));
    }
    for input in &config.include_buff_debuff_inputs {
        println!("  {:<20} {}", input.label(), input.is_active(ui.player().get_debuffs()));
    }
    println!("Other:");
    let other = ui.player().get_other();
    for input in &config.other_inputs {
        println!("  {:<20} {}", input.label(), input.current_value(&other));
    }
}

fn print_stat_weights(weights: &StatWeights, metric: Metric, elapsed: f64, output: &OutputFormat) {
    match output {
        OutputFormat::Text => {
            println!("=== Stat Weights ({:?}) ===", metric);
            for (stat, w) in &weights.stats {
                println!("{:<22} {:>8.3}", stat.label(), w);
            }
            for (stat, w) in &weights.pseudo {
                println!("{:<22} {:>8.3}", format!("{:?}", stat), w);
            }
            println!();
            println!("Total time: {:.3}s", elapsed);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "metric": format!("{:?}", metric).to_lowercase(),
                "elapsed_seconds": elapsed,
                "weights": weights,
            });
            print_json(&output);
        }
    }
}

fn print_results(stats: &AggregatedStats, warnings: &[String], args: &Args, elapsed: f64) {
    match args.output {
        OutputFormat::Text => {
            for w in warnings {
                println!("WARNING: {}", w);
            }
            println!("=== Protection Paladin Simulation Results ===");
            println!("Iterations: {}", stats.iterations);
            println!();
            println!("DPS:  {:.1} ± {:.1} ({:.1} - {:.1})", stats.dps.mean, stats.dps.std, stats.dps.min, stats.dps.max);
            println!("TPS:  {:.1} ± {:.1} ({:.1} - {:.1})", stats.tps.mean, stats.tps.std, stats.tps.min, stats.tps.max);
            println!("DTPS: {:.1} ± {:.1}", stats.dtps.mean, stats.dtps.std);
            println!("HPS:  {:.1} ± {:.1}", stats.hps.mean, stats.hps.std);
            println!();
            println!("Survival: {:.1}%", stats.survival_rate * 100.0);
            println!("Avg Duration: {:.1}s", stats.avg_duration);
            println!("Avg Max Burst: {:.0}", stats.avg_max_burst);
            println!("Avg Mana Spent: {:.0}", stats.avg_mana_spent);
            println!();
            println!("--- Damage by Ability ---");
            for (name, damage) in &stats.ability_damage {
                let casts = stats.ability_casts.get(name).copied().unwrap_or(0.0);
                println!("{:<24} {:>10.0} ({:.1} casts)", name, damage, casts);
            }
            println!();
            println!("--- Incoming Swings ---");
            let i = &stats.incoming;
            println!("Miss {:.1}  Dodge {:.1}  Parry {:.1}  Block {:.1}", i.miss, i.dodge, i.parry, i.block);
            println!("Crit {:.1}  Crush {:.1}  Hit {:.1}", i.crit, i.crush, i.hit);
            println!();
            println!("--- Performance ---");
            println!("Total time: {:.3}s", elapsed);
            println!("Per iteration: {:.3}ms", elapsed * 1000.0 / stats.iterations.max(1) as f64);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "iterations": stats.iterations,
                "parallel": args.parallel,
                "elapsed_seconds": elapsed,
                "warnings": warnings,
                "stats": stats,
            });
            print_json(&output);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            process::exit(1);
        }
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1);
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("{}", e);
    }

    if args.list_presets {
        list_presets();
        return;
    }

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let mut ui = match ProtectionPaladinSimUi::new("cli".into(), Player::from(config.player.clone())) {
        Ok(ui) => ui,
        Err(e) => fail(e),
    };
    ui.base_mut().set_encounter(config.encounter.clone());
    ui.base_mut().set_seed(config.seed);

    if args.warnings {
        print_settings(&mut ui);
        return;
    }

    if args.debug_stats {
        let sheet = match ui.base().character_stats() {
            Ok(s) => s,
            Err(e) => fail(e),
        };
        println!("============================================================");
        println!("PROTECTION PALADIN (level {})", ui.player().get_level());
        println!("============================================================");
        for (stat, value) in sheet {
            println!("{:<22} {:>10.2}", stat.label(), value);
        }
        return;
    }

    let start = Instant::now();
    if args.stat_weights {
        let weights = match ui.compute_ep(args.metric.into(), config.iterations) {
            Ok(w) => w,
            Err(e) => fail(e),
        };
        print_stat_weights(&weights, args.metric, start.elapsed().as_secs_f64(), &args.output);
        return;
    }

    let stats = match ui.run_simulation(config.iterations, args.parallel) {
        Ok(s) => s,
        Err(e) => fail(e),
    };
    let elapsed = start.elapsed().as_secs_f64();
    let warnings = ui.warnings();
    print_results(&stats, &warnings, &args, elapsed);
}
