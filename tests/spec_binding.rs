use paladin_sim::config::{PaladinOptions, TalentSelection};
use paladin_sim::player::Player;
use paladin_sim::player_data::{PaladinSeal, Spec};
use paladin_sim::presets;
use paladin_sim::protection_paladin::{build_spec_config, ProtectionPaladinSimUi, SEAL_WARNING};
use paladin_sim::sim_ui::SimUi;
use paladin_sim::spec_config::{spec_config, SpecRegistry};
use paladin_sim::talents::Talents;
use paladin_sim::unit_stats::Stat;
use paladin_sim::SimError;
use std::collections::HashSet;

fn ui_with(player: Player) -> ProtectionPaladinSimUi {
    ProtectionPaladinSimUi::new("test".into(), player).unwrap()
}

#[test]
fn seal_warning_text_for_unset_seal() {
    let config = spec_config(Spec::ProtectionPaladin).unwrap();
    let warning = config.warnings[0];

    let mut player = config.default_player();
    assert_eq!((warning.get_content)(&player), "");

    player
        .set_spec_options(PaladinOptions { primary_seal: PaladinSeal::NoSeal, ..player.get_spec_options() })
        .unwrap();
    let text = (warning.get_content)(&player);
    assert!(text.starts_with("Your previously selected seal is no longer available"));
    assert_eq!(text, SEAL_WARNING);
}

#[test]
fn talent_change_surfaces_the_warning() {
    let mut player = Player::default();
    player
        .set_talents(TalentSelection::Points(Talents { seal_of_command: 1, ..Default::default() }))
        .unwrap();
    player
        .set_spec_options(PaladinOptions { primary_seal: PaladinSeal::Command, ..player.get_spec_options() })
        .unwrap();

    let mut ui = ui_with(player);
    assert!(ui.warnings().is_empty());

    ui.player_mut().set_talents(TalentSelection::Points(Talents::default())).unwrap();
    assert_eq!(ui.warnings(), vec![SEAL_WARNING.to_string()]);
}

#[test]
fn ep_and_display_stats_are_unique() {
    let config = spec_config(Spec::ProtectionPaladin).unwrap();
    let ep: HashSet<Stat> = config.ep_stats.iter().copied().collect();
    let display: HashSet<Stat> = config.display_stats.iter().copied().collect();
    assert_eq!(ep.len(), config.ep_stats.len());
    assert_eq!(display.len(), config.display_stats.len());
    assert!(ep.contains(&config.ep_reference_stat));
}

#[test]
fn registry_rejects_second_registration() {
    let mut registry = SpecRegistry::default();
    assert!(registry.register_spec_config(Spec::ProtectionPaladin, build_spec_config()).is_ok());
    let err = registry
        .register_spec_config(Spec::ProtectionPaladin, build_spec_config())
        .unwrap_err();
    assert!(matches!(err, SimError::DuplicateSpec(Spec::ProtectionPaladin)));
    assert_eq!(registry.specs().count(), 1);
}

#[test]
fn defaults_resolve() {
    let config = spec_config(Spec::ProtectionPaladin).unwrap();
    let player = config.defaults.player_config();
    player.validate().unwrap();
    assert!(player.resolve_gear().is_ok());
    assert!(player.resolve_talents().unwrap().total_points() > 0);
}

#[test]
fn every_phase_has_presets() {
    for phase in presets::PRESET_PHASES {
        let gear: Vec<_> = presets::gear_presets_for(phase).collect();
        let talents: Vec<_> = presets::talent_presets_for(phase).collect();
        let rotations: Vec<_> = presets::rotation_presets_for(phase).collect();
        assert!(!gear.is_empty(), "{:?} gear", phase);
        assert!(!talents.is_empty(), "{:?} talents", phase);
        assert!(!rotations.is_empty(), "{:?} rotations", phase);
        for g in gear {
            assert!(g.gear().is_ok(), "{}", g.name);
        }
        for t in talents {
            assert!(t.talents().validate(phase.level_cap()).is_ok(), "{}", t.name);
        }
    }
}

#[test]
fn auto_rotation_for_every_default_level() {
    let config = spec_config(Spec::ProtectionPaladin).unwrap();
    for level in presets::default_apl_levels() {
        let mut player = config.default_player();
        player.set_level(level).unwrap();
        let apl = (config.auto_rotation)(&player).unwrap();
        assert!(!apl.priority_list.is_empty(), "level {}", level);
    }
}

#[test]
fn raid_sim_preset_gear_names_resolve() {
    let config = spec_config(Spec::ProtectionPaladin).unwrap();
    for preset in &config.raid_sim_presets {
        for by_phase in preset.default_gear.values() {
            for name in by_phase.values() {
                assert!(presets::gear_preset(name).is_ok(), "{}", name);
            }
        }
    }
}
