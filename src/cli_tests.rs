use std::path::PathBuf;

use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_add_without_amount() {
    let cli = Cli::parse_from(["hydro-track", "add"]);
    match cli.command {
        Commands::Add(args) => {
            assert!(args.amount.is_none());
            assert!(args.unit.is_none());
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn cli_add_with_amount_and_unit() {
    let cli = Cli::parse_from(["hydro-track", "add", "12.5", "--unit", "oz"]);
    match cli.command {
        Commands::Add(args) => {
            assert_eq!(args.amount.as_deref(), Some("12.5"));
            assert_eq!(args.unit, Some(Unit::Oz));
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn cli_add_rejects_unknown_unit() {
    assert!(Cli::try_parse_from(["hydro-track", "add", "1", "--unit", "cups"]).is_err());
}

#[test]
fn cli_reset_flags() {
    let cli = Cli::parse_from(["hydro-track", "reset", "--yes", "--all"]);
    match cli.command {
        Commands::Reset(args) => {
            assert!(args.yes);
            assert!(args.all);
        }
        _ => panic!("Expected Reset command"),
    }
}

#[test]
fn cli_status_json_format() {
    let cli = Cli::parse_from(["hydro-track", "status", "--format", "json"]);
    match cli.command {
        Commands::Status(args) => assert_eq!(args.format, OutputFormat::Json),
        _ => panic!("Expected Status command"),
    }
}

#[test]
fn cli_goal_without_action_defaults_to_none() {
    let cli = Cli::parse_from(["hydro-track", "goal"]);
    match cli.command {
        Commands::Goal(args) => assert!(args.action.is_none()),
        _ => panic!("Expected Goal command"),
    }
}

#[test]
fn cli_goal_set_accepts_negative_numbers() {
    let cli = Cli::parse_from(["hydro-track", "goal", "set", "-5"]);
    match cli.command {
        Commands::Goal(GoalArgs {
            action: Some(GoalAction::Set { amount }),
        }) => assert_eq!(amount, -5),
        _ => panic!("Expected goal set"),
    }
}

#[test]
fn cli_settings_reminder_toggle() {
    let cli = Cli::parse_from(["hydro-track", "settings", "reminder", "on"]);
    match cli.command {
        Commands::Settings(SettingsArgs {
            action: Some(SettingsAction::Reminder { state }),
        }) => assert!(bool::from(state)),
        _ => panic!("Expected settings reminder"),
    }
}

#[test]
fn cli_settings_theme() {
    let cli = Cli::parse_from(["hydro-track", "settings", "theme", "dark"]);
    match cli.command {
        Commands::Settings(SettingsArgs {
            action: Some(SettingsAction::Theme { theme }),
        }) => assert_eq!(theme, Theme::Dark),
        _ => panic!("Expected settings theme"),
    }
}

#[test]
fn cli_history_offset() {
    let cli = Cli::parse_from(["hydro-track", "history", "--offset", "-2"]);
    match cli.command {
        Commands::History(args) => {
            assert_eq!(args.offset, -2);
            assert_eq!(args.format, OutputFormat::Text);
        }
        _ => panic!("Expected History command"),
    }
}

#[test]
fn cli_global_options_after_subcommand() {
    let cli = Cli::parse_from([
        "hydro-track",
        "status",
        "--today",
        "2024-01-01",
        "--data-dir",
        "/tmp/hydro",
        "--no-config",
        "-vv",
    ]);

    assert_eq!(cli.today.as_deref(), Some("2024-01-01"));
    assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/hydro")));
    assert!(cli.no_config);
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_config_conflicts_with_no_config() {
    let result = Cli::try_parse_from([
        "hydro-track",
        "--config",
        "x.toml",
        "--no-config",
        "status",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_init_default_output() {
    let cli = Cli::parse_from(["hydro-track", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from("hydro-track.toml"));
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn cli_config_validate_optional_path() {
    let cli = Cli::parse_from(["hydro-track", "config", "validate", "custom.toml"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Validate { path },
        }) => assert_eq!(path, Some(PathBuf::from("custom.toml"))),
        _ => panic!("Expected config validate"),
    }
}

#[test]
fn color_choice_maps_to_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Never), ColorMode::Never);
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
}
