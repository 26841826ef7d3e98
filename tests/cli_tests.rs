use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use linkpad::cli::{Cli, Commands, ConfigCommands};
use linkpad::config::StaticConfig;
use linkpad::interfaces::cli::commands::build_entries;
use linkpad::interfaces::cli::{CliError, build_repository, run_cli_command};
use linkpad::remote_log::EventLogger;
use linkpad::storage::{FileStore, KeyValueStore, ShortenedUrlRecord};
use tempfile::TempDir;

fn file_backed_config(temp_dir: &TempDir) -> Arc<StaticConfig> {
    let mut config = StaticConfig::default();
    config.storage.path = temp_dir
        .path()
        .join("links.json")
        .to_string_lossy()
        .into_owned();
    config.remote_log.enabled = false;
    Arc::new(config)
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_shorten_with_codes() {
        let cli = Cli::try_parse_from([
            "linkpad",
            "shorten",
            "https://a.example.com",
            "https://b.example.com",
            "--validity",
            "60",
            "--code",
            "alpha1",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Shorten {
                urls,
                validity,
                codes,
                json,
            } => {
                assert_eq!(urls.len(), 2);
                assert_eq!(validity.as_deref(), Some("60"));
                assert_eq!(codes, vec!["alpha1"]);
                assert!(json);
            }
            _ => panic!("expected shorten"),
        }
    }

    #[test]
    fn test_shorten_requires_a_url() {
        assert!(Cli::try_parse_from(["linkpad", "shorten"]).is_err());
    }

    #[test]
    fn test_parse_open_with_source_and_global_config() {
        let cli = Cli::try_parse_from([
            "linkpad", "open", "abc123", "--source", "email", "-c", "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Commands::Open { code, source } => {
                assert_eq!(code, "abc123");
                assert_eq!(source.as_deref(), Some("email"));
            }
            _ => panic!("expected open"),
        }
    }

    #[test]
    fn test_parse_stats_and_purge() {
        let cli = Cli::try_parse_from(["linkpad", "stats", "abc123"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats { code: Some(_), json: false }));

        let cli = Cli::try_parse_from(["linkpad", "purge"]).unwrap();
        assert!(matches!(cli.command, Commands::Purge));
    }

    #[test]
    fn test_parse_config_generate() {
        let cli =
            Cli::try_parse_from(["linkpad", "config", "generate", "out.toml", "--force"]).unwrap();
        match cli.command {
            Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            } => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(force);
            }
            _ => panic!("expected config generate"),
        }
    }
}

#[cfg(test)]
mod build_entries_tests {
    use super::*;

    #[test]
    fn test_codes_pair_by_position() {
        let entries = build_entries(
            vec!["https://a.example.com".into(), "https://b.example.com".into()],
            Some("15".into()),
            vec!["first1".into()],
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].custom_shortcode, "first1");
        assert_eq!(entries[1].custom_shortcode, "");
        assert!(entries.iter().all(|e| e.validity_minutes == "15"));
    }

    #[test]
    fn test_more_codes_than_urls() {
        let result = build_entries(
            vec!["https://a.example.com".into()],
            None,
            vec!["one111".into(), "two222".into()],
        );
        assert!(matches!(result, Err(CliError::ParseError(_))));
    }
}

#[cfg(test)]
mod run_command_tests {
    use super::*;

    #[test]
    fn test_shorten_open_purge_flow() {
        let temp_dir = TempDir::new().unwrap();
        let config = file_backed_config(&temp_dir);

        run_cli_command(
            Commands::Shorten {
                urls: vec!["https://example.com/flow".into()],
                validity: None,
                codes: vec!["flow01".into()],
                json: true,
            },
            config.clone(),
            EventLogger::disabled(),
        )
        .unwrap();

        run_cli_command(
            Commands::Open {
                code: "flow01".into(),
                source: Some("test".into()),
            },
            config.clone(),
            EventLogger::disabled(),
        )
        .unwrap();

        run_cli_command(Commands::Purge, config.clone(), EventLogger::disabled()).unwrap();

        let repo = build_repository(&config, EventLogger::disabled()).unwrap();
        let record = repo.find_by_shortcode("flow01").unwrap();
        assert_eq!(record.original_url, "https://example.com/flow");
        assert_eq!(record.clicks.len(), 1);
        assert_eq!(record.clicks[0].source, "test");
    }

    #[test]
    fn test_shorten_sweeps_expired_before_listing_recent() {
        let temp_dir = TempDir::new().unwrap();
        let config = file_backed_config(&temp_dir);

        let stale = ShortenedUrlRecord::new(
            "1".to_string(),
            "https://example.com/stale".to_string(),
            "stale1".to_string(),
            Utc::now() - Duration::hours(2),
            30,
        );
        let store = FileStore::new(&config.storage.path, None).unwrap();
        store
            .set_item(&config.storage.key, &serde_json::to_string(&[stale]).unwrap())
            .unwrap();

        run_cli_command(
            Commands::Shorten {
                urls: vec!["https://example.com/fresh".into()],
                validity: None,
                codes: vec!["fresh1".into()],
                json: false,
            },
            config.clone(),
            EventLogger::disabled(),
        )
        .unwrap();

        let repo = build_repository(&config, EventLogger::disabled()).unwrap();
        assert!(repo.find_by_shortcode("stale1").is_none());
        assert!(repo.find_by_shortcode("fresh1").is_some());
    }

    #[test]
    fn test_open_unknown_code_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = file_backed_config(&temp_dir);

        let err = run_cli_command(
            Commands::Open {
                code: "ghost1".into(),
                source: None,
            },
            config,
            EventLogger::disabled(),
        )
        .unwrap_err();
        assert!(err.format_simple().starts_with("Not Found"));
    }

    #[test]
    fn test_config_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("sample.toml");

        run_cli_command(
            Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some(output.to_string_lossy().into_owned()),
                    force: true,
                },
            },
            Arc::new(StaticConfig::default()),
            EventLogger::disabled(),
        )
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let parsed: StaticConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.shortener.max_batch, 5);
    }
}
