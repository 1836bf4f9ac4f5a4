use std::path::PathBuf;

use arl_sdk::{AssetEntry, EntryRecord, EventStream, Registry};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;
use crate::config::ArlConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ArlConfig::resolve(cli.config.as_deref())?;
    let ledger_path: PathBuf = cli.ledger.clone().unwrap_or_else(|| config.ledger_path.clone());
    let registry = Registry::open(&ledger_path, config.ledger_config())?;
    let mut events = registry.subscribe();
    let format = cli.format;

    let mutated = match cli.command {
        Command::CreateAsset(args) => {
            registry.create_asset(&args.asset_id, &args.to_asset())?;
            done("Created asset", &args.asset_id)
        }
        Command::UpdateAsset(args) => {
            registry.update_asset(&args.asset_id, &args.to_asset())?;
            done("Updated asset", &args.asset_id)
        }
        Command::CreateUser(args) => {
            registry.create_user(&args.to_user())?;
            done("Created user", &args.user_id)
        }
        Command::UpdateUser(args) => {
            registry.update_user(&args.to_user())?;
            done("Updated user", &args.user_id)
        }
        Command::Grant(args) => {
            registry.grant_authorization(&args.to_authorization())?;
            done("Granted authorization", &args.auth_code)
        }
        Command::UpdateAuth(args) => {
            registry.update_authorization(&args.to_authorization())?;
            done("Updated authorization", &args.auth_code)
        }
        Command::DeleteAsset(args) => {
            registry.delete_asset(&args.key)?;
            done("Deleted asset", &args.key)
        }
        Command::ReadAsset(args) => {
            let asset = registry.read_asset(&args.asset_id, &args.user_id, &args.auth_code)?;
            print_record(format, &args.asset_id, &asset)?;
            false
        }
        Command::GetAsset(args) => {
            print_record(format, &args.key, &registry.get_asset(&args.key)?)?;
            false
        }
        Command::ReadUser(args) => {
            print_record(format, &args.key, &registry.read_user(&args.key)?)?;
            false
        }
        Command::ReadAuth(args) => {
            print_record(format, &args.key, &registry.read_authorization(&args.key)?)?;
            false
        }
        Command::ListAssets(_) => {
            match format {
                OutputFormat::Json => println!("{}", registry.list_all_assets_json()?),
                OutputFormat::Text => print_entries(&registry.list_all_assets()?)?,
            }
            false
        }
        Command::Exists(args) => {
            let exists = match args.kind {
                KindArg::Asset => registry.asset_exists(&args.key)?,
                KindArg::User => registry.user_exists(&args.key)?,
                KindArg::Auth => registry.authorization_exists(&args.key)?,
            };
            match format {
                OutputFormat::Json => println!("{exists}"),
                OutputFormat::Text if exists => println!("{} {}", args.key.bold(), "exists".green()),
                OutputFormat::Text => println!("{} {}", args.key.bold(), "does not exist".red()),
            }
            false
        }
    };

    if mutated {
        registry.save(&ledger_path)?;
        print_events(&mut events);
    }
    Ok(())
}

/// Report a successful mutation. Always `true`.
fn done(action: &str, key: &str) -> bool {
    println!("{} {} {}", "✓".green().bold(), action, key.yellow());
    true
}

fn print_record<T: Serialize>(format: OutputFormat, key: &str, record: &T) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => {
            println!("{}", key.yellow().bold());
            if let serde_json::Value::Object(fields) = serde_json::to_value(record)? {
                for (name, value) in fields {
                    let value = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                    let label = format!("{:<11}", format!("{name}:"));
                    println!("  {} {}", label.dimmed(), value);
                }
            }
        }
    }
    Ok(())
}

fn print_entries(entries: &[AssetEntry]) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No assets.");
        return Ok(());
    }
    for entry in entries {
        match &entry.record {
            EntryRecord::Decoded(value) => {
                println!("{}  {}", entry.key.yellow(), serde_json::to_string(value)?)
            }
            EntryRecord::Raw(text) => println!("{}  {} {}", entry.key.yellow(), "(raw)".red(), text),
        }
    }
    Ok(())
}

fn print_events(events: &mut EventStream) {
    while let Ok(event) = events.try_recv() {
        println!("  {} {}: {}", "event".cyan(), event.name, event.payload_text());
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn run(dir: &std::path::Path, args: &[&str]) -> anyhow::Result<()> {
        let ledger = dir.join("ledger.json");
        let config = dir.join("arl.toml");
        std::fs::write(&config, "event_capacity = 8\n").unwrap();

        let mut argv = vec![
            "arl".to_string(),
            "--ledger".to_string(),
            ledger.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    fn reopen(dir: &std::path::Path) -> Registry {
        Registry::open(&dir.join("ledger.json"), Default::default()).unwrap()
    }

    #[test]
    fn mutations_persist_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["create-asset", "023", "--type", "MC"]).unwrap();
        run(dir.path(), &["create-user", "022", "--username", "tan"]).unwrap();
        run(
            dir.path(),
            &["grant", "024", "--for-asset", "023", "--for-user", "022", "--approval", "Y"],
        )
        .unwrap();

        run(dir.path(), &["read-asset", "023", "022", "024"]).unwrap();
        let registry = reopen(dir.path());
        assert_eq!(registry.get_asset("023").unwrap().asset_type, "MC");
        assert!(registry.user_exists("022").unwrap());
    }

    #[test]
    fn denied_read_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["create-asset", "023"]).unwrap();
        run(dir.path(), &["create-user", "022"]).unwrap();
        run(dir.path(), &["grant", "024", "--for-user", "022", "--approval", "N"]).unwrap();

        let err = run(dir.path(), &["read-asset", "023", "022", "024"]).unwrap_err();
        assert!(err.to_string().contains("not authorized"));
    }

    #[test]
    fn failed_mutation_does_not_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["update-asset", "023"]).is_err());
        assert!(!dir.path().join("ledger.json").exists());
    }

    #[test]
    fn delete_and_list() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["create-asset", "001"]).unwrap();
        run(dir.path(), &["create-asset", "500"]).unwrap();
        run(dir.path(), &["delete-asset", "001"]).unwrap();
        run(dir.path(), &["list-assets"]).unwrap();
        run(dir.path(), &["--format", "json", "list-assets"]).unwrap();

        let keys: Vec<String> = reopen(dir.path())
            .list_all_assets()
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["500"]);
    }

    #[test]
    fn exists_reports_without_mutating() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["exists", "asset", "023"]).unwrap();
        assert!(!dir.path().join("ledger.json").exists());
    }
}
