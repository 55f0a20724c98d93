//! Binary entrypoint for the Pawpad CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and catalog seed data
//! - `status` - print document statistics
//! - `console` - interactive chat session against the local data file
//!
//! See the library crate docs for module-level details: `pawpad::`.
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use pawpad::config::Config;
use pawpad::pets::{load_catalog_from_json, starter_catalog, ChatProcessor, ChatUser, PetService};
use pawpad::store::JsonFileStore;
use pawpad::validation::validate_user_id;

#[derive(Parser)]
#[command(name = "pawpad")]
#[command(about = "A virtual pet companion for chat bots and web front-ends")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a starter configuration and seed data
    Init,
    /// Show document statistics
    Status,
    /// Open an interactive chat session on stdin
    Console {
        /// User id to act as (string form of a platform numeric id)
        #[arg(long, default_value = "1")]
        user_id: String,
        /// Display name for first-contact registration
        #[arg(long, default_value = "console")]
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Init => init_workspace(&cli.config).await,
        Commands::Status => {
            let config = Config::load(&cli.config).await?;
            show_status(&config).await
        }
        Commands::Console { user_id, username } => {
            let config = Config::load(&cli.config).await?;
            run_console(&config, &user_id, &username).await
        }
    }
}

fn init_logging(config: &Option<Config>, verbose: u8) {
    let base_level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let level = match verbose {
        0 => base_level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if !atty::is(atty::Stream::Stderr) {
        // No TTY (daemonized / piped): drop colors so the log file stays clean
        builder.write_style(env_logger::WriteStyle::Never);
    }
    let _ = builder.try_init();
}

/// Write a starter config and seed the catalog into the data file.
async fn init_workspace(config_path: &str) -> Result<()> {
    Config::create_default(config_path)
        .await
        .with_context(|| format!("creating {}", config_path))?;
    println!("Created {}", config_path);

    let config = Config::load(config_path).await?;

    let seeds_dir = Path::new(&config.storage.seeds_dir);
    tokio::fs::create_dir_all(seeds_dir).await?;
    let seed_file = seeds_dir.join("catalog.json");
    if !seed_file.exists() {
        let seeds: Vec<serde_json::Value> = starter_catalog()
            .into_iter()
            .map(|(key, entry)| {
                serde_json::json!({
                    "key": key,
                    "name": entry.name,
                    "price": entry.price,
                    "animation": entry.animation,
                })
            })
            .collect();
        tokio::fs::write(&seed_file, serde_json::to_string_pretty(&seeds)?).await?;
        println!("Created {}", seed_file.display());
    }

    let service = build_service(&config);
    let inserted = service.seed_catalog(load_seed_catalog(&config)).await?;
    if inserted > 0 {
        info!("seeded catalog with {} entries", inserted);
    }
    println!("Pawpad is ready. Try: pawpad console");
    Ok(())
}

async fn show_status(config: &Config) -> Result<()> {
    let service = build_service(config);
    let stats = service.stats().await?;
    println!("{}", config.app.name);
    println!("  data file:       {}", config.storage.data_file);
    println!("  users:           {}", stats.users);
    println!("  catalog entries: {}", stats.catalog_entries);
    println!("  pets owned:      {}", stats.pets_owned);
    Ok(())
}

/// Interactive stdin chat session, a local stand-in for the bot binding.
async fn run_console(config: &Config, user_id: &str, username: &str) -> Result<()> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let user_id = validate_user_id(user_id)
        .map_err(|e| anyhow::anyhow!("--user-id: {}", e))?
        .to_string();

    let service = build_service(config);
    let seeded = service.seed_catalog(load_seed_catalog(config)).await?;
    if seeded > 0 {
        info!("seeded catalog with {} entries", seeded);
    }

    let processor = ChatProcessor::new(service, &config.app.greeting);
    let user = ChatUser::new(user_id, Some(username));

    println!("{} console. Type HELP for commands, ctrl-d to leave.", config.app.name);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = processor.process(&user, &line).await;
        println!("{}", reply);
    }
    println!("Bye!");
    Ok(())
}

fn build_service(config: &Config) -> PetService<JsonFileStore> {
    PetService::new(JsonFileStore::new(&config.storage.data_file))
}

/// Seed catalog from `seeds_dir/catalog.json`, falling back to the built-in
/// starter set when the file is absent or unreadable.
fn load_seed_catalog(
    config: &Config,
) -> std::collections::BTreeMap<String, pawpad::pets::CatalogEntry> {
    let seed_file = Path::new(&config.storage.seeds_dir).join("catalog.json");
    match load_catalog_from_json(&seed_file) {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!("{} holds no usable entries, using built-ins", seed_file.display());
            starter_catalog()
        }
        Err(e) => {
            info!(
                "seed file {} not loaded ({}), using built-ins",
                seed_file.display(),
                e
            );
            starter_catalog()
        }
    }
}
