//! Binary entrypoint for the Helpdesk CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and a `data/users.json` seed file
//! - `ask --user <id> <query...>` - answer a single query
//! - `session --user <id>` - answer queries read line by line from stdin
//! - `users` - list the configured user directory
//!
//! See the library crate docs for module-level details: `helpdesk::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::BufReader;

use helpdesk::config::Config;
use helpdesk::desk::{run_session, StaticDirectory};
use helpdesk::logutil::escape_log;

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Answer helpdesk questions with canned, per-user replies")]
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
    /// Write a default configuration and user seed file
    Init {
        /// Where to write the user seed file
        #[arg(long, default_value = "data/users.json")]
        users_file: String,
    },
    /// Answer one query
    Ask {
        /// User id to answer on behalf of
        #[arg(short, long)]
        user: String,
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Answer queries from stdin, one per line, in a single session
    Session {
        /// User id to answer on behalf of
        #[arg(short, long)]
        user: String,
    },
    /// List users in the configured directory
    Users,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Missing config is fine everywhere: built-in defaults apply.
    let config = match cli.command {
        Commands::Init { .. } => None,
        _ => match Config::load(&cli.config).await {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                if std::path::Path::new(&cli.config).exists() {
                    return Err(e);
                }
                None
            }
        },
    };
    init_logging(&config, cli.verbose);
    if config.is_none() && !matches!(cli.command, Commands::Init { .. }) {
        warn!("No config at {}; using built-in defaults", cli.config);
    }
    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Init { users_file } => {
            info!("Initializing new helpdesk configuration");
            let mut cfg = Config::default();
            cfg.desk.users_file = Some(users_file.clone());
            let serialized = toml::to_string_pretty(&cfg)?;
            tokio::fs::write(&cli.config, serialized).await?;
            info!("Configuration file created at {}", cli.config);

            if let Some(parent) = std::path::Path::new(&users_file).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            let seed = StaticDirectory::builtin().to_json_pretty()?;
            tokio::fs::write(&users_file, seed).await?;
            info!("User seed file created at {}", users_file);
        }
        Commands::Ask { user, query } => {
            let mut desk = config.build_responder()?;
            let query = query.join(" ");
            println!("{}", desk.process_query(&query, &user));
        }
        Commands::Session { user } => {
            let mut desk = config.build_responder()?;
            info!("{} session started for user '{}'", config.desk.name, escape_log(&user));
            let mut stdout = tokio::io::stdout();
            let summary =
                run_session(&mut desk, &user, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
            let answered = summary.answered;
            info!("Session ended after {} quer{}", answered, if answered == 1 { "y" } else { "ies" });
        }
        Commands::Users => {
            let directory = config.load_directory()?;
            if directory.is_empty() {
                println!("No users configured.");
            }
            for (id, record) in directory.entries() {
                println!("{:<12} {:<20} {}", id, record.name, record.account_status);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|cfg| cfg.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
