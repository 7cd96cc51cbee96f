//! Password Generator CLI
//!
//! Command-line interface for generating and analyzing passwords, and
//! (with the `server` feature) for running the web front end.

use clap::{Parser, Subcommand};
use passgen::{
    config::FileConfig,
    policy::ClassFlags,
    random::SecureRandom,
    session::{GenerateRequest, Session},
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "passgen", version, about = "Generate and analyze passwords")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a random password.
    Generate {
        /// Number of characters (configured default when omitted).
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        no_upper: bool,
        #[arg(long)]
        no_lower: bool,
        #[arg(long)]
        no_digits: bool,
        #[arg(long)]
        no_special: bool,
        /// Strip l, I, 1, O and 0.
        #[arg(long)]
        exclude_similar: bool,
        /// Resample the result from its own characters.
        #[arg(long)]
        shuffle: bool,
    },
    /// Generate a pronounceable password.
    Pronounceable {
        /// Number of letters before the digit and special suffix.
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Analyze a password and suggest variations.
    Analyze {
        password: String,
        /// Number of variations to produce.
        #[arg(long)]
        variations: Option<usize>,
    },
    /// Run the HTTP server.
    #[cfg(feature = "server")]
    Serve {
        /// Port to listen on (configured port when omitted).
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    info!("Password generator v{}", passgen::VERSION);

    let mut rng = SecureRandom::from_os_entropy();

    match cli.command {
        Command::Generate {
            length,
            no_upper,
            no_lower,
            no_digits,
            no_special,
            exclude_similar,
            shuffle,
        } => {
            if exclude_similar {
                config.policy.exclude_similar = true;
            }
            let mut session = Session::from_config(&config);
            let request = GenerateRequest {
                length,
                flags: ClassFlags {
                    upper: no_upper.then_some(false),
                    lower: no_lower.then_some(false),
                    digits: no_digits.then_some(false),
                    special: no_special.then_some(false),
                },
                shuffle,
            };
            let today = chrono::Local::now().date_naive();
            let report = session.generate(&request, &config.generator, today, &mut rng)?;

            println!("{}", report.password);
            print_analysis(&report.analysis.issues, &report.analysis.suggestions);
            println!("Strength: {}/5", report.analysis.score);
            println!(
                "Entropy: {} bits (crack time: {})",
                report.entropy.bits,
                report.entropy.crack_time_display()
            );
            if let Some(next) = session.next_rotation(config.session.rotation_days) {
                println!("Rotate by: {}", next);
            }
        }
        Command::Pronounceable { length } => {
            let session = Session::from_config(&config);
            let password = session.pronounceable(length, &config.generator, &mut rng)?;
            println!("{}", password);
        }
        Command::Analyze {
            password,
            variations,
        } => {
            if let Some(count) = variations {
                config.generator.variation_count = count;
            }
            let session = Session::from_config(&config);
            let report = session.inspect(&password, &config.generator, &mut rng)?;

            print_analysis(&report.analysis.issues, &report.analysis.suggestions);
            println!("Strength: {}/5", report.analysis.score);
            println!(
                "Entropy: {} bits (crack time: {})",
                report.entropy.bits,
                report.entropy.crack_time_display()
            );
            if !report.variations.is_empty() {
                println!("Variations:");
                for variation in &report.variations {
                    println!("  {}", variation);
                }
            }
        }
        #[cfg(feature = "server")]
        Command::Serve { port } => {
            use passgen::metrics::MetricsRegistry;
            use passgen::server::{AppServer, ServerSettings};

            let settings = ServerSettings::with_port(port.unwrap_or(config.server.port));
            let registry = MetricsRegistry::new()?;
            let server = AppServer::new(settings, config, registry);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server.run())?;
        }
    }

    Ok(())
}

fn print_analysis(issues: &[String], suggestions: &[String]) {
    if issues.is_empty() {
        println!("Meets all policy rules");
    } else {
        println!("Issues:");
        for issue in issues {
            println!("  - {}", issue);
        }
    }
    if !suggestions.is_empty() {
        println!("Suggestions:");
        for suggestion in suggestions {
            println!("  - {}", suggestion);
        }
    }
}
