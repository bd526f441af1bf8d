use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use termcolor::{BufferWriter, ColorChoice};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use kodegen_bundler_keychain::config::{SecurityConfig, default_config_path, expand_tilde};
use kodegen_bundler_keychain::{Certificate, SecurityController, error, success, warn};

// ============================================================================
// ERROR HANDLING STRATEGY
// ============================================================================
//
// CRITICAL I/O - Errors propagated with `?`: config loading, `security`
// invocations, writing decoded output to stdout.
//
// DECORATIVE I/O - Errors ignored with `let _ =`: colored status lines.
// ============================================================================

#[derive(Parser)]
#[command(name = "kodegen_keychain")]
#[command(version, about = "Manage signing keychains through the macOS security tool")]
struct Cli {
    /// Path to config file (TOML)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Path to the security executable (overrides config)
    #[arg(long, env = "KEYCHAIN_SECURITY_PATH", global = true)]
    security_path: Option<PathBuf>,

    /// Log every operation at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a CMS-signed file (e.g. a provisioning profile) to stdout
    Decode {
        file: PathBuf,
    },

    /// Import a certificate and its private key, skipping parts already present
    Import {
        /// Public certificate file (.cer)
        #[arg(long)]
        public_key: PathBuf,

        /// Private key file (.p12)
        #[arg(long)]
        private_key: PathBuf,

        #[command(flatten)]
        keychain: KeychainArg,
    },

    /// Create a keychain (no-op if it already exists)
    Create {
        #[command(flatten)]
        keychain: KeychainArg,

        #[command(flatten)]
        password: PasswordArg,
    },

    /// Unlock a keychain
    Unlock {
        #[command(flatten)]
        keychain: KeychainArg,

        #[command(flatten)]
        password: PasswordArg,
    },

    /// Lock a keychain
    Lock {
        #[command(flatten)]
        keychain: KeychainArg,

        #[command(flatten)]
        password: PasswordArg,
    },

    /// Show the effective configuration
    ShowConfig,
}

#[derive(clap::Args)]
struct KeychainArg {
    /// Keychain path (defaults to `default_keychain` from config)
    #[arg(long, short = 'k')]
    keychain: Option<PathBuf>,
}

#[derive(clap::Args)]
struct PasswordArg {
    /// Keychain password
    #[arg(long, short = 'p', env = "KEYCHAIN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl PasswordArg {
    fn into_secret(self) -> Zeroizing<String> {
        Zeroizing::new(self.password)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("KEYCHAIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = SecurityConfig::load(cli.config.as_deref()).await?;
    apply_overrides(&mut config, &cli)?;

    let controller = SecurityController::new(&config);

    match cli.command {
        Command::Decode { file } => {
            let decoded = controller.decode_file(&file).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(decoded.as_bytes())?;
            stdout.flush()?;
        }
        Command::Import {
            public_key,
            private_key,
            keychain,
        } => {
            let keychain = config.keychain_or_default(keychain.keychain.as_deref())?;
            let certificate = Certificate::new(public_key, private_key);
            controller.import_certificate(&certificate, &keychain).await?;
            success!(
                "Imported {} into {}",
                certificate.public_key().display(),
                keychain.display()
            );
        }
        Command::Create { keychain, password } => {
            let keychain = config.keychain_or_default(keychain.keychain.as_deref())?;
            let password = password.into_secret();
            if password.is_empty() {
                warn!("Creating keychain with an empty password");
            }
            controller.create_keychain(&keychain, &password).await?;
            success!("Keychain ready: {}", keychain.display());
        }
        Command::Unlock { keychain, password } => {
            let keychain = config.keychain_or_default(keychain.keychain.as_deref())?;
            let password = password.into_secret();
            controller.unlock_keychain(&keychain, &password).await?;
            success!("Unlocked {}", keychain.display());
        }
        Command::Lock { keychain, password } => {
            let keychain = config.keychain_or_default(keychain.keychain.as_deref())?;
            let password = password.into_secret();
            controller.lock_keychain(&keychain, &password).await?;
            success!("Locked {}", keychain.display());
        }
        Command::ShowConfig => show_config(&config, cli.config.as_deref()),
    }

    Ok(())
}

/// Apply command line / environment overrides on top of the loaded config.
fn apply_overrides(config: &mut SecurityConfig, cli: &Cli) -> Result<()> {
    if let Some(security_path) = &cli.security_path {
        config.security_path = expand_tilde(security_path)?;
    }
    Ok(())
}

fn show_config(config: &SecurityConfig, explicit: Option<&Path>) {
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => default_config_path()
            .filter(|path| path.exists())
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
    };

    let bufwtr = BufferWriter::stdout(ColorChoice::Auto);
    let mut buffer = bufwtr.buffer();
    // Informational output - errors ignored (see strategy above)
    let _ = writeln!(&mut buffer, "📋 Keychain Configuration\n");
    let _ = writeln!(&mut buffer, "Config file:      {source}");
    let _ = writeln!(
        &mut buffer,
        "security_path:    {}",
        config.security_path.display()
    );
    let _ = writeln!(
        &mut buffer,
        "default_keychain: {}",
        config
            .default_keychain
            .as_ref()
            .map_or_else(|| "(not set)".to_string(), |k| k.display().to_string())
    );
    let _ = bufwtr.print(&buffer);
}
