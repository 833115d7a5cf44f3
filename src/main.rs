//! credfetch CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use credfetch::response::to_json;
use credfetch::{Config, CredentialQuery, CredentialType, Retriever, StoreKind};

/// Type filter argument. An empty value means "no type filter".
#[derive(Debug, Clone, Copy)]
struct TypeFilter(Option<CredentialType>);

fn parse_type_filter(s: &str) -> Result<TypeFilter, String> {
    if s.is_empty() {
        return Ok(TypeFilter(None));
    }
    s.parse::<CredentialType>()
        .map(|t| TypeFilter(Some(t)))
        .map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "credfetch")]
#[command(about = "Look up a stored credential in Windows Credential Manager", long_about = None)]
#[command(version)]
struct Cli {
    /// Owner of the credential (exact, case-insensitive match)
    #[arg(short, long, env = "CREDFETCH_USER_NAME")]
    user_name: String,

    /// Store target to search; empty searches every target
    #[arg(short, long, default_value = "")]
    target: String,

    /// Credential type; empty searches every type
    #[arg(long = "type", default_value = "GENERIC", value_parser = parse_type_filter)]
    credential_type: TypeFilter,

    /// Credential store to use (wincred, mock)
    #[arg(long, default_value = "wincred", env = "CREDFETCH_BACKEND")]
    backend: StoreKind,

    /// Do not try to install the CredentialManager module when it is missing
    #[arg(long)]
    no_install: bool,

    /// PowerShell executable
    #[arg(long, default_value = "powershell.exe", env = "CREDFETCH_POWERSHELL")]
    powershell: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn query(&self) -> CredentialQuery {
        CredentialQuery {
            user_name: self.user_name.clone(),
            target: Some(self.target.clone()).filter(|t| !t.is_empty()),
            credential_type: self.credential_type.0,
        }
    }

    fn config(&self) -> Config {
        Config::new(self.backend)
            .with_auto_install(!self.no_install)
            .with_powershell(self.powershell.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut retriever = match Retriever::new(cli.config()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = retriever.retrieve(&cli.query()).await;

    match to_json(&result).and_then(|json| serde_json::to_string_pretty(&json)) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
