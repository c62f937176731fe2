//! Create or update Jamf Pro static groups from the command line.
//!
//! # Usage
//!
//! ```text
//! jamf-group-upload --url https://example.jamfcloud.com --name "Engineers %VERSION%" \
//!     --var VERSION=14.2 --replace-group [--kind computer|mobile-device]...
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use jamf_sync_client::JamfClient;
use jamf_sync_core::groups::{
    BatchReport, GroupKind, GroupUploadRequest, KeySubstitution, StaticGroupUploader,
};
use jamf_sync_core::{Credentials, JamfConnection};

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "jamf-group-upload",
    version,
    about = "Create or update static computer and mobile device groups in Jamf Pro",
    long_about = None,
)]
struct Cli {
    /// Jamf Pro server URL
    #[arg(long, env = "JSS_URL")]
    url: Option<String>,

    #[arg(long, env = "API_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "API_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// API client ID; used instead of username/password when a secret is also set
    #[arg(long, env = "CLIENT_ID")]
    client_id: Option<String>,

    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Group kind; repeat to upload the same group for several kinds
    #[arg(long = "kind", default_value = "computer")]
    kinds: Vec<KindArg>,

    /// Group name; `%KEY%` tokens are replaced from `--var`
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Overwrite a group that already exists
    #[arg(long)]
    replace_group: bool,

    /// Drop existing members when replacing
    #[arg(long)]
    clear_assignments: bool,

    /// Seconds to pause after an upload and between retries
    #[arg(long, default_value_t = 0)]
    sleep: u64,

    /// Attempt ceiling, 1 to 10 (anything else falls back to 5)
    #[arg(long)]
    max_tries: Option<String>,

    /// Template value as KEY=VALUE
    #[arg(long = "var", value_parser = parse_key_value)]
    vars: Vec<(String, String)>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Thin wrapper so clap can parse `GroupKind` from CLI args.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KindArg(GroupKind);

impl FromStr for KindArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "computer" => Ok(Self(GroupKind::Computer)),
            "mobile-device" | "mobile" => Ok(Self(GroupKind::MobileDevice)),
            other => Err(format!(
                "unknown group kind '{other}'; expected: computer, mobile-device"
            )),
        }
    }
}

impl fmt::Display for KindArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.config().display_name)
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl Cli {
    fn connection(&self) -> Result<JamfConnection> {
        let credentials = Credentials::from_parts(
            self.username.clone(),
            self.password.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )?;
        Ok(JamfConnection::new(self.url.clone(), credentials))
    }

    fn request(&self) -> GroupUploadRequest {
        GroupUploadRequest {
            group_name: self.name.clone(),
            description: self.description.clone(),
            replace_group: self.replace_group,
            clear_assignments: self.clear_assignments,
            sleep_seconds: self.sleep,
            max_tries: self.max_tries.clone(),
        }
    }

    fn templater(&self) -> KeySubstitution {
        KeySubstitution::new(self.vars.iter().cloned().collect::<HashMap<_, _>>())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(level_filter(cli.verbose))
        .parse_default_env()
        .init();

    let connection = cli.connection()?;
    let request = cli.request();
    let client = Arc::new(JamfClient::new());
    let templater = Arc::new(cli.templater());

    let mut report = BatchReport::default();
    for kind in &cli.kinds {
        let config = kind.0.config();
        let uploader =
            StaticGroupUploader::new(config, client.clone()).with_templater(templater.clone());
        let result = uploader
            .run(&connection, &request)
            .await
            .with_context(|| format!("{} upload failed", kind))?;
        info!("[Cli] {} finished (uploaded: {})", kind, result.group_uploaded);
        report.record(&config, &result);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
