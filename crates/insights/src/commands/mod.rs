//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod access_points;
pub mod auth;
pub mod config_cmd;
pub mod report;
pub mod schools;
pub mod switches;

use insights_api::InsightsClient;
use insights_config::Profile;
use secrecy::SecretString;
use tracing::debug;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// A connected client plus the profile it was built from.
pub struct Session {
    pub client: InsightsClient,
    pub profile_name: String,
    pub profile: Profile,
}

/// Resolve the active profile, apply CLI overrides, and build the client.
///
/// `--base-url` bypasses the config file entirely; `--api-token` replaces
/// whatever token the credential chain produced.
pub fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let config = insights_config::load_config()?;

    let (profile_name, mut profile) = match global.base_url {
        Some(ref base_url) => (
            "cli".to_owned(),
            Profile {
                base_url: base_url.clone(),
                ..Profile::default()
            },
        ),
        None => insights_config::resolve_profile(&config, global.profile.as_deref())?,
    };

    if global.insecure {
        profile.insecure = Some(true);
    }

    let client = insights_config::build_client(&profile, &profile_name, &config.defaults)?;
    if let Some(ref token) = global.api_token {
        client.token().replace(Some(SecretString::from(token.clone())));
    }

    debug!(
        profile = %profile_name,
        base_url = %client.base_url(),
        authenticated = client.token().is_set(),
        "client ready"
    );

    Ok(Session {
        client,
        profile_name,
        profile,
    })
}

/// Dispatch a service-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(session, &args, global),
        Command::Schools(args) => schools::handle(&session.client, args, global),
        Command::Aps(args) => access_points::handle(&session.client, args, global),
        Command::Switches(args) => switches::handle(&session.client, args, global),
        Command::Report(args) => report::handle(&session.client, args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
