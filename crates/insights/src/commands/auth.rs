//! Auth command handler.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::cli::{AuthArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Session;

pub fn handle(session: &Session, args: &AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let username = args
        .username
        .as_deref()
        .or(session.profile.username.as_deref());

    session.client.authenticate(username)?;

    if let (Some(username), None) = (args.username.as_deref(), global.base_url.as_ref()) {
        match insights_config::remember_username(&session.profile_name, username) {
            Ok(true) => debug!(profile = %session.profile_name, "username saved"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not save username to config"),
        }
    }

    let Some(token) = session.client.token().get() else {
        return Err(CliError::InvalidResponse {
            message: "service returned an empty token".into(),
        });
    };

    if args.print {
        output::print_output(token.expose_secret(), global.quiet);
        return Ok(());
    }

    store(&session.profile_name, &token)?;
    if !global.quiet {
        eprintln!(
            "Token stored in system keyring for profile '{}'",
            session.profile_name
        );
    }
    Ok(())
}

fn store(profile_name: &str, token: &SecretString) -> Result<(), CliError> {
    insights_config::store_token(profile_name, token).map_err(|e| CliError::Validation {
        field: "keyring".into(),
        reason: format!("{e} (use --print to write the token to stdout)"),
    })
}
