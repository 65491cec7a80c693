// HRDesk - Credential inspection tool
//
// Usage: HRDESK_CREDENTIAL=<jwt> inspect <path> [--all] [ROLE...]
//
// Decodes the credential the way the console does and prints the claims and
// the route decision for <path>. Nothing is verified. Exits non-zero when the
// credential is unusable or the route is denied.

use std::process::ExitCode;

use tracing::{error, info};

use hrdesk_app::{create_session, describe_decision, InspectArgs};
use hrdesk_auth::{decode_credential, is_expired, unix_now, AuthError, MemoryCredentialStore};
use hrdesk_common::{logging::init_tracing, Config, Result};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Inspection failed");
            eprintln!("error[{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let args = InspectArgs::parse(std::env::args().skip(1))?;
    let now = unix_now();

    let store = match std::env::var("HRDESK_CREDENTIAL") {
        Ok(credential) => {
            let claims = decode_credential(&credential)?;
            if is_expired(&claims, now) {
                return Err(AuthError::ExpiredCredential {
                    expired_at: claims.expires_at(),
                }
                .into());
            }
            println!("{}", serde_json::to_string_pretty(&claims)?);
            MemoryCredentialStore::with_credential(credential)
        }
        Err(_) => {
            info!("HRDESK_CREDENTIAL not set, inspecting an anonymous session");
            MemoryCredentialStore::new()
        }
    };

    let mut session = create_session(&config, store);
    session.resolve(now);

    let decision = session.guard(&args.guard(), &args.path, now);
    println!("{}", describe_decision(decision, &args.path)?);

    Ok(())
}
