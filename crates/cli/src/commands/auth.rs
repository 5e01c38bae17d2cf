//! Registration, login, and session commands.
//!
//! # Usage
//!
//! ```bash
//! userhub register -e a@b.com -p hunter22 --address "12 Park St 560001"
//! userhub login -e a@b.com -p hunter22
//! userhub whoami
//! userhub logout
//! ```

use userhub_client::{NewProfile, ProfileClient};
use userhub_core::Email;

use super::{CommandError, FieldInput};

/// Register a new profile and cache its session.
pub async fn register(
    client: &ProfileClient,
    email: &str,
    password: &str,
    fields: FieldInput,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let dob = fields.api_dob()?;

    let profile = NewProfile {
        email: email.into_inner(),
        password: password.to_string(),
        name: fields.name.clone(),
        dob,
        sex: fields.sex.clone(),
        phones: fields.phones.clone(),
        addresses: fields.address_items(),
    };

    let record = client.register(&profile).await?;
    print_line(&format!(
        "Registered profile {} for {}",
        record.id, record.email
    ));
    Ok(())
}

/// Log in and cache the session.
pub async fn login(client: &ProfileClient, email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let response = client.login(email.as_str(), password).await?;

    let who = response.name.filter(|n| !n.is_empty()).map_or_else(
        || email.to_string(),
        |name| format!("{name} <{email}>"),
    );
    print_line(&format!("Logged in as {who}"));
    Ok(())
}

/// Print the cached session, if any.
pub fn whoami(client: &ProfileClient) {
    match client.session() {
        Some(session) => {
            let name = session.name.unwrap_or_default();
            if name.is_empty() {
                print_line(&format!("{} (profile {})", session.email, session.profile_id));
            } else {
                print_line(&format!(
                    "{name} <{}> (profile {})",
                    session.email, session.profile_id
                ));
            }
        }
        None => print_line("Not logged in"),
    }
}

/// Clear the cached session.
pub fn logout(client: &ProfileClient) -> Result<(), CommandError> {
    client.logout()?;
    print_line("Logged out");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}
