//! Profile viewing and editing commands.
//!
//! `update` works like a form editor: the current profile is fetched
//! first, flags overlay the fields they name, and everything else is
//! sent back unchanged.

use userhub_client::{ProfileClient, ProfileRecord, ProfileUpdate};
use userhub_core::{ProfileId, date};

use super::{CommandError, FieldInput};

/// Show a profile: the given id, or the cached session's.
pub async fn show(client: &ProfileClient, id: Option<i64>) -> Result<(), CommandError> {
    let id = match id {
        Some(raw) => ProfileId::new(raw),
        None => current_profile_id(client)?,
    };

    let record = client.profile(id).await?;
    print_record(&record);
    Ok(())
}

/// Update the logged-in profile, preserving fields no flag names.
pub async fn update(
    client: &ProfileClient,
    password: &str,
    fields: FieldInput,
) -> Result<(), CommandError> {
    let id = current_profile_id(client)?;
    let current = client.profile(id).await?;

    let dob = match fields.api_dob()? {
        Some(dob) => Some(dob),
        None => Some(current.dob.clone()).filter(|d| !d.is_empty()),
    };
    let phones = if fields.phones.is_empty() {
        current.phones.clone()
    } else {
        fields.phones.clone()
    };
    let addresses = if fields.addresses.is_empty() {
        current.address_items()
    } else {
        fields.address_items()
    };

    let payload = ProfileUpdate {
        email: current.email.clone(),
        password: password.to_string(),
        name: fields.name.clone().or_else(|| {
            Some(current.name.clone()).filter(|n| !n.is_empty())
        }),
        dob,
        sex: fields.sex.clone().or_else(|| {
            Some(current.sex.clone()).filter(|s| !s.is_empty())
        }),
        phones,
        addresses,
    };

    let record = client.update(id, &payload).await?;
    print_line("Profile updated");
    print_record(&record);
    Ok(())
}

/// Check a password against the logged-in profile.
pub async fn verify_password(client: &ProfileClient, password: &str) -> Result<(), CommandError> {
    let id = current_profile_id(client)?;
    let matches = client.verify_password(id, password).await?;
    print_line(if matches {
        "Password matches"
    } else {
        "Password does not match"
    });
    Ok(())
}

fn current_profile_id(client: &ProfileClient) -> Result<ProfileId, CommandError> {
    client
        .session()
        .map(|s| s.profile_id)
        .ok_or(CommandError::NotLoggedIn)
}

#[allow(clippy::print_stdout)]
fn print_record(record: &ProfileRecord) {
    println!("Profile {}", record.id);
    println!("  name:  {}", record.name);
    println!("  email: {}", record.email);
    if !record.dob.is_empty() {
        println!("  dob:   {} (age {})", date::to_display_date(&record.dob), record.age);
    }
    if !record.sex.is_empty() {
        println!("  sex:   {}", record.sex);
    }
    for phone in &record.phones {
        println!("  phone: {phone}");
    }
    for item in record.address_items() {
        if item.pincode.is_empty() {
            println!("  addr:  {}", item.address);
        } else {
            println!("  addr:  {} ({})", item.address, item.pincode);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}
