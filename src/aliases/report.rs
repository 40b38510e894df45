use serde::Serialize;

use crate::identity::UserInfo;
use crate::report_helpers::{max_width, pad_right, separator};

pub fn print_report(groups: &[Vec<UserInfo>]) {
    if groups.is_empty() {
        println!("No alias groups found.");
        return;
    }

    let name_width = max_width(groups.iter().flatten().map(|u| u.name.as_str()), 4);
    let email_width = max_width(groups.iter().flatten().map(|u| u.email.as_str()), 5);
    let separator = separator((name_width + email_width + 10).max(60));

    println!("Alias Groups");
    println!("{separator}");
    println!(
        " {:>5}  {}  {}",
        "Group",
        pad_right("Name", name_width),
        "Email"
    );
    println!("{separator}");
    for (i, group) in groups.iter().enumerate() {
        for (j, user) in group.iter().enumerate() {
            let index = if j == 0 { (i + 1).to_string() } else { String::new() };
            println!(
                " {:>5}  {}  {}",
                index,
                pad_right(&user.name, name_width),
                user.email
            );
        }
    }
    println!("{separator}");
}

pub fn print_json(groups: &[Vec<UserInfo>]) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(groups)?);
    Ok(())
}

#[derive(Serialize)]
struct AliasesSection<'a> {
    aliases: &'a [Vec<UserInfo>],
}

/// Groups as a `.busfactor.toml` fragment.
pub fn to_toml(groups: &[Vec<UserInfo>]) -> Result<String, toml::ser::Error> {
    toml::to_string(&AliasesSection { aliases: groups })
}

pub fn print_toml(groups: &[Vec<UserInfo>]) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", to_toml(groups)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
