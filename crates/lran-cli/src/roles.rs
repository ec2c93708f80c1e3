//! # Roles Subcommand
//!
//! Prints the role → (organization, issuer) bindings the network would
//! authorize against with the current configuration.

use anyhow::Result;
use lran_registry::RoleTable;

/// Render `table`, one role per line.
pub fn render(table: &RoleTable) -> String {
    table
        .iter()
        .map(|(role, cred)| format!("{:<16} {:<20} {}\n", role.as_str(), cred.org, cred.issuer))
        .collect()
}

/// Print the table. Always exits 0.
pub fn run_roles(table: &RoleTable) -> Result<u8> {
    print!("{}", render(table));
    Ok(0)
}
