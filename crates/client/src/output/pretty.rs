//! Pretty output formatting.

use userbase_core::storage::SearchResult;
use userbase_core::user::{User, UserPatch};

use super::Pretty;

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    let mut output = format!("{}\n  ID: {}\n  Email: {}", user.username, user.id, user.email);
    if let Some(phone) = &user.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    if let Some(date_of_birth) = &user.date_of_birth {
        output.push_str(&format!("\n  Date of birth: {}", date_of_birth));
    }
    output
}

/// Format a page of search results for display.
pub fn format_users(result: &SearchResult<User>) -> String {
    if result.list.is_empty() {
        return format!("No users found (total {}).", result.total);
    }
    let mut output = format!("USERS ({} of {})\n", result.list.len(), result.total);
    output.push_str(&"-".repeat(40));
    for user in &result.list {
        output.push_str(&format!("\n{}", format_user(user)));
        output.push('\n');
    }
    output
}

/// Format an applied patch for display.
pub fn format_patch(patch: &UserPatch) -> String {
    let mut output = format!("Patched {}", patch.id);
    if let Some(username) = &patch.username {
        output.push_str(&format!("\n  Username: {}", username));
    }
    if let Some(email) = &patch.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    if let Some(phone) = &patch.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    match &patch.date_of_birth {
        Some(Some(date_of_birth)) => {
            output.push_str(&format!("\n  Date of birth: {}", date_of_birth))
        }
        Some(None) => output.push_str("\n  Date of birth: (cleared)"),
        None => {}
    }
    output
}

impl Pretty for User {
    fn pretty(&self) -> String {
        format_user(self)
    }
}

impl Pretty for SearchResult<User> {
    fn pretty(&self) -> String {
        format_users(self)
    }
}

impl Pretty for UserPatch {
    fn pretty(&self) -> String {
        format_patch(self)
    }
}
