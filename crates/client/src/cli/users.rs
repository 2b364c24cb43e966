//! User CLI commands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use userbase_core::user::{User, UserFilter, UserPatch};

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Fields of a full user.
#[derive(Debug, Args)]
pub struct UserFields {
    /// Username.
    #[arg(long)]
    pub username: String,
    /// Email address.
    #[arg(long)]
    pub email: String,
    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
}

impl UserFields {
    /// Builds a user with the given id.
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
        }
    }
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Get user by ID.
    Get {
        /// User ID.
        id: String,
    },
    /// Create a new user.
    Create {
        /// User ID. Generated by the server when omitted.
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Replace every field of a user.
    Update {
        /// User ID.
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Change some fields of a user.
    Patch {
        /// User ID.
        id: String,
        /// New username.
        #[arg(long)]
        username: Option<String>,
        /// New email address.
        #[arg(long)]
        email: Option<String>,
        /// New phone number.
        #[arg(long)]
        phone: Option<String>,
        /// New date of birth (YYYY-MM-DD).
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        /// Remove the date of birth.
        #[arg(long, conflicts_with = "date_of_birth")]
        clear_date_of_birth: bool,
    },
    /// Delete user by ID.
    Delete {
        /// User ID.
        id: String,
    },
    /// Search users.
    Search {
        #[command(flatten)]
        criteria: SearchArgs,
    },
}

/// Search criteria.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Exact user ID.
    #[arg(long)]
    pub id: Option<String>,
    /// Username prefix.
    #[arg(long)]
    pub username: Option<String>,
    /// Email prefix.
    #[arg(long)]
    pub email: Option<String>,
    /// Phone prefix.
    #[arg(long)]
    pub phone: Option<String>,
    /// Born on or after (YYYY-MM-DD).
    #[arg(long)]
    pub born_from: Option<NaiveDate>,
    /// Born on or before (YYYY-MM-DD).
    #[arg(long)]
    pub born_to: Option<NaiveDate>,
    /// Sort keys, e.g. `-dateOfBirth,username`.
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,
    /// Page number (1-based).
    #[arg(long)]
    pub page: Option<u32>,
    /// Page size.
    #[arg(long)]
    pub limit: Option<u32>,
}

impl SearchArgs {
    pub fn into_filter(self) -> UserFilter {
        UserFilter {
            id: self.id,
            username: self.username,
            email: self.email,
            phone: self.phone,
            date_of_birth_from: self.born_from,
            date_of_birth_to: self.born_to,
            sort: self.sort,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Builds a patch from the `users patch` arguments.
pub fn build_patch(
    id: String,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
    clear_date_of_birth: bool,
) -> UserPatch {
    let date_of_birth = if clear_date_of_birth {
        Some(None)
    } else {
        date_of_birth.map(Some)
    };

    UserPatch {
        id,
        username,
        email,
        phone,
        date_of_birth,
    }
}
