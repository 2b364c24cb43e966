mod filter;
mod patch;
mod types;
mod validation;

pub use filter::{SortDirection, SortKey, UserFilter};
pub use patch::{FieldChange, FieldValue, UserPatch};
pub use types::{User, UserField};
pub use validation::{validate_patch, validate_user, ErrorMessage};
