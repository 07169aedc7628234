//! Admin layer: user accounts, group catalog, folder permissions.

mod groups;
mod permissions;
mod users;

pub use permissions::PermissionEditor;
pub use users::{Role, UserRecord, UserUpdate, filter_users};
