pub mod access;
pub mod resource_view;

pub use access::{check_access, login_redirect, Access, AccessPolicy};
pub use resource_view::ResourceView;
