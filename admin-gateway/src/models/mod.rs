pub mod account;
pub mod allow_list;
pub mod claims;
pub mod context;

pub use account::{AccountPage, DirectoryAccount};
pub use allow_list::AdminAllowList;
pub use claims::CustomClaims;
pub use context::AuthContext;
