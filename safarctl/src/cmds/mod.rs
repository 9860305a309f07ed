pub use auth::*;
pub use list::*;
pub use plan::*;
pub use search::*;

mod auth;
mod list;
mod plan;
mod search;
