mod show;
mod user;

pub use show::*;
pub use user::*;
