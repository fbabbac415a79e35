mod fallback;
mod unprocessable_entity;

pub use fallback::*;
pub use unprocessable_entity::*;
