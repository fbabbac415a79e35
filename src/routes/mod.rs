mod api_error;
mod health;
mod shows;
mod user_shows;
mod users;

pub use api_error::*;
pub use health::*;
pub use shows::*;
pub use user_shows::*;
pub use users::*;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
