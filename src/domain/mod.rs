mod credentials;
mod genre;
mod rating;
mod show;
mod show_title;
mod viewing_status;

pub use credentials::*;
pub use genre::Genre;
pub use rating::Rating;
pub use show::*;
pub use show_title::ShowTitle;
pub use viewing_status::ViewingStatus;
