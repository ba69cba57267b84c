//! Domain entities - the core business objects.

mod location;
pub mod moderation;
mod post;
mod user;

pub use location::{EARTH_RADIUS_KM, Location, parse_lenient};
pub use post::Post;
pub use user::User;
