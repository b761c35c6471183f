mod converter;
pub mod libvips;

pub use converter::{APP_NAME, convert, run};
pub use self::libvips::Image;
