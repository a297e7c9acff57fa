pub mod media;
pub mod response;

pub use media::Media;
pub use response::{MediaQuery, MediaResponse};
