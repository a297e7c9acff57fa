pub mod camera;
pub mod model;
pub mod response;

pub use camera::{Camera, Coordinates, PhotoAllowance, Plan, Subscription, Temperature};
pub use model::CameraModel;
