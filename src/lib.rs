//! Client library for the Spypoint trail camera cloud service.
//!
//! Authenticates with a Spypoint account, keeps the bearer token fresh
//! across calls, and normalizes the vendor's loosely shaped JSON into
//! stable typed records for cameras, subscriptions and media.

pub mod cameras;
pub mod client;
pub mod error;
pub mod media;

mod json;
mod session;

pub use cameras::{
    Camera, CameraModel, Coordinates, PhotoAllowance, Plan, Subscription, Temperature,
};
pub use client::{SpypointApi, BASE_URL};
pub use error::{Result, SpypointError};
pub use media::{Media, MediaQuery, MediaResponse};
