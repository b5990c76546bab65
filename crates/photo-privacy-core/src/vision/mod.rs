//! Boundary with the external vision collaborator

pub mod client;
pub mod enhance;
pub mod request;
pub mod types;

pub use client::{HttpVisionProvider, StaticVisionProvider, VisionProvider};
pub use enhance::enhance_response;
pub use request::{AnnotateRequest, VisionFeature};
pub use types::{FaceAnnotation, Likelihood, VisionResponse};
