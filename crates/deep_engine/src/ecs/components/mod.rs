//! ECS Components module
//!
//! Plain data records, one type per component kind

pub mod collision;
pub mod drawable;
pub mod health;
pub mod movement;
pub mod transform;

pub use collision::ColliderComponent;
pub use drawable::DrawableComponent;
pub use health::HealthComponent;
pub use movement::{AccelerationComponent, VelocityComponent};
pub use transform::TransformationComponent;
