mod noop;
mod traits;

pub use noop::{KinematicVelocity, NoopBackend, NoopBackendPlugin};
pub use traits::CharacterPhysicsBackend;

#[cfg(feature = "avian3d")]
pub use crate::avian::Avian3dBackend;
