//! Physics module for collision detection
//!
//! Axis-aligned rectangle colliders in the XY plane with per-scene contact
//! tracking, so callers get an enter event while two colliders overlap and a
//! single exit event once they separate.

pub mod collision;

pub use collision::{
    detect_among, detect_collisions, CollisionEnter, CollisionEnterCallback, CollisionExit,
    CollisionExitCallback, Contact, ContactTable,
};
