//! Records owned by the two services and the identity keys they are unique on.

pub mod favorites;
pub mod feedback;
