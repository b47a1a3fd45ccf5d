pub mod anchor;
pub mod canonicalize;
pub mod hash;
pub mod verify;
