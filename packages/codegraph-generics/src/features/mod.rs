//! Feature modules

pub mod generics;
