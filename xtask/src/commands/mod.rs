//! Command family implementations.

pub mod quality;
pub mod verify;
pub mod web;
