#[macro_use]
extern crate log;

pub mod checker;
pub mod registry;
