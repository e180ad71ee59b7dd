// Command modules for the launchpad CLI

pub mod create;
pub mod inspect;
pub mod utils;
