//! Domain models for the Modular Build Tracking Platform

mod attachment;
mod calendar;
mod contact;
mod dealer;
mod department;
mod factory;
mod import;
mod milestone;
mod project;
mod rfi;
mod submittal;
mod task;
mod user;

pub use attachment::*;
pub use calendar::*;
pub use contact::*;
pub use dealer::*;
pub use department::*;
pub use factory::*;
pub use import::*;
pub use milestone::*;
pub use project::*;
pub use rfi::*;
pub use submittal::*;
pub use task::*;
pub use user::*;
