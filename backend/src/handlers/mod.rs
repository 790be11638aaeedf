//! HTTP handlers for the Modular Build Tracking Platform

pub mod attachment;
pub mod auth;
pub mod calendar;
pub mod contact;
pub mod dashboard;
pub mod dealer;
pub mod department;
pub mod factory;
pub mod health;
pub mod milestone;
pub mod project;
pub mod rfi;
pub mod submittal;
pub mod task;
pub mod user;

pub use attachment::*;
pub use auth::*;
pub use calendar::*;
pub use contact::*;
pub use dashboard::*;
pub use dealer::*;
pub use department::*;
pub use factory::*;
pub use health::*;
pub use milestone::*;
pub use project::*;
pub use rfi::*;
pub use submittal::*;
pub use task::*;
pub use user::*;
