//! Business logic services for the Modular Build Tracking Platform

pub mod attachment;
pub mod auth;
pub mod calendar;
pub mod contact;
pub mod dashboard;
pub mod dealer;
pub mod department;
pub mod factory;
pub mod ics;
pub mod milestone;
pub mod printdoc;
pub mod project;
pub mod rfi;
pub mod submittal;
pub mod task;
pub mod user;
pub mod workbook;

pub use attachment::AttachmentService;
pub use auth::AuthService;
pub use calendar::CalendarService;
pub use contact::ContactService;
pub use dashboard::DashboardService;
pub use dealer::DealerService;
pub use department::DepartmentService;
pub use factory::FactoryService;
pub use milestone::MilestoneService;
pub use printdoc::PrintRenderer;
pub use project::ProjectService;
pub use rfi::RfiService;
pub use submittal::SubmittalService;
pub use task::TaskService;
pub use user::UserService;
pub use workbook::WorkbookExporter;
