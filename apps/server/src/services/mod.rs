//! Business logic services.

pub mod production;
pub mod report_generator;
pub mod report_storage;
pub mod stage_lifecycle;
pub mod staff;

pub use production::ProductionService;
pub use report_generator::ReportGenerator;
pub use report_storage::ReportStorage;
pub use stage_lifecycle::StageLifecycle;
pub use staff::StaffService;
