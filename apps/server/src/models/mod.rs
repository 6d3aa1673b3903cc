//! Domain models and DTOs for the production tracker.

pub mod aircraft;
pub mod enums;
pub mod part;
pub mod report;
pub mod stage;
pub mod staff;
pub mod test_record;

pub use aircraft::{AircraftDetail, AircraftView, CreateAircraftRequest, UpdateAircraftRequest};
pub use enums::{
    AircraftType, EnumCatalogue, EnumOption, PartStatus, PartType, PermissionLevel, StageStatus,
    StoredEnum, TestResult, TestType,
};
pub use part::{CreatePartRequest, PartView, SetPartStatusRequest, UpdatePartRequest};
pub use report::ReportView;
pub use stage::{AssignStaffRequest, CreateStageRequest, StageView, UpdateStageRequest};
pub use staff::{CreateStaffRequest, StaffRef, StaffView, UpdateStaffRequest};
pub use test_record::{RegisterTestRequest, TestView};

use crate::error::{AppError, AppResult};

/// Trim a required text field, rejecting blank values.
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Reject negative counts such as capacity or range.
pub fn non_negative(field: &str, value: i32) -> AppResult<i32> {
    if value < 0 {
        return Err(AppError::InvalidInput(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(value)
}
