//! SeaORM entity definitions for the production tracking schema.

pub mod aircraft;
pub mod part;
pub mod report;
pub mod stage;
pub mod stage_staff;
pub mod staff;
pub mod test_record;
