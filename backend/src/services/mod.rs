pub mod balance;
pub mod holiday;
pub mod leave_policy;
pub mod leave_workflow;
pub mod lifecycle;
pub mod progress;
pub mod working_days;
