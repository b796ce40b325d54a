pub mod common;
pub mod employee;
pub mod exit_request;
pub mod holiday;
pub mod leave_balance;
pub mod leave_category;
pub mod leave_policy;
pub mod leave_request;
pub mod onboarding;
pub mod repository;
pub mod tenant;
pub mod transaction;

pub use employee::EmployeeRepository;
pub use exit_request::ExitRequestRepository;
pub use holiday::HolidayRepository;
pub use leave_balance::{LeaveBalanceRepository, LeaveBalanceRepositoryTrait};
pub use leave_category::LeaveCategoryRepository;
pub use leave_policy::LeavePolicyRepository;
pub use leave_request::{LeaveRequestFilters, LeaveRequestRepository, LeaveRequestRepositoryTrait};
pub use onboarding::OnboardingRepository;
pub use repository::Repository;
pub use tenant::TenantRepository;
pub use transaction::{begin_transaction, finish_transaction};
