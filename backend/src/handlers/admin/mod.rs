pub mod balances;
pub mod categories;
pub mod common;
pub mod employees;
pub mod exits;
pub mod export;
pub mod holidays;
pub mod leave_requests;
pub mod onboarding;
pub mod policy;

pub use balances::*;
pub use categories::*;
pub use employees::*;
pub use exits::*;
pub use export::*;
pub use holidays::*;
pub use leave_requests::*;
pub use onboarding::*;
pub use policy::*;
