pub mod admin;
pub mod exits;
pub mod health;
pub mod holidays;
pub mod leave;

pub use exits::*;
pub use health::*;
pub use holidays::*;
pub use leave::*;
