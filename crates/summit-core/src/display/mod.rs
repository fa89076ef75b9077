//! Markdown rendering of hierarchy records for terminal output.
//!
//! Domain models implement `Display` directly (see [`models`]); collections and
//! operation outcomes are rendered through small wrapper types so that each
//! output context reads the same way.
//!
//! - [`collections`]: `Objectives`, `Plans`, `Tasks`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`datetime`]: `LocalDateTime`
//!
//! ```rust
//! use summit_core::display::DeleteResult;
//!
//! let output = DeleteResult::new("plan", "plan-1").to_string();
//! assert_eq!(output, "Deleted plan plan-1\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Objectives, Plans, Tasks};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
