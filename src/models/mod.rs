//! Data models for the HAMS dashboard

pub mod animal;
pub mod datetime;
pub mod enums;
pub mod event;
pub mod user;
pub mod zoo;

// Re-export commonly used types
pub use animal::{Animal, AnimalStatus, AnimalWithStatus};
pub use enums::{ReportEntity, Tier};
pub use event::{Event, EventType, EventWithDetailsAndComments};
pub use user::{has_permission, PermissionName, Role, User, UserShort};
pub use zoo::{Group, Zoo};
