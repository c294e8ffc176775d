//! Dynamic configuration store boundary.
//!
//! # Data Flow
//! ```text
//! property file change
//!     → file.rs (re-read, diff against last snapshot)
//!     → notification.rs (before/after payload pairs)
//!     → unbounded channel → reload::ChangeDispatcher
//! ```
//!
//! # Design Decisions
//! - The store pushes raw JSON payloads; parsing into the typed
//!   notification happens at the single gate in notification.rs
//! - Two notifications per logical change: one while the old value is
//!   still active, one once the new value is in place
//! - The file source is deliberately noisy -- every key in a reloaded
//!   file emits a pair whether or not its value changed; the dispatcher
//!   decides what is genuine

pub mod file;
pub mod notification;

pub use file::FilePropertySource;
pub use notification::ChangeNotification;
