//! Domain models for storefront.

pub mod identity;
pub mod notice;

pub use identity::Identity;
pub use notice::{Notice, NoticeLevel, Notices};
