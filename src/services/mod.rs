//! Route-level services
//!
//! One service per screen of the shortener: create (`/`), statistics
//! (`/statistics`) and resolve (`/:shortcode`). They only talk to the core
//! through [`crate::repository::UrlRepository`].

pub mod redirect;
pub mod shorten;
pub mod statistics;

pub use redirect::{RedirectService, RedirectTarget};
pub use shorten::{
    BatchOutcome, EntryError, FieldErrors, RECENT_LINKS, ShortenService, UrlEntry,
};
pub use statistics::{LinkStats, LinkStatus, StatisticsReport, StatisticsService};
