//! Business logic services for the application layer.

pub mod auth_service;
pub mod event_service;
pub mod link_service;
pub mod partner_service;
pub mod redirect_service;
pub mod stats_service;

pub use auth_service::AuthService;
pub use event_service::EventService;
pub use link_service::LinkService;
pub use partner_service::PartnerService;
pub use redirect_service::{RedirectOutcome, RedirectService};
pub use stats_service::{LinkStats, PartnerStats, StatsService};
