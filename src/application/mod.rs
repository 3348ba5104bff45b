//! Application layer services implementing business logic.
//!
//! Services hold repository trait objects, apply validation and the
//! [`crate::domain::access`] rules, and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::partner_service::PartnerService`] - Partner registration and administration
//! - [`services::link_service::LinkService`] - Promo link creation and activation
//! - [`services::event_service::EventService`] - Click and conversion recording
//! - [`services::stats_service::StatsService`] - Per-link, per-partner and global counts
//! - [`services::redirect_service::RedirectService`] - `/promo/{id}` resolution
//! - [`services::auth_service::AuthService`] - Access token verification

pub mod services;
