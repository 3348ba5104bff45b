//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod health;
pub mod links;
pub mod partners;
pub mod redirect;
pub mod stats;
pub mod track;

pub use admin::{
    admin_links_handler, admin_partners_handler, admin_stats_handler,
    admin_update_link_handler, admin_update_partner_handler,
};
pub use health::health_handler;
pub use links::{create_link_handler, list_links_handler, update_link_handler};
pub use partners::{me_handler, register_handler, update_me_handler};
pub use redirect::redirect_handler;
pub use stats::stats_handler;
pub use track::{track_click_handler, track_conversion_handler};
