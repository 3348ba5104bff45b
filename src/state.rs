//! Shared application state injected into every handler.

use std::sync::Arc;

use anyhow::Result;
use url::Url;

use crate::application::services::{
    AuthService, EventService, LinkService, PartnerService, RedirectService, StatsService,
};
use crate::config::Config;
use crate::domain::repositories::{
    EventRepository, LinkRepository, PartnerRepository, StatsRepository,
};

/// Storage backends the services are built from.
///
/// Production passes the PostgreSQL repositories; tests pass one shared
/// [`crate::infrastructure::memory::MemoryStore`] in every slot.
#[derive(Clone)]
pub struct Repositories {
    pub partners: Arc<dyn PartnerRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub events: Arc<dyn EventRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

/// Settings the services need, separated from [`Config`] so tests can build
/// a state without touching the environment.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub allowed_domains: Vec<String>,
    pub promo_destination: Url,
    pub home_url: String,
    pub click_history_days: i64,
}

impl ServiceSettings {
    /// Extracts service settings from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the promo destination URL does not parse.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            jwt_secret: config.jwt_secret.clone(),
            jwt_audience: config.jwt_audience.clone(),
            allowed_domains: config.allowed_domains.clone(),
            promo_destination: config.destination_url()?,
            home_url: config.home_url.clone(),
            click_history_days: config.click_history_days,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub partner_service: Arc<PartnerService>,
    pub link_service: Arc<LinkService>,
    pub event_service: Arc<EventService>,
    pub stats_service: Arc<StatsService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(repos: Repositories, settings: ServiceSettings) -> Self {
        let event_service = Arc::new(EventService::new(
            repos.links.clone(),
            repos.events.clone(),
        ));

        Self {
            partner_service: Arc::new(PartnerService::new(repos.partners.clone())),
            link_service: Arc::new(LinkService::new(
                repos.links.clone(),
                settings.allowed_domains,
            )),
            event_service: event_service.clone(),
            stats_service: Arc::new(StatsService::new(
                repos.links.clone(),
                repos.stats.clone(),
                settings.click_history_days,
            )),
            redirect_service: Arc::new(RedirectService::new(
                repos.links,
                event_service,
                settings.promo_destination,
                settings.home_url,
            )),
            auth_service: Arc::new(AuthService::new(
                &settings.jwt_secret,
                &settings.jwt_audience,
            )),
        }
    }
}
