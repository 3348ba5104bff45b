//! Resolution of `/promo/{id}` visits.

use std::sync::Arc;

use url::Url;

use crate::application::services::EventService;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::client_info::ClientInfo;
use crate::utils::code_generator::is_plausible_link_id;

/// Result of resolving a promo link visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Active link: the click was recorded (best effort).
    Redirecting { location: String },
    /// Missing or inactive link: nothing was recorded.
    Rejected { location: String },
}

impl RedirectOutcome {
    pub fn location(&self) -> &str {
        match self {
            RedirectOutcome::Redirecting { location } | RedirectOutcome::Rejected { location } => {
                location
            }
        }
    }
}

/// Turns a link id into a redirect target and records the click.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    recorder: Arc<EventService>,
    destination: Url,
    home_url: String,
}

impl RedirectService {
    /// Creates a redirect service.
    ///
    /// - `recorder` - event recorder that stores the click
    /// - `destination` - landing page that receives the `promo` query parameter
    /// - `home_url` - where rejected visits are sent
    pub fn new(
        links: Arc<dyn LinkRepository>,
        recorder: Arc<EventService>,
        destination: Url,
        home_url: String,
    ) -> Self {
        Self {
            links,
            recorder,
            destination,
            home_url,
        }
    }

    /// Resolves a visit.
    ///
    /// The active check comes first, so a rejected visit never produces a
    /// click. A failed click insert is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only if the link lookup itself fails.
    pub async fn resolve(
        &self,
        link_id: &str,
        client: ClientInfo,
    ) -> Result<RedirectOutcome, AppError> {
        if !is_plausible_link_id(link_id) {
            return Ok(self.rejected());
        }

        let link = match self.links.find_by_id(link_id).await? {
            Some(link) if link.is_active => link,
            Some(_) => {
                tracing::debug!(link_id, "Inactive link visited");
                return Ok(self.rejected());
            }
            None => {
                tracing::debug!(link_id, "Unknown link visited");
                return Ok(self.rejected());
            }
        };

        if let Err(e) = self.recorder.append_click(&link.id, client).await {
            tracing::warn!(link_id = %link.id, error = %e, "Failed to record click");
        }

        Ok(RedirectOutcome::Redirecting {
            location: self.destination_for(&link.promo_code),
        })
    }

    /// Destination URL with `promo={code}` appended to any existing query.
    pub fn destination_for(&self, promo_code: &str) -> String {
        let mut url = self.destination.clone();
        url.query_pairs_mut().append_pair("promo", promo_code);
        url.into()
    }

    fn rejected(&self) -> RedirectOutcome {
        RedirectOutcome::Rejected {
            location: self.home_url.clone(),
        }
    }
}
