//! Click and conversion recording.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::domain::entities::{Click, Conversion, ConversionKind, NewClick, NewConversion};
use crate::domain::repositories::{EventRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::client_info::ClientInfo;

/// Appends immutable events to a link's history.
///
/// Both operations verify that the link exists first. Neither looks at the
/// link's active flag: deactivation only affects the redirect.
pub struct EventService {
    links: Arc<dyn LinkRepository>,
    events: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(links: Arc<dyn LinkRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { links, events }
    }

    /// Records a click with a server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn record_click(&self, link_id: &str, client: ClientInfo) -> Result<Click, AppError> {
        self.ensure_link(link_id).await?;
        self.append_click(link_id, client).await
    }

    /// Records a click for a link the caller has already looked up.
    ///
    /// Used by the redirector, which checks existence and the active flag
    /// itself.
    pub async fn append_click(&self, link_id: &str, client: ClientInfo) -> Result<Click, AppError> {
        self.events
            .record_click(NewClick {
                link_id: link_id.to_string(),
                referer: client.referer,
                user_agent: client.user_agent,
                ip: client.ip,
            })
            .await
    }

    /// Records a sign-up or purchase.
    ///
    /// `kind` is validated before the link lookup, so a bad type never
    /// touches storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `kind` is neither `signup` nor `purchase`.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn record_conversion(
        &self,
        link_id: &str,
        kind: &str,
        metadata: Option<Value>,
    ) -> Result<Conversion, AppError> {
        let kind: ConversionKind = kind.parse().map_err(|_| {
            AppError::bad_request(
                "Type must be either signup or purchase",
                json!({
                    "type": kind,
                    "allowed": ConversionKind::ALL.map(|k| k.as_str()),
                }),
            )
        })?;

        self.ensure_link(link_id).await?;

        let conversion = self
            .events
            .record_conversion(NewConversion {
                link_id: link_id.to_string(),
                kind,
                metadata,
            })
            .await?;

        tracing::debug!(link_id, kind = %conversion.kind, "Conversion recorded");
        Ok(conversion)
    }

    async fn ensure_link(&self, link_id: &str) -> Result<(), AppError> {
        match self.links.find_by_id(link_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            )),
        }
    }
}
