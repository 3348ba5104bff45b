//! Promo link creation and lifecycle service.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::access::{Caller, authorize_link, require_admin};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_link_id, normalize_promo_code};

/// Attempts at finding an unused link id before giving up.
const MAX_ID_ATTEMPTS: usize = 10;

/// Service for creating, listing and toggling promo links.
///
/// Links can only be created on one of the configured domains; the public
/// URL is always `https://{domain}/promo/{id}`.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    allowed_domains: Vec<String>,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `allowed_domains` are compared case-insensitively.
    pub fn new(repository: Arc<dyn LinkRepository>, allowed_domains: Vec<String>) -> Self {
        let allowed_domains = allowed_domains
            .into_iter()
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();

        Self {
            repository,
            allowed_domains,
        }
    }

    /// Creates an active promo link owned by `partner_id`.
    ///
    /// The promo code is trimmed and uppercased.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `name` or `promo_code` is blank
    /// - `domain` is not in the allow-list
    ///
    /// Returns [`AppError::Internal`] if no unused id was found.
    pub async fn create(
        &self,
        partner_id: Uuid,
        name: &str,
        promo_code: &str,
        domain: &str,
    ) -> Result<Link, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Name must not be empty",
                json!({ "field": "name" }),
            ));
        }

        let promo_code = normalize_promo_code(promo_code)?;
        let domain = self.check_domain(domain)?;
        let id = self.generate_unique_id().await?;

        let link = self
            .repository
            .create(NewLink {
                url: Link::public_url(&domain, &id),
                id,
                partner_id,
                name: name.to_string(),
                promo_code,
                domain,
            })
            .await?;

        tracing::info!(link_id = %link.id, partner_id = %partner_id, domain = %link.domain, "Link created");
        Ok(link)
    }

    /// Toggles a link's active flag and returns the updated link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist or the caller
    /// may not manage it.
    pub async fn set_active(
        &self,
        caller: &Caller,
        link_id: &str,
        is_active: bool,
    ) -> Result<Link, AppError> {
        let found = self.repository.find_by_id(link_id).await?;
        let link = authorize_link(caller, link_id, found)?;

        let updated = self
            .repository
            .set_active(&link.id, is_active)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))?;

        tracing::info!(link_id = %updated.id, is_active, "Link status changed");
        Ok(updated)
    }

    /// Fetches a link by id regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get(&self, link_id: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))
    }

    /// Lists a partner's links, newest first.
    pub async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_partner(partner_id).await
    }

    /// Lists every link, newest first. Admin only.
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<Link>, AppError> {
        require_admin(caller)?;
        self.repository.list_all().await
    }

    fn check_domain(&self, domain: &str) -> Result<String, AppError> {
        let domain = domain.trim().to_ascii_lowercase();

        if self.allowed_domains.iter().any(|d| *d == domain) {
            Ok(domain)
        } else {
            Err(AppError::bad_request(
                "Domain is not allowed",
                json!({ "domain": domain, "allowed": self.allowed_domains }),
            ))
        }
    }

    async fn generate_unique_id(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_link_id()?;

            if self.repository.find_by_id(&id).await?.is_none() {
                return Ok(id);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique link id",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::LINK_ID_LEN;
    use chrono::Utc;

    fn domains() -> Vec<String> {
        vec!["alixia.ch".to_string(), "solvin.ch".to_string()]
    }

    fn link(id: &str, partner_id: Uuid, is_active: bool) -> Link {
        let now = Utc::now();
        Link {
            id: id.to_string(),
            partner_id,
            name: "Summer".to_string(),
            promo_code: "SUMMER".to_string(),
            domain: "alixia.ch".to_string(),
            url: Link::public_url("alixia.ch", id),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn created_from(new_link: NewLink) -> Link {
        let now = Utc::now();
        Link {
            id: new_link.id,
            partner_id: new_link.partner_id,
            name: new_link.name,
            promo_code: new_link.promo_code,
            domain: new_link.domain,
            url: new_link.url,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(created_from(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let partner_id = Uuid::new_v4();

        let created = service
            .create(partner_id, " Summer ", "summer24", "alixia.ch")
            .await
            .unwrap();

        assert_eq!(created.name, "Summer");
        assert_eq!(created.promo_code, "SUMMER24");
        assert_eq!(created.partner_id, partner_id);
        assert_eq!(created.id.len(), LINK_ID_LEN);
        assert_eq!(
            created.url,
            format!("https://alixia.ch/promo/{}", created.id)
        );
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_domain() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().never();

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let result = service
            .create(Uuid::new_v4(), "Summer", "SUMMER", "evil.example")
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_domain_is_case_insensitive() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|l| l.domain == "solvin.ch")
            .returning(|new_link| Ok(created_from(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let created = service
            .create(Uuid::new_v4(), "Summer", "SUMMER", "Solvin.CH")
            .await
            .unwrap();

        assert!(created.url.starts_with("https://solvin.ch/promo/"));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()), domains());

        let blank_name = service
            .create(Uuid::new_v4(), "  ", "SUMMER", "alixia.ch")
            .await;
        let blank_code = service
            .create(Uuid::new_v4(), "Summer", " ", "alixia.ch")
            .await;

        assert!(matches!(blank_name, Err(AppError::Validation { .. })));
        assert!(matches!(blank_code, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seen = 0;
        mock_repo.expect_find_by_id().times(3).returning(move |id| {
            seen += 1;
            if seen < 3 {
                Ok(Some(link(id, Uuid::new_v4(), true)))
            } else {
                Ok(None)
            }
        });
        mock_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(created_from(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let result = service
            .create(Uuid::new_v4(), "Summer", "SUMMER", "alixia.ch")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(MAX_ID_ATTEMPTS)
            .returning(|id| Ok(Some(link(id, Uuid::new_v4(), true))));
        mock_repo.expect_create().never();

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let result = service
            .create(Uuid::new_v4(), "Summer", "SUMMER", "alixia.ch")
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_set_active_by_owner() {
        let owner = Uuid::new_v4();
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(link(id, owner, true))));
        mock_repo
            .expect_set_active()
            .withf(|id, active| id == "abc12345" && !*active)
            .times(1)
            .returning(move |id, active| Ok(Some(link(id, owner, active))));

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let updated = service
            .set_active(&Caller::partner(owner), "abc12345", false)
            .await
            .unwrap();

        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_set_active_foreign_link_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(link(id, Uuid::new_v4(), true))));
        mock_repo.expect_set_active().never();

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let result = service
            .set_active(&Caller::partner(Uuid::new_v4()), "abc12345", false)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_admin_can_toggle_any_link() {
        let mut mock_repo = MockLinkRepository::new();
        let owner = Uuid::new_v4();
        mock_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(link(id, owner, false))));
        mock_repo
            .expect_set_active()
            .returning(move |id, active| Ok(Some(link(id, owner, active))));

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let updated = service
            .set_active(&Caller::admin(Uuid::new_v4()), "abc12345", true)
            .await
            .unwrap();

        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_get_missing_link() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo), domains());

        assert!(matches!(
            service.get("missing1").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_all_requires_admin() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_list_all().never();

        let service = LinkService::new(Arc::new(mock_repo), domains());
        let result = service.list_all(&Caller::partner(Uuid::new_v4())).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }
}
