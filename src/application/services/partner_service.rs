//! Partner profile registration and administration.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::access::{Caller, Identity, require_admin};
use crate::domain::entities::{NewPartner, Partner};
use crate::domain::repositories::PartnerRepository;
use crate::error::AppError;

/// Service for partner profiles.
///
/// Also resolves a verified [`Identity`] into a [`Caller`] for the auth
/// middleware, since that is the only place where account status matters.
pub struct PartnerService {
    repository: Arc<dyn PartnerRepository>,
}

fn clean_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Name must not be empty",
            json!({ "field": "name" }),
        ));
    }
    Ok(name.to_string())
}

fn partner_not_found(id: Uuid) -> AppError {
    AppError::not_found("Partner not found", json!({ "partner_id": id }))
}

impl PartnerService {
    pub fn new(repository: Arc<dyn PartnerRepository>) -> Self {
        Self { repository }
    }

    /// Creates the partner profile for a freshly signed-up identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is blank or the identity has
    /// no email address.
    /// Returns [`AppError::Conflict`] if the profile already exists.
    pub async fn register(&self, identity: &Identity, name: &str) -> Result<Partner, AppError> {
        let name = clean_name(name)?;

        let email = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::bad_request(
                    "Identity has no email address",
                    json!({ "user_id": identity.user_id }),
                )
            })?;

        if self.repository.find_by_id(identity.user_id).await?.is_some() {
            return Err(AppError::conflict(
                "Partner profile already exists",
                json!({ "partner_id": identity.user_id }),
            ));
        }

        let partner = self
            .repository
            .create(NewPartner {
                id: identity.user_id,
                email: email.to_string(),
                name,
            })
            .await?;

        tracing::info!(partner_id = %partner.id, "Partner registered");
        Ok(partner)
    }

    /// Maps a verified identity onto an active partner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no profile is registered.
    /// Returns [`AppError::Forbidden`] if the partner is deactivated.
    pub async fn resolve_caller(&self, identity: &Identity) -> Result<Caller, AppError> {
        let partner = self
            .repository
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Partner profile not registered",
                    json!({ "user_id": identity.user_id }),
                )
            })?;

        if !partner.is_active {
            return Err(AppError::forbidden(
                "Partner account is deactivated",
                json!({ "partner_id": partner.id }),
            ));
        }

        Ok(Caller::from(&partner))
    }

    /// Returns the caller's own profile.
    pub async fn me(&self, caller: &Caller) -> Result<Partner, AppError> {
        self.repository
            .find_by_id(caller.partner_id)
            .await?
            .ok_or_else(|| partner_not_found(caller.partner_id))
    }

    /// Renames the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is blank.
    pub async fn update_profile(&self, caller: &Caller, name: &str) -> Result<Partner, AppError> {
        let name = clean_name(name)?;

        self.repository
            .update_name(caller.partner_id, &name)
            .await?
            .ok_or_else(|| partner_not_found(caller.partner_id))
    }

    /// Lists every partner, newest first. Admin only.
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<Partner>, AppError> {
        require_admin(caller)?;
        self.repository.list_all().await
    }

    /// Activates or deactivates a partner. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for non-admin callers.
    /// Returns [`AppError::Validation`] if an admin tries to deactivate itself.
    /// Returns [`AppError::NotFound`] if the partner does not exist.
    pub async fn set_active(
        &self,
        caller: &Caller,
        partner_id: Uuid,
        is_active: bool,
    ) -> Result<Partner, AppError> {
        require_admin(caller)?;

        if partner_id == caller.partner_id && !is_active {
            return Err(AppError::bad_request(
                "Admins cannot deactivate their own account",
                json!({ "partner_id": partner_id }),
            ));
        }

        let partner = self
            .repository
            .set_active(partner_id, is_active)
            .await?
            .ok_or_else(|| partner_not_found(partner_id))?;

        tracing::info!(partner_id = %partner.id, is_active, "Partner status changed");
        Ok(partner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockPartnerRepository;
    use chrono::Utc;

    fn partner(id: Uuid, is_active: bool, is_admin: bool) -> Partner {
        let now = Utc::now();
        Partner {
            id,
            email: "partner@example.com".to_string(),
            name: "Partner".to_string(),
            is_active,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    fn identity(id: Uuid) -> Identity {
        Identity {
            user_id: id,
            email: Some("partner@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockPartnerRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|p| p.name == "Acme" && p.email == "partner@example.com")
            .times(1)
            .returning(|p| {
                let mut created = partner(p.id, true, false);
                created.name = p.name;
                Ok(created)
            });

        let service = PartnerService::new(Arc::new(mock_repo));
        let created = service.register(&identity(id), "  Acme ").await.unwrap();

        assert_eq!(created.id, id);
        assert_eq!(created.name, "Acme");
    }

    #[tokio::test]
    async fn test_register_blank_name() {
        let mock_repo = MockPartnerRepository::new();
        let service = PartnerService::new(Arc::new(mock_repo));

        let result = service.register(&identity(Uuid::new_v4()), "   ").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_without_email() {
        let mock_repo = MockPartnerRepository::new();
        let service = PartnerService::new(Arc::new(mock_repo));

        let id = Identity {
            user_id: Uuid::new_v4(),
            email: None,
        };
        let result = service.register(&id, "Acme").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(partner(id, true, false))));
        mock_repo.expect_create().never();

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service.register(&identity(id), "Acme").await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_resolve_caller_unregistered() {
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service.resolve_caller(&identity(Uuid::new_v4())).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_resolve_caller_deactivated() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(partner(id, false, false))));

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service.resolve_caller(&identity(id)).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_resolve_caller_carries_admin_flag() {
        let id = Uuid::new_v4();
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(partner(id, true, true))));

        let service = PartnerService::new(Arc::new(mock_repo));
        let caller = service.resolve_caller(&identity(id)).await.unwrap();

        assert_eq!(caller, Caller::admin(id));
    }

    #[tokio::test]
    async fn test_list_all_requires_admin() {
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo.expect_list_all().never();

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service.list_all(&Caller::partner(Uuid::new_v4())).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_admin_cannot_deactivate_self() {
        let admin_id = Uuid::new_v4();
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo.expect_set_active().never();

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service
            .set_active(&Caller::admin(admin_id), admin_id, false)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_set_active_unknown_partner() {
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo.expect_set_active().returning(|_, _| Ok(None));

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service
            .set_active(&Caller::admin(Uuid::new_v4()), Uuid::new_v4(), false)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
