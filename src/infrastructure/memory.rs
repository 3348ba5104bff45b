//! In-memory implementation of every repository trait.
//!
//! Backs the HTTP integration tests and local experiments without PostgreSQL.
//! Behaviour mirrors the SQL implementations: ids are unique, events must
//! reference an existing link, listings are newest first, and every count is
//! recomputed from the stored events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{
    Click, Conversion, ConversionKind, Link, NewClick, NewConversion, NewLink, NewPartner, Partner,
};
use crate::domain::repositories::{
    EventCounts, EventRepository, GlobalTotals, LinkCounts, LinkRepository, PartnerRepository,
    StatsRepository, StatsWindow,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    partners: Vec<Partner>,
    links: Vec<Link>,
    clicks: Vec<Click>,
    conversions: Vec<Conversion>,
}

impl Tables {
    fn link_exists(&self, id: &str) -> bool {
        self.links.iter().any(|l| l.id == id)
    }

    fn counts_for(&self, link_id: &str, window: StatsWindow) -> EventCounts {
        let clicks = self
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id && window.contains(c.clicked_at))
            .count() as i64;

        let (signups, purchases) = self
            .conversions
            .iter()
            .filter(|c| c.link_id == link_id && window.contains(c.converted_at))
            .fold((0, 0), |(s, p), c| match c.kind {
                ConversionKind::Signup => (s + 1, p),
                ConversionKind::Purchase => (s, p + 1),
            });

        EventCounts {
            clicks,
            signups,
            purchases,
        }
    }
}

fn missing_link(link_id: &str) -> AppError {
    AppError::not_found(
        "Referenced record not found",
        json!({ "link_id": link_id }),
    )
}

/// Thread-safe in-memory store.
///
/// Clone an `Arc<MemoryStore>` into each repository slot of the application
/// state; all slots then share the same tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully specified partner, e.g. an admin, bypassing registration.
    pub async fn insert_partner(&self, partner: Partner) {
        let mut tables = self.tables.write().await;
        tables.partners.retain(|p| p.id != partner.id);
        tables.partners.push(partner);
    }

    /// Appends a click with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn insert_click_at(
        &self,
        new_click: NewClick,
        clicked_at: DateTime<Utc>,
    ) -> Result<Click, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.link_exists(&new_click.link_id) {
            return Err(missing_link(&new_click.link_id));
        }

        let click = Click {
            id: tables.clicks.len() as i64 + 1,
            link_id: new_click.link_id,
            clicked_at,
            referer: new_click.referer,
            user_agent: new_click.user_agent,
            ip: new_click.ip,
        };
        tables.clicks.push(click.clone());
        Ok(click)
    }

    /// Returns a snapshot of all recorded clicks in insertion order.
    pub async fn clicks(&self) -> Vec<Click> {
        self.tables.read().await.clicks.clone()
    }

    /// Returns a snapshot of all recorded conversions in insertion order.
    pub async fn conversions(&self) -> Vec<Conversion> {
        self.tables.read().await.conversions.clone()
    }
}

#[async_trait]
impl PartnerRepository for MemoryStore {
    async fn create(&self, new_partner: NewPartner) -> Result<Partner, AppError> {
        let mut tables = self.tables.write().await;
        if tables.partners.iter().any(|p| p.id == new_partner.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "partners_pkey" }),
            ));
        }

        let now = Utc::now();
        let partner = Partner {
            id: new_partner.id,
            email: new_partner.email,
            name: new_partner.name,
            is_active: true,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        tables.partners.push(partner.clone());
        Ok(partner)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Partner>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.partners.iter().find(|p| p.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Partner>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.partners.iter().rev().cloned().collect())
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Partner>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.partners.iter_mut().find(|p| p.id == id).map(|p| {
            p.name = name.to_string();
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Partner>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.partners.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_active = is_active;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<Partner>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.partners.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_admin = is_admin;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.tables.write().await;
        if tables.link_exists(&new_link.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "partner_links_pkey" }),
            ));
        }
        if !tables.partners.iter().any(|p| p.id == new_link.partner_id) {
            return Err(AppError::not_found(
                "Referenced record not found",
                json!({ "partner_id": new_link.partner_id }),
            ));
        }

        let now = Utc::now();
        let link = Link {
            id: new_link.id,
            partner_id: new_link.partner_id,
            name: new_link.name,
            promo_code: new_link.promo_code,
            domain: new_link.domain,
            url: new_link.url,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .rev()
            .filter(|l| l.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.links.iter().rev().cloned().collect())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<Option<Link>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.links.iter_mut().find(|l| l.id == id).map(|l| {
            l.is_active = is_active;
            l.updated_at = Utc::now();
            l.clone()
        }))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        self.insert_click_at(new_click, Utc::now()).await
    }

    async fn record_conversion(
        &self,
        new_conversion: NewConversion,
    ) -> Result<Conversion, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.link_exists(&new_conversion.link_id) {
            return Err(missing_link(&new_conversion.link_id));
        }

        let conversion = Conversion {
            id: tables.conversions.len() as i64 + 1,
            link_id: new_conversion.link_id,
            kind: new_conversion.kind,
            converted_at: Utc::now(),
            metadata: new_conversion.metadata,
        };
        tables.conversions.push(conversion.clone());
        Ok(conversion)
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn link_counts(
        &self,
        link_id: &str,
        window: StatsWindow,
    ) -> Result<EventCounts, AppError> {
        Ok(self.tables.read().await.counts_for(link_id, window))
    }

    async fn click_times(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let tables = self.tables.read().await;
        let mut times: Vec<DateTime<Utc>> = tables
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id && c.clicked_at >= since)
            .map(|c| c.clicked_at)
            .collect();
        times.sort();
        Ok(times)
    }

    async fn partner_link_counts(
        &self,
        partner_id: Uuid,
        window: StatsWindow,
    ) -> Result<Vec<LinkCounts>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .rev()
            .filter(|l| l.partner_id == partner_id)
            .map(|l| LinkCounts {
                link_id: l.id.clone(),
                counts: tables.counts_for(&l.id, window),
            })
            .collect())
    }

    async fn global_totals(&self, window: StatsWindow) -> Result<GlobalTotals, AppError> {
        let tables = self.tables.read().await;
        let mut events = EventCounts::default();
        for link in &tables.links {
            events.add(&tables.counts_for(&link.id, window));
        }

        Ok(GlobalTotals {
            partners: tables.partners.len() as i64,
            links: tables.links.len() as i64,
            events,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn store_with_link() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let partner_id = Uuid::new_v4();
        PartnerRepository::create(
            &store,
            NewPartner {
                id: partner_id,
                email: "p@example.com".to_string(),
                name: "P".to_string(),
            },
        )
        .await
        .unwrap();
        LinkRepository::create(
            &store,
            NewLink {
                id: "mem00001".to_string(),
                partner_id,
                name: "Link".to_string(),
                promo_code: "MEM".to_string(),
                domain: "alixia.ch".to_string(),
                url: Link::public_url("alixia.ch", "mem00001"),
            },
        )
        .await
        .unwrap();
        (store, partner_id)
    }

    #[tokio::test]
    async fn test_click_requires_existing_link() {
        let store = MemoryStore::new();
        let result = store.record_click(NewClick::for_link("missing")).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert!(store.clicks().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_link_id_conflicts() {
        let (store, partner_id) = store_with_link().await;
        let result = LinkRepository::create(
            &store,
            NewLink {
                id: "mem00001".to_string(),
                partner_id,
                name: "Dup".to_string(),
                promo_code: "DUP".to_string(),
                domain: "alixia.ch".to_string(),
                url: Link::public_url("alixia.ch", "mem00001"),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_counts_respect_window() {
        let (store, _) = store_with_link().await;
        let old = Utc::now() - Duration::days(40);
        store
            .insert_click_at(NewClick::for_link("mem00001"), old)
            .await
            .unwrap();
        store
            .record_click(NewClick::for_link("mem00001"))
            .await
            .unwrap();

        let all = store
            .link_counts("mem00001", StatsWindow::default())
            .await
            .unwrap();
        let recent = store
            .link_counts("mem00001", StatsWindow::since(Utc::now() - Duration::days(30)))
            .await
            .unwrap();

        assert_eq!(all.clicks, 2);
        assert_eq!(recent.clicks, 1);
    }

    #[tokio::test]
    async fn test_global_totals() {
        let (store, _) = store_with_link().await;
        store
            .record_conversion(NewConversion {
                link_id: "mem00001".to_string(),
                kind: ConversionKind::Purchase,
                metadata: Some(json!({ "amount": 42 })),
            })
            .await
            .unwrap();

        let totals = store.global_totals(StatsWindow::default()).await.unwrap();

        assert_eq!(totals.partners, 1);
        assert_eq!(totals.links, 1);
        assert_eq!(totals.events.purchases, 1);
        assert_eq!(totals.events.signups, 0);
        assert_eq!(totals.events.clicks, 0);
    }
}
