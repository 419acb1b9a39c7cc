use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::{info, warn};

use super::{assign_if_changed, load, set_active, soft_delete, CaseError};
use crate::{
    database::Database,
    models::catalog::{CatalogEntry, CatalogKind},
    repository::Repository,
};

/// Create, rename, list and lifecycle operations shared by every catalog kind.
pub struct CatalogCases<K: CatalogKind> {
    entries: Arc<dyn Repository<CatalogEntry<K>>>,
}

impl<K: CatalogKind> CatalogCases<K> {
    pub fn new(db: &Database) -> Self {
        Self {
            entries: db.repository(),
        }
    }

    pub async fn create(&self, name: String) -> Result<CatalogEntry<K>, CaseError> {
        if self.entries.find_one_by("name", &name).await?.is_some() {
            warn!(entity = K::ENTITY, %name, "duplicate name rejected");
            return Err(CaseError::DuplicateEntity(K::ENTITY));
        }

        let mut entry = CatalogEntry::new(name, DateTime::now());
        let _id = self.entries.create(&mut entry).await?;

        info!(entity = K::ENTITY, id = %_id, "created");
        Ok(entry)
    }
    pub async fn get(&self, _id: &ObjectId) -> Result<CatalogEntry<K>, CaseError> {
        load(&*self.entries, _id).await
    }
    pub async fn list(&self) -> Result<Vec<CatalogEntry<K>>, CaseError> {
        Ok(self.entries.find_all().await?)
    }
    pub async fn update(&self, _id: &ObjectId, name: String) -> Result<CatalogEntry<K>, CaseError> {
        let mut entry = load(&*self.entries, _id).await?;

        assign_if_changed(&mut entry.name, name);
        entry.updated_at = DateTime::now();
        self.entries.replace(&entry).await?;

        Ok(entry)
    }
    pub async fn delete(&self, _id: &ObjectId) -> Result<CatalogEntry<K>, CaseError> {
        soft_delete(&*self.entries, _id).await
    }
    pub async fn activate(&self, _id: &ObjectId) -> Result<CatalogEntry<K>, CaseError> {
        set_active(&*self.entries, _id, true).await
    }
    pub async fn deactivate(&self, _id: &ObjectId) -> Result<CatalogEntry<K>, CaseError> {
        set_active(&*self.entries, _id, false).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::*;
    use crate::models::{accident::ClassificationKind, employee::PositionKind};

    fn cases<K: CatalogKind>(db: &Database) -> CatalogCases<K> {
        CatalogCases::new(db)
    }

    #[actix_web::test]
    async fn create_stamps_and_activates() {
        let classifications = cases::<ClassificationKind>(&Database::memory());

        let fall = classifications.create("Fall".to_string()).await.unwrap();

        assert!(fall._id.is_some());
        assert!(fall.is_active);
        assert!(!fall.is_deleted);
        assert_eq!(fall.created_at, fall.updated_at);
        assert_eq!(fall.deleted_at, None);
    }

    #[actix_web::test]
    async fn duplicate_names_are_rejected_without_a_second_document() {
        let classifications = cases::<ClassificationKind>(&Database::memory());

        classifications.create("Fall".to_string()).await.unwrap();
        let second = classifications.create("Fall".to_string()).await;

        assert!(matches!(second, Err(CaseError::DuplicateEntity("classification"))));
        let stored = classifications.list().await.unwrap();
        assert_eq!(stored.iter().filter(|entry| entry.name == "Fall").count(), 1);
    }

    #[actix_web::test]
    async fn names_are_unique_per_kind_only() {
        let db = Database::memory();

        cases::<ClassificationKind>(&db).create("Other".to_string()).await.unwrap();
        let position = cases::<PositionKind>(&db).create("Other".to_string()).await;

        assert!(position.is_ok());
    }

    #[actix_web::test]
    async fn activate_then_deactivate_ends_inactive_and_restamps() {
        let classifications = cases::<ClassificationKind>(&Database::memory());
        let fall = classifications.create("Fall".to_string()).await.unwrap();
        let _id = fall._id.unwrap();

        sleep(Duration::from_millis(5)).await;
        let activated = classifications.activate(&_id).await.unwrap();
        sleep(Duration::from_millis(5)).await;
        let deactivated = classifications.deactivate(&_id).await.unwrap();

        assert!(activated.is_active);
        assert!(activated.updated_at > fall.updated_at);
        assert!(deactivated.updated_at > activated.updated_at);
        let stored = classifications.get(&_id).await.unwrap();
        assert!(!stored.is_active);
    }

    #[actix_web::test]
    async fn delete_keeps_the_entry_visible_and_active_flag_untouched() {
        let classifications = cases::<ClassificationKind>(&Database::memory());
        let fall = classifications.create("Fall".to_string()).await.unwrap();
        let _id = fall._id.unwrap();

        classifications.delete(&_id).await.unwrap();

        let stored = classifications.get(&_id).await.unwrap();
        assert!(stored.is_deleted);
        assert!(stored.deleted_at.is_some());
        assert!(stored.is_active);
        assert_eq!(classifications.list().await.unwrap(), vec![stored]);
    }

    #[actix_web::test]
    async fn update_renames_and_restamps() {
        let classifications = cases::<ClassificationKind>(&Database::memory());
        let fall = classifications.create("Fall".to_string()).await.unwrap();
        let _id = fall._id.unwrap();

        sleep(Duration::from_millis(5)).await;
        let renamed = classifications
            .update(&_id, "Fall from height".to_string())
            .await
            .unwrap();

        assert_eq!(renamed.name, "Fall from height");
        assert_eq!(renamed.created_at, fall.created_at);
        assert!(renamed.updated_at > fall.updated_at);
    }

    #[actix_web::test]
    async fn lifecycle_operations_on_unknown_ids_are_not_found() {
        let classifications = cases::<ClassificationKind>(&Database::memory());
        let unknown = ObjectId::new();

        assert!(matches!(classifications.get(&unknown).await, Err(CaseError::NotFound(_))));
        assert!(matches!(classifications.activate(&unknown).await, Err(CaseError::NotFound(_))));
        assert!(matches!(classifications.delete(&unknown).await, Err(CaseError::NotFound(_))));
        assert!(matches!(
            classifications.update(&unknown, "x".to_string()).await,
            Err(CaseError::NotFound("classification"))
        ));
    }
}
