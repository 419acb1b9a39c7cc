use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use super::{assign_if_changed, load, set_active, soft_delete, CaseError};
use crate::{
    database::Database,
    models::project::{Project, ProjectInput},
    repository::Repository,
};

pub struct ProjectCases {
    projects: Arc<dyn Repository<Project>>,
}

impl ProjectCases {
    pub fn new(db: &Database) -> Self {
        Self {
            projects: db.repository(),
        }
    }

    pub async fn create_project(&self, input: ProjectInput) -> Result<Project, CaseError> {
        let now = DateTime::now();
        let mut project = Project {
            _id: None,
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let _id = self.projects.create(&mut project).await?;

        info!(id = %_id, "project created");
        Ok(project)
    }
    pub async fn get_project(&self, _id: &ObjectId) -> Result<Project, CaseError> {
        load(&*self.projects, _id).await
    }
    pub async fn get_projects(&self) -> Result<Vec<Project>, CaseError> {
        Ok(self.projects.find_all().await?)
    }
    pub async fn update_project(
        &self,
        _id: &ObjectId,
        input: ProjectInput,
    ) -> Result<Project, CaseError> {
        let mut project = load(&*self.projects, _id).await?;

        assign_if_changed(&mut project.name, input.name);
        assign_if_changed(&mut project.description, input.description);
        assign_if_changed(&mut project.start_date, input.start_date);
        assign_if_changed(&mut project.end_date, input.end_date);
        if let Some(is_active) = input.is_active {
            assign_if_changed(&mut project.is_active, is_active);
        }
        project.updated_at = DateTime::now();
        self.projects.replace(&project).await?;

        Ok(project)
    }
    pub async fn delete_project(&self, _id: &ObjectId) -> Result<Project, CaseError> {
        soft_delete(&*self.projects, _id).await
    }
    pub async fn activate_project(&self, _id: &ObjectId) -> Result<Project, CaseError> {
        set_active(&*self.projects, _id, true).await
    }
    pub async fn deactivate_project(&self, _id: &ObjectId) -> Result<Project, CaseError> {
        set_active(&*self.projects, _id, false).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::*;

    fn input(name: &str) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
            description: "North tower".to_string(),
            start_date: DateTime::from_millis(1_672_531_200_000),
            end_date: None,
            is_active: None,
        }
    }

    #[actix_web::test]
    async fn created_project_reads_back_equal() {
        let projects = ProjectCases::new(&Database::memory());

        let created = projects.create_project(input("Tower")).await.unwrap();
        let fetched = projects.get_project(&created._id.unwrap()).await.unwrap();

        assert_eq!(fetched, created);
        assert!(fetched.is_active);
        assert_eq!(fetched.start_date, DateTime::from_millis(1_672_531_200_000));
    }

    #[actix_web::test]
    async fn update_touches_only_changed_fields() {
        let projects = ProjectCases::new(&Database::memory());
        let created = projects.create_project(input("Tower")).await.unwrap();
        let _id = created._id.unwrap();

        sleep(Duration::from_millis(5)).await;
        let mut patch = input("Tower");
        patch.end_date = Some(DateTime::from_millis(1_704_067_200_000));
        patch.is_active = Some(false);
        let updated = projects.update_project(&_id, patch).await.unwrap();

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.end_date, Some(DateTime::from_millis(1_704_067_200_000)));
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[actix_web::test]
    async fn omitted_active_flag_is_kept() {
        let projects = ProjectCases::new(&Database::memory());
        let created = projects.create_project(input("Tower")).await.unwrap();
        let _id = created._id.unwrap();
        projects.deactivate_project(&_id).await.unwrap();

        let updated = projects.update_project(&_id, input("Bridge")).await.unwrap();

        assert_eq!(updated.name, "Bridge");
        assert!(!updated.is_active);
    }

    #[actix_web::test]
    async fn deleted_projects_stay_listed() {
        let projects = ProjectCases::new(&Database::memory());
        let created = projects.create_project(input("Tower")).await.unwrap();
        let _id = created._id.unwrap();

        let deleted = projects.delete_project(&_id).await.unwrap();

        assert!(deleted.is_deleted);
        assert!(deleted.deleted_at.is_some());
        assert_eq!(projects.get_projects().await.unwrap(), vec![deleted]);
    }

    #[actix_web::test]
    async fn unknown_project_is_not_found() {
        let projects = ProjectCases::new(&Database::memory());

        assert!(matches!(
            projects.update_project(&ObjectId::new(), input("Tower")).await,
            Err(CaseError::NotFound("project"))
        ));
        assert!(matches!(
            projects.deactivate_project(&ObjectId::new()).await,
            Err(CaseError::NotFound("project"))
        ));
    }
}
