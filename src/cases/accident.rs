use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::{debug, info};

use super::{assign_if_changed, load, resolve, soft_delete, CaseError};
use crate::{
    database::Database,
    models::{
        accident::{Accident, AccidentInput, Classification, Gravity, InjuredPart},
        employee::Employee,
        project::Project,
    },
    repository::Repository,
};

pub struct AccidentCases {
    accidents: Arc<dyn Repository<Accident>>,
    classifications: Arc<dyn Repository<Classification>>,
    gravities: Arc<dyn Repository<Gravity>>,
    injured_parts: Arc<dyn Repository<InjuredPart>>,
    projects: Arc<dyn Repository<Project>>,
    employees: Arc<dyn Repository<Employee>>,
}

struct References {
    classification: Classification,
    gravity: Gravity,
    injured_part: InjuredPart,
    project: Project,
    employee: Employee,
}

impl AccidentCases {
    pub fn new(db: &Database) -> Self {
        Self {
            accidents: db.repository(),
            classifications: db.repository(),
            gravities: db.repository(),
            injured_parts: db.repository(),
            projects: db.repository(),
            employees: db.repository(),
        }
    }

    /// Resolves every referenced record before anything is written. The
    /// first id that does not resolve aborts the whole operation.
    async fn references(&self, input: &AccidentInput) -> Result<References, CaseError> {
        Ok(References {
            classification: resolve(&*self.classifications, &input.classification_id).await?,
            gravity: resolve(&*self.gravities, &input.gravity_id).await?,
            injured_part: resolve(&*self.injured_parts, &input.injured_part_id).await?,
            project: resolve(&*self.projects, &input.project_id).await?,
            employee: resolve(&*self.employees, &input.employee_id).await?,
        })
    }

    pub async fn create_accident(&self, input: AccidentInput) -> Result<Accident, CaseError> {
        let references = self.references(&input).await?;
        let now = DateTime::now();
        let mut accident = Accident {
            _id: None,
            description: input.description,
            construction_area: input.construction_area,
            accident_date: input.accident_date,
            classification: references.classification,
            gravity: references.gravity,
            injured_part: references.injured_part,
            project: references.project,
            employee: references.employee,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let _id = self.accidents.create(&mut accident).await?;

        info!(id = %_id, "accident created");
        Ok(accident)
    }
    pub async fn get_accident(&self, _id: &ObjectId) -> Result<Accident, CaseError> {
        load(&*self.accidents, _id).await
    }
    pub async fn get_accidents(&self) -> Result<Vec<Accident>, CaseError> {
        Ok(self.accidents.find_all().await?)
    }
    pub async fn update_accident(
        &self,
        _id: &ObjectId,
        input: AccidentInput,
    ) -> Result<Accident, CaseError> {
        let mut accident = load(&*self.accidents, _id).await?;
        let references = self.references(&input).await?;

        accident.classification = references.classification;
        accident.gravity = references.gravity;
        accident.injured_part = references.injured_part;
        accident.project = references.project;
        accident.employee = references.employee;
        assign_if_changed(&mut accident.description, input.description);
        assign_if_changed(&mut accident.construction_area, input.construction_area);
        assign_if_changed(&mut accident.accident_date, input.accident_date);
        accident.updated_at = DateTime::now();
        self.accidents.replace(&accident).await?;

        Ok(accident)
    }
    pub async fn delete_accident(&self, _id: &ObjectId) -> Result<Accident, CaseError> {
        soft_delete(&*self.accidents, _id).await
    }

    /// Re-copies the current employee record into every accident whose
    /// employee still exists and returns how many accidents were rewritten.
    pub async fn refresh_accident_employees(&self) -> Result<usize, CaseError> {
        let mut refreshed = 0;

        for mut accident in self.accidents.find_all().await? {
            let employee = match accident.employee._id {
                Some(_id) => self.employees.find_by_id(&_id).await?,
                None => None,
            };
            let Some(employee) = employee else {
                debug!(accident = ?accident._id, "employee no longer exists, skipped");
                continue;
            };

            accident.employee = employee;
            accident.updated_at = DateTime::now();
            self.accidents.replace(&accident).await?;
            refreshed += 1;
        }

        info!(refreshed, "accident employees refreshed");
        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::*;
    use crate::{
        cases::{catalog::CatalogCases, employee::EmployeeCases, project::ProjectCases},
        models::{
            accident::{ClassificationKind, GravityKind, InjuredPartKind},
            catalog::CatalogKind,
            employee::{EmployeeInput, NationalityKind, PositionKind, SupervisorKind},
            project::ProjectInput,
        },
    };

    struct Fixture {
        db: Database,
        cases: AccidentCases,
        input: AccidentInput,
    }

    async fn seed<K: CatalogKind>(db: &Database, name: &str) -> ObjectId {
        CatalogCases::<K>::new(db)
            .create(name.to_string())
            .await
            .unwrap()
            ._id
            .unwrap()
    }

    async fn fixture() -> Fixture {
        let db = Database::memory();
        let project = ProjectCases::new(&db)
            .create_project(ProjectInput {
                name: "Tower".to_string(),
                description: String::new(),
                start_date: DateTime::from_millis(1_672_531_200_000),
                end_date: None,
                is_active: None,
            })
            .await
            .unwrap();
        let employee = EmployeeCases::new(&db)
            .create_employee(EmployeeInput {
                name: "Juan Soto".to_string(),
                identification_type: "RUT".to_string(),
                identification_number: "11-1".to_string(),
                email: "juan@example.com".to_string(),
                in_law: false,
                contract_type: "fixed".to_string(),
                start_date: DateTime::from_millis(1_672_531_200_000),
                end_date: None,
                supervisor_id: seed::<SupervisorKind>(&db, "Ana Ruiz").await,
                position_id: seed::<PositionKind>(&db, "Welder").await,
                nationality_id: seed::<NationalityKind>(&db, "Chilean").await,
            })
            .await
            .unwrap();

        let input = AccidentInput {
            description: "Slipped on scaffolding".to_string(),
            construction_area: "Level 3".to_string(),
            accident_date: DateTime::from_millis(1_680_000_000_000),
            classification_id: seed::<ClassificationKind>(&db, "Fall").await,
            gravity_id: seed::<GravityKind>(&db, "Minor").await,
            injured_part_id: seed::<InjuredPartKind>(&db, "Wrist").await,
            project_id: project._id.unwrap(),
            employee_id: employee._id.unwrap(),
        };
        Fixture {
            cases: AccidentCases::new(&db),
            db,
            input,
        }
    }

    impl Fixture {
        async fn stored(&self) -> usize {
            self.db.repository::<Accident>().find_all().await.unwrap().len()
        }
    }

    #[actix_web::test]
    async fn create_snapshots_every_reference() {
        let fixture = fixture().await;

        let accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();

        assert_eq!(accident.classification.name, "Fall");
        assert_eq!(accident.gravity.name, "Minor");
        assert_eq!(accident.injured_part.name, "Wrist");
        assert_eq!(accident.project.name, "Tower");
        assert_eq!(accident.employee.name, "Juan Soto");
        assert_eq!(accident.employee.supervisor.name, "Ana Ruiz");
        assert_eq!(accident.created_at, accident.updated_at);
        assert_eq!(
            fixture.cases.get_accident(&accident._id.unwrap()).await.unwrap(),
            accident
        );
    }

    #[actix_web::test]
    async fn any_missing_reference_rejects_without_inserting() {
        let fixture = fixture().await;
        let cases: [(fn(&mut AccidentInput), &str); 5] = [
            (|input| input.classification_id = ObjectId::new(), "classification"),
            (|input| input.gravity_id = ObjectId::new(), "gravity"),
            (|input| input.injured_part_id = ObjectId::new(), "injured_part"),
            (|input| input.project_id = ObjectId::new(), "project"),
            (|input| input.employee_id = ObjectId::new(), "employee"),
        ];

        for (break_reference, expected) in cases {
            let mut input = fixture.input.clone();
            break_reference(&mut input);

            match fixture.cases.create_accident(input).await {
                Err(CaseError::ReferenceNotFound(reference)) => assert_eq!(reference, expected),
                other => panic!("expected missing {expected}, got {other:?}"),
            }
        }
        assert_eq!(fixture.stored().await, 0);
    }

    #[actix_web::test]
    async fn update_changes_description_and_keeps_the_rest() {
        let fixture = fixture().await;
        let accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();
        let _id = accident._id.unwrap();

        sleep(Duration::from_millis(5)).await;
        let mut patch = fixture.input.clone();
        patch.description = "new text".to_string();
        let updated = fixture.cases.update_accident(&_id, patch).await.unwrap();

        let stored = fixture.cases.get_accident(&_id).await.unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.description, "new text");
        assert!(stored.updated_at > accident.updated_at);
        assert_eq!(stored.construction_area, accident.construction_area);
        assert_eq!(stored.accident_date, accident.accident_date);
        assert_eq!(stored.classification, accident.classification);
        assert_eq!(stored.employee, accident.employee);
        assert_eq!(stored.created_at, accident.created_at);
    }

    #[actix_web::test]
    async fn update_with_missing_reference_changes_nothing() {
        let fixture = fixture().await;
        let accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();
        let _id = accident._id.unwrap();
        let mut patch = fixture.input.clone();
        patch.description = "new text".to_string();
        patch.gravity_id = ObjectId::new();

        let result = fixture.cases.update_accident(&_id, patch).await;

        assert!(matches!(result, Err(CaseError::ReferenceNotFound("gravity"))));
        assert_eq!(fixture.cases.get_accident(&_id).await.unwrap(), accident);
    }

    #[actix_web::test]
    async fn update_of_unknown_accident_is_not_found() {
        let fixture = fixture().await;

        assert!(matches!(
            fixture.cases.update_accident(&ObjectId::new(), fixture.input.clone()).await,
            Err(CaseError::NotFound("accident"))
        ));
    }

    #[actix_web::test]
    async fn snapshots_do_not_follow_later_edits_until_refreshed() {
        let fixture = fixture().await;
        let accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();
        let _id = accident._id.unwrap();
        let employees = EmployeeCases::new(&fixture.db);
        let mut employee = employees.get_employee(&fixture.input.employee_id).await.unwrap();
        employee.name = "Juan Soto Díaz".to_string();
        fixture.db.repository::<Employee>().replace(&employee).await.unwrap();

        assert_eq!(
            fixture.cases.get_accident(&_id).await.unwrap().employee.name,
            "Juan Soto"
        );

        let refreshed = fixture.cases.refresh_accident_employees().await.unwrap();

        assert_eq!(refreshed, 1);
        assert_eq!(
            fixture.cases.get_accident(&_id).await.unwrap().employee.name,
            "Juan Soto Díaz"
        );
    }

    #[actix_web::test]
    async fn refresh_skips_accidents_whose_employee_is_gone() {
        let fixture = fixture().await;
        let mut accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();
        accident.employee._id = Some(ObjectId::new());
        fixture.db.repository::<Accident>().replace(&accident).await.unwrap();

        assert_eq!(fixture.cases.refresh_accident_employees().await.unwrap(), 0);
        assert_eq!(
            fixture.cases.get_accident(&accident._id.unwrap()).await.unwrap(),
            accident
        );
    }

    #[actix_web::test]
    async fn deleted_accidents_remain_retrievable() {
        let fixture = fixture().await;
        let accident = fixture.cases.create_accident(fixture.input.clone()).await.unwrap();
        let _id = accident._id.unwrap();

        fixture.cases.delete_accident(&_id).await.unwrap();

        let stored = fixture.cases.get_accident(&_id).await.unwrap();
        assert!(stored.is_deleted);
        assert!(stored.deleted_at.is_some());
        assert_eq!(fixture.cases.get_accidents().await.unwrap(), vec![stored]);
    }
}
