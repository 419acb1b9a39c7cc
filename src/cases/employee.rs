use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::{info, warn};

use super::{assign_if_changed, load, resolve, set_active, soft_delete, CaseError};
use crate::{
    database::Database,
    models::employee::{Employee, EmployeeInput, Nationality, Position, Supervisor},
    repository::Repository,
};

pub struct EmployeeCases {
    employees: Arc<dyn Repository<Employee>>,
    supervisors: Arc<dyn Repository<Supervisor>>,
    positions: Arc<dyn Repository<Position>>,
    nationalities: Arc<dyn Repository<Nationality>>,
}

/// Supervisor, position and nationality snapshots for one write.
struct References {
    supervisor: Supervisor,
    position: Position,
    nationality: Nationality,
}

impl EmployeeCases {
    pub fn new(db: &Database) -> Self {
        Self {
            employees: db.repository(),
            supervisors: db.repository(),
            positions: db.repository(),
            nationalities: db.repository(),
        }
    }

    async fn references(&self, input: &EmployeeInput) -> Result<References, CaseError> {
        Ok(References {
            supervisor: resolve(&*self.supervisors, &input.supervisor_id).await?,
            position: resolve(&*self.positions, &input.position_id).await?,
            nationality: resolve(&*self.nationalities, &input.nationality_id).await?,
        })
    }

    pub async fn create_employee(&self, input: EmployeeInput) -> Result<Employee, CaseError> {
        if self
            .employees
            .find_one_by("identification_number", &input.identification_number)
            .await?
            .is_some()
        {
            warn!(
                identification_number = %input.identification_number,
                "duplicate employee rejected"
            );
            return Err(CaseError::DuplicateEntity("employee"));
        }

        let references = self.references(&input).await?;
        let now = DateTime::now();
        let mut employee = Employee {
            _id: None,
            name: input.name,
            identification_type: input.identification_type,
            identification_number: input.identification_number,
            email: input.email,
            in_law: input.in_law,
            contract_type: input.contract_type,
            start_date: input.start_date,
            end_date: input.end_date,
            supervisor: references.supervisor,
            position: references.position,
            nationality: references.nationality,
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let _id = self.employees.create(&mut employee).await?;

        info!(id = %_id, "employee created");
        Ok(employee)
    }
    pub async fn get_employee(&self, _id: &ObjectId) -> Result<Employee, CaseError> {
        load(&*self.employees, _id).await
    }
    pub async fn get_employees(&self) -> Result<Vec<Employee>, CaseError> {
        Ok(self.employees.find_all().await?)
    }
    /// Identification type and number are fixed at creation and ignored here.
    pub async fn update_employee(
        &self,
        _id: &ObjectId,
        input: EmployeeInput,
    ) -> Result<Employee, CaseError> {
        let mut employee = load(&*self.employees, _id).await?;
        let references = self.references(&input).await?;

        employee.supervisor = references.supervisor;
        employee.position = references.position;
        employee.nationality = references.nationality;
        assign_if_changed(&mut employee.name, input.name);
        assign_if_changed(&mut employee.email, input.email);
        assign_if_changed(&mut employee.in_law, input.in_law);
        assign_if_changed(&mut employee.contract_type, input.contract_type);
        assign_if_changed(&mut employee.start_date, input.start_date);
        assign_if_changed(&mut employee.end_date, input.end_date);
        employee.updated_at = DateTime::now();
        self.employees.replace(&employee).await?;

        Ok(employee)
    }
    pub async fn delete_employee(&self, _id: &ObjectId) -> Result<Employee, CaseError> {
        soft_delete(&*self.employees, _id).await
    }
    pub async fn activate_employee(&self, _id: &ObjectId) -> Result<Employee, CaseError> {
        set_active(&*self.employees, _id, true).await
    }
    pub async fn deactivate_employee(&self, _id: &ObjectId) -> Result<Employee, CaseError> {
        set_active(&*self.employees, _id, false).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::*;
    use crate::{
        cases::catalog::CatalogCases,
        models::{
            catalog::CatalogKind,
            employee::{NationalityKind, PositionKind, SupervisorKind},
        },
    };

    struct Fixture {
        db: Database,
        cases: EmployeeCases,
        supervisor: ObjectId,
        position: ObjectId,
        nationality: ObjectId,
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
        Fixture {
            supervisor: seed::<SupervisorKind>(&db, "Ana Ruiz").await,
            position: seed::<PositionKind>(&db, "Welder").await,
            nationality: seed::<NationalityKind>(&db, "Chilean").await,
            cases: EmployeeCases::new(&db),
            db,
        }
    }

    impl Fixture {
        fn input(&self, identification_number: &str) -> EmployeeInput {
            EmployeeInput {
                name: "Juan Soto".to_string(),
                identification_type: "RUT".to_string(),
                identification_number: identification_number.to_string(),
                email: "juan@example.com".to_string(),
                in_law: false,
                contract_type: "fixed".to_string(),
                start_date: DateTime::from_millis(1_672_531_200_000),
                end_date: None,
                supervisor_id: self.supervisor,
                position_id: self.position,
                nationality_id: self.nationality,
            }
        }

        async fn stored(&self) -> usize {
            self.db.repository::<Employee>().find_all().await.unwrap().len()
        }
    }

    #[actix_web::test]
    async fn create_embeds_full_reference_snapshots() {
        let fixture = fixture().await;

        let employee = fixture.cases.create_employee(fixture.input("11-1")).await.unwrap();

        assert!(employee.is_active);
        assert_eq!(employee.supervisor._id, Some(fixture.supervisor));
        assert_eq!(employee.supervisor.name, "Ana Ruiz");
        assert!(employee.supervisor.is_active);
        assert_eq!(employee.position.name, "Welder");
        assert_eq!(employee.nationality.name, "Chilean");
        assert_eq!(
            fixture.cases.get_employee(&employee._id.unwrap()).await.unwrap(),
            employee
        );
    }

    #[actix_web::test]
    async fn missing_position_rejects_without_inserting() {
        let fixture = fixture().await;
        let mut input = fixture.input("11-1");
        input.position_id = ObjectId::new();

        let result = fixture.cases.create_employee(input).await;

        assert!(matches!(result, Err(CaseError::ReferenceNotFound("position"))));
        assert_eq!(fixture.stored().await, 0);
    }

    #[actix_web::test]
    async fn references_are_resolved_in_order() {
        let fixture = fixture().await;
        let mut input = fixture.input("11-1");
        input.supervisor_id = ObjectId::new();
        input.nationality_id = ObjectId::new();

        assert!(matches!(
            fixture.cases.create_employee(input).await,
            Err(CaseError::ReferenceNotFound("supervisor"))
        ));
    }

    #[actix_web::test]
    async fn duplicate_identification_number_is_rejected() {
        let fixture = fixture().await;
        fixture.cases.create_employee(fixture.input("11-1")).await.unwrap();

        let second = fixture.cases.create_employee(fixture.input("11-1")).await;

        assert!(matches!(second, Err(CaseError::DuplicateEntity("employee"))));
        assert_eq!(fixture.stored().await, 1);
    }

    #[actix_web::test]
    async fn update_refreshes_snapshots_and_keeps_identification() {
        let fixture = fixture().await;
        let employee = fixture.cases.create_employee(fixture.input("11-1")).await.unwrap();
        let _id = employee._id.unwrap();
        let supervisors = CatalogCases::<SupervisorKind>::new(&fixture.db);
        supervisors
            .update(&fixture.supervisor, "Ana Ruiz Pérez".to_string())
            .await
            .unwrap();

        sleep(Duration::from_millis(5)).await;
        let mut patch = fixture.input("99-9");
        patch.email = "jsoto@example.com".to_string();
        let updated = fixture.cases.update_employee(&_id, patch).await.unwrap();

        assert_eq!(updated.supervisor.name, "Ana Ruiz Pérez");
        assert_eq!(updated.email, "jsoto@example.com");
        assert_eq!(updated.identification_number, "11-1");
        assert_eq!(updated.name, employee.name);
        assert!(updated.updated_at > employee.updated_at);
    }

    #[actix_web::test]
    async fn failed_update_leaves_the_stored_employee_alone() {
        let fixture = fixture().await;
        let employee = fixture.cases.create_employee(fixture.input("11-1")).await.unwrap();
        let _id = employee._id.unwrap();
        let mut patch = fixture.input("11-1");
        patch.name = "Someone Else".to_string();
        patch.nationality_id = ObjectId::new();

        let result = fixture.cases.update_employee(&_id, patch).await;

        assert!(matches!(result, Err(CaseError::ReferenceNotFound("nationality"))));
        assert_eq!(fixture.cases.get_employee(&_id).await.unwrap(), employee);
    }

    #[actix_web::test]
    async fn delete_and_deactivate_are_independent() {
        let fixture = fixture().await;
        let employee = fixture.cases.create_employee(fixture.input("11-1")).await.unwrap();
        let _id = employee._id.unwrap();

        fixture.cases.delete_employee(&_id).await.unwrap();
        let deleted = fixture.cases.get_employee(&_id).await.unwrap();
        assert!(deleted.is_deleted);
        assert!(deleted.is_active);

        let deactivated = fixture.cases.deactivate_employee(&_id).await.unwrap();
        assert!(deactivated.is_deleted);
        assert!(!deactivated.is_active);
        assert_eq!(fixture.cases.get_employees().await.unwrap().len(), 1);
    }
}
