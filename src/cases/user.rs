use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use pwhash::bcrypt::{self, BcryptSetup};
use tracing::{info, warn};

use super::{assign_if_changed, load, soft_delete, CaseError};
use crate::{
    database::Database,
    models::user::{User, UserCredential, UserRequest, UserUpdateRequest},
    repository::Repository,
};

pub struct UserCases {
    users: Arc<dyn Repository<User>>,
    password_cost: u32,
}

impl UserCases {
    pub fn new(db: &Database, password_cost: u32) -> Self {
        Self {
            users: db.repository(),
            password_cost,
        }
    }

    fn hash(&self, password: &str) -> Result<String, CaseError> {
        let setup = BcryptSetup {
            cost: Some(self.password_cost),
            ..Default::default()
        };
        bcrypt::hash_with(setup, password).map_err(|error| CaseError::Hashing(error.to_string()))
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), CaseError> {
        if self.users.find_one_by("email", email).await?.is_some() {
            warn!(%email, "email already registered");
            return Err(CaseError::DuplicateEntity("user"));
        }
        Ok(())
    }

    pub async fn register(&self, request: UserRequest) -> Result<User, CaseError> {
        self.ensure_email_free(&request.email).await?;

        let now = DateTime::now();
        let mut user = User {
            _id: None,
            name: request.name,
            email: request.email,
            password: self.hash(&request.password)?,
            last_login: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let _id = self.users.create(&mut user).await?;

        info!(id = %_id, "user registered");
        Ok(user)
    }
    pub async fn login(&self, credential: UserCredential) -> Result<User, CaseError> {
        let mut user = self
            .users
            .find_one_by("email", &credential.email)
            .await?
            .ok_or(CaseError::NotFound("user"))?;

        if !bcrypt::verify(&credential.password, &user.password) {
            warn!(email = %credential.email, "login rejected");
            return Err(CaseError::InvalidCredentials);
        }
        if user.is_deleted {
            warn!(email = %credential.email, "login to disabled account");
            return Err(CaseError::AccountDisabled);
        }

        user.last_login = Some(DateTime::now());
        self.users.replace(&user).await?;

        Ok(user)
    }
    pub async fn get_user(&self, _id: &ObjectId) -> Result<User, CaseError> {
        load(&*self.users, _id).await
    }
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, CaseError> {
        self.users
            .find_one_by("email", email)
            .await?
            .ok_or(CaseError::NotFound("user"))
    }
    pub async fn update_user(
        &self,
        _id: &ObjectId,
        request: UserUpdateRequest,
    ) -> Result<User, CaseError> {
        let mut user = load(&*self.users, _id).await?;

        if user.email != request.email {
            self.ensure_email_free(&request.email).await?;
        }
        assign_if_changed(&mut user.name, request.name);
        assign_if_changed(&mut user.email, request.email);
        if let Some(password) = request.password.filter(|password| !password.is_empty()) {
            user.password = self.hash(&password)?;
        }
        user.updated_at = DateTime::now();
        self.users.replace(&user).await?;

        Ok(user)
    }
    pub async fn deactivate_user(&self, _id: &ObjectId) -> Result<User, CaseError> {
        soft_delete(&*self.users, _id).await
    }
    pub async fn activate_user(&self, _id: &ObjectId) -> Result<User, CaseError> {
        let mut user = load(&*self.users, _id).await?;
        user.restore(DateTime::now());
        self.users.replace(&user).await?;

        info!(id = %_id, "user restored");
        Ok(user)
    }
}
