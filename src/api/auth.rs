use crate::api::{ApiClient, endpoints};
use crate::errors::AppResult;
use crate::models::Admin;
use crate::models::admin::{AdminUpdate, NewAdmin, PasswordChange, ProfileUpdate};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub admin: Option<Admin>,
}

#[derive(Deserialize)]
struct AdminList {
    #[serde(default)]
    admins: Vec<Admin>,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginData> {
        self.post_data(endpoints::LOGIN, &Credentials { email, password })
            .await
    }

    /// Create an admin account (self-registration or by a superadmin).
    pub async fn register_admin(&self, admin: &NewAdmin) -> AppResult<()> {
        self.post_ack(endpoints::REGISTER, admin).await?;
        Ok(())
    }

    pub async fn list_admins(&self) -> AppResult<Vec<Admin>> {
        let list: AdminList = self.get_data(endpoints::ADMINS, &[]).await?;
        Ok(list.admins)
    }

    pub async fn update_admin(&self, id: &str, update: &AdminUpdate) -> AppResult<()> {
        self.put_ack(&endpoints::admin_by_id(id), update).await?;
        Ok(())
    }

    pub async fn delete_admin(&self, id: &str) -> AppResult<()> {
        self.delete(&endpoints::admin_by_id(id)).await?;
        Ok(())
    }

    pub async fn update_profile(&self, profile: &ProfileUpdate) -> AppResult<()> {
        self.put_ack(endpoints::UPDATE_ME, profile).await?;
        Ok(())
    }

    pub async fn change_password(&self, change: &PasswordChange) -> AppResult<()> {
        self.post_ack(endpoints::CHANGE_PASSWORD, change).await?;
        Ok(())
    }
}
