use crate::AppContext;
use crate::api::ApiClient;
use crate::cli::commands::{confirm, value_or_prompt};
use crate::cli::parser::SettingsCommand;
use crate::errors::{AppError, AppResult};
use crate::models::Admin;
use crate::models::admin::{AdminUpdate, NewAdmin, PasswordChange, ProfileUpdate};
use crate::session::Session;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

pub async fn handle(cmd: &SettingsCommand, ctx: &AppContext) -> AppResult<()> {
    let (client, session) = ctx.authed()?;

    match cmd {
        SettingsCommand::Profile { full_name, email } => {
            if full_name.is_none() && email.is_none() {
                return Err(AppError::Validation("nothing to update".to_string()));
            }
            let profile = ProfileUpdate {
                full_name: full_name
                    .clone()
                    .unwrap_or_else(|| session.identity.display_name.clone()),
                email: email.clone().unwrap_or_else(|| session.identity.email.clone()),
            };
            client.update_profile(&profile).await?;
            success("Profile updated");
            Ok(())
        }

        SettingsCommand::Password {
            current,
            new_password,
            confirm,
        } => {
            let current = value_or_prompt(current, "Current password")?;
            let new_password = value_or_prompt(new_password, "New password")?;
            let confirm = value_or_prompt(confirm, "Confirm new password")?;
            if new_password != confirm {
                return Err(AppError::Validation("New passwords do not match".to_string()));
            }

            client
                .change_password(&PasswordChange {
                    current_password: current,
                    new_password,
                })
                .await?;
            ctx.store.clear()?;
            success("Password changed");
            info("You have been logged out, please log in with your new password");
            Ok(())
        }

        SettingsCommand::Admins => {
            require_superadmin(&session)?;
            let admins = client.list_admins().await?;
            print_admins(&admins, &session);
            Ok(())
        }

        SettingsCommand::AdminAdd {
            full_name,
            email,
            password,
            role,
        } => {
            require_superadmin(&session)?;
            let password = value_or_prompt(password, "Password")?;
            client
                .register_admin(&NewAdmin {
                    full_name: full_name.clone(),
                    email: email.clone(),
                    password,
                    role: role.as_str().to_string(),
                })
                .await?;
            success(format!("Admin {email} created"));
            Ok(())
        }

        SettingsCommand::AdminUpdate {
            id,
            full_name,
            email,
            role,
        } => {
            require_superadmin(&session)?;
            let current = find_admin(&client, id).await?;
            let update = AdminUpdate {
                full_name: full_name.clone().unwrap_or(current.full_name),
                email: email.clone().unwrap_or(current.email),
                role: role
                    .map(|r| r.as_str().to_string())
                    .unwrap_or(current.role),
            };
            client.update_admin(id, &update).await?;
            success(format!("Admin {id} updated"));
            Ok(())
        }

        SettingsCommand::AdminDelete { id, yes } => {
            require_superadmin(&session)?;
            if *id == session.identity.subject {
                warning("You are deleting your own account");
            }
            if !*yes && !confirm(&format!("Delete admin {id}?"))? {
                info("Deletion cancelled");
                return Ok(());
            }
            client.delete_admin(id).await?;
            success(format!("Admin {id} deleted"));
            Ok(())
        }
    }
}

fn require_superadmin(session: &Session) -> AppResult<()> {
    if session.is_superadmin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

async fn find_admin(client: &ApiClient, id: &str) -> AppResult<Admin> {
    client
        .list_admins()
        .await?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::Validation(format!("no admin with id {id}")))
}

fn print_admins(admins: &[Admin], session: &Session) {
    if admins.is_empty() {
        info("No admin accounts");
        return;
    }
    let mut table = Table::new(["Id", "Name", "Email", "Role"]);
    for a in admins {
        let name = if a.id == session.identity.subject {
            format!("{} (you)", a.full_name)
        } else {
            a.full_name.clone()
        };
        table.add_row(vec![a.id.clone(), name, a.email.clone(), a.role.clone()]);
    }
    print!("{}", table.render());
}
