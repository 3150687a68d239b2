use crate::AppContext;
use crate::cli::commands::value_or_prompt;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::models::admin::NewAdmin;
use crate::session::{Session, SessionState};
use crate::ui::messages::{field, header, info, success, warning};
use crate::utils::date::format_timestamp;
use tracing::info as log_info;

/// `login`, `register`, `logout`, `whoami`
pub async fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        Commands::Login { email, password } => {
            let password = value_or_prompt(password, "Password")?;
            login(ctx, email, &password).await
        }
        Commands::Register {
            full_name,
            email,
            password,
        } => {
            let password = value_or_prompt(password, "Password")?;
            let client = ctx.client()?;
            client
                .register_admin(&NewAdmin {
                    full_name: full_name.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    role: "admin".to_string(),
                })
                .await?;
            success(format!("Account created for {email}"));
            login(ctx, email, &password).await
        }
        Commands::Logout => {
            if ctx.store.clear()? {
                success("Logged out");
            } else {
                info("No active session");
            }
            Ok(())
        }
        Commands::Whoami => {
            let session = ctx.store.require()?;
            show_identity(&session);
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn login(ctx: &AppContext, email: &str, password: &str) -> AppResult<()> {
    if let SessionState::Active(current) = ctx.store.load()? {
        warning(format!(
            "Replacing the session of {}",
            current.identity.email
        ));
    }

    let data = ctx.client()?.login(email.trim(), password).await?;
    let session = Session::from_login(&data.token, data.admin.as_ref())?;
    ctx.store.save(&session)?;

    log_info!(email = %session.identity.email, role = %session.identity.role, "logged in");
    success(format!(
        "Welcome back, {}",
        if session.identity.display_name.is_empty() {
            &session.identity.email
        } else {
            &session.identity.display_name
        }
    ));
    Ok(())
}

fn show_identity(session: &Session) {
    let id = &session.identity;
    header("Signed in");
    field("Name", &id.display_name);
    field("Email", &id.email);
    field("Role", &id.role);
    field("Admin id", &id.subject);
    field("Session expires", format_timestamp(&id.expires_at));
}
