use crate::AppContext;
use crate::cli::commands::confirm;
use crate::cli::parser::{MemberCommand, MemberFields};
use crate::core::card::CardRenderer;
use crate::core::card_batch::{archive_file_name, write_card_batch};
use crate::core::pagination::{MEMBERS_PER_PAGE, Paginator};
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::models::member::MemberPatch;
use crate::models::{Member, MemberForm};
use crate::ui::messages::{info, muted, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::date::today;
use crate::utils::path::{card_file_name, expand_tilde};
use crate::utils::table::Table;
use std::fs::{self, File};
use std::path::PathBuf;

pub async fn handle(cmd: &MemberCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        MemberCommand::List { search, page } => list(ctx, search, *page).await,
        MemberCommand::Add { fields } => add(ctx, fields).await,
        MemberCommand::Update { member_id, fields } => update(ctx, member_id, fields).await,
        MemberCommand::Delete { member_id, yes } => delete(ctx, member_id, *yes).await,
        MemberCommand::Cards {
            member,
            all_new,
            out,
            force,
        } => match (member, all_new) {
            (Some(id), false) => single_card(ctx, id, out.as_deref(), *force).await,
            (None, true) => card_batch(ctx, out.as_deref(), *force).await,
            _ => Err(AppError::Other(
                "use either --member <ID> or --all-new".to_string(),
            )),
        },
    }
}

impl From<&MemberFields> for MemberPatch {
    fn from(f: &MemberFields) -> Self {
        MemberPatch {
            full_name: f.full_name.clone(),
            email: f.email.clone(),
            phone: f.phone.clone(),
            gender: f.gender.clone(),
            date_of_birth: f.date_of_birth.clone(),
            department: f.department.clone(),
            membership_type: f.membership_type.clone(),
        }
    }
}

fn member_table(members: &[Member]) -> Table {
    let mut table = Table::new([
        "Member ID",
        "Name",
        "Email",
        "Phone",
        "Department",
        "Type",
        "Card",
    ]);
    for m in members {
        table.add_row(vec![
            m.member_id.clone(),
            m.full_name.clone(),
            colorize_optional(&m.email),
            colorize_optional(&m.phone),
            colorize_optional(&m.department),
            m.membership_type.clone(),
            if m.issued_card { "issued" } else { "-" }.to_string(),
        ]);
    }
    table
}

async fn list(ctx: &AppContext, search: &str, page: usize) -> AppResult<()> {
    let (client, _) = ctx.authed()?;
    let members = client.search_members(search).await?;

    let paginator = Paginator::new(MEMBERS_PER_PAGE);
    let page = paginator.page(&members, page);

    if page.items.is_empty() {
        info("No members found");
        return Ok(());
    }

    print!("{}", member_table(page.items).render());
    muted(page.summary());
    if page.has_next() {
        muted(format!("Next: --page {}", page.number + 1));
    }
    Ok(())
}

async fn add(ctx: &AppContext, fields: &MemberFields) -> AppResult<()> {
    let mut form = MemberForm::default();
    MemberPatch::from(fields).apply(&mut form);
    form.validate()?;

    let (client, _) = ctx.authed()?;
    client.register_member(&form).await?;
    success(format!("Member {} registered", form.full_name));
    Ok(())
}

async fn update(ctx: &AppContext, member_id: &str, fields: &MemberFields) -> AppResult<()> {
    let patch = MemberPatch::from(fields);
    if patch.is_empty() {
        return Err(AppError::Validation("nothing to update".to_string()));
    }

    let (client, _) = ctx.authed()?;
    let member = client.find_member(member_id).await?;

    let mut form = member.to_form();
    patch.apply(&mut form);
    client.update_member(&member.member_id, &form).await?;
    success(format!("Member {} updated", member.member_id));
    Ok(())
}

async fn delete(ctx: &AppContext, member_id: &str, yes: bool) -> AppResult<()> {
    let (client, _) = ctx.authed()?;

    if !yes && !confirm(&format!("Delete member {member_id}?"))? {
        info("Deletion cancelled");
        return Ok(());
    }

    client.delete_member(member_id).await?;
    success(format!("Member {member_id} deleted"));
    Ok(())
}

fn out_path(ctx: &AppContext, out: Option<&str>, default_name: &str) -> PathBuf {
    match out {
        Some(p) => expand_tilde(p),
        None => ctx.cfg.output_path(default_name),
    }
}

/// Render one card, save it and mark the card as issued.
async fn single_card(ctx: &AppContext, member_id: &str, out: Option<&str>, force: bool) -> AppResult<()> {
    let (client, _) = ctx.authed()?;
    let member = client.find_member(member_id).await?;

    let renderer = CardRenderer::from_config(&ctx.cfg)?;
    let png = renderer.render_png(&member)?;

    let path = out_path(ctx, out, &card_file_name(&member.full_name));
    ensure_writable(&path, force)?;
    fs::write(&path, png)?;
    success(format!("Card saved to {}", path.display()));

    client.issue_card(&member.member_id).await?;
    info(format!("Card marked as issued for {}", member.full_name));
    Ok(())
}

/// Zip of cards for every member that has none yet.
async fn card_batch(ctx: &AppContext, out: Option<&str>, force: bool) -> AppResult<()> {
    let (client, _) = ctx.authed()?;
    let members = client.members_without_cards().await?;

    if members.is_empty() {
        info("No new cards to generate.");
        return Ok(());
    }

    // assets first, so a missing template leaves no empty archive behind
    let renderer = CardRenderer::from_config(&ctx.cfg)?;

    let path = out_path(ctx, out, &archive_file_name(today()));
    ensure_writable(&path, force)?;
    let file = File::create(&path)?;

    let entries = match write_card_batch(&renderer, &members, file) {
        Ok((_, entries)) => entries,
        Err(e) => {
            let _ = fs::remove_file(&path);
            return Err(e);
        }
    };

    let renamed = entries
        .iter()
        .zip(&members)
        .filter(|(entry, m)| **entry != card_file_name(&m.full_name))
        .count();
    if renamed > 0 {
        warning(format!("{renamed} card(s) renamed to avoid duplicate file names"));
    }
    success(format!(
        "Successfully generated cards for {} member{}.",
        members.len(),
        if members.len() > 1 { "s" } else { "" }
    ));
    muted(format!("Archive: {}", path.display()));
    Ok(())
}
