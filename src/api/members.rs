use crate::api::{ApiClient, endpoints};
use crate::errors::{AppError, AppResult};
use crate::models::{Member, MemberForm};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct MemberList {
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberIdBody<'a> {
    member_id: &'a str,
}

/// Update payload: the edited form plus the id it belongs to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberUpdate<'a> {
    member_id: &'a str,
    #[serde(flatten)]
    form: &'a MemberForm,
}

impl ApiClient {
    /// Whole result set of a member search; an empty query lists everyone.
    pub async fn search_members(&self, query: &str) -> AppResult<Vec<Member>> {
        let list: MemberList = self
            .get_data(endpoints::SEARCH_MEMBERS, &[("query", query.trim().to_string())])
            .await?;
        Ok(list.members)
    }

    /// Exact lookup by member id, through the search endpoint.
    pub async fn find_member(&self, member_id: &str) -> AppResult<Member> {
        self.search_members(member_id)
            .await?
            .into_iter()
            .find(|m| m.member_id == member_id)
            .ok_or_else(|| AppError::MemberNotFound(member_id.to_string()))
    }

    pub async fn register_member(&self, form: &MemberForm) -> AppResult<()> {
        form.validate()?;
        self.post_ack(endpoints::REGISTER_MEMBER, form).await?;
        Ok(())
    }

    pub async fn update_member(&self, member_id: &str, form: &MemberForm) -> AppResult<()> {
        form.validate()?;
        let body = MemberUpdate { member_id, form };
        self.put_ack(&endpoints::member_by_id(member_id), &body)
            .await?;
        Ok(())
    }

    pub async fn delete_member(&self, member_id: &str) -> AppResult<()> {
        self.delete(&endpoints::member_by_id(member_id)).await?;
        Ok(())
    }

    /// Members that never had a card issued.
    pub async fn members_without_cards(&self) -> AppResult<Vec<Member>> {
        let list: MemberList = self
            .get_data(endpoints::MEMBERS_WITHOUT_CARDS, &[])
            .await?;
        Ok(list.members)
    }

    pub async fn issue_card(&self, member_id: &str) -> AppResult<()> {
        self.post_ack(endpoints::ISSUE_CARD, &MemberIdBody { member_id })
            .await?;
        Ok(())
    }
}
