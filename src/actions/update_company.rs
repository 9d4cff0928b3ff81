use chrono::Utc;

use crate::events::{dispatch, AccessEvent};
use crate::repository::{Company, CompanyRepository};
use crate::validators::validate_company_name;
use crate::AuthError;

/// Updates a company's mutable fields.
///
/// `role_alias` is immutable: the tenant's role names embed it, so a rename
/// attempt is rejected outright. The comparison is against the stored row,
/// case-sensitive.
pub struct UpdateCompanyAction<C>
where
    C: CompanyRepository,
{
    companies: C,
}

impl<C: CompanyRepository> UpdateCompanyAction<C> {
    pub fn new(companies: C) -> Self {
        Self { companies }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_company", skip_all, err)
    )]
    pub async fn execute(&self, incoming: Company) -> Result<Company, AuthError> {
        let existing = self
            .companies
            .find_by_id(incoming.id)
            .await?
            .ok_or(AuthError::NotFound)?;

        if existing.role_alias != incoming.role_alias {
            return Err(AuthError::ImmutableFieldViolation("role_alias"));
        }

        validate_company_name(&incoming.name).map_err(AuthError::Validation)?;

        let company = self.companies.update(incoming).await?;

        dispatch(AccessEvent::CompanyUpdated {
            company_id: company.id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"company updated\", company_id={}",
            company.id
        );

        Ok(company)
    }
}
