use chrono::Utc;

use crate::events::{dispatch, AccessEvent};
use crate::repository::{Company, CompanyRepository, NewCompany};
use crate::roles::{role_name, RoleKind};
use crate::validators::{validate_company_name, validate_role_alias};
use crate::AuthError;

/// Provisions a tenant: the company row plus its two canonical roles.
///
/// The role names are derived from the alias, never supplied by the caller.
/// Both roles must exist the moment this returns, so the store has to take
/// the writes in one transaction; stores that cannot are refused up front
/// rather than risking a tenant with no roles.
pub struct ProvisionCompanyAction<C>
where
    C: CompanyRepository,
{
    companies: C,
}

impl<C: CompanyRepository> ProvisionCompanyAction<C> {
    pub fn new(companies: C) -> Self {
        Self { companies }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "provision_company", skip_all, err)
    )]
    pub async fn execute(&self, request: NewCompany) -> Result<Company, AuthError> {
        validate_company_name(&request.name).map_err(AuthError::Validation)?;
        validate_role_alias(&request.role_alias).map_err(AuthError::Validation)?;

        if !self.companies.supports_atomic_provisioning() {
            return Err(AuthError::TransactionUnsupported);
        }

        let role_names = vec![
            role_name(&request.role_alias, RoleKind::LocalAdmin),
            role_name(&request.role_alias, RoleKind::LocalUser),
        ];

        let company = self.companies.create_with_roles(request, &role_names).await?;

        dispatch(AccessEvent::CompanyProvisioned {
            company_id: company.id,
            role_alias: company.role_alias.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "palisade_auth",
            "msg=\"company provisioned\", company_id={}, role_alias={}",
            company.id,
            company.role_alias
        );

        Ok(company)
    }
}
