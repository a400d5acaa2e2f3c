use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    db::AppState,
    error::ApiError,
    response::Envelope,
};

use super::dto::{
    CompanyRegistration, IndividualRegistration, RegisterCompanyRequest,
    RegisterIndividualRequest,
};
use super::password;
use super::repo::{self, Company, Employee};
use super::services;

pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/register-individual", post(register_individual))
        .route("/register-company", post(register_company))
}

/// PF registration: an individual joining an already-registered company.
/// All checks run before the single employee write; any failure means zero
/// writes.
#[instrument(skip(state, payload))]
pub async fn register_individual(
    State(state): State<AppState>,
    Json(payload): Json<RegisterIndividualRequest>,
) -> Result<(StatusCode, Json<Envelope<IndividualRegistration>>), ApiError> {
    info!(tax_id = %payload.tax_id, company_tax_id = %payload.company_tax_id, "registering individual");

    let company = Company::find_by_tax_id(&state.db, &payload.company_tax_id).await?;
    let by_tax_id = Employee::find_by_tax_id(&state.db, &payload.tax_id).await?;
    let by_email = Employee::find_by_email(&state.db, &payload.email).await?;

    let mut errors = services::individual_field_errors(&payload);
    errors.extend(services::individual_existence_errors(
        company.as_ref(),
        by_tax_id.as_ref(),
        by_email.as_ref(),
    ));
    if !errors.is_empty() {
        warn!(?errors, "individual registration rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::errors(errors))));
    }

    // Validation guarantees the company lookup succeeded.
    let company = company.context("company vanished between lookup and persist")?;

    let password_hash = password::hash_password(&payload.password)?;
    let new = services::individual_to_employee(&payload, password_hash)?;
    let employee = Employee::create(&state.db, company.id, &new).await?;

    info!(employee_id = %employee.id, "individual registered");
    Ok((
        StatusCode::OK,
        Json(Envelope::data(IndividualRegistration::from_employee(
            &employee,
            &company.tax_id,
        ))),
    ))
}

/// PJ registration: a new company plus its first admin employee, written in
/// one transaction.
#[instrument(skip(state, payload))]
pub async fn register_company(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCompanyRequest>,
) -> Result<(StatusCode, Json<Envelope<CompanyRegistration>>), ApiError> {
    info!(tax_id = %payload.tax_id, company_tax_id = %payload.company_tax_id, "registering company");

    let existing_company = Company::find_by_tax_id(&state.db, &payload.company_tax_id).await?;
    let by_tax_id = Employee::find_by_tax_id(&state.db, &payload.tax_id).await?;
    let by_email = Employee::find_by_email(&state.db, &payload.email).await?;

    let mut errors = services::company_field_errors(&payload);
    errors.extend(services::company_existence_errors(
        existing_company.as_ref(),
        by_tax_id.as_ref(),
        by_email.as_ref(),
    ));
    if !errors.is_empty() {
        warn!(?errors, "company registration rejected");
        return Ok((StatusCode::BAD_REQUEST, Json(Envelope::errors(errors))));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let admin = services::company_admin_to_employee(&payload, password_hash);
    let (company, employee) = repo::register_company_with_admin(
        &state.db,
        &payload.company_tax_id,
        &payload.company_legal_name,
        &admin,
    )
    .await?;

    info!(company_id = %company.id, employee_id = %employee.id, "company registered");
    Ok((
        StatusCode::OK,
        Json(Envelope::data(CompanyRegistration::from_employee(
            &employee, &company,
        ))),
    ))
}
