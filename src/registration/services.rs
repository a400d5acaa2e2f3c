use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::types::Decimal;
use std::str::FromStr;

use crate::registration::dto::{RegisterCompanyRequest, RegisterIndividualRequest};
use crate::registration::repo::{Company, Employee, NewEmployee, Role};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// Validation is validate-all/fail-together: every check below returns the
// full list of messages for its concern and the handler merges them,
// inspecting emptiness once before any write.

fn common_field_errors(name: &str, email: &str, tax_id: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Name must not be empty.".to_string());
    }
    if email.trim().is_empty() {
        errors.push("Email must not be empty.".to_string());
    } else if !is_valid_email(email) {
        errors.push("Email is invalid.".to_string());
    }
    if tax_id.trim().is_empty() {
        errors.push("Tax id must not be empty.".to_string());
    }
    if password.is_empty() {
        errors.push("Password must not be empty.".to_string());
    }
    errors
}

fn decimal_field_error(field: &str, value: Option<&String>) -> Option<String> {
    match value {
        Some(v) if Decimal::from_str(v).is_err() => {
            Some(format!("{field} must be a decimal number."))
        }
        _ => None,
    }
}

pub(crate) fn individual_field_errors(req: &RegisterIndividualRequest) -> Vec<String> {
    let mut errors = common_field_errors(&req.name, &req.email, &req.tax_id, &req.password);
    if req.company_tax_id.trim().is_empty() {
        errors.push("Company tax id must not be empty.".to_string());
    }
    errors.extend(decimal_field_error("Lunch hours", req.lunch_hours.as_ref()));
    errors.extend(decimal_field_error(
        "Daily work hours",
        req.daily_work_hours.as_ref(),
    ));
    errors.extend(decimal_field_error("Hourly rate", req.hourly_rate.as_ref()));
    errors
}

pub(crate) fn company_field_errors(req: &RegisterCompanyRequest) -> Vec<String> {
    let mut errors = common_field_errors(&req.name, &req.email, &req.tax_id, &req.password);
    if req.company_tax_id.trim().is_empty() {
        errors.push("Company tax id must not be empty.".to_string());
    }
    if req.company_legal_name.trim().is_empty() {
        errors.push("Company legal name must not be empty.".to_string());
    }
    errors
}

/// PF existence checks over the already-fetched directory lookups: the
/// target company must exist, and neither tax id nor email may be taken.
pub(crate) fn individual_existence_errors(
    company: Option<&Company>,
    employee_by_tax_id: Option<&Employee>,
    employee_by_email: Option<&Employee>,
) -> Vec<String> {
    let mut errors = Vec::new();
    if company.is_none() {
        errors.push("Company not registered.".to_string());
    }
    if employee_by_tax_id.is_some() {
        errors.push("Tax id already registered.".to_string());
    }
    if employee_by_email.is_some() {
        errors.push("Email already registered.".to_string());
    }
    errors
}

/// PJ existence checks: the company tax id must be new, and neither the
/// admin's tax id nor email may be taken.
pub(crate) fn company_existence_errors(
    company: Option<&Company>,
    employee_by_tax_id: Option<&Employee>,
    employee_by_email: Option<&Employee>,
) -> Vec<String> {
    let mut errors = Vec::new();
    if company.is_some() {
        errors.push("Company already registered.".to_string());
    }
    if employee_by_tax_id.is_some() {
        errors.push("Tax id already registered.".to_string());
    }
    if employee_by_email.is_some() {
        errors.push("Email already registered.".to_string());
    }
    errors
}

fn parse_optional_decimal(field: &str, value: Option<&String>) -> anyhow::Result<Option<Decimal>> {
    value
        .map(|v| Decimal::from_str(v).with_context(|| format!("{field} is not a decimal number")))
        .transpose()
}

/// Build the employee row for a PF registration. Field validation has
/// already vouched for the numeric strings, so a parse failure here is a
/// broken precondition and propagates as a fatal error.
pub(crate) fn individual_to_employee(
    req: &RegisterIndividualRequest,
    password_hash: String,
) -> anyhow::Result<NewEmployee> {
    Ok(NewEmployee {
        name: req.name.clone(),
        email: req.email.clone(),
        tax_id: req.tax_id.clone(),
        password_hash,
        role: Role::StandardUser,
        lunch_hours: parse_optional_decimal("lunch hours", req.lunch_hours.as_ref())?,
        daily_work_hours: parse_optional_decimal(
            "daily work hours",
            req.daily_work_hours.as_ref(),
        )?,
        hourly_rate: parse_optional_decimal("hourly rate", req.hourly_rate.as_ref())?,
    })
}

/// Build the admin employee row for a PJ registration.
pub(crate) fn company_admin_to_employee(
    req: &RegisterCompanyRequest,
    password_hash: String,
) -> NewEmployee {
    NewEmployee {
        name: req.name.clone(),
        email: req.email.clone(),
        tax_id: req.tax_id.clone(),
        password_hash,
        role: Role::Admin,
        lunch_hours: None,
        daily_work_hours: None,
        hourly_rate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            tax_id: "01234560001789".into(),
            legal_name: "Empresa Exemplo".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Fulano".into(),
            email: "email@email.com".into(),
            tax_id: "123456789".into(),
            password_hash: "hash".into(),
            role: Role::StandardUser,
            lunch_hours: None,
            daily_work_hours: None,
            hourly_rate: None,
            company_id: Uuid::new_v4(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn individual_request() -> RegisterIndividualRequest {
        RegisterIndividualRequest {
            name: "Fulano".into(),
            email: "a@a.com".into(),
            tax_id: "123456789".into(),
            password: "123456".into(),
            company_tax_id: "01234560001789".into(),
            lunch_hours: Some("6.5".into()),
            daily_work_hours: None,
            hourly_rate: None,
        }
    }

    fn company_request() -> RegisterCompanyRequest {
        RegisterCompanyRequest {
            name: "Fulano".into(),
            email: "a@a.com".into(),
            tax_id: "123456789".into(),
            password: "123456".into(),
            company_tax_id: "99999999000191".into(),
            company_legal_name: "Empresa Exemplo".into(),
        }
    }

    #[test]
    fn accepts_well_formed_emails_and_rejects_malformed_ones() {
        assert!(is_valid_email("a@a.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@at@signs.com"));
    }

    #[test]
    fn valid_individual_request_has_no_field_errors() {
        assert!(individual_field_errors(&individual_request()).is_empty());
    }

    #[test]
    fn individual_field_errors_accumulate() {
        let mut req = individual_request();
        req.name = "".into();
        req.email = "bad-email".into();
        req.lunch_hours = Some("six".into());
        let errors = individual_field_errors(&req);
        assert_eq!(
            errors,
            vec![
                "Name must not be empty.",
                "Email is invalid.",
                "Lunch hours must be a decimal number.",
            ]
        );
    }

    #[test]
    fn missing_company_is_reported_for_individuals() {
        let errors = individual_existence_errors(None, None, None);
        assert_eq!(errors, vec!["Company not registered."]);
    }

    #[test]
    fn individual_duplicates_are_all_reported_at_once() {
        let emp = employee();
        let errors = individual_existence_errors(None, Some(&emp), Some(&emp));
        assert_eq!(
            errors,
            vec![
                "Company not registered.",
                "Tax id already registered.",
                "Email already registered.",
            ]
        );
    }

    #[test]
    fn individual_with_existing_company_and_no_duplicates_passes() {
        let comp = company();
        assert!(individual_existence_errors(Some(&comp), None, None).is_empty());
    }

    #[test]
    fn duplicate_company_is_reported_for_company_registration() {
        let comp = company();
        let errors = company_existence_errors(Some(&comp), None, None);
        assert_eq!(errors, vec!["Company already registered."]);
    }

    #[test]
    fn repeated_company_registration_reports_every_duplicate() {
        let comp = company();
        let emp = employee();
        let errors = company_existence_errors(Some(&comp), Some(&emp), Some(&emp));
        assert_eq!(
            errors,
            vec![
                "Company already registered.",
                "Tax id already registered.",
                "Email already registered.",
            ]
        );
    }

    #[test]
    fn new_company_with_fresh_admin_passes_existence_checks() {
        assert!(company_existence_errors(None, None, None).is_empty());
    }

    #[test]
    fn individual_conversion_fixes_standard_user_role_and_parses_decimals() {
        let new = individual_to_employee(&individual_request(), "hash".into()).unwrap();
        assert_eq!(new.role, Role::StandardUser);
        assert_eq!(new.lunch_hours, Some(Decimal::from_str("6.5").unwrap()));
        assert!(new.daily_work_hours.is_none());
        assert_eq!(new.password_hash, "hash");
    }

    #[test]
    fn individual_conversion_rejects_malformed_decimal() {
        let mut req = individual_request();
        req.hourly_rate = Some("lots".into());
        assert!(individual_to_employee(&req, "hash".into()).is_err());
    }

    #[test]
    fn company_admin_conversion_fixes_admin_role() {
        let new = company_admin_to_employee(&company_request(), "hash".into());
        assert_eq!(new.role, Role::Admin);
        assert!(new.lunch_hours.is_none());
    }

    #[test]
    fn missing_company_legal_name_is_a_field_error() {
        let mut req = company_request();
        req.company_legal_name = "  ".into();
        let errors = company_field_errors(&req);
        assert_eq!(errors, vec!["Company legal name must not be empty."]);
    }
}
