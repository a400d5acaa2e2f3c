use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registration::repo::{Company, Employee};

/// Request body for individual (PF) registration. The optional workday
/// fields arrive as strings and are parsed into decimals during conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIndividualRequest {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub password: String,
    pub company_tax_id: String,
    pub lunch_hours: Option<String>,
    pub daily_work_hours: Option<String>,
    pub hourly_rate: Option<String>,
}

/// Request body for company (PJ) registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyRequest {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub password: String,
    pub company_tax_id: String,
    pub company_legal_name: String,
}

/// Projection returned after a successful PF registration. Workday fields
/// are rendered back as strings, absent when they were not supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualRegistration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub company_tax_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_work_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<String>,
}

impl IndividualRegistration {
    pub fn from_employee(employee: &Employee, company_tax_id: &str) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            tax_id: employee.tax_id.clone(),
            company_tax_id: company_tax_id.to_string(),
            lunch_hours: employee.lunch_hours.map(|d| d.to_string()),
            daily_work_hours: employee.daily_work_hours.map(|d| d.to_string()),
            hourly_rate: employee.hourly_rate.map(|d| d.to_string()),
        }
    }
}

/// Projection returned after a successful PJ registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRegistration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub company_tax_id: String,
    pub company_legal_name: String,
}

impl CompanyRegistration {
    pub fn from_employee(employee: &Employee, company: &Company) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            tax_id: employee.tax_id.clone(),
            company_tax_id: company.tax_id.clone(),
            company_legal_name: company.legal_name.clone(),
        }
    }
}
