use serde::{Deserialize, Serialize};
use sqlx::{types::Decimal, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Profile assigned at registration time and never changed by this flow:
/// PF signup yields StandardUser, PJ signup yields Admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employee_role", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    StandardUser,
}

/// Company record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub tax_id: String,
    pub legal_name: String,
    pub created_at: OffsetDateTime,
}

/// Employee record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub lunch_hours: Option<Decimal>,
    pub daily_work_hours: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub company_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Fields of an employee row before the database assigns its id.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub password_hash: String,
    pub role: Role,
    pub lunch_hours: Option<Decimal>,
    pub daily_work_hours: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
}

impl Company {
    /// Find a company by its tax id (CNPJ).
    pub async fn find_by_tax_id(db: &PgPool, tax_id: &str) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            SELECT id, tax_id, legal_name, created_at
            FROM companies
            WHERE tax_id = $1
            "#,
        )
        .bind(tax_id)
        .fetch_optional(db)
        .await
    }

    /// Create a new company; the database assigns the id.
    pub async fn create(db: &PgPool, tax_id: &str, legal_name: &str) -> Result<Company, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (tax_id, legal_name)
            VALUES ($1, $2)
            RETURNING id, tax_id, legal_name, created_at
            "#,
        )
        .bind(tax_id)
        .bind(legal_name)
        .fetch_one(db)
        .await
    }
}

impl Employee {
    /// Find an employee by tax id (CPF).
    pub async fn find_by_tax_id(db: &PgPool, tax_id: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, tax_id, password_hash, role,
                   lunch_hours, daily_work_hours, hourly_rate, company_id, created_at
            FROM employees
            WHERE tax_id = $1
            "#,
        )
        .bind(tax_id)
        .fetch_optional(db)
        .await
    }

    /// Find an employee by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, tax_id, password_hash, role,
                   lunch_hours, daily_work_hours, hourly_rate, company_id, created_at
            FROM employees
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Find an employee by its internal id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, tax_id, password_hash, role,
                   lunch_hours, daily_work_hours, hourly_rate, company_id, created_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new employee attached to an existing company.
    pub async fn create(
        db: &PgPool,
        company_id: Uuid,
        new: &NewEmployee,
    ) -> Result<Employee, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees
                (name, email, tax_id, password_hash, role,
                 lunch_hours, daily_work_hours, hourly_rate, company_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, email, tax_id, password_hash, role,
                      lunch_hours, daily_work_hours, hourly_rate, company_id, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.tax_id)
        .bind(&new.password_hash)
        .bind(new.role)
        .bind(new.lunch_hours)
        .bind(new.daily_work_hours)
        .bind(new.hourly_rate)
        .bind(company_id)
        .fetch_one(db)
        .await
    }
}

/// Insert a company and its first (admin) employee in one transaction, so a
/// failure of the second write never leaves an orphaned company behind.
pub async fn register_company_with_admin(
    db: &PgPool,
    tax_id: &str,
    legal_name: &str,
    admin: &NewEmployee,
) -> Result<(Company, Employee), sqlx::Error> {
    let mut tx = db.begin().await?;

    let company = sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (tax_id, legal_name)
        VALUES ($1, $2)
        RETURNING id, tax_id, legal_name, created_at
        "#,
    )
    .bind(tax_id)
    .bind(legal_name)
    .fetch_one(&mut *tx)
    .await?;

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees
            (name, email, tax_id, password_hash, role,
             lunch_hours, daily_work_hours, hourly_rate, company_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, email, tax_id, password_hash, role,
                  lunch_hours, daily_work_hours, hourly_rate, company_id, created_at
        "#,
    )
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&admin.tax_id)
    .bind(&admin.password_hash)
    .bind(admin.role)
    .bind(admin.lunch_hours)
    .bind(admin.daily_work_hours)
    .bind(admin.hourly_rate)
    .bind(company.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((company, employee))
}
