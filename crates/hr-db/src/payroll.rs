//! Payroll repository
//!
//! Records are append-only. Net pay is computed once at insert and stored.

use async_trait::async_trait;
use hr_core::traits::Id;
use hr_models::{PayrollAggregates, PayrollFilter, PayrollInputs, PayrollPeriodTotal, PayrollRecord};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::repository::{require, Repository, RepositoryError, RepositoryResult};

const SELECT_RECORD: &str = r#"
    SELECT p.id, p.employee_id, e.name AS employee_name, p.period, p.base_salary,
           p.overtime_hours, p.overtime_rate, p.bonuses, p.deductions, p.net_pay
    FROM payroll_records p
    JOIN employees e ON e.id = p.employee_id
"#;

/// Payroll database entity, joined with the employee name
#[derive(Debug, Clone, FromRow)]
pub struct PayrollRow {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub period: String,
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonuses: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

impl From<PayrollRow> for PayrollRecord {
    fn from(row: PayrollRow) -> Self {
        PayrollRecord {
            id: row.id,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            period: row.period,
            base_salary: row.base_salary,
            overtime_hours: row.overtime_hours,
            overtime_rate: row.overtime_rate,
            bonuses: row.bonuses,
            deductions: row.deductions,
            net_pay: row.net_pay,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct PeriodTotalRow {
    period: String,
    total_net: f64,
}

/// DTO for appending a payroll record
#[derive(Debug, Clone)]
pub struct CreatePayrollDto {
    pub employee_id: Id,
    pub period: String,
    pub inputs: PayrollInputs,
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a PayrollFilter) {
    let mut separator = " WHERE ";
    if let Some(employee_id) = filter.employee_id() {
        builder.push(separator).push("p.employee_id = ").push_bind(employee_id);
        separator = " AND ";
    }
    if let Some(period) = filter.period() {
        builder.push(separator).push("p.period = ").push_bind(period);
    }
}

/// Payroll repository implementation
pub struct PayrollRepository {
    pool: SqlitePool,
}

impl PayrollRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records matching the filter, latest period first
    pub async fn list(&self, filter: &PayrollFilter) -> RepositoryResult<Vec<PayrollRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_RECORD);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY p.period DESC, p.id DESC");

        let rows = builder
            .build_query_as::<PayrollRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PayrollRecord::from).collect())
    }

    /// Net pay summed per period, plus the grand total of those sums
    pub async fn totals(&self, filter: &PayrollFilter) -> RepositoryResult<PayrollAggregates> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT p.period, CAST(SUM(p.net_pay) AS REAL) AS total_net FROM payroll_records p",
        );
        push_filter(&mut builder, filter);
        builder.push(" GROUP BY p.period ORDER BY p.period DESC");

        let rows = builder
            .build_query_as::<PeriodTotalRow>()
            .fetch_all(&self.pool)
            .await?;

        let totals = rows
            .into_iter()
            .map(|row| PayrollPeriodTotal {
                period: row.period,
                total_net: row.total_net,
            })
            .collect();

        Ok(PayrollAggregates::from_totals(totals))
    }
}

#[async_trait]
impl Repository<PayrollRecord, CreatePayrollDto> for PayrollRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<PayrollRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_RECORD);
        builder.push(" WHERE p.id = ").push_bind(id);

        let row = builder
            .build_query_as::<PayrollRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PayrollRecord::from))
    }

    async fn create(&self, dto: CreatePayrollDto) -> RepositoryResult<PayrollRecord> {
        let employee_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)")
                .bind(dto.employee_id)
                .fetch_one(&self.pool)
                .await?;
        if !employee_exists {
            return Err(RepositoryError::Validation("employee not found".to_string()));
        }

        let inputs = dto.inputs;
        let net_pay = inputs.net_pay();

        let result = sqlx::query(
            r#"
            INSERT INTO payroll_records
                (employee_id, period, base_salary, overtime_hours, overtime_rate,
                 bonuses, deductions, net_pay)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.employee_id)
        .bind(&dto.period)
        .bind(inputs.base_salary)
        .bind(inputs.overtime_hours)
        .bind(inputs.overtime_rate)
        .bind(inputs.bonuses)
        .bind(inputs.deductions)
        .bind(net_pay)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(payroll_id = id, employee_id = dto.employee_id, net_pay, "Payroll record stored");
        require(self.find_by_id(id).await?, id)
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM payroll_records WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::EmployeeRepository;
    use crate::pool::Database;

    async fn setup() -> (EmployeeRepository, PayrollRepository) {
        let db = Database::in_memory().await.unwrap();
        (
            EmployeeRepository::new(db.pool().clone()),
            PayrollRepository::new(db.pool().clone()),
        )
    }

    fn entry(employee_id: Id, period: &str, base_salary: f64) -> CreatePayrollDto {
        CreatePayrollDto {
            employee_id,
            period: period.to_string(),
            inputs: PayrollInputs {
                base_salary,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_create_computes_net_pay() {
        let (employees, payroll) = setup().await;
        let ana = employees.create("Ana".into()).await.unwrap();

        let record = payroll
            .create(CreatePayrollDto {
                employee_id: ana.id,
                period: "2024-12".into(),
                inputs: PayrollInputs {
                    base_salary: 1000.0,
                    overtime_hours: 5.0,
                    overtime_rate: 60.0,
                    bonuses: 150.0,
                    deductions: 50.0,
                },
            })
            .await
            .unwrap();

        assert_eq!(record.net_pay, 1400.0);
        assert_eq!(record.employee_name, "Ana");
        assert_eq!(record.overtime_rate, 60.0);
    }

    #[tokio::test]
    async fn test_create_requires_existing_employee() {
        let (_, payroll) = setup().await;
        let err = payroll.create(entry(5, "2024-12", 1.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(ref m) if m == "employee not found"));
    }

    #[tokio::test]
    async fn test_list_order_and_totals() {
        let (employees, payroll) = setup().await;
        let ana = employees.create("Ana".into()).await.unwrap();
        let bob = employees.create("Bob".into()).await.unwrap();

        payroll.create(entry(ana.id, "2024-11", 100.0)).await.unwrap();
        payroll.create(entry(ana.id, "2024-12", 200.0)).await.unwrap();
        payroll.create(entry(bob.id, "2024-12", 300.0)).await.unwrap();

        let all = payroll.list(&PayrollFilter::default()).await.unwrap();
        let order: Vec<(&str, f64)> = all.iter().map(|r| (r.period.as_str(), r.net_pay)).collect();
        assert_eq!(
            order,
            vec![("2024-12", 300.0), ("2024-12", 200.0), ("2024-11", 100.0)]
        );

        let aggregates = payroll.totals(&PayrollFilter::default()).await.unwrap();
        assert_eq!(
            aggregates.totals_by_period,
            vec![
                PayrollPeriodTotal {
                    period: "2024-12".into(),
                    total_net: 500.0
                },
                PayrollPeriodTotal {
                    period: "2024-11".into(),
                    total_net: 100.0
                },
            ]
        );
        assert_eq!(aggregates.grand_total_net, 600.0);

        let anas = PayrollFilter {
            employee_id: Some(ana.id),
            period: None,
        };
        assert_eq!(payroll.totals(&anas).await.unwrap().grand_total_net, 300.0);
        assert_eq!(payroll.list(&anas).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_totals() {
        let (_, payroll) = setup().await;
        let aggregates = payroll.totals(&PayrollFilter::default()).await.unwrap();
        assert!(aggregates.totals_by_period.is_empty());
        assert_eq!(aggregates.grand_total_net, 0.0);
    }

    #[tokio::test]
    async fn test_records_removed_with_employee() {
        let (employees, payroll) = setup().await;
        let ana = employees.create("Ana".into()).await.unwrap();
        let record = payroll.create(entry(ana.id, "2024-10", 10.0)).await.unwrap();

        employees.delete(ana.id).await.unwrap();
        assert!(!payroll.exists(record.id).await.unwrap());
    }
}
