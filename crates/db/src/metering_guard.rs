//! Runtime self-test for the usage-counter write guard.
//!
//! Attempts direct INSERT, UPDATE and DELETE statements against the
//! caller's own `user_limits` rows and checks that storage rejects each one,
//! then checks that the metering function still works. Everything runs in a
//! single transaction that is rolled back, so the caller's real counters are
//! never touched.

use chrono::NaiveDate;
use promptsmith_core::types::{usage_day, UserId};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Connection, PgConnection, PgPool, Postgres};

use crate::is_permission_denied;

/// Scratch date used for the seeded row.
fn scratch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct GuardCheck {
    pub test: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Totals across all scenarios.
#[derive(Debug, Clone, Serialize)]
pub struct GuardSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub all_tests_passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardReport {
    pub summary: GuardSummary,
    pub results: Vec<GuardCheck>,
}

impl GuardReport {
    fn from_checks(results: Vec<GuardCheck>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            summary: GuardSummary {
                total: results.len(),
                passed,
                failed: results.len() - passed,
                all_tests_passed: passed == results.len(),
            },
            results,
        }
    }
}

/// Run a write that must be refused, inside its own savepoint.
async fn expect_rejected(
    conn: &mut PgConnection,
    test: &'static str,
    query: Query<'_, Postgres, PgArguments>,
) -> Result<GuardCheck, sqlx::Error> {
    let mut savepoint = conn.begin().await?;
    let outcome = query.execute(&mut *savepoint).await;
    savepoint.rollback().await?;

    Ok(match outcome {
        Err(ref err) if is_permission_denied(err) => GuardCheck {
            test,
            passed: true,
            detail: Some(format!("Rejected: {err}")),
        },
        Err(err) => GuardCheck {
            test,
            passed: false,
            detail: Some(format!("Failed for an unexpected reason: {err}")),
        },
        Ok(_) => GuardCheck {
            test,
            passed: false,
            detail: Some("Write was allowed".to_string()),
        },
    })
}

/// Run every scenario for `user_id` and roll everything back.
pub async fn run(pool: &PgPool, user_id: UserId) -> Result<GuardReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut results = Vec::with_capacity(6);

    // 1. Reading one's own counters is allowed.
    {
        let mut savepoint = tx.begin().await?;
        let read = sqlx::query("SELECT usage_count FROM user_limits WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&mut *savepoint)
            .await;
        savepoint.rollback().await?;
        results.push(GuardCheck {
            test: "select own usage rows",
            passed: read.is_ok(),
            detail: read.err().map(|e| e.to_string()),
        });
    }

    // 2. Direct insert is refused.
    results.push(
        expect_rejected(
            &mut tx,
            "direct insert is rejected",
            sqlx::query(
                "INSERT INTO user_limits (user_id, usage_date, usage_count) VALUES ($1, $2, 999)",
            )
            .bind(user_id)
            .bind(usage_day()),
        )
        .await?,
    );

    // Seed a scratch row through the metering function for the next checks.
    let seeded: Option<i32> =
        sqlx::query_scalar("SELECT increment_user_usage($1, $2, NULL)")
            .bind(user_id)
            .bind(scratch_date())
            .fetch_one(&mut *tx)
            .await?;

    // 3. Direct update of an existing row is refused.
    results.push(
        expect_rejected(
            &mut tx,
            "direct update is rejected",
            sqlx::query(
                "UPDATE user_limits SET usage_count = 999 WHERE user_id = $1 AND usage_date = $2",
            )
            .bind(user_id)
            .bind(scratch_date()),
        )
        .await?,
    );

    // 4. Direct delete is refused.
    results.push(
        expect_rejected(
            &mut tx,
            "direct delete is rejected",
            sqlx::query("DELETE FROM user_limits WHERE user_id = $1 AND usage_date = $2")
                .bind(user_id)
                .bind(scratch_date()),
        )
        .await?,
    );

    // 5. The seeded row is readable and unchanged by the refused writes.
    {
        let count: Option<i32> = sqlx::query_scalar(
            "SELECT usage_count FROM user_limits WHERE user_id = $1 AND usage_date = $2",
        )
        .bind(user_id)
        .bind(scratch_date())
        .fetch_optional(&mut *tx)
        .await?;
        results.push(GuardCheck {
            test: "counter unchanged after rejected writes",
            passed: count.is_some() && count == seeded,
            detail: Some(format!("seeded {seeded:?}, read back {count:?}")),
        });
    }

    // 6. The metering function increments.
    {
        let next: Option<i32> = sqlx::query_scalar("SELECT increment_user_usage($1, $2, NULL)")
            .bind(user_id)
            .bind(scratch_date())
            .fetch_one(&mut *tx)
            .await?;
        let expected = seeded.map(|n| n + 1);
        results.push(GuardCheck {
            test: "metering function increments",
            passed: next.is_some() && next == expected,
            detail: Some(format!("expected {expected:?}, got {next:?}")),
        });
    }

    tx.rollback().await?;

    let report = GuardReport::from_checks(results);
    tracing::info!(
        user_id = %user_id,
        passed = report.summary.passed,
        failed = report.summary.failed,
        "Metering guard self-test finished"
    );
    Ok(report)
}
