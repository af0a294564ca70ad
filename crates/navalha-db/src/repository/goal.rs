//! # Goal Repository
//!
//! Database operations for monthly targets.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use navalha_core::{Goal, GoalKind};

/// Repository for goal database operations.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tenant_id, kind, professional_id, target_value, period, created_at
    FROM goals
"#;

impl GoalRepository {
    /// Creates a new GoalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GoalRepository { pool }
    }

    /// Sets a goal, replacing any existing goal with the same scope
    /// (kind, professional, period).
    pub async fn set(&self, goal: &Goal) -> DbResult<()> {
        debug!(
            kind = ?goal.kind,
            period = %goal.period,
            target_value = goal.target_value,
            "Setting goal"
        );

        let mut txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM goals
            WHERE tenant_id = ?1 AND kind = ?2
              AND COALESCE(professional_id, '') = COALESCE(?3, '')
              AND period = ?4
            "#,
        )
        .bind(&goal.tenant_id)
        .bind(goal.kind)
        .bind(&goal.professional_id)
        .bind(&goal.period)
        .execute(&mut *txn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO goals (
                id, tenant_id, kind, professional_id, target_value, period, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.tenant_id)
        .bind(goal.kind)
        .bind(&goal.professional_id)
        .bind(goal.target_value)
        .bind(&goal.period)
        .bind(goal.created_at)
        .execute(&mut *txn)
        .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Looks up the goal for one scope.
    pub async fn get(
        &self,
        tenant_id: &str,
        kind: GoalKind,
        professional_id: Option<&str>,
        period: &str,
    ) -> DbResult<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND kind = ?2 \
             AND COALESCE(professional_id, '') = COALESCE(?3, '') AND period = ?4"
        ))
        .bind(tenant_id)
        .bind(kind)
        .bind(professional_id)
        .bind(period)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    /// All goals for a period.
    pub async fn list_for_period(&self, tenant_id: &str, period: &str) -> DbResult<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = ?1 AND period = ?2 ORDER BY kind"
        ))
        .bind(tenant_id)
        .bind(period)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
