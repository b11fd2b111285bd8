//! `PostgreSQL` repository implementation for task record storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskCompletion, TaskId, TaskOutput, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const CREATE_TASKS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id UUID PRIMARY KEY, ",
    "status VARCHAR(16) NOT NULL CHECK (status IN ('PENDING', 'SUCCESS', 'ERROR')), ",
    "output JSONB, ",
    "created_at TIMESTAMPTZ NOT NULL, ",
    "updated_at TIMESTAMPTZ NOT NULL",
    ")",
);

const CREATE_TASKS_ORDER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at, id)";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its ordering index when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when a connection cannot
    /// be obtained or the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query(CREATE_TASKS_TABLE)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            diesel::sql_query(CREATE_TASKS_ORDER_INDEX)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            find_task_row(connection, id)?.map(row_to_task).transpose()
        })
        .await
    }

    async fn complete(
        &self,
        id: TaskId,
        completion: &TaskCompletion,
    ) -> TaskRepositoryResult<Task> {
        let terminal_status = completion.status().as_str();
        let output = Value::Object(completion.output().clone());
        let completed_at = completion.completed_at();

        self.run_blocking(move |connection| {
            // The status filter makes the first terminal write win; a losing
            // executor updates zero rows.
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::status.eq(TaskStatus::Pending.as_str())),
            )
            .set((
                tasks::status.eq(terminal_status),
                tasks::output.eq(Some(output)),
                tasks::updated_at.eq(completed_at),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;

            if let Some(row) = updated {
                return row_to_task(row);
            }

            let existing = find_task_row(connection, id)?
                .map(row_to_task)
                .transpose()?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            Err(TaskRepositoryError::AlreadyTerminal {
                task_id: id,
                status: existing.status(),
            })
        })
        .await
    }

    async fn list(&self, limit: Option<usize>) -> TaskRepositoryResult<Vec<Task>> {
        let row_limit = limit.map(clamp_row_limit);

        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order_by((tasks::created_at.asc(), tasks::id.asc()))
                .into_boxed();
            if let Some(bound) = row_limit {
                query = query.limit(bound);
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Converts a caller limit to a SQL `LIMIT`, saturating at `i64::MAX`.
fn clamp_row_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn find_task_row(
    connection: &mut PgConnection,
    id: TaskId,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        status: task.status().as_str().to_owned(),
        output: task.output().cloned().map(Value::Object),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        status: persisted_status,
        output: persisted_output,
        created_at,
        updated_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let output = persisted_output
        .map(serde_json::from_value::<TaskOutput>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        status,
        output,
        created_at,
        updated_at,
    }))
}
