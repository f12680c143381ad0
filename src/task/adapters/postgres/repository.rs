//! `PostgreSQL` repository implementation for task registry storage.

use super::{models::TaskRow, schema::tasks};
use crate::db::PgPool;
use crate::task::{
    domain::{AllocatedMinutes, Frequency, PersistedTaskData, Task, TaskId, TaskName, TaskPlacement},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::taxonomy::domain::{CategoryId, Pillar, SubCategoryId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
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
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
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

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, query: TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut statement = tasks::table.select(TaskRow::as_select()).into_boxed();
            if !query.include_inactive {
                statement = statement.filter(tasks::is_active.eq(true));
            }
            if let Some(frequency) = query.frequency {
                statement = statement.filter(tasks::frequency.eq(frequency.as_str()));
            }
            if let Some(pillar) = query.pillar {
                statement = statement.filter(tasks::pillar.eq(pillar.as_str()));
            }
            if let Some(category_id) = query.category_id {
                statement = statement.filter(tasks::category_id.eq(category_id.into_inner()));
            }
            statement
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let allocated_minutes = i32::try_from(task.allocated_minutes().value())
        .map_err(TaskRepositoryError::persistence)?;
    let placement = task.placement();

    Ok(TaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        pillar: placement.pillar.as_str().to_owned(),
        category_id: placement.category_id.into_inner(),
        sub_category_id: placement.sub_category_id.map(SubCategoryId::into_inner),
        allocated_minutes,
        frequency: task.frequency().as_str().to_owned(),
        is_active: task.is_active(),
        completed_at: task.completed_at(),
        na_marked_at: task.na_marked_at(),
        deleted_at: task.deleted_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        pillar,
        category_id,
        sub_category_id,
        allocated_minutes,
        frequency,
        is_active,
        completed_at,
        na_marked_at,
        deleted_at,
        created_at,
        updated_at,
    } = row;

    let pillar = Pillar::try_from(pillar.as_str()).map_err(TaskRepositoryError::persistence)?;
    let frequency =
        Frequency::try_from(frequency.as_str()).map_err(TaskRepositoryError::persistence)?;
    let minutes = u64::try_from(allocated_minutes).map_err(TaskRepositoryError::persistence)?;
    let allocated_minutes =
        AllocatedMinutes::new(minutes).map_err(TaskRepositoryError::persistence)?;
    let name = TaskName::new(name).map_err(TaskRepositoryError::persistence)?;

    let mut placement = TaskPlacement::new(pillar, CategoryId::from_uuid(category_id));
    if let Some(sub_category) = sub_category_id {
        placement = placement.with_sub_category(SubCategoryId::from_uuid(sub_category));
    }

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        placement,
        allocated_minutes,
        frequency,
        is_active,
        completed_at,
        na_marked_at,
        deleted_at,
        created_at,
        updated_at,
    }))
}
