//! Task repository: date-keyed id allocation, CRUD and cursor pagination.

use chrono::{DateTime, NaiveDate, Utc};
use pulse_core::entities::Task;
use pulse_core::time;

use crate::error::StoreError;
use crate::helpers::parse_created_at;
use crate::service::TaskService;

/// Fixed page size for [`TaskService::load_tasks`].
pub const PAGE_SIZE: usize = 50;

const SELECT_COLS: &str = "id, user_id, description, timestamp, start_time, end_time";

/// Atomic per-date counter statement. The insert arm lazily seeds the
/// counter from the highest id suffix already stored for the date, so
/// allocation continues where pre-counter data left off instead of
/// restarting at 001.
const NEXT_SEQUENCE_SQL: &str = "\
INSERT INTO task_sequences (day, last_seq)
VALUES (?1, COALESCE((SELECT MAX(CAST(substr(id, 9) AS INTEGER)) FROM tasks WHERE id LIKE ?1 || '%'), 0) + 1)
ON CONFLICT(day) DO UPDATE SET last_seq = last_seq + 1
RETURNING last_seq";

/// One page of tasks plus the continuation cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// At most [`PAGE_SIZE`] tasks, newest id first.
    pub tasks: Vec<Task>,
    /// Cursor for the next call. `None` means the listing is exhausted.
    pub next_cursor: Option<String>,
}

fn row_to_task(row: &libsql::Row) -> Result<Task, StoreError> {
    Ok(Task {
        id: row.get(0).map_err(bad_column)?,
        user_id: row.get(1).map_err(bad_column)?,
        description: row.get(2).map_err(bad_column)?,
        created_at: parse_created_at(&row.get::<String>(3).map_err(bad_column)?)?,
        start_time: row.get(4).map_err(bad_column)?,
        end_time: row.get(5).map_err(bad_column)?,
    })
}

fn bad_column(e: libsql::Error) -> StoreError {
    StoreError::InvalidData(e.to_string())
}

/// Validate the optional time-range fields. Each must be empty or parse as
/// a task time; when both are set, the end must be strictly after the
/// start. This is the only place the end-after-start rule runs.
fn validate_time_fields(start_time: &str, end_time: &str) -> Result<(), StoreError> {
    let start = parse_time_field("start time", start_time)?;
    let end = parse_time_field("end time", end_time)?;
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(StoreError::InvalidData(
                "End time must be after start time".into(),
            ));
        }
    }
    Ok(())
}

fn parse_time_field(label: &str, value: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
    if value.is_empty() {
        return Ok(None);
    }
    time::parse_flexible(value)
        .map(Some)
        .ok_or_else(|| StoreError::InvalidData(format!("Unrecognized {label} '{value}'")))
}

impl TaskService {
    /// Allocate the next task id for the given calendar date.
    ///
    /// Ids are an 8-digit `yyyyMMdd` prefix plus a zero-padded sequence
    /// starting at `001`. Sequences past 999 widen by a digit; the id stays
    /// unique, the newest-first sort just degrades for that date.
    ///
    /// # Errors
    ///
    /// Failures surface as [`StoreError::Add`]; allocation runs as the
    /// first step of task creation.
    pub async fn allocate_task_id(&self, date: NaiveDate) -> Result<String, StoreError> {
        let prefix = time::day_prefix(date);
        let seq = self.next_sequence(&prefix).await?;
        Ok(format!("{prefix}{seq:03}"))
    }

    async fn next_sequence(&self, day: &str) -> Result<i64, StoreError> {
        let add = |e: libsql::Error| StoreError::Add(e.to_string());
        let mut rows = self
            .db()
            .conn()
            .query(NEXT_SEQUENCE_SQL, [day])
            .await
            .map_err(add)?;
        let row = rows
            .next()
            .await
            .map_err(add)?
            .ok_or_else(|| StoreError::Add("sequence counter returned no row".into()))?;
        row.get::<i64>(0).map_err(add)
    }

    /// Create a task owned by `owner`.
    ///
    /// The description is stored trimmed and must be non-empty. Time fields
    /// go through [`validate_time_fields`] before anything is written. The
    /// id's date prefix always comes from the current UTC date, not from
    /// the task's start time.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidData`] when validation fails,
    /// [`StoreError::Add`] when allocation or the insert fails.
    pub async fn create_task(
        &self,
        description: &str,
        start_time: &str,
        end_time: &str,
        owner: &str,
    ) -> Result<Task, StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::InvalidData(
                "Description cannot be empty".into(),
            ));
        }
        validate_time_fields(start_time, end_time)?;

        let now = Utc::now();
        let id = self.allocate_task_id(now.date_naive()).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO tasks ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    owner,
                    description,
                    now.to_rfc3339(),
                    start_time,
                    end_time
                ],
            )
            .await
            .map_err(|e| StoreError::Add(e.to_string()))?;

        Ok(Task {
            id,
            user_id: owner.to_string(),
            description: description.to_string(),
            created_at: now,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        })
    }

    /// Fetch a single task by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::TaskNotFound`] when no row matches,
    /// [`StoreError::Load`] when the query fails.
    pub async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await
            .map_err(|e| StoreError::Load(e.to_string()))?;
        let row = rows
            .next()
            .await
            .map_err(|e| StoreError::Load(e.to_string()))?
            .ok_or(StoreError::TaskNotFound)?;
        row_to_task(&row)
    }

    /// Patch a task's editable fields by id.
    ///
    /// The owner and the creation timestamp are immutable; only the
    /// description and time fields change. Validation matches
    /// [`TaskService::create_task`].
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidData`] when validation fails,
    /// [`StoreError::TaskNotFound`] when no row matches,
    /// [`StoreError::Update`] when the write fails.
    pub async fn update_task(
        &self,
        id: &str,
        description: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<(), StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::InvalidData(
                "Description cannot be empty".into(),
            ));
        }
        validate_time_fields(start_time, end_time)?;

        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET description = ?1, start_time = ?2, end_time = ?3 WHERE id = ?4",
                libsql::params![description, start_time, end_time, id],
            )
            .await
            .map_err(|e| StoreError::Update(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::TaskNotFound);
        }
        Ok(())
    }

    /// Delete a task by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::TaskNotFound`] when no row matches,
    /// [`StoreError::Delete`] when the write fails.
    pub async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::TaskNotFound);
        }
        Ok(())
    }

    /// Load one page of tasks for `owner`, newest id first.
    ///
    /// Fetches one row past [`PAGE_SIZE`] as a probe; when it comes back
    /// the page is full and `next_cursor` carries the last returned id for
    /// the following call. Pass `None` for the first page. Rows that fail
    /// to decode are skipped with a warning instead of failing the page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] when the query fails.
    pub async fn load_tasks(
        &self,
        owner: &str,
        cursor: Option<&str>,
    ) -> Result<TaskPage, StoreError> {
        let probe_limit = PAGE_SIZE + 1;
        let load = |e: libsql::Error| StoreError::Load(e.to_string());

        let mut rows = match cursor {
            Some(cursor) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM tasks \
                             WHERE user_id = ?1 AND id < ?2 \
                             ORDER BY id DESC LIMIT {probe_limit}"
                        ),
                        libsql::params![owner, cursor],
                    )
                    .await
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM tasks \
                             WHERE user_id = ?1 \
                             ORDER BY id DESC LIMIT {probe_limit}"
                        ),
                        [owner],
                    )
                    .await
            }
        }
        .map_err(load)?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await.map_err(load)? {
            match row_to_task(&row) {
                Ok(task) => tasks.push(task),
                Err(error) => tracing::warn!(%error, "skipping undecodable task row"),
            }
        }

        let next_cursor = if tasks.len() > PAGE_SIZE {
            tasks.truncate(PAGE_SIZE);
            tasks.last().map(|task| task.id.clone())
        } else {
            None
        };

        Ok(TaskPage { tasks, next_cursor })
    }
}
