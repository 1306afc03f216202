//! In-memory list window over paged task loads.
//!
//! A [`TaskWindow`] sits between the repository and a list surface. It
//! accumulates pages, applies the client-side date filter and guards
//! against stale page commits after a reset with a generation token.

use chrono::NaiveDate;
use pulse_core::entities::Task;
use pulse_core::time;

use crate::repos::task::TaskPage;

/// Client-side date filter: keeps tasks whose `start_time` contains the
/// `yyyy-MM-dd` rendering of `date`. Pure and idempotent; an empty result
/// is not an error.
#[must_use]
pub fn filter_by_date(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let key = time::date_key(date);
    tasks
        .iter()
        .filter(|task| task.start_time.contains(&key))
        .cloned()
        .collect()
}

/// Sliding window of loaded tasks behind one list surface.
///
/// Holds everything loaded so far, the visible (possibly filtered) subset,
/// the pagination cursor and an exhausted flag. The visible list is always
/// the filter applied to the loaded list; mutations keep that in sync.
#[derive(Debug, Default)]
pub struct TaskWindow {
    all_tasks: Vec<Task>,
    visible: Vec<Task>,
    filter: Option<NaiveDate>,
    cursor: Option<String>,
    exhausted: bool,
    generation: u64,
}

/// Permission to commit one fetched page, valid until the next
/// [`TaskWindow::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

impl TaskWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a load starting now. Fetch the page with the repository,
    /// then commit it with [`TaskWindow::apply_page`].
    #[must_use]
    pub const fn token(&self) -> LoadToken {
        LoadToken {
            generation: self.generation,
        }
    }

    /// Commit a fetched page. Returns `false` and changes nothing when the
    /// token is stale, meaning the window was reset after the load began.
    pub fn apply_page(&mut self, token: LoadToken, page: TaskPage) -> bool {
        if token.generation != self.generation {
            return false;
        }
        self.cursor = page.next_cursor;
        self.exhausted = self.cursor.is_none();
        self.all_tasks.extend(page.tasks);
        self.refresh_visible();
        true
    }

    /// Drop all loaded state and invalidate outstanding tokens. The active
    /// filter survives so a reload lands back on the same view.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.all_tasks.clear();
        self.visible.clear();
        self.cursor = None;
        self.exhausted = false;
    }

    pub fn set_filter(&mut self, date: NaiveDate) {
        self.filter = Some(date);
        self.refresh_visible();
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.refresh_visible();
    }

    /// Drop a deleted task from the window without a reload.
    pub fn remove(&mut self, id: &str) {
        self.all_tasks.retain(|task| task.id != id);
        self.visible.retain(|task| task.id != id);
    }

    /// Swap in an edited task without a reload. Unknown ids are ignored.
    pub fn replace(&mut self, task: Task) {
        if let Some(slot) = self.all_tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
            self.refresh_visible();
        }
    }

    fn refresh_visible(&mut self) {
        self.visible = match self.filter {
            Some(date) => filter_by_date(&self.all_tasks, date),
            None => self.all_tasks.clone(),
        };
    }

    /// Tasks the list surface should show right now.
    #[must_use]
    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    /// Everything loaded so far, unfiltered.
    #[must_use]
    pub fn loaded(&self) -> &[Task] {
        &self.all_tasks
    }

    /// Cursor for the next page load, `None` before the first page and
    /// after exhaustion.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Whether the last committed page reported no continuation.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub const fn filter(&self) -> Option<NaiveDate> {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn task(id: &str, start_time: &str) -> Task {
        Task {
            id: id.to_string(),
            user_id: "u@x.com".to_string(),
            description: format!("task {id}"),
            created_at: Utc::now(),
            start_time: start_time.to_string(),
            end_time: String::new(),
        }
    }

    fn page(tasks: Vec<Task>, next_cursor: Option<&str>) -> TaskPage {
        TaskPage {
            tasks,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    fn feb9() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
    }

    #[test]
    fn filter_matches_date_key_substring() {
        let tasks = vec![
            task("20260209001", "2026-02-09T09:00:00+00:00"),
            task("20260209002", "2026-02-10T09:00:00+00:00"),
            task("20260209003", ""),
        ];

        let filtered = filter_by_date(&tasks, feb9());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "20260209001");
    }

    #[test]
    fn filter_is_idempotent() {
        let tasks = vec![
            task("20260209001", "2026-02-09T09:00:00+00:00"),
            task("20260209002", "2026-02-11T09:00:00+00:00"),
        ];

        let once = filter_by_date(&tasks, feb9());
        let twice = filter_by_date(&once, feb9());
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_may_be_empty() {
        let tasks = vec![task("20260209001", "2026-02-09T09:00:00+00:00")];
        let filtered = filter_by_date(&tasks, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert!(filtered.is_empty());
    }

    #[test]
    fn pages_accumulate_and_track_the_cursor() {
        let mut window = TaskWindow::new();

        let token = window.token();
        assert!(window.apply_page(
            token,
            page(vec![task("20260209002", ""), task("20260209001", "")], Some("20260209001")),
        ));
        assert_eq!(window.cursor(), Some("20260209001"));
        assert!(!window.is_exhausted());

        let token = window.token();
        assert!(window.apply_page(token, page(vec![task("20260208001", "")], None)));
        assert_eq!(window.loaded().len(), 3);
        assert_eq!(window.cursor(), None);
        assert!(window.is_exhausted());
    }

    #[test]
    fn stale_pages_are_dropped_after_reset() {
        let mut window = TaskWindow::new();
        let token = window.token();

        window.reset();

        assert!(!window.apply_page(token, page(vec![task("20260209001", "")], None)));
        assert!(window.loaded().is_empty());
        assert!(!window.is_exhausted());
    }

    #[test]
    fn reset_keeps_the_filter() {
        let mut window = TaskWindow::new();
        window.set_filter(feb9());
        let token = window.token();
        window.apply_page(token, page(vec![task("20260209001", "2026-02-09T09:00:00+00:00")], None));

        window.reset();

        assert_eq!(window.filter(), Some(feb9()));
        assert!(window.visible().is_empty());
    }

    #[test]
    fn visible_is_always_the_filtered_view() {
        let mut window = TaskWindow::new();
        let token = window.token();
        window.apply_page(
            token,
            page(
                vec![
                    task("20260209002", "2026-02-09T11:00:00+00:00"),
                    task("20260209001", "2026-02-10T09:00:00+00:00"),
                ],
                None,
            ),
        );
        assert_eq!(window.visible().len(), 2);

        window.set_filter(feb9());
        assert_eq!(window.visible().len(), 1);
        assert_eq!(window.visible()[0].id, "20260209002");

        window.clear_filter();
        assert_eq!(window.visible().len(), 2);
    }

    #[test]
    fn remove_drops_from_both_views() {
        let mut window = TaskWindow::new();
        let token = window.token();
        window.apply_page(
            token,
            page(vec![task("20260209002", ""), task("20260209001", "")], None),
        );

        window.remove("20260209002");

        assert_eq!(window.loaded().len(), 1);
        assert_eq!(window.visible().len(), 1);
        assert_eq!(window.loaded()[0].id, "20260209001");
    }

    #[test]
    fn replace_swaps_the_edited_task_in_place() {
        let mut window = TaskWindow::new();
        let token = window.token();
        window.apply_page(token, page(vec![task("20260209001", "")], None));

        let mut edited = task("20260209001", "2026-02-09T09:00:00+00:00");
        edited.description = "edited".to_string();
        window.replace(edited);

        assert_eq!(window.loaded()[0].description, "edited");

        // Unknown ids are a no-op.
        window.replace(task("20990101001", ""));
        assert_eq!(window.loaded().len(), 1);
    }

    #[test]
    fn replace_respects_the_active_filter() {
        let mut window = TaskWindow::new();
        window.set_filter(feb9());
        let token = window.token();
        window.apply_page(
            token,
            page(vec![task("20260209001", "2026-02-09T09:00:00+00:00")], None),
        );
        assert_eq!(window.visible().len(), 1);

        // Moving the task off the filtered date hides it.
        window.replace(task("20260209001", "2026-02-10T09:00:00+00:00"));
        assert!(window.visible().is_empty());
        assert_eq!(window.loaded().len(), 1);
    }
}
