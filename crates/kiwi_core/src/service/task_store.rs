//! Task store: CRUD over the task collection plus display ordering.
//!
//! # Responsibility
//! - Own the in-memory task list loaded from the `tasks` blob.
//! - Assign fresh ids through the injected `IdGenerator`.
//! - Split and sort tasks for display.
//!
//! # Invariants
//! - Task ids are unique across the collection.
//! - The `tasks` blob is rewritten after every successful mutation.
//! - Pending tasks sort by due date ascending (dated before undated), then
//!   priority descending, then insertion order.

use crate::id::{IdGenerator, UuidIdGenerator};
use crate::model::task::{Priority, Task, TaskDraft};
use crate::service::StoreResult;
use crate::storage::{load_collection, save_collection, KvStore, TASKS_KEY};
use log::{debug, info};
use std::cmp::Ordering;

/// Tasks split for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskListing {
    /// Incomplete tasks in display order.
    pub pending: Vec<Task>,
    /// Completed tasks in insertion order.
    pub completed: Vec<Task>,
}

/// Owner of the task collection.
pub struct TaskStore<S: KvStore, G: IdGenerator = UuidIdGenerator> {
    store: S,
    ids: G,
    tasks: Vec<Task>,
    quick_add_priority: Priority,
}

impl<S: KvStore, G: IdGenerator> TaskStore<S, G> {
    /// Loads the task collection from `store`; unreadable blobs yield an
    /// empty list.
    pub fn load(store: S, ids: G) -> Self {
        let tasks = load_collection::<Task>(&store, TASKS_KEY);
        info!(
            "event=task_store_load module=task_store status=ok count={}",
            tasks.len()
        );
        Self {
            store,
            ids,
            tasks,
            quick_add_priority: Priority::QUICK_ADD,
        }
    }

    /// Overrides the priority used by `quick_add`.
    pub fn with_quick_add_priority(mut self, priority: Priority) -> Self {
        self.quick_add_priority = priority;
        self
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Titles of every task, in insertion order.
    pub fn titles(&self) -> Vec<String> {
        self.tasks.iter().map(|task| task.title.clone()).collect()
    }

    /// Creates an incomplete task with a fresh id and persists the collection.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the title is blank; nothing changes.
    /// - `StoreError::Storage` when the blob cannot be written.
    pub fn add(&mut self, draft: TaskDraft) -> StoreResult<Task> {
        let draft = draft.normalized()?;
        let task = Task::from_draft(self.fresh_id(), draft);
        self.tasks.push(task.clone());
        self.persist()?;
        info!(
            "event=task_add module=task_store status=ok task_id={} priority={}",
            task.id,
            task.priority.value()
        );
        Ok(task)
    }

    /// Adds a task from a bare title with empty notes and no due date.
    pub fn quick_add(&mut self, title: impl Into<String>) -> StoreResult<Task> {
        let draft = TaskDraft::new(title).priority(self.quick_add_priority);
        self.add(draft)
    }

    /// Overwrites title, notes, priority and due date of an existing task.
    ///
    /// Returns `Ok(false)` without touching storage when `id` is unknown.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> StoreResult<bool> {
        let draft = draft.normalized()?;
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_update module=task_store status=skip task_id={id} reason=not_found");
            return Ok(false);
        };
        task.apply(draft);
        self.persist()?;
        info!("event=task_update module=task_store status=ok task_id={id}");
        Ok(true)
    }

    /// Removes a task. Returns `Ok(false)` when `id` is unknown.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_delete module=task_store status=skip task_id={id} reason=not_found");
            return Ok(false);
        }
        self.persist()?;
        info!("event=task_delete module=task_store status=ok task_id={id}");
        Ok(true)
    }

    /// Flips the completed flag. Returns `Ok(false)` when `id` is unknown.
    pub fn toggle_completion(&mut self, id: &str) -> StoreResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=task_store status=skip task_id={id} reason=not_found");
            return Ok(false);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist()?;
        info!("event=task_toggle module=task_store status=ok task_id={id} completed={completed}");
        Ok(true)
    }

    /// Splits tasks into sorted pending and insertion-ordered completed lists.
    pub fn list_for_display(&self) -> TaskListing {
        let (mut pending, completed): (Vec<Task>, Vec<Task>) =
            self.tasks.iter().cloned().partition(|task| !task.completed);
        sort_for_display(&mut pending);
        TaskListing { pending, completed }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
            debug!("event=task_id module=task_store status=skip reason=collision");
        }
    }

    fn persist(&self) -> StoreResult<()> {
        save_collection(&self.store, TASKS_KEY, &self.tasks)?;
        Ok(())
    }
}

/// Stable in-place sort of pending tasks into display order.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(compare_for_display);
}

/// Display comparator for pending tasks.
///
/// Rules, in order:
/// - both dated with different dates: earlier date first;
/// - exactly one dated: the dated task first, whatever the priorities;
/// - otherwise: higher priority first.
pub fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(left), Some(right)) if left != right => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => b.priority.cmp(&a.priority),
    }
}
