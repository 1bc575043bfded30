//! Derived, read-only views over the store: list filtering and sorting,
//! dashboard statistics and per-project counts.
//!
//! Nothing here is cached; every view is recomputed from the current
//! snapshot when asked for.

use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::clock::Today;
use crate::models::{Priority, Project, Status, Task, TaskStats};
use crate::repository::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Priority,
    DueDate,
    Title,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Priority => write!(f, "priority"),
            SortKey::DueDate => write!(f, "due-date"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid sort key: {0}")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(SortKey::Priority),
            "due" | "due-date" | "due_date" | "duedate" => Ok(SortKey::DueDate),
            "title" => Ok(SortKey::Title),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction of a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Priority,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selecting the active key flips the direction; a new key starts descending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Ascending order for `key`. Undated tasks sort before dated ones.
pub fn compare_tasks(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Priority => a.priority.weight().cmp(&b.priority.weight()),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Title => compare_titles(&a.title, &b.title),
    }
}

thread_local! {
    static TITLE_COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode collation (CLDR root order), so accents and case do not push a
/// title out of its alphabetical place. Lowercase sorts first on a case-only
/// difference.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR
        .with(|collator| collator.borrow_mut().collate(a, b))
        .then_with(|| b.cmp(a))
}

/// Stable in-place sort. Equal keys keep their relative order in both directions.
pub fn sort_tasks(tasks: &mut [&Task], sort: SortState) {
    tasks.sort_by(|a, b| {
        let ordering = compare_tasks(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Status and priority inclusion sets of a task list. A task is shown only
/// when both its status and its priority are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListFilter {
    pub statuses: BTreeSet<Status>,
    pub priorities: BTreeSet<Priority>,
}

impl Default for TaskListFilter {
    fn default() -> Self {
        Self {
            statuses: Status::ALL.into_iter().collect(),
            priorities: Priority::ALL.into_iter().collect(),
        }
    }
}

impl TaskListFilter {
    pub fn new(
        statuses: impl IntoIterator<Item = Status>,
        priorities: impl IntoIterator<Item = Priority>,
    ) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            priorities: priorities.into_iter().collect(),
        }
    }

    pub fn toggle_status(&mut self, status: Status) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        if !self.priorities.remove(&priority) {
            self.priorities.insert(priority);
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.statuses.contains(&task.status) && self.priorities.contains(&task.priority)
    }

    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Filter and sort settings of one task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListView {
    pub filter: TaskListFilter,
    pub sort: SortState,
}

impl TaskListView {
    pub fn render<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
        let mut visible = self.filter.apply(tasks);
        sort_tasks(&mut visible, self.sort);
        visible
    }
}

pub fn task_stats<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: &Today) -> TaskStats {
    let mut stats = TaskStats::default();
    for task in tasks {
        stats.total += 1;
        match task.status {
            Status::Todo => stats.todo += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Completed => stats.completed += 1,
        }
        if today.is_overdue(task) {
            stats.overdue += 1;
        }
    }
    stats
}

pub fn due_today<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: &Today) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|task| today.is_due_today(task))
        .collect()
}

/// Everything the dashboard shows, computed from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub stats: TaskStats,
    pub due_today: Vec<&'a Task>,
    pub overdue: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
}

impl Dashboard<'_> {
    pub fn completion_rate(&self) -> u32 {
        self.stats.completion_rate()
    }
}

pub fn dashboard<R: Repository>(repo: &R) -> Dashboard<'_> {
    let today = repo.today();
    Dashboard {
        stats: task_stats(repo.tasks(), &today),
        due_today: due_today(repo.tasks(), &today),
        overdue: repo.get_overdue_tasks(),
        in_progress: repo.get_tasks_by_status(Status::InProgress),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTaskCount<'a> {
    pub project: &'a Project,
    pub task_count: usize,
}

/// Projects in store order with the number of tasks each one owns.
pub fn project_task_counts<R: Repository>(repo: &R) -> Vec<ProjectTaskCount<'_>> {
    repo.projects()
        .iter()
        .map(|project| ProjectTaskCount {
            project,
            task_count: repo.get_tasks_by_project(&project.id).len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap()
    }

    fn task(id: &str, title: &str, priority: Priority, status: Status, due: Option<u32>) -> Task {
        Task {
            id: id.into(),
            title: title.to_string(),
            description: String::new(),
            priority,
            status,
            due_date: due.map(at),
            created_at: at(1),
            project_id: "project-1".into(),
            tags: vec![],
        }
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn today() -> Today {
        Today::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), Tz::UTC)
    }

    #[test]
    fn test_sort_toggle_semantics() {
        let mut sort = SortState::default();
        assert_eq!(sort, SortState::new(SortKey::Priority, SortDirection::Descending));

        sort.toggle(SortKey::Priority);
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.toggle(SortKey::Title);
        assert_eq!(sort, SortState::new(SortKey::Title, SortDirection::Descending));

        sort.toggle(SortKey::Title);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_priority_sort_is_stable_in_both_directions() {
        let tasks = vec![
            task("a", "A", Priority::Medium, Status::Todo, None),
            task("b", "B", Priority::High, Status::Todo, None),
            task("c", "C", Priority::Medium, Status::Todo, None),
            task("d", "D", Priority::Low, Status::Todo, None),
        ];

        let mut desc: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut desc, SortState::new(SortKey::Priority, SortDirection::Descending));
        assert_eq!(ids(&desc), ["b", "a", "c", "d"]);

        let mut asc: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut asc, SortState::new(SortKey::Priority, SortDirection::Ascending));
        assert_eq!(ids(&asc), ["d", "a", "c", "b"]);
    }

    #[rstest]
    #[case(SortDirection::Ascending, ["none1", "none2", "early", "late"])]
    #[case(SortDirection::Descending, ["late", "early", "none1", "none2"])]
    fn test_due_date_sort_places_undated_tasks(
        #[case] direction: SortDirection,
        #[case] expected: [&str; 4],
    ) {
        let tasks = vec![
            task("late", "Late", Priority::Low, Status::Todo, Some(20)),
            task("none1", "None", Priority::Low, Status::Todo, None),
            task("early", "Early", Priority::Low, Status::Todo, Some(3)),
            task("none2", "None", Priority::Low, Status::Todo, None),
        ];
        let mut tasks: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut tasks, SortState::new(SortKey::DueDate, direction));
        assert_eq!(ids(&tasks), expected);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let tasks = vec![
            task("1", "banana", Priority::Low, Status::Todo, None),
            task("2", "Apple", Priority::Low, Status::Todo, None),
            task("3", "apple", Priority::Low, Status::Todo, None),
            task("4", "Cherry", Priority::Low, Status::Todo, None),
        ];
        let mut tasks: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut tasks, SortState::new(SortKey::Title, SortDirection::Ascending));
        assert_eq!(ids(&tasks), ["3", "2", "1", "4"]);
    }

    #[test]
    fn test_title_sort_places_accented_titles_alphabetically() {
        let tasks = vec![
            task("1", "Zebra", Priority::Low, Status::Todo, None),
            task("2", "Éclair", Priority::Low, Status::Todo, None),
            task("3", "fig", Priority::Low, Status::Todo, None),
        ];
        let mut tasks: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut tasks, SortState::new(SortKey::Title, SortDirection::Ascending));
        assert_eq!(ids(&tasks), ["2", "3", "1"]);

        sort_tasks(&mut tasks, SortState::new(SortKey::Title, SortDirection::Descending));
        assert_eq!(ids(&tasks), ["1", "3", "2"]);
    }

    #[test]
    fn test_filter_toggles_and_intersects() {
        let tasks = vec![
            task("1", "t", Priority::High, Status::Todo, None),
            task("2", "t", Priority::Low, Status::Completed, None),
            task("3", "t", Priority::High, Status::Completed, None),
            task("4", "t", Priority::Medium, Status::InProgress, None),
        ];
        let mut filter = TaskListFilter::default();
        assert_eq!(filter.apply(&tasks).len(), 4);

        filter.toggle_status(Status::Todo);
        filter.toggle_status(Status::InProgress);
        assert_eq!(ids(&filter.apply(&tasks)), ["2", "3"]);

        filter.toggle_priority(Priority::Low);
        assert_eq!(ids(&filter.apply(&tasks)), ["3"]);

        filter.toggle_priority(Priority::Low);
        assert_eq!(ids(&filter.apply(&tasks)), ["2", "3"]);
    }

    #[test]
    fn test_list_view_filters_then_sorts() {
        let tasks = vec![
            task("a", "t", Priority::Low, Status::Todo, None),
            task("b", "t", Priority::High, Status::Completed, None),
            task("c", "t", Priority::High, Status::Todo, None),
        ];
        let view = TaskListView {
            filter: TaskListFilter::new([Status::Todo], Priority::ALL),
            sort: SortState::default(),
        };
        assert_eq!(ids(&view.render(&tasks)), ["c", "a"]);
    }

    #[test]
    fn test_task_stats_counts_by_status_and_overdue() {
        let tasks = vec![
            task("1", "t", Priority::Low, Status::Todo, Some(9)),
            task("2", "t", Priority::Low, Status::Completed, Some(1)),
            task("3", "t", Priority::Low, Status::InProgress, Some(10)),
            task("4", "t", Priority::Low, Status::Completed, None),
        ];
        let stats = task_stats(&tasks, &today());

        assert_eq!(
            stats,
            TaskStats {
                total: 4,
                completed: 2,
                in_progress: 1,
                todo: 1,
                overdue: 1,
            }
        );
        assert_eq!(stats.completion_rate(), 50);
        assert_eq!(stats.share_of(stats.overdue), 25);
    }

    #[test]
    fn test_empty_stats_have_zero_completion_rate() {
        let stats = task_stats(&Vec::<Task>::new(), &today());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate(), 0);
    }

    #[test]
    fn test_due_today_ignores_status() {
        let tasks = vec![
            task("1", "t", Priority::Low, Status::Completed, Some(10)),
            task("2", "t", Priority::Low, Status::Todo, Some(11)),
            task("3", "t", Priority::Low, Status::Todo, None),
        ];
        assert_eq!(ids(&due_today(&tasks, &today())), ["1"]);
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (
            0usize..3,
            0usize..3,
            proptest::option::of(1u32..28),
            "[a-zA-Z]{0,6}",
        )
            .prop_map(|(p, s, due, title)| {
                task("t", &title, Priority::ALL[p], Status::ALL[s], due)
            })
    }

    proptest! {
        #[test]
        fn prop_filter_keeps_relative_order(tasks in proptest::collection::vec(arb_task(), 0..20)) {
            let tasks: Vec<Task> = tasks
                .into_iter()
                .enumerate()
                .map(|(i, mut t)| { t.id = format!("task-{}", i).into(); t })
                .collect();
            let filter = TaskListFilter::new([Status::Completed], Priority::ALL);
            let kept = filter.apply(&tasks);

            let expected: Vec<&Task> = tasks.iter().filter(|t| t.status == Status::Completed).collect();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn prop_sort_is_a_stable_permutation(
            tasks in proptest::collection::vec(arb_task(), 0..20),
            key in prop_oneof![Just(SortKey::Priority), Just(SortKey::DueDate), Just(SortKey::Title)],
            ascending in any::<bool>(),
        ) {
            let tasks: Vec<Task> = tasks
                .into_iter()
                .enumerate()
                .map(|(i, mut t)| { t.id = format!("{:02}", i).into(); t })
                .collect();
            let direction = if ascending { SortDirection::Ascending } else { SortDirection::Descending };
            let mut sorted: Vec<&Task> = tasks.iter().collect();
            sort_tasks(&mut sorted, SortState::new(key, direction));

            prop_assert_eq!(sorted.len(), tasks.len());
            for pair in sorted.windows(2) {
                let ordering = compare_tasks(pair[0], pair[1], key);
                match direction {
                    SortDirection::Ascending => prop_assert_ne!(ordering, Ordering::Greater),
                    SortDirection::Descending => prop_assert_ne!(ordering, Ordering::Less),
                }
                if ordering == Ordering::Equal {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
