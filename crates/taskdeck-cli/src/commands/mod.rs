use taskdeck_core::clock::{Clock, Today};
use taskdeck_core::repository::{InMemoryRepository, Repository};
use taskdeck_core::view::{SortState, TaskListFilter, TaskListView};

use crate::cli::ListOptions;
use crate::config::Config;
use crate::views::table::TableContext;

pub mod dashboard;
pub mod list;
pub mod project;
pub mod shell;
pub mod tags;

/// The store plus the settings every command renders with.
pub struct Session<C: Clock> {
    pub repo: InMemoryRepository<C>,
    pub config: Config,
}

impl<C: Clock> Session<C> {
    pub fn new(repo: InMemoryRepository<C>, config: Config) -> Self {
        Self { repo, config }
    }

    /// Command-line options win; anything unset falls back to `[list]` config.
    pub fn list_view(&self, options: &ListOptions) -> TaskListView {
        let defaults = &self.config.list;
        let filter = TaskListFilter::new(
            if options.statuses.is_empty() {
                defaults.statuses.clone()
            } else {
                options.statuses.clone()
            },
            if options.priorities.is_empty() {
                defaults.priorities.clone()
            } else {
                options.priorities.clone()
            },
        );
        let sort = SortState::new(
            options.sort.unwrap_or(defaults.sort),
            options.direction().unwrap_or(defaults.direction),
        );
        TaskListView { filter, sort }
    }

    pub fn today(&self) -> Today {
        self.repo.today()
    }

    pub fn table_context<'a>(&self, today: &'a Today) -> TableContext<'a> {
        TableContext {
            today,
            now: self.repo.clock().now(),
            title_width: self.config.list.title_width,
        }
    }
}
