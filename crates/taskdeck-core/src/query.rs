use crate::clock::Today;
use crate::models::{Priority, ProjectId, Status, TagId, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Filter(Filter),
    Not(Box<Query>),
    Binary {
        op: Operator,
        left: Box<Query>,
        right: Box<Query>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Project(ProjectId),
    Tag(TagId),
    Status(Status),
    Priority(Priority),
    Overdue,
    DueToday,
}

impl Filter {
    pub fn matches(&self, task: &Task, today: &Today) -> bool {
        match self {
            Filter::Project(project_id) => &task.project_id == project_id,
            Filter::Tag(tag_id) => task.has_tag(tag_id),
            Filter::Status(status) => task.status == *status,
            Filter::Priority(priority) => task.priority == *priority,
            Filter::Overdue => today.is_overdue(task),
            Filter::DueToday => today.is_due_today(task),
        }
    }
}

impl From<Filter> for Query {
    fn from(filter: Filter) -> Self {
        Query::Filter(filter)
    }
}

impl Query {
    pub fn and(self, other: impl Into<Query>) -> Query {
        Query::Binary {
            op: Operator::And,
            left: Box::new(self),
            right: Box::new(other.into()),
        }
    }

    pub fn or(self, other: impl Into<Query>) -> Query {
        Query::Binary {
            op: Operator::Or,
            left: Box::new(self),
            right: Box::new(other.into()),
        }
    }

    pub fn negate(self) -> Query {
        Query::Not(Box::new(self))
    }

    pub fn matches(&self, task: &Task, today: &Today) -> bool {
        match self {
            Query::Filter(filter) => filter.matches(task, today),
            Query::Not(inner) => !inner.matches(task, today),
            Query::Binary { op: Operator::And, left, right } => {
                left.matches(task, today) && right.matches(task, today)
            }
            Query::Binary { op: Operator::Or, left, right } => {
                left.matches(task, today) || right.matches(task, today)
            }
        }
    }
}
