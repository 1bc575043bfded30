use anyhow::{anyhow, Result};
use taskdeck_core::error::CoreError;
use taskdeck_core::models::{Project, ProjectId, TagId};
use taskdeck_core::query::{Filter, Query};
use taskdeck_core::repository::Repository;

/// Finds a project by exact id, falling back to a case-insensitive name match.
pub fn resolve_project<'a>(repo: &'a impl Repository, input: &str) -> Result<&'a Project> {
    let input = input.trim();
    if let Some(project) = repo.get_project(&ProjectId::from(input)) {
        return Ok(project);
    }

    let matches: Vec<&Project> = repo
        .projects()
        .iter()
        .filter(|p| p.name.eq_ignore_ascii_case(input))
        .collect();
    match matches.as_slice() {
        [project] => Ok(*project),
        [] => Err(anyhow!(CoreError::NotFound(format!(
            "No project found with ID or name '{}'",
            input
        )))),
        several => Err(anyhow!(CoreError::InvalidInput(format!(
            "Project name '{}' is ambiguous; use one of the IDs: {}",
            input,
            several
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )))),
    }
}

/// Rewrites `project:` and `tag:` values given as names into ids, so queries
/// can say `project:Work` as well as `project:project-2`.
pub fn resolve_query_names(query: Query, repo: &impl Repository) -> Query {
    match query {
        Query::Filter(Filter::Project(id)) if repo.get_project(&id).is_none() => {
            let id = repo
                .projects()
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(id.as_str()))
                .map(|p| p.id.clone())
                .unwrap_or(id);
            Query::Filter(Filter::Project(id))
        }
        Query::Filter(Filter::Tag(id)) if repo.get_tag(&id).is_none() => {
            let id: TagId = repo
                .tags()
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(id.as_str()))
                .map(|t| t.id.clone())
                .unwrap_or(id);
            Query::Filter(Filter::Tag(id))
        }
        Query::Not(inner) => resolve_query_names(*inner, repo).negate(),
        Query::Binary { op, left, right } => Query::Binary {
            op,
            left: Box::new(resolve_query_names(*left, repo)),
            right: Box::new(resolve_query_names(*right, repo)),
        },
        other => other,
    }
}
