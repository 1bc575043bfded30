use std::str::FromStr;

use pest::iterators::Pairs;
use pest::pratt_parser::PrattParser;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use taskdeck_core::models::{Priority, ProjectId, Status, TagId};
use taskdeck_core::query::{Filter, Operator, Query};

#[derive(Parser)]
#[grammar = "filter.pest"]
pub struct FilterParser;

lazy_static::lazy_static! {
    static ref PRATT_PARSER: PrattParser<Rule> = {
        use pest::pratt_parser::{Assoc::*, Op};
        use Rule::*;

        PrattParser::new()
            .op(Op::infix(or, Left))
            .op(Op::infix(and, Left))
            .op(Op::prefix(not))
    };
}

#[derive(Error, Debug)]
pub enum QueryParseError {
    #[error("Query syntax error: {0}")]
    Pest(#[from] Box<pest::error::Error<Rule>>),
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),
    #[error("Unknown rule: {0:?}")]
    UnknownRule(Rule),
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),
    #[error("Invalid priority value: {0}")]
    InvalidPriority(String),
}

fn build_filter(key: &str, value: &str) -> Result<Filter, QueryParseError> {
    let filter = match key.to_lowercase().as_str() {
        "project" => Filter::Project(ProjectId::from(value)),
        "tag" => Filter::Tag(TagId::from(value)),
        "status" => Filter::Status(
            Status::from_str(value).map_err(|_| QueryParseError::InvalidStatus(value.to_string()))?,
        ),
        "priority" => Filter::Priority(
            Priority::from_str(value)
                .map_err(|_| QueryParseError::InvalidPriority(value.to_string()))?,
        ),
        other => {
            return Err(QueryParseError::InvalidFilter(format!(
                "Unknown filter key: {}",
                other
            )))
        }
    };
    Ok(filter)
}

fn build_ast(pairs: Pairs<Rule>) -> Result<Query, QueryParseError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::filter_expression => {
                let text = primary.as_str();
                let mut inner = primary.into_inner();
                let (Some(key), Some(value)) = (inner.next(), inner.next()) else {
                    return Err(QueryParseError::InvalidFilter(text.to_string()));
                };
                let value = value.as_str().trim_matches('"');
                Ok(Query::Filter(build_filter(key.as_str(), value)?))
            }
            Rule::keyword => match primary.as_str().to_lowercase().as_str() {
                "overdue" => Ok(Query::Filter(Filter::Overdue)),
                "today" => Ok(Query::Filter(Filter::DueToday)),
                other => Err(QueryParseError::InvalidFilter(other.to_string())),
            },
            Rule::expression => build_ast(primary.into_inner()),
            rule => Err(QueryParseError::UnknownRule(rule)),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            Rule::not => Ok(rhs?.negate()),
            rule => Err(QueryParseError::UnknownRule(rule)),
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::and => Operator::And,
                Rule::or => Operator::Or,
                rule => return Err(QueryParseError::UnknownRule(rule)),
            };
            Ok(Query::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pairs)
}

/// Parses a filter query. A blank query yields `None` (match everything).
pub fn parse_query(input: &str) -> Result<Option<Query>, QueryParseError> {
    let mut pairs = FilterParser::parse(Rule::filter_query, input).map_err(Box::new)?;
    let expression = pairs
        .next()
        .into_iter()
        .flat_map(|query| query.into_inner())
        .find(|pair| pair.as_rule() == Rule::expression);

    expression.map(|expr| build_ast(expr.into_inner())).transpose()
}
