//! List query composition.
//!
//! Optional list parameters are turned into one immutable [`PostQuery`]: a predicate tree,
//! an ordering and a page window. Free-text search is an OR-group over title, body and
//! excerpt, ANDed with every other active predicate.

use std::cmp::Ordering;

use models::post::{sortable_fields, PostField};

use super::domain::{Post, PostListParams};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Fields matched by free-text search.
pub const SEARCH_FIELDS: [PostField; 3] = [PostField::Title, PostField::Body, PostField::Excerpt];

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
}

/// Composed predicate. An empty `And` matches everything, an empty `Or` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Eq(PostField, FilterValue),
    Contains(PostField, String),
}

impl Filter {
    pub fn match_all() -> Self { Filter::And(Vec::new()) }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Filter::And(parts) => parts.iter().all(|f| f.matches(post)),
            Filter::Or(parts) => parts.iter().any(|f| f.matches(post)),
            Filter::Eq(field, FilterValue::Bool(b)) => post.flag(*field) == Some(*b),
            Filter::Eq(field, FilterValue::Text(s)) => post.text(*field) == Some(s.as_str()),
            Filter::Contains(field, needle) => post.text(*field).is_some_and(|v| v.contains(needle.as_str())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `ASC`/`DESC`, case-insensitive; anything else is `DESC`.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_ascii_uppercase()) {
            Some(v) if v == "ASC" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: PostField,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self { Self { field: PostField::CreatedAt, order: SortOrder::Desc } }
}

impl Sort {
    /// Total order used by stores that sort in process. Ties fall back to `id` in the
    /// same direction; nulls sort last ascending and first descending.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let primary = match self.field {
            PostField::Id => a.id.cmp(&b.id),
            PostField::Published => a.published.cmp(&b.published),
            f => match (a.timestamp(f), b.timestamp(f)) {
                (None, None) if a.text(f).is_some() || b.text(f).is_some() => {
                    nulls_last(a.text(f), b.text(f))
                }
                (x, y) => nulls_last(x, y),
            },
        };
        let ord = primary.then_with(|| a.id.cmp(&b.id));
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Fully resolved list request understood by every store.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub filter: Filter,
    pub sort: Sort,
    pub pagination: Pagination,
}

impl PostQuery {
    pub fn offset(&self) -> u64 { self.pagination.offset() }
    pub fn limit(&self) -> u64 { self.pagination.limit }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve `sortBy` against the schema; unknown names fall back to `createdAt`.
pub fn resolve_sort_field(name: Option<&str>) -> PostField {
    name.map(str::trim)
        .and_then(|n| sortable_fields().find(|d| d.name == n))
        .map(|d| d.field)
        .unwrap_or(PostField::CreatedAt)
}

/// Build the composed query for a set of list parameters.
pub fn build_query(params: &PostListParams) -> Result<PostQuery, ServiceError> {
    let pagination = Pagination::from_params(params.page, params.limit)?;

    let mut predicates = Vec::new();
    if let Some(search) = non_blank(&params.search) {
        predicates.push(Filter::Or(
            SEARCH_FIELDS
                .iter()
                .map(|f| Filter::Contains(*f, search.to_string()))
                .collect(),
        ));
    }
    if let Some(published) = params.published {
        predicates.push(Filter::Eq(PostField::Published, FilterValue::Bool(published)));
    }
    if let Some(author) = non_blank(&params.author) {
        predicates.push(Filter::Eq(PostField::Author, FilterValue::Text(author.to_string())));
    }
    if let Some(tags) = non_blank(&params.tags) {
        predicates.push(Filter::Contains(PostField::Tags, tags.to_string()));
    }

    let sort = Sort {
        field: resolve_sort_field(params.sort_by.as_deref()),
        order: SortOrder::parse(params.sort_order.as_deref()),
    };

    Ok(PostQuery { filter: Filter::And(predicates), sort, pagination })
}
