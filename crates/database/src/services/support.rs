use crate::{entities, error::ServiceError};
use futures::future::BoxFuture;
use log::{debug, warn};
use models::{
    error::FieldError,
    integrity::{self, Table},
};
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, Order, PaginatorTrait, PrimaryKeyTrait, Select, Value,
    sea_query::{Alias, Asterisk, Expr, Func, Query, SimpleExpr},
};

/// The number of items per page when the caller does not say
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Upper bound on items per page
pub const MAX_PER_PAGE: u64 = 100;

/// Highest page number a list query will seek to
pub const MAX_PAGE: u64 = u32::MAX as u64;

/// Effective page size: zero falls back to the default, large values are capped
pub fn page_size(per_page: u64) -> u64 {
    match per_page {
        0 => DEFAULT_PER_PAGE,
        n => n.min(MAX_PER_PAGE),
    }
}

/// Effective 1-based page number
pub fn page_number(page: u64) -> u64 {
    page.clamp(1, MAX_PAGE)
}

/// Loads the row with primary key `id` or reports it missing
pub(crate) async fn find_required<E, C>(
    db: &C,
    entity: Table,
    id: i32,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(entity, id))
}

/// Resolves a reference held by a `child` record being written
pub(crate) async fn ensure_reference<E, C>(
    db: &C,
    child: Table,
    parent: Table,
    id: i32,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    match find_required::<E, C>(db, parent, id).await {
        Err(ServiceError::NotFound { .. }) => {
            warn!("Rejected {child} write: {parent} {id} does not exist");
            Err(ServiceError::reference(
                child,
                format!("{parent} {id} does not exist"),
            ))
        }
        other => other,
    }
}

/// Fails when a lookup for the same natural key already found rows
pub(crate) fn ensure_unique(
    existing: u64,
    entity: Table,
    fields: &[&str],
) -> Result<(), ServiceError> {
    if existing > 0 {
        warn!("Rejected {entity} write: duplicate {}", fields.join(", "));
        Err(ServiceError::duplicate(entity, fields))
    } else {
        Ok(())
    }
}

async fn count_rows<C: ConnectionTrait>(
    db: &C,
    table: Table,
    column: &str,
    key: Value,
) -> Result<u64, DbErr> {
    let query = Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(Alias::new(entities::table_name(table)))
        .and_where(Expr::col(Alias::new(column)).eq(key))
        .to_owned();

    let row = db.query_one(db.get_database_backend().build(&query)).await?;
    let count: i64 = match row {
        Some(row) => row.try_get_by_index(0)?,
        None => 0,
    };
    Ok(count.max(0) as u64)
}

async fn child_ids<C: ConnectionTrait>(
    db: &C,
    table: Table,
    column: &str,
    key: Value,
) -> Result<Vec<i32>, DbErr> {
    let query = Query::select()
        .column(Alias::new(entities::primary_key(table)))
        .from(Alias::new(entities::table_name(table)))
        .and_where(Expr::col(Alias::new(column)).eq(key))
        .to_owned();

    db.query_all(db.get_database_backend().build(&query))
        .await?
        .iter()
        .map(|row| row.try_get_by_index::<i32>(0))
        .collect()
}

/// Checks that deleting the `parent` row keyed by `key` breaks no restrict
/// relationship, including those of rows the delete would cascade to
pub(crate) fn ensure_deletable<'a, C: ConnectionTrait>(
    db: &'a C,
    parent: Table,
    key: Value,
) -> BoxFuture<'a, Result<(), ServiceError>> {
    Box::pin(async move {
        for relationship in integrity::restricting(parent) {
            let count = count_rows(db, relationship.child, relationship.column, key.clone()).await?;
            debug!(
                "{count} {} row(s) reference {parent} {key:?}",
                relationship.child
            );
            if count > 0 {
                warn!(
                    "Blocked delete of {parent} {key:?}: {count} {} row(s) depend on it",
                    relationship.child
                );
                return Err(ServiceError::reference(
                    parent,
                    format!(
                        "{count} {} record(s) still reference it",
                        relationship.child
                    ),
                ));
            }
        }

        for relationship in integrity::cascading(parent) {
            if integrity::restricting(relationship.child).next().is_none() {
                continue;
            }
            let ids = child_ids(db, relationship.child, relationship.column, key.clone()).await?;
            for id in ids {
                ensure_deletable(db, relationship.child, Value::from(id)).await?;
            }
        }

        Ok(())
    })
}

/// Fetches one 1-based page of `query` along with the total number of matches
pub(crate) async fn fetch_page<E, C>(
    db: &C,
    query: Select<E>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let total_items = query.clone().count(db).await?;
    let paginator = query.paginate(db, page_size(per_page));
    let items = paginator.fetch_page(page_number(page) - 1).await?; // SeaORM uses 0-based pages

    Ok((items, total_items))
}

/// A resolved `ordering` parameter
pub(crate) struct Sort {
    pub field: &'static str,
    pub expr: SimpleExpr,
    pub order: Order,
}

/// Resolves an `ordering` parameter such as `name` or `-hire_date` against
/// the sortable fields of a list
pub(crate) fn sort_by(
    ordering: &Option<String>,
    fields: Vec<(&'static str, SimpleExpr)>,
) -> Result<Option<Sort>, ServiceError> {
    let Some(requested) = search_term(ordering) else {
        return Ok(None);
    };
    let (name, order) = match requested.strip_prefix('-') {
        Some(name) => (name, Order::Desc),
        None => (requested.as_str(), Order::Asc),
    };

    let expected = fields
        .iter()
        .map(|(field, _)| *field)
        .collect::<Vec<_>>()
        .join(", ");
    match fields.into_iter().find(|(field, _)| *field == name) {
        Some((field, expr)) => Ok(Some(Sort { field, expr, order })),
        None => {
            warn!("Rejected list query: unknown ordering {requested:?}");
            Err(ServiceError::Validation(
                FieldError::format(
                    "ordering",
                    format!("one of {expected}, optionally prefixed with '-'"),
                )
                .into(),
            ))
        }
    }
}

/// Trimmed search term, or nothing when blank
pub(crate) fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<(&'static str, SimpleExpr)> {
        vec![
            ("name", Expr::col(Alias::new("name")).into()),
            ("code", Expr::col(Alias::new("code")).into()),
        ]
    }

    #[test]
    fn test_sort_by_parses_direction() {
        let sort = sort_by(&Some("-code".to_string()), fields())
            .unwrap()
            .unwrap();
        assert_eq!(sort.field, "code");
        assert_eq!(sort.order, Order::Desc);

        let sort = sort_by(&Some(" name ".to_string()), fields())
            .unwrap()
            .unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.order, Order::Asc);

        assert!(sort_by(&None, fields()).unwrap().is_none());
        assert!(sort_by(&Some(String::new()), fields()).unwrap().is_none());
    }

    #[test]
    fn test_sort_by_rejects_unknown_field() {
        match sort_by(&Some("-salary".to_string()), fields()) {
            Err(ServiceError::Validation(errors)) => assert!(errors.has_field("ordering")),
            other => panic!("expected validation error, got {:?}", other.map(|s| s.map(|s| s.field))),
        }
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(page_size(0), DEFAULT_PER_PAGE);
        assert_eq!(page_size(7), 7);
        assert_eq!(page_size(u64::MAX), MAX_PER_PAGE);
    }

    #[test]
    fn test_page_number_bounds() {
        assert_eq!(page_number(0), 1);
        assert_eq!(page_number(3), 3);
        assert_eq!(page_number(u64::MAX), MAX_PAGE);
        assert!(page_number(u64::MAX).checked_mul(MAX_PER_PAGE).is_some());
    }
}
