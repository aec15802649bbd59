use crate::{
    entities::semesters,
    error::{ServiceError, StorageResultExt},
    services::support::{ensure_deletable, ensure_unique, fetch_page, find_required, sort_by},
};
use log::info;
use models::{academic::Term, integrity::Table, records::NewSemester};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait, Value, sea_query::Expr,
};

#[derive(Debug, Clone, Default)]
pub struct SemesterFilter {
    pub year: Option<i32>,
    pub term: Option<Term>,
    pub is_active: Option<bool>,
    /// `year` or `term`, `-` prefix for descending
    pub ordering: Option<String>,
}

pub struct SemesterService;

impl SemesterService {
    async fn check_unique(
        txn: &DatabaseTransaction,
        id: Option<i32>,
        input: &NewSemester,
    ) -> Result<(), ServiceError> {
        let mut same_term = semesters::Entity::find()
            .filter(semesters::Column::Year.eq(input.year))
            .filter(semesters::Column::Term.eq(input.term));
        if let Some(id) = id {
            same_term = same_term.filter(semesters::Column::Id.ne(id));
        }
        ensure_unique(
            same_term.count(txn).await?,
            Table::Semester,
            &["year", "term"],
        )
    }

    /// Clears the active flag on every row, locking each so that concurrent
    /// activations serialize
    async fn deactivate_all(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        semesters::Entity::update_many()
            .col_expr(semesters::Column::IsActive, Expr::value(false))
            .exec(txn)
            .await?;
        Ok(())
    }

    /// Creates a semester; creating it active deactivates every other one
    pub async fn create<C>(db: &C, input: NewSemester) -> Result<semesters::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        Self::check_unique(&txn, None, &input).await?;
        if input.is_active {
            Self::deactivate_all(&txn).await?;
        }
        let semester = semesters::ActiveModel {
            id: NotSet,
            year: Set(input.year),
            term: Set(input.term),
            is_active: Set(input.is_active),
        }
        .insert(&txn)
        .await
        .or_violation(Table::Semester)?;
        txn.commit().await?;

        info!("Created semester {}", semester.display());
        Ok(semester)
    }

    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewSemester,
    ) -> Result<semesters::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        find_required::<semesters::Entity, _>(&txn, Table::Semester, id).await?;
        Self::check_unique(&txn, Some(id), &input).await?;
        if input.is_active {
            Self::deactivate_all(&txn).await?;
        }
        let semester = semesters::ActiveModel {
            id: Unchanged(id),
            year: Set(input.year),
            term: Set(input.term),
            is_active: Set(input.is_active),
        }
        .update(&txn)
        .await
        .or_violation(Table::Semester)?;
        txn.commit().await?;

        Ok(semester)
    }

    /// Makes `id` the single active semester; the last activation to commit wins
    pub async fn activate<C>(db: &C, id: i32) -> Result<semesters::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        find_required::<semesters::Entity, _>(&txn, Table::Semester, id).await?;

        Self::deactivate_all(&txn).await?;
        let semester = semesters::ActiveModel {
            id: Unchanged(id),
            is_active: Set(true),
            ..Default::default()
        }
        .update(&txn)
        .await
        .or_violation(Table::Semester)?;
        txn.commit().await?;

        info!("Activated semester {}", semester.display());
        Ok(semester)
    }

    /// The currently active semester, if any
    pub async fn active<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Option<semesters::Model>, ServiceError> {
        Ok(semesters::Entity::find()
            .filter(semesters::Column::IsActive.eq(true))
            .one(db)
            .await?)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<semesters::Model, ServiceError> {
        find_required::<semesters::Entity, _>(db, Table::Semester, id).await
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &SemesterFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<semesters::Model>, u64), ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("year", Expr::col((semesters::Entity, semesters::Column::Year)).into()),
                ("term", Expr::col((semesters::Entity, semesters::Column::Term)).into()),
            ],
        )?;
        let mut query = match sort {
            Some(sort) => semesters::Entity::find().order_by(sort.expr, sort.order),
            None => semesters::Entity::find()
                .order_by_desc(semesters::Column::Year)
                .order_by_desc(semesters::Column::Term),
        }
        .order_by_asc(semesters::Column::Id);

        if let Some(year) = filter.year {
            query = query.filter(semesters::Column::Year.eq(year));
        }
        if let Some(term) = filter.term {
            query = query.filter(semesters::Column::Term.eq(term));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(semesters::Column::IsActive.eq(is_active));
        }

        Ok(fetch_page(db, query, page, per_page).await?)
    }

    /// Deletes a semester with no class schedules
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let semester = find_required::<semesters::Entity, _>(&txn, Table::Semester, id).await?;
        ensure_deletable(&txn, Table::Semester, Value::from(id)).await?;

        semesters::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Semester)?;
        txn.commit().await?;

        info!("Deleted semester {}", semester.display());
        Ok(())
    }
}
