use crate::{
    entities::faculties,
    error::{ServiceError, StorageResultExt},
    services::support::{
        ensure_deletable, ensure_unique, fetch_page, find_required, search_term, sort_by,
    },
};
use chrono::NaiveDate;
use log::info;
use models::{integrity::Table, records::NewFaculty};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, Value, sea_query::Expr,
};

#[derive(Debug, Clone, Default)]
pub struct FacultyFilter {
    /// Matches name or code
    pub search: Option<String>,
    /// `name` or `code`, `-` prefix for descending
    pub ordering: Option<String>,
}

pub struct FacultyService;

impl FacultyService {
    fn active_model(input: NewFaculty) -> faculties::ActiveModel {
        faculties::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            code: Set(input.code),
            established_on: Set(input.established_on),
            website: Set(input.website),
        }
    }

    pub async fn create<C>(
        db: &C,
        input: NewFaculty,
        today: NaiveDate,
    ) -> Result<faculties::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        ensure_unique(
            faculties::Entity::find()
                .filter(faculties::Column::Code.eq(input.code.as_str()))
                .count(&txn)
                .await?,
            Table::Faculty,
            &["code"],
        )?;
        let faculty = Self::active_model(input)
            .insert(&txn)
            .await
            .or_violation(Table::Faculty)?;
        txn.commit().await?;

        info!("Created faculty {} ({})", faculty.name, faculty.code);
        Ok(faculty)
    }

    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewFaculty,
        today: NaiveDate,
    ) -> Result<faculties::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        find_required::<faculties::Entity, _>(&txn, Table::Faculty, id).await?;
        ensure_unique(
            faculties::Entity::find()
                .filter(faculties::Column::Code.eq(input.code.as_str()))
                .filter(faculties::Column::Id.ne(id))
                .count(&txn)
                .await?,
            Table::Faculty,
            &["code"],
        )?;

        let mut faculty = Self::active_model(input);
        faculty.id = Unchanged(id);
        let faculty = faculty.update(&txn).await.or_violation(Table::Faculty)?;
        txn.commit().await?;

        Ok(faculty)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<faculties::Model, ServiceError> {
        find_required::<faculties::Entity, _>(db, Table::Faculty, id).await
    }

    /// Query faculties with pagination and search
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &FacultyFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<faculties::Model>, u64), ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("name", Expr::col((faculties::Entity, faculties::Column::Name)).into()),
                ("code", Expr::col((faculties::Entity, faculties::Column::Code)).into()),
            ],
        )?;
        let mut query = match sort {
            Some(sort) => faculties::Entity::find().order_by(sort.expr, sort.order),
            None => faculties::Entity::find().order_by_asc(faculties::Column::Name),
        }
        .order_by_asc(faculties::Column::Id);

        if let Some(search) = search_term(&filter.search) {
            query = query.filter(
                Condition::any()
                    .add(faculties::Column::Name.contains(&search))
                    .add(faculties::Column::Code.contains(&search)),
            );
        }

        Ok(fetch_page(db, query, page, per_page).await?)
    }

    /// Deletes a faculty that no department or professor belongs to
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let faculty = find_required::<faculties::Entity, _>(&txn, Table::Faculty, id).await?;
        ensure_deletable(&txn, Table::Faculty, Value::from(id)).await?;

        faculties::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Faculty)?;
        txn.commit().await?;

        info!("Deleted faculty {}", faculty.code);
        Ok(())
    }
}
