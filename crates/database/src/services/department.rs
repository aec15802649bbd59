use crate::{
    entities::{departments, faculties},
    error::{ServiceError, StorageResultExt},
    services::support::{
        ensure_deletable, ensure_reference, ensure_unique, fetch_page, find_required, search_term,
    },
};
use chrono::NaiveDate;
use log::info;
use models::{integrity::Table, records::NewDepartment};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, Value,
};

#[derive(Debug, Clone, Default)]
pub struct DepartmentFilter {
    pub faculty_id: Option<i32>,
    /// Matches name or code
    pub search: Option<String>,
}

pub struct DepartmentService;

impl DepartmentService {
    fn active_model(input: NewDepartment) -> departments::ActiveModel {
        departments::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            code: Set(input.code),
            faculty_id: Set(input.faculty_id),
            established_on: Set(input.established_on),
        }
    }

    async fn check<C: ConnectionTrait>(
        db: &C,
        id: Option<i32>,
        input: &NewDepartment,
    ) -> Result<(), ServiceError> {
        ensure_reference::<faculties::Entity, _>(
            db,
            Table::Department,
            Table::Faculty,
            input.faculty_id,
        )
        .await?;

        let mut same_code =
            departments::Entity::find().filter(departments::Column::Code.eq(input.code.as_str()));
        if let Some(id) = id {
            same_code = same_code.filter(departments::Column::Id.ne(id));
        }
        ensure_unique(same_code.count(db).await?, Table::Department, &["code"])
    }

    pub async fn create<C>(
        db: &C,
        input: NewDepartment,
        today: NaiveDate,
    ) -> Result<departments::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        Self::check(&txn, None, &input).await?;
        let department = Self::active_model(input)
            .insert(&txn)
            .await
            .or_violation(Table::Department)?;
        txn.commit().await?;

        info!("Created department {} ({})", department.name, department.code);
        Ok(department)
    }

    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewDepartment,
        today: NaiveDate,
    ) -> Result<departments::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        find_required::<departments::Entity, _>(&txn, Table::Department, id).await?;
        Self::check(&txn, Some(id), &input).await?;

        let mut department = Self::active_model(input);
        department.id = Unchanged(id);
        let department = department
            .update(&txn)
            .await
            .or_violation(Table::Department)?;
        txn.commit().await?;

        Ok(department)
    }

    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<departments::Model, ServiceError> {
        find_required::<departments::Entity, _>(db, Table::Department, id).await
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &DepartmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<departments::Model>, u64), ServiceError> {
        let mut query = departments::Entity::find().order_by_asc(departments::Column::Name);

        if let Some(faculty_id) = filter.faculty_id {
            query = query.filter(departments::Column::FacultyId.eq(faculty_id));
        }

        if let Some(search) = search_term(&filter.search) {
            query = query.filter(
                Condition::any()
                    .add(departments::Column::Name.contains(&search))
                    .add(departments::Column::Code.contains(&search)),
            );
        }

        Ok(fetch_page(db, query, page, per_page).await?)
    }

    /// Deletes a department with no courses or students; professor links go with it
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let department =
            find_required::<departments::Entity, _>(&txn, Table::Department, id).await?;
        ensure_deletable(&txn, Table::Department, Value::from(id)).await?;

        departments::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Department)?;
        txn.commit().await?;

        info!("Deleted department {}", department.code);
        Ok(())
    }
}
