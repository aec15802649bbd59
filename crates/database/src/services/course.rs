use crate::{
    entities::{course_prerequisites, courses, departments},
    error::{ServiceError, StorageResultExt},
    services::{
        class_schedule::{ClassScheduleFilter, ClassScheduleRecord, ClassScheduleService},
        support::{
            ensure_deletable, ensure_reference, ensure_unique, fetch_page, find_required,
            search_term, sort_by,
        },
    },
};
use log::info;
use models::{integrity::Table, records::NewCourse};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait, Value, sea_query::Expr,
};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub department_id: Option<i32>,
    pub units: Option<i16>,
    /// Matches name or code
    pub search: Option<String>,
    /// `name` or `code`, `-` prefix for descending
    pub ordering: Option<String>,
}

/// A course with the courses it requires
#[derive(Debug, Clone)]
pub struct CourseRecord {
    pub course: courses::Model,
    pub prerequisites: Vec<courses::Model>,
}

pub struct CourseService;

impl CourseService {
    fn active_model(input: &NewCourse) -> courses::ActiveModel {
        courses::ActiveModel {
            id: NotSet,
            name: Set(input.name.clone()),
            code: Set(input.code.clone()),
            units: Set(input.units),
            department_id: Set(input.department_id),
        }
    }

    async fn check<C: ConnectionTrait>(
        db: &C,
        id: Option<i32>,
        input: &NewCourse,
    ) -> Result<(), ServiceError> {
        ensure_reference::<departments::Entity, _>(
            db,
            Table::Course,
            Table::Department,
            input.department_id,
        )
        .await?;

        let mut same_code =
            courses::Entity::find().filter(courses::Column::Code.eq(input.code.as_str()));
        if let Some(id) = id {
            same_code = same_code.filter(courses::Column::Id.ne(id));
        }
        ensure_unique(same_code.count(db).await?, Table::Course, &["code"])?;

        for &prerequisite_id in &input.prerequisites {
            ensure_reference::<courses::Entity, _>(
                db,
                Table::CoursePrerequisite,
                Table::Course,
                prerequisite_id,
            )
            .await?;
        }
        Ok(())
    }

    /// Replaces the prerequisite set of `course_id`
    async fn replace_prerequisites(
        txn: &DatabaseTransaction,
        course_id: i32,
        prerequisites: &[i32],
    ) -> Result<(), ServiceError> {
        course_prerequisites::Entity::delete_many()
            .filter(course_prerequisites::Column::CourseId.eq(course_id))
            .exec(txn)
            .await?;

        let prerequisites: BTreeSet<i32> = prerequisites.iter().copied().collect();
        if prerequisites.is_empty() {
            return Ok(());
        }

        let links = prerequisites
            .into_iter()
            .map(|prerequisite_id| course_prerequisites::ActiveModel {
                id: NotSet,
                course_id: Set(course_id),
                prerequisite_id: Set(prerequisite_id),
            });
        course_prerequisites::Entity::insert_many(links)
            .exec(txn)
            .await
            .or_violation(Table::CoursePrerequisite)?;
        Ok(())
    }

    pub async fn create<C>(db: &C, input: NewCourse) -> Result<CourseRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        Self::check(&txn, None, &input).await?;
        let course = Self::active_model(&input)
            .insert(&txn)
            .await
            .or_violation(Table::Course)?;
        input
            .check_prerequisites(course.id)
            .map_err(|err| ServiceError::Validation(err.into()))?;
        Self::replace_prerequisites(&txn, course.id, &input.prerequisites).await?;
        let record = Self::load(&txn, course).await?;
        txn.commit().await?;

        info!("Created course {} ({})", record.course.name, record.course.code);
        Ok(record)
    }

    /// Replaces a course's attributes and its prerequisite set
    pub async fn update<C>(db: &C, id: i32, input: NewCourse) -> Result<CourseRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;
        input
            .check_prerequisites(id)
            .map_err(|err| ServiceError::Validation(err.into()))?;

        let txn = db.begin().await?;
        find_required::<courses::Entity, _>(&txn, Table::Course, id).await?;
        Self::check(&txn, Some(id), &input).await?;

        let mut course = Self::active_model(&input);
        course.id = Unchanged(id);
        let course = course.update(&txn).await.or_violation(Table::Course)?;
        Self::replace_prerequisites(&txn, id, &input.prerequisites).await?;
        let record = Self::load(&txn, course).await?;
        txn.commit().await?;

        Ok(record)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<CourseRecord, ServiceError> {
        let course = find_required::<courses::Entity, _>(db, Table::Course, id).await?;
        Self::load(db, course).await
    }

    /// Query courses with pagination, filtering and search
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &CourseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<CourseRecord>, u64), ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("name", Expr::col((courses::Entity, courses::Column::Name)).into()),
                ("code", Expr::col((courses::Entity, courses::Column::Code)).into()),
            ],
        )?;
        let mut query = match sort {
            Some(sort) => courses::Entity::find().order_by(sort.expr, sort.order),
            None => courses::Entity::find().order_by_asc(courses::Column::Code),
        }
        .order_by_asc(courses::Column::Id);

        if let Some(department_id) = filter.department_id {
            query = query.filter(courses::Column::DepartmentId.eq(department_id));
        }
        if let Some(units) = filter.units {
            query = query.filter(courses::Column::Units.eq(units));
        }
        if let Some(search) = search_term(&filter.search) {
            query = query.filter(
                Condition::any()
                    .add(courses::Column::Name.contains(&search))
                    .add(courses::Column::Code.contains(&search)),
            );
        }

        let (courses, total_items) = fetch_page(db, query, page, per_page).await?;
        let records = Self::with_prerequisites(db, courses).await?;
        Ok((records, total_items))
    }

    /// Class schedules offered for a course
    pub async fn classes<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<ClassScheduleRecord>, ServiceError> {
        find_required::<courses::Entity, _>(db, Table::Course, id).await?;
        let filter = ClassScheduleFilter {
            course_id: Some(id),
            ..Default::default()
        };
        ClassScheduleService::all(db, &filter).await
    }

    /// Deletes a course that has no class schedules; prerequisite and teaching
    /// links on either side go with it
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let course = find_required::<courses::Entity, _>(&txn, Table::Course, id).await?;
        ensure_deletable(&txn, Table::Course, Value::from(id)).await?;

        courses::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Course)?;
        txn.commit().await?;

        info!("Deleted course {}", course.code);
        Ok(())
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        course: courses::Model,
    ) -> Result<CourseRecord, ServiceError> {
        let id = course.id;
        Self::with_prerequisites(db, vec![course])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Table::Course, id))
    }

    async fn with_prerequisites<C: ConnectionTrait>(
        db: &C,
        courses: Vec<courses::Model>,
    ) -> Result<Vec<CourseRecord>, ServiceError> {
        if courses.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
        let links = course_prerequisites::Entity::find()
            .filter(course_prerequisites::Column::CourseId.is_in(ids))
            .all(db)
            .await?;

        let required_ids: BTreeSet<i32> = links.iter().map(|l| l.prerequisite_id).collect();
        let required: HashMap<i32, courses::Model> = if required_ids.is_empty() {
            HashMap::new()
        } else {
            courses::Entity::find()
                .filter(courses::Column::Id.is_in(required_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let mut by_course: HashMap<i32, Vec<courses::Model>> = HashMap::new();
        for link in links {
            if let Some(prerequisite) = required.get(&link.prerequisite_id) {
                by_course
                    .entry(link.course_id)
                    .or_default()
                    .push(prerequisite.clone());
            }
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let mut prerequisites = by_course.remove(&course.id).unwrap_or_default();
                prerequisites.sort_by(|a, b| a.code.cmp(&b.code));
                CourseRecord {
                    course,
                    prerequisites,
                }
            })
            .collect())
    }
}
