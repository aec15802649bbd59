use crate::{
    entities::{class_schedules, courses, people, professors, semesters},
    error::{ServiceError, StorageResultExt},
    services::{
        enrollment::{EnrollmentFilter, EnrollmentRecord, EnrollmentService},
        support::{
            ensure_deletable, ensure_reference, fetch_page, find_required, search_term, sort_by,
        },
    },
};
use log::info;
use models::{academic::Weekday, integrity::Table, records::NewClassSchedule};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, TransactionTrait, Value, sea_query::Expr,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ClassScheduleFilter {
    pub course_id: Option<i32>,
    pub professor_id: Option<i32>,
    pub semester_id: Option<i32>,
    pub day: Option<Weekday>,
    /// Matches course name or professor last name
    pub search: Option<String>,
    /// `course_name` or `start_time`, `-` prefix for descending
    pub ordering: Option<String>,
}

/// A class schedule with what it teaches, who teaches it and when
#[derive(Debug, Clone)]
pub struct ClassScheduleRecord {
    pub schedule: class_schedules::Model,
    pub course: courses::Model,
    pub professor_name: String,
    pub semester: semesters::Model,
}

pub struct ClassScheduleService;

impl ClassScheduleService {
    fn active_model(input: &NewClassSchedule) -> class_schedules::ActiveModel {
        class_schedules::ActiveModel {
            id: NotSet,
            course_id: Set(input.course_id),
            professor_id: Set(input.professor_id),
            semester_id: Set(input.semester_id),
            day: Set(input.day),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            capacity: Set(input.capacity),
        }
    }

    async fn check<C: ConnectionTrait>(db: &C, input: &NewClassSchedule) -> Result<(), ServiceError> {
        ensure_reference::<courses::Entity, _>(db, Table::ClassSchedule, Table::Course, input.course_id)
            .await?;
        ensure_reference::<professors::Entity, _>(
            db,
            Table::ClassSchedule,
            Table::Professor,
            input.professor_id,
        )
        .await?;
        ensure_reference::<semesters::Entity, _>(
            db,
            Table::ClassSchedule,
            Table::Semester,
            input.semester_id,
        )
        .await?;
        Ok(())
    }

    pub async fn create<C>(
        db: &C,
        input: NewClassSchedule,
    ) -> Result<ClassScheduleRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        Self::check(&txn, &input).await?;
        let schedule = Self::active_model(&input)
            .insert(&txn)
            .await
            .or_violation(Table::ClassSchedule)?;
        let record = Self::load(&txn, schedule).await?;
        txn.commit().await?;

        info!(
            "Scheduled {} on {} {}-{} in {}",
            record.course.code,
            record.schedule.day,
            record.schedule.start_time,
            record.schedule.end_time,
            record.semester.display()
        );
        Ok(record)
    }

    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewClassSchedule,
    ) -> Result<ClassScheduleRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        find_required::<class_schedules::Entity, _>(&txn, Table::ClassSchedule, id).await?;
        Self::check(&txn, &input).await?;

        let mut schedule = Self::active_model(&input);
        schedule.id = Unchanged(id);
        let schedule = schedule
            .update(&txn)
            .await
            .or_violation(Table::ClassSchedule)?;
        let record = Self::load(&txn, schedule).await?;
        txn.commit().await?;

        Ok(record)
    }

    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<ClassScheduleRecord, ServiceError> {
        let schedule =
            find_required::<class_schedules::Entity, _>(db, Table::ClassSchedule, id).await?;
        Self::load(db, schedule).await
    }

    fn query(
        filter: &ClassScheduleFilter,
    ) -> Result<Select<class_schedules::Entity>, ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("course_name", Expr::col((courses::Entity, courses::Column::Name)).into()),
                (
                    "start_time",
                    Expr::col((class_schedules::Entity, class_schedules::Column::StartTime)).into(),
                ),
            ],
        )?;
        let search = search_term(&filter.search);

        let mut query = class_schedules::Entity::find();
        if search.is_some() || sort.as_ref().is_some_and(|sort| sort.field == "course_name") {
            query = query.join(JoinType::InnerJoin, class_schedules::Relation::Course.def());
        }
        if let Some(search) = search {
            query = query
                .join(JoinType::InnerJoin, class_schedules::Relation::Professor.def())
                .join(JoinType::InnerJoin, professors::Relation::Person.def())
                .filter(
                    Condition::any()
                        .add(courses::Column::Name.contains(&search))
                        .add(people::Column::LastName.contains(&search)),
                );
        }
        query = match sort {
            Some(sort) => query.order_by(sort.expr, sort.order),
            None => query
                .order_by_asc(class_schedules::Column::SemesterId)
                .order_by_asc(class_schedules::Column::Day)
                .order_by_asc(class_schedules::Column::StartTime),
        }
        .order_by_asc(class_schedules::Column::Id);

        if let Some(course_id) = filter.course_id {
            query = query.filter(class_schedules::Column::CourseId.eq(course_id));
        }
        if let Some(professor_id) = filter.professor_id {
            query = query.filter(class_schedules::Column::ProfessorId.eq(professor_id));
        }
        if let Some(semester_id) = filter.semester_id {
            query = query.filter(class_schedules::Column::SemesterId.eq(semester_id));
        }
        if let Some(day) = filter.day {
            query = query.filter(class_schedules::Column::Day.eq(day));
        }
        Ok(query)
    }

    /// Query class schedules with pagination and filtering
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &ClassScheduleFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ClassScheduleRecord>, u64), ServiceError> {
        let (schedules, total_items) =
            fetch_page(db, Self::query(filter)?, page, per_page).await?;
        let records = Self::with_details(db, schedules).await?;
        Ok((records, total_items))
    }

    /// Every class schedule matching `filter`
    pub async fn all<C: ConnectionTrait>(
        db: &C,
        filter: &ClassScheduleFilter,
    ) -> Result<Vec<ClassScheduleRecord>, ServiceError> {
        let schedules = Self::query(filter)?.all(db).await?;
        Self::with_details(db, schedules).await
    }

    /// Students enrolled in a class schedule
    pub async fn enrollments<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<EnrollmentRecord>, ServiceError> {
        find_required::<class_schedules::Entity, _>(db, Table::ClassSchedule, id).await?;
        let filter = EnrollmentFilter {
            class_schedule_id: Some(id),
            ..Default::default()
        };
        EnrollmentService::all(db, &filter).await
    }

    /// Deletes a class schedule nobody is enrolled in
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        find_required::<class_schedules::Entity, _>(&txn, Table::ClassSchedule, id).await?;
        ensure_deletable(&txn, Table::ClassSchedule, Value::from(id)).await?;

        class_schedules::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::ClassSchedule)?;
        txn.commit().await?;

        info!("Deleted class schedule {id}");
        Ok(())
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        schedule: class_schedules::Model,
    ) -> Result<ClassScheduleRecord, ServiceError> {
        let id = schedule.id;
        Self::with_details(db, vec![schedule])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Table::ClassSchedule, id))
    }

    /// Attach course, professor name and semester using batched lookups
    pub(crate) async fn with_details<C: ConnectionTrait>(
        db: &C,
        schedules: Vec<class_schedules::Model>,
    ) -> Result<Vec<ClassScheduleRecord>, ServiceError> {
        if schedules.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<i32> = schedules.iter().map(|s| s.course_id).collect();
        let professor_ids: Vec<i32> = schedules.iter().map(|s| s.professor_id).collect();
        let semester_ids: Vec<i32> = schedules.iter().map(|s| s.semester_id).collect();

        let courses_by_id: HashMap<i32, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let semesters_by_id: HashMap<i32, semesters::Model> = semesters::Entity::find()
            .filter(semesters::Column::Id.is_in(semester_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let professor_names: HashMap<i32, String> = professors::Entity::find()
            .filter(professors::Column::Id.is_in(professor_ids))
            .find_also_related(people::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(professor, person)| person.map(|p| (professor.id, p.full_name())))
            .collect();

        Ok(schedules
            .into_iter()
            .filter_map(|schedule| {
                let course = courses_by_id.get(&schedule.course_id)?.clone();
                let semester = semesters_by_id.get(&schedule.semester_id)?.clone();
                let professor_name = professor_names.get(&schedule.professor_id)?.clone();
                Some(ClassScheduleRecord {
                    schedule,
                    course,
                    professor_name,
                    semester,
                })
            })
            .collect())
    }
}
