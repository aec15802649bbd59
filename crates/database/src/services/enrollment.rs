use crate::{
    entities::{class_schedules, enrollments, people, students},
    error::{ServiceError, StorageResultExt},
    services::{
        class_schedule::{ClassScheduleRecord, ClassScheduleService},
        support::{ensure_reference, ensure_unique, fetch_page, find_required, sort_by},
    },
};
use chrono::Utc;
use log::info;
use models::{
    integrity::Table,
    records::{GradeUpdate, NewEnrollment},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    TransactionTrait, sea_query::Expr,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    pub student_id: Option<i32>,
    pub class_schedule_id: Option<i32>,
    pub grade: Option<f64>,
    /// `enrolled_at` or `grade`, `-` prefix for descending
    pub ordering: Option<String>,
}

/// An enrollment with the student and the class it is for
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub enrollment: enrollments::Model,
    pub student: students::Model,
    pub student_name: String,
    pub class: ClassScheduleRecord,
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a class schedule, at most once per class
    pub async fn create<C>(db: &C, input: NewEnrollment) -> Result<EnrollmentRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        ensure_reference::<students::Entity, _>(
            &txn,
            Table::Enrollment,
            Table::Student,
            input.student_id,
        )
        .await?;
        ensure_reference::<class_schedules::Entity, _>(
            &txn,
            Table::Enrollment,
            Table::ClassSchedule,
            input.class_schedule_id,
        )
        .await?;
        ensure_unique(
            enrollments::Entity::find()
                .filter(enrollments::Column::StudentId.eq(input.student_id))
                .filter(enrollments::Column::ClassScheduleId.eq(input.class_schedule_id))
                .count(&txn)
                .await?,
            Table::Enrollment,
            &["student_id", "class_schedule_id"],
        )?;

        let enrollment = enrollments::ActiveModel {
            id: NotSet,
            student_id: Set(input.student_id),
            class_schedule_id: Set(input.class_schedule_id),
            grade: Set(input.grade),
            enrolled_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await
        .or_violation(Table::Enrollment)?;
        let record = Self::load(&txn, enrollment).await?;
        txn.commit().await?;

        info!(
            "Enrolled {} in {} ({})",
            record.student.student_number,
            record.class.course.code,
            record.class.semester.display()
        );
        Ok(record)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<EnrollmentRecord, ServiceError> {
        let enrollment = find_required::<enrollments::Entity, _>(db, Table::Enrollment, id).await?;
        Self::load(db, enrollment).await
    }

    fn query(filter: &EnrollmentFilter) -> Result<Select<enrollments::Entity>, ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                (
                    "enrolled_at",
                    Expr::col((enrollments::Entity, enrollments::Column::EnrolledAt)).into(),
                ),
                ("grade", Expr::col((enrollments::Entity, enrollments::Column::Grade)).into()),
            ],
        )?;
        let mut query = match sort {
            Some(sort) => enrollments::Entity::find().order_by(sort.expr, sort.order),
            None => enrollments::Entity::find(),
        }
        .order_by_asc(enrollments::Column::Id);

        if let Some(student_id) = filter.student_id {
            query = query.filter(enrollments::Column::StudentId.eq(student_id));
        }
        if let Some(class_schedule_id) = filter.class_schedule_id {
            query = query.filter(enrollments::Column::ClassScheduleId.eq(class_schedule_id));
        }
        if let Some(grade) = filter.grade {
            query = query.filter(enrollments::Column::Grade.eq(grade));
        }
        Ok(query)
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &EnrollmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<EnrollmentRecord>, u64), ServiceError> {
        let (enrollments, total_items) =
            fetch_page(db, Self::query(filter)?, page, per_page).await?;
        let records = Self::with_details(db, enrollments).await?;
        Ok((records, total_items))
    }

    /// Every enrollment matching `filter`
    pub async fn all<C: ConnectionTrait>(
        db: &C,
        filter: &EnrollmentFilter,
    ) -> Result<Vec<EnrollmentRecord>, ServiceError> {
        let enrollments = Self::query(filter)?.all(db).await?;
        Self::with_details(db, enrollments).await
    }

    pub async fn for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> Result<Vec<EnrollmentRecord>, ServiceError> {
        let filter = EnrollmentFilter {
            student_id: Some(student_id),
            ..Default::default()
        };
        Self::all(db, &filter).await
    }

    /// Sets or clears the grade; `None` means not yet graded
    pub async fn update_grade<C>(
        db: &C,
        id: i32,
        input: GradeUpdate,
    ) -> Result<EnrollmentRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        find_required::<enrollments::Entity, _>(&txn, Table::Enrollment, id).await?;
        let enrollment = enrollments::ActiveModel {
            id: Unchanged(id),
            grade: Set(input.grade),
            ..Default::default()
        }
        .update(&txn)
        .await
        .or_violation(Table::Enrollment)?;
        let record = Self::load(&txn, enrollment).await?;
        txn.commit().await?;

        Ok(record)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ServiceError> {
        let result = enrollments::Entity::delete_by_id(id)
            .exec(db)
            .await
            .or_violation(Table::Enrollment)?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(Table::Enrollment, id));
        }

        info!("Deleted enrollment {id}");
        Ok(())
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        enrollment: enrollments::Model,
    ) -> Result<EnrollmentRecord, ServiceError> {
        let id = enrollment.id;
        Self::with_details(db, vec![enrollment])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Table::Enrollment, id))
    }

    async fn with_details<C: ConnectionTrait>(
        db: &C,
        enrollments: Vec<enrollments::Model>,
    ) -> Result<Vec<EnrollmentRecord>, ServiceError> {
        if enrollments.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<i32> = enrollments.iter().map(|e| e.student_id).collect();
        let schedule_ids: Vec<i32> = enrollments.iter().map(|e| e.class_schedule_id).collect();

        let students_by_id: HashMap<i32, (students::Model, String)> = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids))
            .find_also_related(people::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(student, person)| {
                person.map(|p| (student.id, (student, p.full_name())))
            })
            .collect();

        let schedules = class_schedules::Entity::find()
            .filter(class_schedules::Column::Id.is_in(schedule_ids))
            .all(db)
            .await?;
        let classes_by_id: HashMap<i32, ClassScheduleRecord> =
            ClassScheduleService::with_details(db, schedules)
                .await?
                .into_iter()
                .map(|c| (c.schedule.id, c))
                .collect();

        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let (student, student_name) = students_by_id.get(&enrollment.student_id)?.clone();
                let class = classes_by_id.get(&enrollment.class_schedule_id)?.clone();
                Some(EnrollmentRecord {
                    enrollment,
                    student,
                    student_name,
                    class,
                })
            })
            .collect())
    }
}
