use crate::{
    entities::{departments, faculties, people, students},
    error::{ServiceError, StorageResultExt},
    services::{
        enrollment::{EnrollmentRecord, EnrollmentService},
        person::PersonService,
        support::{
            ensure_deletable, ensure_reference, ensure_unique, fetch_page, find_required,
            search_term, sort_by,
        },
    },
};
use chrono::NaiveDate;
use log::info;
use models::{academic::Degree, error::FieldError, integrity::Table, records::NewStudent};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, TransactionTrait, Value, sea_query::Expr,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub department_id: Option<i32>,
    pub degree: Option<Degree>,
    pub is_active: Option<bool>,
    pub entry_year: Option<i32>,
    /// Matches student number, national ID or name
    pub search: Option<String>,
    /// `last_name` or `entry_year`, `-` prefix for descending
    pub ordering: Option<String>,
}

/// A student row with the person, department and faculty it belongs to
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub student: students::Model,
    pub person: people::Model,
    pub department: departments::Model,
    pub faculty: faculties::Model,
}

pub struct StudentService;

impl StudentService {
    fn active_model(input: &NewStudent) -> students::ActiveModel {
        students::ActiveModel {
            id: NotSet,
            national_id: Set(input.person.national_id.clone()),
            student_number: Set(input.student_number.clone()),
            department_id: Set(input.department_id),
            entry_year: Set(input.entry_year),
            enrollment_date: Set(input.enrollment_date),
            degree: Set(input.degree),
            is_active: Set(input.is_active),
            major: Set(input.major.clone()),
            minor: Set(input.minor.clone()),
            gpa: Set(input.gpa),
        }
    }

    async fn check<C: ConnectionTrait>(
        db: &C,
        id: Option<i32>,
        input: &NewStudent,
    ) -> Result<(departments::Model, faculties::Model), ServiceError> {
        let department = ensure_reference::<departments::Entity, _>(
            db,
            Table::Student,
            Table::Department,
            input.department_id,
        )
        .await?;

        let mut same_number = students::Entity::find()
            .filter(students::Column::StudentNumber.eq(input.student_number.as_str()));
        if let Some(id) = id {
            same_number = same_number.filter(students::Column::Id.ne(id));
        }
        ensure_unique(
            same_number.count(db).await?,
            Table::Student,
            &["student_number"],
        )?;

        let faculty =
            find_required::<faculties::Entity, _>(db, Table::Faculty, department.faculty_id)
                .await?;
        Ok((department, faculty))
    }

    /// Registers a student, creating the underlying person or reusing a matching one
    pub async fn create<C>(
        db: &C,
        input: NewStudent,
        today: NaiveDate,
    ) -> Result<StudentRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        let (department, faculty) = Self::check(&txn, None, &input).await?;
        let person = PersonService::register(&txn, &input.person).await?;
        let student = Self::active_model(&input)
            .insert(&txn)
            .await
            .or_violation(Table::Student)?;
        txn.commit().await?;

        info!(
            "Registered student {} ({})",
            student.student_number,
            person.full_name()
        );
        Ok(StudentRecord {
            student,
            person,
            department,
            faculty,
        })
    }

    /// Replaces a student's attributes; the national ID cannot change
    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewStudent,
        today: NaiveDate,
    ) -> Result<StudentRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        let existing = find_required::<students::Entity, _>(&txn, Table::Student, id).await?;
        if existing.national_id != input.person.national_id {
            return Err(ServiceError::Validation(
                FieldError::range("national_id", "cannot be changed").into(),
            ));
        }
        let (department, faculty) = Self::check(&txn, Some(id), &input).await?;
        let person = PersonService::upsert(&txn, &input.person).await?;

        let mut student = Self::active_model(&input);
        student.id = Unchanged(id);
        let student = student.update(&txn).await.or_violation(Table::Student)?;
        txn.commit().await?;

        Ok(StudentRecord {
            student,
            person,
            department,
            faculty,
        })
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<StudentRecord, ServiceError> {
        let student = find_required::<students::Entity, _>(db, Table::Student, id).await?;
        Self::with_details(db, vec![student])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Table::Student, id))
    }

    /// Query students with pagination, filtering and search
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &StudentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<StudentRecord>, u64), ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("last_name", Expr::col((people::Entity, people::Column::LastName)).into()),
                ("entry_year", Expr::col((students::Entity, students::Column::EntryYear)).into()),
            ],
        )?;
        let search = search_term(&filter.search);
        let joins_person =
            search.is_some() || sort.as_ref().is_some_and(|sort| sort.field == "last_name");

        let mut query = students::Entity::find();
        if joins_person {
            query = query.join(JoinType::InnerJoin, students::Relation::Person.def());
        }
        if let Some(sort) = sort {
            query = query.order_by(sort.expr, sort.order);
        }
        query = query.order_by_asc(students::Column::Id);

        if let Some(department_id) = filter.department_id {
            query = query.filter(students::Column::DepartmentId.eq(department_id));
        }
        if let Some(degree) = filter.degree {
            query = query.filter(students::Column::Degree.eq(degree));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(students::Column::IsActive.eq(is_active));
        }
        if let Some(entry_year) = filter.entry_year {
            query = query.filter(students::Column::EntryYear.eq(entry_year));
        }

        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(students::Column::StudentNumber.contains(&search))
                    .add(people::Column::NationalId.contains(&search))
                    .add(people::Column::FirstName.contains(&search))
                    .add(people::Column::LastName.contains(&search)),
            );
        }

        let (students, total_items) = fetch_page(db, query, page, per_page).await?;
        let records = Self::with_details(db, students).await?;
        Ok((records, total_items))
    }

    /// Enrollments of a student, with class and grade details
    pub async fn enrollments<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<EnrollmentRecord>, ServiceError> {
        find_required::<students::Entity, _>(db, Table::Student, id).await?;
        EnrollmentService::for_student(db, id).await
    }

    /// Deletes the student row; blocked while the student has enrollments
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let student = find_required::<students::Entity, _>(&txn, Table::Student, id).await?;
        ensure_deletable(&txn, Table::Student, Value::from(id)).await?;

        students::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Student)?;
        txn.commit().await?;

        info!("Deleted student {}", student.student_number);
        Ok(())
    }

    /// Attach person, department and faculty rows using batched lookups
    async fn with_details<C: ConnectionTrait>(
        db: &C,
        students: Vec<students::Model>,
    ) -> Result<Vec<StudentRecord>, ServiceError> {
        if students.is_empty() {
            return Ok(vec![]);
        }

        let national_ids: Vec<String> = students.iter().map(|s| s.national_id.clone()).collect();
        let department_ids: Vec<i32> = students.iter().map(|s| s.department_id).collect();

        let people: HashMap<String, people::Model> = people::Entity::find()
            .filter(people::Column::NationalId.is_in(national_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.national_id.clone(), p))
            .collect();
        let departments: HashMap<i32, (departments::Model, faculties::Model)> =
            departments::Entity::find()
                .filter(departments::Column::Id.is_in(department_ids))
                .find_also_related(faculties::Entity)
                .all(db)
                .await?
                .into_iter()
                .filter_map(|(department, faculty)| {
                    faculty.map(|faculty| (department.id, (department, faculty)))
                })
                .collect();

        Ok(students
            .into_iter()
            .filter_map(|student| {
                let person = people.get(&student.national_id)?.clone();
                let (department, faculty) = departments.get(&student.department_id)?.clone();
                Some(StudentRecord {
                    student,
                    person,
                    department,
                    faculty,
                })
            })
            .collect())
    }
}
