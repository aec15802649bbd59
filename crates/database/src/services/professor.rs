use crate::{
    entities::{
        courses, departments, faculties, people, professor_courses, professor_departments,
        professors,
    },
    error::{ServiceError, StorageResultExt},
    services::{
        class_schedule::{ClassScheduleFilter, ClassScheduleRecord, ClassScheduleService},
        person::PersonService,
        support::{
            ensure_deletable, ensure_reference, ensure_unique, fetch_page, find_required,
            search_term, sort_by,
        },
    },
};
use chrono::NaiveDate;
use log::info;
use models::{academic::AcademicRank, error::FieldError, integrity::Table, records::NewProfessor};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait, Value,
    sea_query::Expr,
};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct ProfessorFilter {
    pub faculty_id: Option<i32>,
    pub academic_rank: Option<AcademicRank>,
    /// Matches personnel code, national ID or name
    pub search: Option<String>,
    /// `last_name` or `hire_date`, `-` prefix for descending
    pub ordering: Option<String>,
}

/// A professor row with person, faculty and association sets
#[derive(Debug, Clone)]
pub struct ProfessorRecord {
    pub professor: professors::Model,
    pub person: people::Model,
    pub faculty: faculties::Model,
    pub department_ids: Vec<i32>,
    pub course_ids: Vec<i32>,
}

pub struct ProfessorService;

impl ProfessorService {
    fn active_model(input: &NewProfessor) -> professors::ActiveModel {
        professors::ActiveModel {
            id: NotSet,
            national_id: Set(input.person.national_id.clone()),
            personnel_code: Set(input.personnel_code.clone()),
            faculty_id: Set(input.faculty_id),
            academic_rank: Set(input.academic_rank),
            salary: Set(input.salary),
            employment_status: Set(input.employment_status),
            hire_date: Set(input.hire_date),
            last_promotion_date: Set(input.last_promotion_date),
            contract_end_date: Set(input.contract_end_date),
        }
    }

    async fn check<C: ConnectionTrait>(
        db: &C,
        id: Option<i32>,
        input: &NewProfessor,
    ) -> Result<(), ServiceError> {
        ensure_reference::<faculties::Entity, _>(
            db,
            Table::Professor,
            Table::Faculty,
            input.faculty_id,
        )
        .await?;

        let mut same_code = professors::Entity::find()
            .filter(professors::Column::PersonnelCode.eq(input.personnel_code.as_str()));
        if let Some(id) = id {
            same_code = same_code.filter(professors::Column::Id.ne(id));
        }
        ensure_unique(
            same_code.count(db).await?,
            Table::Professor,
            &["personnel_code"],
        )
    }

    /// Hires a professor, creating the underlying person or reusing a matching one
    pub async fn create<C>(
        db: &C,
        input: NewProfessor,
        today: NaiveDate,
    ) -> Result<ProfessorRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        Self::check(&txn, None, &input).await?;
        PersonService::register(&txn, &input.person).await?;
        let professor = Self::active_model(&input)
            .insert(&txn)
            .await
            .or_violation(Table::Professor)?;
        let record = Self::load(&txn, professor).await?;
        txn.commit().await?;

        info!(
            "Registered professor {} ({})",
            record.professor.personnel_code,
            record.person.full_name()
        );
        Ok(record)
    }

    /// Replaces a professor's attributes; the national ID cannot change
    pub async fn update<C>(
        db: &C,
        id: i32,
        input: NewProfessor,
        today: NaiveDate,
    ) -> Result<ProfessorRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        let existing =
            find_required::<professors::Entity, _>(&txn, Table::Professor, id).await?;
        if existing.national_id != input.person.national_id {
            return Err(ServiceError::Validation(
                FieldError::range("national_id", "cannot be changed").into(),
            ));
        }
        Self::check(&txn, Some(id), &input).await?;
        PersonService::upsert(&txn, &input.person).await?;

        let mut professor = Self::active_model(&input);
        professor.id = Unchanged(id);
        let professor = professor
            .update(&txn)
            .await
            .or_violation(Table::Professor)?;
        let record = Self::load(&txn, professor).await?;
        txn.commit().await?;

        Ok(record)
    }

    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<ProfessorRecord, ServiceError> {
        let professor = find_required::<professors::Entity, _>(db, Table::Professor, id).await?;
        Self::load(db, professor).await
    }

    /// Query professors with pagination, filtering and search
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &ProfessorFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ProfessorRecord>, u64), ServiceError> {
        let sort = sort_by(
            &filter.ordering,
            vec![
                ("last_name", Expr::col((people::Entity, people::Column::LastName)).into()),
                ("hire_date", Expr::col((professors::Entity, professors::Column::HireDate)).into()),
            ],
        )?;
        let search = search_term(&filter.search);
        let joins_person =
            search.is_some() || sort.as_ref().is_some_and(|sort| sort.field == "last_name");

        let mut query = professors::Entity::find();
        if joins_person {
            query = query.join(JoinType::InnerJoin, professors::Relation::Person.def());
        }
        if let Some(sort) = sort {
            query = query.order_by(sort.expr, sort.order);
        }
        query = query.order_by_asc(professors::Column::Id);

        if let Some(faculty_id) = filter.faculty_id {
            query = query.filter(professors::Column::FacultyId.eq(faculty_id));
        }
        if let Some(rank) = filter.academic_rank {
            query = query.filter(professors::Column::AcademicRank.eq(rank));
        }

        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(professors::Column::PersonnelCode.contains(&search))
                    .add(people::Column::NationalId.contains(&search))
                    .add(people::Column::FirstName.contains(&search))
                    .add(people::Column::LastName.contains(&search)),
            );
        }

        let (professors, total_items) = fetch_page(db, query, page, per_page).await?;
        let records = Self::with_details(db, professors).await?;
        Ok((records, total_items))
    }

    /// Class schedules taught by a professor
    pub async fn classes<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<ClassScheduleRecord>, ServiceError> {
        find_required::<professors::Entity, _>(db, Table::Professor, id).await?;
        let filter = ClassScheduleFilter {
            professor_id: Some(id),
            ..Default::default()
        };
        ClassScheduleService::all(db, &filter).await
    }

    /// Replaces the set of departments a professor belongs to
    pub async fn set_departments<C>(
        db: &C,
        id: i32,
        department_ids: Vec<i32>,
    ) -> Result<ProfessorRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let department_ids: BTreeSet<i32> = department_ids.into_iter().collect();

        let txn = db.begin().await?;
        let professor =
            find_required::<professors::Entity, _>(&txn, Table::Professor, id).await?;
        for &department_id in &department_ids {
            ensure_reference::<departments::Entity, _>(
                &txn,
                Table::ProfessorDepartment,
                Table::Department,
                department_id,
            )
            .await?;
        }

        professor_departments::Entity::delete_many()
            .filter(professor_departments::Column::ProfessorId.eq(id))
            .exec(&txn)
            .await?;
        if !department_ids.is_empty() {
            let links = department_ids
                .iter()
                .map(|&department_id| professor_departments::ActiveModel {
                    id: NotSet,
                    professor_id: Set(id),
                    department_id: Set(department_id),
                });
            professor_departments::Entity::insert_many(links)
                .exec(&txn)
                .await
                .or_violation(Table::ProfessorDepartment)?;
        }

        let record = Self::load(&txn, professor).await?;
        txn.commit().await?;

        info!(
            "Professor {} now belongs to {} department(s)",
            id,
            record.department_ids.len()
        );
        Ok(record)
    }

    /// Replaces the set of courses a professor teaches
    pub async fn set_courses<C>(
        db: &C,
        id: i32,
        course_ids: Vec<i32>,
    ) -> Result<ProfessorRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let course_ids: BTreeSet<i32> = course_ids.into_iter().collect();

        let txn = db.begin().await?;
        let professor =
            find_required::<professors::Entity, _>(&txn, Table::Professor, id).await?;
        for &course_id in &course_ids {
            ensure_reference::<courses::Entity, _>(
                &txn,
                Table::ProfessorCourse,
                Table::Course,
                course_id,
            )
            .await?;
        }

        professor_courses::Entity::delete_many()
            .filter(professor_courses::Column::ProfessorId.eq(id))
            .exec(&txn)
            .await?;
        if !course_ids.is_empty() {
            let links = course_ids
                .iter()
                .map(|&course_id| professor_courses::ActiveModel {
                    id: NotSet,
                    professor_id: Set(id),
                    course_id: Set(course_id),
                });
            professor_courses::Entity::insert_many(links)
                .exec(&txn)
                .await
                .or_violation(Table::ProfessorCourse)?;
        }

        let record = Self::load(&txn, professor).await?;
        txn.commit().await?;

        info!(
            "Professor {} now teaches {} course(s)",
            id,
            record.course_ids.len()
        );
        Ok(record)
    }

    /// Deletes the professor row; blocked while they have class schedules
    pub async fn delete<C>(db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let professor =
            find_required::<professors::Entity, _>(&txn, Table::Professor, id).await?;
        ensure_deletable(&txn, Table::Professor, Value::from(id)).await?;

        professors::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .or_violation(Table::Professor)?;
        txn.commit().await?;

        info!("Deleted professor {}", professor.personnel_code);
        Ok(())
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        professor: professors::Model,
    ) -> Result<ProfessorRecord, ServiceError> {
        let id = professor.id;
        Self::with_details(db, vec![professor])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Table::Professor, id))
    }

    /// Attach person, faculty and association ids using batched lookups
    async fn with_details<C: ConnectionTrait>(
        db: &C,
        professors: Vec<professors::Model>,
    ) -> Result<Vec<ProfessorRecord>, ServiceError> {
        if professors.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i32> = professors.iter().map(|p| p.id).collect();
        let national_ids: Vec<String> = professors.iter().map(|p| p.national_id.clone()).collect();
        let faculty_ids: Vec<i32> = professors.iter().map(|p| p.faculty_id).collect();

        let people_by_id: HashMap<String, people::Model> = people::Entity::find()
            .filter(people::Column::NationalId.is_in(national_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.national_id.clone(), p))
            .collect();
        let faculties_by_id: HashMap<i32, faculties::Model> = faculties::Entity::find()
            .filter(faculties::Column::Id.is_in(faculty_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        let mut departments_by_professor: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in professor_departments::Entity::find()
            .filter(professor_departments::Column::ProfessorId.is_in(ids.clone()))
            .order_by_asc(professor_departments::Column::DepartmentId)
            .all(db)
            .await?
        {
            departments_by_professor
                .entry(link.professor_id)
                .or_default()
                .push(link.department_id);
        }

        let mut courses_by_professor: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in professor_courses::Entity::find()
            .filter(professor_courses::Column::ProfessorId.is_in(ids))
            .order_by_asc(professor_courses::Column::CourseId)
            .all(db)
            .await?
        {
            courses_by_professor
                .entry(link.professor_id)
                .or_default()
                .push(link.course_id);
        }

        Ok(professors
            .into_iter()
            .filter_map(|professor| {
                let person = people_by_id.get(&professor.national_id)?.clone();
                let faculty = faculties_by_id.get(&professor.faculty_id)?.clone();
                let department_ids = departments_by_professor
                    .remove(&professor.id)
                    .unwrap_or_default();
                let course_ids = courses_by_professor
                    .remove(&professor.id)
                    .unwrap_or_default();
                Some(ProfessorRecord {
                    professor,
                    person,
                    faculty,
                    department_ids,
                    course_ids,
                })
            })
            .collect())
    }
}
