use models::academic::{AcademicRank, EmploymentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub national_id: String,
    pub personnel_code: String,
    pub faculty_id: i32,
    pub academic_rank: AcademicRank,
    pub salary: i64,
    pub employment_status: EmploymentStatus,
    pub hire_date: Date,
    pub last_promotion_date: Option<Date>,
    pub contract_end_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::NationalId",
        to = "super::people::Column::NationalId"
    )]
    Person,
    #[sea_orm(
        belongs_to = "super::faculties::Entity",
        from = "Column::FacultyId",
        to = "super::faculties::Column::Id"
    )]
    Faculty,
    #[sea_orm(has_many = "super::class_schedules::Entity")]
    ClassSchedules,
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::faculties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::class_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSchedules.def()
    }
}

/// Departments a professor belongs to, through the junction table
impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_departments::Relation::Department.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::professor_departments::Relation::Professor.def().rev())
    }
}

/// Courses a professor teaches, through the junction table
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_courses::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::professor_courses::Relation::Professor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
