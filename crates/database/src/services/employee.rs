use crate::{
    entities::{employees, people},
    error::{ServiceError, StorageResultExt},
    services::{
        person::PersonService,
        support::{ensure_unique, fetch_page, find_required, search_term},
    },
};
use chrono::NaiveDate;
use log::info;
use models::{integrity::Table, records::NewEmployee};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Matches personnel code, title or name
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub employee: employees::Model,
    pub person: people::Model,
}

pub struct EmployeeService;

impl EmployeeService {
    /// Records an employment contract, creating or refreshing the person
    pub async fn create<C>(
        db: &C,
        input: NewEmployee,
        today: NaiveDate,
    ) -> Result<EmployeeRecord, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate(today)?;

        let txn = db.begin().await?;
        ensure_unique(
            employees::Entity::find()
                .filter(employees::Column::PersonnelCode.eq(input.personnel_code.as_str()))
                .count(&txn)
                .await?,
            Table::Employee,
            &["personnel_code"],
        )?;
        let person = PersonService::register(&txn, &input.person).await?;
        let employee = employees::ActiveModel {
            id: NotSet,
            national_id: Set(input.person.national_id),
            personnel_code: Set(input.personnel_code),
            title: Set(input.title),
            contract_date: Set(input.contract_date),
        }
        .insert(&txn)
        .await
        .or_violation(Table::Employee)?;
        txn.commit().await?;

        info!(
            "Recorded contract {} for {}",
            employee.personnel_code,
            person.full_name()
        );
        Ok(EmployeeRecord { employee, person })
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<EmployeeRecord, ServiceError> {
        let employee = find_required::<employees::Entity, _>(db, Table::Employee, id).await?;
        let person = PersonService::find(db, &employee.national_id).await?;
        Ok(EmployeeRecord { employee, person })
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &EmployeeFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<EmployeeRecord>, u64), ServiceError> {
        let mut query = employees::Entity::find().order_by_asc(employees::Column::Id);

        if let Some(search) = search_term(&filter.search) {
            query = query
                .join(JoinType::InnerJoin, employees::Relation::Person.def())
                .filter(
                    Condition::any()
                        .add(employees::Column::PersonnelCode.contains(&search))
                        .add(employees::Column::Title.contains(&search))
                        .add(people::Column::FirstName.contains(&search))
                        .add(people::Column::LastName.contains(&search)),
                );
        }

        let (employees, total_items) = fetch_page(db, query, page, per_page).await?;

        let national_ids: Vec<String> = employees.iter().map(|e| e.national_id.clone()).collect();
        let people_by_id: HashMap<String, people::Model> = people::Entity::find()
            .filter(people::Column::NationalId.is_in(national_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.national_id.clone(), p))
            .collect();

        let records = employees
            .into_iter()
            .filter_map(|employee| {
                let person = people_by_id.get(&employee.national_id)?.clone();
                Some(EmployeeRecord { employee, person })
            })
            .collect();
        Ok((records, total_items))
    }

    /// Ends an employment contract; the person stays
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ServiceError> {
        let result = employees::Entity::delete_by_id(id)
            .exec(db)
            .await
            .or_violation(Table::Employee)?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(Table::Employee, id));
        }

        info!("Deleted employee contract {id}");
        Ok(())
    }
}
