use crate::{
    entities::{addresses, email_addresses, people, phone_numbers},
    error::{ServiceError, StorageResultExt},
    services::support::ensure_deletable,
};
use chrono::Utc;
use log::{info, warn};
use models::{integrity::Table, person::PersonInfo};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait, Value,
};

/// A person together with their contact records
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub person: people::Model,
    pub phones: Vec<phone_numbers::Model>,
    pub emails: Vec<email_addresses::Model>,
    pub addresses: Vec<addresses::Model>,
}

pub struct PersonService;

impl PersonService {
    /// Inserts the person, or reuses the stored row when its details match `info`
    ///
    /// A person registered under another role keeps their details: a create
    /// carrying different attributes for the same national ID is a conflict.
    pub(crate) async fn register<C: ConnectionTrait>(
        db: &C,
        info: &PersonInfo,
    ) -> Result<people::Model, ServiceError> {
        let existing = people::Entity::find_by_id(info.national_id.clone())
            .one(db)
            .await?;
        match existing {
            Some(existing) if Self::matches(&existing, info) => Ok(existing),
            Some(existing) => {
                warn!(
                    "Person {} is already registered with different details",
                    existing.national_id
                );
                Err(ServiceError::duplicate(Table::Person, &["national_id"]))
            }
            None => Self::upsert(db, info).await,
        }
    }

    fn matches(person: &people::Model, info: &PersonInfo) -> bool {
        person.first_name == info.first_name
            && person.last_name == info.last_name
            && person.father_name == info.father_name
            && person.birth_date == info.birth_date
            && person.gender == info.gender
            && person.marital_status == info.marital_status
            && person.blood_type == info.blood_type
            && person.nationality == info.nationality
    }

    /// Inserts the person or overwrites the stored attributes with `info`
    pub(crate) async fn upsert<C: ConnectionTrait>(
        db: &C,
        info: &PersonInfo,
    ) -> Result<people::Model, ServiceError> {
        let now = Utc::now().naive_utc();
        let existing = people::Entity::find_by_id(info.national_id.clone())
            .one(db)
            .await?;

        let mut person = match existing {
            Some(existing) => existing.into(),
            None => people::ActiveModel {
                national_id: Set(info.national_id.clone()),
                created_at: Set(now),
                ..Default::default()
            },
        };
        let is_new = person.created_at.is_set();

        person.first_name = Set(info.first_name.clone());
        person.last_name = Set(info.last_name.clone());
        person.father_name = Set(info.father_name.clone());
        person.birth_date = Set(info.birth_date);
        person.gender = Set(info.gender);
        person.marital_status = Set(info.marital_status);
        person.blood_type = Set(info.blood_type);
        person.nationality = Set(info.nationality);
        person.updated_at = Set(now);

        if is_new {
            person.insert(db).await.or_violation(Table::Person)
        } else {
            person.update(db).await.or_violation(Table::Person)
        }
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<people::Model, ServiceError> {
        people::Entity::find_by_id(national_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found(Table::Person, national_id))
    }

    /// Get a person with all phones, emails and addresses
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<PersonRecord, ServiceError> {
        let person = Self::find(db, national_id).await?;

        let phones = phone_numbers::Entity::find()
            .filter(phone_numbers::Column::NationalId.eq(national_id))
            .order_by_asc(phone_numbers::Column::Id)
            .all(db)
            .await?;
        let emails = email_addresses::Entity::find()
            .filter(email_addresses::Column::NationalId.eq(national_id))
            .order_by_asc(email_addresses::Column::Id)
            .all(db)
            .await?;
        let addresses = addresses::Entity::find()
            .filter(addresses::Column::NationalId.eq(national_id))
            .order_by_asc(addresses::Column::PostCode)
            .all(db)
            .await?;

        Ok(PersonRecord {
            person,
            phones,
            emails,
            addresses,
        })
    }

    /// Deletes the person along with every record they own
    pub async fn delete<C>(db: &C, national_id: &str) -> Result<(), ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        Self::find(&txn, national_id).await?;
        ensure_deletable(&txn, Table::Person, Value::from(national_id.to_string())).await?;

        people::Entity::delete_by_id(national_id.to_string())
            .exec(&txn)
            .await
            .or_violation(Table::Person)?;
        txn.commit().await?;

        info!("Deleted person {national_id} and their owned records");
        Ok(())
    }
}
