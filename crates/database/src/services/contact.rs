use crate::{
    entities::{addresses, email_addresses, phone_numbers},
    error::{ServiceError, StorageResultExt},
    services::{person::PersonService, support::ensure_unique},
};
use log::info;
use models::{
    contact::{NewAddress, NewEmailAddress, NewPhoneNumber},
    integrity::Table,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

/// Phones, emails and addresses owned by a person
pub struct ContactService;

impl ContactService {
    pub async fn add_phone<C>(
        db: &C,
        national_id: &str,
        input: NewPhoneNumber,
    ) -> Result<phone_numbers::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        PersonService::find(&txn, national_id).await?;
        ensure_unique(
            phone_numbers::Entity::find()
                .filter(phone_numbers::Column::NationalId.eq(national_id))
                .filter(phone_numbers::Column::Number.eq(input.number.as_str()))
                .count(&txn)
                .await?,
            Table::PhoneNumber,
            &["national_id", "number"],
        )?;

        let phone = phone_numbers::ActiveModel {
            id: NotSet,
            national_id: Set(national_id.to_string()),
            phone_type: Set(input.phone_type),
            number: Set(input.number),
        }
        .insert(&txn)
        .await
        .or_violation(Table::PhoneNumber)?;
        txn.commit().await?;

        Ok(phone)
    }

    pub async fn phones<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<Vec<phone_numbers::Model>, ServiceError> {
        PersonService::find(db, national_id).await?;
        Ok(phone_numbers::Entity::find()
            .filter(phone_numbers::Column::NationalId.eq(national_id))
            .order_by_asc(phone_numbers::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn delete_phone<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ServiceError> {
        let result = phone_numbers::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(Table::PhoneNumber, id));
        }
        Ok(())
    }

    pub async fn add_email<C>(
        db: &C,
        national_id: &str,
        input: NewEmailAddress,
    ) -> Result<email_addresses::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        PersonService::find(&txn, national_id).await?;
        ensure_unique(
            email_addresses::Entity::find()
                .filter(email_addresses::Column::NationalId.eq(national_id))
                .filter(email_addresses::Column::Email.eq(input.email.as_str()))
                .count(&txn)
                .await?,
            Table::EmailAddress,
            &["national_id", "email"],
        )?;

        let email = email_addresses::ActiveModel {
            id: NotSet,
            national_id: Set(national_id.to_string()),
            email_type: Set(input.email_type),
            email: Set(input.email),
        }
        .insert(&txn)
        .await
        .or_violation(Table::EmailAddress)?;
        txn.commit().await?;

        Ok(email)
    }

    pub async fn emails<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<Vec<email_addresses::Model>, ServiceError> {
        PersonService::find(db, national_id).await?;
        Ok(email_addresses::Entity::find()
            .filter(email_addresses::Column::NationalId.eq(national_id))
            .order_by_asc(email_addresses::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn delete_email<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ServiceError> {
        let result = email_addresses::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(Table::EmailAddress, id));
        }
        Ok(())
    }

    pub async fn add_address<C>(
        db: &C,
        national_id: &str,
        input: NewAddress,
    ) -> Result<addresses::Model, ServiceError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        input.validate()?;

        let txn = db.begin().await?;
        PersonService::find(&txn, national_id).await?;
        ensure_unique(
            addresses::Entity::find_by_id(input.post_code.clone())
                .count(&txn)
                .await?,
            Table::Address,
            &["post_code"],
        )?;

        let address = addresses::ActiveModel {
            post_code: Set(input.post_code),
            national_id: Set(national_id.to_string()),
            country: Set(input.country),
            province: Set(input.province),
            city: Set(input.city),
            district: Set(input.district),
            street: Set(input.street),
            alley: Set(input.alley),
            plaque: Set(input.plaque),
            floor: Set(input.floor),
        }
        .insert(&txn)
        .await
        .or_violation(Table::Address)?;
        txn.commit().await?;

        info!("Added address {} for {national_id}", address.post_code);
        Ok(address)
    }

    pub async fn addresses<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<Vec<addresses::Model>, ServiceError> {
        PersonService::find(db, national_id).await?;
        Ok(addresses::Entity::find()
            .filter(addresses::Column::NationalId.eq(national_id))
            .order_by_asc(addresses::Column::PostCode)
            .all(db)
            .await?)
    }

    pub async fn delete_address<C: ConnectionTrait>(
        db: &C,
        post_code: &str,
    ) -> Result<(), ServiceError> {
        let result = addresses::Entity::delete_by_id(post_code.to_string())
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(Table::Address, post_code));
        }
        Ok(())
    }
}
