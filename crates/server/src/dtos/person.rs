use chrono::{NaiveDate, NaiveDateTime};
use database::{
    entities::{addresses, email_addresses, people, phone_numbers},
    services::person::PersonRecord,
};
use models::{
    contact::{EmailType, PhoneType},
    person::{BloodType, Gender, MaritalStatus, Nationality},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonResponse {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub father_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub blood_type: BloodType,
    pub nationality: Nationality,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<people::Model> for PersonResponse {
    fn from(person: people::Model) -> Self {
        Self {
            full_name: person.full_name(),
            national_id: person.national_id,
            first_name: person.first_name,
            last_name: person.last_name,
            father_name: person.father_name,
            birth_date: person.birth_date,
            gender: person.gender,
            marital_status: person.marital_status,
            blood_type: person.blood_type,
            nationality: person.nationality,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

/// A person with every contact record they own
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonDetailResponse {
    #[serde(flatten)]
    pub person: PersonResponse,
    pub phones: Vec<PhoneResponse>,
    pub emails: Vec<EmailResponse>,
    pub addresses: Vec<AddressResponse>,
}

impl From<PersonRecord> for PersonDetailResponse {
    fn from(record: PersonRecord) -> Self {
        Self {
            person: record.person.into(),
            phones: record.phones.into_iter().map(Into::into).collect(),
            emails: record.emails.into_iter().map(Into::into).collect(),
            addresses: record.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhoneResponse {
    pub id: i32,
    pub national_id: String,
    pub phone_type: PhoneType,
    pub number: String,
}

impl From<phone_numbers::Model> for PhoneResponse {
    fn from(phone: phone_numbers::Model) -> Self {
        Self {
            id: phone.id,
            national_id: phone.national_id,
            phone_type: phone.phone_type,
            number: phone.number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    pub id: i32,
    pub national_id: String,
    pub email_type: EmailType,
    pub email: String,
}

impl From<email_addresses::Model> for EmailResponse {
    fn from(email: email_addresses::Model) -> Self {
        Self {
            id: email.id,
            national_id: email.national_id,
            email_type: email.email_type,
            email: email.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub post_code: String,
    pub national_id: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub alley: String,
    pub plaque: i32,
    pub floor: i32,
}

impl From<addresses::Model> for AddressResponse {
    fn from(address: addresses::Model) -> Self {
        Self {
            post_code: address.post_code,
            national_id: address.national_id,
            country: address.country,
            province: address.province,
            city: address.city,
            district: address.district,
            street: address.street,
            alley: address.alley,
            plaque: address.plaque,
            floor: address.floor,
        }
    }
}
