use crate::{
    error::{ValidationErrors, Violations},
    validate,
};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    #[sea_orm(string_value = "mobile")]
    Mobile,
    #[sea_orm(string_value = "home")]
    Home,
    #[sea_orm(string_value = "work")]
    Work,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    #[sea_orm(string_value = "personal")]
    Personal,
    #[sea_orm(string_value = "work")]
    Work,
    #[sea_orm(string_value = "academic")]
    Academic,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewPhoneNumber {
    pub phone_type: PhoneType,
    pub number: String,
}

impl NewPhoneNumber {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations.check(validate::phone_number(&self.number));
        violations.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewEmailAddress {
    pub email_type: EmailType,
    pub email: String,
}

impl NewEmailAddress {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations.check(validate::email(&self.email));
        violations.finish()
    }
}

/// A postal address, identified by its postal code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewAddress {
    pub post_code: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub alley: String,
    pub plaque: i32,
    pub floor: i32,
}

impl NewAddress {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations
            .check(validate::postal_code(&self.post_code))
            .check(validate::not_blank("country", &self.country))
            .check(validate::not_blank("city", &self.city))
            .check(validate::not_blank("street", &self.street));
        violations.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        let phone = NewPhoneNumber {
            phone_type: PhoneType::Mobile,
            number: "09121234567".to_string(),
        };
        assert!(phone.validate().is_ok());

        let phone = NewPhoneNumber {
            number: "12".to_string(),
            ..phone
        };
        assert!(phone.validate().unwrap_err().has_field("number"));
    }

    #[test]
    fn test_address_requires_postal_code() {
        let address = NewAddress {
            post_code: "13145".to_string(),
            country: "Iran".to_string(),
            province: "Tehran".to_string(),
            city: "Tehran".to_string(),
            district: "6".to_string(),
            street: "Enghelab".to_string(),
            alley: "Azin".to_string(),
            plaque: 12,
            floor: 2,
        };
        let errors = address.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has_field("post_code"));
    }
}
