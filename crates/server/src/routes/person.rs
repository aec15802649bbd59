use crate::{
    dtos::person::{AddressResponse, EmailResponse, PersonDetailResponse, PhoneResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use database::services::{contact::ContactService, person::PersonService};
use models::contact::{NewAddress, NewEmailAddress, NewPhoneNumber};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_person, delete_person))
        .routes(routes!(list_phones, add_phone))
        .routes(routes!(list_emails, add_email))
        .routes(routes!(list_addresses, add_address))
        .routes(routes!(delete_phone))
        .routes(routes!(delete_email))
        .routes(routes!(delete_address))
}

/// Get a person with their phones, emails and addresses
#[utoipa::path(
    get,
    path = "/api/people/{national_id}",
    params(("national_id" = String, Path, description = "National ID")),
    responses(
        (status = 200, description = "Person found", body = PersonDetailResponse),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn get_person(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<PersonDetailResponse>, ApiError> {
    let person = PersonService::get(&state.db, &national_id).await?;
    Ok(Json(person.into()))
}

/// Delete a person together with their roles and contact records
#[utoipa::path(
    delete,
    path = "/api/people/{national_id}",
    params(("national_id" = String, Path, description = "National ID")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "A role of the person still has dependents")
    ),
    tag = "People"
)]
pub async fn delete_person(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<StatusCode, ApiError> {
    PersonService::delete(&state.db, &national_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/people/{national_id}/phones",
    params(("national_id" = String, Path, description = "National ID")),
    responses(
        (status = 200, description = "Phone numbers retrieved successfully", body = Vec<PhoneResponse>),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn list_phones(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Vec<PhoneResponse>>, ApiError> {
    let phones = ContactService::phones(&state.db, &national_id).await?;
    Ok(Json(phones.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/people/{national_id}/phones",
    params(("national_id" = String, Path, description = "National ID")),
    request_body = NewPhoneNumber,
    responses(
        (status = 201, description = "Phone number added", body = PhoneResponse),
        (status = 404, description = "Person not found"),
        (status = 409, description = "The person already has this number"),
        (status = 422, description = "Invalid phone number")
    ),
    tag = "People"
)]
pub async fn add_phone(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewPhoneNumber>, ApiError>,
) -> Result<(StatusCode, Json<PhoneResponse>), ApiError> {
    let phone = ContactService::add_phone(&state.db, &national_id, input).await?;
    Ok((StatusCode::CREATED, Json(phone.into())))
}

#[utoipa::path(
    get,
    path = "/api/people/{national_id}/emails",
    params(("national_id" = String, Path, description = "National ID")),
    responses(
        (status = 200, description = "Email addresses retrieved successfully", body = Vec<EmailResponse>),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn list_emails(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Vec<EmailResponse>>, ApiError> {
    let emails = ContactService::emails(&state.db, &national_id).await?;
    Ok(Json(emails.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/people/{national_id}/emails",
    params(("national_id" = String, Path, description = "National ID")),
    request_body = NewEmailAddress,
    responses(
        (status = 201, description = "Email address added", body = EmailResponse),
        (status = 404, description = "Person not found"),
        (status = 409, description = "The person already has this address"),
        (status = 422, description = "Invalid email address")
    ),
    tag = "People"
)]
pub async fn add_email(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewEmailAddress>, ApiError>,
) -> Result<(StatusCode, Json<EmailResponse>), ApiError> {
    let email = ContactService::add_email(&state.db, &national_id, input).await?;
    Ok((StatusCode::CREATED, Json(email.into())))
}

#[utoipa::path(
    get,
    path = "/api/people/{national_id}/addresses",
    params(("national_id" = String, Path, description = "National ID")),
    responses(
        (status = 200, description = "Addresses retrieved successfully", body = Vec<AddressResponse>),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Vec<AddressResponse>>, ApiError> {
    let addresses = ContactService::addresses(&state.db, &national_id).await?;
    Ok(Json(addresses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/people/{national_id}/addresses",
    params(("national_id" = String, Path, description = "National ID")),
    request_body = NewAddress,
    responses(
        (status = 201, description = "Address added", body = AddressResponse),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Postal code already registered"),
        (status = 422, description = "Invalid address")
    ),
    tag = "People"
)]
pub async fn add_address(
    State(state): State<AppState>,
    WithRejection(Path(national_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<NewAddress>, ApiError>,
) -> Result<(StatusCode, Json<AddressResponse>), ApiError> {
    let address = ContactService::add_address(&state.db, &national_id, input).await?;
    Ok((StatusCode::CREATED, Json(address.into())))
}

#[utoipa::path(
    delete,
    path = "/api/phones/{id}",
    params(("id" = i32, Path, description = "Phone number ID")),
    responses(
        (status = 204, description = "Phone number deleted"),
        (status = 404, description = "Phone number not found")
    ),
    tag = "People"
)]
pub async fn delete_phone(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    ContactService::delete_phone(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/emails/{id}",
    params(("id" = i32, Path, description = "Email address ID")),
    responses(
        (status = 204, description = "Email address deleted"),
        (status = 404, description = "Email address not found")
    ),
    tag = "People"
)]
pub async fn delete_email(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<StatusCode, ApiError> {
    ContactService::delete_email(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{post_code}",
    params(("post_code" = String, Path, description = "Postal code")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 404, description = "Address not found")
    ),
    tag = "People"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    WithRejection(Path(post_code), _): WithRejection<Path<String>, ApiError>,
) -> Result<StatusCode, ApiError> {
    ContactService::delete_address(&state.db, &post_code).await?;
    Ok(StatusCode::NO_CONTENT)
}
