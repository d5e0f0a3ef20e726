use serde_json::json;

use crate::domain::types::GroomerId;
use crate::dto::groomers::GroomerDto;
use crate::events::{
    EventPublisher, GROOMER_BOOKING_RECORDED, GROOMER_CREATED, GROOMER_DELETED, GROOMER_UPDATED,
};
use crate::forms::groomers::{CreateGroomerPayload, UpdateGroomerPayload};
use crate::repository::{GroomerReader, GroomerSearchQuery, GroomerWriter};

use super::{ServiceError, ServiceResult};

pub fn create_groomer<R>(
    payload: CreateGroomerPayload,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<GroomerDto>
where
    R: GroomerWriter,
{
    let new_groomer = payload.into_new_groomer();
    let groomer = repo.create_groomer(&new_groomer).map_err(|e| {
        log::error!("Failed to create groomer: {e}");
        ServiceError::PersistenceFailure
    })?;

    events.info(
        GROOMER_CREATED,
        "Groomer created",
        json!({
            "groomer_id": groomer.id.to_string(),
            "location": groomer.location.as_str(),
        }),
    );
    Ok(groomer.into())
}

pub fn get_groomer<R>(groomer_id: GroomerId, repo: &R) -> ServiceResult<GroomerDto>
where
    R: GroomerReader,
{
    match repo.get_groomer_by_id(groomer_id) {
        Ok(Some(groomer)) => Ok(groomer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get groomer: {e}");
            Err(ServiceError::PersistenceFailure)
        }
    }
}

/// Applies a partial profile update. An update without any fields returns
/// the current record unchanged and publishes nothing.
pub fn update_groomer<R>(
    groomer_id: GroomerId,
    payload: UpdateGroomerPayload,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<GroomerDto>
where
    R: GroomerReader + GroomerWriter,
{
    if payload.update.is_empty() {
        return get_groomer(groomer_id, repo);
    }

    let groomer = match repo.update_groomer(groomer_id, &payload.update) {
        Ok(Some(groomer)) => groomer,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update groomer: {e}");
            return Err(ServiceError::PersistenceFailure);
        }
    };

    let update = &payload.update;
    let mut fields = Vec::new();
    if update.first_name.is_some() {
        fields.push("first_name");
    }
    if update.last_name.is_some() {
        fields.push("last_name");
    }
    if update.location.is_some() {
        fields.push("location");
    }
    if update.specialization.is_some() {
        fields.push("specialization");
    }

    events.info(
        GROOMER_UPDATED,
        "Groomer updated",
        json!({
            "groomer_id": groomer.id.to_string(),
            "fields": fields,
        }),
    );
    Ok(groomer.into())
}

pub fn delete_groomer<R>(
    groomer_id: GroomerId,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<GroomerDto>
where
    R: GroomerWriter,
{
    let groomer = match repo.soft_delete_groomer(groomer_id) {
        Ok(Some(groomer)) => groomer,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to delete groomer: {e}");
            return Err(ServiceError::PersistenceFailure);
        }
    };

    events.info(
        GROOMER_DELETED,
        "Groomer deleted",
        json!({ "groomer_id": groomer.id.to_string() }),
    );
    Ok(groomer.into())
}

pub fn search_groomers<R>(query: GroomerSearchQuery, repo: &R) -> ServiceResult<Vec<GroomerDto>>
where
    R: GroomerReader,
{
    match repo.search_groomers(query) {
        Ok(groomers) => Ok(groomers.into_iter().map(GroomerDto::from).collect()),
        Err(e) => {
            log::error!("Failed to search groomers: {e}");
            Err(ServiceError::PersistenceFailure)
        }
    }
}

pub fn record_booking<R>(
    groomer_id: GroomerId,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<GroomerDto>
where
    R: GroomerWriter,
{
    let groomer = match repo.increment_booking_count(groomer_id) {
        Ok(Some(groomer)) => groomer,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to record booking: {e}");
            return Err(ServiceError::PersistenceFailure);
        }
    };

    events.info(
        GROOMER_BOOKING_RECORDED,
        "Booking recorded for groomer",
        json!({
            "groomer_id": groomer.id.to_string(),
            "total_bookings_count": groomer.total_bookings_count.get(),
        }),
    );
    Ok(groomer.into())
}
