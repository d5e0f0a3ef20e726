use serde::Deserialize;
use validator::Validate;

use crate::domain::groomer::{GroomerUpdate, NewGroomer};
use crate::domain::types::{FirstName, GroomerRating, LastName, Location, Specialization};
use crate::forms::{FormError, double_option, non_blank, pagination};
use crate::repository::GroomerSearchQuery;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroomerForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(length(max = 255))]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateGroomerPayload {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub location: Location,
    pub specialization: Option<Specialization>,
}

impl CreateGroomerPayload {
    pub fn into_new_groomer(self) -> NewGroomer {
        NewGroomer::new(
            self.first_name,
            self.last_name,
            self.location,
            self.specialization,
        )
    }
}

impl TryFrom<CreateGroomerForm> for CreateGroomerPayload {
    type Error = FormError;

    fn try_from(value: CreateGroomerForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            first_name: FirstName::new(value.first_name)?,
            last_name: LastName::new(value.last_name)?,
            location: Location::new(value.location)?,
            specialization: non_blank(value.specialization)
                .map(Specialization::new)
                .transpose()?,
        })
    }
}

/// Partial update body. Omitted fields are left untouched; an explicit
/// `"specialization": null` (or blank string) clears the specialization.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGroomerForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub specialization: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateGroomerPayload {
    pub update: GroomerUpdate,
}

impl TryFrom<UpdateGroomerForm> for UpdateGroomerPayload {
    type Error = FormError;

    fn try_from(value: UpdateGroomerForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let specialization = match value.specialization {
            None => None,
            Some(raw) => Some(non_blank(raw).map(Specialization::new).transpose()?),
        };

        Ok(Self {
            update: GroomerUpdate {
                first_name: value.first_name.map(FirstName::new).transpose()?,
                last_name: value.last_name.map(LastName::new).transpose()?,
                location: value.location.map(Location::new).transpose()?,
                specialization,
            },
        })
    }
}

/// Query string accepted by the groomer search endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchGroomersForm {
    pub location: Option<String>,
    pub specialization: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl TryFrom<SearchGroomersForm> for GroomerSearchQuery {
    type Error = FormError;

    fn try_from(value: SearchGroomersForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut query = GroomerSearchQuery::default().paginate(pagination(value.skip, value.limit)?);
        if let Some(location) = non_blank(value.location) {
            query = query.location(location);
        }
        if let Some(specialization) = non_blank(value.specialization) {
            query = query.specialization(specialization);
        }
        if let Some(min_rating) = value.min_rating {
            query = query.min_rating(GroomerRating::new(min_rating)?);
        }
        Ok(query)
    }
}
