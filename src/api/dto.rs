use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::RelationPatch;
use crate::domain::value_objects::{BookOrdering, BookQuery};
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    #[serde(default)]
    pub discount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookRequest {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    #[serde(default)]
    pub discount: Option<Decimal>,
}

/// Partial relation update. Omitted fields keep their stored value; an
/// explicit `"rate": null` clears the rating (hence the double option).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationRequest {
    #[serde(default)]
    pub is_liked: Option<bool>,
    #[serde(default)]
    pub is_bookmarked: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub rate: Option<Option<i16>>,
}

impl From<RelationRequest> for RelationPatch {
    fn from(request: RelationRequest) -> Self {
        RelationPatch {
            is_liked: request.is_liked,
            is_bookmarked: request.is_bookmarked,
            rate: request.rate,
        }
    }
}

/// Listing query string: `?price=100&search=Author&ordering=-price`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListParams {
    pub price: Option<Decimal>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl BookListParams {
    pub fn into_query(self) -> AppResult<BookQuery> {
        let ordering = match self.ordering.as_deref() {
            Some(raw) => BookOrdering::parse(raw)?,
            None => BookOrdering::default(),
        };
        Ok(BookQuery {
            price: self.price,
            search: self.search,
            ordering,
        })
    }
}
