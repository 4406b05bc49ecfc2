//! Axum extractors for patch requests
//!
//! Both extractors reject with [`ApiError`], so handlers only ever see a
//! well-formed id and a validated, non-empty list of distinct updates.

use super::patch::parse_update_payload;
use crate::core::error::{ApiError, RequestError, ValidationError};
use crate::core::order::OrderId;
use crate::core::update::OrderUpdate;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

/// Order id taken from the `{id}` path segment
///
/// ```rust,ignore
/// pub async fn get_order(OrderIdPath(id): OrderIdPath) -> Result<Json<Order>, ApiError> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrderIdPath(pub OrderId);

impl<S> FromRequestParts<S> for OrderIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidOrderId { id: e.body_text() })?;

        OrderId::parse(&raw)
            .map(OrderIdPath)
            .ok_or_else(|| RequestError::InvalidOrderId { id: raw }.into())
    }
}

/// Patch body parsed into typed updates
///
/// The body is read as text, not through `Json`, so a non-JSON body is
/// reported as such regardless of the content type.
#[derive(Debug, Clone)]
pub struct ValidatedPatch(pub Vec<OrderUpdate>);

impl<S> FromRequest<S> for ValidatedPatch
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = String::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidJson {
                message: e.body_text(),
            })?;

        let updates = parse_update_payload(&body)?;
        Ok(ValidatedPatch(updates))
    }
}
