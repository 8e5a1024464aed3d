//! Buyer identity extraction.
//!
//! Authentication itself is an external collaborator: the fronting proxy
//! resolves the session and forwards the buyer's identity in headers. This
//! module only consumes that already-resolved identity.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use boxoffice_core::repository::Buyer;

use crate::error::ErrorBody;

/// Header carrying the buyer's opaque identity. Required.
pub const BUYER_ID_HEADER: &str = "x-buyer-id";

/// Header carrying the buyer's display name. Optional.
pub const BUYER_NAME_HEADER: &str = "x-buyer-name";

/// Header carrying the buyer's contact email. Optional.
pub const BUYER_EMAIL_HEADER: &str = "x-buyer-email";

/// Extractor for the resolved buyer identity.
#[derive(Debug, Clone)]
pub struct BuyerIdentity(pub Buyer);

/// Rejection returned when the identity headers are missing or malformed.
#[derive(Debug)]
pub struct IdentityRejection;

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "missing_identity",
            message: format!("the {BUYER_ID_HEADER} header is required"),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S> FromRequestParts<S> for BuyerIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(buyer_id) = header_str(parts, BUYER_ID_HEADER) else {
            return Err(IdentityRejection);
        };
        if buyer_id.is_empty() {
            return Err(IdentityRejection);
        }
        let name = header_str(parts, BUYER_NAME_HEADER).unwrap_or(buyer_id);
        let email = header_str(parts, BUYER_EMAIL_HEADER).unwrap_or_default();
        Ok(Self(Buyer {
            buyer_id: buyer_id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
        }))
    }
}
