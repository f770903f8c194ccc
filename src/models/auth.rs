//! Customer identity carried in the signed session cookie.
//!
//! The auth service stores a JWT as the `actix-identity` id; handlers receive
//! the decoded claims through the [`AuthenticatedUser`] extractor.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims of a signed-in customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Customer identifier; orders are scoped by it.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Expiration as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Signs the claims with the shared secret.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verifies the token signature and expiry and returns its claims.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let token = identity
        .id()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("ServerConfig is not registered as app data");
        ErrorInternalServerError("server misconfigured")
    })?;

    AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected identity token: {err}");
        ErrorUnauthorized("invalid token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}
