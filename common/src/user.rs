use std::{fmt, str::FromStr};

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Res};

/// Subscription plan level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Fluent,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Fluent => "fluent",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "fluent" => Ok(Tier::Fluent),
            other => Err(AppError::Internal(format!("Unknown tier: {}", other))),
        }
    }
}

/// The authenticated caller, attached to the request by the auth middleware.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub tier: Tier,
}

/// Outcome of authenticating a request. Only `Unauthorized` and `Internal`
/// are ever stored, so the error can be rebuilt on extraction.
pub type AuthOutcome = Res<CurrentUser>;

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let outcome = match req.extensions().get::<AuthOutcome>() {
            Some(Ok(user)) => Ok(user.clone()),
            Some(Err(AppError::Unauthorized(msg))) => Err(AppError::Unauthorized(msg.clone())),
            Some(Err(err)) => Err(AppError::Internal(err.to_string())),
            None => Err(AppError::Unauthorized(
                "No authorization token provided".to_string(),
            )),
        };
        ready(outcome)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn tier_parses_stored_values() {
        assert_eq!("free".parse::<Tier>().unwrap(), Tier::Free);
        assert_eq!("fluent".parse::<Tier>().unwrap(), Tier::Fluent);
        assert!("gold".parse::<Tier>().is_err());
        assert_eq!(Tier::Fluent.to_string(), "fluent");
    }

    #[actix_web::test]
    async fn missing_outcome_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let res = CurrentUser::extract(&req).await;
        assert!(matches!(res, Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn attached_user_is_extracted() {
        let req = TestRequest::default().to_http_request();
        let user = CurrentUser {
            id: Uuid::new_v4(),
            email: "learner@example.com".to_string(),
            tier: Tier::Free,
        };
        req.extensions_mut().insert::<AuthOutcome>(Ok(user.clone()));

        let extracted = CurrentUser::extract(&req).await.unwrap();
        assert_eq!(extracted.id, user.id);
        assert_eq!(extracted.tier, Tier::Free);
    }
}
