use tracing::info;

use super::{Gateway, normalize};
use crate::{
    error::GatewayError,
    log_gateway_result,
    types::{Credentials, ProfileUpdate, Registration, Session, User},
    utils,
};

impl Gateway {
    /// Creates an account. Does not sign in; the caller logs in afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<(), GatewayError> {
        let req = self.http.post(self.endpoint("auth/register")).json(registration);
        let result = self.send_json(req, Some("Registration failed")).await;
        log_gateway_result!("register", result);
        result?;

        info!(username = %registration.username, "account registered");
        Ok(())
    }

    /// Exchanges credentials for a session.
    ///
    /// Does not store anything; the session store decides what to keep so a
    /// failed login never disturbs an existing session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self.http.post(self.endpoint("auth/login")).json(&credentials);
        let result = self.send_json(req, Some("Login failed")).await;
        log_gateway_result!("login", result);

        let session = normalize::session(&result?, utils::unix_now())?;
        info!(user = %session.user.username, "logged in");
        Ok(session)
    }

    /// Updates the signed-in user's profile and returns the new record.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, GatewayError> {
        let req = self.authorized(self.http.put(self.endpoint("user/update")))?;
        let result = self
            .send_json(req.json(update), Some("Profile update failed"))
            .await;
        log_gateway_result!("update_profile", result);

        normalize::user(&result?)
    }
}
