//! REST calls to the reservation backend.
//!
//! Each call goes through the authenticated pipeline in `client`. Failures
//! are logged and returned unchanged; none of them touch the session.
//! Resource payloads pass through as `serde_json::Value`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use super::types::{ApiError, LoginEnvelope, LoginRequest, RegisterRequest};
use crate::state::session::Identity;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const ACTIVITIES_ENDPOINT: &str = "/activities";
const RESERVATIONS_ENDPOINT: &str = "/reservations/";

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn activity_endpoint(id: &str) -> String {
    format!("/activities/{}", segment(id))
}

fn activity_cancel_endpoint(id: &str) -> String {
    format!("/activities/cancel/{}", segment(id))
}

fn reservation_cancel_endpoint(id: &str) -> String {
    format!("/reservations/cancel/{}", segment(id))
}

fn reservations_for_endpoint(username: &str) -> String {
    format!("/reservations/{}", segment(username))
}

fn subscriptions_endpoint(username: &str) -> String {
    format!("/subscriptions/{}", segment(username))
}

fn subscribers_endpoint(username: &str) -> String {
    format!("/subscriptions/subscribers/{}", segment(username))
}

fn subscribe_endpoint(organizer: &str, username: &str) -> String {
    format!("/subscriptions/subscribe/{}/{}", segment(organizer), segment(username))
}

fn unsubscribe_endpoint(organizer: &str, username: &str) -> String {
    format!("/subscriptions/cancel/{}/{}", segment(organizer), segment(username))
}

fn user_endpoint(username: &str) -> String {
    format!("/users/{}", segment(username))
}

fn logged<T>(op: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        tracing::error!(op, error = %e, status = ?e.status(), "backend call failed");
    }
    result
}

impl ApiClient {
    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login`. On success the returned identity becomes the
    /// session; on failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline, including `Decode` when the response
    /// names an unknown role.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Identity, ApiError> {
        let request = self.request(Method::POST, LOGIN_ENDPOINT).json(credentials);
        let envelope: LoginEnvelope = logged("login", self.send(request).await)?;
        self.session().set_identity(envelope.login_response.clone());
        Ok(envelope.login_response)
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn register(&self, account: &RegisterRequest) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, REGISTER_ENDPOINT).json(account);
        logged("register", self.send(request).await)
    }

    /// Forget the current identity. Purely client-side.
    pub fn logout(&self) {
        self.session().clear();
    }

    // =========================================================================
    // ACTIVITIES
    // =========================================================================

    /// `GET /activities` with optional filter pairs as query parameters.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn list_activities(&self, query: &[(String, String)]) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, ACTIVITIES_ENDPOINT).query(query);
        logged("list_activities", self.send(request).await)
    }

    /// `POST /activities`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn create_activity(&self, activity: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, ACTIVITIES_ENDPOINT).json(activity);
        logged("create_activity", self.send(request).await)
    }

    /// `GET /activities/{id}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn get_activity(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &activity_endpoint(id));
        logged("get_activity", self.send(request).await)
    }

    /// `PUT /activities/cancel/{id}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn cancel_activity(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::PUT, &activity_cancel_endpoint(id));
        logged("cancel_activity", self.send(request).await)
    }

    // =========================================================================
    // RESERVATIONS
    // =========================================================================

    /// `POST /reservations/`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn make_reservation(&self, reservation: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, RESERVATIONS_ENDPOINT).json(reservation);
        logged("make_reservation", self.send(request).await)
    }

    /// `PUT /reservations/cancel/{id}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn cancel_reservation(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::PUT, &reservation_cancel_endpoint(id));
        logged("cancel_reservation", self.send(request).await)
    }

    /// `GET /reservations/{username}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn list_reservations(&self, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &reservations_for_endpoint(username));
        logged("list_reservations", self.send(request).await)
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    /// `GET /subscriptions/{username}`: organizers `username` follows.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn list_subscriptions(&self, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &subscriptions_endpoint(username));
        logged("list_subscriptions", self.send(request).await)
    }

    /// `GET /subscriptions/subscribers/{username}`: followers of an organizer.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn list_subscribers(&self, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &subscribers_endpoint(username));
        logged("list_subscribers", self.send(request).await)
    }

    /// `POST /subscriptions/subscribe/{organizer}/{username}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn subscribe(&self, organizer: &str, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, &subscribe_endpoint(organizer, username));
        logged("subscribe", self.send(request).await)
    }

    /// `POST /subscriptions/cancel/{organizer}/{username}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn unsubscribe(&self, organizer: &str, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, &unsubscribe_endpoint(organizer, username));
        logged("unsubscribe", self.send(request).await)
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// `GET /users/{username}`.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the pipeline.
    pub async fn get_user(&self, username: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &user_endpoint(username));
        logged("get_user", self.send(request).await)
    }
}
