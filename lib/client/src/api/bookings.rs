//! Session booking endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, Envelope, RequestOptions};
use crate::error::ApiError;

/// A tutoring session booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub tutor_id: String,
    pub subject: String,
    /// RFC 3339 start time.
    pub scheduled_at: String,
    pub duration_minutes: u32,
    /// "pending", "confirmed", "completed" or "cancelled".
    pub status: String,
}

/// Request body for `POST /bookings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub tutor_id: String,
    pub subject: String,
    pub scheduled_at: String,
    pub duration_minutes: u32,
}

impl ApiClient {
    /// `GET /bookings` — the authenticated user's bookings.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let resp: Envelope<Vec<Booking>> = self.get("/bookings").await?;
        Ok(resp.data)
    }

    /// `POST /bookings`.
    pub async fn create_booking(&self, booking: &CreateBooking) -> Result<Booking, ApiError> {
        let body = serde_json::to_value(booking)
            .map_err(|e| ApiError::Decode(format!("booking body: {e}")))?;
        let resp: Envelope<Booking> = self
            .request(Method::POST, "/bookings", Some(&body), RequestOptions::default())
            .await?;
        Ok(resp.data)
    }

    /// `DELETE /bookings/{id}` — cancel a booking.
    pub async fn cancel_booking(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/bookings/{id}")).await
    }
}
