/// Daily jap submission and count API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use jap_core::{EntryDate, Quantity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Quantity as sent by clients: a JSON integer or an integer string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

impl QuantityInput {
    fn into_quantity(self) -> jap_core::Result<Quantity> {
        match self {
            QuantityInput::Number(n) => Quantity::new(n),
            QuantityInput::Text(s) => Quantity::parse(&s),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitEntryRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "japqty")]
    pub quantity: Option<QuantityInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryResponse {
    pub message: String,
    pub total_today: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsResponse {
    pub daily_count: u64,
    pub monthly_count: u64,
    pub yearly_count: u64,
}

/// GET /api/jap/check/:date - Whether the user already submitted for `date`
pub async fn check_date(
    Path(date): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    let date = EntryDate::parse(&date)?;

    let exists = app_state.ledger.check_exists(auth.user_id(), date).await?;

    let message = if exists {
        "Data already exists for today"
    } else {
        "No data for today"
    };

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// POST /api/jap/submit - Record today's count, once per day
pub async fn submit_entry(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<SubmitEntryRequest>, JsonRejection>,
) -> Result<Json<SubmitEntryResponse>> {
    let Json(req) = payload?;

    let missing = || ServerError::BadRequest("Date and Japqty are required".to_string());

    let date = req
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(missing)?;
    let quantity = req.quantity.ok_or_else(missing)?;

    let date = EntryDate::parse(&date)?;
    let quantity = quantity.into_quantity()?;

    let submission = app_state
        .ledger
        .submit(auth.user_id(), date, quantity)
        .await?;

    Ok(Json(SubmitEntryResponse {
        message: "Data submitted successfully!".to_string(),
        total_today: submission.total_today,
    }))
}

/// GET /api/jap/counts - Entry counts for today, this month and this year
pub async fn get_counts(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<CountsResponse>> {
    let counts = app_state.aggregator.counts(auth.user_id()).await?;

    Ok(Json(CountsResponse {
        daily_count: counts.daily,
        monthly_count: counts.monthly,
        yearly_count: counts.yearly,
    }))
}
