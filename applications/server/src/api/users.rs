/// User identity API routes
use crate::{
    error::Result,
    middleware::AuthenticatedUser,
    services::auth::Claims,
    state::AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use jap_core::{Identity, JapError, Resolution, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SubmitUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitUserResponse {
    pub message: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub location: String,
    pub dob: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            mobile: user.mobile,
            location: user.location,
            dob: user.dob.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: Profile,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub name: String,
    pub mobile: String,
    pub location: String,
    pub dob: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenCheckResponse {
    pub message: String,
    pub user: Claims,
}

/// POST /api/user/submit - Log in by mobile, or register with a full profile
pub async fn submit_user(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<SubmitUserRequest>, JsonRejection>,
) -> Result<Json<SubmitUserResponse>> {
    let Json(req) = payload?;

    let identity = Identity::from_parts(
        req.name.as_deref(),
        req.mobile.as_deref(),
        req.location.as_deref(),
        req.dob.as_deref(),
    )?;

    let resolution = app_state.identity.resolve(&identity).await?;
    let token = app_state.auth_service.issue(&resolution.user().id)?;

    let response = match resolution {
        Resolution::Existing(user) => SubmitUserResponse {
            message: "Login successful!".to_string(),
            token,
            user: Some(user.into()),
        },
        Resolution::Created(_) => SubmitUserResponse {
            message: "User data submitted successfully!".to_string(),
            token,
            user: None,
        },
    };

    Ok(Json(response))
}

/// GET /api/user/details - Profile of the authenticated user
pub async fn get_details(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ProfileResponse>> {
    let user = app_state
        .storage
        .get_user(auth.user_id())
        .await?
        .ok_or_else(|| JapError::UnknownUser(auth.user_id().clone()))?;

    Ok(Json(ProfileResponse {
        user: Profile {
            name: user.name,
            mobile: user.mobile,
            location: user.location,
            dob: user.dob.map(|d| d.format("%Y-%m-%d").to_string()),
        },
    }))
}

/// GET /api/user/check - Echo the decoded claims of a valid token
pub async fn check_token(Extension(claims): Extension<Claims>) -> Json<TokenCheckResponse> {
    Json(TokenCheckResponse {
        message: "Token is valid".to_string(),
        user: claims,
    })
}
