use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthPayload, LoginRequest, ProfilePayload, RegisterRequest},
        extractors::{require_auth, AuthUser},
        password::{hash_password_blocking, verify_password_blocking},
    },
    error::AppError,
    response::{self, Envelope},
    state::AppState,
    users::{NewUser, Role, StoreError},
    validation::ValidatedJson,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<Envelope<AuthPayload>, AppError> {
    // Fast path only; the store's unique insert decides races.
    if state.store.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict);
    }

    let password_hash = hash_password_blocking(payload.password).await.map_err(|e| {
        error!(error = %e, "hash_password failed");
        e
    })?;

    let new_user = NewUser {
        email: payload.email,
        password_hash,
        name: payload.name,
        role: Role::default(),
    };
    let user = match state.store.create(new_user).await {
        Ok(u) => u,
        Err(StoreError::Conflict) => {
            warn!("email registered concurrently");
            return Err(AppError::Conflict);
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e.into());
        }
    };

    let token = state.jwt.issue(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(response::created(
        "Registration successful",
        AuthPayload { user, token },
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Envelope<AuthPayload>, AppError> {
    let Some(found) = state
        .store
        .find_by_email_with_secret(&payload.email)
        .await?
    else {
        warn!(email = %payload.email, "login unknown email");
        // Same argon2 cost as a wrong password.
        let decoy = state.decoy_hash().await?.to_string();
        let _ = verify_password_blocking(payload.password, decoy).await;
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password_blocking(payload.password, found.password_hash).await?;
    if !ok {
        warn!(email = %payload.email, user_id = %found.user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let user = found.user;
    let token = state.jwt.issue(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(response::ok("Login successful", AuthPayload { user, token }))
}

#[instrument(skip(state, claims))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Envelope<ProfilePayload>, AppError> {
    let user = state.store.find_by_id(claims.user_id).await?.ok_or_else(|| {
        warn!(user_id = %claims.user_id, "token subject no longer exists");
        AppError::Unauthorized("User not found".into())
    })?;

    Ok(response::ok("Profile retrieved", ProfilePayload { user }))
}

/// Tokens are stateless, so the client discarding its copy is the whole logout.
#[instrument(skip(claims))]
pub async fn logout(AuthUser(claims): AuthUser) -> Envelope<()> {
    info!(user_id = %claims.user_id, "user logged out");
    response::ok("Logged out successfully (client should delete token)", ())
}
