use crate::api::{ApiError, JournalApi};
use crate::journal::notice::{back_online, went_offline};
use crate::journal::{AppState, Notice};
use crate::models::{AuthResponse, Credentials, CurrentUser, RegisterInput};

fn signed_in(response: AuthResponse, action: &str) -> Result<(), ApiError> {
    if response.success {
        Ok(())
    } else {
        Err(ApiError::AuthenticationError(
            response.error.unwrap_or_else(|| format!("{} failed", action)),
        ))
    }
}

/// Start a session. The cookie it sets is kept by the client.
pub async fn login(api: &dyn JournalApi, credentials: &Credentials) -> Result<(), ApiError> {
    signed_in(api.login(credentials).await?, "Login")?;
    log::info!("Logged in as {}", credentials.email);
    Ok(())
}

pub async fn register(api: &dyn JournalApi, input: &RegisterInput) -> Result<(), ApiError> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::InvalidInput("Email and password are required".to_string()));
    }
    signed_in(api.register(input).await?, "Registration")?;
    log::info!("Registered {}", input.email);
    Ok(())
}

pub async fn logout(api: &dyn JournalApi) -> Result<(), ApiError> {
    api.logout().await?;
    log::info!("Logged out");
    Ok(())
}

pub async fn current_user(api: &dyn JournalApi) -> Result<CurrentUser, ApiError> {
    api.current_user().await
}

/// Probe the backend and track connectivity. A notice is produced only when
/// the status flips.
pub async fn check_connection(api: &dyn JournalApi, state: &mut AppState) -> Option<Notice> {
    let reachable = match api.health().await {
        Ok(status) if status.is_ok() => true,
        Ok(status) => {
            log::warn!("Backend health is '{}'", status.status);
            false
        }
        Err(e) => {
            log::debug!("Health check failed: {}", e);
            false
        }
    };

    if reachable {
        state.mark_online().then(back_online)
    } else {
        state.mark_offline().then(went_offline)
    }
}
