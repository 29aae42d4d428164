//! Headless shell runner.
//!
//! Boots the session controller against the configured backend, waits for
//! readiness, optionally signs in with `SHERPA_SHELL_EMAIL` and
//! `SHERPA_SHELL_PASSWORD`, then idles until Ctrl-C.

use std::sync::Arc;

use sherpa_shell::adapters::auth::{GoTrueConfig, GoTrueIdentityProvider, MockIdentityProvider};
use sherpa_shell::adapters::navigation::StackNavigator;
use sherpa_shell::adapters::profile::{
    InMemoryProfileRepository, RestConfig, RestProfileRepository,
};
use sherpa_shell::application::SessionController;
use sherpa_shell::config::AppConfig;
use sherpa_shell::domain::navigation::{resolve_active_tab, Route, NAV_ITEMS};
use sherpa_shell::ports::{IdentityProvider, Navigator, ProfileRepository};
use sherpa_shell::telemetry::init_tracing;

type Backend = (Arc<dyn IdentityProvider>, Arc<dyn ProfileRepository>);

fn backend(config: &AppConfig) -> Result<Backend, Box<dyn std::error::Error>> {
    if config.provider.is_in_memory() {
        tracing::warn!("Running against the in-process mock backend");
        let identity: Arc<dyn IdentityProvider> = Arc::new(MockIdentityProvider::new());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(InMemoryProfileRepository::new());
        return Ok((identity, profiles));
    }

    let timeout = config.provider.request_timeout();
    let auth = GoTrueConfig {
        url: config.provider.url.clone(),
        anon_key: config.provider.anon_key.clone(),
        request_timeout: timeout,
    };
    let identity = Arc::new(GoTrueIdentityProvider::new(auth)?);

    let rest = RestConfig {
        url: config.provider.url.clone(),
        anon_key: config.provider.anon_key.clone(),
        request_timeout: timeout,
    };
    let profiles: Arc<dyn ProfileRepository> =
        Arc::new(RestProfileRepository::new(rest)?.with_token_source(identity.clone()));

    let identity: Arc<dyn IdentityProvider> = identity;
    Ok((identity, profiles))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.telemetry);

    tracing::info!(
        environment = ?config.environment,
        mode = ?config.provider.mode,
        "Sherpa shell starting"
    );

    let (identity, profiles) = backend(&config)?;
    let navigator = Arc::new(StackNavigator::new(Route::new("/")));
    let controller = SessionController::start(
        identity,
        profiles,
        navigator.clone(),
        config.startup.settings(),
    );

    // Nothing to paint headless; the shell is ready as soon as we say so.
    controller.on_first_paint_complete();
    controller.wait_until_ready().await;
    tracing::info!(
        location = %navigator.current_location(),
        signed_in = controller.session().is_some(),
        "Shell ready"
    );

    if let (Ok(email), Ok(password)) = (
        std::env::var("SHERPA_SHELL_EMAIL"),
        std::env::var("SHERPA_SHELL_PASSWORD"),
    ) {
        match controller.sign_in_with_password(&email, &password).await {
            Ok(response) => tracing::info!(
                user = response.user().map(|u| u.display_name()).unwrap_or_default(),
                "Signed in"
            ),
            Err(e) => tracing::error!(error = %e, "Sign-in failed"),
        }
    }

    let location = navigator.current_location();
    tracing::info!(
        location = %location,
        tab = ?resolve_active_tab(&location, &NAV_ITEMS).map(|item| item.label),
        "Idle; press Ctrl-C to exit"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    let report = controller.shutdown().await;
    tracing::debug!(?report, "Controller stopped");

    Ok(())
}
