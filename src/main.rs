//! Speakwise backend entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speakwise::adapters::gateway::{GatewayCredentials, RestPaymentGateway};
use speakwise::adapters::http::auth::AuthHandlers;
use speakwise::adapters::http::demo::DemoHandlers;
use speakwise::adapters::http::installment::InstallmentHandlers;
use speakwise::adapters::http::payment::PaymentHandlers;
use speakwise::adapters::http::plan::PlanHandlers;
use speakwise::adapters::http::subscription::SubscriptionHandlers;
use speakwise::adapters::http::user::UserHandlers;
use speakwise::adapters::http::{api_router, ApiHandlers};
use speakwise::adapters::postgres::{
    PostgresBookingRepository, PostgresPaymentRepository, PostgresPlanRepository,
    PostgresSessionRepository, PostgresSubscriptionRepository, PostgresUserRepository,
};
use speakwise::application::handlers::auth::{
    LoginHandler, LogoutHandler, MembershipLoginHandler, RegisterHandler,
};
use speakwise::application::handlers::booking::{
    BookDemoClassHandler, CancelBookingHandler, CompleteBookingHandler,
    GetAvailableSlotsHandler, RescheduleBookingHandler,
};
use speakwise::application::handlers::installment::{
    CreateInstallmentOrderHandler, CreateInstallmentPlanHandler, GetPendingInstallmentsHandler,
    ProcessFirstInstallmentHandler, ProcessSecondInstallmentHandler,
};
use speakwise::application::handlers::payment::{GetPaymentStatusHandler, ProcessPaymentHandler};
use speakwise::application::handlers::plan::ListPlansHandler;
use speakwise::application::handlers::subscription::{
    CancelSubscriptionHandler, CreateSubscriptionHandler, DisableAutoPayHandler,
    EnableAutoPayHandler, GetUpcomingRenewalsHandler, HandleFailedRenewalHandler,
    ProcessRenewalHandler,
};
use speakwise::application::handlers::user::{GetProfileHandler, UpdatePreferencesHandler};
use speakwise::config::AppConfig;
use speakwise::domain::payment::GatewaySignatureVerifier;
use speakwise::ports::{
    BookingRepository, PaymentGateway, PaymentRepository, PlanRepository, SessionRepository,
    SubscriptionRepository, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    tracing::info!(
        environment = ?config.server.environment,
        "starting speakwise v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("database connection established");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    // Repositories
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let plans: Arc<dyn PlanRepository> = Arc::new(PostgresPlanRepository::new(pool.clone()));
    let payments: Arc<dyn PaymentRepository> =
        Arc::new(PostgresPaymentRepository::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let bookings: Arc<dyn BookingRepository> =
        Arc::new(PostgresBookingRepository::new(pool.clone()));

    // Gateway
    let mut credentials = GatewayCredentials::new(
        config.gateway.key_id.clone(),
        config.gateway.key_secret.clone(),
    );
    if let Some(base_url) = &config.gateway.base_url {
        credentials = credentials.with_base_url(base_url.clone());
    }
    let gateway: Arc<dyn PaymentGateway> = Arc::new(RestPaymentGateway::new(credentials));
    let verifier = Arc::new(GatewaySignatureVerifier::new(
        config.gateway.key_secret.clone(),
    ));

    // Application handlers
    let auth = AuthHandlers::new(
        Arc::new(RegisterHandler::new(users.clone(), sessions.clone())),
        Arc::new(LoginHandler::new(users.clone(), sessions.clone())),
        Arc::new(MembershipLoginHandler::new(
            users.clone(),
            sessions.clone(),
            config.auth.demo_otp_enabled,
        )),
        Arc::new(LogoutHandler::new(sessions.clone())),
    );
    let user = UserHandlers::new(
        Arc::new(GetProfileHandler::new(users.clone())),
        Arc::new(UpdatePreferencesHandler::new(users.clone())),
    );
    let plan = PlanHandlers::new(Arc::new(ListPlansHandler::new(plans.clone())));
    let payment = PaymentHandlers::new(
        Arc::new(ProcessPaymentHandler::new(
            payments.clone(),
            plans.clone(),
            verifier.clone(),
        )),
        Arc::new(GetPaymentStatusHandler::new(payments.clone())),
    );
    let installment = InstallmentHandlers::new(
        Arc::new(CreateInstallmentPlanHandler::new(plans.clone())),
        Arc::new(CreateInstallmentOrderHandler::new(
            plans.clone(),
            payments.clone(),
            gateway.clone(),
        )),
        Arc::new(ProcessFirstInstallmentHandler::new(
            payments.clone(),
            plans.clone(),
            verifier.clone(),
        )),
        Arc::new(ProcessSecondInstallmentHandler::new(
            payments.clone(),
            verifier.clone(),
        )),
        Arc::new(GetPendingInstallmentsHandler::new(payments.clone())),
    );
    let subscription = SubscriptionHandlers::new(
        Arc::new(CreateSubscriptionHandler::new(
            subscriptions.clone(),
            plans.clone(),
            gateway.clone(),
        )),
        Arc::new(EnableAutoPayHandler::new(
            subscriptions.clone(),
            plans.clone(),
            gateway.clone(),
        )),
        Arc::new(DisableAutoPayHandler::new(
            subscriptions.clone(),
            gateway.clone(),
        )),
        Arc::new(CancelSubscriptionHandler::new(
            subscriptions.clone(),
            gateway.clone(),
        )),
        Arc::new(ProcessRenewalHandler::new(
            subscriptions.clone(),
            plans.clone(),
        )),
        Arc::new(HandleFailedRenewalHandler::new(subscriptions.clone())),
        Arc::new(GetUpcomingRenewalsHandler::new(subscriptions.clone())),
    );
    let demo = DemoHandlers::new(
        Arc::new(GetAvailableSlotsHandler::new(bookings.clone())),
        Arc::new(BookDemoClassHandler::new(bookings.clone())),
        Arc::new(CancelBookingHandler::new(bookings.clone())),
        Arc::new(RescheduleBookingHandler::new(bookings.clone())),
        Arc::new(CompleteBookingHandler::new(bookings.clone())),
    );

    // Expired sessions are swept in the background; a stale row only ever
    // outlives its expiry until the next sweep, the middleware rejects it
    // either way.
    let sweep_sessions = sessions.clone();
    let sweep_interval = Duration::from_secs(config.auth.session_sweep_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            match sweep_sessions.delete_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, "expired sessions swept"),
                Err(e) => tracing::warn!(error = %e, "session sweep failed"),
            }
        }
    });

    let handlers = ApiHandlers {
        auth,
        user,
        plan,
        payment,
        installment,
        subscription,
        demo,
    };
    let cors = {
        let origins = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(handlers, sessions)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
