use std::{future::IntoFuture, process, sync::Arc};

use folio::{
    application::{
        admin::AdminBlogService,
        claims::{AdminTokenValidator, ClaimsValidator},
        error::AppError,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState},
        telemetry,
    },
};
use sqlx::PgPool;
use tokio::sync::oneshot;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::IssueToken(args) => run_issue_token(settings, args).await,
    }
}

async fn init_pool(settings: &config::Settings) -> Result<PgPool, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    let pool =
        PostgresRepositories::connect(database_url, settings.database.max_connections.get())
            .await
            .map_err(InfraError::from)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(pool)
}

fn build_admin_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> AdminState {
    let blogs = AdminBlogService::new(
        repositories.clone(),
        repositories.clone(),
        repositories.clone(),
        repositories.clone(),
    );
    let claims: Arc<dyn ClaimsValidator> = Arc::new(AdminTokenValidator::new(repositories));

    AdminState {
        blogs: Arc::new(blogs),
        claims,
        default_page_size: settings.admin.default_page_size,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pool = init_pool(&settings).await?;
    let repositories = Arc::new(PostgresRepositories::new(pool));
    let router = http::build_admin_router(build_admin_state(repositories, &settings));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;

    info!(
        target = "folio::serve",
        addr = %settings.server.addr,
        "admin server listening"
    );

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let grace = settings.server.graceful_shutdown;
    let deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = deadline => {
            warn!(
                target = "folio::serve",
                grace_seconds = grace.as_secs(),
                "graceful shutdown deadline exceeded; dropping open connections"
            );
        }
    }

    info!(target = "folio::serve", "admin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "folio::serve",
            error = %err,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    info!(target = "folio::serve", "shutdown signal received");
}

async fn run_issue_token(
    settings: config::Settings,
    args: config::IssueTokenArgs,
) -> Result<(), AppError> {
    let pool = init_pool(&settings).await?;
    let repositories = Arc::new(PostgresRepositories::new(pool));
    let validator = AdminTokenValidator::new(repositories);

    let issued = validator
        .issue_token(&args.name, &args.email)
        .await
        .map_err(|err| AppError::validation(format!("failed to issue token: {err}")))?;

    info!(
        target = "folio::issue_token",
        admin_id = %issued.account.id,
        email = %issued.account.email,
        "issued admin token"
    );
    println!("{}", issued.token);
    Ok(())
}
