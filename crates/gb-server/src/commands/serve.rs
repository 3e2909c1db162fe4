use std::sync::Arc;

use anyhow::Context;
use gb_auth::TokenVerifier;
use tokio::net::TcpListener;

use crate::context::AppContext;
use crate::http::{self, AppState};

/// Handle `gbd serve`.
pub async fn handle(ctx: AppContext) -> anyhow::Result<()> {
    ctx.config
        .validate_for_serve()
        .context("configuration is incomplete for serving")?;

    let auth = &ctx.config.auth;
    let verifier = TokenVerifier::new(&auth.jwt_secret, auth.expected_issuer(), auth.leeway_secs)
        .context("invalid auth.jwt_secret")?;

    let addr = ctx.config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let registrar = if ctx.config.registrar.is_configured() {
        ctx.config.registrar.url.as_str()
    } else {
        "log"
    };
    tracing::info!(
        addr = %addr,
        database = %ctx.config.database.path,
        registrar,
        "gradebook server listening"
    );

    let state = AppState::new(Arc::clone(&ctx.service), verifier);
    http::serve(listener, state, shutdown_signal())
        .await
        .context("http server error")?;

    tracing::info!("http server stopped, draining registrar queue");
    ctx.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
}
