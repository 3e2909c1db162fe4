//! HTTP surface.
//!
//! | Method | Path | Role |
//! |---|---|---|
//! | GET | `/sections?year&semester` | instructor |
//! | GET | `/sections/{secNo}/assignments` | instructor |
//! | GET | `/sections/{secNo}/enrollments` | instructor |
//! | GET | `/assignments?year&semester` | student |
//! | POST, PUT | `/assignments` | instructor |
//! | GET, DELETE | `/assignments/{id}` | instructor |
//! | GET | `/assignments/{id}/grades` | instructor |
//! | PUT | `/grades` | instructor |
//! | PUT | `/enrollments` | instructor |
//! | GET | `/healthz` | none |

mod caller;
mod error;
mod routes;


use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use gb_auth::TokenVerifier;
use gb_db::GradebookService;
use tokio::net::TcpListener;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GradebookService>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(service: Arc<GradebookService>, verifier: TokenVerifier) -> Self {
        Self {
            service,
            verifier: Arc::new(verifier),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/sections", get(routes::list_sections))
        .route(
            "/sections/{sec_no}/assignments",
            get(routes::list_section_assignments),
        )
        .route(
            "/sections/{sec_no}/enrollments",
            get(routes::list_section_enrollments),
        )
        .route(
            "/assignments",
            get(routes::list_student_assignments)
                .post(routes::create_assignment)
                .put(routes::update_assignment),
        )
        .route(
            "/assignments/{id}",
            get(routes::get_assignment).delete(routes::delete_assignment),
        )
        .route("/assignments/{id}/grades", get(routes::list_grades))
        .route("/grades", put(routes::update_grades))
        .route("/enrollments", put(routes::update_enrollment_grades))
        .with_state(state)
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
