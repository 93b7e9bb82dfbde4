//! HTTP surface: one page listing every task plus three mutating routes
//! that redirect back to it.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tasklist_core::{TaskId, TaskService, TaskStore};
use tracing::{debug, error};

use crate::view::render_index;

pub struct AppState<S: TaskStore> {
    service: Arc<TaskService<S>>,
}

impl<S: TaskStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Add form body. A missing field is treated like an empty one.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub task: Option<String>,
}

/// Store failures all become a bare 500; details go to the log.
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub fn create_router<S>(service: TaskService<S>) -> Router
where
    S: TaskStore + Send + Sync + 'static,
{
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/", get(index::<S>))
        .route("/add", post(add_task::<S>))
        .route("/delete/{id}", get(delete_task::<S>))
        .route("/toggle/{id}", get(toggle_task::<S>))
        .with_state(state)
}

/// Store calls touch the filesystem, so they run off the async workers.
async fn run_blocking<S, T, F>(state: AppState<S>, f: F) -> Result<T, AppError>
where
    S: TaskStore + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&TaskService<S>) -> tasklist_core::Result<T> + Send + 'static,
{
    let service = state.service;
    let out = tokio::task::spawn_blocking(move || f(&service)).await??;
    Ok(out)
}

async fn index<S>(State(state): State<AppState<S>>) -> Result<Html<String>, AppError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let tasks = run_blocking(state, |service| service.list()).await?;
    Ok(Html(render_index(&tasks)))
}

/// An absent or unreadable form body counts as missing input and is
/// dropped like an empty field.
async fn add_task<S>(
    State(state): State<AppState<S>>,
    form: Result<Form<AddForm>, FormRejection>,
) -> Result<Redirect, AppError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let text = match form {
        Ok(Form(form)) => form.task,
        Err(rejection) => {
            debug!(%rejection, "ignoring add request without a form body");
            None
        }
    };
    run_blocking(state, move |service| service.add(text.as_deref())).await?;
    Ok(Redirect::to("/"))
}

async fn delete_task<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<TaskId>,
) -> Result<Redirect, AppError>
where
    S: TaskStore + Send + Sync + 'static,
{
    run_blocking(state, move |service| service.delete(id)).await?;
    Ok(Redirect::to("/"))
}

async fn toggle_task<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<TaskId>,
) -> Result<Redirect, AppError>
where
    S: TaskStore + Send + Sync + 'static,
{
    run_blocking(state, move |service| service.toggle(id)).await?;
    Ok(Redirect::to("/"))
}
