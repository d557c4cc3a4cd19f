use salvo::http::StatusCode;
use salvo::writing::Text;
use salvo::{handler, Depot, Request, Response};
use serde::Serialize;
use serde_json::{json, Value};
use sked_core::date::CalendarDate;
use sked_core::error::RecurrenceError;
use sked_core::models::{Task, TaskPayload, TaskSearch, DEFAULT_TASKS_LIMIT};
use sked_core::recurrence::next_date;
use sked_core::repository::TaskRepository;
use sked_core::scheduling::{parse_task_id, prepare_new_task, prepare_update};

use crate::server::error::{render_json, ApiError, ApiResult};
use crate::server::state::get_repo_from_depot;
use crate::util::today;

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

fn query_param(req: &Request, key: &str) -> String {
    req.query::<String>(key).unwrap_or_default()
}

/// GET /api/nextdate?now=&date=&repeat=
///
/// Plain-text diagnostic endpoint. A missing `now` means today.
#[handler]
pub async fn next_date_handler(req: &mut Request, res: &mut Response) {
    let now = query_param(req, "now");
    let date = query_param(req, "date");
    let repeat = query_param(req, "repeat");

    match compute_next_date(&now, &date, &repeat) {
        Ok(next) => res.render(Text::Plain(next)),
        Err(e) => {
            tracing::debug!(error = %e, now = %now, date = %date, repeat = %repeat, "nextdate rejected");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

fn compute_next_date(now: &str, date: &str, repeat: &str) -> Result<String, RecurrenceError> {
    let now = if now.is_empty() {
        today()
    } else {
        CalendarDate::parse(now)?
    };
    next_date(now, date, repeat)
}

/// POST /api/task
#[handler]
pub async fn add_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, add_task_inner(req, depot).await);
}

async fn add_task_inner(req: &mut Request, depot: &Depot) -> ApiResult<IdResponse> {
    let repo = get_repo_from_depot(depot)?;
    let payload: TaskPayload = parse_body(req).await?;
    let data = prepare_new_task(today(), payload)?;
    let task = repo.add_task(data).await?;
    tracing::info!(id = task.id, date = %task.date, "task added");
    Ok(IdResponse {
        id: task.id.to_string(),
    })
}

/// GET /api/task?id=
#[handler]
pub async fn get_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, get_task_inner(req, depot).await);
}

async fn get_task_inner(req: &Request, depot: &Depot) -> ApiResult<Task> {
    let repo = get_repo_from_depot(depot)?;
    let id = parse_task_id(&query_param(req, "id"))?;
    repo.find_task_by_id(id)
        .await?
        .ok_or_else(|| sked_core::error::CoreError::NotFound(id.to_string()).into())
}

/// PUT /api/task
#[handler]
pub async fn update_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, update_task_inner(req, depot).await);
}

async fn update_task_inner(req: &mut Request, depot: &Depot) -> ApiResult<Value> {
    let repo = get_repo_from_depot(depot)?;
    let payload: TaskPayload = parse_body(req).await?;
    let (id, data) = prepare_update(today(), payload)?;
    repo.update_task(id, data).await?;
    Ok(json!({}))
}

/// DELETE /api/task?id=
#[handler]
pub async fn delete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, delete_task_inner(req, depot).await);
}

async fn delete_task_inner(req: &Request, depot: &Depot) -> ApiResult<Value> {
    let repo = get_repo_from_depot(depot)?;
    let id = parse_task_id(&query_param(req, "id"))?;
    repo.delete_task(id).await?;
    Ok(json!({}))
}

/// POST /api/task/done?id=
#[handler]
pub async fn task_done(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, task_done_inner(req, depot).await);
}

async fn task_done_inner(req: &Request, depot: &Depot) -> ApiResult<Value> {
    let repo = get_repo_from_depot(depot)?;
    let id = parse_task_id(&query_param(req, "id"))?;
    repo.complete_task(id).await?;
    Ok(json!({}))
}

/// GET /api/tasks?search=
#[handler]
pub async fn list_tasks(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, list_tasks_inner(req, depot).await);
}

async fn list_tasks_inner(req: &Request, depot: &Depot) -> ApiResult<TasksResponse> {
    let repo = get_repo_from_depot(depot)?;
    let search = TaskSearch::parse(&query_param(req, "search"));
    let tasks = repo.find_tasks(&search, DEFAULT_TASKS_LIMIT).await?;
    Ok(TasksResponse { tasks })
}

async fn parse_body(req: &mut Request) -> ApiResult<TaskPayload> {
    req.parse_json()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
