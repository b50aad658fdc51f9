use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskQuery, TaskReplacement},
    services::TaskService,
};
use actix_web::{delete, get, http::header, post, put, web, HttpRequest, HttpResponse, Responder};

/// Lists the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `limit` (optional, default 0): page size; `0` or less returns every task.
/// - `page` (optional, default 1): 1-based page number; values below 1 mean page 1.
/// - `onlyPending` (optional, default false): skip completed tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let listed = tasks.list(user.user_id(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listed))
}

/// Retrieves a task by id.
///
/// Any authenticated caller can read any task; ownership is not checked.
///
/// ## Responses:
/// - `200 OK`: The task.
/// - `404 Not Found`: No task with this id.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    _user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_by_id(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a task owned by the authenticated user.
///
/// The completion flag starts as `false` and the creation time is set by the server.
///
/// ## Responses:
/// - `201 Created`: The new task, with a `Location` header pointing at it.
/// - `401 Unauthorized`: Missing or invalid token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(user.user_id(), task_data.into_inner()).await?;
    let location = format!("{}/{}", req.path().trim_end_matches('/'), task.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(task))
}

/// Deletes a task by id and returns it.
///
/// Ownership is not checked.
///
/// ## Responses:
/// - `200 OK`: The deleted task.
/// - `404 Not Found`: No task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    _user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let deleted = tasks.delete_by_id(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Replaces a task with the full task in the body.
///
/// The body's `id` must match the path. The caller becomes the task's owner.
///
/// ## Responses:
/// - `204 No Content`: The task was replaced.
/// - `400 Bad Request`: Path and body ids differ.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `404 Not Found`: No task with this id.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskReplacement>,
) -> Result<impl Responder, AppError> {
    tasks
        .update(task_id.into_inner(), task_data.into_inner(), user.user_id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
