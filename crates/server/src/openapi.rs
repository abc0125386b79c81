use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct AccountResponse { pub id: Uuid, pub username: String }

#[derive(ToSchema)]
pub struct TaskRequest { pub content: String }

#[derive(ToSchema)]
pub struct TaskResponse { pub id: Uuid, pub content: String, pub is_completed: bool }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::get_user_info,
        crate::routes::tasks::list,
        crate::routes::tasks::create,
        crate::routes::tasks::toggle,
        crate::routes::tasks::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            AccountResponse,
            TaskRequest,
            TaskResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "tasks")
    )
)]
pub struct ApiDoc;
