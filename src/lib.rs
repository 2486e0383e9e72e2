use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod db;
pub mod department;
pub mod docgen;
pub mod letter;
pub mod mail;
pub mod media;
pub mod metrics;
pub mod project;
pub mod submission;
pub mod task;
pub mod user;

pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::user::handlers::register,
            crate::user::handlers::login,
            crate::user::handlers::send_reset_password,
            crate::user::handlers::reset_password,
            crate::user::handlers::change_password,
            crate::user::handlers::get_user,
            crate::department::handlers::add_department,
            crate::department::handlers::get_departments,
            crate::department::handlers::update_department,
            crate::department::handlers::delete_department,
            crate::submission::handlers::create_submission,
            crate::submission::handlers::get_submissions,
            crate::submission::handlers::delete_submission,
            crate::task::handlers::add_tasks,
            crate::task::handlers::update_week,
            crate::task::handlers::delete_week,
            crate::task::handlers::get_department_tasks,
            crate::task::handlers::get_week_tasks,
            crate::project::handlers::add_project,
            crate::project::handlers::get_project,
            crate::project::handlers::update_project,
            crate::project::handlers::delete_project,
            crate::letter::handlers::download_offer_letter,
            crate::letter::handlers::generate_icc,
            crate::letter::handlers::download_icc
        ),
        components(
            schemas(
                user::models::RegisterRequest,
                user::models::LoginRequest,
                user::models::UserResponse,
                user::models::SendResetRequest,
                user::models::ResetPasswordRequest,
                user::models::ChangePasswordRequest,
                department::models::Department,
                department::models::CreateDepartmentRequest,
                department::models::UpdateDepartmentRequest,
                submission::models::SubmissionRecord,
                submission::models::SubmissionMetadata,
                submission::handlers::SubmissionQuery,
                media::StoredFileReference,
                task::models::Task,
                task::models::WeeklyPlan,
                task::models::TaskItem,
                task::models::TaskAttribute,
                task::models::CreateTaskRequest,
                task::models::UpdateWeekRequest,
                task::models::DeleteWeekRequest,
                project::models::ProjectOverview,
                project::models::CreateProjectRequest,
                project::models::UpdateProjectRequest,
                docgen::CandidateDetails,
                docgen::CertificateDetails,
                letter::models::DownloadQuery,
                ErrorResponse,
            )
        ),
        tags(
            (name = "User Service", description = "Registration, login and password lifecycle."),
            (name = "Department Service", description = "Department records."),
            (name = "Submission Service", description = "Weekly submission endpoints."),
            (name = "Task Service", description = "Weekly task plans."),
            (name = "Project Service", description = "Project overviews."),
            (name = "Certificate Service", description = "Offer letters and completion certificates.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost Staging server")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let media_config = crate::media::MediaConfig::from_env().unwrap();
    let app_state = match AppState::new_with_config(media_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to connect to database. Please check your DATABASE_URL in .env and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("renu_internship_server")
        .registry(prometheus::default_registry().clone())
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let frontend_origin =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/user")
                            .route("/register", web::post().to(user::handlers::register))
                            .route("/login", web::post().to(user::handlers::login))
                            .route(
                                "/send-reset-password",
                                web::post().to(user::handlers::send_reset_password),
                            )
                            .route(
                                "/reset-password/{id}/{token}",
                                web::post().to(user::handlers::reset_password),
                            )
                            .route(
                                "/change-password",
                                web::post().to(user::handlers::change_password),
                            )
                            .route("", web::get().to(user::handlers::get_user)),
                    )
                    .service(
                        web::resource("/department")
                            .route(web::post().to(department::handlers::add_department))
                            .route(web::get().to(department::handlers::get_departments))
                            .route(web::put().to(department::handlers::update_department))
                            .route(web::delete().to(department::handlers::delete_department)),
                    )
                    .service(
                        web::resource("/submission")
                            .route(web::post().to(submission::handlers::create_submission))
                            .route(web::get().to(submission::handlers::get_submissions)),
                    )
                    .service(
                        web::resource("/submission/{submission_id}")
                            .route(web::delete().to(submission::handlers::delete_submission)),
                    )
                    .service(
                        web::resource("/task")
                            .route(web::post().to(task::handlers::add_tasks))
                            .route(web::get().to(task::handlers::get_department_tasks)),
                    )
                    .service(
                        web::resource("/task/update")
                            .route(web::put().to(task::handlers::update_week)),
                    )
                    .service(
                        web::resource("/task/delete")
                            .route(web::delete().to(task::handlers::delete_week)),
                    )
                    .service(
                        web::resource("/task/particularweek")
                            .route(web::get().to(task::handlers::get_week_tasks)),
                    )
                    .service(
                        web::resource("/project")
                            .route(web::post().to(project::handlers::add_project))
                            .route(web::get().to(project::handlers::get_project))
                            .route(web::put().to(project::handlers::update_project))
                            .route(web::delete().to(project::handlers::delete_project)),
                    )
                    .service(
                        web::resource("/certificate/offerLetter")
                            .route(web::get().to(letter::handlers::download_offer_letter)),
                    )
                    .service(
                        web::resource("/certificate/generateIcc")
                            .route(web::post().to(letter::handlers::generate_icc)),
                    )
                    .service(
                        web::resource("/certificate/icc")
                            .route(web::get().to(letter::handlers::download_icc)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .max_connections(25000)
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
