use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{db, utils};

use repositories::certification::CertificationRepository;
use repositories::project::ProjectRepository;
use repositories::skill::SkillRepository;
use repositories::sqlx_repo::{SqlxCertificationRepo, SqlxProjectRepo, SqlxSkillRepo};
use use_cases::certifications::CertificationHandler;
use use_cases::projects::ProjectHandler;
use use_cases::skills::SkillHandler;

pub type DynProjectRepo = Arc<dyn ProjectRepository>;
pub type DynSkillRepo = Arc<dyn SkillRepository>;
pub type DynCertificationRepo = Arc<dyn CertificationRepository>;

pub struct AppState {
    pub project_handler: ProjectHandler<DynProjectRepo>,
    pub skill_handler: SkillHandler<DynSkillRepo>,
    pub certification_handler: CertificationHandler<DynCertificationRepo>,
    pub api_token: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let project_repo: DynProjectRepo = Arc::new(SqlxProjectRepo { pool: pool.clone() });
        let skill_repo: DynSkillRepo = Arc::new(SqlxSkillRepo { pool: pool.clone() });
        let certification_repo: DynCertificationRepo =
            Arc::new(SqlxCertificationRepo { pool });

        Self::with_repos(
            project_repo,
            skill_repo,
            certification_repo,
            config.api_secret.clone(),
        )
    }

    /// Builds state over arbitrary repository implementations, which is how
    /// the HTTP tests plug in mocks.
    pub fn with_repos(
        project_repo: DynProjectRepo,
        skill_repo: DynSkillRepo,
        certification_repo: DynCertificationRepo,
        api_token: String,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
            skill_handler: SkillHandler::new(skill_repo),
            certification_handler: CertificationHandler::new(certification_repo),
            api_token,
        }
    }
}
