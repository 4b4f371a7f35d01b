use actix_web::web;

use crate::handlers::home::home;

mod certifications;
mod json_error;
mod projects;
mod skills;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(projects::config_routes)
            .configure(skills::config_routes)
            .configure(certifications::config_routes),
    );

    cfg.configure(json_error::config_routes);
}
