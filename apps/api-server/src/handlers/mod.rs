//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Auth routes
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/profile", web::get().to(auth::profile))
        // Post routes
        .route("/post", web::post().to(posts::create_post))
        .route("/post", web::put().to(posts::update_post))
        .route("/post", web::get().to(posts::list_posts))
        .route("/post/{id}", web::get().to(posts::get_post));
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use actix_web::test::TestRequest;
    use actix_web::{cookie::Cookie, dev::ServiceResponse};

    use quill_core::ports::{PasswordService, TokenService};
    use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
    use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};
    use quill_infra::sanitizer::AmmoniaSanitizer;
    use quill_infra::storage::LocalImageStore;

    use crate::config::{CookieSettings, SameSitePolicy};
    use crate::state::AppState;

    pub fn test_state(upload_dir: &Path) -> AppState {
        AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            images: Arc::new(LocalImageStore::new(upload_dir)),
            sanitizer: Arc::new(AmmoniaSanitizer::new()),
            cookies: CookieSettings {
                secure: false,
                same_site: SameSitePolicy::Strict,
            },
        }
    }

    pub fn test_token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "quill-test".to_string(),
        }))
    }

    pub fn test_password_service() -> Arc<dyn PasswordService> {
        Arc::new(Argon2PasswordService::new())
    }

    /// Pull the credential cookie out of a login response.
    pub fn token_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == "token")
            .map(|c| c.into_owned())
    }

    /// Build a multipart/form-data request body the way the SPA submits
    /// post forms: text fields plus an optional cover file.
    pub fn multipart_request(
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> TestRequest {
        const BOUNDARY: &str = "quill-test-boundary";

        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        TestRequest::default()
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }
}
