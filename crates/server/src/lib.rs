// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod compute;
mod error;
mod questions;
mod routes;
pub mod types;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use pws_config::AppConfig;
use std::sync::Arc;
use tracing::info;

pub use compute::{process_compute, ComputeSettings};
pub use error::ApiError;
pub use questions::{random_question, QUESTION_LIST};
pub use routes::setup_routes;

#[derive(Clone)]
pub struct ContributionServerBuilder {
    settings: ComputeSettings,
    port: Option<u16>,
    host: Option<String>,
    cors_origins: Vec<String>,
    cors_max_age: Option<usize>,
}

impl ContributionServerBuilder {
    /// Create a new builder around the engine settings used for every request
    pub fn new(settings: ComputeSettings) -> Self {
        Self {
            settings,
            port: None,
            host: None,
            cors_origins: vec![],
            cors_max_age: None,
        }
    }

    /// Set the port number (default: 5000)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the host address (default: "0.0.0.0")
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Restrict CORS to the given origins. Without this any origin is allowed.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Seconds a browser may cache a preflight response (default: 3600)
    pub fn with_cors_max_age(mut self, max_age: usize) -> Self {
        self.cors_max_age = Some(max_age);
        self
    }

    pub fn build(self) -> ContributionServer {
        ContributionServer {
            settings: Arc::new(self.settings),
            port: self.port.unwrap_or(5000),
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins: self.cors_origins,
            cors_max_age: self.cors_max_age.unwrap_or(3600),
        }
    }
}

#[derive(Clone)]
pub struct ContributionServer {
    settings: Arc<ComputeSettings>,
    port: u16,
    host: String,
    cors_origins: Vec<String>,
    cors_max_age: usize,
}

impl ContributionServer {
    pub fn builder(settings: ComputeSettings) -> ContributionServerBuilder {
        ContributionServerBuilder::new(settings)
    }

    /// Build a server from the loaded application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let server = config.server();
        Self::builder(ComputeSettings::from_config(config))
            .with_host(server.host.clone())
            .with_port(server.port)
            .with_cors_origins(server.cors_origins.clone())
            .with_cors_max_age(server.cors_max_age)
            .build()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run the HTTP server until it is stopped
    pub async fn run(&self) -> Result<()> {
        let bind_addr = self.bind_address();
        let settings = Arc::clone(&self.settings);
        let cors_origins = self.cors_origins.clone();
        let cors_max_age = self.cors_max_age;

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(Arc::clone(&settings)))
                .wrap(build_cors(&cors_origins, cors_max_age))
                .wrap(Logger::new(r#"%a "%r" %s %b %T"#))
                .configure(setup_routes)
        })
        .bind(&bind_addr)?;

        info!("PWS server listening on http://{}", bind_addr);
        server.run().await.map_err(Into::into)
    }
}

fn build_cors(origins: &[String], max_age: usize) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(max_age);

    if origins.is_empty() {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
