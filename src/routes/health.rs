use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let llm_result = check_llm(&config);
    health.services.insert("llm".to_string(), llm_result.clone());

    // Photo providers are optional; a missing key means curated images only.
    health.services.insert(
        "pexels".to_string(),
        check_photo_key("PEXELS_API_KEY", config.photos.pexels_api_key.as_deref()),
    );
    health.services.insert(
        "unsplash".to_string(),
        check_photo_key(
            "UNSPLASH_ACCESS_KEY",
            config.photos.unsplash_access_key.as_deref(),
        ),
    );

    if llm_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_llm(config: &AppConfig) -> ServiceStatus {
    match config.llm.api_key.as_deref() {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Groq API key configured ({}), model {}",
                mask_key(key),
                config.llm.model
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("GROQ_API_KEY not configured".to_string()),
        },
    }
}

fn check_photo_key(var: &str, key: Option<&str>) -> ServiceStatus {
    match key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} configured ({})", var, mask_key(key))),
        },
        None => ServiceStatus {
            status: "fallback".to_string(),
            details: Some(format!("{} not configured, using curated images", var)),
        },
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
