use anyhow::Result;
use axum::http::HeaderValue;
use std::env;
use std::path::Path;

use crate::config::{Config, LlmConfig};
use crate::util::redact_url_password;

struct CheckResult {
    passed: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl CheckResult {
    fn new() -> Self {
        Self {
            passed: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn pass(&mut self, msg: impl Into<String>) {
        self.passed.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
}

pub fn run(config_path: Option<String>) -> Result<()> {
    let mut results = CheckResult::new();

    // 1. Load config
    let mut config = match Config::load_with_path(config_path.clone()) {
        Ok(config) => {
            let source = config_path.as_deref().unwrap_or("default search path");
            results.pass(format!("Config loaded from {}", source));
            config
        }
        Err(e) => {
            // report first so the reason shows alongside the summary
            results.error(format!("Failed to load config: {:#}", e));
            print_results(&results);
            anyhow::bail!("config could not be loaded");
        }
    };
    config.apply_env();

    check_llm(&config.llm, &mut results);
    check_database(&config, &mut results);
    check_server(&config, &mut results);

    print_results(&results);

    if !results.errors.is_empty() {
        anyhow::bail!("{} config error(s) found", results.errors.len());
    }

    Ok(())
}

fn check_llm(llm: &LlmConfig, results: &mut CheckResult) {
    match llm.provider.as_str() {
        "openai" | "openai-compatible" => results.pass(format!(
            "Completion provider: {} (model: {}, max_tokens: {}, timeout: {}s)",
            llm.provider, llm.model, llm.max_tokens, llm.timeout_secs
        )),
        other => results.error(format!("Unknown completion provider: {}", other)),
    }

    if llm.provider == "openai-compatible" && llm.base_url.is_none() {
        results.warn(
            "openai-compatible provider without base_url, using default http://localhost:11434/v1",
        );
    }

    if !(0.0..=2.0).contains(&llm.temperature) {
        results.warn(format!(
            "temperature {} is outside the 0.0-2.0 range most providers accept",
            llm.temperature
        ));
    }

    check_api_key(&llm.api_key_env, &llm.provider, results);
}

fn check_api_key(api_key_env: &Option<String>, provider: &str, results: &mut CheckResult) {
    let is_oai_compat = provider == "openai-compatible";
    match api_key_env {
        None => results.pass("API key: not configured (none needed)"),
        Some(env_var) if env_var.to_lowercase() == "none" => {
            results.pass("API key: no API key needed");
        }
        Some(env_var) => match env::var(env_var) {
            Ok(v) if !v.trim().is_empty() => {
                results.pass(format!("API key: {} is set", env_var));
            }
            Ok(_) | Err(_) if is_oai_compat => {
                results.warn(format!(
                    "API key: {} is not set (OK for local models, needed for gateways)",
                    env_var
                ));
            }
            Ok(_) => results.error(format!("API key: {} is set but empty", env_var)),
            Err(_) => results.error(format!("API key: {} is not set", env_var)),
        },
    }
}

fn check_database(config: &Config, results: &mut CheckResult) {
    match config.resolve_database_url() {
        Ok(url) => {
            results.pass(format!("Database: {}", redact_url_password(&url)));
            if !(url.starts_with("sqlite:") || url.starts_with("postgres")) {
                results.error("Database URL must use the sqlite:// or postgres:// scheme");
            }
        }
        Err(e) => results.error(format!("Database: {:#}", e)),
    }
}

fn check_server(config: &Config, results: &mut CheckResult) {
    let server = &config.server;
    results.pass(format!("Listening on {}:{}", server.host, server.port));

    if HeaderValue::from_str(&server.allow_origin).is_ok() {
        results.pass(format!("CORS origin: {}", server.allow_origin));
    } else {
        results.error(format!("CORS origin is not a valid header value: {:?}", server.allow_origin));
    }

    let index = Path::new(&server.static_dir).join("index.html");
    if index.is_file() {
        results.pass(format!("Frontend: {}", index.display()));
    } else {
        results.warn(format!(
            "Frontend entry {} not found, only the API will be served",
            index.display()
        ));
    }
}

fn print_results(results: &CheckResult) {
    println!();
    for msg in &results.passed {
        println!("  \u{2713} {}", msg);
    }
    for msg in &results.warnings {
        println!("  ! {}", msg);
    }
    for msg in &results.errors {
        println!("  \u{2717} {}", msg);
    }
    println!();
    println!(
        "{} passed, {} warnings, {} errors",
        results.passed.len(),
        results.warnings.len(),
        results.errors.len()
    );
}
