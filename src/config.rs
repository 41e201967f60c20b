//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
//! A missing API key is not validated here; it surfaces as an authentication
//! failure from the remote service.
use std::env;
use dotenv;


pub struct Config {
    pub stability_url: String,
    pub stability_api_key: String,
    pub public_root: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }
    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            stability_url: env::var("STABILITY_API_URL").unwrap_or_else(|_| "https://api.stability.ai".to_string()),
            stability_api_key: env::var("STABILITY_API_KEY").unwrap_or_else(|_| String::new()),
            public_root: env::var("PUBLIC_ROOT").unwrap_or_else(|_| "./public".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "8190".to_string()),
        })
    }
    pub fn print_env_vars() {
        println!("STABILITY_API_URL: {}", env::var("STABILITY_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("STABILITY_API_KEY: {}", if env::var("STABILITY_API_KEY").is_ok() { "<set>" } else { "<unset>" });
        println!("PUBLIC_ROOT: {}", env::var("PUBLIC_ROOT").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_HOST: {}", env::var("API_HOST").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_PORT: {}", env::var("API_PORT").unwrap_or_else(|_| "<unset>".to_string()));
    }
}
