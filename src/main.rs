// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! sanctum-fetch CLI
//!
//! Send one request to a Sanctum backend, doing the CSRF handshake first
//! when the method needs it.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};
use sanctum_fetch::{Client, Config, ConfigOverride, RequestOptions, Response};

/// Environment variable consulted when `--base-url` is not given
const BASE_URL_ENV: &str = "SANCTUM_FETCH_BASE_URL";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    // Initialize logging
    let directive = if args.iter().any(|a| a == "--debug") {
        "sanctum_fetch=debug"
    } else {
        "sanctum_fetch=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse().unwrap()),
        )
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

struct Invocation {
    command: String,
    positional: Vec<String>,
    config: Config,
}

fn parse_args(args: Vec<String>) -> anyhow::Result<Invocation> {
    let mut config = Config::default();
    if let Ok(base_url) = env::var(BASE_URL_ENV) {
        config = config.base_url(base_url);
    }

    let mut positional = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--base-url" => {
                let value = iter.next().context("--base-url requires a value")?;
                config = config.base_url(value);
            }
            "--csrf-path" => {
                let value = iter.next().context("--csrf-path requires a value")?;
                config = config.csrf_path(value);
            }
            "--cookie-name" => {
                let value = iter.next().context("--cookie-name requires a value")?;
                config = config.csrf_cookie_name(value);
            }
            "--debug" => config = config.debug(true),
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        bail!("missing command");
    }
    let command = positional.remove(0);

    Ok(Invocation {
        command,
        positional,
        config,
    })
}

async fn run(args: Vec<String>) -> anyhow::Result<ExitCode> {
    let invocation = match parse_args(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            print_usage();
            return Ok(ExitCode::from(1));
        }
    };

    let overrides = ConfigOverride::default();

    match invocation.command.as_str() {
        "get" | "post" | "put" | "patch" | "delete" => {
            let Some(path) = invocation.positional.first() else {
                eprintln!("Usage: sanctum-fetch {} <path> [json-body]", invocation.command);
                return Ok(ExitCode::from(1));
            };

            let mut options = RequestOptions::new();
            if let Some(raw) = invocation.positional.get(1) {
                let body: serde_json::Value =
                    serde_json::from_str(raw).context("request body is not valid JSON")?;
                options = options.body(body);
            }

            let client = Client::new(invocation.config).context("failed to build client")?;
            let response = match invocation.command.as_str() {
                "get" => client.get(path, options, &overrides).await,
                "post" => client.post(path, options, &overrides).await,
                "put" => client.put(path, options, &overrides).await,
                "patch" => client.patch(path, options, &overrides).await,
                _ => client.delete(path, options, &overrides).await,
            }
            .with_context(|| format!("{} {} failed", invocation.command.to_uppercase(), path))?;

            Ok(print_response(&response))
        }
        "csrf" => {
            let client = Client::new(invocation.config).context("failed to build client")?;
            client
                .get_csrf_token(&overrides)
                .await
                .context("CSRF cookie fetch failed")?;
            println!("CSRF cookie refreshed");
            Ok(ExitCode::SUCCESS)
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "--version" | "-v" | "version" => {
            println!("sanctum-fetch {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Ok(ExitCode::from(1))
        }
    }
}

fn print_response(response: &Response) -> ExitCode {
    println!("Status: {}", response.status);
    println!("URL: {}", response.url);
    println!("Time: {}ms", response.response_time_ms);
    println!();
    println!("{}", response.text_lossy());

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn print_usage() {
    println!(
        r#"sanctum-fetch - CSRF-aware HTTP client for Laravel Sanctum backends

USAGE:
    sanctum-fetch [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
    get <path>                  Send a GET request
    post <path> [json-body]     Send a POST request
    put <path> [json-body]      Send a PUT request
    patch <path> [json-body]    Send a PATCH request
    delete <path> [json-body]   Send a DELETE request
    csrf                        Force a CSRF cookie refresh
    help                        Show this help message
    version                     Show version

OPTIONS:
    --base-url <url>        Backend base URL (env: {env}, default: http://localhost:8000)
    --csrf-path <path>      CSRF cookie endpoint (default: /sanctum/csrf-cookie)
    --cookie-name <name>    CSRF cookie name (default: XSRF-TOKEN)
    --debug                 Emit diagnostic traces

EXAMPLES:
    sanctum-fetch --base-url https://api.test get /api/user
    sanctum-fetch post /api/posts '{{"title":"Hello"}}'
"#,
        env = BASE_URL_ENV
    );
}
