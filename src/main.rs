// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! entrytrace CLI
//!
//! Pulls the checkout entry URL out of leasing endpoint responses, either
//! from a saved payload or from a live page.

use std::env;
use std::process::ExitCode;

use anyhow::Context;

use entrytrace::trace::{extract_from_path, LinkExtractor};
use entrytrace::{Browser, EntryTracer, TracerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("entrytrace=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "extract" => match ExtractArgs::parse(&args[2..]) {
            Some(opts) => extract(&opts),
            None => {
                eprintln!("Usage: entrytrace extract <file> [--full] [--all]");
                ExitCode::from(1)
            }
        },
        "trace" => match TraceArgs::parse(&args[2..]) {
            Some(opts) => match trace(&opts).await {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::from(1)
                }
            },
            None => {
                eprintln!("Usage: entrytrace trace <url> [--endpoint <fragment>] [--full] [--json]");
                ExitCode::from(1)
            }
        },
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("entrytrace {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"entrytrace - DUC leasing entry URL tracer

USAGE:
    entrytrace <COMMAND> [OPTIONS]

COMMANDS:
    extract <file>  Extract the entry URL from a saved leasing response
        --full          Print the full URL including query/fragment
        --all           List every candidate URL
    trace <url>     Fetch a URL on a traced page and print the entry URL
        --endpoint <f>  Path fragment to trace (default /bff/duc-leasing)
        --full          Publish the full URL
        --json          Print the trace state as JSON
    help            Show this help message
    version         Show version information

Full URLs carry session tokens: use them locally, never commit or log them.
"#
    );
}

#[derive(Debug, Default, PartialEq)]
struct ExtractArgs {
    input: String,
    full: bool,
    all: bool,
}

impl ExtractArgs {
    fn parse(args: &[String]) -> Option<Self> {
        let mut opts = Self::default();
        let mut input = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--full" => opts.full = true,
                "--all" => opts.all = true,
                "--input" => input = Some(iter.next()?.clone()),
                other if other.starts_with("--") => return None,
                other => input = Some(other.to_string()),
            }
        }

        opts.input = input?;
        Some(opts)
    }
}

#[derive(Debug, Default, PartialEq)]
struct TraceArgs {
    url: String,
    endpoint: Option<String>,
    full: bool,
    json: bool,
}

impl TraceArgs {
    fn parse(args: &[String]) -> Option<Self> {
        let mut opts = Self::default();
        let mut url = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--full" => opts.full = true,
                "--json" => opts.json = true,
                "--endpoint" => opts.endpoint = Some(iter.next()?.clone()),
                other if other.starts_with("--") => return None,
                other => url = Some(other.to_string()),
            }
        }

        opts.url = url?;
        Some(opts)
    }
}

fn extract(opts: &ExtractArgs) -> ExitCode {
    let report = match extract_from_path(&opts.input, &LinkExtractor::default()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::from(1);
        }
    };

    let selected = match report.entry_url() {
        Some(url) => url,
        None => {
            eprintln!("ERROR: no URL found in {}", opts.input);
            return ExitCode::from(2);
        }
    };

    if opts.all {
        println!("Found URLs ({}):", report.candidates.len());
        print!("{}", report.render(opts.full));
        return ExitCode::SUCCESS;
    }

    if opts.full {
        println!("{}", selected);
    } else {
        println!("{}", report.redacted().unwrap_or(selected));
        if entrytrace::trace::has_sensitive_parts(selected) {
            eprintln!("\nHint: query/fragment removed; use --full locally (do not commit/log).");
        }
    }

    ExitCode::SUCCESS
}

async fn trace(opts: &TraceArgs) -> anyhow::Result<ExitCode> {
    let browser = Browser::launch().await.context("failed to create browser")?;
    let page = browser.new_page().await.context("failed to create page")?;

    let mut config = TracerConfig::new();
    if let Some(ref endpoint) = opts.endpoint {
        config = config.endpoint_fragment(endpoint.clone());
    }
    let tracer = EntryTracer::inject(&page, config);
    if opts.full {
        page.enable_full_entry_url();
    }

    page.set_url(&opts.url).context("invalid URL")?;
    let response = page
        .fetch_url(&opts.url)
        .await
        .with_context(|| format!("request to {} failed", entrytrace::trace::redact_url(&opts.url)))?;

    tracing::debug!(status = %response.status, "Traced request completed");

    // In JSON mode stdout carries only the snapshot
    if opts.json {
        if let Some(snapshot) = page.trace_snapshot() {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        let code = if tracer.published().entry_url.is_some() { 0 } else { 2 };
        return Ok(ExitCode::from(code));
    }

    let published = tracer.published();
    match (published.entry_url_full, published.entry_url) {
        (Some(full), _) if opts.full => println!("{}", full),
        (_, Some(redacted)) => println!("{}", redacted),
        _ => {
            eprintln!(
                "No entry URL captured (status {}, endpoint {})",
                response.status,
                tracer.matcher().endpoint_fragment()
            );
            return Ok(ExitCode::from(2));
        }
    }

    Ok(ExitCode::SUCCESS)
}
