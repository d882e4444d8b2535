//! comflow command line.
//!
//! Issues single requests through the pooled client, either from async code
//! or through the detached bridge, and runs the OCR vendor call.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use comflow::config::load_settings;
use comflow::http::{HttpMethod, RequestSpec, ResponseResult};
use comflow::observability::init_logging;
use comflow::vendor::chat::{ChatCompletions, ChatReply, DEFAULT_API_BASE, OCR_MODEL};
use comflow::vendor::credentials::{resolve_api_key, DEFAULT_API_KEY_ENV};
use comflow::AppContext;

#[derive(Parser)]
#[command(name = "comflow")]
#[command(about = "Pooled HTTP client and AI vendor calls", long_about = None)]
struct Cli {
    /// Optional TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one request and print the decoded body
    Fetch {
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: HttpMethod,

        /// Header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// JSON body
        #[arg(long, conflicts_with = "data")]
        json: Option<String>,

        /// Raw body
        #[arg(long)]
        data: Option<String>,

        /// Timeout override in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Run on a detached execution context and join it
        #[arg(long)]
        detach: bool,
    },
    /// Extract text from an image with the OCR model
    Ocr {
        #[arg(long)]
        image_url: String,

        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,

        /// Falls back to KUAI_API_KEY
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        system_prompt: Option<String>,

        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Also print the full vendor reply
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings.observability.log_level);
    let ctx = AppContext::from_settings(settings)?;

    let result = run(&ctx, cli.command);
    ctx.shutdown();
    result
}

fn run(ctx: &AppContext, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Fetch {
            url,
            method,
            headers,
            json,
            data,
            timeout,
            detach,
        } => {
            let spec = build_spec(url, method, &headers, json, data, timeout)?;

            let response = if detach {
                // Synchronous caller: hand the request to the bridge and join.
                ctx.http().spawn_request(spec)?.join()??
            } else {
                let runtime = tokio::runtime::Runtime::new()?;
                runtime.block_on(ctx.http().request(&spec))?
            };
            print_response(&response)?;
        }
        Commands::Ocr {
            image_url,
            api_base,
            api_key,
            system_prompt,
            timeout,
            raw,
        } => {
            let key = resolve_api_key(api_key.as_deref(), DEFAULT_API_KEY_ENV)?;
            let chat = ChatCompletions::new(ctx.http().clone(), api_base, key, OCR_MODEL)
                .with_timeout(Duration::from_secs(timeout));

            let runtime = tokio::runtime::Runtime::new()?;
            let reply = runtime.block_on(chat.ocr(&image_url, system_prompt.as_deref()))?;
            println!("{}", render_reply(&reply, raw)?);
        }
    }

    Ok(())
}

fn build_spec(
    url: String,
    method: HttpMethod,
    headers: &[String],
    json: Option<String>,
    data: Option<String>,
    timeout: Option<u64>,
) -> Result<RequestSpec, Box<dyn std::error::Error>> {
    let mut spec = RequestSpec::new(method, url);

    for header in headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("invalid header '{}', expected 'Name: value'", header))?;
        spec = spec.header(name.trim(), value.trim());
    }

    if let Some(json) = json {
        spec = spec.json(serde_json::from_str(&json)?);
    }
    if let Some(data) = data {
        spec = spec.raw(data);
    }
    if let Some(secs) = timeout {
        spec = spec.timeout(Duration::from_secs(secs));
    }

    Ok(spec)
}

fn print_response(response: &ResponseResult) -> Result<(), Box<dyn std::error::Error>> {
    match response {
        ResponseResult::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ResponseResult::Text(text) => println!("{}", text),
    }
    Ok(())
}

fn render_reply(reply: &ChatReply, raw: bool) -> Result<String, serde_json::Error> {
    if !raw {
        return Ok(reply.content.clone());
    }
    Ok(format!(
        "{}\n{}",
        reply.content,
        serde_json::to_string_pretty(&reply.raw)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply() -> ChatReply {
        ChatReply::from_raw(json!({
            "id": "chatcmpl-1",
            "choices": [{"message": {"role": "assistant", "content": "SALE 50%"}}]
        }))
    }

    #[test]
    fn test_render_text_only() {
        assert_eq!(render_reply(&reply(), false).unwrap(), "SALE 50%");
    }

    #[test]
    fn test_render_with_raw_reply() {
        let out = render_reply(&reply(), true).unwrap();
        let (text, raw) = out.split_once('\n').unwrap();
        assert_eq!(text, "SALE 50%");
        let raw: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(raw["id"], "chatcmpl-1");
    }

    #[test]
    fn test_cli_parses_raw_flag() {
        let cli = Cli::try_parse_from(["comflow", "ocr", "--image-url", "https://img/1.png", "--raw"])
            .unwrap();
        match cli.command {
            Commands::Ocr { raw, timeout, .. } => {
                assert!(raw);
                assert_eq!(timeout, 60);
            }
            _ => panic!("expected ocr"),
        }
    }
}
