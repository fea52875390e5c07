//! Maimai - Rust 商品搜索助手
//!
//! 入口：初始化日志、加载配置、组装调度器，并运行 stdin REPL 主循环。

use std::io::Write;

use anyhow::Context;
use maimai::config::load_config;
use maimai::dispatch::create_dispatcher;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let config = load_config(None).context("Failed to load config")?;
    let dispatcher = create_dispatcher(&config);

    println!("maimai - type a product query, :actions for the catalog, :quit to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":actions" => println!("{}", dispatcher.registry().to_schema_json()),
            _ => {
                let result = dispatcher.dispatch(&line).await;
                println!("{}", serde_json::to_string_pretty(&result.to_json())?);
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("maimai> ");
    std::io::stdout().flush()
}
