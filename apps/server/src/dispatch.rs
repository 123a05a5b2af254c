//! Routes tool requests to `MarketDataTools` and renders the JSON reply.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use tickerdesk_market_data::performance::DEFAULT_RANK_LIMIT;
use tickerdesk_market_data::{ErrorRecord, MarketDataTools, OutputSize, RankMetric};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    GetStockQuote,
    GetDailyPrices,
    SearchSymbol,
    AnalyzeTopPerformers,
    Health,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::GetStockQuote,
        Tool::GetDailyPrices,
        Tool::SearchSymbol,
        Tool::AnalyzeTopPerformers,
        Tool::Health,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Tool::GetStockQuote => "get_stock_quote",
            Tool::GetDailyPrices => "get_daily_prices",
            Tool::SearchSymbol => "search_symbol",
            Tool::AnalyzeTopPerformers => "analyze_top_performers",
            Tool::Health => "health",
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| format!("Unknown tool: {}", name))
    }
}

/// One line of the stdin protocol.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Deserialize)]
struct SymbolArgs {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct DailyArgs {
    symbol: String,
    #[serde(default = "default_outputsize")]
    outputsize: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    keywords: String,
}

#[derive(Debug, Deserialize)]
struct TopPerformersArgs {
    symbols: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default = "default_metric")]
    metric: String,
}

fn default_outputsize() -> String {
    OutputSize::default().as_str().to_string()
}

fn default_limit() -> usize {
    DEFAULT_RANK_LIMIT
}

fn default_metric() -> String {
    RankMetric::default().as_str().to_string()
}

/// Run `tool` with already-parsed `arguments` and render the reply.
pub async fn dispatch(tools: &MarketDataTools, tool: &str, arguments: Value, pretty: bool) -> String {
    let tool = match Tool::from_str(tool) {
        Ok(tool) => tool,
        Err(message) => return render(&error_record(message), pretty),
    };

    // A missing or null argument object means "no arguments"
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    match tool {
        Tool::GetStockQuote => match parse_args::<SymbolArgs>(tool, arguments) {
            Ok(args) => render(&tools.get_stock_quote(&args.symbol).await, pretty),
            Err(record) => render(&record, pretty),
        },
        Tool::GetDailyPrices => match parse_args::<DailyArgs>(tool, arguments) {
            Ok(args) => render(
                &tools.get_daily_prices(&args.symbol, &args.outputsize).await,
                pretty,
            ),
            Err(record) => render(&record, pretty),
        },
        Tool::SearchSymbol => match parse_args::<SearchArgs>(tool, arguments) {
            Ok(args) => render(&tools.search_symbol(&args.keywords).await, pretty),
            Err(record) => render(&record, pretty),
        },
        Tool::AnalyzeTopPerformers => match parse_args::<TopPerformersArgs>(tool, arguments) {
            Ok(args) => render(
                &tools
                    .analyze_top_performers(&args.symbols, args.limit, &args.metric)
                    .await,
                pretty,
            ),
            Err(record) => render(&record, pretty),
        },
        Tool::Health => render(&tools.health(), pretty),
    }
}

/// Run one tool from command-line arguments; `raw_arguments` is a JSON object.
pub async fn run_once(tools: &MarketDataTools, tool: &str, raw_arguments: Option<&str>) -> String {
    dispatch_raw(tools, tool, raw_arguments, true).await
}

/// Like [`dispatch`], but parses `raw_arguments` first. Absent or blank input means no arguments.
pub async fn dispatch_raw(
    tools: &MarketDataTools,
    tool: &str,
    raw_arguments: Option<&str>,
    pretty: bool,
) -> String {
    let arguments = match raw_arguments.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                return render(
                    &error_record(format!("Malformed arguments for {}: {}", tool, e)),
                    pretty,
                )
            }
        },
        None => Value::Null,
    };

    dispatch(tools, tool, arguments, pretty).await
}

/// Serve newline-delimited requests until `reader` reaches end of input.
///
/// Each request produces exactly one compact JSON line on `writer`.
pub async fn serve_lines<R, W>(tools: &MarketDataTools, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => {
                tracing::debug!("Dispatching {}", request.tool);
                dispatch(tools, &request.tool, request.arguments, false).await
            }
            Err(e) => render(&error_record(format!("Malformed request: {}", e)), false),
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        served += 1;
    }

    tracing::info!("Input closed after {} requests", served);
    Ok(())
}

fn parse_args<T: DeserializeOwned>(tool: Tool, arguments: Value) -> Result<T, ErrorRecord> {
    serde_json::from_value(arguments)
        .map_err(|e| error_record(format!("Invalid arguments for {}: {}", tool.name(), e)))
}

fn error_record(message: String) -> ErrorRecord {
    tracing::warn!("{}", message);
    ErrorRecord::new(message)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    rendered.unwrap_or_else(|e| {
        let fallback = ErrorRecord::new(format!("Failed to serialize response: {}", e));
        serde_json::to_string(&fallback).unwrap_or_default()
    })
}
