//! MCP tool handlers for the gateway.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::{DexScreenerError, TradeError};
use crate::metrics::Metrics;
use crate::models::{TradeRequest, TradeSide};
use crate::services::{TokenService, TradeService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes DexScreener token data and trade simulation.
#[derive(Clone)]
pub struct GatewayMcpServer {
    token_service: Arc<dyn TokenService>,
    trade_service: Arc<dyn TradeService>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for GatewayMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "dexscreener-gateway".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Token price gateway for DexScreener - provides token search, token lookup, and simulated trades.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct TokensParams {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TokenParams {
    address: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SimulateTradeParams {
    token_address: String,
    amount: f64,
    is_buy: bool,
    slippage: f64,
    /// Reference price in USD; looked up from DexScreener when omitted
    #[serde(default)]
    price: Option<f64>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn dex_error(e: DexScreenerError) -> McpError {
    match e {
        DexScreenerError::InvalidRequest(_) => invalid_params(e),
        other => to_mcp_error(other),
    }
}

fn trade_error(e: TradeError) -> McpError {
    match e {
        TradeError::InvalidRequest(_) => invalid_params(e),
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl GatewayMcpServer {
    /// Create a new gateway server.
    pub fn new(
        token_service: Arc<dyn TokenService>,
        trade_service: Arc<dyn TradeService>,
        metrics: Metrics,
    ) -> Self {
        Self {
            token_service,
            trade_service,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// List or search tokens.
    #[tool(
        description = "List tokens from DexScreener, optionally filtered by a search query (symbol, name or address). Supports limit/offset pagination."
    )]
    async fn tokens(&self, params: Parameters<TokensParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let page = self
            .token_service
            .list_tokens(params.search, params.limit, params.offset)
            .await
            .map_err(dex_error)?;

        json_result(&page)
    }

    /// Look up a single token.
    #[tool(description = "Get price, 24h price change and identity of a token by contract address")]
    async fn token(&self, params: Parameters<TokenParams>) -> Result<CallToolResult, McpError> {
        let token = self
            .token_service
            .get_token(&params.0.address)
            .await
            .map_err(dex_error)?;

        json_result(&token)
    }

    /// Simulate a trade.
    #[tool(
        description = "Simulate a buy or sell of a token with slippage. Nothing is executed on-chain; the trade is recorded in the session's trade history."
    )]
    async fn simulate_trade(
        &self,
        params: Parameters<SimulateTradeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: simulate_trade called");

        let price = match params.price {
            Some(price) => price,
            None => {
                self.token_service
                    .get_token(&params.token_address)
                    .await
                    .map_err(dex_error)?
                    .price
            }
        };

        let request = TradeRequest {
            token_address: params.token_address,
            amount: params.amount,
            side: TradeSide::from_is_buy(params.is_buy),
            price,
            slippage: params.slippage,
        };
        let summary = request.describe();

        let trade = self
            .trade_service
            .simulate_trade(request)
            .await
            .map_err(trade_error)?;

        json_result(&serde_json::json!({
            "summary": summary,
            "trade": trade,
        }))
    }

    /// Show simulated trades.
    #[tool(description = "List all trades simulated in this session, oldest first")]
    async fn trade_history(&self) -> Result<CallToolResult, McpError> {
        let history = self.trade_service.trade_history().await;
        json_result(&history)
    }

    /// Report gateway counters.
    #[tool(description = "Report upstream request and cache counters for this gateway")]
    async fn gateway_metrics(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.metrics.summary())
    }
}
