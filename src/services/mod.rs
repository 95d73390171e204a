//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the tool server. They provide a clean boundary between
//! the MCP handlers and the data access layer.

mod token_service;
mod trade_service;

pub use token_service::{TokenPage, TokenService, TokenServiceImpl};
pub use trade_service::{TradeService, TradeServiceImpl, DEFAULT_HISTORY_LIMIT};
