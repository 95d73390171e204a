mod cached_token_repository;
mod dex_token_repository;
mod traits;

pub use cached_token_repository::CachedTokenRepository;
pub use dex_token_repository::DexTokenRepository;
pub use traits::TokenRepository;
