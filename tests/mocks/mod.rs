mod mock_store;
mod mock_token_repository;

#[allow(unused_imports)]
pub use mock_store::MockStore;
#[allow(unused_imports)]
pub use mock_token_repository::MockTokenRepository;
