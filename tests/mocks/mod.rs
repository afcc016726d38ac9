pub mod mock_folk_client;

#[allow(unused_imports)]
pub use mock_folk_client::{folk_id, MockFolkClient};
