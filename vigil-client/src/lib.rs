pub mod error;
pub mod gateway;
pub mod mode;
pub mod notice;
pub mod remote;

pub use error::ClientError;
pub use gateway::Gateway;
pub use mode::{DEFAULT_API_BASE_URL, ModeManager};
pub use notice::Notice;
pub use remote::RemoteApi;
