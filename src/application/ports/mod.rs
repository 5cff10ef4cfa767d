pub mod geolocator;
pub mod queue_store;
pub mod realtime_channel;
pub mod remote_gateway;
pub mod session_provider;

pub use geolocator::Geolocator;
pub use queue_store::QueueStore;
pub use realtime_channel::{ChangeStream, ChannelError, RealtimeChannel};
pub use remote_gateway::RemoteGateway;
pub use session_provider::{SessionIdentity, SessionProvider};
