mod mock_session;

pub use mock_session::MockTunnelSession;
