mod mock_platform;

pub use mock_platform::MockPlatformServer;
