mod mock_generator;

pub use mock_generator::MockTextGenerator;
