pub mod clock;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod provider;
pub mod publisher;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dataset::VersionInfo;
pub use error::{CivicError, Result};
pub use generator::Generator;
pub use pipeline::UpdatePipeline;
pub use provider::{DataProvider, FileProvider, StaticProvider};
pub use publisher::{GitPublisher, NoopPublisher, Publisher};
pub use validation::validate_political_data;
