pub mod bundled;
pub mod http;

pub use bundled::BundledResourceLoader;
pub use http::HttpResourceLoader;
