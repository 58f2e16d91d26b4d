pub mod classifier;
pub mod http;
pub mod sampler;
pub mod traits;
pub mod validator;
