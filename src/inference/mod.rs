pub mod fallback;
pub mod provider;
pub mod providers;
pub mod resolver;
pub mod types;

pub use provider::{CompletionProvider, CompletionRequest, ProviderError};
pub use providers::ChatCompletionsProvider;
pub use resolver::{ReplyResolver, ResolverSettings};
