pub mod dispatcher;
pub mod error;
pub mod judge;
pub mod news;
pub mod parser;
pub mod policy;
pub mod prompts;
pub mod relay;

pub mod test_support;

pub use dispatcher::{HttpDispatcher, WebhookDispatcher};
pub use error::RelayError;
pub use judge::{ChatConfig, JudgmentModel, OpenAiJudge};
pub use news::{NewsApiClient, NewsSource};
pub use parser::parse_judgment;
pub use policy::is_trade_recommended;
pub use prompts::PromptConfig;
pub use relay::{Relay, RelayReport};
