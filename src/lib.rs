//! Nauvoo — tool-calling agent loop for chat models.
//!
//! Provides the message/conversation types, a tool registry with JSON
//! Schema argument validation, and the dispatch loop that alternates
//! between asking a chat model for a response and executing any tools it
//! requests, until a tool-call-free response is produced or the depth
//! bound is exceeded.
//!
//! # Quick Start
//!
//! ```no_run
//! use nauvoo::prelude::*;
//!
//! # async fn example() -> nauvoo::error::Result<()> {
//! let config = Config::from_env()?;
//! let provider = nauvoo::provider::create_provider(&config)?;
//! let registry = nauvoo::tools::builtin::default_registry(&config);
//!
//! let mut conversation = Conversation::with_system("You are a weather assistant.");
//! conversation.push(Message::user("What's the weather in Houston TX?"));
//!
//! let reply = nauvoo::dispatch::resolve_turn(
//!     provider.as_ref(),
//!     &registry,
//!     &mut conversation,
//!     &GenerationSettings::default(),
//! )
//! .await?;
//! println!("{}", reply.text());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
pub mod webhook;
