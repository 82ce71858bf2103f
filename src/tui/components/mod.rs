//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: model name, status line, "↓ New" hint
//! - `MessageView`: one conversation message
//! - `TypingIndicator`: three animated dots while a reply is pending
//! - `LandingPage`: welcome placeholder before the first message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: text input, emits `Submit`
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! TitleBar::new(&app.model_name, &app.status_message, has_unseen).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── landing.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── typing_indicator.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod landing;
pub use landing::LandingPage;
pub mod message;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod typing_indicator;
