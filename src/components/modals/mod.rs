pub mod error;
pub mod help;
pub mod helpers;
pub mod manager;
pub mod prompt;

pub use error::ErrorModal;
pub use help::HelpModal;
pub use manager::ModalManager;
pub use prompt::PromptModal;
