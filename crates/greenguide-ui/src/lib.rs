//! Page controllers and the terminal shell for Green Guide.
//!
//! Pages never print directly; they render onto a [`Surface`] so the same
//! controller drives the terminal and the tests.

pub mod chatbot;
pub mod feedback;
pub mod guide;
pub mod session;
pub mod shell;
pub mod soil;
pub mod surface;

pub use chatbot::ChatbotPage;
pub use feedback::{settle, Feedback, Severity};
pub use guide::GuidePage;
pub use session::{Command, CommandError, Session};
pub use shell::{Action, Page, Shell, ShellInput};
pub use soil::SoilView;
pub use surface::{RecordingSurface, Rendered, Surface, TerminalSurface};
