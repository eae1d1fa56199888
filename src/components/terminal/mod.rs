mod hooks;
mod host;
mod input;
mod output;
mod terminal;

pub use host::BrowserHost;
pub use input::Input;
pub use output::Output;
pub use terminal::Terminal;
