pub mod ids;
pub mod init;
pub mod render;
pub mod serve;
pub mod templates;

pub use ids::{ids, IdsArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
pub use templates::{templates, TemplatesArgs};
