mod body;
mod input;
mod resolver;

pub use self::body::{MarbleBody, MarbleParams};
pub use self::input::{ControlFrame, ControlInput};
pub use self::resolver::ContactResolver;
