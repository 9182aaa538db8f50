mod credentials;
mod map;
mod navbar;

pub use self::{credentials::*, map::*, navbar::*};
