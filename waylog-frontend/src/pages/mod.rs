mod entries;
mod insights;
mod login;

#[derive(Debug, Clone, Copy, Default)]
pub enum Page {
    #[default]
    Entries,
    Insights,
    Login,
}

impl Page {
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Entries => "/",
            Self::Insights => "/insights",
            Self::Login => "/login",
        }
    }
}

pub use self::{entries::*, insights::*, login::*};
