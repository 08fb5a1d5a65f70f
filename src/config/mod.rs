pub mod settings;

pub use settings::{
    Settings, UpdateMode, DEFAULT_SUPPORT_CONTACT, DEFAULT_WEBAPP_URL, PLACEHOLDER_TOKEN,
};
