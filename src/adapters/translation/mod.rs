//! Translation Adapters.

mod google_translator;

pub use google_translator::{GoogleTranslator, DEFAULT_TRANSLATE_BASE_URL};
