mod client;
mod error;
mod formatting;
mod language;

pub use client::{DEEPL_API_URL, DeepLClient, Translation, TranslationRequest, Translator};
pub use error::TranslateError;
pub use formatting::{Marker, extract_markers, reapply_markers};
pub use language::{TARGET_LANGUAGES, looks_like_target_lang, print_languages};
