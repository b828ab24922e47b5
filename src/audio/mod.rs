//! Narration audio file handling

mod narration;

pub use narration::NarrationFile;
