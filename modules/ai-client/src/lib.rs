pub mod gemini;
pub mod traits;
pub mod util;

pub use gemini::{Gemini, GenerationSettings};
pub use traits::TextGenerator;
pub use util::{extract_json_object, strip_code_blocks, truncate_to_char_boundary};
