pub mod environment;
pub mod fs;
pub mod text;

pub use environment::get_transcripts_dir;
pub use fs::read_transcript;
pub use text::floor_char_boundary;
