// Core pipeline exports
pub mod handler;
pub mod normalize;
pub mod prompt;
pub mod skills;

pub use handler::RequestHandler;
pub use normalize::{into_outcome, normalize};
pub use prompt::{compose_prompt, candidate_line, instruction_line};
pub use skills::{decode_skills, SkillsDecodeError};
