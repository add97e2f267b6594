pub mod glyphs;
pub mod json;
pub mod renderers;
